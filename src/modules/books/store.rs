//! In-memory book catalog.
//!
//! Books are never removed. Deleting one flips `archived`, after which the id
//! answers [`CatalogError::Gone`] for reads and deletes.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use thiserror::Error;

use super::models::{Book, BookId, CreateBook, Patch, UpdateBook};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Outcomes of catalog operations other than success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{field} {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    #[error("book {0} not found")]
    NotFound(BookId),

    #[error("book {0} is archived")]
    Gone(BookId),

    #[error("invalid book id {0}")]
    InvalidId(BookId),

    /// The listing is empty. Not a failure, but reported the same way.
    #[error("no active books")]
    NoContent,
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug)]
struct Catalog {
    // Ids are handed out in increasing order, so key order is insertion order.
    books: BTreeMap<BookId, Book>,
    next_id: BookId,
}

/// Book catalog guarded by a single lock.
#[derive(Debug)]
pub struct BookStore {
    catalog: Mutex<Catalog>,
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            catalog: Mutex::new(Catalog {
                books: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Add a book and return it with its new id.
    pub fn create(&self, input: CreateBook) -> CatalogResult<Book> {
        validate_title(&input.title)?;
        validate_rating(input.rating)?;

        let mut catalog = self.catalog.lock();
        let id = catalog.next_id;
        catalog.next_id += 1;

        let book = Book {
            id,
            title: input.title,
            rating: input.rating,
            description: input.description,
            archived: false,
        };
        catalog.books.insert(id, book.clone());

        tracing::info!(book_id = id, "book created");
        Ok(book)
    }

    /// Apply the supplied fields of `patch` to book `id`.
    ///
    /// The patch is validated as a whole before anything is written, so a
    /// rejected update leaves the book untouched. Archived books can still be
    /// edited; their `archived` flag is not affected.
    pub fn update(&self, id: BookId, patch: UpdateBook) -> CatalogResult<Book> {
        let title = match patch.title {
            Patch::Unset => None,
            Patch::Clear => return Err(required("title")),
            Patch::Set(title) => {
                validate_title(&title)?;
                Some(title)
            }
        };
        let rating = match patch.rating {
            Patch::Unset => None,
            Patch::Clear => return Err(required("rating")),
            Patch::Set(rating) => {
                validate_rating(rating)?;
                Some(rating)
            }
        };

        let mut catalog = self.catalog.lock();
        let book = catalog.books.get_mut(&id).ok_or_else(|| {
            tracing::debug!(book_id = id, "update of unknown book");
            CatalogError::NotFound(id)
        })?;

        if let Some(title) = title {
            book.title = title;
        }
        if let Some(rating) = rating {
            book.rating = rating;
        }
        match patch.description {
            Patch::Unset => {}
            Patch::Clear => book.description = None,
            Patch::Set(description) => book.description = Some(description),
        }

        tracing::info!(book_id = id, "book updated");
        Ok(book.clone())
    }

    /// Fetch an active book.
    pub fn get(&self, id: BookId) -> CatalogResult<Book> {
        let catalog = self.catalog.lock();
        active_entry(&catalog.books, id).cloned()
    }

    /// Every active book in creation order; [`CatalogError::NoContent`] if
    /// there are none.
    pub fn list_active(&self) -> CatalogResult<Vec<Book>> {
        let books = self.active();
        if books.is_empty() {
            return Err(CatalogError::NoContent);
        }
        Ok(books)
    }

    /// Every active book in creation order, possibly none.
    pub fn active(&self) -> Vec<Book> {
        let catalog = self.catalog.lock();
        catalog
            .books
            .values()
            .filter(|book| !book.archived)
            .cloned()
            .collect()
    }

    /// Archive book `id`. A second delete of the same id reports `Gone`.
    pub fn delete(&self, id: BookId) -> CatalogResult<()> {
        let mut catalog = self.catalog.lock();
        active_entry(&catalog.books, id)?;
        if let Some(book) = catalog.books.get_mut(&id) {
            book.archived = true;
        }

        tracing::info!(book_id = id, "book archived");
        Ok(())
    }

    /// Total number of records, archived ones included.
    pub fn len(&self) -> usize {
        self.catalog.lock().books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

fn active_entry(books: &BTreeMap<BookId, Book>, id: BookId) -> CatalogResult<&Book> {
    if id < 0 {
        tracing::debug!(book_id = id, "negative book id");
        return Err(CatalogError::InvalidId(id));
    }
    let book = books.get(&id).ok_or(CatalogError::NotFound(id))?;
    if book.archived {
        return Err(CatalogError::Gone(id));
    }
    Ok(book)
}

fn validate_title(title: &str) -> CatalogResult<()> {
    if title.is_empty() {
        return Err(CatalogError::Validation {
            field: "title",
            reason: "must not be empty",
        });
    }
    Ok(())
}

fn validate_rating(rating: f64) -> CatalogResult<()> {
    // NaN fails both comparisons
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CatalogError::Validation {
            field: "rating",
            reason: "must be between 0 and 5",
        });
    }
    Ok(())
}

fn required(field: &'static str) -> CatalogError {
    CatalogError::Validation {
        field,
        reason: "must not be null",
    }
}
