use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned book identifier. Signed so that negative path ids can be
/// reported as invalid rather than failing to parse.
pub type BookId = i64;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    /// Unique identifier, assigned on creation
    pub id: BookId,
    /// Title of the book, never empty
    pub title: String,
    /// Rating in `[0, 5]`
    pub rating: f64,
    /// Free-form description
    pub description: Option<String>,
    /// Set once the book is deleted; never cleared
    pub archived: bool,
}

/// Request model for creating a new book.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub rating: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateBook {
    pub fn new(title: impl Into<String>, rating: f64, description: Option<&str>) -> Self {
        Self {
            title: title.into(),
            rating,
            description: description.map(str::to_owned),
        }
    }
}

/// One field of a partial update.
///
/// A missing JSON key is `Unset`, an explicit `null` is `Clear`, anything
/// else is `Set`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    #[default]
    Unset,
    Clear,
    Set(T),
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

/// Request model for a partial update. `archived` is deliberately absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBook {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub rating: Patch<f64>,
    #[serde(default)]
    pub description: Patch<String>,
}

impl UpdateBook {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Patch::Set(title.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Patch::Set(rating);
        self
    }

    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = match description {
            Some(text) => Patch::Set(text.to_owned()),
            None => Patch::Clear,
        };
        self
    }
}
