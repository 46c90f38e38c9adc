//! Server-rendered pages over the same catalog.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Html,
};
use libris_http::error::AppResult;

use super::{book_id, SharedStore};
use crate::modules::books::models::{Book, BookId};
use crate::utils::escape_html;

pub(super) async fn list_page(State(store): State<SharedStore>) -> Html<String> {
    Html(render_list(&store.active()))
}

pub(super) async fn detail_page(
    State(store): State<SharedStore>,
    path: Result<Path<BookId>, PathRejection>,
) -> AppResult<Html<String>> {
    let id = book_id(path)?;
    let book = store.get(id)?;
    Ok(Html(render_detail(&book)))
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

pub(crate) fn render_list(books: &[Book]) -> String {
    let mut body = String::from("<h1>Books</h1>\n");
    if books.is_empty() {
        body.push_str("<p>No books available.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for book in books {
            body.push_str(&format!(
                "<li><a href=\"/books/{}/html\">{}</a> ({})</li>\n",
                book.id,
                escape_html(&book.title),
                book.rating
            ));
        }
        body.push_str("</ul>\n");
    }
    page("Books", &body)
}

pub(crate) fn render_detail(book: &Book) -> String {
    let description = match &book.description {
        Some(text) => format!("<p>{}</p>\n", escape_html(text)),
        None => "<p><em>No description.</em></p>\n".to_string(),
    };
    let body = format!(
        "<h1>{}</h1>\n<p>Rating: {}</p>\n{}<p><a href=\"/books/html\">Back to list</a></p>\n",
        escape_html(&book.title),
        book.rating,
        description
    );
    page(&book.title, &body)
}
