//! Core record types shared by both services

use serde::{Deserialize, Serialize};

/// Author identifier (caller-assigned)
pub type AuthorId = i64;

/// Book identifier (caller-assigned)
pub type BookId = i64;

/// Display name used whenever the author of a book cannot be determined
pub const UNKNOWN_AUTHOR: &str = "Autor desconocido";

/// Anything kept in a [`RecordStore`](crate::store::RecordStore)
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
}

/// Author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    #[serde(rename = "nombre")]
    pub name: String,
}

impl Author {
    pub fn new(id: AuthorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Record for Author {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Book record
///
/// `author_id` is a soft reference: it is never checked against the author
/// service when the book is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor_id")]
    pub author_id: AuthorId,
    #[serde(rename = "año", default)]
    pub year: Option<i32>,
}

impl Record for Book {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Book as returned by the read endpoints, joined with its author's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookWithAuthor {
    #[serde(flatten)]
    pub book: Book,
    #[serde(rename = "autor_nombre")]
    pub author_name: String,
}

/// Authors the author service starts with unless seeding is disabled
pub fn default_authors() -> Vec<Author> {
    vec![
        Author::new(1, "Gabriel García Márquez"),
        Author::new(2, "J.K. Rowling"),
        Author::new(3, "George Orwell"),
        Author::new(4, "Jane Austen"),
        Author::new(5, "J.R.R. Tolkien"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_wire_format() {
        let book: Book =
            serde_json::from_str(r#"{"id": 10, "titulo": "Emma", "autor_id": 1}"#).unwrap();
        assert_eq!(book.year, None);

        let view = BookWithAuthor {
            book,
            author_name: "Jane Austen".to_string(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 10,
                "titulo": "Emma",
                "autor_id": 1,
                "año": null,
                "autor_nombre": "Jane Austen"
            })
        );
    }

    #[test]
    fn test_author_missing_name_is_rejected() {
        let result: std::result::Result<Author, _> = serde_json::from_str(r#"{"id": 1}"#);
        assert!(result.is_err());
    }
}
