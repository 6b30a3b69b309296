//! Book aggregate and its read model.
//!
//! A [`Book`] always satisfies the field limits below; construction and
//! [`Book::update`] check every field before anything is stored, so a failed
//! update leaves the book untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::owner::OwnerId;

/// Maximum number of characters in a book title.
pub const TITLE_MAX: usize = 150;
/// Maximum number of characters in an author name.
pub const AUTHOR_MAX: usize = 100;
/// Maximum number of characters in a genre.
pub const GENRE_MAX: usize = 50;

/// Validation errors raised by [`Book`] constructors and mutators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookValidationError {
    /// The book id was the nil UUID.
    #[error("book id must not be nil")]
    NilId,
    /// A descriptive field was empty or whitespace.
    #[error("book {field} must not be empty")]
    EmptyField {
        /// Offending field.
        field: &'static str,
    },
    /// A descriptive field exceeded its character limit.
    #[error("book {field} must be at most {max} characters, got {actual}")]
    FieldTooLong {
        /// Offending field.
        field: &'static str,
        /// Permitted number of characters.
        max: usize,
        /// Characters supplied.
        actual: usize,
    },
}

/// Input used to construct a [`Book`].
#[derive(Debug, Clone)]
pub struct BookDraft {
    /// Non-nil book identifier.
    pub id: Uuid,
    /// Owner the book is registered to.
    pub owner_id: OwnerId,
    /// Title, at most [`TITLE_MAX`] characters.
    pub title: String,
    /// Author, at most [`AUTHOR_MAX`] characters.
    pub author: String,
    /// Genre, at most [`GENRE_MAX`] characters.
    pub genre: String,
}

/// A book owned by exactly one caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: Uuid,
    owner_id: OwnerId,
    title: String,
    author: String,
    genre: String,
}

impl Book {
    /// Validate and construct a book.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::{Book, BookDraft, OwnerId};
    /// use uuid::Uuid;
    ///
    /// let book = Book::new(BookDraft {
    ///     id: Uuid::new_v4(),
    ///     owner_id: OwnerId::random(),
    ///     title: "Dune".to_owned(),
    ///     author: "Frank Herbert".to_owned(),
    ///     genre: "Science fiction".to_owned(),
    /// })
    /// .expect("valid book");
    /// assert_eq!(book.title(), "Dune");
    /// ```
    pub fn new(draft: BookDraft) -> Result<Self, BookValidationError> {
        let BookDraft {
            id,
            owner_id,
            title,
            author,
            genre,
        } = draft;
        if id.is_nil() {
            return Err(BookValidationError::NilId);
        }
        check_fields(&title, &author, &genre)?;
        Ok(Self {
            id,
            owner_id,
            title,
            author,
            genre,
        })
    }

    /// Replace the descriptive fields after validating all three.
    pub fn update(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Result<(), BookValidationError> {
        let (title, author, genre) = (title.into(), author.into(), genre.into());
        check_fields(&title, &author, &genre)?;
        self.title = title;
        self.author = author;
        self.genre = genre;
        Ok(())
    }

    /// Book identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owner of the book.
    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Current title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Current author.
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Current genre.
    pub fn genre(&self) -> &str {
        self.genre.as_str()
    }

    /// Project into the owner-facing read model.
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id,
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
        }
    }
}

fn check_fields(title: &str, author: &str, genre: &str) -> Result<(), BookValidationError> {
    check_field("title", title, TITLE_MAX)?;
    check_field("author", author, AUTHOR_MAX)?;
    check_field("genre", genre, GENRE_MAX)
}

fn check_field(field: &'static str, value: &str, max: usize) -> Result<(), BookValidationError> {
    if value.trim().is_empty() {
        return Err(BookValidationError::EmptyField { field });
    }
    let actual = value.chars().count();
    if actual > max {
        return Err(BookValidationError::FieldTooLong { field, max, actual });
    }
    Ok(())
}

/// Read model returned by book queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    /// Book identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// Genre.
    pub genre: String,
}
