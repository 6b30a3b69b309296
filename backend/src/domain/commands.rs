//! Mutating book commands and their validation rules.
//!
//! Commands are immutable once built. Validity is recomputed on every call to
//! [`Validate::validate`].

use uuid::Uuid;

use super::book::{AUTHOR_MAX, GENRE_MAX, TITLE_MAX};
use super::validation::{RuleSet, Validate, ValidationOutcome};

fn describe_book(rules: RuleSet, title: &str, author: &str, genre: &str) -> RuleSet {
    rules
        .not_empty("Title", title)
        .max_length("Title", title, TITLE_MAX)
        .not_empty("Author", author)
        .max_length("Author", author, AUTHOR_MAX)
        .not_empty("Genre", genre)
        .max_length("Genre", genre, GENRE_MAX)
}

/// Register a new book for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBook {
    id: Uuid,
    title: String,
    author: String,
    genre: String,
}

impl CreateBook {
    /// Build the command, assigning a fresh identifier.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, author, genre)
    }

    /// Build the command with a caller-chosen identifier.
    ///
    /// A nil `id` is reported by [`Validate::validate`].
    pub fn with_id(
        id: Uuid,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
        }
    }

    /// Identifier the new book will be stored under.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Requested title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Requested author.
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Requested genre.
    pub fn genre(&self) -> &str {
        self.genre.as_str()
    }
}

impl Validate for CreateBook {
    fn validate(&self) -> ValidationOutcome {
        let rules = RuleSet::new().not_nil("Id", &self.id);
        describe_book(rules, &self.title, &self.author, &self.genre).finish()
    }
}

/// Replace the descriptive fields of an existing book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBook {
    id: Uuid,
    title: String,
    author: String,
    genre: String,
}

impl UpdateBook {
    /// Build the command for the book identified by `id`.
    pub fn new(
        id: Uuid,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
        }
    }

    /// Identifier of the book to change.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Replacement title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Replacement author.
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Replacement genre.
    pub fn genre(&self) -> &str {
        self.genre.as_str()
    }
}

impl Validate for UpdateBook {
    fn validate(&self) -> ValidationOutcome {
        let rules = RuleSet::new().not_nil("Id", &self.id);
        describe_book(rules, &self.title, &self.author, &self.genre).finish()
    }
}

/// Remove a book. Carries no validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteBook {
    id: Uuid,
}

impl DeleteBook {
    /// Build the command for the book identified by `id`.
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }

    /// Identifier of the book to remove.
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Validate for DeleteBook {
    fn validate(&self) -> ValidationOutcome {
        ValidationOutcome::valid()
    }
}

/// Every command the dispatcher routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookCommand {
    /// See [`CreateBook`].
    Create(CreateBook),
    /// See [`UpdateBook`].
    Update(UpdateBook),
    /// See [`DeleteBook`].
    Delete(DeleteBook),
}

impl BookCommand {
    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create(_) => "create_book",
            Self::Update(_) => "update_book",
            Self::Delete(_) => "delete_book",
        }
    }
}

impl Validate for BookCommand {
    fn validate(&self) -> ValidationOutcome {
        match self {
            Self::Create(command) => command.validate(),
            Self::Update(command) => command.validate(),
            Self::Delete(command) => command.validate(),
        }
    }
}

impl From<CreateBook> for BookCommand {
    fn from(value: CreateBook) -> Self {
        Self::Create(value)
    }
}

impl From<UpdateBook> for BookCommand {
    fn from(value: UpdateBook) -> Self {
        Self::Update(value)
    }
}

impl From<DeleteBook> for BookCommand {
    fn from(value: DeleteBook) -> Self {
        Self::Delete(value)
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
