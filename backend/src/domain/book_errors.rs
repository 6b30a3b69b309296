//! Domain errors reported by the book handlers.

use super::error::{ErrorDetail, ErrorMessage, ErrorStatus};

/// Code for a missing or foreign book.
pub const BOOK_NOT_FOUND: &str = "booknotfound";
/// Code for a title the caller already registered.
pub const DUPLICATE_TITLE: &str = "useralreadyhasbooktitle";
/// Code for a route id that disagrees with the payload id.
pub const BOOK_ID_MISMATCH: &str = "bookidmismatch";

/// `404 booknotfound`.
///
/// Reported both for absent books and for books owned by someone else.
pub fn book_not_found() -> ErrorDetail {
    ErrorDetail::new(
        ErrorStatus::NOT_FOUND,
        ErrorMessage::new(BOOK_NOT_FOUND, "Informed book does not exist"),
    )
}

/// `400 useralreadyhasbooktitle`.
pub fn duplicate_title() -> ErrorDetail {
    ErrorDetail::new(
        ErrorStatus::BAD_REQUEST,
        ErrorMessage::new(
            DUPLICATE_TITLE,
            "User has already registered a book with this title",
        ),
    )
}

/// `400 bookidmismatch`.
pub fn book_id_mismatch() -> ErrorDetail {
    ErrorDetail::new(
        ErrorStatus::BAD_REQUEST,
        ErrorMessage::new(BOOK_ID_MISMATCH, "The route and body id are not the same"),
    )
}
