//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Books owned by authenticated callers.
    ///
    /// `(owner_id, title)` is indexed for the duplicate-title check and the
    /// ordered owner listing.
    books (id) {
        /// Primary key: UUID assigned by the create command.
        id -> Uuid,
        /// Owner that registered the book.
        owner_id -> Uuid,
        /// Title (max 150 characters).
        title -> Varchar,
        /// Author name (max 100 characters).
        author -> Varchar,
        /// Genre (max 50 characters).
        genre -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}
