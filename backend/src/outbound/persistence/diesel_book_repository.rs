//! PostgreSQL-backed `BookRepository` implementation using Diesel ORM.
//!
//! Rows are converted back into [`Book`] through its validated constructor,
//! so a row that violates the domain limits surfaces as a query error.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, BookDraft, BookSummary, OwnerId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BookRow, BookSummaryRow, BookUpdate, NewBookRow};
use super::pool::DbPool;
use super::schema::books;

/// Diesel-backed implementation of the book repository port.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_book(row: BookRow) -> Result<Book, BookRepositoryError> {
    let BookRow {
        id,
        owner_id,
        title,
        author,
        genre,
        created_at: _,
        updated_at: _,
    } = row;

    let owner_id = OwnerId::new(owner_id)
        .map_err(|err| BookRepositoryError::query(format!("stored owner id: {err}")))?;
    Book::new(BookDraft {
        id,
        owner_id,
        title,
        author,
        genre,
    })
    .map_err(|err| BookRepositoryError::query(err.to_string()))
}

impl From<BookSummaryRow> for BookSummary {
    fn from(row: BookSummaryRow) -> Self {
        let BookSummaryRow {
            id,
            title,
            author,
            genre,
        } = row;
        Self {
            id,
            title,
            author,
            genre,
        }
    }
}

fn count_to_u64(count: i64) -> Result<u64, BookRepositoryError> {
    u64::try_from(count).map_err(|_| BookRepositoryError::query("negative row count"))
}

#[async_trait]
impl BookRepository for DieselBookRepository {
    async fn count_by_title_and_owner(
        &self,
        title: &str,
        owner: &OwnerId,
    ) -> Result<u64, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = books::table
            .filter(books::owner_id.eq(owner.as_uuid()))
            .filter(books::title.eq(title))
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        count_to_u64(count)
    }

    async fn add(&self, book: &Book) -> Result<(), BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewBookRow {
            id: book.id(),
            owner_id: *book.owner_id().as_uuid(),
            title: book.title(),
            author: book.author(),
            genre: book.genre(),
        };

        diesel::insert_into(books::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn exists_for_owner(
        &self,
        book_id: &Uuid,
        owner: &OwnerId,
    ) -> Result<bool, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            books::table
                .filter(books::id.eq(book_id))
                .filter(books::owner_id.eq(owner.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, book_id: &Uuid) -> Result<(), BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(books::table.filter(books::id.eq(book_id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn get_by_id(&self, book_id: &Uuid) -> Result<Option<Book>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = books::table
            .filter(books::id.eq(book_id))
            .select(BookRow::as_select())
            .first::<BookRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_book).transpose()
    }

    async fn update(&self, book: &Book) -> Result<(), BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = BookUpdate {
            title: book.title(),
            author: book.author(),
            genre: book.genre(),
        };

        let updated = diesel::update(books::table.filter(books::id.eq(book.id())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(BookRepositoryError::query("record not found"));
        }
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<BookSummary>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BookSummaryRow> = books::table
            .filter(books::owner_id.eq(owner.as_uuid()))
            .order((books::title.asc(), books::id.asc()))
            .select(BookSummaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(BookSummary::from).collect())
    }

    async fn get_detail(
        &self,
        book_id: &Uuid,
        owner: &OwnerId,
    ) -> Result<Option<BookSummary>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = books::table
            .filter(books::id.eq(book_id))
            .filter(books::owner_id.eq(owner.as_uuid()))
            .select(BookSummaryRow::as_select())
            .first::<BookSummaryRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(BookSummary::from))
    }
}
