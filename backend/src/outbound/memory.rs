//! In-process `BookRepository` used in tests and database-less deployments.
//!
//! Books live in a `tokio::sync::RwLock<Vec<Book>>`; nothing survives a
//! restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, BookSummary, OwnerId};

/// Volatile book store.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing books.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        Self {
            books: RwLock::new(books.into_iter().collect()),
        }
    }
}

fn sorted_summaries<'a>(books: impl Iterator<Item = &'a Book>) -> Vec<BookSummary> {
    let mut summaries: Vec<BookSummary> = books.map(Book::summary).collect();
    summaries.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
    summaries
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn count_by_title_and_owner(
        &self,
        title: &str,
        owner: &OwnerId,
    ) -> Result<u64, BookRepositoryError> {
        let books = self.books.read().await;
        let count = books
            .iter()
            .filter(|book| book.owner_id() == owner && book.title() == title)
            .count();
        u64::try_from(count).map_err(|_| BookRepositoryError::query("count overflow"))
    }

    async fn add(&self, book: &Book) -> Result<(), BookRepositoryError> {
        let mut books = self.books.write().await;
        if books.iter().any(|existing| existing.id() == book.id()) {
            return Err(BookRepositoryError::query("book id already exists"));
        }
        books.push(book.clone());
        Ok(())
    }

    async fn exists_for_owner(
        &self,
        book_id: &Uuid,
        owner: &OwnerId,
    ) -> Result<bool, BookRepositoryError> {
        let books = self.books.read().await;
        Ok(books
            .iter()
            .any(|book| book.id() == *book_id && book.owner_id() == owner))
    }

    async fn delete(&self, book_id: &Uuid) -> Result<(), BookRepositoryError> {
        self.books.write().await.retain(|book| book.id() != *book_id);
        Ok(())
    }

    async fn get_by_id(&self, book_id: &Uuid) -> Result<Option<Book>, BookRepositoryError> {
        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.id() == *book_id).cloned())
    }

    async fn update(&self, book: &Book) -> Result<(), BookRepositoryError> {
        let mut books = self.books.write().await;
        let slot = books
            .iter_mut()
            .find(|existing| existing.id() == book.id())
            .ok_or_else(|| BookRepositoryError::query("record not found"))?;
        *slot = book.clone();
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<BookSummary>, BookRepositoryError> {
        let books = self.books.read().await;
        Ok(sorted_summaries(
            books.iter().filter(|book| book.owner_id() == owner),
        ))
    }

    async fn get_detail(
        &self,
        book_id: &Uuid,
        owner: &OwnerId,
    ) -> Result<Option<BookSummary>, BookRepositoryError> {
        let books = self.books.read().await;
        Ok(books
            .iter()
            .find(|book| book.id() == *book_id && book.owner_id() == owner)
            .map(Book::summary))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::BookDraft;

    fn book(owner: OwnerId, title: &str) -> Book {
        Book::new(BookDraft {
            id: Uuid::new_v4(),
            owner_id: owner,
            title: title.to_owned(),
            author: "Anonymous".to_owned(),
            genre: "Fiction".to_owned(),
        })
        .expect("valid book")
    }

    #[fixture]
    fn owner() -> OwnerId {
        OwnerId::random()
    }

    #[rstest]
    #[tokio::test]
    async fn add_then_get_round_trips_fields(owner: OwnerId) {
        let repo = InMemoryBookRepository::new();
        let stored = book(owner, "Dune");

        repo.add(&stored).await.expect("add succeeds");
        let loaded = repo
            .get_by_id(&stored.id())
            .await
            .expect("lookup succeeds")
            .expect("book present");

        assert_eq!(loaded, stored);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_ids_are_rejected(owner: OwnerId) {
        let stored = book(owner, "Dune");
        let repo = InMemoryBookRepository::with_books([stored.clone()]);

        let error = repo.add(&stored).await.expect_err("duplicate id");
        assert!(matches!(error, BookRepositoryError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_scoped_and_ordered_by_title(owner: OwnerId) {
        let repo = InMemoryBookRepository::with_books([
            book(owner, "Emma"),
            book(OwnerId::random(), "Anna Karenina"),
            book(owner, "Dune"),
        ]);

        let titles: Vec<String> = repo
            .list_by_owner(&owner)
            .await
            .expect("list succeeds")
            .into_iter()
            .map(|summary| summary.title)
            .collect();

        assert_eq!(titles, ["Dune", "Emma"]);
    }

    #[rstest]
    #[tokio::test]
    async fn owner_scoped_reads_hide_foreign_books(owner: OwnerId) {
        let foreign = book(OwnerId::random(), "Dune");
        let repo = InMemoryBookRepository::with_books([foreign.clone()]);

        assert!(
            !repo
                .exists_for_owner(&foreign.id(), &owner)
                .await
                .expect("exists succeeds")
        );
        assert!(
            repo.get_detail(&foreign.id(), &owner)
                .await
                .expect("detail succeeds")
                .is_none()
        );
        assert_eq!(
            repo.count_by_title_and_owner("Dune", &owner)
                .await
                .expect("count succeeds"),
            0
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_and_delete_modify_the_store(owner: OwnerId) {
        let mut stored = book(owner, "Dune");
        let repo = InMemoryBookRepository::with_books([stored.clone()]);

        stored
            .update("Children of Dune", "Frank Herbert", "Epic")
            .expect("valid update");
        repo.update(&stored).await.expect("update succeeds");
        let detail = repo
            .get_detail(&stored.id(), &owner)
            .await
            .expect("detail succeeds")
            .expect("book present");
        assert_eq!(detail.title, "Children of Dune");

        repo.delete(&stored.id()).await.expect("delete succeeds");
        assert!(
            repo.get_by_id(&stored.id())
                .await
                .expect("lookup succeeds")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn updating_a_missing_book_fails(owner: OwnerId) {
        let repo = InMemoryBookRepository::new();
        let error = repo
            .update(&book(owner, "Dune"))
            .await
            .expect_err("missing book");
        assert_eq!(error, BookRepositoryError::query("record not found"));
    }
}
