//! Integration tests for `DieselBookRepository`.
//!
//! Each test runs against its own migrated database on the embedded
//! PostgreSQL cluster. Set `SKIP_TEST_CLUSTER=1` where the cluster cannot
//! start.

use bookshelf::domain::ports::{BookRepository, BookRepositoryError};
use bookshelf::domain::{Book, BookDraft, OwnerId};
use bookshelf::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use postgres::{Client, NoTls};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

mod support;

use support::embedded_postgres::provision_database;
use support::{format_postgres_error, handle_cluster_setup_failure};

struct TestContext {
    runtime: Runtime,
    repository: DieselBookRepository,
    owner: OwnerId,
    database_url: String,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn add(&self, book: &Book) {
        self.runtime
            .block_on(self.repository.add(book))
            .expect("add book");
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = provision_database(&runtime)?;
    let database_url = database.url().to_string();

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselBookRepository::new(pool),
        owner: OwnerId::random(),
        database_url,
        _database: database,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn book(owner: &OwnerId, title: &str) -> Book {
    Book::new(BookDraft {
        id: Uuid::new_v4(),
        owner_id: *owner,
        title: title.to_owned(),
        author: "Ursula K. Le Guin".to_owned(),
        genre: "Science fiction".to_owned(),
    })
    .expect("valid book")
}

#[rstest]
fn added_book_round_trips(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: added_book_round_trips skipped");
        return;
    };
    let stored = book(&context.owner, "The Dispossessed");
    context.add(&stored);

    let found = context
        .runtime
        .block_on(context.repository.get_by_id(&stored.id()))
        .expect("lookup succeeds")
        .expect("book exists");
    assert_eq!(found, stored);

    let missing = context
        .runtime
        .block_on(context.repository.get_by_id(&Uuid::new_v4()))
        .expect("lookup succeeds");
    assert!(missing.is_none());
}

#[rstest]
fn title_count_is_exact_and_owner_scoped(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: title_count_is_exact_and_owner_scoped skipped");
        return;
    };
    let stranger = OwnerId::random();
    context.add(&book(&context.owner, "Lathe of Heaven"));
    context.add(&book(&stranger, "Lathe of Heaven"));

    let count = |title: &str, owner: &OwnerId| {
        context
            .runtime
            .block_on(context.repository.count_by_title_and_owner(title, owner))
            .expect("count succeeds")
    };
    assert_eq!(count("Lathe of Heaven", &context.owner), 1);
    assert_eq!(count("lathe of heaven", &context.owner), 0);
    assert_eq!(count("Lathe of Heaven", &OwnerId::random()), 0);
}

#[rstest]
fn ownership_lookups_hide_foreign_books(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: ownership_lookups_hide_foreign_books skipped");
        return;
    };
    let stored = book(&context.owner, "Always Coming Home");
    context.add(&stored);
    let stranger = OwnerId::random();

    let runtime = &context.runtime;
    let repository = &context.repository;
    assert!(
        runtime
            .block_on(repository.exists_for_owner(&stored.id(), &context.owner))
            .expect("exists succeeds")
    );
    assert!(
        !runtime
            .block_on(repository.exists_for_owner(&stored.id(), &stranger))
            .expect("exists succeeds")
    );

    let detail = runtime
        .block_on(repository.get_detail(&stored.id(), &context.owner))
        .expect("detail succeeds");
    assert_eq!(detail, Some(stored.summary()));
    let hidden = runtime
        .block_on(repository.get_detail(&stored.id(), &stranger))
        .expect("detail succeeds");
    assert!(hidden.is_none());
}

#[rstest]
fn listing_orders_by_title_then_id(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: listing_orders_by_title_then_id skipped");
        return;
    };
    let first = book(&context.owner, "Tehanu");
    let second = book(&context.owner, "Tehanu");
    context.add(&book(&context.owner, "Voices"));
    context.add(&first);
    context.add(&book(&context.owner, "Gifts"));
    context.add(&second);
    context.add(&book(&OwnerId::random(), "Annals"));

    let listed = context
        .runtime
        .block_on(context.repository.list_by_owner(&context.owner))
        .expect("list succeeds");

    let titles: Vec<&str> = listed.iter().map(|summary| summary.title.as_str()).collect();
    assert_eq!(titles, ["Gifts", "Tehanu", "Tehanu", "Voices"]);
    let (low, high) = if first.id() < second.id() {
        (first.id(), second.id())
    } else {
        (second.id(), first.id())
    };
    assert_eq!((listed[1].id, listed[2].id), (low, high));
}

#[rstest]
fn update_replaces_fields_and_requires_a_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_replaces_fields_and_requires_a_row skipped");
        return;
    };
    let mut stored = book(&context.owner, "Rocannon's World");
    context.add(&stored);
    stored
        .update("Planet of Exile", "Ursula K. Le Guin", "Novel")
        .expect("valid fields");

    context
        .runtime
        .block_on(context.repository.update(&stored))
        .expect("update succeeds");
    let found = context
        .runtime
        .block_on(context.repository.get_by_id(&stored.id()))
        .expect("lookup succeeds")
        .expect("book exists");
    assert_eq!(found.title(), "Planet of Exile");
    assert_eq!(found.genre(), "Novel");

    let never_stored = book(&context.owner, "City of Illusions");
    let error = context
        .runtime
        .block_on(context.repository.update(&never_stored))
        .expect_err("update of a missing row fails");
    assert!(matches!(error, BookRepositoryError::Query { .. }));
    assert!(error.to_string().contains("record not found"));
}

#[rstest]
fn delete_removes_the_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_removes_the_row skipped");
        return;
    };
    let stored = book(&context.owner, "The Word for World Is Forest");
    context.add(&stored);

    context
        .runtime
        .block_on(context.repository.delete(&stored.id()))
        .expect("delete succeeds");

    let found = context
        .runtime
        .block_on(context.repository.get_by_id(&stored.id()))
        .expect("lookup succeeds");
    assert!(found.is_none());
    let listed = context
        .runtime
        .block_on(context.repository.list_by_owner(&context.owner))
        .expect("list succeeds");
    assert!(listed.is_empty());
}

#[rstest]
fn stored_row_with_nil_owner_is_a_query_error(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: stored_row_with_nil_owner_is_a_query_error skipped");
        return;
    };
    let id = Uuid::new_v4();
    let mut client = Client::connect(&context.database_url, NoTls)
        .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)));
    client
        .execute(
            "INSERT INTO books (id, owner_id, title, author, genre) VALUES ($1, $2, 'Orsinian Tales', 'Le Guin', 'Stories')",
            &[&id, &Uuid::nil()],
        )
        .unwrap_or_else(|err| panic!("seed row: {}", format_postgres_error(&err)));

    let error = context
        .runtime
        .block_on(context.repository.get_by_id(&id))
        .expect_err("nil owner is rejected");
    assert!(matches!(error, BookRepositoryError::Query { .. }));
    assert!(error.to_string().contains("stored owner id"));
}
