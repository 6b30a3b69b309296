//! Embedded PostgreSQL databases for repository integration tests.
//!
//! Each test gets its own temporary database on the shared cluster, with the
//! service's embedded migrations applied.

use bookshelf::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("bootstrap cluster: {err:?}"))
}

/// Create a migrated temporary database.
pub fn provision_database(runtime: &Runtime) -> Result<TemporaryDatabase, String> {
    let name = format!("bookshelf_test_{}", uuid::Uuid::new_v4().simple());
    let database = shared_cluster()?
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = database.url().to_string();
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| format!("migrate: {err}"))?;
    Ok(database)
}
