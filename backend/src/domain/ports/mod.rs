//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod book_repository;
mod identity_provider;
mod readiness_probe;

#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{BookRepository, BookRepositoryError, FixtureBookRepository};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixedIdentity, IdentityError, IdentityProvider};
#[cfg(test)]
pub use readiness_probe::MockReadinessProbe;
pub use readiness_probe::{AlwaysReady, ReadinessError, ReadinessProbe};
