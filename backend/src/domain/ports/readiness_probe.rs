//! Port for checking that a storage dependency can serve requests.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised when a dependency is not ready.
    pub enum ReadinessError {
        /// The dependency did not answer.
        Unreachable {
            /// Driver message.
            message: String,
        } => "dependency unreachable: {message}",
    }
}

/// Port consulted by readiness probes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Succeed when the dependency answers a trivial request.
    async fn check(&self) -> Result<(), ReadinessError>;
}

/// Fixture probe that is always ready.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReady;

#[async_trait]
impl ReadinessProbe for AlwaysReady {
    async fn check(&self) -> Result<(), ReadinessError> {
        Ok(())
    }
}
