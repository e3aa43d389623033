//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the interactive host drives the voice session and portal views.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the host until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
