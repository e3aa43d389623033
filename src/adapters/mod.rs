//! Infrastructure adapters. Implement outbound ports.
//!
//! Record files, console speech, tokio timers, terminal UI. Map errors to DomainError.

pub mod records;
pub mod speech;
#[cfg(test)]
pub mod testing;
pub mod ui;
