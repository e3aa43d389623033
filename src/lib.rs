//! campus-voice: voice assistant for a student portal, with Hexagonal Architecture.
//!
//! The core is a command interpreter and a performance analyzer over
//! read-only academic records; speech engines and the host UI sit behind ports.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
