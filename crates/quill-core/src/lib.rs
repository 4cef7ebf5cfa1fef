//! # Quill Core
//!
//! The domain layer of the Quill blog platform.
//! This crate contains the records, the feed logic and the ports; it has no
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod feed;
pub mod ports;
pub mod services;

pub use error::{DomainError, StoreError};
