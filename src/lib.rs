//! Biblioteca - author and book record services
//!
//! Two small HTTP services, each with its own in-memory store:
//! - The author service owns author records
//! - The book service owns book records and, on every read, resolves each
//!   book's `autor_id` against the author service
//!
//! Author resolution never fails a book read: a missing author or an
//! unreachable author service yields the placeholder name
//! [`types::UNKNOWN_AUTHOR`].

pub mod api;
pub mod config;
pub mod error;
pub mod resolver;
pub mod store;
pub mod types;

pub use error::{Error, Result};
