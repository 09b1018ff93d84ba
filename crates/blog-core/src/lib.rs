//! Core types, validation rules and entity services for the blog backend.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`store::BlogStore`]; the functions in [`service`] hold
//! the business rules and take the store handle as an explicit argument.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod author;
pub mod comment;
pub mod error;
pub mod post;
pub mod service;
pub mod store;
pub mod validate;

pub use error::{Error, ErrorKind, Result};
