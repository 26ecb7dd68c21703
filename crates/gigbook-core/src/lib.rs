//! Core types and trait definitions for the gigbook booking directory.
//!
//! No HTTP or database code lives here; the other crates depend on it.

#![allow(async_fn_in_trait)]

pub mod artist;
pub mod error;
pub mod show;
pub mod store;
pub mod venue;

pub use error::{Error, ErrorKind, Result, StoreError};
