//! Core business logic for snapfeed.
//!
//! Every operation that acts on behalf of a user takes the caller's
//! [`snapfeed_common::Identity`] explicitly and resolves it to a user record
//! before touching any data.

pub mod services;

pub use services::*;
