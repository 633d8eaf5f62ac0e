//! Common utilities and shared types for snapfeed.
//!
//! This crate provides foundational components used across all snapfeed crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Identity**: The verified caller identity via [`Identity`]
//!
//! # Example
//!
//! ```no_run
//! use snapfeed_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Listening on {}:{}, first id {id}", config.server.host, config.server.port);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod identity;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use identity::Identity;
