//! # Beacon CLI
//!
//! The `beacon` binary: keeps a file's contents refreshed in the background
//! and serves them to a stream of simulated requests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod args;
pub mod error;
pub mod source;

pub use app::*;
pub use args::*;
pub use error::*;
pub use source::*;
