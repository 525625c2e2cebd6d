//! # Beacon Config
//!
//! Settings for the `beacon` binary.
//!
//! Settings are read from a TOML, YAML or JSON file, chosen by extension,
//! then overridden from `BEACON_*` environment variables and validated.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use error::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
