//! # Beacon Core
//!
//! Background-refreshed values served synchronously to request handlers.
//!
//! A slow or unreliable data source (an [`Updater`]) is polled on a timer.
//! Each outcome is mapped by a [`Transform`] into the value kept in a
//! [`CacheCell`], and every request gets the current value copied into its
//! [`Locals`] by an [`Injector`] without waiting on the source.
//!
//! ```no_run
//! use beacon_core::{Beacon, RefreshAttempt, Response};
//! use std::time::Duration;
//!
//! # async fn demo() -> beacon_core::Result<()> {
//! let beacon = Beacon::<String>::builder()
//!     .name("motd")
//!     .interval(Duration::from_secs(30))
//!     .updater_fn(|| async { RefreshAttempt::ok("hello".to_string()) })
//!     .build()?
//!     .ready()
//!     .await?;
//!
//! let mut res = Response::default();
//! beacon.injector().handle(&(), &mut res, || ());
//! assert_eq!(res.locals.get::<String>("motd").map(String::as_str), Some("hello"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod beacon;
pub mod cell;
pub mod injector;
pub mod locals;
pub mod scheduler;
pub mod stats;
pub mod transform;
pub mod updater;

pub use beacon::*;
pub use cell::*;
pub use injector::*;
pub use locals::*;
pub use scheduler::*;
pub use stats::*;
pub use transform::*;
pub use updater::*;

pub use beacon_common::{update_error, BeaconError, Result, UpdateError};
