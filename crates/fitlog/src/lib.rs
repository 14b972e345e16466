//! `fitlog` - A personal fitness activity logger
//!
//! This library provides the pieces behind the `fitlog` binary: the activity
//! record, a CSV-backed store that is rewritten on every change, and the
//! interactive menu session that drives it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod activity;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod storage;
pub mod summary;

pub use activity::Activity;
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use session::Session;
pub use storage::{LoadOutcome, Store};
pub use summary::Summary;
