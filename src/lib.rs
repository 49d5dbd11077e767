//! debtgate - fail the build on FIXME
//!
//! A CLI quality gate that walks a source tree, looks for TODO and FIXME
//! markers inside line comments, reports them with colored console output and
//! exits non-zero when a FIXME is found.
//!
//! # Example
//!
//! ```rust,no_run
//! use debtgate::*;
//!
//! // Load configuration
//! let config = config::load_config(None).unwrap();
//!
//! // Scan the configured root
//! let report = scanner::scan_directory(&config).unwrap();
//!
//! // Decide the exit status
//! let verdict = report.verdict(&config.fail_on);
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod models;
pub mod reporter;
pub mod scanner;

// Re-export commonly used types
pub use error::ScanError;
pub use models::{CommentMatch, Config, ScanReport, Verdict};
