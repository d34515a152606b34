//! Utilities shared by the command line front end.
//!
//! - [`progress`] - Build spinner (no-op without the `progress` feature)

pub mod progress;

pub use progress::BuildSpinner;
