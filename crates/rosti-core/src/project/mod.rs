//! Project-level configuration.

pub mod rostifile;

pub use rostifile::{ROSTIFILE_NAME, Rostifile};
