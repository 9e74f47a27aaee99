//! Interactive directory browsing.
//!
//! This module provides:
//! - Input-transition classification (up-navigation, path traversal,
//!   filtering) for the browse picker's text field
//! - The directory-browsing session state machine
//! - Filesystem mutations (create, delete, rename) behind soft-failing
//!   operation boundaries

mod input;
mod ops;
mod session;

#[cfg(test)]
mod tests;

pub use input::{classify, filter_entries, InputCommand, BLANK_SENTINEL};
pub use session::{AcceptOutcome, DirectoryNavigator, NavUpdate};
