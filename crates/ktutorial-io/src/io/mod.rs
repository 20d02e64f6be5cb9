//! File I/O operations for tutorial persistence.
//!
//! This module handles:
//! - Loading tutorials with encoding and format validation
//! - Saving tutorials and exported scripts with atomic writes

mod load;
mod save;

pub use load::load_tutorial;
pub use save::{export_tutorial, save_tutorial};
