//! CLI library components for the KTutorial tools.

pub mod logging;
pub mod outline;
