//! Tutorial files on disk.
//!
//! Tutorials are stored in the XML working format of `ktutorial-xml` and
//! exported through the exporters of `ktutorial-export`. Every write goes to
//! a temporary file next to the target, which is then renamed over it.
//!
//! # Example
//!
//! ```ignore
//! use ktutorial_export::ExporterType;
//! use ktutorial_io::{export_tutorial, load_tutorial, save_tutorial};
//!
//! let tutorial = load_tutorial(Path::new("tutorial.xml"))?;
//! save_tutorial(&tutorial, Path::new("copy.xml"))?;
//! export_tutorial(&tutorial, ExporterType::Javascript, Path::new("tutorial.js"))?;
//! ```

mod error;
mod io;

pub use error::{PersistenceError, Result};
pub use io::{export_tutorial, load_tutorial, save_tutorial};
