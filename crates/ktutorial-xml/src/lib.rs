//! XML working format of KTutorial tutorials.
//!
//! [`write_tutorial`] and [`read_tutorial`] are inverse operations: reading
//! back a written tutorial gives a structurally equal tutorial.
//!
//! ```text
//! <tutorial name="...">
//!     <description>...</description>
//!     <step id="...">
//!         <text>...</text>
//!         <reaction triggerType="ConditionMet" responseType="NextStep">
//!             <waitForSignal emitterName="..." signalName="..."/>
//!             <nextStep id="..."/>
//!         </reaction>
//!     </step>
//! </tutorial>
//! ```

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{DeserializationError, SerializationError};
pub use reader::read_tutorial;
pub use writer::{write_tutorial, write_tutorial_to};
