//! Where text becomes layout-ready: the Unicode stages of khatt
//!
//! Raw code points say nothing about how they should be shaped. This
//! crate derives that missing structure in three passes:
//!
//! 1. [`resolve_scripts`] assigns a concrete script to every code point,
//!    folding Common/Inherited characters into their neighbours and
//!    matching paired punctuation to the script it brackets.
//! 2. [`level_runs`] runs the Unicode Bidirectional Algorithm (UAX #9)
//!    and returns level runs in visual order.
//! 3. [`split_runs`] subdivides each level run at script boundaries,
//!    producing the shaping-ready runs the shaper backends consume.
//!
//! Without these stages Arabic would render backwards and mixed-script
//! text would be shaped with the wrong rules.

pub mod bidi;
pub mod runs;
pub mod script;
mod stack;

pub use bidi::{level_runs, BidiRun};
pub use runs::split_runs;
pub use script::resolve_scripts;
