//! Plain-text export
//!
//! Writes converted notes as `.txt` files named after their titles and
//! archives the input files that were fully converted.

mod batch;
mod converter;
mod filename;
mod writer;

pub use batch::*;
pub use converter::*;
pub use filename::*;
pub use writer::*;
