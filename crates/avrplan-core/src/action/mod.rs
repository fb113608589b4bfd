//! Programmer actions
//!
//! A [`ProgrammerAction`] describes one read or write of a device memory
//! region: which region, which direction, the file or byte value involved
//! and how the payload is encoded. The [`avrdude`] submodule renders actions
//! into avrdude arguments.

pub mod avrdude;
mod types;

pub use avrdude::AvrdudeCommand;
pub use types::*;
