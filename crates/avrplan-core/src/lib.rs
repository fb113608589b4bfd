//! avrplan-core - Core library for planning AVR programmer actions
//!
//! This crate turns a target device and a requested operation (backup,
//! flash/EEPROM write, fuse write) into an ordered list of
//! [`ProgrammerAction`]s. Nothing is executed here: the actions are plain
//! values that an executor (typically avrdude) consumes.
//!
//! # Modules
//!
//! - [`action`] - the action data model and avrdude argument rendering
//! - [`device`] - device descriptions, the RON device database and the
//!   [`FuseLayoutLookup`] collaborator
//! - [`build`] - build configurations and the [`BuildArtifactResolver`]
//!   collaborator
//! - [`planner`] - the planning functions
//!
//! # Example
//!
//! ```ignore
//! use avrplan_core::device::DeviceDatabase;
//! use avrplan_core::planner;
//!
//! let mut db = DeviceDatabase::new();
//! db.load_dir("devices".as_ref())?;
//!
//! for action in planner::plan_backup(&db, "atmega16", "/tmp/bk".as_ref())? {
//!     println!("-U {}", action.to_avrdude_arg());
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod action;
pub mod build;
pub mod device;
pub mod error;
pub mod planner;

pub use action::{Direction, Encoding, MemoryRegion, Payload, ProgrammerAction};
pub use build::{ArtifactKind, BuildArtifactResolver, BuildConfig};
pub use device::{Device, DeviceDatabase, FuseLayoutLookup};
pub use error::{ActionError, LookupError};
pub use planner::ImageRegion;
