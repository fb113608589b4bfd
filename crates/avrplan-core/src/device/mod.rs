//! AVR device descriptions and database
//!
//! This module provides the [`Device`] description type, a RON backed
//! [`DeviceDatabase`], and the [`FuseLayoutLookup`] trait through which the
//! planner learns how many fuse bytes a device has.

mod database;
mod lazy;
mod types;

pub use database::*;
pub use lazy::LazyDeviceDatabase;
pub use types::*;

use crate::error::LookupError;

/// Source of fuse layout information, keyed by device id
///
/// Implementations may perform I/O and may fail. The planner calls
/// [`fuse_byte_count`](Self::fuse_byte_count) once per plan and does not
/// retry.
pub trait FuseLayoutLookup {
    /// Number of fuse bytes (0-3) of the given device
    fn fuse_byte_count(&self, device_id: &str) -> Result<u8, LookupError>;
}

impl<T: FuseLayoutLookup + ?Sized> FuseLayoutLookup for &T {
    fn fuse_byte_count(&self, device_id: &str) -> Result<u8, LookupError> {
        (**self).fuse_byte_count(device_id)
    }
}
