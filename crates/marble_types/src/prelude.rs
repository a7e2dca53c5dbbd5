//! Prelude module for `marble_types`.
//!
//! This module provides a convenient way to import commonly used types and constants.
//!
//! # Examples
//!
//! ```no_run
//! use marble_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = MgGraArchive::open("mg_gra.mbl")?;
//! let first = &archive.entries()[0];
//! let payload = archive.read_entry(first)?;
//! # Ok(())
//! # }
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Constants
	FLAG_DELTA_FILTER,

	// Errors
	MblError,

	// Data archive types
	MgDataArchive,
	MgDataEntry,
	MgDataParams,

	// Image bundle types
	MgGraArchive,
	MgGraEntry,
	PrsError,

	// PRS image types
	PrsFile,
	PrsHeader,

	// Sidecar types
	Sidecar,
	SidecarParams,
};
