//! This crate provides core data types and file format support for the `marble-rs` project.
//!
//! # File Formats
//!
//! - **PRS**: The engine's LZ-compressed image container, magic `"YB"`
//! - **`MgData`**: Generic indexed `.mbl` archives with XOR-encrypted payloads
//! - **`MgGra`**: The image bundle `.mbl` archive holding PRS payloads
//!
//! # Examples
//!
//! ```no_run
//! use marble_types::file::{MgDataArchive, PrsFile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = MgDataArchive::open("mg_data.mbl")?;
//! for entry in archive.entries() {
//!     let payload = archive.read_entry(entry)?;
//!     println!("{}: {} bytes", entry.name(), payload.len());
//! }
//!
//! let image = PrsFile::open("ev001.prs")?;
//! println!("{}", image.header());
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod prelude;

// Re-export commonly used file types at crate root for convenience
pub use file::{
	FLAG_DELTA_FILTER, MblError, MgDataArchive, MgDataEntry, MgDataParams, MgGraArchive,
	MgGraEntry, PrsError, PrsFile, PrsHeader, Sidecar, SidecarParams,
};
