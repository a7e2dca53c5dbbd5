//! `.mbl` archive family support.
//!
//! Two unrelated layouts share the extension: the generic data archives
//! with XOR-encrypted payloads and parameterized index records
//! ([`data`]), and the image bundle with fixed-length name slots and
//! optionally zlib-wrapped PRS payloads ([`gra`]).

pub mod data;
pub mod gra;
pub mod sidecar;

pub use data::{Archive as MgDataArchive, Entry as MgDataEntry, Params as MgDataParams};
pub use gra::{Archive as MgGraArchive, Entry as MgGraEntry};
pub use sidecar::{Sidecar, SidecarParams};
