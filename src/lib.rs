//! `marble-rs` is a toolkit for unpacking, repacking and converting the
//! assets of MarbleEngine visual novels: the `.mbl` archive family and the
//! PRS ("YB") compressed image format.
//!
//! The format implementations live in [`marble_types`]; this crate adds
//! the BMP conversion glue and the command line tools built on top of it.

pub mod bmp;

pub use marble_types;
pub use marble_types::prelude;
