//! Reading and writing of the municipality tables: the raw IGN export and
//! the normalized file handed to the downloader.

pub mod encoding;
pub mod error;
pub(crate) mod extract;
pub mod reader;
pub mod writer;
