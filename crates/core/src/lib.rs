//! Domain building blocks shared by the wiki service and the conformance
//! harness: the error taxonomy, wire structs, page-name mapping and the
//! base64 content codec. Nothing in here performs I/O.

pub mod content;
pub mod error;
pub mod structs;
pub mod types;
pub mod wiki;
