//! # fip-action-rdf
//!
//! Reads the FIP version out of published nanopublications. Content is
//! parsed as TriG into an in-memory quad list with `sophia`, then searched
//! across all graphs for a subject typed as a FAIR Implementation Profile.

pub mod extractor;

pub use extractor::{FIP_TYPE_IRI, SCHEMA_VERSION_IRI, extract_version, extract_version_lenient};
