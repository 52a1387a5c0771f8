//! # motext-catalog
//!
//! Reads compiled gettext catalogs (`.mo` files) from an in-memory buffer and
//! answers `gettext`/`ngettext` queries, selecting plural variants with the
//! catalog's own `Plural-Forms` rule.
//!
//! Lookups use binary search over the sorted original-message table. The
//! optional hash table some catalogs carry is ignored.
//!
//! ## Modules
//!
//! - [`reader`] - Bounds-checked integer and slice reads
//! - [`parser`] - Header validation, table resolution and sort checks
//! - [`header`] - `Key: value` metadata from the header entry
//! - [`catalog`] - The [`Catalog`] facade

pub mod catalog;
pub mod header;
pub mod parser;
pub mod reader;

#[cfg(test)]
mod fixture;

pub use catalog::Catalog;
pub use header::Metadata;
pub use reader::ByteOrder;
