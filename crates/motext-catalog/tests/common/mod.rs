//! Shared helpers for the catalog integration tests.

#![allow(dead_code)]

#[path = "../../src/fixture.rs"]
mod fixture;

pub use fixture::CatalogWriter;

/// The Polish plural rule used across the tests.
pub const SLAVIC_RULE: &str =
    "n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2";

/// A header declaring three plural forms with [`SLAVIC_RULE`].
pub fn slavic_header() -> String {
    format!(
        "Project-Id-Version: motext-tests\n\
         Content-Type: text/plain; charset=UTF-8\n\
         Plural-Forms: nplurals=3; plural={SLAVIC_RULE};\n"
    )
}
