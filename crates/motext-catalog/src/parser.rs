//! Binary catalog parser.
//!
//! Validates the container header, resolves both message tables into byte
//! ranges, checks the ordering of original messages, and compiles the plural
//! rule found in the catalog header.
//!
//! ## Layout
//!
//! | Offset | Field |
//! |---|---|
//! | 0 | magic number `0x950412de` |
//! | 4 | format revision, `0` |
//! | 8 | entry count `N` |
//! | 12 | offset of the original-message table |
//! | 16 | offset of the translated-message table |
//!
//! Each table holds `N` pairs of `(length, offset)` integers.

use std::cmp::Ordering;
use std::ops::Range;

use motext_core::error::{MotextError, MotextResult};
use motext_core::settings::Settings;
use motext_plural::{parse_optional, Expression};
use tracing::debug;

use crate::header::{plural_expression, Metadata};
use crate::reader::{ByteOrder, ByteReader};

/// Magic number as read in the catalog's own byte order.
pub const MAGIC: u32 = 0x9504_12de;
/// The only supported format revision.
pub const REVISION: i32 = 0;
/// Bytes occupied by the fixed header fields.
pub const HEADER_SIZE: usize = 20;

const REVISION_OFFSET: usize = 4;
const COUNT_OFFSET: usize = 8;
const ORIGINALS_OFFSET: usize = 12;
const TRANSLATIONS_OFFSET: usize = 16;
const TABLE_ENTRY_SIZE: usize = 8;

/// Returns the part of `bytes` before the first NUL.
pub fn leading(bytes: &[u8]) -> &[u8] {
    bytes
        .iter()
        .position(|&b| b == 0)
        .map_or(bytes, |nul| &bytes[..nul])
}

/// Orders two packed message clusters by their leading (pre-NUL) parts.
///
/// ```
/// use std::cmp::Ordering;
/// use motext_catalog::parser::compare_leading;
///
/// assert_eq!(compare_leading(b"file\0files", b"file"), Ordering::Equal);
/// assert_eq!(compare_leading(b"abc", b"abd\0x"), Ordering::Less);
/// ```
pub fn compare_leading(a: &[u8], b: &[u8]) -> Ordering {
    leading(a).cmp(leading(b))
}

/// Everything the catalog needs from a validated buffer.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Byte order the integers were written in.
    pub byte_order: ByteOrder,
    /// Range of each original message, indexed by entry.
    pub originals: Vec<Range<usize>>,
    /// Range of each translated message, indexed by entry.
    pub translations: Vec<Range<usize>>,
    /// Parsed header lines from entry 0.
    pub metadata: Metadata,
    /// The compiled `Plural-Forms` rule, if the header has one.
    pub plural: Option<Expression>,
}

/// Parses and validates a catalog buffer.
///
/// # Errors
///
/// Returns a catalog-format error for a bad magic number or revision, a
/// missing header entry, table entries outside the buffer, or (when
/// `settings.verify_sort_order` is set) empty or unsorted original messages.
/// Returns a `PluralFormError` if the header's plural rule does not compile.
pub fn parse(data: &[u8], settings: &Settings) -> MotextResult<Layout> {
    if data.len() < HEADER_SIZE {
        return Err(MotextError::catalog(format!(
            "catalog is {} bytes, shorter than the {HEADER_SIZE}-byte header",
            data.len()
        )));
    }

    let reader = ByteReader::new(data, detect_byte_order(data, settings)?);

    let revision = reader.read_int(REVISION_OFFSET)?;
    if revision != REVISION {
        return Err(MotextError::catalog(format!(
            "unsupported format revision {revision}"
        )));
    }

    let count = reader.read_size(COUNT_OFFSET, "entry count")?;
    if count == 0 {
        return Err(MotextError::catalog(
            "catalog has no entries; entry 0 must hold the header",
        ));
    }

    let originals = read_table(&reader, ORIGINALS_OFFSET, count, "original")?;
    let translations = read_table(&reader, TRANSLATIONS_OFFSET, count, "translated")?;

    if settings.verify_sort_order {
        verify_sorted(data, &originals)?;
    }

    let header = String::from_utf8_lossy(&data[translations[0].clone()]);
    let metadata = Metadata::parse(&header);
    let plural = match plural_expression(&header) {
        Some(source) => parse_optional(source, settings.max_expression_depth)?,
        None => None,
    };

    debug!(
        entries = count,
        byte_order = ?reader.byte_order(),
        plural_rule = plural.is_some(),
        "parsed catalog"
    );

    Ok(Layout {
        byte_order: reader.byte_order(),
        originals,
        translations,
        metadata,
        plural,
    })
}

fn detect_byte_order(data: &[u8], settings: &Settings) -> MotextResult<ByteOrder> {
    let magic = ByteReader::new(data, ByteOrder::Little).read_u32(0)?;
    if magic == MAGIC {
        Ok(ByteOrder::Little)
    } else if magic == MAGIC.swap_bytes() && settings.accept_big_endian {
        Ok(ByteOrder::Big)
    } else if magic == MAGIC.swap_bytes() {
        Err(MotextError::catalog(
            "big-endian catalog rejected by settings",
        ))
    } else {
        Err(MotextError::catalog(format!(
            "bad magic number 0x{magic:08x}"
        )))
    }
}

/// Resolves `count` `(length, offset)` pairs into checked ranges.
fn read_table(
    reader: &ByteReader<'_>,
    field: usize,
    count: usize,
    what: &str,
) -> MotextResult<Vec<Range<usize>>> {
    let table = reader.read_size(field, "table offset")?;
    let table_len = count
        .checked_mul(TABLE_ENTRY_SIZE)
        .ok_or_else(|| MotextError::catalog(format!("{what} table size overflows")))?;
    // Checked before allocating so a bogus count cannot request a huge vector.
    reader.read_string(table, table_len)?;

    (0..count)
        .map(|index| {
            let entry = table + index * TABLE_ENTRY_SIZE;
            let length = reader.read_size(entry, "string length")?;
            let offset = reader.read_size(entry + 4, "string offset")?;
            reader.read_string(offset, length).map_err(|_| {
                MotextError::catalog(format!(
                    "{what} message {index} ({length} bytes at {offset}) is outside the {}-byte catalog",
                    reader.len()
                ))
            })?;
            Ok(offset..offset + length)
        })
        .collect()
}

fn verify_sorted(data: &[u8], originals: &[Range<usize>]) -> MotextResult<()> {
    let mut previous: Option<&[u8]> = None;
    for (index, range) in originals.iter().enumerate().skip(1) {
        let key = leading(&data[range.clone()]);
        if key.is_empty() {
            return Err(MotextError::catalog(format!(
                "original message {index} is empty"
            )));
        }
        if previous.is_some_and(|prev| prev > key) {
            return Err(MotextError::catalog(format!(
                "original messages are not sorted at entry {index}"
            )));
        }
        previous = Some(key);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::CatalogWriter;
    use motext_core::error::ErrorKind;

    fn settings() -> Settings {
        Settings::default()
    }

    fn assert_format_error(data: &[u8], needle: &str) {
        let err = parse(data, &settings()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CatalogFormat, "{err}");
        assert!(err.to_string().contains(needle), "{err}");
    }

    #[test]
    fn test_leading() {
        assert_eq!(leading(b"one\0many"), b"one");
        assert_eq!(leading(b"plain"), b"plain");
        assert_eq!(leading(b"\0x"), b"");
        assert_eq!(leading(b""), b"");
    }

    #[test]
    fn test_compare_leading_ignores_plural_part() {
        assert_eq!(compare_leading(b"a\0zzz", b"a\0b"), Ordering::Equal);
        assert_eq!(compare_leading(b"a", b"ab"), Ordering::Less);
        assert_eq!(compare_leading(b"b\0a", b"ab"), Ordering::Greater);
    }

    #[test]
    fn test_parse_minimal() {
        let data = CatalogWriter::new("Language: de\n").build();
        let layout = parse(&data, &settings()).unwrap();
        assert_eq!(layout.originals.len(), 1);
        assert_eq!(layout.byte_order, ByteOrder::Little);
        assert_eq!(layout.metadata.get("Language"), Some("de"));
        assert!(layout.plural.is_none());
    }

    #[test]
    fn test_parse_entries_and_plural() {
        let data = CatalogWriter::new("Plural-Forms: nplurals=2; plural=n != 1;\n")
            .entry("apple", "Apfel")
            .entry("pear", "Birne")
            .build();
        let layout = parse(&data, &settings()).unwrap();
        assert_eq!(layout.originals.len(), 3);
        assert_eq!(&data[layout.originals[1].clone()], b"apple");
        assert_eq!(&data[layout.translations[2].clone()], b"Birne");
        let rule = layout.plural.unwrap();
        assert_eq!(rule.evaluate(1).unwrap(), 0);
        assert_eq!(rule.evaluate(2).unwrap(), 1);
    }

    #[test]
    fn test_big_endian() {
        let data = CatalogWriter::new("Language: ja\n")
            .entry("a", "b")
            .big_endian()
            .build();
        let layout = parse(&data, &settings()).unwrap();
        assert_eq!(layout.byte_order, ByteOrder::Big);
        assert_eq!(&data[layout.translations[1].clone()], b"b");

        let strict = Settings {
            accept_big_endian: false,
            ..Settings::default()
        };
        assert!(parse(&data, &strict).is_err());
    }

    #[test]
    fn test_rejects_short_buffer() {
        assert_format_error(&[0xde, 0x12, 0x04, 0x95], "shorter than");
        assert_format_error(&[], "shorter than");
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut data = CatalogWriter::new("").build();
        data[..4].copy_from_slice(&0xdead_beef_u32.to_le_bytes());
        assert_format_error(&data, "bad magic number 0xdeadbeef");
    }

    #[test]
    fn test_rejects_bad_revision() {
        let mut data = CatalogWriter::new("").build();
        data[4..8].copy_from_slice(&1_i32.to_le_bytes());
        assert_format_error(&data, "revision 1");
    }

    #[test]
    fn test_rejects_zero_or_negative_count() {
        let mut data = CatalogWriter::new("").build();
        data[8..12].copy_from_slice(&0_i32.to_le_bytes());
        assert_format_error(&data, "no entries");
        data[8..12].copy_from_slice(&(-3_i32).to_le_bytes());
        assert_format_error(&data, "negative");
    }

    #[test]
    fn test_rejects_huge_count() {
        let mut data = CatalogWriter::new("").entry("a", "b").build();
        data[8..12].copy_from_slice(&i32::MAX.to_le_bytes());
        assert_format_error(&data, "exceeds buffer");
    }

    #[test]
    fn test_rejects_string_outside_buffer() {
        let mut data = CatalogWriter::new("").entry("a", "b").build();
        let len = data.len();
        let table = u32::from_le_bytes(data[12..16].try_into().unwrap()) as usize;
        // Length field of original entry 1.
        let entry = table + TABLE_ENTRY_SIZE;
        data[entry..entry + 4].copy_from_slice(&i32::try_from(len).unwrap().to_le_bytes());
        assert_format_error(&data, "original message 1");
    }

    #[test]
    fn test_rejects_unsorted() {
        let data = CatalogWriter::new("")
            .entry("b", "x")
            .entry("a", "y")
            .unsorted()
            .build();
        assert_format_error(&data, "not sorted at entry 2");

        let lenient = Settings {
            verify_sort_order: false,
            ..Settings::default()
        };
        assert!(parse(&data, &lenient).is_ok());
    }

    #[test]
    fn test_rejects_empty_original() {
        let data = CatalogWriter::new("").entry("", "x").unsorted().build();
        assert_format_error(&data, "original message 1 is empty");
    }

    #[test]
    fn test_allows_equal_leading_keys() {
        let data = CatalogWriter::new("")
            .entry("file\0files", "Datei\0Dateien")
            .entry("file", "Datei")
            .unsorted()
            .build();
        assert!(parse(&data, &settings()).is_ok());
    }

    #[test]
    fn test_bad_plural_rule_is_fatal() {
        let data = CatalogWriter::new("Plural-Forms: nplurals=2; plural=n ? 1;\n").build();
        let err = parse(&data, &settings()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PluralForm);
    }

    #[test]
    fn test_empty_plural_rule_is_absent() {
        let data = CatalogWriter::new("Plural-Forms: nplurals=1; plural=;\n").build();
        assert!(parse(&data, &settings()).unwrap().plural.is_none());
    }
}
