//! Test-only writer for small binary catalogs.
//!
//! Shared with the integration tests through `tests/common/mod.rs`, so it only
//! depends on `std`.

/// Builds a catalog buffer with the 28-byte GNU header (hash table size 0).
#[derive(Debug, Clone)]
pub struct CatalogWriter {
    header: Vec<u8>,
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    big_endian: bool,
    sort: bool,
}

#[allow(dead_code)]
impl CatalogWriter {
    /// Starts a catalog whose entry 0 translation is `header`.
    pub fn new(header: &str) -> Self {
        Self {
            header: header.as_bytes().to_vec(),
            entries: Vec::new(),
            big_endian: false,
            sort: true,
        }
    }

    /// Adds a message. Use `\0` to pack plural variants.
    #[must_use]
    pub fn entry(mut self, original: impl AsRef<[u8]>, translated: impl AsRef<[u8]>) -> Self {
        self.entries
            .push((original.as_ref().to_vec(), translated.as_ref().to_vec()));
        self
    }

    /// Writes all integers big-endian.
    #[must_use]
    pub const fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self
    }

    /// Keeps entries in insertion order instead of sorting them.
    #[must_use]
    pub const fn unsorted(mut self) -> Self {
        self.sort = false;
        self
    }

    /// Serializes the catalog.
    pub fn build(&self) -> Vec<u8> {
        let mut entries = self.entries.clone();
        if self.sort {
            entries.sort_by(|a, b| leading(&a.0).cmp(leading(&b.0)));
        }
        entries.insert(0, (Vec::new(), self.header.clone()));

        let count = entries.len();
        let originals_at = 28;
        let translations_at = originals_at + 8 * count;
        let hash_at = translations_at + 8 * count;
        let mut strings_at = hash_at;

        let mut tables = Vec::new();
        let mut strings = Vec::new();
        for column in 0..2 {
            for (original, translated) in &entries {
                let text = if column == 0 { original } else { translated };
                tables.push((text.len(), strings_at));
                strings.extend_from_slice(text);
                strings.push(0);
                strings_at += text.len() + 1;
            }
        }

        let mut out = Vec::new();
        let put = |out: &mut Vec<u8>, value: usize| {
            let value = u32::try_from(value).expect("fixture too large");
            if self.big_endian {
                out.extend_from_slice(&value.to_be_bytes());
            } else {
                out.extend_from_slice(&value.to_le_bytes());
            }
        };
        put(&mut out, 0x9504_12de);
        put(&mut out, 0);
        put(&mut out, count);
        put(&mut out, originals_at);
        put(&mut out, translations_at);
        put(&mut out, 0);
        put(&mut out, hash_at);
        for (length, offset) in tables {
            put(&mut out, length);
            put(&mut out, offset);
        }
        out.extend_from_slice(&strings);
        out
    }
}

fn leading(bytes: &[u8]) -> &[u8] {
    bytes.split(|&b| b == 0).next().unwrap_or(bytes)
}
