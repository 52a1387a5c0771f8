//! The [`Catalog`] facade: lookups over a validated, immutable buffer.
//!
//! A catalog owns its bytes. Every string it hands out is borrowed either from
//! the catalog or from the caller's arguments, so a translation can never
//! outlive the buffer it points into.
//!
//! Lookups never fail. A message that is missing, untranslated, or not valid
//! UTF-8 (on the `&str` API) falls back to the caller's own text.

use std::borrow::Cow;
use std::ops::Range;

use motext_core::error::{MotextError, MotextResult};
use motext_core::logging::catalog_span;
use motext_core::settings::Settings;
use motext_plural::Expression;
use tracing::{trace, warn};

use crate::header::Metadata;
use crate::parser::{self, compare_leading, leading};
use crate::reader::ByteOrder;

const CONTEXT_SEPARATOR: char = '\x04';

/// A compiled translation catalog.
///
/// `Catalog::default()` is the "no data" catalog: it has no header and every
/// lookup returns the untranslated message.
///
/// # Examples
///
/// ```no_run
/// use motext_catalog::Catalog;
///
/// let bytes = std::fs::read("de.mo").unwrap();
/// let catalog = Catalog::new(bytes).unwrap();
/// println!("{}", catalog.gettext("Open file"));
/// println!("{}", catalog.ngettext("{} file", "{} files", 3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    data: Vec<u8>,
    byte_order: ByteOrder,
    originals: Vec<Range<usize>>,
    translations: Vec<Range<usize>>,
    metadata: Metadata,
    plural: Option<Expression>,
}

impl Catalog {
    /// Parses a catalog with default [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns a catalog-format error if the buffer is not a valid catalog, or
    /// a `PluralFormError` if its `Plural-Forms` rule does not compile.
    pub fn new(data: impl Into<Vec<u8>>) -> MotextResult<Self> {
        Self::with_settings(data, &Settings::default())
    }

    /// Parses a catalog with explicit settings.
    ///
    /// # Errors
    ///
    /// See [`Catalog::new`].
    pub fn with_settings(data: impl Into<Vec<u8>>, settings: &Settings) -> MotextResult<Self> {
        let data = data.into();
        let span = catalog_span(data.len());
        let _guard = span.enter();

        let layout = parser::parse(&data, settings)?;
        Ok(Self {
            data,
            byte_order: layout.byte_order,
            originals: layout.originals,
            translations: layout.translations,
            metadata: layout.metadata,
            plural: layout.plural,
        })
    }

    // ── Introspection ────────────────────────────────────────────────

    /// Number of messages, not counting the header entry.
    pub fn len(&self) -> usize {
        self.originals.len().saturating_sub(1)
    }

    /// Returns `true` if the catalog has no messages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte order the catalog was written in.
    pub const fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// The raw header text (entry 0's translation), or empty for a catalog
    /// without entries.
    pub fn header_bytes(&self) -> &[u8] {
        self.translations
            .first()
            .map_or(&[][..], |range| &self.data[range.clone()])
    }

    /// The header text, with invalid UTF-8 replaced.
    pub fn header(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.header_bytes())
    }

    /// Parsed header lines.
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The compiled `Plural-Forms` rule, if the header has one.
    pub const fn plural_rule(&self) -> Option<&Expression> {
        self.plural.as_ref()
    }

    /// The `nplurals` value declared in the header.
    pub fn plural_count(&self) -> Option<usize> {
        self.metadata.plural_count()
    }

    /// The charset declared in the header's `Content-Type`.
    pub fn charset(&self) -> Option<&str> {
        self.metadata.charset()
    }

    // ── Byte-level lookups ───────────────────────────────────────────

    /// Translates `msgid`, or returns it unchanged.
    pub fn gettext_bytes<'a>(&'a self, msgid: &'a [u8]) -> &'a [u8] {
        self.singular(msgid).unwrap_or(msgid)
    }

    /// Selects the plural variant of `msgid` for `n`, or falls back to
    /// `msgid` when `n == 1` and `msgid_plural` otherwise.
    ///
    /// A plural rule that fails to evaluate is logged and treated as a miss.
    pub fn ngettext_bytes<'a>(
        &'a self,
        msgid: &'a [u8],
        msgid_plural: &'a [u8],
        n: i32,
    ) -> &'a [u8] {
        match self.try_ngettext_bytes(msgid, msgid_plural, n) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, n, "plural rule failed; using default plural form");
                default_form(msgid, msgid_plural, n)
            }
        }
    }

    /// Like [`ngettext_bytes`](Self::ngettext_bytes), but surfaces plural rule
    /// failures instead of falling back.
    ///
    /// # Errors
    ///
    /// Returns a `PluralFormError` if the rule divides by zero for `n`.
    pub fn try_ngettext_bytes<'a>(
        &'a self,
        msgid: &'a [u8],
        msgid_plural: &'a [u8],
        n: i32,
    ) -> MotextResult<&'a [u8]> {
        Ok(self
            .plural_variant(msgid, n)?
            .unwrap_or_else(|| default_form(msgid, msgid_plural, n)))
    }

    // ── String lookups ───────────────────────────────────────────────

    /// Translates `msgid`, or returns it unchanged.
    ///
    /// An empty `msgid` matches the header entry; do not rely on that for
    /// real lookups.
    pub fn gettext<'a>(&'a self, msgid: &'a str) -> &'a str {
        self.singular(msgid.as_bytes())
            .and_then(as_text)
            .unwrap_or(msgid)
    }

    /// Translates a plural message for the count `n`.
    pub fn ngettext<'a>(&'a self, msgid: &'a str, msgid_plural: &'a str, n: i32) -> &'a str {
        match self.try_ngettext(msgid, msgid_plural, n) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, n, msgid, "plural rule failed; using default plural form");
                default_form(msgid, msgid_plural, n)
            }
        }
    }

    /// Like [`ngettext`](Self::ngettext), but surfaces plural rule failures.
    ///
    /// # Errors
    ///
    /// Returns a `PluralFormError` if the rule divides by zero for `n`.
    pub fn try_ngettext<'a>(
        &'a self,
        msgid: &'a str,
        msgid_plural: &'a str,
        n: i32,
    ) -> MotextResult<&'a str> {
        Ok(self
            .plural_variant(msgid.as_bytes(), n)?
            .and_then(as_text)
            .unwrap_or_else(|| default_form(msgid, msgid_plural, n)))
    }

    /// Translates `msgid` within `context`.
    pub fn pgettext<'a>(&'a self, context: &str, msgid: &'a str) -> &'a str {
        let key = context_key(context, msgid);
        self.singular(key.as_bytes())
            .and_then(as_text)
            .unwrap_or(msgid)
    }

    /// Translates a plural message within `context`.
    pub fn npgettext<'a>(
        &'a self,
        context: &str,
        msgid: &'a str,
        msgid_plural: &'a str,
        n: i32,
    ) -> &'a str {
        let key = context_key(context, msgid);
        match self.plural_variant(key.as_bytes(), n) {
            Ok(found) => found
                .and_then(as_text)
                .unwrap_or_else(|| default_form(msgid, msgid_plural, n)),
            Err(e) => {
                warn!(error = %e, n, context, msgid, "plural rule failed; using default plural form");
                default_form(msgid, msgid_plural, n)
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Index of the entry whose leading original equals `msgid`'s.
    fn find(&self, msgid: &[u8]) -> Option<usize> {
        let key = leading(msgid);
        if key.is_empty() {
            return (!self.translations.is_empty()).then_some(0);
        }
        let messages = self.originals.get(1..)?;
        messages
            .binary_search_by(|range| compare_leading(&self.data[range.clone()], key))
            .ok()
            .map(|index| index + 1)
    }

    /// The full translated cluster for `msgid`, if it has a non-empty first
    /// variant.
    fn cluster(&self, msgid: &[u8]) -> Option<&[u8]> {
        let found = self.find(msgid);
        trace!(found = found.is_some(), "catalog lookup");
        let cluster = &self.data[self.translations[found?].clone()];
        (!leading(cluster).is_empty()).then_some(cluster)
    }

    fn singular(&self, msgid: &[u8]) -> Option<&[u8]> {
        self.cluster(msgid).map(leading)
    }

    /// `Ok(None)` means "use the default form"; `Err` means the rule failed.
    fn plural_variant(&self, msgid: &[u8], n: i32) -> MotextResult<Option<&[u8]>> {
        let (Some(cluster), Some(rule)) = (self.cluster(msgid), self.plural.as_ref()) else {
            return Ok(None);
        };
        let index = rule.evaluate(n)?;
        Ok(usize::try_from(index)
            .ok()
            .and_then(|index| cluster.split(|&b| b == 0).nth(index)))
    }
}

impl TryFrom<Vec<u8>> for Catalog {
    type Error = MotextError;

    fn try_from(data: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}

fn default_form<'a, T: ?Sized>(msgid: &'a T, msgid_plural: &'a T, n: i32) -> &'a T {
    if n == 1 {
        msgid
    } else {
        msgid_plural
    }
}

fn as_text(bytes: &[u8]) -> Option<&str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "translation is not valid UTF-8");
            None
        }
    }
}

fn context_key(context: &str, msgid: &str) -> String {
    let mut key = String::with_capacity(context.len() + 1 + msgid.len());
    key.push_str(context);
    key.push(CONTEXT_SEPARATOR);
    key.push_str(msgid);
    key
}
