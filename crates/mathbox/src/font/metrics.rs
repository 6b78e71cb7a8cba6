//! Glyph metrics and the variant model.
//!
//! Every font variant (`normal`, `bold-italic`, `largeop`, ...) is a table of
//! [`FontCharRecord`]s keyed by code point. Lookups walk the variant's
//! fallback chain. Variants can be static (compiled in), loaded from JSON, or
//! deferred: declared up front and provided later, exactly once, by whoever
//! fetches the data. A lookup that touches a deferred variant that has not
//! been provided yet is reported as pending instead of failing.

use alloc::borrow::Cow;
use core::fmt;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::{debug, trace};

use crate::font::composite::{Assembly, CompositeSpec, assemble};
use crate::font::{data, paths};
use crate::font::params::{MathParams, TEX_PARAMS};
use crate::namespace::KeyMap;
use crate::retry::{Attempt, Dependency};
use crate::types::{Diagnostic, ErrorKind};

/// CHTML sizing flags carried by a glyph (the `css` field of font data).
///
/// Bit 1 asks for an explicit width, bit 2 for right padding (italic
/// correction), bit 4 for generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SizingClass(pub u8);

impl SizingClass {
    /// Explicit width.
    pub const WIDTH: u8 = 1;
    /// Right padding.
    pub const PADDING: u8 = 2;
    /// Generated content.
    pub const CONTENT: u8 = 4;

    /// Whether the glyph box needs an explicit width.
    #[must_use]
    pub const fn has_width(self) -> bool {
        self.0 & Self::WIDTH != 0
    }

    /// Whether the glyph box needs right padding.
    #[must_use]
    pub const fn has_padding(self) -> bool {
        self.0 & Self::PADDING != 0
    }
}

/// Metrics of one glyph, in ems.
#[derive(Debug, Clone, PartialEq)]
pub struct FontCharRecord {
    /// Extent above the baseline.
    pub height: f64,
    /// Extent below the baseline.
    pub depth: f64,
    /// Advance width.
    pub width: f64,
    /// Italic correction.
    pub italic: Option<f64>,
    /// CHTML sizing flags.
    pub sizing: Option<SizingClass>,
    /// SVG outline in 1000-unit em coordinates, y up.
    pub path: Option<Cow<'static, str>>,
}

impl FontCharRecord {
    /// A record with plain box metrics.
    #[must_use]
    pub const fn new(height: f64, depth: f64, width: f64) -> Self {
        Self {
            height,
            depth,
            width,
            italic: None,
            sizing: None,
            path: None,
        }
    }

    /// A record with every field given.
    #[must_use]
    pub const fn with_all(
        height: f64,
        depth: f64,
        width: f64,
        italic: Option<f64>,
        sizing: Option<SizingClass>,
        path: Option<&'static str>,
    ) -> Self {
        Self {
            height,
            depth,
            width,
            italic,
            sizing,
            path: match path {
                Some(p) => Some(Cow::Borrowed(p)),
                None => None,
            },
        }
    }

    /// Placeholder used when a glyph is absent from a whole fallback chain.
    #[must_use]
    pub const fn missing() -> Self {
        Self::new(0.75, 0.0, 0.5)
    }

    /// Total vertical extent.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.height + self.depth
    }
}

/// Options object that may close a JSON char tuple.
#[derive(Debug, Default, Deserialize)]
struct RawCharOptions {
    ic: Option<f64>,
    css: Option<u8>,
    p: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawChar {
    Plain(f64, f64, f64),
    WithOptions(f64, f64, f64, RawCharOptions),
}

#[derive(Debug, Deserialize)]
struct RawVariant {
    chars: BTreeMap<String, RawChar>,
}

/// Parsed contents of one font variant.
///
/// The JSON layout is
/// `{"chars": {"0x41": [h, d, w, {"ic": .., "css": .., "p": ".."}]}}`, with
/// the options object optional and keys given in hex (`0x..`) or decimal.
#[derive(Debug, Clone, Default)]
pub struct FontVariantData {
    records: KeyMap<u32, FontCharRecord>,
}

impl FontVariantData {
    /// Parses variant data from JSON.
    pub fn from_json(json: &str) -> Result<Self, Diagnostic> {
        let raw: RawVariant = serde_json::from_str(json)?;
        let mut records = KeyMap::default();
        for (key, value) in raw.chars {
            let code = parse_code(&key).ok_or_else(|| {
                Diagnostic::new(ErrorKind::InvalidFontData {
                    reason: format!("invalid code point key '{key}'"),
                })
            })?;
            let record = match value {
                RawChar::Plain(h, d, w) => FontCharRecord::new(h, d, w),
                RawChar::WithOptions(h, d, w, options) => FontCharRecord {
                    height: h,
                    depth: d,
                    width: w,
                    italic: options.ic,
                    sizing: options.css.map(SizingClass),
                    path: options.p.map(Cow::Owned),
                },
            };
            records.insert(code, record);
        }
        Ok(Self { records })
    }

    /// Adds a record programmatically.
    pub fn insert(&mut self, code: u32, record: FontCharRecord) {
        self.records.insert(code, record);
    }

    /// Number of glyphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the variant has no glyphs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Copies `metrics`, attaching each glyph's outline where `outlines` has one.
fn with_outlines(
    metrics: &phf::Map<u32, FontCharRecord>,
    outlines: &phf::Map<u32, &'static str>,
) -> KeyMap<u32, FontCharRecord> {
    metrics
        .entries()
        .map(|(code, record)| {
            let mut record = record.clone();
            if let Some(path) = outlines.get(code) {
                record.path = Some(Cow::Borrowed(*path));
            }
            (*code, record)
        })
        .collect()
}

fn parse_code(key: &str) -> Option<u32> {
    key.strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .map_or_else(|| key.parse().ok(), |hex| u32::from_str_radix(hex, 16).ok())
}

enum VariantTable {
    Static(&'static phf::Map<u32, FontCharRecord>),
    Loaded(KeyMap<u32, FontCharRecord>),
    Deferred(OnceLock<KeyMap<u32, FontCharRecord>>),
}

impl VariantTable {
    /// `Err(())` when the variant is deferred and still empty.
    fn get(&self, code: u32) -> Result<Option<&FontCharRecord>, ()> {
        match self {
            Self::Static(map) => Ok(map.get(&code)),
            Self::Loaded(map) => Ok(map.get(&code)),
            Self::Deferred(cell) => cell.get().map(|map| map.get(&code)).ok_or(()),
        }
    }
}

impl fmt::Debug for VariantTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(map) => write!(f, "Static({} glyphs)", map.len()),
            Self::Loaded(map) => write!(f, "Loaded({} glyphs)", map.len()),
            Self::Deferred(cell) => match cell.get() {
                Some(map) => write!(f, "Deferred({} glyphs)", map.len()),
                None => write!(f, "Deferred(pending)"),
            },
        }
    }
}

/// Result of a successful glyph lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph<'a> {
    /// The record to lay out with.
    pub record: &'a FontCharRecord,
    /// Variant the record was found in (the requested one when missing).
    pub variant: &'a str,
    /// Code point.
    pub code: u32,
    /// `GlyphNotFound` when `record` is the placeholder.
    pub missing: Option<Diagnostic>,
}

/// Variants tried, in order, when sizing a delimiter or radical.
pub const DELIMITER_SIZES: [&str; 5] = ["normal", "smallop", "largeop", "size3", "size4"];

/// Process-wide font tables. Immutable after construction except for
/// deferred variants, which are filled once through [`FontTables::provide`].
#[derive(Debug)]
pub struct FontTables {
    variants: KeyMap<String, VariantTable>,
    fallbacks: KeyMap<String, Vec<String>>,
    composites: &'static phf::Map<u32, CompositeSpec>,
    params: MathParams,
}

impl Default for FontTables {
    fn default() -> Self {
        Self::tex()
    }
}

impl FontTables {
    /// The built-in TeX font: eight static variants plus the composite
    /// table for delimiters, radicals and arrows.
    #[must_use]
    pub fn tex() -> Self {
        let mut tables = Self {
            variants: KeyMap::default(),
            fallbacks: KeyMap::default(),
            composites: &data::COMPOSITES,
            params: TEX_PARAMS,
        };
        let statics: [(&str, &'static phf::Map<u32, FontCharRecord>, &[&str]); 8] = [
            ("normal", &data::NORMAL, &[]),
            ("italic", &data::ITALIC, &["normal"]),
            ("bold", &data::BOLD, &["normal"]),
            ("bold-italic", &data::BOLD_ITALIC, &["bold", "normal"]),
            ("smallop", &data::SMALLOP, &["normal"]),
            ("largeop", &data::LARGEOP, &["smallop", "normal"]),
            ("size3", &data::SIZE3, &["normal"]),
            ("size4", &data::SIZE4, &["normal"]),
        ];
        for (name, map, fallback) in statics {
            let table = match paths::outlines(name) {
                Some(outlines) => VariantTable::Loaded(with_outlines(map, outlines)),
                None => VariantTable::Static(map),
            };
            tables.insert(name, table, fallback);
        }
        tables
    }

    fn insert(&mut self, name: &str, table: VariantTable, fallback: &[&str]) {
        self.variants.insert(name.to_owned(), table);
        self.fallbacks.insert(
            name.to_owned(),
            fallback.iter().map(|s| (*s).to_owned()).collect(),
        );
    }

    /// TeX math parameters of the font.
    #[must_use]
    pub const fn params(&self) -> &MathParams {
        &self.params
    }

    /// Registers (or replaces) a variant parsed from JSON.
    pub fn load_variant(
        &mut self,
        name: &str,
        json: &str,
        fallback: &[&str],
    ) -> Result<(), Diagnostic> {
        let data = FontVariantData::from_json(json)?;
        debug!(variant = name, glyphs = data.len(), "loaded font variant");
        self.insert(name, VariantTable::Loaded(data.records), fallback);
        Ok(())
    }

    /// Declares a variant whose data will arrive later.
    pub fn declare_deferred(&mut self, name: &str, fallback: &[&str]) {
        debug!(variant = name, "declared deferred font variant");
        self.insert(name, VariantTable::Deferred(OnceLock::new()), fallback);
    }

    /// Fills a deferred variant. Fails for undeclared or static variants and
    /// when the variant was already provided.
    pub fn provide(&self, name: &str, data: FontVariantData) -> Result<(), Diagnostic> {
        let Some(VariantTable::Deferred(cell)) = self.variants.get(name) else {
            return Err(Diagnostic::new(ErrorKind::UnknownFontVariant {
                variant: name.to_owned(),
            }));
        };
        let glyphs = data.len();
        cell.set(data.records).map_err(|_| {
            Diagnostic::new(ErrorKind::InvalidFontData {
                reason: format!("variant '{name}' was already provided"),
            })
        })?;
        debug!(variant = name, glyphs, "provided deferred font variant");
        Ok(())
    }

    /// Whether `name` is known and, if deferred, already provided.
    #[must_use]
    pub fn is_available(&self, name: &str) -> bool {
        self.variants
            .get(name)
            .is_some_and(|table| !matches!(table, VariantTable::Deferred(cell) if cell.get().is_none()))
    }

    fn chain<'a>(&'a self, variant: &'a str) -> Vec<&'a str> {
        if let Some(fallback) = self.fallbacks.get(variant) {
            let mut chain = Vec::with_capacity(fallback.len() + 1);
            chain.push(variant);
            chain.extend(fallback.iter().map(String::as_str));
            chain
        } else {
            trace!(variant, "unknown variant, using normal");
            vec!["normal"]
        }
    }

    /// Record for `code` in exactly `variant`, without fallback.
    #[must_use]
    pub fn record(&self, variant: &str, code: u32) -> Option<&FontCharRecord> {
        self.variants.get(variant)?.get(code).ok().flatten()
    }

    /// Finds `code` along the fallback chain of `variant`.
    ///
    /// When no variant in the chain has the glyph, `missing` is returned with
    /// a `GlyphNotFound` diagnostic. Reaching a deferred variant that has not
    /// been provided yet yields `Pending` so the caller can retry later.
    pub fn lookup<'a>(
        &'a self,
        variant: &'a str,
        code: u32,
        missing: &'a FontCharRecord,
    ) -> Attempt<Glyph<'a>> {
        for name in self.chain(variant) {
            let Some(table) = self.variants.get(name) else {
                continue;
            };
            match table.get(code) {
                Ok(Some(record)) => {
                    return Attempt::Ready(Glyph {
                        record,
                        variant: name,
                        code,
                        missing: None,
                    });
                }
                Ok(None) => {}
                Err(()) => return Attempt::Pending(Dependency::FontVariant(name.to_owned())),
            }
        }
        trace!(variant, code, "glyph not found");
        Attempt::Ready(Glyph {
            record: missing,
            variant,
            code,
            missing: Some(Diagnostic::new(ErrorKind::GlyphNotFound {
                variant: variant.to_owned(),
                code,
            })),
        })
    }

    /// Large operator glyph: `largeop` in display style, `smallop` otherwise.
    pub fn large_operator_lookup<'a>(
        &'a self,
        code: u32,
        display: bool,
        missing: &'a FontCharRecord,
    ) -> Attempt<Glyph<'a>> {
        self.lookup(if display { "largeop" } else { "smallop" }, code, missing)
    }

    /// Size variants of `code` in increasing order, as `(variant, record)`.
    pub fn size_variants(&self, code: u32) -> impl Iterator<Item = (&'static str, &FontCharRecord)> {
        DELIMITER_SIZES
            .into_iter()
            .filter_map(move |name| self.record(name, code).map(|record| (name, record)))
    }

    /// Composite spec for `code`, if the glyph can be assembled.
    #[must_use]
    pub fn composite(&self, code: u32) -> Option<&'static CompositeSpec> {
        self.composites.get(&code)
    }

    /// Builds `code` to exactly `target` ems along its composite axis.
    pub fn assemble_stretchy(&self, code: u32, target: f64) -> Result<Assembly, Diagnostic> {
        let spec = self.composite(code).ok_or_else(|| {
            Diagnostic::new(ErrorKind::NotStretchable { code, target })
        })?;
        assemble(code, spec, target, |variant, part| self.record(variant, part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_chain_reaches_normal() {
        let fonts = FontTables::tex();
        let missing = FontCharRecord::missing();
        // No bold-italic or bold entry for the prime, normal has one.
        let glyph = fonts.lookup("bold-italic", 0x2032, &missing).ready().unwrap();
        assert_eq!(glyph.variant, "normal");
        assert!(glyph.missing.is_none());
    }

    #[test]
    fn missing_glyph_is_not_fatal() {
        let fonts = FontTables::tex();
        let missing = FontCharRecord::missing();
        let glyph = fonts.lookup("italic", 0x1F600, &missing).ready().unwrap();
        assert_eq!(glyph.record, &missing);
        let diag = glyph.missing.unwrap();
        assert_eq!(diag.code(), crate::types::ErrorCode::GlyphNotFound);
        assert!(diag.is_recoverable());
    }

    #[test]
    fn large_operator_switches_on_display() {
        let fonts = FontTables::tex();
        let missing = FontCharRecord::missing();
        let text = fonts.large_operator_lookup(0x2211, false, &missing).ready().unwrap();
        let display = fonts.large_operator_lookup(0x2211, true, &missing).ready().unwrap();
        assert_eq!(text.variant, "smallop");
        assert_eq!(display.variant, "largeop");
        assert!(display.record.extent() > text.record.extent());
    }

    #[test]
    fn deferred_variant_is_pending_until_provided() {
        let mut fonts = FontTables::tex();
        fonts.declare_deferred("double-struck", &["normal"]);
        let missing = FontCharRecord::missing();
        assert_eq!(
            fonts.lookup("double-struck", 0x52, &missing).ready(),
            None
        );
        let data =
            FontVariantData::from_json(r#"{"chars": {"0x52": [0.683, 0, 0.722]}}"#).unwrap();
        fonts.provide("double-struck", data).unwrap();
        let glyph = fonts.lookup("double-struck", 0x52, &missing).ready().unwrap();
        assert_eq!(glyph.variant, "double-struck");
        assert_eq!(glyph.record.width, 0.722);

        let again = fonts.provide("double-struck", FontVariantData::default());
        assert_eq!(
            again.unwrap_err().code(),
            crate::types::ErrorCode::InvalidFontData
        );
    }

    #[test]
    fn builtin_glyphs_carry_outlines() {
        let fonts = FontTables::tex();
        for (variant, code) in [("italic", 0x78), ("normal", 0x32), ("size4", 0x239C), ("size4", 0xE001)] {
            let record = fonts.record(variant, code).unwrap();
            assert!(record.path.is_some(), "{variant} U+{code:04X}");
        }
        // Bold has metrics only.
        assert!(fonts.record("bold", 0x61).unwrap().path.is_none());
    }

    #[test]
    fn json_options_are_read() {
        let data = FontVariantData::from_json(
            r#"{"chars": {"120": [0.43, 0.01, 0.57, {"ic": 0.02, "css": 3, "p": "M0 0"}]}}"#,
        )
        .unwrap();
        let record = &data.records[&120];
        assert_eq!(record.italic, Some(0.02));
        assert!(record.sizing.unwrap().has_padding());
        assert_eq!(record.path.as_deref(), Some("M0 0"));
    }

    #[test]
    fn bad_json_is_reported() {
        let err = FontVariantData::from_json(r#"{"chars": {"zz": [1, 2, 3]}}"#).unwrap_err();
        assert_eq!(err.code(), crate::types::ErrorCode::InvalidFontData);
        let err = FontVariantData::from_json("{").unwrap_err();
        assert_eq!(err.code(), crate::types::ErrorCode::InvalidFontData);
    }
}
