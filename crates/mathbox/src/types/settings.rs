use core::time::Duration;

use bon::bon;
use strum::{AsRefStr, Display, EnumString};

use crate::font::FontCharRecord;

/// Markup flavour produced by the render stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum OutputTarget {
    /// Nested, absolutely sized `mjx-*` containers ("box output").
    #[default]
    Chtml,
    /// Glyph path placements inside an `<svg>` ("vector output").
    Svg,
}

/// Per-request typesetting options.
///
/// All fields carry concrete values; use [`Settings::builder`] to override
/// only what differs from the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Typeset as a block (display style) instead of inline (text style).
    pub display_mode: bool,
    /// Which serializer the render stage uses.
    pub output: OutputTarget,
    /// Upper bound on macro expansions per parse.
    pub max_expand: usize,
    /// Upper bound on nested braces, environments and arguments.
    pub max_nesting: usize,
    /// Scale of script style relative to text style.
    pub script_ratio: f64,
    /// Scale of scriptscript style relative to text style.
    pub scriptscript_ratio: f64,
    /// Colour used for visible error markers.
    pub error_color: String,
    /// Metrics substituted for glyphs missing from every variant in a
    /// fallback chain.
    pub missing_glyph: FontCharRecord,
    /// How many `Pending` attempts the retry coordinator tolerates.
    pub max_retries: usize,
    /// Longest single wait for a dependency to become ready.
    pub wait_timeout: Duration,
    /// Hint that the surrounding text is bold, consumed by `autobold`.
    pub bold_context: bool,
}

#[bon]
impl Settings {
    /// Creates settings, falling back to defaults for every `None`.
    ///
    /// # Default Values
    /// - `display_mode`: `false`
    /// - `output`: [`OutputTarget::Chtml`]
    /// - `max_expand`: `1000`
    /// - `max_nesting`: `40`
    /// - `script_ratio`: `0.71`, `scriptscript_ratio`: `0.5`
    /// - `error_color`: `"#cc0000"`
    /// - `missing_glyph`: a 0.5em wide, 0.75em tall blank box
    /// - `max_retries`: `5`
    /// - `wait_timeout`: 2 seconds
    /// - `bold_context`: `false`
    #[must_use]
    #[builder]
    pub fn new(
        /// Block (true) or inline (false) layout.
        display_mode: Option<bool>,
        /// Output flavour.
        output: Option<OutputTarget>,
        /// Macro expansion budget.
        max_expand: Option<usize>,
        /// Group nesting budget.
        max_nesting: Option<usize>,
        /// Script scale factor.
        script_ratio: Option<f64>,
        /// Scriptscript scale factor.
        scriptscript_ratio: Option<f64>,
        /// CSS colour of error markers.
        error_color: Option<String>,
        /// Placeholder metrics for missing glyphs.
        missing_glyph: Option<FontCharRecord>,
        /// Retry bound for dependency waits.
        max_retries: Option<usize>,
        /// Per-wait timeout.
        wait_timeout: Option<Duration>,
        /// Bold surrounding text.
        bold_context: Option<bool>,
    ) -> Self {
        Self {
            display_mode: display_mode.unwrap_or(false),
            output: output.unwrap_or_default(),
            max_expand: max_expand.unwrap_or(1000),
            max_nesting: max_nesting.unwrap_or(40),
            script_ratio: script_ratio.unwrap_or(0.71),
            scriptscript_ratio: scriptscript_ratio.unwrap_or(0.5),
            error_color: error_color.unwrap_or_else(|| "#cc0000".to_owned()),
            missing_glyph: missing_glyph.unwrap_or_else(FontCharRecord::missing),
            max_retries: max_retries.unwrap_or(5),
            wait_timeout: wait_timeout.unwrap_or(Duration::from_secs(2)),
            bold_context: bold_context.unwrap_or(false),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert!(!settings.display_mode);
        assert_eq!(settings.output, OutputTarget::Chtml);
        assert_eq!(settings.max_expand, 1000);
        assert_eq!(settings.max_nesting, 40);
        assert_eq!(settings.wait_timeout, Duration::from_secs(2));
    }

    #[test]
    fn builder_overrides_only_given_fields() {
        let settings = Settings::builder()
            .display_mode(true)
            .output(OutputTarget::Svg)
            .max_expand(10)
            .build();
        assert!(settings.display_mode);
        assert_eq!(settings.output.as_ref(), "svg");
        assert_eq!(settings.max_expand, 10);
        assert_eq!(settings.script_ratio, 0.71);
    }
}
