//! TeX math styles and the transitions between them.
//!
//! Eight styles exist: display, text, script and scriptscript, each with a
//! cramped twin. Scripts, fraction parts and radicands move to a smaller or
//! cramped style through fixed lookup tables.

use crate::types::Settings;

/// One of the eight TeX math styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Index into the transition tables.
    pub id: usize,
    /// Size level: 0 display, 1 text, 2 script, 3 scriptscript.
    pub size: usize,
    /// Cramped styles lower superscripts.
    pub cramped: bool,
}

impl Style {
    const fn new(id: usize, size: usize, cramped: bool) -> Self {
        Self { id, size, cramped }
    }

    /// Style of a superscript on a base in this style.
    #[must_use]
    pub const fn sup(&self) -> &'static Self {
        &STYLES[SUP[self.id]]
    }

    /// Style of a subscript on a base in this style.
    #[must_use]
    pub const fn sub(&self) -> &'static Self {
        &STYLES[SUB[self.id]]
    }

    /// Style of a numerator.
    #[must_use]
    pub const fn frac_num(&self) -> &'static Self {
        &STYLES[FRAC_NUM[self.id]]
    }

    /// Style of a denominator.
    #[must_use]
    pub const fn frac_den(&self) -> &'static Self {
        &STYLES[FRAC_DEN[self.id]]
    }

    /// Cramped twin; cramping twice changes nothing.
    #[must_use]
    pub const fn cramp(&self) -> &'static Self {
        &STYLES[CRAMP[self.id]]
    }

    /// Display (`true`) or text (`false`) style, keeping crampedness.
    #[must_use]
    pub const fn with_display(&self, display: bool) -> &'static Self {
        match (display, self.cramped) {
            (true, false) => &STYLES[D],
            (true, true) => &STYLES[DC],
            (false, false) => &STYLES[T],
            (false, true) => &STYLES[TC],
        }
    }

    /// Script and scriptscript styles drop most inter-atom glue.
    #[must_use]
    pub const fn is_tight(&self) -> bool {
        self.size >= 2
    }

    /// Whether this is a display style.
    #[must_use]
    pub const fn is_display(&self) -> bool {
        self.size == 0
    }

    /// Font scale relative to text style.
    #[must_use]
    pub fn scale(&self, settings: &Settings) -> f64 {
        match self.size {
            0 | 1 => 1.0,
            2 => settings.script_ratio,
            _ => settings.scriptscript_ratio,
        }
    }
}

const D: usize = 0;
const DC: usize = 1;
const T: usize = 2;
const TC: usize = 3;
const S: usize = 4;
const SC: usize = 5;
const SS: usize = 6;
const SSC: usize = 7;

const STYLES: [Style; 8] = [
    Style::new(D, 0, false),
    Style::new(DC, 0, true),
    Style::new(T, 1, false),
    Style::new(TC, 1, true),
    Style::new(S, 2, false),
    Style::new(SC, 2, true),
    Style::new(SS, 3, false),
    Style::new(SSC, 3, true),
];

const SUP: [usize; 8] = [S, SC, S, SC, SS, SSC, SS, SSC];
const SUB: [usize; 8] = [SC, SC, SC, SC, SSC, SSC, SSC, SSC];
const FRAC_NUM: [usize; 8] = [T, TC, S, SC, SS, SSC, SS, SSC];
const FRAC_DEN: [usize; 8] = [TC, TC, SC, SC, SSC, SSC, SSC, SSC];
const CRAMP: [usize; 8] = [DC, DC, TC, TC, SC, SC, SSC, SSC];

/// `\displaystyle`, and the root style of block math.
pub const DISPLAY: &Style = &STYLES[D];
/// `\textstyle`, and the root style of inline math.
pub const TEXT: &Style = &STYLES[T];
/// First script level.
pub const SCRIPT: &Style = &STYLES[S];
/// Second and deeper script levels.
pub const SCRIPTSCRIPT: &Style = &STYLES[SS];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_shrink_and_cramp() {
        assert_eq!(DISPLAY.sup(), SCRIPT);
        assert_eq!(SCRIPT.sup(), SCRIPTSCRIPT);
        assert_eq!(SCRIPTSCRIPT.sup(), SCRIPTSCRIPT);
        assert!(TEXT.sub().cramped);
        assert!(DISPLAY.frac_den().cramped);
        assert_eq!(DISPLAY.frac_num(), TEXT);
        assert_eq!(TEXT.cramp().cramp(), TEXT.cramp());
    }

    #[test]
    fn display_switch_keeps_crampedness() {
        assert_eq!(SCRIPT.cramp().with_display(true), DISPLAY.cramp());
        assert_eq!(SCRIPT.with_display(false), TEXT);
        assert!(DISPLAY.is_display());
        assert!(SCRIPT.is_tight());
        assert!(!TEXT.is_tight());
    }

    #[test]
    fn scale_follows_settings() {
        let settings = Settings::builder().script_ratio(0.7).build();
        assert_eq!(DISPLAY.scale(&settings), 1.0);
        assert_eq!(SCRIPT.scale(&settings), 0.7);
        assert_eq!(SCRIPTSCRIPT.scale(&settings), 0.5);
    }
}
