//! Inter-atom glue between adjacent atoms of a row.
//!
//! Glue is looked up by the spacing classes of the left and right atoms and
//! measured in math units (1/18 em of the current style).

use phf::{Map, phf_map};

use crate::parser::TexClass;

/// `\,`
pub const THIN: f64 = 3.0;
/// `\:`
pub const MEDIUM: f64 = 4.0;
/// `\;`
pub const THICK: f64 = 5.0;

type Spacings = Map<&'static str, Map<&'static str, f64>>;

static SPACINGS: Spacings = phf_map! {
    "ord" => phf_map! {
        "op" => THIN,
        "bin" => MEDIUM,
        "rel" => THICK,
        "inner" => THIN,
    },
    "op" => phf_map! {
        "ord" => THIN,
        "op" => THIN,
        "rel" => THICK,
        "inner" => THIN,
    },
    "bin" => phf_map! {
        "ord" => MEDIUM,
        "op" => MEDIUM,
        "open" => MEDIUM,
        "inner" => MEDIUM,
    },
    "rel" => phf_map! {
        "ord" => THICK,
        "op" => THICK,
        "open" => THICK,
        "inner" => THICK,
    },
    "open" => phf_map! {},
    "close" => phf_map! {
        "op" => THIN,
        "bin" => MEDIUM,
        "rel" => THICK,
        "inner" => THIN,
    },
    "punct" => phf_map! {
        "ord" => THIN,
        "op" => THIN,
        "rel" => THICK,
        "open" => THIN,
        "close" => THIN,
        "punct" => THIN,
        "inner" => THIN,
    },
    "inner" => phf_map! {
        "ord" => THIN,
        "op" => THIN,
        "bin" => MEDIUM,
        "rel" => THICK,
        "open" => THIN,
        "punct" => THIN,
        "inner" => THIN,
    },
};

static TIGHT_SPACINGS: Spacings = phf_map! {
    "ord" => phf_map! { "op" => THIN },
    "op" => phf_map! { "ord" => THIN, "op" => THIN },
    "close" => phf_map! { "op" => THIN },
    "inner" => phf_map! { "op" => THIN },
};

/// Glue in math units between a `left` and a `right` atom.
#[must_use]
pub fn glue(left: TexClass, right: TexClass, tight: bool) -> f64 {
    let table = if tight { &TIGHT_SPACINGS } else { &SPACINGS };
    table
        .get(left.as_ref())
        .and_then(|row| row.get(right.as_ref()))
        .copied()
        .unwrap_or(0.0)
}

/// Demotes binary operators that have no left or right operand to ordinary
/// atoms, as in `-x` or `(+)`.
pub fn demote_binaries(classes: &mut [TexClass]) {
    let mut previous: Option<TexClass> = None;
    for i in 0..classes.len() {
        if classes[i] == TexClass::Bin {
            let no_left = matches!(
                previous,
                None | Some(
                    TexClass::Bin | TexClass::Op | TexClass::Rel | TexClass::Open | TexClass::Punct
                )
            );
            let no_right = matches!(
                classes.get(i + 1),
                None | Some(TexClass::Rel | TexClass::Close | TexClass::Punct)
            );
            if no_left || no_right {
                classes[i] = TexClass::Ord;
            }
        }
        previous = Some(classes[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TexClass::{Bin, Close, Op, Open, Ord, Rel};

    #[test]
    fn glue_by_class_pair() {
        assert_eq!(glue(Ord, Bin, false), MEDIUM);
        assert_eq!(glue(Rel, Ord, false), THICK);
        assert_eq!(glue(Op, Ord, false), THIN);
        assert_eq!(glue(Open, Ord, false), 0.0);
    }

    #[test]
    fn script_styles_keep_only_operator_glue() {
        assert_eq!(glue(Ord, Bin, true), 0.0);
        assert_eq!(glue(Ord, Op, true), THIN);
        assert_eq!(glue(Close, Op, true), THIN);
    }

    #[test]
    fn leading_and_trailing_binaries_become_ordinary() {
        let mut classes = [Bin, Ord, Bin, Ord, Rel, Bin, Ord, Bin];
        demote_binaries(&mut classes);
        assert_eq!(classes, [Ord, Ord, Bin, Ord, Rel, Ord, Ord, Ord]);
    }
}
