//! Stretchy glyph assembly.
//!
//! A composite glyph is built from fixed pieces (bottom, optional middle,
//! top) and a repeatable extender. Pieces are listed from the start of the
//! axis: bottom-to-top for vertical assemblies, left-to-right for horizontal
//! ones (where `Bottom` is the start piece and `Top` the end piece).

use strum::{AsRefStr, Display};

use crate::font::FontCharRecord;
use crate::types::{Diagnostic, ErrorKind};

/// Direction a composite glyph grows in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    /// Delimiters and radicals.
    Vertical,
    /// Arrows over content.
    Horizontal,
}

/// Role of a piece within an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum PartRole {
    /// End piece (top, or right for horizontal assemblies).
    Top,
    /// Centre piece, extenders are split around it.
    Middle,
    /// Start piece (bottom, or left for horizontal assemblies).
    Bottom,
    /// Repeated to fill the remaining length.
    Extender,
}

/// One piece of a composite spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartSpec {
    /// Role of the piece.
    pub role: PartRole,
    /// Glyph code point.
    pub code: u32,
    /// Length shared with the preceding piece.
    pub overlap: f64,
}

impl PartSpec {
    /// A piece with no overlap.
    #[must_use]
    pub const fn new(role: PartRole, code: u32) -> Self {
        Self {
            role,
            code,
            overlap: 0.0,
        }
    }

    /// A piece overlapping the preceding one by `overlap` ems.
    #[must_use]
    pub const fn overlapping(role: PartRole, code: u32, overlap: f64) -> Self {
        Self {
            role,
            code,
            overlap,
        }
    }
}

/// How a glyph is assembled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeSpec {
    /// Growth direction.
    pub axis: Axis,
    /// Variant the pieces are taken from.
    pub variant: &'static str,
    /// Pieces in axis order. At least one extender is required to stretch.
    pub parts: &'static [PartSpec],
}

/// A placed piece of an assembled glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyPart {
    /// Role of the piece.
    pub role: PartRole,
    /// Glyph code point.
    pub code: u32,
    /// Offset of the piece's start edge from the assembly start.
    pub position: f64,
    /// Scale along the axis (1 for fixed pieces, at most 1 for extenders).
    pub scale: f64,
    /// Unscaled length of the piece along the axis.
    pub extent: f64,
    /// Size across the axis.
    pub breadth: f64,
}

/// A glyph built to an exact length.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// The stretched code point.
    pub code: u32,
    /// Growth direction.
    pub axis: Axis,
    /// Variant the pieces come from.
    pub variant: &'static str,
    /// Pieces in axis order.
    pub parts: Vec<AssemblyPart>,
    /// Total length, equal to the requested target.
    pub extent: f64,
    /// Widest piece across the axis.
    pub breadth: f64,
}

struct Measured {
    spec: PartSpec,
    extent: f64,
    breadth: f64,
}

impl Measured {
    /// Length a tile adds after the piece before it.
    fn step(&self) -> f64 {
        self.extent - self.spec.overlap
    }
}

#[derive(Clone, Copy)]
enum Piece<'m> {
    Fixed(&'m Measured),
    Run(&'m Measured),
}

/// Lays out `spec` to cover exactly `target`.
///
/// Fixed pieces are placed once; each extender is tiled `ceil(gap / step)`
/// times, with its own step, and scaled down uniformly so the tiles fill its
/// share of the gap exactly. With a middle piece and a single extender, the
/// gap is split evenly on both sides of the middle. A piece overlaps only the
/// piece placed before it, so whichever piece comes first overlaps nothing.
pub fn assemble<'a>(
    code: u32,
    spec: &CompositeSpec,
    target: f64,
    record: impl Fn(&'static str, u32) -> Option<&'a FontCharRecord>,
) -> Result<Assembly, Diagnostic> {
    let not_stretchable = || Diagnostic::new(ErrorKind::NotStretchable { code, target });

    let mut measured = Vec::with_capacity(spec.parts.len());
    for part in spec.parts {
        let glyph = record(spec.variant, part.code).ok_or_else(not_stretchable)?;
        let (extent, breadth) = match spec.axis {
            Axis::Vertical => (glyph.extent(), glyph.width),
            Axis::Horizontal => (glyph.width, glyph.extent()),
        };
        measured.push(Measured {
            spec: *part,
            extent,
            breadth,
        });
    }

    let extenders: Vec<&Measured> = measured
        .iter()
        .filter(|m| m.spec.role == PartRole::Extender)
        .collect();
    let [first_extender, ..] = extenders[..] else {
        return Err(not_stretchable());
    };
    if extenders.iter().any(|m| m.step() <= 0.0) {
        return Err(not_stretchable());
    }

    let mut pieces = Vec::with_capacity(measured.len() + 1);
    for m in &measured {
        if m.spec.role == PartRole::Extender {
            pieces.push(Piece::Run(m));
        } else {
            pieces.push(Piece::Fixed(m));
            // A single listed extender also fills the upper side of the middle.
            if m.spec.role == PartRole::Middle && extenders.len() == 1 {
                pieces.push(Piece::Run(first_extender));
            }
        }
    }

    // With no tiles the first fixed piece leads and overlaps nothing.
    let mut fixed = measured.iter().filter(|m| m.spec.role != PartRole::Extender);
    let first_fixed = fixed.next();
    let lead_overlap = first_fixed.map_or(0.0, |m| m.spec.overlap);
    let minimum = first_fixed.map_or(0.0, |m| m.extent)
        + fixed.map(|m| m.extent - m.spec.overlap).sum::<f64>();
    if target < minimum {
        return Err(not_stretchable());
    }

    let gap = target - minimum;
    let runs = pieces.iter().filter(|p| matches!(p, Piece::Run(_))).count();
    let per_run = gap / runs as f64;

    let mut parts = Vec::new();
    let mut cursor = 0.0;
    let mut place = |m: &Measured, scale: f64, parts: &mut Vec<AssemblyPart>| {
        let overlap = if parts.is_empty() { 0.0 } else { m.spec.overlap * scale };
        let position = cursor - overlap;
        cursor = position + m.extent * scale;
        parts.push(AssemblyPart {
            role: m.spec.role,
            code: m.spec.code,
            position,
            scale,
            extent: m.extent,
            breadth: m.breadth,
        });
    };

    for (i, piece) in pieces.iter().enumerate() {
        match *piece {
            Piece::Fixed(m) => place(m, 1.0, &mut parts),
            Piece::Run(m) if per_run > 0.0 => {
                // A leading run's first tile overlaps nothing, and the first
                // fixed piece then overlaps the run.
                let (own, taken) = if i == 0 {
                    (m.spec.overlap, lead_overlap)
                } else {
                    (0.0, 0.0)
                };
                let length = per_run + taken;
                let tiles = ((length - own) / m.step()).ceil().max(1.0) as usize;
                let scale = length / (tiles as f64 * m.step() + own);
                for _ in 0..tiles {
                    place(m, scale, &mut parts);
                }
            }
            Piece::Run(_) => {}
        }
    }

    let breadth = measured.iter().map(|m| m.breadth).fold(0.0, f64::max);
    Ok(Assembly {
        code,
        axis: spec.axis,
        variant: spec.variant,
        parts,
        extent: target,
        breadth,
    })
}

impl Assembly {
    /// End of the last piece, which equals `extent` up to rounding.
    #[must_use]
    pub fn covered(&self) -> f64 {
        self.parts
            .iter()
            .map(|p| p.position + p.extent * p.scale)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR: CompositeSpec = CompositeSpec {
        axis: Axis::Vertical,
        variant: "test",
        parts: &[
            PartSpec::new(PartRole::Bottom, 1),
            PartSpec::overlapping(PartRole::Extender, 2, 0.1),
            PartSpec::overlapping(PartRole::Top, 3, 0.1),
        ],
    };

    fn records(_: &'static str, code: u32) -> Option<&'static FontCharRecord> {
        static END: FontCharRecord = FontCharRecord::new(1.0, 0.0, 0.5);
        static EXT: FontCharRecord = FontCharRecord::new(0.5, 0.0, 0.4);
        static SHORT: FontCharRecord = FontCharRecord::new(0.3, 0.0, 0.4);
        match code {
            1 | 3 => Some(&END),
            2 => Some(&EXT),
            4 => Some(&SHORT),
            _ => None,
        }
    }

    fn run_length(assembly: &Assembly, code: u32) -> f64 {
        assembly
            .parts
            .iter()
            .filter(|p| p.code == code)
            .map(|p| p.extent * p.scale)
            .sum()
    }

    #[test]
    fn tiles_cover_target_exactly() {
        let assembly = assemble(9, &BAR, 3.0, records).unwrap();
        // minimum = 1.0 + (1.0 - 0.1) = 1.9, gap 1.1, step 0.4 -> 3 tiles
        let tiles: Vec<_> = assembly
            .parts
            .iter()
            .filter(|p| p.role == PartRole::Extender)
            .collect();
        assert_eq!(tiles.len(), 3);
        assert!(tiles.iter().all(|t| t.scale <= 1.0 && t.scale > 0.0));
        assert!((assembly.covered() - 3.0).abs() < 1e-9);
        assert_eq!(assembly.breadth, 0.5);
    }

    #[test]
    fn exact_minimum_needs_no_extender() {
        let assembly = assemble(9, &BAR, 1.9, records).unwrap();
        assert_eq!(assembly.parts.len(), 2);
        assert!((assembly.covered() - 1.9).abs() < 1e-9);
    }

    #[test]
    fn below_minimum_is_not_stretchable() {
        let err = assemble(9, &BAR, 1.0, records).unwrap_err();
        assert_eq!(err.code(), crate::types::ErrorCode::NotStretchable);
    }

    #[test]
    fn middle_piece_splits_extenders() {
        const BRACE: CompositeSpec = CompositeSpec {
            axis: Axis::Vertical,
            variant: "test",
            parts: &[
                PartSpec::new(PartRole::Bottom, 1),
                PartSpec::new(PartRole::Extender, 2),
                PartSpec::new(PartRole::Middle, 3),
                PartSpec::new(PartRole::Top, 1),
            ],
        };
        let assembly = assemble(9, &BRACE, 5.0, records).unwrap();
        let roles: Vec<_> = assembly.parts.iter().map(|p| p.role).collect();
        let middle = roles.iter().position(|r| *r == PartRole::Middle).unwrap();
        let below = roles[..middle].iter().filter(|r| **r == PartRole::Extender).count();
        let above = roles[middle..].iter().filter(|r| **r == PartRole::Extender).count();
        assert_eq!(below, above);
        assert!((assembly.covered() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn leading_extender_overlaps_only_what_follows() {
        const RISING: CompositeSpec = CompositeSpec {
            axis: Axis::Vertical,
            variant: "test",
            parts: &[
                PartSpec::overlapping(PartRole::Extender, 2, 0.1),
                PartSpec::overlapping(PartRole::Top, 3, 0.2),
            ],
        };
        for target in [1.0, 1.3, 2.75] {
            let assembly = assemble(9, &RISING, target, records).unwrap();
            assert!((assembly.covered() - target).abs() < 1e-9, "{target}");
            assert_eq!(assembly.parts[0].position, 0.0);
            assert!(assembly.parts.iter().all(|p| p.scale > 0.0 && p.scale <= 1.0 + 1e-12));
        }
        // The top piece overlaps the last tile by its own overlap.
        let assembly = assemble(9, &RISING, 2.75, records).unwrap();
        let [.., tile, top] = assembly.parts.as_slice() else {
            panic!("expected tiles below the top piece");
        };
        assert_eq!(tile.role, PartRole::Extender);
        let tile_end = tile.position + tile.extent * tile.scale;
        assert!((tile_end - top.position - 0.2).abs() < 1e-9);
    }

    #[test]
    fn each_extender_tiles_with_its_own_step() {
        const MIXED: CompositeSpec = CompositeSpec {
            axis: Axis::Vertical,
            variant: "test",
            parts: &[
                PartSpec::new(PartRole::Bottom, 1),
                PartSpec::new(PartRole::Extender, 2),
                PartSpec::new(PartRole::Middle, 3),
                PartSpec::new(PartRole::Extender, 4),
                PartSpec::new(PartRole::Top, 1),
            ],
        };
        let assembly = assemble(9, &MIXED, 5.0, records).unwrap();
        assert!((assembly.covered() - 5.0).abs() < 1e-9);
        let count = |code| assembly.parts.iter().filter(|p| p.code == code).count();
        assert_eq!(count(2), 2);
        assert_eq!(count(4), 4);
        assert!((run_length(&assembly, 2) - 1.0).abs() < 1e-9);
        assert!((run_length(&assembly, 4) - 1.0).abs() < 1e-9);
    }
}
