//! Static metrics of the TeX math fonts.
//!
//! Values are `[height, depth, width]` in ems, taken from the Computer Modern
//! based MathJax TeX fonts. Only glyphs reachable from the built-in packages
//! are listed; anything else falls back through the variant chain and ends
//! as a missing glyph.

use phf::phf_map;

use crate::font::composite::PartRole::{Bottom, Extender, Middle, Top};
use crate::font::composite::{Axis, CompositeSpec, PartSpec};
use crate::font::metrics::{FontCharRecord, SizingClass};

const fn c(height: f64, depth: f64, width: f64) -> FontCharRecord {
    FontCharRecord::new(height, depth, width)
}

/// Upright Roman, operators and upright Greek capitals.
pub static NORMAL: phf::Map<u32, FontCharRecord> = phf_map! {
    0x20u32 => c(0.0, 0.0, 0.25),
    0x21u32 => c(0.716, 0.0, 0.278),
    0x28u32 => c(0.75, 0.25, 0.389),
    0x29u32 => c(0.75, 0.25, 0.389),
    0x2Au32 => c(0.75, -0.25, 0.5),
    0x2Bu32 => c(0.583, 0.082, 0.778),
    0x2Cu32 => c(0.121, 0.194, 0.278),
    0x2Eu32 => c(0.12, 0.0, 0.278),
    0x2Fu32 => c(0.75, 0.25, 0.5),
    0x30u32 => c(0.666, 0.022, 0.5),
    0x31u32 => c(0.666, 0.0, 0.5),
    0x32u32 => c(0.666, 0.0, 0.5),
    0x33u32 => c(0.665, 0.022, 0.5),
    0x34u32 => c(0.677, 0.0, 0.5),
    0x35u32 => c(0.666, 0.022, 0.5),
    0x36u32 => c(0.666, 0.022, 0.5),
    0x37u32 => c(0.676, 0.022, 0.5),
    0x38u32 => c(0.666, 0.022, 0.5),
    0x39u32 => c(0.666, 0.022, 0.5),
    0x3Au32 => c(0.43, 0.0, 0.278),
    0x3Bu32 => c(0.43, 0.194, 0.278),
    0x3Cu32 => c(0.54, 0.04, 0.778),
    0x3Du32 => c(0.583, -0.082, 0.778),
    0x3Eu32 => c(0.54, 0.04, 0.778),
    0x41u32 => c(0.716, 0.0, 0.75),
    0x42u32 => c(0.683, 0.0, 0.708),
    0x43u32 => c(0.705, 0.021, 0.722),
    0x44u32 => c(0.683, 0.0, 0.764),
    0x45u32 => c(0.68, 0.0, 0.681),
    0x46u32 => c(0.68, 0.0, 0.653),
    0x47u32 => c(0.705, 0.022, 0.785),
    0x48u32 => c(0.683, 0.0, 0.75),
    0x49u32 => c(0.683, 0.0, 0.361),
    0x4Au32 => c(0.683, 0.022, 0.514),
    0x4Bu32 => c(0.683, 0.0, 0.778),
    0x4Cu32 => c(0.683, 0.0, 0.625),
    0x4Du32 => c(0.683, 0.0, 0.917),
    0x4Eu32 => c(0.683, 0.0, 0.75),
    0x4Fu32 => c(0.705, 0.022, 0.778),
    0x50u32 => c(0.683, 0.0, 0.681),
    0x51u32 => c(0.705, 0.193, 0.778),
    0x52u32 => c(0.683, 0.022, 0.736),
    0x53u32 => c(0.705, 0.022, 0.556),
    0x54u32 => c(0.677, 0.0, 0.722),
    0x55u32 => c(0.683, 0.022, 0.75),
    0x56u32 => c(0.683, 0.022, 0.75),
    0x57u32 => c(0.683, 0.022, 1.028),
    0x58u32 => c(0.683, 0.0, 0.75),
    0x59u32 => c(0.683, 0.0, 0.75),
    0x5Au32 => c(0.683, 0.0, 0.611),
    0x5Bu32 => c(0.75, 0.25, 0.278),
    0x5Du32 => c(0.75, 0.25, 0.278),
    0x5Eu32 => c(0.694, -0.531, 0.5),
    0x61u32 => c(0.448, 0.011, 0.5),
    0x62u32 => c(0.694, 0.011, 0.556),
    0x63u32 => c(0.448, 0.011, 0.444),
    0x64u32 => c(0.694, 0.011, 0.556),
    0x65u32 => c(0.448, 0.011, 0.444),
    0x66u32 => FontCharRecord::with_all(0.705, 0.0, 0.306, Some(0.078), None, None),
    0x67u32 => c(0.453, 0.206, 0.5),
    0x68u32 => c(0.694, 0.0, 0.556),
    0x69u32 => c(0.669, 0.0, 0.278),
    0x6Au32 => c(0.669, 0.205, 0.306),
    0x6Bu32 => c(0.694, 0.0, 0.528),
    0x6Cu32 => c(0.694, 0.0, 0.278),
    0x6Du32 => c(0.442, 0.0, 0.833),
    0x6Eu32 => c(0.442, 0.0, 0.556),
    0x6Fu32 => c(0.448, 0.01, 0.5),
    0x70u32 => c(0.442, 0.194, 0.556),
    0x71u32 => c(0.442, 0.194, 0.528),
    0x72u32 => c(0.442, 0.0, 0.392),
    0x73u32 => c(0.448, 0.011, 0.394),
    0x74u32 => c(0.615, 0.01, 0.389),
    0x75u32 => c(0.442, 0.011, 0.556),
    0x76u32 => c(0.431, 0.011, 0.528),
    0x77u32 => c(0.431, 0.011, 0.722),
    0x78u32 => c(0.431, 0.0, 0.528),
    0x79u32 => c(0.431, 0.204, 0.528),
    0x7Au32 => c(0.431, 0.0, 0.444),
    0x7Bu32 => c(0.75, 0.25, 0.5),
    0x7Cu32 => c(0.75, 0.249, 0.278),
    0x7Du32 => c(0.75, 0.25, 0.5),
    0x7Eu32 => c(0.318, -0.215, 0.5),
    0xAFu32 => c(0.59, -0.544, 0.5),
    0xB1u32 => c(0.666, 0.0, 0.778),
    0xD7u32 => c(0.491, -0.009, 0.778),
    0xF7u32 => c(0.537, 0.036, 0.778),
    0x2C6u32 => c(0.694, -0.531, 0.5),
    0x2D9u32 => c(0.669, -0.554, 0.278),
    0x2DCu32 => c(0.668, -0.565, 0.5),
    0x393u32 => c(0.68, 0.0, 0.625),
    0x394u32 => c(0.716, 0.0, 0.833),
    0x398u32 => c(0.705, 0.022, 0.778),
    0x39Bu32 => c(0.716, 0.0, 0.694),
    0x39Eu32 => c(0.677, 0.0, 0.667),
    0x3A0u32 => c(0.68, 0.0, 0.75),
    0x3A3u32 => c(0.683, 0.0, 0.722),
    0x3A6u32 => c(0.683, 0.0, 0.722),
    0x3A8u32 => c(0.683, 0.0, 0.778),
    0x3A9u32 => c(0.704, 0.0, 0.722),
    0x2026u32 => c(0.12, 0.0, 1.172),
    0x2032u32 => c(0.56, -0.043, 0.275),
    0x2190u32 => c(0.511, 0.011, 1.0),
    0x2192u32 => c(0.511, 0.011, 1.0),
    0x21D2u32 => c(0.525, 0.024, 1.0),
    0x2207u32 => c(0.683, 0.033, 0.833),
    0x2208u32 => c(0.54, 0.04, 0.667),
    0x2212u32 => c(0.583, 0.082, 0.778),
    0x221Au32 => c(0.8, 0.2, 0.833),
    0x221Eu32 => c(0.442, 0.011, 1.0),
    0x2223u32 => c(0.75, 0.249, 0.278),
    0x2225u32 => c(0.75, 0.25, 0.5),
    0x2260u32 => c(0.716, 0.215, 0.778),
    0x2264u32 => c(0.636, 0.138, 0.778),
    0x2265u32 => c(0.636, 0.138, 0.778),
    0x22C5u32 => c(0.31, -0.19, 0.278),
    0x22EFu32 => c(0.31, -0.19, 1.172),
    0x27E8u32 => c(0.75, 0.25, 0.389),
    0x27E9u32 => c(0.75, 0.25, 0.389),
};

/// Math italic letters and lowercase Greek.
pub static ITALIC: phf::Map<u32, FontCharRecord> = phf_map! {
    0x41u32 => c(0.716, 0.0, 0.75),
    0x42u32 => c(0.683, 0.0, 0.759),
    0x43u32 => FontCharRecord::with_all(0.705, 0.022, 0.715, Some(0.045), None, None),
    0x44u32 => c(0.683, 0.0, 0.828),
    0x45u32 => FontCharRecord::with_all(0.68, 0.0, 0.738, Some(0.026), None, None),
    0x46u32 => FontCharRecord::with_all(0.68, 0.0, 0.643, Some(0.106), None, None),
    0x47u32 => c(0.705, 0.022, 0.786),
    0x48u32 => FontCharRecord::with_all(0.683, 0.0, 0.831, Some(0.057), None, None),
    0x49u32 => FontCharRecord::with_all(0.683, 0.0, 0.44, Some(0.064), None, None),
    0x4Au32 => FontCharRecord::with_all(0.683, 0.022, 0.555, Some(0.078), None, None),
    0x4Bu32 => FontCharRecord::with_all(0.683, 0.0, 0.849, Some(0.04), None, None),
    0x4Cu32 => c(0.683, 0.0, 0.681),
    0x4Du32 => FontCharRecord::with_all(0.683, 0.0, 0.97, Some(0.081), None, None),
    0x4Eu32 => FontCharRecord::with_all(0.683, 0.0, 0.803, Some(0.085), None, None),
    0x4Fu32 => c(0.704, 0.022, 0.763),
    0x50u32 => FontCharRecord::with_all(0.683, 0.0, 0.642, Some(0.109), None, None),
    0x51u32 => c(0.704, 0.194, 0.791),
    0x52u32 => c(0.683, 0.021, 0.759),
    0x53u32 => FontCharRecord::with_all(0.705, 0.022, 0.613, Some(0.032), None, None),
    0x54u32 => FontCharRecord::with_all(0.677, 0.0, 0.584, Some(0.12), None, None),
    0x55u32 => FontCharRecord::with_all(0.683, 0.022, 0.683, Some(0.084), None, None),
    0x56u32 => FontCharRecord::with_all(0.683, 0.022, 0.583, Some(0.186), None, None),
    0x57u32 => FontCharRecord::with_all(0.683, 0.022, 0.944, Some(0.104), None, None),
    0x58u32 => FontCharRecord::with_all(0.683, 0.0, 0.828, Some(0.024), None, None),
    0x59u32 => FontCharRecord::with_all(0.683, 0.0, 0.581, Some(0.182), None, None),
    0x5Au32 => FontCharRecord::with_all(0.683, 0.0, 0.683, Some(0.04), None, None),
    0x61u32 => c(0.441, 0.01, 0.529),
    0x62u32 => c(0.694, 0.011, 0.429),
    0x63u32 => c(0.442, 0.011, 0.433),
    0x64u32 => c(0.694, 0.01, 0.52),
    0x65u32 => c(0.442, 0.011, 0.466),
    0x66u32 => FontCharRecord::with_all(0.705, 0.205, 0.49, Some(0.06), None, None),
    0x67u32 => c(0.442, 0.205, 0.477),
    0x68u32 => c(0.694, 0.011, 0.576),
    0x69u32 => c(0.661, 0.011, 0.345),
    0x6Au32 => c(0.661, 0.204, 0.412),
    0x6Bu32 => c(0.694, 0.011, 0.521),
    0x6Cu32 => c(0.694, 0.011, 0.298),
    0x6Du32 => c(0.442, 0.011, 0.878),
    0x6Eu32 => c(0.442, 0.011, 0.6),
    0x6Fu32 => c(0.441, 0.011, 0.485),
    0x70u32 => c(0.442, 0.194, 0.503),
    0x71u32 => c(0.442, 0.194, 0.446),
    0x72u32 => c(0.442, 0.011, 0.451),
    0x73u32 => c(0.442, 0.01, 0.469),
    0x74u32 => c(0.626, 0.011, 0.361),
    0x75u32 => c(0.442, 0.011, 0.572),
    0x76u32 => c(0.443, 0.011, 0.485),
    0x77u32 => c(0.443, 0.011, 0.716),
    0x78u32 => c(0.442, 0.011, 0.572),
    0x79u32 => c(0.442, 0.205, 0.49),
    0x7Au32 => c(0.442, 0.011, 0.465),
    0x3B1u32 => c(0.442, 0.011, 0.64),
    0x3B2u32 => c(0.705, 0.194, 0.566),
    0x3B3u32 => c(0.441, 0.216, 0.518),
    0x3B4u32 => c(0.717, 0.01, 0.444),
    0x3B5u32 => c(0.452, 0.022, 0.466),
    0x3B6u32 => c(0.704, 0.204, 0.438),
    0x3B7u32 => c(0.442, 0.216, 0.497),
    0x3B8u32 => c(0.705, 0.01, 0.469),
    0x3B9u32 => c(0.442, 0.01, 0.354),
    0x3BAu32 => c(0.442, 0.011, 0.576),
    0x3BBu32 => c(0.694, 0.012, 0.583),
    0x3BCu32 => c(0.442, 0.216, 0.603),
    0x3BDu32 => c(0.442, 0.0, 0.494),
    0x3BEu32 => c(0.704, 0.205, 0.438),
    0x3C0u32 => c(0.431, 0.011, 0.57),
    0x3C1u32 => c(0.442, 0.216, 0.517),
    0x3C3u32 => c(0.431, 0.011, 0.571),
    0x3C4u32 => c(0.431, 0.013, 0.437),
    0x3C5u32 => c(0.443, 0.01, 0.54),
    0x3C6u32 => c(0.442, 0.218, 0.654),
    0x3C7u32 => c(0.442, 0.204, 0.626),
    0x3C8u32 => c(0.694, 0.205, 0.651),
    0x3C9u32 => c(0.443, 0.011, 0.622),
    0x3D5u32 => c(0.694, 0.205, 0.596),
    0x3F5u32 => c(0.431, 0.011, 0.406),
    0x2202u32 => c(0.715, 0.022, 0.531),
};

/// Upright bold.
pub static BOLD: phf::Map<u32, FontCharRecord> = phf_map! {
    0x28u32 => c(0.75, 0.249, 0.447),
    0x29u32 => c(0.75, 0.249, 0.447),
    0x2Bu32 => c(0.633, 0.131, 0.894),
    0x30u32 => c(0.654, 0.01, 0.575),
    0x31u32 => c(0.655, 0.0, 0.575),
    0x32u32 => c(0.654, 0.0, 0.575),
    0x33u32 => c(0.655, 0.011, 0.575),
    0x34u32 => c(0.656, 0.0, 0.575),
    0x35u32 => c(0.655, 0.011, 0.575),
    0x36u32 => c(0.655, 0.011, 0.575),
    0x37u32 => c(0.676, 0.011, 0.575),
    0x38u32 => c(0.654, 0.011, 0.575),
    0x39u32 => c(0.654, 0.011, 0.575),
    0x3Du32 => c(0.467, -0.036, 0.894),
    0x41u32 => c(0.698, 0.0, 0.869),
    0x42u32 => c(0.686, 0.0, 0.818),
    0x43u32 => c(0.697, 0.011, 0.831),
    0x61u32 => c(0.453, 0.006, 0.559),
    0x62u32 => c(0.694, 0.006, 0.639),
    0x63u32 => c(0.453, 0.006, 0.511),
    0x64u32 => c(0.694, 0.006, 0.639),
    0x65u32 => c(0.452, 0.006, 0.527),
    0x78u32 => c(0.444, 0.0, 0.607),
    0x79u32 => c(0.444, 0.2, 0.607),
    0x7Au32 => c(0.444, 0.0, 0.511),
};

/// Bold math italic.
pub static BOLD_ITALIC: phf::Map<u32, FontCharRecord> = phf_map! {
    0x41u32 => c(0.711, 0.0, 0.869),
    0x42u32 => c(0.686, 0.0, 0.866),
    0x43u32 => c(0.703, 0.017, 0.817),
    0x61u32 => c(0.452, 0.008, 0.633),
    0x62u32 => c(0.694, 0.008, 0.521),
    0x63u32 => c(0.451, 0.008, 0.513),
    0x78u32 => c(0.452, 0.008, 0.659),
    0x79u32 => c(0.452, 0.202, 0.59),
    0x7Au32 => c(0.452, 0.008, 0.595),
    0x3B1u32 => c(0.452, 0.008, 0.761),
    0x3B2u32 => c(0.701, 0.194, 0.66),
};

/// Text-style large operators and the first delimiter size.
pub static SMALLOP: phf::Map<u32, FontCharRecord> = phf_map! {
    0x28u32 => c(0.85, 0.349, 0.458),
    0x29u32 => c(0.85, 0.349, 0.458),
    0x2Fu32 => c(0.85, 0.349, 0.578),
    0x5Bu32 => c(0.85, 0.349, 0.417),
    0x5Du32 => c(0.85, 0.349, 0.417),
    0x7Bu32 => c(0.85, 0.349, 0.583),
    0x7Du32 => c(0.85, 0.349, 0.583),
    0x220Fu32 => c(0.75, 0.25, 0.944),
    0x2210u32 => c(0.75, 0.25, 0.944),
    0x2211u32 => c(0.75, 0.25, 1.056),
    0x221Au32 => c(0.85, 0.35, 1.0),
    0x2223u32 => c(0.627, 0.015, 0.333),
    0x2225u32 => c(0.627, 0.015, 0.556),
    0x222Bu32 => FontCharRecord::with_all(0.805, 0.306, 0.472, Some(0.138), None, None),
    0x222Eu32 => FontCharRecord::with_all(0.805, 0.306, 0.472, Some(0.138), None, None),
    0x22C2u32 => c(0.75, 0.249, 0.833),
    0x22C3u32 => c(0.75, 0.249, 0.833),
    0x27E8u32 => c(0.85, 0.35, 0.472),
    0x27E9u32 => c(0.85, 0.35, 0.472),
};

/// Display-style large operators and the second delimiter size.
pub static LARGEOP: phf::Map<u32, FontCharRecord> = phf_map! {
    0x28u32 => FontCharRecord::with_all(1.15, 0.649, 0.597, None, Some(SizingClass(3)), None),
    0x29u32 => FontCharRecord::with_all(1.15, 0.649, 0.597, None, Some(SizingClass(3)), None),
    0x2Fu32 => FontCharRecord::with_all(1.15, 0.649, 0.811, None, Some(SizingClass(3)), None),
    0x5Bu32 => FontCharRecord::with_all(1.15, 0.649, 0.472, None, Some(SizingClass(3)), None),
    0x5Cu32 => FontCharRecord::with_all(1.15, 0.649, 0.811, None, Some(SizingClass(3)), None),
    0x5Du32 => FontCharRecord::with_all(1.15, 0.649, 0.472, None, Some(SizingClass(3)), None),
    0x7Bu32 => FontCharRecord::with_all(1.15, 0.649, 0.667, None, Some(SizingClass(3)), None),
    0x7Du32 => FontCharRecord::with_all(1.15, 0.649, 0.667, None, Some(SizingClass(3)), None),
    0x2016u32 => FontCharRecord::with_all(0.602, 0.0, 0.778, None, Some(SizingClass(7)), None),
    0x220Fu32 => FontCharRecord::with_all(0.95, 0.45, 1.278, None, Some(SizingClass(3)), None),
    0x2210u32 => FontCharRecord::with_all(0.95, 0.45, 1.278, None, Some(SizingClass(3)), None),
    0x2211u32 => FontCharRecord::with_all(0.95, 0.45, 1.444, None, Some(SizingClass(3)), None),
    0x221Au32 => FontCharRecord::with_all(1.15, 0.65, 1.0, None, Some(SizingClass(3)), None),
    0x2223u32 => FontCharRecord::with_all(0.627, 0.015, 0.333, None, Some(SizingClass(3)), None),
    0x2225u32 => FontCharRecord::with_all(0.627, 0.015, 0.556, None, Some(SizingClass(3)), None),
    0x222Bu32 => FontCharRecord::with_all(1.36, 0.862, 0.556, Some(0.388), Some(SizingClass(3)), None),
    0x222Cu32 => FontCharRecord::with_all(1.36, 0.862, 1.084, Some(0.388), Some(SizingClass(3)), None),
    0x222Du32 => FontCharRecord::with_all(1.36, 0.862, 1.592, Some(0.388), Some(SizingClass(3)), None),
    0x222Eu32 => FontCharRecord::with_all(1.36, 0.862, 0.556, Some(0.388), Some(SizingClass(3)), None),
    0x22C0u32 => FontCharRecord::with_all(0.95, 0.45, 1.111, None, Some(SizingClass(3)), None),
    0x22C1u32 => FontCharRecord::with_all(0.95, 0.45, 1.111, None, Some(SizingClass(3)), None),
    0x22C2u32 => FontCharRecord::with_all(0.949, 0.45, 1.111, None, Some(SizingClass(3)), None),
    0x22C3u32 => FontCharRecord::with_all(0.95, 0.449, 1.111, None, Some(SizingClass(3)), None),
    0x2308u32 => FontCharRecord::with_all(1.15, 0.649, 0.528, None, Some(SizingClass(3)), None),
    0x2309u32 => FontCharRecord::with_all(1.15, 0.649, 0.528, None, Some(SizingClass(3)), None),
    0x230Au32 => FontCharRecord::with_all(1.15, 0.649, 0.528, None, Some(SizingClass(3)), None),
    0x230Bu32 => FontCharRecord::with_all(1.15, 0.649, 0.528, None, Some(SizingClass(3)), None),
    0x27E8u32 => FontCharRecord::with_all(1.15, 0.649, 0.611, None, Some(SizingClass(3)), None),
    0x27E9u32 => FontCharRecord::with_all(1.15, 0.649, 0.611, None, Some(SizingClass(3)), None),
};

/// Third delimiter size.
pub static SIZE3: phf::Map<u32, FontCharRecord> = phf_map! {
    0x28u32 => c(1.45, 0.949, 0.736),
    0x29u32 => c(1.45, 0.949, 0.736),
    0x2Fu32 => c(1.45, 0.949, 1.044),
    0x5Bu32 => c(1.45, 0.949, 0.528),
    0x5Du32 => c(1.45, 0.949, 0.528),
    0x7Bu32 => c(1.45, 0.949, 0.75),
    0x7Du32 => c(1.45, 0.949, 0.75),
    0x221Au32 => c(1.45, 0.95, 1.0),
    0x27E8u32 => c(1.45, 0.95, 0.75),
    0x27E9u32 => c(1.45, 0.95, 0.75),
};

/// Fourth delimiter size and the pieces of stacked delimiters.
pub static SIZE4: phf::Map<u32, FontCharRecord> = phf_map! {
    0x28u32 => c(1.75, 1.249, 0.792),
    0x29u32 => c(1.75, 1.249, 0.792),
    0x2Fu32 => c(1.75, 1.249, 1.278),
    0x5Bu32 => c(1.75, 1.249, 0.583),
    0x5Du32 => c(1.75, 1.249, 0.583),
    0x7Bu32 => c(1.75, 1.248, 0.806),
    0x7Du32 => c(1.75, 1.248, 0.806),
    0x221Au32 => c(1.75, 1.25, 1.0),
    0x239Bu32 => c(1.155, 0.655, 0.875),
    0x239Cu32 => c(0.6, 0.0, 0.875),
    0x239Du32 => c(1.165, 0.644, 0.875),
    0x239Eu32 => c(1.155, 0.655, 0.875),
    0x239Fu32 => c(0.6, 0.0, 0.875),
    0x23A0u32 => c(1.165, 0.644, 0.875),
    0x23A1u32 => c(1.155, 0.645, 0.667),
    0x23A2u32 => c(0.602, 0.0, 0.667),
    0x23A3u32 => c(1.155, 0.645, 0.667),
    0x23A4u32 => c(1.155, 0.645, 0.667),
    0x23A5u32 => c(0.602, 0.0, 0.667),
    0x23A6u32 => c(1.155, 0.645, 0.667),
    0x23A7u32 => c(0.899, 0.01, 0.889),
    0x23A8u32 => c(1.16, 0.66, 0.889),
    0x23A9u32 => c(0.01, 0.899, 0.889),
    0x23AAu32 => c(0.29, 0.015, 0.889),
    0x23ABu32 => c(0.899, 0.01, 0.889),
    0x23ACu32 => c(1.16, 0.66, 0.889),
    0x23ADu32 => c(0.01, 0.899, 0.889),
    0x23B7u32 => c(0.935, 0.885, 1.056),
    0x27E8u32 => c(1.75, 1.248, 0.806),
    0x27E9u32 => c(1.75, 1.248, 0.806),
    0xE000u32 => c(0.625, 0.014, 1.056),
    0xE001u32 => c(0.605, 0.014, 1.056),
};

const PAREN_LEFT: &[PartSpec] = &[
    PartSpec::new(Bottom, 0x239D),
    PartSpec::new(Extender, 0x239C),
    PartSpec::new(Top, 0x239B),
];
const PAREN_RIGHT: &[PartSpec] = &[
    PartSpec::new(Bottom, 0x23A0),
    PartSpec::new(Extender, 0x239F),
    PartSpec::new(Top, 0x239E),
];
const BRACKET_LEFT: &[PartSpec] = &[
    PartSpec::new(Bottom, 0x23A3),
    PartSpec::new(Extender, 0x23A2),
    PartSpec::new(Top, 0x23A1),
];
const BRACKET_RIGHT: &[PartSpec] = &[
    PartSpec::new(Bottom, 0x23A6),
    PartSpec::new(Extender, 0x23A5),
    PartSpec::new(Top, 0x23A4),
];
const BRACE_LEFT: &[PartSpec] = &[
    PartSpec::new(Bottom, 0x23A9),
    PartSpec::new(Extender, 0x23AA),
    PartSpec::new(Middle, 0x23A8),
    PartSpec::new(Top, 0x23A7),
];
const BRACE_RIGHT: &[PartSpec] = &[
    PartSpec::new(Bottom, 0x23AD),
    PartSpec::new(Extender, 0x23AA),
    PartSpec::new(Middle, 0x23AC),
    PartSpec::new(Top, 0x23AB),
];
const VERT: &[PartSpec] = &[PartSpec::new(Extender, 0x2223)];
const DOUBLE_VERT: &[PartSpec] = &[PartSpec::new(Extender, 0x2225)];
const SURD: &[PartSpec] = &[
    PartSpec::new(Bottom, 0x23B7),
    PartSpec::overlapping(Extender, 0xE000, 0.014),
    PartSpec::overlapping(Top, 0xE001, 0.014),
];
const RIGHT_ARROW: &[PartSpec] = &[
    PartSpec::new(Bottom, 0x2212),
    PartSpec::overlapping(Extender, 0x2212, 0.1),
    PartSpec::overlapping(Top, 0x2192, 0.1),
];
const LEFT_ARROW: &[PartSpec] = &[
    PartSpec::new(Bottom, 0x2190),
    PartSpec::overlapping(Extender, 0x2212, 0.1),
    PartSpec::overlapping(Top, 0x2212, 0.1),
];

const fn stacked(variant: &'static str, parts: &'static [PartSpec]) -> CompositeSpec {
    CompositeSpec {
        axis: Axis::Vertical,
        variant,
        parts,
    }
}

const fn arrow(parts: &'static [PartSpec]) -> CompositeSpec {
    CompositeSpec {
        axis: Axis::Horizontal,
        variant: "normal",
        parts,
    }
}

/// Assembly recipes for stretchy glyphs.
pub static COMPOSITES: phf::Map<u32, CompositeSpec> = phf_map! {
    0x28u32 => stacked("size4", PAREN_LEFT),
    0x29u32 => stacked("size4", PAREN_RIGHT),
    0x5Bu32 => stacked("size4", BRACKET_LEFT),
    0x5Du32 => stacked("size4", BRACKET_RIGHT),
    0x7Bu32 => stacked("size4", BRACE_LEFT),
    0x7Cu32 => stacked("smallop", VERT),
    0x7Du32 => stacked("size4", BRACE_RIGHT),
    0x2016u32 => stacked("smallop", DOUBLE_VERT),
    0x2190u32 => arrow(LEFT_ARROW),
    0x2192u32 => arrow(RIGHT_ARROW),
    0x221Au32 => stacked("size4", SURD),
    0x2223u32 => stacked("smallop", VERT),
    0x2225u32 => stacked("smallop", DOUBLE_VERT),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_composite_piece_has_metrics() {
        let tables = [
            ("normal", &NORMAL),
            ("smallop", &SMALLOP),
            ("size4", &SIZE4),
        ];
        for (code, spec) in COMPOSITES.entries() {
            let (_, table) = tables
                .iter()
                .find(|(name, _)| *name == spec.variant)
                .unwrap();
            for part in spec.parts {
                assert!(
                    table.contains_key(&part.code),
                    "U+{code:04X}: piece U+{:04X} missing from {}",
                    part.code,
                    spec.variant
                );
            }
            assert!(spec.parts.iter().any(|p| p.role == Extender));
        }
    }
}
