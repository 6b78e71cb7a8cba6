//! Font metric tables and the variant model.

mod composite;
mod data;
mod metrics;
mod params;
mod paths;

pub use composite::{
    Assembly, AssemblyPart, Axis, CompositeSpec, PartRole, PartSpec, assemble,
};
pub use metrics::{
    DELIMITER_SIZES, FontCharRecord, FontTables, FontVariantData, Glyph, SizingClass,
};
pub use params::{MathParams, TEX_PARAMS};
