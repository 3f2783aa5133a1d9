//! Typed per-stage payload schemas.
//!
//! Each stage's output is decoded into one of these models at the
//! parser boundary. Decoding is deliberately lenient: unknown fields
//! are ignored and missing optional fields default, so an imperfect
//! model response degrades instead of failing. Presence and absence
//! are first-class (`Option<T>`), never inferred from key lookups.

mod content;
mod design;
mod narrative;
mod quality;
mod visual;

pub use content::{ContentOutline, ContentType, ContentUnit, PresentationStrategy};
pub use design::{
    Color, ColorPalette, DesignSystem, FontSizes, LayoutType, Region, Typography, UnitLayout,
};
pub use narrative::{NarrativePlan, NarrativeStructure, NarrativeUnit};
pub use quality::{QualityAssessment, QualityIssue, Recommendation, Severity};
pub use visual::{VisualPlan, VisualUnit};
