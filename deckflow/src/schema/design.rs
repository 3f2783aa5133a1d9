//! Design-specification payload: palette, typography, per-unit layouts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One color, as three channel values.
///
/// Stages may declare channels either as bytes (`0..=255`) or unit
/// floats (`0.0..=1.0`); [`Color::normalized`] resolves the ambiguity
/// before any consumer uses the value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    #[serde(default)]
    pub r: f64,
    /// Green channel.
    #[serde(default)]
    pub g: f64,
    /// Blue channel.
    #[serde(default)]
    pub b: f64,
}

impl Color {
    /// Creates a color from byte channels.
    #[must_use]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
        }
    }

    /// Returns the color with all channels in `0.0..=1.0`.
    ///
    /// Channels above 1.0 are interpreted as byte values and divided
    /// by 255; everything is clamped afterwards.
    #[must_use]
    pub fn normalized(self) -> Self {
        let scale = if self.r > 1.0 || self.g > 1.0 || self.b > 1.0 {
            255.0
        } else {
            1.0
        };
        Self {
            r: (self.r / scale).clamp(0.0, 1.0),
            g: (self.g / scale).clamp(0.0, 1.0),
            b: (self.b / scale).clamp(0.0, 1.0),
        }
    }
}

/// The five named palette slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Dominant brand color.
    #[serde(default)]
    pub primary: Color,
    /// Supporting color.
    #[serde(default)]
    pub secondary: Color,
    /// Highlight color.
    #[serde(default)]
    pub accent: Color,
    /// Text color.
    #[serde(default)]
    pub text: Color,
    /// Background color.
    #[serde(default)]
    pub background: Color,
}

impl ColorPalette {
    /// Returns the palette with every color normalized to unit range.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            primary: self.primary.normalized(),
            secondary: self.secondary.normalized(),
            accent: self.accent.normalized(),
            text: self.text.normalized(),
            background: self.background.normalized(),
        }
    }
}

/// Font sizes for the three text levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FontSizes {
    /// Heading size.
    #[serde(default = "default_h1")]
    pub h1: u32,
    /// Subheading size.
    #[serde(default = "default_h2")]
    pub h2: u32,
    /// Body size.
    #[serde(default = "default_body")]
    pub body: u32,
}

fn default_h1() -> u32 {
    36
}

fn default_h2() -> u32 {
    28
}

fn default_body() -> u32 {
    18
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            h1: default_h1(),
            h2: default_h2(),
            body: default_body(),
        }
    }
}

/// Typography specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Typography {
    /// Font used for headings.
    #[serde(default = "default_font")]
    pub heading_font: String,
    /// Font used for body text.
    #[serde(default = "default_font")]
    pub body_font: String,
    /// Sizes per level.
    #[serde(default)]
    pub sizes: FontSizes,
}

fn default_font() -> String {
    "Inter".to_string()
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            heading_font: default_font(),
            body_font: default_font(),
            sizes: FontSizes::default(),
        }
    }
}

/// The layout archetype assigned to a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum LayoutType {
    /// Text left, visual right.
    #[default]
    ContentLeft,
    /// Text right, visual left.
    ContentRight,
    /// Visual dominates the unit.
    VisualHeavy,
    /// Text only.
    TextFocus,
    /// Two visuals side by side.
    DualImage,
}

impl From<String> for LayoutType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "content_right" => Self::ContentRight,
            "visual_heavy" | "full_visual" => Self::VisualHeavy,
            "text_focus" | "text_only" => Self::TextFocus,
            "dual_image" | "split_content" => Self::DualImage,
            _ => Self::ContentLeft,
        }
    }
}

/// A named rectangle inside a unit layout, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    /// Left edge.
    #[serde(default)]
    pub x: f64,
    /// Top edge.
    #[serde(default)]
    pub y: f64,
    /// Width.
    #[serde(default)]
    pub width: f64,
    /// Height.
    #[serde(default)]
    pub height: f64,
}

/// Layout assignment for one unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitLayout {
    /// 1-based unit index this layout belongs to.
    #[serde(default)]
    pub index: u32,
    /// Layout archetype.
    #[serde(default)]
    pub layout_type: LayoutType,
    /// Named regions ("text", "image", ...). BTreeMap keeps
    /// serialization order stable.
    #[serde(default)]
    pub regions: BTreeMap<String, Region>,
}

/// The design-specification stage's payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignSystem {
    /// The color palette.
    #[serde(default)]
    pub color_palette: ColorPalette,
    /// Typography choices.
    #[serde(default)]
    pub typography: Typography,
    /// Per-unit layouts. Permitted to be sparse: a stage may emit a
    /// single exemplar layout for the integrator to broadcast.
    #[serde(default)]
    pub layouts: Vec<UnitLayout>,
    /// Optional free-form design principles.
    #[serde(default)]
    pub principles: Option<String>,
}

impl DesignSystem {
    /// Looks up the layout declared for a unit index.
    #[must_use]
    pub fn layout(&self, index: u32) -> Option<&UnitLayout> {
        self.layouts.iter().find(|l| l.index == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_channels_normalize() {
        let color = Color::rgb(255, 128, 0).normalized();
        assert!((color.r - 1.0).abs() < 1e-9);
        assert!((color.g - 128.0 / 255.0).abs() < 1e-9);
        assert!(color.b.abs() < 1e-9);
    }

    #[test]
    fn test_unit_channels_pass_through() {
        let color = Color {
            r: 0.5,
            g: 0.25,
            b: 1.0,
        }
        .normalized();
        assert!((color.r - 0.5).abs() < 1e-9);
        assert!((color.b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_layout_type_leniency() {
        let layout: LayoutType = serde_json::from_str("\"full_visual\"").unwrap();
        assert_eq!(layout, LayoutType::VisualHeavy);

        let layout: LayoutType = serde_json::from_str("\"title_slide\"").unwrap();
        assert_eq!(layout, LayoutType::ContentLeft);
    }

    #[test]
    fn test_design_system_decodes_from_partial_json() {
        let system: DesignSystem = serde_json::from_str(
            r#"{"color_palette": {"primary": {"r": 38, "g": 64, "b": 217}}}"#,
        )
        .unwrap();
        assert!((system.color_palette.primary.r - 38.0).abs() < 1e-9);
        assert_eq!(system.typography.heading_font, "Inter");
        assert!(system.layouts.is_empty());
    }

    #[test]
    fn test_partial_font_sizes_fill_defaults() {
        let typography: Typography =
            serde_json::from_str(r#"{"heading_font": "Lora", "sizes": {"h1": 48}}"#).unwrap();
        assert_eq!(typography.sizes.h1, 48);
        assert_eq!(typography.sizes.body, 18);
    }

    #[test]
    fn test_layout_lookup() {
        let system = DesignSystem {
            layouts: vec![UnitLayout {
                index: 2,
                ..UnitLayout::default()
            }],
            ..DesignSystem::default()
        };
        assert!(system.layout(2).is_some());
        assert!(system.layout(1).is_none());
    }
}
