//! Content-strategy payload: the outline every other stage keys off.

use serde::{Deserialize, Serialize};

/// The role a unit plays in the overall flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ContentType {
    /// Opens the argument.
    Introduction,
    /// Develops it.
    #[default]
    Analysis,
    /// Supports it with data.
    Evidence,
    /// Lands it.
    Conclusion,
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "introduction" | "intro" | "opening" => Self::Introduction,
            "evidence" | "data" | "proof" => Self::Evidence,
            "conclusion" | "closing" | "action" => Self::Conclusion,
            // Unrecognized labels degrade to the middle of the arc.
            _ => Self::Analysis,
        }
    }
}

/// High-level strategy notes attached to the outline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresentationStrategy {
    /// The one thing the audience should remember.
    #[serde(default)]
    pub core_message: String,
    /// How the story unfolds across units.
    #[serde(default)]
    pub narrative_arc: String,
    /// Engagement techniques to weave in.
    #[serde(default)]
    pub engagement_hooks: Vec<String>,
    /// What makes this treatment distinctive.
    #[serde(default)]
    pub key_differentiators: Vec<String>,
}

/// One content unit of the outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentUnit {
    /// 1-based position; the join key for every later merge.
    pub index: u32,
    /// Unit title.
    #[serde(default)]
    pub title: String,
    /// Main takeaway.
    #[serde(default)]
    pub key_message: String,
    /// Ordered talking points.
    #[serde(default)]
    pub talking_points: Vec<String>,
    /// Role in the flow.
    #[serde(default)]
    pub content_type: ContentType,
}

/// The content-strategy stage's payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentOutline {
    /// Presentation title.
    #[serde(default)]
    pub title: String,
    /// Supporting subtitle.
    #[serde(default)]
    pub subtitle: String,
    /// Content units, indices dense over `1..=n` once normalized.
    #[serde(default)]
    pub units: Vec<ContentUnit>,
    /// Optional strategy envelope.
    #[serde(default)]
    pub strategy: Option<PresentationStrategy>,
}

impl ContentOutline {
    /// Forces the unit sequence to be dense over `1..=expected`:
    /// sorts by declared index, truncates extras, pads any deficit
    /// with minimal placeholder units, and reassigns indices.
    ///
    /// Downstream joins rely on this density; a model that returns a
    /// sparse or overlong outline is repaired rather than rejected.
    pub fn normalize(&mut self, expected: usize) {
        self.units.sort_by_key(|u| u.index);
        self.units.truncate(expected);

        while self.units.len() < expected {
            let position = self.units.len() + 1;
            self.units.push(ContentUnit {
                index: position as u32,
                title: format!("{} - Part {position}", self.title),
                key_message: String::new(),
                talking_points: Vec::new(),
                content_type: ContentType::Analysis,
            });
        }

        for (offset, unit) in self.units.iter_mut().enumerate() {
            unit.index = offset as u32 + 1;
        }
    }

    /// Looks up a unit by its 1-based index.
    #[must_use]
    pub fn unit(&self, index: u32) -> Option<&ContentUnit> {
        self.units.iter().find(|u| u.index == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_leniency() {
        let parsed: ContentType = serde_json::from_str("\"problem\"").unwrap();
        assert_eq!(parsed, ContentType::Analysis);

        let parsed: ContentType = serde_json::from_str("\"Introduction\"").unwrap();
        assert_eq!(parsed, ContentType::Introduction);

        let parsed: ContentType = serde_json::from_str("\"action\"").unwrap();
        assert_eq!(parsed, ContentType::Conclusion);
    }

    #[test]
    fn test_lenient_unit_decode() {
        let unit: ContentUnit = serde_json::from_str(r#"{"index": 2}"#).unwrap();
        assert_eq!(unit.index, 2);
        assert!(unit.talking_points.is_empty());
    }

    #[test]
    fn test_normalize_pads_and_reindexes() {
        let mut outline = ContentOutline {
            title: "Topic".to_string(),
            subtitle: String::new(),
            units: vec![ContentUnit {
                index: 7,
                title: "Only one".to_string(),
                key_message: String::new(),
                talking_points: Vec::new(),
                content_type: ContentType::Analysis,
            }],
            strategy: None,
        };

        outline.normalize(3);

        assert_eq!(outline.units.len(), 3);
        let indices: Vec<u32> = outline.units.iter().map(|u| u.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(outline.units[0].title, "Only one");
    }

    #[test]
    fn test_normalize_truncates() {
        let mut outline = ContentOutline {
            title: "T".to_string(),
            subtitle: String::new(),
            units: (1..=5)
                .map(|i| ContentUnit {
                    index: i,
                    title: format!("u{i}"),
                    key_message: String::new(),
                    talking_points: Vec::new(),
                    content_type: ContentType::Analysis,
                })
                .collect(),
            strategy: None,
        };

        outline.normalize(2);
        assert_eq!(outline.units.len(), 2);
        assert_eq!(outline.unit(2).map(|u| u.title.as_str()), Some("u2"));
    }
}
