//! Unit-label classification
//!
//! PCs enter packaging units as free text, mostly Thai. Reports group them
//! into three canonical categories via keyword matching; anything
//! unrecognized counts as a loose piece.

use serde::{Deserialize, Serialize};

/// Canonical packaging-unit category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Box,
    Pack,
    Piece,
}

/// Keywords matched (case-insensitive, substring) per category.
/// Order matters: the first category with a hit wins.
const BOX_KEYWORDS: &[&str] = &["กล่อง", "ลัง", "box", "carton"];
const PACK_KEYWORDS: &[&str] = &["แพ็ค", "แพค", "แพ็ก", "โหล", "pack", "dozen"];

impl UnitCategory {
    /// Classify a free-text unit label. Total: every label maps to
    /// exactly one category, defaulting to [`UnitCategory::Piece`].
    pub fn classify(label: &str) -> Self {
        let lower = label.to_lowercase();
        if BOX_KEYWORDS.iter().any(|k| lower.contains(k)) {
            UnitCategory::Box
        } else if PACK_KEYWORDS.iter().any(|k| lower.contains(k)) {
            UnitCategory::Pack
        } else {
            UnitCategory::Piece
        }
    }

    /// All categories in report-column order
    pub const ALL: [UnitCategory; 3] = [UnitCategory::Box, UnitCategory::Pack, UnitCategory::Piece];

    /// Wire / report label
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::Box => "box",
            UnitCategory::Pack => "pack",
            UnitCategory::Piece => "piece",
        }
    }
}
