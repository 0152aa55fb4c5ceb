use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Formatting role of a single screenplay line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Transition,
    Shot,
    Setting,
}

/// Order used when cycling a line's class with Tab.
///
/// A line whose class is not listed here (`Setting`) advances to the first entry.
pub const RECLASSIFY_CYCLE: [Classification; 6] = [
    Classification::Action,
    Classification::Character,
    Classification::Dialogue,
    Classification::Transition,
    Classification::Shot,
    Classification::SceneHeading,
];

impl Classification {
    /// Every classification, in selector order
    pub const ALL: [Classification; 7] = [
        Classification::SceneHeading,
        Classification::Action,
        Classification::Character,
        Classification::Dialogue,
        Classification::Transition,
        Classification::Shot,
        Classification::Setting,
    ];

    /// Class given to the empty line created when this line is split
    pub fn next_on_split(self) -> Classification {
        match self {
            Classification::Character => Classification::Dialogue,
            _ => Classification::Action,
        }
    }

    /// Next class in [`RECLASSIFY_CYCLE`], wrapping past the end
    pub fn next_in_cycle(self) -> Classification {
        let next = RECLASSIFY_CYCLE
            .iter()
            .position(|&c| c == self)
            .map_or(0, |i| (i + 1) % RECLASSIFY_CYCLE.len());
        RECLASSIFY_CYCLE[next]
    }

    /// Wire name, e.g. `scene-heading`
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::SceneHeading => "scene-heading",
            Classification::Action => "action",
            Classification::Character => "character",
            Classification::Dialogue => "dialogue",
            Classification::Transition => "transition",
            Classification::Shot => "shot",
            Classification::Setting => "setting",
        }
    }

    /// Human readable name for selectors and status lines
    pub fn label(self) -> &'static str {
        match self {
            Classification::SceneHeading => "Scene Heading",
            Classification::Action => "Action",
            Classification::Character => "Character",
            Classification::Dialogue => "Dialogue",
            Classification::Transition => "Transition",
            Classification::Shot => "Shot",
            Classification::Setting => "Setting",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown classification: {0}")]
pub struct UnknownClassification(pub String);

impl FromStr for Classification {
    type Err = UnknownClassification;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classification::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownClassification(s.to_string()))
    }
}
