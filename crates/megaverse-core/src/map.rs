//! Goal-map translation
//!
//! Scans the fetched grid row-major and classifies each non-space cell label
//! into a typed creation command. Classification follows the service's label
//! vocabulary: `POLYANET` stands alone, SOLOONs and COMETHs carry an
//! underscore-delimited variant prefix (`BLUE_SOLOON`, `RIGHT_COMETH`).

use megaverse_api::GoalMap;
use std::fmt::{self, Display, Formatter};

/// Cell label marking an empty position
pub const SPACE: &str = "SPACE";

const POLYANET: &str = "POLYANET";
const SOLOON_SUFFIX: &str = "SOLOON";
const COMETH_SUFFIX: &str = "COMETH";

/// The three creatable astral object kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstralObject {
    /// Basic object, no attributes
    Polyanet,
    /// Colored variant
    Soloon {
        /// Lower-cased color name
        color: String,
    },
    /// Directional variant
    Cometh {
        /// Lower-cased direction name
        direction: String,
    },
}

impl AstralObject {
    /// Classify a goal-map cell label.
    ///
    /// Returns `None` for the space marker and for labels outside the known
    /// vocabulary; callers skip those cells.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        if label == POLYANET {
            return Some(Self::Polyanet);
        }
        if label.ends_with(SOLOON_SUFFIX) {
            return Some(Self::Soloon {
                color: variant_prefix(label),
            });
        }
        if label.ends_with(COMETH_SUFFIX) {
            return Some(Self::Cometh {
                direction: variant_prefix(label),
            });
        }
        None
    }

    /// Object kind name, without variant attributes
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Polyanet => "POLYANET",
            Self::Soloon { .. } => "SOLOON",
            Self::Cometh { .. } => "COMETH",
        }
    }
}

impl Display for AstralObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polyanet => write!(f, "POLYANET"),
            Self::Soloon { color } => write!(f, "{color} SOLOON"),
            Self::Cometh { direction } => write!(f, "{direction} COMETH"),
        }
    }
}

/// Variant prefix of a compound label, lower-cased (`"BLUE_SOLOON"` → `"blue"`).
fn variant_prefix(label: &str) -> String {
    label.split('_').next().unwrap_or(label).to_lowercase()
}

/// One object creation to replay against the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// What to create
    pub object: AstralObject,
    /// Grid row of the source cell
    pub row: usize,
    /// Grid column of the source cell
    pub column: usize,
}

/// Translate a goal map into an ordered command list.
///
/// Scan order is row-major (outer rows ascending, inner columns ascending),
/// which fixes submission order. Space cells and unrecognized labels produce
/// no command. No deduplication, no bounds validation.
#[must_use]
pub fn parse_goal_map(goal: &GoalMap) -> Vec<Command> {
    let mut commands = Vec::new();
    for (row, cells) in goal.rows().iter().enumerate() {
        for (column, label) in cells.iter().enumerate() {
            if label == SPACE {
                continue;
            }
            match AstralObject::from_label(label) {
                Some(object) => commands.push(Command {
                    object,
                    row,
                    column,
                }),
                None => {
                    tracing::debug!(row, column, label = label.as_str(), "unrecognized label, skipping");
                }
            }
        }
    }
    commands
}
