//! Wire types for the megaverse service
//!
//! The service speaks camelCase JSON; every mutating request carries the
//! candidate identity alongside its coordinates.

use serde::{Deserialize, Serialize};

/// The target 2D layout of objects to recreate.
///
/// A rectangular grid of cell labels (`"SPACE"`, `"POLYANET"`,
/// `"BLUE_SOLOON"`, ...). Rectangularity is assumed, not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalMap(Vec<Vec<String>>);

impl GoalMap {
    /// Create a goal map from raw rows
    #[inline]
    #[must_use]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self(rows)
    }

    /// Grid rows, outermost first
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.0
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the map has no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Vec<&str>>> for GoalMap {
    fn from(rows: Vec<Vec<&str>>) -> Self {
        Self(
            rows.into_iter()
                .map(|row| row.into_iter().map(str::to_string).collect())
                .collect(),
        )
    }
}

/// Body of `GET /map/{candidateId}/goal`
#[derive(Debug, Clone, Deserialize)]
pub struct GoalMapResponse {
    /// The goal grid
    pub goal: GoalMap,
}

/// Body of `POST /polyanets`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolyanetRequest {
    /// Caller identity
    pub candidate_id: String,
    /// Target row
    pub row: usize,
    /// Target column
    pub column: usize,
}

/// Body of `POST /soloons`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoloonRequest {
    /// Caller identity
    pub candidate_id: String,
    /// Target row
    pub row: usize,
    /// Target column
    pub column: usize,
    /// Lower-cased color name
    pub color: String,
}

/// Body of `POST /comeths`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComethRequest {
    /// Caller identity
    pub candidate_id: String,
    /// Target row
    pub row: usize,
    /// Target column
    pub column: usize,
    /// Lower-cased direction name
    pub direction: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_payloads_serialize_camel_case() {
        let req = SoloonRequest {
            candidate_id: "cand-1".to_string(),
            row: 3,
            column: 7,
            color: "blue".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "candidateId": "cand-1",
                "row": 3,
                "column": 7,
                "color": "blue"
            })
        );
    }

    #[test]
    fn goal_response_requires_goal_field() {
        let ok: Result<GoalMapResponse, _> =
            serde_json::from_str(r#"{"goal": [["SPACE", "POLYANET"]]}"#);
        assert_eq!(
            ok.unwrap().goal,
            GoalMap::from(vec![vec!["SPACE", "POLYANET"]])
        );

        let missing: Result<GoalMapResponse, _> = serde_json::from_str(r#"{"map": []}"#);
        assert!(missing.is_err());
    }
}
