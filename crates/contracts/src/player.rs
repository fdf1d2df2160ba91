//! Player record types
//!
//! `RawPlayer` mirrors the upstream sportsdata payload (PascalCase keys, unknown
//! fields ignored). `PlayerRecord` is the projected shape that lands in the lake
//! and drives the catalog schema.

use serde::{Deserialize, Serialize};

use crate::{ColumnDef, ColumnType};

/// Upstream player object as returned by the sports API.
///
/// Only the projected fields are decoded; everything else in the payload is
/// dropped at the serde boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlayer {
    #[serde(rename = "PlayerID")]
    pub player_id: i64,

    #[serde(rename = "FirstName", default)]
    pub first_name: Option<String>,

    #[serde(rename = "LastName", default)]
    pub last_name: Option<String>,

    /// Team code, null for free agents
    #[serde(rename = "Team", default)]
    pub team: Option<String>,

    #[serde(rename = "Position", default)]
    pub position: Option<String>,

    #[serde(rename = "Points", default)]
    pub points: Option<i64>,
}

/// Normalized player record written to the lake.
///
/// Every record in a run carries the same field set; nullable upstream fields
/// serialize as JSON null rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub points: Option<i64>,
}

impl From<RawPlayer> for PlayerRecord {
    fn from(raw: RawPlayer) -> Self {
        Self {
            player_id: raw.player_id,
            first_name: raw.first_name.unwrap_or_default(),
            last_name: raw.last_name.unwrap_or_default(),
            team: raw.team,
            position: raw.position,
            points: raw.points,
        }
    }
}

impl PlayerRecord {
    /// Canonical catalog columns for the record shape.
    ///
    /// Column names match the serialized field names exactly; the schema
    /// registrar builds the table definition from this list.
    pub fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("player_id", ColumnType::Int),
            ColumnDef::new("first_name", ColumnType::String),
            ColumnDef::new("last_name", ColumnType::String),
            ColumnDef::new("team", ColumnType::String),
            ColumnDef::new("position", ColumnType::String),
            ColumnDef::new("points", ColumnType::Int),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_player_decodes_upstream_payload() {
        let payload = r#"{
            "PlayerID": 20000441,
            "SportsDataID": "",
            "Status": "Active",
            "FirstName": "Stephen",
            "LastName": "Curry",
            "Team": "GS",
            "Position": "PG",
            "Points": 28
        }"#;
        let raw: RawPlayer = serde_json::from_str(payload).unwrap();
        assert_eq!(raw.player_id, 20000441);
        assert_eq!(raw.first_name.as_deref(), Some("Stephen"));
        assert_eq!(raw.team.as_deref(), Some("GS"));
    }

    #[test]
    fn raw_player_tolerates_missing_optionals() {
        let payload = r#"{"PlayerID": 1, "LastName": "Doe"}"#;
        let raw: RawPlayer = serde_json::from_str(payload).unwrap();
        assert_eq!(raw.first_name, None);
        assert_eq!(raw.team, None);
        assert_eq!(raw.points, None);
    }

    #[test]
    fn projection_keeps_field_set_uniform() {
        let raw: RawPlayer = serde_json::from_str(r#"{"PlayerID": 7}"#).unwrap();
        let record = PlayerRecord::from(raw);
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), PlayerRecord::columns().len());
        assert!(obj.contains_key("team"));
        assert!(obj["team"].is_null());
    }

    #[test]
    fn columns_match_serialized_field_names() {
        let record = PlayerRecord {
            player_id: 1,
            first_name: "A".into(),
            last_name: "B".into(),
            team: Some("NYK".into()),
            position: Some("C".into()),
            points: Some(10),
        };
        let json = serde_json::to_value(&record).unwrap();
        for column in PlayerRecord::columns() {
            assert!(
                json.get(&column.name).is_some(),
                "missing column: {}",
                column.name
            );
        }
    }
}
