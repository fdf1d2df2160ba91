//! Catalog table definition types

use serde::{Deserialize, Serialize};

/// JSON document layout for the written object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonLayout {
    /// One record per line (what the catalog JSON serde expects)
    #[default]
    Lines,
    /// Single JSON array of records
    Array,
}

/// Catalog column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Int,
    String,
}

impl ColumnType {
    /// Catalog type name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::String => "string",
        }
    }

    /// Parse a catalog type name, for mapping table definitions back
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "int" => Some(Self::Int),
            "string" => Some(Self::String),
            _ => None,
        }
    }
}

/// Catalog column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// External table definition registered over the written object's location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Table name in the catalog
    pub name: String,

    /// Column names/types matching the record shape
    pub columns: Vec<ColumnDef>,

    /// Storage location the table points at, e.g. `s3://bucket/raw-data/`
    pub location: String,

    /// Layout of the JSON documents under the location
    pub layout: JsonLayout,
}
