//! Object writer
//!
//! Encodes normalized records into a single JSON document and writes it at the
//! blueprint's fixed key. `decode` is the exact inverse of `encode`.

use bytes::Bytes;
use contracts::{ContractError, JsonLayout, ObjectStore, PlayerRecord};
use tracing::{info, instrument};

/// Writes the records object in the configured layout
#[derive(Debug, Clone, Copy)]
pub struct ObjectWriter {
    layout: JsonLayout,
}

impl ObjectWriter {
    pub fn new(layout: JsonLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> JsonLayout {
        self.layout
    }

    /// Encode records into the document body
    ///
    /// Zero records encode to an empty document (empty string for lines,
    /// `[]` for the array layout), never an error.
    pub fn encode(&self, records: &[PlayerRecord]) -> Result<Bytes, ContractError> {
        let body = match self.layout {
            JsonLayout::Lines => {
                let mut lines = Vec::with_capacity(records.len());
                for record in records {
                    let line = serde_json::to_string(record)
                        .map_err(|e| ContractError::store("encode", e.to_string()))?;
                    lines.push(line);
                }
                lines.join("\n").into_bytes()
            }
            JsonLayout::Array => serde_json::to_vec(records)
                .map_err(|e| ContractError::store("encode", e.to_string()))?,
        };
        Ok(Bytes::from(body))
    }

    /// Decode a document body back into records
    pub fn decode(&self, body: &[u8]) -> Result<Vec<PlayerRecord>, ContractError> {
        match self.layout {
            JsonLayout::Lines => {
                let text = std::str::from_utf8(body)
                    .map_err(|e| ContractError::store("decode", e.to_string()))?;
                text.lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(|line| {
                        serde_json::from_str(line)
                            .map_err(|e| ContractError::store("decode", e.to_string()))
                    })
                    .collect()
            }
            JsonLayout::Array => serde_json::from_slice(body)
                .map_err(|e| ContractError::store("decode", e.to_string())),
        }
    }

    /// Encode and write the object, returning the written size in bytes
    #[instrument(name = "object_writer_write", skip(self, store, records), fields(records = records.len()))]
    pub async fn write_to<S: ObjectStore>(
        &self,
        store: &S,
        bucket: &str,
        key: &str,
        records: &[PlayerRecord],
    ) -> Result<u64, ContractError> {
        let body = self.encode(records)?;
        let bytes_written = body.len() as u64;
        store.put_object(bucket, key, body).await?;
        info!(bucket, key, bytes = bytes_written, "Object written");
        Ok(bytes_written)
    }
}
