//! # Ingestion
//!
//! Upstream API access module.
//!
//! Responsibilities:
//! - Fetch the player payload over HTTP (bounded timeout, API-key header)
//! - Normalize raw payloads into `PlayerRecord`
//! - Provide a mock source for tests and mock mode
//!
//! ## Usage Example (Unified Interface)
//!
//! ```ignore
//! use contracts::PlayerSource;
//! use ingestion::{normalize, HttpPlayerSource};
//!
//! let source = HttpPlayerSource::new(&blueprint.source)?;
//! let raw = source.fetch_players().await?;
//! let records = normalize(raw);
//! ```
//!
//! ## Mock Testing
//!
//! ```ignore
//! use ingestion::MockPlayerSource;
//!
//! let source = MockPlayerSource::sample();
//! let raw = source.fetch_players().await.unwrap();
//! ```

mod fetcher;
mod mock;
mod normalizer;

pub use fetcher::{HttpPlayerSource, API_KEY_HEADER};
pub use mock::MockPlayerSource;
pub use normalizer::normalize;
