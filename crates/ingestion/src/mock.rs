//! Mock player source
//!
//! Canned payloads and injectable upstream failures for tests and mock mode.

use contracts::{ContractError, PlayerSource, RawPlayer};
use tracing::info;

/// Mock player source
pub struct MockPlayerSource {
    name: String,
    players: Vec<RawPlayer>,
    fail_status: Option<u16>,
}

impl MockPlayerSource {
    /// Source returning the given payload
    pub fn with_players(players: Vec<RawPlayer>) -> Self {
        Self {
            name: "mock_source".to_string(),
            players,
            fail_status: None,
        }
    }

    /// Source returning an empty payload
    pub fn empty() -> Self {
        Self::with_players(Vec::new())
    }

    /// Source failing every fetch with the given status (e.g. 401)
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::empty()
        }
    }

    /// Small representative roster
    pub fn sample() -> Self {
        Self::with_players(vec![
            sample_player(20000441, "Stephen", "Curry", Some("GS"), Some("PG"), 28),
            sample_player(20000571, "LeBron", "James", Some("LAL"), Some("SF"), 25),
            sample_player(20000725, "Nikola", "Jokic", Some("DEN"), Some("C"), 26),
        ])
    }
}

fn sample_player(
    player_id: i64,
    first_name: &str,
    last_name: &str,
    team: Option<&str>,
    position: Option<&str>,
    points: i64,
) -> RawPlayer {
    RawPlayer {
        player_id,
        first_name: Some(first_name.to_string()),
        last_name: Some(last_name.to_string()),
        team: team.map(String::from),
        position: position.map(String::from),
        points: Some(points),
    }
}

impl PlayerSource for MockPlayerSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_players(&self) -> Result<Vec<RawPlayer>, ContractError> {
        if let Some(status) = self.fail_status {
            return Err(ContractError::Upstream { status });
        }
        info!(players = self.players.len(), "Mock fetch");
        Ok(self.players.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_fetch() {
        let source = MockPlayerSource::sample();
        let players = source.fetch_players().await.unwrap();
        assert_eq!(players.len(), 3);
    }

    #[tokio::test]
    async fn test_failing_fetch_surfaces_status() {
        let source = MockPlayerSource::failing(401);
        let err = source.fetch_players().await.unwrap_err();
        assert!(matches!(err, ContractError::Upstream { status: 401 }));
    }
}
