//! Division: a partition of the league's clubs with its own fixture list.

use crate::models::club::ClubId;
use crate::models::fixture::Fixture;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a division.
pub type DivisionId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Division {
    pub id: DivisionId,
    pub name: String,
    /// Registered club ids. Order is only used as the draw order for fixture generation.
    pub clubs: Vec<ClubId>,
    /// Fixtures ordered by round.
    pub fixtures: Vec<Fixture>,
}

impl Division {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            clubs: Vec::new(),
            fixtures: Vec::new(),
        }
    }

    pub fn contains(&self, club_id: &str) -> bool {
        self.clubs.iter().any(|c| c == club_id)
    }

    pub fn has_fixtures(&self) -> bool {
        !self.fixtures.is_empty()
    }

    pub(crate) fn remove_club(&mut self, club_id: &str) {
        self.clubs.retain(|c| c != club_id);
    }
}
