//! StandingsEntry and the display cache shape.

use crate::models::club::ClubId;
use crate::models::division::DivisionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a division table. Always derived from the fixture list.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub club_id: ClubId,
    pub club_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
    pub points: u64,
}

impl StandingsEntry {
    /// All-zero row for a club with nothing played.
    pub fn new(club_id: impl Into<ClubId>, club_name: impl Into<String>) -> Self {
        Self {
            club_id: club_id.into(),
            club_name: club_name.into(),
            ..Self::default()
        }
    }

    /// Totals saturate instead of overflowing, so any stored score yields a table.
    pub(crate) fn record(&mut self, scored: u32, conceded: u32, points: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(u64::from(scored));
        self.goals_against = self.goals_against.saturating_add(u64::from(conceded));
        self.goal_difference = signed(self.goals_for).saturating_sub(signed(self.goals_against));
        self.points = self.points.saturating_add(u64::from(points));
        let counter = match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => &mut self.won,
            std::cmp::Ordering::Equal => &mut self.drawn,
            std::cmp::Ordering::Less => &mut self.lost,
        };
        *counter = counter.saturating_add(1);
    }
}

fn signed(total: u64) -> i64 {
    i64::try_from(total).unwrap_or(i64::MAX)
}

/// Stored copy of a computed table for display. Never read back as the source of truth.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CachedStandings {
    pub division_id: DivisionId,
    /// League version the table was computed from.
    pub league_version: u64,
    pub computed_at: DateTime<Utc>,
    pub derived: bool,
    pub entries: Vec<StandingsEntry>,
}

impl CachedStandings {
    pub fn new(division_id: DivisionId, league_version: u64, entries: Vec<StandingsEntry>) -> Self {
        Self {
            division_id,
            league_version,
            computed_at: Utc::now(),
            derived: true,
            entries,
        }
    }

    /// Whether the cache was computed from the given league version.
    pub fn is_current(&self, league_version: u64) -> bool {
        self.league_version == league_version
    }
}
