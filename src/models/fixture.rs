//! Fixture, its status, result and opaque scheduling metadata.

use crate::models::club::ClubId;
use crate::models::division::DivisionId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type FixtureId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl std::fmt::Display for FixtureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FixtureStatus::Scheduled => "scheduled",
            FixtureStatus::Completed => "completed",
            FixtureStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Final score of a fixture.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_goals: u32,
    pub away_goals: u32,
    /// Awarded without the match being played.
    #[serde(default)]
    pub walkover: bool,
}

impl MatchResult {
    pub fn new(home_goals: u32, away_goals: u32) -> Self {
        Self {
            home_goals,
            away_goals,
            walkover: false,
        }
    }
}

/// Scheduling details. Not interpreted by the league logic.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub venue_id: Option<String>,
    pub official_id: Option<String>,
}

impl ScheduleMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial update of a fixture's schedule; `None` fields keep their current value.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub official_id: Option<String>,
}

/// One match between two clubs of a division.
///
/// A completed fixture always carries a result; a scheduled or cancelled one never does.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub division_id: DivisionId,
    /// 1-based.
    pub round: u32,
    pub home_club_id: ClubId,
    pub away_club_id: ClubId,
    pub status: FixtureStatus,
    pub result: Option<MatchResult>,
    #[serde(default)]
    pub schedule: ScheduleMetadata,
}

impl Fixture {
    pub fn new(division_id: DivisionId, round: u32, home: ClubId, away: ClubId) -> Self {
        Self {
            id: Uuid::new_v4(),
            division_id,
            round,
            home_club_id: home,
            away_club_id: away,
            status: FixtureStatus::Scheduled,
            result: None,
            schedule: ScheduleMetadata::default(),
        }
    }

    pub fn involves(&self, club_id: &str) -> bool {
        self.home_club_id == club_id || self.away_club_id == club_id
    }

    /// The other club in this fixture, if `club_id` plays in it.
    pub fn opponent_of(&self, club_id: &str) -> Option<&ClubId> {
        if self.home_club_id == club_id {
            Some(&self.away_club_id)
        } else if self.away_club_id == club_id {
            Some(&self.home_club_id)
        } else {
            None
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == FixtureStatus::Scheduled
    }

    /// Result, only when completed.
    pub fn completed_result(&self) -> Option<MatchResult> {
        match self.status {
            FixtureStatus::Completed => self.result,
            _ => None,
        }
    }

    pub(crate) fn complete(&mut self, result: MatchResult) {
        self.status = FixtureStatus::Completed;
        self.result = Some(result);
    }

    /// Cancel: drops the result and clears the schedule.
    pub(crate) fn cancel(&mut self) {
        self.status = FixtureStatus::Cancelled;
        self.result = None;
        self.schedule = ScheduleMetadata::default();
    }

    pub(crate) fn apply_schedule(&mut self, update: ScheduleUpdate) {
        if let Some(date) = update.date {
            self.schedule.date = Some(date);
        }
        if let Some(time) = update.time {
            self.schedule.time = Some(time);
        }
        if let Some(venue_id) = update.venue_id {
            self.schedule.venue_id = Some(venue_id);
        }
        if let Some(official_id) = update.official_id {
            self.schedule.official_id = Some(official_id);
        }
    }
}
