//! League, LeagueStatus, settings and the error type shared by every operation.

use crate::models::club::ClubId;
use crate::models::division::{Division, DivisionId};
use crate::models::fixture::{Fixture, FixtureId, FixtureStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during league operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// Operation is not legal for the league's current status.
    InvalidState {
        league_id: LeagueId,
        status: LeagueStatus,
        operation: &'static str,
    },
    /// Division has too few clubs to schedule.
    InsufficientClubs {
        division_id: DivisionId,
        clubs: usize,
        required: usize,
    },
    /// Fixtures already exist for this division.
    AlreadyGenerated { division_id: DivisionId },
    /// Club is not registered in any division of the league.
    ClubNotInLeague { league_id: LeagueId, club_id: ClubId },
    /// No fixture with this id in the league.
    FixtureNotFound {
        league_id: LeagueId,
        fixture_id: FixtureId,
    },
    /// Fixture is no longer scheduled (already completed or cancelled).
    FixtureNotScheduled {
        fixture_id: FixtureId,
        status: FixtureStatus,
        operation: &'static str,
    },
    /// No league with this id in the repository.
    LeagueNotFound(LeagueId),
    /// No division with this id in the league.
    DivisionNotFound {
        league_id: LeagueId,
        division_id: DivisionId,
    },
    /// Club is already registered in one of the league's divisions.
    ClubAlreadyRegistered { club_id: ClubId },
    /// League already holds `max_clubs` clubs.
    LeagueFull { max_clubs: usize },
    /// Division still lists a club that was disqualified from the league.
    ClubDisqualified { club_id: ClubId },
    /// Another mutation was committed since the snapshot was loaded.
    VersionConflict {
        league_id: LeagueId,
        expected: u64,
        found: u64,
    },
    /// Standings could not be rendered for export.
    Export(String),
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::InvalidState {
                league_id,
                status,
                operation,
            } => write!(
                f,
                "Cannot {} in league {} while it is {}",
                operation, league_id, status
            ),
            LeagueError::InsufficientClubs {
                division_id,
                clubs,
                required,
            } => write!(
                f,
                "Division {} has {} club(s), at least {} required",
                division_id, clubs, required
            ),
            LeagueError::AlreadyGenerated { division_id } => {
                write!(f, "Fixtures already generated for division {}", division_id)
            }
            LeagueError::ClubNotInLeague { league_id, club_id } => {
                write!(f, "Club {} is not registered in league {}", club_id, league_id)
            }
            LeagueError::FixtureNotFound {
                league_id,
                fixture_id,
            } => write!(f, "Fixture {} not found in league {}", fixture_id, league_id),
            LeagueError::FixtureNotScheduled {
                fixture_id,
                status,
                operation,
            } => write!(
                f,
                "Cannot {} fixture {} while it is {}",
                operation, fixture_id, status
            ),
            LeagueError::LeagueNotFound(id) => write!(f, "League {} not found", id),
            LeagueError::DivisionNotFound {
                league_id,
                division_id,
            } => write!(f, "Division {} not found in league {}", division_id, league_id),
            LeagueError::ClubAlreadyRegistered { club_id } => {
                write!(f, "Club {} is already registered", club_id)
            }
            LeagueError::LeagueFull { max_clubs } => {
                write!(f, "League is full ({} clubs maximum)", max_clubs)
            }
            LeagueError::ClubDisqualified { club_id } => {
                write!(f, "Club {} has been disqualified", club_id)
            }
            LeagueError::VersionConflict {
                league_id,
                expected,
                found,
            } => write!(
                f,
                "League {} was modified concurrently (expected version {}, found {})",
                league_id, expected, found
            ),
            LeagueError::Export(msg) => write!(f, "Could not export standings: {}", msg),
        }
    }
}

impl std::error::Error for LeagueError {}

/// Unique identifier for a league.
pub type LeagueId = Uuid;

/// Lifecycle status of a league.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueStatus {
    /// Being set up by the organizer; divisions can be added.
    #[default]
    Draft,
    /// Clubs may register.
    Registration,
    /// Registration closed; fixtures may be generated.
    RegistrationClosed,
    /// Season under way.
    Active,
    Completed,
    Cancelled,
}

impl std::fmt::Display for LeagueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LeagueStatus::Draft => "draft",
            LeagueStatus::Registration => "registration",
            LeagueStatus::RegistrationClosed => "registration_closed",
            LeagueStatus::Active => "active",
            LeagueStatus::Completed => "completed",
            LeagueStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Points awarded per result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointsSystem {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for PointsSystem {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

/// What happens to fixtures the club already played when it is disqualified.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletedFixturePolicy {
    /// Historical results stand.
    #[default]
    Retain,
    /// Completed fixtures are cancelled and their results cleared.
    Void,
}

/// Cascade options applied by `disqualify_club`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DisqualificationPolicy {
    #[serde(default)]
    pub completed: CompletedFixturePolicy,
    /// Award the opponent a win in each of the club's unplayed fixtures instead of cancelling them.
    #[serde(default)]
    pub award_walkovers: bool,
    #[serde(default = "default_walkover_goals")]
    pub walkover_goals: u32,
}

fn default_walkover_goals() -> u32 {
    3
}

impl Default for DisqualificationPolicy {
    fn default() -> Self {
        Self {
            completed: CompletedFixturePolicy::Retain,
            award_walkovers: false,
            walkover_goals: default_walkover_goals(),
        }
    }
}

/// Organizer-controlled settings of a league.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeagueSettings {
    #[serde(default)]
    pub points_system: PointsSystem,
    #[serde(default)]
    pub min_clubs: Option<usize>,
    #[serde(default)]
    pub max_clubs: Option<usize>,
    #[serde(default)]
    pub disqualification_policy: DisqualificationPolicy,
}

/// Log entry for a club removed from the league.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DisqualificationRecord {
    pub club_id: ClubId,
    pub division_id: DivisionId,
    pub reason: Option<String>,
    pub disqualified_at: DateTime<Utc>,
}

/// Full league aggregate: status, settings, divisions with their fixtures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub status: LeagueStatus,
    pub registration_closed: bool,
    pub settings: LeagueSettings,
    pub divisions: Vec<Division>,
    pub disqualifications: Vec<DisqualificationRecord>,
    /// Bumped by the repository on every commit.
    pub version: u64,
}

impl League {
    /// Create a new league in Draft with no divisions.
    pub fn new(name: impl Into<String>, settings: LeagueSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: LeagueStatus::Draft,
            registration_closed: false,
            settings,
            divisions: Vec::new(),
            disqualifications: Vec::new(),
            version: 0,
        }
    }

    pub(crate) fn invalid_state(&self, operation: &'static str) -> LeagueError {
        LeagueError::InvalidState {
            league_id: self.id,
            status: self.status,
            operation,
        }
    }

    pub fn division(&self, division_id: DivisionId) -> Result<&Division, LeagueError> {
        self.divisions
            .iter()
            .find(|d| d.id == division_id)
            .ok_or(LeagueError::DivisionNotFound {
                league_id: self.id,
                division_id,
            })
    }

    pub fn division_mut(&mut self, division_id: DivisionId) -> Result<&mut Division, LeagueError> {
        let league_id = self.id;
        self.divisions
            .iter_mut()
            .find(|d| d.id == division_id)
            .ok_or(LeagueError::DivisionNotFound {
                league_id,
                division_id,
            })
    }

    /// Division currently holding this club, if any.
    pub fn division_of_club(&self, club_id: &str) -> Option<&Division> {
        self.divisions.iter().find(|d| d.contains(club_id))
    }

    /// Total registered clubs across all divisions.
    pub fn club_count(&self) -> usize {
        self.divisions.iter().map(|d| d.clubs.len()).sum()
    }

    pub fn is_disqualified(&self, club_id: &str) -> bool {
        self.disqualifications.iter().any(|r| r.club_id == club_id)
    }

    /// Fixture by id in any division.
    pub fn fixture(&self, fixture_id: FixtureId) -> Result<&Fixture, LeagueError> {
        self.divisions
            .iter()
            .flat_map(|d| d.fixtures.iter())
            .find(|f| f.id == fixture_id)
            .ok_or(LeagueError::FixtureNotFound {
                league_id: self.id,
                fixture_id,
            })
    }

    pub fn fixture_mut(&mut self, fixture_id: FixtureId) -> Result<&mut Fixture, LeagueError> {
        let league_id = self.id;
        self.divisions
            .iter_mut()
            .flat_map(|d| d.fixtures.iter_mut())
            .find(|f| f.id == fixture_id)
            .ok_or(LeagueError::FixtureNotFound {
                league_id,
                fixture_id,
            })
    }

    /// Add a division (valid in Draft or Registration).
    pub fn add_division(&mut self, name: impl Into<String>) -> Result<DivisionId, LeagueError> {
        if !matches!(self.status, LeagueStatus::Draft | LeagueStatus::Registration) {
            return Err(self.invalid_state("add a division"));
        }
        let division = Division::new(name);
        let id = division.id;
        self.divisions.push(division);
        Ok(id)
    }

    /// Register a club in a division (only valid in Registration). A club may hold one division only.
    pub fn register_club(
        &mut self,
        division_id: DivisionId,
        club_id: impl Into<ClubId>,
    ) -> Result<(), LeagueError> {
        if self.status != LeagueStatus::Registration {
            return Err(self.invalid_state("register a club"));
        }
        let club_id = club_id.into();
        if self.division_of_club(&club_id).is_some() {
            return Err(LeagueError::ClubAlreadyRegistered { club_id });
        }
        if self.is_disqualified(&club_id) {
            return Err(LeagueError::ClubDisqualified { club_id });
        }
        if let Some(max_clubs) = self.settings.max_clubs {
            if self.club_count() >= max_clubs {
                return Err(LeagueError::LeagueFull { max_clubs });
            }
        }
        self.division_mut(division_id)?.clubs.push(club_id);
        Ok(())
    }

    /// Withdraw a club before registration closes. No fixtures exist yet, so nothing cascades.
    pub fn withdraw_club(&mut self, club_id: &str) -> Result<(), LeagueError> {
        if self.status != LeagueStatus::Registration {
            return Err(self.invalid_state("withdraw a club"));
        }
        let league_id = self.id;
        let division = self
            .divisions
            .iter_mut()
            .find(|d| d.contains(club_id))
            .ok_or_else(|| LeagueError::ClubNotInLeague {
                league_id,
                club_id: club_id.to_string(),
            })?;
        division.remove_club(club_id);
        Ok(())
    }
}
