//! Data structures for league management: leagues, divisions, fixtures, standings.

mod club;
mod division;
mod fixture;
mod league;
mod standings;

pub use club::{ClubDirectory, ClubId};
pub use division::{Division, DivisionId};
pub use fixture::{
    Fixture, FixtureId, FixtureStatus, MatchResult, ScheduleMetadata, ScheduleUpdate,
};
pub use league::{
    CompletedFixturePolicy, DisqualificationPolicy, DisqualificationRecord, League, LeagueError,
    LeagueId, LeagueSettings, LeagueStatus, PointsSystem,
};
pub use standings::{CachedStandings, StandingsEntry};
