//! League competition management: library with models, business logic and a service layer.

pub mod logic;
pub mod models;
pub mod service;

pub use logic::{
    calculate_division_standings, calculate_standings, cancel_league, close_registration,
    complete_league, disqualify_club, generate_fixtures, open_registration, record_result,
    round_robin_pairings, standings_to_csv, update_fixture_schedule, DisqualificationOutcome,
    FixtureOptions, Pairing,
};
pub use models::{
    CachedStandings, ClubDirectory, ClubId, CompletedFixturePolicy, DisqualificationPolicy,
    DisqualificationRecord, Division, DivisionId, Fixture, FixtureId, FixtureStatus, League,
    LeagueError, LeagueId, LeagueSettings, LeagueStatus, MatchResult, PointsSystem,
    ScheduleMetadata, ScheduleUpdate, StandingsEntry,
};
pub use service::{InMemoryLeagueRepository, LeagueRepository, LeagueService};
