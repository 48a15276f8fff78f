//! League business logic: lifecycle, fixture generation, results, standings, disqualification.

mod disqualification;
mod export;
mod fixtures;
mod lifecycle;
mod results;
mod standings;

pub use disqualification::{disqualify_club, DisqualificationOutcome};
pub use export::standings_to_csv;
pub use fixtures::{generate_fixtures, round_robin_pairings, FixtureOptions, Pairing};
pub use lifecycle::{cancel_league, close_registration, complete_league, open_registration};
pub use results::{record_result, update_fixture_schedule};
pub use standings::{calculate_division_standings, calculate_standings};
