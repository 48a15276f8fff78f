//! Fixture mutations outside generation: recording results and schedule updates.

use crate::logic::lifecycle::{activate, ensure_status};
use crate::models::{FixtureId, League, LeagueError, LeagueStatus, MatchResult, ScheduleUpdate};

/// Record the result of a scheduled fixture (RegistrationClosed or Active).
/// The first recorded result activates the league.
pub fn record_result(
    league: &mut League,
    fixture_id: FixtureId,
    result: MatchResult,
) -> Result<(), LeagueError> {
    ensure_status(
        league,
        &[LeagueStatus::RegistrationClosed, LeagueStatus::Active],
        "record a result",
    )?;
    ensure_scheduled(league, fixture_id, "record a result for")?;
    let fixture = league.fixture_mut(fixture_id)?;
    fixture.complete(MatchResult {
        walkover: false,
        ..result
    });
    log::info!(
        "Fixture {}: {} {}-{} {}",
        fixture_id,
        fixture.home_club_id,
        result.home_goals,
        result.away_goals,
        fixture.away_club_id
    );
    activate(league);
    Ok(())
}

/// Update date/time/venue/official of a scheduled fixture. Leaves round, clubs and result alone.
/// Fixtures of a completed or cancelled league are frozen.
pub fn update_fixture_schedule(
    league: &mut League,
    fixture_id: FixtureId,
    update: ScheduleUpdate,
) -> Result<(), LeagueError> {
    ensure_status(
        league,
        &[LeagueStatus::RegistrationClosed, LeagueStatus::Active],
        "reschedule a fixture",
    )?;
    ensure_scheduled(league, fixture_id, "reschedule")?;
    league.fixture_mut(fixture_id)?.apply_schedule(update);
    log::info!("Fixture {}: schedule updated", fixture_id);
    Ok(())
}

fn ensure_scheduled(
    league: &League,
    fixture_id: FixtureId,
    operation: &'static str,
) -> Result<(), LeagueError> {
    let fixture = league.fixture(fixture_id)?;
    if fixture.is_scheduled() {
        Ok(())
    } else {
        Err(LeagueError::FixtureNotScheduled {
            fixture_id,
            status: fixture.status,
            operation,
        })
    }
}
