//! Mid-season disqualification and its cascade over fixtures and standings.

use crate::logic::lifecycle::ensure_status;
use crate::logic::standings::calculate_standings;
use crate::models::{
    ClubDirectory, CompletedFixturePolicy, DisqualificationRecord, FixtureId, FixtureStatus,
    League, LeagueError, LeagueStatus, MatchResult, StandingsEntry,
};
use chrono::Utc;
use serde::Serialize;

/// What a disqualification changed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DisqualificationOutcome {
    pub record: DisqualificationRecord,
    /// Scheduled fixtures that were cancelled.
    pub cancelled_fixture_ids: Vec<FixtureId>,
    /// Completed fixtures whose results were voided (Void policy only).
    pub voided_fixture_ids: Vec<FixtureId>,
    /// Scheduled fixtures awarded to the opponent (walkover policy only).
    pub walkover_fixture_ids: Vec<FixtureId>,
    /// Rebuilt table of the club's former division, without the club.
    pub updated_standings: Vec<StandingsEntry>,
}

/// Remove a club from an Active or RegistrationClosed league.
///
/// The club leaves its division, its scheduled fixtures are cancelled (or awarded as walkovers),
/// its completed fixtures are kept or voided per the league's disqualification policy, and the
/// division table is rebuilt. Every check runs before anything is changed.
pub fn disqualify_club(
    league: &mut League,
    club_id: &str,
    reason: Option<String>,
    directory: &dyn ClubDirectory,
) -> Result<DisqualificationOutcome, LeagueError> {
    ensure_status(
        league,
        &[LeagueStatus::RegistrationClosed, LeagueStatus::Active],
        "disqualify a club",
    )?;
    let league_id = league.id;
    let policy = league.settings.disqualification_policy;
    let points = league.settings.points_system;
    let division = league
        .divisions
        .iter_mut()
        .find(|d| d.contains(club_id))
        .ok_or_else(|| LeagueError::ClubNotInLeague {
            league_id,
            club_id: club_id.to_string(),
        })?;

    division.remove_club(club_id);

    let mut cancelled_fixture_ids = Vec::new();
    let mut voided_fixture_ids = Vec::new();
    let mut walkover_fixture_ids = Vec::new();
    for fixture in division.fixtures.iter_mut().filter(|f| f.involves(club_id)) {
        match fixture.status {
            FixtureStatus::Scheduled if policy.award_walkovers => {
                let opponent_home = fixture.away_club_id == club_id;
                let (home_goals, away_goals) = if opponent_home {
                    (policy.walkover_goals, 0)
                } else {
                    (0, policy.walkover_goals)
                };
                fixture.complete(MatchResult {
                    home_goals,
                    away_goals,
                    walkover: true,
                });
                walkover_fixture_ids.push(fixture.id);
            }
            FixtureStatus::Scheduled => {
                fixture.cancel();
                cancelled_fixture_ids.push(fixture.id);
            }
            FixtureStatus::Completed if policy.completed == CompletedFixturePolicy::Void => {
                fixture.cancel();
                voided_fixture_ids.push(fixture.id);
            }
            FixtureStatus::Completed | FixtureStatus::Cancelled => {}
        }
    }

    let record = DisqualificationRecord {
        club_id: club_id.to_string(),
        division_id: division.id,
        reason,
        disqualified_at: Utc::now(),
    };
    let updated_standings = calculate_standings(division, points, directory);

    log::info!(
        "League {}: club {} disqualified from division {} ({} cancelled, {} voided, {} walkovers)",
        league_id,
        club_id,
        record.division_id,
        cancelled_fixture_ids.len(),
        voided_fixture_ids.len(),
        walkover_fixture_ids.len()
    );

    league.disqualifications.push(record.clone());
    Ok(DisqualificationOutcome {
        record,
        cancelled_fixture_ids,
        voided_fixture_ids,
        walkover_fixture_ids,
        updated_standings,
    })
}
