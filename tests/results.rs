//! Integration tests for result recording and schedule updates.

use chrono::{NaiveDate, NaiveTime};
use league_manager::{
    cancel_league, close_registration, complete_league, disqualify_club, generate_fixtures,
    open_registration, record_result, update_fixture_schedule, ClubId, FixtureOptions,
    FixtureStatus, League, LeagueError, LeagueSettings, LeagueStatus, MatchResult,
    ScheduleUpdate,
};
use std::collections::HashMap;
use uuid::Uuid;

fn league_with_two_divisions() -> League {
    let mut league = League::new("Twin League", LeagueSettings::default());
    let east = league.add_division("East").unwrap();
    let west = league.add_division("West").unwrap();
    open_registration(&mut league).unwrap();
    for (division, prefix) in [(east, "e"), (west, "w")] {
        for i in 0..4 {
            league.register_club(division, format!("{prefix}{i}")).unwrap();
        }
    }
    close_registration(&mut league).unwrap();
    generate_fixtures(&mut league, east, FixtureOptions::default()).unwrap();
    league
}

#[test]
fn first_result_activates_league() {
    let mut league = league_with_two_divisions();
    assert_eq!(league.status, LeagueStatus::RegistrationClosed);
    let fixture_id = league.divisions[0].fixtures[0].id;

    record_result(&mut league, fixture_id, MatchResult::new(1, 0)).unwrap();

    let fixture = league.fixture(fixture_id).unwrap();
    assert_eq!(fixture.status, FixtureStatus::Completed);
    assert_eq!(fixture.result, Some(MatchResult::new(1, 0)));
    assert_eq!(league.status, LeagueStatus::Active);
}

#[test]
fn result_cannot_be_recorded_twice() {
    let mut league = league_with_two_divisions();
    let fixture_id = league.divisions[0].fixtures[0].id;
    record_result(&mut league, fixture_id, MatchResult::new(1, 0)).unwrap();

    assert!(matches!(
        record_result(&mut league, fixture_id, MatchResult::new(5, 5)),
        Err(LeagueError::FixtureNotScheduled { fixture_id: id, status: FixtureStatus::Completed, .. })
            if id == fixture_id
    ));
    assert_eq!(league.fixture(fixture_id).unwrap().result, Some(MatchResult::new(1, 0)));
}

#[test]
fn unknown_fixture_is_reported() {
    let mut league = league_with_two_divisions();
    let fixture_id = Uuid::new_v4();
    assert_eq!(
        update_fixture_schedule(&mut league, fixture_id, ScheduleUpdate::default()),
        Err(LeagueError::FixtureNotFound {
            league_id: league.id,
            fixture_id
        })
    );
}

#[test]
fn schedule_update_only_touches_metadata() {
    let mut league = league_with_two_divisions();
    let before = league.divisions[0].fixtures[1].clone();
    let date = NaiveDate::from_ymd_opt(2026, 11, 7).unwrap();
    let time = NaiveTime::from_hms_opt(15, 0, 0).unwrap();

    update_fixture_schedule(
        &mut league,
        before.id,
        ScheduleUpdate {
            date: Some(date),
            time: Some(time),
            venue_id: Some("ground-1".to_string()),
            official_id: None,
        },
    )
    .unwrap();
    update_fixture_schedule(
        &mut league,
        before.id,
        ScheduleUpdate {
            official_id: Some("ref-9".to_string()),
            ..ScheduleUpdate::default()
        },
    )
    .unwrap();

    let after = league.fixture(before.id).unwrap();
    assert_eq!(after.schedule.date, Some(date));
    assert_eq!(after.schedule.time, Some(time));
    assert_eq!(after.schedule.venue_id.as_deref(), Some("ground-1"));
    assert_eq!(after.schedule.official_id.as_deref(), Some("ref-9"));
    assert_eq!(
        (after.round, &after.home_club_id, &after.away_club_id, after.status, after.result),
        (before.round, &before.home_club_id, &before.away_club_id, before.status, before.result)
    );
}

#[test]
fn completed_and_cancelled_fixtures_cannot_be_rescheduled() {
    let mut league = league_with_two_divisions();
    let played = league.divisions[0].fixtures[0].id;
    record_result(&mut league, played, MatchResult::new(0, 0)).unwrap();
    assert!(matches!(
        update_fixture_schedule(&mut league, played, ScheduleUpdate::default()),
        Err(LeagueError::FixtureNotScheduled { status: FixtureStatus::Completed, .. })
    ));

    let club = league.divisions[0].clubs[0].clone();
    let outcome = disqualify_club(&mut league, &club, None, &HashMap::<ClubId, String>::new()).unwrap();
    let cancelled = outcome.cancelled_fixture_ids[0];
    let err = update_fixture_schedule(&mut league, cancelled, ScheduleUpdate::default()).unwrap_err();
    assert_eq!(
        err,
        LeagueError::FixtureNotScheduled {
            fixture_id: cancelled,
            status: FixtureStatus::Cancelled,
            operation: "reschedule",
        }
    );
    assert_eq!(
        err.to_string(),
        format!("Cannot reschedule fixture {} while it is cancelled", cancelled)
    );
}

#[test]
fn fixtures_of_finished_leagues_cannot_be_rescheduled() {
    let mut completed = league_with_two_divisions();
    let played = completed.divisions[0].fixtures[0].id;
    let pending = completed.divisions[0].fixtures[1].id;
    record_result(&mut completed, played, MatchResult::new(2, 2)).unwrap();
    complete_league(&mut completed).unwrap();
    assert!(matches!(
        update_fixture_schedule(&mut completed, pending, ScheduleUpdate::default()),
        Err(LeagueError::InvalidState { status: LeagueStatus::Completed, .. })
    ));

    let mut cancelled = league_with_two_divisions();
    let pending = cancelled.divisions[0].fixtures[0].id;
    cancel_league(&mut cancelled).unwrap();
    let before = cancelled.fixture(pending).unwrap().clone();
    assert!(matches!(
        update_fixture_schedule(&mut cancelled, pending, ScheduleUpdate::default()),
        Err(LeagueError::InvalidState { status: LeagueStatus::Cancelled, .. })
    ));
    assert_eq!(cancelled.fixture(pending).unwrap(), &before);
}
