//! Integration tests for the service layer: snapshots, commits and per-league serialization.

use league_manager::{
    ClubId, DivisionId, FixtureOptions, InMemoryLeagueRepository, LeagueError, LeagueId,
    LeagueRepository, LeagueService, LeagueSettings, LeagueStatus, MatchResult,
};
use std::collections::HashMap;

type Service = LeagueService<InMemoryLeagueRepository, HashMap<ClubId, String>>;

fn service() -> Service {
    let names = [("rov", "Rovers"), ("utd", "United"), ("ath", "Athletic"), ("cty", "City")]
        .into_iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect();
    LeagueService::new(InMemoryLeagueRepository::new(), names)
}

fn closed_league(service: &Service) -> (LeagueId, DivisionId) {
    let league = service.create_league("Saturday League", LeagueSettings::default()).unwrap();
    let division_id = service.add_division(league.id, "First").unwrap();
    service.open_registration(league.id).unwrap();
    for id in ["rov", "utd", "ath", "cty"] {
        service.register_club(league.id, division_id, id).unwrap();
    }
    service.close_registration(league.id).unwrap();
    (league.id, division_id)
}

#[test]
fn season_flow_through_the_service() {
    let service = service();
    let (league_id, division_id) = closed_league(&service);

    let fixtures = service
        .generate_fixtures(league_id, division_id, FixtureOptions { double_round: true, shuffle_seed: None })
        .unwrap();
    assert_eq!(fixtures.len(), 12);
    assert_eq!(service.league(league_id).unwrap().status, LeagueStatus::Active);

    service
        .record_result(league_id, fixtures[0].id, MatchResult::new(2, 1))
        .unwrap();
    let table = service.calculate_standings(league_id, division_id).unwrap();
    assert_eq!(table[0].club_id, fixtures[0].home_club_id);
    assert_eq!(table[0].points, 3);
    assert!(table.iter().any(|e| e.club_name == "Rovers"));

    let outcome = service.disqualify_club(league_id, "utd", Some("forfeits".to_string())).unwrap();
    assert!(outcome.updated_standings.iter().all(|e| e.club_id != "utd"));
    assert_eq!(service.calculate_standings(league_id, division_id).unwrap(), outcome.updated_standings);

    service.complete_league(league_id).unwrap();
    assert_eq!(service.league(league_id).unwrap().status, LeagueStatus::Completed);
}

#[test]
fn failed_operation_leaves_stored_league_untouched() {
    let service = service();
    let (league_id, division_id) = closed_league(&service);
    service
        .generate_fixtures(league_id, division_id, FixtureOptions::default())
        .unwrap();
    let before = service.league(league_id).unwrap();

    assert!(matches!(
        service.disqualify_club(league_id, "nobody", None),
        Err(LeagueError::ClubNotInLeague { .. })
    ));
    assert_eq!(
        service.generate_fixtures(league_id, division_id, FixtureOptions::default()),
        Err(LeagueError::AlreadyGenerated { division_id })
    );

    let after = service.league(league_id).unwrap();
    assert_eq!(after.version, before.version);
    assert_eq!(after.divisions, before.divisions);
}

#[test]
fn commits_bump_the_version() {
    let service = service();
    let league = service.create_league("Versioned", LeagueSettings::default()).unwrap();
    assert_eq!(league.version, 0);
    service.add_division(league.id, "Only").unwrap();
    service.open_registration(league.id).unwrap();
    assert_eq!(service.league(league.id).unwrap().version, 2);
}

#[test]
fn stale_commit_is_rejected() {
    let repository = InMemoryLeagueRepository::new();
    let league = league_manager::League::new("Race", LeagueSettings::default());
    let league_id = league.id;
    repository.insert(league).unwrap();

    let first = repository.load(league_id).unwrap();
    let second = repository.load(league_id).unwrap();
    assert_eq!(repository.commit(first, 0), Ok(1));
    assert_eq!(
        repository.commit(second, 0),
        Err(LeagueError::VersionConflict {
            league_id,
            expected: 0,
            found: 1
        })
    );
}

#[test]
fn missing_league_is_reported() {
    let service = service();
    let id = uuid::Uuid::new_v4();
    assert_eq!(service.league(id).unwrap_err(), LeagueError::LeagueNotFound(id));
    assert_eq!(service.open_registration(id), Err(LeagueError::LeagueNotFound(id)));
}

#[test]
fn concurrent_generation_creates_one_fixture_set() {
    let service = service();
    let (league_id, division_id) = closed_league(&service);

    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| service.generate_fixtures(league_id, division_id, FixtureOptions::default()))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == LeagueError::AlreadyGenerated { division_id }));
    let league = service.league(league_id).unwrap();
    assert_eq!(league.division(division_id).unwrap().fixtures.len(), 6);
    assert_eq!(service.busy_leagues(), 0);
}

#[test]
fn finished_mutations_release_their_league_lock() {
    let service = service();
    let (league_id, division_id) = closed_league(&service);
    assert_eq!(service.busy_leagues(), 0);

    assert!(service.disqualify_club(league_id, "nobody", None).is_err());
    assert!(service.open_registration(uuid::Uuid::new_v4()).is_err());
    assert_eq!(service.busy_leagues(), 0);

    service
        .generate_fixtures(league_id, division_id, FixtureOptions::default())
        .unwrap();
    assert_eq!(service.busy_leagues(), 0);
}

#[test]
fn cached_standings_are_tagged_as_derived() {
    let service = service();
    let (league_id, division_id) = closed_league(&service);
    let cached = service.cached_standings(league_id, division_id).unwrap();
    let version = service.league(league_id).unwrap().version;

    assert!(cached.derived);
    assert!(cached.is_current(version));
    assert_eq!(cached.entries.len(), 4);

    service
        .generate_fixtures(league_id, division_id, FixtureOptions::default())
        .unwrap();
    assert!(!cached.is_current(service.league(league_id).unwrap().version));
}
