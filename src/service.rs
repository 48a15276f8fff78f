//! Persistence boundary and the per-league serialized service used by the web binary.

use crate::logic::{self, DisqualificationOutcome, FixtureOptions};
use crate::models::{
    CachedStandings, ClubDirectory, DivisionId, Fixture, FixtureId, League, LeagueError, LeagueId,
    LeagueSettings, MatchResult, ScheduleUpdate, StandingsEntry,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Storage of league aggregates with optimistic versioning.
pub trait LeagueRepository: Send + Sync {
    /// Store a new league.
    fn insert(&self, league: League) -> Result<(), LeagueError>;

    /// Snapshot of a league.
    fn load(&self, league_id: LeagueId) -> Result<League, LeagueError>;

    /// Replace the stored league if its version still equals `expected_version`.
    /// Returns the new version.
    fn commit(&self, league: League, expected_version: u64) -> Result<u64, LeagueError>;
}

/// Repository keeping every league in memory.
#[derive(Debug, Default)]
pub struct InMemoryLeagueRepository {
    leagues: RwLock<HashMap<LeagueId, League>>,
}

impl InMemoryLeagueRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeagueRepository for InMemoryLeagueRepository {
    fn insert(&self, league: League) -> Result<(), LeagueError> {
        let mut g = self.leagues.write().unwrap_or_else(PoisonError::into_inner);
        g.insert(league.id, league);
        Ok(())
    }

    fn load(&self, league_id: LeagueId) -> Result<League, LeagueError> {
        let g = self.leagues.read().unwrap_or_else(PoisonError::into_inner);
        g.get(&league_id)
            .cloned()
            .ok_or(LeagueError::LeagueNotFound(league_id))
    }

    fn commit(&self, mut league: League, expected_version: u64) -> Result<u64, LeagueError> {
        let mut g = self.leagues.write().unwrap_or_else(PoisonError::into_inner);
        let stored = g
            .get_mut(&league.id)
            .ok_or(LeagueError::LeagueNotFound(league.id))?;
        if stored.version != expected_version {
            return Err(LeagueError::VersionConflict {
                league_id: league.id,
                expected: expected_version,
                found: stored.version,
            });
        }
        league.version = expected_version + 1;
        let version = league.version;
        *stored = league;
        Ok(version)
    }
}

/// League operations over a repository. Mutations of one league run one at a time;
/// reads take a fresh snapshot without waiting.
pub struct LeagueService<R, D> {
    repository: R,
    directory: D,
    locks: Mutex<HashMap<LeagueId, Arc<Mutex<()>>>>,
}

impl<R: LeagueRepository, D: ClubDirectory> LeagueService<R, D> {
    pub fn new(repository: R, directory: D) -> Self {
        Self {
            repository,
            directory,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Number of leagues with a mutation running or waiting.
    pub fn busy_leagues(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn league_lock(&self, league_id: LeagueId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(league_id).or_default().clone()
    }

    /// Drop the map entry once no other caller holds the league's lock.
    fn release_lock(&self, league_id: LeagueId, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Clones are only taken under the map lock: the map and `lock` are the last holders.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&league_id);
        }
    }

    /// Load, apply `op` to the snapshot, commit. A failed `op` discards the snapshot, so the
    /// stored league is untouched.
    fn mutate<T>(
        &self,
        league_id: LeagueId,
        op: impl FnOnce(&mut League, &D) -> Result<T, LeagueError>,
    ) -> Result<T, LeagueError> {
        let lock = self.league_lock(league_id);
        let out = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.apply(league_id, op)
        };
        self.release_lock(league_id, lock);
        out
    }

    fn apply<T>(
        &self,
        league_id: LeagueId,
        op: impl FnOnce(&mut League, &D) -> Result<T, LeagueError>,
    ) -> Result<T, LeagueError> {
        let mut league = self.repository.load(league_id)?;
        let expected = league.version;
        let out = op(&mut league, &self.directory)?;
        self.repository.commit(league, expected)?;
        Ok(out)
    }

    pub fn create_league(
        &self,
        name: impl Into<String>,
        settings: LeagueSettings,
    ) -> Result<League, LeagueError> {
        let league = League::new(name, settings);
        log::info!("League {} created: {}", league.id, league.name);
        self.repository.insert(league.clone())?;
        Ok(league)
    }

    pub fn league(&self, league_id: LeagueId) -> Result<League, LeagueError> {
        self.repository.load(league_id)
    }

    pub fn add_division(
        &self,
        league_id: LeagueId,
        name: impl Into<String>,
    ) -> Result<DivisionId, LeagueError> {
        let name = name.into();
        self.mutate(league_id, |league, _| league.add_division(name))
    }

    pub fn open_registration(&self, league_id: LeagueId) -> Result<(), LeagueError> {
        self.mutate(league_id, |league, _| logic::open_registration(league))
    }

    pub fn register_club(
        &self,
        league_id: LeagueId,
        division_id: DivisionId,
        club_id: impl Into<String>,
    ) -> Result<(), LeagueError> {
        let club_id = club_id.into();
        self.mutate(league_id, |league, _| league.register_club(division_id, club_id))
    }

    pub fn withdraw_club(&self, league_id: LeagueId, club_id: &str) -> Result<(), LeagueError> {
        self.mutate(league_id, |league, _| league.withdraw_club(club_id))
    }

    pub fn close_registration(&self, league_id: LeagueId) -> Result<(), LeagueError> {
        self.mutate(league_id, |league, _| logic::close_registration(league))
    }

    pub fn generate_fixtures(
        &self,
        league_id: LeagueId,
        division_id: DivisionId,
        options: FixtureOptions,
    ) -> Result<Vec<Fixture>, LeagueError> {
        self.mutate(league_id, |league, _| {
            logic::generate_fixtures(league, division_id, options)
        })
    }

    pub fn record_result(
        &self,
        league_id: LeagueId,
        fixture_id: FixtureId,
        result: MatchResult,
    ) -> Result<(), LeagueError> {
        self.mutate(league_id, |league, _| {
            logic::record_result(league, fixture_id, result)
        })
    }

    pub fn update_fixture_schedule(
        &self,
        league_id: LeagueId,
        fixture_id: FixtureId,
        update: ScheduleUpdate,
    ) -> Result<(), LeagueError> {
        self.mutate(league_id, |league, _| {
            logic::update_fixture_schedule(league, fixture_id, update)
        })
    }

    pub fn disqualify_club(
        &self,
        league_id: LeagueId,
        club_id: &str,
        reason: Option<String>,
    ) -> Result<DisqualificationOutcome, LeagueError> {
        self.mutate(league_id, |league, directory| {
            logic::disqualify_club(league, club_id, reason, directory)
        })
    }

    pub fn complete_league(&self, league_id: LeagueId) -> Result<(), LeagueError> {
        self.mutate(league_id, |league, _| logic::complete_league(league))
    }

    pub fn cancel_league(&self, league_id: LeagueId) -> Result<(), LeagueError> {
        self.mutate(league_id, |league, _| logic::cancel_league(league))
    }

    /// Standings from the latest committed snapshot.
    pub fn calculate_standings(
        &self,
        league_id: LeagueId,
        division_id: DivisionId,
    ) -> Result<Vec<StandingsEntry>, LeagueError> {
        let league = self.repository.load(league_id)?;
        logic::calculate_division_standings(&league, division_id, &self.directory)
    }

    /// Standings tagged with the league version they were computed from, for display caches.
    pub fn cached_standings(
        &self,
        league_id: LeagueId,
        division_id: DivisionId,
    ) -> Result<CachedStandings, LeagueError> {
        let league = self.repository.load(league_id)?;
        let entries = logic::calculate_division_standings(&league, division_id, &self.directory)?;
        Ok(CachedStandings::new(division_id, league.version, entries))
    }
}
