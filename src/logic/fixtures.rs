//! Fixture generation: circle-method round robin, single or double.

use crate::logic::lifecycle::{activate, ensure_status};
use crate::models::{ClubId, DivisionId, Fixture, League, LeagueError, LeagueStatus};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Options for `generate_fixtures`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixtureOptions {
    /// Home and away against every opponent.
    #[serde(default)]
    pub double_round: bool,
    /// Shuffle the draw order with this seed before scheduling; division order otherwise.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

/// One generated pairing: round number (1-based), home club, away club.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pairing {
    pub round: u32,
    pub home: ClubId,
    pub away: ClubId,
}

/// Round-robin pairings for `clubs` using the circle method.
///
/// The first club stays fixed while the rest rotate one slot per round. With an odd count a
/// bye slot is added and its pairings are dropped. The top half of the rotation plays at home,
/// except the fixed club which alternates, so home counts differ by at most one.
/// A double round robin appends the mirrored rounds with home and away swapped.
pub fn round_robin_pairings(clubs: &[ClubId], double_round: bool) -> Vec<Pairing> {
    if clubs.len() < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Option<&ClubId>> = clubs.iter().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let m = slots.len();
    let rounds = (m - 1) as u32;

    let mut pairings = Vec::with_capacity(clubs.len() * (clubs.len() - 1));
    for round in 0..rounds {
        for i in 0..m / 2 {
            let (a, b) = match (slots[i], slots[m - 1 - i]) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };
            let (home, away) = if i > 0 || round % 2 == 0 { (a, b) } else { (b, a) };
            pairings.push(Pairing {
                round: round + 1,
                home: home.clone(),
                away: away.clone(),
            });
        }
        log::debug!("Round {} paired", round + 1);
        slots[1..].rotate_right(1);
    }

    if double_round {
        let mirrored: Vec<Pairing> = pairings
            .iter()
            .map(|p| Pairing {
                round: p.round + rounds,
                home: p.away.clone(),
                away: p.home.clone(),
            })
            .collect();
        pairings.extend(mirrored);
    }

    pairings
}

/// Generate the full fixture list for one division (RegistrationClosed only, once per division).
///
/// A division that already has fixtures fails with `AlreadyGenerated` in any league status.
/// All-or-nothing: on error the division is left untouched. The league becomes Active once
/// every division has fixtures.
pub fn generate_fixtures(
    league: &mut League,
    division_id: DivisionId,
    options: FixtureOptions,
) -> Result<Vec<Fixture>, LeagueError> {
    if league.division(division_id)?.has_fixtures() {
        return Err(LeagueError::AlreadyGenerated { division_id });
    }
    ensure_status(league, &[LeagueStatus::RegistrationClosed], "generate fixtures")?;

    let min_clubs = league.settings.min_clubs.unwrap_or(0).max(2);
    let division = league.division(division_id)?;
    if let Some(club_id) = division.clubs.iter().find(|c| league.is_disqualified(c)) {
        return Err(LeagueError::ClubDisqualified {
            club_id: club_id.clone(),
        });
    }
    if division.clubs.len() < min_clubs {
        return Err(LeagueError::InsufficientClubs {
            division_id,
            clubs: division.clubs.len(),
            required: min_clubs,
        });
    }

    let mut draw = division.clubs.clone();
    if let Some(seed) = options.shuffle_seed {
        draw.shuffle(&mut StdRng::seed_from_u64(seed));
    }

    let fixtures: Vec<Fixture> = round_robin_pairings(&draw, options.double_round)
        .into_iter()
        .map(|p| Fixture::new(division_id, p.round, p.home, p.away))
        .collect();

    log::info!(
        "League {}: generated {} fixtures for division {} ({} clubs, {})",
        league.id,
        fixtures.len(),
        division_id,
        draw.len(),
        if options.double_round { "double round robin" } else { "single round robin" }
    );

    league.division_mut(division_id)?.fixtures = fixtures.clone();
    if league.divisions.iter().all(|d| d.has_fixtures()) {
        activate(league);
    }
    Ok(fixtures)
}
