//! Standings: a pure projection of a division's fixture list.

use crate::models::{
    ClubDirectory, Division, DivisionId, Fixture, League, LeagueError, PointsSystem,
    StandingsEntry,
};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Compute the ordered table for a division.
///
/// Only clubs currently registered in the division appear; every one of them gets a row even
/// with nothing played. Only completed fixtures count, and only for registered clubs, so an
/// opponent's result against a removed club still stands.
///
/// Order: points, goal difference, goals for (all descending), then head-to-head when exactly
/// two clubs are level, then club name and id ascending.
pub fn calculate_standings(
    division: &Division,
    points: PointsSystem,
    directory: &dyn ClubDirectory,
) -> Vec<StandingsEntry> {
    let mut rows: HashMap<&str, StandingsEntry> = division
        .clubs
        .iter()
        .map(|c| (c.as_str(), StandingsEntry::new(c.clone(), directory.display_name(c))))
        .collect();

    for fixture in &division.fixtures {
        let Some(result) = fixture.completed_result() else {
            continue;
        };
        let (home_points, away_points) = match result.home_goals.cmp(&result.away_goals) {
            Ordering::Greater => (points.win, points.loss),
            Ordering::Equal => (points.draw, points.draw),
            Ordering::Less => (points.loss, points.win),
        };
        if let Some(row) = rows.get_mut(fixture.home_club_id.as_str()) {
            row.record(result.home_goals, result.away_goals, home_points);
        }
        if let Some(row) = rows.get_mut(fixture.away_club_id.as_str()) {
            row.record(result.away_goals, result.home_goals, away_points);
        }
    }

    let mut table: Vec<StandingsEntry> = rows.into_values().collect();
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.club_name.cmp(&b.club_name))
            .then_with(|| a.club_id.cmp(&b.club_id))
    });
    apply_head_to_head(&mut table, &division.fixtures, points);

    log::debug!("Division {}: standings recomputed for {} clubs", division.id, table.len());
    table
}

/// Standings for a division of the league, using the league's points system.
pub fn calculate_division_standings(
    league: &League,
    division_id: DivisionId,
    directory: &dyn ClubDirectory,
) -> Result<Vec<StandingsEntry>, LeagueError> {
    let division = league.division(division_id)?;
    Ok(calculate_standings(
        division,
        league.settings.points_system,
        directory,
    ))
}

fn level(a: &StandingsEntry, b: &StandingsEntry) -> bool {
    a.points == b.points && a.goal_difference == b.goal_difference && a.goals_for == b.goals_for
}

/// Reorder two-club ties by the points each took from their meetings. Ties of three or more,
/// and pairs that drew or never met, keep the name order.
fn apply_head_to_head(table: &mut [StandingsEntry], fixtures: &[Fixture], points: PointsSystem) {
    let mut start = 0;
    while start < table.len() {
        let mut end = start + 1;
        while end < table.len() && level(&table[start], &table[end]) {
            end += 1;
        }
        if end - start == 2 {
            let first = &table[start].club_id;
            let second = &table[start + 1].club_id;
            if head_to_head_points(fixtures, second, first, points)
                > head_to_head_points(fixtures, first, second, points)
            {
                table.swap(start, start + 1);
            }
        }
        start = end;
    }
}

/// Points `club` earned in completed fixtures against `opponent`.
fn head_to_head_points(fixtures: &[Fixture], club: &str, opponent: &str, points: PointsSystem) -> u64 {
    fixtures
        .iter()
        .filter(|f| f.opponent_of(club).is_some_and(|o| o == opponent))
        .filter_map(|f| {
            let result = f.completed_result()?;
            let (scored, conceded) = if f.home_club_id == club {
                (result.home_goals, result.away_goals)
            } else {
                (result.away_goals, result.home_goals)
            };
            Some(u64::from(match scored.cmp(&conceded) {
                Ordering::Greater => points.win,
                Ordering::Equal => points.draw,
                Ordering::Less => points.loss,
            }))
        })
        .fold(0, u64::saturating_add)
}
