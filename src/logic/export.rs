//! CSV export of a computed table.

use crate::models::{LeagueError, StandingsEntry};

const HEADER: [&str; 11] = [
    "position",
    "club_id",
    "club",
    "played",
    "won",
    "drawn",
    "lost",
    "goals_for",
    "goals_against",
    "goal_difference",
    "points",
];

/// Render standings as CSV with a header row and a 1-based position column.
pub fn standings_to_csv(entries: &[StandingsEntry]) -> Result<String, LeagueError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER).map_err(export_error)?;
    for (i, e) in entries.iter().enumerate() {
        writer
            .write_record([
                (i + 1).to_string(),
                e.club_id.clone(),
                e.club_name.clone(),
                e.played.to_string(),
                e.won.to_string(),
                e.drawn.to_string(),
                e.lost.to_string(),
                e.goals_for.to_string(),
                e.goals_against.to_string(),
                e.goal_difference.to_string(),
                e.points.to_string(),
            ])
            .map_err(export_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| LeagueError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| LeagueError::Export(e.to_string()))
}

fn export_error(e: csv::Error) -> LeagueError {
    LeagueError::Export(e.to_string())
}
