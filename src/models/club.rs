//! Club references. Clubs are owned by the surrounding application; the league only keeps ids.

use std::collections::HashMap;
use std::sync::RwLock;

/// Identifier of a club record held by the surrounding application.
pub type ClubId = String;

/// Resolves club ids to display names (used for the final standings tiebreak).
pub trait ClubDirectory {
    fn club_name(&self, club_id: &str) -> Option<String>;

    /// Name, or the id itself when the club is unknown.
    fn display_name(&self, club_id: &str) -> String {
        self.club_name(club_id).unwrap_or_else(|| club_id.to_string())
    }
}

impl ClubDirectory for HashMap<ClubId, String> {
    fn club_name(&self, club_id: &str) -> Option<String> {
        self.get(club_id).cloned()
    }
}

impl<D: ClubDirectory> ClubDirectory for RwLock<D> {
    fn club_name(&self, club_id: &str) -> Option<String> {
        self.read().ok().and_then(|d| d.club_name(club_id))
    }
}
