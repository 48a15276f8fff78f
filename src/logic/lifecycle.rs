//! League state machine: status transitions and the guards other operations use.

use crate::models::{League, LeagueError, LeagueStatus};

impl LeagueStatus {
    /// Whether `self → next` is a legal explicit transition.
    pub fn can_transition_to(self, next: LeagueStatus) -> bool {
        use LeagueStatus::*;
        match (self, next) {
            (Cancelled, _) => false,
            (_, Cancelled) => true,
            (Draft, Registration)
            | (Registration, RegistrationClosed)
            | (RegistrationClosed, Active)
            | (Active, Completed) => true,
            _ => false,
        }
    }

    /// No further transitions except cancellation (or none at all).
    pub fn is_terminal(self) -> bool {
        matches!(self, LeagueStatus::Completed | LeagueStatus::Cancelled)
    }
}

fn transition(
    league: &mut League,
    next: LeagueStatus,
    operation: &'static str,
) -> Result<(), LeagueError> {
    if !league.status.can_transition_to(next) {
        return Err(league.invalid_state(operation));
    }
    log::info!("League {}: {} -> {}", league.id, league.status, next);
    league.status = next;
    Ok(())
}

/// Open registration (Draft -> Registration).
pub fn open_registration(league: &mut League) -> Result<(), LeagueError> {
    transition(league, LeagueStatus::Registration, "open registration")
}

/// Close registration (Registration -> RegistrationClosed). Irreversible.
pub fn close_registration(league: &mut League) -> Result<(), LeagueError> {
    transition(league, LeagueStatus::RegistrationClosed, "close registration")?;
    league.registration_closed = true;
    Ok(())
}

/// Mark the season over (Active -> Completed).
pub fn complete_league(league: &mut League) -> Result<(), LeagueError> {
    transition(league, LeagueStatus::Completed, "complete the league")
}

/// Cancel the league from any state that is not already Cancelled.
pub fn cancel_league(league: &mut League) -> Result<(), LeagueError> {
    transition(league, LeagueStatus::Cancelled, "cancel the league")
}

/// Implicit RegistrationClosed -> Active; no-op in any other status.
pub(crate) fn activate(league: &mut League) {
    if league.status == LeagueStatus::RegistrationClosed {
        log::info!("League {}: season is now active", league.id);
        league.status = LeagueStatus::Active;
    }
}

/// Fail with `InvalidState` unless the league is in one of `allowed`.
pub(crate) fn ensure_status(
    league: &League,
    allowed: &[LeagueStatus],
    operation: &'static str,
) -> Result<(), LeagueError> {
    if allowed.contains(&league.status) {
        Ok(())
    } else {
        Err(league.invalid_state(operation))
    }
}
