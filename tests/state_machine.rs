//! Integration tests for the league lifecycle and registration guards.

use league_manager::{
    cancel_league, close_registration, complete_league, open_registration, League, LeagueError,
    LeagueSettings, LeagueStatus,
};

#[test]
fn happy_path_transitions() {
    let mut league = League::new("Spring Cup", LeagueSettings::default());
    assert_eq!(league.status, LeagueStatus::Draft);
    open_registration(&mut league).unwrap();
    assert_eq!(league.status, LeagueStatus::Registration);
    assert!(!league.registration_closed);
    close_registration(&mut league).unwrap();
    assert_eq!(league.status, LeagueStatus::RegistrationClosed);
    assert!(league.registration_closed);
}

#[test]
fn closing_registration_is_irreversible() {
    let mut league = League::new("Spring Cup", LeagueSettings::default());
    open_registration(&mut league).unwrap();
    close_registration(&mut league).unwrap();
    assert!(matches!(
        open_registration(&mut league),
        Err(LeagueError::InvalidState { status: LeagueStatus::RegistrationClosed, .. })
    ));
}

#[test]
fn completion_requires_active() {
    let mut league = League::new("Spring Cup", LeagueSettings::default());
    open_registration(&mut league).unwrap();
    close_registration(&mut league).unwrap();
    assert!(complete_league(&mut league).is_err());
    assert_eq!(league.status, LeagueStatus::RegistrationClosed);
}

#[test]
fn any_state_can_be_cancelled_once() {
    let mut league = League::new("Spring Cup", LeagueSettings::default());
    cancel_league(&mut league).unwrap();
    assert_eq!(league.status, LeagueStatus::Cancelled);
    assert!(cancel_league(&mut league).is_err());
    assert!(open_registration(&mut league).is_err());

    let mut league = League::new("Autumn Cup", LeagueSettings::default());
    open_registration(&mut league).unwrap();
    cancel_league(&mut league).unwrap();
    assert_eq!(league.status, LeagueStatus::Cancelled);
}

#[test]
fn transition_table() {
    use LeagueStatus::*;
    assert!(Draft.can_transition_to(Registration));
    assert!(RegistrationClosed.can_transition_to(Active));
    assert!(Completed.can_transition_to(Cancelled));
    assert!(!Registration.can_transition_to(Draft));
    assert!(!Draft.can_transition_to(Active));
    assert!(!Cancelled.can_transition_to(Draft));
    assert!(Completed.is_terminal() && Cancelled.is_terminal());
    assert!(!Active.is_terminal());
}

#[test]
fn invalid_state_error_names_the_operation() {
    let mut league = League::new("Spring Cup", LeagueSettings::default());
    let err = close_registration(&mut league).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Cannot close registration in league {} while it is draft", league.id)
    );
}

#[test]
fn registration_rules() {
    let settings = LeagueSettings {
        max_clubs: Some(3),
        ..LeagueSettings::default()
    };
    let mut league = League::new("Spring Cup", settings);
    let north = league.add_division("North").unwrap();
    let south = league.add_division("South").unwrap();

    assert!(matches!(
        league.register_club(north, "a"),
        Err(LeagueError::InvalidState { .. })
    ));
    open_registration(&mut league).unwrap();

    league.register_club(north, "a").unwrap();
    league.register_club(south, "b").unwrap();
    assert_eq!(
        league.register_club(south, "a"),
        Err(LeagueError::ClubAlreadyRegistered {
            club_id: "a".to_string()
        })
    );
    league.register_club(south, "c").unwrap();
    assert_eq!(
        league.register_club(north, "d"),
        Err(LeagueError::LeagueFull { max_clubs: 3 })
    );

    league.withdraw_club("c").unwrap();
    league.register_club(north, "d").unwrap();
    assert_eq!(league.division(north).unwrap().clubs, vec!["a", "d"]);
    assert_eq!(league.division_of_club("b").map(|d| d.id), Some(south));

    close_registration(&mut league).unwrap();
    assert!(league.withdraw_club("a").is_err());
    assert!(league.add_division("West").is_err());
}
