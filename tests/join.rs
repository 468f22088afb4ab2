//! Integration tests for the join policy.

use kickhub::{
    initials_of, join, join_match, resolve_candidate_name, JoinError, Match, MatchConfig,
    MatchFormat, MatchSettings, Position, Roster, RosterState,
};

fn five_a_side() -> Roster {
    Roster::new(MatchConfig::new(MatchFormat::FiveVFive))
}

fn roster_with_players(n: usize) -> Roster {
    let mut roster = five_a_side();
    for i in 0..n {
        join(&mut roster, &format!("Guest {i}"), None).unwrap();
    }
    roster
}

#[test]
fn fresh_name_joins_and_grows_roster_by_one() {
    for n in 0..10 {
        let mut roster = roster_with_players(n);
        let player = join(&mut roster, "New Player", None).unwrap();
        assert_eq!(roster.len(), n + 1);
        assert_eq!(player.display_name, "New Player");
        assert_eq!(player.initials, "NP");
        assert_eq!(roster.players().last(), Some(&player));
    }
}

#[test]
fn duplicate_name_is_rejected_and_roster_unchanged() {
    let mut roster = roster_with_players(3);
    join(&mut roster, "Alex Morgan", None).unwrap();
    let before = roster.clone();

    assert_eq!(
        join(&mut roster, "Alex Morgan", None),
        Err(JoinError::DuplicatePlayer("Alex Morgan".into()))
    );
    assert_eq!(roster, before);
}

#[test]
fn duplicate_check_is_case_sensitive_but_trims() {
    let mut roster = five_a_side();
    join(&mut roster, "sam", None).unwrap();
    assert!(join(&mut roster, "Sam", None).is_ok());
    assert!(matches!(
        join(&mut roster, "  sam ", None),
        Err(JoinError::DuplicatePlayer(_))
    ));
}

#[test]
fn full_roster_rejects_any_name() {
    let mut roster = roster_with_players(10);
    assert_eq!(roster.state(), RosterState::Full);
    for name in ["Someone", "Guest 0", "Late Arrival"] {
        let err = join(&mut roster, name, None).unwrap_err();
        // Existing names still hit the duplicate check first.
        if name == "Guest 0" {
            assert!(matches!(err, JoinError::DuplicatePlayer(_)));
        } else {
            assert_eq!(err, JoinError::RosterFull { capacity: 10 });
        }
    }
    assert_eq!(roster.len(), 10);
}

#[test]
fn empty_or_blank_name_is_rejected() {
    let mut roster = five_a_side();
    assert_eq!(join(&mut roster, "", None), Err(JoinError::EmptyName));
    assert_eq!(join(&mut roster, "   \t", None), Err(JoinError::EmptyName));
    assert!(roster.is_empty());
}

#[test]
fn requested_position_taken_is_rejected() {
    let mut roster = five_a_side();
    join(&mut roster, "Keeper One", Some(Position::Goalkeeper)).unwrap();
    let before = roster.clone();
    assert_eq!(
        join(&mut roster, "Keeper Two", Some(Position::Goalkeeper)),
        Err(JoinError::PositionTaken {
            position: Position::Goalkeeper,
            holder: "Keeper One".into()
        })
    );
    assert_eq!(roster, before);

    let p = join(&mut roster, "Striker", Some(Position::Striker)).unwrap();
    assert_eq!(p.position, Some(Position::Striker));
}

#[test]
fn auto_assign_ignores_requested_position() {
    let config = MatchConfig::new(MatchFormat::FiveVFive).with_auto_assign_positions(true);
    let mut roster = Roster::new(config);
    let first = join(&mut roster, "A", Some(Position::Striker)).unwrap();
    let second = join(&mut roster, "B", Some(Position::Striker)).unwrap();
    assert_eq!(first.position, Some(Position::Goalkeeper));
    assert_eq!(second.position, Some(Position::LeftBack));
    for i in 2..7 {
        join(&mut roster, &format!("P{i}"), None).unwrap();
    }
    // Sixth player starts the second side's layout again.
    assert_eq!(roster.players()[5].position, Some(Position::Goalkeeper));
}

#[test]
fn ninth_then_tenth_join_fills_roster_and_split_succeeds() {
    let mut roster = roster_with_players(9);
    assert_eq!(roster.state(), RosterState::Open);
    assert_eq!(roster.remaining_slots(), 1);

    join(&mut roster, "Tenth Player", None).unwrap();
    assert_eq!(roster.state(), RosterState::Full);
    assert!(roster.is_full());
    assert_eq!(roster.remaining_slots(), 0);
    assert!(kickhub::split(&roster).is_ok());
}

#[test]
fn initials_normalize_irregular_whitespace() {
    let mut roster = five_a_side();
    let p = join(&mut roster, "Jo   Smith", None).unwrap();
    assert_eq!(p.initials, "JS");
    assert_eq!(initials_of("  mary  ann   o'neil "), "MAO");
    assert_eq!(initials_of("Zoë"), "Z");
}

#[test]
fn join_preserves_join_order() {
    let roster = roster_with_players(4);
    let names: Vec<_> = roster.players().iter().map(|p| p.display_name.as_str()).collect();
    assert_eq!(names, ["Guest 0", "Guest 1", "Guest 2", "Guest 3"]);
}

#[test]
fn join_match_draws_teams_when_last_slot_filled() {
    let settings = MatchSettings {
        location: "Pitch 3".into(),
        kickoff: chrono::Utc::now(),
        owner_name: "Owner".into(),
    };
    let config = MatchConfig::new(MatchFormat::FiveVFive).with_capacity(4).unwrap();
    let mut game = Match::new(settings, config);
    for i in 0..3 {
        join_match(&mut game, &format!("P{i}"), None).unwrap();
        assert!(game.teams.is_none());
    }
    join_match(&mut game, "P3", None).unwrap();
    let teams = game.teams.as_ref().unwrap();
    assert_eq!(teams.team_a.len(), 2);
    assert_eq!(teams.team_b.len(), 2);
}

#[test]
fn signed_in_name_wins_over_guest_name() {
    assert_eq!(
        resolve_candidate_name(Some("Signed In"), Some("Guest")),
        Some("Signed In".into())
    );
    assert_eq!(resolve_candidate_name(Some("  "), Some(" Guest ")), Some("Guest".into()));
    assert_eq!(resolve_candidate_name(None, Some("")), None);
    assert_eq!(resolve_candidate_name(None, None), None);
}

#[test]
fn requested_position_outside_format_is_rejected() {
    let mut roster = Roster::new(MatchConfig::new(MatchFormat::SixVSix));
    assert_eq!(
        join(&mut roster, "Winger", Some(Position::RightWing)),
        Err(JoinError::PositionNotInFormat {
            position: Position::RightWing,
            format: MatchFormat::SixVSix
        })
    );
    assert!(roster.is_empty());
    assert!(join(&mut roster, "Winger", Some(Position::LeftWing)).is_ok());
}
