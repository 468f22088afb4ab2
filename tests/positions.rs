//! Integration tests for position assignment.

use kickhub::{
    assign_match_position, assign_position, join, join_match, AssignError, Match, MatchConfig,
    MatchFormat, MatchSettings, Position, Roster,
};

fn roster(auto: bool) -> Roster {
    let mut roster = Roster::new(
        MatchConfig::new(MatchFormat::FiveVFive).with_auto_assign_positions(auto),
    );
    join(&mut roster, "A", None).unwrap();
    join(&mut roster, "B", None).unwrap();
    roster
}

#[test]
fn second_player_cannot_take_held_position() {
    let mut r = roster(false);
    assign_position(&mut r, "A", Position::Goalkeeper).unwrap();
    assert_eq!(
        assign_position(&mut r, "B", Position::Goalkeeper),
        Err(AssignError::PositionTaken {
            position: Position::Goalkeeper,
            holder: "A".into()
        })
    );
    assert_eq!(r.player("B").unwrap().position, None);
}

#[test]
fn position_ids_parse_from_wire_strings() {
    let mut r = roster(false);
    let gk: Position = "gk".parse().unwrap();
    assign_position(&mut r, "A", gk).unwrap();
    assert!(matches!(
        assign_position(&mut r, "B", "GK".parse().unwrap()),
        Err(AssignError::PositionTaken { .. })
    ));
    assert!("sweeper".parse::<Position>().is_err());
}

#[test]
fn unknown_player_is_rejected() {
    let mut r = roster(false);
    let before = r.clone();
    assert_eq!(
        assign_position(&mut r, "Nobody", Position::Striker),
        Err(AssignError::UnknownPlayer("Nobody".into()))
    );
    assert_eq!(r, before);
}

#[test]
fn player_can_move_and_frees_old_position() {
    let mut r = roster(false);
    assign_position(&mut r, "A", Position::Goalkeeper).unwrap();
    assign_position(&mut r, "A", Position::Goalkeeper).unwrap();
    assign_position(&mut r, "A", Position::Striker).unwrap();
    assign_position(&mut r, "B", Position::Goalkeeper).unwrap();
    assert_eq!(r.position_holder(Position::Goalkeeper).unwrap().display_name, "B");
    assert_eq!(r.position_holder(Position::Striker).unwrap().display_name, "A");
}

#[test]
fn auto_assign_skips_uniqueness() {
    let mut r = roster(true);
    assign_position(&mut r, "A", Position::CenterMid).unwrap();
    assign_position(&mut r, "B", Position::CenterMid).unwrap();
    assert_eq!(r.player("A").unwrap().position, Some(Position::CenterMid));
    assert_eq!(r.player("B").unwrap().position, Some(Position::CenterMid));
    assert!(matches!(
        assign_position(&mut r, "C", Position::CenterMid),
        Err(AssignError::UnknownPlayer(_))
    ));
}

#[test]
fn match_assignment_updates_drawn_teams() {
    let settings = MatchSettings {
        location: "Astro".into(),
        kickoff: chrono::Utc::now(),
        owner_name: "Owner".into(),
    };
    let config = MatchConfig::new(MatchFormat::SixVSix).with_capacity(2).unwrap();
    let mut game = Match::new(settings, config);
    join_match(&mut game, "A", None).unwrap();
    join_match(&mut game, "B", None).unwrap();
    assign_match_position(&mut game, "B", Position::Striker).unwrap();

    let teams = game.teams.as_ref().unwrap();
    let b = teams
        .team_a
        .iter()
        .chain(&teams.team_b)
        .find(|p| p.display_name == "B")
        .unwrap();
    assert_eq!(b.position, Some(Position::Striker));
}

#[test]
fn position_missing_from_format_layout_is_rejected() {
    let mut r = roster(false);
    assert!(!MatchFormat::FiveVFive.has_position(Position::DefensiveMid));
    assert_eq!(
        assign_position(&mut r, "A", Position::DefensiveMid),
        Err(AssignError::PositionNotInFormat {
            position: Position::DefensiveMid,
            format: MatchFormat::FiveVFive
        })
    );
    assert_eq!(r.player("A").unwrap().position, None);

    // Cosmetic positions are not checked against the layout.
    let mut auto = roster(true);
    assign_position(&mut auto, "A", Position::DefensiveMid).unwrap();
}
