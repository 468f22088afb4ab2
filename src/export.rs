//! Team sheet export as CSV.

use crate::models::{Match, Player, Side};
use serde::Serialize;

#[derive(Serialize)]
struct SheetRow<'a> {
    team: &'a str,
    name: &'a str,
    initials: &'a str,
    position: &'a str,
}

impl<'a> SheetRow<'a> {
    fn new(team: &'a str, player: &'a Player) -> Self {
        Self {
            team,
            name: &player.display_name,
            initials: &player.initials,
            position: player.position.map(|p| p.id()).unwrap_or(""),
        }
    }
}

/// One row per player: `team,name,initials,position`.
///
/// Before teams are drawn every player is listed under "Unassigned" in join order.
pub fn team_sheet_csv(game: &Match) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    match &game.teams {
        Some(teams) => {
            for side in [Side::A, Side::B] {
                for player in teams.team(side) {
                    wtr.serialize(SheetRow::new(side.label(), player))?;
                }
            }
        }
        None => {
            for player in game.roster.players() {
                wtr.serialize(SheetRow::new("Unassigned", player))?;
            }
        }
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}
