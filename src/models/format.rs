//! Match formats, pitch positions and the per-format pitch layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of the match. Decides the default roster capacity and pitch layout.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum MatchFormat {
    #[default]
    #[serde(rename = "5v5")]
    FiveVFive,
    #[serde(rename = "6v6")]
    SixVSix,
    #[serde(rename = "11v11")]
    ElevenVEleven,
}

impl MatchFormat {
    pub const ALL: [MatchFormat; 3] = [
        MatchFormat::FiveVFive,
        MatchFormat::SixVSix,
        MatchFormat::ElevenVEleven,
    ];

    /// Players per side.
    pub fn team_size(self) -> usize {
        match self {
            MatchFormat::FiveVFive => 5,
            MatchFormat::SixVSix => 6,
            MatchFormat::ElevenVEleven => 11,
        }
    }

    /// Roster capacity when none is given explicitly (both sides).
    pub fn default_capacity(self) -> usize {
        self.team_size() * 2
    }

    /// Slots for one side, in the order auto-assignment fills them.
    fn half_layout(self) -> &'static [(Position, u8, u8)] {
        use Position::*;
        match self {
            MatchFormat::FiveVFive => &[
                (Goalkeeper, 50, 90),
                (LeftBack, 20, 80),
                (RightBack, 80, 80),
                (CenterMid, 50, 70),
                (Striker, 50, 55),
            ],
            MatchFormat::SixVSix => &[
                (Goalkeeper, 50, 90),
                (LeftBack, 20, 80),
                (RightBack, 80, 80),
                (CenterMid, 50, 70),
                (LeftWing, 40, 55),
                (Striker, 60, 55),
            ],
            // 4-4-2
            MatchFormat::ElevenVEleven => &[
                (Goalkeeper, 50, 92),
                (LeftBack, 15, 78),
                (CenterBack, 38, 80),
                (CenterBack, 62, 80),
                (RightBack, 85, 78),
                (LeftWing, 15, 65),
                (CenterMid, 38, 66),
                (CenterMid, 62, 66),
                (RightWing, 85, 65),
                (Striker, 40, 55),
                (Striker, 60, 55),
            ],
        }
    }

    /// Full pitch layout: near side first, then the far side mirrored.
    pub fn layout(self) -> Vec<PitchSlot> {
        let half = self.half_layout();
        let near = half.iter().map(|&(position, x, y)| PitchSlot { position, x, y });
        let far = half.iter().map(|&(position, x, y)| PitchSlot {
            position,
            x: 100 - x,
            y: 100 - y,
        });
        near.chain(far).collect()
    }

    /// Whether the pitch layout has a slot for `position`.
    pub fn has_position(self, position: Position) -> bool {
        self.half_layout().iter().any(|&(p, _, _)| p == position)
    }

    /// Position handed to the `index`-th player when positions are auto-assigned.
    pub fn auto_position(self, index: usize) -> Position {
        let half = self.half_layout();
        half[index % half.len()].0
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchFormat::FiveVFive => "5v5",
            MatchFormat::SixVSix => "6v6",
            MatchFormat::ElevenVEleven => "11v11",
        };
        f.write_str(s)
    }
}

/// A place on the pitch a player can occupy.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "gk")]
    Goalkeeper,
    #[serde(rename = "lb")]
    LeftBack,
    #[serde(rename = "cb")]
    CenterBack,
    #[serde(rename = "rb")]
    RightBack,
    #[serde(rename = "cdm")]
    DefensiveMid,
    #[serde(rename = "cm")]
    CenterMid,
    #[serde(rename = "cam")]
    AttackingMid,
    #[serde(rename = "lw")]
    LeftWing,
    #[serde(rename = "rw")]
    RightWing,
    #[serde(rename = "st")]
    Striker,
}

impl Position {
    /// Short id as stored and sent over the wire (e.g. "gk").
    pub fn id(self) -> &'static str {
        match self {
            Position::Goalkeeper => "gk",
            Position::LeftBack => "lb",
            Position::CenterBack => "cb",
            Position::RightBack => "rb",
            Position::DefensiveMid => "cdm",
            Position::CenterMid => "cm",
            Position::AttackingMid => "cam",
            Position::LeftWing => "lw",
            Position::RightWing => "rw",
            Position::Striker => "st",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a position id does not name a known position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownPosition(pub String);

impl fmt::Display for UnknownPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown position '{}'", self.0)
    }
}

impl std::error::Error for UnknownPosition {}

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let position = match s.trim().to_ascii_lowercase().as_str() {
            "gk" => Position::Goalkeeper,
            "lb" => Position::LeftBack,
            "cb" => Position::CenterBack,
            "rb" => Position::RightBack,
            "cdm" => Position::DefensiveMid,
            "cm" => Position::CenterMid,
            "cam" => Position::AttackingMid,
            "lw" => Position::LeftWing,
            "rw" => Position::RightWing,
            "st" => Position::Striker,
            _ => return Err(UnknownPosition(s.to_string())),
        };
        Ok(position)
    }
}

/// One marker on the pitch diagram. `x`/`y` are percentages of the pitch.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PitchSlot {
    pub position: Position,
    pub x: u8,
    pub y: u8,
}
