//! Game-level metadata types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Side to move or side that moved.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Color {
    White,
    Black,
}

/// Time control of the game: base time plus per-move increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeControl {
    pub base_secs: u32,
    pub increment_secs: u32,
}

/// Where the game record came from.
///
/// Affects nothing in the numeric pipeline; recorded so a report stays
/// traceable to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourcePlatform {
    Lichess,
    ChessCom,
    Unknown,
}

/// Metadata of one analyzed game.
///
/// Every header field is optional: clock-annotated game records in the
/// wild frequently omit any of them. `headers` keeps the raw header
/// mapping for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMeta {
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub round: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>,
    pub time_control: Option<TimeControl>,
    pub platform: SourcePlatform,
    pub headers: BTreeMap<String, String>,
}

impl Default for GameMeta {
    fn default() -> Self {
        Self {
            event: None,
            site: None,
            date: None,
            round: None,
            white: None,
            black: None,
            result: None,
            time_control: None,
            platform: SourcePlatform::Unknown,
            headers: BTreeMap::new(),
        }
    }
}
