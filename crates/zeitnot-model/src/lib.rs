//! Data model for the Zeitnot time-management analysis engine.
//!
//! This crate defines the serializable types flowing through an analysis
//! run:
//!
//! - [`game`]: game-level metadata (players, result, time control, source
//!   platform)
//! - [`ply`]: per-ply inputs produced by external collaborators (the move
//!   record with clock annotations, and the engine summary for the
//!   position before the move)
//! - [`report`]: per-ply and per-game analysis outputs (move metrics,
//!   behavioral labels, phase tags, the game summary)
//!
//! All types serialize to a self-describing JSON shape via `serde`, so a
//! report can be persisted and re-displayed later without recomputation.
//! None of the types are mutated after construction; an analysis run
//! produces a fresh, independent [`report::GameAnalysis`].

pub use self::{game::*, ply::*, report::*};

pub mod game;
pub mod ply;
pub mod report;
