//! Stepline Timeline - replayable track/step recording.
//!
//! Two independent but index-aligned timelines make up one session:
//!
//! - **Tracks** drive what is shown: visual segments anchored to source
//!   positions with a bounded `begin`/`end` lifetime on the track counter.
//! - **Steps** drive what state changes: plain-data deferred mutations
//!   that, replayed in key order, reconstruct the live binding state
//!   against a mirror environment.
//!
//! Keeping them separate lets a renderer scrub visually (tracks) ahead of
//! committing state changes (steps).

mod position;
mod recorder;
mod step;
mod track;

pub use position::{offsets_to_positions, position_at, Position};
pub use recorder::Recorder;
pub use step::{Step, StepAction};
pub use track::{Effect, EffectKind, Track};
