//! Track records: visual timeline segments.
//!
//! A track ties one visual effect to a source span and a `begin`/`end`
//! index pair on the global track counter. Tracks are created open
//! (`end == 0`) and closed to the counter's value when the enclosing
//! statement completes, which bounds every sub-expression's visual
//! lifetime by its statement's span.

use serde::Serialize;

use stepline_runtime::Value;

use crate::position::Position;

/// Visual effect class of a track.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// A value surfacing at its source span.
    Appear,
    /// A value flowing from one span to another (assignment flow).
    Move,
    /// An operator producing a result.
    Compute,
    /// An object literal region or one of its property rows.
    Block,
}

impl EffectKind {
    /// Lowercase name, used as the track key prefix.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Appear => "appear",
            Self::Move => "move",
            Self::Compute => "compute",
            Self::Block => "block",
        }
    }
}

/// What a track shows and where.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Effect {
    /// Display value. May differ from the runtime value (booleans in
    /// compute tracks are normalized to `"true"`/`"false"` strings).
    pub value: Value,
    pub kind: EffectKind,
    /// `typeof` string of the display value.
    pub value_type: &'static str,
    pub startpos: Position,
    pub endpos: Position,
    /// Renderer identity: `"<kind>-<keyIndex>"`.
    pub key: String,
}

/// A recorded timeline segment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Track {
    /// Track counter value at creation; globally unique and strictly
    /// increasing in creation order.
    pub begin: u32,
    /// `Track::OPEN` until closed; then the counter value at the enclosing
    /// statement's completion. Invariant: `end == OPEN || end >= begin`.
    pub end: u32,
    pub effect: Effect,
}

impl Track {
    /// Sentinel for a not-yet-closed track.
    pub const OPEN: u32 = 0;

    /// Whether this track has not been closed yet.
    pub const fn is_open(&self) -> bool {
        self.end == Self::OPEN
    }
}
