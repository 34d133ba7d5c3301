//! The timeline recorder: counters plus commit buffers.
//!
//! One recorder exists per interpretation session and owns the three
//! monotonic counters (track index, key index, step index). Handlers build
//! tracks/steps into local buffers, close the open tracks at statement
//! completion, and commit the buffers here in program order. Threading the
//! recorder through every handler call keeps sessions independent; nothing
//! is process-global.

use stepline_runtime::Value;

use crate::position::Position;
use crate::step::{Step, StepAction};
use crate::track::{Effect, EffectKind, Track};

/// Session-scoped track/step recorder.
#[derive(Debug, Default)]
pub struct Recorder {
    track_counter: u32,
    key_counter: u32,
    step_counter: u32,
    tracks: Vec<Track>,
    steps: Vec<Step>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all counters and clear the committed buffers.
    ///
    /// Invoked once, at the root `Program` node: this is the single entry
    /// point establishing one interpretation session.
    pub fn reset(&mut self) {
        self.track_counter = 0;
        self.key_counter = 0;
        self.step_counter = 0;
        self.tracks.clear();
        self.steps.clear();
    }

    /// Current track counter value, used as the closing index.
    pub fn track_counter(&self) -> u32 {
        self.track_counter
    }

    /// Allocate an open track at the next track index.
    ///
    /// The caller owns the returned track until it commits the buffer the
    /// track was pushed into.
    pub fn begin_track(
        &mut self,
        value: Value,
        kind: EffectKind,
        startpos: Position,
        endpos: Position,
    ) -> Track {
        let begin = self.track_counter;
        self.track_counter += 1;
        let key = format!("{}-{}", kind.as_str(), self.key_counter);
        self.key_counter += 1;
        Track {
            begin,
            end: Track::OPEN,
            effect: Effect {
                value_type: value.type_of(),
                value,
                kind,
                startpos,
                endpos,
                key,
            },
        }
    }

    /// Close every open track in `tracks` to the current track counter.
    pub fn close_open(&self, tracks: &mut [Track]) {
        for track in tracks.iter_mut().filter(|t| t.is_open()) {
            track.end = self.track_counter;
        }
    }

    /// Allocate a step at the next step index.
    pub fn record_step(&mut self, action: StepAction) -> Step {
        let key = self.step_counter;
        self.step_counter += 1;
        Step { key, action }
    }

    /// Append a statement's finished buffers to the session timeline.
    pub fn commit(&mut self, tracks: Vec<Track>, steps: Vec<Step>) {
        self.tracks.extend(tracks);
        self.steps.extend(steps);
    }

    /// Consume the recorder, yielding the session's ordered timelines.
    pub fn finish(self) -> (Vec<Track>, Vec<Step>) {
        (self.tracks, self.steps)
    }
}
