use std::collections::BTreeMap;

use crate::config::GestureConfig;
use crate::error::PointerError;
use crate::pointer::signals::{Notification, Signals};
use crate::pointer::{Pointer, PointerId, PointerOutput, PositionSample};

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerInputKind {
    Start,
    Move,
    End,
    Cancel,
}

/// Normalized input event. `target` is only read for `Start`.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInput<T> {
    pub kind: PointerInputKind,
    pub identifier: PointerId,
    pub x: f64,
    pub y: f64,
    pub t_ms: u64,
    pub target: T,
}

impl<T> PointerInput<T> {
    pub fn new(
        kind: PointerInputKind,
        identifier: PointerId,
        x: f64,
        y: f64,
        t_ms: u64,
        target: T,
    ) -> Self {
        Self {
            kind,
            identifier,
            x,
            y,
            t_ms,
            target,
        }
    }
}

/// Routes normalized input to one session per live identifier.
///
/// Sessions are dropped once `released` has been dispatched. Notifications
/// reach the session's own subscribers first, then the tracker-wide ones.
/// `pressed` fires while the session is created, before it can be reached
/// through [`PointerTracker::pointer_mut`], so only tracker-wide subscribers
/// observe it.
pub struct PointerTracker<T> {
    config: GestureConfig,
    pointers: BTreeMap<PointerId, Pointer<T>>,
    signals: Signals<T>,
}

impl<T> PointerTracker<T> {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pointers: BTreeMap::new(),
            signals: Signals::new(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn signals_mut(&mut self) -> &mut Signals<T> {
        &mut self.signals
    }

    pub fn pointer(&self, identifier: PointerId) -> Option<&Pointer<T>> {
        self.pointers.get(&identifier)
    }

    pub fn pointer_mut(&mut self, identifier: PointerId) -> Option<&mut Pointer<T>> {
        self.pointers.get_mut(&identifier)
    }

    pub fn active_count(&self) -> usize {
        self.pointers.len()
    }

    /// Earliest pending long-press deadline across live sessions.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pointers
            .values()
            .filter_map(Pointer::long_press_deadline_ms)
            .min()
    }

    /// Malformed samples are rejected without touching any session. Events
    /// for unknown identifiers are no-ops.
    pub fn handle(&mut self, input: PointerInput<T>) -> Result<PointerOutput, PointerError> {
        let identifier = input.identifier;
        let sample = PositionSample::new(input.x, input.y, input.t_ms).map_err(|source| {
            tracing::warn!(pointer = identifier, %source, "dropping malformed sample");
            PointerError::MalformedSample { identifier, source }
        })?;

        if input.kind == PointerInputKind::Start {
            return Ok(self.start(identifier, sample, input.target));
        }

        let Some(pointer) = self.pointers.get_mut(&identifier) else {
            tracing::debug!(pointer = identifier, kind = ?input.kind, "event for unknown pointer ignored");
            return Ok(PointerOutput::default());
        };

        let output = match input.kind {
            PointerInputKind::Move => pointer.move_to(sample),
            PointerInputKind::End => pointer.end(sample),
            PointerInputKind::Cancel => pointer.cancel(sample),
            PointerInputKind::Start => PointerOutput::default(),
        };
        Self::publish(&mut self.signals, pointer, output);

        if pointer.is_released() {
            self.pointers.remove(&identifier);
            tracing::debug!(pointer = identifier, "pointer disposed");
        }
        Ok(output)
    }

    /// Fires every long-press deadline due at `now_ms`.
    pub fn advance_time(&mut self, now_ms: u64) -> Vec<(PointerId, PointerOutput)> {
        let mut fired = Vec::new();
        for (identifier, pointer) in &mut self.pointers {
            let output = pointer.advance_time(now_ms);
            if output.is_empty() {
                continue;
            }
            Self::publish(&mut self.signals, pointer, output);
            fired.push((*identifier, output));
        }
        fired
    }

    fn start(&mut self, identifier: PointerId, sample: PositionSample, target: T) -> PointerOutput {
        if self.pointers.contains_key(&identifier) {
            tracing::debug!(pointer = identifier, "start for live pointer ignored");
            return PointerOutput::default();
        }
        let mut pointer = Pointer::new(identifier, sample, target, self.config);
        let output = pointer.press();
        Self::publish(&mut self.signals, &pointer, output);
        self.pointers.insert(identifier, pointer);
        output
    }

    fn publish(signals: &mut Signals<T>, pointer: &Pointer<T>, output: PointerOutput) {
        for snapshot in output.snapshots() {
            signals.dispatch(&Notification::new(snapshot, pointer.target()));
        }
    }
}
