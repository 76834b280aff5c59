use statig::prelude::*;

use super::history::PositionHistory;
use super::policy::{ClassificationPolicy, MovementVerdict};
use super::timer::LongPressTimer;
use super::types::{
    Channel, Direction, Movement, PointerId, PointerOutput, PointerState, PositionSample,
    SessionSnapshot,
};

mod core;

#[derive(Clone, Copy, Debug)]
pub(super) enum PointerSignal {
    Pressed { now_ms: u64 },
    Tick { now_ms: u64 },
    Dragged(PositionSample),
    Ended(PositionSample),
    Cancelled(PositionSample),
}

#[derive(Clone, Copy, Debug, Default)]
pub(super) struct DispatchContext {
    snapshots: [Option<SessionSnapshot>; 3],
}

impl DispatchContext {
    fn emit(&mut self, snapshot: SessionSnapshot) {
        for slot in &mut self.snapshots {
            if slot.is_none() {
                *slot = Some(snapshot);
                return;
            }
        }
    }

    pub(super) fn finish(self) -> PointerOutput {
        PointerOutput {
            snapshots: self.snapshots,
        }
    }
}

pub(super) struct PointerHsm {
    pub(super) identifier: PointerId,
    pub(super) state: PointerState,
    pub(super) is_tipping: bool,
    pub(super) history: PositionHistory,
    pub(super) absolute_movement: Movement,
    pub(super) relative_movement: Movement,
    pub(super) direction: Direction,
    pub(super) swipe_start_index: usize,
    pub(super) timer: LongPressTimer,
    policy: ClassificationPolicy,
}

#[state_machine(initial = "State::start()")]
impl PointerHsm {
    #[state]
    fn start(&mut self, context: &mut DispatchContext, event: &PointerSignal) -> Outcome<State> {
        match event {
            PointerSignal::Pressed { now_ms } => {
                self.timer
                    .start(*now_ms, self.policy.config().tap_max_duration_ms);
                self.enter(PointerState::Pressing);
                self.notify(context, Channel::Pressed, *now_ms);
                Transition(State::pressing())
            }
            _ => Handled,
        }
    }

    #[state]
    fn pressing(&mut self, context: &mut DispatchContext, event: &PointerSignal) -> Outcome<State> {
        match event {
            PointerSignal::Tick { now_ms } => {
                let Some(deadline_ms) = self.timer.poll(*now_ms) else {
                    return Handled;
                };
                self.is_tipping = true;
                self.enter(PointerState::Tipping);
                self.notify(context, Channel::Tipped, deadline_ms);
                Transition(State::tipping())
            }
            PointerSignal::Dragged(sample) => {
                self.record_move(*sample);
                self.dragged_transition(context, sample.t_ms())
            }
            PointerSignal::Ended(sample) | PointerSignal::Cancelled(sample) => {
                self.history.push(*sample);
                self.timer.cancel();
                self.enter(PointerState::End);
                self.notify(context, Channel::Tapped, sample.t_ms());
                self.notify(context, Channel::Released, sample.t_ms());
                Transition(State::end())
            }
            PointerSignal::Pressed { .. } => Handled,
        }
    }

    #[state]
    fn tipping(&mut self, context: &mut DispatchContext, event: &PointerSignal) -> Outcome<State> {
        match event {
            PointerSignal::Dragged(sample) => {
                self.record_move(*sample);
                self.dragged_transition(context, sample.t_ms())
            }
            PointerSignal::Ended(sample) | PointerSignal::Cancelled(sample) => {
                self.history.push(*sample);
                self.enter(PointerState::End);
                self.notify(context, Channel::Untipped, sample.t_ms());
                self.notify(context, Channel::Released, sample.t_ms());
                Transition(State::end())
            }
            PointerSignal::Pressed { .. } | PointerSignal::Tick { .. } => Handled,
        }
    }

    #[state]
    fn dragging(&mut self, context: &mut DispatchContext, event: &PointerSignal) -> Outcome<State> {
        match event {
            PointerSignal::Dragged(sample) => {
                self.record_move(*sample);
                self.notify(context, Channel::Dragged, sample.t_ms());
                Handled
            }
            PointerSignal::Ended(sample) | PointerSignal::Cancelled(sample) => {
                self.history.push(*sample);
                self.release(context, Channel::DragStopped, sample.t_ms())
            }
            PointerSignal::Pressed { .. } | PointerSignal::Tick { .. } => Handled,
        }
    }

    #[state]
    fn swiping(&mut self, context: &mut DispatchContext, event: &PointerSignal) -> Outcome<State> {
        match event {
            PointerSignal::Dragged(sample) => {
                self.record_move(*sample);
                if self
                    .policy
                    .is_swipe_still_valid(&self.history, self.swipe_start_index)
                {
                    return Handled;
                }
                self.start_drag(context, sample.t_ms())
            }
            PointerSignal::Ended(sample) | PointerSignal::Cancelled(sample) => {
                self.history.push(*sample);
                self.release(context, Channel::Swiped, sample.t_ms())
            }
            PointerSignal::Pressed { .. } | PointerSignal::Tick { .. } => Handled,
        }
    }

    #[state]
    fn end(&mut self, context: &mut DispatchContext, event: &PointerSignal) -> Outcome<State> {
        let _ = context;
        tracing::debug!(pointer = self.identifier, ?event, "signal after release ignored");
        Handled
    }
}

impl PointerHsm {
    /// Shared by `pressing` and `tipping`: filter jitter, then decide between
    /// a swipe candidate and a drag.
    fn dragged_transition(&mut self, context: &mut DispatchContext, now_ms: u64) -> Outcome<State> {
        if self.policy.is_uncontrolled_move(&self.absolute_movement) {
            tracing::trace!(
                pointer = self.identifier,
                dx = self.absolute_movement.dx,
                dy = self.absolute_movement.dy,
                "uncontrolled move filtered"
            );
            return Handled;
        }

        self.timer.cancel();

        match self.policy.classify_movement(&self.relative_movement) {
            MovementVerdict::Swipe(direction) => {
                self.direction = direction;
                self.swipe_start_index = self.history.last_index();
                self.enter(PointerState::Swiping);
                Transition(State::swiping())
            }
            MovementVerdict::Drag => self.start_drag(context, now_ms),
        }
    }

    fn start_drag(&mut self, context: &mut DispatchContext, now_ms: u64) -> Outcome<State> {
        self.enter(PointerState::Dragging);
        self.notify(context, Channel::DragStarted, now_ms);
        self.notify(context, Channel::Dragged, now_ms);
        Transition(State::dragging())
    }

    /// `outcome` is `drag_stopped` or `swiped`; `untipped` follows when the
    /// press had tipped first.
    fn release(
        &mut self,
        context: &mut DispatchContext,
        outcome: Channel,
        now_ms: u64,
    ) -> Outcome<State> {
        self.enter(PointerState::End);
        self.notify(context, outcome, now_ms);
        if self.is_tipping {
            self.notify(context, Channel::Untipped, now_ms);
        }
        self.notify(context, Channel::Released, now_ms);
        Transition(State::end())
    }
}
