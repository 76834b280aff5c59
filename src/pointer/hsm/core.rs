use super::*;

impl PointerHsm {
    pub(in crate::pointer) fn new(
        identifier: PointerId,
        first: PositionSample,
        policy: ClassificationPolicy,
    ) -> Self {
        Self {
            identifier,
            state: PointerState::Start,
            is_tipping: false,
            history: PositionHistory::new(first),
            absolute_movement: Movement::default(),
            relative_movement: Movement::default(),
            direction: Direction::NONE,
            swipe_start_index: 0,
            timer: LongPressTimer::new(),
            policy,
        }
    }

    pub(super) fn record_move(&mut self, sample: PositionSample) {
        self.history.push(sample);
        self.absolute_movement = self.history.absolute_movement();
        self.relative_movement = self.history.relative_movement();
    }

    /// Records the new state. Notifications of the transition are emitted
    /// afterwards so their snapshots carry the state being entered.
    pub(super) fn enter(&mut self, to: PointerState) {
        tracing::debug!(
            pointer = self.identifier,
            from = self.state.label(),
            to = to.label(),
            x = self.history.last().x(),
            y = self.history.last().y(),
            "transition"
        );
        self.state = to;
    }

    pub(super) fn snapshot(&self, channel: Channel, t_ms: u64) -> SessionSnapshot {
        SessionSnapshot {
            channel,
            t_ms,
            identifier: self.identifier,
            state: self.state,
            position: *self.history.last(),
            direction: self.direction,
            is_tipping: self.is_tipping,
            absolute_movement: self.absolute_movement,
            relative_movement: self.relative_movement,
        }
    }

    pub(super) fn notify(&self, context: &mut DispatchContext, channel: Channel, t_ms: u64) {
        context.emit(self.snapshot(channel, t_ms));
    }
}
