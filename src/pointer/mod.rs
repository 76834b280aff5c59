pub mod history;
mod hsm;
pub mod policy;
pub mod signals;
pub mod timer;
pub mod types;


use core::fmt;

use statig::blocking::IntoStateMachineExt as _;

use crate::config::GestureConfig;

use self::history::PositionHistory;
use self::hsm::{DispatchContext, PointerHsm, PointerSignal};
use self::policy::ClassificationPolicy;
use self::signals::{Notification, Signals};
pub use self::types::{
    Channel, Direction, Movement, PointerId, PointerOutput, PointerState, PositionSample,
    SessionSnapshot,
};

/// One press-to-release interaction.
///
/// The target is captured at creation and never changes. Notifications go
/// to the session's own [`Signals`] before the call returns.
pub struct Pointer<T> {
    machine: statig::blocking::StateMachine<PointerHsm>,
    target: T,
    signals: Signals<T>,
}

impl<T> Pointer<T> {
    pub fn new(
        identifier: PointerId,
        first: PositionSample,
        target: T,
        config: GestureConfig,
    ) -> Self {
        let hsm = PointerHsm::new(identifier, first, ClassificationPolicy::new(config));
        Self {
            machine: hsm.state_machine(),
            target,
            signals: Signals::new(),
        }
    }

    /// Fires `pressed` and arms the long-press timer from the first sample.
    pub fn press(&mut self) -> PointerOutput {
        let now_ms = self.initial_position().t_ms();
        self.dispatch(&[PointerSignal::Pressed { now_ms }])
    }

    pub fn move_to(&mut self, sample: PositionSample) -> PointerOutput {
        self.dispatch(&[
            PointerSignal::Tick {
                now_ms: sample.t_ms(),
            },
            PointerSignal::Dragged(sample),
        ])
    }

    pub fn end(&mut self, sample: PositionSample) -> PointerOutput {
        self.dispatch(&[
            PointerSignal::Tick {
                now_ms: sample.t_ms(),
            },
            PointerSignal::Ended(sample),
        ])
    }

    pub fn cancel(&mut self, sample: PositionSample) -> PointerOutput {
        self.dispatch(&[
            PointerSignal::Tick {
                now_ms: sample.t_ms(),
            },
            PointerSignal::Cancelled(sample),
        ])
    }

    /// Lets a due long-press deadline fire.
    pub fn advance_time(&mut self, now_ms: u64) -> PointerOutput {
        self.dispatch(&[PointerSignal::Tick { now_ms }])
    }

    /// Subscribers added here only see notifications fired after they
    /// subscribe. A session created by [`crate::PointerTracker`] has already
    /// fired `pressed`, which is delivered to tracker-wide subscribers only.
    pub fn signals_mut(&mut self) -> &mut Signals<T> {
        &mut self.signals
    }

    pub fn identifier(&self) -> PointerId {
        self.machine.inner().identifier
    }

    pub fn state(&self) -> PointerState {
        self.machine.inner().state
    }

    pub fn is_released(&self) -> bool {
        self.state() == PointerState::End
    }

    pub fn is_tipping(&self) -> bool {
        self.machine.inner().is_tipping
    }

    pub fn direction(&self) -> Direction {
        self.machine.inner().direction
    }

    /// Only meaningful while swiping.
    pub fn swipe_start_index(&self) -> usize {
        self.machine.inner().swipe_start_index
    }

    pub fn position(&self) -> &PositionSample {
        self.machine.inner().history.last()
    }

    pub fn initial_position(&self) -> &PositionSample {
        self.machine.inner().history.first()
    }

    pub fn history(&self) -> &PositionHistory {
        &self.machine.inner().history
    }

    pub fn absolute_movement(&self) -> Movement {
        self.machine.inner().absolute_movement
    }

    pub fn relative_movement(&self) -> Movement {
        self.machine.inner().relative_movement
    }

    pub fn long_press_deadline_ms(&self) -> Option<u64> {
        self.machine.inner().timer.deadline_ms()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    fn dispatch(&mut self, signals: &[PointerSignal]) -> PointerOutput {
        let mut context = DispatchContext::default();
        for signal in signals {
            self.machine.handle_with_context(signal, &mut context);
        }
        let output = context.finish();
        for snapshot in output.snapshots() {
            self.signals.dispatch(&Notification::new(snapshot, &self.target));
        }
        output
    }
}

impl<T> fmt::Display for Pointer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ptr#{}", self.identifier())
    }
}
