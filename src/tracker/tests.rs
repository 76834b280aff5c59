use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::error::SampleError;
use crate::pointer::signals::Notification;
use crate::pointer::{Channel, PointerState};

type Log = Rc<RefCell<Vec<(PointerId, Channel)>>>;

fn tracker() -> (PointerTracker<u32>, Log) {
    let mut tracker = PointerTracker::new(GestureConfig::default());
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    tracker
        .signals_mut()
        .subscribe_all(move |note: &Notification<'_, u32>| {
            sink.borrow_mut().push((note.identifier, note.channel))
        });
    (tracker, log)
}

fn input(kind: PointerInputKind, id: PointerId, x: f64, y: f64, t_ms: u64) -> PointerInput<u32> {
    PointerInput::new(kind, id, x, y, t_ms, 0)
}

#[test]
fn released_pointer_is_disposed() {
    let (mut tracker, log) = tracker();
    tracker
        .handle(input(PointerInputKind::Start, 1, 10.0, 10.0, 0))
        .unwrap();
    assert_eq!(tracker.active_count(), 1);
    tracker
        .handle(input(PointerInputKind::End, 1, 10.0, 10.0, 50))
        .unwrap();

    assert_eq!(tracker.active_count(), 0);
    assert_eq!(
        log.borrow().as_slice(),
        &[(1, Channel::Pressed), (1, Channel::Tapped), (1, Channel::Released)]
    );
}

#[test]
fn unknown_pointer_events_are_noops() {
    let (mut tracker, log) = tracker();
    let output = tracker
        .handle(input(PointerInputKind::Move, 9, 50.0, 0.0, 10))
        .unwrap();
    assert!(output.is_empty());
    let output = tracker
        .handle(input(PointerInputKind::End, 9, 50.0, 0.0, 20))
        .unwrap();
    assert!(output.is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn duplicate_start_keeps_the_live_session() {
    let (mut tracker, log) = tracker();
    tracker
        .handle(PointerInput::new(PointerInputKind::Start, 4, 0.0, 0.0, 0, 11))
        .unwrap();
    let output = tracker
        .handle(PointerInput::new(PointerInputKind::Start, 4, 90.0, 90.0, 5, 22))
        .unwrap();

    assert!(output.is_empty());
    assert_eq!(log.borrow().len(), 1);
    let pointer = tracker.pointer(4).unwrap();
    assert_eq!(*pointer.target(), 11);
    assert_eq!(pointer.initial_position().x(), 0.0);
}

#[test]
fn target_is_captured_at_start_only() {
    let (mut tracker, _log) = tracker();
    tracker
        .handle(PointerInput::new(PointerInputKind::Start, 2, 0.0, 0.0, 0, 100))
        .unwrap();
    tracker
        .handle(PointerInput::new(PointerInputKind::Move, 2, 15.0, 0.0, 20, 200))
        .unwrap();
    assert_eq!(*tracker.pointer(2).unwrap().target(), 100);
}

#[test]
fn malformed_sample_leaves_session_untouched() {
    let (mut tracker, log) = tracker();
    tracker
        .handle(input(PointerInputKind::Start, 3, 0.0, 0.0, 0))
        .unwrap();
    let err = tracker
        .handle(input(PointerInputKind::Move, 3, f64::NAN, 4.0, 10))
        .unwrap_err();

    assert!(matches!(
        err,
        PointerError::MalformedSample {
            identifier: 3,
            source: SampleError::NonFiniteCoordinate { .. }
        }
    ));
    let pointer = tracker.pointer(3).unwrap();
    assert_eq!(pointer.history().len(), 1);
    assert_eq!(pointer.state(), PointerState::Pressing);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn malformed_start_creates_no_session() {
    let (mut tracker, _log) = tracker();
    let result = tracker.handle(input(PointerInputKind::Start, 5, f64::INFINITY, 0.0, 0));
    assert!(result.is_err());
    assert_eq!(tracker.active_count(), 0);
}

#[test]
fn advance_time_fires_due_long_presses() {
    let (mut tracker, log) = tracker();
    let tap_max = tracker.config().tap_max_duration_ms;
    tracker
        .handle(input(PointerInputKind::Start, 1, 0.0, 0.0, 0))
        .unwrap();
    tracker
        .handle(input(PointerInputKind::Start, 2, 200.0, 0.0, 100))
        .unwrap();
    assert_eq!(tracker.next_deadline(), Some(tap_max));

    let fired = tracker.advance_time(tap_max + 1);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].0, 1);
    assert!(tracker.pointer(1).unwrap().is_tipping());
    assert!(!tracker.pointer(2).unwrap().is_tipping());
    assert_eq!(tracker.next_deadline(), Some(100 + tap_max));

    let fired = tracker.advance_time(100 + tap_max);
    assert_eq!(fired.len(), 1);
    assert_eq!(tracker.next_deadline(), None);
    assert!(tracker.advance_time(10_000).is_empty());

    let tipped: Vec<_> = log
        .borrow()
        .iter()
        .filter(|(_, channel)| *channel == Channel::Tipped)
        .map(|(id, _)| *id)
        .collect();
    assert_eq!(tipped, std::vec![1, 2]);
}

#[test]
fn sessions_are_independent() {
    let (mut tracker, log) = tracker();
    tracker
        .handle(input(PointerInputKind::Start, 1, 0.0, 0.0, 0))
        .unwrap();
    tracker
        .handle(input(PointerInputKind::Start, 2, 100.0, 100.0, 5))
        .unwrap();
    tracker
        .handle(input(PointerInputKind::Move, 1, 45.0, 0.0, 30))
        .unwrap();
    tracker
        .handle(input(PointerInputKind::Move, 2, 110.0, 100.0, 35))
        .unwrap();
    tracker
        .handle(input(PointerInputKind::Cancel, 2, 110.0, 100.0, 40))
        .unwrap();
    tracker
        .handle(input(PointerInputKind::End, 1, 50.0, 0.0, 60))
        .unwrap();

    let for_pointer = |id: PointerId| -> Vec<Channel> {
        log.borrow()
            .iter()
            .filter(|(owner, _)| *owner == id)
            .map(|(_, channel)| *channel)
            .collect()
    };
    assert_eq!(
        for_pointer(1),
        std::vec![Channel::Pressed, Channel::Swiped, Channel::Released]
    );
    assert_eq!(
        for_pointer(2),
        std::vec![
            Channel::Pressed,
            Channel::DragStarted,
            Channel::Dragged,
            Channel::DragStopped,
            Channel::Released
        ]
    );
    assert_eq!(tracker.active_count(), 0);
}

#[test]
fn session_subscribers_run_before_tracker_subscribers() {
    let mut tracker: PointerTracker<()> = PointerTracker::new(GestureConfig::default());
    let order = Rc::new(RefCell::new(Vec::new()));
    let global = Rc::clone(&order);
    tracker
        .signals_mut()
        .subscribe(Channel::Released, move |_| global.borrow_mut().push("tracker"));
    tracker
        .handle(PointerInput::new(PointerInputKind::Start, 8, 0.0, 0.0, 0, ()))
        .unwrap();

    let local = Rc::clone(&order);
    tracker
        .pointer_mut(8)
        .unwrap()
        .signals_mut()
        .subscribe(Channel::Released, move |_| local.borrow_mut().push("session"));
    tracker
        .handle(PointerInput::new(PointerInputKind::End, 8, 0.0, 0.0, 20, ()))
        .unwrap();

    assert_eq!(order.borrow().as_slice(), &["session", "tracker"]);
}

#[test]
fn pressed_reaches_only_tracker_subscribers() {
    let mut tracker: PointerTracker<()> = PointerTracker::new(GestureConfig::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let global = Rc::clone(&seen);
    tracker
        .signals_mut()
        .subscribe(Channel::Pressed, move |_| global.borrow_mut().push("tracker"));
    tracker
        .handle(PointerInput::new(PointerInputKind::Start, 6, 0.0, 0.0, 0, ()))
        .unwrap();

    let local = Rc::clone(&seen);
    let pointer = tracker.pointer_mut(6).unwrap();
    pointer
        .signals_mut()
        .subscribe(Channel::Pressed, move |_| local.borrow_mut().push("session"));
    assert_eq!(pointer.signals_mut().subscriber_count(Channel::Pressed), 1);
    tracker
        .handle(PointerInput::new(PointerInputKind::End, 6, 0.0, 0.0, 20, ()))
        .unwrap();

    assert_eq!(seen.borrow().as_slice(), &["tracker"]);
}

#[test]
fn tracker_subscribers_see_the_state_at_emit_time() {
    let mut tracker: PointerTracker<()> = PointerTracker::new(GestureConfig::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    tracker
        .signals_mut()
        .subscribe_all(move |note: &Notification<'_, ()>| {
            sink.borrow_mut()
                .push((note.channel, note.state, note.t_ms, note.position.x()))
        });
    tracker
        .handle(PointerInput::new(PointerInputKind::Start, 1, 0.0, 0.0, 0, ()))
        .unwrap();
    tracker
        .handle(PointerInput::new(PointerInputKind::Move, 1, 80.0, 0.0, 310, ()))
        .unwrap();

    assert_eq!(
        seen.borrow().as_slice(),
        &[
            (Channel::Pressed, PointerState::Pressing, 0, 0.0),
            (Channel::Tipped, PointerState::Tipping, 300, 0.0),
        ]
    );
    assert_eq!(tracker.pointer(1).unwrap().state(), PointerState::Swiping);
}
