use super::types::{
    Channel, Direction, Movement, PointerId, PointerState, PositionSample, SessionSnapshot,
};

/// Read-only view of a session handed to subscribers, as it was when the
/// notification was emitted.
#[derive(Debug)]
pub struct Notification<'a, T> {
    pub channel: Channel,
    pub t_ms: u64,
    pub identifier: PointerId,
    pub state: PointerState,
    pub position: PositionSample,
    pub direction: Direction,
    pub is_tipping: bool,
    pub absolute_movement: Movement,
    pub relative_movement: Movement,
    pub target: &'a T,
}

impl<'a, T> Notification<'a, T> {
    pub fn new(snapshot: &SessionSnapshot, target: &'a T) -> Self {
        Self {
            channel: snapshot.channel,
            t_ms: snapshot.t_ms,
            identifier: snapshot.identifier,
            state: snapshot.state,
            position: snapshot.position,
            direction: snapshot.direction,
            is_tipping: snapshot.is_tipping,
            absolute_movement: snapshot.absolute_movement,
            relative_movement: snapshot.relative_movement,
            target,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&Notification<'_, T>)>;

struct Slot<T> {
    id: SubscriptionId,
    callback: Subscriber<T>,
}

/// Per-channel subscriber lists with synchronous fan-out.
///
/// Subscribers run in subscription order on the dispatching call stack; a
/// panicking subscriber unwinds through the dispatcher.
pub struct Signals<T> {
    next_id: u64,
    channels: [Vec<Slot<T>>; 9],
}

impl<T> Default for Signals<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Signals<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            channels: Default::default(),
        }
    }

    pub fn subscribe<F>(&mut self, channel: Channel, callback: F) -> SubscriptionId
    where
        F: FnMut(&Notification<'_, T>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.channels[channel.index()].push(Slot {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Subscribes one callback to every channel. Returns one id per channel.
    pub fn subscribe_all<F>(&mut self, callback: F) -> [SubscriptionId; 9]
    where
        F: FnMut(&Notification<'_, T>) + Clone + 'static,
    {
        Channel::ALL.map(|channel| self.subscribe(channel, callback.clone()))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for slots in &mut self.channels {
            if let Some(pos) = slots.iter().position(|slot| slot.id == id) {
                slots.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn subscriber_count(&self, channel: Channel) -> usize {
        self.channels[channel.index()].len()
    }

    pub fn dispatch(&mut self, notification: &Notification<'_, T>) {
        for slot in &mut self.channels[notification.channel.index()] {
            (slot.callback)(notification);
        }
    }
}
