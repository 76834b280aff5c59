/// One-shot long-press deadline owned by a session.
///
/// The host owns real time and calls [`LongPressTimer::poll`]; a due deadline
/// fires exactly once and the timer can never be re-armed afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LongPressTimer {
    deadline_ms: Option<u64>,
    fired: bool,
}

impl LongPressTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when already armed or already fired.
    pub fn start(&mut self, now_ms: u64, delay_ms: u64) -> bool {
        if self.deadline_ms.is_some() || self.fired {
            return false;
        }
        self.deadline_ms = Some(now_ms.saturating_add(delay_ms));
        tracing::trace!(deadline_ms = ?self.deadline_ms, "long-press timer armed");
        true
    }

    /// Returns whether a pending deadline was dropped.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.deadline_ms.take().is_some();
        if cancelled {
            tracing::trace!("long-press timer cancelled");
        }
        cancelled
    }

    /// Returns the deadline that just fired, which may be earlier than
    /// `now_ms` when the host polls late.
    pub fn poll(&mut self, now_ms: u64) -> Option<u64> {
        match self.deadline_ms {
            Some(deadline_ms) if now_ms >= deadline_ms => {
                self.deadline_ms = None;
                self.fired = true;
                tracing::trace!(deadline_ms, now_ms, "long-press timer fired");
                Some(deadline_ms)
            }
            _ => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }
}
