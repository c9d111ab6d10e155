use tracing::trace;

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline: u64,
    seq: u64,
    task: T,
}

/// Virtual-time timeout queue. Nothing is ever cancelled; handlers of
/// fired tasks are expected to re-read current state.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now_ms: u64,
    seq: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, delay_ms: u64, task: T) {
        let deadline = self.now_ms.saturating_add(delay_ms);
        trace!(deadline, delay_ms, "timer scheduled");
        self.pending.push(Pending {
            deadline,
            seq: self.seq,
            task,
        });
        self.seq += 1;
    }

    /// Moves the clock forward and returns every due task, earliest deadline
    /// first and FIFO among equal deadlines.
    pub fn advance(&mut self, ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.saturating_add(ms);
        let now = self.now_ms;

        let (mut due, rest): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|pending| pending.deadline <= now);
        self.pending = rest;

        due.sort_by_key(|pending| (pending.deadline, pending.seq));
        due.into_iter().map(|pending| pending.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_then_fifo_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(100, "late");
        timers.schedule(50, "early-a");
        timers.schedule(50, "early-b");

        assert!(timers.advance(49).is_empty());
        assert_eq!(timers.advance(1), vec!["early-a", "early-b"]);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.advance(1000), vec!["late"]);
        assert!(timers.is_empty());
        assert_eq!(timers.now_ms(), 1050);
    }

    #[test]
    fn delay_is_relative_to_current_time() {
        let mut timers = TimerQueue::new();
        timers.advance(500);
        timers.schedule(10, 1);
        assert!(timers.advance(9).is_empty());
        assert_eq!(timers.advance(1), vec![1]);
    }
}
