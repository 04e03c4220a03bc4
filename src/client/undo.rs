use std::time::{Duration, Instant};

use crate::problems::Problem;

/// How long a deleted record is offered back before it is let go.
pub const UNDO_WINDOW: Duration = Duration::from_secs(5);

/// A just-deleted record, held in memory only. The backend has already
/// forgotten it; resubmitting goes through Create and gets a new id.
#[derive(Debug)]
pub struct UndoSlot {
    problem: Problem,
    armed_at: Instant,
    window: Duration,
}

impl UndoSlot {
    pub fn arm(problem: Problem) -> Self {
        Self::with_window(problem, UNDO_WINDOW)
    }

    fn with_window(problem: Problem, window: Duration) -> Self {
        Self {
            problem,
            armed_at: Instant::now(),
            window,
        }
    }

    pub fn expired(&self) -> bool {
        self.armed_at.elapsed() >= self.window
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Consume the slot; `None` once the window has elapsed.
    pub fn take(self) -> Option<Problem> {
        if self.expired() { None } else { Some(self.problem) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::Status;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn sample() -> Problem {
        Problem {
            id: Uuid::now_v7(),
            email: "a@b.com".to_owned(),
            problem: "something broke again".to_owned(),
            status: Status::Pending,
            timestamp: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
        }
    }

    #[test]
    fn open_window_hands_the_record_back() {
        let record = sample();
        let slot = UndoSlot::arm(record.clone());
        assert!(!slot.expired());
        assert_eq!(slot.take(), Some(record));
    }

    #[test]
    fn elapsed_window_discards_the_record() {
        let slot = UndoSlot::with_window(sample(), Duration::ZERO);
        assert!(slot.expired());
        assert_eq!(slot.take(), None);
    }
}
