use serde::Serialize;

/// Batch progress snapshot handed to progress callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    /// Tasks finished so far, success or failure
    pub completed: usize,
    pub total: usize,
}

impl ProgressState {
    pub const fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Integer percentage (0..=100) for progress bars; an empty batch reports 100
    #[allow(clippy::cast_possible_truncation)]
    pub const fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = self.completed.saturating_mul(100) / self.total;
        if pct > 100 { 100 } else { pct as u8 }
    }

    pub const fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}
