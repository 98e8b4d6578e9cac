use std::collections::{HashSet, VecDeque};

/// Recipe ids planned over the last `horizon` days.
#[derive(Debug, Clone, Default)]
pub struct RecentWindow {
    horizon: usize,
    days: VecDeque<HashSet<u32>>,
}

impl RecentWindow {
    pub fn new(horizon: usize) -> Self {
        Self {
            horizon,
            days: VecDeque::with_capacity(horizon),
        }
    }

    /// Window holding the trailing `horizon` entries of `days`, oldest first.
    pub fn from_days<I, D>(horizon: usize, days: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = u32>,
    {
        let mut window = Self::new(horizon);
        for day in days {
            window.push_day(day);
        }
        window
    }

    pub fn contains(&self, recipe_id: u32) -> bool {
        self.days.iter().any(|day| day.contains(&recipe_id))
    }

    /// Record a finished day, dropping the oldest once the horizon is full.
    pub fn push_day<D: IntoIterator<Item = u32>>(&mut self, ids: D) {
        if self.horizon == 0 {
            return;
        }
        if self.days.len() == self.horizon {
            self.days.pop_front();
        }
        self.days.push_back(ids.into_iter().collect());
    }
}
