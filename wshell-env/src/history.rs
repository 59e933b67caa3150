// This file is part of wshell, a POSIX-flavored command shell.
// Copyright (C) 2026 wshell contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Bounded ring of command-line strings

use std::collections::VecDeque;

/// Default maximum history size, used when [`History::set_max`] is given 0.
const DEFAULT_MAX: usize = 1_000;

/// A bounded, FIFO-evicting sequence of command-line strings
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<String>,
    max: usize,
}

impl History {
    #[must_use]
    pub fn new(max: usize) -> Self {
        History {
            entries: VecDeque::new(),
            max: if max == 0 { DEFAULT_MAX } else { max },
        }
    }

    /// Appends `line` to the history, evicting the oldest entry first if
    /// the history is already at capacity.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.entries.len() == self.max {
            self.entries.pop_front();
        }
        self.entries.push_back(line.into());
    }

    /// The entries in insertion order, oldest first.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Sets the maximum size. `0` resets to the implementation default.
    ///
    /// Shrinking the maximum truncates from the front, retaining the
    /// newest entries.
    pub fn set_max(&mut self, max: usize) {
        self.max = if max == 0 { DEFAULT_MAX } else { max };
        while self.entries.len() > self.max {
            self.entries.pop_front();
        }
    }
}

impl Default for History {
    fn default() -> Self {
        History::new(DEFAULT_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_beyond_max_evicts_oldest_first() {
        let mut history = History::new(2);
        history.push("a");
        history.push("b");
        history.push("c");
        assert_eq!(history.items().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(history.size(), 2);
    }

    #[test]
    fn retained_items_are_the_most_recent_min_pushes_max() {
        let mut history = History::new(3);
        for i in 0..10 {
            history.push(i.to_string());
        }
        assert_eq!(
            history.items().collect::<Vec<_>>(),
            vec!["7", "8", "9"]
        );
    }

    #[test]
    fn set_max_zero_resets_to_default() {
        let mut history = History::new(5);
        history.set_max(0);
        assert_eq!(history.max(), DEFAULT_MAX);
    }

    #[test]
    fn shrinking_max_truncates_from_the_front() {
        let mut history = History::new(5);
        for i in 0..5 {
            history.push(i.to_string());
        }
        history.set_max(2);
        assert_eq!(history.items().collect::<Vec<_>>(), vec!["3", "4"]);
    }

    #[test]
    fn empty_history_reports_empty() {
        let history = History::new(10);
        assert!(history.empty());
        assert_eq!(history.size(), 0);
    }
}
