use std::collections::VecDeque;

/// Commands the user executed, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
    max_entries: usize,
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Records `entry`, skipping blank input and consecutive duplicates.
    pub fn add(&mut self, entry: &str) {
        let entry = entry.trim_end();
        if entry.trim().is_empty() || self.max_entries == 0 {
            return;
        }
        if self.entries.back().map(String::as_str) == Some(entry) {
            return;
        }
        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.entries.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_consecutive_entries() {
        let mut history = History::new(5);
        history.add("x = 1");
        history.add("x = 1\n");
        history.add("y = 2");
        history.add("x = 1");
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["x = 1", "y = 2", "x = 1"]);
    }

    #[test]
    fn skips_blank_entries() {
        let mut history = History::new(5);
        history.add("   ");
        history.add("\n");
        assert!(history.is_empty());
    }

    #[test]
    fn keeps_indentation_of_multiline_entries() {
        let mut history = History::new(5);
        history.add("if x:\n    pass\n");
        assert_eq!(history.get(0), Some("if x:\n    pass"));
    }

    #[test]
    fn respects_max_entries() {
        let mut history = History::new(2);
        history.add("a");
        history.add("b");
        history.add("c");
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0), Some("b"));
        assert_eq!(history.get(1), Some("c"));
    }
}
