//! Chip Selection
//!
//! Bounded multi-select toggling. Newly picked values go to the front of
//! the selection; once capacity is reached only removals are accepted.

/// Outcome of a single chip click
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChipToggle {
    Added(Vec<String>),
    Removed(Vec<String>),
    /// Selection full and the value was not selected
    Ignored,
}

impl ChipToggle {
    /// Selection after the click
    pub fn into_selection(self, current: &[String]) -> Vec<String> {
        match self {
            ChipToggle::Added(next) | ChipToggle::Removed(next) => next,
            ChipToggle::Ignored => current.to_vec(),
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, ChipToggle::Ignored)
    }
}

/// Toggle `value` within `selection`, honoring `capacity`
pub fn toggle_chip(selection: &[String], value: &str, capacity: usize) -> ChipToggle {
    if selection.iter().any(|s| s == value) {
        let next = selection.iter().filter(|s| *s != value).cloned().collect();
        return ChipToggle::Removed(next);
    }

    if selection.len() >= capacity {
        return ChipToggle::Ignored;
    }

    let mut next = Vec::with_capacity(selection.len() + 1);
    next.push(value.to_string());
    next.extend_from_slice(selection);
    ChipToggle::Added(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_add_goes_to_front() {
        let next = toggle_chip(&sel(&["Polls"]), "Ad Network", 3);
        assert_eq!(next, ChipToggle::Added(sel(&["Ad Network", "Polls"])));
    }

    #[test]
    fn test_remove_regardless_of_capacity() {
        let full = sel(&["a", "b", "c"]);
        assert_eq!(toggle_chip(&full, "b", 3), ChipToggle::Removed(sel(&["a", "c"])));
        assert_eq!(toggle_chip(&sel(&["a"]), "a", 3), ChipToggle::Removed(Vec::new()));
    }

    #[test]
    fn test_full_selection_ignores_new_values() {
        let full = sel(&["a", "b", "c"]);
        let outcome = toggle_chip(&full, "d", 3);
        assert!(outcome.is_ignored());
        assert_eq!(outcome.into_selection(&full), full);
    }
}
