use std::collections::BTreeMap;

/// One-shot fade-in: elements become visible the first time enough of them is on
/// screen and are never hidden again.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f32,
    elements: BTreeMap<String, bool>,
}

impl RevealTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            elements: BTreeMap::new(),
        }
    }

    pub fn observe(&mut self, id: &str) {
        self.elements.entry(id.to_owned()).or_insert(false);
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.elements.get(id).copied().unwrap_or(false)
    }

    /// Still waiting to be revealed.
    pub fn is_observed(&self, id: &str) -> bool {
        matches!(self.elements.get(id), Some(false))
    }

    /// Reports the visible fraction of an element; returns `true` when this
    /// report revealed it.
    pub fn report(&mut self, id: &str, ratio: f32) -> bool {
        match self.elements.get_mut(id) {
            Some(visible) if !*visible && ratio >= self.threshold && ratio > 0.0 => {
                *visible = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_once_past_threshold() {
        let mut tracker = RevealTracker::new(0.1);
        tracker.observe("card");
        assert!(!tracker.report("card", 0.05));
        assert!(tracker.is_observed("card"));
        assert!(tracker.report("card", 0.1));
        assert!(tracker.is_visible("card"));
        assert!(!tracker.is_observed("card"));
        assert!(!tracker.report("card", 0.0));
        assert!(tracker.is_visible("card"));
    }

    #[test]
    fn unobserved_elements_are_ignored() {
        let mut tracker = RevealTracker::new(0.1);
        assert!(!tracker.report("ghost", 1.0));
        assert!(!tracker.is_visible("ghost"));
    }
}
