//! Hamburger navigation and the collapsible experience entries.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct MobileNav {
    expanded: bool,
}

impl MobileNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.expanded
    }

    /// Value for the hamburger's `aria-expanded` attribute.
    pub fn aria_expanded(&self) -> &'static str {
        if self.expanded {
            "true"
        } else {
            "false"
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Following a link closes the panel.
    pub fn link_clicked(&mut self) {
        if self.expanded {
            self.toggle();
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Accordion {
    open: BTreeSet<String>,
}

impl Accordion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains(id)
    }

    /// Returns whether the entry is open afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.open.remove(id) {
            false
        } else {
            self.open.insert(id.to_owned());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hamburger_toggles_aria_state() {
        let mut nav = MobileNav::new();
        assert_eq!(nav.aria_expanded(), "false");
        nav.toggle();
        assert!(nav.is_open());
        assert_eq!(nav.aria_expanded(), "true");
        nav.link_clicked();
        assert!(!nav.is_open());
        nav.link_clicked();
        assert!(!nav.is_open());
    }

    #[test]
    fn accordion_entries_toggle_independently() {
        let mut accordion = Accordion::new();
        assert!(accordion.toggle("intern1"));
        assert!(accordion.toggle("intern2"));
        assert!(!accordion.toggle("intern1"));
        assert!(!accordion.is_open("intern1"));
        assert!(accordion.is_open("intern2"));
    }
}
