//! Header surfaces: mobile menu toggle and in-page anchor links.

use std::collections::HashMap;

/// Open/closed state shared by `.mobile-menu-toggle` and `.nav-menu`; both
/// carry the `active` class while open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// What an anchor click resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorAction {
    /// Bare `#` placeholder: default prevented, nothing else happens.
    Placeholder,
    /// Known section: default prevented, smooth scroll to this offset.
    ScrollTo(f64),
    /// No matching section: the browser's default handling applies.
    Unhandled,
}

/// Anchor links with an `href` starting in `#`.
#[derive(Debug, Clone)]
pub struct AnchorNav {
    sections: HashMap<String, f64>,
    header_offset: f64,
}

impl AnchorNav {
    pub fn new(sections: impl IntoIterator<Item = (String, f64)>, header_offset: f64) -> Self {
        Self {
            sections: sections.into_iter().collect(),
            header_offset,
        }
    }

    /// Resolve `href` to a scroll target below the fixed header.
    pub fn resolve(&self, href: &str) -> AnchorAction {
        if href == "#" {
            return AnchorAction::Placeholder;
        }
        let Some(id) = href.strip_prefix('#') else {
            return AnchorAction::Unhandled;
        };
        match self.sections.get(id) {
            Some(top) => AnchorAction::ScrollTo((top - self.header_offset).max(0.0)),
            None => AnchorAction::Unhandled,
        }
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }
}
