//! Scroll-driven effects: header shadow and reveal-on-scroll cards.

pub const SHADOW_ELEVATED: &str =
    "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06)";
pub const SHADOW_RESTING: &str = "0 1px 2px 0 rgba(0, 0, 0, 0.05)";

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderShadow {
    threshold: f64,
    elevated: bool,
    last_scroll: f64,
}

impl HeaderShadow {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            elevated: false,
            last_scroll: 0.0,
        }
    }

    pub fn on_scroll(&mut self, offset: f64) {
        self.elevated = offset > self.threshold;
        self.last_scroll = offset;
    }

    pub fn is_elevated(&self) -> bool {
        self.elevated
    }

    /// Current `box-shadow` of `.header`.
    pub fn box_shadow(&self) -> &'static str {
        if self.elevated {
            SHADOW_ELEVATED
        } else {
            SHADOW_RESTING
        }
    }

    pub fn last_scroll(&self) -> f64 {
        self.last_scroll
    }
}

/// A card that fades in the first time it scrolls into view.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealTarget {
    pub id: String,
    pub top: f64,
    pub height: f64,
    pub revealed: bool,
}

#[derive(Debug, Clone)]
pub struct RevealOnScroll {
    targets: Vec<RevealTarget>,
    threshold: f64,
    bottom_margin: f64,
}

impl RevealOnScroll {
    pub fn new(targets: Vec<RevealTarget>, threshold: f64, bottom_margin: f64) -> Self {
        Self {
            targets,
            threshold,
            bottom_margin,
        }
    }

    /// Reveal every hidden target that now intersects the viewport by at
    /// least `threshold` of its height. Returns the ids revealed by this
    /// call; revealing is one-way.
    pub fn update(&mut self, scroll_offset: f64, viewport_height: f64) -> Vec<String> {
        let view_top = scroll_offset;
        let view_bottom = scroll_offset + (viewport_height - self.bottom_margin).max(0.0);
        let mut revealed = Vec::new();
        for target in self.targets.iter_mut().filter(|t| !t.revealed) {
            let overlap = (target.top + target.height).min(view_bottom) - target.top.max(view_top);
            let visible = if target.height > 0.0 {
                overlap / target.height >= self.threshold
            } else {
                overlap >= 0.0
            };
            if visible {
                target.revealed = true;
                revealed.push(target.id.clone());
            }
        }
        revealed
    }

    pub fn targets(&self) -> &[RevealTarget] {
        &self.targets
    }

    pub fn hidden(&self) -> usize {
        self.targets.iter().filter(|t| !t.revealed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, top: f64) -> RevealTarget {
        RevealTarget {
            id: id.to_string(),
            top,
            height: 200.0,
            revealed: false,
        }
    }

    #[test]
    fn shadow_elevates_past_threshold() {
        let mut header = HeaderShadow::new(100.0);
        header.on_scroll(100.0);
        assert!(!header.is_elevated());
        assert_eq!(header.box_shadow(), SHADOW_RESTING);

        header.on_scroll(101.0);
        assert!(header.is_elevated());
        assert_eq!(header.box_shadow(), SHADOW_ELEVATED);

        header.on_scroll(0.0);
        assert!(!header.is_elevated());
        assert_eq!(header.last_scroll(), 0.0);
    }

    #[test]
    fn cards_in_initial_viewport_reveal_immediately() {
        let mut reveal = RevealOnScroll::new(vec![card("a", 100.0), card("b", 2000.0)], 0.1, 50.0);
        assert_eq!(reveal.update(0.0, 800.0), vec!["a"]);
        assert_eq!(reveal.hidden(), 1);
    }

    #[test]
    fn bottom_margin_and_threshold_apply() {
        // Viewport 0..750 after the margin; card spans 735..935, 15px (7.5%) visible.
        let mut reveal = RevealOnScroll::new(vec![card("edge", 735.0)], 0.1, 50.0);
        assert!(reveal.update(0.0, 800.0).is_empty());
        // 25px (12.5%) visible.
        assert_eq!(reveal.update(10.0, 800.0), vec!["edge"]);
    }

    #[test]
    fn reveal_is_one_way() {
        let mut reveal = RevealOnScroll::new(vec![card("a", 1000.0)], 0.1, 50.0);
        assert_eq!(reveal.update(900.0, 800.0), vec!["a"]);
        assert!(reveal.update(0.0, 800.0).is_empty());
        assert!(reveal.targets()[0].revealed);
    }
}
