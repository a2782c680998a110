//! The DOM contract a page offers the controller at mount time.
//!
//! Structure (which surfaces exist, tab names, thumbnail sources, section
//! ids) comes from the rendered page. Geometry (section and card offsets,
//! viewport height) is only known to whoever lays the page out, so
//! [`crate::generate::page_layout`] leaves it at zero and hosts that care
//! fill it in.

/// A scroll target for `#id` anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
}

/// A reveal-on-scroll card (`.feature-card`, `.pricing-card`, `.benefit-item`).
#[derive(Debug, Clone, PartialEq)]
pub struct RevealCard {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// One screenshot strip and its main image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryLayout {
    /// `data-src` of each thumbnail, in order.
    pub thumbnails: Vec<String>,
    /// Initial `src` of the main image, if the page has one.
    pub main: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// `.mobile-menu-toggle` and `.nav-menu` are present.
    pub mobile_menu: bool,
    pub sections: Vec<Section>,
    /// `data-tab` of each `.tab-btn`, in order.
    pub tabs: Vec<String>,
    /// `data-content` of each `.tab-content`.
    pub tab_contents: Vec<String>,
    pub gallery: GalleryLayout,
    pub mobile_gallery: GalleryLayout,
    /// Label of the request form's submit button, when the form exists.
    pub request_form: Option<String>,
    pub reveal_cards: Vec<RevealCard>,
    pub download_buttons: usize,
    pub login_link: bool,
    pub viewport_height: f64,
}

impl PageLayout {
    pub fn with_section(mut self, id: impl Into<String>, top: f64) -> Self {
        self.sections.push(Section {
            id: id.into(),
            top,
        });
        self
    }

    pub fn with_tabs(mut self, names: &[&str]) -> Self {
        self.tabs = names.iter().map(|n| n.to_string()).collect();
        self.tab_contents = self.tabs.clone();
        self
    }

    pub fn with_gallery(mut self, thumbnails: &[&str]) -> Self {
        self.gallery = GalleryLayout {
            thumbnails: thumbnails.iter().map(|s| s.to_string()).collect(),
            main: thumbnails.first().map(|s| s.to_string()),
        };
        self
    }

    pub fn with_mobile_gallery(mut self, thumbnails: &[&str]) -> Self {
        self.mobile_gallery = GalleryLayout {
            thumbnails: thumbnails.iter().map(|s| s.to_string()).collect(),
            main: thumbnails.first().map(|s| s.to_string()),
        };
        self
    }

    pub fn with_request_form(mut self, submit_label: impl Into<String>) -> Self {
        self.request_form = Some(submit_label.into());
        self
    }

    pub fn with_reveal_card(mut self, id: impl Into<String>, top: f64, height: f64) -> Self {
        self.reveal_cards.push(RevealCard {
            id: id.into(),
            top,
            height,
        });
        self
    }
}
