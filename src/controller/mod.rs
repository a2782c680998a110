//! Page interaction controller.
//!
//! A headless model of everything the landing page does in response to the
//! visitor. Each interaction surface is a small handler with its own state:
//!
//! | Surface | Handler | State |
//! |---------|---------|-------|
//! | mobile menu | [`navigation::MobileMenu`] | open/closed |
//! | anchors | [`navigation::AnchorNav`] | section offsets |
//! | scroll | [`scroll::HeaderShadow`], [`scroll::RevealOnScroll`] | shadow, revealed cards |
//! | tabs | [`toggle::ToggleGroup`] | active tab |
//! | galleries | [`gallery::Gallery`] (desktop + mobile) | active thumbnail, main image, pending swap |
//! | request form | [`crate::form::RequestForm`] | fields, button, submission |
//! | downloads / login | [`links::DownloadTracker`], [`links::LoginLink`] | click counts |
//!
//! [`Controller::mount`] registers a handler for every surface the
//! [`PageLayout`] offers, the way the page script binds its listeners on
//! `DOMContentLoaded`. Events are dispatched one at a time and run to
//! completion. Time moves only through [`Controller::advance`], which fires
//! due timers (notification countdowns, submission latency, image fades) in
//! deadline order.

pub mod gallery;
pub mod layout;
pub mod links;
pub mod navigation;
pub mod scroll;
pub mod toggle;

pub use layout::PageLayout;

use crate::config::SiteConfig;
use crate::form::{Field, FormTimer, RequestForm, SubmissionSink, SubmitOutcome};
use crate::notification::{
    Notification, NotificationId, NotificationKind, NotificationManager, NotificationTimer,
};
use crate::timer::TimerQueue;
use gallery::{Gallery, GalleryKind, GalleryTimer};
use links::{DownloadTracker, Location, LoginLink, Platform};
use navigation::{AnchorAction, AnchorNav, MobileMenu};
use scroll::{HeaderShadow, RevealOnScroll, RevealTarget};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use toggle::ToggleGroup;
use tracing::{debug, trace};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    #[error("tab '{0}' has no matching data-content panel")]
    TabWithoutContent(String),
    #[error("tab '{0}' appears more than once")]
    DuplicateTab(String),
    #[error("section id '{0}' appears more than once")]
    DuplicateSection(String),
}

/// Everything the controller can have scheduled.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Notification(NotificationTimer),
    Form(FormTimer),
    Gallery(GalleryTimer),
}

impl From<NotificationTimer> for Task {
    fn from(t: NotificationTimer) -> Self {
        Task::Notification(t)
    }
}

impl From<FormTimer> for Task {
    fn from(t: FormTimer) -> Self {
        Task::Form(t)
    }
}

impl From<GalleryTimer> for Task {
    fn from(t: GalleryTimer) -> Self {
        Task::Gallery(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Menu,
    Anchors,
    Scroll,
    Reveal,
    Tabs,
    Gallery,
    MobileGallery,
    Form,
    Downloads,
    LoginLink,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Surface::Menu => "mobile menu",
            Surface::Anchors => "anchor links",
            Surface::Scroll => "header scroll effect",
            Surface::Reveal => "reveal on scroll",
            Surface::Tabs => "screenshot tabs",
            Surface::Gallery => "screenshot gallery",
            Surface::MobileGallery => "mobile gallery",
            Surface::Form => "request form",
            Surface::Downloads => "download tracking",
            Surface::LoginLink => "login link",
        })
    }
}

/// A visitor interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    MenuToggleClicked,
    AnchorClicked { href: String },
    Scrolled { offset: f64 },
    TabClicked { tab: String },
    ThumbnailClicked { gallery: GalleryKind, index: usize },
    FieldInput { field: Field, value: String },
    FormSubmitted,
    NotificationClosed,
    DownloadClicked { platform: Platform },
}

/// What the browser should do after the handler ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub default_prevented: bool,
}

impl EventOutcome {
    fn prevented() -> Self {
        Self {
            default_prevented: true,
        }
    }
}

pub struct Controller {
    timers: TimerQueue<Task>,
    notifications: NotificationManager,
    anchors: AnchorNav,
    header: HeaderShadow,
    reveal: RevealOnScroll,
    downloads: DownloadTracker,
    menu: Option<MobileMenu>,
    tabs: Option<ToggleGroup<String>>,
    gallery: Option<Gallery>,
    mobile_gallery: Option<Gallery>,
    form: Option<RequestForm>,
    login: Option<LoginLink>,
    scroll_offset: f64,
    viewport_height: f64,
    has_downloads: bool,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("now", &self.timers.now())
            .field("surfaces", &self.surfaces())
            .field("notification", &self.notifications.current())
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Register a handler for every surface present in `layout`.
    ///
    /// Fails when the layout breaks the DOM contract (a tab with no panel,
    /// duplicated tabs or section ids).
    pub fn mount(
        layout: &PageLayout,
        config: &SiteConfig,
        sink: Box<dyn SubmissionSink>,
    ) -> Result<Self, MountError> {
        let timings = &config.timings;

        let mut seen = HashSet::new();
        for section in &layout.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(MountError::DuplicateSection(section.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for tab in &layout.tabs {
            if !seen.insert(tab.as_str()) {
                return Err(MountError::DuplicateTab(tab.clone()));
            }
            if !layout.tab_contents.contains(tab) {
                return Err(MountError::TabWithoutContent(tab.clone()));
            }
        }

        let reveal_targets = layout
            .reveal_cards
            .iter()
            .map(|card| RevealTarget {
                id: card.id.clone(),
                top: card.top,
                height: card.height,
                revealed: false,
            })
            .collect();

        let mut controller = Self {
            timers: TimerQueue::new(),
            notifications: NotificationManager::new(
                timings.notification_display(),
                timings.notification_exit(),
            ),
            anchors: AnchorNav::new(
                layout.sections.iter().map(|s| (s.id.clone(), s.top)),
                config.layout.header_offset,
            ),
            header: HeaderShadow::new(config.layout.header_shadow_threshold),
            reveal: RevealOnScroll::new(
                reveal_targets,
                config.layout.reveal_threshold,
                config.layout.reveal_bottom_margin,
            ),
            downloads: DownloadTracker::default(),
            menu: layout.mobile_menu.then(MobileMenu::default),
            tabs: ToggleGroup::new(layout.tabs.clone()),
            gallery: Gallery::new(
                GalleryKind::Desktop,
                layout.gallery.thumbnails.clone(),
                layout.gallery.main.clone(),
                timings.image_fade(),
            ),
            mobile_gallery: Gallery::new(
                GalleryKind::Mobile,
                layout.mobile_gallery.thumbnails.clone(),
                layout.mobile_gallery.main.clone(),
                timings.image_fade(),
            ),
            form: layout
                .request_form
                .as_ref()
                .map(|label| RequestForm::new(label.clone(), timings.submit_latency(), sink)),
            login: layout
                .login_link
                .then(|| LoginLink::new(&config.site.app_url, &config.site.pages_base)),
            scroll_offset: 0.0,
            viewport_height: layout.viewport_height,
            has_downloads: layout.download_buttons > 0,
        };

        // Cards already in view at load are revealed right away.
        controller.scroll_to(0.0);
        debug!(surfaces = ?controller.surfaces(), "controller mounted");
        Ok(controller)
    }

    /// Registered surfaces, in handler-table order.
    pub fn surfaces(&self) -> Vec<Surface> {
        let mut surfaces = Vec::new();
        if self.menu.is_some() {
            surfaces.push(Surface::Menu);
        }
        surfaces.push(Surface::Anchors);
        surfaces.push(Surface::Scroll);
        if !self.reveal.targets().is_empty() {
            surfaces.push(Surface::Reveal);
        }
        if self.tabs.is_some() {
            surfaces.push(Surface::Tabs);
        }
        if self.gallery.is_some() {
            surfaces.push(Surface::Gallery);
        }
        if self.mobile_gallery.is_some() {
            surfaces.push(Surface::MobileGallery);
        }
        if self.form.is_some() {
            surfaces.push(Surface::Form);
        }
        if self.has_downloads {
            surfaces.push(Surface::Downloads);
        }
        if self.login.is_some() {
            surfaces.push(Surface::LoginLink);
        }
        surfaces
    }

    /// Run the handler for one interaction to completion.
    pub fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        trace!(?event, "dispatch");
        match event {
            PageEvent::MenuToggleClicked => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.toggle();
                }
                EventOutcome::default()
            }
            PageEvent::AnchorClicked { href } => match self.anchors.resolve(&href) {
                AnchorAction::Placeholder => EventOutcome::prevented(),
                AnchorAction::ScrollTo(offset) => {
                    if let Some(menu) = self.menu.as_mut() {
                        menu.close();
                    }
                    self.scroll_to(offset);
                    EventOutcome::prevented()
                }
                AnchorAction::Unhandled => EventOutcome::default(),
            },
            PageEvent::Scrolled { offset } => {
                self.scroll_to(offset);
                EventOutcome::default()
            }
            PageEvent::TabClicked { tab } => {
                if let Some(tabs) = self.tabs.as_mut() {
                    tabs.activate_item(&tab);
                }
                EventOutcome::default()
            }
            PageEvent::ThumbnailClicked { gallery, index } => {
                let target = match gallery {
                    GalleryKind::Desktop => self.gallery.as_mut(),
                    GalleryKind::Mobile => self.mobile_gallery.as_mut(),
                };
                if let Some(g) = target {
                    g.select(&mut self.timers, index);
                }
                EventOutcome::default()
            }
            PageEvent::FieldInput { field, value } => {
                if let Some(form) = self.form.as_mut() {
                    form.input(field, value);
                }
                EventOutcome::default()
            }
            PageEvent::FormSubmitted => {
                let Some(form) = self.form.as_mut() else {
                    return EventOutcome::default();
                };
                let outcome = form.submit(&mut self.timers, &mut self.notifications);
                if let SubmitOutcome::Rejected(err) = &outcome {
                    debug!(error = %err, "request form rejected");
                }
                EventOutcome::prevented()
            }
            PageEvent::NotificationClosed => {
                self.notifications.dismiss(&mut self.timers);
                EventOutcome::default()
            }
            PageEvent::DownloadClicked { platform } => {
                self.downloads.record(platform);
                EventOutcome::default()
            }
        }
    }

    /// Show a notification directly, replacing any visible one.
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        self.notifications.notify(&mut self.timers, message, kind)
    }

    /// Let `by` pass, firing every timer that falls due on the way.
    pub fn advance(&mut self, by: Duration) {
        let until = self.timers.now() + by;
        while let Some((_, task)) = self.timers.pop_due(until) {
            match task {
                Task::Notification(t) => self.notifications.on_timer(&mut self.timers, t),
                Task::Form(t) => {
                    if let Some(form) = self.form.as_mut() {
                        form.on_timer(&mut self.timers, &mut self.notifications, t);
                    }
                }
                Task::Gallery(t) => {
                    let target = match t.gallery {
                        GalleryKind::Desktop => self.gallery.as_mut(),
                        GalleryKind::Mobile => self.mobile_gallery.as_mut(),
                    };
                    if let Some(g) = target {
                        g.on_timer(t);
                    }
                }
            }
        }
    }

    fn scroll_to(&mut self, offset: f64) {
        self.scroll_offset = offset;
        self.header.on_scroll(offset);
        let revealed = self.reveal.update(offset, self.viewport_height);
        if !revealed.is_empty() {
            trace!(?revealed, "cards revealed");
        }
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(MobileMenu::is_open)
    }

    /// The active tab; its `data-content` panel is the one shown.
    pub fn active_tab(&self) -> Option<&str> {
        self.tabs.as_ref().map(|t| t.active_item().as_str())
    }

    pub fn tabs(&self) -> Option<&ToggleGroup<String>> {
        self.tabs.as_ref()
    }

    pub fn gallery(&self, kind: GalleryKind) -> Option<&Gallery> {
        match kind {
            GalleryKind::Desktop => self.gallery.as_ref(),
            GalleryKind::Mobile => self.mobile_gallery.as_ref(),
        }
    }

    pub fn form(&self) -> Option<&RequestForm> {
        self.form.as_ref()
    }

    pub fn header(&self) -> &HeaderShadow {
        &self.header
    }

    pub fn reveal(&self) -> &RevealOnScroll {
        &self.reveal
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn downloads(&self) -> &DownloadTracker {
        &self.downloads
    }

    /// Resolved `#login-link` target, when the page has one.
    pub fn login_url(&self, location: &Location, app_bundle_present: bool) -> Option<String> {
        self.login
            .as_ref()
            .map(|l| l.resolve(location, app_bundle_present))
    }
}
