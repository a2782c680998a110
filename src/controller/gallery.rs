//! Screenshot galleries: a thumbnail strip driving one main image.
//!
//! Clicking a thumbnail marks it active and dims the main image; once the
//! fade interval has passed the main image takes the thumbnail's `data-src`
//! and returns to full opacity. The gallery owns the handle of its pending
//! swap, so a quicker second click cancels the first swap instead of
//! racing it.

use super::toggle::ToggleGroup;
use crate::timer::{TimerId, TimerQueue};
use std::time::Duration;

pub const DIMMED_OPACITY: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryKind {
    /// `.thumbnail` → `.screenshot-main img`
    Desktop,
    /// `.mobile-thumbnail` → `.mobile-main img`
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryTimer {
    pub gallery: GalleryKind,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainImage {
    pub src: String,
    pub opacity: f32,
}

#[derive(Debug)]
pub struct Gallery {
    kind: GalleryKind,
    thumbnails: ToggleGroup<String>,
    main: Option<MainImage>,
    fade: Duration,
    pending: Option<TimerId>,
}

impl Gallery {
    /// `None` when there are no thumbnails to click. A missing main image
    /// still allows selecting thumbnails; there is just nothing to swap.
    pub fn new(
        kind: GalleryKind,
        thumbnail_srcs: Vec<String>,
        main_src: Option<String>,
        fade: Duration,
    ) -> Option<Self> {
        Some(Self {
            kind,
            thumbnails: ToggleGroup::new(thumbnail_srcs)?,
            main: main_src.map(|src| MainImage { src, opacity: 1.0 }),
            fade,
            pending: None,
        })
    }

    pub fn kind(&self) -> GalleryKind {
        self.kind
    }

    pub fn thumbnails(&self) -> &ToggleGroup<String> {
        &self.thumbnails
    }

    pub fn main(&self) -> Option<&MainImage> {
        self.main.as_ref()
    }

    pub fn is_swapping(&self) -> bool {
        self.pending.is_some()
    }

    /// Thumbnail click. Returns `false` for an index outside the strip.
    pub fn select<T>(&mut self, timers: &mut TimerQueue<T>, index: usize) -> bool
    where
        T: From<GalleryTimer>,
    {
        if !self.thumbnails.activate(index) {
            return false;
        }
        let Some(main) = self.main.as_mut() else {
            return true;
        };
        main.opacity = DIMMED_OPACITY;
        if let Some(previous) = self.pending.take() {
            timers.cancel(previous);
        }
        let src = self.thumbnails.active_item().clone();
        self.pending = Some(timers.schedule(
            self.fade,
            GalleryTimer {
                gallery: self.kind,
                src,
            },
        ));
        true
    }

    /// Fade interval elapsed: swap the source in and restore opacity.
    pub fn on_timer(&mut self, timer: GalleryTimer) {
        self.pending = None;
        if let Some(main) = self.main.as_mut() {
            main.src = timer.src;
            main.opacity = 1.0;
        }
    }
}
