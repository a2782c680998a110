//! Outbound links: app store download buttons and the login link.

use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    /// `.google-play` buttons are Android; every other download button is iOS.
    pub fn from_button_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Self {
        if classes.into_iter().any(|c| c == "google-play") {
            Platform::Android
        } else {
            Platform::Ios
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Android => "Android",
            Platform::Ios => "iOS",
        })
    }
}

/// Counts download clicks and logs them. There is no analytics transport.
#[derive(Debug, Clone, Default)]
pub struct DownloadTracker {
    android: usize,
    ios: usize,
}

impl DownloadTracker {
    pub fn record(&mut self, platform: Platform) {
        match platform {
            Platform::Android => self.android += 1,
            Platform::Ios => self.ios += 1,
        }
        info!(%platform, "download clicked");
    }

    pub fn count(&self, platform: Platform) -> usize {
        match platform {
            Platform::Android => self.android,
            Platform::Ios => self.ios,
        }
    }
}

/// Where the page is being viewed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Scheme, host and port, e.g. `https://acme.github.io`.
    pub origin: String,
    pub host: String,
}

/// Target resolution for `#login-link`.
#[derive(Debug, Clone)]
pub struct LoginLink {
    app_url: String,
    pages_base: String,
}

impl LoginLink {
    pub fn new(app_url: impl Into<String>, pages_base: impl Into<String>) -> Self {
        Self {
            app_url: app_url.into(),
            pages_base: pages_base.into(),
        }
    }

    /// On GitHub Pages, link to the bundled app when it was deployed
    /// (`app_bundle_present`) and to the project root otherwise. Anywhere
    /// else, link to the local app.
    pub fn resolve(&self, location: &Location, app_bundle_present: bool) -> String {
        if !location.host.contains("github.io") {
            return self.app_url.clone();
        }
        let base = format!(
            "{}/{}/",
            location.origin.trim_end_matches('/'),
            self.pages_base.trim_matches('/')
        );
        if app_bundle_present {
            format!("{base}app/")
        } else {
            base
        }
    }

    /// Path probed to decide whether the app bundle was deployed.
    pub fn probe_path(&self) -> String {
        format!("/{}/app/index.html", self.pages_base.trim_matches('/'))
    }
}
