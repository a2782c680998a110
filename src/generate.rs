//! Landing page generation.
//!
//! Renders the [`LandingPage`] content model into a single HTML document and
//! writes it, together with the site's `assets/` directory, to an output
//! directory the server can serve.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── launch.html                # [server] default_document
//! └── assets/                    # copied verbatim from <site>/assets
//!     ├── screenshots/
//!     └── mobile/
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time and inlined into the page:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/landing.js`: Menu, anchors, tabs, galleries, form, notifications
//!
//! The script reads two objects written ahead of it: `LANDING_SETTINGS`
//! (timings and geometry from config.toml) and `LANDING_MESSAGES` (form
//! labels and notification texts from [`crate::form`]).
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, SiteConfig};
use crate::controller::layout::{GalleryLayout, PageLayout};
use crate::form::{FAILURE_MESSAGE, Field, LOADING_LABEL, SUCCESS_MESSAGE, ValidationError};
use crate::types::{LandingPage, SECTIONS, Screenshot};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("content.toml: {0}")]
    Content(#[from] toml::de::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/landing.js");

/// What a [`generate`] run wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSummary {
    pub document: PathBuf,
    pub assets_copied: usize,
    pub tabs: usize,
    pub screenshots: usize,
    pub reveal_cards: usize,
}

/// Content for a site: `content.toml` in `site_dir` when present, the stock
/// page otherwise.
pub fn load_content(site_dir: &Path, config: &SiteConfig) -> Result<LandingPage, GenerateError> {
    let path = site_dir.join("content.toml");
    if !path.exists() {
        return Ok(LandingPage::stock(&config.site));
    }
    let text = fs::read_to_string(&path)?;
    Ok(toml::from_str(&text)?)
}

pub fn generate(
    page: &LandingPage,
    config: &SiteConfig,
    site_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let document = output_dir.join(&config.server.default_document);
    fs::write(&document, render_page(page, config).into_string())?;
    debug!(path = %document.display(), "page written");

    let assets_copied = copy_assets(&site_dir.join("assets"), &output_dir.join("assets"))?;

    Ok(GenerateSummary {
        document,
        assets_copied,
        tabs: page.tabs.len(),
        screenshots: page.screenshots.len() + page.mobile_screenshots.len(),
        reveal_cards: page.reveal_ids().count(),
    })
}

/// Copy every file under `src` to the same relative path under `dst`.
/// A missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// The DOM contract of the rendered page, for mounting the interaction
/// controller. Geometry is left at zero.
pub fn page_layout(page: &LandingPage) -> PageLayout {
    let gallery = |shots: &[Screenshot]| GalleryLayout {
        thumbnails: shots.iter().map(|s| s.src.clone()).collect(),
        main: shots.first().map(|s| s.src.clone()),
    };
    let tabs: Vec<String> = page.tabs.iter().map(|t| t.name.clone()).collect();

    let mut layout = PageLayout {
        mobile_menu: true,
        tab_contents: tabs.clone(),
        tabs,
        gallery: gallery(&page.screenshots),
        mobile_gallery: gallery(&page.mobile_screenshots),
        request_form: Some(page.request_label.clone()),
        download_buttons: 2,
        login_link: true,
        ..PageLayout::default()
    };
    for id in SECTIONS {
        layout = layout.with_section(id, 0.0);
    }
    for id in page.reveal_ids() {
        layout = layout.with_reveal_card(id, 0.0, 0.0);
    }
    layout
}

/// Form metadata and notification texts for `landing.js`.
pub fn generate_messages_js() -> String {
    let fields: Vec<_> = Field::ALL
        .iter()
        .map(|f| {
            serde_json::json!({
                "id": f.id(),
                "label": f.label(),
                "required": f.is_required(),
                "missing": ValidationError::MissingField(*f).to_string(),
            })
        })
        .collect();
    let messages = serde_json::json!({
        "loading": LOADING_LABEL,
        "success": SUCCESS_MESSAGE,
        "failure": FAILURE_MESSAGE,
        "missingFields": ValidationError::MissingFields(Vec::new()).to_string(),
        "invalidEmail": ValidationError::InvalidEmail.to_string(),
        "fields": fields,
    });
    format!("window.LANDING_MESSAGES = {messages};")
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Fixed header: logo, nav menu, login link and the mobile menu toggle.
fn site_header(page: &LandingPage, app_url: &str) -> Markup {
    html! {
        header.header {
            div.container {
                a.logo href="#home" { (page.title) }
                ul.nav-menu {
                    @for link in &page.nav {
                        li { a href={ "#" (link.target) } { (link.label) } }
                    }
                    li { a.btn.btn-outline id="login-link" href=(app_url) { "Log in" } }
                }
                button.mobile-menu-toggle type="button" aria-label="Menu" {
                    span {}
                    span {}
                    span {}
                }
            }
        }
    }
}

fn hero(page: &LandingPage) -> Markup {
    html! {
        section.hero id="home" {
            div.container {
                h1 { (page.title) }
                p.tagline { (page.tagline) }
                p { (page.hero_text) }
                div.hero-actions {
                    a.btn.btn-primary href="#request" { (page.request_label) }
                    a.btn.btn-outline href="#features" { "Learn more" }
                }
            }
        }
    }
}

fn features(page: &LandingPage) -> Markup {
    html! {
        section id="features" {
            div.container {
                h2.section-title { "Features" }
                div.card-grid {
                    @for feature in &page.features {
                        div.feature-card id=(feature.id) {
                            h3 { (feature.title) }
                            p { (feature.description) }
                        }
                    }
                }
            }
        }
    }
}

/// Tabs plus the desktop gallery. The first tab and thumbnail start active.
fn screenshots(page: &LandingPage) -> Markup {
    html! {
        section id="screenshots" {
            div.container {
                h2.section-title { "See it in action" }
                div.tab-buttons {
                    @for (i, tab) in page.tabs.iter().enumerate() {
                        button.tab-btn.active[i == 0] type="button" data-tab=(tab.name) { (tab.label) }
                    }
                }
                @for (i, tab) in page.tabs.iter().enumerate() {
                    div.tab-content.active[i == 0] data-content=(tab.name) {
                        h3 { (tab.title) }
                        p { (tab.description) }
                        img src=(tab.image) alt=(tab.title) loading="lazy";
                    }
                }
                @if let Some(first) = page.screenshots.first() {
                    div.screenshot-main {
                        img src=(first.src) alt=(first.caption);
                    }
                    div.thumbnails {
                        @for (i, shot) in page.screenshots.iter().enumerate() {
                            div.thumbnail.active[i == 0] data-src=(shot.src) {
                                img src=(shot.src) alt=(shot.caption) loading="lazy";
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Mobile gallery and the store download buttons.
fn mobile(page: &LandingPage) -> Markup {
    html! {
        section id="mobile" {
            div.container {
                h2.section-title { "The driver app" }
                @if let Some(first) = page.mobile_screenshots.first() {
                    div.mobile-main {
                        img src=(first.src) alt=(first.caption);
                    }
                    div.thumbnails {
                        @for (i, shot) in page.mobile_screenshots.iter().enumerate() {
                            div.mobile-thumbnail.active[i == 0] data-src=(shot.src) {
                                img src=(shot.src) alt=(shot.caption) loading="lazy";
                            }
                        }
                    }
                }
                div.download-buttons {
                    a.btn.download-btn.google-play href="#" { "Get it on Google Play" }
                    a.btn.download-btn.app-store href="#" { "Download on the App Store" }
                }
            }
        }
    }
}

fn pricing(page: &LandingPage) -> Markup {
    html! {
        section id="pricing" {
            div.container {
                h2.section-title { "Pricing" }
                div.card-grid {
                    @for plan in &page.plans {
                        div.pricing-card.highlighted[plan.highlighted] id=(plan.id) {
                            h3 { (plan.name) }
                            p {
                                span.price { (plan.price) }
                                " "
                                span.period { "/ " (plan.period) }
                            }
                            ul {
                                @for item in &plan.features {
                                    li { (item) }
                                }
                            }
                            a.btn.btn-primary href="#request" { "Get started" }
                        }
                    }
                }
            }
        }
    }
}

fn benefits(page: &LandingPage) -> Markup {
    html! {
        section id="benefits" {
            div.container {
                h2.section-title { "Why " (page.title) }
                div.card-grid {
                    @for benefit in &page.benefits {
                        div.benefit-item id=(benefit.id) {
                            h3 { (benefit.title) }
                            p { (benefit.description) }
                        }
                    }
                }
            }
        }
    }
}

fn form_field(field: Field) -> Markup {
    let input_type = match field {
        Field::Email => "email",
        Field::Phone => "tel",
        _ => "text",
    };
    html! {
        div.form-group {
            label for=(field.id()) {
                (field.label())
                @if field.is_required() {
                    " " span.required { "*" }
                }
            }
            @match field {
                Field::Message => {
                    textarea id=(field.id()) name=(field.id()) rows="4" {}
                }
                Field::FleetSize => {
                    select id=(field.id()) name=(field.id()) {
                        option value="" { "Select..." }
                        @for range in ["1-5", "6-25", "26-100", "100+"] {
                            option value=(range) { (range) }
                        }
                    }
                }
                _ => {
                    input type=(input_type) id=(field.id()) name=(field.id()) required[field.is_required()];
                }
            }
        }
    }
}

/// Validation happens in `landing.js`, so native validation is disabled.
fn request_form(page: &LandingPage) -> Markup {
    html! {
        section id="request" {
            div.container {
                h2.section-title { "Request your account" }
                form id="requestForm" novalidate {
                    @for field in Field::ALL {
                        (form_field(field))
                    }
                    button.btn.btn-primary type="submit" { (page.request_label) }
                }
            }
        }
    }
}

fn footer(page: &LandingPage) -> Markup {
    html! {
        footer {
            div.container {
                p {
                    "Questions? "
                    a href={ "mailto:" (page.contact_email) } { (page.contact_email) }
                }
                p { a href="#" { "Privacy" } " · " a href="#home" { "Back to top" } }
            }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

pub fn render_page(page: &LandingPage, config: &SiteConfig) -> Markup {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );
    let settings = config::generate_settings_js(config);
    let messages = generate_messages_js();

    let content = html! {
        (site_header(page, &config.site.app_url))
        main {
            (hero(page))
            (features(page))
            (screenshots(page))
            (mobile(page))
            (pricing(page))
            (benefits(page))
            (request_form(page))
        }
        (footer(page))
        script { (PreEscaped(settings)) "\n" (PreEscaped(messages)) }
        script { (PreEscaped(JS)) }
    };

    let title = format!("{} - {}", page.title, page.tagline);
    base_document(&title, &css, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::form::SimulatedSubmission;
    use tempfile::TempDir;

    fn stock() -> (LandingPage, SiteConfig) {
        let config = SiteConfig::default();
        (LandingPage::stock(&config.site), config)
    }

    fn rendered() -> String {
        let (page, config) = stock();
        render_page(&page, &config).into_string()
    }

    #[test]
    fn base_document_includes_doctype() {
        let content = html! { p { "test" } };
        let doc = base_document("Test", "body {}", content).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Test</title>"));
    }

    #[test]
    fn page_title_and_tagline() {
        let html = rendered();
        assert!(html.contains("<title>LogiFlow Pro - Professional logistics management</title>"));
        assert!(html.contains("<h1>LogiFlow Pro</h1>"));
    }

    #[test]
    fn header_has_menu_toggle_and_login_link() {
        let html = rendered();
        assert!(html.contains(r#"class="header""#));
        assert!(html.contains(r#"class="mobile-menu-toggle""#));
        assert!(html.contains(r#"class="nav-menu""#));
        assert!(html.contains(r#"id="login-link""#));
        assert!(html.contains(r#"href="http://localhost:57563""#));
    }

    #[test]
    fn nav_links_are_anchors() {
        let html = rendered();
        assert!(html.contains(r##"href="#features""##));
        assert!(html.contains(r##"href="#pricing""##));
        assert!(html.contains(r##"href="#request""##));
    }

    #[test]
    fn every_section_rendered_once() {
        let html = rendered();
        for id in SECTIONS {
            let needle = format!(r#"id="{id}""#);
            assert_eq!(html.matches(&needle).count(), 1, "section {id}");
        }
    }

    #[test]
    fn first_tab_and_panel_start_active() {
        let html = rendered();
        assert!(html.contains(r#"class="tab-btn active" type="button" data-tab="dashboard""#));
        assert!(html.contains(r#"class="tab-btn" type="button" data-tab="routes""#));
        assert!(html.contains(r#"class="tab-content active" data-content="dashboard""#));
        assert!(html.contains(r#"class="tab-content" data-content="reports""#));
    }

    #[test]
    fn galleries_have_thumbnails_and_main_image() {
        let html = rendered();
        assert!(html.contains(r#"class="screenshot-main""#));
        assert!(
            html.contains(r#"class="thumbnail active" data-src="assets/screenshots/overview.png""#)
        );
        assert!(html.contains(r#"class="mobile-main""#));
        assert!(html.contains(r#"class="mobile-thumbnail" data-src="assets/mobile/proof.png""#));
    }

    #[test]
    fn empty_gallery_renders_no_main_image() {
        let (mut page, config) = stock();
        page.mobile_screenshots.clear();
        let html = render_page(&page, &config).into_string();
        // The inlined stylesheet and script still name these classes.
        assert!(!html.contains(r#"class="mobile-main""#));
        assert!(!html.contains(r#"class="mobile-thumbnail"#));
        assert!(html.contains(r#"class="screenshot-main""#));
    }

    #[test]
    fn form_has_every_field_id() {
        let html = rendered();
        assert!(html.contains(r#"id="requestForm""#));
        for field in Field::ALL {
            assert!(html.contains(&format!(r#"id="{}""#, field.id())), "{field}");
        }
        assert!(html.contains(r#"type="submit""#));
        assert!(html.contains("novalidate"));
    }

    #[test]
    fn required_marker_only_on_required_fields() {
        let html = form_field(Field::Email).into_string();
        assert!(html.contains(r#"type="email""#));
        assert!(html.contains("required"));
        let html = form_field(Field::Message).into_string();
        assert!(html.contains("<textarea"));
        assert!(!html.contains("required"));
    }

    #[test]
    fn reveal_cards_and_download_buttons() {
        let html = rendered();
        assert!(html.contains(r#"class="feature-card" id="feature-routes""#));
        assert!(html.contains(r#"class="pricing-card highlighted" id="plan-business""#));
        assert!(html.contains(r#"class="benefit-item" id="benefit-costs""#));
        assert!(html.contains("download-btn google-play"));
        assert!(html.contains("download-btn app-store"));
    }

    #[test]
    fn colors_settings_and_script_inlined() {
        let html = rendered();
        assert!(html.contains("--color-brand: #5170FF;"));
        assert!(html.contains("window.LANDING_SETTINGS = "));
        assert!(html.contains("window.LANDING_MESSAGES = "));
        assert!(html.contains("DOMContentLoaded"));
    }

    #[test]
    fn messages_match_form_texts() {
        let js = generate_messages_js();
        assert!(js.contains(SUCCESS_MESSAGE));
        assert!(js.contains(LOADING_LABEL));
        assert!(js.contains(r#""id":"fleetSize""#));
        assert!(js.contains("Please complete the required field: Full name"));
        assert!(js.contains("Please enter a valid email address"));
    }

    #[test]
    fn content_is_escaped() {
        let (mut page, config) = stock();
        page.title = "<script>alert('xss')</script>".to_string();
        let html = render_page(&page, &config).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn layout_matches_rendered_page() {
        let (page, _) = stock();
        let layout = page_layout(&page);
        assert!(layout.mobile_menu);
        assert_eq!(layout.tabs, ["dashboard", "routes", "drivers", "reports"]);
        assert_eq!(layout.tab_contents, layout.tabs);
        assert_eq!(layout.gallery.thumbnails.len(), 3);
        assert_eq!(layout.gallery.main.as_deref(), Some("assets/screenshots/overview.png"));
        assert_eq!(layout.request_form.as_deref(), Some("Request account"));
        assert_eq!(layout.sections.len(), SECTIONS.len());
        assert_eq!(layout.reveal_cards.len(), 10);
    }

    #[test]
    fn layout_mounts_controller() {
        let (page, config) = stock();
        let controller = Controller::mount(
            &page_layout(&page),
            &config,
            Box::new(SimulatedSubmission::default()),
        )
        .unwrap();
        assert_eq!(controller.active_tab(), Some("dashboard"));
        assert_eq!(controller.surfaces().len(), 10);
    }

    #[test]
    fn generate_writes_default_document() {
        let site = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let (page, config) = stock();

        let summary = generate(&page, &config, site.path(), out.path()).unwrap();
        assert_eq!(summary.document, out.path().join("launch.html"));
        assert_eq!(summary.assets_copied, 0);
        assert_eq!(summary.tabs, 4);
        assert_eq!(summary.screenshots, 6);

        let written = fs::read_to_string(&summary.document).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn generate_copies_assets_tree() {
        let site = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(site.path().join("assets/screenshots")).unwrap();
        fs::write(site.path().join("assets/logo.svg"), "<svg/>").unwrap();
        fs::write(site.path().join("assets/screenshots/map.png"), [0u8; 4]).unwrap();
        let (page, config) = stock();

        let summary = generate(&page, &config, site.path(), out.path()).unwrap();
        assert_eq!(summary.assets_copied, 2);
        assert!(out.path().join("assets/logo.svg").exists());
        assert!(out.path().join("assets/screenshots/map.png").exists());
    }

    #[test]
    fn load_content_defaults_to_stock() {
        let site = TempDir::new().unwrap();
        let config = SiteConfig::default();
        let page = load_content(site.path(), &config).unwrap();
        assert_eq!(page, LandingPage::stock(&config.site));
    }

    #[test]
    fn load_content_reads_content_toml() {
        let site = TempDir::new().unwrap();
        let config = SiteConfig::default();
        let mut custom = LandingPage::stock(&config.site);
        custom.title = "Acme Fleet".into();
        custom.tabs.truncate(1);
        fs::write(
            site.path().join("content.toml"),
            toml::to_string(&custom).unwrap(),
        )
        .unwrap();

        let page = load_content(site.path(), &config).unwrap();
        assert_eq!(page.title, "Acme Fleet");
        assert_eq!(page.tabs.len(), 1);
    }

    #[test]
    fn load_content_rejects_unknown_keys() {
        let site = TempDir::new().unwrap();
        fs::write(site.path().join("content.toml"), "bogus = 1\n").unwrap();
        let result = load_content(site.path(), &SiteConfig::default());
        assert!(matches!(result, Err(GenerateError::Content(_))));
    }
}
