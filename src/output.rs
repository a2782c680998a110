//! CLI output formatting for all commands.
//!
//! # Output Format
//!
//! ## Serve
//!
//! ```text
//! LogiFlow Pro
//!     Landing: http://127.0.0.1:3000
//!     App: http://localhost:57563
//!     Root: dist
//! Press Ctrl+C to stop
//! ```
//!
//! ## Generate
//!
//! ```text
//! LogiFlow Pro → dist/launch.html
//! Tabs
//!     001 Dashboard
//!         data-tab: dashboard
//! Screenshots
//!     001 Overview
//!         Source: assets/screenshots/overview.png
//!
//! Generated 1 page, 4 tabs, 6 screenshots, 10 reveal cards, 3 assets
//! ```
//!
//! ## Check
//!
//! ```text
//! Surfaces
//!     001 mobile menu
//!     002 anchor links
//!     ...
//! Active tab: dashboard
//!
//! Mounted 10 surfaces
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::controller::Controller;
use crate::generate::GenerateSummary;
use crate::types::{LandingPage, Screenshot};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Serve
// ============================================================================

pub fn format_server_banner(site_name: &str, url: &str, app_url: &str, root: &str) -> Vec<String> {
    vec![
        site_name.to_string(),
        format!("{}Landing: {}", indent(1), url),
        format!("{}App: {}", indent(1), app_url),
        format!("{}Root: {}", indent(1), root),
        "Press Ctrl+C to stop".to_string(),
    ]
}

pub fn print_server_banner(site_name: &str, url: &str, app_url: &str, root: &str) {
    for line in format_server_banner(site_name, url, app_url, root) {
        println!("{}", line);
    }
}

pub fn format_shutdown() -> Vec<String> {
    vec!["Server closed".to_string()]
}

pub fn print_shutdown() {
    for line in format_shutdown() {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

fn screenshot_lines(heading: &str, shots: &[Screenshot], lines: &mut Vec<String>) {
    if shots.is_empty() {
        return;
    }
    lines.push(heading.to_string());
    for (i, shot) in shots.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), shot.caption));
        lines.push(format!("{}Source: {}", indent(2), shot.src));
    }
}

pub fn format_generate_output(page: &LandingPage, summary: &GenerateSummary) -> Vec<String> {
    let mut lines = vec![format!("{} → {}", page.title, summary.document.display())];

    if !page.tabs.is_empty() {
        lines.push("Tabs".to_string());
        for (i, tab) in page.tabs.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), tab.label));
            lines.push(format!("{}data-tab: {}", indent(2), tab.name));
        }
    }
    screenshot_lines("Screenshots", &page.screenshots, &mut lines);
    screenshot_lines("Mobile screenshots", &page.mobile_screenshots, &mut lines);

    lines.push(String::new());
    lines.push(format!(
        "Generated 1 page, {}, {}, {}, {}",
        plural(summary.tabs, "tab"),
        plural(summary.screenshots, "screenshot"),
        plural(summary.reveal_cards, "reveal card"),
        plural(summary.assets_copied, "asset"),
    ));
    lines
}

pub fn print_generate_output(page: &LandingPage, summary: &GenerateSummary) {
    for line in format_generate_output(page, summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(controller: &Controller) -> Vec<String> {
    let surfaces = controller.surfaces();
    let mut lines = vec!["Surfaces".to_string()];
    for (i, surface) in surfaces.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), surface));
    }
    if let Some(tab) = controller.active_tab() {
        lines.push(format!("Active tab: {}", tab));
    }
    lines.push(String::new());
    lines.push(format!("Mounted {}", plural(surfaces.len(), "surface")));
    lines
}

pub fn print_check_output(controller: &Controller) {
    for line in format_check_output(controller) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::controller::PageLayout;
    use crate::form::SimulatedSubmission;
    use std::path::PathBuf;

    fn summary() -> GenerateSummary {
        GenerateSummary {
            document: PathBuf::from("dist/launch.html"),
            assets_copied: 1,
            tabs: 4,
            screenshots: 6,
            reveal_cards: 10,
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "tab"), "1 tab");
        assert_eq!(plural(0, "tab"), "0 tabs");
        assert_eq!(plural(3, "reveal card"), "3 reveal cards");
    }

    #[test]
    fn server_banner_lists_urls() {
        let lines = format_server_banner(
            "LogiFlow Pro",
            "http://127.0.0.1:3000",
            "http://localhost:57563",
            "dist",
        );
        assert_eq!(lines[0], "LogiFlow Pro");
        assert_eq!(lines[1], "    Landing: http://127.0.0.1:3000");
        assert_eq!(lines[2], "    App: http://localhost:57563");
        assert_eq!(lines[3], "    Root: dist");
        assert_eq!(lines.last().unwrap(), "Press Ctrl+C to stop");
    }

    #[test]
    fn shutdown_line() {
        assert_eq!(format_shutdown(), vec!["Server closed"]);
    }

    #[test]
    fn generate_output_lists_tabs_and_screenshots() {
        let page = LandingPage::stock(&SiteConfig::default().site);
        let lines = format_generate_output(&page, &summary());

        assert_eq!(lines[0], "LogiFlow Pro → dist/launch.html");
        assert_eq!(lines[1], "Tabs");
        assert_eq!(lines[2], "    001 Dashboard");
        assert_eq!(lines[3], "        data-tab: dashboard");
        assert!(lines.contains(&"Screenshots".to_string()));
        assert!(lines.contains(&"Mobile screenshots".to_string()));
        assert!(lines.contains(&"        Source: assets/mobile/proof.png".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated 1 page, 4 tabs, 6 screenshots, 10 reveal cards, 1 asset"
        );
    }

    #[test]
    fn generate_output_skips_empty_sections() {
        let mut page = LandingPage::stock(&SiteConfig::default().site);
        page.tabs.clear();
        page.mobile_screenshots.clear();
        let lines = format_generate_output(&page, &summary());
        assert!(!lines.contains(&"Tabs".to_string()));
        assert!(!lines.contains(&"Mobile screenshots".to_string()));
        assert!(lines.contains(&"Screenshots".to_string()));
    }

    #[test]
    fn check_output_numbers_surfaces() {
        let layout = PageLayout::default().with_tabs(&["a", "b"]);
        let controller = Controller::mount(
            &layout,
            &SiteConfig::default(),
            Box::new(SimulatedSubmission::default()),
        )
        .unwrap();
        let lines = format_check_output(&controller);
        assert_eq!(
            lines,
            vec![
                "Surfaces",
                "    001 anchor links",
                "    002 header scroll effect",
                "    003 screenshot tabs",
                "Active tab: a",
                "",
                "Mounted 3 surfaces",
            ]
        );
    }
}
