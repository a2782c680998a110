//! Content model of the landing page.
//!
//! Rendering ([`crate::generate`]) and the interaction controller's page
//! layout ([`crate::generate::page_layout`]) both read these types, so the
//! tab names, thumbnail sources and section ids the controller mounts
//! against are exactly the ones in the markup.
//!
//! The stock content is compiled in. A site directory can replace it with a
//! `content.toml` of the same shape.

use crate::config::SiteInfo;
use serde::{Deserialize, Serialize};

/// Entry in the header navigation; `target` is a section id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// A `.tab-btn` and its `.tab-content` panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenshotTab {
    /// Shared `data-tab` / `data-content` value.
    pub name: String,
    pub label: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

/// A gallery thumbnail; `src` becomes its `data-src`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Screenshot {
    pub src: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price: String,
    pub period: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Benefit {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LandingPage {
    pub title: String,
    pub tagline: String,
    pub hero_text: String,
    pub contact_email: String,
    /// Label of the request form's submit button.
    pub request_label: String,
    pub nav: Vec<NavLink>,
    pub features: Vec<Feature>,
    pub tabs: Vec<ScreenshotTab>,
    pub screenshots: Vec<Screenshot>,
    pub mobile_screenshots: Vec<Screenshot>,
    pub plans: Vec<Plan>,
    pub benefits: Vec<Benefit>,
}

/// Fixed section ids, in page order.
pub const SECTIONS: [&str; 7] = [
    "home",
    "features",
    "screenshots",
    "mobile",
    "pricing",
    "benefits",
    "request",
];

fn text(s: &str) -> String {
    s.to_string()
}

fn shot(src: &str, caption: &str) -> Screenshot {
    Screenshot {
        src: text(src),
        caption: text(caption),
    }
}

impl LandingPage {
    /// The built-in LogiFlow Pro page, titled from `[site]`.
    pub fn stock(site: &SiteInfo) -> Self {
        let feature = |id: &str, title: &str, description: &str| Feature {
            id: text(id),
            title: text(title),
            description: text(description),
        };
        let tab = |name: &str, label: &str, title: &str, description: &str| ScreenshotTab {
            name: text(name),
            label: text(label),
            title: text(title),
            description: text(description),
            image: format!("assets/screenshots/{name}.png"),
        };
        let benefit = |id: &str, title: &str, description: &str| Benefit {
            id: text(id),
            title: text(title),
            description: text(description),
        };

        Self {
            title: site.name.clone(),
            tagline: site.tagline.clone(),
            hero_text: text(
                "Plan routes, dispatch drivers and track every delivery in real time \
                 from a single dashboard.",
            ),
            contact_email: site.contact_email.clone(),
            request_label: text("Request account"),
            nav: vec![
                NavLink { label: text("Features"), target: text("features") },
                NavLink { label: text("Screenshots"), target: text("screenshots") },
                NavLink { label: text("Pricing"), target: text("pricing") },
                NavLink { label: text("Request account"), target: text("request") },
            ],
            features: vec![
                feature("feature-routes", "Route planning", "Optimized multi-stop routes for every driver."),
                feature("feature-tracking", "Live tracking", "See where each package is at any moment."),
                feature("feature-drivers", "Driver app", "Proof of delivery with photos and signatures."),
                feature("feature-reports", "Reports", "Daily performance and delivery success rates."),
            ],
            tabs: vec![
                tab("dashboard", "Dashboard", "Operations at a glance", "Pending, in-transit and delivered packages on one screen."),
                tab("routes", "Routes", "Route management", "Assign stops and rebalance routes as the day unfolds."),
                tab("drivers", "Drivers", "Driver management", "Availability, vehicles and workload for the whole fleet."),
                tab("reports", "Reports", "Analytics", "Export delivery history and service level metrics."),
            ],
            screenshots: vec![
                shot("assets/screenshots/overview.png", "Overview"),
                shot("assets/screenshots/map.png", "Live map"),
                shot("assets/screenshots/packages.png", "Packages"),
            ],
            mobile_screenshots: vec![
                shot("assets/mobile/stops.png", "Today's stops"),
                shot("assets/mobile/navigation.png", "Navigation"),
                shot("assets/mobile/proof.png", "Proof of delivery"),
            ],
            plans: vec![
                Plan {
                    id: text("plan-starter"),
                    name: text("Starter"),
                    price: text("$49"),
                    period: text("month"),
                    features: vec![text("Up to 5 drivers"), text("Route planning"), text("Email support")],
                    highlighted: false,
                },
                Plan {
                    id: text("plan-business"),
                    name: text("Business"),
                    price: text("$149"),
                    period: text("month"),
                    features: vec![
                        text("Up to 25 drivers"),
                        text("Live tracking"),
                        text("Driver app"),
                        text("Priority support"),
                    ],
                    highlighted: true,
                },
                Plan {
                    id: text("plan-enterprise"),
                    name: text("Enterprise"),
                    price: text("Custom"),
                    period: text("year"),
                    features: vec![text("Unlimited drivers"), text("API access"), text("Dedicated manager")],
                    highlighted: false,
                },
            ],
            benefits: vec![
                benefit("benefit-costs", "Lower costs", "Shorter routes mean less fuel and fewer hours."),
                benefit("benefit-customers", "Happier customers", "Accurate delivery windows and notifications."),
                benefit("benefit-visibility", "Full visibility", "Every package, driver and route in one place."),
            ],
        }
    }

    /// Ids of every reveal-on-scroll card, in page order.
    pub fn reveal_ids(&self) -> impl Iterator<Item = &str> {
        self.features
            .iter()
            .map(|f| f.id.as_str())
            .chain(self.plans.iter().map(|p| p.id.as_str()))
            .chain(self.benefits.iter().map(|b| b.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_takes_site_identity() {
        let site = SiteInfo {
            name: "Acme Routes".into(),
            ..SiteInfo::default()
        };
        let page = LandingPage::stock(&site);
        assert_eq!(page.title, "Acme Routes");
        assert_eq!(page.contact_email, site.contact_email);
    }

    #[test]
    fn stock_nav_targets_known_sections() {
        let page = LandingPage::stock(&SiteInfo::default());
        for link in &page.nav {
            assert!(SECTIONS.contains(&link.target.as_str()), "{}", link.target);
        }
    }

    #[test]
    fn stock_tab_names_unique() {
        let page = LandingPage::stock(&SiteInfo::default());
        let mut names: Vec<_> = page.tabs.iter().map(|t| t.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), page.tabs.len());
    }

    #[test]
    fn reveal_ids_cover_all_cards() {
        let page = LandingPage::stock(&SiteInfo::default());
        let ids: Vec<_> = page.reveal_ids().collect();
        assert_eq!(
            ids.len(),
            page.features.len() + page.plans.len() + page.benefits.len()
        );
        assert_eq!(ids[0], "feature-routes");
        assert_eq!(ids.last(), Some(&"benefit-visibility"));
    }

    #[test]
    fn content_round_trips_through_toml() {
        let page = LandingPage::stock(&SiteInfo::default());
        let toml = toml::to_string(&page).unwrap();
        let back: LandingPage = toml::from_str(&toml).unwrap();
        assert_eq!(back, page);
    }
}
