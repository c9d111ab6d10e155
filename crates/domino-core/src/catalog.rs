use std::fs;
use std::path::Path;

use anyhow::{Context, anyhow};
use serde::Deserialize;
use tracing::{debug, info};

use crate::filter::TimeframeTag;
use crate::view::SurfaceKind;

/// One selectable option of a location or activity group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogOption {
    pub value: String,
    pub label: String,
    #[serde(default = "default_present")]
    pub desktop: bool,
    #[serde(default = "default_present")]
    pub mobile: bool,
}

impl CatalogOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            desktop: true,
            mobile: true,
        }
    }

    pub fn on(&self, surface: SurfaceKind) -> bool {
        match surface {
            SurfaceKind::Desktop => self.desktop,
            SurfaceKind::Mobile => self.mobile,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeframeOption {
    pub tag: TimeframeTag,
    #[serde(default = "default_present")]
    pub desktop: bool,
    #[serde(default = "default_present")]
    pub mobile: bool,
}

impl TimeframeOption {
    pub fn on(&self, surface: SurfaceKind) -> bool {
        match surface {
            SurfaceKind::Desktop => self.desktop,
            SurfaceKind::Mobile => self.mobile,
        }
    }
}

/// Which options each surface actually renders. An option missing from a
/// surface is a control that does not exist there.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptionCatalog {
    #[serde(default)]
    pub locations: Vec<CatalogOption>,
    #[serde(default)]
    pub activities: Vec<CatalogOption>,
    #[serde(default = "all_timeframes")]
    pub timeframes: Vec<TimeframeOption>,
}

impl Default for OptionCatalog {
    fn default() -> Self {
        Self {
            locations: vec![
                CatalogOption::new("Current location", "Current location"),
                CatalogOption::new("Brooklyn", "Brooklyn"),
                CatalogOption::new("Manhattan", "Manhattan"),
                CatalogOption::new("Queens", "Queens"),
                CatalogOption::new("Hudson Valley", "Hudson Valley"),
            ],
            activities: vec![
                CatalogOption::new("hiking", "Hiking"),
                CatalogOption::new("climbing", "Climbing"),
                CatalogOption::new("kayaking", "Kayaking"),
                CatalogOption::new("biking", "Biking"),
                CatalogOption::new("camping", "Camping"),
            ],
            timeframes: all_timeframes(),
        }
    }
}

impl OptionCatalog {
    #[tracing::instrument]
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            debug!("no catalog file configured; using built-in catalog");
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let catalog = Self::parse(&raw)
            .with_context(|| format!("failed to parse catalog {}", path.display()))?;
        info!(
            file = %path.display(),
            locations = catalog.locations.len(),
            activities = catalog.activities.len(),
            "loaded option catalog"
        );
        Ok(catalog)
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let catalog: Self = toml::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (group, options) in [("locations", &self.locations), ("activities", &self.activities)] {
            let mut seen = std::collections::BTreeSet::new();
            for option in options {
                if option.value.trim().is_empty() {
                    return Err(anyhow!("{group}: option value cannot be empty"));
                }
                if !seen.insert(option.value.as_str()) {
                    return Err(anyhow!("{group}: duplicate option value {:?}", option.value));
                }
            }
        }
        Ok(())
    }
}

fn default_present() -> bool {
    true
}

fn all_timeframes() -> Vec<TimeframeOption> {
    TimeframeTag::ALL
        .into_iter()
        .map(|tag| TimeframeOption {
            tag,
            desktop: true,
            mobile: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_surface_flags() {
        let catalog = OptionCatalog::parse(
            r#"
[[locations]]
value = "brooklyn"
label = "Brooklyn"

[[activities]]
value = "kayaking"
label = "Kayaking"
mobile = false

[[timeframes]]
tag = "today"

[[timeframes]]
tag = "next_few_weekends"
desktop = false
"#,
        )
        .expect("parse catalog");

        assert_eq!(catalog.locations.len(), 1);
        assert!(!catalog.activities[0].on(SurfaceKind::Mobile));
        assert!(catalog.activities[0].on(SurfaceKind::Desktop));
        assert_eq!(catalog.timeframes.len(), 2);
        assert!(!catalog.timeframes[1].on(SurfaceKind::Desktop));
    }

    #[test]
    fn missing_timeframes_default_to_all() {
        let catalog = OptionCatalog::parse("").expect("parse empty");
        assert_eq!(catalog.timeframes.len(), TimeframeTag::ALL.len());
        assert!(catalog.locations.is_empty());
    }

    #[test]
    fn rejects_duplicate_values() {
        let err = OptionCatalog::parse(
            r#"
[[activities]]
value = "hiking"
label = "Hiking"
[[activities]]
value = "hiking"
label = "Hiking again"
"#,
        )
        .expect_err("duplicate should fail");
        assert!(err.to_string().contains("duplicate"));
    }
}
