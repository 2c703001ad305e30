//! Label styles and per-job settings.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HangtagError, Result};

/// Visual variant of a hang tag. Each enabled style gets its own labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    Chinese,
    English,
    Silver,
}

impl LabelStyle {
    /// All styles in generation order.
    pub const ALL: [LabelStyle; 3] = [LabelStyle::Chinese, LabelStyle::English, LabelStyle::Silver];

    /// Suffix appended to the product name in the label title.
    pub fn suffix(self) -> &'static str {
        match self {
            LabelStyle::Chinese => "中文吊牌",
            LabelStyle::English => "英文吊牌",
            LabelStyle::Silver => "烫银吊牌",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LabelStyle::Chinese => "chinese",
            LabelStyle::English => "english",
            LabelStyle::Silver => "silver",
        }
    }
}

impl fmt::Display for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LabelStyle {
    type Err = HangtagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chinese" | "cn" => Ok(LabelStyle::Chinese),
            "english" | "en" => Ok(LabelStyle::English),
            "silver" => Ok(LabelStyle::Silver),
            other => Err(HangtagError::Configuration(format!(
                "unknown label style '{}' (expected chinese, english or silver)",
                other
            ))),
        }
    }
}

/// Enabled subset of [`LabelStyle`], one flag per style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSet {
    #[serde(default)]
    pub chinese: bool,
    #[serde(default)]
    pub english: bool,
    #[serde(default)]
    pub silver: bool,
}

impl StyleSet {
    pub const ALL: Self = Self {
        chinese: true,
        english: true,
        silver: true,
    };

    pub const NONE: Self = Self {
        chinese: false,
        english: false,
        silver: false,
    };

    pub fn contains(&self, style: LabelStyle) -> bool {
        match style {
            LabelStyle::Chinese => self.chinese,
            LabelStyle::English => self.english,
            LabelStyle::Silver => self.silver,
        }
    }

    pub fn insert(&mut self, style: LabelStyle) {
        match style {
            LabelStyle::Chinese => self.chinese = true,
            LabelStyle::English => self.english = true,
            LabelStyle::Silver => self.silver = true,
        }
    }

    /// Enabled styles in generation order.
    pub fn enabled(&self) -> Vec<LabelStyle> {
        LabelStyle::ALL
            .into_iter()
            .filter(|s| self.contains(*s))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.enabled().len()
    }

    /// Parse a comma-separated list such as `"chinese,silver"`.
    pub fn parse_list(list: &str) -> Result<Self> {
        let mut set = Self::NONE;
        for part in list.split(',').filter(|p| !p.trim().is_empty()) {
            set.insert(part.parse()?);
        }
        Ok(set)
    }
}

impl Default for StyleSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromIterator<LabelStyle> for StyleSet {
    fn from_iter<I: IntoIterator<Item = LabelStyle>>(iter: I) -> Self {
        let mut set = Self::NONE;
        for style in iter {
            set.insert(style);
        }
        set
    }
}

/// Spare labels per product per style, unless configured otherwise.
pub const DEFAULT_SPARE_QUANTITY: i64 = 200;

/// Font size of the product name row, unless configured otherwise.
pub const DEFAULT_PRIMARY_FONT_SIZE: f32 = 10.0;

/// Settings for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelJobConfig {
    /// Quantity printed on each spare label; `<= 0` leaves it blank
    pub spare_quantity_per_style: i64,
    /// Font size (pt) of the product name row
    pub primary_font_size: f32,
    pub enabled_styles: StyleSet,
}

impl Default for LabelJobConfig {
    fn default() -> Self {
        Self {
            spare_quantity_per_style: DEFAULT_SPARE_QUANTITY,
            primary_font_size: DEFAULT_PRIMARY_FONT_SIZE,
            enabled_styles: StyleSet::ALL,
        }
    }
}

impl LabelJobConfig {
    /// Load a job configuration from a JSON file. Missing keys take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            HangtagError::Configuration(format!("invalid job config {}: {}", path.display(), e))
        })
    }

    /// Check the values a settings form must enforce before generation.
    ///
    /// The generator itself never clamps these.
    pub fn validate(&self) -> Result<()> {
        if self.spare_quantity_per_style < 0 {
            return Err(HangtagError::Configuration(
                "spare quantity must not be negative".to_string(),
            ));
        }
        if !(self.primary_font_size.is_finite() && self.primary_font_size > 0.0) {
            return Err(HangtagError::Configuration(
                "product name font size must be positive".to_string(),
            ));
        }
        if self.enabled_styles.count() == 0 {
            return Err(HangtagError::Configuration(
                "at least one label style must be enabled".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_style_order_and_suffix() {
        let set = StyleSet {
            chinese: false,
            english: true,
            silver: true,
        };
        assert_eq!(set.enabled(), vec![LabelStyle::English, LabelStyle::Silver]);
        assert_eq!(LabelStyle::Silver.suffix(), "烫银吊牌");
    }

    #[test]
    fn test_parse_list() {
        let set = StyleSet::parse_list("silver, chinese").unwrap();
        assert_eq!(set.enabled(), vec![LabelStyle::Chinese, LabelStyle::Silver]);
        assert!(StyleSet::parse_list("gold").is_err());
        assert_eq!(StyleSet::parse_list("").unwrap(), StyleSet::NONE);
    }

    #[test]
    fn test_default_config() {
        let config = LabelJobConfig::default();
        assert_eq!(config.spare_quantity_per_style, 200);
        assert_eq!(config.enabled_styles.count(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative = LabelJobConfig {
            spare_quantity_per_style: -1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let zero_font = LabelJobConfig {
            primary_font_size: 0.0,
            ..Default::default()
        };
        assert!(zero_font.validate().is_err());

        let no_styles = LabelJobConfig {
            enabled_styles: StyleSet::NONE,
            ..Default::default()
        };
        assert!(matches!(
            no_styles.validate(),
            Err(HangtagError::Configuration(_))
        ));
    }

    #[test]
    fn test_config_json_defaults() {
        let config: LabelJobConfig =
            serde_json::from_str(r#"{"spareQuantityPerStyle": 50, "enabledStyles": {"english": true}}"#)
                .unwrap();
        assert_eq!(config.spare_quantity_per_style, 50);
        assert_eq!(config.primary_font_size, DEFAULT_PRIMARY_FONT_SIZE);
        assert_eq!(config.enabled_styles.enabled(), vec![LabelStyle::English]);
    }
}
