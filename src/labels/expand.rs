//! Expansion of products into the ordered list of printable labels.

use serde::Serialize;
use tracing::debug;

use super::config::{LabelJobConfig, LabelStyle};
use super::package::PackagePlan;
use crate::error::{HangtagError, Result};
use crate::sheet::ProductRecord;

/// Title suffix marking a spare label.
pub const SPARE_SUFFIX: &str = "备品";

/// Captions of the five label rows, top to bottom.
pub const ROW_CAPTIONS: [&str; 5] = ["品 名", "订单号", "货 号", "数 量", "备 注"];

/// One fully specified printable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelInstance {
    pub title: String,
    pub order_number: String,
    pub product_code: String,
    pub quantity_text: String,
    pub remarks: String,
    pub style: LabelStyle,
    pub is_spare: bool,
}

/// A caption/value pair as drawn in one table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRow<'a> {
    pub caption: &'static str,
    pub value: &'a str,
    /// Only the product name row uses the configurable font size.
    pub is_primary: bool,
}

impl LabelInstance {
    /// Build the label for one product/style with the given quantity.
    pub fn new(product: &ProductRecord, style: LabelStyle, quantity: i64, is_spare: bool) -> Self {
        let title = if is_spare {
            format!("{}-{}-{}", product.product_name, style.suffix(), SPARE_SUFFIX)
        } else {
            format!("{}-{}", product.product_name, style.suffix())
        };

        Self {
            title,
            order_number: product.order_number.clone(),
            product_code: product.product_code.clone(),
            quantity_text: quantity_text(quantity),
            remarks: product.remarks.clone(),
            style,
            is_spare,
        }
    }

    /// The five table rows in drawing order.
    pub fn rows(&self) -> [LabelRow<'_>; 5] {
        let values = [
            self.title.as_str(),
            self.order_number.as_str(),
            self.product_code.as_str(),
            self.quantity_text.as_str(),
            self.remarks.as_str(),
        ];
        std::array::from_fn(|i| LabelRow {
            caption: ROW_CAPTIONS[i],
            value: values[i],
            is_primary: i == 0,
        })
    }
}

/// `"{n}张"`, or empty for non-positive quantities.
pub fn quantity_text(quantity: i64) -> String {
    if quantity > 0 {
        format!("{}张", quantity)
    } else {
        String::new()
    }
}

/// Expand products into label instances.
///
/// For each product, in order: one label per package per enabled style,
/// then one spare per enabled style. Every product therefore yields
/// `(packages + 1) * styles` labels, and pages follow this exact order.
///
/// Fails with [`HangtagError::Configuration`] when no style is enabled.
pub fn expand(products: &[ProductRecord], config: &LabelJobConfig) -> Result<Vec<LabelInstance>> {
    let styles = config.enabled_styles.enabled();
    if styles.is_empty() {
        return Err(HangtagError::Configuration(
            "no label styles enabled; select at least one style".to_string(),
        ));
    }

    let mut instances = Vec::new();
    for product in products {
        let plan = PackagePlan::for_quantity(product.quantity);
        debug!(product = %product.product_name, packages = plan.len(), "expanding product");

        for package in plan {
            for &style in &styles {
                instances.push(LabelInstance::new(product, style, i64::from(package), false));
            }
        }
        for &style in &styles {
            instances.push(LabelInstance::new(
                product,
                style,
                config.spare_quantity_per_style,
                true,
            ));
        }
    }

    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::StyleSet;
    use pretty_assertions::assert_eq;

    fn product(name: &str, quantity: u32) -> ProductRecord {
        ProductRecord {
            id: format!("product-{}", name),
            product_name: name.to_string(),
            order_number: "SO-1".to_string(),
            product_code: "C-1".to_string(),
            quantity,
            remarks: "B1".to_string(),
        }
    }

    #[test]
    fn test_zero_quantity_only_spare() {
        let config = LabelJobConfig {
            spare_quantity_per_style: 200,
            enabled_styles: [LabelStyle::Chinese].into_iter().collect(),
            ..Default::default()
        };
        let labels = expand(&[product("Hat", 0)], &config).unwrap();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].is_spare);
        assert_eq!(labels[0].quantity_text, "200张");
        assert_eq!(labels[0].title, "Hat-中文吊牌-备品");
    }

    #[test]
    fn test_ordering_regular_then_spares_per_product() {
        let config = LabelJobConfig {
            enabled_styles: [LabelStyle::Chinese, LabelStyle::Silver].into_iter().collect(),
            ..Default::default()
        };
        let labels = expand(&[product("T-Shirt", 7000), product("Hat", 10)], &config).unwrap();
        let titles: Vec<(&str, &str)> = labels
            .iter()
            .map(|l| (l.title.as_str(), l.quantity_text.as_str()))
            .collect();
        assert_eq!(
            titles,
            vec![
                ("T-Shirt-中文吊牌", "5000张"),
                ("T-Shirt-烫银吊牌", "5000张"),
                ("T-Shirt-中文吊牌", "2000张"),
                ("T-Shirt-烫银吊牌", "2000张"),
                ("T-Shirt-中文吊牌-备品", "200张"),
                ("T-Shirt-烫银吊牌-备品", "200张"),
                ("Hat-中文吊牌", "10张"),
                ("Hat-烫银吊牌", "10张"),
                ("Hat-中文吊牌-备品", "200张"),
                ("Hat-烫银吊牌-备品", "200张"),
            ]
        );
    }

    #[test]
    fn test_instance_count_formula() {
        let products = vec![product("A", 0), product("B", 5000), product("C", 12001)];
        for styles in [
            StyleSet::ALL,
            [LabelStyle::English].into_iter().collect::<StyleSet>(),
        ] {
            let config = LabelJobConfig {
                enabled_styles: styles,
                ..Default::default()
            };
            let expected: usize = products
                .iter()
                .map(|p| (p.quantity.div_ceil(5000) as usize + 1) * styles.count())
                .sum();
            assert_eq!(expand(&products, &config).unwrap().len(), expected);
        }
    }

    #[test]
    fn test_zero_styles_is_configuration_error() {
        let config = LabelJobConfig {
            enabled_styles: StyleSet::NONE,
            ..Default::default()
        };
        let err = expand(&[product("Hat", 10)], &config).unwrap_err();
        assert!(matches!(err, HangtagError::Configuration(_)));
    }

    #[test]
    fn test_spare_quantity_zero_is_blank() {
        let config = LabelJobConfig {
            spare_quantity_per_style: 0,
            enabled_styles: [LabelStyle::English].into_iter().collect(),
            ..Default::default()
        };
        let labels = expand(&[product("Hat", 0)], &config).unwrap();
        assert_eq!(labels[0].quantity_text, "");
    }

    #[test]
    fn test_rows() {
        let label = LabelInstance::new(&product("Hat", 1), LabelStyle::English, 1, false);
        let rows = label.rows();
        assert_eq!(rows[0].caption, "品 名");
        assert_eq!(rows[0].value, "Hat-英文吊牌");
        assert!(rows[0].is_primary);
        assert!(rows[1..].iter().all(|r| !r.is_primary));
        assert_eq!(rows[3].value, "1张");
        assert_eq!(rows[4].value, "B1");
    }
}
