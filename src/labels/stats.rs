//! Label counts shown before a job is generated.

use serde::Serialize;

use super::config::LabelJobConfig;
use super::package::PackagePlan;
use crate::sheet::ProductRecord;

/// How many labels a job will produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStats {
    pub selected_products: usize,
    pub enabled_styles: usize,
    /// Package labels across all styles
    pub regular_labels: usize,
    /// Spare labels across all styles
    pub spare_labels: usize,
    pub total_labels: usize,
}

impl LabelStats {
    /// Count labels per product, matching what [`super::expand`] emits.
    pub fn compute(products: &[ProductRecord], config: &LabelJobConfig) -> Self {
        let styles = config.enabled_styles.count();
        let packages: usize = products
            .iter()
            .map(|p| PackagePlan::for_quantity(p.quantity).len())
            .sum();

        let regular_labels = packages * styles;
        let spare_labels = products.len() * styles;
        Self {
            selected_products: products.len(),
            enabled_styles: styles,
            regular_labels,
            spare_labels,
            total_labels: regular_labels + spare_labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::expand;

    fn product(quantity: u32) -> ProductRecord {
        ProductRecord {
            id: "product-1".into(),
            product_name: "Hat".into(),
            order_number: String::new(),
            product_code: String::new(),
            quantity,
            remarks: String::new(),
        }
    }

    #[test]
    fn test_stats_match_expansion() {
        let products = vec![product(12000), product(300), product(0)];
        let config = LabelJobConfig::default();
        let stats = LabelStats::compute(&products, &config);
        assert_eq!(stats.regular_labels, (3 + 1) * 3);
        assert_eq!(stats.spare_labels, 3 * 3);
        assert_eq!(stats.total_labels, expand(&products, &config).unwrap().len());
    }

    #[test]
    fn test_stats_counted_per_product() {
        // Pooling the 9000 total would give two packages; each product needs its own.
        let products = vec![product(3000), product(3000), product(3000)];
        let stats = LabelStats::compute(&products, &LabelJobConfig::default());
        assert_eq!(stats.regular_labels, 3 * 3);
    }
}
