//! Searching and picking products before generation.

use crate::error::{HangtagError, Result};
use crate::sheet::ProductRecord;

/// Products whose name, order number or product code contains `term`,
/// ignoring case. An empty term matches everything.
pub fn search<'a>(products: &'a [ProductRecord], term: &str) -> Vec<&'a ProductRecord> {
    let needle = term.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.product_name.to_lowercase().contains(&needle)
                || p.order_number.to_lowercase().contains(&needle)
                || p.product_code.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Keep the products whose ids are listed, preserving sheet order.
///
/// Unknown ids are ignored. An empty result is a configuration error since
/// a job needs at least one product.
pub fn select<S: AsRef<str>>(products: &[ProductRecord], ids: &[S]) -> Result<Vec<ProductRecord>> {
    let chosen: Vec<ProductRecord> = products
        .iter()
        .filter(|p| ids.iter().any(|id| id.as_ref() == p.id))
        .cloned()
        .collect();

    if chosen.is_empty() {
        return Err(HangtagError::Configuration(
            "no products selected".to_string(),
        ));
    }
    Ok(chosen)
}
