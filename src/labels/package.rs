//! Splitting order quantities into capped packages.

/// Largest quantity a single package label may carry.
pub const PACKAGE_CAP: u32 = 5000;

/// Ordered package sizes for one product.
///
/// Every entry is in `1..=cap`; entries sum to the original total. All
/// packages are full except possibly the last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagePlan(Vec<u32>);

impl PackagePlan {
    /// Split `total` into packages of at most `cap`.
    ///
    /// Totals of zero or below give an empty plan.
    ///
    /// ```
    /// use hangtag::labels::PackagePlan;
    ///
    /// let plan = PackagePlan::split(12000, 5000);
    /// assert_eq!(plan.sizes(), &[5000, 5000, 2000]);
    /// assert!(PackagePlan::split(0, 5000).is_empty());
    /// ```
    pub fn split(total: i64, cap: u32) -> Self {
        let cap = i64::from(cap.max(1));
        let mut sizes = Vec::new();
        let mut remaining = total;
        while remaining > 0 {
            let size = remaining.min(cap);
            // size <= cap, which came from a u32
            sizes.push(size as u32);
            remaining -= size;
        }
        Self(sizes)
    }

    /// Split with the standard [`PACKAGE_CAP`].
    pub fn for_quantity(quantity: u32) -> Self {
        Self::split(i64::from(quantity), PACKAGE_CAP)
    }

    pub fn sizes(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&s| u64::from(s)).sum()
    }
}

impl IntoIterator for PackagePlan {
    type Item = u32;
    type IntoIter = std::vec::IntoIter<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_scenarios() {
        assert_eq!(PackagePlan::for_quantity(12000).sizes(), &[5000, 5000, 2000]);
        assert_eq!(PackagePlan::for_quantity(300).sizes(), &[300]);
        assert_eq!(PackagePlan::for_quantity(5000).sizes(), &[5000]);
        assert_eq!(PackagePlan::for_quantity(5001).sizes(), &[5000, 1]);
    }

    #[test]
    fn test_split_non_positive() {
        assert!(PackagePlan::split(0, PACKAGE_CAP).is_empty());
        assert!(PackagePlan::split(-40, PACKAGE_CAP).is_empty());
    }

    #[test]
    fn test_split_properties() {
        for total in [1u32, 7, 4999, 5000, 5001, 9999, 10000, 10001, 123_456] {
            let plan = PackagePlan::for_quantity(total);
            assert_eq!(plan.total(), u64::from(total), "sum for {}", total);
            assert!(plan.sizes().iter().all(|&s| s > 0 && s <= PACKAGE_CAP));
            assert_eq!(plan.len(), total.div_ceil(PACKAGE_CAP) as usize);
        }
    }

    #[test]
    fn test_split_custom_cap() {
        assert_eq!(PackagePlan::split(7, 3).sizes(), &[3, 3, 1]);
    }
}
