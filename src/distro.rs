//! Static mappings from product versions to the SLES version they are built on, for products
//! whose own version numbering differs from the distribution's.

/// Mapping from a product version to its underlying distribution version.
///
/// Keys are product versions with `.` as the separator, e.g. `4.0`. Lookups accept either `.` or
/// `-` as the separator, so the dashed form produced by
/// [`ImageName::product_version()`](crate::ImageName::product_version()) can be used directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistroTable {
    /// Name of the product the table is for.
    product: &'static str,

    /// `(product version, distribution version)` pairs.
    entries: &'static [(&'static str, &'static str)],
}

/// SUSE Manager product versions.
pub const SUMA_DISTRO: DistroTable = DistroTable {
    product: "SUSE Manager",
    entries: &[
        ("4.0", "15-SP1"),
        ("4.1", "15-SP2"),
        ("4.2", "15-SP3"),
        ("4.3", "15-SP4"),
        ("4.4", "15-SP5"),
    ],
};

/// SLE Micro product versions.
pub const MICRO_DISTRO: DistroTable = DistroTable {
    product: "SLE Micro",
    entries: &[
        ("5.0", "15-SP2"),
        ("5.1", "15-SP3"),
        ("5.2", "15-SP3"),
        ("5.3", "15-SP4"),
    ],
};

/// Distribution version of SUSE Rancher setup images.
pub const LASSO_DISTRO: &str = "15-SP3";

impl DistroTable {
    /// Name of the product the table is for.
    #[must_use]
    pub const fn product(&self) -> &'static str {
        self.product
    }

    /// Distribution version for `product_version`, if the table has an entry for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_image_name::distro::SUMA_DISTRO;
    ///
    /// assert_eq!(SUMA_DISTRO.get("4-1"), Some("15-SP2"));
    /// assert_eq!(SUMA_DISTRO.get("4.1"), Some("15-SP2"));
    /// assert_eq!(SUMA_DISTRO.get("3-2"), None);
    /// ```
    #[must_use]
    pub fn get(&self, product_version: &str) -> Option<&'static str> {
        let product_version = product_version.replace('-', ".");
        self.entries
            .iter()
            .find(|(key, _)| *key == product_version)
            .map(|(_, distro)| *distro)
    }

    /// Iterate over the `(product version, distribution version)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        let entries: &'static [_] = self.entries;
        entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_dotted() {
        for table in [SUMA_DISTRO, MICRO_DISTRO] {
            for (key, distro) in table.iter() {
                assert!(!key.contains('-'), "{key}");
                assert!(distro.starts_with("15-SP"), "{distro}");
            }
        }
    }

    #[test]
    fn get() {
        assert_eq!(MICRO_DISTRO.get("5-2"), Some("15-SP3"));
        assert_eq!(MICRO_DISTRO.get("5"), None);
        assert_eq!(MICRO_DISTRO.get("5-4"), None);
        assert_eq!(SUMA_DISTRO.get("4-0"), Some("15-SP1"));
    }
}
