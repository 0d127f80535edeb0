//! Provides [`Framework`], the closed set of supported cloud provider frameworks.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::impl_from_str;

/// Cloud provider framework an image is published to.
///
/// (De)serializes from/to the lowercase framework identifier, e.g. `"ec2"`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Amazon EC2
    Ec2,
    /// Microsoft Azure
    Azure,
    /// Google Compute Engine
    Gce,
    /// Oracle Cloud Infrastructure
    Oci,
    /// Alibaba Cloud
    Aliyun,
}

impl Framework {
    /// All supported frameworks.
    pub const ALL: [Self; 5] = [Self::Ec2, Self::Azure, Self::Gce, Self::Oci, Self::Aliyun];

    /// Parse a [`Framework`] from its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or is not one of `ec2`, `azure`, `gce`, `oci`,
    /// or `aliyun`. Identifiers are case-sensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_image_name::{Framework, InvalidFrameworkError};
    ///
    /// assert_eq!(Framework::parse("gce"), Ok(Framework::Gce));
    /// assert_eq!(Framework::parse(""), Err(InvalidFrameworkError::Missing));
    /// assert_eq!(
    ///     Framework::parse("GCE"),
    ///     Err(InvalidFrameworkError::Unknown("GCE".to_owned())),
    /// );
    /// ```
    pub fn parse<T>(framework: T) -> Result<Self, InvalidFrameworkError>
    where
        T: AsRef<str>,
    {
        let framework = framework.as_ref();
        if framework.is_empty() {
            return Err(InvalidFrameworkError::Missing);
        }

        Self::ALL
            .into_iter()
            .find(|known| known.as_str() == framework)
            .ok_or_else(|| InvalidFrameworkError::Unknown(framework.to_owned()))
    }

    /// Framework identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ec2 => "ec2",
            Self::Azure => "azure",
            Self::Gce => "gce",
            Self::Oci => "oci",
            Self::Aliyun => "aliyun",
        }
    }

    /// Framework name as used in image descriptions.
    ///
    /// Azure and Aliyun are capitalized, the others are acronyms and are upper-cased.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Ec2 => "EC2",
            Self::Azure => "Azure",
            Self::Gce => "GCE",
            Self::Oci => "OCI",
            Self::Aliyun => "Aliyun",
        }
    }

    /// Whether SLES images on this framework must carry the `suse-` vendor prefix.
    #[must_use]
    pub const fn requires_vendor_prefix(self) -> bool {
        matches!(self, Self::Ec2 | Self::Azure)
    }
}

impl_from_str!(Framework => InvalidFrameworkError);

impl AsRef<str> for Framework {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for Framework {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that `framework` is a supported framework identifier.
///
/// # Errors
///
/// Returns an error if `framework` is empty or unknown. See [`Framework::parse()`].
pub fn validate(framework: &str) -> Result<(), InvalidFrameworkError> {
    Framework::parse(framework).map(drop)
}

/// Error returned when parsing a [`Framework`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidFrameworkError {
    /// No framework was given.
    #[error("framework is required")]
    Missing,

    /// Framework is not one of `ec2`, `azure`, `gce`, `oci`, or `aliyun`.
    #[error("Invalid framework: {0}")]
    Unknown(String),
}
