//! Provides [`Arch`], the architecture an image is built for.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::impl_from_str;

/// Image architecture.
///
/// (De)serializes from/to the canonical token, e.g. `"x86_64"`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// 64-bit x86, the default when a name does not specify an architecture.
    #[default]
    #[serde(rename = "x86_64", alias = "x86-64")]
    X86_64,

    /// 64-bit ARM
    #[serde(rename = "arm64")]
    Arm64,

    /// 32-bit x86
    #[serde(rename = "i386")]
    I386,

    /// Legacy EC2 token for 64-bit x86 with SSD storage.
    #[serde(rename = "x86_64_ssd")]
    X86_64Ssd,
}

impl Arch {
    /// Parse an [`Arch`] from an architecture token.
    ///
    /// `x86-64` is accepted as an alternative spelling of `x86_64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not one of `x86_64`, `x86-64`, `arm64`, `i386`, or
    /// `x86_64_ssd`.
    pub fn parse<T>(arch: T) -> Result<Self, ParseArchError>
    where
        T: AsRef<str>,
    {
        match arch.as_ref() {
            "x86_64" | "x86-64" => Ok(Self::X86_64),
            "arm64" => Ok(Self::Arm64),
            "i386" => Ok(Self::I386),
            "x86_64_ssd" => Ok(Self::X86_64Ssd),
            arch => Err(ParseArchError(arch.to_owned())),
        }
    }

    /// Architecture from an optional captured token.
    ///
    /// A missing token means `x86_64`. Unknown tokens are not produced by the grammar, they also
    /// fall back to `x86_64`.
    pub(crate) fn from_token(token: Option<&str>) -> Self {
        token.and_then(|token| Self::parse(token).ok()).unwrap_or_default()
    }

    /// Canonical architecture token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Arm64 => "arm64",
            Self::I386 => "i386",
            Self::X86_64Ssd => "x86_64_ssd",
        }
    }

    /// Architecture name used by cloud providers' APIs, `aarch64` for [`Arch::Arm64`].
    #[must_use]
    pub const fn cloud_arch(self) -> &'static str {
        match self {
            Self::Arm64 => "aarch64",
            arch => arch.as_str(),
        }
    }

    /// Returns `true` for 64-bit x86 (also known as amd64).
    #[must_use]
    pub const fn is_x86_64(self) -> bool {
        matches!(self, Self::X86_64)
    }

    /// Returns `true` for 64-bit ARM (also known as aarch64).
    #[must_use]
    pub const fn is_arm64(self) -> bool {
        matches!(self, Self::Arm64)
    }
}

impl_from_str!(Arch => ParseArchError);

impl AsRef<str> for Arch {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Arch {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Arch {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Display for Arch {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an [`Arch`] from a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown architecture `{0}`")]
pub struct ParseArchError(String);
