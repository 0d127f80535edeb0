//! Parser for SUSE public cloud image names.
//!
//! Image names follow a convention which encodes the product, its version, flavor markers, the
//! payment model, a date stamp, and a framework specific suffix, e.g.
//! `suse-sles-sap-15-sp2-byos-v20210212-hvm-ssd-x86_64`. [`ImageName`] validates a name published
//! to a [`Framework`] and derives the attributes used when building image descriptions.
//!
//! The grammar is a catalog of named fragments composed into a single anchored pattern. A
//! [`Matcher`] compiles it once and matches whole names only, producing [`Captures`] with every
//! [`Field`] as a key.
//!
//! ```
//! use cloud_image_name::{Framework, ImageName};
//!
//! let image = ImageName::new("ec2", "suse-sles-sap-15-sp2-byos-v20210212-hvm-ssd-x86_64")?;
//!
//! assert_eq!(image.framework(), Framework::Ec2);
//! assert!(image.is_sap());
//! assert!(image.is_byos());
//! assert_eq!(image.product_version().as_deref(), Some("15-sp2"));
//! assert_eq!(image.generic_name(), "suse-sles-sap-15-sp2-byos-v{date}-hvm-ssd-x86_64");
//! # Ok::<(), cloud_image_name::ImageParserError>(())
//! ```
//!
//! [`Framework`] and [`Arch`] (de)serialize as their lowercase tokens. [`Captures`] serializes as
//! a map from field names to values.

mod arch;
pub mod distro;
pub mod framework;
mod grammar;
mod image;
mod matcher;

pub use self::{
    arch::{Arch, ParseArchError},
    distro::DistroTable,
    framework::{Framework, InvalidFrameworkError},
    grammar::Field,
    image::{ImageName, ImageParserError, DATE_PLACEHOLDER},
    matcher::{Captures, Matcher},
};

/// Implement string conversion traits for types which have a `parse` method.
///
/// The macro creates implementations of:
///
/// - [`FromStr`](std::str::FromStr)
/// - [`TryFrom<&str>`]
/// - [`TryFrom<String>`]
/// - [`TryFrom<Box<str>>`]
/// - [`TryFrom<Cow<str>>`](std::borrow::Cow)
macro_rules! impl_from_str {
    ($($Ty:ty => $Error:ty),* $(,)?) => {
        $(
            impl std::str::FromStr for $Ty {
                type Err = $Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::parse(s)
                }
            }

            impl_from_str! {
                impl TryFrom<&str> for $Ty => $Error,
                impl TryFrom<String> for $Ty => $Error,
                impl TryFrom<Box<str>> for $Ty => $Error,
                impl TryFrom<std::borrow::Cow<'_, str>> for $Ty => $Error,
            }
        )*
    };
    ($(impl TryFrom<$From:ty> for $Ty:ty => $Error:ty,)*) => {
        $(
            impl TryFrom<$From> for $Ty {
                type Error = $Error;

                fn try_from(value: $From) -> Result<Self, Self::Error> {
                    Self::parse(value)
                }
            }
        )*
    };
}

use impl_from_str;

/// Generate accessors for captured [`Field`]s within an `impl` block of a type with a
/// `field(Field) -> Option<&str>` method.
///
/// For each `method => Field, predicate` entry the macro creates:
///
/// - `method()`, returning the captured value.
/// - `predicate()`, returning `true` if the value is set.
///
/// Entries of the form `method => Field, predicate, dash, dash_upper` also create:
///
/// - `dash()`, returning `-{value}` if set, otherwise an empty string.
/// - `dash_upper()`, returning `dash()` upper-cased.
macro_rules! field_accessors {
    ($(
        $(#[doc = $doc:literal])*
        $method:ident => $Field:ident, $predicate:ident $(, $dash:ident, $dash_upper:ident)?;
    )*) => {
        $(
            $(#[doc = $doc])*
            #[must_use]
            pub fn $method(&self) -> Option<&str> {
                self.field($crate::Field::$Field)
            }

            #[doc = concat!(
                "Returns `true` if [`", stringify!($method), "()`](Self::", stringify!($method),
                "()) is set."
            )]
            #[must_use]
            pub fn $predicate(&self) -> bool {
                self.$method().is_some()
            }

            $(
                #[doc = concat!(
                    "`-{", stringify!($method), "}` if set, otherwise an empty string."
                )]
                #[must_use]
                pub fn $dash(&self) -> String {
                    self.$method()
                        .map(|value| format!("-{value}"))
                        .unwrap_or_default()
                }

                #[doc = concat!(
                    "Upper-cased [`", stringify!($dash), "()`](Self::", stringify!($dash), "())."
                )]
                #[must_use]
                pub fn $dash_upper(&self) -> String {
                    self.$dash().to_uppercase()
                }
            )?
        )*
    };
}

use field_accessors;
