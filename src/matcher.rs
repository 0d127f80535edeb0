//! Provides [`Matcher`], which matches whole image names against the composed grammar, and
//! [`Captures`], the resulting map of [`Field`]s to captured values.

use std::{iter, sync::OnceLock};

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::grammar::{self, Field, Rule, PASSES, RULES};

/// Compiled image name grammar.
///
/// The patterns are compiled once when the matcher is created. Matching takes `&self` only, so a
/// single matcher can be shared between threads. Most users want [`Matcher::global()`].
#[derive(Debug, Clone)]
pub struct Matcher {
    /// Compiled, anchored pattern from [`grammar::compose()`].
    regex: Regex,

    /// Patterns with alternatives pruned, tried in order when a match breaks a [`Rule`].
    fallbacks: Vec<Regex>,
}

impl Matcher {
    /// Compose and compile the image name grammar.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn new() -> Self {
        let mut passes = PASSES.iter().map(|pruned| {
            let pattern = grammar::compose(pruned);
            trace!(len = pattern.len(), ?pruned, "compiling image name grammar");

            // PANIC_SAFETY:
            // The patterns are built from static fragments only.
            // Checked with `grammar_compiles()` test.
            Regex::new(&pattern).expect("image name grammar is a valid pattern")
        });

        // PANIC_SAFETY:
        // `PASSES` starts with the full grammar.
        // Checked with `grammar_compiles()` test.
        let regex = passes.next().expect("at least one grammar pass");

        Self {
            regex,
            fallbacks: passes.collect(),
        }
    }

    /// Process-wide matcher, compiled on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        static MATCHER: OnceLock<Matcher> = OnceLock::new();
        MATCHER.get_or_init(Self::new)
    }

    /// The composed pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Match the entire `name` against the grammar.
    ///
    /// Returns [`None`] if the name does not conform, including when only a prefix of the name
    /// conforms or when every parse violates a conditional [`Rule`] between fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_image_name::{Field, Matcher};
    ///
    /// let captures = Matcher::global()
    ///     .captures("sles-15-sp2-byos-v20201016")
    ///     .unwrap();
    /// assert_eq!(captures.get(Field::MajorVersion), Some("15"));
    /// assert_eq!(captures.get(Field::MinorVersion), Some("sp2"));
    /// assert_eq!(captures.get(Field::Arch), None);
    ///
    /// assert!(Matcher::global().captures("sles-15-sp2-byos-v20201016-bogus").is_none());
    /// ```
    #[must_use]
    pub fn captures(&self, name: &str) -> Option<Captures> {
        // Pruned patterns accept a subset of names, skip them if the full grammar fails.
        let first = self.regex.captures(name)?;

        iter::once(first)
            .chain(
                self.fallbacks
                    .iter()
                    .filter_map(|regex| regex.captures(name)),
            )
            .find(|captures| match RULES.iter().find(|rule| !rule_holds(rule, captures)) {
                Some(rule) => {
                    debug!(name, %rule, "parse rejected by grammar rule");
                    false
                }
                None => true,
            })
            .map(|captures| Captures::from_match(&captures))
    }

    /// Returns `true` if the entire `name` conforms to the grammar.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.captures(name).is_some()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether `rule` holds for a permissive match.
fn rule_holds(rule: &Rule, captures: &regex::Captures) -> bool {
    match *rule {
        Rule::Requires { field, on } => {
            non_empty(captures, field.as_str()).is_none()
                || non_empty(captures, on.as_str()).is_some()
        }
        Rule::Excludes { field, other } => {
            non_empty(captures, field.as_str()).is_none()
                || non_empty(captures, other.as_str()).is_none()
        }
        Rule::Repeats { group, field } => non_empty(captures, group)
            .map_or(true, |value| non_empty(captures, field.as_str()) == Some(value)),
    }
}

/// Captured text of the named group, if it participated in the match and is not empty.
fn non_empty<'a>(captures: &regex::Captures<'a>, group: &str) -> Option<&'a str> {
    captures
        .name(group)
        .map(|value| value.as_str())
        .filter(|value| !value.is_empty())
}

/// Values captured by a successful [`Matcher`] match.
///
/// Every [`Field`] is present as a key, in catalog order. Fields which did not participate in
/// the match, or which matched an empty string, have a value of [`None`].
///
/// Serializes as a map from field names to optional strings.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Captures(IndexMap<Field, Option<String>>);

impl Captures {
    /// Collect every [`Field`] from a successful match.
    fn from_match(captures: &regex::Captures) -> Self {
        Self(
            Field::ALL
                .iter()
                .map(|&field| {
                    let value = non_empty(captures, field.as_str()).map(ToOwned::to_owned);
                    (field, value)
                })
                .collect(),
        )
    }

    /// Value captured for `field`, if set.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).and_then(Option::as_deref)
    }

    /// Returns `true` if a value was captured for `field`.
    #[must_use]
    pub fn is_set(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Iterate over all fields and their values in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> {
        self.0
            .iter()
            .map(|(field, value)| (*field, value.as_deref()))
    }

    /// Iterate over the fields which captured a value, in catalog order.
    pub fn set_fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.iter()
            .filter_map(|(field, value)| value.map(|value| (field, value)))
    }

    /// Number of fields, always equal to the length of [`Field::ALL`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`, every [`Field`] is a key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pomsky_macro::pomsky;
    use proptest::{prop_assert, prop_assert_eq, proptest};

    use super::*;

    /// Names with a product, optional flavors and payment model, a date, and an EC2 style suffix.
    const NAME: &str = pomsky! {
        let digit = [ascii_digit];
        let product = ("suse-")? ("sles" | "sle-hpc" | "sle-micro" | "opensuse-leap");
        let version = '-' digit+ ("-sp" ['1'-'5'] | '-' digit)?;
        let flavor = ("-sap")? ("-chost")? ("-byos")?;
        let suffix = ("-hvm" | "-pv")? ("-ssd")? ("-x86_64" | "-arm64")?;

        product version flavor "-v" digit{8} suffix
    };

    #[test]
    fn grammar_compiles() {
        let matcher = Matcher::new();
        assert_eq!(matcher.fallbacks.len() + 1, PASSES.len());
    }

    #[test]
    fn global_is_shared() {
        assert!(std::ptr::eq(Matcher::global(), Matcher::global()));
    }

    #[test]
    fn matcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matcher>();
        assert_send_sync::<Captures>();
    }

    #[test]
    fn every_field_is_a_key() {
        let captures = Matcher::global()
            .captures("suse-sles-15-sp2-byos-v20201111-hvm-ssd-arm64")
            .unwrap();
        assert_eq!(captures.len(), Field::ALL.len());
        let fields: Vec<_> = captures.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, Field::ALL);
    }

    #[test]
    fn captured_values() {
        let captures = Matcher::global()
            .captures("suse-sles-15-sp2-byos-v20201111-hvm-ssd-arm64")
            .unwrap();
        let set: Vec<_> = captures.set_fields().collect();
        assert_eq!(
            set,
            [
                (Field::BaseName, "suse-sles-15-sp2-byos"),
                (Field::Product, "suse-sles"),
                (Field::Prodbase, "suse-sles"),
                (Field::SleServer, "sles"),
                (Field::MajorVersion, "15"),
                (Field::MinorVersion, "sp2"),
                (Field::Byos, "byos"),
                (Field::Datestamp, "20201111"),
                (Field::Suffix, "-hvm-ssd-arm64"),
                (Field::VirtType, "hvm"),
                (Field::Ssd, "ssd"),
                (Field::Arch, "arm64"),
            ]
        );
    }

    #[test]
    fn whole_name_only() {
        let matcher = Matcher::global();
        assert!(matcher.is_match("sles-15-sp2-byos-v20191001"));
        assert!(!matcher.is_match("sles-15-sp2-byos-v20191001-"));
        assert!(!matcher.is_match("sles-15-sp2-byos-v20191001."));
        assert!(!matcher.is_match("sles-15-sp2-byos-v20191001-1."));
        assert!(matcher.is_match("sles-15-sp2-byos-v20191001-1.2"));
        assert!(!matcher.is_match(" sles-15-sp2-byos-v20191001"));
        assert!(!matcher.is_match("sles-15-sp2-byos-v20191001\n"));
        assert!(!matcher.is_match("sles-15-sp2-byos-v20191001-hvm-ssd-x86_64-extra"));
    }

    #[test]
    fn suma_type_requires_suse_manager() {
        let matcher = Matcher::global();

        let captures = matcher
            .captures("suse-manager-4-0-server-byos-v20210210")
            .unwrap();
        assert_eq!(captures.get(Field::SuseManager), Some("suse-manager"));
        assert_eq!(captures.get(Field::SumaType), Some("server"));

        // type is mandatory for SUSE Manager
        assert!(!matcher.is_match("suse-manager-4-0-byos-v20210210"));
        // and not allowed for anything else
        assert!(!matcher.is_match("sles-15-sp2-server-byos-v20210210"));
    }

    #[test]
    fn suse_manager_server_has_no_type() {
        let captures = Matcher::global()
            .captures("suse-manager-server-4-1-byos-v20200721-hvm-ssd-x86_64")
            .unwrap();
        assert_eq!(captures.get(Field::SuseManager), None);
        assert_eq!(captures.get(Field::SumaType), None);
        assert_eq!(
            captures.get(Field::SuseManagerServer),
            Some("suse-manager-server")
        );
    }

    #[test]
    fn sap2_excludes_sapcal() {
        let matcher = Matcher::global();

        let captures = matcher.captures("sles-15-sp2-sap-byos-v20201110").unwrap();
        assert_eq!(captures.get(Field::Sap2), Some("sap"));

        let captures = matcher.captures("sles-15-sp1-sapcal-v20201023").unwrap();
        assert_eq!(captures.get(Field::Sapcal), Some("sapcal"));
        assert_eq!(captures.get(Field::Sap2), None);

        assert!(!matcher.is_match("sles-15-sp1-sapcal-sap-v20201023"));
    }

    #[test]
    fn gen_id_repeats_product_version() {
        let matcher = Matcher::global();

        let captures = matcher.captures("sles-15-sp2-v20201111-15-sp2-gen2").unwrap();
        assert_eq!(captures.get(Field::GenId), Some("15-sp2-gen2"));

        let captures = matcher.captures("suse-sle-micro-5-1-byos-v20220215-gen2").unwrap();
        assert_eq!(captures.get(Field::GenId), Some("gen2"));

        assert!(!matcher.is_match("sles-15-sp2-v20201111-15-sp3-gen2"));
    }

    #[test]
    fn broken_rule_tries_next_parse() {
        let matcher = Matcher::global();

        for (name, field, product) in [
            (
                "suse-manager-server-4-1-20201111-gen2",
                Field::SuseManagerServer,
                "suse-manager-server",
            ),
            (
                "suse-manager-proxy-4-2-20211111-gen2-x86_64",
                Field::SuseManagerProxy,
                "suse-manager-proxy",
            ),
        ] {
            // the preferred parse reads the date as a generation id repeating a version
            let captures = matcher.captures(name).unwrap();
            assert_eq!(captures.get(field), Some(product), "{name}");
            assert_eq!(captures.get(Field::SuseManager), None, "{name}");
            assert_eq!(captures.get(Field::SumaType), None, "{name}");
            assert_eq!(captures.get(Field::MajorVersion), Some("4"), "{name}");
            assert!(captures.is_set(Field::MinorVersion), "{name}");
            assert!(captures.is_set(Field::Datestmp), "{name}");
            assert_eq!(captures.get(Field::GenId), Some("gen2"), "{name}");
            assert_eq!(captures.get(Field::Ver1), None, "{name}");
        }

        // the typed SUSE Manager form is still preferred
        let captures = matcher
            .captures("suse-manager-4-1-server-v20201111-4-1-gen2")
            .unwrap();
        assert_eq!(captures.get(Field::SuseManager), Some("suse-manager"));
        assert_eq!(captures.get(Field::SumaType), Some("server"));
        assert_eq!(captures.get(Field::GenId), Some("gen2"));
    }

    #[test]
    fn datestamp_forms() {
        let matcher = Matcher::global();

        let captures = matcher.captures("sles-12-sp5-v20200917").unwrap();
        assert_eq!(captures.get(Field::Datestamp), Some("20200917"));
        assert_eq!(captures.get(Field::Datestmp), None);

        let captures = matcher.captures("sles-12-sp5-20200917").unwrap();
        assert_eq!(captures.get(Field::Datestmp), Some("20200917"));
        assert_eq!(captures.get(Field::Datestamp), None);
    }

    #[test]
    fn hpc_positions() {
        let matcher = Matcher::global();

        let captures = matcher.captures("suse-sle-hpc-15-sp2-byos-v20201106").unwrap();
        assert_eq!(captures.get(Field::Hpc1), Some("hpc"));
        assert_eq!(captures.get(Field::Hpc2), None);

        let captures = matcher.captures("suse-sles-12-sp5-hpc-byos-v20201110").unwrap();
        assert_eq!(captures.get(Field::Hpc1), None);
        assert_eq!(captures.get(Field::Hpc2), Some("hpc"));

        assert!(!matcher.is_match("suse-sle-hpc-15-sp2-hpc-byos-v20201106"));
        assert!(!matcher.is_match("suse-sles-sap-15-sp2-sap-v20201106"));
        assert!(!matcher.is_match("sles-12-sp5-20200917-v20200917"));
    }

    #[test]
    fn empty_captures_are_unset() {
        let captures = Matcher::global().captures("sles-15-v20201016").unwrap();
        assert_eq!(captures.get(Field::Suffix), None);
        assert!(!captures.is_set(Field::UuidPrefix));
    }

    #[test]
    fn serialize() {
        let captures = Matcher::global().captures("sles-15-v20201016").unwrap();
        let yaml = serde_yaml::to_string(&captures).unwrap();
        assert!(yaml.starts_with("uuid_prefix: null\nbase_name: sles-15\n"));
        assert!(yaml.contains("\nprodbase: sles\n"));
    }

    proptest! {
        #[test]
        fn no_panic(name: String) {
            let _ = Matcher::global().captures(&name);
        }

        #[test]
        fn conforming_names_match(name in NAME) {
            let captures = Matcher::global().captures(&name).unwrap();
            prop_assert_eq!(captures.len(), Field::ALL.len());
            prop_assert!(captures.iter().map(|(field, _)| field).eq(Field::ALL.iter().copied()));
        }
    }
}
