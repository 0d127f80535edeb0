//! The image name grammar: a catalog of named [`Fragment`]s and [`compose()`], which assembles
//! them into a single, fully anchored pattern.
//!
//! The grammar is permissive about a few fragments whose presence depends on another fragment.
//! Those dependencies are expressed as [`Rule`]s and are checked by the
//! [`Matcher`](crate::Matcher) after a successful match.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Define [`Field`] and its lookup tables from a single list of `Variant => "group_name"` pairs.
///
/// The order of the list is the catalog order, which is also the order in which the fields
/// appear in the composed pattern.
macro_rules! fields {
    ($($(#[$attr:meta])* $Variant:ident => $name:literal,)*) => {
        /// Named, optional field captured from an image name.
        ///
        /// Fields are listed in the order in which they appear in an image name.
        #[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(rename_all = "snake_case")]
        pub enum Field {
            $(
                $(#[$attr])*
                $Variant,
            )*
        }

        impl Field {
            /// All fields in catalog order.
            pub const ALL: &'static [Self] = &[$(Self::$Variant,)*];

            /// Name of the capture group for the field.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$Variant => $name,)*
                }
            }
        }
    };
}

fields! {
    /// Azure `<UUID>__` prefix, without the trailing underscores.
    UuidPrefix => "uuid_prefix",
    /// Everything before the `-v{date}`, without the UUID prefix.
    BaseName => "base_name",
    /// Product base together with HPC, SAP, and Micro markers, e.g. `suse-sles-sap`.
    Product => "product",
    /// Product base, e.g. `suse-sles` or `opensuse-leap`.
    Prodbase => "prodbase",
    /// SUSE Linux Enterprise Server (`sles`).
    SleServer => "sle_server",
    /// SUSE Linux Enterprise Server, long form (`SUSE-Linux-Enterprise-Server`).
    SlesServ => "sles_serv",
    /// SUSE Linux Enterprise (`sle`).
    Sle => "sle",
    /// openSUSE Leap.
    Leap => "leap",
    /// openSUSE.
    Opensuse => "opensuse",
    /// SUSE Manager, with the server/proxy type given after the version.
    SuseManager => "suse_manager",
    /// SUSE Manager Server.
    SuseManagerServer => "suse_manager_server",
    /// SUSE Manager Proxy.
    SuseManagerProxy => "suse_manager_proxy",
    /// SUSE Cloud Application Platform.
    Cap => "cap",
    /// SUSE CaaS Platform.
    Caasp => "caasp",
    /// SUSE Rancher setup.
    Lasso => "lasso",
    /// HPC marker before the product version.
    Hpc1 => "hpc1",
    /// SAP marker before the product version.
    Sap1 => "sap1",
    /// SLE Micro marker.
    Micro => "micro",
    /// Major version.
    MajorVersion => "major_version",
    /// Minor version, either `SP<n>` or a bare digit.
    MinorVersion => "minor_version",
    /// SUSE Manager type, `server` or `proxy`.
    SumaType => "suma_type",
    /// `basic`, `admin`, or `cluster`.
    Basic => "basic",
    /// SAP CAL and legacy EC2 flavors.
    Sapcal => "sapcal",
    /// SAP marker after the product version.
    Sap2 => "sap2",
    /// Container host marker.
    Chost => "chost",
    /// HPC marker after the product version.
    Hpc2 => "hpc2",
    /// Legacy SUSE Manager edition, e.g. `server-2-1`.
    Manager => "manager",
    /// Azure hosting type, `li`, `vli`, or `guest`.
    AzureHosted => "azure_hosted",
    /// Priority support marker, `priority` or `Prio`.
    Priority => "priority",
    /// Standard support marker.
    Standard => "standard",
    /// Bring your own subscription marker.
    Byos => "byos",
    /// Generation marker directly after the base name.
    Gen3 => "gen3",
    /// Date stamp without the `v` prefix.
    Datestmp => "datestmp",
    /// Date stamp with the `v` prefix.
    Datestamp => "datestamp",
    /// Numeric version after a `v`.
    Ver => "ver",
    /// Second numeric version part.
    Ver1 => "ver1",
    /// Third numeric version part.
    Ver2 => "ver2",
    /// Three digit `-vNNN` version.
    Version => "version",
    /// Everything after the date stamp.
    Suffix => "suffix",
    /// Generation id, optionally prefixed with the product version.
    GenId => "gen_id",
    /// EC2 Container Service optimized marker.
    Ecs => "ecs",
    /// Virtualization type, e.g. `hvm` or `pv`.
    VirtType => "virt_type",
    /// SSD backed storage marker.
    Ssd => "ssd",
    /// Architecture token, as written in the name.
    Arch => "arch",
    /// Generation marker after the architecture.
    Gen2 => "gen2",
    /// Architecture specific version.
    Archver => "archver",
    /// Second architecture specific version part.
    Archver1 => "archver1",
    /// Third architecture specific version part.
    Archver2 => "archver2",
    /// Build marker, e.g. `build1`.
    Build => "build",
    /// Build number after the build marker.
    Build1 => "build1",
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal group capturing a major version repeated in the generation id.
pub(crate) const GEN_ID_MAJOR: &str = "gen_id_major";

/// Internal group capturing a minor version repeated in the generation id.
pub(crate) const GEN_ID_MINOR: &str = "gen_id_minor";

/// A single named sub-pattern of the grammar.
///
/// Renders as `(?:{prefix}(?P<{field}>{choice}|...){suffix})`, followed by `?` if optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fragment {
    /// Pattern matched before the capture group, e.g. `-` or `[.-]`.
    prefix: &'static str,

    /// Field captured by the group.
    field: Field,

    /// Alternatives inside the capture group, tried in order.
    choices: &'static [&'static str],

    /// Pattern matched after the capture group.
    suffix: &'static str,

    /// Whether the whole fragment may be skipped.
    optional: bool,
}

impl Fragment {
    /// Required fragment without a prefix or suffix.
    const fn new(field: Field, choices: &'static [&'static str]) -> Self {
        Self {
            prefix: "",
            field,
            choices,
            suffix: "",
            optional: false,
        }
    }

    /// Optional fragment with the given `prefix`.
    const fn optional(prefix: &'static str, field: Field, choices: &'static [&'static str]) -> Self {
        Self {
            prefix,
            optional: true,
            ..Self::new(field, choices)
        }
    }

    /// Set the pattern matched before the capture group.
    const fn prefix(self, prefix: &'static str) -> Self {
        Self { prefix, ..self }
    }

    /// Set the pattern matched after the capture group.
    const fn suffix(self, suffix: &'static str) -> Self {
        Self { suffix, ..self }
    }

    /// Append the fragment's pattern.
    fn push_to(&self, pattern: &mut String) {
        pattern.push_str("(?:");
        pattern.push_str(self.prefix);
        open_group(pattern, self.field);
        push_choices(pattern, self.choices);
        pattern.push(')');
        pattern.push_str(self.suffix);
        pattern.push(')');
        if self.optional {
            pattern.push('?');
        }
    }
}

/// Dependency between fields that the pattern itself does not encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rule {
    /// `field` may only be set if `on` is set.
    Requires {
        /// Dependent field.
        field: Field,
        /// Field which must be set.
        on: Field,
    },

    /// `field` may only be set if `other` is not set.
    Excludes {
        /// Dependent field.
        field: Field,
        /// Field which must not be set.
        other: Field,
    },

    /// If the internal `group` is set, it must repeat the value of `field` exactly.
    Repeats {
        /// Internal capture group name.
        group: &'static str,
        /// Field which the group must repeat.
        field: Field,
    },
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Requires { field, on } => write!(f, "`{field}` requires `{on}`"),
            Self::Excludes { field, other } => write!(f, "`{field}` excludes `{other}`"),
            Self::Repeats { group, field } => write!(f, "`{group}` must repeat `{field}`"),
        }
    }
}

/// Conditional rules checked after a match.
pub(crate) const RULES: &[Rule] = &[
    // SUSE Manager names always carry their type, and only they do.
    Rule::Requires {
        field: Field::SumaType,
        on: Field::SuseManager,
    },
    Rule::Requires {
        field: Field::SuseManager,
        on: Field::SumaType,
    },
    Rule::Excludes {
        field: Field::Sap2,
        other: Field::Sapcal,
    },
    // Markers with two positions are set at most once.
    Rule::Excludes {
        field: Field::Hpc2,
        other: Field::Hpc1,
    },
    Rule::Excludes {
        field: Field::Sap2,
        other: Field::Sap1,
    },
    Rule::Excludes {
        field: Field::Datestamp,
        other: Field::Datestmp,
    },
    Rule::Repeats {
        group: GEN_ID_MAJOR,
        field: Field::MajorVersion,
    },
    Rule::Repeats {
        group: GEN_ID_MINOR,
        field: Field::MinorVersion,
    },
];

/// Optional `suse-` vendor prefix used by some frameworks.
const SUSE: &str = "(?:suse-)?";

const UUID_PREFIX: Fragment =
    Fragment::optional("", Field::UuidPrefix, &["[0-9a-fA-F]*"]).suffix("__");

/// Product bases, tried in order. An empty product base is also accepted.
const PRODUCT_BASES: &[Fragment] = &[
    Fragment::new(Field::SleServer, &["sles"]).prefix(SUSE),
    Fragment::new(Field::SlesServ, &["SUSE-Linux-Enterprise-Server"]).prefix("(?:SUSE-)?"),
    Fragment::new(Field::Sle, &["sle"]).prefix(SUSE),
    Fragment::new(Field::Leap, &["open(?:suse|SUSE)-[lL]eap"]).prefix(SUSE),
    Fragment::new(Field::Opensuse, &["open(?:suse|SUSE)"]).prefix(SUSE),
    Fragment::new(Field::SuseManager, &["suse-manager", "manager"]),
    Fragment::new(Field::SuseManagerServer, &["suse-manager-server"]),
    Fragment::new(Field::SuseManagerProxy, &["suse-manager-proxy"]),
    Fragment::new(Field::Cap, &["cap-deploy"]).prefix(SUSE),
    Fragment::new(Field::Caasp, &["caasp"]).prefix(SUSE),
    Fragment::new(Field::Lasso, &["suse-rancher-setup"]),
];

/// Flavor markers that are part of the product.
const PRODUCT_FLAVORS: &[Fragment] = &[
    Fragment::optional("-", Field::Hpc1, &["hpc"]),
    Fragment::optional("-", Field::Sap1, &["sap"]),
    Fragment::optional("-", Field::Micro, &["micro"]),
];

const PRODUCT_VERSION: &[Fragment] = &[
    Fragment::optional("-?", Field::MajorVersion, &["[0-9]+"]),
    Fragment::optional("[.-]", Field::MinorVersion, &["[sS][pP][1-9]", "[0-9]"]),
];

/// Markers between the product version and the end of the base name.
const BASE_NAME_MARKERS: &[Fragment] = &[
    Fragment::optional("-", Field::SumaType, &["proxy", "server"]),
    Fragment::optional("-", Field::Basic, &["basic", "admin", "cluster"]),
    Fragment::optional(
        "-",
        Field::Sapcal,
        &[
            "sapcal",
            "SAP-CAL",
            "sap-cal",
            "rightscale",
            "hvm",
            "pv",
            "hvm-bld485",
            "sap-pv",
            "sap-hvm",
        ],
    ),
    Fragment::optional("-", Field::Sap2, &["sap"]),
    Fragment::optional("-", Field::Chost, &["chost"]),
    Fragment::optional("-", Field::Hpc2, &["hpc"]),
    Fragment::optional("-manager-", Field::Manager, &["server-2-1", "proxy-2-1"]),
    Fragment::optional("-azure-", Field::AzureHosted, &["li", "vli", "guest"]),
    Fragment::optional("-", Field::Priority, &["priority", "Prio"]),
    Fragment::optional("-", Field::Standard, &["standard"]),
    Fragment::optional("-", Field::Byos, &["byos"]),
];

/// Generation, date stamp, and version markers between the base name and the suffix.
const DATE_MARKERS: &[Fragment] = &[
    Fragment::optional("[.-]", Field::Gen3, &["gen[0-9]"]),
    Fragment::optional("-", Field::Datestmp, &["[0-9]{8,9}"]),
    Fragment::optional("-v", Field::Datestamp, &["[0-9]{8,9}"]),
    Fragment::optional("-v", Field::Ver, &["[0-9]+"]),
    Fragment::optional("[.-]", Field::Ver1, &["[0-9]{1,3}"]),
    Fragment::optional("[.-]", Field::Ver2, &["[0-9]{1,3}"]),
    Fragment::optional("-v", Field::Version, &["[0-9]{3}"]),
];

/// Generation id after the date stamp, which may repeat the product version.
const GEN_ID: Fragment = Fragment::optional(
    "-",
    Field::GenId,
    &["(?:(?P<gen_id_major>[0-9]+)(?:-(?P<gen_id_minor>[sS][pP][1-9]|[0-9]))?-)?gen[0-9]"],
);

/// [`GEN_ID`] without the repeated product version.
const PLAIN_GEN_ID: Fragment = Fragment::optional("-", Field::GenId, &["gen[0-9]"]);

/// Markers after the generation id.
const SUFFIX_MARKERS: &[Fragment] = &[
    Fragment::optional("-", Field::Ecs, &["ecs"]),
    Fragment::optional("-", Field::VirtType, &["hvm", "pv", "hvm-mag", "pv-mag"]),
    Fragment::optional("-", Field::Ssd, &["ssd"]),
    Fragment::optional(
        "[.-]",
        Field::Arch,
        &["x86_64", "x86-64", "arm64", "i386", "x86_64_ssd"],
    ),
    Fragment::optional("-", Field::Gen2, &["gen[0-9]"]),
    Fragment::optional("-", Field::Archver, &["[0-9]+"]),
    Fragment::optional("[.-]", Field::Archver1, &["[0-9]"]),
    Fragment::optional("[.-]", Field::Archver2, &["[0-9]{1,3}"]),
    Fragment::optional("-", Field::Build, &["build[0-9]"]),
    Fragment::optional("[.-]", Field::Build1, &["[0-9]"]),
];

/// Alternative left out of a grammar pass.
///
/// A regex match is the highest priority parse only. When that parse breaks a [`Rule`], later
/// passes leave out the alternatives it preferred so a lower priority parse can be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Prune {
    /// Generation ids never repeat the product version.
    GenIdVersion,

    /// The `suse_manager` product base, which is a prefix of the SUSE Manager Server and Proxy
    /// product bases.
    SuseManager,
}

/// Grammar passes in the order they are tried.
pub(crate) const PASSES: &[&[Prune]] = &[
    &[],
    &[Prune::GenIdVersion],
    &[Prune::SuseManager],
    &[Prune::SuseManager, Prune::GenIdVersion],
];

/// Compose the image name pattern, leaving out the `pruned` alternatives.
///
/// The order is: UUID prefix, base name (product base, product flavors, product version,
/// base name markers), date markers, suffix markers. The pattern is anchored at both ends.
#[must_use]
pub(crate) fn compose(pruned: &[Prune]) -> String {
    let mut pattern = String::with_capacity(2048);
    pattern.push('^');

    UUID_PREFIX.push_to(&mut pattern);

    open_group(&mut pattern, Field::BaseName);
    open_group(&mut pattern, Field::Product);
    open_group(&mut pattern, Field::Prodbase);
    for base in PRODUCT_BASES
        .iter()
        .filter(|base| base.field != Field::SuseManager || !pruned.contains(&Prune::SuseManager))
    {
        base.push_to(&mut pattern);
        pattern.push('|');
    }
    pattern.push(')');
    push_all(&mut pattern, PRODUCT_FLAVORS);
    pattern.push(')');
    push_all(&mut pattern, PRODUCT_VERSION);
    push_all(&mut pattern, BASE_NAME_MARKERS);
    pattern.push(')');

    push_all(&mut pattern, DATE_MARKERS);

    open_group(&mut pattern, Field::Suffix);
    if pruned.contains(&Prune::GenIdVersion) {
        PLAIN_GEN_ID.push_to(&mut pattern);
    } else {
        GEN_ID.push_to(&mut pattern);
    }
    push_all(&mut pattern, SUFFIX_MARKERS);
    pattern.push(')');

    pattern.push('$');
    pattern
}

/// Append each of the `fragments` in order.
fn push_all(pattern: &mut String, fragments: &[Fragment]) {
    for fragment in fragments {
        fragment.push_to(pattern);
    }
}

/// Append the start of a named capture group for `field`.
fn open_group(pattern: &mut String, field: Field) {
    pattern.push_str("(?P<");
    pattern.push_str(field.as_str());
    pattern.push('>');
}

/// Append `choices` separated by `|`.
fn push_choices(pattern: &mut String, choices: &[&str]) {
    for (index, choice) in choices.iter().enumerate() {
        if index > 0 {
            pattern.push('|');
        }
        pattern.push_str(choice);
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, iter};

    use super::*;

    /// All fragments of the grammar, in pattern order.
    ///
    /// Does not include the [`Field`]s which only group other fragments.
    fn fragments() -> impl Iterator<Item = &'static Fragment> {
        iter::once(&UUID_PREFIX)
            .chain(PRODUCT_BASES)
            .chain(PRODUCT_FLAVORS)
            .chain(PRODUCT_VERSION)
            .chain(BASE_NAME_MARKERS)
            .chain(DATE_MARKERS)
            .chain(iter::once(&GEN_ID))
            .chain(SUFFIX_MARKERS)
    }

    #[test]
    fn fragment_rendering() {
        let mut pattern = String::new();
        Fragment::optional("-", Field::VirtType, &["hvm", "pv"]).push_to(&mut pattern);
        assert_eq!(pattern, "(?:-(?P<virt_type>hvm|pv))?");

        pattern.clear();
        UUID_PREFIX.push_to(&mut pattern);
        assert_eq!(pattern, "(?:(?P<uuid_prefix>[0-9a-fA-F]*)__)?");
    }

    #[test]
    fn anchored() {
        let pattern = compose(&[]);
        assert!(pattern.starts_with('^'));
        assert!(pattern.ends_with('$'));
    }

    #[test]
    fn every_field_has_one_group() {
        let pattern = compose(&[]);
        for field in Field::ALL {
            let group = format!("(?P<{field}>");
            assert_eq!(pattern.matches(&group).count(), 1, "{field}");
        }
    }

    #[test]
    fn fields_in_pattern_order() {
        let pattern = compose(&[]);
        let positions: Vec<_> = Field::ALL
            .iter()
            .filter_map(|field| pattern.find(&format!("(?P<{field}>")))
            .collect();
        assert_eq!(positions.len(), Field::ALL.len());
        assert!(positions.windows(2).all(|pair| pair.first() < pair.get(1)));
    }

    #[test]
    fn fragment_fields_unique() {
        let mut seen = HashSet::new();
        for fragment in fragments() {
            assert!(seen.insert(fragment.field), "{}", fragment.field);
        }
        // base name, product, prodbase, and suffix only group other fragments
        assert_eq!(seen.len() + 4, Field::ALL.len());
    }

    #[test]
    fn pruned_passes() {
        let full = compose(&[]);
        assert_eq!(PASSES.first().map(|pass| compose(pass)), Some(full.clone()));

        let pattern = compose(&[Prune::SuseManager]);
        assert!(!pattern.contains("(?P<suse_manager>"));
        assert!(pattern.contains("(?P<suse_manager_server>"));
        assert!(pattern.contains(GEN_ID_MAJOR));

        let pattern = compose(&[Prune::GenIdVersion]);
        assert!(pattern.contains("(?P<suse_manager>"));
        assert!(pattern.contains("(?P<gen_id>gen[0-9])"));
        assert!(!pattern.contains(GEN_ID_MAJOR));
        assert!(!pattern.contains(GEN_ID_MINOR));

        // every pass still captures the same fields, apart from the pruned product base
        for pass in PASSES {
            let pattern = compose(pass);
            for field in Field::ALL {
                let expected = usize::from(
                    *field != Field::SuseManager || !pass.contains(&Prune::SuseManager),
                );
                assert_eq!(pattern.matches(&format!("(?P<{field}>")).count(), expected);
            }
        }
    }

    #[test]
    fn rule_groups_declared() {
        let pattern = compose(&[]);
        for rule in RULES {
            if let Rule::Repeats { group, .. } = rule {
                assert!(pattern.contains(&format!("(?P<{group}>")), "{rule}");
            }
        }
    }
}
