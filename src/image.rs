//! Provides [`ImageName`], a validated image name together with the attributes derived from it.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;
use tracing::{debug, error};

use crate::{
    distro::{LASSO_DISTRO, MICRO_DISTRO, SUMA_DISTRO},
    field_accessors,
    framework::{Framework, InvalidFrameworkError},
    Arch, Captures, Field, Matcher,
};

/// Placeholder for the date stamp in [`ImageName::generic_name()`].
pub const DATE_PLACEHOLDER: &str = "{date}";

/// Product base prefix required for SLES images on some frameworks.
const VENDOR_PREFIX: &str = "suse-";

/// Image name following the public cloud image naming convention.
///
/// The general format is
/// `[{uuid}__]{product}[-{version}][-{flavors}][-byos]-v{date}[-{suffix}]`, e.g.
/// `suse-sles-sap-15-sp2-byos-v20210212-hvm-ssd-x86_64`.
///
/// An [`ImageName`] is only created if the name matches the grammar as a whole and passes the
/// framework specific checks. All attributes are derived from the captured [`Field`]s. Derived
/// string attributes are empty, rather than missing, when the underlying field is not set.
///
/// # Examples
///
/// ```
/// use cloud_image_name::ImageName;
///
/// let image = ImageName::new("gce", "opensuse-leap-15-4-v20220722-arm64")?;
///
/// assert_eq!(image.product(), Some("opensuse-leap"));
/// assert_eq!(image.product_version().as_deref(), Some("15-4"));
/// assert!(image.is_leap());
/// assert_eq!(image.arch(), "arm64");
/// assert_eq!(image.generic_name(), "opensuse-leap-15-4-v{date}-arm64");
/// assert_eq!(image.unique_name(), "opensuse-leap-15-4-v20220722-arm64");
/// # Ok::<(), cloud_image_name::ImageParserError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    /// Framework the image is published to.
    framework: Framework,

    /// Full image name as given.
    name: Box<str>,

    /// Fields captured by matching `name`.
    captures: Captures,

    /// Distribution version, resolved when the image name is created.
    distro_version: Option<String>,
}

impl ImageName {
    /// Parse an image name published to the given `framework`.
    ///
    /// The framework is validated before the name is matched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    ///
    /// - `framework` is empty or not one of `ec2`, `azure`, `gce`, `oci`, or `aliyun`.
    /// - `name` does not match the image name grammar as a whole.
    /// - The framework is `ec2` or `azure` and the name is for a SLES image without the `suse-`
    ///   vendor prefix, unless it is an Azure hosted image.
    /// - The product version has no entry in its product's distribution version table. This
    ///   indicates the table is out of date, see [`ImageParserError::is_defect()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_image_name::{ImageName, ImageParserError, InvalidFrameworkError};
    ///
    /// let image = ImageName::new(
    ///     "azure",
    ///     "5c9ba39cec434780938dba0f6ea3126d__suse-manager-4-0-server-byos-v20210210",
    /// )
    /// .unwrap();
    /// assert_eq!(image.uuid_prefix(), Some("5c9ba39cec434780938dba0f6ea3126d"));
    /// assert_eq!(image.suma_type(), Some("server"));
    /// assert_eq!(image.dash_suma_type(), "-server");
    /// assert_eq!(image.distro_version(), Some("15-SP1"));
    ///
    /// assert!(matches!(
    ///     ImageName::new("not-a-provider", "sles-15-sp2-byos-v20201111"),
    ///     Err(ImageParserError::Framework(InvalidFrameworkError::Unknown(_))),
    /// ));
    /// ```
    pub fn new<T>(framework: &str, name: T) -> Result<Self, ImageParserError>
    where
        T: AsRef<str> + Into<Box<str>>,
    {
        let framework = Framework::parse(framework)?;
        Self::with_framework(framework, name)
    }

    /// Parse an image name published to an already validated [`Framework`].
    ///
    /// # Errors
    ///
    /// Returns an error if the name does not match, fails the framework's vendor prefix check, or
    /// has an unmapped distribution version. See [`ImageName::new()`].
    pub fn with_framework<T>(framework: Framework, name: T) -> Result<Self, ImageParserError>
    where
        T: AsRef<str> + Into<Box<str>>,
    {
        let captures = Matcher::global()
            .captures(name.as_ref())
            .ok_or_else(|| ImageParserError::NoMatch {
                name: name.as_ref().to_owned(),
            })?;

        let mut image = Self {
            framework,
            name: name.into(),
            captures,
            distro_version: None,
        };
        image.check_vendor_prefix()?;
        image.distro_version = image.resolve_distro_version()?;

        debug!(
            name = %image.name,
            %framework,
            fields = ?image.captures.set_fields().collect::<Vec<_>>(),
            "image name matched",
        );

        Ok(image)
    }

    /// SLES images on EC2 and Azure must have the `suse-` vendor prefix, except for Azure hosted
    /// images.
    fn check_vendor_prefix(&self) -> Result<(), ImageParserError> {
        if self.framework.requires_vendor_prefix()
            && self.is_sle_server()
            && !self.is_azure_hosted()
            && !self
                .product_base()
                .is_some_and(|base| base.starts_with(VENDOR_PREFIX))
        {
            Err(ImageParserError::VendorPrefix {
                framework: self.framework,
                name: self.name.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Determine the distribution version, looking it up for products which use their own
    /// version numbering.
    fn resolve_distro_version(&self) -> Result<Option<String>, ImageParserError> {
        let table = if self.is_suma() {
            SUMA_DISTRO
        } else if self.is_micro() {
            MICRO_DISTRO
        } else if self.is_lasso() {
            return Ok(Some(LASSO_DISTRO.to_owned()));
        } else {
            return Ok(self.product_version());
        };

        let Some(version) = self.product_version() else {
            return Ok(None);
        };

        match table.get(&version) {
            Some(distro) => Ok(Some(distro.to_owned())),
            None => {
                error!(
                    name = %self.name,
                    product = table.product(),
                    %version,
                    "product version has no distribution version mapping",
                );
                Err(ImageParserError::UnmappedDistroVersion {
                    product: table.product(),
                    version,
                })
            }
        }
    }

    // Framework

    /// Framework the image is published to.
    #[must_use]
    pub const fn framework(&self) -> Framework {
        self.framework
    }

    /// Returns `true` if the framework is Azure.
    #[must_use]
    pub fn is_azure(&self) -> bool {
        self.framework == Framework::Azure
    }

    /// Returns `true` if the framework is EC2.
    #[must_use]
    pub fn is_ec2(&self) -> bool {
        self.framework == Framework::Ec2
    }

    /// Returns `true` if the framework is GCE.
    #[must_use]
    pub fn is_gce(&self) -> bool {
        self.framework == Framework::Gce
    }

    /// Returns `true` if the framework is OCI.
    #[must_use]
    pub fn is_oci(&self) -> bool {
        self.framework == Framework::Oci
    }

    /// Returns `true` if the framework is Aliyun.
    #[must_use]
    pub fn is_aliyun(&self) -> bool {
        self.framework == Framework::Aliyun
    }

    /// Framework name as used in descriptions, e.g. `EC2` or `Azure`.
    #[must_use]
    pub const fn framework_name(&self) -> &'static str {
        self.framework.display_name()
    }

    /// `-{framework_name}`
    #[must_use]
    pub fn dash_framework(&self) -> String {
        format!("-{}", self.framework_name())
    }

    /// `{framework_name}-`
    #[must_use]
    pub fn framework_dash(&self) -> String {
        format!("{}-", self.framework_name())
    }

    /// Full image name as given.
    #[must_use]
    pub fn image_name(&self) -> &str {
        &self.name
    }

    /// Value captured for any [`Field`], if set.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&str> {
        self.captures.get(field)
    }

    /// All captured fields.
    #[must_use]
    pub const fn captures(&self) -> &Captures {
        &self.captures
    }

    // Architecture

    /// Image architecture, `x86_64` if the name does not specify one.
    #[must_use]
    pub fn arch(&self) -> Arch {
        Arch::from_token(self.field(Field::Arch))
    }

    /// Returns `true` if the image is for 64-bit x86.
    #[must_use]
    pub fn is_x86_64(&self) -> bool {
        self.arch().is_x86_64()
    }

    /// Same as [`is_x86_64()`](Self::is_x86_64()).
    #[must_use]
    pub fn is_amd64(&self) -> bool {
        self.is_x86_64()
    }

    /// Returns `true` if the image is for 64-bit ARM.
    #[must_use]
    pub fn is_arm64(&self) -> bool {
        self.arch().is_arm64()
    }

    /// Same as [`is_arm64()`](Self::is_arm64()).
    #[must_use]
    pub fn is_aarch64(&self) -> bool {
        self.is_arm64()
    }

    /// Architecture as named by cloud provider APIs, see [`Arch::cloud_arch()`].
    #[must_use]
    pub fn cloud_arch(&self) -> &'static str {
        self.arch().cloud_arch()
    }

    /// `-{arch}`, GCE uses dashes instead of underscores.
    #[must_use]
    pub fn dash_arch(&self) -> String {
        let arch = self.arch();
        if self.is_gce() {
            format!("-{}", arch.as_str().replace('_', "-"))
        } else {
            format!("-{arch}")
        }
    }

    // Products

    field_accessors! {
        /// openSUSE Leap product base.
        leap => Leap, is_leap;
        /// openSUSE product base.
        opensuse => Opensuse, is_opensuse;
        /// SUSE Linux Enterprise Server product base.
        sle_server => SleServer, is_sle_server;
        /// SUSE Linux Enterprise product base.
        sle => Sle, is_sle;
        /// `SUSE-Linux-Enterprise-Server` product base.
        sles_serv => SlesServ, is_sles_serv;
        /// SUSE Cloud Application Platform product base.
        cap => Cap, is_cap;
        /// SUSE CaaS Platform product base.
        caasp => Caasp, is_caasp;
        /// SUSE Manager product base, typed by [`suma_type()`](Self::suma_type()).
        suma => SuseManager, is_suma;
        /// SUSE Manager Server product base.
        sumaserver => SuseManagerServer, is_sumaserver;
        /// SUSE Manager Proxy product base.
        sumaproxy => SuseManagerProxy, is_sumaproxy;
        /// SUSE Rancher setup product base.
        lasso => Lasso, is_lasso;
        /// SUSE Manager type, `server` or `proxy`.
        suma_type => SumaType, has_suma_type, dash_suma_type, dash_suma_type_upper;
    }

    /// Capitalized [`suma_type()`](Self::suma_type()), e.g. `Server`.
    #[must_use]
    pub fn suma_type_desc(&self) -> String {
        self.suma_type().map(capitalize).unwrap_or_default()
    }

    // Flavors

    /// HPC marker captured before the product version.
    #[must_use]
    pub fn hpc1(&self) -> Option<&str> {
        self.field(Field::Hpc1)
    }

    /// HPC marker captured after the product version.
    #[must_use]
    pub fn hpc2(&self) -> Option<&str> {
        self.field(Field::Hpc2)
    }

    /// Returns `true` if the image is an HPC image, wherever the marker appears.
    #[must_use]
    pub fn is_hpc(&self) -> bool {
        self.hpc1().is_some() || self.hpc2().is_some()
    }

    /// `-hpc` for HPC images.
    #[must_use]
    pub fn dash_hpc(&self) -> String {
        flag_str(self.is_hpc(), "-hpc")
    }

    /// `-HPC` for HPC images.
    #[must_use]
    pub fn dash_hpc_upper(&self) -> String {
        self.dash_hpc().to_uppercase()
    }

    /// `hpc-` for HPC images.
    #[must_use]
    pub fn hpc_dash(&self) -> String {
        flag_str(self.is_hpc(), "hpc-")
    }

    /// `HPC-` for HPC images.
    #[must_use]
    pub fn hpc_dash_upper(&self) -> String {
        self.hpc_dash().to_uppercase()
    }

    /// SAP marker captured before the product version.
    #[must_use]
    pub fn sap1(&self) -> Option<&str> {
        self.field(Field::Sap1)
    }

    /// SAP marker captured after the product version.
    #[must_use]
    pub fn sap2(&self) -> Option<&str> {
        self.field(Field::Sap2)
    }

    /// Returns `true` if the image is a SAP image, wherever the marker appears.
    #[must_use]
    pub fn is_sap(&self) -> bool {
        self.sap1().is_some() || self.sap2().is_some()
    }

    /// `-sap` for SAP images.
    #[must_use]
    pub fn dash_sap(&self) -> String {
        flag_str(self.is_sap(), "-sap")
    }

    /// `-SAP` for SAP images.
    #[must_use]
    pub fn dash_sap_upper(&self) -> String {
        self.dash_sap().to_uppercase()
    }

    /// ` for SAP Applications` for SAP images.
    #[must_use]
    pub fn sap_desc(&self) -> String {
        flag_str(self.is_sap(), " for SAP Applications")
    }

    /// ` for SAP` for SAP images.
    #[must_use]
    pub fn sap_label_desc(&self) -> String {
        flag_str(self.is_sap(), " for SAP")
    }

    /// `HPC`, `Micro`, or `Server`.
    #[must_use]
    pub fn server_desc(&self) -> &'static str {
        if self.is_hpc() {
            "HPC"
        } else if self.is_micro() {
            "Micro"
        } else {
            "Server"
        }
    }

    field_accessors! {
        /// Container host marker.
        chost => Chost, is_chost, dash_chost, dash_chost_upper;
        /// SLE Micro marker.
        micro => Micro, is_micro, dash_micro, dash_micro_upper;
        /// SAP CAL or legacy EC2 flavor.
        sapcal => Sapcal, is_sapcal, dash_sapcal, dash_sapcal_upper;
        /// Azure hosting type, `li`, `vli`, or `guest`.
        azure_hosted => AzureHosted, is_azure_hosted, dash_azure_hosted, dash_azure_hosted_upper;
        /// `basic`, `admin`, or `cluster`.
        basic => Basic, is_basic;
        /// Priority support marker.
        priority => Priority, is_priority;
        /// Standard support marker.
        standard => Standard, is_standard;
        /// Legacy SUSE Manager edition, e.g. `server-2-1`.
        manager => Manager, has_manager;
    }

    /// `-Micro` for SLE Micro images.
    #[must_use]
    pub fn dash_micro_capitalized(&self) -> String {
        self.micro()
            .map(|micro| format!("-{}", capitalize(micro)))
            .unwrap_or_default()
    }

    // Payment model

    field_accessors! {
        /// Bring your own subscription marker.
        byos => Byos, is_byos, dash_byos, dash_byos_upper;
    }

    /// Returns `true` for pay as you go images, i.e. images which are not BYOS.
    #[must_use]
    pub fn is_payg(&self) -> bool {
        !self.is_byos()
    }

    /// Support description, e.g. ` - BYOS`.
    ///
    /// BYOS images are ` - BYOS`. Azure PAYG images are ` - Patching` if basic, otherwise
    /// ` - 24x7 support`. Empty for everything else.
    #[must_use]
    pub fn support_desc(&self) -> &'static str {
        if self.is_byos() {
            " - BYOS"
        } else if self.is_azure() {
            if self.is_basic() {
                " - Patching"
            } else {
                " - 24x7 support"
            }
        } else {
            ""
        }
    }

    // Product versions

    /// Product, including HPC, SAP, and Micro markers, e.g. `suse-sles-sap`.
    #[must_use]
    pub fn product(&self) -> Option<&str> {
        self.field(Field::Product)
    }

    /// Product base, e.g. `suse-sles`.
    #[must_use]
    pub fn product_base(&self) -> Option<&str> {
        self.field(Field::Prodbase)
    }

    /// Major product version.
    #[must_use]
    pub fn product_major(&self) -> Option<&str> {
        self.field(Field::MajorVersion)
    }

    /// Minor product version, either `SP<n>` (any case) or a bare digit.
    #[must_use]
    pub fn product_minor(&self) -> Option<&str> {
        self.field(Field::MinorVersion)
    }

    /// Minor product version as an integer, `0` if not set.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_image_name::ImageName;
    ///
    /// let image = ImageName::new("gce", "sles-15-sp2-byos-v20201016").unwrap();
    /// assert_eq!(image.product_minor_int(), 2);
    ///
    /// let image = ImageName::new("gce", "sles-15-byos-v20201016").unwrap();
    /// assert_eq!(image.product_minor_int(), 0);
    /// ```
    #[must_use]
    pub fn product_minor_int(&self) -> u32 {
        self.product_minor()
            .and_then(|minor| minor.to_ascii_lowercase().trim_start_matches("sp").parse().ok())
            .unwrap_or_default()
    }

    /// Product version, the major and minor versions joined with a dash for most products.
    ///
    /// Products which do not use a separator have their versions concatenated.
    #[must_use]
    pub fn product_version(&self) -> Option<String> {
        let joiner = if self.dashed_product_version() { "-" } else { "" };
        let parts: Vec<&str> = [self.product_major(), self.product_minor()]
            .into_iter()
            .flatten()
            .collect();
        (!parts.is_empty()).then(|| parts.join(joiner))
    }

    /// Whether the product's major and minor versions are separated by a dash.
    fn dashed_product_version(&self) -> bool {
        self.is_sle_server()
            || self.is_hpc()
            || self.is_lasso()
            || self.is_sles_serv()
            || self.is_suma()
            || self.is_caasp()
            || self.is_sumaserver()
            || self.is_sumaproxy()
            || self.is_leap()
            || self.is_micro()
            || self.is_opensuse()
    }

    /// Returns `true` if the image has a product version.
    #[must_use]
    pub fn has_product_version(&self) -> bool {
        self.product_major().is_some() || self.product_minor().is_some()
    }

    /// [`product_version()`](Self::product_version()) or an empty string.
    #[must_use]
    pub fn product_version_string(&self) -> String {
        self.product_version().unwrap_or_default()
    }

    /// Product version with dots replaced by dashes.
    #[must_use]
    pub fn product_version_dashed(&self) -> String {
        self.product_version_string().replace('.', "-")
    }

    /// Lowercase product version with dots replaced by dashes.
    #[must_use]
    pub fn product_version_dash_lower(&self) -> String {
        self.product_version_dashed().to_lowercase()
    }

    /// Lowercase product version.
    #[must_use]
    pub fn product_version_lower(&self) -> String {
        self.product_version_string().to_lowercase()
    }

    /// Product version with dashes replaced by spaces.
    #[must_use]
    pub fn product_version_spaced(&self) -> String {
        self.product_version_string().replace('-', " ")
    }

    /// Version of the distribution the product is built on.
    ///
    /// Same as the product version, except for SUSE Manager and SLE Micro, which are looked up
    /// in [`SUMA_DISTRO`] and [`MICRO_DISTRO`], and SUSE Rancher setup, which is always
    /// [`LASSO_DISTRO`].
    #[must_use]
    pub fn distro_version(&self) -> Option<&str> {
        self.distro_version.as_deref()
    }

    /// Returns `true` if the image has a distribution version.
    #[must_use]
    pub fn has_distro_version(&self) -> bool {
        self.distro_version.is_some()
    }

    /// [`distro_version()`](Self::distro_version()) or an empty string.
    #[must_use]
    pub fn distro_version_string(&self) -> &str {
        self.distro_version().unwrap_or_default()
    }

    /// Distribution version with dots replaced by dashes.
    #[must_use]
    pub fn distro_version_dashed(&self) -> String {
        self.distro_version_string().replace('.', "-")
    }

    /// Lowercase distribution version.
    #[must_use]
    pub fn distro_version_lower(&self) -> String {
        self.distro_version_string().to_lowercase()
    }

    /// Distribution version with dashes replaced by spaces.
    #[must_use]
    pub fn distro_version_spaced(&self) -> String {
        self.distro_version_string().replace('-', " ")
    }

    // Names

    /// Everything before the date stamp, without the UUID prefix.
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.field(Field::BaseName).unwrap_or_default()
    }

    /// Date stamp, from either the `-v{date}` or the `-{date}` form.
    #[must_use]
    pub fn datestamp(&self) -> Option<&str> {
        self.field(Field::Datestamp)
            .or_else(|| self.field(Field::Datestmp))
    }

    /// Image name with [`DATE_PLACEHOLDER`] in place of the date stamp.
    ///
    /// The suffix is appended, except on Azure.
    #[must_use]
    pub fn generic_name(&self) -> String {
        self.name_with_date(DATE_PLACEHOLDER)
    }

    /// Image name with its date stamp, followed by `-{uuid}` if there is a UUID prefix.
    ///
    /// The suffix and UUID are appended, except on Azure.
    #[must_use]
    pub fn unique_name(&self) -> String {
        let name = self.name_with_date(self.datestamp().unwrap_or_default());
        match self.uuid_prefix() {
            Some(uuid) if !self.is_azure() => format!("{name}-{uuid}"),
            _ => name,
        }
    }

    /// `{base_name}-v{date}{suffix}`, without the suffix on Azure.
    fn name_with_date(&self, date: &str) -> String {
        let mut name = format!("{}-v{date}", self.base_name());
        if !self.is_azure() {
            name.push_str(self.suffix().unwrap_or_default());
        }
        name
    }

    field_accessors! {
        /// Azure UUID prefix, without the trailing `__`.
        uuid_prefix => UuidPrefix, has_uuid_prefix;
        /// Everything after the date stamp.
        suffix => Suffix, has_suffix;
        /// Generation id, e.g. `gen2`.
        gen_id => GenId, has_gen_id;
    }

    // Suffix

    field_accessors! {
        /// EC2 Container Service optimized marker.
        ecs => Ecs, is_ecs, dash_ecs, dash_ecs_upper;
        /// Virtualization type, e.g. `hvm`.
        virt_type => VirtType, has_virt_type, dash_virt_type, dash_virt_type_upper;
        /// SSD storage marker.
        ssd => Ssd, is_ssd, dash_ssd, dash_ssd_upper;
    }

    /// Returns `true` for ECS optimized EC2 images.
    #[must_use]
    pub fn is_ec2_and_ecs(&self) -> bool {
        self.is_ec2() && self.is_ecs()
    }

    /// ` ECS Optimized` for ECS optimized images.
    #[must_use]
    pub fn ecs_desc(&self) -> String {
        flag_str(self.is_ecs(), " ECS Optimized")
    }

    /// `ECS-` for ECS optimized images.
    #[must_use]
    pub fn ecs_dash_upper(&self) -> String {
        self.ecs()
            .map(|ecs| format!("{}-", ecs.to_uppercase()))
            .unwrap_or_default()
    }

    /// Returns `true` for HVM images.
    #[must_use]
    pub fn is_hvm(&self) -> bool {
        self.virt_type() == Some("hvm")
    }

    /// Returns `true` for paravirtual images.
    #[must_use]
    pub fn is_pv(&self) -> bool {
        self.virt_type() == Some("pv")
    }

    /// EC2 suffix, `{dash_ecs}{dash_virt_type}{dash_ssd}{dash_arch}`.
    #[must_use]
    pub fn dash_ec2_sfx(&self) -> String {
        [
            self.dash_ecs(),
            self.dash_virt_type(),
            self.dash_ssd(),
            self.dash_arch(),
        ]
        .concat()
    }

    /// Upper-cased [`dash_ec2_sfx()`](Self::dash_ec2_sfx()).
    #[must_use]
    pub fn dash_ec2_sfx_upper(&self) -> String {
        self.dash_ec2_sfx().to_uppercase()
    }
}

impl AsRef<str> for ImageName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl Display for ImageName {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// `value` if `flag` is set, otherwise an empty string.
fn flag_str(flag: bool, value: &str) -> String {
    if flag {
        value.to_owned()
    } else {
        String::new()
    }
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// Error returned when creating an [`ImageName`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImageParserError {
    /// Invalid or missing framework.
    #[error(transparent)]
    Framework(#[from] InvalidFrameworkError),

    /// The image name does not match the grammar.
    #[error("Could not match regex for image: {name}")]
    NoMatch {
        /// Rejected image name.
        name: String,
    },

    /// SLES image name on EC2 or Azure without the `suse-` vendor prefix.
    #[error("{framework} image {name} does not start with 'suse'")]
    VendorPrefix {
        /// Framework of the image.
        framework: Framework,
        /// Rejected image name.
        name: String,
    },

    /// The product version is missing from its product's distribution version table.
    ///
    /// This is a defect in the tables rather than in the input, see
    /// [`is_defect()`](Self::is_defect()).
    #[error("no {product} distribution version mapping for product version `{version}`")]
    UnmappedDistroVersion {
        /// Product the table is for.
        product: &'static str,
        /// Product version missing from the table.
        version: String,
    },
}

impl ImageParserError {
    /// Returns `true` if the error is caused by out of date static data rather than by the input.
    #[must_use]
    pub const fn is_defect(&self) -> bool {
        matches!(self, Self::UnmappedDistroVersion { .. })
    }
}
