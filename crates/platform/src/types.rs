//! Platform facts.

use declarative::Facts;
use std::fmt;

/// Fine-grained platform identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Name {
    /// macOS
    MacOsX,
    /// Debian GNU/Linux
    Debian,
    /// Ubuntu
    Ubuntu,
    /// Linux Mint
    LinuxMint,
    /// CentOS
    CentOs,
    /// Red Hat Enterprise Linux
    Rhel,
    /// A member of a known family without a more specific identity
    Unknown,
}

impl Name {
    /// The fact value for this platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MacOsX => "mac_os_x",
            Self::Debian => "debian",
            Self::Ubuntu => "ubuntu",
            Self::LinuxMint => "linuxmint",
            Self::CentOs => "centos",
            Self::Rhel => "rhel",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse platform family, used to select package-manager adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// debian, ubuntu, linuxmint
    Debian,
    /// centos, rhel
    Rhel,
    /// macOS only
    MacOsX,
    /// Anything else
    Unknown,
}

impl Family {
    /// The fact value for this family.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debian => "debian",
            Self::Rhel => "rhel",
            Self::MacOsX => "mac_os_x",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a family fact value; anything unrecognised is `Unknown`.
    pub fn from_fact(value: &str) -> Self {
        match value {
            "debian" => Self::Debian,
            "rhel" => Self::Rhel,
            "mac_os_x" => Self::MacOsX,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identified platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Platform name
    pub platform: Name,
    /// Platform family
    pub family: Family,
    /// Release version, e.g. "12.4" or "22.04"
    pub version: String,
    /// Build version (macOS only)
    pub build_version: String,
}

impl PlatformInfo {
    /// Create platform info without a build version.
    pub fn new(platform: Name, family: Family, version: impl Into<String>) -> Self {
        Self {
            platform,
            family,
            version: version.into(),
            build_version: String::new(),
        }
    }
}

impl Facts for PlatformInfo {
    fn get(&self, name: &str) -> String {
        match name {
            "platform" => self.platform.as_str().to_string(),
            "family" => self.family.as_str().to_string(),
            "version" => self.version.clone(),
            "build_version" => self.build_version.clone(),
            _ => String::new(),
        }
    }
}

/// Release information from an LSB-style descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LsbInfo {
    /// Distributor ID, e.g. "Ubuntu"
    pub id: String,
    /// Release number
    pub release: String,
    /// Release codename
    pub codename: String,
    /// Free-form description
    pub description: String,
}

impl Facts for LsbInfo {
    fn get(&self, name: &str) -> String {
        match name {
            "id" => self.id.clone(),
            "release" => self.release.clone(),
            "codename" => self.codename.clone(),
            "description" => self.description.clone(),
            _ => String::new(),
        }
    }
}
