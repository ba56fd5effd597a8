//! Per-distribution identification probes.
//!
//! Each probe looks for one kind of evidence (a release file, a command)
//! and returns [`Error::NotIdentified`] when that evidence is absent, so the
//! resolver can move on to the next probe.

use crate::error::{Error, Result};
use crate::line_parser::LineParser;
use crate::types::{Family, LsbInfo, Name, PlatformInfo};
use declarative::CommandRunner;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

const SW_VERS: &str = "/usr/bin/sw_vers";
const LSB_RELEASE: &str = "lsb_release";

static RELEASE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"release (\d[\d.]*)").unwrap_or_else(|e| panic!("invalid release pattern: {e}"))
});

/// A single identification strategy.
pub trait Probe: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Identify the host, or report `Error::NotIdentified`.
    ///
    /// # Errors
    ///
    /// `Error::NotIdentified` when this probe does not apply; any other
    /// error aborts resolution.
    fn identify(&self) -> Result<PlatformInfo>;
}

/// Read a release descriptor under `root`, mapping absence to `NotIdentified`.
fn read_marker(root: &Path, relative: &str) -> Result<String> {
    let path = root.join(relative);
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::NotIdentified),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// LSB release information, read once and cached.
///
/// `/etc/lsb-release` is preferred; when it does not exist the output of
/// `lsb_release -a` is used instead. A host with neither has no LSB info.
pub struct LsbSource {
    root: PathBuf,
    runner: Arc<dyn CommandRunner>,
    /// `None` until a lookup completes; `Some(None)` for a host without LSB info
    cache: RwLock<Option<Option<LsbInfo>>>,
}

impl LsbSource {
    /// Create a source reading descriptors relative to `root`.
    pub fn new(root: impl Into<PathBuf>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            root: root.into(),
            runner,
            cache: RwLock::new(None),
        }
    }

    /// Look up LSB info.
    ///
    /// The first completed lookup is cached, including "no LSB info".
    /// Errors are not cached.
    ///
    /// # Errors
    ///
    /// Fails when `/etc/lsb-release` exists but cannot be read or parsed.
    pub fn lookup(&self) -> Result<Option<LsbInfo>> {
        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = guard.as_ref() {
            return Ok(cached.clone());
        }
        let found = self.load()?;
        *guard = Some(found.clone());
        Ok(found)
    }

    fn load(&self) -> Result<Option<LsbInfo>> {
        let path = self.root.join("etc/lsb-release");
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let map = LineParser::new('=').parse(&contents)?;
                let field = |key: &str| map.get(key).cloned().unwrap_or_default();
                return Ok(Some(LsbInfo {
                    id: field("DISTRIB_ID"),
                    release: field("DISTRIB_RELEASE"),
                    codename: field("DISTRIB_CODENAME"),
                    description: field("DISTRIB_DESCRIPTION"),
                }));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(path, e)),
        }

        let output = match self.runner.run(LSB_RELEASE, &["-a"], &[]) {
            Ok(output) if output.success => output,
            Ok(_) => {
                log::debug!("{LSB_RELEASE} exited unsuccessfully");
                return Ok(None);
            }
            Err(e) => {
                log::debug!("{LSB_RELEASE} is unavailable: {e:#}");
                return Ok(None);
            }
        };

        let parser = LineParser {
            delimiter: ':',
            trim_spaces: true,
            trim_quotes: false,
        };
        let map = parser.parse(&output.stdout_str())?;
        let field = |key: &str| map.get(key).cloned().unwrap_or_default();
        Ok(Some(LsbInfo {
            id: field("Distributor ID"),
            release: field("Release"),
            codename: field("Codename"),
            description: field("Description"),
        }))
    }
}

/// Debian and its derivatives, keyed on `/etc/debian_version`.
pub struct DebianProbe {
    root: PathBuf,
    lsb: Arc<LsbSource>,
}

impl DebianProbe {
    pub fn new(root: impl Into<PathBuf>, lsb: Arc<LsbSource>) -> Self {
        Self {
            root: root.into(),
            lsb,
        }
    }
}

impl Probe for DebianProbe {
    fn name(&self) -> &'static str {
        "debian"
    }

    fn identify(&self) -> Result<PlatformInfo> {
        let debian_version = read_marker(&self.root, "etc/debian_version")?;

        let info = match self.lsb.lookup()? {
            Some(lsb) => {
                let platform = if lsb.id.starts_with("Ubuntu") {
                    Name::Ubuntu
                } else if lsb.id.starts_with("LinuxMint") {
                    Name::LinuxMint
                } else {
                    Name::Debian
                };
                PlatformInfo::new(platform, Family::Debian, lsb.release)
            }
            None => PlatformInfo::new(Name::Debian, Family::Debian, debian_version.trim()),
        };
        Ok(info)
    }
}

/// Red Hat family, keyed on `/etc/redhat-release`.
pub struct RedHatProbe {
    root: PathBuf,
}

impl RedHatProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Probe for RedHatProbe {
    fn name(&self) -> &'static str {
        "redhat"
    }

    fn identify(&self) -> Result<PlatformInfo> {
        let release = read_marker(&self.root, "etc/redhat-release")?;

        let lower = release.to_lowercase();
        let platform = if lower.starts_with("centos") {
            Name::CentOs
        } else if lower.starts_with("red hat enterprise") {
            Name::Rhel
        } else {
            Name::Unknown
        };

        let version = RELEASE_VERSION
            .captures(&release)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Ok(PlatformInfo::new(platform, Family::Rhel, version))
    }
}

/// macOS, via `sw_vers`.
pub struct SwVersProbe {
    runner: Arc<dyn CommandRunner>,
}

impl SwVersProbe {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl Probe for SwVersProbe {
    fn name(&self) -> &'static str {
        "sw_vers"
    }

    fn identify(&self) -> Result<PlatformInfo> {
        let output = self
            .runner
            .run(SW_VERS, &[], &[])
            .map_err(|e| Error::Command(format!("{SW_VERS}: {e:#}")))?;
        if !output.success {
            return Err(Error::Command(format!(
                "{SW_VERS}: {}",
                output.stderr_str().trim()
            )));
        }

        let parser = LineParser {
            delimiter: ':',
            trim_spaces: true,
            trim_quotes: false,
        };
        let map = parser.parse(&output.stdout_str())?;

        Ok(PlatformInfo {
            platform: Name::MacOsX,
            family: Family::MacOsX,
            version: map.get("ProductVersion").cloned().unwrap_or_default(),
            build_version: map.get("BuildVersion").cloned().unwrap_or_default(),
        })
    }
}
