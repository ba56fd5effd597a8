//! APT adapter for the Debian family.
//!
//! Commands run as single `/bin/sh -c` lines so that escaped tokens such as
//! `name\=1.0` reach apt-get as one word.

use crate::backend::PackageManager;
use crate::error::{Error, Result};
use crate::guard::UpdateGuard;
use crate::shell::shell_escape;
use crate::types::PackageDescriptor;
use declarative::{CommandOutput, CommandRunner};
use std::sync::Arc;

pub const APT_GET: &str = "/usr/bin/apt-get";
pub const DPKG_QUERY: &str = "/usr/bin/dpkg-query";

const INSTALL_OPTIONS: &[&str] = &[
    "-o Dpkg::Options::='--force-confdef'",
    "-o Dpkg::Options::='--force-confold'",
];
const NONINTERACTIVE: &[(&str, &str)] = &[("DEBIAN_FRONTEND", "noninteractive")];
const INSTALLED_STATUS: &str = "install ok installed\n";
const NO_PACKAGES_FOUND: &str = "no packages found";

/// apt-get and dpkg-query
pub struct Apt {
    runner: Arc<dyn CommandRunner>,
    apt_get: String,
    dpkg_query: String,
}

impl Apt {
    pub fn new(runner: Arc<dyn CommandRunner>, apt_get: &str, dpkg_query: &str) -> Self {
        Self {
            runner,
            apt_get: shell_escape(apt_get),
            dpkg_query: shell_escape(dpkg_query),
        }
    }

    fn sh(&self, command_line: &str, env: &[(&str, &str)]) -> Result<CommandOutput> {
        log::debug!("apt: {command_line}");
        self.runner
            .run_shell(command_line, env)
            .map_err(|e| Error::spawn(&e))
    }

    fn sh_checked(&self, command_line: &str) -> Result<()> {
        let output = self.sh(command_line, NONINTERACTIVE)?;
        if output.success {
            Ok(())
        } else {
            Err(Error::command(command_line, &output.stderr_str()))
        }
    }

    fn install_command(&self, pkg: &PackageDescriptor) -> String {
        format!(
            "{} install -y {} {}",
            self.apt_get,
            INSTALL_OPTIONS.join(" "),
            shell_escape(&pkg.versioned_name())
        )
    }
}

/// Check `dpkg-query --showformat='${Status}\n${Version}'` output.
///
/// The version check is a prefix match: "5.0" accepts "5.0.3-1".
pub fn check_installed_output(name: &str, stdout: &str, version: &str) -> Result<()> {
    let Some(installed_version) = stdout.strip_prefix(INSTALLED_STATUS) else {
        if !stdout.contains('\n') {
            return Err(Error::Parse(format!("the result of dpkg-query for {name}")));
        }
        return Err(Error::unsatisfied(name, "the package is not installed"));
    };

    if !version.is_empty() && !installed_version.starts_with(version) {
        return Err(Error::unsatisfied(
            name,
            format!(
                "expected version {version}, but {} is installed",
                installed_version.trim()
            ),
        ));
    }
    Ok(())
}

/// Classify `dpkg-query --show` output for a package that should be absent.
pub fn check_removed_output(name: &str, output: &CommandOutput) -> Result<()> {
    if output.success {
        return Err(Error::unsatisfied(name, "the package is installed"));
    }
    let combined = output.combined_str();
    if combined.contains(NO_PACKAGES_FOUND) {
        Ok(())
    } else {
        Err(Error::command("dpkg-query --show", &combined))
    }
}

impl PackageManager for Apt {
    fn name(&self) -> &'static str {
        "apt"
    }

    fn update(&self) -> Result<()> {
        self.sh_checked(&format!("{} update", self.apt_get))
    }

    fn test_installed(&self, pkg: &PackageDescriptor) -> Result<()> {
        let command_line = format!(
            "{} --showformat='${{Status}}\\n${{Version}}' --show {}",
            self.dpkg_query,
            shell_escape(&pkg.name)
        );
        let output = self.sh(&command_line, &[])?;
        if !output.success {
            return Err(Error::command(&command_line, &output.stderr_str()));
        }
        check_installed_output(&pkg.name, &output.stdout_str(), &pkg.version)
    }

    fn apply_installed(&self, pkg: &PackageDescriptor, guard: &UpdateGuard) -> Result<()> {
        if pkg.update {
            guard.run_once(|| self.update())?;
        }
        self.sh_checked(&self.install_command(pkg))
    }

    fn test_removed(&self, name: &str) -> Result<()> {
        let command_line = format!("{} --show {}", self.dpkg_query, shell_escape(name));
        let output = self.sh(&command_line, &[])?;
        check_removed_output(name, &output)
    }

    fn apply_removed(&self, name: &str) -> Result<()> {
        self.sh_checked(&format!("{} remove -y {}", self.apt_get, shell_escape(name)))
    }
}
