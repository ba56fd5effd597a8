//! Homebrew adapter for macOS.

use crate::backend::PackageManager;
use crate::error::{Error, Result};
use crate::guard::UpdateGuard;
use crate::types::{BrewFormula, PackageDescriptor};
use declarative::{CommandOutput, CommandRunner};
use std::path::Path;
use std::sync::Arc;

/// Locate the brew executable.
///
/// Checks the standard prefixes and falls back to `brew` on `PATH`.
pub fn find_brew() -> String {
    let paths = [
        "/opt/homebrew/bin/brew",              // Apple Silicon
        "/usr/local/bin/brew",                 // Intel
        "/home/linuxbrew/.linuxbrew/bin/brew", // Linux
    ];

    paths
        .iter()
        .find(|p| Path::new(p).exists())
        .map_or_else(|| "brew".to_string(), |p| (*p).to_string())
}

/// Check a formula's `brew info` entry against the requested package.
///
/// `formula` is `None` when brew does not know the package. The version is
/// compared exactly against the linked keg, and every requested option must
/// appear in the linked version's build options.
pub fn check_installed(formula: Option<&BrewFormula>, pkg: &PackageDescriptor) -> Result<()> {
    let Some(formula) = formula else {
        return Err(Error::NotFound {
            name: pkg.name.clone(),
        });
    };
    if !formula.is_installed() {
        return Err(Error::unsatisfied(&pkg.name, "the package is not installed"));
    }

    let linked = formula.linked_version();
    if !pkg.version.is_empty() && pkg.version != linked {
        return Err(Error::unsatisfied(
            &pkg.name,
            format!("expected version {}, but {linked} is installed", pkg.version),
        ));
    }

    let used: &[String] = formula
        .linked()
        .map(|v| v.used_options.as_slice())
        .unwrap_or_default();
    if let Some(missing) = pkg.options.iter().find(|opt| !used.contains(opt)) {
        return Err(Error::unsatisfied(
            &pkg.name,
            format!("the option {missing} is not used"),
        ));
    }
    Ok(())
}

/// The `brew` CLI
pub struct Homebrew {
    runner: Arc<dyn CommandRunner>,
    brew_path: String,
}

impl Homebrew {
    pub fn new(runner: Arc<dyn CommandRunner>, brew_path: &str) -> Self {
        Self {
            runner,
            brew_path: brew_path.to_string(),
        }
    }

    /// Run a brew command and return output.
    fn run_brew(&self, args: &[&str]) -> Result<CommandOutput> {
        log::debug!("brew {}", args.join(" "));
        self.runner
            .run(&self.brew_path, args, &[])
            .map_err(|e| Error::spawn(&e))
    }

    /// Run a brew command and check for success.
    fn run_brew_checked(&self, args: &[&str], package_name: &str) -> Result<CommandOutput> {
        let output = self.run_brew(args)?;
        if !output.success {
            return Err(Error::from_brew_output(&output.stderr_str(), package_name));
        }
        Ok(output)
    }

    /// `brew info --json=v1 <name>`, or `None` if brew does not know it.
    pub fn info(&self, name: &str) -> Result<Option<BrewFormula>> {
        let output = match self.run_brew_checked(&["info", "--json=v1", name], name) {
            Ok(output) => output,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        let formula = serde_json::from_slice::<Vec<BrewFormula>>(&output.stdout)?
            .into_iter()
            .next();
        if let Some(f) = &formula {
            log::debug!("brew info {}: linked {}", f.name, f.linked_version());
        }
        Ok(formula)
    }

    fn tap(&self, repository: &str) -> Result<()> {
        self.run_brew_checked(&["tap", repository], repository)?;
        Ok(())
    }

    fn install(&self, pkg: &PackageDescriptor) -> Result<()> {
        let mut args = vec!["install", pkg.name.as_str()];
        args.extend(pkg.options.iter().map(String::as_str));
        self.run_brew_checked(&args, &pkg.name)?;
        Ok(())
    }

    fn uninstall(&self, name: &str) -> Result<()> {
        self.run_brew_checked(&["uninstall", name], name)?;
        Ok(())
    }
}

impl PackageManager for Homebrew {
    fn name(&self) -> &'static str {
        "homebrew"
    }

    fn update(&self) -> Result<()> {
        self.run_brew_checked(&["update"], "update")?;
        Ok(())
    }

    fn test_installed(&self, pkg: &PackageDescriptor) -> Result<()> {
        check_installed(self.info(&pkg.name)?.as_ref(), pkg)
    }

    fn apply_installed(&self, pkg: &PackageDescriptor, guard: &UpdateGuard) -> Result<()> {
        if pkg.update {
            guard.run_once(|| self.update())?;
        }

        // user/repo/formula lives in the user/repo tap
        if let Some(i) = pkg.name.rfind('/')
            && i > 0
        {
            self.tap(&pkg.name[..i])?;
        }

        if let Some(formula) = self.info(&pkg.name)?
            && formula.is_installed()
        {
            if check_installed(Some(&formula), pkg).is_ok() {
                return Ok(());
            }
            log::debug!("replacing installed {}", pkg.name);
            self.uninstall(&pkg.name)?;
        }

        self.install(pkg)
    }

    fn test_removed(&self, name: &str) -> Result<()> {
        match self.info(name)? {
            Some(formula) if formula.is_installed() => {
                Err(Error::unsatisfied(name, "the package is installed"))
            }
            _ => Ok(()),
        }
    }

    fn apply_removed(&self, name: &str) -> Result<()> {
        self.uninstall(name)
    }
}
