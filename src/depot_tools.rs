//! Installing, updating and removing Chromium's depot_tools.
//!
//! depot_tools provides `gclient`, `fetch`, `gn` and `ninja`. It is cloned
//! into a directory (default `~/depot_tools`) that is then appended to `PATH`
//! through the shell startup files.

use crate::console;
use crate::error::{BuildError, Result};
use crate::runner::{CommandRunner, CommandSpec};
use crate::shell_rc;
use std::path::{Path, PathBuf};

/// Upstream depot_tools repository.
pub const DEPOT_TOOLS_URL: &str =
    "https://chromium.googlesource.com/chromium/tools/depot_tools.git";

/// A depot_tools location and the startup files that put it on `PATH`.
#[derive(Debug, Clone)]
pub struct DepotTools {
    dir: PathBuf,
    startup_files: Vec<PathBuf>,
}

impl DepotTools {
    /// depot_tools at `dir`, registered in `startup_files`.
    pub fn new(dir: impl Into<PathBuf>, startup_files: Vec<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            startup_files,
        }
    }

    /// Resolves the location from an explicit directory or `~/depot_tools`,
    /// and the startup files from the home directory and `$SHELL`.
    pub fn locate(dir: Option<PathBuf>) -> Result<Self> {
        let home = dirs::home_dir().ok_or(BuildError::NoHomeDir)?;
        let dir = dir.unwrap_or_else(|| home.join("depot_tools"));
        let shell = std::env::var("SHELL").ok();
        let startup_files = shell_rc::startup_files(&home, shell.as_deref());
        Ok(Self::new(dir, startup_files))
    }

    /// Installation directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Startup files that receive the `PATH` entry.
    pub fn startup_files(&self) -> &[PathBuf] {
        &self.startup_files
    }

    /// Whether the directory exists.
    pub fn is_installed(&self) -> bool {
        self.dir.is_dir()
    }

    /// Clones depot_tools if needed and registers it on `PATH`.
    pub fn setup<R: CommandRunner>(&self, runner: &R) -> Result<()> {
        console::info("Setting up depot_tools...");

        if self.is_installed() {
            console::success(format!(
                "depot_tools already present at {}",
                self.dir.display()
            ));
        } else {
            if let Some(existing) = runner.locate("gclient") {
                console::warning(format!(
                    "gclient is already on PATH at {}; installing a separate copy",
                    existing.display()
                ));
            }
            if let Some(parent) = self.dir.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| BuildError::file("create", parent, e))?;
            }
            console::info("Cloning depot_tools...");
            runner.run(
                &CommandSpec::new("git")
                    .arg("clone")
                    .arg(DEPOT_TOOLS_URL)
                    .arg(self.dir.display().to_string()),
            )?;
            console::success(format!("depot_tools cloned to {}", self.dir.display()));
        }

        self.register_path()?;
        Ok(())
    }

    /// Pulls the latest depot_tools.
    pub fn update<R: CommandRunner>(&self, runner: &R) -> Result<()> {
        if !self.is_installed() {
            return Err(BuildError::DepotToolsMissing(self.dir.clone()));
        }

        console::info("Updating depot_tools...");
        let script_name = if cfg!(windows) {
            "update_depot_tools.bat"
        } else {
            "update_depot_tools"
        };
        let script = self.dir.join(script_name);

        let spec = if script.is_file() {
            CommandSpec::new(script.display().to_string())
        } else {
            log::debug!("{} not found, falling back to git pull", script.display());
            CommandSpec::new("git").args(["pull", "--ff-only"])
        };
        runner.run(&spec.current_dir(&self.dir))?;

        console::success("depot_tools updated");
        Ok(())
    }

    /// Removes the `PATH` entry and deletes the directory.
    pub fn remove(&self) -> Result<()> {
        console::info("Removing depot_tools...");

        for file in &self.startup_files {
            if shell_rc::unregister(file, &self.dir)? {
                console::success(format!("Removed PATH entry from {}", file.display()));
            }
        }

        if self.is_installed() {
            std::fs::remove_dir_all(&self.dir)
                .map_err(|e| BuildError::file("remove", &self.dir, e))?;
            console::success(format!("Deleted {}", self.dir.display()));
        } else {
            console::info(format!("{} does not exist", self.dir.display()));
        }
        Ok(())
    }

    fn register_path(&self) -> Result<()> {
        if self.startup_files.is_empty() {
            console::warning(format!(
                "Add {} to your PATH manually",
                self.dir.display()
            ));
            return Ok(());
        }

        let mut changed = false;
        for file in &self.startup_files {
            if shell_rc::register(file, &self.dir)? {
                console::success(format!("Added depot_tools to PATH in {}", file.display()));
                changed = true;
            } else {
                console::info(format!("PATH entry already present in {}", file.display()));
            }
        }
        if changed {
            console::info("Open a new shell (or source the file above) to pick up the new PATH");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingRunner;

    fn fixture() -> (tempfile::TempDir, DepotTools) {
        let home = tempfile::tempdir().unwrap();
        let rc = home.path().join(".bashrc");
        std::fs::write(&rc, "export A=1\n").unwrap();
        let depot = DepotTools::new(home.path().join("depot_tools"), vec![rc]);
        (home, depot)
    }

    #[test]
    fn test_setup_clones_and_registers() {
        let (_home, depot) = fixture();
        let dir = depot.dir().to_path_buf();
        let runner = RecordingRunner::new().on_run("git", move |_| {
            std::fs::create_dir_all(&dir).unwrap();
        });

        depot.setup(&runner).unwrap();

        let commands = runner.commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0].args,
            vec![
                "clone".to_string(),
                DEPOT_TOOLS_URL.to_string(),
                depot.dir().display().to_string()
            ]
        );
        assert!(depot.is_installed());
        let rc = std::fs::read_to_string(&depot.startup_files()[0]).unwrap();
        assert!(rc.contains(&shell_rc::export_line(depot.dir())));
    }

    #[test]
    fn test_setup_skips_clone_when_present() {
        let (_home, depot) = fixture();
        std::fs::create_dir_all(depot.dir()).unwrap();
        let runner = RecordingRunner::new();

        depot.setup(&runner).unwrap();
        assert!(runner.commands().is_empty());
        let rc = std::fs::read_to_string(&depot.startup_files()[0]).unwrap();
        assert!(rc.contains(shell_rc::BLOCK_BEGIN));
    }

    #[test]
    fn test_setup_propagates_clone_failure() {
        let (_home, depot) = fixture();
        let runner = RecordingRunner::new().fail_on("git");
        assert!(matches!(
            depot.setup(&runner),
            Err(BuildError::CommandFailed { .. })
        ));
        let rc = std::fs::read_to_string(&depot.startup_files()[0]).unwrap();
        assert!(!rc.contains(shell_rc::BLOCK_BEGIN));
    }

    #[test]
    fn test_update_requires_install() {
        let (_home, depot) = fixture();
        assert!(matches!(
            depot.update(&RecordingRunner::new()),
            Err(BuildError::DepotToolsMissing(_))
        ));
    }

    #[test]
    fn test_update_prefers_script() {
        let (_home, depot) = fixture();
        std::fs::create_dir_all(depot.dir()).unwrap();
        let runner = RecordingRunner::new();

        depot.update(&runner).unwrap();
        assert_eq!(runner.commands()[0].to_string(), "git pull --ff-only");
        assert_eq!(runner.commands()[0].cwd.as_deref(), Some(depot.dir()));

        let script = if cfg!(windows) {
            "update_depot_tools.bat"
        } else {
            "update_depot_tools"
        };
        std::fs::write(depot.dir().join(script), "").unwrap();
        depot.update(&runner).unwrap();
        assert_eq!(runner.commands()[1].program_name(), script);
    }

    #[test]
    fn test_remove_unregisters_and_deletes() {
        let (_home, depot) = fixture();
        std::fs::create_dir_all(depot.dir().join("recipes")).unwrap();
        depot.setup(&RecordingRunner::new()).unwrap();

        depot.remove().unwrap();
        assert!(!depot.is_installed());
        let rc = std::fs::read_to_string(&depot.startup_files()[0]).unwrap();
        assert_eq!(rc, "export A=1\n");

        // Removing again is harmless.
        depot.remove().unwrap();
    }
}
