//! Subprocess execution.
//!
//! Build steps describe commands as [`CommandSpec`] values and hand them to a
//! [`CommandRunner`]. [`SystemRunner`] actually spawns them; tests use
//! [`crate::test_support::RecordingRunner`].

use crate::console;
use crate::error::{BuildError, Result};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A program invocation: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Working directory, if different from the current one.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Invocation of `program` without arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// File name of the program, so `/x/buildtools/linux/gn` reads as `gn`.
    pub fn program_name(&self) -> &str {
        Path::new(&self.program)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.program)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes commands on behalf of the build steps.
pub trait CommandRunner {
    /// Runs the command to completion with inherited stdio.
    ///
    /// # Errors
    ///
    /// [`BuildError::CommandNotFound`] when the program cannot be found and
    /// [`BuildError::CommandFailed`] when it exits unsuccessfully.
    fn run(&self, spec: &CommandSpec) -> Result<()>;

    /// Runs the command silently and reports whether it succeeded.
    fn probe(&self, spec: &CommandSpec) -> bool;

    /// Finds `program` on the runner's search path.
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Announces a command before it runs.
pub fn announce(spec: &CommandSpec) {
    console::info(format!("Running: {spec}"));
    if let Some(cwd) = &spec.cwd {
        console::info(format!("Working directory: {}", cwd.display()));
    }
}

/// Spawns real processes.
///
/// Programs are resolved against `PATH`, optionally prefixed with extra
/// directories (such as a depot_tools checkout that the current shell has not
/// picked up yet). Children inherit the same effective `PATH`.
#[derive(Debug, Default, Clone)]
pub struct SystemRunner {
    search_path: Option<OsString>,
}

impl SystemRunner {
    /// Runner using the inherited `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `dir` in front of the search path.
    pub fn with_path_prefix(mut self, dir: impl Into<PathBuf>) -> Self {
        let current = self
            .search_path
            .take()
            .or_else(|| std::env::var_os("PATH"))
            .unwrap_or_default();
        let mut dirs = vec![dir.into()];
        dirs.extend(std::env::split_paths(&current));
        match std::env::join_paths(dirs) {
            Ok(joined) => self.search_path = Some(joined),
            Err(e) => {
                log::warn!("cannot extend PATH: {e}");
                self.search_path = Some(current);
            }
        }
        self
    }

    fn resolve(&self, program: &str) -> Option<PathBuf> {
        let path = Path::new(program);
        if path.components().count() > 1 {
            return path.is_file().then(|| path.to_path_buf());
        }
        let cwd = std::env::current_dir().ok()?;
        let search = self
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"));
        which::which_in(program, search, cwd).ok()
    }

    fn command(&self, spec: &CommandSpec) -> Result<Command> {
        let resolved = self
            .resolve(&spec.program)
            .ok_or_else(|| BuildError::CommandNotFound {
                program: spec.program.clone(),
            })?;
        log::debug!("{} resolved to {}", spec.program, resolved.display());

        let mut cmd = Command::new(resolved);
        cmd.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }
        if let Some(path) = &self.search_path {
            cmd.env("PATH", path);
        }
        Ok(cmd)
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<()> {
        announce(spec);
        log::debug!("spawning {spec:?}");

        let status = self
            .command(spec)?
            .status()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => BuildError::CommandNotFound {
                    program: spec.program.clone(),
                },
                _ => BuildError::Io(e),
            })?;

        if !status.success() {
            return Err(BuildError::CommandFailed {
                command: spec.to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    fn probe(&self, spec: &CommandSpec) -> bool {
        let Ok(mut cmd) = self.command(spec) else {
            return false;
        };
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.resolve(program)
    }
}
