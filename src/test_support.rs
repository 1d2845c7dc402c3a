//! Test helpers (always compiled) used to drive build steps without spawning
//! real toolchains.

use crate::error::{BuildError, Result};
use crate::runner::{CommandRunner, CommandSpec};
use std::cell::RefCell;
use std::path::PathBuf;

type Effect = Box<dyn Fn(&CommandSpec)>;

/// A [`CommandRunner`] that records every command instead of running it.
///
/// Programs are matched by file name, so `gn` matches
/// `/p/third_party/pdfium/buildtools/linux/gn`.
#[derive(Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<CommandSpec>>,
    failing: Vec<String>,
    missing: Vec<String>,
    located: Vec<(String, PathBuf)>,
    effects: Vec<(String, Effect)>,
}

impl RecordingRunner {
    /// Runner where every command succeeds and every probe passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `program` exit unsuccessfully.
    pub fn fail_on(mut self, program: &str) -> Self {
        self.failing.push(program.to_string());
        self
    }

    /// Makes `program` unavailable: probes fail and runs report it missing.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    /// Makes [`CommandRunner::locate`] find `program` at `path`.
    pub fn located(mut self, program: &str, path: impl Into<PathBuf>) -> Self {
        self.located.push((program.to_string(), path.into()));
        self
    }

    /// Runs `effect` whenever `program` is run, before its outcome is decided.
    pub fn on_run(mut self, program: &str, effect: impl Fn(&CommandSpec) + 'static) -> Self {
        self.effects.push((program.to_string(), Box::new(effect)));
        self
    }

    /// Commands run so far, in order. Probes are not recorded.
    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.borrow().clone()
    }

    /// Program names run so far, in order.
    pub fn programs(&self) -> Vec<String> {
        self.commands
            .borrow()
            .iter()
            .map(|c| c.program_name().to_string())
            .collect()
    }

    /// Command lines run so far, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.commands.borrow().iter().map(|c| c.to_string()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> Result<()> {
        let name = spec.program_name();
        if self.missing.iter().any(|m| m == name) {
            return Err(BuildError::CommandNotFound {
                program: spec.program.clone(),
            });
        }

        self.commands.borrow_mut().push(spec.clone());
        for (program, effect) in &self.effects {
            if program == name {
                effect(spec);
            }
        }

        if self.failing.iter().any(|f| f == name) {
            return Err(BuildError::CommandFailed {
                command: spec.to_string(),
                status: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }

    fn probe(&self, spec: &CommandSpec) -> bool {
        !self.missing.iter().any(|m| m == spec.program_name())
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.located
            .iter()
            .find(|(p, _)| p == program)
            .map(|(_, path)| path.clone())
    }
}
