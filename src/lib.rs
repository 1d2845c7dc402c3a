#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod console;
pub mod depot_tools;
pub mod error;
pub mod menu;
pub mod paths;
pub mod prompt;
pub mod runner;
pub mod session;
pub mod shell_rc;

/// Test helpers (always compiled) shared by unit, integration and binary tests.
pub mod test_support;

pub use builder::PdfiumBuilder;
pub use config::{BuildConfig, BuildType, TargetCpu, TargetOs};
pub use depot_tools::DepotTools;
pub use error::{BuildError, Result};
pub use paths::{BuildStatus, ProjectLayout};
pub use prompt::Prompter;
pub use runner::{CommandRunner, CommandSpec, SystemRunner};
pub use session::Session;
