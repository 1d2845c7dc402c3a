/// Command-line entry point for the PDFium build orchestrator.
///
/// Without an action flag it opens the interactive build menu.
use clap::{ArgGroup, Parser};
use pdfium_build::{
    console, BuildConfig, BuildError, DepotTools, PdfiumBuilder, ProjectLayout, Prompter,
    Session, SystemRunner,
};
use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pdfium-build")]
#[command(version, about = "Build PDFium and the PdfWinViewer application", long_about = None)]
#[command(group(ArgGroup::new("action").multiple(false)))]
struct Args {
    /// Verbose logging and full error causes
    #[arg(long)]
    debug: bool,

    /// Only clean build artifacts
    #[arg(long, group = "action")]
    clean: bool,

    /// Clone depot_tools and add it to PATH in the shell startup files
    #[arg(long, group = "action")]
    setup_depot_tools: bool,

    /// Update an installed depot_tools
    #[arg(long, group = "action")]
    update_depot_tools: bool,

    /// Remove depot_tools and its PATH entries
    #[arg(long, group = "action")]
    clean_depot_tools: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, env = "PDFIUM_PROJECT_ROOT", value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// depot_tools location (defaults to ~/depot_tools)
    #[arg(long, env = "DEPOT_TOOLS_DIR", value_name = "DIR")]
    depot_tools_dir: Option<PathBuf>,
}

/// What a parsed command line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Interactive,
    Clean,
    SetupDepotTools,
    UpdateDepotTools,
    CleanDepotTools,
}

impl Args {
    fn action(&self) -> Action {
        if self.clean {
            Action::Clean
        } else if self.setup_depot_tools {
            Action::SetupDepotTools
        } else if self.update_depot_tools {
            Action::UpdateDepotTools
        } else if self.clean_depot_tools {
            Action::CleanDepotTools
        } else {
            Action::Interactive
        }
    }
}

/// Run the CLI logic given parsed `Args`.
fn run_with_args(args: &Args) -> Result<(), BuildError> {
    let depot_tools = DepotTools::locate(args.depot_tools_dir.clone())?;
    log::debug!("depot_tools directory: {}", depot_tools.dir().display());

    let runner = if depot_tools.is_installed() {
        SystemRunner::new().with_path_prefix(depot_tools.dir())
    } else {
        SystemRunner::new()
    };

    match args.action() {
        Action::SetupDepotTools => return depot_tools.setup(&runner),
        Action::UpdateDepotTools => return depot_tools.update(&runner),
        Action::CleanDepotTools => return depot_tools.remove(),
        Action::Clean | Action::Interactive => {}
    }

    let layout = ProjectLayout::discover(args.project_root.clone())?;
    let config = BuildConfig::detect()?;
    log::debug!("build configuration: {config:?}");
    let builder = PdfiumBuilder::new(layout, config, runner);

    if args.action() == Action::Clean {
        return builder.clean_build_artifacts();
    }

    let mut session = Session::new(builder, depot_tools, Prompter::stdio());
    session.run()
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .try_init()
        .ok();

    match run_with_args(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(BuildError::Cancelled) => {
            console::info("Operation cancelled by user");
            ExitCode::SUCCESS
        }
        Err(e) => {
            console::error(format!("Build failed: {e}"));
            if args.debug {
                let mut source = e.source();
                while let Some(cause) = source {
                    console::error(format!("  caused by: {cause}"));
                    source = cause.source();
                }
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("pdfium-build").chain(argv.iter().copied()))
    }

    #[test]
    fn test_no_flags_is_interactive() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.action(), Action::Interactive);
        assert!(!args.debug);
    }

    #[test]
    fn test_action_flags() {
        assert_eq!(parse(&["--clean"]).unwrap().action(), Action::Clean);
        assert_eq!(
            parse(&["--setup-depot-tools"]).unwrap().action(),
            Action::SetupDepotTools
        );
        assert_eq!(
            parse(&["--update-depot-tools"]).unwrap().action(),
            Action::UpdateDepotTools
        );
        assert_eq!(
            parse(&["--clean-depot-tools", "--debug"]).unwrap().action(),
            Action::CleanDepotTools
        );
    }

    #[test]
    fn test_action_flags_are_exclusive() {
        assert!(parse(&["--clean", "--setup-depot-tools"]).is_err());
    }

    #[test]
    fn test_directories() {
        let args = parse(&["--project-root", "/src/viewer", "--depot-tools-dir", "/opt/dt"]).unwrap();
        assert_eq!(args.project_root, Some(PathBuf::from("/src/viewer")));
        assert_eq!(args.depot_tools_dir, Some(PathBuf::from("/opt/dt")));
    }

    #[test]
    fn test_run_with_args_clean() {
        let root = tempfile::tempdir().unwrap();
        let depot = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("build/CMakeFiles")).unwrap();

        let root_arg = root.path().to_str().unwrap();
        let depot_arg = depot.path().join("depot_tools");
        let args = parse(&[
            "--clean",
            "--project-root",
            root_arg,
            "--depot-tools-dir",
            depot_arg.to_str().unwrap(),
        ])
        .unwrap();

        run_with_args(&args).expect("clean should succeed");
        assert!(!root.path().join("build").exists());
    }
}
