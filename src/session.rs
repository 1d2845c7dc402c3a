//! The interactive session: menu, configuration questions and dispatch.
//!
//! Everything the session itself says goes through the [`Prompter`]; build
//! steps report their own progress on the console.

use crate::builder::PdfiumBuilder;
use crate::config::BuildType;
use crate::console::{self, Level};
use crate::depot_tools::DepotTools;
use crate::error::{BuildError, Result};
use crate::menu::{self, DepotToolsChoice, MenuChoice};
use crate::prompt::Prompter;
use crate::runner::CommandRunner;
use std::io::{BufRead, Write};

/// One run of the interactive build menu.
pub struct Session<R, I, W> {
    builder: PdfiumBuilder<R>,
    depot_tools: DepotTools,
    prompter: Prompter<I, W>,
}

impl<R: CommandRunner, I: BufRead, W: Write> Session<R, I, W> {
    /// Session driving `builder` and `depot_tools`, talking through `prompter`.
    pub fn new(builder: PdfiumBuilder<R>, depot_tools: DepotTools, prompter: Prompter<I, W>) -> Self {
        Self {
            builder,
            depot_tools,
            prompter,
        }
    }

    /// The builder, with whatever configuration the session settled on.
    pub fn builder(&self) -> &PdfiumBuilder<R> {
        &self.builder
    }

    /// The prompter.
    pub fn prompter(&self) -> &Prompter<I, W> {
        &self.prompter
    }

    /// Shows the header and menu, then carries out the chosen action.
    ///
    /// The guide and the depot_tools submenu come back to the menu; every
    /// other choice ends the session.
    pub fn run(&mut self) -> Result<()> {
        self.show_header()?;

        loop {
            let config = self.builder.config();
            let status = self.builder.layout().status(config.target_os);
            self.prompter.say(menu::render_main_menu(&status))?;

            let n = self.prompter.choose("Select an option", 1..=8, None)?;
            let choice = MenuChoice::from_number(n).unwrap_or(MenuChoice::Exit);
            self.dispatch(choice)?;

            if !matches!(choice, MenuChoice::DepotTools | MenuChoice::Guide) {
                return Ok(());
            }
        }
    }

    /// Carries out one menu action.
    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        log::debug!("menu choice: {choice:?}");
        match choice {
            MenuChoice::ConfigureAndBuild => {
                self.prompter
                    .status(Level::Info, "Selected: configure and full build")?;
                self.configure()?;
                self.builder.clean_build_artifacts()?;
                self.builder.build_pdfium()?;
                self.builder.build_main_project()?;
            }
            MenuChoice::QuickBuild => {
                self.prompter.status(
                    Level::Info,
                    "Selected: quick build with the default configuration",
                )?;
                self.prompter
                    .status(Level::Info, "Using defaults: Debug + V8 + XFA")?;
                self.builder.config_mut().reset_features();
                self.builder.build_pdfium()?;
                self.builder.build_main_project()?;
            }
            MenuChoice::Clean => {
                self.prompter
                    .status(Level::Info, "Selected: clean build artifacts only")?;
                return self.builder.clean_build_artifacts();
            }
            MenuChoice::PdfiumOnly => {
                self.prompter.status(
                    Level::Info,
                    "Selected: build the PDFium static library only",
                )?;
                self.configure()?;
                self.builder.build_pdfium()?;
            }
            MenuChoice::MainProjectOnly => {
                self.prompter
                    .status(Level::Info, "Selected: build the main project only")?;
                let Some(build_type) = self.builder.detect_existing_build_type() else {
                    self.prompter.status(
                        Level::Error,
                        "No PDFium static library found, build PDFium first",
                    )?;
                    return Err(BuildError::NoExistingLibrary);
                };
                self.prompter.status(
                    Level::Info,
                    format!("Found a {build_type} PDFium library, using {build_type} mode"),
                )?;
                self.builder.config_mut().build_type = build_type;
                self.builder.build_main_project()?;
            }
            MenuChoice::DepotTools => return self.manage_depot_tools(),
            MenuChoice::Guide => return self.prompter.say(menu::feature_guide()),
            MenuChoice::Exit => {
                return self.prompter.status(Level::Info, "Exiting the build script");
            }
        }

        self.show_completion()
    }

    fn show_header(&mut self) -> Result<()> {
        let layout = self.builder.layout();
        let root = layout.root().display().to_string();
        let third_party = layout.third_party_dir().display().to_string();
        let config = self.builder.config();
        let platform = format!("{} ({})", config.target_os, config.target_cpu);

        self.prompter.say("")?;
        self.prompter.say("🚀 PDFium build orchestrator")?;
        self.prompter.say(format!("Project root: {root}"))?;
        self.prompter.say(format!("Third-party directory: {third_party}"))?;
        self.prompter
            .status(Level::Info, format!("Detected platform: {platform}"))
    }

    /// Asks for build type and features until the operator confirms them.
    fn configure(&mut self) -> Result<()> {
        self.prompter.say(menu::feature_guide())?;
        loop {
            self.choose_build_type()?;
            self.choose_features()?;
            if self.confirm_summary()? {
                return self
                    .prompter
                    .status(Level::Success, "Configuration confirmed, starting build...");
            }
            self.prompter.status(Level::Info, "Reconfiguring...")?;
        }
    }

    fn choose_build_type(&mut self) -> Result<()> {
        self.prompter.say("")?;
        self.prompter.status(Level::Config, "Choose the build type:")?;
        self.prompter
            .say("1) Debug   - debug information, slower but easier to debug")?;
        self.prompter.say("2) Release - optimized, smaller and faster")?;
        self.prompter.say("")?;

        let build_type = match self.prompter.choose("Select the build type", 1..=2, Some(1))? {
            2 => BuildType::Release,
            _ => BuildType::Debug,
        };
        self.builder.config_mut().build_type = build_type;
        self.prompter
            .status(Level::Success, format!("Build type: {build_type}"))
    }

    fn choose_features(&mut self) -> Result<()> {
        self.prompter.say("")?;
        self.prompter
            .status(Level::Config, "Choose the PDFium features:")?;
        self.prompter.say("")?;

        self.prompter.say("🔧 JavaScript support (V8):")?;
        self.prompter
            .say("  Enabled:  runs JavaScript embedded in PDF files")?;
        self.prompter
            .say("  Disabled: no JavaScript, smaller library")?;
        let v8 = self
            .prompter
            .confirm("Enable V8 JavaScript support?", true)?;
        self.builder.config_mut().enable_v8 = v8;
        self.prompter.status(
            Level::Success,
            if v8 {
                "V8 JavaScript support enabled"
            } else {
                "V8 JavaScript support disabled"
            },
        )?;

        self.prompter.say("")?;
        self.prompter.say("📝 XFA form support:")?;
        self.prompter
            .say("  Enabled:  supports Adobe XFA (XML Forms Architecture) forms")?;
        self.prompter
            .say("  Disabled: standard PDF forms only, smaller library")?;
        let xfa = self.prompter.confirm("Enable XFA form support?", true)?;
        self.builder.config_mut().enable_xfa = xfa;
        self.prompter.status(
            Level::Success,
            if xfa {
                "XFA form support enabled"
            } else {
                "XFA form support disabled"
            },
        )
    }

    fn confirm_summary(&mut self) -> Result<bool> {
        let config = self.builder.config().clone();

        self.prompter.say("")?;
        self.prompter
            .status(Level::Config, "Build configuration summary:")?;
        self.prompter.say(console::rule())?;
        self.prompter
            .say(format!("🏗️  Build type: {}", config.build_type))?;
        self.prompter.say(format!(
            "🖥️  Target platform: {} ({})",
            config.target_os, config.target_cpu
        ))?;
        self.prompter
            .say(format!("⚡ JavaScript (V8): {}", on_off(config.enable_v8)))?;
        self.prompter
            .say(format!("📝 XFA forms: {}", on_off(config.enable_xfa)))?;
        self.prompter.say("")?;
        self.prompter.status(
            Level::Info,
            format!("Estimated library size: {}", config.estimated_size()),
        )?;
        self.prompter.say("")?;

        self.prompter.confirm("Use this configuration?", true)
    }

    fn manage_depot_tools(&mut self) -> Result<()> {
        let dir = self.depot_tools.dir().to_path_buf();
        self.prompter.say(menu::render_depot_tools_menu(
            &dir,
            self.depot_tools.is_installed(),
        ))?;

        let n = self.prompter.choose("Select an action", 1..=4, None)?;
        match DepotToolsChoice::from_number(n) {
            Some(DepotToolsChoice::Install) => self.depot_tools.setup(self.builder.runner()),
            Some(DepotToolsChoice::Update) => self.depot_tools.update(self.builder.runner()),
            Some(DepotToolsChoice::Remove) => {
                let question = format!("Delete {} and its PATH entries?", dir.display());
                if self.prompter.confirm(&question, false)? {
                    self.depot_tools.remove()
                } else {
                    self.prompter.status(Level::Info, "Keeping depot_tools")
                }
            }
            Some(DepotToolsChoice::Back) | None => Ok(()),
        }
    }

    fn show_completion(&mut self) -> Result<()> {
        let layout = self.builder.layout();
        let config = self.builder.config().clone();
        let library = self.builder.library_path();
        let app_dir = layout.app_build_dir();

        self.prompter.say("")?;
        self.prompter.status(Level::Success, "🎉 Build complete!")?;
        self.prompter.status(
            Level::Info,
            format!("📍 PDFium static library: {}", library.display()),
        )?;
        self.prompter.status(
            Level::Info,
            format!("📍 Main project output: {}/", app_dir.display()),
        )?;
        self.prompter.say("")?;
        self.prompter.status(Level::Info, "💡 Configuration:")?;
        self.prompter
            .say(format!("   Build type: {}", config.build_type))?;
        self.prompter
            .say(format!("   V8 support: {}", on_off(config.enable_v8)))?;
        self.prompter
            .say(format!("   XFA support: {}", on_off(config.enable_xfa)))
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
