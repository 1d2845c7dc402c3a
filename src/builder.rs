//! The build steps: dependency checks, cleaning, PDFium, and the viewer app.

use crate::config::{BuildConfig, BuildType};
use crate::console;
use crate::error::{BuildError, Result};
use crate::paths::{size_in_mb, ProjectLayout};
use crate::runner::{CommandRunner, CommandSpec};
use std::path::{Path, PathBuf};

/// PDFium's git repository, handed to `gclient config`.
pub const PDFIUM_URL: &str = "https://pdfium.googlesource.com/pdfium.git";

const CMAKE_ARTIFACT_FILES: &[&str] = &["CMakeCache.txt", "cmake_install.cmake"];
const CMAKE_ARTIFACT_DIR: &str = "CMakeFiles";

/// Runs the build steps for one project with one configuration.
pub struct PdfiumBuilder<R> {
    layout: ProjectLayout,
    config: BuildConfig,
    runner: R,
}

impl<R: CommandRunner> PdfiumBuilder<R> {
    /// Builder for `layout` using `config`, executing through `runner`.
    pub fn new(layout: ProjectLayout, config: BuildConfig, runner: R) -> Self {
        Self {
            layout,
            config,
            runner,
        }
    }

    /// Project layout.
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Current configuration.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Mutable configuration, for the interactive setup.
    pub fn config_mut(&mut self) -> &mut BuildConfig {
        &mut self.config
    }

    /// Command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Static library for the configured build type.
    pub fn library_path(&self) -> PathBuf {
        self.layout
            .pdfium_library(self.config.build_type, self.config.target_os)
    }

    /// Makes sure depot_tools and CMake are reachable.
    pub fn check_dependencies(&self) -> Result<()> {
        console::info("Checking build dependencies...");

        if !self.runner.probe(&CommandSpec::new("fetch").arg("--help")) {
            let hint = format!(
                "git clone {} && export PATH=$PATH:/path/to/depot_tools (or run with --setup-depot-tools)",
                crate::depot_tools::DEPOT_TOOLS_URL
            );
            console::error("depot_tools is not installed or not on PATH");
            console::info(format!("Install it with: {hint}"));
            return Err(BuildError::MissingDependency {
                tool: "depot_tools".to_string(),
                hint,
            });
        }
        console::success("depot_tools is installed");

        if !self.runner.probe(&CommandSpec::new("cmake").arg("--version")) {
            console::error("CMake is not installed");
            return Err(BuildError::MissingDependency {
                tool: "cmake".to_string(),
                hint: "install CMake from https://cmake.org/download/ or your package manager"
                    .to_string(),
            });
        }
        console::success("CMake is installed");
        Ok(())
    }

    /// Deletes `build/`, PDFium's `out/` and stray CMake caches.
    pub fn clean_build_artifacts(&self) -> Result<()> {
        console::info("Cleaning all build artifacts...");

        let build_dir = self.layout.app_build_dir();
        if build_dir.exists() {
            console::info("  Removing build/ ...");
            remove_dir(&build_dir)?;
        }

        let out_dir = self.layout.pdfium_out_dir();
        if out_dir.exists() {
            console::info("  Removing PDFium out/ ...");
            remove_dir(&out_dir)?;
        }

        console::info("  Removing CMake cache files...");
        let mut walker = walkdir::WalkDir::new(self.layout.root()).into_iter();
        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("skipping unreadable entry: {e}");
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy();
            let path = entry.path();
            if entry.file_type().is_dir() && name == CMAKE_ARTIFACT_DIR {
                log::debug!("removing {}", path.display());
                if let Err(e) = std::fs::remove_dir_all(path) {
                    log::warn!("could not remove {}: {e}", path.display());
                }
                walker.skip_current_dir();
            } else if entry.file_type().is_file() && CMAKE_ARTIFACT_FILES.contains(&&*name) {
                log::debug!("removing {}", path.display());
                std::fs::remove_file(path).map_err(|e| BuildError::file("remove", path, e))?;
            }
        }

        console::success("Clean complete!");
        Ok(())
    }

    /// Writes `args.gn` into `build_dir` and returns its path.
    pub fn write_args_gn(&self, build_dir: &Path) -> Result<PathBuf> {
        let path = build_dir.join("args.gn");
        std::fs::write(&path, self.config.render_args_gn())
            .map_err(|e| BuildError::file("write", &path, e))?;
        console::success(format!("Build configuration written ({})", path.display()));
        Ok(path)
    }

    /// `gn` from PDFium's buildtools when present, otherwise the depot_tools wrapper.
    pub fn gn_program(&self) -> String {
        let bundled = self.layout.bundled_gn(self.config.target_os);
        if bundled.is_file() {
            bundled.display().to_string()
        } else {
            log::debug!("{} not found, using gn from PATH", bundled.display());
            "gn".to_string()
        }
    }

    /// Fetches, configures and compiles PDFium. Returns the library path.
    pub fn build_pdfium(&self) -> Result<PathBuf> {
        console::info("Building PDFium...");
        self.check_dependencies()?;

        let third_party = self.layout.third_party_dir();
        create_dir(&third_party)?;

        if self.layout.pdfium_dir().exists() {
            console::info("PDFium checkout already exists, skipping download");
        } else {
            console::info("Downloading PDFium sources...");
            self.runner.run(
                &CommandSpec::new("gclient")
                    .args(["config", "--unmanaged", PDFIUM_URL])
                    .current_dir(&third_party),
            )?;
        }

        console::info("Syncing PDFium dependencies...");
        self.runner.run(
            &CommandSpec::new("gclient")
                .args(["sync", "-v", "--nohooks"])
                .current_dir(&third_party),
        )?;

        console::info("Configuring PDFium build arguments...");
        let build_dir = self.layout.pdfium_build_dir(self.config.build_type);
        create_dir(&build_dir)?;
        self.write_args_gn(&build_dir)?;

        console::info("Generating build files...");
        let pdfium_dir = self.layout.pdfium_dir();
        self.runner.run(
            &CommandSpec::new(self.gn_program())
                .arg("gen")
                .arg(build_dir.display().to_string())
                .current_dir(&pdfium_dir),
        )?;

        let features = self.config.feature_description();
        console::info(format!(
            "Building PDFium {} static library{} (this usually takes 10-30 minutes)...",
            self.config.build_type, features
        ));
        self.runner.run(
            &CommandSpec::new("ninja")
                .arg("-C")
                .arg(build_dir.display().to_string())
                .arg("pdfium")
                .current_dir(&pdfium_dir),
        )?;

        let library = self.library_path();
        let size = std::fs::metadata(&library)
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.len());
        let Some(size) = size else {
            console::error("PDFium static library build failed!");
            return Err(BuildError::LibraryMissing(library));
        };

        console::success("PDFium static library built successfully!");
        console::info(format!("   File: {}", library.display()));
        console::info(format!("   Size: {}MB", size_in_mb(size)));
        console::info(format!("   Type: {}{}", self.config.build_type, features));
        Ok(library)
    }

    /// Configures and compiles the viewer against the configured library.
    pub fn build_main_project(&self) -> Result<()> {
        console::info("Building the main project...");

        let library = self.library_path();
        if !library.is_file() {
            console::error(format!(
                "PDFium static library not found: {}",
                library.display()
            ));
            console::error("Build PDFium first");
            return Err(BuildError::LibraryMissing(library));
        }

        console::info("Configuring the main project...");
        let build_dir = self.layout.app_build_dir();
        create_dir(&build_dir)?;

        console::info(format!("Using PDFium library: {}", library.display()));
        let build_type = self.config.build_type.as_str();
        self.runner.run(
            &CommandSpec::new("cmake")
                .arg("..")
                .arg(format!("-DCMAKE_BUILD_TYPE={build_type}"))
                .arg(format!("-DPDFIUM_STATIC={}", library.display()))
                .current_dir(&build_dir),
        )?;

        console::info("Compiling the main project...");
        self.runner.run(
            &CommandSpec::new("cmake")
                .args(["--build", ".", "--config", build_type])
                .current_dir(&build_dir),
        )?;

        console::success("Main project build complete!");
        Ok(())
    }

    /// Build type of an existing library, Debug first.
    pub fn detect_existing_build_type(&self) -> Option<BuildType> {
        let os = self.config.target_os;
        [BuildType::Debug, BuildType::Release]
            .into_iter()
            .find(|bt| self.layout.pdfium_library(*bt, os).is_file())
    }
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| BuildError::file("create", path, e))
}

fn remove_dir(path: &Path) -> Result<()> {
    std::fs::remove_dir_all(path).map_err(|e| BuildError::file("remove", path, e))
}
