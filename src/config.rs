//! Build configuration: build type, PDFium feature switches and target platform.

use crate::error::{BuildError, Result};
use std::fmt;
use std::fmt::Write as _;

/// Kind of PDFium build. Also names the output directory (`out/Debug`, `out/Release`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildType {
    /// Unoptimized, with full symbols.
    #[default]
    Debug,
    /// Optimized build.
    Release,
}

impl BuildType {
    /// Name used for directories, `CMAKE_BUILD_TYPE` and `--config`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }

    /// Whether this is a debug build.
    pub fn is_debug(&self) -> bool {
        matches!(self, BuildType::Debug)
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating system PDFium is built for, spelled the way `gn` expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOs {
    /// macOS
    Mac,
    /// Linux
    Linux,
    /// Windows
    Win,
}

impl TargetOs {
    /// Maps a Rust OS name (`std::env::consts::OS`) to a target.
    pub fn from_os_name(os: &str) -> Option<Self> {
        match os.to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Some(TargetOs::Mac),
            "linux" => Some(TargetOs::Linux),
            "windows" | "cygwin" => Some(TargetOs::Win),
            _ => None,
        }
    }

    /// Detects the host operating system.
    pub fn detect() -> Result<Self> {
        let os = std::env::consts::OS;
        Self::from_os_name(os).ok_or_else(|| BuildError::UnsupportedOs(os.to_string()))
    }

    /// `gn` spelling (`mac`, `linux`, `win`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Mac => "mac",
            TargetOs::Linux => "linux",
            TargetOs::Win => "win",
        }
    }

    /// File name of the PDFium static library on this platform.
    pub fn static_library_name(&self) -> &'static str {
        match self {
            TargetOs::Win => "pdfium.lib",
            _ => "libpdfium.a",
        }
    }

    /// Suffix appended to executables.
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            TargetOs::Win => ".exe",
            _ => "",
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture PDFium is built for, spelled the way `gn` expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCpu {
    /// x86_64
    X64,
    /// aarch64
    Arm64,
}

impl TargetCpu {
    /// Maps an architecture name (`std::env::consts::ARCH` or `uname -m`) to a target.
    pub fn from_arch(arch: &str) -> Option<Self> {
        match arch.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" => Some(TargetCpu::X64),
            "aarch64" | "arm64" => Some(TargetCpu::Arm64),
            _ => None,
        }
    }

    /// Detects the host architecture, falling back to x64 for anything unknown.
    pub fn detect() -> Self {
        let arch = std::env::consts::ARCH;
        Self::from_arch(arch).unwrap_or_else(|| {
            log::warn!("unknown architecture {arch}, defaulting to x64");
            TargetCpu::X64
        })
    }

    /// `gn` spelling (`x64`, `arm64`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetCpu::X64 => "x64",
            TargetCpu::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for TargetCpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to configure a PDFium build.
///
/// The defaults match the quick-build path: Debug with V8 and XFA enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Debug or Release.
    pub build_type: BuildType,

    /// JavaScript support through V8.
    pub enable_v8: bool,

    /// Adobe XFA (XML Forms Architecture) form support.
    pub enable_xfa: bool,

    /// Target operating system.
    pub target_os: TargetOs,

    /// Target CPU.
    pub target_cpu: TargetCpu,
}

impl BuildConfig {
    /// Default feature set for the given platform.
    pub fn new(target_os: TargetOs, target_cpu: TargetCpu) -> Self {
        Self {
            build_type: BuildType::Debug,
            enable_v8: true,
            enable_xfa: true,
            target_os,
            target_cpu,
        }
    }

    /// Default feature set for the host platform.
    pub fn detect() -> Result<Self> {
        Ok(Self::new(TargetOs::detect()?, TargetCpu::detect()))
    }

    /// Resets build type and features to their defaults, keeping the platform.
    pub fn reset_features(&mut self) {
        *self = Self::new(self.target_os, self.target_cpu);
    }

    /// Rough size of the resulting static library.
    pub fn estimated_size(&self) -> &'static str {
        let features = usize::from(self.enable_v8) + usize::from(self.enable_xfa);
        match (self.build_type, features) {
            (BuildType::Debug, 2) => "~150-200MB",
            (BuildType::Debug, 1) => "~100-150MB",
            (BuildType::Debug, _) => "~50-100MB",
            (BuildType::Release, 2) => "~80-120MB",
            (BuildType::Release, 1) => "~50-80MB",
            (BuildType::Release, _) => "~20-50MB",
        }
    }

    /// Short suffix naming the enabled features, e.g. `" (V8 + XFA)"`.
    pub fn feature_description(&self) -> &'static str {
        match (self.enable_v8, self.enable_xfa) {
            (true, true) => " (V8 + XFA)",
            (true, false) => " (V8)",
            (false, true) => " (XFA)",
            (false, false) => " (minimal)",
        }
    }

    /// Renders the `args.gn` file handed to `gn gen`.
    ///
    /// The library is always a standalone, fully bundled static archive linked
    /// against the system libc++ so it can be embedded without symbol clashes.
    pub fn render_args_gn(&self) -> String {
        let is_debug = self.build_type.is_debug();
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "\
# PDFium static library build configuration (system libc++)
# Build type: {build_type}
# V8 support: {v8}
# XFA support: {xfa}

# Basic build settings
is_debug = {is_debug}
symbol_level = 2
is_official_build = false

# Optimization settings
strip_debug_info = false
use_debug_fission = false
enable_full_stack_frames_for_profiling = true
use_thin_lto = false
optimize_for_size = false

# Static library settings
is_component_build = false
pdf_is_standalone = true
pdf_is_complete_lib = true
use_static_libs = true

# Use the system libc++ to avoid symbol conflicts
use_custom_libcxx = false

# Features
pdf_use_skia = false
pdf_enable_xfa = {xfa}
pdf_enable_v8 = {v8}
pdf_use_partition_alloc = false

# Platform
target_os = \"{os}\"
target_cpu = \"{cpu}\"

# Bundle third-party libraries into the archive
pdf_bundle_freetype = true
pdf_bundle_libpng = true
pdf_bundle_zlib = true
pdf_bundle_libopenjpeg2 = true

# Compiler settings
treat_warnings_as_errors = false

# Stay on the default C++20 standard
use_cxx17 = false
use_cxx23 = false

# Silenced warnings
extra_cflags = [
  \"-Wno-ignored-attributes\",
]
",
            build_type = self.build_type,
            v8 = self.enable_v8,
            xfa = self.enable_xfa,
            os = self.target_os,
            cpu = self.target_cpu,
        );

        out
    }
}
