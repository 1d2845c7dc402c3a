//! Filesystem layout of the project: where PDFium lives, where it builds, and
//! where the viewer application ends up.

use crate::config::{BuildType, TargetOs};
use crate::error::{BuildError, Result};
use std::path::{Path, PathBuf};

/// Name of the downstream viewer application.
pub const APP_NAME: &str = "PdfWinViewer";

/// Paths derived from the project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses `explicit` when given, otherwise the current working directory.
    pub fn discover(explicit: Option<PathBuf>) -> Result<Self> {
        let root = match explicit {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        let root = std::fs::canonicalize(&root)
            .map_err(|e| BuildError::file("resolve project root", &root, e))?;
        Ok(Self::new(root))
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `third_party/`, where gclient checks PDFium out.
    pub fn third_party_dir(&self) -> PathBuf {
        self.root.join("third_party")
    }

    /// `third_party/pdfium/`
    pub fn pdfium_dir(&self) -> PathBuf {
        self.third_party_dir().join("pdfium")
    }

    /// `third_party/pdfium/out/`
    pub fn pdfium_out_dir(&self) -> PathBuf {
        self.pdfium_dir().join("out")
    }

    /// `third_party/pdfium/out/<BuildType>/`, holding `args.gn` and the ninja files.
    pub fn pdfium_build_dir(&self, build_type: BuildType) -> PathBuf {
        self.pdfium_out_dir().join(build_type.as_str())
    }

    /// Location of the static library produced by `ninja pdfium`.
    pub fn pdfium_library(&self, build_type: BuildType, os: TargetOs) -> PathBuf {
        self.pdfium_build_dir(build_type)
            .join("obj")
            .join(os.static_library_name())
    }

    /// `gn` shipped in PDFium's buildtools, if it was downloaded.
    pub fn bundled_gn(&self, os: TargetOs) -> PathBuf {
        self.pdfium_dir()
            .join("buildtools")
            .join(os.as_str())
            .join(format!("gn{}", os.exe_suffix()))
    }

    /// CMake build directory of the viewer application.
    pub fn app_build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    /// Places the viewer executable may be written to, depending on the generator.
    pub fn app_executables(&self, os: TargetOs) -> Vec<PathBuf> {
        let build = self.app_build_dir();
        match os {
            TargetOs::Mac => vec![build
                .join(format!("{APP_NAME}.app"))
                .join("Contents")
                .join("MacOS")
                .join(APP_NAME)],
            TargetOs::Linux => vec![build.join(APP_NAME)],
            TargetOs::Win => [BuildType::Debug, BuildType::Release]
                .iter()
                .map(|bt| build.join(bt.as_str()).join(format!("{APP_NAME}.exe")))
                .collect(),
        }
    }

    /// Snapshot of which artifacts currently exist.
    pub fn status(&self, os: TargetOs) -> BuildStatus {
        BuildStatus {
            debug_library: library_size(&self.pdfium_library(BuildType::Debug, os)),
            release_library: library_size(&self.pdfium_library(BuildType::Release, os)),
            app_built: self.app_executables(os).iter().any(|p| p.is_file()),
        }
    }
}

fn library_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.len())
}

/// Existing build artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildStatus {
    /// Size in bytes of the Debug library, if built.
    pub debug_library: Option<u64>,
    /// Size in bytes of the Release library, if built.
    pub release_library: Option<u64>,
    /// Whether a viewer executable exists.
    pub app_built: bool,
}

impl BuildStatus {
    /// True when nothing has been built yet.
    pub fn is_empty(&self) -> bool {
        self.debug_library.is_none() && self.release_library.is_none() && !self.app_built
    }
}

/// Whole megabytes, rounded down.
pub fn size_in_mb(bytes: u64) -> u64 {
    bytes / (1024 * 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_paths() {
        let layout = ProjectLayout::new("/work/viewer");
        assert_eq!(
            layout.pdfium_library(BuildType::Release, TargetOs::Linux),
            PathBuf::from("/work/viewer/third_party/pdfium/out/Release/obj/libpdfium.a")
        );
        assert_eq!(
            layout.pdfium_library(BuildType::Debug, TargetOs::Win),
            PathBuf::from("/work/viewer/third_party/pdfium/out/Debug/obj/pdfium.lib")
        );
    }

    #[test]
    fn test_bundled_gn_path() {
        let layout = ProjectLayout::new("/p");
        assert_eq!(
            layout.bundled_gn(TargetOs::Mac),
            PathBuf::from("/p/third_party/pdfium/buildtools/mac/gn")
        );
        assert_eq!(
            layout.bundled_gn(TargetOs::Win),
            PathBuf::from("/p/third_party/pdfium/buildtools/win/gn.exe")
        );
    }

    #[test]
    fn test_app_executables() {
        let layout = ProjectLayout::new("/p");
        assert_eq!(
            layout.app_executables(TargetOs::Mac),
            vec![PathBuf::from(
                "/p/build/PdfWinViewer.app/Contents/MacOS/PdfWinViewer"
            )]
        );
        assert_eq!(
            layout.app_executables(TargetOs::Linux),
            vec![PathBuf::from("/p/build/PdfWinViewer")]
        );
        assert_eq!(layout.app_executables(TargetOs::Win).len(), 2);
    }

    #[test]
    fn test_status_empty_then_built() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        assert!(layout.status(TargetOs::Linux).is_empty());

        let lib = layout.pdfium_library(BuildType::Debug, TargetOs::Linux);
        std::fs::create_dir_all(lib.parent().unwrap()).unwrap();
        std::fs::write(&lib, vec![0u8; 2048]).unwrap();
        std::fs::create_dir_all(layout.app_build_dir()).unwrap();
        std::fs::write(layout.app_build_dir().join(APP_NAME), b"elf").unwrap();

        let status = layout.status(TargetOs::Linux);
        assert_eq!(status.debug_library, Some(2048));
        assert_eq!(status.release_library, None);
        assert!(status.app_built);
        assert!(!status.is_empty());
    }

    #[test]
    fn test_size_in_mb() {
        assert_eq!(size_in_mb(0), 0);
        assert_eq!(size_in_mb(5 * 1024 * 1024 + 17), 5);
    }

    #[test]
    fn test_discover_explicit_root() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::discover(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(layout.root(), std::fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn test_discover_missing_root() {
        let r = ProjectLayout::discover(Some(PathBuf::from("/definitely/not/here/pdfium")));
        assert!(matches!(r, Err(BuildError::File { .. })));
    }
}
