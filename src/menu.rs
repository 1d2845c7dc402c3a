//! Menu entries and the static help text shown in the interactive session.

use crate::console::{self, Level};
use crate::paths::{size_in_mb, BuildStatus};

/// Entries of the main menu, numbered 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Pick a configuration, clean, build PDFium and the app.
    ConfigureAndBuild,
    /// Build PDFium and the app with the default configuration.
    QuickBuild,
    /// Remove build artifacts.
    Clean,
    /// Pick a configuration and build PDFium only.
    PdfiumOnly,
    /// Build the app against an existing library.
    MainProjectOnly,
    /// Install, update or remove depot_tools.
    DepotTools,
    /// Print the configuration guide.
    Guide,
    /// Leave.
    Exit,
}

impl MenuChoice {
    /// All entries in menu order.
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::ConfigureAndBuild,
        MenuChoice::QuickBuild,
        MenuChoice::Clean,
        MenuChoice::PdfiumOnly,
        MenuChoice::MainProjectOnly,
        MenuChoice::DepotTools,
        MenuChoice::Guide,
        MenuChoice::Exit,
    ];

    /// Entry for a 1-based menu number.
    pub fn from_number(n: u32) -> Option<Self> {
        let index = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Title line.
    pub fn title(&self) -> &'static str {
        match self {
            MenuChoice::ConfigureAndBuild => "Configure and full build (recommended)",
            MenuChoice::QuickBuild => "Quick build with the default configuration",
            MenuChoice::Clean => "Clean build artifacts only",
            MenuChoice::PdfiumOnly => "Build the PDFium static library only",
            MenuChoice::MainProjectOnly => "Build the main project only",
            MenuChoice::DepotTools => "Manage depot_tools",
            MenuChoice::Guide => "Show the build configuration guide",
            MenuChoice::Exit => "Exit",
        }
    }

    fn details(&self) -> &'static [&'static str] {
        match self {
            MenuChoice::ConfigureAndBuild => &[
                "🔧 Choose: Debug/Release + V8/XFA features",
                "📦 Full flow: clean → configure → build PDFium → build main project",
            ],
            MenuChoice::QuickBuild => &[
                "⚡ Defaults: Debug + V8 + XFA (all features)",
                "🚀 Good for: quick testing and development",
            ],
            MenuChoice::Clean => &[
                "🧹 Removes: build/ and third_party/pdfium/out/",
                "💡 Use it to: fix build problems or start over",
            ],
            MenuChoice::PdfiumOnly => &[
                "🔧 Configurable: Debug/Release + V8/XFA options",
                "📚 Output: the PDFium static library",
            ],
            MenuChoice::MainProjectOnly => &[
                "🏗️  Requires: an existing PDFium static library",
                "📱 Output: the PdfWinViewer application",
            ],
            MenuChoice::DepotTools => &["🧰 Install, update or remove depot_tools and its PATH entry"],
            MenuChoice::Guide => &["📖 Explains build types and optional features"],
            MenuChoice::Exit => &[],
        }
    }
}

/// Renders the main menu followed by the current build status.
pub fn render_main_menu(status: &BuildStatus) -> String {
    let mut lines = vec![
        String::new(),
        "📋 Build options".to_string(),
        console::rule(),
    ];
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        lines.push(format!("{}) {}", i + 1, choice.title()));
        for detail in choice.details() {
            lines.push(format!("   {detail}"));
        }
        lines.push(String::new());
    }

    lines.extend(render_status(status));
    lines.join("\n")
}

fn render_status(status: &BuildStatus) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(size) = status.debug_library {
        lines.push(console::format(
            Level::Success,
            &format!("Debug PDFium static library exists ({}MB)", size_in_mb(size)),
        ));
    }
    if let Some(size) = status.release_library {
        lines.push(console::format(
            Level::Success,
            &format!("Release PDFium static library exists ({}MB)", size_in_mb(size)),
        ));
    }
    if status.app_built {
        lines.push(console::format(
            Level::Success,
            "Main project executable exists",
        ));
    }
    if status.is_empty() {
        lines.push(console::format(Level::Warning, "No build artifacts found"));
    }
    lines
}

/// Actions of the depot_tools submenu, numbered 1 to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepotToolsChoice {
    /// Clone and add to PATH.
    Install,
    /// Pull the latest version.
    Update,
    /// Remove from PATH and delete.
    Remove,
    /// Back to the main menu.
    Back,
}

impl DepotToolsChoice {
    /// Entry for a 1-based menu number.
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(DepotToolsChoice::Install),
            2 => Some(DepotToolsChoice::Update),
            3 => Some(DepotToolsChoice::Remove),
            4 => Some(DepotToolsChoice::Back),
            _ => None,
        }
    }
}

/// Renders the depot_tools submenu.
pub fn render_depot_tools_menu(dir: &std::path::Path, installed: bool) -> String {
    let state = if installed { "installed" } else { "not installed" };
    [
        String::new(),
        "🧰 depot_tools".to_string(),
        console::rule(),
        format!("Location: {} ({state})", dir.display()),
        String::new(),
        "1) Install and add to PATH".to_string(),
        "2) Update".to_string(),
        "3) Remove and clean PATH entries".to_string(),
        "4) Back".to_string(),
        String::new(),
    ]
    .join("\n")
}

/// What each build option means and roughly what it costs.
pub fn feature_guide() -> String {
    [
        "📖 Build configuration guide".to_string(),
        console::rule(),
        String::new(),
        "🏗️  Build type:".to_string(),
        "   • Debug   - debug information, easier to debug (~150-200MB)".to_string(),
        "   • Release - optimized, smaller and faster (~50-120MB)".to_string(),
        String::new(),
        "⚡ JavaScript support (V8):".to_string(),
        "   • Enabled  - runs JavaScript embedded in PDF files".to_string(),
        "   • Disabled - no JavaScript, library ~30-50% smaller".to_string(),
        String::new(),
        "📝 XFA form support:".to_string(),
        "   • Enabled  - supports Adobe XFA (XML Forms Architecture) forms".to_string(),
        "   • Disabled - standard PDF forms only, library ~20-30% smaller".to_string(),
        String::new(),
        "💡 Recommended:".to_string(),
        "   • Development: Debug + V8 + XFA (all features)".to_string(),
        "   • Production:  Release + V8/XFA as needed".to_string(),
        "   • Smallest:    Release without V8 and XFA".to_string(),
        String::new(),
    ]
    .join("\n")
}
