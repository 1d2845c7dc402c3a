//! Editing shell startup files to add or remove the depot_tools `PATH` entry.
//!
//! The entry is written as a marked block so it can be found and removed
//! again. Existing files are backed up before they are modified.

use crate::error::{BuildError, Result};
use std::path::{Path, PathBuf};

/// First line of the managed block.
pub const BLOCK_BEGIN: &str = "# >>> depot_tools (pdfium-build) >>>";
/// Last line of the managed block.
pub const BLOCK_END: &str = "# <<< depot_tools (pdfium-build) <<<";

const STARTUP_FILES: &[&str] = &[".bashrc", ".bash_profile", ".zshrc", ".profile"];

/// Startup files that should carry the entry.
///
/// Every existing file among `.bashrc`, `.bash_profile`, `.zshrc` and
/// `.profile`; when none exists, the one matching the login shell.
pub fn startup_files(home: &Path, shell: Option<&str>) -> Vec<PathBuf> {
    if cfg!(windows) {
        return Vec::new();
    }

    let existing: Vec<PathBuf> = STARTUP_FILES
        .iter()
        .map(|name| home.join(name))
        .filter(|p| p.is_file())
        .collect();
    if !existing.is_empty() {
        return existing;
    }

    let shell_name = shell
        .map(Path::new)
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let file = match shell_name {
        "zsh" => ".zshrc",
        "bash" => ".bashrc",
        _ => ".profile",
    };
    vec![home.join(file)]
}

/// The `export` line that appends `dir` to `PATH`.
pub fn export_line(dir: &Path) -> String {
    format!("export PATH=\"$PATH:{}\"", dir.display())
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Directories named by an `export PATH=...` line, quotes stripped.
fn exported_dirs(line: &str) -> Option<Vec<&str>> {
    let value = line.trim().strip_prefix("export PATH=")?;
    let value = value.trim_end_matches(';').trim_matches(is_quote);
    Some(
        value
            .split(':')
            .map(|part| part.trim_matches(is_quote))
            .collect(),
    )
}

fn is_path_export_for(line: &str, dir: &str) -> bool {
    let dir = dir.trim_end_matches('/');
    exported_dirs(line).is_some_and(|dirs| {
        dirs.iter()
            .any(|d| !d.is_empty() && d.trim_end_matches('/') == dir)
    })
}

/// Whether `content` already puts `dir` on `PATH`.
pub fn has_entry(content: &str, dir: &Path) -> bool {
    let dir = dir.display().to_string();
    content.lines().any(|l| is_path_export_for(l, &dir))
}

/// Appends the managed block. `None` when an entry is already present.
pub fn add_entry(content: &str, dir: &Path) -> Option<String> {
    if has_entry(content, dir) {
        return None;
    }

    let mut out = content.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(BLOCK_BEGIN);
    out.push('\n');
    out.push_str(&export_line(dir));
    out.push('\n');
    out.push_str(BLOCK_END);
    out.push('\n');
    Some(out)
}

/// Drops the managed block for `dir` and any other `export PATH=` line naming
/// it. Blocks for other directories are left alone. A begin marker without an
/// end marker is dropped only when the line after it exports `dir`.
/// `None` when there was nothing to remove.
pub fn remove_entry(content: &str, dir: &Path) -> Option<String> {
    let dir = dir.display().to_string();
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut out = String::with_capacity(content.len());
    let mut removed = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.trim() == BLOCK_BEGIN {
            let rest = &lines[i + 1..];
            match rest.iter().position(|l| l.trim() == BLOCK_END) {
                Some(len) => {
                    let block = &lines[i..i + len + 2];
                    if rest[..len].iter().any(|l| is_path_export_for(l, &dir)) {
                        removed = true;
                    } else {
                        block.iter().for_each(|l| out.push_str(l));
                    }
                    i += len + 2;
                }
                None => {
                    if rest.first().is_some_and(|l| is_path_export_for(l, &dir)) {
                        removed = true;
                    } else {
                        out.push_str(line);
                    }
                    i += 1;
                }
            }
            continue;
        }
        if is_path_export_for(line, &dir) {
            removed = true;
        } else {
            out.push_str(line);
        }
        i += 1;
    }

    removed.then_some(out)
}

/// Copies `path` to `<path>.pdfium-build-<timestamp>.bak` and returns the copy's path.
pub fn backup(path: &Path) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut target = path.with_file_name(format!("{file_name}.pdfium-build-{stamp}.bak"));
    let mut n = 1;
    while target.exists() {
        target = path.with_file_name(format!("{file_name}.pdfium-build-{stamp}-{n}.bak"));
        n += 1;
    }

    std::fs::copy(path, &target).map_err(|e| BuildError::file("back up", path, e))?;
    log::debug!("backed up {} to {}", path.display(), target.display());
    Ok(target)
}

fn read_existing(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(BuildError::file("read", path, e)),
    }
}

fn rewrite(path: &Path, existed: bool, content: &str) -> Result<()> {
    if existed {
        backup(path)?;
    }
    std::fs::write(path, content).map_err(|e| BuildError::file("write", path, e))
}

/// Adds the `PATH` entry to `path`, creating the file if needed.
/// Returns whether the file changed.
pub fn register(path: &Path, dir: &Path) -> Result<bool> {
    let existing = read_existing(path)?;
    let existed = existing.is_some();
    match add_entry(existing.as_deref().unwrap_or(""), dir) {
        Some(updated) => {
            rewrite(path, existed, &updated)?;
            log::debug!("added depot_tools PATH entry to {}", path.display());
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Removes the `PATH` entry from `path`. Returns whether the file changed.
pub fn unregister(path: &Path, dir: &Path) -> Result<bool> {
    let Some(existing) = read_existing(path)? else {
        return Ok(false);
    };
    match remove_entry(&existing, dir) {
        Some(updated) => {
            rewrite(path, true, &updated)?;
            log::debug!("removed depot_tools PATH entry from {}", path.display());
            Ok(true)
        }
        None => Ok(false),
    }
}
