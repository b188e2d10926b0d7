use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::asset::AssetCategory;
use crate::config::EditorsConfig;
use crate::error::{DepotError, Result};

/// External application used to open a stub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editor {
    Maya,
    Photoshop,
    Text,
}

impl Editor {
    /// Editor for a stub, chosen by file extension
    pub fn for_path(path: &Path) -> Option<Editor> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "ma" | "mb" => Some(Editor::Maya),
            "psd" => Some(Editor::Photoshop),
            "txt" => Some(Editor::Text),
            _ => None,
        }
    }

    pub fn for_category(category: AssetCategory) -> Editor {
        match category {
            AssetCategory::Models | AssetCategory::Rigs | AssetCategory::Animations => Editor::Maya,
            AssetCategory::Textures => Editor::Photoshop,
            AssetCategory::Vfx => Editor::Text,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Editor::Maya => "maya",
            Editor::Photoshop => "photoshop",
            Editor::Text => "text editor",
        }
    }
}

/// Spawns editors without waiting for them to exit
#[derive(Debug, Clone)]
pub struct Launcher {
    editors: EditorsConfig,
}

impl Launcher {
    pub fn new(editors: EditorsConfig) -> Self {
        Self { editors }
    }

    /// Resolve the executable that would open `path`
    pub fn resolve(&self, path: &Path) -> Result<(Editor, PathBuf)> {
        let editor =
            Editor::for_path(path).ok_or_else(|| DepotError::UnsupportedFile(path.to_path_buf()))?;
        let command = self.editors.command_for(editor);
        let exe = which::which(command).map_err(|_| DepotError::LauncherNotFound(command.to_string()))?;
        Ok((editor, exe))
    }

    /// Open `path` in its editor. Returns as soon as the process is spawned.
    ///
    /// The editor always receives an absolute path.
    pub fn open(&self, path: &Path) -> Result<Editor> {
        let (editor, exe) = self.resolve(path)?;
        let target = absolute_path(path)?;
        Command::new(&exe)
            .arg(&target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|_| DepotError::LauncherNotFound(exe.display().to_string()))?;
        Ok(editor)
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| DepotError::fs(path, e))
}
