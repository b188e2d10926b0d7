use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::asset::AssetType;
use crate::error::{DepotError, Result};

/// Persisted registry document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryData {
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub assets: Vec<AssetEntry>,
}

/// One registered asset. `type` is kept as written so that entries from
/// older tools with unrecognised types still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
}

impl AssetEntry {
    pub fn new(name: impl Into<String>, asset_type: AssetType) -> Self {
        Self {
            name: name.into(),
            asset_type: asset_type.to_string(),
        }
    }

    /// Parsed type, or `None` if the stored string is not a known type
    pub fn parsed_type(&self) -> Option<AssetType> {
        self.asset_type.parse().ok()
    }
}

/// JSON-backed record of known projects and assets.
///
/// Every mutation rewrites the whole file before returning. There is no
/// locking: a second writer racing on the same file wins or loses whole.
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
    data: RegistryData,
}

impl Registry {
    /// Load the registry at `path`, starting empty if the file does not exist
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                data: RegistryData::default(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| DepotError::fs(&path, e))?;
        let data = serde_json::from_str(&content).map_err(|e| DepotError::RegistryCorrupt {
            path: path.clone(),
            source: e,
        })?;

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &RegistryData {
        &self.data
    }

    /// Write the registry as 4-space indented JSON
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| DepotError::fs(parent, e))?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.data.serialize(&mut ser)?;
        buf.push(b'\n');

        fs::write(&self.path, buf).map_err(|e| DepotError::fs(&self.path, e))
    }

    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.data.projects.keys().map(String::as_str)
    }

    pub fn has_project(&self, name: &str) -> bool {
        self.data.projects.contains_key(name)
    }

    pub fn assets(&self, project: &str) -> &[AssetEntry] {
        self.data
            .projects
            .get(project)
            .map(|p| p.assets.as_slice())
            .unwrap_or(&[])
    }

    /// First asset named `name`, whatever its type
    pub fn find_asset(&self, project: &str, name: &str) -> Option<&AssetEntry> {
        self.assets(project).iter().find(|a| a.name == name)
    }

    pub fn contains_asset(&self, project: &str, name: &str, asset_type: AssetType) -> bool {
        self.assets(project)
            .iter()
            .any(|a| a.name == name && a.parsed_type() == Some(asset_type))
    }

    /// Register a project. Returns false if it was already registered.
    pub fn add_project(&mut self, name: &str) -> Result<bool> {
        if self.has_project(name) {
            return Ok(false);
        }
        self.data
            .projects
            .insert(name.to_string(), ProjectEntry::default());
        self.save()?;
        Ok(true)
    }

    /// Register an asset, creating the project entry if needed.
    ///
    /// Returns false without writing if the `(name, type)` pair already exists.
    pub fn add_asset(&mut self, project: &str, name: &str, asset_type: AssetType) -> Result<bool> {
        if self.contains_asset(project, name, asset_type) {
            return Ok(false);
        }
        self.data
            .projects
            .entry(project.to_string())
            .or_default()
            .assets
            .push(AssetEntry::new(name, asset_type));
        self.save()?;
        Ok(true)
    }

    /// Move a project entry to a new name, keeping its assets.
    ///
    /// Fails with `DuplicateName` if `new` is taken; returns false if `old`
    /// is not registered.
    pub fn rename_project(&mut self, old: &str, new: &str) -> Result<bool> {
        if self.has_project(new) {
            return Err(DepotError::DuplicateName {
                kind: "project",
                name: new.to_string(),
            });
        }
        let Some(entry) = self.data.projects.remove(old) else {
            return Ok(false);
        };
        self.data.projects.insert(new.to_string(), entry);
        self.save()?;
        Ok(true)
    }

    /// Remove a project and all of its assets. Returns false if absent.
    pub fn delete_project(&mut self, name: &str) -> Result<bool> {
        if self.data.projects.remove(name).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Rename the first asset named `old`, regardless of type.
    ///
    /// The registry is written even when nothing matched.
    pub fn rename_asset(&mut self, project: &str, old: &str, new: &str) -> Result<bool> {
        let renamed = match self.data.projects.get_mut(project) {
            Some(entry) => match entry.assets.iter_mut().find(|a| a.name == old) {
                Some(asset) => {
                    asset.name = new.to_string();
                    true
                }
                None => false,
            },
            None => false,
        };
        self.save()?;
        Ok(renamed)
    }

    /// Remove every asset named `name` in the project, across all types.
    ///
    /// The registry is written even when nothing matched. Returns the
    /// number of entries removed.
    pub fn delete_asset(&mut self, project: &str, name: &str) -> Result<usize> {
        let removed = match self.data.projects.get_mut(project) {
            Some(entry) => {
                let before = entry.assets.len();
                entry.assets.retain(|a| a.name != name);
                before - entry.assets.len()
            }
            None => 0,
        };
        self.save()?;
        Ok(removed)
    }
}
