use std::path::{Path, PathBuf};

use crate::asset::{AssetCategory, AssetType, Subtype};

/// Number of directory levels between `ArtDepot/` and a stub file:
/// `<Category>/<Subtype>/<Asset>/`.
pub const ART_DEPOT_DEPTH: usize = 3;

/// Maps project and asset identifiers onto the on-disk layout.
///
/// Every method is a pure computation; nothing here touches the filesystem.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Global `<root>/Tools`
    pub fn tools_dir(&self) -> PathBuf {
        self.root.join("Tools")
    }

    /// Global `<root>/Config`
    pub fn config_dir(&self) -> PathBuf {
        self.root.join("Config")
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.root.join("Projects")
    }

    pub fn project_root(&self, project: &str) -> PathBuf {
        self.projects_dir().join(project)
    }

    pub fn project_config_file(&self, project: &str) -> PathBuf {
        self.project_root(project).join("Config").join("config.json")
    }

    pub fn art_depot_dir(&self, project: &str) -> PathBuf {
        self.project_root(project).join("ArtDepot")
    }

    /// Directory holding every asset of one category/subtype
    pub fn type_dir(&self, project: &str, category: AssetCategory, subtype: Option<Subtype>) -> PathBuf {
        let dir = self.art_depot_dir(project).join(category.dir_name());
        match subtype {
            Some(subtype) => dir.join(subtype.dir_name()),
            None => dir,
        }
    }

    pub fn asset_dir(
        &self,
        project: &str,
        category: AssetCategory,
        subtype: Option<Subtype>,
        asset_name: &str,
    ) -> PathBuf {
        self.type_dir(project, category, subtype).join(asset_name)
    }

    pub fn asset_dir_for(&self, project: &str, asset_type: AssetType, asset_name: &str) -> PathBuf {
        self.asset_dir(project, asset_type.category(), asset_type.subtype(), asset_name)
    }

    pub fn stub_path(&self, project: &str, asset_type: AssetType, asset_name: &str) -> PathBuf {
        self.asset_dir_for(project, asset_type, asset_name)
            .join(stub_file_name(asset_type.category(), asset_name))
    }

    /// Directory whose children are valid reference targets for `asset_type`
    pub fn reference_target_dir(&self, project: &str, asset_type: AssetType) -> Option<PathBuf> {
        asset_type
            .reference_type()
            .map(|target| self.type_dir(project, target.category(), target.subtype()))
    }

    /// Absolute path of the stub a reference from `asset_type` would point at
    pub fn reference_target_path(
        &self,
        project: &str,
        asset_type: AssetType,
        reference_name: &str,
    ) -> Option<PathBuf> {
        asset_type
            .reference_type()
            .map(|target| self.stub_path(project, target, reference_name))
    }
}

/// `<Prefix>_<name>.<ext>`
pub fn stub_file_name(category: AssetCategory, asset_name: &str) -> String {
    format!("{}_{}.{}", category.prefix(), asset_name, category.extension())
}

/// Path from a dependent stub's directory to the stub it references.
///
/// Only Rigs (to Models) and Animations (to Rigs) have reference targets;
/// other categories return `None`.
pub fn reference_relative_path(
    dependent: AssetCategory,
    subtype: Option<Subtype>,
    reference_name: &str,
) -> Option<String> {
    let target = dependent.reference_target()?;
    let mut parts: Vec<String> = vec!["..".to_string(); ART_DEPOT_DEPTH];
    parts.push(target.dir_name().to_string());
    if let Some(subtype) = subtype {
        parts.push(subtype.dir_name().to_string());
    }
    parts.push(reference_name.to_string());
    parts.push(stub_file_name(target, reference_name));
    Some(parts.join("/"))
}
