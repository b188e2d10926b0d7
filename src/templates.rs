//! Embedded stub templates for artdepot
use std::fs;
use std::path::{Path, PathBuf};

use crate::asset::AssetCategory;
use crate::config::ToolTable;
use crate::error::{DepotError, Result};

/// Model stub template
pub const MODEL_TEMPLATE: &str = r#"//Maya ASCII 2024 scene
//Codeset: UTF-8
requires maya "2024";
currentUnit -l centimeter -a degree -t film;
fileInfo "application" "maya";
fileInfo "artdepot.stub" "model";
createNode transform -s -n "persp";
createNode camera -s -n "perspShape" -p "persp";
createNode transform -n "geo_GRP";
"#;

/// Rig stub template
pub const RIG_TEMPLATE: &str = r#"//Maya ASCII 2024 scene
//Codeset: UTF-8
requires maya "2024";
currentUnit -l centimeter -a degree -t film;
fileInfo "application" "maya";
fileInfo "artdepot.stub" "rig";
createNode transform -n "rig_GRP";
createNode transform -n "controls_GRP" -p "rig_GRP";
createNode transform -n "skeleton_GRP" -p "rig_GRP";
"#;

/// Animation stub template
pub const ANIM_TEMPLATE: &str = r#"//Maya ASCII 2024 scene
//Codeset: UTF-8
requires maya "2024";
currentUnit -l centimeter -a degree -t film;
fileInfo "application" "maya";
fileInfo "artdepot.stub" "animation";
playbackOptions -min 1 -max 120 -ast 1 -aet 120;
"#;

/// VFX notes template
pub const VFX_TEMPLATE: &str = r#"VFX element
===========

Description:

Simulation tool:

Cache location:

Notes:
"#;

/// Smallest valid Photoshop document: 1x1 pixel, 8-bit RGB, white.
pub const TEXTURE_TEMPLATE: &[u8] = &[
    b'8', b'B', b'P', b'S', // signature
    0x00, 0x01, // version
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // reserved
    0x00, 0x03, // channels
    0x00, 0x00, 0x00, 0x01, // height
    0x00, 0x00, 0x00, 0x01, // width
    0x00, 0x08, // bits per channel
    0x00, 0x03, // RGB color mode
    0x00, 0x00, 0x00, 0x00, // color mode data
    0x00, 0x00, 0x00, 0x00, // image resources
    0x00, 0x00, 0x00, 0x00, // layer and mask info
    0x00, 0x00, // raw image data
    0xFF, 0xFF, 0xFF,
];

/// Reference statement appended to rig and animation stubs
pub const REFERENCE_LINE_TEMPLATE: &str =
    r#"file -r -type "mayaAscii" -namespace "{namespace}" "{path}";"#;

/// Built-in template contents for a category
pub fn default_template(category: AssetCategory) -> &'static [u8] {
    match category {
        AssetCategory::Models => MODEL_TEMPLATE.as_bytes(),
        AssetCategory::Rigs => RIG_TEMPLATE.as_bytes(),
        AssetCategory::Animations => ANIM_TEMPLATE.as_bytes(),
        AssetCategory::Textures => TEXTURE_TEMPLATE,
        AssetCategory::Vfx => VFX_TEMPLATE.as_bytes(),
    }
}

/// Render the reference statement for one referenced asset
pub fn reference_line(namespace: &str, relative_path: &str) -> String {
    REFERENCE_LINE_TEMPLATE
        .replace("{namespace}", namespace)
        .replace("{path}", relative_path)
}

/// Where stub templates live on disk
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, category: AssetCategory) -> PathBuf {
        self.dir.join(category.template_file())
    }

    /// Template path for `category`, or `TemplateMissing` if absent
    pub fn resolve(&self, category: AssetCategory) -> Result<PathBuf> {
        let path = self.path_for(category);
        if !path.is_file() {
            return Err(DepotError::TemplateMissing(path));
        }
        Ok(path)
    }

    /// Write the built-in templates into the template directory.
    ///
    /// Existing files are kept unless `force` is set. Returns the files written.
    pub fn install_defaults(&self, force: bool) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir).map_err(|e| DepotError::fs(&self.dir, e))?;

        let mut written = Vec::new();
        for category in AssetCategory::ALL {
            let path = self.path_for(category);
            if path.exists() && !force {
                continue;
            }
            fs::write(&path, default_template(category)).map_err(|e| DepotError::fs(&path, e))?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Pretty JSON document written to each project's `Config/config.json`
pub fn project_config_document(tools: &ToolTable) -> Result<String> {
    let mut content = serde_json::to_string_pretty(tools)?;
    content.push('\n');
    Ok(content)
}
