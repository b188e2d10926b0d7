use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DepotError;

/// Top level asset classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetCategory {
    Models,
    Rigs,
    Animations,
    Textures,
    Vfx,
}

/// Second level classification inside a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subtype {
    Characters,
    Props,
    Environments,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 5] = [
        AssetCategory::Models,
        AssetCategory::Rigs,
        AssetCategory::Animations,
        AssetCategory::Textures,
        AssetCategory::Vfx,
    ];

    /// Directory name under `ArtDepot/`
    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetCategory::Models => "Models",
            AssetCategory::Rigs => "Rigs",
            AssetCategory::Animations => "Animations",
            AssetCategory::Textures => "Textures",
            AssetCategory::Vfx => "VFX",
        }
    }

    /// Stub file name prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            AssetCategory::Models => "SM",
            AssetCategory::Rigs => "RIG",
            AssetCategory::Animations => "A",
            AssetCategory::Textures => "T",
            AssetCategory::Vfx => "VFX",
        }
    }

    /// Stub file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            AssetCategory::Models | AssetCategory::Rigs | AssetCategory::Animations => "ma",
            AssetCategory::Textures => "psd",
            AssetCategory::Vfx => "txt",
        }
    }

    /// File name of the template copied into new stubs
    pub fn template_file(&self) -> &'static str {
        match self {
            AssetCategory::Models => "model_template.ma",
            AssetCategory::Rigs => "rig_template.ma",
            AssetCategory::Animations => "anim_template.ma",
            AssetCategory::Textures => "tex_template.psd",
            AssetCategory::Vfx => "vfx_template.txt",
        }
    }

    /// Category a stub of this category must reference, if any
    pub fn reference_target(&self) -> Option<AssetCategory> {
        match self {
            AssetCategory::Rigs => Some(AssetCategory::Models),
            AssetCategory::Animations => Some(AssetCategory::Rigs),
            _ => None,
        }
    }

    pub fn subtypes(&self) -> &'static [Subtype] {
        match self {
            AssetCategory::Models | AssetCategory::Textures => {
                &[Subtype::Characters, Subtype::Props, Subtype::Environments]
            }
            AssetCategory::Rigs | AssetCategory::Animations => &[Subtype::Characters, Subtype::Props],
            AssetCategory::Vfx => &[],
        }
    }

    pub fn allows(&self, subtype: Option<Subtype>) -> bool {
        match subtype {
            Some(s) => self.subtypes().contains(&s),
            None => self.subtypes().is_empty(),
        }
    }
}

/// Prefix for a raw category name, falling back to the uppercased name for
/// categories this tool does not know about.
pub fn prefix_for_category_name(category: &str) -> String {
    match category.parse::<AssetCategory>() {
        Ok(cat) => cat.prefix().to_string(),
        Err(_) => category.to_uppercase(),
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for AssetCategory {
    type Err = DepotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "models" => Ok(AssetCategory::Models),
            "rigs" => Ok(AssetCategory::Rigs),
            "animations" => Ok(AssetCategory::Animations),
            "textures" => Ok(AssetCategory::Textures),
            "vfx" => Ok(AssetCategory::Vfx),
            _ => Err(DepotError::UnknownAssetType(s.to_string())),
        }
    }
}

impl Subtype {
    pub const ALL: [Subtype; 3] = [Subtype::Characters, Subtype::Props, Subtype::Environments];

    pub fn dir_name(&self) -> &'static str {
        match self {
            Subtype::Characters => "Characters",
            Subtype::Props => "Props",
            Subtype::Environments => "Environments",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Subtype {
    type Err = DepotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "characters" => Ok(Subtype::Characters),
            "props" => Ok(Subtype::Props),
            "environments" => Ok(Subtype::Environments),
            _ => Err(DepotError::UnknownAssetType(s.to_string())),
        }
    }
}

/// A `Category/Subtype` pair as stored in the registry.
///
/// VFX assets have no subtype and are written as `VFX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetType {
    category: AssetCategory,
    subtype: Option<Subtype>,
}

impl AssetType {
    pub fn new(category: AssetCategory, subtype: Option<Subtype>) -> Result<Self, DepotError> {
        if !category.allows(subtype) {
            let text = match subtype {
                Some(s) => format!("{}/{}", category, s),
                None => category.to_string(),
            };
            return Err(DepotError::UnknownAssetType(text));
        }
        Ok(Self { category, subtype })
    }

    pub fn category(&self) -> AssetCategory {
        self.category
    }

    pub fn subtype(&self) -> Option<Subtype> {
        self.subtype
    }

    /// Type of the asset this one must reference, same subtype
    pub fn reference_type(&self) -> Option<AssetType> {
        self.category.reference_target().map(|category| AssetType {
            category,
            subtype: self.subtype,
        })
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subtype {
            Some(subtype) => write!(f, "{}/{}", self.category, subtype),
            None => write!(f, "{}", self.category),
        }
    }
}

impl FromStr for AssetType {
    type Err = DepotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || DepotError::UnknownAssetType(s.to_string());
        let (category, subtype) = match s.split_once('/') {
            Some((cat, sub)) if sub.trim().is_empty() => (cat, None),
            Some((cat, sub)) => (cat, Some(sub.parse::<Subtype>().map_err(|_| unknown())?)),
            None => (s, None),
        };
        let category = category.parse::<AssetCategory>().map_err(|_| unknown())?;
        AssetType::new(category, subtype).map_err(|_| unknown())
    }
}

impl TryFrom<String> for AssetType {
    type Error = DepotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssetType> for String {
    fn from(value: AssetType) -> Self {
        value.to_string()
    }
}
