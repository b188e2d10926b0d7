use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::launcher::Editor;

/// artdepot configuration loaded from config.toml and environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub depot: DepotConfig,
    pub editors: EditorsConfig,
    pub tools: ToolTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DepotConfig {
    /// Directory owning `Projects/`, `Tools/` and `Config/`
    pub root: PathBuf,
    /// Registry file, defaults to `<root>/project_data.json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,
    /// Stub templates, defaults to `<root>/Config/file_templates`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,
    /// Seconds between refreshes in `watch`
    pub refresh_interval: u64,
}

/// Commands used to open stubs, resolved on PATH
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorsConfig {
    pub maya: String,
    pub photoshop: String,
    pub text: String,
}

/// Default tool table written into each new project's `Config/config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolTable {
    pub dcc: BTreeMap<String, DccTool>,
    pub engines: BTreeMap<String, EngineTool>,
    pub auxiliary: BTreeMap<String, AuxTool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DccTool {
    pub version: String,
    pub executable: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineTool {
    pub version: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxTool {
    pub version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depot: DepotConfig::default(),
            editors: EditorsConfig::default(),
            tools: ToolTable::default(),
        }
    }
}

impl Default for DepotConfig {
    fn default() -> Self {
        Self {
            root: env::temp_dir().join("ProjectManager"),
            registry: None,
            templates: None,
            refresh_interval: 5,
        }
    }
}

impl Default for EditorsConfig {
    fn default() -> Self {
        Self {
            maya: "maya".to_string(),
            photoshop: "photoshop".to_string(),
            text: default_text_editor(),
        }
    }
}

fn default_text_editor() -> String {
    if cfg!(windows) {
        "notepad".to_string()
    } else if cfg!(target_os = "macos") {
        "open".to_string()
    } else {
        "xdg-open".to_string()
    }
}

impl Default for ToolTable {
    fn default() -> Self {
        let mut dcc = BTreeMap::new();
        dcc.insert(
            "maya".to_string(),
            DccTool {
                version: "2024".to_string(),
                executable: "C:/Program Files/Autodesk/Maya2024/bin/maya.exe".to_string(),
            },
        );
        dcc.insert(
            "photoshop".to_string(),
            DccTool {
                version: "2024".to_string(),
                executable: "C:/Program Files/Adobe/Adobe Photoshop 2024/Photoshop.exe".to_string(),
            },
        );
        dcc.insert(
            "houdini".to_string(),
            DccTool {
                version: "20.0".to_string(),
                executable: "C:/Program Files/Side Effects Software/Houdini 20.0/bin/houdini.exe"
                    .to_string(),
            },
        );

        let mut engines = BTreeMap::new();
        engines.insert(
            "unreal".to_string(),
            EngineTool {
                version: "5.3".to_string(),
                path: "C:/Program Files/Epic Games/UE_5.3".to_string(),
            },
        );
        engines.insert(
            "unity".to_string(),
            EngineTool {
                version: "2022.3".to_string(),
                path: "C:/Program Files/Unity/Hub/Editor/2022.3".to_string(),
            },
        );

        let mut auxiliary = BTreeMap::new();
        auxiliary.insert("substance_painter".to_string(), AuxTool { version: "9.1".to_string() });
        auxiliary.insert("zbrush".to_string(), AuxTool { version: "2024".to_string() });
        auxiliary.insert("marvelous_designer".to_string(), AuxTool { version: "12".to_string() });

        Self {
            dcc,
            engines,
            auxiliary,
        }
    }
}

impl DepotConfig {
    pub fn registry_path(&self) -> PathBuf {
        self.registry
            .clone()
            .unwrap_or_else(|| self.root.join("project_data.json"))
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.templates
            .clone()
            .unwrap_or_else(|| self.root.join("Config").join("file_templates"))
    }
}

impl EditorsConfig {
    pub fn command_for(&self, editor: Editor) -> &str {
        match editor {
            Editor::Maya => self.maya.as_str(),
            Editor::Photoshop => self.photoshop.as_str(),
            Editor::Text => self.text.as_str(),
        }
    }
}

impl Config {
    /// Config rooted at `root` with every other setting at its default.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let mut config = Config::default();
        config.depot.root = root.into();
        config
    }

    /// Per-user config file, `~/.config/artdepot/config.toml` on Linux
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("artdepot").join("config.toml"))
    }

    /// Load configuration from the user config file and environment variables.
    /// Environment variables take precedence over config file values.
    pub fn load() -> Result<Self> {
        let mut config = match Self::user_config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Config::default(),
        };

        config.apply_env_overrides();

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Apply environment variable overrides (env vars take precedence)
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("ARTDEPOT_ROOT") {
            self.depot.root = PathBuf::from(val);
        }
        if let Ok(val) = env::var("ARTDEPOT_REGISTRY") {
            self.depot.registry = Some(PathBuf::from(val));
        }
        if let Ok(val) = env::var("ARTDEPOT_TEMPLATES") {
            self.depot.templates = Some(PathBuf::from(val));
        }
        if let Ok(val) = env::var("ARTDEPOT_REFRESH_INTERVAL") {
            if let Ok(n) = val.parse() {
                self.depot.refresh_interval = n;
            }
        }

        // Editors
        if let Ok(val) = env::var("ARTDEPOT_MAYA") {
            self.editors.maya = val;
        }
        if let Ok(val) = env::var("ARTDEPOT_PHOTOSHOP") {
            self.editors.photoshop = val;
        }
        if let Ok(val) = env::var("ARTDEPOT_TEXT_EDITOR") {
            self.editors.text = val;
        }
    }

    /// Generate a config.toml content string
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }
}
