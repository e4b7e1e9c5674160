//! Configuration management for csarrange.
//!
//! This module provides the [`Config`] struct which controls arrangement and
//! formatting behavior. Configuration can be loaded from:
//! - TOML files (`csarrange.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the
//! file being arranged up to the filesystem root, plus the user's home
//! directory.
//!
//! Arrangement is driven by an ordered tree of [`ElementRule`]s: each rule
//! names the element kinds it captures, how to group and sort them, and the
//! rules for their children. Rule strings are resolved (and rejected) when
//! the arranger chain is built, not here, so an unused bad rule does not
//! block unrelated work.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ArrangeError, Result};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["csarrange.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_tab_style() -> String {
    "spaces".to_string()
}
fn default_spaces_per_tab() -> usize {
    4
}
fn default_true() -> bool {
    true
}
fn default_direction() -> String {
    "ascending".to_string()
}

/// Resolved tab style used by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStyle {
    Tabs,
    Spaces,
}

/// One arrangement rule: which element kinds it captures and how to place
/// them. Rules apply in order; the first rule that accepts an element wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRule {
    /// Element kind names this rule captures (`field`, `property`, ...).
    pub kinds: Vec<String>,

    /// Grouping key: `access`, `kind`, `static` or `first_letter`.
    #[serde(default)]
    pub group_by: Option<String>,

    /// Sort key: `name`, `access`, `kind` or `type`.
    #[serde(default)]
    pub sort_by: Option<String>,

    /// `ascending` or `descending`.
    #[serde(default = "default_direction")]
    pub sort_direction: String,

    /// Region name template (`$(Access) $(ElementType)`); None = no region.
    #[serde(default)]
    pub region: Option<String>,

    /// Custom separator text emitted between this rule's groups.
    #[serde(default)]
    pub separator: Option<String>,

    /// Rules applied to the children of captured elements (nested scopes).
    #[serde(default)]
    pub rules: Vec<ElementRule>,
}

impl ElementRule {
    /// Shorthand for a rule capturing one kind with a sort key.
    #[must_use]
    pub fn sorted(kind: &str, sort_by: &str) -> Self {
        ElementRule {
            kinds: vec![kind.to_string()],
            group_by: None,
            sort_by: Some(sort_by.to_string()),
            sort_direction: default_direction(),
            region: None,
            separator: None,
            rules: Vec::new(),
        }
    }

    /// Shorthand for a rule capturing kinds with no grouping or sorting.
    #[must_use]
    pub fn passthrough(kinds: &[&str]) -> Self {
        ElementRule {
            kinds: kinds.iter().map(|k| (*k).to_string()).collect(),
            group_by: None,
            sort_by: None,
            sort_direction: default_direction(),
            region: None,
            separator: None,
            rules: Vec::new(),
        }
    }
}

/// Main configuration struct for csarrange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Indentation style: `spaces` or `tabs` (default: spaces).
    /// Resolved at write time; unknown values fail the write.
    #[serde(default = "default_tab_style")]
    pub tab_style: String,

    /// Spaces per indent level when `tab_style` is `spaces` (default: 4)
    #[serde(default = "default_spaces_per_tab")]
    pub spaces_per_tab: usize,

    /// Emit `#region`/`#endregion` wrappers for rules that request one
    /// (default: true)
    #[serde(default = "default_true")]
    pub regions_enabled: bool,

    /// Collapse auto-properties without backing logic onto one line
    /// (default: true)
    #[serde(default = "default_true")]
    pub inline_auto_properties: bool,

    /// Ordered arrangement rules for the file scope
    #[serde(default = "default_rules")]
    pub rules: Vec<ElementRule>,
}

/// Default rule tree: usings sorted by name; members grouped by kind in the
/// conventional order and sorted by access, ties keeping source order.
fn default_rules() -> Vec<ElementRule> {
    fn member_rule(kind: &str) -> ElementRule {
        ElementRule {
            kinds: vec![kind.to_string()],
            group_by: Some("kind".to_string()),
            sort_by: Some("access".to_string()),
            sort_direction: default_direction(),
            region: None,
            separator: None,
            rules: Vec::new(),
        }
    }

    let member_rules = vec![
        member_rule("field"),
        member_rule("constructor"),
        member_rule("destructor"),
        member_rule("delegate"),
        member_rule("event"),
        member_rule("property"),
        member_rule("method"),
    ];

    let mut type_rule = ElementRule::passthrough(&["type"]);
    type_rule.rules = {
        let mut rules = member_rules;
        // nested types arrange with the same member rules one level down
        let mut nested = ElementRule::passthrough(&["type"]);
        nested.rules = rules.clone();
        rules.push(nested);
        rules
    };

    let mut namespace_rule = ElementRule::passthrough(&["namespace"]);
    namespace_rule.rules = vec![ElementRule::sorted("using", "name"), type_rule.clone()];

    vec![
        ElementRule::sorted("using", "name"),
        namespace_rule,
        type_rule,
    ]
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub tab_style: Option<String>,
    pub spaces_per_tab: Option<usize>,
    pub regions_enabled: Option<bool>,
    pub inline_auto_properties: Option<bool>,
    pub rules: Option<Vec<ElementRule>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tab_style: default_tab_style(),
            spaces_per_tab: default_spaces_per_tab(),
            regions_enabled: true,
            inline_auto_properties: true,
            rules: default_rules(),
        }
    }
}

impl Config {
    /// Maximum reasonable indent width
    const MAX_SPACES_PER_TAB: usize = 16;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    /// Rule strings are validated later, when the arranger chain is built.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.spaces_per_tab == 0 {
            return Some("spaces_per_tab must be at least 1".to_string());
        }
        if self.spaces_per_tab > Self::MAX_SPACES_PER_TAB {
            return Some(format!(
                "spaces_per_tab {} exceeds maximum of {}",
                self.spaces_per_tab,
                Self::MAX_SPACES_PER_TAB
            ));
        }
        None
    }

    /// Resolve the configured tab style.
    ///
    /// Called by the writer before producing any output; a value outside the
    /// recognized set is fatal for the file.
    pub fn resolve_tab_style(&self) -> Result<TabStyle> {
        match self.tab_style.as_str() {
            "tabs" => Ok(TabStyle::Tabs),
            "spaces" => Ok(TabStyle::Spaces),
            other => Err(ArrangeError::InvalidOperation(format!(
                "unrecognized tab style '{other}' (expected 'tabs' or 'spaces')"
            ))),
        }
    }

    /// One level of indentation as text.
    pub fn indent_unit(&self) -> Result<String> {
        Ok(match self.resolve_tab_style()? {
            TabStyle::Tabs => "\t".to_string(),
            TabStyle::Spaces => " ".repeat(self.spaces_per_tab),
        })
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: PartialConfig) {
        if let Some(v) = partial.tab_style {
            self.tab_style = v;
        }
        if let Some(v) = partial.spaces_per_tab {
            self.spaces_per_tab = v;
        }
        if let Some(v) = partial.regions_enabled {
            self.regions_enabled = v;
        }
        if let Some(v) = partial.inline_auto_properties {
            self.inline_auto_properties = v;
        }
        // rule trees replace wholesale; merging partial rule trees would
        // make the effective order depend on both files at once
        if let Some(v) = partial.rules {
            self.rules = v;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home
    /// directory config. Returns config file paths in order of priority
    /// (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Reverse so we go from root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        if config_files.is_empty() {
            return Self::default();
        }

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
