use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::delta::{Attributes, ListKind};

/// Visual theme for the editing surface.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Snow,
    Bubble,
}

/// A toolbar feature enabled on the editing surface.
///
/// Serializes to Quill's toolbar configuration shape: unit variants as
/// strings (`"bold"`, `"code-block"`), data variants as single-key
/// objects (`{"header":3}`, `{"list":"ordered"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolbarItem {
    Header(u8),
    List(ListKind),
    CodeBlock,
    Image,
    Bold,
    Italic,
    Strike,
}

/// Configuration applied when an editing surface is spawned.
///
/// The default reproduces the classic fixed setup: heading level 3,
/// ordered and bullet lists, code block, image, bold, italic and
/// strikethrough on the toolbar, the "Compose an epic..." placeholder,
/// and the snow theme. Every field can be overridden by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Enabled toolbar features. Formats without a toolbar entry are
    /// stripped when applied to surface content.
    pub toolbar: Vec<ToolbarItem>,
    /// Text shown while the editing surface is empty.
    pub placeholder: String,
    pub theme: Theme,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            toolbar: vec![
                ToolbarItem::Header(3),
                ToolbarItem::List(ListKind::Ordered),
                ToolbarItem::List(ListKind::Bullet),
                ToolbarItem::CodeBlock,
                ToolbarItem::Image,
                ToolbarItem::Bold,
                ToolbarItem::Italic,
                ToolbarItem::Strike,
            ],
            placeholder: "Compose an epic...".to_string(),
            theme: Theme::Snow,
        }
    }
}

impl SpawnConfig {
    /// Whether any header button is on the toolbar. The button's level is
    /// a display affordance; header formatting at any level is allowed as
    /// long as one is present.
    pub fn allows_header(&self) -> bool {
        self.toolbar
            .iter()
            .any(|item| matches!(item, ToolbarItem::Header(_)))
    }

    /// Whether the given list kind has a toolbar entry.
    pub fn allows_list(&self, kind: ListKind) -> bool {
        self.toolbar.contains(&ToolbarItem::List(kind))
    }

    /// Whether image embeds are enabled.
    pub fn allows_image(&self) -> bool {
        self.toolbar.contains(&ToolbarItem::Image)
    }

    /// Strip formats that have no corresponding toolbar feature.
    pub fn sanitize(&self, attrs: &Attributes) -> Attributes {
        Attributes {
            bold: attrs.bold.filter(|_| self.toolbar.contains(&ToolbarItem::Bold)),
            italic: attrs
                .italic
                .filter(|_| self.toolbar.contains(&ToolbarItem::Italic)),
            strike: attrs
                .strike
                .filter(|_| self.toolbar.contains(&ToolbarItem::Strike)),
            code_block: attrs
                .code_block
                .filter(|_| self.toolbar.contains(&ToolbarItem::CodeBlock)),
            header: attrs.header.filter(|_| self.allows_header()),
            list: attrs.list.filter(|kind| self.allows_list(*kind)),
        }
    }
}

/// Flags accepted on the command line or in a config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub markdown: bool,
    pub mount: Option<String>,
    pub theme: Option<Theme>,
    pub placeholder: Option<String>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            markdown: self.markdown || other.markdown,
            mount: other.mount.clone().or_else(|| self.mount.clone()),
            theme: other.theme.or(self.theme),
            placeholder: other
                .placeholder
                .clone()
                .or_else(|| self.placeholder.clone()),
        }
    }

    /// Fold the flag overrides into a spawn configuration.
    pub fn apply(&self, mut config: SpawnConfig) -> SpawnConfig {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(placeholder) = &self.placeholder {
            config.placeholder = placeholder.clone();
        }
        config
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("quillkit").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("quillkit")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("quillkit").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("quillkit")
                .join("config");
        }
    }

    PathBuf::from(".quillkitrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".quillkitrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let mut tokens = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Placeholder values may contain spaces; keep the rest of the
        // line intact instead of splitting on whitespace.
        if let Some(value) = line.strip_prefix("--placeholder=") {
            tokens.push(format!("--placeholder={value}"));
        } else if let Some(value) = line.strip_prefix("--placeholder ") {
            tokens.push("--placeholder".to_string());
            tokens.push(value.trim().to_string());
        } else {
            tokens.extend(line.split_whitespace().map(ToOwned::to_owned));
        }
    }
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# quillkit defaults (saved with --save)".to_string());
    if flags.markdown {
        lines.push("--markdown".to_string());
    }
    if let Some(mount) = &flags.mount {
        lines.push(format!("--mount {mount}"));
    }
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            Theme::Snow => "snow",
            Theme::Bubble => "bubble",
        };
        lines.push(format!("--theme {theme_str}"));
    }
    if let Some(placeholder) = &flags.placeholder {
        lines.push(format!("--placeholder={placeholder}"));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--markdown" {
            flags.markdown = true;
        } else if token == "--mount" {
            if let Some(next) = tokens.get(i + 1) {
                flags.mount = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--mount=") {
            flags.mount = Some(value.to_string());
        } else if token == "--theme" {
            if let Some(next) = tokens.get(i + 1) {
                flags.theme = parse_theme(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--theme=") {
            flags.theme = parse_theme(value);
        } else if token == "--placeholder" {
            if let Some(next) = tokens.get(i + 1) {
                flags.placeholder = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--placeholder=") {
            flags.placeholder = Some(value.to_string());
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<Theme> {
    match s {
        "snow" => Some(Theme::Snow),
        "bubble" => Some(Theme::Bubble),
        _ => None,
    }
}
