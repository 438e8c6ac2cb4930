//! 配置加载
//!
//! 配置文件位于 `<config_dir>/aitetsu/config.toml`，不存在时使用默认值。
//! 提交键、强制换行键都在这里决定，代码中不写死 Enter 的含义。
//! 格式错误或无法解析的组合键属于启动错误。

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::keymap::{KeyChord, parse_key_chord};
use crate::models::{Language, TabBehavior};

pub const APP_NAME: &str = "aitetsu";

const DEFAULT_SUBMIT: &str = "enter";
const DEFAULT_NEWLINE: [&str; 2] = ["alt+enter", "ctrl+j"];
const DEFAULT_QUIT: &str = "ctrl+c";
const DEFAULT_INDENT_WIDTH: usize = 4;
const DEFAULT_MAX_HEIGHT: u16 = 10;
const DEFAULT_PLACEHOLDER: &str = "Send a message...";
const DEFAULT_STYLE_FILE: &str = "style.toml";

#[derive(Debug, Clone)]
pub struct Config {
    pub keymap: KeymapConfig,
    pub prompt: PromptConfig,
    pub style_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct KeymapConfig {
    pub submit: KeyChord,
    pub newline: Vec<KeyChord>,
    pub quit: KeyChord,
}

#[derive(Debug, Clone)]
pub struct PromptConfig {
    pub language: Language,
    pub tab_behavior: TabBehavior,
    pub indent_width: usize,
    pub max_height: u16,
    pub placeholder: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    keymap: Option<RawKeymap>,
    prompt: Option<RawPrompt>,
    style: Option<RawStyle>,
}

#[derive(Debug, Default, Deserialize)]
struct RawKeymap {
    submit: Option<String>,
    newline: Option<Vec<String>>,
    quit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPrompt {
    language: Option<Language>,
    #[serde(alias = "tabBehavior")]
    tab_behavior: Option<TabBehavior>,
    #[serde(alias = "indentWidth")]
    indent_width: Option<usize>,
    #[serde(alias = "maxHeight")]
    max_height: Option<u16>,
    placeholder: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStyle {
    path: Option<String>,
}

impl Config {
    /// 全部使用默认值，样式表放在 `base_dir` 下
    pub fn with_defaults(base_dir: &Path) -> Result<Self> {
        Self::from_raw(RawConfig::default(), base_dir)
    }

    fn from_raw(raw: RawConfig, base_dir: &Path) -> Result<Self> {
        let keymap = raw.keymap.unwrap_or_default();
        let prompt = raw.prompt.unwrap_or_default();

        let submit = chord("keymap.submit", keymap.submit.as_deref().unwrap_or(DEFAULT_SUBMIT))?;
        let quit = chord("keymap.quit", keymap.quit.as_deref().unwrap_or(DEFAULT_QUIT))?;
        let newline = match keymap.newline {
            Some(list) => list
                .iter()
                .map(|s| chord("keymap.newline", s))
                .collect::<Result<Vec<_>>>()?,
            None => DEFAULT_NEWLINE
                .iter()
                .map(|s| chord("keymap.newline", s))
                .collect::<Result<Vec<_>>>()?,
        };

        let style_path = raw
            .style
            .and_then(|s| s.path)
            .map(|p| base_dir.join(p))
            .unwrap_or_else(|| base_dir.join(DEFAULT_STYLE_FILE));

        Ok(Config {
            keymap: KeymapConfig {
                submit,
                newline,
                quit,
            },
            prompt: PromptConfig {
                language: prompt.language.unwrap_or_default(),
                tab_behavior: prompt.tab_behavior.unwrap_or_default(),
                indent_width: prompt.indent_width.unwrap_or(DEFAULT_INDENT_WIDTH).max(1),
                max_height: prompt.max_height.unwrap_or(DEFAULT_MAX_HEIGHT).max(1),
                placeholder: prompt
                    .placeholder
                    .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            },
            style_path,
        })
    }
}

fn chord(binding: &'static str, value: &str) -> Result<KeyChord> {
    parse_key_chord(value).ok_or_else(|| Error::Keymap {
        binding,
        chord: value.to_string(),
    })
}

/// 配置目录 (~/.config/aitetsu/)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// 从TOML文件加载配置，文件不存在或为空时使用默认值
pub fn load_config(path: &Path) -> Result<Config> {
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    if !path.exists() {
        return Config::with_defaults(base_dir);
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Config::with_defaults(base_dir);
    }

    let raw: RawConfig = toml::from_str(&content).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })?;

    Config::from_raw(raw, base_dir)
}

#[cfg(test)]
mod tests;
