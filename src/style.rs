//! 样式表
//!
//! 每个界面区域一张表，键为区域标识 (`messages`、`prompt`、`header`、`status`)：
//!
//! ```toml
//! [messages]
//! border = "#cba6f7"
//!
//! [prompt]
//! fg = "white"
//! border = "#b4befe"
//! ```
//!
//! 与区域不匹配的标识只记录警告；颜色写错属于启动错误。

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ratatui::style::{Color, Style};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::ui::layout::SurfaceId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    pub text: Style,
    pub border: Style,
    pub title: Style,
}

#[derive(Debug, Default, Deserialize)]
struct RawSurfaceStyle {
    fg: Option<String>,
    bg: Option<String>,
    border: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Stylesheet {
    surfaces: HashMap<SurfaceId, SurfaceStyle>,
}

impl Default for Stylesheet {
    fn default() -> Self {
        let surfaces = SurfaceId::ALL
            .into_iter()
            .map(|id| (id, default_style(id)))
            .collect();
        Self { surfaces }
    }
}

impl Stylesheet {
    pub fn get(&self, id: SurfaceId) -> SurfaceStyle {
        self.surfaces
            .get(&id)
            .copied()
            .unwrap_or_else(|| default_style(id))
    }

    /// 解析样式表文本，未出现的区域保留默认值
    pub fn parse(content: &str) -> Result<Self> {
        let raw: HashMap<String, RawSurfaceStyle> =
            toml::from_str(content).map_err(Error::StyleSyntax)?;

        let mut sheet = Self::default();
        for (name, rules) in raw {
            let Some(id) = SurfaceId::from_name(&name) else {
                warn!(surface = %name, "stylesheet references unknown surface, ignored");
                continue;
            };
            let base = default_style(id);
            let text = apply(base.text, &name, "fg", rules.fg.as_deref(), |s, c| s.fg(c))?;
            let text = apply(text, &name, "bg", rules.bg.as_deref(), |s, c| s.bg(c))?;
            let border = apply(base.border, &name, "border", rules.border.as_deref(), |s, c| {
                s.fg(c)
            })?;
            let title = apply(base.title, &name, "title", rules.title.as_deref(), |s, c| {
                s.fg(c)
            })?;
            sheet.surfaces.insert(
                id,
                SurfaceStyle {
                    text,
                    border,
                    title,
                },
            );
        }
        Ok(sheet)
    }
}

fn apply(
    style: Style,
    surface: &str,
    key: &str,
    value: Option<&str>,
    set: impl Fn(Style, Color) -> Style,
) -> Result<Style> {
    let Some(value) = value else {
        return Ok(style);
    };
    let color = value.trim().parse::<Color>().map_err(|_| Error::Style {
        surface: surface.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })?;
    Ok(set(style, color))
}

fn default_style(id: SurfaceId) -> SurfaceStyle {
    match id {
        SurfaceId::Header => SurfaceStyle {
            text: Style::default().fg(Color::Gray),
            border: Style::default().fg(Color::Cyan),
            title: Style::default().fg(Color::Cyan),
        },
        SurfaceId::Messages => SurfaceStyle {
            text: Style::default(),
            border: Style::default().fg(Color::Cyan),
            title: Style::default().fg(Color::Cyan),
        },
        SurfaceId::Prompt => SurfaceStyle {
            text: Style::default(),
            border: Style::default().fg(Color::Yellow),
            title: Style::default().fg(Color::Yellow),
        },
        SurfaceId::Status => SurfaceStyle {
            text: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::DarkGray),
            title: Style::default().fg(Color::DarkGray),
        },
    }
}

/// 加载样式表，文件不存在时使用默认样式
pub fn load_stylesheet(path: &Path) -> Result<Stylesheet> {
    if !path.exists() {
        info!(path = %path.display(), "no stylesheet, using defaults");
        return Ok(Stylesheet::default());
    }

    let content = fs::read_to_string(path)?;
    info!(path = %path.display(), "loading stylesheet");
    Stylesheet::parse(&content)
}
