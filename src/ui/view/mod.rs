//! 视图层模块
//!
//! 包含主渲染入口和各区域的渲染函数

pub mod components;
pub mod entry;
pub mod highlight;
pub mod layouts;
pub mod markup;

use std::mem;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::layout::SurfaceId;
use super::state::App;
use crate::draft::Draft;
use components::{Emphasis, surface_block};
use entry::entry_lines;
use layouts::split;

const APP_TITLE: &str = "aitetsu";
const PROMPT_PREFIX: &str = "│ ";
const TAB_WIDTH: usize = 4;

/// 草稿按输入区宽度折行后的可视行，光标为 (可视行, 显示列)
#[derive(Debug, PartialEq)]
struct PromptRows {
    rows: Vec<String>,
    cursor: (usize, usize),
}

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    // 去掉左右边框和行首前缀后的文本宽度
    let text_width = usize::from(frame.area().width.saturating_sub(2))
        .saturating_sub(PROMPT_PREFIX.width());
    let prompt = wrap_draft(app.prompt.draft(), text_width);
    let prompt_height = app.prompt.height(prompt.rows.len()) + 2;

    for (node, area) in split(frame.area(), &app.layout, prompt_height) {
        match node.id {
            SurfaceId::Header => render_header(frame, app, area),
            SurfaceId::Messages => render_messages(frame, app, area, node.scrollable),
            SurfaceId::Prompt => render_prompt(frame, app, area, &prompt),
            SurfaceId::Status => render_status(frame, app, area),
        }
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let style = app.stylesheet.get(SurfaceId::Header);
    let title = Line::from(Span::styled(
        APP_TITLE,
        style.title.add_modifier(Modifier::BOLD),
    ));
    let cwd = Line::from(Span::styled(app.cwd.clone(), style.text)).right_aligned();

    let title_width = u16::try_from(APP_TITLE.width()).unwrap_or(0);
    let [left, right] =
        Layout::horizontal([Constraint::Length(title_width), Constraint::Min(0)]).areas(area);
    frame.render_widget(Paragraph::new(title), left);
    frame.render_widget(Paragraph::new(cwd), right);
}

fn render_messages(frame: &mut Frame, app: &mut App, area: Rect, scrollable: bool) {
    let style = app.stylesheet.get(SurfaceId::Messages);
    let block = surface_block(SurfaceId::Messages.name(), style, Emphasis::Normal);
    let inner = block.inner(area);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for (i, entry) in app.messages.entries().iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(entry_lines(entry, inner.width));
    }

    // 只把可见的行交给 Paragraph
    let offset = if scrollable {
        app.messages.viewport(lines.len(), inner.height)
    } else {
        0
    };
    let visible: Vec<Line<'static>> = lines
        .into_iter()
        .skip(offset)
        .take(usize::from(inner.height))
        .collect();
    frame.render_widget(Paragraph::new(visible).block(block), area);
}

fn render_prompt(frame: &mut Frame, app: &App, area: Rect, prompt: &PromptRows) {
    let style = app.stylesheet.get(SurfaceId::Prompt);
    let focused = app.router.is_focused(SurfaceId::Prompt);
    let emphasis = if focused && app.prompt.is_window_focused() {
        Emphasis::Focused
    } else {
        Emphasis::Blurred
    };
    let title = format!(
        "{} · {}",
        SurfaceId::Prompt.name(),
        app.prompt.draft().language().tag()
    );
    let block = surface_block(&title, style, emphasis);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (row, col) = prompt.cursor;
    let height = usize::from(inner.height.max(1));
    // 光标行保持可见
    let scroll = row.saturating_sub(height - 1);
    let prefix = Span::styled(PROMPT_PREFIX, style.title);

    let lines: Vec<Line> = if app.prompt.draft().is_empty() {
        let hint = Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC);
        vec![Line::from(vec![
            prefix,
            Span::styled(app.prompt.placeholder().to_string(), hint),
        ])]
    } else {
        prompt
            .rows
            .iter()
            .skip(scroll)
            .take(height)
            .map(|text| Line::from(vec![prefix.clone(), Span::raw(text.clone())]))
            .collect()
    };
    frame.render_widget(Paragraph::new(lines), inner);

    if focused && inner.width > 0 && inner.height > 0 {
        let x = PROMPT_PREFIX.width() + col;
        let x = inner.x + u16::try_from(x).unwrap_or(u16::MAX).min(inner.width - 1);
        let y = inner.y + u16::try_from(row - scroll).unwrap_or(0);
        frame.set_cursor_position(Position::new(x, y));
    }
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let style = app.stylesheet.get(SurfaceId::Status);
    let keymap = &app.config.keymap;
    let newline = keymap
        .newline
        .first()
        .map(|chord| format!("  [{chord}] newline"))
        .unwrap_or_default();
    let help_text = format!(
        "[{}] send{newline}  [PgUp/PgDn] scroll  [ctrl+l] clear  [{}] quit",
        keymap.submit, keymap.quit
    );

    let text = match app.submissions.last() {
        Some(last) => format!(
            "{help_text}  |  {} submitted, last {} chars",
            app.submissions.count(),
            last.chars().count()
        ),
        None => help_text,
    };

    frame.render_widget(Paragraph::new(text).style(style.text), area);
}

/// 按显示宽度软折行，Tab 展开为空格
fn wrap_draft(draft: &Draft, width: usize) -> PromptRows {
    let width = width.max(1);
    let (cursor_row, cursor_col) = draft.cursor();
    let mut rows = Vec::new();
    let mut cursor = (0, 0);

    for (i, line) in draft.lines().iter().enumerate() {
        let mut current = String::new();
        let mut used = 0;
        for (j, c) in line.chars().enumerate() {
            let (text, w) = if c == '\t' {
                (" ".repeat(TAB_WIDTH), TAB_WIDTH)
            } else {
                (c.to_string(), c.width().unwrap_or(0))
            };
            if used > 0 && used + w > width {
                rows.push(mem::take(&mut current));
                used = 0;
            }
            if i == cursor_row && j == cursor_col {
                cursor = (rows.len(), used);
            }
            current.push_str(&text);
            used += w;
        }
        if i == cursor_row && cursor_col >= line.chars().count() {
            // 行尾光标需要一个空位
            if used >= width {
                rows.push(mem::take(&mut current));
                used = 0;
            }
            cursor = (rows.len(), used);
        }
        rows.push(current);
    }

    PromptRows { rows, cursor }
}
