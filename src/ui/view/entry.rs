//! 条目渲染
//!
//! 把一条 Entry 展开成若干行：文本按宽度折行，表格按列对齐，代码块逐行高亮

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::highlight::highlight_code;
use super::markup::{render_markup, render_plain};
use crate::models::{CodeBlock, Entry, EntryContent, Language, Table};

const TIME_FORMAT: &str = "%H:%M";

pub fn entry_lines(entry: &Entry, width: u16) -> Vec<Line<'static>> {
    match entry.content() {
        EntryContent::Text(text) => text_lines(entry, text, width),
        EntryContent::Table(table) => table_lines(table),
        EntryContent::Code(block) => code_lines(block),
    }
}

fn text_lines(entry: &Entry, text: &str, width: u16) -> Vec<Line<'static>> {
    let flags = entry.flags();
    let body = if flags.markup {
        render_markup(text, Style::default(), flags.highlight)
    } else {
        render_plain(text, Style::default(), flags.highlight)
    };

    // 第一行前加时间戳，后续行对齐
    let stamp = entry.created_at().format(TIME_FORMAT).to_string();
    let gutter = stamp.width() + 1;
    let available = usize::from(width).saturating_sub(gutter);

    let mut lines = Vec::new();
    for (i, line) in body.into_iter().enumerate() {
        for (j, mut wrapped) in wrap_line(line, available).into_iter().enumerate() {
            let prefix = if i == 0 && j == 0 {
                Span::styled(format!("{stamp} "), Style::default().add_modifier(Modifier::DIM))
            } else {
                Span::raw(" ".repeat(gutter))
            };
            wrapped.spans.insert(0, prefix);
            lines.push(wrapped);
        }
    }
    lines
}

fn table_lines(table: &Table) -> Vec<Line<'static>> {
    let columns = table.column_count();
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&table.headers).chain(table.rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let header_style = Style::default().add_modifier(Modifier::BOLD);
    let border_style = Style::default().add_modifier(Modifier::DIM);

    let mut lines = vec![table_row(&table.headers, &widths, header_style, border_style)];
    let separator: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    lines.push(Line::from(Span::styled(separator.join("─┼─"), border_style)));
    for row in &table.rows {
        lines.push(table_row(row, &widths, Style::default(), border_style));
    }
    lines
}

fn table_row(cells: &[String], widths: &[usize], style: Style, border: Style) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", border));
        }
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let pad = width.saturating_sub(cell.width());
        spans.push(Span::styled(format!("{cell}{}", " ".repeat(pad)), style));
    }
    Line::from(spans)
}

fn code_lines(block: &CodeBlock) -> Vec<Line<'static>> {
    let language = Language::from_tag(&block.language);
    highlight_code(&block.code, language, block.indent_guides)
}

/// 按显示宽度折行，保留各段样式
fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 || line.width() <= width {
        return vec![line];
    }

    let mut out = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for span in line.spans {
        let style = span.style;
        let mut chunk = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if used > 0 && used + w > width {
                if !chunk.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut chunk), style));
                }
                out.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            chunk.push(c);
            used += w;
        }
        if !chunk.is_empty() {
            current.push(Span::styled(chunk, style));
        }
    }
    if !current.is_empty() {
        out.push(Line::from(current));
    }
    out
}
