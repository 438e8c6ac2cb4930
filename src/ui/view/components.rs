//! 通用 UI 组件

use ratatui::{
    style::Modifier,
    text::Span,
    widgets::{Block, Borders},
};

use crate::style::SurfaceStyle;

/// 边框的强调程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Normal,
    Focused,
    Blurred,
}

/// [组件] 带标题和样式表配色的区域边框
pub fn surface_block(title: &str, style: SurfaceStyle, emphasis: Emphasis) -> Block<'static> {
    let border = match emphasis {
        Emphasis::Normal => style.border,
        Emphasis::Focused => style.border.add_modifier(Modifier::BOLD),
        Emphasis::Blurred => style.border.add_modifier(Modifier::DIM),
    };

    Block::default()
        .title(Span::styled(format!(" {title} "), style.title))
        .borders(Borders::ALL)
        .border_style(border)
        .style(style.text)
}
