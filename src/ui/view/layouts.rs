//! 布局计算

use std::rc::Rc;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::ui::layout::{LayoutNode, LayoutTree, Sizing};

/// 按布局树切分区域；`content_height` 用于随内容增高的区域（含边框）
pub fn split(area: Rect, tree: &LayoutTree, content_height: u16) -> Vec<(LayoutNode, Rect)> {
    let constraints: Vec<Constraint> = tree
        .nodes()
        .iter()
        .map(|node| match node.sizing {
            Sizing::Fixed(rows) => Constraint::Length(rows),
            Sizing::Fill => Constraint::Min(3),
            Sizing::Content => Constraint::Length(content_height),
        })
        .collect();

    let chunks: Rc<[Rect]> = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    tree.nodes()
        .iter()
        .copied()
        .zip(chunks.iter().copied())
        .collect()
}
