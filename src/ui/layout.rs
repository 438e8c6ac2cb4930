//! 布局树
//!
//! 启动时由 `App::compose` 生成一次，之后不再增删区域

/// 界面区域标识，与样式表中的表名一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    Header,
    Messages,
    Prompt,
    Status,
}

impl SurfaceId {
    pub const ALL: [SurfaceId; 4] = [
        SurfaceId::Header,
        SurfaceId::Messages,
        SurfaceId::Prompt,
        SurfaceId::Status,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SurfaceId::Header => "header",
            SurfaceId::Messages => "messages",
            SurfaceId::Prompt => "prompt",
            SurfaceId::Status => "status",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    /// 只有输入区可以获得键盘焦点
    pub fn is_focusable(&self) -> bool {
        matches!(self, SurfaceId::Prompt)
    }
}

/// 区域在垂直方向上的尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// 固定行数
    Fixed(u16),
    /// 占满剩余空间
    Fill,
    /// 随内容增高（含边框）
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutNode {
    pub id: SurfaceId,
    pub sizing: Sizing,
    /// 是否包在可滚动容器里
    pub scrollable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
}

impl LayoutTree {
    pub fn new(nodes: Vec<LayoutNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_names_round_trip() {
        for id in SurfaceId::ALL {
            assert_eq!(SurfaceId::from_name(id.name()), Some(id));
        }
        assert_eq!(SurfaceId::from_name("sidebar"), None);
    }

    #[test]
    fn only_prompt_is_focusable() {
        let focusable: Vec<_> = SurfaceId::ALL
            .into_iter()
            .filter(SurfaceId::is_focusable)
            .collect();
        assert_eq!(focusable, [SurfaceId::Prompt]);
    }
}
