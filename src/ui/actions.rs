//! Action 枚举定义 (Intent)
//!
//! 终端事件在入口处一次性转换成封闭的枚举，后续处理只按标签分支

/// 应用级操作
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Scroll(Scroll),
    /// 清空消息区
    ClearMessages,
    /// 交给路由器投递到获得焦点的区域
    Route(InputEvent),
}

/// 消息区滚动
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    LineUp(u16),
    LineDown(u16),
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// 投递给输入区的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Insert(char),
    /// 括号粘贴的整段文本
    Paste(String),
    Edit(Edit),
    Navigate(Motion),
    /// 提交键
    Trigger,
    Focus(FocusChange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Newline,
    Backspace,
    Delete,
    Indent,
    Dedent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// 终端窗口焦点变化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    Gained,
    Lost,
}
