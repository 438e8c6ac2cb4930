//! App 状态定义 (Model)
//!
//! App 即应用控制器：持有布局树和各区域的句柄，负责挂载与启动时的一次性动作

use tracing::info;

use super::layout::{LayoutNode, LayoutTree, Sizing, SurfaceId};
use super::messages::MessageLog;
use super::prompt::PromptInput;
use super::router::{EventRouter, SubmitSink};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{CodeBlock, DisplayFlags, Entry};
use crate::style::Stylesheet;

/// 启动时展示的示例代码
pub const SAMPLE_CODE: &str = r#"def loop_first_last(values: Iterable[T]) -> Iterable[tuple[bool, bool, T]]:
    """Iterate and generate a tuple with a flag for first and last value."""
    iter_values = iter(values)
    try:
        previous_value = next(iter_values)
    except StopIteration:
        return
    first = True
    for value in iter_values:
        yield first, False, previous_value
        first = False
        previous_value = value
    yield first, True, previous_value"#;

pub const SAMPLE_LANGUAGE: &str = "python";

/// 生命周期：组合 -> 挂载 -> 就绪
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Composed,
    Mounted,
    Ready,
}

/// 提交内容的接收端。后续的处理流程尚未实现，这里只接受并记录
#[derive(Debug, Default)]
pub struct Submissions {
    last: Option<String>,
    count: usize,
}

impl Submissions {
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl SubmitSink for Submissions {
    fn submit(&mut self, draft: &str) {
        self.count += 1;
        self.last = Some(draft.to_string());
        info!(
            chars = draft.chars().count(),
            total = self.count,
            "submission accepted, no handler attached"
        );
    }
}

/// 应用状态
pub struct App {
    pub config: Config,
    pub stylesheet: Stylesheet,
    pub layout: LayoutTree,
    pub messages: MessageLog,
    pub prompt: PromptInput,
    pub router: EventRouter,
    pub submissions: Submissions,
    pub cwd: String,
    lifecycle: Lifecycle,
}

impl App {
    /// 创建新的应用实例，布局在这里组合且只组合一次
    pub fn new(config: Config, stylesheet: Stylesheet, cwd: String) -> Self {
        let layout = Self::compose();
        let prompt = PromptInput::new(&config.prompt);
        Self {
            config,
            stylesheet,
            layout,
            messages: MessageLog::new(DisplayFlags::default()),
            prompt,
            router: EventRouter::new(),
            submissions: Submissions::default(),
            cwd,
            lifecycle: Lifecycle::Composed,
        }
    }

    /// 固定布局：标题栏、可滚动的消息区、输入区、状态栏
    pub fn compose() -> LayoutTree {
        LayoutTree::new(vec![
            LayoutNode {
                id: SurfaceId::Header,
                sizing: Sizing::Fixed(1),
                scrollable: false,
            },
            LayoutNode {
                id: SurfaceId::Messages,
                sizing: Sizing::Fill,
                scrollable: true,
            },
            LayoutNode {
                id: SurfaceId::Prompt,
                sizing: Sizing::Content,
                scrollable: false,
            },
            LayoutNode {
                id: SurfaceId::Status,
                sizing: Sizing::Fixed(1),
                scrollable: false,
            },
        ])
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// 按布局顺序挂载各区域，完成后触发 on_ready
    pub fn mount(&mut self) -> Result<()> {
        if self.lifecycle != Lifecycle::Composed {
            return Err(Error::Mount("layout already mounted".to_string()));
        }
        for required in [SurfaceId::Messages, SurfaceId::Prompt] {
            if !self.layout.contains(required) {
                return Err(Error::Mount(format!("missing surface {}", required.name())));
            }
        }

        for node in self.layout.nodes() {
            if node.id == SurfaceId::Prompt && !self.prompt.on_mount(&mut self.router) {
                return Err(Error::Mount("prompt could not take focus".to_string()));
            }
        }

        self.lifecycle = Lifecycle::Mounted;
        info!(
            surfaces = self.layout.nodes().len(),
            focused = ?self.router.focused().map(|id| id.name()),
            "layout mounted"
        );
        self.on_ready();
        Ok(())
    }

    /// 挂载完成后只执行一次
    pub fn on_ready(&mut self) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }
        let sample = CodeBlock::new(SAMPLE_CODE, SAMPLE_LANGUAGE).with_indent_guides(true);
        self.messages.append(Entry::new(sample, DisplayFlags::default()));
        self.lifecycle = Lifecycle::Ready;
        info!("ready");
    }
}
