//! 事件路由
//!
//! 每个输入事件只投递一次，且只投递给当前获得焦点的区域。
//! 没有区域获得焦点时事件被静默丢弃。

use tracing::{debug, trace};

use super::actions::InputEvent;
use super::layout::SurfaceId;
use super::prompt::{KeyOutcome, PromptInput};

/// 接收提交内容的一方（应用控制器），构造时显式传入而不是全局查找
pub trait SubmitSink {
    fn submit(&mut self, draft: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Delivered(KeyOutcome),
    Dropped,
}

#[derive(Debug, Default)]
pub struct EventRouter {
    focused: Option<SurfaceId>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<SurfaceId> {
        self.focused
    }

    pub fn is_focused(&self, id: SurfaceId) -> bool {
        self.focused == Some(id)
    }

    /// 请求焦点，不可聚焦的区域返回 false 且焦点不变
    pub fn focus(&mut self, id: SurfaceId) -> bool {
        if !id.is_focusable() {
            debug!(surface = id.name(), "refusing focus for non-focusable surface");
            return false;
        }
        if self.focused != Some(id) {
            debug!(from = ?self.focused.map(|f| f.name()), to = id.name(), "focus moved");
            self.focused = Some(id);
        }
        true
    }

    pub fn route(
        &mut self,
        event: InputEvent,
        prompt: &mut PromptInput,
        sink: &mut dyn SubmitSink,
    ) -> Routed {
        match self.focused {
            Some(SurfaceId::Prompt) => Routed::Delivered(prompt.handle(event, sink)),
            Some(other) => {
                trace!(surface = other.name(), ?event, "focused surface takes no input");
                Routed::Dropped
            }
            None => {
                trace!(?event, "no focused surface, event dropped");
                Routed::Dropped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PromptConfig;
    use crate::models::{Language, TabBehavior};

    #[derive(Default)]
    struct Recorder {
        drafts: Vec<String>,
    }

    impl SubmitSink for Recorder {
        fn submit(&mut self, draft: &str) {
            self.drafts.push(draft.to_string());
        }
    }

    fn prompt() -> PromptInput {
        PromptInput::new(&PromptConfig {
            language: Language::Plain,
            tab_behavior: TabBehavior::Indent,
            indent_width: 4,
            max_height: 10,
            placeholder: String::new(),
        })
    }

    #[test]
    fn unfocused_events_are_dropped() {
        let mut router = EventRouter::new();
        let mut prompt = prompt();
        let mut sink = Recorder::default();

        let routed = router.route(InputEvent::Insert('a'), &mut prompt, &mut sink);
        assert_eq!(routed, Routed::Dropped);
        assert!(prompt.draft().is_empty());

        let routed = router.route(InputEvent::Trigger, &mut prompt, &mut sink);
        assert_eq!(routed, Routed::Dropped);
        assert!(sink.drafts.is_empty());
    }

    #[test]
    fn messages_surface_never_takes_focus() {
        let mut router = EventRouter::new();
        assert!(!router.focus(SurfaceId::Messages));
        assert_eq!(router.focused(), None);

        assert!(router.focus(SurfaceId::Prompt));
        assert!(!router.focus(SurfaceId::Messages));
        assert!(router.is_focused(SurfaceId::Prompt));
    }

    #[test]
    fn focused_prompt_receives_each_event_once() {
        let mut router = EventRouter::new();
        let mut prompt = prompt();
        let mut sink = Recorder::default();
        assert!(prompt.on_mount(&mut router));

        for c in "abc".chars() {
            router.route(InputEvent::Insert(c), &mut prompt, &mut sink);
        }
        assert_eq!(prompt.draft().text(), "abc");

        let routed = router.route(InputEvent::Trigger, &mut prompt, &mut sink);
        assert_eq!(routed, Routed::Delivered(KeyOutcome::Submitted));
        assert_eq!(sink.drafts, ["abc"]);
    }
}
