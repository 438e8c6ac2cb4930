//! 输入区
//!
//! 按键先经过这里拦截：提交键被消费并把草稿交给控制器，其余按键走默认编辑

use tracing::debug;

use super::actions::{Edit, FocusChange, InputEvent, Motion};
use super::layout::SurfaceId;
use super::router::{EventRouter, SubmitSink};
use crate::config::PromptConfig;
use crate::draft::Draft;

/// 按键处理状态，Submitting 只在一次提交的交接过程中出现
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Editing,
    Submitting,
}

/// 单个事件的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Edited,
    Submitted,
    /// 焦点变化等不修改草稿的事件
    Consumed,
}

#[derive(Debug)]
pub struct PromptInput {
    draft: Draft,
    state: PromptState,
    window_focused: bool,
    placeholder: String,
    max_height: u16,
}

impl PromptInput {
    pub fn new(config: &PromptConfig) -> Self {
        Self {
            draft: Draft::new(config.language, config.tab_behavior, config.indent_width),
            state: PromptState::Editing,
            window_focused: true,
            placeholder: config.placeholder.clone(),
            max_height: config.max_height,
        }
    }

    /// 挂载时主动获取焦点
    pub fn on_mount(&mut self, router: &mut EventRouter) -> bool {
        router.focus(SurfaceId::Prompt)
    }

    pub fn handle(&mut self, event: InputEvent, sink: &mut dyn SubmitSink) -> KeyOutcome {
        match event {
            // 交接过程中再次触发直接吞掉
            InputEvent::Trigger if self.state == PromptState::Submitting => KeyOutcome::Consumed,
            InputEvent::Trigger => {
                self.state = PromptState::Submitting;
                // 提交本身不清空草稿
                let text = self.draft.text();
                sink.submit(&text);
                self.state = PromptState::Editing;
                KeyOutcome::Submitted
            }
            InputEvent::Insert(c) => {
                self.draft.insert_char(c);
                KeyOutcome::Edited
            }
            // 粘贴不触发提交，也不做自动缩进
            InputEvent::Paste(text) => {
                self.draft.insert_str(&text);
                KeyOutcome::Edited
            }
            InputEvent::Edit(edit) => {
                match edit {
                    Edit::Newline => self.draft.newline(),
                    Edit::Backspace => self.draft.backspace(),
                    Edit::Delete => self.draft.delete(),
                    Edit::Indent => self.draft.indent(),
                    Edit::Dedent => self.draft.dedent(),
                }
                KeyOutcome::Edited
            }
            InputEvent::Navigate(motion) => {
                match motion {
                    Motion::Left => self.draft.move_left(),
                    Motion::Right => self.draft.move_right(),
                    Motion::Up => self.draft.move_up(),
                    Motion::Down => self.draft.move_down(),
                    Motion::Home => self.draft.move_home(),
                    Motion::End => self.draft.move_end(),
                }
                KeyOutcome::Edited
            }
            InputEvent::Focus(change) => {
                self.window_focused = change == FocusChange::Gained;
                debug!(focused = self.window_focused, "terminal focus changed");
                KeyOutcome::Consumed
            }
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    #[cfg(test)]
    pub fn state(&self) -> PromptState {
        self.state
    }

    pub fn is_window_focused(&self) -> bool {
        self.window_focused
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// 文本区高度（不含边框），随折行后的行数增长到上限为止
    pub fn height(&self, rows: usize) -> u16 {
        u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .clamp(1, self.max_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, TabBehavior};

    struct Recorder {
        drafts: Vec<String>,
    }

    impl SubmitSink for Recorder {
        fn submit(&mut self, draft: &str) {
            self.drafts.push(draft.to_string());
        }
    }

    fn prompt(max_height: u16) -> PromptInput {
        PromptInput::new(&PromptConfig {
            language: Language::Markdown,
            tab_behavior: TabBehavior::Indent,
            indent_width: 4,
            max_height,
            placeholder: "Send a message...".to_string(),
        })
    }

    fn type_str(prompt: &mut PromptInput, sink: &mut Recorder, text: &str) {
        for c in text.chars() {
            prompt.handle(InputEvent::Insert(c), sink);
        }
    }

    #[test]
    fn trigger_hands_over_draft_without_mutating_it() {
        let mut prompt = prompt(10);
        let mut sink = Recorder { drafts: Vec::new() };
        type_str(&mut prompt, &mut sink, "hello");

        let outcome = prompt.handle(InputEvent::Trigger, &mut sink);

        assert_eq!(outcome, KeyOutcome::Submitted);
        assert_eq!(sink.drafts, ["hello"]);
        assert_eq!(prompt.draft().text(), "hello");
        assert_eq!(prompt.draft().cursor(), (0, 5));
        assert_eq!(prompt.state(), PromptState::Editing);
    }

    #[test]
    fn trigger_never_inserts_into_draft() {
        let mut prompt = prompt(10);
        let mut sink = Recorder { drafts: Vec::new() };

        for _ in 0..3 {
            prompt.handle(InputEvent::Trigger, &mut sink);
        }
        assert!(prompt.draft().is_empty());
        assert_eq!(sink.drafts, ["", "", ""]);

        type_str(&mut prompt, &mut sink, "ab");
        prompt.handle(InputEvent::Trigger, &mut sink);
        assert_eq!(prompt.draft().lines(), ["ab"]);
    }

    #[test]
    fn edits_follow_draft_language_rules() {
        let mut prompt = prompt(10);
        let mut sink = Recorder { drafts: Vec::new() };
        type_str(&mut prompt, &mut sink, "- a");
        prompt.handle(InputEvent::Edit(Edit::Newline), &mut sink);
        type_str(&mut prompt, &mut sink, "b");
        assert_eq!(prompt.draft().text(), "- a\n- b");
        assert!(sink.drafts.is_empty());
    }

    #[test]
    fn focus_events_toggle_window_focus_only() {
        let mut prompt = prompt(10);
        let mut sink = Recorder { drafts: Vec::new() };

        let outcome = prompt.handle(InputEvent::Focus(FocusChange::Lost), &mut sink);
        assert_eq!(outcome, KeyOutcome::Consumed);
        assert!(!prompt.is_window_focused());
        assert!(prompt.draft().is_empty());

        prompt.handle(InputEvent::Focus(FocusChange::Gained), &mut sink);
        assert!(prompt.is_window_focused());
    }

    #[test]
    fn height_grows_with_rows_up_to_limit() {
        let prompt = prompt(3);
        assert_eq!(prompt.height(0), 1);
        assert_eq!(prompt.height(1), 1);
        assert_eq!(prompt.height(2), 2);
        assert_eq!(prompt.height(6), 3);
    }

    #[test]
    fn paste_inserts_text_verbatim() {
        let mut prompt = prompt(10);
        let mut sink = Recorder { drafts: Vec::new() };

        let outcome = prompt.handle(InputEvent::Paste("- a\r\n- b".to_string()), &mut sink);

        assert_eq!(outcome, KeyOutcome::Edited);
        assert_eq!(prompt.draft().text(), "- a\n- b");
        assert!(sink.drafts.is_empty());
    }
}
