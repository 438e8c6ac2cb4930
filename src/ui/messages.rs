//! 消息区
//!
//! 只追加的条目序列。追加后自动跟随到最新条目；
//! 向上滚动会脱离跟随，滚回底部后重新跟随。

use tracing::debug;

use super::actions::Scroll;
use crate::models::{DisplayFlags, Entry, EntryContent};

#[derive(Debug)]
pub struct MessageLog {
    entries: Vec<Entry>,
    defaults: DisplayFlags,
    offset: usize,
    follow: bool,
    /// 最近一次渲染得到的可视高度与最大偏移
    page: usize,
    max_offset: usize,
}

impl MessageLog {
    pub fn new(defaults: DisplayFlags) -> Self {
        Self {
            entries: Vec::new(),
            defaults,
            offset: 0,
            follow: true,
            page: 0,
            max_offset: 0,
        }
    }

    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.follow = true;
        debug!(count = self.entries.len(), "entry appended");
    }

    /// 以默认显示开关追加
    pub fn write(&mut self, content: impl Into<EntryContent>) {
        let entry = Entry::new(content, self.defaults);
        self.append(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.offset = 0;
        self.follow = true;
        self.max_offset = 0;
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn scroll(&mut self, scroll: Scroll) {
        let page = self.page.max(1);
        match scroll {
            Scroll::LineUp(n) => self.scroll_up(usize::from(n)),
            Scroll::LineDown(n) => self.scroll_down(usize::from(n)),
            Scroll::PageUp => self.scroll_up(page),
            Scroll::PageDown => self.scroll_down(page),
            Scroll::Top => {
                self.offset = 0;
                self.follow = self.max_offset == 0;
            }
            Scroll::Bottom => {
                self.offset = self.max_offset;
                self.follow = true;
            }
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        if self.follow {
            self.offset = self.max_offset;
        }
        self.offset = self.offset.saturating_sub(lines);
        self.follow = self.offset >= self.max_offset;
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset);
        if self.offset >= self.max_offset {
            self.follow = true;
        }
    }

    /// 根据内容总行数与可视高度确定本次渲染的首行
    pub fn viewport(&mut self, total_lines: usize, height: u16) -> usize {
        let height = usize::from(height);
        self.page = height;
        self.max_offset = total_lines.saturating_sub(height);
        if self.follow {
            self.offset = self.max_offset;
        } else {
            self.offset = self.offset.min(self.max_offset);
        }
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CodeBlock, Table};

    #[test]
    fn append_keeps_insertion_order() {
        let mut log = MessageLog::new(DisplayFlags::default());
        for i in 0..50 {
            log.write(format!("entry {i}"));
        }
        log.write(Table::new(["k", "v"]).row(["a", "1"]));
        log.append(Entry::new(CodeBlock::new("x = 1", "python"), DisplayFlags::literal()));
        // 重复内容不合并
        log.write("entry 0");

        assert_eq!(log.len(), 53);
        for (i, entry) in log.entries().iter().take(50).enumerate() {
            assert_eq!(entry.content(), &EntryContent::Text(format!("entry {i}")));
        }
        assert!(matches!(log.entries()[50].content(), EntryContent::Table(_)));
        assert!(matches!(log.entries()[51].content(), EntryContent::Code(_)));
        assert_eq!(log.entries()[52].content(), &EntryContent::Text("entry 0".into()));
    }

    #[test]
    fn write_uses_default_flags() {
        let mut log = MessageLog::new(DisplayFlags::default());
        log.write("x");
        log.append(Entry::new("y", DisplayFlags::literal()));
        assert!(log.entries()[0].flags().markup);
        assert!(!log.entries()[1].flags().markup);
    }

    #[test]
    fn viewport_follows_tail() {
        let mut log = MessageLog::new(DisplayFlags::default());
        assert_eq!(log.viewport(5, 10), 0);
        assert_eq!(log.viewport(30, 10), 20);
        assert_eq!(log.viewport(45, 10), 35);
    }

    #[test]
    fn scrolling_up_detaches_and_append_reattaches() {
        let mut log = MessageLog::new(DisplayFlags::default());
        log.viewport(30, 10);

        log.scroll(Scroll::PageUp);
        assert!(!log.is_following());
        assert_eq!(log.viewport(30, 10), 10);
        // 新内容到达时保持当前位置
        assert_eq!(log.viewport(40, 10), 10);

        log.write("new");
        assert!(log.is_following());
        assert_eq!(log.viewport(42, 10), 32);
    }

    #[test]
    fn scrolling_back_to_bottom_resumes_following() {
        let mut log = MessageLog::new(DisplayFlags::default());
        log.viewport(30, 10);
        log.scroll_up(3);
        assert!(!log.is_following());
        log.scroll_down(100);
        assert!(log.is_following());
        assert_eq!(log.viewport(30, 10), 20);

        log.scroll(Scroll::Top);
        assert_eq!(log.viewport(30, 10), 0);
        log.scroll(Scroll::Bottom);
        assert_eq!(log.viewport(31, 10), 21);
    }

    #[test]
    fn viewport_follows_tail_past_u16_range() {
        let mut log = MessageLog::new(DisplayFlags::default());
        assert_eq!(log.viewport(100_000, 18), 99_982);
        assert!(log.is_following());

        log.scroll_up(70_000);
        assert_eq!(log.viewport(100_000, 18), 29_982);
        log.scroll(Scroll::Bottom);
        assert_eq!(log.viewport(200_000, 18), 199_982);
    }

    #[test]
    fn clear_drops_entries() {
        let mut log = MessageLog::new(DisplayFlags::default());
        log.write("a");
        log.write("b");
        log.clear();
        assert!(log.is_empty());
        assert!(log.is_following());
    }
}
