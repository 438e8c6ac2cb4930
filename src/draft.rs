//! 输入区的草稿缓冲
//!
//! 按行保存文本，光标以 (行, 字符列) 表示。换行时根据语言模式自动缩进

use crate::models::{Language, TabBehavior};

#[derive(Debug, Clone)]
pub struct Draft {
    lines: Vec<String>,
    row: usize,
    col: usize,
    language: Language,
    tab_behavior: TabBehavior,
    indent_width: usize,
}

/// 换行时对当前行的处理方式
#[derive(Debug, PartialEq)]
enum Continuation {
    /// 新行以该前缀开头
    Prefix(String),
    /// 整行只有列表标记：去掉标记，不换行
    ClearMarker(String),
}

impl Draft {
    pub fn new(language: Language, tab_behavior: TabBehavior, indent_width: usize) -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            language,
            tab_behavior,
            indent_width: indent_width.max(1),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// (行, 字符列)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    // ============ 编辑 ============

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.break_line(String::new());
            return;
        }
        let line = &mut self.lines[self.row];
        let at = byte_index(line, self.col);
        line.insert(at, c);
        self.col += 1;
    }

    /// 粘贴的文本原样插入，不做自动缩进
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\r') {
            self.insert_char(c);
        }
    }

    /// 按语言模式自动缩进的换行
    pub fn newline(&mut self) {
        let line = &self.lines[self.row];
        let (before, after) = line.split_at(byte_index(line, self.col));
        match self.continuation(before, after.trim().is_empty()) {
            Continuation::Prefix(prefix) => self.break_line(prefix),
            Continuation::ClearMarker(indent) => {
                let line = &mut self.lines[self.row];
                let split = byte_index(line, self.col);
                let rest = line.split_off(split);
                self.col = indent.chars().count();
                *line = indent + &rest;
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = byte_index(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            let previous = &mut self.lines[self.row];
            self.col = previous.chars().count();
            previous.push_str(&current);
        }
    }

    pub fn delete(&mut self) {
        let len = self.line_len(self.row);
        if self.col < len {
            let line = &mut self.lines[self.row];
            let at = byte_index(line, self.col);
            line.remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn indent(&mut self) {
        match self.tab_behavior {
            TabBehavior::Literal => self.insert_char('\t'),
            TabBehavior::Indent => {
                let width = self.indent_width - (self.col % self.indent_width);
                for _ in 0..width {
                    self.insert_char(' ');
                }
            }
        }
    }

    /// 去掉当前行开头的一级缩进
    pub fn dedent(&mut self) {
        let line = &mut self.lines[self.row];
        let removed = if line.starts_with('\t') {
            1
        } else {
            line.chars()
                .take(self.indent_width)
                .take_while(|c| *c == ' ')
                .count()
        };
        line.drain(..removed);
        self.col = self.col.saturating_sub(removed);
    }

    // ============ 光标移动 ============

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.line_len(self.row);
    }

    // ============ 内部 ============

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn break_line(&mut self, prefix: String) {
        let line = &mut self.lines[self.row];
        let split = byte_index(line, self.col);
        let rest = line.split_off(split);
        self.col = prefix.chars().count();
        self.row += 1;
        self.lines.insert(self.row, prefix + &rest);
    }

    fn indent_unit(&self) -> String {
        match self.tab_behavior {
            TabBehavior::Literal => "\t".to_string(),
            TabBehavior::Indent => " ".repeat(self.indent_width),
        }
    }

    /// `at_end` 表示光标之后没有可见内容
    fn continuation(&self, before: &str, at_end: bool) -> Continuation {
        let indent: String = before.chars().take_while(|c| c.is_whitespace()).collect();
        let body = &before[indent.len()..];

        match self.language {
            Language::Plain => Continuation::Prefix(indent),
            Language::Python if body.trim_end().ends_with(':') => {
                Continuation::Prefix(indent + &self.indent_unit())
            }
            Language::Rust if body.trim_end().ends_with('{') => {
                Continuation::Prefix(indent + &self.indent_unit())
            }
            Language::Python | Language::Rust => Continuation::Prefix(indent),
            Language::Markdown => match markdown_marker(body) {
                Some((_, rest)) if at_end && rest.trim().is_empty() => {
                    Continuation::ClearMarker(indent)
                }
                Some((marker, _)) => Continuation::Prefix(indent + &next_marker(&marker)),
                None => Continuation::Prefix(indent),
            },
        }
    }
}

/// 识别 Markdown 列表/引用标记，返回 (标记, 标记之后的内容)
fn markdown_marker(body: &str) -> Option<(String, &str)> {
    for bullet in ["- ", "* ", "+ ", "> "] {
        if let Some(rest) = body.strip_prefix(bullet) {
            return Some((bullet.to_string(), rest));
        }
    }
    if body == ">" {
        return Some(("> ".to_string(), ""));
    }

    let digits = body.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = body[digits..].strip_prefix(". ") {
            return Some((body[..digits + 2].to_string(), rest));
        }
    }
    None
}

/// 有序列表编号加一，其余标记原样延续
fn next_marker(marker: &str) -> String {
    match marker.strip_suffix(". ").and_then(|n| n.parse::<u64>().ok()) {
        Some(n) => match n.checked_add(1) {
            Some(next) => format!("{next}. "),
            None => marker.to_string(),
        },
        None => marker.to_string(),
    }
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}
