use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// 输入区的语言模式，决定换行时的自动缩进规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Plain,
    #[default]
    Markdown,
    Python,
    Rust,
}

impl Language {
    /// 代码块的语言标记，未知的标记按纯文本处理
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Language::Markdown,
            "python" | "py" => Language::Python,
            "rust" | "rs" => Language::Rust,
            _ => Language::Plain,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::Plain => "text",
            Language::Markdown => "markdown",
            Language::Python => "python",
            Language::Rust => "rust",
        }
    }
}

/// Tab 键行为
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TabBehavior {
    /// 插入空格直到下一个缩进位
    #[default]
    Indent,
    /// 插入字面的 '\t'
    Literal,
}

/// 条目的显示开关
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    /// 解释 `[bold red]...[/]` 这类内嵌标记
    pub markup: bool,
    /// 纯文本中的数字和引号字符串自动着色
    pub highlight: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            markup: true,
            highlight: true,
        }
    }
}

impl DisplayFlags {
    pub fn literal() -> Self {
        Self {
            markup: false,
            highlight: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// 列数取表头与最长一行中的较大者
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub code: String,
    pub language: String,
    pub indent_guides: bool,
}

impl CodeBlock {
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            indent_guides: false,
        }
    }

    pub fn with_indent_guides(mut self, enabled: bool) -> Self {
        self.indent_guides = enabled;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryContent {
    Text(String),
    Table(Table),
    Code(CodeBlock),
}

impl From<&str> for EntryContent {
    fn from(text: &str) -> Self {
        EntryContent::Text(text.to_string())
    }
}

impl From<String> for EntryContent {
    fn from(text: String) -> Self {
        EntryContent::Text(text)
    }
}

impl From<Table> for EntryContent {
    fn from(table: Table) -> Self {
        EntryContent::Table(table)
    }
}

impl From<CodeBlock> for EntryContent {
    fn from(block: CodeBlock) -> Self {
        EntryContent::Code(block)
    }
}

/// 消息区中的一条记录，追加后不可修改
#[derive(Debug, Clone)]
pub struct Entry {
    content: EntryContent,
    flags: DisplayFlags,
    created_at: DateTime<Local>,
}

impl Entry {
    pub fn new(content: impl Into<EntryContent>, flags: DisplayFlags) -> Self {
        Self {
            content: content.into(),
            flags,
            created_at: Local::now(),
        }
    }

    pub fn content(&self) -> &EntryContent {
        &self.content
    }

    pub fn flags(&self) -> DisplayFlags {
        self.flags
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_tag_falls_back_to_plain() {
        assert_eq!(Language::from_tag("Python"), Language::Python);
        assert_eq!(Language::from_tag("rs"), Language::Rust);
        assert_eq!(Language::from_tag("md"), Language::Markdown);
        assert_eq!(Language::from_tag("cobol"), Language::Plain);
    }

    #[test]
    fn table_column_count_uses_widest_row() {
        let table = Table::new(["name", "value"])
            .row(["a", "1"])
            .row(["b", "2", "extra"]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn entry_keeps_content_and_flags() {
        let entry = Entry::new("hello", DisplayFlags::literal());
        assert_eq!(entry.content(), &EntryContent::Text("hello".to_string()));
        assert!(!entry.flags().markup);
        assert!(entry.created_at() <= Local::now());
    }
}
