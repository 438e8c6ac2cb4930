//! 代码高亮
//!
//! 按行扫描的轻量词法着色：关键字、函数名、类型名、字符串、数字、注释。
//! 不跨行追踪状态，多行字符串只在起止同行时完整着色。

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::Language;

/// 缩进参考线的宽度
pub const GUIDE_WIDTH: usize = 4;

const GUIDE: &str = "│";

const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield", "True",
    "False", "None",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Keyword,
    Function,
    Type,
    Str,
    Number,
    Comment,
    Heading,
    Text,
}

fn token_style(token: Token) -> Style {
    match token {
        Token::Keyword => Style::default().fg(Color::Magenta),
        Token::Function => Style::default().fg(Color::Blue),
        Token::Type => Style::default().fg(Color::Yellow),
        Token::Str => Style::default().fg(Color::Green),
        Token::Number => Style::default().fg(Color::LightRed),
        Token::Comment => Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        Token::Heading => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        Token::Text => Style::default(),
    }
}

/// 扫描规则
struct Grammar<'a> {
    keywords: &'a [&'a str],
    comment: Option<&'a str>,
    quotes: &'a [char],
    /// 是否区分函数名和类型名
    classify: bool,
}

const PYTHON: Grammar<'static> = Grammar {
    keywords: PYTHON_KEYWORDS,
    comment: Some("#"),
    quotes: &['"', '\''],
    classify: true,
};

const RUST: Grammar<'static> = Grammar {
    keywords: RUST_KEYWORDS,
    comment: Some("//"),
    quotes: &['"'],
    classify: true,
};

const PROSE: Grammar<'static> = Grammar {
    keywords: &[],
    comment: None,
    quotes: &['"'],
    classify: false,
};

/// 高亮一段代码，每个源代码行对应一个 Line
pub fn highlight_code(code: &str, language: Language, indent_guides: bool) -> Vec<Line<'static>> {
    code.lines()
        .map(|line| {
            let mut spans = Vec::new();
            let body = if indent_guides {
                push_guides(&mut spans, line)
            } else {
                line
            };
            spans.extend(
                tokenize(body, language)
                    .into_iter()
                    .map(|(token, text)| Span::styled(text, token_style(token))),
            );
            Line::from(spans)
        })
        .collect()
}

/// 纯文本中的数字和双引号字符串着色
pub fn highlight_text(text: &str, base: Style) -> Vec<Span<'static>> {
    scan(text, &PROSE)
        .into_iter()
        .map(|(token, text)| match token {
            Token::Text => Span::styled(text, base),
            other => Span::styled(text, base.patch(token_style(other))),
        })
        .collect()
}

fn tokenize(line: &str, language: Language) -> Vec<(Token, String)> {
    match language {
        Language::Plain => vec![(Token::Text, line.to_string())],
        Language::Markdown => markdown_line(line),
        Language::Python => scan(line, &PYTHON),
        Language::Rust => scan(line, &RUST),
    }
}

/// 把前导空白替换成参考线，返回剩余部分
fn push_guides<'a>(spans: &mut Vec<Span<'static>>, line: &'a str) -> &'a str {
    let mut columns = 0;
    let mut bytes = 0;
    for c in line.chars() {
        match c {
            ' ' => columns += 1,
            '\t' => columns += GUIDE_WIDTH,
            _ => break,
        }
        bytes += c.len_utf8();
    }

    let guide_style = Style::default().add_modifier(Modifier::DIM);
    for _ in 0..columns / GUIDE_WIDTH {
        let guide = format!("{GUIDE}{}", " ".repeat(GUIDE_WIDTH - 1));
        spans.push(Span::styled(guide, guide_style));
    }
    if columns % GUIDE_WIDTH > 0 {
        spans.push(Span::raw(" ".repeat(columns % GUIDE_WIDTH)));
    }
    &line[bytes..]
}

fn markdown_line(line: &str) -> Vec<(Token, String)> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return vec![(Token::Heading, line.to_string())];
    }
    if trimmed.starts_with("```") || trimmed.starts_with('>') {
        return vec![(Token::Comment, line.to_string())];
    }

    let mut tokens = Vec::new();
    let indent = &line[..line.len() - trimmed.len()];
    let mut rest = trimmed;
    for bullet in ["- ", "* ", "+ "] {
        if let Some(after) = trimmed.strip_prefix(bullet) {
            push(&mut tokens, Token::Text, indent);
            push(&mut tokens, Token::Keyword, bullet);
            rest = after;
            break;
        }
    }
    if rest.len() == trimmed.len() {
        push(&mut tokens, Token::Text, indent);
    }

    // 行内 `code`
    let mut in_code = false;
    for (i, part) in rest.split('`').enumerate() {
        if i > 0 {
            push(&mut tokens, Token::Str, "`");
            in_code = !in_code;
        }
        let token = if in_code { Token::Str } else { Token::Text };
        push(&mut tokens, token, part);
    }
    tokens
}

fn scan(line: &str, grammar: &Grammar<'_>) -> Vec<(Token, String)> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens: Vec<(Token, String)> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(comment) = grammar.comment {
            if starts_with(&chars[i..], comment) {
                push(&mut tokens, Token::Comment, &collect(&chars[i..]));
                break;
            }
        }

        if grammar.quotes.contains(&c) {
            let end = string_end(&chars, i);
            push(&mut tokens, Token::Str, &collect(&chars[i..end]));
            i = end;
            continue;
        }

        if c.is_ascii_digit() {
            let end = run_end(&chars, i, |c| c.is_alphanumeric() || c == '_' || c == '.');
            push(&mut tokens, Token::Number, &collect(&chars[i..end]));
            i = end;
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let end = run_end(&chars, i, |c| c.is_alphanumeric() || c == '_');
            let word = collect(&chars[i..end]);
            let token = if grammar.keywords.contains(&word.as_str()) {
                Token::Keyword
            } else if grammar.classify && next_non_space(&chars, end) == Some('(') {
                Token::Function
            } else if grammar.classify && c.is_uppercase() {
                Token::Type
            } else {
                Token::Text
            };
            push(&mut tokens, token, &word);
            i = end;
            continue;
        }

        push(&mut tokens, Token::Text, &c.to_string());
        i += 1;
    }
    tokens
}

/// 相邻的同类词元合并成一个
fn push(tokens: &mut Vec<(Token, String)>, token: Token, text: &str) {
    if text.is_empty() {
        return;
    }
    match tokens.last_mut() {
        Some((last, buf)) if *last == token => buf.push_str(text),
        _ => tokens.push((token, text.to_string())),
    }
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

fn starts_with(chars: &[char], prefix: &str) -> bool {
    let mut it = chars.iter();
    prefix.chars().all(|p| it.next() == Some(&p))
}

fn run_end(chars: &[char], start: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = start;
    while end < chars.len() && pred(chars[end]) {
        end += 1;
    }
    end
}

fn next_non_space(chars: &[char], from: usize) -> Option<char> {
    chars[from..].iter().copied().find(|c| !c.is_whitespace())
}

/// 字符串结束位置（不含），支持三引号与反斜杠转义；未闭合时到行尾
fn string_end(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let triple: String = std::iter::repeat_n(quote, 3).collect();
    if starts_with(&chars[start..], &triple) {
        let mut j = start + 3;
        while j < chars.len() {
            if starts_with(&chars[j..], &triple) {
                return j + 3;
            }
            j += 1;
        }
        return chars.len();
    }

    let mut j = start + 1;
    while j < chars.len() {
        match chars[j] {
            '\\' => j += 2,
            c if c == quote => return j + 1,
            _ => j += 1,
        }
    }
    chars.len()
}
