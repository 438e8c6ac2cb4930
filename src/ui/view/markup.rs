//! 内嵌标记
//!
//! 支持 `[bold red]文字[/]`、`[on blue]`、`[/bold]` 这类写法。
//! 无法识别的标签和不成对的括号原样输出，`\[` 输出字面的 `[`。

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::highlight::highlight_text;

enum TagOp {
    Open(String, Style),
    /// `[/]` 关闭最内层
    CloseInnermost,
    /// `[/name]` 关闭到对应的开标签
    CloseAt(usize),
}

/// 解析带标记的文本；`highlight` 为 true 时未加标记的部分自动着色
pub fn render_markup(text: &str, base: Style, highlight: bool) -> Vec<Line<'static>> {
    let mut stack: Vec<(String, Style)> = Vec::new();
    text.split('\n')
        .map(|line| Line::from(parse_line(line, base, highlight, &mut stack)))
        .collect()
}

/// 不解释标记，按行输出
pub fn render_plain(text: &str, base: Style, highlight: bool) -> Vec<Line<'static>> {
    text.split('\n')
        .map(|line| {
            let mut spans = Vec::new();
            flush(&mut spans, line.to_string(), base, highlight);
            Line::from(spans)
        })
        .collect()
}

fn parse_line(
    line: &str,
    base: Style,
    highlight: bool,
    stack: &mut Vec<(String, Style)>,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut buf = String::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if c == '\\' && rest[1..].starts_with('[') {
            buf.push('[');
            rest = &rest[2..];
            continue;
        }
        if c == '[' {
            if let Some(close) = rest.find(']') {
                if let Some(op) = parse_tag(&rest[1..close], stack) {
                    let style = current_style(base, stack);
                    flush(&mut spans, std::mem::take(&mut buf), style, highlight && stack.is_empty());
                    match op {
                        TagOp::Open(name, style) => stack.push((name, style)),
                        TagOp::CloseInnermost => {
                            stack.pop();
                        }
                        TagOp::CloseAt(index) => stack.truncate(index),
                    }
                    rest = &rest[close + 1..];
                    continue;
                }
            }
        }
        buf.push(c);
        rest = &rest[c.len_utf8()..];
    }

    let style = current_style(base, stack);
    flush(&mut spans, buf, style, highlight && stack.is_empty());
    spans
}

fn flush(spans: &mut Vec<Span<'static>>, text: String, style: Style, highlight: bool) {
    if text.is_empty() {
        return;
    }
    if highlight {
        spans.extend(highlight_text(&text, style));
    } else {
        spans.push(Span::styled(text, style));
    }
}

fn current_style(base: Style, stack: &[(String, Style)]) -> Style {
    stack.iter().fold(base, |style, (_, layer)| style.patch(*layer))
}

fn parse_tag(tag: &str, stack: &[(String, Style)]) -> Option<TagOp> {
    let tag = tag.trim();
    if tag == "/" {
        return (!stack.is_empty()).then_some(TagOp::CloseInnermost);
    }
    if let Some(name) = tag.strip_prefix('/') {
        let name = name.trim();
        return stack
            .iter()
            .rposition(|(open, _)| open == name)
            .map(TagOp::CloseAt);
    }
    style_for(tag).map(|style| TagOp::Open(tag.to_string(), style))
}

fn style_for(tag: &str) -> Option<Style> {
    let mut words = tag.split_whitespace();
    let mut style = Style::default();
    let mut any = false;

    while let Some(word) = words.next() {
        style = match word.to_ascii_lowercase().as_str() {
            "bold" | "b" => style.add_modifier(Modifier::BOLD),
            "italic" | "i" => style.add_modifier(Modifier::ITALIC),
            "underline" | "u" => style.add_modifier(Modifier::UNDERLINED),
            "dim" => style.add_modifier(Modifier::DIM),
            "reverse" => style.add_modifier(Modifier::REVERSED),
            "strike" | "s" => style.add_modifier(Modifier::CROSSED_OUT),
            "on" => style.bg(color(words.next()?)?),
            other => style.fg(color(other)?),
        };
        any = true;
    }
    any.then_some(style)
}

/// 纯数字不当作颜色，避免把 `[1]` 这类脚注吃掉
fn color(word: &str) -> Option<Color> {
    if word.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    word.parse::<Color>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn tags_style_enclosed_text() {
        let lines = render_markup("a [bold red]b[/] c", Style::default(), false);
        assert_eq!(lines.len(), 1);
        assert_eq!(text_of(&lines[0]), "a b c");

        let bold = &lines[0].spans[1];
        assert_eq!(bold.content, "b");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(bold.style.fg, Some(Color::Red));
        assert_eq!(lines[0].spans[2].style, Style::default());
    }

    #[test]
    fn named_close_pops_to_matching_tag() {
        let lines = render_markup("[i]x[u]y[/i]z", Style::default(), false);
        let spans = &lines[0].spans;
        assert_eq!(text_of(&lines[0]), "xyz");
        assert!(spans[1].style.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(spans[2].style, Style::default());
    }

    #[test]
    fn background_and_styles_span_lines() {
        let lines = render_markup("[on blue]one\ntwo[/]", Style::default(), false);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[0].style.bg, Some(Color::Blue));
    }

    #[test]
    fn unknown_tags_and_footnotes_stay_literal() {
        let lines = render_markup("see [1] and [wobble] [/] \\[bold]", Style::default(), false);
        assert_eq!(text_of(&lines[0]), "see [1] and [wobble] [/] [bold]");
    }

    #[test]
    fn plain_rendering_ignores_markup() {
        let lines = render_plain("[bold]x[/]", Style::default(), false);
        assert_eq!(text_of(&lines[0]), "[bold]x[/]");
    }

    #[test]
    fn highlight_applies_outside_tags_only() {
        let lines = render_markup("7 [bold]8[/]", Style::default(), true);
        let spans = &lines[0].spans;
        assert_ne!(spans[0].style, Style::default());
        let eight = spans.iter().find(|s| s.content == "8").expect("eight");
        assert_eq!(eight.style.fg, None);
    }
}
