//! Heuristics deciding which translation context a step text needs.

use std::sync::LazyLock;

use regex::Regex;

/// Element names understood by the rich text engine of the tutorial runtime.
const HTML_ELEMENTS: &[&str] = &[
    "a", "address", "b", "big", "blockquote", "body", "br", "caption", "center", "cite", "code",
    "dd", "dfn", "div", "dl", "dt", "em", "font", "h1", "h2", "h3", "h4", "h5", "h6", "head", "hr",
    "html", "i", "img", "kbd", "li", "link", "meta", "nobr", "ol", "p", "pre", "qt", "s", "samp",
    "small", "span", "strong", "style", "sub", "sup", "table", "tbody", "td", "tfoot", "th",
    "thead", "title", "tr", "tt", "u", "ul", "var",
];

/// Tags of the KDE semantic markup for `@info` messages.
const SEMANTIC_TAGS: &[&str] = &[
    "application",
    "bcode",
    "command",
    "email",
    "emphasis",
    "envar",
    "filename",
    "icode",
    "interface",
    "link",
    "message",
    "nl",
    "numid",
    "placeholder",
    "resource",
    "shortcut",
    "para",
    "title",
    "subtitle",
    "list",
    "item",
    "note",
    "warning",
];

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\s*(\w+)[^>]*>").expect("Invalid tag regex"));

/// Guess whether `text` is rich text.
///
/// Only the first tag of the first line is inspected: the text is rich when
/// that tag names a known HTML element. A leading `<!doctype` or an `&lt;`
/// before the first tag also count as rich text.
pub fn might_be_rich_text(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    if len == 0 {
        return false;
    }

    let mut start = skip_whitespace(&chars, 0);
    if starts_with_at(&chars, start, "<?xml") {
        while start < len {
            if chars[start] == '?' && start + 2 < len && chars[start + 1] == '>' {
                start += 2;
                break;
            }
            start += 1;
        }
        start = skip_whitespace(&chars, start);
    }

    let prefix: String = chars[start..].iter().take(5).collect();
    if prefix.to_lowercase() == "<!doc" {
        return true;
    }

    let mut open = start;
    while open < len && chars[open] != '<' && chars[open] != '\n' {
        if chars[open] == '&' && starts_with_at(&chars, open + 1, "lt;") {
            return true;
        }
        open += 1;
    }
    if open >= len || chars[open] != '<' {
        return false;
    }
    let Some(close) = chars[open..].iter().position(|&c| c == '>') else {
        return false;
    };
    let close = open + close;

    let mut tag = String::new();
    for (i, &c) in chars.iter().enumerate().take(close).skip(open + 1) {
        if c.is_alphanumeric() {
            tag.push(c);
        } else if !tag.is_empty() && c.is_whitespace() {
            break;
        } else if !tag.is_empty() && c == '/' && i + 1 == close {
            break;
        } else if !c.is_whitespace() && (!tag.is_empty() || c != '!') {
            return false;
        }
    }
    HTML_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Whether any tag in `text` is a semantic markup tag.
pub fn might_contain_semantic_markup(text: &str) -> bool {
    TAG_REGEX.captures_iter(text).any(|captures| {
        let name = captures[1].to_lowercase();
        SEMANTIC_TAGS.contains(&name.as_str())
    })
}

fn skip_whitespace(chars: &[char], mut index: usize) -> usize {
    while index < chars.len() && chars[index].is_whitespace() {
        index += 1;
    }
    index
}

fn starts_with_at(chars: &[char], at: usize, pattern: &str) -> bool {
    pattern
        .chars()
        .enumerate()
        .all(|(offset, expected)| chars.get(at + offset) == Some(&expected))
}
