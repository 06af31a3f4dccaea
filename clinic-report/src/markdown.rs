//! Plain-text rendering of assistant answers.

use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    fence: Regex,
    rule: Regex,
    heading: Regex,
    bullet: Regex,
    bold_stars: Regex,
    bold_underscores: Regex,
    italic: Regex,
    link: Regex,
    code: Regex,
    blank_lines: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        fence: compile(r"(?m)^[ \t]*```[^\n]*$\n?"),
        rule: compile(r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*$"),
        heading: compile(r"(?m)^[ \t]{0,3}#{1,6}[ \t]+"),
        bullet: compile(r"(?m)^([ \t]*)[-*+][ \t]+"),
        bold_stars: compile(r"\*\*(.+?)\*\*"),
        bold_underscores: compile(r"__(.+?)__"),
        italic: compile(r"(^|[^*\w])\*([^*\s](?:[^*\n]*[^*\s])?)\*"),
        link: compile(r"\[([^\]]+)\]\([^)]*\)"),
        code: compile(r"`([^`]+)`"),
        blank_lines: compile(r"\n{3,}"),
    })
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("markdown pattern is valid")
}

/// Strip markdown syntax from `text`, keeping its words.
pub fn strip_markdown(text: &str) -> String {
    let p = patterns();
    let text = text.replace("\r\n", "\n");

    let text = p.fence.replace_all(&text, "");
    let text = p.rule.replace_all(&text, "");
    let text = p.heading.replace_all(&text, "");
    let text = p.bullet.replace_all(&text, "${1}• ");
    let text = p.bold_stars.replace_all(&text, "$1");
    let text = p.bold_underscores.replace_all(&text, "$1");
    let text = p.italic.replace_all(&text, "${1}${2}");
    let text = p.link.replace_all(&text, "$1");
    let text = p.code.replace_all(&text, "$1");
    let text = p.blank_lines.replace_all(&text, "\n\n");

    text.trim().to_string()
}
