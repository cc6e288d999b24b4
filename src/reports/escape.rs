//! Escaping for Markdown output.
//!
//! Path templates, operation ids, parameter names and model names all come
//! from the compared documents and may contain characters that break table
//! rows or inject links. Everything taken from a document goes through one
//! of these helpers before it is embedded in a Markdown report.

/// Escape a string for a Markdown table cell.
///
/// ```
/// use oas_compare::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("a | b"), "a \\| b");
/// assert_eq!(escape_markdown_table("line1\nline2"), "line1 line2");
/// ```
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for a Markdown list item.
///
/// Newlines collapse to `; ` so one change stays one bullet.
pub fn escape_markdown_list(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' => result.push_str("\\*"),
            '_' => result.push_str("\\_"),
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\n' => result.push_str("; "),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Wrap a string in a code span, widening the fence when the text itself
/// contains backticks.
///
/// ```
/// use oas_compare::reports::escape::code_span;
///
/// assert_eq!(code_span("/users/{id}"), "`/users/{id}`");
/// assert_eq!(code_span("a`b"), "`` a`b ``");
/// ```
pub fn code_span(s: &str) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let longest_run = flat
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    if longest_run == 0 {
        return format!("`{}`", flat.replace('|', "\\|"));
    }
    let fence = "`".repeat(longest_run + 1);
    format!("{fence} {} {fence}", flat.replace('|', "\\|"))
}

/// Table-cell escape for optional values, `-` when absent.
pub fn escape_md_opt(s: Option<&str>) -> String {
    s.map_or_else(|| "-".to_string(), escape_markdown_table)
}
