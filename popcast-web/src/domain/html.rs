use chrono::{DateTime, Utc};

pub(crate) const META_DESCRIPTION_LEN: usize = 155;
pub(crate) const EXCERPT_LEN: usize = 150;

/// Removes everything between `<` and the next `>`.
pub(crate) fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True for editor output with no visible text, e.g. `<p>&nbsp;</p>`.
pub(crate) fn is_blank_html(html: &str) -> bool {
    strip_tags(html).replace("&nbsp;", " ").trim().is_empty()
}

/// Plain-text description cut at the last space before `max_chars`, with `...` appended.
pub(crate) fn meta_description(html: &str, max_chars: usize) -> String {
    let text = collapse_whitespace(&strip_tags(html));
    if text.chars().count() <= max_chars {
        return text;
    }

    let truncated: String = text.chars().take(max_chars).collect();
    let cut = truncated.rfind(' ').unwrap_or(truncated.len());
    format!("{}...", truncated[..cut].trim_end())
}

/// Card preview: tag-stripped content cut to `max_chars`.
pub(crate) fn excerpt(html: &str, max_chars: usize) -> String {
    let text = collapse_whitespace(&strip_tags(html).replace("&nbsp;", " "));
    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// `DD/MM/YYYY`, empty when unknown.
pub(crate) fn display_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}
