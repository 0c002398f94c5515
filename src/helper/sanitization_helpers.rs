use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

const RICH_TEXT_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "b", "strong", "i", "em", "p", "br", "a", "ul", "ol", "li",
    "blockquote", "code", "pre", "hr", "img", "table", "thead", "tbody", "tr", "th", "td", "s", "del", "div",
    "span",
];

const RICH_TEXT_ATTRIBUTES: &[&str] = &["src", "href", "alt", "title", "class", "width", "height", "align"];

fn slug_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("slug separator pattern compiles"))
}

fn slug_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug shape pattern compiles"))
}

/// Cleans rich-text HTML for content and news bodies.
/// Keeps a formatting whitelist and removes every scripting vector.
pub fn sanitize_rich_content(html: &str) -> String {
    ammonia::Builder::new()
        .tags(RICH_TEXT_TAGS.iter().copied().collect::<HashSet<_>>())
        .generic_attributes(RICH_TEXT_ATTRIBUTES.iter().copied().collect::<HashSet<_>>())
        .link_rel(Some("nofollow ugc"))
        .clean(html)
        .to_string()
}

/// Strips all HTML tags from input (for titles/summaries). The result is
/// still HTML-escaped text.
pub fn strip_all_html(input: &str) -> String {
    ammonia::Builder::new().tags(HashSet::new()).clean(input).to_string()
}

/// Tag-free, entity-decoded text of an HTML fragment.
pub fn plain_text(html: &str) -> String {
    let stripped = strip_all_html(html);
    html_escape::decode_html_entities(&stripped).trim().to_string()
}

/// The first `max_chars` characters of the plain text, with an ellipsis when cut.
pub fn excerpt(html: &str, max_chars: usize) -> String {
    let text = plain_text(html);
    if text.chars().count() <= max_chars {
        return text;
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

/// URL-safe slug from ASCII letters and digits. Titles written entirely in
/// other scripts produce an empty slug and need one supplied by hand.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_ascii_lowercase();
    slug_separator().replace_all(&lowered, "-").trim_matches('-').to_string()
}

pub fn is_valid_slug(slug: &str) -> bool {
    slug_shape().is_match(slug)
}
