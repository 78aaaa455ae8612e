//! HTML escaping and markup sanitization

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid pattern"));
static SCRIPT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?script[^>]*>").expect("valid pattern"));
static JS_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)javascript:").expect("valid pattern"));
static EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bon\w+\s*=").expect("valid pattern"));
static STYLE_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)style\s*=\s*"[^"]*""#).expect("valid pattern"));

/// Escape HTML metacharacters so text is inert when embedded in markup.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Strip executable constructs from assembled markup.
///
/// Removes `<script>` blocks (and stray script tags), `javascript:` scheme
/// occurrences, inline `on*=` event-handler attributes, and inline
/// double-quoted `style` attributes. Applied over the fully assembled markup
/// after escaping, as a second layer.
pub fn sanitize(markup: &str) -> String {
    let markup = SCRIPT_BLOCK.replace_all(markup, "");
    let markup = SCRIPT_TAG.replace_all(&markup, "");
    let markup = JS_SCHEME.replace_all(&markup, "");
    let markup = EVENT_HANDLER.replace_all(&markup, "");
    let markup = STYLE_ATTR.replace_all(&markup, "");
    markup.into_owned()
}
