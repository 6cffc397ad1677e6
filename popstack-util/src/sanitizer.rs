use ammonia::Builder;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static RICH_TAG: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"<\s*/?(?:b|i|u|a|p|br)(?:\s+[^>]*)?>").expect("valid tag pattern"));

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

static BREAK_TAG: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?i)<\s*(?:br\s*/?|/p)\s*>").expect("valid break pattern"));

/// Sanitize notification markup for display.
///
/// Allowed tags: b, i, u, a, br, p
/// Allowed attributes: href (on a tags only)
/// Allowed URL schemes: http, https, mailto
///
/// Links get rel="noopener noreferrer".
pub fn sanitize_html(html: &str) -> String {
  let tags: HashSet<&str> = ["b", "i", "u", "a", "br", "p"].into_iter().collect();
  let href: HashSet<&str> = std::iter::once("href").collect();
  let schemes: HashSet<&str> = ["http", "https", "mailto"].into_iter().collect();

  Builder::default()
    .tags(tags)
    .link_rel(Some("noopener noreferrer"))
    .url_schemes(schemes)
    .generic_attributes(HashSet::new())
    .tag_attributes(std::iter::once(("a", href)).collect())
    .clean(html)
    .to_string()
}

/// Whether `text` contains markup that would render, as opposed to escaped
/// entities or a bare `<` in prose.
pub fn has_rich_content(text: &str) -> bool {
  RICH_TAG.is_match(text)
}

/// Strip every tag and decode entities. Line breaks and closing paragraphs
/// become newlines so callers can count rendered lines.
pub fn strip_html(html: &str) -> String {
  let broken = BREAK_TAG.replace_all(html, "\n");
  let without_tags = ANY_TAG.replace_all(&broken, "");
  decode_entities(&without_tags)
}

/// Sanitize, then strip: the text a renderer would display.
pub fn plain_text(markup: &str) -> String {
  strip_html(&sanitize_html(markup)).trim().to_string()
}

fn decode_entities(text: &str) -> String {
  text
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&quot;", "\"")
    .replace("&#39;", "'")
    .replace("&#x27;", "'")
    .replace("&#x2F;", "/")
    .replace("&nbsp;", " ")
    .replace("&amp;", "&") // last, or "&amp;lt;" would decode twice
}
