use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// URL schemes allowed in rendered links and images. Relative URLs carry no scheme.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Renders story markdown to HTML.
///
/// Raw HTML blocks and inline HTML in the source are dropped rather than passed through.
/// Link and image destinations with a scheme outside [`ALLOWED_SCHEMES`] render with an
/// empty URL.
pub fn render_markdown(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::all()).filter_map(|event| match event {
        Event::Html(_) => None,
        Event::Start(Tag::Link(kind, dest, title)) => {
            Some(Event::Start(Tag::Link(kind, safe_destination(dest), title)))
        }
        Event::Start(Tag::Image(kind, dest, title)) => {
            Some(Event::Start(Tag::Image(kind, safe_destination(dest), title)))
        }
        event => Some(event),
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    if is_allowed_url(&dest) {
        dest
    } else {
        CowStr::Borrowed("")
    }
}

/// Browsers ignore whitespace and control characters inside a scheme, so they are
/// removed before the scheme is compared.
fn is_allowed_url(url: &str) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.find(|c| matches!(c, ':' | '/' | '?' | '#')) {
        Some(end) if normalized[end..].starts_with(':') => {
            ALLOWED_SCHEMES.contains(&&normalized[..end])
        }
        _ => true,
    }
}
