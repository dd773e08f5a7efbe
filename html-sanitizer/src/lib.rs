//! Strip markup from html snippets and escape text for html output.
use log::error;

mod parser;

/// A piece of an html snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element<'a> {
    /// Plain text.
    Text(&'a str),
    /// A decoded character entity.
    Escaped(char),
    /// A tag or comment, including the angle brackets.
    Markup(&'a str),
}

/// Parse the input str into elements.
pub fn parse_elements(input: &str) -> Vec<Element<'_>> {
    parser::parse_nodes(input)
        .map(|(_, v)| v)
        .unwrap_or_else(|err| {
            error!("Failed to parse input: {err}");
            vec![Element::Text(input)]
        })
}

/// Text content of an html snippet with all markup removed and entities
/// decoded.
pub fn strip_tags(input: &str) -> String {
    parse_elements(input)
        .into_iter()
        .fold(String::with_capacity(input.len()), |mut text, el| {
            match el {
                Element::Text(s) => text.push_str(s),
                Element::Escaped(c) => text.push(c),
                Element::Markup(_) => (),
            }
            text
        })
}

/// Escape text so it can be placed in html content or a quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}
