//! `{{name}}` placeholder substitution.

use crate::Variables;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Returns `true` if `input` contains the start of a placeholder.
pub fn has_placeholder(input: &str) -> bool {
    memchr::memmem::find(input.as_bytes(), OPEN.as_bytes()).is_some()
}

/// Replaces every `{{key}}` in `html` whose `key` is exactly a key of
/// `variables` with its value.
///
/// Tokens naming unknown keys, and an unterminated `{{`, are kept verbatim,
/// but a known token nested in them is still replaced. Inserted values are
/// not scanned again.
///
/// ```
/// use folio::{vars, template::substitute};
///
/// let vars = vars!["title" => "Home", "bytes" => 9];
/// let html = substitute("<title>{{title}}</title>{{bytes}}B {{nope}}", &vars);
/// assert_eq!(html, "<title>Home</title>9B {{nope}}");
/// ```
pub fn substitute(html: &str, variables: &Variables) -> String {
    let finder = memchr::memmem::Finder::new(OPEN);
    let mut output = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = finder.find(rest.as_bytes()) {
        let (before, token) = rest.split_at(start);
        output.push_str(before);

        let inner = &token[OPEN.len()..];
        let Some(end) = inner.find(CLOSE) else {
            rest = token;
            break;
        };

        match variables.get(&inner[..end]) {
            Some(value) => {
                output.push_str(value);
                rest = &inner[end + CLOSE.len()..];
            }
            None => {
                output.push_str(&token[..1]);
                rest = &token[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// The page weight of `html`: its length in bytes once every whitespace byte
/// is removed.
///
/// ```
/// assert_eq!(folio::template::weight("  <p>Hi</p>  "), 9);
/// assert_eq!(folio::template::weight("<p>\n\t🐇 </p>"), 11);
/// ```
pub fn weight(html: &str) -> usize {
    let whitespace = html.bytes()
        .filter(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r'))
        .count();

    html.len() - whitespace
}
