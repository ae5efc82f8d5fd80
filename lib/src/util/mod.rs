mod macros;

pub use macros::*;

/// Converts heading text into an HTML id the way GFM renderers do: letters
/// are transliterated to ASCII and lowercased, runs of spaces and hyphens
/// become a single `-`, other punctuation is dropped, and leading characters
/// that aren't letters are skipped.
///
/// ```
/// use folio::util::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Æsir   rising "), "aesir-rising");
/// assert_eq!(slugify("3 ways to cook"), "ways-to-cook");
/// ```
pub fn slugify(string: &str) -> String {
    let mut output = String::with_capacity(string.len());

    let mut need_dash = false;
    for ch in string.chars() {
        for b in deunicode::deunicode_char(ch).unwrap_or("").bytes() {
            match b {
                b'a'..=b'z' | b'A'..=b'Z' => {},
                b'0'..=b'9' | b'_' if !output.is_empty() => {},
                b' ' | b'\t' | b'-' => {
                    need_dash = !output.is_empty();
                    continue;
                }
                _ => continue,
            }

            if need_dash {
                output.push('-');
                need_dash = false;
            }

            output.push(b.to_ascii_lowercase() as char);
        }
    }

    output
}

/// The final component of a `/`-separated virtual path, without its
/// extension.
///
/// ```
/// use folio::util::file_stem;
///
/// assert_eq!(file_stem("posts/hello.md"), "hello");
/// assert_eq!(file_stem("/posts/hello/index.html"), "index");
/// assert_eq!(file_stem("_layouts/header"), "header");
/// assert_eq!(file_stem(".hidden"), ".hidden");
/// ```
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}
