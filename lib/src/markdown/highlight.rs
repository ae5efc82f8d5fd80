use pulldown_cmark::{Event, Tag, CodeBlockKind, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassedHTMLGenerator, ClassStyle, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxSet, SyntaxReference};
use syntect::util::LinesWithEndings;
use once_cell::sync::Lazy;

use super::Plugin;
use crate::error::Result;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// The theme used for the stylesheet when none is configured.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Where the generated highlighting stylesheet is published; posts link to it.
pub const STYLESHEET_PATH: &str = "/public/highlight.css";

const CLASS_STYLE: ClassStyle = ClassStyle::Spaced;

/// Highlights fenced code blocks into class-annotated HTML.
#[derive(Default)]
pub struct SyntaxHighlight {
    error: Option<syntect::Error>,
}

struct Highlighter<'a, I> {
    generator: Option<ClassedHTMLGenerator<'static>>,
    lang: String,
    error: &'a mut Option<syntect::Error>,
    inner: I,
}

impl SyntaxHighlight {
    /// Loads the syntax definitions in the background.
    #[inline]
    pub fn warm_up() {
        rayon::spawn(|| { Lazy::force(&SYNTAX_SET); });
    }
}

/// The stylesheet matching the classes emitted by [`SyntaxHighlight`] for the
/// built-in theme named `theme`.
pub fn stylesheet(theme: &str) -> Result<String> {
    let Some(theme) = THEME_SET.themes.get(theme) else {
        let known: Vec<&str> = THEME_SET.themes.keys().map(|k| k.as_str()).collect();
        return err! {
            "unknown syntax highlighting theme",
            "theme" => theme,
            "available themes" => known.join(", "),
        };
    };

    Ok(css_for_theme_with_class_style(theme, CLASS_STYLE)?)
}

fn syntax_for(lang: &str) -> &'static SyntaxReference {
    SYNTAX_SET.find_syntax_by_token(lang)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

impl Plugin for SyntaxHighlight {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        Highlighter { generator: None, lang: String::new(), error: &mut self.error, inner: events }
    }

    fn finalize(&mut self) -> Result<()> {
        match self.error.take() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for Highlighter<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(label))) => {
                    let lang = label.split([',', ' ']).next().unwrap_or("");
                    let generator = ClassedHTMLGenerator::new_with_class_style(
                        syntax_for(lang),
                        &SYNTAX_SET,
                        CLASS_STYLE,
                    );

                    self.lang = lang.to_string();
                    self.generator = Some(generator);
                }
                Event::Text(text) if self.generator.is_some() => {
                    let Some(generator) = self.generator.as_mut() else { continue };
                    for line in LinesWithEndings::from(&text) {
                        if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                            self.error.get_or_insert(e);
                        }
                    }
                }
                Event::End(TagEnd::CodeBlock) if self.generator.is_some() => {
                    let Some(generator) = self.generator.take() else { continue };
                    let code = generator.finalize();
                    let html = match self.lang.as_str() {
                        "" => format!("<pre class=\"highlight\"><code>{code}</code></pre>\n"),
                        lang => format!("<pre class=\"highlight\"><code class=\"language-{lang}\">{code}</code></pre>\n"),
                    };

                    return Some(Event::Html(html.into()));
                },
                ev => return Some(ev),
            }
        }
    }
}
