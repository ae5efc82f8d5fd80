use std::collections::VecDeque;

use pulldown_cmark::{Event, Tag, TagEnd};
use rustc_hash::FxHashMap;

use super::Plugin;
use crate::util::slugify;

/// Gives every heading without an explicit id one derived from its text.
/// Repeated ids are suffixed with `-1`, `-2`, and so on.
#[derive(Default)]
pub struct AutoHeading {
    seen: FxHashMap<String, usize>,
}

impl AutoHeading {
    fn unique_id(&mut self, text: &str) -> String {
        let base = match slugify(text) {
            slug if slug.is_empty() => "section".to_string(),
            slug => slug,
        };

        match self.seen.get_mut(&base) {
            Some(n) => {
                *n += 1;
                format!("{base}-{n}")
            }
            None => {
                self.seen.insert(base.clone(), 0);
                base
            }
        }
    }
}

struct HeadingIterator<'a, I: Iterator<Item = Event<'a>>> {
    plugin: &'a mut AutoHeading,
    stack: VecDeque<Event<'a>>,
    inner: I,
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for HeadingIterator<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.stack.pop_front() {
            return Some(event);
        }

        match self.inner.next()? {
            Event::Start(Tag::Heading { level, id: None, classes, attrs }) => {
                let mut text = String::new();
                loop {
                    let event = self.inner.next()?;
                    if let Event::Text(ref s) | Event::Code(ref s) = event {
                        text.push_str(s);
                    }

                    let end = matches!(event, Event::End(TagEnd::Heading(..)));
                    self.stack.push_back(event);
                    if end {
                        break;
                    }
                }

                let id = self.plugin.unique_id(&text);
                Some(Event::Start(Tag::Heading { level, id: Some(id.into()), classes, attrs }))
            },
            event => Some(event)
        }
    }
}

impl Plugin for AutoHeading {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        HeadingIterator {
            plugin: self,
            inner: events,
            stack: VecDeque::with_capacity(4),
        }
    }
}
