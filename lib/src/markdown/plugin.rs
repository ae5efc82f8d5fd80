use pulldown_cmark::Event;

use crate::error::Result;

/// A stage of the Markdown event pipeline.
///
/// `remap` may record failures in `self`; they are reported by `finalize`,
/// which runs once the events have been consumed.
pub trait Plugin {
    #[inline(always)]
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        events
    }

    #[inline(always)]
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}
