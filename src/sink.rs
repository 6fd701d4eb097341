//! The [`LineSink`] trait: the rendering capability playback writes through.

use crate::script::LineKind;

/// A surface that terminal lines are rendered into.
///
/// Playback only ever appends a line, rewrites the newest line's content, or
/// clears everything. Implementations must treat every write as a no-op once
/// the surface is detached; the controller stops scheduling work as soon as
/// [`is_attached`](Self::is_attached) returns `false`.
pub trait LineSink: Send {
    /// Whether the surface is still part of the page.
    fn is_attached(&self) -> bool;

    /// Append a new, empty line classed by `kind`.
    fn append_line(&mut self, kind: LineKind);

    /// Replace the content of the most recently appended line with `prefix`.
    fn reveal(&mut self, prefix: &str);

    /// Remove every rendered line.
    fn clear(&mut self);
}

impl<S: LineSink + ?Sized> LineSink for Box<S> {
    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn append_line(&mut self, kind: LineKind) {
        (**self).append_line(kind)
    }

    fn reveal(&mut self, prefix: &str) {
        (**self).reveal(prefix)
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}
