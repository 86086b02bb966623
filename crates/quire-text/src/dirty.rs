#![forbid(unsafe_code)]

//! Wrap/redraw state for a text buffer.
//!
//! A field moves through four states, ordered by how much work the next frame
//! has to do:
//!
//! ```text
//! Clean < NeedsRedraw < ContentDirty { from_line } < LayoutDirty
//! ```
//!
//! Marks only ever raise the state; the wrapper and the renderer lower it
//! again through [`Dirty::finish_wrap`] and [`Dirty::finish_draw`].

/// Pending work for the next layout/draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dirty {
    /// Wrapped output and the last draw are current.
    #[default]
    Clean,
    /// Wrapped output is current, pixels are stale.
    NeedsRedraw,
    /// Logical lines `from_line..` must be re-wrapped.
    ContentDirty {
        /// First logical line whose wrapped output is stale.
        from_line: usize,
    },
    /// Everything must be re-wrapped from line 0.
    LayoutDirty,
}

impl Dirty {
    /// Request a redraw without re-wrapping.
    pub fn mark_redraw(&mut self) {
        if *self == Self::Clean {
            *self = Self::NeedsRedraw;
        }
    }

    /// Mark logical lines from `line` on as stale.
    ///
    /// Two content marks merge to the lower line.
    pub fn mark_content(&mut self, line: usize) {
        *self = match *self {
            Self::Clean | Self::NeedsRedraw => Self::ContentDirty { from_line: line },
            Self::ContentDirty { from_line } => Self::ContentDirty {
                from_line: from_line.min(line),
            },
            Self::LayoutDirty => Self::LayoutDirty,
        };
    }

    /// Mark everything as stale.
    pub fn mark_layout(&mut self) {
        *self = Self::LayoutDirty;
    }

    /// First logical line to re-wrap, or `None` when wrapping is current.
    #[must_use]
    pub const fn wrap_from(&self) -> Option<usize> {
        match *self {
            Self::ContentDirty { from_line } => Some(from_line),
            Self::LayoutDirty => Some(0),
            Self::Clean | Self::NeedsRedraw => None,
        }
    }

    /// Whether the next pass has to draw.
    #[must_use]
    pub const fn needs_draw(&self) -> bool {
        !matches!(self, Self::Clean)
    }

    /// Wrapping caught up with the buffer.
    pub fn finish_wrap(&mut self) {
        if self.wrap_from().is_some() {
            *self = Self::NeedsRedraw;
        }
    }

    /// A draw completed. Pending wrap work is kept.
    pub fn finish_draw(&mut self) {
        if self.wrap_from().is_none() {
            *self = Self::Clean;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Dirty;

    #[test]
    fn default_is_clean() {
        assert_eq!(Dirty::default(), Dirty::Clean);
        assert!(!Dirty::Clean.needs_draw());
        assert_eq!(Dirty::Clean.wrap_from(), None);
    }

    #[test]
    fn redraw_only_raises_clean() {
        let mut d = Dirty::Clean;
        d.mark_redraw();
        assert_eq!(d, Dirty::NeedsRedraw);

        let mut d = Dirty::ContentDirty { from_line: 3 };
        d.mark_redraw();
        assert_eq!(d, Dirty::ContentDirty { from_line: 3 });

        let mut d = Dirty::LayoutDirty;
        d.mark_redraw();
        assert_eq!(d, Dirty::LayoutDirty);
    }

    #[test]
    fn content_marks_merge_to_minimum() {
        let mut d = Dirty::NeedsRedraw;
        d.mark_content(7);
        d.mark_content(4);
        d.mark_content(9);
        assert_eq!(d.wrap_from(), Some(4));
    }

    #[test]
    fn content_mark_does_not_lower_layout() {
        let mut d = Dirty::LayoutDirty;
        d.mark_content(5);
        assert_eq!(d, Dirty::LayoutDirty);
        assert_eq!(d.wrap_from(), Some(0));
    }

    #[test]
    fn layout_mark_overrides_content() {
        let mut d = Dirty::ContentDirty { from_line: 2 };
        d.mark_layout();
        assert_eq!(d, Dirty::LayoutDirty);
    }

    #[test]
    fn content_zero_wraps_everything() {
        let mut d = Dirty::Clean;
        d.mark_content(0);
        assert_eq!(d.wrap_from(), Dirty::LayoutDirty.wrap_from());
    }

    #[test]
    fn finish_wrap_then_draw() {
        let mut d = Dirty::ContentDirty { from_line: 1 };
        d.finish_wrap();
        assert_eq!(d, Dirty::NeedsRedraw);
        assert!(d.needs_draw());
        d.finish_draw();
        assert_eq!(d, Dirty::Clean);
    }

    #[test]
    fn finish_wrap_leaves_redraw_states_alone() {
        let mut d = Dirty::Clean;
        d.finish_wrap();
        assert_eq!(d, Dirty::Clean);
        let mut d = Dirty::NeedsRedraw;
        d.finish_wrap();
        assert_eq!(d, Dirty::NeedsRedraw);
    }

    #[test]
    fn finish_draw_keeps_pending_wrap() {
        let mut d = Dirty::LayoutDirty;
        d.finish_draw();
        assert_eq!(d, Dirty::LayoutDirty);
    }
}
