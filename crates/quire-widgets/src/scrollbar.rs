#![forbid(unsafe_code)]

//! Vertical scrollbar geometry and dragging.
//!
//! The scrollbar owns no scroll state. Each layout pass rebuilds the track and
//! handle from the viewport's progress, and pointer interaction is turned back
//! into a progress value for the viewport to apply.

use quire_core::{Point, Rect};

/// Smallest handle height in pixels.
pub const MIN_HANDLE_HEIGHT: i32 = 4;

/// What a press on the scrollbar hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollBarHit {
    /// The handle was grabbed where it is.
    Handle,
    /// The track was clicked; scroll to this progress.
    Track(f32),
}

/// Scrollbar state derived from the viewport on each layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollBar {
    shown: bool,
    track: Rect,
    handle: Rect,
    dragging: bool,
    drag_anchor: i32,
}

impl ScrollBar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a scrollbar belongs on a field with these settings.
    ///
    /// Never in single-line mode or when switched off; otherwise when the
    /// content overflows or auto-hide is disabled.
    #[must_use]
    pub const fn should_show(single_line: bool, visible: bool, auto_hide: bool, overflow: bool) -> bool {
        !single_line && visible && (overflow || !auto_hide)
    }

    /// Rebuild geometry along the right edge of `rect`.
    pub fn layout(&mut self, rect: Rect, width: i32, shown: bool, progress: f32) {
        self.shown = shown && width > 0 && !rect.is_empty();
        if !self.shown {
            self.track = Rect::default();
            self.handle = Rect::default();
            self.dragging = false;
            return;
        }

        let width = width.min(rect.width);
        self.track = Rect::new(rect.right() - width, rect.y, width, rect.height);

        let handle_height = (width / 2).max(MIN_HANDLE_HEIGHT).min(rect.height);
        let travel = rect.height - handle_height;
        let y = rect.y + (travel as f32 * progress.clamp(0.0, 1.0)).round() as i32;
        self.handle = Rect::new(self.track.x, y, width, handle_height);
    }

    #[must_use]
    pub const fn is_shown(&self) -> bool {
        self.shown
    }

    #[must_use]
    pub const fn track(&self) -> Rect {
        self.track
    }

    #[must_use]
    pub const fn handle(&self) -> Rect {
        self.handle
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Grab point inside the handle, relative to its top.
    #[must_use]
    pub const fn drag_anchor(&self) -> i32 {
        self.drag_anchor
    }

    /// Distance the handle can move.
    #[must_use]
    pub fn travel(&self) -> i32 {
        (self.track.height - self.handle.height).max(0)
    }

    /// Start a drag if `point` is on the scrollbar.
    ///
    /// Pressing the handle keeps it where it is and remembers the grab
    /// point. Pressing the track centers the handle under the pointer.
    pub fn press(&mut self, point: Point) -> Option<ScrollBarHit> {
        if !self.shown || !self.track.contains(point) {
            return None;
        }
        self.dragging = true;
        if self.handle.contains(point) {
            self.drag_anchor = point.y - self.handle.y;
            Some(ScrollBarHit::Handle)
        } else {
            self.drag_anchor = self.handle.height / 2;
            Some(ScrollBarHit::Track(self.progress_at(point.y)))
        }
    }

    /// Progress for a pointer at `point` during a drag.
    #[must_use]
    pub fn drag_to(&self, point: Point) -> Option<f32> {
        self.dragging.then(|| self.progress_at(point.y))
    }

    /// End a drag. Returns whether one was in progress.
    pub fn release(&mut self) -> bool {
        std::mem::take(&mut self.dragging)
    }

    fn progress_at(&self, y: i32) -> f32 {
        let travel = self.travel();
        if travel == 0 {
            return 0.0;
        }
        let top = y - self.drag_anchor - self.track.y;
        (top as f32 / travel as f32).clamp(0.0, 1.0)
    }

    /// Handle border strips: left, top, right, bottom.
    #[must_use]
    pub fn border_rects(&self, size: i32) -> [Rect; 4] {
        let r = self.handle;
        let size = size.clamp(0, r.width.min(r.height));
        [
            Rect::new(r.x, r.y, size, r.height),
            Rect::new(r.x, r.y, r.width, size),
            Rect::new(r.right() - size, r.y, size, r.height),
            Rect::new(r.x, r.bottom() - size, r.width, size),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(progress: f32) -> ScrollBar {
        let mut bar = ScrollBar::new();
        bar.layout(Rect::new(0, 0, 200, 100), 32, true, progress);
        bar
    }

    #[test]
    fn visibility_rules() {
        assert!(ScrollBar::should_show(false, true, true, true));
        assert!(!ScrollBar::should_show(false, true, true, false));
        assert!(ScrollBar::should_show(false, true, false, false));
        assert!(!ScrollBar::should_show(true, true, false, true));
        assert!(!ScrollBar::should_show(false, false, false, true));
    }

    #[test]
    fn geometry_at_start_and_end() {
        let bar = shown(0.0);
        assert_eq!(bar.track(), Rect::new(168, 0, 32, 100));
        assert_eq!(bar.handle(), Rect::new(168, 0, 32, 16));
        assert_eq!(bar.travel(), 84);

        let bar = shown(1.0);
        assert_eq!(bar.handle().y, 84);
        assert_eq!(bar.handle().bottom(), 100);
    }

    #[test]
    fn narrow_bar_keeps_minimum_handle() {
        let mut bar = ScrollBar::new();
        bar.layout(Rect::new(0, 0, 100, 100), 6, true, 0.0);
        assert_eq!(bar.handle().height, MIN_HANDLE_HEIGHT);
    }

    #[test]
    fn hidden_bar_has_no_geometry() {
        let mut bar = shown(0.0);
        bar.layout(Rect::new(0, 0, 200, 100), 32, false, 0.0);
        assert!(!bar.is_shown());
        assert!(bar.track().is_empty());
        assert_eq!(bar.press(Point::new(180, 10)), None);
    }

    #[test]
    fn pressing_handle_does_not_jump() {
        let mut bar = shown(0.5);
        let handle = bar.handle();
        let grab = Point::new(handle.x + 4, handle.y + 3);
        assert_eq!(bar.press(grab), Some(ScrollBarHit::Handle));
        assert_eq!(bar.drag_anchor(), 3);
        let progress = bar.drag_to(grab).unwrap_or_default();
        assert!((progress - 0.5).abs() < 0.02);
    }

    #[test]
    fn pressing_track_centers_handle() {
        let mut bar = shown(0.0);
        let hit = bar.press(Point::new(180, 50 + 8));
        assert_eq!(hit, Some(ScrollBarHit::Track(50.0 / 84.0)));
        assert!(bar.is_dragging());
    }

    #[test]
    fn drag_maps_relative_to_grab_point() {
        let mut bar = shown(0.0);
        bar.press(Point::new(180, 8));
        assert_eq!(bar.drag_to(Point::new(180, 8 + 42)), Some(0.5));
        assert_eq!(bar.drag_to(Point::new(180, 500)), Some(1.0));
        assert_eq!(bar.drag_to(Point::new(180, -500)), Some(0.0));
        assert!(bar.release());
        assert!(!bar.release());
        assert_eq!(bar.drag_to(Point::new(180, 50)), None);
    }

    #[test]
    fn border_strips() {
        let bar = shown(0.0);
        let [left, top, right, bottom] = bar.border_rects(2);
        assert_eq!(left, Rect::new(168, 0, 2, 16));
        assert_eq!(top, Rect::new(168, 0, 32, 2));
        assert_eq!(right, Rect::new(198, 0, 2, 16));
        assert_eq!(bottom, Rect::new(168, 14, 32, 2));
    }
}
