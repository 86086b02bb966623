#![forbid(unsafe_code)]

//! Incremental pixel-width line wrapping.
//!
//! [`LineWrapper`] turns the logical lines of a [`TextBuffer`] into visual
//! lines no wider than an available pixel width. It keeps its output between
//! calls and only re-wraps logical lines from the first dirty one on, so
//! appending to a long log costs one line of work per frame.
//!
//! Breaks always fall on grapheme cluster boundaries. The longest fitting
//! prefix of a line is found by a halving search over those boundaries,
//! which relies on measured width being monotonic in prefix length.
//!
//! # Example
//! ```
//! use quire_core::FontId;
//! use quire_text::{LineWrapper, MonospaceFont, TextBuffer, WrapOptions};
//!
//! let mut font = MonospaceFont::new(FontId(1)).with_advance(1.0);
//! let mut buffer = TextBuffer::new();
//! buffer.write(b"hello world foo");
//!
//! let mut wrapper = LineWrapper::new();
//! wrapper.wrap(&mut buffer, &mut font, &WrapOptions::new(120, 10.0));
//! assert_eq!(wrapper.wrapped(), ["hello world ", "foo"]);
//! ```

use std::borrow::Cow;

use smallvec::SmallVec;
use tracing::{debug_span, trace};
use unicode_segmentation::UnicodeSegmentation;

use crate::buffer::TextBuffer;
use crate::font::FontSource;
use crate::measure::MeasureCache;

/// Parameters for one wrap pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapOptions {
    /// Pixel width available to text.
    pub available_width: i32,
    /// Font size passed to the measurer.
    pub size: f32,
    /// Prefer breaking after whitespace.
    pub word_wrap: bool,
    /// Produce exactly one visual line.
    pub single_line: bool,
}

impl WrapOptions {
    /// Word-wrapping, multi-line options.
    #[must_use]
    pub fn new(available_width: i32, size: f32) -> Self {
        Self {
            available_width,
            size,
            word_wrap: true,
            single_line: false,
        }
    }

    /// Set whether to prefer breaks after whitespace.
    #[must_use]
    pub fn word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    /// Set single-line mode.
    #[must_use]
    pub fn single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }
}

/// Wrapped output for a buffer, reused across passes.
#[derive(Debug, Default)]
pub struct LineWrapper {
    wrapped: Vec<String>,
    line_widths: Vec<i32>,
    line_starts: Vec<usize>,
    wrap_start: usize,
    cache: MeasureCache,
}

impl LineWrapper {
    /// Create an empty wrapper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-wrap whatever the buffer's dirty state asks for.
    ///
    /// Returns `false` when the output was already current.
    pub fn wrap(
        &mut self,
        buffer: &mut TextBuffer,
        font: &mut dyn FontSource,
        options: &WrapOptions,
    ) -> bool {
        buffer.process_incoming();
        let Some(from) = buffer.dirty().wrap_from() else {
            return false;
        };

        let span = debug_span!(
            "wrap",
            from,
            width = options.available_width,
            single_line = options.single_line
        );
        let _guard = span.enter();

        if options.single_line {
            self.wrap_single(buffer, font, options);
        } else {
            self.wrap_lines(buffer, font, options, from);
        }

        debug_assert_eq!(self.wrapped.len(), self.line_widths.len());
        trace!(
            from,
            wrapped = self.wrapped.len(),
            wrap_start = self.wrap_start,
            "rewrapped"
        );
        buffer.dirty_mut().finish_wrap();
        true
    }

    fn wrap_single(
        &mut self,
        buffer: &mut TextBuffer,
        font: &mut dyn FontSource,
        options: &WrapOptions,
    ) {
        let mut text = String::from(buffer.prefix());
        for line in buffer.lines() {
            text.push_str(line);
        }
        text.push_str(buffer.suffix());

        let width = self.cache.measure(font, &text, options.size);
        self.line_starts.clear();
        self.line_starts.push(0);
        self.wrap_start = 0;
        let mut out = 0;
        self.emit(&mut out, &text, width);
        self.truncate(out);
    }

    fn wrap_lines(
        &mut self,
        buffer: &mut TextBuffer,
        font: &mut dyn FontSource,
        options: &WrapOptions,
        from: usize,
    ) {
        let prefix = buffer.prefix().to_owned();
        let suffix = buffer.suffix().to_owned();
        let lines = buffer.lines();

        // An empty buffer still shows its decorations.
        let empty = [String::new()];
        let lines: &[String] = if lines.is_empty() && !(prefix.is_empty() && suffix.is_empty()) {
            &empty
        } else {
            lines
        };

        let from = from.min(self.line_starts.len());
        let mut out = self.line_starts.get(from).copied().unwrap_or(self.wrapped.len());
        self.line_starts.truncate(from);

        let last = lines.len().saturating_sub(1);
        for (index, line) in lines.iter().enumerate().skip(from) {
            self.line_starts.push(out);
            self.wrap_start = out;

            let text = decorate(line, index == 0, index == last, &prefix, &suffix);
            self.wrap_line(&mut out, &text, font, options);
        }

        if lines.is_empty() {
            self.wrap_start = 0;
        }
        self.truncate(out);
    }

    fn wrap_line(
        &mut self,
        out: &mut usize,
        text: &str,
        font: &mut dyn FontSource,
        options: &WrapOptions,
    ) {
        if text.trim().is_empty() {
            self.emit(out, "", 0);
            return;
        }

        let size = options.size;
        let available = options.available_width;
        if available <= 0 {
            let width = self.cache.measure(font, text, size);
            self.emit(out, text, width);
            return;
        }

        let bounds: SmallVec<[usize; 128]> = text
            .grapheme_indices(true)
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let count = bounds.len() - 1;

        let mut start = 0;
        while start < count {
            let end = self.fitting_end(&bounds, start, text, font, options);
            let end = if options.word_wrap && end < count {
                word_break(text, &bounds, start, end)
            } else {
                end
            };

            let segment = &text[bounds[start]..bounds[end]];
            let width = self.cache.measure(font, segment, size);
            self.emit(out, segment, width);
            start = end;
        }
    }

    /// Largest grapheme index `end > start` whose prefix fits, or `start + 1`
    /// when even one grapheme is too wide.
    fn fitting_end(
        &mut self,
        bounds: &[usize],
        start: usize,
        text: &str,
        font: &mut dyn FontSource,
        options: &WrapOptions,
    ) -> usize {
        let count = bounds.len() - 1;
        let base = bounds[start];
        let mut fits = |end: usize, cache: &mut MeasureCache| {
            cache.measure(&mut *font, &text[base..bounds[end]], options.size)
                <= options.available_width
        };

        if fits(count, &mut self.cache) {
            return count;
        }

        // Invariant: `lo` fits (or is `start`), `hi` does not.
        let (mut lo, mut hi) = (start, count);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if fits(mid, &mut self.cache) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo.max(start + 1)
    }

    fn emit(&mut self, out: &mut usize, text: &str, width: i32) {
        if let Some(slot) = self.wrapped.get_mut(*out) {
            slot.clear();
            slot.push_str(text);
            self.line_widths[*out] = width;
        } else {
            self.wrapped.push(text.to_owned());
            self.line_widths.push(width);
        }
        *out += 1;
    }

    fn truncate(&mut self, len: usize) {
        self.wrapped.truncate(len);
        self.line_widths.truncate(len);
    }

    /// Visual lines.
    #[must_use]
    pub fn wrapped(&self) -> &[String] {
        &self.wrapped
    }

    /// Pixel width of each visual line.
    #[must_use]
    pub fn line_widths(&self) -> &[i32] {
        &self.line_widths
    }

    /// Index of the first visual line of each logical line.
    #[must_use]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    /// Index of the first visual line of the last logical line wrapped.
    #[must_use]
    pub fn wrap_start(&self) -> usize {
        self.wrap_start
    }

    /// Number of visual lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wrapped.len()
    }

    /// Whether there are no visual lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wrapped.is_empty()
    }

    /// Widest visual line.
    #[must_use]
    pub fn max_width(&self) -> i32 {
        self.line_widths.iter().copied().max().unwrap_or(0)
    }

    /// Measurement cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> crate::measure::CacheStats {
        self.cache.stats()
    }

    /// Forget cached measurements. Call when the font changes.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Drop all output.
    pub fn reset(&mut self) {
        self.wrapped.clear();
        self.line_widths.clear();
        self.line_starts.clear();
        self.wrap_start = 0;
    }
}

fn decorate<'a>(
    line: &'a str,
    first: bool,
    last: bool,
    prefix: &str,
    suffix: &str,
) -> Cow<'a, str> {
    let prefix = if first { prefix } else { "" };
    let suffix = if last { suffix } else { "" };
    if prefix.is_empty() && suffix.is_empty() {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(format!("{prefix}{line}{suffix}"))
    }
}

fn is_whitespace(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

/// Pull a character-wrap end back to a word boundary.
///
/// Whitespace right after the segment is absorbed into it; otherwise the line
/// ends after the last whitespace inside the segment (never at its first
/// grapheme). With no usable whitespace the character-wrap end is kept.
fn word_break(text: &str, bounds: &[usize], start: usize, end: usize) -> usize {
    let grapheme = |i: usize| &text[bounds[i]..bounds[i + 1]];

    if is_whitespace(grapheme(end)) {
        return end + 1;
    }

    (start + 1..end)
        .rev()
        .find(|&i| is_whitespace(grapheme(i)))
        .map_or(end, |i| i + 1)
}
