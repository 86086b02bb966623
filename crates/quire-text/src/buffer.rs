#![forbid(unsafe_code)]

//! Line-oriented text storage with a cheap append path.
//!
//! Writes only extend an `incoming` byte queue. The queue is folded into
//! logical lines lazily, right before anything reads the content or the
//! wrapper runs, so a host can stream output into a field every frame without
//! paying for line splitting on each call.
//!
//! # Example
//! ```
//! use quire_text::TextBuffer;
//!
//! let mut buffer = TextBuffer::new();
//! buffer.write(b"first\nsec");
//! buffer.write(b"ond");
//! assert_eq!(buffer.lines(), ["first", "second"]);
//! assert_eq!(buffer.text(), "first\nsecond");
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::dirty::Dirty;

/// Logical lines plus the not yet folded byte queue.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    lines: Vec<String>,
    incoming: Vec<u8>,
    prefix: String,
    suffix: String,
    dirty: Dirty,
    modified: bool,
}

impl TextBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes. Never fails; returns the number of bytes accepted.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        if bytes.is_empty() {
            return 0;
        }
        self.incoming.extend_from_slice(bytes);
        self.modified = true;
        self.dirty.mark_content(self.last_line_index());
        bytes.len()
    }

    /// Replace the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.lines.clear();
        self.incoming.clear();
        self.incoming.extend_from_slice(text.as_bytes());
        self.modified = true;
        self.dirty.mark_layout();
    }

    /// Replace the final logical line. Newlines become spaces.
    ///
    /// On an empty buffer this behaves like [`TextBuffer::set_text`].
    pub fn set_last(&mut self, text: &str) {
        self.process_incoming();
        let text = text.replace('\n', " ");
        match self.lines.last_mut() {
            Some(last) => {
                *last = text;
                self.modified = true;
                self.dirty.mark_content(self.lines.len() - 1);
            }
            None => self.set_text(&text),
        }
    }

    /// Remove all content.
    pub fn clear(&mut self) {
        self.set_text("");
    }

    /// Append a line break.
    pub fn push_newline(&mut self) {
        self.write(b"\n");
    }

    /// Remove the last grapheme of the last line, or drop an empty last line
    /// when more than one line exists.
    ///
    /// Returns `false` when there was nothing to remove.
    pub fn pop_char(&mut self) -> bool {
        self.process_incoming();
        let line_count = self.lines.len();
        let Some(last) = self.lines.last_mut() else {
            return false;
        };

        let cut = last.grapheme_indices(true).next_back().map(|(start, _)| start);
        if let Some(start) = cut {
            last.truncate(start);
        } else if line_count > 1 {
            self.lines.pop();
        } else {
            return false;
        }

        self.modified = true;
        self.dirty.mark_content(self.last_line_index());
        true
    }

    /// The content as it would read after [`TextBuffer::pop_char`].
    #[must_use]
    pub fn text_without_last_char(&mut self) -> String {
        let mut text = self.text();
        let last_line_empty = self.lines.last().is_some_and(String::is_empty);
        if last_line_empty {
            if self.lines.len() > 1 {
                text.pop();
            }
        } else if let Some((start, _)) = text.grapheme_indices(true).next_back() {
            text.truncate(start);
        }
        text
    }

    /// Full content with lines joined by `\n`.
    #[must_use]
    pub fn text(&mut self) -> String {
        self.process_incoming();
        self.lines.join("\n")
    }

    /// Logical lines after folding pending input.
    pub fn lines(&mut self) -> &[String] {
        self.process_incoming();
        &self.lines
    }

    /// Number of logical lines after folding pending input.
    pub fn line_count(&mut self) -> usize {
        self.process_incoming();
        self.lines.len()
    }

    /// Index of the last logical line (0 for an empty buffer).
    #[must_use]
    pub fn last_line_index(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Whether the buffer holds no content at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incoming.is_empty() && self.lines.iter().all(String::is_empty)
    }

    /// Fold queued bytes into lines.
    ///
    /// Invalid UTF-8 decodes to U+FFFD. A trailing incomplete sequence stays
    /// queued until the bytes that complete it arrive. Returns the first line
    /// that changed, or `None` when nothing was folded.
    pub fn process_incoming(&mut self) -> Option<usize> {
        if self.incoming.is_empty() {
            return None;
        }

        let (decoded, consumed) = decode_utf8_prefix(&self.incoming);
        self.incoming.drain(..consumed);
        if decoded.is_empty() {
            return None;
        }

        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        let first = self.lines.len() - 1;

        let mut pieces = decoded.split('\n');
        if let Some(head) = pieces.next() {
            self.lines[first].push_str(head);
        }
        self.lines.extend(pieces.map(str::to_owned));

        self.dirty.mark_content(first);
        Some(first)
    }

    /// Text shown before the first line.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Text shown after the last line.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Set the text shown before the first line. Forces a full re-wrap.
    pub fn set_prefix(&mut self, prefix: &str) {
        if self.prefix != prefix {
            prefix.clone_into(&mut self.prefix);
            self.dirty.mark_layout();
        }
    }

    /// Set the text shown after the last line. Forces a full re-wrap.
    pub fn set_suffix(&mut self, suffix: &str) {
        if self.suffix != suffix {
            suffix.clone_into(&mut self.suffix);
            self.dirty.mark_layout();
        }
    }

    /// Current wrap/redraw state.
    #[must_use]
    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    /// Mutable access to the wrap/redraw state.
    pub fn dirty_mut(&mut self) -> &mut Dirty {
        &mut self.dirty
    }

    /// Whether content changed since the last [`TextBuffer::take_modified`].
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Read and reset the content-changed flag.
    pub fn take_modified(&mut self) -> bool {
        std::mem::take(&mut self.modified)
    }
}

/// Decode the longest prefix of `bytes` that is not an incomplete trailing
/// sequence. Returns the text and the number of bytes consumed.
fn decode_utf8_prefix(bytes: &[u8]) -> (String, usize) {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                return (out, bytes.len());
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                out.push_str(&String::from_utf8_lossy(valid));
                match err.error_len() {
                    Some(len) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        rest = &after[len..];
                    }
                    None => return (out, bytes.len() - after.len()),
                }
            }
        }
    }
}
