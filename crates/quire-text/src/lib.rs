#![forbid(unsafe_code)]

//! Text handling for Quire fields.
//!
//! This crate turns a stream of bytes into wrapped visual lines:
//! - [`TextBuffer`] - logical lines with a lazily folded append queue
//! - [`Dirty`] - how much wrap/draw work the next frame needs
//! - [`FontSource`] - pixel measurement, shared via [`SharedFont`]
//! - [`MeasureCache`] - LRU cache of measured widths
//! - [`LineWrapper`] - incremental character/word wrapping
//!
//! # Example
//! ```
//! use quire_core::FontId;
//! use quire_text::{LineWrapper, MonospaceFont, TextBuffer, WrapOptions};
//!
//! let mut font = MonospaceFont::new(FontId(1)).with_advance(1.0);
//! let mut buffer = TextBuffer::new();
//! buffer.write(b"aaaaaaaaaa");
//!
//! let mut wrapper = LineWrapper::new();
//! let options = WrapOptions::new(60, 10.0).word_wrap(false);
//! wrapper.wrap(&mut buffer, &mut font, &options);
//! assert_eq!(wrapper.wrapped(), ["aaaaaa", "aaaa"]);
//! assert_eq!(wrapper.line_widths(), [60, 40]);
//! ```

pub mod buffer;
pub mod dirty;
pub mod font;
pub mod measure;
pub mod wrap;

pub use buffer::TextBuffer;
pub use dirty::Dirty;
pub use font::{FontSource, LineMetrics, MonospaceFont, SharedFont, lock_font, shared};
pub use measure::{CacheStats, DEFAULT_CACHE_CAPACITY, MeasureCache};
pub use wrap::{LineWrapper, WrapOptions};
