#![forbid(unsafe_code)]

//! Line placement and drawing.
//!
//! Rendering happens in two steps. [`Renderer::plan`] decides which wrapped
//! lines are visible and where each baseline goes; it is a pure function of
//! the wrap output and field geometry, so it is cheap to test. [`Renderer::draw`]
//! replays a plan against a host [`Surface`].

use quire_core::{Color, DrawError, FontId, Point, Rect, Surface};
use quire_text::LineMetrics;
use unicode_segmentation::UnicodeSegmentation;

use crate::scrollbar::ScrollBar;
use crate::style::{Align, FieldColors, FieldStyle, HandleBorder};

/// One line of text to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    /// Baseline origin.
    pub origin: Point,
    /// Index into the wrapped lines.
    pub line: usize,
}

/// Result of placing wrapped lines inside a field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderPlan {
    pub runs: Vec<TextRun>,
    /// First candidate line for the current offset.
    pub first_visible: usize,
    /// Wrapped lines not drawn.
    pub culled: usize,
    /// Content extends past the field.
    pub overflow: bool,
    /// Pixel extent of the content along the scroll axis.
    pub buffer_size: i32,
}

/// Inputs to [`Renderer::plan`].
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub rect: Rect,
    /// Field width minus a shown scrollbar.
    pub text_width: i32,
    pub padding: i32,
    /// Line metrics with any line height override applied.
    pub line: LineMetrics,
    pub offset: i32,
    pub single_line: bool,
    pub suffix: &'a str,
    pub wrapped: &'a [String],
    pub widths: &'a [i32],
}

/// Everything [`Renderer::draw`] paints besides the text runs.
#[derive(Debug, Clone, Copy)]
pub struct Paint<'a> {
    pub rect: Rect,
    pub font: FontId,
    pub size: f32,
    pub colors: FieldColors,
    pub handle_border: HandleBorder,
    pub scrollbar: &'a ScrollBar,
}

/// Alignment and masking applied when placing lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Renderer {
    pub horizontal: Align,
    pub vertical: Align,
    pub mask: Option<char>,
}

impl Renderer {
    #[must_use]
    pub fn new(horizontal: Align, vertical: Align, mask: Option<char>) -> Self {
        Self {
            horizontal,
            vertical,
            mask,
        }
    }

    #[must_use]
    pub fn from_style(style: &FieldStyle) -> Self {
        Self::new(style.horizontal, style.vertical, style.mask)
    }

    /// Place the visible lines.
    #[must_use]
    pub fn plan(&self, ctx: &RenderContext<'_>) -> RenderPlan {
        let count = ctx.wrapped.len().min(ctx.widths.len());
        let line_height = ctx.line.height.max(1);
        let count_px = i32::try_from(count).unwrap_or(i32::MAX);

        let buffer_size = if ctx.single_line {
            ctx.widths.first().copied().unwrap_or(0)
        } else {
            line_height.saturating_mul(count_px)
        };
        let extent = if ctx.single_line {
            ctx.text_width
        } else {
            ctx.rect.height
        };

        let mut plan = RenderPlan {
            buffer_size,
            ..RenderPlan::default()
        };
        if count == 0 {
            return plan;
        }

        let (first, last) = if ctx.single_line {
            (0, count - 1)
        } else {
            let first = usize::try_from(ctx.offset.saturating_neg().max(0) / line_height)
                .unwrap_or(usize::MAX);
            let rows = usize::try_from(ctx.rect.height.max(0) / line_height).unwrap_or(0);
            (first, first.saturating_add(rows + 1).min(count - 1))
        };
        plan.first_visible = first;

        let total = if ctx.single_line {
            line_height
        } else {
            buffer_size
        };
        let fits_vertically = total <= ctx.rect.height - ctx.padding * 2;
        let available = ctx.text_width - ctx.padding * 2;

        for i in first..=last {
            let row = i32::try_from(i).unwrap_or(i32::MAX).saturating_mul(line_height);

            let mut top = match self.vertical {
                Align::Center if fits_vertically => ctx.rect.y + (ctx.rect.height - total) / 2 + row,
                Align::End if fits_vertically => ctx.rect.bottom() - ctx.padding - total + row,
                _ => ctx.rect.y + ctx.padding + row,
            };
            let width = ctx.widths[i];
            let mut x = match self.horizontal {
                Align::Center if width <= available => ctx.rect.x + (ctx.text_width - width) / 2,
                Align::End if width <= available => ctx.rect.x + ctx.text_width - ctx.padding - width,
                _ => ctx.rect.x + ctx.padding,
            };

            if ctx.single_line {
                x = x.saturating_add(ctx.offset);
            } else {
                top = top.saturating_add(ctx.offset);
                if top >= ctx.rect.bottom() || top.saturating_add(line_height) <= ctx.rect.y {
                    continue;
                }
            }

            let line = &ctx.wrapped[i];
            let text = match self.mask {
                Some(mask) => masked(line, mask, ctx.suffix, i == count - 1),
                None => line.clone(),
            };
            plan.runs.push(TextRun {
                text,
                origin: Point::new(x, top.saturating_add(ctx.line.ascent)),
                line: i,
            });
        }

        plan.culled = count - plan.runs.len();
        plan.overflow = plan.culled > 0 || buffer_size > extent - ctx.padding * 2;
        plan
    }

    /// Draw a plan. Clipping to the field is always undone, even when a
    /// draw call fails.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        plan: &RenderPlan,
        paint: &Paint<'_>,
    ) -> Result<(), DrawError> {
        surface.push_clip(paint.rect)?;
        let drawn = draw_clipped(surface, plan, paint);
        let popped = surface.pop_clip();
        drawn.and(popped)
    }
}

fn draw_clipped<S: Surface + ?Sized>(
    surface: &mut S,
    plan: &RenderPlan,
    paint: &Paint<'_>,
) -> Result<(), DrawError> {
    if paint.colors.background.is_visible() {
        surface.fill_rect(paint.rect, paint.colors.background)?;
    }

    for run in plan.runs.iter().filter(|run| !run.text.is_empty()) {
        surface.draw_text(paint.font, paint.size, &run.text, run.origin, paint.colors.text)?;
    }

    let bar = paint.scrollbar;
    if bar.is_shown() {
        surface.fill_rect(bar.track(), paint.colors.scroll_area)?;
        surface.fill_rect(bar.handle(), paint.colors.scroll_handle)?;

        let border = paint.handle_border;
        if border.size > 0 {
            let colors: [Color; 4] = [border.left, border.top, border.right, border.bottom];
            for (rect, color) in bar.border_rects(border.size).into_iter().zip(colors) {
                surface.fill_rect(rect, color)?;
            }
        }
    }
    Ok(())
}

/// Replace every grapheme with `mask`, keeping a trailing `suffix` on the
/// final line readable.
fn masked(line: &str, mask: char, suffix: &str, last: bool) -> String {
    let body = if last && !suffix.is_empty() {
        line.strip_suffix(suffix)
    } else {
        None
    };
    match body {
        Some(body) => {
            let mut out: String = body.graphemes(true).map(|_| mask).collect();
            out.push_str(suffix);
            out
        }
        None => line.graphemes(true).map(|_| mask).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: LineMetrics = LineMetrics {
        height: 20,
        ascent: 15,
    };

    fn lines(texts: &[&str]) -> (Vec<String>, Vec<i32>) {
        let wrapped = texts.iter().map(|s| (*s).to_owned()).collect();
        let widths = texts.iter().map(|s| s.len() as i32 * 10).collect();
        (wrapped, widths)
    }

    fn ctx<'a>(wrapped: &'a [String], widths: &'a [i32], offset: i32) -> RenderContext<'a> {
        RenderContext {
            rect: Rect::new(0, 0, 200, 100),
            text_width: 200,
            padding: 5,
            line: METRICS,
            offset,
            single_line: false,
            suffix: "",
            wrapped,
            widths,
        }
    }

    #[test]
    fn start_aligned_lines() {
        let (wrapped, widths) = lines(&["ab", "cd"]);
        let plan = Renderer::default().plan(&ctx(&wrapped, &widths, 0));
        assert_eq!(plan.runs.len(), 2);
        assert_eq!(plan.runs[0].origin, Point::new(5, 20));
        assert_eq!(plan.runs[1].origin, Point::new(5, 40));
        assert_eq!(plan.buffer_size, 40);
        assert!(!plan.overflow);
        assert_eq!(plan.culled, 0);
    }

    #[test]
    fn horizontal_alignment() {
        let (wrapped, widths) = lines(&["abcd"]);
        let context = ctx(&wrapped, &widths, 0);

        let center = Renderer::new(Align::Center, Align::Start, None).plan(&context);
        assert_eq!(center.runs[0].origin.x, 80);

        let end = Renderer::new(Align::End, Align::Start, None).plan(&context);
        assert_eq!(end.runs[0].origin.x, 155);
    }

    #[test]
    fn too_wide_line_falls_back_to_start() {
        let (wrapped, widths) = lines(&["x".repeat(30).as_str()]);
        let plan = Renderer::new(Align::End, Align::Start, None).plan(&ctx(&wrapped, &widths, 0));
        assert_eq!(plan.runs[0].origin.x, 5);
    }

    #[test]
    fn vertical_alignment_when_content_fits() {
        let (wrapped, widths) = lines(&["a", "b"]);
        let context = ctx(&wrapped, &widths, 0);

        let center = Renderer::new(Align::Start, Align::Center, None).plan(&context);
        assert_eq!(center.runs[0].origin.y, 30 + 15);

        let end = Renderer::new(Align::Start, Align::End, None).plan(&context);
        assert_eq!(end.runs[1].origin.y, 100 - 5 - 20 + 15);
    }

    #[test]
    fn vertical_alignment_ignored_when_overflowing() {
        let texts: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let (wrapped, widths) = lines(&refs);
        let plan = Renderer::new(Align::Start, Align::End, None).plan(&ctx(&wrapped, &widths, 0));
        assert_eq!(plan.runs[0].origin.y, 20);
        assert!(plan.overflow);
        assert!(plan.culled > 0);
    }

    #[test]
    fn offset_selects_visible_lines() {
        let texts: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let (wrapped, widths) = lines(&refs);
        let plan = Renderer::default().plan(&ctx(&wrapped, &widths, -200));
        assert_eq!(plan.first_visible, 10);
        assert_eq!(plan.runs[0].line, 10);
        assert_eq!(plan.runs[0].origin.y, 5 + 15);
        assert!(plan.runs.iter().all(|run| run.origin.y - 15 < 100));
        assert_eq!(plan.culled, 20 - plan.runs.len());
    }

    #[test]
    fn single_line_shifts_x() {
        let (wrapped, widths) = lines(&["x".repeat(40).as_str()]);
        let mut context = ctx(&wrapped, &widths, -60);
        context.single_line = true;
        let plan = Renderer::default().plan(&context);
        assert_eq!(plan.runs[0].origin, Point::new(-55, 20));
        assert_eq!(plan.buffer_size, 400);
        assert!(plan.overflow);
    }

    #[test]
    fn mask_keeps_suffix() {
        let (wrapped, widths) = lines(&["pass", "word_"]);
        let mut context = ctx(&wrapped, &widths, 0);
        context.suffix = "_";
        let plan = Renderer::new(Align::Start, Align::Start, Some('*')).plan(&context);
        assert_eq!(plan.runs[0].text, "****");
        assert_eq!(plan.runs[1].text, "****_");
    }

    #[test]
    fn mask_counts_graphemes() {
        assert_eq!(masked("e\u{0301}\u{1F600}", '*', "", true), "**");
        assert_eq!(masked("ab", '*', "_", true), "**");
    }

    #[test]
    fn empty_plan() {
        let plan = Renderer::default().plan(&ctx(&[], &[], 0));
        assert!(plan.runs.is_empty());
        assert_eq!(plan.buffer_size, 0);
        assert!(!plan.overflow);
    }

    #[derive(Default)]
    struct Log {
        calls: Vec<String>,
        fail_text: bool,
    }

    impl Surface for Log {
        fn fill_rect(&mut self, rect: Rect, _color: Color) -> Result<(), DrawError> {
            self.calls.push(format!("fill {},{} {}x{}", rect.x, rect.y, rect.width, rect.height));
            Ok(())
        }

        fn draw_text(
            &mut self,
            _font: FontId,
            _size: f32,
            text: &str,
            _origin: Point,
            _color: Color,
        ) -> Result<(), DrawError> {
            if self.fail_text {
                return Err(DrawError::Backend("boom".into()));
            }
            self.calls.push(format!("text {text}"));
            Ok(())
        }

        fn push_clip(&mut self, _rect: Rect) -> Result<(), DrawError> {
            self.calls.push("push".into());
            Ok(())
        }

        fn pop_clip(&mut self) -> Result<(), DrawError> {
            self.calls.push("pop".into());
            Ok(())
        }
    }

    fn paint(bar: &ScrollBar) -> Paint<'_> {
        Paint {
            rect: Rect::new(0, 0, 200, 100),
            font: FontId(1),
            size: 16.0,
            colors: FieldColors::default(),
            handle_border: HandleBorder::default(),
            scrollbar: bar,
        }
    }

    #[test]
    fn draw_order() {
        let (wrapped, widths) = lines(&["ab", ""]);
        let plan = Renderer::default().plan(&ctx(&wrapped, &widths, 0));
        let mut bar = ScrollBar::new();
        bar.layout(Rect::new(0, 0, 200, 100), 32, true, 0.0);

        let mut log = Log::default();
        Renderer::default().draw(&mut log, &plan, &paint(&bar)).unwrap();
        assert_eq!(
            log.calls,
            [
                "push",
                "fill 0,0 200x100",
                "text ab",
                "fill 168,0 32x100",
                "fill 168,0 32x16",
                "pop"
            ]
        );
    }

    #[test]
    fn failed_draw_still_pops_clip() {
        let (wrapped, widths) = lines(&["ab"]);
        let plan = Renderer::default().plan(&ctx(&wrapped, &widths, 0));
        let bar = ScrollBar::new();
        let mut log = Log {
            fail_text: true,
            ..Log::default()
        };
        let result = Renderer::default().draw(&mut log, &plan, &paint(&bar));
        assert_eq!(result, Err(DrawError::Backend("boom".into())));
        assert_eq!(log.calls.last().map(String::as_str), Some("pop"));
    }

    #[test]
    fn handle_border_is_drawn() {
        let plan = RenderPlan::default();
        let mut bar = ScrollBar::new();
        bar.layout(Rect::new(0, 0, 200, 100), 32, true, 0.0);
        let mut paint = paint(&bar);
        paint.handle_border = HandleBorder::uniform(2, Color::BLACK);

        let mut log = Log::default();
        Renderer::default().draw(&mut log, &plan, &paint).unwrap();
        assert_eq!(log.calls.len(), 2 + 1 + 2 + 4);
    }
}
