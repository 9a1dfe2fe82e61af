//! Page - sections of effects composed into frames.
//!
//! A page owns its effects as plain values. The event loop calls
//! [`Page::advance`] with the frame time and re-renders when it reports a
//! change; [`Page::compose`] lays the sections out with taffy, draws them
//! into a canvas as tall as the content and copies the scrolled viewport
//! out of it.
//!
//! Region ids in [`Frame::hit_regions`] are section indices, so a hover
//! reported by the hit grid maps straight back to [`Page::hover`].

use std::time::Duration;

use tracing::debug;

use crate::effects::{HighlightSweep, NoiseField};
use crate::error::Result;
use crate::layout::{self, Align, Block, StackLayout, StackStyle};
use crate::renderer::{FrameBuffer, string_width};
use crate::reveal::{RevealSequencer, ScrambleReveal};
use crate::types::{Attr, ClipRect, Rgba};
use crate::widgets::{self, FlapStyle};

// =============================================================================
// Sections
// =============================================================================

/// The animated part of a section.
#[derive(Debug)]
pub enum SectionEffect {
    Flap {
        reveal: RevealSequencer,
        style: FlapStyle,
    },
    Ticker(RevealSequencer),
    Scramble {
        reveal: ScrambleReveal,
        fg: Rgba,
    },
    Highlight(HighlightSweep),
    /// Static lines only.
    Text,
}

/// A line of static text under the effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub fg: Rgba,
    pub attrs: Attr,
}

/// One block of the page.
#[derive(Debug)]
pub struct Section {
    effect: SectionEffect,
    lines: Vec<Line>,
    align: Align,
}

impl Section {
    fn with_effect(effect: SectionEffect) -> Self {
        Self {
            effect,
            lines: Vec::new(),
            align: Align::Start,
        }
    }

    pub fn flap(reveal: RevealSequencer, style: FlapStyle) -> Self {
        Self::with_effect(SectionEffect::Flap { reveal, style })
    }

    pub fn ticker(reveal: RevealSequencer) -> Self {
        Self::with_effect(SectionEffect::Ticker(reveal))
    }

    pub fn scramble(reveal: ScrambleReveal, fg: Rgba) -> Self {
        Self::with_effect(SectionEffect::Scramble { reveal, fg })
    }

    pub fn highlight(sweep: HighlightSweep) -> Self {
        Self::with_effect(SectionEffect::Highlight(sweep))
    }

    pub fn text() -> Self {
        Self::with_effect(SectionEffect::Text)
    }

    /// Add a plain line.
    pub fn line(self, text: impl Into<String>, fg: Rgba) -> Self {
        self.styled_line(text, fg, Attr::NONE)
    }

    pub fn styled_line(mut self, text: impl Into<String>, fg: Rgba, attrs: Attr) -> Self {
        self.lines.push(Line {
            text: text.into(),
            fg,
            attrs,
        });
        self
    }

    /// Center the section (and its lines) in the column.
    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn effect(&self) -> &SectionEffect {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut SectionEffect {
        &mut self.effect
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Whether pointing at this section retriggers it.
    pub fn is_hoverable(&self) -> bool {
        matches!(
            self.effect,
            SectionEffect::Flap { .. } | SectionEffect::Ticker(_) | SectionEffect::Scramble { .. }
        )
    }

    fn effect_size(&self) -> (u16, u16) {
        match &self.effect {
            SectionEffect::Flap { reveal, style } => style.measure(&reveal.snapshot().slots),
            SectionEffect::Ticker(reveal) => (reveal.len() as u16, 1),
            SectionEffect::Scramble { reveal, .. } => (reveal.glyphs().len() as u16, 1),
            SectionEffect::Highlight(sweep) => (string_width(sweep.text()) as u16, 1),
            SectionEffect::Text => (0, 0),
        }
    }

    /// Content size: the effect with its lines below.
    pub fn measure(&self) -> (u16, u16) {
        let (effect_width, effect_height) = self.effect_size();
        let line_width = self
            .lines
            .iter()
            .map(|line| string_width(&line.text) as u16)
            .max()
            .unwrap_or(0);
        (
            effect_width.max(line_width),
            effect_height.saturating_add(self.lines.len() as u16),
        )
    }

    fn block(&self) -> Block {
        let (width, height) = self.measure();
        Block {
            width,
            height,
            align: self.align,
        }
    }

    fn start(&mut self, now: Duration) {
        match &mut self.effect {
            SectionEffect::Flap { reveal, .. } | SectionEffect::Ticker(reveal) => reveal.start(now),
            SectionEffect::Scramble { reveal, .. } => reveal.start(now),
            SectionEffect::Highlight(_) | SectionEffect::Text => {}
        }
    }

    fn advance(&mut self, now: Duration) -> bool {
        match &mut self.effect {
            SectionEffect::Flap { reveal, .. } | SectionEffect::Ticker(reveal) => reveal.advance(now),
            SectionEffect::Scramble { reveal, .. } => reveal.advance(now),
            SectionEffect::Highlight(sweep) => sweep.advance(now),
            SectionEffect::Text => false,
        }
    }

    fn next_deadline(&self, now: Duration) -> Option<Duration> {
        match &self.effect {
            SectionEffect::Flap { reveal, .. } | SectionEffect::Ticker(reveal) => reveal.next_deadline(now),
            SectionEffect::Scramble { reveal, .. } => reveal.next_deadline(now),
            SectionEffect::Highlight(sweep) => sweep.next_deadline(),
            SectionEffect::Text => None,
        }
    }

    /// Retrigger on pointer enter. Returns true if an animation started.
    fn hover(&mut self, now: Duration) -> bool {
        match &mut self.effect {
            SectionEffect::Flap { reveal, .. } | SectionEffect::Ticker(reveal) => {
                reveal.retrigger(now);
                true
            }
            SectionEffect::Scramble { reveal, .. } => reveal.hover(now),
            SectionEffect::Highlight(_) | SectionEffect::Text => false,
        }
    }

    fn set_visible(&mut self, visible: bool, now: Duration) {
        if let SectionEffect::Highlight(sweep) = &mut self.effect {
            sweep.set_visible(visible, now);
        }
    }

    fn draw(&self, canvas: &mut FrameBuffer, rect: ClipRect) {
        let clip = Some(&rect);
        let (x, y) = (rect.x, rect.y);
        let effect_height = self.effect_size().1;

        match &self.effect {
            SectionEffect::Flap { reveal, style } => {
                let snapshot = reveal.snapshot();
                let (effect_width, _) = style.measure(&snapshot.slots);
                let offset = self.center_offset(rect.width, effect_width);
                widgets::draw_flap(canvas, x + offset, y, &snapshot, style, clip);
            }
            SectionEffect::Ticker(reveal) => {
                let offset = self.center_offset(rect.width, reveal.len() as u16);
                widgets::draw_ticker(canvas, x + offset, y, &reveal.snapshot(), clip);
            }
            SectionEffect::Scramble { reveal, fg } => {
                let offset = self.center_offset(rect.width, reveal.glyphs().len() as u16);
                widgets::draw_scramble(canvas, x + offset, y, reveal, *fg, clip);
            }
            SectionEffect::Highlight(sweep) => {
                let offset = self.center_offset(rect.width, string_width(sweep.text()) as u16);
                widgets::draw_highlight(canvas, x + offset, y, sweep, clip);
            }
            SectionEffect::Text => {}
        }

        for (i, line) in self.lines.iter().enumerate() {
            let row = y + effect_height + i as u16;
            match self.align {
                Align::Start => {
                    canvas.draw_text(x, row, &line.text, line.fg, None, line.attrs, clip);
                }
                Align::Center => {
                    canvas.draw_text_centered(x, row, rect.width, &line.text, line.fg, None, line.attrs, clip);
                }
            }
        }
    }

    fn center_offset(&self, outer: u16, inner: u16) -> u16 {
        match self.align {
            Align::Start => 0,
            Align::Center => outer.saturating_sub(inner) / 2,
        }
    }
}

// =============================================================================
// Frame
// =============================================================================

/// A pointer target on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub rect: ClipRect,
    /// Section index.
    pub id: usize,
}

/// Result of composing a page.
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: FrameBuffer,
    pub hit_regions: Vec<HitRegion>,
}

// =============================================================================
// Page
// =============================================================================

/// Ordered sections over a background, optionally grained with noise.
#[derive(Debug)]
pub struct Page {
    sections: Vec<Section>,
    stack: StackStyle,
    background: Rgba,
    noise: Option<NoiseField>,
    viewport: (u16, u16),
    scroll: u16,
    started: bool,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            stack: StackStyle::default(),
            background: Rgba::BACKGROUND,
            noise: None,
            viewport: (0, 0),
            scroll: 0,
            started: false,
        }
    }

    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    pub fn with_noise(mut self, noise: NoiseField) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn with_stack(mut self, stack: StackStyle) -> Self {
        self.stack = stack;
        self
    }

    /// Append a section. Returns its index, which is also its region id.
    pub fn push(&mut self, section: Section) -> usize {
        self.sections.push(section);
        self.sections.len() - 1
    }

    /// Builder form of [`push`](Self::push).
    pub fn section(mut self, section: Section) -> Self {
        self.push(section);
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Run the entrance of every section and size the page to the viewport.
    /// Later calls do nothing.
    pub fn start(&mut self, width: u16, height: u16, now: Duration) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        for section in &mut self.sections {
            section.start(now);
        }
        debug!(sections = self.sections.len(), "page started");
        self.resize(width, height, now)
    }

    /// Step every effect to `now`. Returns true if anything on screen moved.
    pub fn advance(&mut self, now: Duration) -> bool {
        let mut changed = false;
        for section in &mut self.sections {
            changed |= section.advance(now);
        }
        if let Some(noise) = &mut self.noise {
            changed |= noise.advance();
        }
        changed
    }

    /// Time until the next scheduled change. Noise animates every frame.
    pub fn next_deadline(&self, now: Duration) -> Option<Duration> {
        if self.noise.as_ref().is_some_and(|noise| noise.opacity() > 0.0) {
            return Some(Duration::ZERO);
        }
        self.sections
            .iter()
            .filter_map(|section| section.next_deadline(now))
            .min()
    }

    /// Pointer entered region `id`. Returns true if an animation restarted.
    pub fn hover(&mut self, id: usize, now: Duration) -> bool {
        self.sections.get_mut(id).is_some_and(|section| section.hover(now))
    }

    /// New viewport size. Clamps the scroll offset and refreshes visibility.
    pub fn resize(&mut self, width: u16, height: u16, now: Duration) -> Result<()> {
        self.viewport = (width, height);
        if let Some(noise) = &mut self.noise {
            noise.resize(width, height);
        }
        self.scroll_to(self.scroll, now)
    }

    /// Scroll by `delta` rows (negative is up). Returns the new offset.
    pub fn scroll_by(&mut self, delta: i32, now: Duration) -> Result<u16> {
        let target = (self.scroll as i32 + delta).clamp(0, u16::MAX as i32) as u16;
        self.scroll_to(target, now)?;
        Ok(self.scroll)
    }

    fn scroll_to(&mut self, offset: u16, now: Duration) -> Result<()> {
        let (width, height) = self.viewport;
        let layout = self.layout(width)?;
        let max_scroll = layout.content_height.saturating_sub(height);
        self.scroll = offset.min(max_scroll);

        let top = self.scroll;
        let bottom = self.scroll.saturating_add(height);
        for (section, rect) in self.sections.iter_mut().zip(&layout.rects) {
            let visible = rect.height > 0 && rect.y < bottom && rect.y + rect.height > top;
            section.set_visible(visible, now);
        }
        Ok(())
    }

    /// Run taffy over the current section sizes.
    pub fn layout(&self, width: u16) -> Result<StackLayout> {
        let blocks: Vec<Block> = self.sections.iter().map(Section::block).collect();
        layout::stack(&blocks, width, self.stack)
    }

    // -------------------------------------------------------------------------
    // Composition
    // -------------------------------------------------------------------------

    /// Draw the page at `width` x `height` with the current scroll offset.
    pub fn compose(&self, width: u16, height: u16) -> Result<Frame> {
        let layout = self.layout(width)?;
        let mut canvas = FrameBuffer::with_background(width, layout.content_height.max(height), self.background);
        for (section, rect) in self.sections.iter().zip(&layout.rects) {
            section.draw(&mut canvas, *rect);
        }

        let mut buffer = FrameBuffer::with_background(width, height, self.background);
        for row in 0..height {
            let source = row.saturating_add(self.scroll);
            for col in 0..width {
                if let (Some(cell), Some(target)) = (canvas.get(col, source), buffer.get_mut(col, row)) {
                    *target = *cell;
                }
            }
        }

        if let Some(noise) = &self.noise {
            let bounds = buffer.bounds();
            noise.paint(&mut buffer, bounds);
        }

        let viewport = ClipRect::new(0, self.scroll, width, height);
        let hit_regions = self
            .sections
            .iter()
            .zip(&layout.rects)
            .enumerate()
            .filter(|(_, (section, _))| section.is_hoverable())
            .filter_map(|(id, (_, rect))| {
                let visible = rect.intersect(&viewport)?;
                Some(HitRegion {
                    rect: ClipRect::new(visible.x, visible.y - self.scroll, visible.width, visible.height),
                    id,
                })
            })
            .collect();

        Ok(Frame { buffer, hit_regions })
    }
}

// =============================================================================
// Tests
// =============================================================================
