//! Differential renderer for fullscreen mode.
//!
//! Compares each frame to the previous one and only outputs cells that
//! changed. Most frames of a flap board touch a handful of tiles, so this
//! keeps terminal I/O tiny.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update block
//! 2. For each cell: skip if equal to the previous frame, otherwise render
//!    it with the StatefulCellRenderer
//! 3. Write the output buffer in one call
//! 4. Keep the frame for the next comparison

use std::io::{self, Write};

use super::ansi;
use super::buffer::FrameBuffer;
use super::output::{OutputBuffer, StatefulCellRenderer};

/// Differential renderer for fullscreen mode.
pub struct DiffRenderer {
    output: OutputBuffer,
    cell_renderer: StatefulCellRenderer,
    previous: Option<FrameBuffer>,
    sink: Box<dyn Write>,
}

impl DiffRenderer {
    /// Renderer writing to stdout.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Renderer writing to any sink.
    pub fn with_writer<W: Write + 'static>(writer: W) -> Self {
        Self {
            output: OutputBuffer::new(),
            cell_renderer: StatefulCellRenderer::new(),
            previous: None,
            sink: Box::new(writer),
        }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns the number of cells written.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<usize> {
        let previous = self
            .previous
            .take()
            .filter(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        ansi::begin_sync(&mut self.output)?;
        self.cell_renderer.reset();

        let width = buffer.width() as usize;
        let mut written = 0;
        for (i, cell) in buffer.cells().iter().enumerate() {
            let unchanged = previous
                .as_ref()
                .is_some_and(|prev| prev.cells().get(i) == Some(cell));
            if unchanged {
                continue;
            }
            let x = (i % width) as u16;
            let y = (i / width) as u16;
            self.cell_renderer.render_cell(&mut self.output, x, y, cell)?;
            written += 1;
        }

        ansi::end_sync(&mut self.output)?;
        self.flush()?;

        self.previous = Some(buffer.clone());
        Ok(written)
    }

    /// Force a full redraw on the next render (after resize or corruption).
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Alternate screen, hidden cursor, mouse capture.
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        ansi::enter_alt_screen(&mut self.output)?;
        ansi::cursor_hide(&mut self.output)?;
        ansi::enable_mouse(&mut self.output)?;
        ansi::clear_screen(&mut self.output)?;
        self.flush()?;
        self.invalidate();
        Ok(())
    }

    /// Undo [`enter_fullscreen`](Self::enter_fullscreen).
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        ansi::reset(&mut self.output)?;
        ansi::disable_mouse(&mut self.output)?;
        ansi::cursor_show(&mut self.output)?;
        ansi::exit_alt_screen(&mut self.output)?;
        self.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush_to(&mut self.sink)?;
        self.sink.flush()
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DiffRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffRenderer")
            .field("has_previous", &self.has_previous())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attr, Rgba};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Sink(Rc<RefCell<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_first_frame_is_full() {
        let mut renderer = DiffRenderer::with_writer(Sink::default());
        let buffer = FrameBuffer::new(4, 3);
        assert_eq!(renderer.render(&buffer).unwrap(), 12);
        assert!(renderer.has_previous());
    }

    #[test]
    fn test_only_changed_cells_are_written() {
        let sink = Sink::default();
        let mut renderer = DiffRenderer::with_writer(sink.clone());
        let mut buffer = FrameBuffer::new(6, 2);
        renderer.render(&buffer).unwrap();

        buffer.draw_text(2, 1, "OK", Rgba::WHITE, None, Attr::NONE, None);
        sink.0.borrow_mut().clear();
        assert_eq!(renderer.render(&buffer).unwrap(), 2);

        let text = String::from_utf8_lossy(&sink.0.borrow()).into_owned();
        assert!(text.contains("\x1b[2;3H"));
        assert!(text.ends_with("OK\x1b[?2026l"));
    }

    #[test]
    fn test_unchanged_frame_writes_no_cells() {
        let mut renderer = DiffRenderer::with_writer(Sink::default());
        let buffer = FrameBuffer::new(5, 5);
        renderer.render(&buffer).unwrap();
        assert_eq!(renderer.render(&buffer).unwrap(), 0);
    }

    #[test]
    fn test_resize_and_invalidate_force_full_frame() {
        let mut renderer = DiffRenderer::with_writer(Sink::default());
        renderer.render(&FrameBuffer::new(2, 2)).unwrap();
        assert_eq!(renderer.render(&FrameBuffer::new(3, 2)).unwrap(), 6);

        renderer.invalidate();
        assert!(!renderer.has_previous());
        assert_eq!(renderer.render(&FrameBuffer::new(3, 2)).unwrap(), 6);
    }
}
