//! Process-wide click engine.
//!
//! There is one engine per process, created on first use by
//! [`click_engine`] and never torn down. It owns the mute flag, so a mute
//! toggle anywhere silences every board.
//!
//! A terminal has no audio device; the audible tick is the terminal bell.
//! Bursts closer together than `min_gap` are coalesced into one ring so a
//! long board does not turn into a continuous beep.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

use super::{ClickFeedback, ClickTone, FeedbackError};

const BELL: &[u8] = b"\x07";
const DEFAULT_MIN_GAP: Duration = Duration::from_millis(30);

static ENGINE: OnceLock<Arc<ClickEngine>> = OnceLock::new();

/// Get the process-wide engine, creating it on first call.
pub fn click_engine() -> Arc<ClickEngine> {
    ENGINE
        .get_or_init(|| Arc::new(ClickEngine::with_writer(io::stdout())))
        .clone()
}

struct Output {
    writer: Box<dyn Write + Send>,
    last_ring: Option<Instant>,
}

/// Shared click state: mute flag, output, and a counter of delivered clicks.
pub struct ClickEngine {
    muted: AtomicBool,
    clicks: AtomicU64,
    min_gap: Duration,
    tone: ClickTone,
    output: Mutex<Output>,
}

impl ClickEngine {
    /// Engine writing bells to `writer`. Starts muted.
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            muted: AtomicBool::new(true),
            clicks: AtomicU64::new(0),
            min_gap: DEFAULT_MIN_GAP,
            tone: ClickTone::default(),
            output: Mutex::new(Output {
                writer: Box::new(writer),
                last_ring: None,
            }),
        }
    }

    /// Set the minimum spacing between rings.
    pub fn with_min_gap(mut self, gap: Duration) -> Self {
        self.min_gap = gap;
        self
    }

    pub fn with_tone(mut self, tone: ClickTone) -> Self {
        self.tone = tone;
        self
    }

    /// Waveform for downstream outputs that can play samples. The bell
    /// output ignores it.
    pub fn tone(&self) -> &ClickTone {
        &self.tone
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::SeqCst);
    }

    /// Flip the mute flag. Returns the new state (true = muted).
    pub fn toggle_mute(&self) -> bool {
        !self.muted.fetch_xor(true, Ordering::SeqCst)
    }

    /// Clicks delivered so far (coalesced clicks count once).
    pub fn clicks_played(&self) -> u64 {
        self.clicks.load(Ordering::SeqCst)
    }

    fn ring(&self) -> Result<(), FeedbackError> {
        if self.is_muted() {
            return Err(FeedbackError::Muted);
        }
        let mut output = self.output.lock().map_err(|_| FeedbackError::Unavailable)?;
        let now = Instant::now();
        if let Some(last) = output.last_ring {
            if now.duration_since(last) < self.min_gap {
                return Ok(());
            }
        }
        output.writer.write_all(BELL)?;
        output.writer.flush()?;
        output.last_ring = Some(now);
        self.clicks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl std::fmt::Debug for ClickEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickEngine")
            .field("muted", &self.is_muted())
            .field("clicks", &self.clicks_played())
            .field("min_gap", &self.min_gap)
            .finish()
    }
}

/// Click feedback through the terminal bell.
#[derive(Debug, Clone)]
pub struct TerminalClick {
    engine: Arc<ClickEngine>,
}

impl TerminalClick {
    /// Use the process-wide engine.
    pub fn new() -> Self {
        Self {
            engine: click_engine(),
        }
    }

    pub fn with_engine(engine: Arc<ClickEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<ClickEngine> {
        &self.engine
    }
}

impl Default for TerminalClick {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickFeedback for TerminalClick {
    fn play_click(&self) -> Result<(), FeedbackError> {
        if self.engine.is_muted() {
            return Err(FeedbackError::Muted);
        }
        // Haptics ride along with the click where a motor exists.
        let _ = self.vibrate(Duration::from_millis(10));
        self.engine.ring()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer that always fails, like a closed terminal.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_engine_starts_muted() {
        let engine = ClickEngine::with_writer(Vec::new());
        assert!(engine.is_muted());
        assert!(matches!(engine.ring(), Err(FeedbackError::Muted)));
        assert_eq!(engine.clicks_played(), 0);
    }

    #[test]
    fn test_toggle_mute_returns_new_state() {
        let engine = ClickEngine::with_writer(Vec::new());
        assert!(!engine.toggle_mute());
        assert!(!engine.is_muted());
        assert!(engine.toggle_mute());
        assert!(engine.is_muted());
    }

    #[test]
    fn test_rings_are_coalesced_within_gap() {
        let engine = Arc::new(ClickEngine::with_writer(Vec::new()).with_min_gap(Duration::from_secs(60)));
        engine.set_muted(false);
        let click = TerminalClick::with_engine(engine.clone());
        for _ in 0..5 {
            assert!(click.play_click().is_ok());
        }
        assert_eq!(engine.clicks_played(), 1);
    }

    #[test]
    fn test_zero_gap_rings_every_time() {
        let engine = Arc::new(ClickEngine::with_writer(Vec::new()).with_min_gap(Duration::ZERO));
        engine.set_muted(false);
        let click = TerminalClick::with_engine(engine.clone());
        for _ in 0..3 {
            click.play_click().unwrap();
        }
        assert_eq!(engine.clicks_played(), 3);
    }

    #[test]
    fn test_broken_output_reports_io_error() {
        let engine = Arc::new(ClickEngine::with_writer(Broken));
        engine.set_muted(false);
        let click = TerminalClick::with_engine(engine.clone());
        assert!(matches!(click.play_click(), Err(FeedbackError::Io(_))));
        assert_eq!(engine.clicks_played(), 0);
    }

    #[test]
    fn test_engine_tone_feeds_sample_players() {
        let tone = ClickTone {
            length: Duration::from_millis(10),
            ..ClickTone::default()
        };
        let engine = ClickEngine::with_writer(Vec::new()).with_tone(tone);
        assert_eq!(engine.tone().render_from(1000.0, 8_000).len(), 80);
    }

    #[test]
    fn test_vibration_unsupported() {
        let click = TerminalClick::with_engine(Arc::new(ClickEngine::with_writer(Vec::new())));
        assert!(matches!(
            click.vibrate(Duration::from_millis(10)),
            Err(FeedbackError::Unsupported(_))
        ));
    }

    #[test]
    fn test_global_engine_is_shared() {
        let a = click_engine();
        let b = click_engine();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
