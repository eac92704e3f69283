//! Frame timing statistics.
//!
//! Every processed frame records how long each stage took. Every `window`
//! frames the averages and the achieved frame rate are logged and the
//! window restarts.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::info;

/// Stage durations of one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTimings {
    /// Downsample and BGR to float RGB.
    pub convert: Duration,
    /// LUT bake (on change) and sampling, or direct transform.
    pub grade: Duration,
    /// Clamp and quantize to 8-bit BGR.
    pub quantize: Duration,
    /// Resize to output size.
    pub resize: Duration,
}

impl FrameTimings {
    /// Sum of all stages.
    pub fn total(&self) -> Duration {
        self.convert + self.grade + self.quantize + self.resize
    }

    fn add(&mut self, other: &Self) {
        self.convert += other.convert;
        self.grade += other.grade;
        self.quantize += other.quantize;
        self.resize += other.resize;
    }

    fn div(&self, n: u32) -> Self {
        Self {
            convert: self.convert / n,
            grade: self.grade / n,
            quantize: self.quantize / n,
            resize: self.resize / n,
        }
    }
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Averages over one completed window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsReport {
    /// Frames in the window.
    pub frames: u32,
    /// Frames per second over wall-clock time.
    pub fps: f64,
    /// Mean stage durations.
    pub average: FrameTimings,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.average;
        write!(
            f,
            "{:.1} fps | convert {:.2}ms grade {:.2}ms quantize {:.2}ms resize {:.2}ms | total {:.2}ms",
            self.fps,
            ms(a.convert),
            ms(a.grade),
            ms(a.quantize),
            ms(a.resize),
            ms(a.total())
        )
    }
}

/// Rolling frame statistics.
#[derive(Debug, Clone)]
pub struct FrameStats {
    window: u32,
    frames: u32,
    sum: FrameTimings,
    window_start: Instant,
    last: FrameTimings,
    total_frames: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

impl FrameStats {
    /// Frames per report.
    pub const DEFAULT_WINDOW: u32 = 60;

    /// Creates stats reporting every `window` frames (at least 1).
    pub fn new(window: u32) -> Self {
        Self {
            window: window.max(1),
            frames: 0,
            sum: FrameTimings::default(),
            window_start: Instant::now(),
            last: FrameTimings::default(),
            total_frames: 0,
        }
    }

    /// Records one frame, returning a report when a window completes.
    pub fn record(&mut self, timings: FrameTimings) -> Option<StatsReport> {
        self.last = timings;
        self.sum.add(&timings);
        self.frames += 1;
        self.total_frames += 1;

        if self.frames < self.window {
            return None;
        }

        let elapsed = self.window_start.elapsed().as_secs_f64();
        let report = StatsReport {
            frames: self.frames,
            fps: if elapsed > 0.0 { self.frames as f64 / elapsed } else { 0.0 },
            average: self.sum.div(self.frames),
        };
        info!("{report}");

        self.frames = 0;
        self.sum = FrameTimings::default();
        self.window_start = Instant::now();
        Some(report)
    }

    /// Timings of the most recent frame.
    #[inline]
    pub fn last(&self) -> &FrameTimings {
        &self.last
    }

    /// Frames recorded since creation.
    #[inline]
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

/// Measures consecutive stages.
#[derive(Debug)]
pub(crate) struct Stopwatch {
    mark: Instant,
}

impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self { mark: Instant::now() }
    }

    /// Time since the previous lap (or start).
    pub(crate) fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let d = now - self.mark;
        self.mark = now;
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(ms: u64) -> FrameTimings {
        FrameTimings {
            convert: Duration::from_millis(ms),
            grade: Duration::from_millis(2 * ms),
            ..Default::default()
        }
    }

    #[test]
    fn reports_every_window() {
        let mut s = FrameStats::new(3);
        assert!(s.record(t(1)).is_none());
        assert!(s.record(t(2)).is_none());
        let r = s.record(t(3)).unwrap();
        assert_eq!(r.frames, 3);
        assert_eq!(r.average.convert, Duration::from_millis(2));
        assert_eq!(r.average.grade, Duration::from_millis(4));
        assert_eq!(r.average.total(), Duration::from_millis(6));
        assert!(s.record(t(1)).is_none());
        assert_eq!(s.total_frames(), 4);
        assert_eq!(s.last(), &t(1));
    }

    #[test]
    fn zero_window_reports_each_frame() {
        let mut s = FrameStats::new(0);
        assert!(s.record(t(1)).is_some());
    }

    #[test]
    fn report_formats() {
        let r = StatsReport { frames: 1, fps: 30.0, average: t(1) };
        let text = r.to_string();
        assert!(text.starts_with("30.0 fps"));
        assert!(text.contains("grade 2.00ms"));
    }
}
