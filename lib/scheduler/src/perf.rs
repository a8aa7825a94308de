//! Rolling-window performance monitoring for the scheduler.

use std::collections::VecDeque;

/// A snapshot of recent scheduler performance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfStats {
    pub fps: f64,
    pub avg_fps: f64,
    pub min_fps: f64,
    pub max_fps: f64,
    pub frame_time: f64,
    pub avg_frame_time: f64,
    pub min_frame_time: f64,
    pub max_frame_time: f64,
    pub update_count: u32,
    pub avg_update_count: f64,
}

impl std::fmt::Display for PerfStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fps={:.1} (avg {:.1}, {:.1}-{:.1}) frame_time={:.2}ms updates={} (avg {:.2})",
            self.fps,
            self.avg_fps,
            self.min_fps,
            self.max_fps,
            self.frame_time * 1000.0,
            self.update_count,
            self.avg_update_count
        )
    }
}

/// Tracks frame time and update-count samples over a rolling window.
#[derive(Debug, Clone)]
pub struct PerfMonitor {
    window_size: usize,
    last_wall_ms: Option<f64>,
    frame_times: VecDeque<f64>,
    update_counts: VecDeque<u32>,
}

impl PerfMonitor {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size: window_size.max(1),
            last_wall_ms: None,
            frame_times: VecDeque::new(),
            update_counts: VecDeque::new(),
        }
    }

    /// Records the gap since the previous `begin_frame` call as a frame
    /// time sample. The first call only establishes the baseline.
    pub fn begin_frame(&mut self, wall_ms: f64) {
        if let Some(last) = self.last_wall_ms {
            let dt = (wall_ms - last) / 1000.0;
            self.frame_times.push_back(dt);
            if self.frame_times.len() > self.window_size {
                self.frame_times.pop_front();
            }
        }
        self.last_wall_ms = Some(wall_ms);
    }

    pub fn end_frame(&mut self, update_count: u32) {
        self.update_counts.push_back(update_count);
        if self.update_counts.len() > self.window_size {
            self.update_counts.pop_front();
        }
    }

    pub fn stats(&self) -> PerfStats {
        let frame_time = self.frame_times.back().copied().unwrap_or(0.0);
        let (avg_frame_time, min_frame_time, max_frame_time) = summarize(&self.frame_times);
        let update_count = self.update_counts.back().copied().unwrap_or(0);
        let avg_update_count = if self.update_counts.is_empty() {
            0.0
        } else {
            self.update_counts.iter().map(|&c| c as f64).sum::<f64>() / self.update_counts.len() as f64
        };

        PerfStats {
            fps: safe_inverse(frame_time),
            avg_fps: safe_inverse(avg_frame_time),
            // Min FPS corresponds to the longest frame time, and vice versa.
            min_fps: safe_inverse(max_frame_time),
            max_fps: safe_inverse(min_frame_time),
            frame_time,
            avg_frame_time,
            min_frame_time,
            max_frame_time,
            update_count,
            avg_update_count,
        }
    }
}

fn summarize(samples: &VecDeque<f64>) -> (f64, f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let sum: f64 = samples.iter().sum();
    let avg = sum / samples.len() as f64;
    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    (avg, min, max)
}

fn safe_inverse(seconds: f64) -> f64 {
    if seconds <= 0.0 {
        0.0
    } else {
        1.0 / seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_fps_from_frame_gaps() {
        let mut perf = PerfMonitor::new(60);
        perf.begin_frame(0.0);
        perf.end_frame(1);
        perf.begin_frame(16.666);
        perf.end_frame(1);

        let stats = perf.stats();
        assert!((stats.fps - 60.0).abs() < 0.1);
        assert_eq!(stats.update_count, 1);
    }

    #[test]
    fn window_caps_at_configured_size() {
        let mut perf = PerfMonitor::new(3);
        for i in 0..10 {
            perf.begin_frame(i as f64 * 16.0);
            perf.end_frame(1);
        }
        assert_eq!(perf.frame_times.len(), 3);
        assert_eq!(perf.update_counts.len(), 3);
    }

    #[test]
    fn empty_monitor_reports_zeroed_stats() {
        let perf = PerfMonitor::new(60);
        let stats = perf.stats();
        assert_eq!(stats.fps, 0.0);
        assert_eq!(stats.update_count, 0);
    }
}
