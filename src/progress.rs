//! Step-counted render progress.
//!
//! Progress state is an explicit context threaded through the render call,
//! no global counters. The sink is a capability handed in by the caller; it
//! is invoked from the render (worker) context, and marshaling to an
//! interface thread is the caller's responsibility.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use tracing::debug;

/// Callback receiving `(percent in [0,100], message)`.
pub type ProgressSink = dyn Fn(u8, &str) + Send + Sync;

/// Monotonic `(current_step, total_steps)` progress with an injected sink.
///
/// `total_steps` for a render is `2 * image_count + 3`: one start step, two
/// per image, one for concatenation, one for encode completion.
pub struct ProgressContext {
    current: u32,
    total: u32,
    sink: Arc<ProgressSink>,
}

impl ProgressContext {
    pub fn new(image_count: usize, sink: Arc<ProgressSink>) -> Self {
        Self {
            current: 0,
            total: (image_count as u32) * 2 + 3,
            sink,
        }
    }

    pub fn advance(&mut self, message: &str) {
        self.current = (self.current + 1).min(self.total);
        (self.sink)(self.percent(), message);
    }

    pub fn percent(&self) -> u8 {
        ((self.current * 100) / self.total.max(1)).min(100) as u8
    }

    pub fn sink(&self) -> Arc<ProgressSink> {
        Arc::clone(&self.sink)
    }
}

/// Background progress estimator for the encode window.
///
/// The encode step offers no true feedback, so this polls elapsed wall-clock
/// time against `expected_secs` (a heuristic, roughly
/// `timeline_duration * 0.5 * quality_multiplier`, not a guarantee) and
/// emits interpolated percentages between `from_percent` and `to_percent`.
/// It performs no side effects on render data. The thread is signaled to
/// stop and joined on drop, on every exit path.
pub struct EncodeEstimator {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl EncodeEstimator {
    pub fn start(
        expected_secs: f64,
        from_percent: u8,
        to_percent: u8,
        sink: Arc<ProgressSink>,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let expected = expected_secs.max(0.5);
        let span = f64::from(to_percent.saturating_sub(from_percent));
        let handle = thread::spawn(move || {
            let started = Instant::now();
            while !stop_flag.load(Ordering::Relaxed) {
                let frac = (started.elapsed().as_secs_f64() / expected).min(0.99);
                let percent = f64::from(from_percent) + frac * span;
                sink(percent as u8, "Encoding video");
                thread::sleep(Duration::from_millis(250));
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Signal the estimator and wait for it; called implicitly on drop.
    pub fn finish(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                debug!("encode estimator thread panicked");
            }
        }
    }
}

impl Drop for EncodeEstimator {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}
