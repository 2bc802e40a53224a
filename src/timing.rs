//! Per-request phase timing, serialized as a `Server-Timing` header.
//!
//! ```rust
//! # async fn demo() {
//! use render_html::ServerTimer;
//!
//! let mut timer = ServerTimer::start("Request (total)");
//! let n = timer.with_timing("Routing", async { 42 }).await;
//! assert_eq!(n, 42);
//!
//! // "Routing;dur=0.01, Request (total);dur=0.03"
//! let header = timer.timings_to_string();
//! # let _ = header;
//! # }
//! ```

use std::fmt::Write as _;
use std::future::Future;
use std::time::{Duration, Instant};

/// Wall-clock timer session for one request.
///
/// Phases are appended in the order their futures settle. The session's own
/// `label` is emitted last, spanning from [`start`](Self::start) to the
/// moment the timings are serialized.
#[derive(Debug)]
pub struct ServerTimer {
    label: String,
    started: Instant,
    phases: Vec<(String, Duration)>,
}

impl ServerTimer {
    pub fn start(label: impl Into<String>) -> Self {
        Self { label: label.into(), started: Instant::now(), phases: Vec::new() }
    }

    /// Awaits `fut` and records how long it took under `phase`.
    ///
    /// The output is handed back untouched, so an `Err` stays an `Err` and its
    /// duration is still recorded.
    pub async fn with_timing<F: Future>(&mut self, phase: &str, fut: F) -> F::Output {
        let begin = Instant::now();
        let out = fut.await;
        self.record(phase, begin.elapsed());
        out
    }

    /// Appends a measurement taken elsewhere.
    pub fn record(&mut self, phase: &str, elapsed: Duration) {
        self.phases.push((phase.to_owned(), elapsed));
    }

    pub fn phases(&self) -> &[(String, Duration)] { &self.phases }

    /// Time since the session started.
    pub fn total(&self) -> Duration { self.started.elapsed() }

    /// `name;dur=12.34, other;dur=0.56, label;dur=13.10` — milliseconds.
    pub fn timings_to_string(&self) -> String {
        let total = self.total();
        let mut out = String::new();
        for (name, elapsed) in self.phases.iter().map(|(n, d)| (n.as_str(), *d))
            .chain(std::iter::once((self.label.as_str(), total)))
        {
            if !out.is_empty() {
                out.push_str(", ");
            }
            // Writing into a String cannot fail.
            let _ = write!(out, "{name};dur={:.2}", elapsed.as_secs_f64() * 1000.0);
        }
        out
    }
}
