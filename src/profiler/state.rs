use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

/// Total time spent in each profiled method
///
/// Durations from concurrent calls are summed, so the total for a method
/// called from many workers can exceed the wall-clock time of the run.
#[derive(Debug, Default)]
pub struct ProfilingState {
    totals: Mutex<BTreeMap<String, Duration>>,
}

impl ProfilingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` to the running total of `method`
    pub fn record(&self, method: &str, elapsed: Duration) {
        let mut totals = self.totals.lock().unwrap_or_else(|e| e.into_inner());
        match totals.get_mut(method) {
            Some(total) => *total += elapsed,
            None => {
                totals.insert(method.to_string(), elapsed);
            }
        }
    }

    /// Total recorded for `method`, if it was ever called
    pub fn total(&self, method: &str) -> Option<Duration> {
        let totals = self.totals.lock().unwrap_or_else(|e| e.into_inner());
        totals.get(method).copied()
    }

    /// Writes one line per method, sorted by method name
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let totals = self.totals.lock().unwrap_or_else(|e| e.into_inner());
        for (method, elapsed) in totals.iter() {
            writeln!(writer, "{} took {}", method, format_duration(*elapsed))?;
        }
        Ok(())
    }
}

/// Formats as `"<minutes>m <seconds>s <millis>ms"`
pub fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!(
        "{}m {}s {}ms",
        total_secs / 60,
        total_secs % 60,
        elapsed.subsec_millis()
    )
}
