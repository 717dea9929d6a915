//! Minimal metrics registry for the gateway.
//!
//! Counter and histogram types with dynamic labels backed by `DashMap`. Labels
//! are flattened into sorted key vectors to keep deterministic ordering.
//! Histogram buckets are fixed in microseconds to avoid floating point math.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str(r.key()), val);
        }
    }
}

// 100us, 500us, 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s, 2s
const BUCKETS_MICROS: [u64; 10] = [
    100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000, 2_000_000,
];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment cumulative buckets (microsecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self.map.entry(label_key(labels)).or_default();
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let hist = r.value();
            let labels = label_str(r.key());
            let prefix = if labels.is_empty() { String::new() } else { format!("{},", labels) };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = hist.sum.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

#[derive(Default)]
pub struct GatewayMetrics {
    pub http_requests: CounterVec,
    pub store_errors: CounterVec,
    /// Microseconds.
    pub store_duration: HistogramVec,
    draining: AtomicBool,
}

impl GatewayMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.http_requests.render("hitcount_http_requests_total", &mut out);
        self.store_errors.render("hitcount_store_errors_total", &mut out);
        self.store_duration.render("hitcount_store_duration_micros", &mut out);
        let _ = writeln!(
            out,
            "# TYPE hitcount_draining gauge\nhitcount_draining {}",
            u8::from(self.is_draining())
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_labels_are_order_independent() {
        let c = CounterVec::default();
        c.inc(&[("route", "/"), ("status", "200")]);
        c.inc(&[("status", "200"), ("route", "/")]);
        assert_eq!(c.get(&[("route", "/"), ("status", "200")]), 2);
        assert_eq!(c.get(&[("route", "/"), ("status", "503")]), 0);
    }

    #[test]
    fn histogram_buckets_are_cumulative() {
        let m = GatewayMetrics::default();
        m.store_duration.observe(&[("op", "incr")], Duration::from_micros(700));
        let out = m.render();
        assert!(out.contains("hitcount_store_duration_micros_bucket{op=\"incr\",le=\"500\"} 0"));
        assert!(out.contains("hitcount_store_duration_micros_bucket{op=\"incr\",le=\"1000\"} 1"));
        assert!(out.contains("hitcount_store_duration_micros_bucket{op=\"incr\",le=\"+Inf\"} 1"));
        assert!(out.contains("hitcount_store_duration_micros_sum{op=\"incr\"} 700"));
    }

    #[test]
    fn draining_rendered_as_gauge() {
        let m = GatewayMetrics::default();
        assert!(m.render().contains("hitcount_draining 0"));
        m.set_draining();
        assert!(m.render().contains("hitcount_draining 1"));
    }

    #[test]
    fn label_values_escaped() {
        let c = CounterVec::default();
        c.inc(&[("op", "a\"b")]);
        let mut out = String::new();
        c.render("x_total", &mut out);
        assert!(out.contains("x_total{op=\"a\\\"b\"} 1"));
    }
}
