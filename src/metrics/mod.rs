//! Prometheus metrics for the HTTP surface and scan runs

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub scans_total: IntCounterVec,
    pub scan_duration_seconds: Histogram,
    pub signals_total: IntCounterVec,
    pub fetch_failures_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let scans_total = IntCounterVec::new(
            Opts::new("scans_total", "Completed scans by result status"),
            &["status"],
        )?;
        let scan_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("scan_duration_seconds", "Wall time of a full scan")
                .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;
        let signals_total = IntCounterVec::new(
            Opts::new("signals_total", "Per-symbol verdicts by signal"),
            &["signal"],
        )?;
        let fetch_failures_total = IntCounter::new(
            "fetch_failures_total",
            "Symbols omitted from a scan because their fetch failed",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(scans_total.clone()))?;
        registry.register(Box::new(scan_duration_seconds.clone()))?;
        registry.register(Box::new(signals_total.clone()))?;
        registry.register(Box::new(fetch_failures_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            scans_total,
            scan_duration_seconds,
            signals_total,
            fetch_failures_total,
        })
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
