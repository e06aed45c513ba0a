//! Per-request outcome counts and latencies for one run.

use std::collections::BTreeMap;
use std::time::Duration;

use common::TargetError;
use tracing::info;

/// Outcome of one request issued by a virtual user.
#[derive(Debug)]
pub struct Sample {
    /// Request name, e.g. `"Load Account"`.
    pub request: &'static str,
    pub elapsed: Duration,
    pub result: Result<(), TargetError>,
}

/// Aggregates for one request name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestStats {
    pub ok: u64,
    pub ko: u64,
    pub min: Option<Duration>,
    pub max: Option<Duration>,
    total: Duration,
    /// KO counts keyed by [`TargetError::label`].
    pub failures: BTreeMap<String, u64>,
}

impl RequestStats {
    /// Mean latency across all samples, OK and KO.
    pub fn mean(&self) -> Option<Duration> {
        let n = u32::try_from(self.ok + self.ko).ok().filter(|&n| n > 0)?;
        Some(self.total / n)
    }

    fn record(&mut self, sample: &Sample) {
        match &sample.result {
            Ok(()) => self.ok += 1,
            Err(e) => {
                self.ko += 1;
                *self.failures.entry(e.label()).or_default() += 1;
            }
        }
        self.min = Some(self.min.map_or(sample.elapsed, |m| m.min(sample.elapsed)));
        self.max = Some(self.max.map_or(sample.elapsed, |m| m.max(sample.elapsed)));
        self.total += sample.elapsed;
    }
}

/// Run report: [`RequestStats`] per request name, plus feeder shortfall.
#[derive(Debug, Default)]
pub struct Report {
    requests: BTreeMap<&'static str, RequestStats>,
    /// Virtual users that started after the transaction feeder ran dry.
    pub idle_users: usize,
}

impl Report {
    /// Fold one sample into the report.
    pub fn record(&mut self, sample: &Sample) {
        self.requests
            .entry(sample.request)
            .or_default()
            .record(sample);
    }

    /// Stats for `request`, if any sample was recorded under that name.
    #[cfg(test)]
    pub fn stats(&self, request: &str) -> Option<&RequestStats> {
        self.requests.get(request)
    }

    /// Total successful requests.
    pub fn succeeded(&self) -> u64 {
        self.requests.values().map(|s| s.ok).sum()
    }

    /// Total failed requests.
    pub fn failed(&self) -> u64 {
        self.requests.values().map(|s| s.ko).sum()
    }

    /// Emit one structured log line per request name and a run summary.
    pub fn log(&self) {
        for (request, stats) in &self.requests {
            info!(
                request,
                ok = stats.ok,
                ko = stats.ko,
                min_ms = stats.min.map(|d| d.as_millis() as u64),
                max_ms = stats.max.map(|d| d.as_millis() as u64),
                mean_ms = stats.mean().map(|d| d.as_millis() as u64),
                failures = ?stats.failures,
                "request summary"
            );
        }
        info!(
            ok = self.succeeded(),
            ko = self.failed(),
            idle_users = self.idle_users,
            "run summary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(request: &'static str, ms: u64, result: Result<(), TargetError>) -> Sample {
        Sample {
            request,
            elapsed: Duration::from_millis(ms),
            result,
        }
    }

    #[test]
    fn empty_report() {
        let report = Report::default();
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failed(), 0);
        assert!(report.stats("Load Account").is_none());
    }

    #[test]
    fn aggregates_per_request() {
        let mut report = Report::default();
        report.record(&sample("Load Account", 10, Ok(())));
        report.record(&sample("Load Account", 30, Ok(())));
        report.record(&sample(
            "Process Transaction",
            5,
            Err(TargetError::UnexpectedStatus(500)),
        ));
        report.record(&sample(
            "Process Transaction",
            7,
            Err(TargetError::UnexpectedStatus(500)),
        ));
        report.record(&sample(
            "Process Transaction",
            9,
            Err(TargetError::Transport("reset".into())),
        ));

        let accounts = report.stats("Load Account").unwrap();
        assert_eq!((accounts.ok, accounts.ko), (2, 0));
        assert_eq!(accounts.min, Some(Duration::from_millis(10)));
        assert_eq!(accounts.max, Some(Duration::from_millis(30)));
        assert_eq!(accounts.mean(), Some(Duration::from_millis(20)));

        let txs = report.stats("Process Transaction").unwrap();
        assert_eq!((txs.ok, txs.ko), (0, 3));
        assert_eq!(txs.failures.get("status_500"), Some(&2));
        assert_eq!(txs.failures.get("transport"), Some(&1));

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 3);
    }

    #[test]
    fn mean_of_no_samples_is_none() {
        assert_eq!(RequestStats::default().mean(), None);
    }
}
