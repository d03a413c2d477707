//! Instrumented comparison of two lookup strategies
//!
//! Runs a baseline and a candidate [`Lookup`] over the same store snapshot and
//! the same query ids, timing every query with a wall clock.
//!
//! Timings are noisy by nature. What a report guarantees is:
//! - both strategies saw identical queries in identical order
//! - `mismatched_ids` lists every id where the two returned different results
//! - `winner` names the strategy with the strictly lower average (ties go to
//!   the baseline)

use crate::core::{Lookup, RecordStore};
use crate::types::{RecordId, TransactionRecord};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::{Duration, Instant};

/// Timing for a single query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryTiming {
    pub id: RecordId,
    pub found: bool,
    #[serde(rename = "time", serialize_with = "as_secs")]
    pub elapsed: Duration,
}

/// Aggregate timings for one strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodReport {
    pub method: &'static str,
    pub total_searches: usize,
    #[serde(serialize_with = "as_secs")]
    pub total_time: Duration,
    #[serde(serialize_with = "as_secs")]
    pub average_time: Duration,
    pub results: Vec<QueryTiming>,
}

/// Side-by-side result of a comparison run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub baseline: MethodReport,
    pub candidate: MethodReport,
    /// Baseline average divided by candidate average; infinite when the
    /// candidate average is zero
    pub speedup: f64,
    pub winner: &'static str,
    /// Ids where the two strategies disagreed
    pub mismatched_ids: Vec<RecordId>,
}

impl ComparisonReport {
    /// Whether both strategies returned the same result for every query
    pub fn results_match(&self) -> bool {
        self.mismatched_ids.is_empty()
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Comparison Results:")?;
        for report in [&self.baseline, &self.candidate] {
            writeln!(
                f,
                "{} - Average: {:.8} seconds ({} searches)",
                report.method,
                report.average_time.as_secs_f64(),
                report.total_searches
            )?;
        }
        writeln!(f, "Speedup: {:.2}x faster", self.speedup)?;
        writeln!(f, "Winner: {}", self.winner)?;
        if self.results_match() {
            write!(f, "Results: identical")
        } else {
            write!(f, "Results: mismatched for ids {:?}", self.mismatched_ids)
        }
    }
}

/// Time one strategy over every query id
pub fn benchmark_lookup(store: &RecordStore, lookup: &dyn Lookup, ids: &[RecordId]) -> MethodReport {
    timed_pass(store, lookup, ids).0
}

/// Run both strategies over the same store and ids and compare them
pub fn compare_lookups(
    store: &RecordStore,
    baseline: &dyn Lookup,
    candidate: &dyn Lookup,
    ids: &[RecordId],
) -> ComparisonReport {
    let (baseline_report, baseline_results) = timed_pass(store, baseline, ids);
    let (candidate_report, candidate_results) = timed_pass(store, candidate, ids);

    let mismatched_ids = ids
        .iter()
        .zip(baseline_results.iter().zip(candidate_results.iter()))
        .filter(|(_, (left, right))| left != right)
        .map(|(&id, _)| id)
        .collect();

    let baseline_avg = baseline_report.average_time.as_secs_f64();
    let candidate_avg = candidate_report.average_time.as_secs_f64();
    let speedup = if candidate_avg > 0.0 {
        baseline_avg / candidate_avg
    } else {
        f64::INFINITY
    };
    let winner = if candidate_report.average_time < baseline_report.average_time {
        candidate.name()
    } else {
        baseline.name()
    };

    ComparisonReport {
        baseline: baseline_report,
        candidate: candidate_report,
        speedup,
        winner,
        mismatched_ids,
    }
}

fn timed_pass<'s>(
    store: &'s RecordStore,
    lookup: &dyn Lookup,
    ids: &[RecordId],
) -> (MethodReport, Vec<Option<&'s TransactionRecord>>) {
    let mut total_time = Duration::ZERO;
    let mut timings = Vec::with_capacity(ids.len());
    let mut found = Vec::with_capacity(ids.len());

    for &id in ids {
        let start = Instant::now();
        let result = lookup.find(store, id);
        let elapsed = start.elapsed();

        total_time += elapsed;
        timings.push(QueryTiming {
            id,
            found: result.is_some(),
            elapsed,
        });
        found.push(result);
    }

    let average_time = if ids.is_empty() {
        Duration::ZERO
    } else {
        total_time.div_f64(ids.len() as f64)
    };

    let report = MethodReport {
        method: lookup.name(),
        total_searches: ids.len(),
        total_time,
        average_time,
        results: timings,
    };
    (report, found)
}

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}
