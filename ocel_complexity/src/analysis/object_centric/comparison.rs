//! Comparison of complexity metrics across several logs
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use thiserror::Error;

use super::complexity::metric_table::{MetricKey, MetricTable};
use crate::core::io::{ExportError, Exportable};

/// Error when the given metric tables cannot be compared
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    /// Fewer than two logs were given
    #[error("at least two logs are needed for a comparison, got {provided}")]
    NotEnoughLogs {
        /// Number of logs given
        provided: usize,
    },
    /// No object type occurs in more than one log
    #[error("logs {} do not share any object type", logs.join(", "))]
    IncomparableSets {
        /// IDs of the compared logs
        logs: Vec<String>,
    },
}

/// Which object types occur in which logs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectTypeCoverage {
    /// Object types occurring in every log
    pub shared: BTreeSet<String>,
    /// Object types occurring in at least two, but not all logs (with the logs they occur in)
    pub partial: BTreeMap<String, BTreeSet<String>>,
    /// Object types occurring in a single log (with that log)
    pub exclusive: BTreeMap<String, String>,
}

impl ObjectTypeCoverage {
    fn of(tables: &BTreeMap<String, MetricTable>) -> Self {
        let mut occurrences: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
        for (log, table) in tables {
            for ot in table.object_types() {
                occurrences.entry(ot).or_default().insert(log.clone());
            }
        }
        let mut coverage = Self::default();
        for (ot, logs) in occurrences {
            if logs.len() == tables.len() {
                coverage.shared.insert(ot.to_string());
            } else if logs.len() > 1 {
                coverage.partial.insert(ot.to_string(), logs);
            } else if let Some(log) = logs.into_iter().next() {
                coverage.exclusive.insert(ot.to_string(), log);
            }
        }
        coverage
    }

    /// Returns `true` if some object type occurs in more than one log
    pub fn is_comparable(&self) -> bool {
        !self.shared.is_empty() || !self.partial.is_empty()
    }

    /// Returns `true` if every object type occurs in every log
    pub fn is_full(&self) -> bool {
        self.partial.is_empty() && self.exclusive.is_empty()
    }
}

/// Difference of a metric value between two logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    /// Log the difference is measured from
    pub from: String,
    /// Log the difference is measured to
    pub to: String,
    /// `to - from`
    pub delta: f64,
    /// `(to - from) / |from|`, absent if the value of `from` is 0
    pub relative_delta: Option<f64>,
}

/// Position of a log in the ranking of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    /// 1-based rank; equal values share a rank
    pub rank: usize,
    /// Log ID
    pub log: String,
    /// Metric value of the log
    pub value: f64,
}

///
/// Comparison of a single metric across the logs that have a value for it
///
/// Logs without a value are left out, never counted as 0.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    /// Value per log
    pub values: BTreeMap<String, f64>,
    /// Difference for every pair of logs (ordered by log ID)
    pub deltas: Vec<MetricDelta>,
    /// Logs ordered from highest to lowest value; ties ordered by log ID
    pub ranking: Vec<RankEntry>,
}

impl MetricComparison {
    fn of(values: BTreeMap<String, f64>) -> Self {
        let deltas = values
            .iter()
            .tuple_combinations()
            .map(|((from, from_value), (to, to_value))| {
                let delta = to_value - from_value;
                MetricDelta {
                    from: from.clone(),
                    to: to.clone(),
                    delta,
                    relative_delta: (*from_value != 0.0).then(|| delta / from_value.abs()),
                }
            })
            .collect();

        let mut ranking: Vec<RankEntry> = Vec::with_capacity(values.len());
        let ordered = values
            .iter()
            .sorted_by_key(|(log, value)| (std::cmp::Reverse(OrderedFloat(**value)), *log));
        for (position, (log, value)) in ordered.enumerate() {
            let rank = match ranking.last() {
                Some(prev) if OrderedFloat(prev.value) == OrderedFloat(*value) => prev.rank,
                _ => position + 1,
            };
            ranking.push(RankEntry {
                rank,
                log: log.clone(),
                value: *value,
            });
        }

        Self {
            values,
            deltas,
            ranking,
        }
    }

    /// Delta between two logs, in either direction
    pub fn delta(&self, from: &str, to: &str) -> Option<f64> {
        self.deltas.iter().find_map(|d| {
            if d.from == from && d.to == to {
                Some(d.delta)
            } else if d.from == to && d.to == from {
                Some(-d.delta)
            } else {
                None
            }
        })
    }

    /// Rank of a log, if it has a value
    pub fn rank_of(&self, log: &str) -> Option<usize> {
        self.ranking.iter().find(|r| r.log == log).map(|r| r.rank)
    }
}

///
/// Result of comparing the [`MetricTable`]s of several logs
///
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Metric table per log ID
    pub tables: BTreeMap<String, MetricTable>,
    /// Object type coverage of the logs
    pub coverage: ObjectTypeCoverage,
    /// Comparison per metric key present in any of the logs
    #[serde_as(as = "Vec<(_, _)>")]
    pub metrics: BTreeMap<MetricKey, MetricComparison>,
}

impl ComparisonReport {
    /// IDs of the compared logs (sorted)
    pub fn log_ids(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Comparison of one metric
    pub fn metric(&self, key: &MetricKey) -> Option<&MetricComparison> {
        self.metrics.get(key)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Exportable for ComparisonReport {
    type Error = ExportError;

    fn export_to_writer<W: Write>(&self, writer: W, format: &str) -> Result<(), Self::Error> {
        match format {
            "json" => Ok(serde_json::to_writer_pretty(writer, self)?),
            _ => Err(ExportError::UnsupportedFormat(format.to_string())),
        }
    }
}

///
/// Compare the [`MetricTable`]s of several logs, keyed by log ID
///
/// Fails if fewer than two tables are given, or if no object type occurs in at least two of
/// them. Object types occurring only in some logs are reported in the
/// [`ObjectTypeCoverage`]; their metrics are compared among the logs that have them.
///
pub fn compare(tables: BTreeMap<String, MetricTable>) -> Result<ComparisonReport, ComparisonError> {
    if tables.len() < 2 {
        return Err(ComparisonError::NotEnoughLogs {
            provided: tables.len(),
        });
    }

    let coverage = ObjectTypeCoverage::of(&tables);
    if !coverage.is_comparable() {
        return Err(ComparisonError::IncomparableSets {
            logs: tables.keys().cloned().collect(),
        });
    }
    if !coverage.is_full() {
        tracing::warn!(
            shared = coverage.shared.len(),
            partial = coverage.partial.len(),
            exclusive = coverage.exclusive.len(),
            "object types only partially overlap between logs"
        );
    }

    let mut values_per_key: BTreeMap<MetricKey, BTreeMap<String, f64>> = BTreeMap::new();
    for (log, table) in &tables {
        for record in table.records() {
            values_per_key
                .entry(MetricKey::new(record.scope, record.metric))
                .or_default()
                .insert(log.clone(), record.value);
        }
    }
    let metrics = values_per_key
        .into_iter()
        .map(|(key, values)| (key, MetricComparison::of(values)))
        .collect();

    tracing::info!(logs = tables.len(), "compared complexity metrics");
    Ok(ComparisonReport {
        tables,
        coverage,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::analysis::object_centric::complexity::metric_table::{
        MetricName, MetricRecord, MetricScope,
    };

    fn table(entries: &[(MetricScope, MetricName, f64)]) -> MetricTable {
        entries
            .iter()
            .map(|(scope, metric, value)| MetricRecord {
                scope: scope.clone(),
                metric: *metric,
                value: *value,
            })
            .collect()
    }

    fn structural(ot: &str, value: f64) -> (MetricScope, MetricName, f64) {
        (MetricScope::object_type(ot), MetricName::Structural, value)
    }

    fn global(value: f64) -> (MetricScope, MetricName, f64) {
        (MetricScope::Global, MetricName::InterObject, value)
    }

    #[test]
    fn disjoint_object_types_are_incomparable() {
        let tables = BTreeMap::from([
            ("a".to_string(), table(&[structural("order", 0.2), global(1.0)])),
            ("b".to_string(), table(&[structural("invoice", 0.4), global(2.0)])),
        ]);
        assert_eq!(
            compare(tables),
            Err(ComparisonError::IncomparableSets {
                logs: vec!["a".into(), "b".into()]
            })
        );
    }

    #[test]
    fn single_log_is_not_enough() {
        let tables = BTreeMap::from([("a".to_string(), table(&[structural("order", 0.2)]))]);
        assert_eq!(
            compare(tables),
            Err(ComparisonError::NotEnoughLogs { provided: 1 })
        );
    }

    #[test]
    fn deltas_and_ranking() {
        let tables = BTreeMap::from([
            ("a".to_string(), table(&[structural("order", 0.5)])),
            ("b".to_string(), table(&[structural("order", 0.25)])),
            ("c".to_string(), table(&[structural("order", 0.5)])),
        ]);
        let report = compare(tables).unwrap();
        let key = MetricKey::new(MetricScope::object_type("order"), MetricName::Structural);
        let comparison = report.metric(&key).unwrap();

        assert_eq!(comparison.deltas.len(), 3);
        assert_eq!(comparison.delta("a", "b"), Some(-0.25));
        assert_eq!(comparison.delta("b", "a"), Some(0.25));
        assert_eq!(comparison.deltas[0].relative_delta, Some(-0.5));

        let ranking: Vec<_> = comparison
            .ranking
            .iter()
            .map(|r| (r.rank, r.log.as_str()))
            .collect();
        assert_eq!(ranking, vec![(1, "a"), (1, "c"), (3, "b")]);
    }

    #[test]
    fn relative_delta_absent_for_zero_base() {
        let tables = BTreeMap::from([
            ("a".to_string(), table(&[structural("order", 0.0)])),
            ("b".to_string(), table(&[structural("order", 0.3)])),
        ]);
        let report = compare(tables).unwrap();
        let key = MetricKey::new(MetricScope::object_type("order"), MetricName::Structural);
        let delta = &report.metric(&key).unwrap().deltas[0];
        assert_eq!(delta.delta, 0.3);
        assert_eq!(delta.relative_delta, None);
    }

    #[test]
    fn partial_overlap_keeps_absent_values_absent() {
        let tables = BTreeMap::from([
            (
                "a".to_string(),
                table(&[structural("order", 0.2), structural("item", 0.1)]),
            ),
            ("b".to_string(), table(&[structural("order", 0.3)])),
            (
                "c".to_string(),
                table(&[structural("order", 0.4), structural("item", 0.6)]),
            ),
            ("d".to_string(), table(&[structural("order", 0.1), structural("pallet", 1.0)])),
        ]);
        let report = compare(tables).unwrap();

        assert_eq!(
            report.coverage.shared,
            BTreeSet::from(["order".to_string()])
        );
        assert_eq!(
            report.coverage.partial["item"],
            BTreeSet::from(["a".to_string(), "c".to_string()])
        );
        assert_eq!(report.coverage.exclusive["pallet"], "d");

        let key = MetricKey::new(MetricScope::object_type("item"), MetricName::Structural);
        let items = report.metric(&key).unwrap();
        assert_eq!(items.values.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(items.deltas.len(), 1);
        assert_eq!(items.rank_of("b"), None);
        assert_eq!(items.rank_of("c"), Some(1));
    }

    #[test]
    fn report_exports_json() {
        let tables = BTreeMap::from([
            ("a".to_string(), table(&[structural("order", 0.5)])),
            ("b".to_string(), table(&[structural("order", 0.25)])),
        ]);
        let report = compare(tables).unwrap();
        let bytes = report.export_to_bytes("json").unwrap();
        let back: ComparisonReport = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, report);
        assert_eq!(back.log_ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
