use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::core::io::{ExportError, Exportable};

/// What a metric value is about: the whole log, one object type, or a pair of object types
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "object_types")]
pub enum MetricScope {
    /// The whole log (all object types)
    Global,
    /// A single object type
    ObjectType(String),
    /// An unordered pair of object types, stored in sorted order
    TypePair(String, String),
}

impl MetricScope {
    /// Scope of a single object type
    pub fn object_type(object_type: impl Into<String>) -> Self {
        Self::ObjectType(object_type.into())
    }

    /// Scope of a pair of object types (order of the arguments does not matter)
    pub fn type_pair(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self::TypePair(a, b)
        } else {
            Self::TypePair(b, a)
        }
    }

    /// Object types this scope refers to
    pub fn object_types(&self) -> Vec<&str> {
        match self {
            MetricScope::Global => Vec::new(),
            MetricScope::ObjectType(ot) => vec![ot.as_str()],
            MetricScope::TypePair(a, b) => vec![a.as_str(), b.as_str()],
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            MetricScope::Global => "global",
            MetricScope::ObjectType(_) => "object-type",
            MetricScope::TypePair(_, _) => "type-pair",
        }
    }
}

impl Display for MetricScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricScope::Global => write!(f, "global"),
            MetricScope::ObjectType(ot) => write!(f, "{ot}"),
            MetricScope::TypePair(a, b) => write!(f, "{a} & {b}"),
        }
    }
}

/// Name of a complexity metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricName {
    /// Entanglement across object types
    InterObject,
    /// Behavioral variability among the instances of an object type
    IntraObject,
    /// Size and connectedness of a discovered model
    Structural,
    /// Number of activities in a model
    NodeCount,
    /// Number of directly-follows relations in a model
    EdgeCount,
    /// Average number of in- and outgoing relations per activity
    AverageDegree,
    /// Directly-follows relations relative to all possible relations
    Density,
    /// Relations minus activities plus weakly connected components
    CyclomaticNumber,
    /// Number of object instances with at least one event
    InstanceCount,
    /// Number of distinct activity sequences among the object instances
    VariantCount,
    /// Number of (event, object) pairs
    RelationCount,
}

impl MetricName {
    /// The three primary complexity metrics
    pub const PRIMARY: [MetricName; 3] = [
        MetricName::InterObject,
        MetricName::IntraObject,
        MetricName::Structural,
    ];

    /// Supporting figures reported next to the primary metrics
    pub fn is_auxiliary(&self) -> bool {
        !Self::PRIMARY.contains(self)
    }

    /// Kebab-case name, e.g. `inter-object`
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::InterObject => "inter-object",
            MetricName::IntraObject => "intra-object",
            MetricName::Structural => "structural",
            MetricName::NodeCount => "node-count",
            MetricName::EdgeCount => "edge-count",
            MetricName::AverageDegree => "average-degree",
            MetricName::Density => "density",
            MetricName::CyclomaticNumber => "cyclomatic-number",
            MetricName::InstanceCount => "instance-count",
            MetricName::VariantCount => "variant-count",
            MetricName::RelationCount => "relation-count",
        }
    }
}

impl Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a value in a [`MetricTable`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetricKey {
    /// Scope of the value
    pub scope: MetricScope,
    /// Metric
    pub metric: MetricName,
}

impl MetricKey {
    /// Create a new key
    pub fn new(scope: MetricScope, metric: MetricName) -> Self {
        Self { scope, metric }
    }
}

/// A single metric value with its key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Scope of the value
    pub scope: MetricScope,
    /// Metric
    pub metric: MetricName,
    /// Value
    pub value: f64,
}

///
/// Metric values keyed by ([`MetricScope`], [`MetricName`])
///
/// Computed once per run and never mutated afterwards by the analysis; recomputing from the same
/// log yields a bit-identical table.
///
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricTable {
    #[serde_as(as = "Vec<(_, _)>")]
    values: BTreeMap<MetricKey, f64>,
}

impl MetricTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, scope: MetricScope, metric: MetricName, value: f64) {
        self.values.insert(MetricKey::new(scope, metric), value);
    }

    /// Merge all values of another table into this one, overwriting equal keys
    pub fn merge(&mut self, other: MetricTable) {
        self.values.extend(other.values);
    }

    /// Keep only the values matching a predicate
    pub fn retain(&mut self, mut f: impl FnMut(&MetricKey) -> bool) {
        self.values.retain(|k, _| f(k));
    }

    /// Look up a value
    pub fn get(&self, scope: &MetricScope, metric: MetricName) -> Option<f64> {
        self.values
            .get(&MetricKey::new(scope.clone(), metric))
            .copied()
    }

    /// Look up a value by key
    pub fn get_by_key(&self, key: &MetricKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Look up a value of the global scope
    pub fn global(&self, metric: MetricName) -> Option<f64> {
        self.get(&MetricScope::Global, metric)
    }

    /// Look up a value of an object type
    pub fn for_object_type(&self, object_type: &str, metric: MetricName) -> Option<f64> {
        self.get(&MetricScope::object_type(object_type), metric)
    }

    /// All keys (sorted)
    pub fn keys(&self) -> impl Iterator<Item = &MetricKey> {
        self.values.keys()
    }

    /// All values as [`MetricRecord`]s (sorted by key)
    pub fn records(&self) -> impl Iterator<Item = MetricRecord> + '_ {
        self.values.iter().map(|(k, v)| MetricRecord {
            scope: k.scope.clone(),
            metric: k.metric,
            value: *v,
        })
    }

    /// Object types that have at least one value with an [`MetricScope::ObjectType`] scope
    pub fn object_types(&self) -> BTreeSet<&str> {
        self.values
            .keys()
            .filter_map(|k| match &k.scope {
                MetricScope::ObjectType(ot) => Some(ot.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the table has no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["scope", "object_types", "metric", "value"])?;
        for (key, value) in &self.values {
            let object_types = key.scope.object_types().join(";");
            let value = value.to_string();
            csv_writer.write_record([
                key.scope.kind(),
                object_types.as_str(),
                key.metric.as_str(),
                value.as_str(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl FromIterator<MetricRecord> for MetricTable {
    fn from_iter<T: IntoIterator<Item = MetricRecord>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|r| (MetricKey::new(r.scope, r.metric), r.value))
                .collect(),
        }
    }
}

impl Exportable for MetricTable {
    type Error = ExportError;

    fn export_to_writer<W: Write>(&self, writer: W, format: &str) -> Result<(), Self::Error> {
        match format {
            "json" => Ok(serde_json::to_writer_pretty(writer, self)?),
            "csv" => self.write_csv(writer),
            _ => Err(ExportError::UnsupportedFormat(format.to_string())),
        }
    }
}
