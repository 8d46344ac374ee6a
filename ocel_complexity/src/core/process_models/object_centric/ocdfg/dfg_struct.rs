use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
};
use thiserror::Error;

/// Activity in a directly-follows graph.
type Activity<'a> = Cow<'a, str>;

/// A directly-follows relation between two activities.
type DirectlyFollowsRelation<'a> = (Activity<'a>, Activity<'a>);

/// The edge set of a model references activities missing from its node set
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidModelError {
    /// An edge has an endpoint that is not an activity of the graph
    #[error("directly-follows relation ({from} -> {to}) references unknown activity '{missing}'")]
    DanglingEdge {
        /// Source activity of the edge
        from: String,
        /// Target activity of the edge
        to: String,
        /// The endpoint missing from the activities
        missing: String,
    },
}

/// A directly-follows graph of [`Activity`]s for a single object type.
/// Graph containing a set of activities, a set of directly-follows relations, a set of start
/// activities, and a set of end activities.
/// Both, the number of occurrences of activities and of directly follows relations are annotated
/// with their frequency.
///
/// All collections are ordered, so iterating (and everything computed from iterating) is
/// deterministic.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectlyFollowsGraph<'a> {
    /// Activities
    pub activities: BTreeMap<Activity<'a>, u32>,
    /// Directly-follows relations
    #[serde_as(as = "Vec<(_, _)>")]
    pub directly_follows_relations: BTreeMap<DirectlyFollowsRelation<'a>, u32>,
    /// Start activities
    pub start_activities: BTreeSet<Activity<'a>>,
    /// End activities
    pub end_activities: BTreeSet<Activity<'a>>,
}

impl Default for DirectlyFollowsGraph<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> DirectlyFollowsGraph<'a> {
    /// Create new [`DirectlyFollowsGraph`] with no activities and directly-follows relations.
    pub fn new() -> Self {
        Self {
            activities: BTreeMap::new(),
            directly_follows_relations: BTreeMap::new(),
            start_activities: BTreeSet::new(),
            end_activities: BTreeSet::new(),
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Add an activity with a frequency.
    ///
    /// If the activity already exists, the frequency count is added to the existing activity.
    pub fn add_activity(&mut self, activity: impl Into<Activity<'a>>, frequency: u32) {
        *self.activities.entry(activity.into()).or_default() += frequency;
    }

    /// Adds an activity to the set of start activities.
    pub fn add_start_activity(&mut self, activity: impl Into<Activity<'a>>) {
        self.start_activities.insert(activity.into());
    }

    /// Adds an activity to the set of end activities.
    pub fn add_end_activity(&mut self, activity: impl Into<Activity<'a>>) {
        self.end_activities.insert(activity.into());
    }

    /// Checks if an activity is already contained in the directly-follows graph.
    pub fn contains_activity<S: AsRef<str>>(&self, activity: S) -> bool {
        self.activities.contains_key(activity.as_ref())
    }

    /// Checks if an activity is a start activity in the directly-follows graph.
    pub fn is_start_activity<S: AsRef<str>>(&self, activity: S) -> bool {
        self.start_activities.contains(activity.as_ref())
    }

    /// Checks if an activity is an end activity in the directly-follows graph.
    pub fn is_end_activity<S: AsRef<str>>(&self, activity: S) -> bool {
        self.end_activities.contains(activity.as_ref())
    }

    /// Add a directly-follows relation with a frequency.
    ///
    /// If the directly-follows relation already exists, the frequency count is added to the
    /// existing directly-follows relation.
    pub fn add_df_relation(
        &mut self,
        from: impl Into<Activity<'a>>,
        to: impl Into<Activity<'a>>,
        frequency: u32,
    ) {
        *self
            .directly_follows_relations
            .entry((from.into(), to.into()))
            .or_default() += frequency;
    }

    /// Checks if a directly-follows relation is already contained in the directly-follows graph.
    pub fn contains_df_relation<S: Into<Activity<'a>>>(&self, (a, b): (S, S)) -> bool {
        self.directly_follows_relations
            .contains_key(&(a.into(), b.into()))
    }

    /// Frequency of a directly-follows relation (0 if absent)
    pub fn df_relation_frequency<S: Into<Activity<'a>>>(&self, (a, b): (S, S)) -> u32 {
        self.directly_follows_relations
            .get(&(a.into(), b.into()))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the ingoing activities of an activity in the directly-follows graph.
    pub fn ingoing_activities<S: AsRef<str>>(&self, activity: S) -> BTreeSet<&Activity<'a>> {
        let a = activity.as_ref();
        self.directly_follows_relations
            .keys()
            .filter_map(|(x, y)| if y == a { Some(x) } else { None })
            .collect()
    }

    /// Returns the outgoing activities of an activity in the directly-follows graph.
    pub fn outgoing_activities<S: AsRef<str>>(&self, activity: S) -> BTreeSet<&Activity<'a>> {
        let a = activity.as_ref();
        self.directly_follows_relations
            .keys()
            .filter_map(|(x, y)| if x == a { Some(y) } else { None })
            .collect()
    }

    /// Number of activities (nodes)
    pub fn node_count(&self) -> usize {
        self.activities.len()
    }

    /// Number of directly-follows relations (edges)
    pub fn edge_count(&self) -> usize {
        self.directly_follows_relations.len()
    }

    /// Returns `true` if the graph has neither activities nor relations
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty() && self.directly_follows_relations.is_empty()
    }

    /// Check that every directly-follows relation connects two activities of the graph
    pub fn validate(&self) -> Result<(), InvalidModelError> {
        for (from, to) in self.directly_follows_relations.keys() {
            if let Some(missing) = [from, to]
                .into_iter()
                .find(|a| !self.activities.contains_key(*a))
            {
                return Err(InvalidModelError::DanglingEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                    missing: missing.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Convert into a [`DirectlyFollowsGraph`] owning all activity labels
    pub fn into_owned(self) -> DirectlyFollowsGraph<'static> {
        DirectlyFollowsGraph {
            activities: self
                .activities
                .into_iter()
                .map(|(a, f)| (Cow::Owned(a.into_owned()), f))
                .collect(),
            directly_follows_relations: self
                .directly_follows_relations
                .into_iter()
                .map(|((a, b), f)| ((Cow::Owned(a.into_owned()), Cow::Owned(b.into_owned())), f))
                .collect(),
            start_activities: self
                .start_activities
                .into_iter()
                .map(|a| Cow::Owned(a.into_owned()))
                .collect(),
            end_activities: self
                .end_activities
                .into_iter()
                .map(|a| Cow::Owned(a.into_owned()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    pub const SAMPLE_JSON_DFG: &str = r#"
{
    "activities": {
        "Sleep": 13,
        "Cook": 3,
        "Work": 11,
        "Have fun": 9
    },
    "directly_follows_relations": [
        [
            ["Work","Sleep"],
            4
        ],
        [
            ["Have fun","Sleep"],
            9
        ],
        [
            ["Work","Have fun"],
            6
        ],
        [
            ["Cook","Have fun"],
            3
        ]
    ],
    "start_activities": [
        "Work",
        "Cook"
    ],
    "end_activities": [
        "Work",
        "Sleep"
    ]
}"#;

    use super::*;

    fn daily_routine() -> DirectlyFollowsGraph<'static> {
        let mut graph = DirectlyFollowsGraph::new();
        graph.add_activity("Work", 11);
        graph.add_start_activity("Work");
        graph.add_end_activity("Work");

        graph.add_activity("Cook", 3);
        graph.add_start_activity("Cook");

        graph.add_activity("Have fun", 9);
        graph.add_df_relation("Work", "Have fun", 6);
        graph.add_df_relation("Cook", "Have fun", 3);

        graph.add_activity("Sleep", 13);
        graph.add_df_relation("Work", "Sleep", 4);
        graph.add_df_relation("Have fun", "Sleep", 9);
        graph.add_end_activity("Sleep");
        graph
    }

    #[test]
    fn directly_follows_graph() {
        let graph = daily_routine();

        let expected: BTreeMap<Activity<'_>, u32> =
            [("Work", 11), ("Cook", 3), ("Have fun", 9), ("Sleep", 13)]
                .into_iter()
                .map(|(a, f)| (Cow::Borrowed(a), f))
                .collect();
        assert_eq!(graph.activities, expected);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.is_start_activity("Cook"));
        assert!(graph.is_end_activity("Sleep"));
        assert_eq!(graph.df_relation_frequency(("Work", "Have fun")), 6);
        assert_eq!(graph.df_relation_frequency(("Sleep", "Work")), 0);
        assert_eq!(
            graph
                .ingoing_activities("Sleep")
                .into_iter()
                .map(|a| a.as_ref())
                .collect::<Vec<_>>(),
            vec!["Have fun", "Work"]
        );
        assert_eq!(graph.outgoing_activities("Sleep").len(), 0);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn deserialize_dfg_test() {
        let dfg: DirectlyFollowsGraph<'_> = serde_json::from_str(SAMPLE_JSON_DFG).unwrap();
        assert!(dfg.activities.len() == 4);
        assert!(dfg.directly_follows_relations.len() == 4);
        assert!(dfg.start_activities.len() == 2);
        assert!(dfg.end_activities.len() == 2);
        assert_eq!(dfg, daily_routine());
    }

    #[test]
    fn serialization_is_stable() {
        let a = daily_routine().to_json().unwrap();
        let b = daily_routine().into_owned().to_json().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn dangling_edge_is_invalid() {
        let mut graph = daily_routine();
        graph.add_df_relation("Sleep", "Commute", 1);
        assert_eq!(
            graph.validate(),
            Err(InvalidModelError::DanglingEdge {
                from: "Sleep".to_string(),
                to: "Commute".to_string(),
                missing: "Commute".to_string(),
            })
        );
    }
}
