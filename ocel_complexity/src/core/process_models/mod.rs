//! Process models discovered from event data

/// Object-centric process models
pub mod object_centric {
    /// Object-centric directly-follows graphs
    pub mod ocdfg;
}
