/// [`DirectlyFollowsGraph`] of a single object type
///
/// [`DirectlyFollowsGraph`]: dfg_struct::DirectlyFollowsGraph
pub mod dfg_struct;
/// [`OCDirectlyFollowsGraph`] combining one [`DirectlyFollowsGraph`] per object type
///
/// [`OCDirectlyFollowsGraph`]: object_centric_dfg_struct::OCDirectlyFollowsGraph
/// [`DirectlyFollowsGraph`]: dfg_struct::DirectlyFollowsGraph
pub mod object_centric_dfg_struct;
