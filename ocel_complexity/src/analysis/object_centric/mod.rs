/// Complexity metrics
pub mod complexity;
/// Comparison of complexity metrics across logs
pub mod comparison;
