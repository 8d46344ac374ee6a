use std::path::Path;

/// Extensions of OCEL JSON files, removed from the file stem in [`log_id_from_path`]
const LOG_EXTENSIONS: [&str; 2] = [".jsonocel", ".json"];

/// Identifier of a log file: its file stem without a remaining OCEL JSON extension
///
/// Dots inside the name are kept, so logs of different periods stay apart.
///
/// ```
/// use std::path::Path;
/// use ocel_complexity::utils::log_id_from_path;
///
/// assert_eq!(log_id_from_path(Path::new("data/orders.jsonocel")), "orders");
/// assert_eq!(log_id_from_path(Path::new("orders.jsonocel.json")), "orders");
/// assert_eq!(log_id_from_path(Path::new("logistics.2023.json")), "logistics.2023");
/// ```
pub fn log_id_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    LOG_EXTENSIONS
        .iter()
        .find_map(|ext| stem.strip_suffix(ext).filter(|s| !s.is_empty()))
        .unwrap_or(stem.as_ref())
        .to_string()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_files_keep_their_name() {
        assert_eq!(log_id_from_path(Path::new(".hidden")), ".hidden");
        assert_eq!(log_id_from_path(Path::new("/")), "");
    }

    #[test]
    fn logs_of_different_periods_get_distinct_ids() {
        let a = log_id_from_path(Path::new("data/logistics.2023.json"));
        let b = log_id_from_path(Path::new("data/logistics.2024.json"));
        assert_eq!(a, "logistics.2023");
        assert_ne!(a, b);
        assert_eq!(log_id_from_path(Path::new("logistics.2023.jsonocel")), "logistics.2023");
        assert_eq!(log_id_from_path(Path::new("orders")), "orders");
    }
}
