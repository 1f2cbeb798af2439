/// Distinct labels, sorted.
pub fn extract_unique_labels(labels: &[&str]) -> Vec<String> {
    let mut unique_labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
    unique_labels.sort();
    unique_labels.dedup();
    unique_labels
}

/// Get row indices for each requested level; rows with other labels are skipped.
pub fn get_group_indices(labels: &[&str], levels: &[&str]) -> Vec<Vec<usize>> {
    levels
        .iter()
        .map(|&level| {
            labels
                .iter()
                .enumerate()
                .filter_map(|(i, &l)| if l == level { Some(i) } else { None })
                .collect()
        })
        .collect()
}
