use std::collections::HashSet;

/// Returns the desired subscribers that are not yet subscribed, keeping the
/// order they were configured in. Endpoints compare by exact string match.
pub fn compute_new_subscribers(existing: &[String], desired: &[String]) -> Vec<String> {
    if existing.is_empty() {
        return desired.to_vec();
    }

    let existing: HashSet<&str> = existing.iter().map(String::as_str).collect();
    desired
        .iter()
        .filter(|subscriber| !existing.contains(subscriber.as_str()))
        .cloned()
        .collect()
}
