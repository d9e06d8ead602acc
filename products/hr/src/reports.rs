use std::collections::HashSet;

use entity::Employee;

/// Counts the distinct employees transitively reporting to `root`,
/// excluding the root itself.
///
/// Walks the embedded report graph with an explicit stack. Identity is the
/// employee id, not the embedded object, so a subordinate reachable through
/// several managers is counted once. Identifiers already seen are not
/// descended into again, which keeps the walk bounded by distinct employees
/// even when shared subtrees are embedded many times.
pub fn count_distinct_reports(root: &Employee) -> usize {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut pending: Vec<&Employee> = root.direct_reports.iter().collect();
    while let Some(report) = pending.pop() {
        if seen.insert(report.employee_id.as_str()) {
            pending.extend(&report.direct_reports);
        }
    }
    seen.len()
}
