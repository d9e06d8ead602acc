use serde::{Deserialize, Serialize};

use crate::employee::Employee;

/// Reporting structure for one employee: the hydrated root plus the count
/// of distinct employees transitively below it. Computed per request,
/// never persisted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingStructure {
    pub employee: Employee,
    pub number_of_reports: usize,
}
