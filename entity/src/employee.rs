use serde::{Deserialize, Serialize};

/// Employee profile document.
///
/// Direct reports are embedded recursively, to whatever depth the stored
/// document carries. The same subordinate may appear under several managers,
/// so the embedded graph is a DAG keyed by `employee_id`, not a tree.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub employee_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub direct_reports: Vec<Employee>,
}

impl Employee {
    /// Stub carrying only an identifier, as embedded in report lists and
    /// compensation records.
    pub fn reference(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_payload_without_id_deserializes() {
        let employee: Employee = serde_json::from_value(json!({
            "firstName": "John",
            "lastName": "Doe",
            "position": "Developer",
            "department": "Engineering",
        }))
        .unwrap();
        assert!(employee.employee_id.is_empty());
        assert_eq!(employee.first_name.as_deref(), Some("John"));
        assert!(employee.direct_reports.is_empty());
    }

    #[test]
    fn nested_reports_round_trip_camel_case() {
        let mut manager = Employee::reference("mgr");
        manager.direct_reports = vec![Employee::reference("sub")];
        let value = serde_json::to_value(&manager).unwrap();
        assert_eq!(value["employeeId"], "mgr");
        assert_eq!(value["directReports"][0]["employeeId"], "sub");

        let back: Employee = serde_json::from_value(value).unwrap();
        assert_eq!(back, manager);
    }

    #[test]
    fn empty_report_list_is_omitted() {
        let value = serde_json::to_value(Employee::reference("solo")).unwrap();
        assert!(value.get("directReports").is_none());
    }
}
