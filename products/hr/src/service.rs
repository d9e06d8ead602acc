use entity::{Compensation, Employee, ReportingStructure};
use platform_api::{ApiError, ApiResult};
use platform_db::StoreHandle;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::reports;

/// Stateless façade over the record store. Cheap to clone; every method is
/// a single-attempt call against the store.
#[derive(Clone)]
pub struct EmployeeService {
    store: StoreHandle,
}

impl EmployeeService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Assigns a fresh identifier and persists the record. Any identifier
    /// in the payload is discarded.
    pub async fn create_employee(&self, mut employee: Employee) -> ApiResult<Employee> {
        employee.employee_id = Uuid::new_v4().to_string();
        debug!(employee_id = %employee.employee_id, "creating employee");
        self.store.employees.insert(employee.clone()).await;
        Ok(employee)
    }

    pub async fn read_employee(&self, id: &str) -> ApiResult<Employee> {
        debug!(employee_id = %id, "reading employee");
        self.store
            .employees
            .find_by_key(id)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("employee {id}")))
    }

    /// Full replacement keyed by `id`; the path identifier wins over any
    /// identifier in the payload. The save is an upsert, so updating an
    /// unknown identifier stores a new record.
    pub async fn update_employee(&self, id: &str, mut employee: Employee) -> ApiResult<Employee> {
        employee.employee_id = id.to_string();
        debug!(employee_id = %id, "updating employee");
        self.store.employees.save(employee.clone()).await;
        Ok(employee)
    }

    /// Hydrates the employee and counts its distinct transitive reports.
    pub async fn reporting_structure(&self, id: &str) -> ApiResult<ReportingStructure> {
        let employee = self.read_employee(id).await?;
        let number_of_reports = reports::count_distinct_reports(&employee);
        debug!(employee_id = %id, number_of_reports, "computed reporting structure");
        Ok(ReportingStructure {
            employee,
            number_of_reports,
        })
    }

    /// Persists the record as given; no identifier is generated, the
    /// embedded employee identifier is the correlation key.
    pub async fn create_compensation(&self, compensation: Compensation) -> ApiResult<Compensation> {
        if compensation.salary < Decimal::ZERO {
            return Err(ApiError::InvalidInput("salary must be non-negative".into()));
        }
        debug!(employee_id = %compensation.employee.employee_id, "recording compensation");
        self.store.compensations.insert(compensation.clone()).await;
        Ok(compensation)
    }

    /// Returns the earliest stored compensation whose embedded employee
    /// matches `id`.
    pub async fn compensation_for_employee(&self, id: &str) -> ApiResult<Compensation> {
        debug!(employee_id = %id, "reading compensation");
        let example = json!({ "employee": { "employeeId": id } });
        let matches = self
            .store
            .compensations
            .find_matching(&example)
            .await
            .map_err(|err| ApiError::internal(err.into()))?;
        matches
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("compensation for employee {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use platform_db::RecordStore;
    use std::sync::Arc;

    fn service() -> EmployeeService {
        EmployeeService::new(Arc::new(RecordStore::new()))
    }

    fn profile(first: &str, position: &str) -> Employee {
        Employee {
            first_name: Some(first.into()),
            last_name: Some("Doe".into()),
            position: Some(position.into()),
            department: Some("Engineering".into()),
            ..Employee::default()
        }
    }

    fn compensation(employee_id: &str, salary: Decimal) -> Compensation {
        Compensation {
            employee: Employee::reference(employee_id),
            salary,
            effective_date: NaiveDate::from_ymd_opt(2020, 12, 20).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_read_round_trips() {
        let service = service();
        let created = service
            .create_employee(profile("John", "Developer"))
            .await
            .unwrap();
        assert!(!created.employee_id.is_empty());

        let read = service.read_employee(&created.employee_id).await.unwrap();
        assert_eq!(read, created);
        assert_eq!(read.first_name.as_deref(), Some("John"));
    }

    #[tokio::test]
    async fn update_is_a_full_replacement_keyed_by_path_id() {
        let service = service();
        let created = service
            .create_employee(profile("John", "Developer"))
            .await
            .unwrap();

        let mut replacement = profile("John", "Development Manager");
        replacement.employee_id = "ignored-body-id".into();
        let updated = service
            .update_employee(&created.employee_id, replacement)
            .await
            .unwrap();
        assert_eq!(updated.employee_id, created.employee_id);

        let read = service.read_employee(&created.employee_id).await.unwrap();
        assert_eq!(read.position.as_deref(), Some("Development Manager"));
    }

    #[tokio::test]
    async fn missing_employee_is_not_found() {
        let err = service().read_employee("nope").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn reporting_structure_counts_shared_reports_once() {
        let service = service();
        let four = Employee::reference("4");
        let five = Employee::reference("5");
        let two = Employee {
            direct_reports: vec![four.clone()],
            ..Employee::reference("2")
        };
        let three = Employee {
            direct_reports: vec![four, five],
            ..Employee::reference("3")
        };
        let one = Employee {
            direct_reports: vec![two, three],
            ..Employee::reference("1")
        };
        service.store.employees.insert(one).await;

        let structure = service.reporting_structure("1").await.unwrap();
        assert_eq!(structure.employee.employee_id, "1");
        assert_eq!(structure.number_of_reports, 4);
    }

    #[tokio::test]
    async fn reporting_structure_for_leaf_is_zero() {
        let service = service();
        let leaf = service.create_employee(Employee::default()).await.unwrap();
        let structure = service
            .reporting_structure(&leaf.employee_id)
            .await
            .unwrap();
        assert_eq!(structure.number_of_reports, 0);
    }

    #[tokio::test]
    async fn compensation_round_trips_by_employee_id() {
        let service = service();
        let stored = service
            .create_compensation(compensation("e1", Decimal::new(60_000_00, 2)))
            .await
            .unwrap();

        let read = service.compensation_for_employee("e1").await.unwrap();
        assert_eq!(read, stored);
    }

    #[tokio::test]
    async fn first_stored_compensation_wins() {
        let service = service();
        service
            .create_compensation(compensation("e1", Decimal::from(50_000)))
            .await
            .unwrap();
        service
            .create_compensation(compensation("e1", Decimal::from(90_000)))
            .await
            .unwrap();

        let read = service.compensation_for_employee("e1").await.unwrap();
        assert_eq!(read.salary, Decimal::from(50_000));
    }

    #[tokio::test]
    async fn missing_compensation_is_not_found() {
        let err = service()
            .compensation_for_employee("e1")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn negative_salary_is_rejected() {
        let err = service()
            .create_compensation(compensation("e1", Decimal::from(-1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
