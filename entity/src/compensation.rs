use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::employee::Employee;

/// Compensation record. The embedded employee's identifier is the
/// correlation key; several records may share one employee.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    pub employee: Employee,
    pub salary: Decimal,
    pub effective_date: NaiveDate,
}
