use std::path::Path;

use anyhow::{Context, Result};
use entity::Employee;
use platform_db::StoreHandle;
use tracing::info;

/// Loads a JSON array of employee documents into the store. Seeded
/// documents keep the identifiers they carry in the file.
pub async fn load_employees(store: &StoreHandle, path: &Path) -> Result<usize> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let employees: Vec<Employee> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid seed file {}", path.display()))?;

    let count = employees.len();
    for employee in employees {
        store.employees.insert(employee).await;
    }
    info!(count, path = %path.display(), "seeded employee records");
    Ok(count)
}
