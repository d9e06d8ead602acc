pub mod compensation;
pub mod employee;
pub mod reporting;

pub use compensation::Compensation;
pub use employee::Employee;
pub use reporting::ReportingStructure;
