//! Employee directory: records, form state and the CRUD operations behind
//! the directory page.

mod directory;
mod employee;
mod service;

pub use directory::{Action, Directory};
pub use employee::{Employee, EmployeeForm, EmployeePatch, NewEmployee};
pub use service::{DEFAULT_CREATE_ATTEMPTS, EmployeeService, FIRST_EMPLOYEE_ID};
