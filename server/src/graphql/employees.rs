use async_graphql::{InputObject, SimpleObject, ID};
use platform_api::ApiResult;
use products_hr::{Employee, EmployeePatch, NewEmployee};

#[derive(Clone, Debug, SimpleObject)]
pub struct EmployeeNode {
    /// Document key, shown as the employee's id.
    pub id: ID,
    /// Value of the stored `id` field.
    pub stored_id: i64,
    pub name: String,
    pub position: String,
    pub department: String,
    pub contact: String,
}

impl From<Employee> for EmployeeNode {
    fn from(employee: Employee) -> Self {
        Self {
            id: ID(employee.key),
            stored_id: employee.id,
            name: employee.name,
            position: employee.position,
            department: employee.department,
            contact: employee.contact,
        }
    }
}

#[derive(Clone, Debug, InputObject)]
pub struct NewEmployeeInput {
    pub name: String,
    pub position: String,
    pub department: String,
    pub contact: String,
}

impl NewEmployeeInput {
    pub fn validate(&self) -> ApiResult<NewEmployee> {
        NewEmployee::new(&self.name, &self.position, &self.department, &self.contact)
    }
}

/// Omitted or empty fields are left as stored.
#[derive(Clone, Debug, Default, InputObject)]
pub struct EmployeePatchInput {
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub contact: Option<String>,
}

impl From<EmployeePatchInput> for EmployeePatch {
    fn from(input: EmployeePatchInput) -> Self {
        EmployeePatch::from_fields(input.name, input.position, input.department, input.contact)
    }
}
