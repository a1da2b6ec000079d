use std::{fmt, str::FromStr};

use platform_api::{ApiError, ApiResult};

use crate::{
    employee::{Employee, EmployeeForm, NO_SUCH_EMPLOYEE},
    service::EmployeeService,
};

/// A button on the directory form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(ApiError::invalid(format!("unknown action `{other}`"))),
        }
    }
}

/// Form state plus the most recently fetched employee list.
///
/// Every mutation that succeeds refetches the list, so `employees` always
/// reflects the last successful full scan.
pub struct Directory {
    service: EmployeeService,
    form: EmployeeForm,
    employees: Vec<Employee>,
    loaded: bool,
}

impl Directory {
    /// A directory with an empty form and nothing fetched yet.
    pub fn new(service: EmployeeService) -> Self {
        Self {
            service,
            form: EmployeeForm::default(),
            employees: Vec::new(),
            loaded: false,
        }
    }

    /// Build the directory and fetch the list once.
    pub async fn mount(service: EmployeeService) -> ApiResult<Self> {
        let mut directory = Self::new(service);
        directory.refresh().await?;
        Ok(directory)
    }

    pub fn with_form(mut self, form: EmployeeForm) -> Self {
        self.form = form;
        self
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EmployeeForm {
        &mut self.form
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn into_parts(self) -> (EmployeeForm, Vec<Employee>) {
        (self.form, self.employees)
    }

    pub async fn refresh(&mut self) -> ApiResult<()> {
        self.employees = self.service.list().await?;
        self.loaded = true;
        Ok(())
    }

    /// Fetch the list unless a refresh already happened.
    pub async fn ensure_loaded(&mut self) -> ApiResult<()> {
        if self.loaded {
            return Ok(());
        }
        self.refresh().await
    }

    pub async fn run(&mut self, action: Action) -> ApiResult<()> {
        match action {
            Action::Create => self.create().await.map(drop),
            Action::Read => self.read().await.map(drop),
            Action::Update => self.update().await,
            Action::Delete => self.delete().await,
        }
    }

    /// Create from the form. The form is left as typed on any failure.
    pub async fn create(&mut self) -> ApiResult<Employee> {
        let input = self.form.new_employee()?;
        let created = self.service.create(input).await?;
        self.form.clear();
        self.refresh().await?;
        Ok(created)
    }

    /// Load the record named by the form's id into the other four fields.
    pub async fn read(&mut self) -> ApiResult<Employee> {
        let found = self.service.find(&self.form.employee_id).await?;
        let employee = found.ok_or_else(|| ApiError::not_found(NO_SUCH_EMPLOYEE))?;
        self.form.fill_from(&employee);
        Ok(employee)
    }

    /// Write the non-empty form fields over the record named by the form's id.
    pub async fn update(&mut self) -> ApiResult<()> {
        let patch = self.form.patch();
        self.service.update(&self.form.employee_id, patch).await?;
        self.form.clear();
        self.refresh().await
    }

    pub async fn delete(&mut self) -> ApiResult<()> {
        self.service.delete(&self.form.employee_id).await?;
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_parse_from_their_names() {
        for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
        assert!("purge".parse::<Action>().is_err());
    }
}
