use entity::employees;
use platform_api::{ApiError, ApiResult};
use sea_orm::ActiveValue::{NotSet, Set};
use serde::Deserialize;

pub(crate) const REQUIRED_FIELDS: &str = "All fields are required and cannot be just spaces.";
pub(crate) const NO_SUCH_EMPLOYEE: &str = "No such employee!";
pub(crate) const UPDATE_NEEDS_ID: &str = "Please provide the employee ID to update.";
pub(crate) const NEEDS_ID: &str = "Please provide the employee ID.";

/// An employee as listed by the directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Employee {
    /// Document key; this is the id the directory displays.
    pub key: String,
    /// Stored `id` field, used for id allocation.
    pub id: i64,
    pub name: String,
    pub position: String,
    pub department: String,
    pub contact: String,
}

impl From<employees::Model> for Employee {
    fn from(model: employees::Model) -> Self {
        Self {
            key: model.doc_key,
            id: model.id,
            name: model.name,
            position: model.position,
            department: model.department,
            contact: model.contact,
        }
    }
}

/// Validated input for a new employee. Every field is trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEmployee {
    name: String,
    position: String,
    department: String,
    contact: String,
}

impl NewEmployee {
    pub fn new(name: &str, position: &str, department: &str, contact: &str) -> ApiResult<Self> {
        let fields = [name, position, department, contact].map(str::trim);
        if fields.iter().any(|field| field.is_empty()) {
            return Err(ApiError::invalid(REQUIRED_FIELDS));
        }
        let [name, position, department, contact] = fields.map(str::to_owned);
        Ok(Self {
            name,
            position,
            department,
            contact,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn to_document(&self, id: i64) -> employees::Model {
        employees::Model {
            doc_key: id.to_string(),
            id,
            name: self.name.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            contact: self.contact.clone(),
        }
    }
}

/// Fields to overwrite on update. Absent or empty fields stay untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub contact: Option<String>,
}

impl EmployeePatch {
    /// Keep only the fields that carry a value. Values are not trimmed.
    pub fn from_fields(
        name: Option<String>,
        position: Option<String>,
        department: Option<String>,
        contact: Option<String>,
    ) -> Self {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());
        Self {
            name: present(name),
            position: present(position),
            department: present(department),
            contact: present(contact),
        }
    }

    pub(crate) fn into_active_model(self) -> employees::ActiveModel {
        let field = |value: Option<String>| value.map_or(NotSet, Set);
        employees::ActiveModel {
            doc_key: NotSet,
            id: NotSet,
            name: field(self.name),
            position: field(self.position),
            department: field(self.department),
            contact: field(self.contact),
        }
    }
}

/// The directory form: five free-text inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeeForm {
    pub employee_id: String,
    pub name: String,
    pub position: String,
    pub department: String,
    pub contact: String,
}

impl EmployeeForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn new_employee(&self) -> ApiResult<NewEmployee> {
        NewEmployee::new(&self.name, &self.position, &self.department, &self.contact)
    }

    pub fn patch(&self) -> EmployeePatch {
        EmployeePatch::from_fields(
            Some(self.name.clone()),
            Some(self.position.clone()),
            Some(self.department.clone()),
            Some(self.contact.clone()),
        )
    }

    /// Copy the stored fields into the form, keeping `employee_id` as typed.
    pub fn fill_from(&mut self, employee: &Employee) {
        self.name.clone_from(&employee.name);
        self.position.clone_from(&employee.position);
        self.department.clone_from(&employee.department);
        self.contact.clone_from(&employee.contact);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_employee_trims_every_field() {
        let employee = NewEmployee::new("  Ann ", "Eng", " R&D", "a@x.com\n").unwrap();
        let doc = employee.to_document(101);
        assert_eq!(doc.doc_key, "101");
        assert_eq!(doc.name, "Ann");
        assert_eq!(doc.department, "R&D");
        assert_eq!(doc.contact, "a@x.com");
    }

    #[test]
    fn whitespace_only_field_is_rejected() {
        for (name, position, department, contact) in [
            ("", "Eng", "R&D", "a@x.com"),
            ("Ann", "   ", "R&D", "a@x.com"),
            ("Ann", "Eng", "\t", "a@x.com"),
            ("Ann", "Eng", "R&D", ""),
        ] {
            let err = NewEmployee::new(name, position, department, contact).unwrap_err();
            assert_eq!(err.to_string(), REQUIRED_FIELDS);
        }
    }

    #[test]
    fn form_patch_skips_blank_fields_without_trimming() {
        let form = EmployeeForm {
            employee_id: "101".into(),
            name: "Ann K.".into(),
            position: String::new(),
            department: " ".into(),
            contact: String::new(),
        };
        let patch = form.patch();
        assert_eq!(patch.name.as_deref(), Some("Ann K."));
        assert_eq!(patch.position, None);
        assert_eq!(patch.department.as_deref(), Some(" "));
        assert_eq!(patch.contact, None);
    }

    #[test]
    fn fill_from_keeps_the_typed_id() {
        let mut form = EmployeeForm {
            employee_id: "101".into(),
            name: "stale".into(),
            ..EmployeeForm::default()
        };
        let employee = Employee {
            key: "101".into(),
            id: 101,
            name: "Ann".into(),
            position: "Eng".into(),
            department: "R&D".into(),
            contact: "a@x.com".into(),
        };
        form.fill_from(&employee);
        assert_eq!(form.employee_id, "101");
        assert_eq!(form.name, "Ann");
        assert_eq!(form.contact, "a@x.com");
    }

    #[test]
    fn form_decodes_camel_case_fields() {
        let form: EmployeeForm =
            serde_json::from_str(r#"{"employeeId":"7","name":"Ann"}"#).unwrap();
        assert_eq!(form.employee_id, "7");
        assert_eq!(form.name, "Ann");
        assert!(form.position.is_empty());
    }
}
