use platform_api::{ApiError, ApiResult};
use platform_db::{DbError, EmployeeStore};
use tracing::{error, info, instrument, warn};

use crate::employee::{
    Employee, EmployeePatch, NEEDS_ID, NO_SUCH_EMPLOYEE, NewEmployee, UPDATE_NEEDS_ID,
};

/// Id given to the first employee of an empty collection.
pub const FIRST_EMPLOYEE_ID: i64 = 101;
pub const DEFAULT_CREATE_ATTEMPTS: u32 = 5;

const CREATE_FAILED: &str = "Error creating employee.";
const LIST_FAILED: &str = "Error loading employees.";
const READ_FAILED: &str = "Error reading employee.";
const UPDATE_FAILED: &str = "Error updating employee.";
const DELETE_FAILED: &str = "Error deleting employee.";

/// The four directory operations against the `employees` collection.
#[derive(Clone)]
pub struct EmployeeService {
    store: EmployeeStore,
    create_attempts: u32,
}

impl EmployeeService {
    pub fn new(store: EmployeeStore) -> Self {
        Self {
            store,
            create_attempts: DEFAULT_CREATE_ATTEMPTS,
        }
    }

    /// How many times create re-allocates an id after losing a race.
    pub fn with_create_attempts(mut self, attempts: u32) -> Self {
        self.create_attempts = attempts.max(1);
        self
    }

    pub fn store(&self) -> &EmployeeStore {
        &self.store
    }

    #[instrument(name = "hr.employees.list", skip_all)]
    pub async fn list(&self) -> ApiResult<Vec<Employee>> {
        let docs = self
            .store
            .list()
            .await
            .map_err(|err| ApiError::store(LIST_FAILED, err))?;
        Ok(docs.into_iter().map(Employee::from).collect())
    }

    #[instrument(name = "hr.employees.read", skip(self))]
    pub async fn find(&self, key: &str) -> ApiResult<Option<Employee>> {
        if key.is_empty() {
            return Err(ApiError::invalid(NEEDS_ID));
        }
        let doc = self
            .store
            .get(key)
            .await
            .map_err(|err| ApiError::store(READ_FAILED, err))?;
        Ok(doc.map(Employee::from))
    }

    /// Allocate the next id and write the record under it.
    #[instrument(name = "hr.employees.create", skip_all, fields(name = input.name()))]
    pub async fn create(&self, input: NewEmployee) -> ApiResult<Employee> {
        let mut attempt = 1;
        loop {
            let id = self.next_id().await.map_err(create_failed)?;
            let doc = input.to_document(id);
            match self.store.insert_new(doc.clone()).await {
                Ok(()) => {
                    info!(id, "employee created");
                    return Ok(doc.into());
                }
                Err(DbError::Conflict(key)) if attempt < self.create_attempts => {
                    warn!(%key, attempt, "employee id taken concurrently; allocating again");
                    attempt += 1;
                }
                Err(err) => return Err(create_failed(err)),
            }
        }
    }

    #[instrument(name = "hr.employees.update", skip(self, patch))]
    pub async fn update(&self, key: &str, patch: EmployeePatch) -> ApiResult<()> {
        if key.is_empty() {
            return Err(ApiError::invalid(UPDATE_NEEDS_ID));
        }
        match self.store.merge(key, patch.into_active_model()).await {
            Ok(()) => {
                info!("employee updated");
                Ok(())
            }
            Err(DbError::NotFound(_)) => Err(ApiError::not_found(NO_SUCH_EMPLOYEE)),
            Err(err) => Err(ApiError::store(UPDATE_FAILED, err)),
        }
    }

    /// Remove the record at `key`. Missing records are not an error.
    #[instrument(name = "hr.employees.delete", skip(self))]
    pub async fn delete(&self, key: &str) -> ApiResult<bool> {
        if key.is_empty() {
            return Err(ApiError::invalid(NEEDS_ID));
        }
        let existed = self
            .store
            .delete(key)
            .await
            .map_err(|err| ApiError::store(DELETE_FAILED, err))?;
        info!(existed, "employee deleted");
        Ok(existed)
    }

    async fn next_id(&self) -> Result<i64, DbError> {
        match self.store.highest_id().await? {
            None => Ok(FIRST_EMPLOYEE_ID),
            Some(id) => id.checked_add(1).ok_or(DbError::IdsExhausted(id)),
        }
    }
}

fn create_failed(err: DbError) -> ApiError {
    error!(error = %err, "error creating employee");
    ApiError::store(CREATE_FAILED, err)
}
