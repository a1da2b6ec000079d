mod employees;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, ID, Object, Schema, SimpleObject};
use platform_api::{ApiError, internal_error};
use products_hr::EmployeeService;
use serde::Serialize;
use tracing::instrument;

pub use employees::{EmployeeNode, EmployeePatchInput, NewEmployeeInput};

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: EmployeeService) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

/// SDL of the schema, built without attached data.
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

#[derive(Default)]
pub struct QueryRoot;

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self) -> HealthPayload {
        HealthPayload { ok: true }
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    #[instrument(name = "graphql.employees", skip_all)]
    async fn employees(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<EmployeeNode>> {
        let employees = service(ctx)?.list().await.map_err(|err| err.extend())?;
        Ok(employees.into_iter().map(EmployeeNode::from).collect())
    }

    #[instrument(name = "graphql.employee", skip(self, ctx))]
    async fn employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<EmployeeNode>> {
        let found = service(ctx)?.find(&id).await.map_err(|err| err.extend())?;
        Ok(found.map(EmployeeNode::from))
    }
}

#[Object]
impl MutationRoot {
    #[instrument(name = "graphql.create_employee", skip_all)]
    async fn create_employee(
        &self,
        ctx: &Context<'_>,
        input: NewEmployeeInput,
    ) -> async_graphql::Result<EmployeeNode> {
        let service = service(ctx)?;
        let input = input.validate().map_err(|err| err.extend())?;
        let created = service.create(input).await.map_err(|err| err.extend())?;
        Ok(created.into())
    }

    /// Overwrite the supplied fields and return the record as stored.
    #[instrument(name = "graphql.update_employee", skip(self, ctx, input))]
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: EmployeePatchInput,
    ) -> async_graphql::Result<EmployeeNode> {
        let service = service(ctx)?;
        service
            .update(&id, input.into())
            .await
            .map_err(|err| err.extend())?;
        let updated = service
            .find(&id)
            .await
            .map_err(|err| err.extend())?
            .ok_or_else(|| ApiError::not_found("No such employee!").extend())?;
        Ok(updated.into())
    }

    /// Returns whether a record existed under `id`.
    #[instrument(name = "graphql.delete_employee", skip(self, ctx))]
    async fn delete_employee(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        service(ctx)?.delete(&id).await.map_err(|err| err.extend())
    }
}

fn service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a EmployeeService> {
    ctx.data::<EmployeeService>()
        .map_err(|_| internal_error(anyhow::anyhow!("employee service missing from schema")))
}

#[derive(Clone, Debug, SimpleObject, Serialize)]
pub struct HealthPayload {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Request, Variables};
    use migration::{Migrator, MigratorTrait};
    use platform_db::{DatabaseSettings, EmployeeStore, connect};
    use serde_json::json;

    async fn schema() -> SchemaType {
        let settings = DatabaseSettings::with_url("sqlite::memory:").max_connections(1);
        let pool = connect(&settings).await.unwrap();
        Migrator::up(pool.as_ref(), None).await.unwrap();
        build_schema(EmployeeService::new(EmployeeStore::new(pool)))
    }

    const CREATE: &str = r#"
        mutation Create($input: NewEmployeeInput!) {
            createEmployee(input: $input) { id storedId name }
        }
    "#;

    fn ann() -> Variables {
        Variables::from_json(json!({
            "input": {"name": "Ann", "position": "Eng", "department": "R&D", "contact": "a@x.com"}
        }))
    }

    #[test]
    fn sdl_lists_the_directory_operations() {
        let sdl = sdl();
        for field in ["employees:", "createEmployee(", "updateEmployee(", "deleteEmployee("] {
            assert!(sdl.contains(field), "missing {field}");
        }
    }

    #[tokio::test]
    async fn health_query_returns_ok() {
        let schema = schema().await;
        let response = schema.execute(Request::new("{ health { ok } }")).await;
        assert!(response.errors.is_empty());
        let body = response.data.into_json().unwrap();
        assert_eq!(body, json!({"health": {"ok": true}}));
    }

    #[tokio::test]
    async fn create_then_list() {
        let schema = schema().await;
        for expected in [101, 102] {
            let response = schema.execute(Request::new(CREATE).variables(ann())).await;
            assert!(response.errors.is_empty(), "{:?}", response.errors);
            let body = response.data.into_json().unwrap();
            assert_eq!(
                body,
                json!({"createEmployee": {"id": expected.to_string(), "storedId": expected, "name": "Ann"}})
            );
        }

        let response = schema
            .execute(Request::new("{ employees { id department } }"))
            .await;
        let body = response.data.into_json().unwrap();
        assert_eq!(
            body,
            json!({"employees": [
                {"id": "101", "department": "R&D"},
                {"id": "102", "department": "R&D"}
            ]})
        );
    }

    #[tokio::test]
    async fn blank_create_reports_invalid_input() {
        let schema = schema().await;
        let vars = Variables::from_json(json!({
            "input": {"name": " ", "position": "Eng", "department": "R&D", "contact": "a@x.com"}
        }));
        let response = schema.execute(Request::new(CREATE).variables(vars)).await;
        assert_eq!(response.errors.len(), 1);
        let err = &response.errors[0];
        assert_eq!(err.message, "All fields are required and cannot be just spaces.");
        let code = err.extensions.as_ref().and_then(|ext| ext.get("code")).cloned();
        assert_eq!(code, Some(async_graphql::Value::from("INVALID_INPUT")));
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let schema = schema().await;
        schema.execute(Request::new(CREATE).variables(ann())).await;

        let response = schema
            .execute(Request::new(
                r#"mutation { updateEmployee(id: "101", input: {name: "Ann K.", position: ""}) { name position contact } }"#,
            ))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let body = response.data.into_json().unwrap();
        assert_eq!(
            body,
            json!({"updateEmployee": {"name": "Ann K.", "position": "Eng", "contact": "a@x.com"}})
        );
    }

    #[tokio::test]
    async fn missing_employee_is_null_and_delete_is_false() {
        let schema = schema().await;
        let response = schema
            .execute(Request::new(
                r#"{ employee(id: "999") { name } }"#,
            ))
            .await;
        assert_eq!(response.data.into_json().unwrap(), json!({"employee": null}));

        let response = schema
            .execute(Request::new(r#"mutation { deleteEmployee(id: "999") }"#))
            .await;
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({"deleteEmployee": false})
        );
    }
}
