use entity::employees;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use tracing::debug;

use crate::{DbError, DbPool, DbResult};

/// Document operations on the `employees` collection.
#[derive(Clone)]
pub struct EmployeeStore {
    pool: DbPool,
}

impl EmployeeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Full scan of the collection in document-key order.
    pub async fn list(&self) -> DbResult<Vec<employees::Model>> {
        let docs = employees::Entity::find()
            .order_by_asc(employees::Column::DocKey)
            .all(self.pool.as_ref())
            .await?;
        Ok(docs)
    }

    pub async fn get(&self, key: &str) -> DbResult<Option<employees::Model>> {
        let doc = employees::Entity::find_by_id(key.to_owned())
            .one(self.pool.as_ref())
            .await?;
        Ok(doc)
    }

    /// Largest value of the `id` field, if any document carries one.
    pub async fn highest_id(&self) -> DbResult<Option<i64>> {
        let top = employees::Entity::find()
            .order_by_desc(employees::Column::Id)
            .one(self.pool.as_ref())
            .await?;
        Ok(top.map(|doc| doc.id))
    }

    /// Write a new document. Fails with [`DbError::Conflict`] when either the
    /// key or the `id` field is already taken.
    pub async fn insert_new(&self, doc: employees::Model) -> DbResult<()> {
        let key = doc.doc_key.clone();
        let active = employees::ActiveModel {
            doc_key: Set(doc.doc_key),
            id: Set(doc.id),
            name: Set(doc.name),
            position: Set(doc.position),
            department: Set(doc.department),
            contact: Set(doc.contact),
        };
        employees::Entity::insert(active)
            .exec_without_returning(self.pool.as_ref())
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => DbError::Conflict(key.clone()),
                _ => DbError::Database(err),
            })?;
        debug!(key = %key, "employee document written");
        Ok(())
    }

    /// Merge `patch` into the document at `key`: set fields overwrite, the
    /// rest are left alone. The key and `id` field are never modified.
    pub async fn merge(&self, key: &str, mut patch: employees::ActiveModel) -> DbResult<()> {
        patch.doc_key = NotSet;
        patch.id = NotSet;
        if !patch.is_changed() {
            return match self.get(key).await? {
                Some(_) => Ok(()),
                None => Err(DbError::NotFound(key.to_owned())),
            };
        }
        let result = employees::Entity::update_many()
            .set(patch)
            .filter(employees::Column::DocKey.eq(key))
            .exec(self.pool.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(DbError::NotFound(key.to_owned()));
        }
        Ok(())
    }

    /// Remove the document at `key`. Returns whether one existed.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = employees::Entity::delete_by_id(key.to_owned())
            .exec(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn ping(&self) -> DbResult<()> {
        self.pool.ping().await.map_err(Into::into)
    }
}
