//! PostgreSQL-backed `GroupRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GroupRepository, GroupRepositoryError};
use crate::domain::{Group, GroupId, NewGroup};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{GroupRow, NewGroupRow};
use super::pool::DbPool;
use super::schema::groups;

/// Diesel-backed group store.
#[derive(Clone)]
pub struct DieselGroupRepository {
    pool: DbPool,
}

impl DieselGroupRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn group_error(error: diesel::result::Error) -> GroupRepositoryError {
    map_basic_diesel_error(
        error,
        GroupRepositoryError::query,
        GroupRepositoryError::connection,
    )
}

fn row_to_group(row: GroupRow) -> Group {
    Group {
        id: GroupId::new(row.id),
        title: row.title,
        slug: row.slug,
        description: row.description,
    }
}

#[async_trait]
impl GroupRepository for DieselGroupRepository {
    async fn list(&self) -> Result<Vec<Group>, GroupRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, GroupRepositoryError::connection))?;
        let rows: Vec<GroupRow> = groups::table
            .order(groups::id.asc())
            .select(GroupRow::as_select())
            .load(&mut conn)
            .await
            .map_err(group_error)?;
        Ok(rows.into_iter().map(row_to_group).collect())
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, GroupRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, GroupRepositoryError::connection))?;
        let row: Option<GroupRow> = groups::table
            .find(id.get())
            .select(GroupRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(group_error)?;
        Ok(row.map(row_to_group))
    }

    async fn insert(&self, group: &NewGroup) -> Result<Group, GroupRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, GroupRepositoryError::connection))?;
        let row: GroupRow = diesel::insert_into(groups::table)
            .values(&NewGroupRow {
                title: group.title(),
                slug: group.slug(),
                description: group.description(),
            })
            .returning(GroupRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match unique_violation(&err) {
                Some(_) => GroupRepositoryError::conflict(group.slug()),
                None => group_error(err),
            })?;
        Ok(row_to_group(row))
    }
}
