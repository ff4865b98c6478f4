//! PostgreSQL-backed `UserRepository` and `TokenRepository` adapters.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    TokenRepository, TokenRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{AuthToken, NewUser, PasswordDigest, User, UserId, Username};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{NewTokenRow, NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::{tokens, users};

const TOKEN_USER_CONSTRAINT: &str = "tokens_user_id_key";

/// Diesel-backed user account store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn user_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let username = Username::new(&row.username).map_err(|err| {
        UserRepositoryError::query(format!("invalid username for user {}: {err}", row.id))
    })?;
    let password = PasswordDigest::parse(&row.password).map_err(|err| {
        UserRepositoryError::query(format!("invalid password for user {}: {err}", row.id))
    })?;
    Ok(User::new(UserId::new(row.id), username, password))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, UserRepositoryError::connection))?;
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(user_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, UserRepositoryError::connection))?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(user_error)?;
        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, UserRepositoryError::connection))?;
        let password = user.password.encode();
        let row: UserRow = diesel::insert_into(users::table)
            .values(&NewUserRow {
                username: user.username.as_ref(),
                password: &password,
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match unique_violation(&err) {
                Some(_) => UserRepositoryError::conflict(user.username.to_string()),
                None => user_error(err),
            })?;
        row_to_user(row)
    }
}

/// Diesel-backed token store.
#[derive(Clone)]
pub struct DieselTokenRepository {
    pool: DbPool,
}

impl DieselTokenRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn token_error(error: diesel::result::Error) -> TokenRepositoryError {
    map_basic_diesel_error(
        error,
        TokenRepositoryError::query,
        TokenRepositoryError::connection,
    )
}

#[async_trait]
impl TokenRepository for DieselTokenRepository {
    async fn find_user_id(&self, token: &AuthToken) -> Result<Option<UserId>, TokenRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, TokenRepositoryError::connection))?;
        let user_id: Option<i64> = tokens::table
            .find(token.as_str())
            .select(tokens::user_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(token_error)?;
        Ok(user_id.map(UserId::new))
    }

    async fn find_for_user(&self, user: UserId) -> Result<Option<AuthToken>, TokenRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, TokenRepositoryError::connection))?;
        let key: Option<String> = tokens::table
            .filter(tokens::user_id.eq(user.get()))
            .select(tokens::key)
            .first(&mut conn)
            .await
            .optional()
            .map_err(token_error)?;
        key.map(|key| {
            AuthToken::parse(&key).ok_or_else(|| {
                TokenRepositoryError::query(format!("malformed token stored for user {user}"))
            })
        })
        .transpose()
    }

    async fn insert(&self, user: UserId, token: &AuthToken) -> Result<(), TokenRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, TokenRepositoryError::connection))?;
        diesel::insert_into(tokens::table)
            .values(&NewTokenRow {
                key: token.as_str(),
                user_id: user.get(),
            })
            .execute(&mut conn)
            .await
            .map_err(|err| match unique_violation(&err) {
                Some(Some(TOKEN_USER_CONSTRAINT)) => TokenRepositoryError::conflict(user.get()),
                _ => token_error(err),
            })?;
        Ok(())
    }
}
