use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::users::{CreateUserRequest, UpdateUserRequest, UserList},
    entity::users::{ActiveModel, Column, Entity as Users},
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Deleted, Meta},
    routes::params::UserListQuery,
    state::AppState,
};

const EMAIL_TAKEN: &str = "Email is already in use";

pub async fn list_users(
    state: &AppState,
    query: UserListQuery,
) -> AppResult<ApiResponse<UserList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let finder = Users::find().order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn get_user(state: &AppState, id: Uuid) -> AppResult<ApiResponse<User>> {
    let user = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    Ok(ApiResponse::success("User", User::from(user), Some(Meta::empty())))
}

pub async fn create_user(
    state: &AppState,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    let new_user = payload.validate()?;

    let exists = Users::find()
        .filter(Column::Email.eq(new_user.email.as_str()))
        .one(&state.orm)
        .await?;
    if exists.is_some() {
        return Err(AppError::Conflict(EMAIL_TAKEN.into()));
    }

    let password_hash = hash_password(&new_user.password)?;
    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(new_user.email),
        name: Set(new_user.name),
        password_hash: Set(password_hash),
        role: Set(new_user.role),
        active: Set(true),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let user = active
        .insert(&state.orm)
        .await
        .map_err(|err| AppError::from_write(err, EMAIL_TAKEN))?;

    audit::record(
        state.pool(),
        Some(user.id),
        "user_create",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User created",
        User::from(user),
        Some(Meta::empty()),
    ))
}

pub async fn update_user(
    state: &AppState,
    id: Uuid,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    let changes = payload.validate()?;

    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    if let Some(email) = changes.email.as_deref().filter(|e| *e != existing.email) {
        let taken = Users::find()
            .filter(
                Condition::all()
                    .add(Column::Email.eq(email))
                    .add(Column::Id.ne(id)),
            )
            .one(&state.orm)
            .await?;
        if taken.is_some() {
            return Err(AppError::Conflict(EMAIL_TAKEN.into()));
        }
    }

    let mut active: ActiveModel = existing.into();
    if let Some(email) = changes.email {
        active.email = Set(email);
    }
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
    if let Some(password) = changes.password.as_deref() {
        active.password_hash = Set(hash_password(password)?);
    }
    if let Some(role) = changes.role {
        active.role = Set(role);
    }
    if let Some(flag) = changes.active {
        active.active = Set(flag);
    }
    active.updated_at = Set(Utc::now().into());

    let user = active
        .update(&state.orm)
        .await
        .map_err(|err| AppError::from_write(err, EMAIL_TAKEN))?;

    audit::record(
        state.pool(),
        Some(user.id),
        "user_update",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        User::from(user),
        Some(Meta::empty()),
    ))
}

pub async fn delete_user(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Deleted>> {
    let result = Users::delete_by_id(id)
        .exec(&state.orm)
        .await
        .map_err(|err| AppError::from_write(err, "User still owns cash registers or sales"))?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("User"));
    }

    audit::record(
        state.pool(),
        None,
        "user_delete",
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User deleted",
        Deleted { id },
        Some(Meta::empty()),
    ))
}

/// Salted argon2 hash in PHC string form.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordVerifier, password_hash::PasswordHash};

    #[test]
    fn hash_is_salted_and_verifiable() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();
        assert_ne!(first, "hunter2");
        assert_ne!(first, second);

        let parsed = PasswordHash::new(&first).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"hunter2", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"hunter3", &parsed)
                .is_err()
        );
    }
}
