use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{parse_enum, require_text};
use crate::{
    entity::users::UserRole,
    error::{AppError, AppResult},
    models::User,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    /// ADMIN or USER, defaults to USER.
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}

#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub active: Option<bool>,
}

impl CreateUserRequest {
    pub fn validate(self) -> AppResult<NewUser> {
        let email = require_text("email", self.email)?;
        let name = require_text("name", self.name)?;
        if self.password.is_empty() {
            return Err(AppError::BadRequest("password is required".into()));
        }
        let role = match self.role.as_deref() {
            Some(raw) => parse_enum("role", raw)?,
            None => UserRole::User,
        };
        Ok(NewUser {
            email,
            name,
            password: self.password,
            role,
        })
    }
}

impl UpdateUserRequest {
    pub fn validate(self) -> AppResult<UserChanges> {
        let email = self.email.map(|v| require_text("email", v)).transpose()?;
        let name = self.name.map(|v| require_text("name", v)).transpose()?;
        if matches!(self.password.as_deref(), Some("")) {
            return Err(AppError::BadRequest(
                "password must not be empty".into(),
            ));
        }
        let role = self
            .role
            .as_deref()
            .map(|raw| parse_enum("role", raw))
            .transpose()?;
        Ok(UserChanges {
            email,
            name,
            password: self.password,
            role,
            active: self.active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateUserRequest {
        CreateUserRequest {
            email: "ana@example.com".into(),
            name: "Ana".into(),
            password: "s3cret".into(),
            role: None,
        }
    }

    #[test]
    fn role_defaults_to_user() {
        let user = request().validate().unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.email, "ana@example.com");
    }

    #[test]
    fn role_is_case_insensitive() {
        let user = CreateUserRequest {
            role: Some("admin".into()),
            ..request()
        }
        .validate()
        .unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(CreateUserRequest { email: " ".into(), ..request() }.validate().is_err());
        assert!(CreateUserRequest { password: "".into(), ..request() }.validate().is_err());
        assert!(CreateUserRequest { role: Some("root".into()), ..request() }.validate().is_err());
    }

    #[test]
    fn update_keeps_absent_fields_absent() {
        let changes = UpdateUserRequest {
            active: Some(false),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert!(changes.email.is_none());
        assert!(changes.password.is_none());
        assert_eq!(changes.active, Some(false));
    }
}
