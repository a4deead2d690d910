//! API representations of records.

use serde::Serialize;

use openmensa_db::model::user::User;

use crate::app::api::response::Document;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub login: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub time_zone: String,
    pub language: String,
    pub admin: bool,
    pub role: &'static str,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            login: user.login.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            time_zone: user.time_zone.clone(),
            language: user.language.clone(),
            admin: user.is_admin(),
            role: user.role().as_str(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

impl Document for UserView {
    const ROOT: &'static str = "user";
}

/// A list of users; XML wraps each entry in a `<user>` element.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct UserList(pub Vec<UserView>);

impl Document for UserList {
    const ROOT: &'static str = "users";

    fn to_xml(&self) -> AppResult<String> {
        #[derive(Serialize)]
        struct Users<'a> {
            user: &'a [UserView],
        }

        quick_xml::se::to_string_with_root(Self::ROOT, &Users { user: &self.0 })
            .map_err(|e| AppError::Encoding(e.to_string()))
    }
}

impl From<&[User]> for UserList {
    fn from(users: &[User]) -> Self {
        Self(users.iter().map(UserView::from).collect())
    }
}
