//! Mass-assignment allow-lists for user payloads.
//!
//! Which fields of a payload may be applied depends on the operation and on
//! how the actor relates to the record. Everything else is dropped before
//! it reaches a record.

use std::collections::BTreeSet;

use serde::Deserialize;

use openmensa_db::model::user::{NewUser, User};

use crate::error::{ServiceError, ServiceResult};

/// An assignable user field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    Login,
    Email,
    Name,
    TimeZone,
    Language,
    Admin,
}

impl Attribute {
    pub const ALL: [Self; 6] = [
        Self::Login,
        Self::Email,
        Self::Name,
        Self::TimeZone,
        Self::Language,
        Self::Admin,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Email => "email",
            Self::Name => "name",
            Self::TimeZone => "time_zone",
            Self::Language => "language",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The write a payload is meant for.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    Create,
    Update(&'a User),
}

const REGISTRATION: [Attribute; 5] = [
    Attribute::Login,
    Attribute::Email,
    Attribute::Name,
    Attribute::TimeZone,
    Attribute::Language,
];

const PROFILE: [Attribute; 4] = [
    Attribute::Email,
    Attribute::Name,
    Attribute::TimeZone,
    Attribute::Language,
];

/// ## Summary
/// Returns the fields `actor` may assign in `operation`.
///
/// Administrators (and the system user) may assign every field. Anyone else
/// may register with the profile fields and a login, and may later change
/// their own profile but not their login or admin flag.
#[must_use]
pub fn safe_attributes(actor: &User, operation: Operation<'_>) -> BTreeSet<Attribute> {
    if actor.is_admin() {
        return Attribute::ALL.into_iter().collect();
    }
    match operation {
        Operation::Create => REGISTRATION.into_iter().collect(),
        Operation::Update(target) if actor.is_logged() && target.id == actor.id => {
            PROFILE.into_iter().collect()
        }
        Operation::Update(_) => BTreeSet::new(),
    }
}

/// A user payload as it arrives from a client. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserAttributes {
    pub login: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub time_zone: Option<String>,
    pub language: Option<String>,
    pub admin: Option<bool>,
}

impl UserAttributes {
    /// The fields this payload sets.
    #[must_use]
    pub fn present(&self) -> Vec<Attribute> {
        [
            (Attribute::Login, self.login.is_some()),
            (Attribute::Email, self.email.is_some()),
            (Attribute::Name, self.name.is_some()),
            (Attribute::TimeZone, self.time_zone.is_some()),
            (Attribute::Language, self.language.is_some()),
            (Attribute::Admin, self.admin.is_some()),
        ]
        .into_iter()
        .filter_map(|(attribute, set)| set.then_some(attribute))
        .collect()
    }

    fn clear(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::Login => self.login = None,
            Attribute::Email => self.email = None,
            Attribute::Name => self.name = None,
            Attribute::TimeZone => self.time_zone = None,
            Attribute::Language => self.language = None,
            Attribute::Admin => self.admin = None,
        }
    }

    /// ## Summary
    /// Drops every field outside `allowed`.
    ///
    /// ## Errors
    /// Returns `AccessDenied` when nothing may be assigned but the payload
    /// is not empty.
    pub fn sanitize(mut self, allowed: &BTreeSet<Attribute>) -> ServiceResult<Self> {
        let present = self.present();
        if allowed.is_empty() && !present.is_empty() {
            return Err(ServiceError::AccessDenied(
                "no attributes may be assigned".to_string(),
            ));
        }
        for attribute in present {
            if !allowed.contains(&attribute) {
                tracing::warn!(attribute = %attribute, "Dropping protected attribute from payload");
                self.clear(attribute);
            }
        }
        Ok(self)
    }

    /// Builds an insertable user, filling absent or blank locale fields from
    /// the given defaults.
    #[must_use]
    pub fn into_new_user(self, default_time_zone: &str, default_language: &str) -> NewUser {
        NewUser {
            login: self.login.unwrap_or_default(),
            email: normalize_email(self.email),
            name: self.name.unwrap_or_default(),
            time_zone: non_blank_or(self.time_zone, default_time_zone),
            language: non_blank_or(self.language, default_language),
            admin: self.admin.unwrap_or(false),
        }
    }

    /// Applies the present fields to `user`. An empty email clears it.
    pub fn assign(self, user: &mut User) {
        if let Some(login) = self.login {
            user.login = login;
        }
        if self.email.is_some() {
            user.email = normalize_email(self.email);
        }
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(time_zone) = self.time_zone.filter(|tz| !tz.trim().is_empty()) {
            user.time_zone = time_zone;
        }
        if let Some(language) = self.language.filter(|l| !l.trim().is_empty()) {
            user.language = language;
        }
        if let Some(admin) = self.admin {
            user.admin = admin;
        }
    }
}

fn normalize_email(email: Option<String>) -> Option<String> {
    email.filter(|e| !e.trim().is_empty())
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
