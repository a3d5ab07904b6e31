use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::Sensitive;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    /// Handles are unique, they are used as the document key.
    #[serde(rename = "_id")]
    pub handle: String,
    pub password_hash: Sensitive<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Builder)]
pub struct InsertUser<'a> {
    pub handle: &'a str,
    pub password_hash: &'a str,
}

impl InsertUser<'_> {
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            handle: self.handle.to_string(),
            password_hash: Sensitive::new(self.password_hash.to_string()),
            avatar: None,
            bio: None,
            created_at: super::now(),
        }
    }
}

/// Fields to overwrite on a user, unset fields are left untouched.
#[derive(Debug, Builder)]
pub struct UpdateUser<'a> {
    pub avatar: Option<&'a str>,
    /// `Some(None)` clears the biography.
    pub bio: Option<Option<&'a str>>,
}

impl UpdateUser<'_> {
    pub fn apply(&self, user: &mut User) {
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar.to_string());
        }
        if let Some(bio) = self.bio {
            user.bio = bio.map(ToString::to_string);
        }
    }
}
