//! User accounts and the signed-in user's profile.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::RecordId;

/// Role reported when the profile does not carry one.
pub const DEFAULT_ROLE: &str = "user";

/// User account as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Record identifier.
    pub id: RecordId,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Contact address.
    #[serde(default)]
    pub email: String,
}

/// Payload for creating a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateInput {
    /// Login name.
    pub username: String,
    /// Contact address; sent as `null` when absent.
    pub email: Option<String>,
}

/// Partial update of a user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New contact address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Payload for the signed-in user's profile update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateInput {
    /// New login name.
    pub username: String,
    /// New contact address.
    pub email: String,
}

/// Credentials exchanged for an API token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginInput {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

// `role` arrives either as a plain name or as the server's role object.
fn role_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(name)) => Some(name),
        Some(Value::Object(mut fields)) => match fields.remove("name") {
            Some(Value::String(name)) => Some(name),
            _ => None,
        },
        _ => None,
    })
}

/// Profile fields of the signed-in user, as held by the session.
///
/// Every field is optional so that partial payloads can be merged into an
/// existing snapshot. Fields the console does not model are kept in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Record identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Role name.
    #[serde(
        default,
        deserialize_with = "role_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,
    /// Remaining profile fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserInfo {
    /// Shallow merge: fields present in `incoming` replace those in `self`;
    /// fields absent from `incoming` keep their prior value.
    ///
    /// An explicit `null` counts as absent, for the typed fields and for
    /// `extra` alike, so it never erases a known value.
    #[must_use]
    pub fn merged_with(&self, incoming: Self) -> Self {
        let mut extra = self.extra.clone();
        extra.extend(
            incoming
                .extra
                .into_iter()
                .filter(|(_, value)| !value.is_null()),
        );
        Self {
            id: incoming.id.or_else(|| self.id.clone()),
            username: incoming.username.or_else(|| self.username.clone()),
            email: incoming.email.or_else(|| self.email.clone()),
            avatar: incoming.avatar.or_else(|| self.avatar.clone()),
            role: incoming.role.or_else(|| self.role.clone()),
            extra,
        }
    }

    /// Login name, empty when unknown.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    /// Contact address, empty when unknown.
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    /// Avatar URL, empty when unknown.
    pub fn avatar(&self) -> &str {
        self.avatar.as_deref().unwrap_or_default()
    }

    /// Role name, [`DEFAULT_ROLE`] when unknown.
    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or(DEFAULT_ROLE)
    }
}
