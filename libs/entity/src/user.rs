use serde::{Deserialize, Serialize};

#[derive(Debug, Default, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    General,
    Business,
    Admin,
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "business" => UserRole::Business,
            "admin" => UserRole::Admin,
            _ => UserRole::General,
        }
    }
}

impl From<UserRole> for String {
    fn from(value: UserRole) -> Self {
        match value {
            UserRole::General => "general".to_string(),
            UserRole::Business => "business".to_string(),
            UserRole::Admin => "admin".to_string(),
        }
    }
}

/// The slice of a business account that posts denormalize: an edit here
/// fans out to `business_name`/`business_icon` on every authored post.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub user_id: String,
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_role_from_string_defaults_to_general() {
        assert_eq!(UserRole::from("business".to_string()), UserRole::Business);
        assert_eq!(UserRole::from("admin".to_string()), UserRole::Admin);
        assert_eq!(UserRole::from("visitor".to_string()), UserRole::General);
    }
}
