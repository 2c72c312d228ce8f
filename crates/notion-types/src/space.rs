use serde::{Deserialize, Serialize};

/// A notion.so workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Space {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub version: i64,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub beta_enabled: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub permissions: Vec<Permission>,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub pages: Vec<String>,
}

/// A grant on a space or block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permission {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub role: String,
    /// `user_permission` or `public_permission`
    #[serde(rename = "type", deserialize_with = "crate::de::null_default")]
    pub permission_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
