use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub email: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub given_name: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub family_name: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub profile_photo: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub locale: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub time_zone: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub version: i64,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub onboarding_completed: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub mobile_onboarding_completed: bool,
}

impl User {
    pub fn display_name(&self) -> String {
        match (self.given_name.is_empty(), self.family_name.is_empty()) {
            (false, false) => format!("{} {}", self.given_name, self.family_name),
            (false, true) => self.given_name.clone(),
            (true, false) => self.family_name.clone(),
            (true, true) => self.email.clone(),
        }
    }
}
