//! Deserialization helpers.

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like a missing key: the field's default.
///
/// The server sends `null` for unset fields as often as it omits them, so
/// every non-`Option` field in the wire types goes through this.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_default")]
        name: String,
        #[serde(deserialize_with = "null_default")]
        ids: Vec<String>,
        #[serde(deserialize_with = "null_default")]
        ratio: f64,
    }

    #[test]
    fn test_null_missing_and_present() {
        let nulls: Sample =
            serde_json::from_value(json!({"name": null, "ids": null, "ratio": null})).unwrap();
        assert_eq!(nulls, Sample::default());

        let missing: Sample = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing, Sample::default());

        let present: Sample =
            serde_json::from_value(json!({"name": "a", "ids": ["x"], "ratio": 0.5})).unwrap();
        assert_eq!(present.name, "a");
        assert_eq!(present.ids, vec!["x"]);
        assert_eq!(present.ratio, 0.5);
    }

    #[test]
    fn test_wrong_type_is_still_an_error() {
        assert!(serde_json::from_value::<Sample>(json!({"name": 3})).is_err());
    }
}
