pub mod format;
pub mod peers;
pub mod stats;
pub mod table;

use serde::Serialize;

pub fn to_pretty_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn to_pretty_yaml<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use common::api::User;

    fn sample_user() -> User {
        User {
            id: 1,
            username: "alice".into(),
            email: "alice@example.com".into(),
            is_active: true,
            is_superuser: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn pretty_json_renders_snake_case_fields() {
        let json = to_pretty_json(&sample_user()).unwrap();
        assert!(json.contains("\"username\": \"alice\""));
        assert!(json.contains("\"is_superuser\": false"));
    }

    #[test]
    fn pretty_yaml_renders_fields() {
        let yaml = to_pretty_yaml(&sample_user()).unwrap();
        assert!(yaml.contains("username: alice"));
        assert!(yaml.contains("is_active: true"));
    }
}
