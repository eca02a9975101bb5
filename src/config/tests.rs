//! Settings Module Tests
//!
//! ## Test Scopes
//! - **Parsing**: TOML schema, defaults and fixture records.
//! - **Environment**: Overrides for bind address, prefix and allow-list.
//! - **Registry**: Fixture validation and the resulting catalog.

#[cfg(test)]
mod tests {
    use crate::config::loader::{
        build_registry, load_settings, parse_settings, ENV_ALLOWED_MODELS, ENV_BIND, ENV_PREFIX,
    };
    use crate::config::types::Settings;
    use crate::filterchain::service::ChainService;
    use crate::filterchain::types::FilterQuery;
    use serde_json::json;
    use std::collections::HashMap;
    use std::io::Write;

    const SAMPLE: &str = r#"
allowed_models = ["Geo.Country", "geo.city"]

[server]
bind = "0.0.0.0:9000"
prefix = "/select"

[[models]]
app = "geo"
name = "country"
fields = ["name"]

[[models.records]]
pk = 1
display = "Deutschland"
fields = { name = "Deutschland" }

[[models.records]]
pk = 2
display = "Österreich"
fields = { name = "Österreich" }

[[models]]
app = "geo"
name = "city"
fields = ["name", "country", "is_active"]
ordering = ["name"]

[models.managers.active]
is_active = true

[[models.records]]
pk = 10
display = "Wien"
fields = { name = "Wien", country = 2, is_active = true }

[[models.records]]
pk = 11
display = "Berlin"
fields = { name = "Berlin", country = 1, is_active = true }

[[models.records]]
pk = 12
display = "Bonn"
fields = { name = "Bonn", country = 1, is_active = false }
"#;

    // ============================================================
    // PARSING
    // ============================================================

    #[test]
    fn test_parse_sample_settings() {
        let settings = parse_settings(SAMPLE).unwrap();

        assert_eq!(settings.allowed_models.len(), 2);
        assert_eq!(settings.server.bind.port(), 9000);
        assert_eq!(settings.server.prefix, "/select");
        assert_eq!(settings.models.len(), 2);
        assert_eq!(settings.models[1].records[0].pk, json!(10));
        assert_eq!(settings.models[1].pk_name, "id");
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = parse_settings("").unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.server.bind.to_string(), "127.0.0.1:8000");
        assert_eq!(settings.server.prefix, "/chaining");
        assert!(settings.allow_list().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_bind() {
        assert!(parse_settings("[server]\nbind = \"not an address\"").is_err());
    }

    #[tokio::test]
    async fn test_load_settings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let settings = load_settings(file.path()).await.unwrap();

        assert_eq!(settings.models.len(), 2);
    }

    #[tokio::test]
    async fn test_load_settings_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();

        let settings = load_settings(&dir.path().join("absent.toml")).await.unwrap();

        assert!(settings.models.is_empty());
    }

    // ============================================================
    // ENVIRONMENT
    // ============================================================

    #[test]
    fn test_env_overrides() {
        let mut settings = parse_settings(SAMPLE).unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BIND, "127.0.0.1:7000"),
            (ENV_PREFIX, "/chain"),
            (ENV_ALLOWED_MODELS, "geo.city, ,shop.product"),
        ]);

        settings
            .merge_env_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.server.bind.port(), 7000);
        assert_eq!(settings.server.prefix, "/chain");
        assert_eq!(settings.allowed_models, vec!["geo.city", "shop.product"]);
    }

    #[test]
    fn test_env_invalid_bind_is_error() {
        let mut settings = Settings::default();

        let result = settings.merge_env_from(|key| {
            (key == ENV_BIND).then(|| "localhost".to_string())
        });

        assert!(result.is_err());
    }

    // ============================================================
    // REGISTRY
    // ============================================================

    #[test]
    fn test_build_registry_from_sample() {
        let settings = parse_settings(SAMPLE).unwrap();

        let registry = build_registry(&settings).unwrap();

        assert_eq!(registry.list_models(), vec!["geo.city", "geo.country"]);
        let city = registry.get_model("geo", "city").unwrap();
        assert_eq!(city.len(), 3);
        assert!(city.has_manager("active"));
    }

    #[test]
    fn test_sample_serves_lookups() {
        let settings = parse_settings(SAMPLE).unwrap();
        let registry = build_registry(&settings).unwrap();
        let service = ChainService::new(registry, settings.allow_list());

        let ordered = service
            .filterchain(&FilterQuery::new("geo", "city", "country", "1"))
            .unwrap();
        let active = service
            .filterchain(&FilterQuery::new("geo", "city", "country", "1").with_manager("active"))
            .unwrap();

        let names: Vec<&str> = ordered.iter().map(|c| c.display.as_str()).collect();
        assert_eq!(names, vec!["Berlin", "Bonn"]);
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn test_build_registry_tolerates_unresolvable_allow_list_labels() {
        let content = r#"
allowed_models = ["geo.district", "nodot"]

[[models]]
app = "geo"
name = "district"
object_name = "CityDistrict"

[[models.records]]
pk = 7
"#;
        let settings = parse_settings(content).unwrap();

        let registry = build_registry(&settings).unwrap();
        let service = ChainService::new(registry, settings.allow_list());
        let choices = service
            .filterchain(&FilterQuery::new("geo", "district", "pk", "7"))
            .unwrap();

        assert_eq!(choices[0].display, "CityDistrict object (7)");
    }

    #[test]
    fn test_build_registry_rejects_duplicate_model() {
        let content = r#"
[[models]]
app = "geo"
name = "city"

[[models]]
app = "GEO"
name = "City"
"#;
        let settings = parse_settings(content).unwrap();

        assert!(build_registry(&settings).is_err());
    }

    #[test]
    fn test_build_registry_rejects_duplicate_pk() {
        let content = r#"
[[models]]
app = "geo"
name = "city"

[[models.records]]
pk = 1
display = "A"

[[models.records]]
pk = 1
display = "B"
"#;
        let settings = parse_settings(content).unwrap();

        assert!(build_registry(&settings).is_err());
    }

    #[test]
    fn test_build_registry_rejects_unknown_ordering_field() {
        let content = r#"
[[models]]
app = "geo"
name = "city"
fields = ["name"]
ordering = ["-population"]
"#;
        let settings = parse_settings(content).unwrap();

        let Err(err) = build_registry(&settings) else {
            panic!("ordering on an undeclared field should be rejected");
        };

        assert!(format!("{:#}", err).contains("population"));
    }

    #[test]
    fn test_build_registry_rejects_bad_manager() {
        let content = r#"
[[models]]
app = "geo"
name = "city"
fields = ["name"]

[models.managers.active]
is_active = true
"#;
        let settings = parse_settings(content).unwrap();

        assert!(build_registry(&settings).is_err());
    }
}
