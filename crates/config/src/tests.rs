use crate::{AppConfig, JwtConfig};
use figment::{
    Figment,
    providers::{Format, Toml},
};
use secrecy::{ExposeSecret, Secret};

const MINIMAL: &str = r#"
app_name = "campus-gateway"

[jwt]
secret = "0123456789abcdef0123456789abcdef"
"#;

#[test]
fn test_secret_redaction() {
    let config = JwtConfig {
        secret: Secret::new("super_secret_signing_key".to_string()),
        expires_in: 3600,
        issuer: "campus-portal".to_string(),
        audience: "campus-gateway".to_string(),
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("super_secret_signing_key"));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_defaults_applied() {
    let config = AppConfig::from_figment(Figment::new().merge(Toml::string(MINIMAL))).unwrap();

    assert_eq!(config.app_env, "development");
    assert!(config.is_development());
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.telemetry.log_level, "info");
    assert!(!config.telemetry.json);
    assert_eq!(config.jwt.expires_in, 3600);
    assert_eq!(config.jwt.issuer, "campus-portal");
    assert!(config.access.policy_overrides.is_empty());
    assert_eq!(
        config.jwt.secret.expose_secret(),
        "0123456789abcdef0123456789abcdef"
    );
}

#[test]
fn test_policy_overrides_parsed() {
    let toml = format!(
        r#"{MINIMAL}
[access.policy_overrides]
parent = ["dashboard", "transport"]
staff = []
"#
    );
    let config = AppConfig::from_figment(Figment::new().merge(Toml::string(&toml))).unwrap();

    let overrides = &config.access.policy_overrides;
    assert_eq!(overrides.len(), 2);
    assert_eq!(overrides["parent"], vec!["dashboard", "transport"]);
    assert!(overrides["staff"].is_empty());
}

#[test]
fn test_later_layer_wins() {
    let figment = Figment::new()
        .merge(Toml::string(MINIMAL))
        .merge(Toml::string("app_env = \"production\"\n[server]\nport = 9000\n"));
    let config = AppConfig::from_figment(figment).unwrap();

    assert!(config.is_production());
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
fn test_missing_jwt_is_error() {
    let result = AppConfig::from_figment(Figment::new().merge(Toml::string("app_name = \"x\"")));
    assert!(result.is_err());
}
