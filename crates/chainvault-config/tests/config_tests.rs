// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the chainvault configuration system.

use chainvault_config::diagnostic::{suggest_key, ConfigError};
use chainvault_config::model::{ChainvaultConfig, KdfAlgorithm, KeyBindingMode};
use chainvault_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_chainvault_config() {
    let toml = r#"
[vault]
kdf = "argon2id"
kdf_iterations = 700000
argon2_memory_cost = 131072
argon2_iterations = 4
argon2_parallelism = 2
key_binding = "wallet-signature"

[storage]
database_path = "/tmp/test.db"
wal_mode = false

[network]
active = "devnet"

[[network.networks]]
name = "devnet"
chain_id = 1337
ledger_address = "0xdead"

[wallet]
key_path = "/tmp/wallet.key"

[logging]
log_level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.vault.kdf, KdfAlgorithm::Argon2id);
    assert_eq!(config.vault.kdf_iterations, 700_000);
    assert_eq!(config.vault.argon2_memory_cost, 131_072);
    assert_eq!(config.vault.argon2_iterations, 4);
    assert_eq!(config.vault.argon2_parallelism, 2);
    assert_eq!(config.vault.key_binding, KeyBindingMode::WalletSignature);
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.network.networks.len(), 1);
    assert_eq!(config.network.active_network().unwrap().chain_id, 1337);
    assert_eq!(config.wallet.key_path, "/tmp/wallet.key");
    assert_eq!(config.logging.log_level, "debug");
}

/// Unknown field in [vault] section produces an UnknownField error.
#[test]
fn unknown_field_in_vault_produces_error() {
    let toml = r#"
[vault]
kdf_iteratons = 5
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("kdf_iteratons"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown field inside a network entry is rejected too.
#[test]
fn unknown_field_in_network_entry_produces_error() {
    let toml = r#"
[[network.networks]]
name = "devnet"
chain_id = 1
rpc = "http://localhost:8545"
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// Omitted sections fall back to compiled defaults.
#[test]
fn missing_optional_sections_use_defaults() {
    let toml = r#"
[logging]
log_level = "warn"
"#;

    let config = load_config_from_str(toml).expect("partial TOML should deserialize");
    assert_eq!(config.logging.log_level, "warn");
    assert_eq!(config.vault.kdf, KdfAlgorithm::Pbkdf2Sha256);
    assert_eq!(config.vault.kdf_iterations, 600_000);
    assert_eq!(config.network.active, "localhost");
    assert!(config.storage.wal_mode);
}

/// A dotted override maps onto the nested key (what the env provider produces).
#[test]
fn dotted_override_sets_nested_key() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let toml_content = r#"
[vault]
kdf_iterations = 300000
"#;

    let config: ChainvaultConfig = Figment::new()
        .merge(Serialized::defaults(ChainvaultConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("vault.kdf_iterations", 900_000))
        .extract()
        .expect("should merge override");

    assert_eq!(config.vault.kdf_iterations, 900_000);
}

/// Serialized defaults provide sensible values for all required fields.
#[test]
fn serialized_defaults_are_sensible() {
    let config = ChainvaultConfig::default();

    assert_eq!(config.vault.kdf, KdfAlgorithm::Pbkdf2Sha256);
    assert_eq!(config.vault.key_binding, KeyBindingMode::Address);
    assert_eq!(config.vault.argon2_memory_cost, 65536);
    assert!(config.storage.database_path.ends_with("chainvault.db"));
    assert!(config.wallet.key_path.ends_with("wallet.key"));
    assert_eq!(config.network.active, "localhost");
    let names: Vec<&str> = config
        .network
        .networks
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, vec!["localhost", "sepolia"]);
    assert_eq!(config.logging.log_level, "info");
}

/// Top-level unknown sections are rejected.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telegram]
bot_token = "x"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown section");
    assert!(format!("{err}").contains("telegram"));
}

#[test]
fn diagnostic_suggests_key_binding() {
    let suggestion = suggest_key("key_bindng", &["kdf", "kdf_iterations", "key_binding"]);
    assert_eq!(suggestion.as_deref(), Some("key_binding"));
}

#[test]
fn diagnostic_no_suggestion_for_distant_typo() {
    let suggestion = suggest_key("qqqqq", &["database_path", "wal_mode"]);
    assert!(suggestion.is_none(), "should not suggest for distant typo");
}

/// Error output from load_and_validate_str includes the unknown key and valid keys.
#[test]
fn diagnostic_error_includes_unknown_key() {
    let toml = r#"
[storage]
databse_path = "/tmp/x.db"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "databse_path"
                && suggestion.as_deref() == Some("database_path")
                && valid_keys.contains("wal_mode")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'databse_path', got: {errors:?}"
    );
}

/// Invalid type (string where number expected) produces clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[vault]
kdf_iterations = "lots"
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("kdf_iterations"),
        "error should mention type mismatch, got: {err_str}"
    );
}

/// Unknown enum value for kdf is rejected.
#[test]
fn unknown_kdf_is_rejected() {
    let toml = r#"
[vault]
kdf = "scrypt"
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// ConfigError renders with miette's graphical handler and carries help text.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "kdf_iteratons".to_string(),
        table: "[vault]".to_string(),
        suggestion: Some("kdf_iterations".to_string()),
        valid_keys: "kdf, kdf_iterations, key_binding".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some(), "should have diagnostic code");
    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `kdf_iterations`"), "got: {help}");

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    handler
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("kdf_iteratons"));
}

#[test]
fn load_and_validate_valid_toml() {
    let toml = r#"
[vault]
kdf_iterations = 250000
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should validate");
    assert_eq!(config.vault.kdf_iterations, 250_000);
}

/// Validation errors surface through the high-level entry point.
#[test]
fn validation_catches_unknown_active_network() {
    let toml = r#"
[network]
active = "mainnet"
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown network should fail");
    let has_validation_error = errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("mainnet"))
    });
    assert!(has_validation_error, "got: {errors:?}");
}

/// A misspelled env override is reported against its section, not as a file line.
#[test]
fn misspelled_env_override_names_its_section() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("CHAINVAULT_VAULT_KDF_ITERATONS", "700000");

        let errors = load_and_validate_path(std::path::Path::new("chainvault.toml"))
            .expect_err("unknown env key should fail");
        let found = errors.iter().any(|e| {
            matches!(e, ConfigError::UnknownKey { key, table, suggestion, span, .. } if {
                key == "kdf_iteratons"
                    && table.contains("[vault]")
                    && table.contains("environment")
                    && suggestion.as_deref() == Some("kdf_iterations")
                    && span.is_none()
            })
        });
        assert!(found, "got: {errors:?}");
        Ok(())
    });
}

/// An unrecognized kdf name lists the accepted options and points at the line.
#[test]
fn unknown_kdf_lists_choices() {
    use miette::Diagnostic;

    let toml = "[vault]\nkdf = \"scrypt\"\n";
    let errors = load_and_validate_str(toml).expect_err("scrypt is not supported");
    let error = errors
        .iter()
        .find(|e| matches!(e, ConfigError::InvalidValue { .. }))
        .expect("should report an invalid value");
    assert!(error.to_string().contains("vault.kdf"), "got: {error}");
    let help = error.help().expect("should carry help").to_string();
    assert!(help.contains("\"argon2id\""), "got: {help}");
    assert!(matches!(error, ConfigError::InvalidValue { span: Some(_), .. }));
}
