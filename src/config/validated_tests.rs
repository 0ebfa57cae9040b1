//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;
use crate::store::LineEnding;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["launcher-ini"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod defaults {
    use super::*;

    #[test]
    fn no_toml_uses_builtin_defaults() {
        let cli = cli(&["get", "a.ini", "s", "k"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.line_ending, None);
        assert!(config.atomic_writes);
        assert!(config.persister().is_atomic());
        assert!(!config.dump_json);
        assert!(config.dump_filter.is_none());
        assert!(!config.dry_run);
        assert!(!config.verbose);
    }

    #[test]
    fn empty_toml_uses_builtin_defaults() {
        let cli = cli(&["get", "a.ini", "s", "k"]);
        let toml = toml("");
        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.line_ending, None);
        assert!(config.atomic_writes);
    }
}

mod line_ending {
    use super::*;

    #[test]
    fn from_toml() {
        let cli = cli(&["set", "a.ini", "s", "k", "v"]);
        let toml = toml(
            r#"
            [store]
            line_ending = "crlf"
        "#,
        );
        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.line_ending, Some(LineEnding::CrLf));
    }

    #[test]
    fn cli_overrides_toml() {
        let cli = cli(&["set", "a.ini", "s", "k", "v", "--line-ending", "lf"]);
        let toml = toml(
            r#"
            [store]
            line_ending = "crlf"
        "#,
        );
        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.line_ending, Some(LineEnding::Lf));
    }

    #[test]
    fn cli_preserve_overrides_toml() {
        let cli = cli(&["set", "a.ini", "s", "k", "v", "--line-ending", "preserve"]);
        let toml = toml(
            r#"
            [store]
            line_ending = "crlf"
        "#,
        );
        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.line_ending, None);
    }

    #[test]
    fn toml_aliases() {
        for (value, expected) in [
            ("lf", Some(LineEnding::Lf)),
            ("Unix", Some(LineEnding::Lf)),
            ("CRLF", Some(LineEnding::CrLf)),
            ("windows", Some(LineEnding::CrLf)),
            ("dos", Some(LineEnding::CrLf)),
            ("preserve", None),
            ("auto", None),
        ] {
            let cli = cli(&["get", "a.ini", "s", "k"]);
            let toml = toml(&format!("[store]\nline_ending = \"{value}\"\n"));
            let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

            assert_eq!(config.line_ending, expected, "Failed for variant: {value}");
        }
    }

    #[test]
    fn invalid_value_returns_error() {
        let cli = cli(&["get", "a.ini", "s", "k"]);
        let toml = toml(
            r#"
            [store]
            line_ending = "mac"
        "#,
        );
        let result = ValidatedConfig::from_raw(&cli, Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidLineEnding { value }) if value == "mac"
        ));
    }
}

mod atomic_writes {
    use super::*;

    #[test]
    fn toml_can_disable() {
        let cli = cli(&["set", "a.ini", "s", "k", "v"]);
        let toml = toml(
            r"
            [store]
            atomic_writes = false
        ",
        );
        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert!(!config.atomic_writes);
        assert!(!config.persister().is_atomic());
    }

    #[test]
    fn cli_no_atomic_wins_over_toml_true() {
        let cli = cli(&["set", "a.ini", "s", "k", "v", "--no-atomic"]);
        let toml = toml(
            r"
            [store]
            atomic_writes = true
        ",
        );
        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert!(!config.atomic_writes);
    }
}

mod dump_options {
    use super::*;

    #[test]
    fn json_from_cli() {
        let cli = cli(&["dump", "a.ini", "--json"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert!(config.dump_json);
    }

    #[test]
    fn json_from_toml_cannot_be_disabled_by_cli() {
        let cli = cli(&["dump", "a.ini"]);
        let toml = toml(
            r"
            [dump]
            json = true
        ",
        );
        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert!(config.dump_json);
    }

    #[test]
    fn cli_filter_replaces_toml_filter() {
        let cli = cli(&["dump", "a.ini", "--filter", "^auto_"]);
        let toml = toml(
            r#"
            [dump]
            filter = "^bot_"
        "#,
        );
        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        let filter = config.dump_filter.unwrap();
        assert!(filter.is_match("auto_menu"));
        assert!(!filter.is_match("bot_name"));
    }

    #[test]
    fn toml_filter_used_without_cli_filter() {
        let cli = cli(&["dump", "a.ini"]);
        let toml = toml(
            r#"
            [dump]
            filter = "^bot_"
        "#,
        );
        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.dump_filter.unwrap().as_str(), "^bot_");
    }

    #[test]
    fn invalid_regex_returns_error() {
        let cli = cli(&["dump", "a.ini", "--filter", "[unclosed"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidRegex { pattern, .. }) if pattern == "[unclosed"
        ));
    }
}

mod runtime_flags {
    use super::*;

    #[test]
    fn dry_run_and_verbose_from_cli() {
        let cli = cli(&["set", "a.ini", "s", "k", "v", "--dry-run", "--verbose"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert!(config.dry_run);
        assert!(config.verbose);
    }

    #[test]
    fn display_summarizes_settings() {
        let cli = cli(&["dump", "a.ini", "--filter", "^ai$", "--line-ending", "crlf"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        let text = config.to_string();
        assert!(text.contains("line_ending: crlf"), "{text}");
        assert!(text.contains("dump_filter: ^ai$"), "{text}");
        assert!(text.contains("atomic_writes: true"), "{text}");
    }
}

mod loading {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn load_reads_explicit_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[store]\natomic_writes = false\n").unwrap();

        let path_str = path.to_str().unwrap();
        let cli = cli(&["--config", path_str, "check", "a.ini"]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert!(!config.atomic_writes);
    }

    #[test]
    fn load_missing_explicit_config_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let path_str = path.to_str().unwrap();
        let cli = cli(&["--config", path_str, "check", "a.ini"]);
        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod templates {
    use std::fs;

    use tempfile::tempdir;

    use super::super::validated::{write_config_template, write_default_config};
    use super::*;
    use crate::store::IniStore;

    #[test]
    fn write_default_config_creates_launcher_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("launcher.ini");

        write_default_config(&path, false).unwrap();

        let store = IniStore::parse(&path).unwrap();
        assert_eq!(store.get("bwheadless", "bot_name").unwrap(), Some("MyBot"));
        assert!(store.is_disabled("bwheadless", "bot_dll"));
    }

    #[test]
    fn write_default_config_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("launcher.ini");
        fs::write(&path, "keep me").unwrap();

        let result = write_default_config(&path, false);

        assert!(matches!(result, Err(ConfigError::AlreadyExists { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn write_default_config_force_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("launcher.ini");
        fs::write(&path, "old").unwrap();

        write_default_config(&path, true).unwrap();

        assert!(fs::read_to_string(&path).unwrap().contains("[starcraft]"));
    }

    #[test]
    fn write_default_config_to_invalid_path_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("launcher.ini");

        let result = write_default_config(&path, false);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }

    #[test]
    fn write_config_template_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("launcher-ini").join("config.toml");

        write_config_template(&path, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(TomlConfig::parse(&content).is_ok());
    }
}
