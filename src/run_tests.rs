//! Tests for the run module.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use launcher_ini::config::{Cli, ValidatedConfig};

use super::*;

const BWAPI_INI: &str = "\
[ai]
; BWAPI bot module
ai = bwapi-data/AI/ExampleAIModule.dll
;ai_dbg = bwapi-data/AI/ExampleAIModule_d.dll

[auto_menu]
auto_menu = SINGLE_PLAYER
;map = maps/(2)Benzene.scx
race = Terran
";

/// Writes `content` to a fresh file and returns its path.
fn ini_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("bwapi.ini");
    fs::write(&path, content).unwrap();
    path
}

/// Parses `args` (after the binary name) and runs the command.
///
/// The `{file}` placeholder is replaced by `file`.
fn run(file: &Path, args: &[&str]) -> (Result<Outcome, RunError>, String) {
    let file = file.to_str().unwrap();
    let mut full_args = vec!["launcher-ini"];
    full_args.extend(args.iter().map(|&a| if a == "{file}" { file } else { a }));

    let cli = Cli::parse_from_iter(full_args);
    let config = ValidatedConfig::from_raw(&cli, None).unwrap();

    let mut out = Vec::new();
    let result = execute(&cli.command, &config, &mut out);
    (result, String::from_utf8(out).unwrap())
}

mod run_error {
    use super::*;

    #[test]
    fn store_error_is_transparent() {
        let error = RunError::from(StoreError::NotFound {
            path: PathBuf::from("missing.ini"),
        });
        assert_eq!(
            error.to_string(),
            StoreError::NotFound {
                path: PathBuf::from("missing.ini")
            }
            .to_string()
        );
    }

    #[test]
    fn launcher_error_displays_context() {
        let error = RunError::from(LauncherError::InvalidRace {
            value: "Elf".to_string(),
        });
        assert!(error.to_string().contains("Invalid launcher settings"));
        assert!(error.to_string().contains("Elf"));
    }
}

mod get_command {
    use super::*;

    #[test]
    fn prints_value() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, BWAPI_INI);

        let (result, out) = run(&file, &["get", "{file}", "ai", "ai"]);

        assert_eq!(result.unwrap(), Outcome::Done);
        assert_eq!(out, "bwapi-data/AI/ExampleAIModule.dll\n");
    }

    #[test]
    fn disabled_key_is_not_found() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, BWAPI_INI);

        let (result, out) = run(&file, &["get", "{file}", "auto_menu", "map"]);

        assert_eq!(result.unwrap(), Outcome::NotFound);
        assert!(out.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("missing.ini");

        let (result, _) = run(&file, &["get", "{file}", "ai", "ai"]);

        assert!(matches!(
            result,
            Err(RunError::Store(StoreError::NotFound { .. }))
        ));
    }
}

mod edit_commands {
    use super::*;

    #[test]
    fn set_writes_file() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, BWAPI_INI);

        let (result, out) = run(&file, &["set", "{file}", "auto_menu", "race", "Zerg"]);

        assert_eq!(result.unwrap(), Outcome::Done);
        assert!(out.is_empty());
        let written = fs::read_to_string(&file).unwrap();
        assert_eq!(written, BWAPI_INI.replace("race = Terran", "race = Zerg"));
    }

    #[test]
    fn enable_and_disable_toggle_comment() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, BWAPI_INI);

        run(&file, &["enable", "{file}", "auto_menu", "map"]).0.unwrap();
        let enabled = fs::read_to_string(&file).unwrap();
        assert!(enabled.contains("\nmap = maps/(2)Benzene.scx\n"));

        run(&file, &["disable", "{file}", "auto_menu", "map"]).0.unwrap();
        let disabled = fs::read_to_string(&file).unwrap();
        assert!(disabled.contains("\n;map = maps/(2)Benzene.scx\n"));
    }

    #[test]
    fn point_ai_rewrites_ai_key() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, BWAPI_INI);

        run(&file, &["point-ai", "{file}", "bwapi-data/AI/Bot.dll"])
            .0
            .unwrap();

        let written = fs::read_to_string(&file).unwrap();
        assert_eq!(
            written,
            BWAPI_INI.replace("ExampleAIModule.dll\n", "Bot.dll\n")
        );
    }

    #[test]
    fn dry_run_prints_without_writing() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, BWAPI_INI);

        let (result, out) = run(
            &file,
            &["set", "{file}", "auto_menu", "race", "Protoss", "--dry-run"],
        );

        result.unwrap();
        assert_eq!(out, BWAPI_INI.replace("race = Terran", "race = Protoss"));
        assert_eq!(fs::read_to_string(&file).unwrap(), BWAPI_INI);
    }

    #[test]
    fn line_ending_conversion_without_other_change() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, "[a]\nx = 1\n");

        run(&file, &["set", "{file}", "a", "x", "1", "--line-ending", "crlf"])
            .0
            .unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "[a]\r\nx = 1\r\n");
    }

    #[test]
    fn crlf_file_keeps_crlf() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, "[a]\r\nx = 1\r\n");

        run(&file, &["set", "{file}", "a", "y", "2", "--no-atomic"])
            .0
            .unwrap();

        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "[a]\r\nx = 1\r\ny = 2\r\n"
        );
    }

    #[test]
    fn invalid_value_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, BWAPI_INI);

        let (result, _) = run(&file, &["set", "{file}", "ai", "ai", "a;b"]);

        assert!(matches!(
            result,
            Err(RunError::Store(StoreError::InvalidArgument { .. }))
        ));
        assert_eq!(fs::read_to_string(&file).unwrap(), BWAPI_INI);
    }
}

mod dump_command {
    use super::*;

    #[test]
    fn prints_active_entries() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, BWAPI_INI);

        let (result, out) = run(&file, &["dump", "{file}"]);

        result.unwrap();
        assert_eq!(
            out,
            "[ai]\nai = bwapi-data/AI/ExampleAIModule.dll\n\
             [auto_menu]\nauto_menu = SINGLE_PLAYER\nrace = Terran\n"
        );
    }

    #[test]
    fn filter_drops_unmatched_keys_and_empty_sections() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, BWAPI_INI);

        let (result, out) = run(&file, &["dump", "{file}", "--filter", "^ra"]);

        result.unwrap();
        assert_eq!(out, "[auto_menu]\nrace = Terran\n");
    }

    #[test]
    fn empty_value_has_no_trailing_space() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, "[a]\nk =\nx = 1\n");

        let (result, out) = run(&file, &["dump", "{file}"]);

        result.unwrap();
        assert_eq!(out, "[a]\nk =\nx = 1\n");
    }

    #[test]
    fn json_output_is_a_snapshot() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, BWAPI_INI);

        let (result, out) = run(&file, &["dump", "{file}", "--json", "--filter", "^ai$"]);

        result.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["sections"][0]["name"], "ai");
        assert_eq!(value["sections"][0]["entries"][0]["key"], "ai");
        assert_eq!(
            value["sections"][0]["entries"][0]["value"],
            "bwapi-data/AI/ExampleAIModule.dll"
        );
        assert_eq!(value["sections"].as_array().unwrap().len(), 1);
    }
}

mod check_command {
    use super::*;

    const LAUNCHER_INI: &str = "\
[starcraft]
starcraft_exe = C:/StarCraft/StarCraft.exe
bwapi_dll = C:/StarCraft/bwapi-data/BWAPI.dll

[bwheadless]
bot_name = MyBot
bot_race = Zerg
";

    #[test]
    fn prints_settings_summary() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, LAUNCHER_INI);

        let (result, out) = run(&file, &["check", "{file}"]);

        result.unwrap();
        assert!(out.contains("bot: MyBot (Zerg)"), "{out}");
        assert!(out.contains("map: none"), "{out}");
    }

    #[test]
    fn missing_required_key_is_reported() {
        let dir = TempDir::new().unwrap();
        let file = ini_file(&dir, &LAUNCHER_INI.replace("bot_name = MyBot\n", ""));

        let (result, _) = run(&file, &["check", "{file}"]);

        assert!(matches!(
            result,
            Err(RunError::Launcher(LauncherError::MissingKey {
                key: "bot_name",
                ..
            }))
        ));
    }
}
