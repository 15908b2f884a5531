#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::wildcard_enum_match_arm)]

use clap::CommandFactory;

use super::*;

/// The root help output must contain all top-level subcommand names.
#[test]
fn test_root_help_lists_all_subcommands() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());

    let expected_subcommands = [
        "validate",
        "format",
        "normalize",
        "split",
        "check-digit",
        "generate",
        "bmi",
    ];
    for name in &expected_subcommands {
        assert!(
            help.contains(name),
            "root help should mention subcommand '{name}'"
        );
    }
}

/// The root help output must describe every global flag.
#[test]
fn test_root_help_lists_global_flags() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());

    let expected_flags = [
        "--format",
        "--quiet",
        "--verbose",
        "--max-file-size",
        "--no-color",
        "--help",
        "--version",
    ];
    for flag in &expected_flags {
        assert!(
            help.contains(flag),
            "root help should mention flag '{flag}'"
        );
    }
}

/// `rutkit validate --help` must mention `FILE`.
#[test]
fn test_validate_help() {
    let mut cmd = Cli::command();
    let sub = cmd
        .find_subcommand_mut("validate")
        .expect("validate subcommand should exist");
    let help = format!("{}", sub.render_help());
    assert!(help.contains("FILE"), "validate help should mention FILE");
}

/// `rutkit bmi --help` must mention its three flags.
#[test]
fn test_bmi_help() {
    let mut cmd = Cli::command();
    let sub = cmd
        .find_subcommand_mut("bmi")
        .expect("bmi subcommand should exist");
    let help = format!("{}", sub.render_help());
    for flag in ["--weight", "--height", "--pregnant"] {
        assert!(help.contains(flag), "bmi help should mention {flag}");
    }
}

/// Parsing `validate -` should produce `PathOrStdin::Stdin`.
#[test]
fn test_path_or_stdin_parses_dash_as_stdin() {
    let cli = Cli::try_parse_from(["rutkit", "validate", "-"]).expect("should parse validate -");
    match cli.command {
        Command::Validate { file } => match file {
            PathOrStdin::Stdin => {}
            PathOrStdin::Path(p) => panic!("expected Stdin, got Path({p:?})"),
        },
        _ => panic!("expected Validate subcommand"),
    }
}

/// Parsing a real path should produce `PathOrStdin::Path`.
#[test]
fn test_path_or_stdin_parses_real_path() {
    let cli = Cli::try_parse_from(["rutkit", "validate", "ids.txt"])
        .expect("should parse validate <path>");
    match cli.command {
        Command::Validate { file } => match file {
            PathOrStdin::Path(p) => {
                assert_eq!(p.to_string_lossy(), "ids.txt");
            }
            PathOrStdin::Stdin => panic!("expected Path, got Stdin"),
        },
        _ => panic!("expected Validate subcommand"),
    }
}

/// `--quiet` and `--verbose` must conflict with each other.
#[test]
fn test_quiet_verbose_conflict() {
    let result = Cli::try_parse_from(["rutkit", "--quiet", "--verbose", "validate", "-"]);
    assert!(
        result.is_err(),
        "--quiet and --verbose should conflict; parse should fail"
    );
}

/// `--max-file-size` should default to 16 MB.
#[test]
fn test_max_file_size_default() {
    let cli = Cli::try_parse_from(["rutkit", "validate", "-"])
        .expect("should parse without --max-file-size");
    assert_eq!(
        cli.max_file_size, 16_777_216,
        "default max_file_size should be 16 MB"
    );
}

/// `--max-file-size` CLI flag overrides the default.
#[test]
fn test_max_file_size_cli_override() {
    let cli = Cli::try_parse_from(["rutkit", "--max-file-size", "1024", "validate", "-"])
        .expect("should parse with --max-file-size");
    assert_eq!(cli.max_file_size, 1024);
}

/// `--format json` should parse to `OutputFormat::Json`, also after the
/// subcommand since the flag is global.
#[test]
fn test_format_flag_json() {
    let cli = Cli::try_parse_from(["rutkit", "--format", "json", "validate", "-"])
        .expect("should parse --format json");
    assert!(matches!(cli.format, OutputFormat::Json));

    let cli = Cli::try_parse_from(["rutkit", "format", "123456785", "-f", "json"])
        .expect("should parse trailing -f json");
    assert!(matches!(cli.format, OutputFormat::Json));
}

/// The default `--format` is `human`.
#[test]
fn test_format_flag_default_is_human() {
    let cli =
        Cli::try_parse_from(["rutkit", "validate", "-"]).expect("should parse without --format");
    assert!(
        matches!(cli.format, OutputFormat::Human),
        "default format should be Human"
    );
}

/// `format` and `normalize` need at least one identifier.
#[test]
fn test_format_requires_a_value() {
    assert!(Cli::try_parse_from(["rutkit", "format"]).is_err());
    assert!(Cli::try_parse_from(["rutkit", "normalize"]).is_err());
}

/// Several identifiers may be given at once.
#[test]
fn test_format_accepts_many_values() {
    let cli = Cli::try_parse_from(["rutkit", "format", "123456785", "1234567-4"])
        .expect("should parse two values");
    match cli.command {
        Command::Format { values } => assert_eq!(values.len(), 2),
        _ => panic!("expected Format subcommand"),
    }
}

/// `check-digit` is spelled with a hyphen.
#[test]
fn test_check_digit_subcommand_name() {
    let cli = Cli::try_parse_from(["rutkit", "check-digit", "12345678"])
        .expect("should parse check-digit");
    match cli.command {
        Command::CheckDigit { bodies } => assert_eq!(bodies, vec!["12345678".to_owned()]),
        _ => panic!("expected CheckDigit subcommand"),
    }
}

/// `generate` defaults to one identifier and no seed.
#[test]
fn test_generate_defaults() {
    let cli = Cli::try_parse_from(["rutkit", "generate"]).expect("should parse generate");
    match cli.command {
        Command::Generate { count, seed } => {
            assert_eq!(count, 1);
            assert_eq!(seed, None);
        }
        _ => panic!("expected Generate subcommand"),
    }
}

#[test]
fn test_generate_count_and_seed() {
    let cli = Cli::try_parse_from(["rutkit", "generate", "-n", "5", "--seed", "42"])
        .expect("should parse generate flags");
    match cli.command {
        Command::Generate { count, seed } => {
            assert_eq!(count, 5);
            assert_eq!(seed, Some(42));
        }
        _ => panic!("expected Generate subcommand"),
    }
}

/// `bmi` requires both measurements.
#[test]
fn test_bmi_requires_weight_and_height() {
    assert!(Cli::try_parse_from(["rutkit", "bmi", "--weight", "70"]).is_err());
    assert!(Cli::try_parse_from(["rutkit", "bmi", "--height", "175"]).is_err());
    let cli = Cli::try_parse_from(["rutkit", "bmi", "--weight", "70", "--height", "175.5"])
        .expect("should parse bmi");
    match cli.command {
        Command::Bmi {
            weight,
            height,
            pregnant,
        } => {
            assert_eq!(weight, 70.0);
            assert_eq!(height, 175.5);
            assert!(!pregnant);
        }
        _ => panic!("expected Bmi subcommand"),
    }
}

/// clap's internal consistency check must pass for the full command tree.
#[test]
fn test_cli_debug_assert() {
    Cli::command().debug_assert();
}
