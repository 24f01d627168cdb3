use std::path::PathBuf;

use agent_trace::cli::{Cli, Commands};
use agent_trace::TraceLevel;
use clap::Parser;

#[test]
fn test_parse_trace_defaults() {
    let cli = Cli::try_parse_from(["agent-trace", "trace"]).unwrap();

    match cli.command {
        Commands::Trace(args) => {
            assert_eq!(args.channel, "Build");
            assert_eq!(args.level, TraceLevel::Info);
            assert!(args.threshold.is_none());
            assert!(args.overrides.is_empty());
            assert!(!args.sanitize);
        }
        Commands::Sanitize(_) => panic!("Wrong top-level command"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_trace_with_overrides_and_secrets() {
    let cli = Cli::try_parse_from([
        "agent-trace",
        "trace",
        "--channel",
        "JobRunner",
        "--level",
        "verbose",
        "--threshold",
        "warning",
        "--override",
        "Worker=verbose",
        "--override",
        "Listener=off",
        "--secret",
        "hunter2",
        "--trace-file",
        "diag/trace.log",
        "--sanitize",
        "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Trace(args) => {
            assert_eq!(args.channel, "JobRunner");
            assert_eq!(args.level, TraceLevel::Verbose);
            assert_eq!(args.threshold, Some(TraceLevel::Warning));
            assert_eq!(
                args.overrides,
                vec![
                    ("Worker".to_string(), TraceLevel::Verbose),
                    ("Listener".to_string(), TraceLevel::Off),
                ]
            );
            assert_eq!(args.secrets, vec!["hunter2"]);
            assert_eq!(args.trace_file, Some(PathBuf::from("diag/trace.log")));
            assert!(args.sanitize);
        }
        Commands::Sanitize(_) => panic!("Wrong top-level command"),
    }
    assert!(cli.json);
}

#[test]
fn test_parse_rejects_bad_override() {
    assert!(Cli::try_parse_from(["agent-trace", "trace", "--override", "Worker"]).is_err());
    assert!(Cli::try_parse_from(["agent-trace", "trace", "--level", "loud"]).is_err());
}

#[test]
fn test_parse_sanitize() {
    let cli = Cli::try_parse_from(["agent-trace", "sanitize", "##vso[task.complete]", "--base64-only"])
        .unwrap();

    match cli.command {
        Commands::Sanitize(args) => {
            assert_eq!(args.text.as_deref(), Some("##vso[task.complete]"));
            assert!(args.base64_only);
        }
        Commands::Trace(_) => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_global_config_flag() {
    let cli = Cli::try_parse_from([
        "agent-trace",
        "--config",
        "ci/trace.yaml",
        "--log-level",
        "debug",
        "sanitize",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("ci/trace.yaml")));
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
}
