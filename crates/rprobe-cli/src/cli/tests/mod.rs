//! CLI parse tests.

use super::{exit_code, Cli, CliCommand};
use clap::Parser;
use rprobe_core::{ProbeError, RangeSpec, TransportError};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_capability() {
    let cli = parse(&["rprobe", "capability", "https://example.com/a.iso"]);
    assert!(!cli.json);
    match cli.command {
        CliCommand::Capability { url } => assert_eq!(url, "https://example.com/a.iso"),
        _ => panic!("expected Capability"),
    }
}

#[test]
fn cli_parse_range_forms() {
    match parse(&["rprobe", "range", "http://h/f", "0-99999999"]).command {
        CliCommand::Range { range, .. } => assert_eq!(range, RangeSpec::closed(0, 99_999_999)),
        _ => panic!("expected Range"),
    }
    match parse(&["rprobe", "range", "http://h/f", "100000000-"]).command {
        CliCommand::Range { range, .. } => assert_eq!(range, RangeSpec::starting_at(100_000_000)),
        _ => panic!("expected open Range"),
    }
}

#[test]
fn cli_parse_range_rejects_garbage() {
    assert!(Cli::try_parse_from(["rprobe", "range", "http://h/f", "x-y"]).is_err());
}

#[test]
fn cli_parse_probe_defaults_and_global_json() {
    let cli = parse(&["rprobe", "probe", "http://h/f", "--json"]);
    assert!(cli.json);
    match cli.command {
        CliCommand::Probe { method, range, .. } => {
            assert_eq!(method, "HEAD");
            assert!(range.is_none());
        }
        _ => panic!("expected Probe"),
    }
}

#[test]
fn cli_parse_probe_with_method_and_range() {
    match parse(&["rprobe", "probe", "http://h/f", "--method", "GET", "--range", "5-"]).command {
        CliCommand::Probe { method, range, .. } => {
            assert_eq!(method, "GET");
            assert_eq!(range, Some(RangeSpec::starting_at(5)));
        }
        _ => panic!("expected Probe"),
    }
}

#[test]
fn cli_parse_negotiate_with_config() {
    let cli = parse(&["rprobe", "--config", "/tmp/c.toml", "negotiate", "http://h/f"]);
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/c.toml")));
    assert!(matches!(cli.command, CliCommand::Negotiate { .. }));
}

#[test]
fn exit_codes_by_error_kind() {
    assert_eq!(exit_code(&ProbeError::RangeNotSupported.into()), 3);
    assert_eq!(exit_code(&ProbeError::InvalidRange.into()), 4);
    assert_eq!(
        exit_code(&ProbeError::Transport(TransportError::Disconnected).into()),
        5
    );
    assert_eq!(exit_code(&ProbeError::NotRetrievable { status: 404 }.into()), 1);
    assert_eq!(exit_code(&anyhow::anyhow!("config broken")), 1);
}
