use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use spanwire_config::MirrorConfig;
use spanwire_engine::{run_live, PipelineError};
use spanwire_telemetry::{EventLogger, MetricsRecorder};

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Interface the ERSPAN frames are sent out of
    pub egress: String,

    /// Interface whose traffic is mirrored
    pub capture: String,

    /// Optional YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stop after this many frames (runs until interrupted otherwise)
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Log a hex dump of every outbound frame at debug level
    #[arg(long)]
    pub hexdump: bool,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = MirrorConfig::load(cli.config.as_deref())
        .map_err(|e| classified(PipelineError::from(e)))?;
    if cli.hexdump {
        config.telemetry.hexdump = true;
    }

    EventLogger::init(&config.telemetry.log_level);
    debug!(?config, "Configuration loaded");

    let metrics = MetricsRecorder::new().context("registering metrics")?;

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst))
        .context("installing signal handler")?;

    let result = run_live(
        &cli.egress,
        &cli.capture,
        &config,
        metrics.clone(),
        &stop,
        cli.max_frames,
    );

    if let Ok(text) = metrics.gather_metrics() {
        debug!("Final metrics:\n{}", text);
    }

    let stats = result.map_err(classified)?;
    info!(frames = stats.frames, bytes = stats.bytes, "Done");
    Ok(())
}

/// Prefixes the diagnostic with the failure category.
fn classified(err: PipelineError) -> anyhow::Error {
    let kind = err.kind();
    anyhow::Error::new(err).context(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_interfaces() {
        let cli = Cli::try_parse_from(["spanwire", "eth1", "eth0"]).unwrap();
        assert_eq!(cli.egress, "eth1");
        assert_eq!(cli.capture, "eth0");
        assert!(cli.config.is_none());
        assert!(cli.max_frames.is_none());
        assert!(!cli.hexdump);
    }

    #[test]
    fn parses_options() {
        let cli = Cli::try_parse_from([
            "spanwire",
            "eth1",
            "eth0",
            "--config",
            "mirror.yaml",
            "--max-frames",
            "10",
            "--hexdump",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("mirror.yaml")));
        assert_eq!(cli.max_frames, Some(10));
        assert!(cli.hexdump);
    }

    #[test]
    fn both_interfaces_required() {
        assert!(Cli::try_parse_from(["spanwire", "eth1"]).is_err());
    }

    #[test]
    fn missing_config_file_fails() {
        let cli = Cli::try_parse_from(["spanwire", "eth1", "eth0", "-c", "no/such/file.yaml"])
            .unwrap();
        let err = run_command(cli).unwrap_err();
        assert!(format!("{:#}", err).starts_with("ConfigError: "));
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Config(_))
        ));
    }

    #[test]
    fn invalid_config_is_classified() {
        let path = std::env::temp_dir().join(format!("spanwire-{}.yaml", std::process::id()));
        std::fs::write(&path, "capture:\n  snaplen: 1\n").unwrap();
        let cli = Cli::try_parse_from(["spanwire", "eth1", "eth0"]).unwrap();
        let cli = Cli {
            config: Some(path.clone()),
            ..cli
        };
        let err = run_command(cli).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            err.downcast_ref::<PipelineError>().map(PipelineError::kind),
            Some("ConfigError")
        );
    }
}
