use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "replframe",
    version,
    about = "Line-framing console for an interpreter worker"
)]
pub struct Cli {
    /// Config file (default: <config dir>/replframe/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. "debug").
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Worker command and its arguments, after `--`.
    #[arg(last = true, value_name = "WORKER")]
    pub worker: Vec<String>,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_path)
    }

    /// Overrides config values with the ones given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some((command, args)) = self.worker.split_first() {
            config.worker.command = command.clone();
            config.worker.args = args.to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_keeps_config() {
        let cli = Cli::try_parse_from(["replframe"]).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn worker_after_double_dash() {
        let cli = Cli::try_parse_from(["replframe", "--", "python3", "-u", "worker.py"]).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.worker.command, "python3");
        assert_eq!(config.worker.args, vec!["-u", "worker.py"]);
    }

    #[test]
    fn log_level_override() {
        let cli = Cli::try_parse_from(["replframe", "--log-level", "debug"]).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn explicit_config_path() {
        let cli = Cli::try_parse_from(["replframe", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/c.toml"));
    }
}
