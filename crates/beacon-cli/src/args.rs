//! Command line arguments.

use beacon_config::Settings;
use clap::Parser;
use std::path::PathBuf;

/// Keep a file's contents fresh and serve them to simulated requests.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file (toml, yaml or json)
    #[arg(short, long, env = "BEACON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Key the value is exposed under
    #[arg(short, long)]
    pub name: Option<String>,

    /// File whose contents are refreshed
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Milliseconds between refreshes
    #[arg(short, long)]
    pub interval_ms: Option<u64>,

    /// Value served before the first refresh completes
    #[arg(short, long)]
    pub default_value: Option<String>,

    /// Milliseconds between simulated requests
    #[arg(long)]
    pub every_ms: Option<u64>,

    /// Stop after serving this many requests
    #[arg(long)]
    pub requests: Option<u64>,

    /// Serve requests before the first refresh completes
    #[arg(long)]
    pub immediate: bool,

    /// Log filter directive
    #[arg(short, long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Layers the flags that were given over `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(name) = &self.name {
            settings.beacon.name.clone_from(name);
        }
        if let Some(source) = &self.source {
            settings.beacon.source_path.clone_from(source);
        }
        if let Some(interval_ms) = self.interval_ms {
            settings.beacon.interval_ms = interval_ms;
        }
        if let Some(default_value) = &self.default_value {
            settings.beacon.default_value = Some(default_value.clone());
        }
        if let Some(every_ms) = self.every_ms {
            settings.requests.every_ms = every_ms;
        }
        if let Some(level) = &self.log_level {
            settings.logging.level.clone_from(level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_and_apply() {
        let args = Args::try_parse_from([
            "beacon",
            "--name",
            "motd",
            "--source",
            "/etc/motd",
            "-i",
            "500",
            "--requests",
            "3",
            "--immediate",
        ])
        .unwrap();

        let mut settings = Settings::default();
        args.apply(&mut settings);

        assert_eq!(settings.beacon.name, "motd");
        assert_eq!(settings.beacon.source_path, PathBuf::from("/etc/motd"));
        assert_eq!(settings.beacon.interval_ms, 500);
        assert_eq!(settings.requests.every_ms, 1_000);
        assert_eq!(args.requests, Some(3));
        assert!(args.immediate);
    }

    #[test]
    fn test_absent_flags_keep_settings() {
        let mut settings = Settings::default();
        settings.beacon.name = "from-file".to_string();

        Args::default().apply(&mut settings);

        assert_eq!(settings.beacon.name, "from-file");
        assert_eq!(settings, {
            let mut expected = Settings::default();
            expected.beacon.name = "from-file".to_string();
            expected
        });
    }
}
