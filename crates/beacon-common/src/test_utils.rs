//! Helpers shared by the workspace's unit and integration tests.

use std::sync::Once;
use tokio::runtime::Runtime;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: Once = Once::new();

/// Routes `tracing` output through the test harness, at `debug` unless
/// `RUST_LOG` says otherwise. Repeated calls are no-ops.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Current-thread runtime for tests that start a beacon from blocking code.
pub fn create_test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime")
}

/// Settings files in each supported format.
pub mod config_fixtures {
    /// A minimal valid settings file in TOML.
    pub fn minimal_settings_toml() -> &'static str {
        r#"
[beacon]
name = "motd"
"#
    }

    /// A full settings file in YAML.
    pub fn full_settings_yaml() -> &'static str {
        concat!(
            "beacon:\n",
            "  name: \"motd\"\n",
            "  interval_ms: 5000\n",
            "  default_value: \"warming up\"\n",
            "  source_path: \"/tmp/motd.txt\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: \"compact\"\n",
            "\n",
            "requests:\n",
            "  every_ms: 250\n"
        )
    }

    /// A full settings file in JSON.
    pub fn full_settings_json() -> &'static str {
        r#"{
  "beacon": {
    "name": "motd",
    "interval_ms": 1500,
    "source_path": "/tmp/motd.txt"
  },
  "logging": { "level": "warn", "format": "pretty" },
  "requests": { "every_ms": 100 }
}"#
    }
}

/// proptest strategies for settings values.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for generating valid beacon names.
    pub fn beacon_name_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z_][a-zA-Z0-9_]{0,31}".prop_map(|s| s.to_string())
    }

    /// Strategy for generating reasonable refresh intervals in milliseconds.
    pub fn interval_ms_strategy() -> impl Strategy<Value = u64> {
        1u64..=3_600_000u64
    }
}
