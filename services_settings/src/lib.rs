//! # Settings Service
//!
//! Typed configuration for the FastInput host.
//!
//! ## Philosophy
//!
//! - **Typed settings**: Every setting has an explicit type, not a string lookup
//! - **Defaults first**: An empty document is a complete, valid configuration
//! - **Versioned**: Documents carry a format version checked on load
//! - **Deterministic**: Settings are serializable and reproducible
//!
//! ## Example
//!
//! ```ignore
//! use services_settings::FastInputSettings;
//!
//! let settings = FastInputSettings::from_json_str(r#"{"notify":{"timeout_ms":500}}"#)?;
//! assert_eq!(settings.notify.endpoint, "http://127.0.0.1:7912/whatsinput");
//! ```

pub mod persistence;

use serde::{Deserialize, Serialize};
use services_focus_notifier::NotifyConfig;
use services_input_surface::SnapshotLimits;
use services_logger::LogConfig;

pub use persistence::{SettingsError, SettingsResult};

/// Complete host configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FastInputSettings {
    /// Format version of the document
    pub version: u32,
    /// Where focus notifications go
    pub notify: NotifyConfig,
    /// Bounds for the snapshot sent on focus acquisition
    pub snapshot: SnapshotLimits,
    /// Log subscriber settings
    pub log: LogConfig,
}

impl FastInputSettings {
    /// Current version of the settings format
    pub const CURRENT_VERSION: u32 = 1;
}

impl Default for FastInputSettings {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            notify: NotifyConfig::default(),
            snapshot: SnapshotLimits::default(),
            log: LogConfig::default(),
        }
    }
}
