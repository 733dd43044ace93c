//! Configuration schema definitions.
//!
//! This module defines the configuration of the pool manager itself.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the pool manager.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ManagerConfig {
    /// Where and how pool files are rendered.
    pub fpm: FpmConfig,

    /// The managed FastCGI service.
    pub service: ServiceConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Process manager rendering settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct FpmConfig {
    /// Backend type tag owned by this component (e.g., "php7.1-fcgi").
    pub backend_kind: String,

    /// Directory receiving one `<backend id>.conf` file per pool.
    pub config_path: String,

    /// Global process manager config file.
    pub config_file: String,

    /// Pid file declared in the `[global]` section.
    pub pidfile: String,

    /// Error log declared in the `[global]` section.
    pub error_log: String,

    /// Socket of the fallback `[global-pool]`.
    pub global_listen: String,

    /// Namespace used to derive per-pool socket paths.
    pub socket_namespace: String,

    /// Worker identity used for pool defaults and socket ownership.
    pub worker_user: String,
}

impl Default for FpmConfig {
    fn default() -> Self {
        Self {
            backend_kind: "php7.1-fcgi".to_string(),
            config_path: "/etc/php/7.1/fpm/pool.d".to_string(),
            config_file: "/etc/php/7.1/fpm/php-fpm.conf".to_string(),
            pidfile: "/run/php/php7.1-fpm.pid".to_string(),
            error_log: "/var/log/php7.1-fpm.log".to_string(),
            global_listen: "/var/run/php/php7.1-fpm.sock".to_string(),
            socket_namespace: "fpm-pools-php7.1".to_string(),
            worker_user: "www-data".to_string(),
        }
    }
}

impl FpmConfig {
    /// Unix socket a pool named `name` listens on.
    pub fn socket_path(&self, name: &str) -> String {
        format!("/var/run/{}-fcgi-{}.sock", self.socket_namespace, name)
    }
}

/// Managed service settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service unit name.
    pub name: String,

    /// Path to the `systemctl` binary.
    pub systemctl: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "php7.1-fpm".to_string(),
            systemctl: "systemctl".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
