//! Normalization of free-form backend params into typed pool settings.
//!
//! This is the only place where "absent or falsy means default" applies.
//! Falsy values are: missing key, null, empty or blank text, numeric zero
//! and `false`.

use crate::config::sites::{ParamValue, Params};

/// Default lower bound of pool workers.
pub const DEFAULT_PM_MIN: u32 = 1;
/// Default upper bound of pool workers.
pub const DEFAULT_PM_MAX: u32 = 5;
/// Default process manager mode.
pub const DEFAULT_PM: &str = "dynamic";

/// Strongly typed pool parameters with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub pm_min: u32,
    pub pm_max: u32,
    pub user: String,
    pub group: String,
    pub pm: String,
    pub php_admin_values: String,
    pub php_flags: String,
}

impl PoolSettings {
    /// Build settings from raw params; `worker_user` fills absent user/group.
    pub fn from_params(params: &Params, worker_user: &str) -> Self {
        Self {
            pm_min: count_param(params, "pm_min", DEFAULT_PM_MIN),
            pm_max: count_param(params, "pm_max", DEFAULT_PM_MAX),
            user: text_param(params, "user").unwrap_or_else(|| worker_user.to_string()),
            group: text_param(params, "group").unwrap_or_else(|| worker_user.to_string()),
            pm: text_param(params, "pm").unwrap_or_else(|| DEFAULT_PM.to_string()),
            php_admin_values: text_param(params, "php_admin_values").unwrap_or_default(),
            php_flags: text_param(params, "php_flags").unwrap_or_default(),
        }
    }

    /// Minimum idle workers: never above the floor of 2.
    pub fn spare_min(&self) -> u32 {
        self.pm_min.min(2)
    }

    /// Maximum idle workers: at least 6 (or `pm_min`), capped by `pm_max`.
    pub fn spare_max(&self) -> u32 {
        self.pm_min.max(6).min(self.pm_max)
    }
}

fn present<'a>(params: &'a Params, key: &str) -> Option<&'a ParamValue> {
    params.get(key).and_then(Option::as_ref)
}

fn text_param(params: &Params, key: &str) -> Option<String> {
    match present(params, key)? {
        ParamValue::Bool(false) | ParamValue::Integer(0) => None,
        ParamValue::Float(x) if *x == 0.0 => None,
        ParamValue::Text(s) if s.trim().is_empty() => None,
        value => Some(value.to_string()),
    }
}

fn count_param(params: &Params, key: &str, default: u32) -> u32 {
    let parsed = match present(params, key) {
        None => return default,
        Some(ParamValue::Integer(i)) => u32::try_from(*i).ok(),
        Some(ParamValue::Float(x)) if x.fract() == 0.0 && *x >= 0.0 && *x <= u32::MAX as f64 => {
            Some(*x as u32)
        }
        Some(ParamValue::Text(s)) if s.trim().is_empty() => Some(0),
        Some(ParamValue::Text(s)) => s.trim().parse::<u32>().ok(),
        Some(ParamValue::Bool(false)) => Some(0),
        Some(_) => None,
    };

    match parsed {
        Some(0) => default,
        Some(n) => n,
        None => {
            tracing::warn!(
                key,
                value = ?params.get(key),
                default,
                "Pool size parameter is not a worker count, using default"
            );
            default
        }
    }
}
