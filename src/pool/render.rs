//! Pool and global configuration rendering.

use std::fmt::Write;

use crate::config::schema::FpmConfig;
use crate::config::sites::BackendDescriptor;
use crate::pool::directives::{parse_admin_values, parse_flags};
use crate::pool::params::PoolSettings;

/// Render the pool section for `backend`, named `name`.
///
/// Output layout:
/// ```text
/// [name]
/// user/group
/// listen, listen.owner, listen.group, listen.mode
/// pm and its bounds
/// php_admin_value[...] lines, then php_flag[...] lines
/// ```
pub fn render_pool(backend: &BackendDescriptor, name: &str, fpm: &FpmConfig) -> String {
    let settings = PoolSettings::from_params(&backend.params, &fpm.worker_user);
    if settings.pm_max < settings.pm_min {
        tracing::warn!(
            pool = %name,
            pm_min = settings.pm_min,
            pm_max = settings.pm_max,
            "pm_max is below pm_min, rendering as configured"
        );
    }

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "\n[{name}]\n\
         user = {user}\n\
         group = {group}\n\
         \n\
         listen = {listen}\n\
         listen.owner = {owner}\n\
         listen.group = {owner}\n\
         listen.mode = 0660\n\
         \n\
         pm = {pm}\n\
         pm.max_children = {max}\n\
         pm.start_servers = {min}\n\
         pm.min_spare_servers = {sp_min}\n\
         pm.max_spare_servers = {sp_max}\n\
         \n",
        name = name,
        user = settings.user,
        group = settings.group,
        listen = fpm.socket_path(name),
        owner = fpm.worker_user,
        pm = settings.pm,
        max = settings.pm_max,
        min = settings.pm_min,
        sp_min = settings.spare_min(),
        sp_max = settings.spare_max(),
    );

    for d in parse_admin_values(&settings.php_admin_values) {
        let _ = writeln!(out, "php_admin_value[{}] = {}", d.key, d.value);
    }
    for d in parse_flags(&settings.php_flags) {
        let _ = writeln!(out, "php_flag[{}] = {}", d.key, d.value);
    }
    out.push('\n');

    out
}

/// Render the static global config file.
///
/// `pools` is appended verbatim after the default pool, typically an
/// `include=` line pointing at the pool directory.
pub fn render_global(fpm: &FpmConfig, pools: &str) -> String {
    let user = &fpm.worker_user;
    format!(
        "\n[global]\n\
         pid = {pid}\n\
         error_log = {error_log}\n\
         \n\
         [global-pool]\n\
         user = {user}\n\
         group = {user}\n\
         \n\
         listen = {listen}\n\
         listen.owner = {user}\n\
         listen.group = {user}\n\
         listen.mode = 0660\n\
         \n\
         pm = dynamic\n\
         pm.start_servers = 1\n\
         pm.max_children = 5\n\
         pm.min_spare_servers = 1\n\
         pm.max_spare_servers = 5\n\
         \n\
         {pools}\n",
        pid = fpm.pidfile,
        error_log = fpm.error_log,
        listen = fpm.global_listen,
    )
}
