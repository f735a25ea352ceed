use std::sync::Once;

/// Settings for the `env_logger` backend installed by [`init_logging`].
///
/// Handle lifecycle events live under the `vista_graphics::handle` target and
/// transform recomputation under `vista_graphics::view`, so a filter such as
/// `"vista_graphics::handle=debug"` follows native create/destroy traffic alone.
/// Leaving `env_filter` unset defers to `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Coloring of the stderr output.
    pub write_style: env_logger::WriteStyle,
    /// Route output through the test harness capture instead of stderr.
    pub is_test: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            is_test: false,
        }
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the `log` backend for native wrapper diagnostics.
///
/// The filter comes from `config.env_filter`, else `RUST_LOG`, else `info`.
/// Only the first call in a process has any effect. When a host application
/// already installed its own logger, that logger is kept.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok()) {
            Some(filter) => builder.parse_filters(&filter),
            None => builder.filter_level(log::LevelFilter::Info),
        };
        builder.write_style(config.write_style).is_test(config.is_test);

        if builder.try_init().is_ok() {
            log::debug!("vista-graphics logging installed");
        }
    });
}

fn resolve_filter(explicit: Option<String>, from_env: Option<String>) -> Option<String> {
    explicit.or(from_env).filter(|f| !f.trim().is_empty())
}
