use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the global logger, later calls are ignored.
///
/// `filter` uses the `env_logger` syntax ("info",
/// "gl_sandbox=debug,warn", ...). Without it `RUST_LOG` is used and
/// then `info`.
pub fn init(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
