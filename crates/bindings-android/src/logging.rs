// Logging bootstrap for the host platform

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Install the platform logger once; later calls are no-ops.
pub fn init_logging(level: log::LevelFilter) {
    INIT_LOGGER.call_once(|| {
        #[cfg(target_os = "android")]
        {
            android_logger::init_once(
                android_logger::Config::default()
                    .with_max_level(level)
                    .with_tag("VideoPlayer"),
            );
        }

        #[cfg(not(target_os = "android"))]
        {
            let _ = env_logger::builder()
                .is_test(false)
                .filter_level(level)
                .try_init();
        }
    });
}
