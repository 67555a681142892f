//! Logging setup for binaries built on this crate
//!
//! The library itself only emits through the `log` facade.

/// Initialize logging with a level derived from a `-v` count
///
/// `RUST_LOG`, when set, still takes precedence.
pub fn init_with_verbosity(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(level_for_verbosity(verbosity))
        .parse_default_env()
        .init();
}

fn level_for_verbosity(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), log::LevelFilter::Warn);
        assert_eq!(level_for_verbosity(1), log::LevelFilter::Info);
        assert_eq!(level_for_verbosity(2), log::LevelFilter::Debug);
        assert_eq!(level_for_verbosity(9), log::LevelFilter::Trace);
    }
}
