//! Log subscriber setup for the binaries.
//!
//! Events go to stderr so stdout stays reserved for the saved-file lines. Filtering follows
//! `RUST_LOG`; when it is unset or empty, `info` and above are shown.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Build a filter from `RUST_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

/// Build a filter from an explicit directive string, falling back to `info` when it is empty.
pub fn parse_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

/// Install the global `fmt` subscriber writing to stderr.
pub fn init() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_directives_default_to_info() {
        assert_eq!(parse_filter("").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_debug_directive_is_not_overridden() {
        assert_eq!(parse_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            parse_filter("survey_statistics=debug").max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_quieter_directive_is_respected() {
        assert_eq!(parse_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
    }
}
