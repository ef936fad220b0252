/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
}

/// Version string shown by `--version`.
pub const CLI_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FUNDING_REPORT_BUILD_HASH"),
    ", ",
    env!("FUNDING_REPORT_BUILD_PROFILE"),
    ")"
);

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("FUNDING_REPORT_BUILD_HASH").unwrap_or("unknown"),
        timestamp: option_env!("FUNDING_REPORT_BUILD_TIMESTAMP").unwrap_or("unknown"),
        profile: option_env!("FUNDING_REPORT_BUILD_PROFILE").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_version_starts_with_package_version() {
        assert!(CLI_VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert_eq!(current().version, env!("CARGO_PKG_VERSION"));
    }
}
