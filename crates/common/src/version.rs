use std::fmt;

use serde::Serialize;

/// Build metadata baked in by `build.rs`
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub build_profile: &'static str,
    pub build_features: &'static str,
    pub version: &'static str,
    pub build_timestamp: &'static str,
    pub rust_version: &'static str,
}

impl BuildInfo {
    pub const fn new() -> Self {
        Self {
            build_profile: env!("BUILD_PROFILE"),
            build_features: env!("BUILD_FEATURES"),
            version: env!("REPO_VERSION"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "drivefs {} ({} build, features: {}, built {} with {})",
            self.version,
            self.build_profile,
            self.build_features,
            self.build_timestamp,
            self.rust_version
        )
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::new()
}

#[macro_export]
macro_rules! build_info {
    () => {
        $crate::version::build_info()
    };
}
