//! Shared domain enumerations describing the host environment.

use serde::{Deserialize, Serialize};

/// Host platform family. Drives stylesheet variant selection, the static
/// surface setup table, and the default pool size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostPlatform {
    Desktop,
    Mobile,
}

impl HostPlatform {
    /// Platform family of the compilation target.
    pub const fn current() -> Self {
        if cfg!(any(target_os = "ios", target_os = "android")) {
            HostPlatform::Mobile
        } else {
            HostPlatform::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HostPlatform::Desktop => "desktop",
            HostPlatform::Mobile => "mobile",
        }
    }
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_names_are_stable() {
        assert_eq!(HostPlatform::Desktop.as_str(), "desktop");
        assert_eq!(HostPlatform::Mobile.as_str(), "mobile");
    }

    #[test]
    fn platform_deserializes_from_snake_case() {
        let parsed: HostPlatform = serde_json::from_str("\"mobile\"").expect("valid platform");
        assert_eq!(parsed, HostPlatform::Mobile);
    }
}
