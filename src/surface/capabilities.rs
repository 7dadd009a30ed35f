use crate::domain::HostPlatform;

use super::engine::EngineSetting;

const DESKTOP_SETUP: &[EngineSetting] = &[
    EngineSetting::HugContentVertically,
    EngineSetting::TransparentBackground,
    EngineSetting::ForwardVerticalScrollToParent,
    EngineSetting::HideReloadMenuItem,
];

const MOBILE_SETUP: &[EngineSetting] = &[
    EngineSetting::HugContentVertically,
    EngineSetting::DisableScrolling,
    EngineSetting::TransparentBackground,
];

/// Platform-specific static setup applied once per surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCapabilities {
    platform: HostPlatform,
    settings: Vec<EngineSetting>,
}

impl PlatformCapabilities {
    pub fn for_platform(platform: HostPlatform) -> Self {
        let base = match platform {
            HostPlatform::Desktop => DESKTOP_SETUP,
            HostPlatform::Mobile => MOBILE_SETUP,
        };
        let mut settings = base.to_vec();
        if cfg!(debug_assertions) && platform == HostPlatform::Mobile {
            settings.push(EngineSetting::Inspectable);
        }
        Self { platform, settings }
    }

    /// Explicit table, for hosts whose engine needs a different setup.
    pub fn custom(platform: HostPlatform, settings: impl IntoIterator<Item = EngineSetting>) -> Self {
        let mut unique = Vec::new();
        for setting in settings {
            if !unique.contains(&setting) {
                unique.push(setting);
            }
        }
        Self {
            platform,
            settings: unique,
        }
    }

    pub fn platform(&self) -> HostPlatform {
        self.platform
    }

    pub fn settings(&self) -> &[EngineSetting] {
        &self.settings
    }
}
