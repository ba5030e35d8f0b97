//! Update configuration driving version bumps

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VersionError;

/// Which kind of change a version bump represents.
///
/// Exactly one of the breaking, minor, and micro flags is set. The
/// pre-release flag is independent of the change category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawUpdateConfig")]
pub struct UpdateConfig {
    is_breaking_change: bool,
    is_minor_change: bool,
    is_micro_change: bool,
    is_pre_release: bool,
}

/// Unchecked field set, validated through [`UpdateConfig::new`]
#[derive(Deserialize)]
struct RawUpdateConfig {
    #[serde(default)]
    is_breaking_change: bool,
    #[serde(default)]
    is_minor_change: bool,
    #[serde(default)]
    is_micro_change: bool,
    #[serde(default)]
    is_pre_release: bool,
}

impl TryFrom<RawUpdateConfig> for UpdateConfig {
    type Error = VersionError;

    fn try_from(raw: RawUpdateConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.is_breaking_change,
            raw.is_minor_change,
            raw.is_micro_change,
            raw.is_pre_release,
        )
    }
}

impl UpdateConfig {
    /// Build an update config, rejecting zero or several change categories
    pub fn new(
        is_breaking_change: bool,
        is_minor_change: bool,
        is_micro_change: bool,
        is_pre_release: bool,
    ) -> Result<Self, VersionError> {
        let set = [is_breaking_change, is_minor_change, is_micro_change]
            .iter()
            .filter(|flag| **flag)
            .count();
        if set != 1 {
            return Err(VersionError::InvalidUpdateConfig);
        }

        Ok(Self {
            is_breaking_change,
            is_minor_change,
            is_micro_change,
            is_pre_release,
        })
    }

    /// Breaking change
    pub fn breaking() -> Self {
        Self {
            is_breaking_change: true,
            is_minor_change: false,
            is_micro_change: false,
            is_pre_release: false,
        }
    }

    /// Minor change (new features)
    pub fn minor() -> Self {
        Self {
            is_breaking_change: false,
            is_minor_change: true,
            is_micro_change: false,
            is_pre_release: false,
        }
    }

    /// Micro change (fixes and everything else)
    pub fn micro() -> Self {
        Self {
            is_breaking_change: false,
            is_minor_change: false,
            is_micro_change: true,
            is_pre_release: false,
        }
    }

    /// Derive the highest-priority category from changelog flags.
    ///
    /// Falls back to a micro change when no flag is set.
    pub fn from_flags(
        has_breaking_change: bool,
        has_minor_change: bool,
        has_micro_change: bool,
        is_pre_release: bool,
    ) -> Self {
        let config = if has_breaking_change {
            Self::breaking()
        } else if has_minor_change {
            Self::minor()
        } else {
            if !has_micro_change {
                debug!("no change flags set, defaulting to micro change");
            }
            Self::micro()
        };
        config.with_pre_release(is_pre_release)
    }

    /// Set the pre-release flag
    pub fn with_pre_release(mut self, is_pre_release: bool) -> Self {
        self.is_pre_release = is_pre_release;
        self
    }

    pub fn is_breaking_change(&self) -> bool {
        self.is_breaking_change
    }

    pub fn is_minor_change(&self) -> bool {
        self.is_minor_change
    }

    pub fn is_micro_change(&self) -> bool {
        self.is_micro_change
    }

    pub fn is_pre_release(&self) -> bool {
        self.is_pre_release
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self::micro()
    }
}
