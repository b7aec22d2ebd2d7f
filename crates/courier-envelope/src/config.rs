//! Codec configuration

/// Default padded width of an encrypted profile name, in bytes
pub const DEFAULT_PROFILE_NAME_WIDTH: usize = 26;

/// Narrowest padded name field whose envelope still decrypts (one content
/// byte above the nonce and tag)
pub const MIN_PROFILE_NAME_WIDTH: usize = 1;

/// Tunables for [`crate::EnvelopeCodec`].
///
/// Wire constants (key, IV, MAC and tag sizes, the signaling version byte)
/// are fixed by the formats and are not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Width profile names are zero-padded to before encryption
    pub profile_name_width: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { profile_name_width: DEFAULT_PROFILE_NAME_WIDTH }
    }
}

impl CodecConfig {
    /// Override the padded profile name width.
    ///
    /// Widths below [`MIN_PROFILE_NAME_WIDTH`] are raised to it.
    pub fn with_profile_name_width(mut self, width: usize) -> Self {
        self.profile_name_width = width.max(MIN_PROFILE_NAME_WIDTH);
        self
    }

    /// Clamp fields set directly on the struct into their valid ranges.
    pub(crate) fn normalized(self) -> Self {
        self.with_profile_name_width(self.profile_name_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_width() {
        assert_eq!(CodecConfig::default().profile_name_width, 26);
    }

    #[test]
    fn override_name_width() {
        let config = CodecConfig::default().with_profile_name_width(53);
        assert_eq!(config.profile_name_width, 53);
    }

    #[test]
    fn zero_name_width_is_raised_to_minimum() {
        let config = CodecConfig::default().with_profile_name_width(0);
        assert_eq!(config.profile_name_width, MIN_PROFILE_NAME_WIDTH);
    }

    #[test]
    fn normalized_clamps_direct_field_writes() {
        let config = CodecConfig { profile_name_width: 0 }.normalized();
        assert_eq!(config.profile_name_width, 1);
    }
}
