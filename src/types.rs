use clap::ValueEnum;

/// Platform whose release versions are considered during version selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Macos,
    Tvos,
}

impl Platform {
    /// Wire value the App Store Connect API uses for this platform.
    pub fn wire_name(self) -> &'static str {
        match self {
            Platform::Ios => "IOS",
            Platform::Macos => "MAC_OS",
            Platform::Tvos => "TV_OS",
        }
    }

    /// Parse an App Store Connect wire value.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "IOS" => Some(Platform::Ios),
            "MAC_OS" => Some(Platform::Macos),
            "TV_OS" => Some(Platform::Tvos),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Macos => write!(f, "macos"),
            Platform::Tvos => write!(f, "tvos"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_round_trip() {
        for platform in [Platform::Ios, Platform::Macos, Platform::Tvos] {
            assert_eq!(Platform::from_wire(platform.wire_name()), Some(platform));
        }
        assert_eq!(Platform::from_wire("WATCH_OS"), None);
    }
}
