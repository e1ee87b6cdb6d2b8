use semver::Version;

/// How far a target's current version is from its latest version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drift {
    UpToDate,
    Outdated,
    Newer,
    /// At least one side is not a semantic version and the two differ
    Unknown,
}

impl Drift {
    /// CSS class used by the version page
    pub fn as_str(&self) -> &'static str {
        match self {
            Drift::UpToDate => "up-to-date",
            Drift::Outdated => "outdated",
            Drift::Newer => "newer",
            Drift::Unknown => "unknown",
        }
    }
}

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Strips a leading `v` and pads partial versions with zeros.
///
/// Examples:
/// - "v1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3-rc.1" -> Version(1, 2, 3-rc.1)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Classify the drift between `current` and `latest`
pub fn classify(current: &str, latest: &str) -> Drift {
    if current.trim() == latest.trim() {
        return Drift::UpToDate;
    }

    match (parse_version(current), parse_version(latest)) {
        (Some(current), Some(latest)) => match current.cmp(&latest) {
            std::cmp::Ordering::Less => Drift::Outdated,
            std::cmp::Ordering::Equal => Drift::UpToDate,
            std::cmp::Ordering::Greater => Drift::Newer,
        },
        _ => Drift::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3", "1.2.3", Drift::UpToDate)]
    #[case("v1.2", "1.2.0", Drift::UpToDate)] // prefix and padding
    #[case("1.2.3", "1.3.0", Drift::Outdated)]
    #[case("v1.10.0", "v1.9.3", Drift::Newer)]
    #[case("2.0.0-rc.1", "2.0.0", Drift::Outdated)] // pre-release precedes release
    #[case("sha-abc123", "sha-abc123", Drift::UpToDate)] // identical strings
    #[case("sha-abc123", "1.0.0", Drift::Unknown)]
    #[case("controller-v1.9.0", "controller-v1.10.0", Drift::Unknown)]
    fn classify_returns_expected(
        #[case] current: &str,
        #[case] latest: &str,
        #[case] expected: Drift,
    ) {
        assert_eq!(classify(current, latest), expected);
    }

    #[rstest]
    #[case("1", Some(Version::new(1, 0, 0)))]
    #[case("v1.2", Some(Version::new(1, 2, 0)))]
    #[case("1.2.3", Some(Version::new(1, 2, 3)))]
    #[case("latest", None)]
    fn parse_version_normalizes_partial_versions(
        #[case] input: &str,
        #[case] expected: Option<Version>,
    ) {
        assert_eq!(parse_version(input), expected);
    }
}
