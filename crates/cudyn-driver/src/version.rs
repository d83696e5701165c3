use std::fmt;
use std::str::FromStr;

/// Driver version as reported by `cuDriverGetVersion`.
///
/// The driver encodes it as `major * 1000 + minor * 10 + patch`, so 11060 is
/// 11.6.0 and 12020 is 12.2.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverVersion {
    pub major: i32,
    pub minor: i32,
    pub patch: i32,
}

impl DriverVersion {
    /// Largest major version whose raw encoding fits in an `i32`.
    pub const MAX_MAJOR: i32 = (i32::MAX - 999) / 1000;

    pub const fn new(major: i32, minor: i32, patch: i32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub const fn from_raw(raw: i32) -> Self {
        Self {
            major: raw / 1000,
            minor: (raw % 1000) / 10,
            patch: raw % 10,
        }
    }

    /// Raw driver encoding. Saturates for components outside what the driver
    /// can report.
    pub const fn to_raw(self) -> i32 {
        self.major
            .saturating_mul(1000)
            .saturating_add(self.minor.saturating_mul(10))
            .saturating_add(self.patch)
    }
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid driver version '{0}', expected MAJOR.MINOR or MAJOR.MINOR.PATCH")]
pub struct ParseVersionError(String);

impl FromStr for DriverVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVersionError(s.to_string());

        let parts = s
            .trim()
            .split('.')
            .map(|p| p.parse::<i32>().map_err(|_| err()))
            .collect::<Result<Vec<_>, _>>()?;

        let (major, minor, patch) = match parts.as_slice() {
            [major, minor] => (*major, *minor, 0),
            [major, minor, patch] => (*major, *minor, *patch),
            _ => return Err(err()),
        };

        // minor and patch share the low three decimal digits of the raw encoding
        if !(0..=Self::MAX_MAJOR).contains(&major)
            || !(0..100).contains(&minor)
            || !(0..10).contains(&patch)
        {
            return Err(err());
        }

        Ok(Self::new(major, minor, patch))
    }
}
