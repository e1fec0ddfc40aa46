//! Filename classification.
//!
//! A report named `<profile>-<test-type>[...].json` is labelled by greedy
//! first-match over two ordered lists. List order is the tie-break rule, so
//! the `ALL` arrays below must not be reordered.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Separator between the profile and the test type in a report name.
pub const LABEL_SEPARATOR: char = '-';

/// Service variant under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Profile {
    #[serde(rename = "fastapi-sync")]
    FastapiSync,
    #[serde(rename = "fastapi-async")]
    FastapiAsync,
    #[serde(rename = "express")]
    Express,
}

impl Profile {
    /// Match order.
    pub const ALL: [Profile; 3] = [Profile::FastapiSync, Profile::FastapiAsync, Profile::Express];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FastapiSync => "fastapi-sync",
            Self::FastapiAsync => "fastapi-async",
            Self::Express => "express",
        }
    }
}

/// Load-test scenario shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TestType {
    #[serde(rename = "write-heavy")]
    WriteHeavy,
    #[serde(rename = "spike")]
    Spike,
    #[serde(rename = "stress")]
    Stress,
    #[serde(rename = "soak")]
    Soak,
    #[serde(rename = "read-heavy")]
    ReadHeavy,
    #[serde(rename = "breakpoint-read")]
    BreakpointRead,
    #[serde(rename = "breakpoint-write")]
    BreakpointWrite,
}

impl TestType {
    /// Match order.
    pub const ALL: [TestType; 7] = [
        TestType::WriteHeavy,
        TestType::Spike,
        TestType::Stress,
        TestType::Soak,
        TestType::ReadHeavy,
        TestType::BreakpointRead,
        TestType::BreakpointWrite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WriteHeavy => "write-heavy",
            Self::Spike => "spike",
            Self::Stress => "stress",
            Self::Soak => "soak",
            Self::ReadHeavy => "read-heavy",
            Self::BreakpointRead => "breakpoint-read",
            Self::BreakpointWrite => "breakpoint-write",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The (profile, test type) pair every record of one report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Labels {
    pub profile: Profile,
    pub test_type: TestType,
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.profile, self.test_type)
    }
}

/// Classifies a file stem (name without extension).
///
/// The first profile that prefixes `stem` wins; one separator is stripped;
/// the first test type that prefixes the remainder wins. Later profiles are
/// not tried once one has matched.
pub fn classify_stem(stem: &str) -> CoreResult<Labels> {
    let (profile, rest) = Profile::ALL
        .iter()
        .find_map(|p| stem.strip_prefix(p.as_str()).map(|rest| (*p, rest)))
        .ok_or_else(|| CoreError::classification(stem))?;

    let rest = rest.strip_prefix(LABEL_SEPARATOR).unwrap_or(rest);

    let test_type = TestType::ALL
        .iter()
        .copied()
        .find(|t| rest.starts_with(t.as_str()))
        .ok_or_else(|| CoreError::classification(stem))?;

    Ok(Labels { profile, test_type })
}

/// Classifies a report path by its file stem.
pub fn classify_path(path: &Path) -> CoreResult<Labels> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    classify_stem(&stem)
}
