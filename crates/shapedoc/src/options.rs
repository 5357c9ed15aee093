//! Build options

use serde::{Deserialize, Serialize};

use crate::convert::Direction;

/// What to do when two different definitions request the same component name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicateNamePolicy {
    /// Fail the build unless both definitions produce identical fragments
    #[default]
    Reject,
    /// Keep the most recent registration under the name
    LastWriteWins,
}

/// Options for one document build.
///
/// Deserializable so callers can load it from whatever config format they use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub duplicate_names: DuplicateNamePolicy,
    /// Direction used when converting header schemas
    pub header_direction: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert_eq!(options.duplicate_names, DuplicateNamePolicy::Reject);
        assert_eq!(options.header_direction, Direction::Input);
    }

    #[rstest]
    #[case("{}", Options::default())]
    #[case(
        r#"{"duplicateNames":"lastWriteWins"}"#,
        Options { duplicate_names: DuplicateNamePolicy::LastWriteWins, ..Options::default() }
    )]
    #[case(
        r#"{"headerDirection":"output"}"#,
        Options { header_direction: Direction::Output, ..Options::default() }
    )]
    fn deserialize_partial(#[case] json: &str, #[case] expected: Options) {
        let options: Options = serde_json::from_str(json).unwrap();
        assert_eq!(options, expected);
    }

    #[test]
    fn rejects_unknown_policy() {
        let result = serde_json::from_str::<Options>(r#"{"duplicateNames":"merge"}"#);
        assert!(result.is_err());
    }
}
