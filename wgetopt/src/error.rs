use std::fmt;

/// Name of an option as it appeared on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptName {
    Short(char),
    Long(String),
}

impl fmt::Display for OptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptName::Short(c) => write!(f, "-{}", c),
            OptName::Long(name) => write!(f, "--{}", name),
        }
    }
}

/// A classification failure for one argument.
///
/// These never poison the scanner: after one is returned, the next call picks
/// up with the following argument (or the rest of the current cluster).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("{}", unknown_message(.0))]
    UnknownOption(OptName),

    #[error("option '--{}' is ambiguous; possibilities:{}", .name, candidate_list(.candidates))]
    AmbiguousLongOption {
        name: String,
        candidates: Vec<String>,
    },

    #[error("{}", missing_message(.0))]
    MissingValue(OptName),

    #[error("option '--{0}' doesn't allow an argument")]
    MisplacedValue(String),
}

impl ScanError {
    /// The classic getopt return code for this error: `':'` for a missing
    /// value when the optstring started with `:`, `'?'` for everything else.
    pub fn code(&self, colon_mode: bool) -> char {
        match self {
            ScanError::MissingValue(_) if colon_mode => ':',
            _ => '?',
        }
    }
}

fn unknown_message(name: &OptName) -> String {
    match name {
        OptName::Short(c) => format!("invalid option -- '{}'", c),
        OptName::Long(_) => format!("unrecognized option '{}'", name),
    }
}

fn missing_message(name: &OptName) -> String {
    match name {
        OptName::Short(c) => format!("option requires an argument -- '{}'", c),
        OptName::Long(_) => format!("option '{}' requires an argument", name),
    }
}

fn candidate_list(candidates: &[String]) -> String {
    candidates.iter().map(|c| format!(" '--{}'", c)).collect()
}

/// Rejected short-option specification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    #[error("stray ':' at offset {0} in option string")]
    StrayColon(usize),

    #[error("invalid option character {0:?} in option string")]
    InvalidChar(char),
}

pub type Result<T> = std::result::Result<T, SpecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_messages_follow_gnu_wording() {
        let err = ScanError::UnknownOption(OptName::Short('z'));
        assert_eq!(err.to_string(), "invalid option -- 'z'");
        let err = ScanError::MissingValue(OptName::Short('b'));
        assert_eq!(err.to_string(), "option requires an argument -- 'b'");
    }

    #[test]
    fn long_messages_follow_gnu_wording() {
        let err = ScanError::UnknownOption(OptName::Long("frob".into()));
        assert_eq!(err.to_string(), "unrecognized option '--frob'");
        let err = ScanError::MissingValue(OptName::Long("file".into()));
        assert_eq!(err.to_string(), "option '--file' requires an argument");
        let err = ScanError::MisplacedValue("verbose".into());
        assert_eq!(err.to_string(), "option '--verbose' doesn't allow an argument");
    }

    #[test]
    fn ambiguous_lists_candidates() {
        let err = ScanError::AmbiguousLongOption {
            name: "fo".into(),
            candidates: vec!["foo".into(), "foobar".into()],
        };
        assert_eq!(
            err.to_string(),
            "option '--fo' is ambiguous; possibilities: '--foo' '--foobar'"
        );
    }

    #[test]
    fn colon_mode_only_changes_missing_value_code() {
        let missing = ScanError::MissingValue(OptName::Short('b'));
        let unknown = ScanError::UnknownOption(OptName::Short('z'));
        assert_eq!(missing.code(false), '?');
        assert_eq!(missing.code(true), ':');
        assert_eq!(unknown.code(true), '?');
    }
}
