//! Option tables: the short optstring and the long option records.

use crate::error::{Result, SpecError};

/// Whether an option takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    NoArgument,
    RequiredArgument,
    OptionalArgument,
}

/// How options that follow operands are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    /// Stop at the first operand. Selected with a leading `+`.
    RequireOrder,
    /// Move operands to the end as the scan proceeds. The default.
    Permute,
    /// Hand operands back interleaved with options. Selected with a leading `-`.
    ReturnInOrder,
}

/// One long option record.
///
/// When `flag` is set, a match is reported as [`Token::Flag`](crate::Token::Flag)
/// and the caller is expected to store `val` into that flag. Otherwise `val`
/// is reported as the option character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongOpt<'a> {
    pub name: &'a str,
    pub arg_type: ArgType,
    pub flag: Option<&'a str>,
    pub val: char,
}

impl<'a> LongOpt<'a> {
    pub const fn new(name: &'a str, arg_type: ArgType, val: char) -> Self {
        LongOpt {
            name,
            arg_type,
            flag: None,
            val,
        }
    }

    pub const fn with_flag(name: &'a str, arg_type: ArgType, flag: &'a str, val: char) -> Self {
        LongOpt {
            name,
            arg_type,
            flag: Some(flag),
            val,
        }
    }
}

/// Table entries up to (not including) the first one with an empty name.
pub(crate) fn live_entries<'s, 'a>(longopts: &'s [LongOpt<'a>]) -> &'s [LongOpt<'a>] {
    let end = longopts
        .iter()
        .position(|opt| opt.name.is_empty())
        .unwrap_or(longopts.len());
    &longopts[..end]
}

/// Result of looking up a long option name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LongMatch {
    Found(usize),
    Ambiguous(Vec<usize>),
    NotFound,
}

/// Resolve `name` against the table: an exact match wins, otherwise the name
/// must be a prefix of exactly one entry.
pub(crate) fn find_long(longopts: &[LongOpt<'_>], name: &str) -> LongMatch {
    let mut prefixed = Vec::new();
    for (idx, opt) in longopts.iter().enumerate() {
        if !opt.name.starts_with(name) {
            continue;
        }
        if opt.name.len() == name.len() {
            return LongMatch::Found(idx);
        }
        prefixed.push(idx);
    }
    match prefixed.len() {
        0 => LongMatch::NotFound,
        1 => LongMatch::Found(prefixed[0]),
        _ => LongMatch::Ambiguous(prefixed),
    }
}

/// A parsed short option string such as `"+:ab:c::"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortSpec {
    ordering: Option<Ordering>,
    colon: bool,
    opts: Vec<(char, ArgType)>,
}

impl ShortSpec {
    pub fn parse(optstring: &str) -> Result<ShortSpec> {
        let mut rest = optstring;
        let ordering = if let Some(r) = rest.strip_prefix('+') {
            rest = r;
            Some(Ordering::RequireOrder)
        } else if let Some(r) = rest.strip_prefix('-') {
            rest = r;
            Some(Ordering::ReturnInOrder)
        } else {
            None
        };
        let colon = match rest.strip_prefix(':') {
            Some(r) => {
                rest = r;
                true
            }
            None => false,
        };

        let base = optstring.len() - rest.len();
        let mut opts = Vec::new();
        let mut chars = rest.char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            if c == ':' {
                return Err(SpecError::StrayColon(base + offset));
            }
            if c.is_control() || c.is_whitespace() {
                return Err(SpecError::InvalidChar(c));
            }
            let mut arg_type = ArgType::NoArgument;
            if chars.next_if(|&(_, n)| n == ':').is_some() {
                arg_type = ArgType::RequiredArgument;
                if chars.next_if(|&(_, n)| n == ':').is_some() {
                    arg_type = ArgType::OptionalArgument;
                }
            }
            opts.push((c, arg_type));
        }

        Ok(ShortSpec {
            ordering,
            colon,
            opts,
        })
    }

    /// The ordering requested by the optstring prefix, if any.
    pub fn ordering(&self) -> Option<Ordering> {
        self.ordering
    }

    /// True when the optstring asked for `':'` on a missing value.
    pub fn colon_mode(&self) -> bool {
        self.colon
    }

    /// First declaration of `c` wins.
    pub fn lookup(&self, c: char) -> Option<ArgType> {
        self.opts
            .iter()
            .find(|(opt, _)| *opt == c)
            .map(|(_, arg_type)| *arg_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc", None, false)]
    #[case("+abc", Some(Ordering::RequireOrder), false)]
    #[case("-abc", Some(Ordering::ReturnInOrder), false)]
    #[case(":abc", None, true)]
    #[case("+:abc", Some(Ordering::RequireOrder), true)]
    #[case("-:", Some(Ordering::ReturnInOrder), true)]
    #[case("", None, false)]
    fn prefix_selects_mode(
        #[case] optstring: &str,
        #[case] ordering: Option<Ordering>,
        #[case] colon: bool,
    ) {
        let spec = ShortSpec::parse(optstring).unwrap();
        assert_eq!(spec.ordering(), ordering);
        assert_eq!(spec.colon_mode(), colon);
    }

    #[test]
    fn arity_markers() {
        let spec = ShortSpec::parse("ab:c::d").unwrap();
        assert_eq!(spec.lookup('a'), Some(ArgType::NoArgument));
        assert_eq!(spec.lookup('b'), Some(ArgType::RequiredArgument));
        assert_eq!(spec.lookup('c'), Some(ArgType::OptionalArgument));
        assert_eq!(spec.lookup('d'), Some(ArgType::NoArgument));
        assert_eq!(spec.lookup('e'), None);
        assert_eq!(spec.lookup(':'), None);
    }

    #[test]
    fn first_declaration_wins() {
        let spec = ShortSpec::parse("ab:a:").unwrap();
        assert_eq!(spec.lookup('a'), Some(ArgType::NoArgument));
    }

    #[test]
    fn non_ascii_options() {
        let spec = ShortSpec::parse("é:ß").unwrap();
        assert_eq!(spec.lookup('é'), Some(ArgType::RequiredArgument));
        assert_eq!(spec.lookup('ß'), Some(ArgType::NoArgument));
    }

    #[test]
    fn stray_colon_is_rejected() {
        assert_eq!(ShortSpec::parse("a:::"), Err(SpecError::StrayColon(3)));
        assert_eq!(ShortSpec::parse("+::a"), Err(SpecError::StrayColon(2)));
    }

    #[test]
    fn control_chars_are_rejected() {
        assert_eq!(ShortSpec::parse("a\0"), Err(SpecError::InvalidChar('\0')));
        assert_eq!(ShortSpec::parse("a b"), Err(SpecError::InvalidChar(' ')));
    }

    const TABLE: &[LongOpt<'static>] = &[
        LongOpt::new("foo", ArgType::NoArgument, 'f'),
        LongOpt::new("foobar", ArgType::RequiredArgument, 'F'),
        LongOpt::new("verbose", ArgType::NoArgument, 'v'),
    ];

    #[test]
    fn exact_match_beats_prefix() {
        assert_eq!(find_long(TABLE, "foo"), LongMatch::Found(0));
    }

    #[test]
    fn shared_prefix_is_ambiguous() {
        assert_eq!(find_long(TABLE, "fo"), LongMatch::Ambiguous(vec![0, 1]));
    }

    #[test]
    fn unique_prefix_resolves() {
        assert_eq!(find_long(TABLE, "foob"), LongMatch::Found(1));
        assert_eq!(find_long(TABLE, "v"), LongMatch::Found(2));
    }

    #[test]
    fn unknown_name() {
        assert_eq!(find_long(TABLE, "quiet"), LongMatch::NotFound);
        assert_eq!(find_long(TABLE, "foobarbaz"), LongMatch::NotFound);
    }

    #[test]
    fn empty_name_terminates_table() {
        let table = [
            LongOpt::new("one", ArgType::NoArgument, '1'),
            LongOpt::new("", ArgType::NoArgument, '\0'),
            LongOpt::new("two", ArgType::NoArgument, '2'),
        ];
        let live = live_entries(&table);
        assert_eq!(live.len(), 1);
        assert_eq!(find_long(live, "two"), LongMatch::NotFound);
    }
}
