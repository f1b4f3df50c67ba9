//! The option scanner.
//!
//! A [`Scanner`] walks an argument vector one token at a time. Under
//! [`Ordering::Permute`] it also rotates operands past the options it has
//! already returned, so by the time [`Token::End`] comes back every option
//! (and its value) sits in `argv[1..k]` and every operand in `argv[k..]`.

use crate::config::ScanConfig;
use crate::error::{OptName, Result, ScanError};
use crate::permute;
use crate::spec::{find_long, live_entries, ArgType, LongMatch, LongOpt, Ordering, ShortSpec};

/// One step of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'opts, 'args> {
    /// A short option, or a long option without a flag target (reported by
    /// its `val`).
    Opt {
        opt: char,
        value: Option<&'args str>,
        long_index: Option<usize>,
    },
    /// A long option whose record names a flag: the caller stores `val` in
    /// `flag`.
    Flag {
        flag: &'opts str,
        val: char,
        value: Option<&'args str>,
        long_index: usize,
    },
    /// An operand, only produced under [`Ordering::ReturnInOrder`].
    Operand(&'args str),
    /// No more options. Operands start at `first_operand`.
    End { first_operand: usize },
}

impl<'opts, 'args> Token<'opts, 'args> {
    pub fn value(&self) -> Option<&'args str> {
        match *self {
            Token::Opt { value, .. } | Token::Flag { value, .. } => value,
            Token::Operand(value) => Some(value),
            Token::End { .. } => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Token::End { .. })
    }
}

/// Outcome of classifying one argument.
pub type ScanResult<'opts, 'args> = std::result::Result<Token<'opts, 'args>, ScanError>;

/// What advancing to the next argument found.
enum Advance<'args> {
    Option,
    Operand(&'args str),
    End,
}

fn is_option(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}

// ============================================================================
// ScannerBuilder
// ============================================================================

pub struct ScannerBuilder<'opts, 'args, 'argarray> {
    argv: &'argarray mut [&'args str],
    optstring: &'opts str,
    longopts: &'opts [LongOpt<'opts>],
    config: ScanConfig,
}

impl<'opts, 'args, 'argarray> ScannerBuilder<'opts, 'args, 'argarray> {
    pub fn short_opts(mut self, optstring: &'opts str) -> Self {
        self.optstring = optstring;
        self
    }

    pub fn long_opts(mut self, longopts: &'opts [LongOpt<'opts>]) -> Self {
        self.longopts = longopts;
        self
    }

    pub fn config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Scanner<'opts, 'args, 'argarray>> {
        let shortopts = ShortSpec::parse(self.optstring)?;
        Ok(Scanner {
            argv: self.argv,
            shortopts,
            longopts: live_entries(self.longopts),
            config: self.config,
            ordering: Ordering::Permute,
            cluster: "",
            optind: 0,
            optarg: None,
            optopt: '?',
            long_index: None,
            first_nonopt: 0,
            last_nonopt: 0,
            initialized: false,
            finished: false,
        })
    }
}

// ============================================================================
// Scanner
// ============================================================================

pub struct Scanner<'opts, 'args, 'argarray> {
    argv: &'argarray mut [&'args str],
    shortopts: ShortSpec,
    longopts: &'opts [LongOpt<'opts>],
    config: ScanConfig,
    ordering: Ordering,
    // Unscanned tail of the short-option cluster being unpacked.
    cluster: &'args str,
    optind: usize,
    optarg: Option<&'args str>,
    optopt: char,
    long_index: Option<usize>,
    // Operands already skipped over live in argv[first_nonopt..last_nonopt].
    first_nonopt: usize,
    last_nonopt: usize,
    initialized: bool,
    finished: bool,
}

impl<'opts, 'args, 'argarray> Scanner<'opts, 'args, 'argarray> {
    pub fn builder(argv: &'argarray mut [&'args str]) -> ScannerBuilder<'opts, 'args, 'argarray> {
        ScannerBuilder {
            argv,
            optstring: "",
            longopts: &[],
            config: ScanConfig::default(),
        }
    }

    /// Shorthand for a builder with default configuration.
    pub fn new(
        argv: &'argarray mut [&'args str],
        optstring: &'opts str,
        longopts: &'opts [LongOpt<'opts>],
    ) -> Result<Self> {
        Self::builder(argv)
            .short_opts(optstring)
            .long_opts(longopts)
            .build()
    }

    /// Index of the next argument to scan. Once [`Token::End`] has been
    /// returned, this is the index of the first operand.
    pub fn optind(&self) -> usize {
        self.optind
    }

    /// Value attached to the most recent option, if any.
    pub fn optarg(&self) -> Option<&'args str> {
        self.optarg
    }

    /// The option character behind the most recent error.
    ///
    /// `'\0'` for long options that have no character of their own.
    pub fn optopt(&self) -> char {
        self.optopt
    }

    /// Table index of the most recently matched long option.
    pub fn long_index(&self) -> Option<usize> {
        self.long_index
    }

    pub fn ordering(&self) -> Ordering {
        if self.initialized {
            self.ordering
        } else {
            self.initial_ordering()
        }
    }

    /// True when the optstring started with `:` after the ordering prefix.
    pub fn colon_mode(&self) -> bool {
        self.shortopts.colon_mode()
    }

    /// Whether a caller following getopt conventions should print a
    /// diagnostic for errors returned by this scanner.
    pub fn should_report(&self) -> bool {
        self.config.report_errors && !self.shortopts.colon_mode()
    }

    /// The argument vector in its current (possibly permuted) order.
    pub fn args(&self) -> &[&'args str] {
        &self.argv[..]
    }

    /// `argv[optind..]`: the operands once the scan has ended.
    pub fn operands(&self) -> &[&'args str] {
        &self.argv[self.optind..]
    }

    /// Start a fresh scan over the same vector on the next call.
    pub fn reset(&mut self) {
        self.initialized = false;
        self.optarg = None;
        self.long_index = None;
    }

    fn initial_ordering(&self) -> Ordering {
        match self.shortopts.ordering() {
            Some(ordering) => ordering,
            None if self.config.posixly_correct => Ordering::RequireOrder,
            None => Ordering::Permute,
        }
    }

    fn initialize(&mut self) {
        self.ordering = self.initial_ordering();
        let start = 1.min(self.argv.len());
        self.optind = start;
        self.first_nonopt = start;
        self.last_nonopt = start;
        self.cluster = "";
        self.optopt = '?';
        self.finished = false;
        self.initialized = true;
        log::debug!(
            "Scanner::initialize(): argc={} ordering={:?} long_only={}",
            self.argv.len(),
            self.ordering,
            self.config.long_only
        );
    }

    /// Produce the next token.
    ///
    /// Errors describe one bad argument (or one bad character of a cluster);
    /// the scanner stays usable and the following call moves on.
    pub fn next_token(&mut self) -> ScanResult<'opts, 'args> {
        if !self.initialized {
            self.initialize();
        }
        self.optarg = None;
        self.long_index = None;

        loop {
            if self.finished {
                return Ok(Token::End {
                    first_operand: self.optind,
                });
            }

            if let Some(c) = self.cluster.chars().next() {
                self.cluster = &self.cluster[c.len_utf8()..];
                return self.short_option(c);
            }

            match self.advance() {
                Advance::End => {
                    self.finished = true;
                    log::trace!("Scanner::next_token(): end, first operand at {}", self.optind);
                }
                Advance::Operand(arg) => {
                    log::trace!("Scanner::next_token(): operand {:?}", arg);
                    self.optarg = Some(arg);
                    return Ok(Token::Operand(arg));
                }
                Advance::Option => {
                    let arg = self.argv[self.optind];
                    if !self.longopts.is_empty() {
                        if let Some(text) = arg.strip_prefix("--") {
                            if let Some(result) = self.long_option(text, false) {
                                return result;
                            }
                        } else if self.config.long_only && self.wants_long_only(&arg[1..]) {
                            if let Some(result) = self.long_option(&arg[1..], true) {
                                return result;
                            }
                        }
                    }
                    self.cluster = &arg[1..];
                }
            }
        }
    }

    /// In long-only mode a single-dash argument is tried as a long option
    /// unless it is exactly one known short option character.
    fn wants_long_only(&self, body: &str) -> bool {
        let mut chars = body.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.shortopts.lookup(c).is_none(),
            _ => true,
        }
    }

    /// Move to the next argument that needs classifying, permuting and
    /// handling `--` on the way.
    fn advance(&mut self) -> Advance<'args> {
        let argc = self.argv.len();

        if self.ordering == Ordering::Permute {
            // Options scanned since the last operand run go in front of it.
            if self.first_nonopt != self.last_nonopt && self.last_nonopt != self.optind {
                self.exchange();
            } else if self.last_nonopt != self.optind {
                self.first_nonopt = self.optind;
            }

            while self.optind < argc && !is_option(self.argv[self.optind]) {
                self.optind += 1;
            }
            self.last_nonopt = self.optind;
        }

        // `--` ends option scanning; it is swapped into place like an option
        // and everything after it is an operand.
        if self.optind < argc && self.argv[self.optind] == "--" {
            self.optind += 1;
            if self.first_nonopt != self.last_nonopt && self.last_nonopt != self.optind {
                self.exchange();
            } else if self.first_nonopt == self.last_nonopt {
                self.first_nonopt = self.optind;
            }
            self.last_nonopt = argc;
            self.optind = argc;
        }

        if self.optind >= argc {
            // Point the caller back at the operands we skipped.
            if self.first_nonopt != self.last_nonopt {
                self.optind = self.first_nonopt;
            }
            return Advance::End;
        }

        let arg = self.argv[self.optind];
        if !is_option(arg) {
            if self.ordering == Ordering::RequireOrder {
                return Advance::End;
            }
            self.optind += 1;
            return Advance::Operand(arg);
        }
        Advance::Option
    }

    fn exchange(&mut self) {
        log::debug!(
            "Scanner::exchange(): operands [{}, {}) past options [{}, {})",
            self.first_nonopt,
            self.last_nonopt,
            self.last_nonopt,
            self.optind
        );
        permute::exchange(
            &mut self.argv[..],
            self.first_nonopt,
            self.last_nonopt,
            self.optind,
        );
        self.first_nonopt += self.optind - self.last_nonopt;
        self.last_nonopt = self.optind;
    }

    fn short_option(&mut self, c: char) -> ScanResult<'opts, 'args> {
        // The argument is used up once its last character is taken.
        if self.cluster.is_empty() {
            self.optind += 1;
        }

        let arg_type = match self.shortopts.lookup(c) {
            Some(arg_type) => arg_type,
            None => {
                log::trace!("Scanner::short_option(): unknown {:?}", c);
                self.optopt = c;
                return Err(ScanError::UnknownOption(OptName::Short(c)));
            }
        };

        let value = match arg_type {
            ArgType::NoArgument => None,
            ArgType::OptionalArgument => self.take_cluster(),
            ArgType::RequiredArgument => match self.take_cluster() {
                Some(value) => Some(value),
                None if self.optind < self.argv.len() => {
                    let value = self.argv[self.optind];
                    self.optind += 1;
                    Some(value)
                }
                None => {
                    log::trace!("Scanner::short_option(): {:?} missing its value", c);
                    self.optopt = c;
                    return Err(ScanError::MissingValue(OptName::Short(c)));
                }
            },
        };

        log::trace!("Scanner::short_option(): {:?} value={:?}", c, value);
        self.optarg = value;
        Ok(Token::Opt {
            opt: c,
            value,
            long_index: None,
        })
    }

    /// Hand the rest of the cluster over as a value and finish the argument.
    fn take_cluster(&mut self) -> Option<&'args str> {
        if self.cluster.is_empty() {
            return None;
        }
        let value = std::mem::take(&mut self.cluster);
        self.optind += 1;
        Some(value)
    }

    /// Resolve `text` (the argument minus its dashes) against the long table.
    ///
    /// Returns `None` only in long-only mode, when the text is not a long
    /// option but starts with a known short option and should be rescanned
    /// as a cluster.
    fn long_option(
        &mut self,
        text: &'args str,
        single_dash: bool,
    ) -> Option<ScanResult<'opts, 'args>> {
        let (name, inline) = match text.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (text, None),
        };

        let idx = match find_long(self.longopts, name) {
            LongMatch::Found(idx) => idx,
            LongMatch::Ambiguous(candidates) => {
                log::trace!("Scanner::long_option(): {:?} is ambiguous", name);
                self.optind += 1;
                self.optopt = '\0';
                let candidates = candidates
                    .into_iter()
                    .map(|i| self.longopts[i].name.to_string())
                    .collect();
                return Some(Err(ScanError::AmbiguousLongOption {
                    name: name.to_string(),
                    candidates,
                }));
            }
            LongMatch::NotFound => {
                let short_fallback = single_dash
                    && text
                        .chars()
                        .next()
                        .is_some_and(|c| self.shortopts.lookup(c).is_some());
                if short_fallback {
                    return None;
                }
                log::trace!("Scanner::long_option(): {:?} not found", name);
                self.optind += 1;
                self.optopt = '\0';
                return Some(Err(ScanError::UnknownOption(OptName::Long(name.to_string()))));
            }
        };

        let opt = self.longopts[idx];
        self.optind += 1;

        let value = match (opt.arg_type, inline) {
            (ArgType::NoArgument, Some(_)) => {
                self.optopt = opt.val;
                return Some(Err(ScanError::MisplacedValue(opt.name.to_string())));
            }
            (ArgType::NoArgument, None) | (ArgType::OptionalArgument, None) => None,
            (_, Some(value)) => Some(value),
            (ArgType::RequiredArgument, None) => {
                if self.optind < self.argv.len() {
                    let value = self.argv[self.optind];
                    self.optind += 1;
                    Some(value)
                } else {
                    self.optopt = opt.val;
                    return Some(Err(ScanError::MissingValue(OptName::Long(
                        opt.name.to_string(),
                    ))));
                }
            }
        };

        log::trace!(
            "Scanner::long_option(): --{} (index {}) value={:?}",
            opt.name,
            idx,
            value
        );
        self.optarg = value;
        self.long_index = Some(idx);
        Some(Ok(match opt.flag {
            Some(flag) => Token::Flag {
                flag,
                val: opt.val,
                value,
                long_index: idx,
            },
            None => Token::Opt {
                opt: opt.val,
                value,
                long_index: Some(idx),
            },
        }))
    }
}

impl<'opts, 'args, 'argarray> Iterator for Scanner<'opts, 'args, 'argarray> {
    type Item = ScanResult<'opts, 'args>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Token::End { .. }) => None,
            other => Some(other),
        }
    }
}
