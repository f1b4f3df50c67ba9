//! GNU-style option scanning over a borrowed argument vector.
//!
//! - `Scanner::next_token()` classifies one argument (or one character of a
//!   short-option cluster) per call
//! - Long options match exactly or by unambiguous prefix
//! - Under the default ordering, operands are rotated behind the options in
//!   place, so `argv[optind..]` is the operand list once scanning ends
//!
//! ```
//! use wgetopt::{ArgType, LongOpt, Scanner, Token};
//!
//! const LONGS: &[LongOpt<'static>] = &[LongOpt::new("output", ArgType::RequiredArgument, 'o')];
//!
//! let mut argv = ["prog", "in.txt", "-v", "--out=x"];
//! let mut scanner = Scanner::new(&mut argv, "vo:", LONGS).unwrap();
//! let mut seen = Vec::new();
//! for token in scanner.by_ref() {
//!     match token.unwrap() {
//!         Token::Opt { opt, value, .. } => seen.push((opt, value)),
//!         other => panic!("unexpected {:?}", other),
//!     }
//! }
//! assert_eq!(seen, [('v', None), ('o', Some("x"))]);
//! assert_eq!(scanner.operands(), ["in.txt"]);
//! ```

pub mod config;
pub mod error;
pub mod permute;
pub mod scanner;
pub mod spec;

pub use config::ScanConfig;
pub use error::{OptName, ScanError, SpecError};
pub use scanner::{ScanResult, Scanner, ScannerBuilder, Token};
pub use spec::{ArgType, LongOpt, Ordering, ShortSpec};
