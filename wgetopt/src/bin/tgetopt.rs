// Test driver: scans an argument vector and prints one line per token.

use std::io::{self, Write};

use wgetopt::{ArgType, LongOpt, ScanConfig, Scanner, SpecError, Token};

const USAGE: &str = r#"Usage: tgetopt [-L] [-q] [-l SPEC]... OPTSTRING [ARG]...
Scan ARGs (after a synthetic "prog") with OPTSTRING and print every token.

  -l SPEC   Add a long option.  SPEC is NAME[:|::][=C][@FLAG]:
              ':' requires a value, '::' takes an optional one,
              C is the returned character (default: first letter of NAME),
              FLAG makes the option set a flag instead of returning C.
  -L        Accept long options after a single dash.
  -q        Do not print diagnostics for errors.
  -h        This help.

An ARG of the form @FILE is replaced by the lines of FILE.
POSIXLY_CORRECT in the environment stops at the first operand.
"#;

#[derive(Debug, thiserror::Error)]
enum DriverError {
    #[error("{0}")]
    Usage(String),

    #[error("bad option string: {0}")]
    Spec(#[from] SpecError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

type Result<T> = std::result::Result<T, DriverError>;

struct LongSpec {
    name: String,
    arg_type: ArgType,
    flag: Option<String>,
    val: char,
}

impl LongSpec {
    fn parse(spec: &str) -> Result<LongSpec> {
        let (head, flag) = match spec.rsplit_once('@') {
            Some((head, flag)) if !flag.is_empty() => (head, Some(flag.to_string())),
            Some(_) => return Err(DriverError::Usage(format!("empty flag in '{}'", spec))),
            None => (spec, None),
        };
        let (head, val) = match head.split_once('=') {
            Some((head, val)) => {
                let mut chars = val.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => (head, Some(c)),
                    _ => {
                        return Err(DriverError::Usage(format!(
                            "return value must be one character in '{}'",
                            spec
                        )))
                    }
                }
            }
            None => (head, None),
        };
        let (name, arg_type) = if let Some(name) = head.strip_suffix("::") {
            (name, ArgType::OptionalArgument)
        } else if let Some(name) = head.strip_suffix(':') {
            (name, ArgType::RequiredArgument)
        } else {
            (head, ArgType::NoArgument)
        };
        let val = match val.or_else(|| name.chars().next()) {
            Some(val) if !name.is_empty() => val,
            _ => return Err(DriverError::Usage(format!("empty long option name in '{}'", spec))),
        };

        Ok(LongSpec {
            name: name.to_string(),
            arg_type,
            flag,
            val,
        })
    }

    fn as_long_opt(&self) -> LongOpt<'_> {
        match &self.flag {
            Some(flag) => LongOpt::with_flag(&self.name, self.arg_type, flag, self.val),
            None => LongOpt::new(&self.name, self.arg_type, self.val),
        }
    }
}

/// Replace `@FILE` arguments with the lines of FILE.
fn expand_response_files(args: &[&str]) -> Result<Vec<String>> {
    let mut words = Vec::with_capacity(args.len());
    for arg in args {
        match arg.strip_prefix('@') {
            Some(path) if !path.is_empty() => {
                let content = std::fs::read_to_string(path)?;
                words.extend(content.lines().filter(|l| !l.is_empty()).map(str::to_string));
            }
            _ => words.push(arg.to_string()),
        }
    }
    Ok(words)
}

fn describe(token: &Token<'_, '_>) -> String {
    let mut line = match *token {
        Token::Opt { opt, .. } => format!("option {}", opt),
        Token::Flag { flag, val, .. } => format!("flag {}={}", flag, val),
        Token::Operand(value) => return format!("operand '{}'", value),
        Token::End { first_operand } => return format!("end {}", first_operand),
    };
    if let Some(value) = token.value() {
        line.push_str(&format!(" '{}'", value));
    }
    match *token {
        Token::Opt {
            long_index: Some(idx),
            ..
        }
        | Token::Flag {
            long_index: idx, ..
        } => line.push_str(&format!(" (long {})", idx)),
        _ => {}
    }
    line
}

fn main() {
    env_logger::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("tgetopt: {}", e);
            eprint!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

fn run() -> Result<i32> {
    let args: Vec<String> = std::env::args().collect();
    let mut argv: Vec<&str> = args.iter().map(String::as_str).collect();

    let mut long_specs = Vec::new();
    let mut long_only = false;
    let mut quiet = false;

    let mut scanner = Scanner::builder(&mut argv).short_opts("+l:Lqh").build()?;
    for token in scanner.by_ref() {
        match token {
            Ok(Token::Opt {
                opt: 'l',
                value: Some(spec),
                ..
            }) => long_specs.push(LongSpec::parse(spec)?),
            Ok(Token::Opt { opt: 'L', .. }) => long_only = true,
            Ok(Token::Opt { opt: 'q', .. }) => quiet = true,
            Ok(Token::Opt { opt: 'h', .. }) => {
                print!("{}", USAGE);
                return Ok(0);
            }
            Ok(other) => return Err(DriverError::Usage(format!("unexpected token {:?}", other))),
            Err(e) => return Err(DriverError::Usage(e.to_string())),
        }
    }
    let rest = scanner.operands().to_vec();

    let (optstring, test_args) = rest
        .split_first()
        .ok_or_else(|| DriverError::Usage("missing OPTSTRING".to_string()))?;

    let mut words = vec!["prog".to_string()];
    words.extend(expand_response_files(test_args)?);
    let mut test_argv: Vec<&str> = words.iter().map(String::as_str).collect();

    let longopts: Vec<LongOpt<'_>> = long_specs.iter().map(LongSpec::as_long_opt).collect();
    let config = ScanConfig::from_env()
        .long_only(long_only)
        .report_errors(!quiet);
    log::debug!(
        "tgetopt: optstring={:?} long options={} config={:?}",
        optstring,
        longopts.len(),
        config
    );

    let mut scanner = Scanner::builder(&mut test_argv)
        .short_opts(optstring)
        .long_opts(&longopts)
        .config(config)
        .build()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = false;
    loop {
        match scanner.next_token() {
            Ok(token) => {
                writeln!(out, "{}", describe(&token))?;
                if token.is_end() {
                    break;
                }
            }
            Err(e) => {
                failed = true;
                if scanner.should_report() {
                    eprintln!("prog: {}", e);
                }
                writeln!(out, "error {}", e.code(scanner.colon_mode()))?;
            }
        }
    }
    writeln!(out, "argv: {}", scanner.args().join(" "))?;
    writeln!(out, "operands: {}", scanner.operands().join(" "))?;
    out.flush()?;

    Ok(if failed { 1 } else { 0 })
}
