//! Types for console input

use std::str::{FromStr, SplitWhitespace};

/// Longest accepted command line in bytes, the rest is dropped
pub const MAX_LINE: usize = 80;

/// Cut `line` to [`MAX_LINE`] bytes without splitting a character
pub fn truncate_line(line: &str) -> &str {
    if line.len() <= MAX_LINE {
        return line;
    }
    let mut end = MAX_LINE;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

/// Argument tokens following the command name
#[derive(Debug, Clone)]
pub struct Args<'a> {
    tokens: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    pub fn new(text: &'a str) -> Self {
        Args {
            tokens: text.split_whitespace(),
        }
    }

    /// Next raw token
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }

    /// Next token parsed as a number
    ///
    /// `None` when the token is missing or not a number. The token is consumed
    /// either way.
    pub fn next_parsed<T: FromStr>(&mut self) -> Option<T> {
        let token = self.tokens.next()?;
        match token.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Not a number: {:?}", token);
                None
            }
        }
    }

    /// Next number, or `default` when missing or unparsable
    pub fn next_or<T: FromStr>(&mut self, default: T) -> T {
        self.next_parsed().unwrap_or(default)
    }

    /// Next number clamped into the range of `T`, or `default` when missing
    /// or unparsable
    pub fn next_clamped<T>(&mut self, default: T) -> T
    where
        T: TryFrom<i64> + Bounded,
    {
        match self.next_parsed::<i64>() {
            Some(value) => {
                let value = value.clamp(T::MIN_I64, T::MAX_I64);
                T::try_from(value).unwrap_or(default)
            }
            None => default,
        }
    }

    /// Remaining tokens joined by single spaces
    pub fn rest(&mut self) -> String {
        self.tokens.by_ref().collect::<Vec<_>>().join(" ")
    }
}

/// Integer argument types with their bounds widened to `i64`
pub trait Bounded {
    const MIN_I64: i64;
    const MAX_I64: i64;
}

macro_rules! impl_bounded {
    ($($t:ty),*) => {
        $(impl Bounded for $t {
            const MIN_I64: i64 = <$t>::MIN as i64;
            const MAX_I64: i64 = <$t>::MAX as i64;
        })*
    };
}

impl_bounded!(u8, u16, u32, i16, i32);

/// One console line split into command name and arguments
#[derive(Debug, Clone)]
pub struct CommandLine<'a> {
    pub name: &'a str,
    pub args: Args<'a>,
}

impl<'a> CommandLine<'a> {
    /// `None` for blank lines
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = truncate_line(line).trim_start();
        let (name, rest) = match line.find(char::is_whitespace) {
            Some(split) => line.split_at(split),
            None => (line, ""),
        };
        if name.is_empty() {
            return None;
        }
        Some(CommandLine {
            name,
            args: Args::new(rest),
        })
    }
}

impl std::fmt::Display for CommandLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let args = self.args.clone().rest();
        if args.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, args)
        }
    }
}
