use std::str::FromStr;

use crate::{Result, SegtreeError};

/// One line of a `segtree` session
///
/// ```text
/// query LO HI
/// update LO HI FN ARG
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<U> {
    Query { lo: usize, hi: usize },
    Update { lo: usize, hi: usize, transform: U },
}

/// A pointwise function applied by `update`
pub trait Transform: Sized {
    type Elem;

    /// Parse `FN ARG` from an update line.
    fn parse(name: &str, arg: &str) -> Result<Self>;

    fn apply(&self, value: &Self::Elem) -> Self::Elem;
}

/// Transforms over integer elements; arithmetic wraps on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntTransform {
    Add(i64),
    Mul(i64),
    Set(i64),
}

/// Transforms over string elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTransform {
    Append(String),
    Prepend(String),
    Set(String),
}

impl Transform for IntTransform {
    type Elem = i64;

    fn parse(name: &str, arg: &str) -> Result<Self> {
        let make: fn(i64) -> Self = match name {
            "add" => IntTransform::Add,
            "mul" => IntTransform::Mul,
            "set" => IntTransform::Set,
            _ => return Err(unknown_transform(name)),
        };
        let n = arg
            .parse::<i64>()
            .map_err(|_| SegtreeError::InvalidCommand(format!("invalid integer `{}`", arg)))?;
        Ok(make(n))
    }

    fn apply(&self, value: &i64) -> i64 {
        match *self {
            IntTransform::Add(n) => value.wrapping_add(n),
            IntTransform::Mul(n) => value.wrapping_mul(n),
            IntTransform::Set(n) => n,
        }
    }
}

impl Transform for TextTransform {
    type Elem = String;

    fn parse(name: &str, arg: &str) -> Result<Self> {
        let make: fn(String) -> Self = match name {
            "append" => TextTransform::Append,
            "prepend" => TextTransform::Prepend,
            "set" => TextTransform::Set,
            _ => return Err(unknown_transform(name)),
        };
        // 带引号的参数按 JSON 字符串解析，可以表示空格和空串
        let s = if arg.starts_with('"') {
            serde_json::from_str::<String>(arg)?
        } else {
            arg.to_owned()
        };
        Ok(make(s))
    }

    fn apply(&self, value: &String) -> String {
        match self {
            TextTransform::Append(s) => format!("{}{}", value, s),
            TextTransform::Prepend(s) => format!("{}{}", s, value),
            TextTransform::Set(s) => s.clone(),
        }
    }
}

fn unknown_transform(name: &str) -> SegtreeError {
    SegtreeError::InvalidCommand(format!("unknown function `{}`", name))
}

/// Split the first whitespace-delimited token off `s`, returning it with the untouched rest.
fn next_token(s: &str) -> (Option<&str>, &str) {
    let s = s.trim_start();
    if s.is_empty() {
        return (None, s);
    }
    match s.find(char::is_whitespace) {
        Some(i) => (Some(&s[..i]), &s[i..]),
        None => (Some(s), ""),
    }
}

fn index(token: Option<&str>) -> Result<usize> {
    let token =
        token.ok_or_else(|| SegtreeError::InvalidCommand("missing range bound".to_owned()))?;
    token
        .parse()
        .map_err(|_| SegtreeError::InvalidCommand(format!("invalid index `{}`", token)))
}

fn range(rest: &str) -> Result<(usize, usize, &str)> {
    let (lo, rest) = next_token(rest);
    let lo = index(lo)?;
    let (hi, rest) = next_token(rest);
    let hi = index(hi)?;
    Ok((lo, hi, rest))
}

impl<U: Transform> FromStr for Command<U> {
    type Err = SegtreeError;

    fn from_str(line: &str) -> Result<Self> {
        match next_token(line) {
            (Some("query"), rest) => {
                let (lo, hi, rest) = range(rest)?;
                if let (Some(extra), _) = next_token(rest) {
                    return Err(SegtreeError::InvalidCommand(format!(
                        "unexpected `{}` after query",
                        extra
                    )));
                }
                Ok(Command::Query { lo, hi })
            }
            (Some("update"), rest) => {
                let (lo, hi, rest) = range(rest)?;
                let (name, rest) = next_token(rest);
                let name = name.ok_or_else(|| {
                    SegtreeError::InvalidCommand("missing update function".to_owned())
                })?;
                // 参数是整行剩下的部分，保留中间的空白
                let arg = rest.trim();
                if arg.is_empty() {
                    return Err(SegtreeError::InvalidCommand(format!(
                        "missing argument for `{}`",
                        name
                    )));
                }
                let transform = U::parse(name, arg)?;
                Ok(Command::Update { lo, hi, transform })
            }
            (Some(other), _) => Err(SegtreeError::InvalidCommand(format!(
                "unknown command `{}`",
                other
            ))),
            (None, _) => Err(SegtreeError::InvalidCommand("empty line".to_owned())),
        }
    }
}
