//! 바인딩 값 — 모든 statement가 공유하는 positional 인자 타입
//!
//! `?` placeholder 순서대로 `Arg`가 쌓인다.

use std::fmt;

/// Positional bind value
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Null,
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Utf8(String),
    Boolean(bool),
}

impl Arg {
    /// SQL 리터럴 문자열로 변환 (진단 출력용)
    pub fn to_sql_literal(&self) -> String {
        match self {
            Arg::Null => "NULL".to_string(),
            Arg::Int32(v) => v.to_string(),
            Arg::Int64(v) => v.to_string(),
            Arg::Float64(v) => format!("{v}"),
            Arg::Utf8(v) => format!("'{}'", v.replace('\'', "''")),
            Arg::Boolean(v) => {
                if *v {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Null => write!(f, "NULL"),
            Arg::Int32(v) => write!(f, "{v}"),
            Arg::Int64(v) => write!(f, "{v}"),
            Arg::Float64(v) => write!(f, "{v}"),
            Arg::Utf8(v) => write!(f, "{v}"),
            Arg::Boolean(v) => write!(f, "{v}"),
        }
    }
}

/// 인자 변환 트레이트
pub trait IntoArg {
    fn into_arg(self) -> Arg;
}

impl IntoArg for Arg {
    fn into_arg(self) -> Arg {
        self
    }
}

impl IntoArg for i32 {
    fn into_arg(self) -> Arg {
        Arg::Int32(self)
    }
}

impl IntoArg for i64 {
    fn into_arg(self) -> Arg {
        Arg::Int64(self)
    }
}

impl IntoArg for f64 {
    fn into_arg(self) -> Arg {
        Arg::Float64(self)
    }
}

impl IntoArg for &str {
    fn into_arg(self) -> Arg {
        Arg::Utf8(self.to_string())
    }
}

impl IntoArg for String {
    fn into_arg(self) -> Arg {
        Arg::Utf8(self)
    }
}

impl IntoArg for bool {
    fn into_arg(self) -> Arg {
        Arg::Boolean(self)
    }
}

impl<T: IntoArg> IntoArg for Option<T> {
    fn into_arg(self) -> Arg {
        match self {
            Some(v) => v.into_arg(),
            None => Arg::Null,
        }
    }
}

/// Builds a `Vec<Arg>` from values of mixed types.
///
/// ```rust
/// use sqlweave_core::{Arg, args};
///
/// let values = args!["alice", 30, true];
/// assert_eq!(values[1], Arg::Int32(30));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::IntoArg::into_arg($value)),+]
    };
}

/// `?` placeholder를 리터럴로 치환
///
/// Placeholders inside quoted literals are left alone, as are placeholders
/// with no matching argument.
pub fn interpolate(sql: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut remaining = args.iter();
    let mut in_literal = false;

    for ch in sql.chars() {
        match ch {
            '\'' => {
                in_literal = !in_literal;
                out.push(ch);
            }
            '?' if !in_literal => match remaining.next() {
                Some(arg) => out.push_str(&arg.to_sql_literal()),
                None => out.push(ch),
            },
            _ => out.push(ch),
        }
    }
    out
}
