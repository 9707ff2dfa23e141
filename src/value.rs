use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt::Write as _;

use serde::Serialize;
use serde_json::json;

use crate::error::LoggerError;

/// A single argument passed to an emission call.
///
/// The set is closed: primitives render unchanged, errors render as their
/// stack text and anything else renders as pretty-printed JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    /// An error captured with its message and full stack text.
    Error { message: String, stack: String },
    Structured(serde_json::Value),
}

impl Value {
    /// Captures an error, its `source()` chain and, when enabled through
    /// `RUST_BACKTRACE`, a backtrace.
    ///
    /// # Examples
    ///
    /// ```
    /// # use banana_logger::Value;
    /// let err = std::io::Error::other("disk on fire");
    /// let value = Value::error(&err);
    /// assert!(value.render_text().starts_with("Error: disk on fire"));
    /// ```
    pub fn error(err: &(dyn StdError + 'static)) -> Self {
        let message = err.to_string();
        let mut stack = format!("Error: {message}");

        let mut source = err.source();
        while let Some(cause) = source {
            let _ = write!(stack, "\n    caused by: {cause}");
            source = cause.source();
        }

        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            let _ = write!(stack, "\n{backtrace}");
        }

        Value::Error { message, stack }
    }

    /// Serializes any `Serialize` type into a value.
    ///
    /// Strings, numbers and booleans collapse to their primitive variants,
    /// everything else becomes [`Value::Structured`].
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Result<Self, LoggerError> {
        Ok(Value::from(serde_json::to_value(value)?))
    }

    /// Text form used in rendered lines.
    pub fn render_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            // floats print like `f64`'s Display: 3.0 as `3`
            Value::Number(n) => match n.as_f64().filter(|_| n.is_f64()) {
                Some(f) => f.to_string(),
                None => n.to_string(),
            },
            Value::Bool(b) => b.to_string(),
            Value::Error { stack, .. } => stack.clone(),
            Value::Structured(v) => {
                serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
            }
        }
    }

    /// JSON form used in JSON file records.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Error { message, stack } => json!({ "error": message, "stack": stack }),
            Value::Structured(v) => v.clone(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(serde_json::Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        // NaN and infinities have no JSON number form
        match serde_json::Number::from_f64(n) {
            Some(n) => Value::Number(n),
            None => Value::Text(n.to_string()),
        }
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::from(f64::from(n))
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::Bool(b) => Value::Bool(b),
            other => Value::Structured(other),
        }
    }
}

/// Builds a `Vec<Value>` from heterogeneous arguments.
///
/// ```
/// # use banana_logger::{values, Value};
/// let args = values!["user", 42, true, serde_json::json!({ "id": 7 })];
/// assert_eq!(args.len(), 4);
/// assert_eq!(args[1], Value::from(42));
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
