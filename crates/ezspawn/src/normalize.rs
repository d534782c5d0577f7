// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turning loosely-shaped invocation parameters into one canonical
//! `(command, args, options)` triple.
//!
//! Accepted shapes:
//!
//! | params                          | shape                   |
//! |---------------------------------|-------------------------|
//! | `"cmd a b"`                     | [`Shape::Combined`]     |
//! | `"cmd", "a b"`                  | [`Shape::CommandWithArgString`] |
//! | `"cmd", ["a", "b"]`             | [`Shape::CommandWithArgList`]   |
//! | `"cmd", "a", "b"`               | [`Shape::Variadic`]     |
//! | `["cmd", "a"], "b"`             | [`Shape::Argv`]         |
//!
//! Any of them may be followed by an options value.

use serde_json::{Map, Number, Value};

use crate::error::{NormalizeError, NormalizeErrorKind};
use crate::options::SpawnOptions;
use crate::tokenize;

/// One dynamically-typed invocation parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Str(String),
    List(Vec<Param>),
    Options(SpawnOptions),
    /// A JSON object; deserialized into [`SpawnOptions`] in options position.
    Object(Map<String, Value>),
    Number(Number),
    Bool(bool),
    Null,
}

impl Param {
    /// Name used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Param::Str(_) => "String",
            Param::List(_) => "Array",
            Param::Options(_) | Param::Object(_) => "Object",
            Param::Number(_) => "Number",
            Param::Bool(_) => "Boolean",
            Param::Null => "Null",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Param::Str(s) => Some(s),
            _ => None,
        }
    }

    /// JSON view of the parameter.
    pub fn to_json(&self) -> Value {
        match self {
            Param::Str(s) => Value::String(s.clone()),
            Param::List(items) => Value::Array(items.iter().map(Param::to_json).collect()),
            Param::Options(options) => serde_json::to_value(options).unwrap_or(Value::Null),
            Param::Object(map) => Value::Object(map.clone()),
            Param::Number(n) => Value::Number(n.clone()),
            Param::Bool(b) => Value::Bool(*b),
            Param::Null => Value::Null,
        }
    }

    /// Strings as-is, everything else as compact JSON.
    fn render(&self) -> String {
        match self {
            Param::Str(s) => s.clone(),
            other => other.to_json().to_string(),
        }
    }

    fn is_options(&self) -> bool {
        matches!(self, Param::Options(_) | Param::Object(_))
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Str(s.to_string())
    }
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Param::Str(s)
    }
}

impl From<&String> for Param {
    fn from(s: &String) -> Self {
        Param::Str(s.clone())
    }
}

impl From<SpawnOptions> for Param {
    fn from(options: SpawnOptions) -> Self {
        Param::Options(options)
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Param::Str(s),
            Value::Array(items) => Param::List(items.into_iter().map(Param::from).collect()),
            Value::Object(map) => Param::Object(map),
            Value::Number(n) => Param::Number(n),
            Value::Bool(b) => Param::Bool(b),
            Value::Null => Param::Null,
        }
    }
}

impl<T: Into<Param>> From<Vec<T>> for Param {
    fn from(items: Vec<T>) -> Self {
        Param::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Param>, const N: usize> From<[T; N]> for Param {
    fn from(items: [T; N]) -> Self {
        Param::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Param>> From<&[T]> for Param {
    fn from(items: &[T]) -> Self {
        Param::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::Null, Into::into)
    }
}

impl From<bool> for Param {
    fn from(b: bool) -> Self {
        Param::Bool(b)
    }
}

macro_rules! number_param {
    ($($ty:ty),+) => {
        $(impl From<$ty> for Param {
            fn from(n: $ty) -> Self {
                Param::Number(Number::from(n))
            }
        })+
    };
}

number_param!(i32, i64, u32, u64, usize);

impl From<f64> for Param {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Param::Null, Param::Number)
    }
}

/// Everything a runner accepts as its first argument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvocationSpec(pub Vec<Param>);

impl From<&str> for InvocationSpec {
    fn from(line: &str) -> Self {
        InvocationSpec(vec![Param::from(line)])
    }
}

impl From<String> for InvocationSpec {
    fn from(line: String) -> Self {
        InvocationSpec(vec![Param::Str(line)])
    }
}

impl From<&String> for InvocationSpec {
    fn from(line: &String) -> Self {
        InvocationSpec(vec![Param::from(line)])
    }
}

impl From<Vec<Param>> for InvocationSpec {
    fn from(params: Vec<Param>) -> Self {
        InvocationSpec(params)
    }
}

/// Canonical, validated invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
    pub options: SpawnOptions,
}

/// How the command and arguments were given.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// One string holding the command and its arguments.
    Combined(String),
    /// A command string plus one string of arguments. Only the arguments
    /// are tokenized.
    CommandWithArgString { command: String, args: String },
    /// A command string plus a list of arguments.
    CommandWithArgList { command: String, args: Vec<Param> },
    /// A command string followed by arguments as separate params.
    Variadic { command: String, args: Vec<Param> },
    /// An argv list, optionally followed by more arguments.
    Argv(Vec<Param>),
}

impl Shape {
    /// Classify params whose trailing options were already removed.
    pub fn detect(params: Vec<Param>) -> Result<Shape, NormalizeErrorKind> {
        let mut params = params.into_iter();
        let first = params.next().ok_or(NormalizeErrorKind::MissingCommand)?;
        let mut rest: Vec<Param> = params.collect();

        match first {
            Param::Str(command) => {
                if rest.is_empty() {
                    return Ok(Shape::Combined(command));
                }
                if rest.len() == 1 {
                    match rest.pop() {
                        Some(Param::Str(args)) => {
                            return Ok(Shape::CommandWithArgString { command, args })
                        }
                        Some(Param::List(args)) => {
                            return Ok(Shape::CommandWithArgList { command, args })
                        }
                        Some(other) => rest.push(other),
                        None => {}
                    }
                }
                Ok(Shape::Variadic { command, args: rest })
            }
            Param::List(mut argv) => {
                argv.extend(rest);
                Ok(Shape::Argv(argv))
            }
            other => Err(NormalizeErrorKind::CommandNotString { type_name: other.type_name() }),
        }
    }

    /// Resolve to a command and string arguments.
    pub fn parse(self) -> Result<(String, Vec<String>), NormalizeErrorKind> {
        let (command, args) = match self {
            Shape::Combined(line) => split_line(&line)?,
            Shape::CommandWithArgString { command, args } => (command, tokenize::split(&args)),
            Shape::CommandWithArgList { command, args } | Shape::Variadic { command, args } => {
                (command, strings(args)?)
            }
            Shape::Argv(argv) => {
                let mut argv = argv.into_iter();
                let command = match argv.next() {
                    Some(Param::Str(command)) => command,
                    Some(other) => {
                        return Err(NormalizeErrorKind::CommandNotString {
                            type_name: other.type_name(),
                        })
                    }
                    None => return Err(NormalizeErrorKind::MissingCommand),
                };
                (command, strings(argv)?)
            }
        };
        if command.trim().is_empty() {
            return Err(NormalizeErrorKind::MissingCommand);
        }
        Ok((command, args))
    }
}

fn split_line(line: &str) -> Result<(String, Vec<String>), NormalizeErrorKind> {
    let mut words = tokenize::split(line).into_iter();
    let command = words.next().ok_or(NormalizeErrorKind::MissingCommand)?;
    Ok((command, words.collect()))
}

/// Require every param to be a string. Positions are 1-based.
fn strings(params: impl IntoIterator<Item = Param>) -> Result<Vec<String>, NormalizeErrorKind> {
    params
        .into_iter()
        .enumerate()
        .map(|(i, param)| match param {
            Param::Str(s) => Ok(s),
            other => Err(NormalizeErrorKind::ArgNotString {
                position: i + 1,
                type_name: other.type_name(),
            }),
        })
        .collect()
}

/// Split off a trailing options param, if there is one.
fn take_options(params: &mut Vec<Param>) -> Result<SpawnOptions, NormalizeErrorKind> {
    if params.len() < 2 || !params.last().is_some_and(Param::is_options) {
        return Ok(SpawnOptions::default());
    }
    match params.pop() {
        Some(Param::Options(options)) => Ok(options),
        Some(Param::Object(map)) => SpawnOptions::from_json(Value::Object(map))
            .map_err(|e| NormalizeErrorKind::InvalidOptions { message: e.to_string() }),
        _ => Ok(SpawnOptions::default()),
    }
}

/// Best-effort `(command, args)` for an error report.
fn describe(params: &[Param]) -> (String, Vec<String>) {
    let mut parts: Vec<&Param> = Vec::new();
    for (i, param) in params.iter().enumerate() {
        match param {
            Param::List(items) if i == 0 => parts.extend(items),
            other => parts.push(other),
        }
    }
    let mut rendered = parts.into_iter().map(Param::render);
    let command = rendered.next().unwrap_or_default();
    (command, rendered.collect())
}

/// Normalize invocation parameters. Options pass through uninterpreted.
pub fn normalize(spec: impl Into<InvocationSpec>) -> Result<Invocation, NormalizeError> {
    let InvocationSpec(mut params) = spec.into();

    let resolved = take_options(&mut params).and_then(|options| {
        let (command, args) = Shape::detect(params.clone())?.parse()?;
        Ok(Invocation { command, args, options })
    });

    resolved.map_err(|kind| {
        let (command, args) = describe(&params);
        let error = NormalizeError { kind, command, args };
        tracing::debug!(error = %error, command = %error.command, "invalid spawn parameters");
        error
    })
}

#[cfg(test)]
#[path = "normalize_tests/mod.rs"]
mod tests;
