// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros for reducing boilerplate.
//!
//! - [`params!`]: build an invocation parameter list from mixed values
//! - [`simple_display!`]: `Display` impl mapping enum variants to string literals

/// Build a `Vec<Param>` from heterogeneous values.
///
/// Each element goes through `Param::from`, so strings, string arrays,
/// [`SpawnOptions`](crate::SpawnOptions) and `serde_json::Value`s can be
/// mixed freely:
///
/// ```
/// use ezspawn::{params, Param, SpawnOptions};
///
/// let p = params!["ls", ["-l", "-a"], SpawnOptions::new().cwd("/tmp")];
/// assert_eq!(p.len(), 3);
/// assert!(matches!(p[1], Param::List(_)));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Param>::new()
    };
    ($($param:expr),+ $(,)?) => {
        ::std::vec![$($crate::Param::from($param)),+]
    };
}

/// Generate a `Display` impl that maps enum variants to string literals.
///
/// Unit variants match directly; data-carrying variants use `(..)` to ignore fields.
///
/// ```ignore
/// crate::simple_display! {
///     MyEnum {
///         Foo => "foo",
///         Bar(..) => "bar",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident $(( $($ignore:tt)* ))? => $str:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant $(( $($ignore)* ))? => $str, )+
                })
            }
        }
    };
}
