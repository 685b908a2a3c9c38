//! Bind environment variables onto typed config structs. Declare the fields,
//! optionally point at a `.env` file, and load.
//!
//! ```ignore
//! #[derive(Default)]
//! struct AppConfig {
//!     host: String,
//!     port: i32,
//!     timeout: Duration,
//!     token: Option<String>,
//! }
//!
//! let config: AppConfig = Envbind::builder()
//!     .field(Field::new("HOST", |c: &mut AppConfig, v: String| c.host = v).required())
//!     .field(Field::new("PORT", |c: &mut AppConfig, v: i32| c.port = v).default("8080"))
//!     .field(Field::new("TIMEOUT", |c: &mut AppConfig, v: Duration| c.timeout = v).default("5s"))
//!     .field(Field::new("TOKEN", |c: &mut AppConfig, v: Option<String>| c.token = v))
//!     .fallback_path(".env")
//!     .load()?;
//! ```
//!
//! # Fields, not reflection
//!
//! Each [`Field`] names its key, its rules, and a setter closure that writes
//! into the target struct. The closure's argument type picks the conversion
//! (see [`Bind`]):
//!
//! | Rust type | Accepted input |
//! |-----------|----------------|
//! | `String` | anything, verbatim |
//! | `i8` `i16` `i32` `i64` `isize` | base-10 integer that fits the width |
//! | `bool` | `1 t T true TRUE True`, `0 f F false FALSE False` |
//! | `Duration` | `300ms`, `5s`, `1h30m`, `1.5h` |
//! | `Vec<String>` | comma-separated, each item trimmed |
//! | `Option<T>` | as `T`; stays untouched when nothing resolves |
//!
//! [`Field::with_kind`] takes an explicit [`FieldKind`] and a raw [`Value`]
//! setter for cases the typed form doesn't cover.
//!
//! # Layer precedence
//!
//! ```text
//! Declared default      .default("...")
//!        ↑ overridden by
//! Fallback file         .fallback_path(".env")
//!        ↑ overridden by
//! Environment           process env
//! ```
//!
//! A variable that is **set** wins even when it is empty: `PORT=` in the
//! environment hides both the file and the default. Whether an empty value is
//! acceptable is then up to the field: required fields reject it unless
//! marked [`allow_empty()`](Field::allow_empty).
//!
//! The fallback file is read into memory for the duration of a load. It is
//! never exported into the process environment.
//!
//! # Fallback file format
//!
//! See the [`dotenv`] module: `KEY=value` lines, `#` comments (full-line and
//! inline), an optional `export ` prefix, and one layer of `'` or `"` quotes.
//!
//! # Errors
//!
//! Loading is fail-fast: the first problem is returned as an
//! [`EnvbindError`] and fields bound before it keep their values.
//! [`EnvbindError::kind()`] sorts errors into file, parse, validation,
//! coercion and type problems. Descriptor problems (empty key, unsupported
//! kind) are caught before the fallback file is read or any field is written.
//!
//! With the `rich-errors` feature, `EnvbindError` implements
//! `miette::Diagnostic`.
//!
//! # Templates
//!
//! [`EnvbindBuilder::template()`] renders a `.env` example from the declared
//! fields, with doc lines, required markers and defaults.

pub mod dotenv;
pub mod error;
pub mod types;

mod builder;
mod coerce;
mod duration;
mod env;
mod field;
mod resolve;
mod template;

#[cfg(test)]
mod fixtures;

pub use builder::{Envbind, EnvbindBuilder};
pub use coerce::CoerceError;
pub use dotenv::FallbackMap;
pub use duration::DurationError;
pub use error::{EnvbindError, ErrorKind};
pub use field::{Bind, Field, Setter};
pub use types::{FieldKind, Source, Sources, Value};
