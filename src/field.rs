//! Field descriptors: what to look up, how to validate it, where to write it.
//!
//! A [`Field<C>`] pairs a key and its rules with a setter closure that writes
//! into a config struct `C`. The usual way to build one is [`Field::new`],
//! which derives the [`FieldKind`] from the setter's argument type:
//!
//! ```ignore
//! Field::new("PORT", |c: &mut AppConfig, v: i32| c.port = v).default("8080")
//! ```

use std::fmt;
use std::time::Duration;

use crate::types::{FieldKind, Value};

/// Writes a coerced value into the target. Hands the value back if its shape
/// is not what the field expects.
pub type Setter<C> = Box<dyn Fn(&mut C, Value) -> Result<(), Value> + Send + Sync>;

/// One bindable config field.
pub struct Field<C> {
    pub(crate) key: String,
    pub(crate) required: bool,
    pub(crate) allow_empty: bool,
    pub(crate) default: Option<String>,
    pub(crate) doc: Option<String>,
    pub(crate) kind: FieldKind,
    pub(crate) setter: Setter<C>,
}

impl<C> Field<C> {
    /// A field of type `T`, written by `set`.
    pub fn new<T, F>(key: &str, set: F) -> Self
    where
        C: 'static,
        T: Bind + 'static,
        F: Fn(&mut C, T) + Send + Sync + 'static,
    {
        Self::with_kind(key, T::kind(), move |target, value| {
            set(target, T::from_value(value)?);
            Ok(())
        })
    }

    /// A field with an explicit kind and a raw [`Value`] setter.
    pub fn with_kind<F>(key: &str, kind: FieldKind, set: F) -> Self
    where
        F: Fn(&mut C, Value) -> Result<(), Value> + Send + Sync + 'static,
    {
        Self {
            key: key.to_string(),
            required: false,
            allow_empty: false,
            default: None,
            doc: None,
            kind,
            setter: Box::new(set),
        }
    }

    /// Fail the load if no layer provides a value, or if the value is empty.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accept an explicitly empty value for a required field.
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// Literal used when neither the environment nor the fallback file has the key.
    pub fn default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    /// One-line description, emitted as a comment by
    /// [`template()`](crate::EnvbindBuilder::template).
    pub fn doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

impl<C> fmt::Debug for Field<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("required", &self.required)
            .field("allow_empty", &self.allow_empty)
            .field("default", &self.default)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Rust types a field can be bound to.
pub trait Bind: Sized {
    fn kind() -> FieldKind;

    /// Extract `Self` from a coerced value, or hand the value back.
    fn from_value(value: Value) -> Result<Self, Value>;
}

impl Bind for String {
    fn kind() -> FieldKind {
        FieldKind::String
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

macro_rules! bind_int {
    ($($t:ty),*) => {$(
        impl Bind for $t {
            fn kind() -> FieldKind {
                FieldKind::Int { bits: <$t>::BITS }
            }

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::Int(n) => <$t>::try_from(n).map_err(|_| Value::Int(n)),
                    other => Err(other),
                }
            }
        }
    )*};
}

bind_int!(i8, i16, i32, i64, isize);

impl Bind for bool {
    fn kind() -> FieldKind {
        FieldKind::Bool
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl Bind for Duration {
    fn kind() -> FieldKind {
        FieldKind::Duration
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Duration(d) => Ok(d),
            other => Err(other),
        }
    }
}

impl Bind for Vec<String> {
    fn kind() -> FieldKind {
        FieldKind::StringList
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::StringList(list) => Ok(list),
            other => Err(other),
        }
    }
}

impl<T: Bind> Bind for Option<T> {
    fn kind() -> FieldKind {
        FieldKind::Optional(Box::new(T::kind()))
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Some(inner) => T::from_value(*inner)
                .map(Some)
                .map_err(|v| Value::Some(Box::new(v))),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::TestConfig;

    #[test]
    fn kinds_follow_rust_types() {
        assert_eq!(String::kind(), FieldKind::String);
        assert_eq!(i8::kind(), FieldKind::Int { bits: 8 });
        assert_eq!(i32::kind(), FieldKind::Int { bits: 32 });
        assert_eq!(i64::kind(), FieldKind::Int { bits: 64 });
        assert_eq!(bool::kind(), FieldKind::Bool);
        assert_eq!(Duration::kind(), FieldKind::Duration);
        assert_eq!(<Vec<String>>::kind(), FieldKind::StringList);
        assert_eq!(
            <Option<i32>>::kind(),
            FieldKind::Optional(Box::new(FieldKind::Int { bits: 32 }))
        );
    }

    #[test]
    fn from_value_rejects_wrong_shape() {
        assert_eq!(bool::from_value(Value::Int(1)), Err(Value::Int(1)));
        assert_eq!(
            <Option<bool>>::from_value(Value::Bool(true)),
            Err(Value::Bool(true))
        );
        assert_eq!(i8::from_value(Value::Int(300)), Err(Value::Int(300)));
    }

    #[test]
    fn option_unwraps_some() {
        let value = Value::Some(Box::new(Value::Int(8080)));
        assert_eq!(<Option<i32>>::from_value(value), Ok(Some(8080)));
    }

    #[test]
    fn builder_methods_set_metadata() {
        let field = Field::new("PORT", |c: &mut TestConfig, v: i32| c.port = v)
            .required()
            .allow_empty()
            .default("8080")
            .doc("Listen port.");
        assert_eq!(field.key(), "PORT");
        assert_eq!(field.kind(), &FieldKind::Int { bits: 32 });
        assert!(field.is_required());
        assert!(field.allow_empty);
        assert_eq!(field.default_value(), Some("8080"));
        assert_eq!(field.doc.as_deref(), Some("Listen port."));
    }

    #[test]
    fn typed_setter_writes_target() {
        let field = Field::new("HOST", |c: &mut TestConfig, v: String| c.host = v);
        let mut config = TestConfig::default();
        (field.setter)(&mut config, Value::String("db.local".into())).unwrap();
        assert_eq!(config.host, "db.local");
    }

    #[test]
    fn typed_setter_hands_back_mismatch() {
        let field = Field::new("HOST", |c: &mut TestConfig, v: String| c.host = v);
        let mut config = TestConfig::default();
        let rejected = (field.setter)(&mut config, Value::Bool(true));
        assert_eq!(rejected, Err(Value::Bool(true)));
        assert_eq!(config.host, "");
    }

    #[test]
    fn debug_omits_setter() {
        let field = Field::new("DEBUG", |c: &mut TestConfig, v: bool| c.debug = v);
        let debug = format!("{field:?}");
        assert!(debug.contains("DEBUG"));
        assert!(debug.contains(".."));
    }
}
