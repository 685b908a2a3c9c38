use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::coerce::{self, CoerceError};
use crate::dotenv::FallbackMap;
use crate::env::EnvLayer;
use crate::error::EnvbindError;
use crate::field::Field;
use crate::resolve;
use crate::template;
use crate::types::{Source, Sources};

/// Entry point for building an envbind loader.
pub struct Envbind;

impl Envbind {
    pub fn builder<C>() -> EnvbindBuilder<C> {
        EnvbindBuilder::new()
    }
}

/// Builder holding the field list and the sources to read from.
///
/// Loading never mutates the builder, so one builder can load any number of
/// targets.
pub struct EnvbindBuilder<C> {
    fields: Vec<Field<C>>,
    fallback_path: Option<PathBuf>,
    env: EnvLayer,
}

impl<C> EnvbindBuilder<C> {
    fn new() -> Self {
        Self {
            fields: Vec::new(),
            fallback_path: None,
            env: EnvLayer::Process,
        }
    }

    /// Declare a field. Fields are bound in declaration order.
    pub fn field(mut self, field: Field<C>) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare several fields at once.
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field<C>>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Read a fallback `.env` file on each load. Values from the live
    /// environment still take precedence; the file is never exported into it.
    pub fn fallback_path(mut self, path: impl AsRef<Path>) -> Self {
        self.fallback_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replace the process environment with a fixed set of variables.
    pub fn env_vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env = EnvLayer::from_vars(vars);
        self
    }

    /// Disable the environment layer entirely.
    pub fn no_env(mut self) -> Self {
        self.env = EnvLayer::Disabled;
        self
    }

    /// Bind every declared field into `target`.
    ///
    /// Stops at the first error. Fields bound before the failing one keep
    /// their new values.
    pub fn load_into(&self, target: &mut C) -> Result<(), EnvbindError> {
        self.bind(target).map(|_| ())
    }

    /// Like [`load_into`](Self::load_into), also reporting which layer
    /// supplied each field.
    pub fn load_with_sources(&self, target: &mut C) -> Result<Sources, EnvbindError> {
        self.bind(target)
    }

    /// Bind into a fresh `C::default()`.
    pub fn load(&self) -> Result<C, EnvbindError>
    where
        C: Default,
    {
        let mut target = C::default();
        self.bind(&mut target)?;
        Ok(target)
    }

    /// A `.env` example listing every declared field with its default.
    pub fn template(&self) -> String {
        template::render(&self.fields)
    }

    /// Reject descriptors the engine can never bind, before any I/O.
    fn check_fields(&self) -> Result<(), EnvbindError> {
        let mut seen = HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if field.key.is_empty() {
                return Err(EnvbindError::InvalidDescriptor {
                    index,
                    reason: "key is empty".into(),
                });
            }
            if !seen.insert(field.key.as_str()) {
                return Err(EnvbindError::InvalidDescriptor {
                    index,
                    reason: format!("key {} is declared more than once", field.key),
                });
            }
            if field.kind.check().is_err() {
                return Err(EnvbindError::UnsupportedKind {
                    key: field.key.clone(),
                    kind: field.kind.clone(),
                });
            }
        }
        Ok(())
    }

    fn bind(&self, target: &mut C) -> Result<Sources, EnvbindError> {
        self.check_fields()?;

        let fallback = match &self.fallback_path {
            Some(path) => Some(FallbackMap::load(path)?),
            None => None,
        };

        let mut sources = Sources::default();
        for field in &self.fields {
            let source = self.bind_field(field, target, fallback.as_ref())?;
            sources.entries.push((field.key.clone(), source));
        }
        Ok(sources)
    }

    fn bind_field(
        &self,
        field: &Field<C>,
        target: &mut C,
        fallback: Option<&FallbackMap>,
    ) -> Result<Option<Source>, EnvbindError> {
        let key = &field.key;
        let resolved = resolve::resolve(key, field.default.as_deref(), &self.env, fallback)?;

        let Some(resolved) = resolved else {
            if field.required {
                return Err(EnvbindError::MissingRequired { key: key.clone() });
            }
            trace!(key = %key, "no value, leaving field untouched");
            return Ok(None);
        };

        if field.required && resolved.raw.is_empty() && !field.allow_empty {
            return Err(EnvbindError::EmptyRequired { key: key.clone() });
        }

        let value = coerce::coerce(&resolved.raw, &field.kind).map_err(|e| match e {
            CoerceError::UnsupportedKind(kind) => EnvbindError::UnsupportedKind {
                key: key.clone(),
                kind,
            },
            source => EnvbindError::InvalidValue {
                key: key.clone(),
                source,
            },
        })?;

        (field.setter)(target, value).map_err(|_| EnvbindError::KindMismatch {
            key: key.clone(),
            kind: field.kind.clone(),
        })?;

        debug!(key = %key, source = %resolved.source, "bound field");
        Ok(Some(resolved.source))
    }
}
