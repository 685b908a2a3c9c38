//! Value resolution: pick a field's raw string from the highest layer that has it.
//!
//! ```text
//! Declared default      Field::default(...)
//!        ↑ overridden by
//! Fallback file         .fallback_path(...)
//!        ↑ overridden by
//! Environment           live process env (or .env_vars(...))
//! ```
//!
//! Presence, not content, decides: a variable set to the empty string beats
//! both the fallback file and the default.

use crate::dotenv::FallbackMap;
use crate::env::EnvLayer;
use crate::error::EnvbindError;
use crate::types::Source;

/// A raw value and the layer it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub raw: String,
    pub source: Source,
}

/// Resolve `key` through env → fallback → default. `Ok(None)` means absent.
pub fn resolve(
    key: &str,
    default: Option<&str>,
    env: &EnvLayer,
    fallback: Option<&FallbackMap>,
) -> Result<Option<Resolved>, EnvbindError> {
    let from_env = env.lookup(key).map_err(|source| EnvbindError::InvalidValue {
        key: key.to_string(),
        source,
    })?;
    if let Some(raw) = from_env {
        return Ok(Some(Resolved {
            raw,
            source: Source::Env,
        }));
    }

    if let Some(raw) = fallback.and_then(|map| map.get(key)) {
        return Ok(Some(Resolved {
            raw: raw.to_string(),
            source: Source::Fallback,
        }));
    }

    Ok(default.map(|raw| Resolved {
        raw: raw.to_string(),
        source: Source::Default,
    }))
}
