use std::collections::HashMap;
use std::env::VarError;

use crate::coerce::CoerceError;

/// Where environment lookups go.
///
/// The process environment is only ever read, never written.
#[derive(Debug, Clone, Default)]
pub enum EnvLayer {
    /// Read `std::env` at lookup time.
    #[default]
    Process,
    /// A fixed set of variables, for tests and embedded use.
    Vars(HashMap<String, String>),
    /// No environment layer at all.
    Disabled,
}

impl EnvLayer {
    /// Build a synthetic layer from `(name, value)` pairs. Later pairs win.
    ///
    /// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        EnvLayer::Vars(vars.into_iter().collect())
    }

    /// Look up `key`. A variable that is set to the empty string is `Some("")`.
    pub fn lookup(&self, key: &str) -> Result<Option<String>, CoerceError> {
        match self {
            EnvLayer::Process => match std::env::var(key) {
                Ok(value) => Ok(Some(value)),
                Err(VarError::NotPresent) => Ok(None),
                Err(VarError::NotUnicode(_)) => Err(CoerceError::NotUnicode),
            },
            EnvLayer::Vars(vars) => Ok(vars.get(key).cloned()),
            EnvLayer::Disabled => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> EnvLayer {
        EnvLayer::from_vars(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    #[test]
    fn synthetic_lookup() {
        let env = vars(&[("HOST", "0.0.0.0"), ("EMPTY", "")]);
        assert_eq!(env.lookup("HOST").unwrap().as_deref(), Some("0.0.0.0"));
        assert_eq!(env.lookup("EMPTY").unwrap().as_deref(), Some(""));
        assert_eq!(env.lookup("MISSING").unwrap(), None);
    }

    #[test]
    fn synthetic_later_pair_wins() {
        let env = vars(&[("PORT", "1"), ("PORT", "2")]);
        assert_eq!(env.lookup("PORT").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn disabled_sees_nothing() {
        assert_eq!(EnvLayer::Disabled.lookup("PATH").unwrap(), None);
    }

    #[test]
    fn process_reads_live_environment() {
        // SAFETY: unique key, not read by any other test.
        unsafe { std::env::set_var("ENVBIND_TEST_ENV_LAYER_LIVE", "live") };
        assert_eq!(
            EnvLayer::Process
                .lookup("ENVBIND_TEST_ENV_LAYER_LIVE")
                .unwrap()
                .as_deref(),
            Some("live")
        );
        assert_eq!(
            EnvLayer::Process
                .lookup("ENVBIND_TEST_ENV_LAYER_NEVER_SET")
                .unwrap(),
            None
        );
    }

    #[cfg(unix)]
    #[test]
    fn process_non_unicode_is_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        // SAFETY: unique key, not read by any other test.
        unsafe {
            std::env::set_var(
                "ENVBIND_TEST_ENV_LAYER_BYTES",
                OsStr::from_bytes(&[0x66, 0x6f, 0xff]),
            )
        };
        assert_eq!(
            EnvLayer::Process.lookup("ENVBIND_TEST_ENV_LAYER_BYTES"),
            Err(CoerceError::NotUnicode)
        );
    }
}
