use crate::http::*;

/// A resolved BEA API key.
///
/// The key is an explicit value with a caller-owned lifecycle: load it, pass
/// it into each call, drop it. No module-level key state.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap an already-resolved key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the key from the environment (a `.env` file is honored),
    /// rejecting empty values.
    pub fn from_env(name: &str) -> anyhow::Result<Self> {
        let key = var(name).map_err(|_| anyhow::anyhow!("environment variable {name} not set"))?;
        if key.is_empty() {
            anyhow::bail!("environment variable {name} is empty");
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// keep the key itself out of trace output
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(..)")
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ApiKey;

    #[test]
    fn from_env_reads_the_variable() {
        std::env::set_var("BEA_API_TEST_SET", "KEY123");
        let key = ApiKey::from_env("BEA_API_TEST_SET").unwrap();
        assert_eq!(key.as_str(), "KEY123");
    }

    #[test]
    fn from_env_rejects_missing_and_empty() {
        std::env::remove_var("BEA_API_TEST_MISSING");
        assert!(ApiKey::from_env("BEA_API_TEST_MISSING").is_err());

        std::env::set_var("BEA_API_TEST_EMPTY", "");
        assert!(ApiKey::from_env("BEA_API_TEST_EMPTY").is_err());
    }

    #[test]
    fn debug_redacts_the_key() {
        let key = ApiKey::new("KEY123");
        assert_eq!(format!("{key:?}"), "ApiKey(..)");
    }
}
