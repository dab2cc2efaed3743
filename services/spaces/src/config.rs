use crate::constants::*;
use crate::Credential;
use spacesign_core::utils::Redact;
use spacesign_core::{Context, Error, Result, SigningCredential};
use std::fmt::{Debug, Formatter};

/// Config carries all the configuration for a spaces client.
///
/// Every field is read once when the client is built, there is no runtime
/// reconfiguration.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SPACES_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SPACES_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `endpoint` is the provider host without scheme, like `digitaloceanspaces.com`.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SPACES_ENDPOINT`]
    /// - default to [`DEFAULT_ENDPOINT`]
    pub endpoint: Option<String>,
    /// `region` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SPACES_REGION`]
    /// - default to [`DEFAULT_REGION`]
    pub region: Option<String>,
    /// `space` is the default bucket used by object listing.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SPACES_SPACE`]
    pub space: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("space", &self.space)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Values already set on the config are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(SPACES_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SPACES_SECRET_ACCESS_KEY) {
            self.secret_access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SPACES_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SPACES_REGION) {
            self.region.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SPACES_SPACE) {
            self.space.get_or_insert(v);
        }

        self
    }

    /// Region the client signs for.
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// Provider host the bucket and region are prefixed to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Build the credential from this config.
    pub fn credential(&self) -> Result<Credential> {
        let (Some(ak), Some(sk)) = (&self.access_key_id, &self.secret_access_key) else {
            return Err(Error::config_invalid(
                "access_key_id and secret_access_key are required",
            ));
        };

        let cred = Credential::new(ak, sk);
        if !cred.is_valid() {
            return Err(Error::config_invalid(
                "access_key_id and secret_access_key must not be empty",
            ));
        }
        Ok(cred)
    }

    /// Check that region, endpoint and space can be used as host labels as is.
    ///
    /// They are never rewritten, because the signed host must be exactly the
    /// host the request is sent to.
    pub fn validate(&self) -> Result<()> {
        validate_host_part("region", self.region())?;
        validate_host_part("endpoint", self.endpoint())?;
        if let Some(space) = &self.space {
            validate_host_part("space", space)?;
        }
        Ok(())
    }
}

/// Whether `v` can be placed into a host name as is.
///
/// Only lowercase letters, digits, `-` and `.` are allowed, and `.` can't
/// lead or trail.
pub(crate) fn is_host_part(v: &str) -> bool {
    !v.is_empty()
        && !v.starts_with('.')
        && !v.ends_with('.')
        && v
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
}

fn validate_host_part(field: &str, v: &str) -> Result<()> {
    if !is_host_part(v) {
        return Err(Error::config_invalid(format!(
            "{field} {v:?} is not a valid lowercase host name part"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacesign_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;
    use test_case::test_case;

    fn env_ctx(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();

        assert_eq!(cfg.region(), "nyc3");
        assert_eq!(cfg.endpoint(), "digitaloceanspaces.com");
        assert!(cfg.space.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_from_env() {
        let ctx = env_ctx(&[
            (SPACES_ACCESS_KEY_ID, "env_ak"),
            (SPACES_SECRET_ACCESS_KEY, "env_sk"),
            (SPACES_REGION, "ams3"),
            (SPACES_SPACE, "photos"),
        ]);

        let cfg = Config::default().from_env(&ctx);

        assert_eq!(cfg.access_key_id.as_deref(), Some("env_ak"));
        assert_eq!(cfg.secret_access_key.as_deref(), Some("env_sk"));
        assert_eq!(cfg.region(), "ams3");
        assert_eq!(cfg.endpoint(), "digitaloceanspaces.com");
        assert_eq!(cfg.space.as_deref(), Some("photos"));
    }

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let ctx = env_ctx(&[(SPACES_REGION, "ams3"), (SPACES_ACCESS_KEY_ID, "env_ak")]);

        let cfg = Config {
            region: Some("sfo3".to_string()),
            ..Default::default()
        }
        .from_env(&ctx);

        assert_eq!(cfg.region(), "sfo3");
        assert_eq!(cfg.access_key_id.as_deref(), Some("env_ak"));
    }

    #[test]
    fn test_credential_requires_both_keys() {
        let cfg = Config {
            access_key_id: Some("ak".to_string()),
            ..Default::default()
        };
        let err = cfg.credential().expect_err("secret is missing");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let cfg = Config {
            access_key_id: Some("ak".to_string()),
            secret_access_key: Some(String::new()),
            ..Default::default()
        };
        let err = cfg.credential().expect_err("secret is empty");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test_case("https://digitaloceanspaces.com"; "scheme")]
    #[test_case("digitaloceanspaces.com/"; "trailing slash")]
    #[test_case("DigitalOceanSpaces.com"; "uppercase")]
    #[test_case(""; "empty")]
    fn test_invalid_endpoint(endpoint: &str) {
        let cfg = Config {
            endpoint: Some(endpoint.to_string()),
            ..Default::default()
        };
        let err = cfg.validate().expect_err("endpoint must be rejected");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_debug_is_redacted() {
        let cfg = Config {
            access_key_id: Some("AKIDEXAMPLE".to_string()),
            secret_access_key: Some("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY".to_string()),
            ..Default::default()
        };
        let s = format!("{cfg:?}");

        assert!(!s.contains("AKIDEXAMPLE"));
        assert!(!s.contains("bPxRfiCYEXAMPLE"));
    }
}
