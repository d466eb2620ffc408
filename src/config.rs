//! Validation policy shared by every model constructor.

use phonenumber::country;

const DEFAULT_MAX_LINE_LEN: usize = 256;
const DEFAULT_MAX_BODY_LEN: usize = 10_000;
const DEFAULT_LOGO_SCHEMES: [&str; 2] = ["http", "https"];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Tunable limits applied on top of the fixed invariants.
///
/// [`ModelConfig::default`] is what the plain `validate`/`create` functions use.
pub struct ModelConfig {
    phone_region: Option<country::Id>,
    max_line_len: usize,
    max_body_len: usize,
    logo_schemes: Vec<String>,
}

impl ModelConfig {
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::new()
    }

    /// Region every phone number must be dialable in, if strict checking is on.
    pub fn phone_region(&self) -> Option<country::Id> {
        self.phone_region
    }

    /// Upper bound, in characters, for single-line text fields.
    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    /// Upper bound, in characters, for message bodies and FAQ answers.
    pub fn max_body_len(&self) -> usize {
        self.max_body_len
    }

    pub fn allows_logo_scheme(&self, scheme: &str) -> bool {
        self.logo_schemes
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfigBuilder::new().build()
    }
}

#[derive(Debug, Clone)]
/// Builder for [`ModelConfig`].
pub struct ModelConfigBuilder {
    phone_region: Option<country::Id>,
    max_line_len: usize,
    max_body_len: usize,
    logo_schemes: Vec<String>,
}

impl ModelConfigBuilder {
    /// Start from the defaults: no region check, 256/10 000 character limits,
    /// `http` and `https` logo URLs.
    pub fn new() -> Self {
        Self {
            phone_region: None,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            max_body_len: DEFAULT_MAX_BODY_LEN,
            logo_schemes: DEFAULT_LOGO_SCHEMES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Require every phone number to be a valid number for `region`.
    pub fn phone_region(mut self, region: country::Id) -> Self {
        self.phone_region = Some(region);
        self
    }

    pub fn max_line_len(mut self, max: usize) -> Self {
        self.max_line_len = max;
        self
    }

    pub fn max_body_len(mut self, max: usize) -> Self {
        self.max_body_len = max;
        self
    }

    /// Replace the accepted logo URL schemes.
    pub fn logo_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.logo_schemes = schemes.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> ModelConfig {
        ModelConfig {
            phone_region: self.phone_region,
            max_line_len: self.max_line_len,
            max_body_len: self.max_body_len,
            logo_schemes: self.logo_schemes,
        }
    }
}

impl Default for ModelConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive() {
        let config = ModelConfig::default();
        assert_eq!(config.phone_region(), None);
        assert_eq!(config.max_line_len(), 256);
        assert_eq!(config.max_body_len(), 10_000);
        assert!(config.allows_logo_scheme("https"));
        assert!(config.allows_logo_scheme("HTTP"));
        assert!(!config.allows_logo_scheme("ftp"));
    }

    #[test]
    fn builder_overrides_each_knob() {
        let config = ModelConfig::builder()
            .phone_region(country::Id::US)
            .max_line_len(10)
            .max_body_len(20)
            .logo_schemes(["https"])
            .build();
        assert_eq!(config.phone_region(), Some(country::Id::US));
        assert_eq!(config.max_line_len(), 10);
        assert_eq!(config.max_body_len(), 20);
        assert!(!config.allows_logo_scheme("http"));
    }
}
