use serde::Deserialize;

use crate::result_ext::ResultExt;

/// Process-level settings read from `APP_*` variables.
#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationEnv {
    /// `APP_ENV`; "test" keeps the binary from opening its listener.
    #[serde(default = "default_env")]
    pub env: String,
}

fn default_env() -> String {
    "development".to_string()
}

impl ApplicationEnv {
    fn prefix() -> &'static str {
        "APP_"
    }

    pub fn from_env() -> Result<Self, envy::Error> {
        let env = envy::prefixed(Self::prefix())
            .from_env::<ApplicationEnv>()
            .log("Invalid application environment variables")?;
        Ok(env)
    }

    pub fn is_test(&self) -> bool {
        self.env.eq_ignore_ascii_case("test")
    }
}

impl Default for ApplicationEnv {
    fn default() -> Self {
        Self { env: default_env() }
    }
}
