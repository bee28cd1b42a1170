pub use application_env::ApplicationEnv;
pub use gateway_config::{CorsConfig, GatewayConfig, LaunchesConfig, ServerConfig, StoreConfig};

mod application_env;
mod gateway_config;
