//! Admin Config

use clap::Args;

/// Admin access settings.
#[derive(Debug, Args)]
pub struct AdminConfig {
    /// Bearer token for the admin routes. Without one every admin request is refused.
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    pub admin_token: Option<String>,
}
