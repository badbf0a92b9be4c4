use clap::Args;

use drivefs_daemon::state::{AppState, StateError};
use drivefs_daemon::{spawn_service, ServiceConfig, ServiceError};

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Override API server port (default from config)
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] StateError),

    #[error("daemon failed: {0}")]
    Failed(#[from] ServiceError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // An uninitialized directory just means defaults; anything else is a real problem
        let mut config = match AppState::load(ctx.config_path.clone()) {
            Ok(state) => ServiceConfig::from_app_config(&state.config)?,
            Err(StateError::NotInitialized) => ServiceConfig::default(),
            Err(e) => return Err(e.into()),
        };

        if let Some(api_port) = self.api_port {
            config.api_port = api_port;
        }
        config.log_dir = self.log_dir.clone();

        spawn_service(&config).await?;
        Ok("daemon ended".to_string())
    }
}
