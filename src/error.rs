use druid::PlatformError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to launch the window: {0}")]
    Launch(#[from] PlatformError),
}
