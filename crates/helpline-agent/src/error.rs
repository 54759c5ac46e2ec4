use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("agent backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("agent backend returned status {0}")]
    Status(u16),
}
