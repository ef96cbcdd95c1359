use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure classes surfaced by the toolkit.
///
/// `Validation` is raised before any network call and is always fixable by
/// correcting input. `Exchange` carries the code/message pair Binance
/// returns when it rejects a call. Everything else (network failures,
/// malformed payloads, missing credentials) lands in `Http`/`Unexpected`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("[{code}] {msg}")]
    Exchange { code: i64, msg: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// User-facing prefix printed by the CLI binaries.
    pub fn prefix(&self) -> &'static str {
        match self {
            Error::Validation(_) => "Validation Error",
            Error::Exchange { .. } => "API Error",
            Error::Http(_) | Error::Unexpected(_) => "Error",
        }
    }
}

/// Print the error with its class prefix and exit with code 1.
///
/// Every binary funnels its failures through here so validation,
/// exchange and unexpected errors stay distinguishable at the shell.
pub fn fail(err: Error) -> ! {
    tracing::error!("{err}");
    println!("\n✗ {}: {}", err.prefix(), err);
    std::process::exit(1);
}
