use std::{fmt::Display, time::Duration};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("timed out after {timeout:?} acquiring {index} index lock ({mode})")]
    LockTimeout {
        index: IndexKind,
        mode: LockMode,
        timeout: Duration,
    },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Failure reported by a [`ValueStore`](crate::ValueStore) implementation.
#[derive(thiserror::Error, Debug)]
#[error("{0:?}")]
pub struct BackendError(#[from] pub anyhow::Error);

impl BackendError {
    pub fn msg<M>(message: M) -> Self
    where
        M: Display + std::fmt::Debug + Send + Sync + 'static,
    {
        Self(anyhow::Error::msg(message))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Values,
    Dependencies,
}

impl Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Values => write!(f, "value"),
            IndexKind::Dependencies => write!(f, "dependency"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockMode {
    Read,
    Upgradable,
    Upgrade,
    Write,
}

impl Display for LockMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockMode::Read => write!(f, "read"),
            LockMode::Upgradable => write!(f, "upgradable read"),
            LockMode::Upgrade => write!(f, "read-to-write upgrade"),
            LockMode::Write => write!(f, "write"),
        }
    }
}

/// Attaches context to a fallible backend call.
pub trait Context<T> {
    fn context<C>(self, context: C) -> Result<T, BackendError>
    where
        C: Display + Send + Sync + 'static;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: Into<anyhow::Error> + std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T, BackendError>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| BackendError(anyhow::Error::from(e).context(context)))
    }
}
