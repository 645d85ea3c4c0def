use std::time::Duration;

use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard, RwLockWriteGuard};

use crate::{Error, IndexKind, LockMode};

/// A reader/writer lock over one index that turns an elapsed timeout into
/// [`Error::LockTimeout`].
pub(crate) struct IndexLock<T> {
    index: IndexKind,
    lock: RwLock<T>,
}

impl<T> IndexLock<T> {
    pub fn new(index: IndexKind, inner: T) -> Self {
        Self {
            index,
            lock: RwLock::new(inner),
        }
    }

    pub fn read(&self, timeout: Option<Duration>) -> Result<RwLockReadGuard<'_, T>, Error> {
        match timeout {
            None => Ok(self.lock.read()),
            Some(timeout) => self
                .lock
                .try_read_for(timeout)
                .ok_or_else(|| self.timed_out(LockMode::Read, timeout)),
        }
    }

    pub fn write(&self, timeout: Option<Duration>) -> Result<RwLockWriteGuard<'_, T>, Error> {
        match timeout {
            None => Ok(self.lock.write()),
            Some(timeout) => self
                .lock
                .try_write_for(timeout)
                .ok_or_else(|| self.timed_out(LockMode::Write, timeout)),
        }
    }

    /// Shares the index with plain readers but excludes writers and other
    /// upgradable holders until released or upgraded.
    pub fn upgradable_read(
        &self,
        timeout: Option<Duration>,
    ) -> Result<RwLockUpgradableReadGuard<'_, T>, Error> {
        match timeout {
            None => Ok(self.lock.upgradable_read()),
            Some(timeout) => self
                .lock
                .try_upgradable_read_for(timeout)
                .ok_or_else(|| self.timed_out(LockMode::Upgradable, timeout)),
        }
    }

    pub fn upgrade<'a>(
        &'a self,
        guard: RwLockUpgradableReadGuard<'a, T>,
        timeout: Option<Duration>,
    ) -> Result<RwLockWriteGuard<'a, T>, Error> {
        match timeout {
            None => Ok(RwLockUpgradableReadGuard::upgrade(guard)),
            Some(timeout) => RwLockUpgradableReadGuard::try_upgrade_for(guard, timeout)
                .map_err(|_| self.timed_out(LockMode::Upgrade, timeout)),
        }
    }

    fn timed_out(&self, mode: LockMode, timeout: Duration) -> Error {
        #[cfg(feature = "tracing")]
        tracing::warn!(index = %self.index, %mode, ?timeout, "lock timeout");

        Error::LockTimeout {
            index: self.index,
            mode,
            timeout,
        }
    }
}
