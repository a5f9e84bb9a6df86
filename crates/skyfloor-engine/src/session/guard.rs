use std::sync::atomic::{AtomicBool, Ordering};

use super::{InitError, InitStage};

/// Set while a display session owns the windowing/graphics subsystem.
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Process-wide claim on the display subsystem.
///
/// At most one exists at a time. Dropping it releases the claim.
#[derive(Debug)]
pub(crate) struct SubsystemGuard {
    _private: (),
}

impl SubsystemGuard {
    pub(crate) fn acquire() -> Result<Self, InitError> {
        ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| InitError::new(InitStage::Subsystem, "a display session is already active"))?;

        log::debug!("display subsystem acquired");
        Ok(Self { _private: () })
    }

    pub(crate) fn is_held() -> bool {
        ACTIVE.load(Ordering::Acquire)
    }
}

impl Drop for SubsystemGuard {
    fn drop(&mut self) {
        ACTIVE.store(false, Ordering::Release);
        log::debug!("display subsystem released");
    }
}

/// Serializes tests that touch the process-wide flag.
#[cfg(test)]
pub(crate) fn serial_slot() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_claim_at_a_time_and_released_on_drop() {
        let _serial = serial_slot();
        assert!(!SubsystemGuard::is_held());

        let first = SubsystemGuard::acquire().unwrap();
        assert!(SubsystemGuard::is_held());

        let second = SubsystemGuard::acquire().unwrap_err();
        assert_eq!(second.stage, InitStage::Subsystem);

        drop(first);
        assert!(!SubsystemGuard::is_held());

        let again = SubsystemGuard::acquire().unwrap();
        drop(again);
        assert!(!SubsystemGuard::is_held());
    }
}
