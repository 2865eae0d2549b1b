//! In-flight flag for view submissions

use std::sync::atomic::{AtomicBool, Ordering};

use shared::AppError;

/// `idle -> in-flight -> idle`; a second acquire while in flight fails
#[derive(Debug, Default)]
pub struct BusyFlag(AtomicBool);

impl BusyFlag {
    pub fn try_acquire(&self) -> Result<BusyGuard<'_>, AppError> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| BusyGuard(self))
            .map_err(|_| AppError::operation_in_progress())
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Returns the flag to idle on drop
#[derive(Debug)]
pub struct BusyGuard<'a>(&'a BusyFlag);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        (self.0).0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn second_acquire_is_rejected_until_release() {
        let flag = BusyFlag::default();
        let guard = flag.try_acquire().unwrap();
        assert!(flag.is_busy());

        let err = flag.try_acquire().unwrap_err();
        assert_eq!(err.code, ErrorCode::OperationInProgress);

        drop(guard);
        assert!(!flag.is_busy());
        assert!(flag.try_acquire().is_ok());
    }
}
