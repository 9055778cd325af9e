//=========================================================================
// Runtime Claim
//=========================================================================
//
// Enforces one runtime per process.
//
// The first successful `try_acquire` wins for the rest of the process
// lifetime; every later attempt is refused so a second engine can never
// silently replace the first.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};

use log::error;

//=== Process Flag ========================================================

static RUNTIME_CLAIMED: AtomicBool = AtomicBool::new(false);

//=== RuntimeClaim ========================================================

/// Proof that the holder is the process's single runtime.
#[derive(Debug)]
pub struct RuntimeClaim {
    _private: (),
}

impl RuntimeClaim {
    /// Claims the process-wide runtime slot.
    ///
    /// Returns `None` if a runtime was already created in this process.
    pub fn try_acquire() -> Option<Self> {
        Self::try_acquire_in(&RUNTIME_CLAIMED)
    }

    fn try_acquire_in(flag: &AtomicBool) -> Option<Self> {
        match flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => Some(Self { _private: () }),
            Err(_) => {
                error!(target: "engine", "Refusing to create a second runtime in this process");
                None
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
