//=========================================================================
// Global Runtime State
//=========================================================================
//
// Separates the process-wide data (context) from the uniqueness rule.
//
// Architecture:
//   GlobalContext: StateTracker + shared ResourceScope + RuntimeToggles
//   RuntimeClaim:  one-per-process token held by the Engine
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;
mod runtime_claim;

//=== Public API ==========================================================

pub use global_context::{GlobalContext, RuntimeToggles};
pub use runtime_claim::RuntimeClaim;
