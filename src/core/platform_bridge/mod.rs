//=========================================================================
// Platform Bridge
//=========================================================================
//
// The contract between the windowing layer and the frame loop.
//
// Components:
// - `interface`: messages in both directions, errors, window settings
// - `event_collector`: core-side draining of platform messages
//
// Nothing here depends on a concrete windowing backend except the error
// source type.
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Internal API ========================================================

pub use interface::PlatformError;
pub(crate) use event_collector::EventCollector;
pub(crate) use interface::{CoreSignal, PlatformEvent, WindowConfig};
