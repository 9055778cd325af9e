//=========================================================================
// Transition Slot
//=========================================================================
//
// Holds at most one requested scene change.
//
// Scenes (and the frame host) write here at any time, including from
// inside the active scene's own update. The host reads it only at the
// commit point at the top of the next frame. A newer request replaces an
// older one; the replaced scene is dropped untouched.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::debug;

//=== Internal Dependencies ===============================================

use super::Scene;

//=== SceneTransition =====================================================

/// A requested change of the active scene.
pub enum SceneTransition {
    /// Replace the active scene (if any) with this one.
    Switch(Box<dyn Scene>),

    /// Retire the active scene and leave the host empty.
    Clear,
}

impl SceneTransition {
    /// Name of the incoming scene, `None` for `Clear`.
    pub fn target_name(&self) -> Option<&str> {
        match self {
            Self::Switch(scene) => Some(scene.name()),
            Self::Clear => None,
        }
    }
}

impl fmt::Debug for SceneTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switch(scene) => f.debug_tuple("Switch").field(&scene.name()).finish(),
            Self::Clear => f.write_str("Clear"),
        }
    }
}

//=== TransitionSlot ======================================================

/// Single-entry, last-write-wins request holder.
#[derive(Debug, Default)]
pub struct TransitionSlot {
    pending: Option<SceneTransition>,
    superseded: u64,
}

impl TransitionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `transition`, discarding any request not yet committed.
    pub fn request(&mut self, transition: SceneTransition) {
        debug!(target: "scene", "Transition requested: {:?}", transition);

        if let Some(previous) = self.pending.replace(transition) {
            self.superseded += 1;
            debug!(target: "scene", "Discarding superseded request {:?}", previous);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn peek(&self) -> Option<&SceneTransition> {
        self.pending.as_ref()
    }

    /// Removes and returns the pending request.
    pub fn take(&mut self) -> Option<SceneTransition> {
        self.pending.take()
    }

    /// Drops the pending request, if any.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// How many requests were overwritten before being committed.
    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
