//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side drain of the platform channel.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → batches() → FrameLoop::tick
//
// Draining is bounded per frame so a flood of input cannot stall the
// frame loop; the remainder is picked up next frame. Pacing is the frame
// loop's job, so an empty queue returns immediately.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::frame_loop::TickControl;
use crate::core::input::InputEvent;

//=== EventCollector ======================================================

/// Gathers the input batches that arrived since the last frame.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
        }
    }

    /// Drains pending platform events into this frame's batches.
    ///
    /// Returns [`TickControl::Exit`] when the window closed or the
    /// platform side of the channel is gone.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::WindowClosed) => return TickControl::Exit,
                Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                    self.push_batch(discrete);
                    self.push_batch(continuous);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "engine", "Event queue backlog: drained {} messages this frame", drained);
        }

        TickControl::Continue
    }

    /// Batches collected by the last `collect_frame`, in arrival order.
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    fn push_batch(&mut self, batch: Vec<InputEvent>) {
        if !batch.is_empty() {
            self.input_batches.push(batch);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crossbeam_channel::unbounded;

    fn inputs(discrete: Vec<InputEvent>, continuous: Vec<InputEvent>) -> PlatformEvent {
        PlatformEvent::Inputs { discrete, continuous }
    }

    #[test]
    fn empty_queue_continues_without_batches() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn batches_keep_arrival_order_and_skip_empty_halves() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(inputs(vec![InputEvent::key_down(KeyCode::KeyA)], vec![]))
            .unwrap();
        tx.send(inputs(vec![], vec![InputEvent::MouseMoved { x: 10.0, y: 20.0 }]))
            .unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(
            collector.batches(),
            &[
                vec![InputEvent::key_down(KeyCode::KeyA)],
                vec![InputEvent::MouseMoved { x: 10.0, y: 20.0 }],
            ]
        );
    }

    #[test]
    fn previous_frame_is_cleared() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(inputs(vec![InputEvent::key_down(KeyCode::Space)], vec![]))
            .unwrap();
        collector.collect_frame();
        assert_eq!(collector.batches().len(), 1);

        collector.collect_frame();
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn window_closed_exits() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn disconnect_exits() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);
        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn drain_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..EventCollector::MAX_EVENTS_PER_FRAME + 5 {
            tx.send(inputs(vec![InputEvent::key_down(KeyCode::KeyQ)], vec![]))
                .unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.batches().len(), EventCollector::MAX_EVENTS_PER_FRAME);

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 5);
    }
}
