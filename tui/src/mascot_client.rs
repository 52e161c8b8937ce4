//! Mascot Client
//!
//! Thin wrapper around a [`MascotHandle`] for TUI integration.
//!
//! # Architecture
//!
//! The TUI does not decide anything about the mascot. Its job is:
//! 1. Turn terminal mouse positions into pointer enter/leave edges
//! 2. Forward clicks and pipeline signals to the driver
//! 3. Read back the latest [`MascotView`] each frame
//! 4. Keep a motion clock that restarts whenever the mood changes

use std::time::{Duration, Instant};

use swifter_core::{
    DriverError, MascotController, MascotDriver, MascotHandle, MascotInput, MascotView, SignalSet,
};

/// Client for the mascot driver task
pub struct MascotClient {
    handle: MascotHandle,
    /// Whether the pointer is currently over the mascot
    hovered: bool,
    /// Mood epoch the motion clock was started for
    motion_epoch: u64,
    /// When the current motion started
    motion_start: Instant,
}

impl MascotClient {
    /// Spawn a driver for `controller`
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(controller: MascotController) -> Self {
        let handle = MascotDriver::spawn(controller);
        let motion_epoch = handle.view().mood_epoch;

        Self {
            handle,
            hovered: false,
            motion_epoch,
            motion_start: Instant::now(),
        }
    }

    /// Report where the pointer is
    ///
    /// Only crossings into or out of the mascot produce an input. Motion
    /// never waits on a busy driver: if the queue is full the crossing is
    /// dropped and the next move retries it.
    pub fn pointer_moved(&mut self, inside: bool) -> Result<(), DriverError> {
        match pointer_transition(self.hovered, inside) {
            Some(input) => {
                self.handle.try_send(input)?;
                self.hovered = inside;
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Report a click on the mascot
    pub async fn click(&self) -> Result<(), DriverError> {
        self.handle.send(MascotInput::Click).await
    }

    /// Forward the hosting view's signal set
    pub async fn signals(&self, signals: SignalSet) -> Result<(), DriverError> {
        self.handle.send(MascotInput::Signals(signals)).await
    }

    /// Latest view plus how long its motion has been playing
    pub fn snapshot(&mut self, now: Instant) -> (MascotView, Duration) {
        let view = self.handle.view();
        if view.mood_epoch != self.motion_epoch {
            self.motion_epoch = view.mood_epoch;
            self.motion_start = now;
        }
        (view, now.saturating_duration_since(self.motion_start))
    }

    /// Whether the pointer is over the mascot
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Stop the driver
    pub async fn shutdown(self) {
        self.handle.shutdown().await;
    }
}

/// Input for a pointer move, if it crossed the mascot's edge
#[must_use]
pub fn pointer_transition(was_inside: bool, is_inside: bool) -> Option<MascotInput> {
    match (was_inside, is_inside) {
        (false, true) => Some(MascotInput::PointerEnter),
        (true, false) => Some(MascotInput::PointerLeave),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swifter_core::{MascotTimings, Mood, Variant};
    use tokio_test::assert_ok;

    fn client() -> MascotClient {
        MascotClient::spawn(MascotController::with_seed(
            Variant::Enhanced,
            MascotTimings::default(),
            8,
        ))
    }

    #[test]
    fn test_pointer_transition_edges() {
        assert_eq!(
            pointer_transition(false, true),
            Some(MascotInput::PointerEnter)
        );
        assert_eq!(
            pointer_transition(true, false),
            Some(MascotInput::PointerLeave)
        );
        assert_eq!(pointer_transition(true, true), None);
        assert_eq!(pointer_transition(false, false), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_moves_inside_send_one_enter() {
        let mut client = client();

        assert_ok!(client.pointer_moved(true));
        assert_ok!(client.pointer_moved(true));
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert!(client.is_hovered());
        let (view, _) = client.snapshot(Instant::now());
        assert_eq!(view.mood, Mood::Excited);

        assert_ok!(client.pointer_moved(false));
        tokio::time::sleep(Duration::from_millis(1)).await;
        let (view, _) = client.snapshot(Instant::now());
        assert_eq!(view.mood, Mood::Idle);

        client.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_queue_keeps_hover_edge_pending() {
        let mut client = client();

        // The driver cannot drain until this task yields
        let mut inside = false;
        loop {
            match client.pointer_moved(!inside) {
                Ok(()) => inside = !inside,
                Err(e) => {
                    assert_eq!(e, DriverError::Full);
                    break;
                }
            }
        }
        assert_eq!(client.is_hovered(), inside);

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_ok!(client.pointer_moved(!inside));
        assert_eq!(client.is_hovered(), !inside);

        client.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_motion_clock_restarts_on_mood_change() {
        let mut client = client();
        let start = Instant::now();

        let (_, elapsed) = client.snapshot(start + Duration::from_millis(500));
        assert!(elapsed >= Duration::from_millis(500));

        assert_ok!(client.click().await);
        tokio::time::sleep(Duration::from_millis(1)).await;

        let later = start + Duration::from_secs(1);
        let (view, elapsed) = client.snapshot(later);
        assert_eq!(view.mood, Mood::Celebrating);
        assert_eq!(elapsed, Duration::ZERO);

        client.shutdown().await;
    }
}
