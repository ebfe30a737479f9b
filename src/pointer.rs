//! Pointer Tracker
//!
//! Input handlers post [`PointerEvent`]s through a [`PointerSender`]; the
//! animation drains them between frames, so the last event always wins and a
//! tick never sees a half-applied update.

use egui::Pos2;
use std::sync::mpsc::{self, Receiver, Sender};

/// Pointer position meaning "no active repulsion source"
pub const FAR_AWAY: Pos2 = Pos2::new(-9999.0, -9999.0);

#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Mouse moved; `client` is in window coordinates, `origin` is the surface's top-left
    Move { client: Pos2, origin: Pos2 },
    Leave,
    /// Active touch points in window coordinates; only the first is used
    TouchMove { touches: Vec<Pos2>, origin: Pos2 },
    TouchEnd,
}

/// Cloneable handle for posting pointer events
#[derive(Clone)]
pub struct PointerSender {
    tx: Sender<PointerEvent>,
}

impl PointerSender {
    pub fn send(&self, event: PointerEvent) {
        // The tracker only disappears together with the animation
        let _ = self.tx.send(event);
    }
}

pub struct PointerTracker {
    position: Pos2,
    tx: Sender<PointerEvent>,
    rx: Receiver<PointerEvent>,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            position: FAR_AWAY,
            tx,
            rx,
        }
    }

    pub fn sender(&self) -> PointerSender {
        PointerSender {
            tx: self.tx.clone(),
        }
    }

    /// Surface-local repulsion source
    pub fn position(&self) -> Pos2 {
        self.position
    }

    /// Apply every pending event in arrival order
    pub fn sync(&mut self) -> Pos2 {
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
        }
        self.position
    }

    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move { client, origin } => self.on_move(client, origin),
            PointerEvent::TouchMove { touches, origin } => {
                if let Some(&first) = touches.first() {
                    self.on_move(first, origin);
                }
            }
            PointerEvent::Leave | PointerEvent::TouchEnd => self.on_leave(),
        }
    }

    pub fn on_move(&mut self, client: Pos2, origin: Pos2) {
        self.position = Pos2::ZERO + (client - origin);
    }

    pub fn on_leave(&mut self) {
        self.position = FAR_AWAY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_far_away() {
        assert_eq!(PointerTracker::new().position(), FAR_AWAY);
    }

    #[test]
    fn move_is_made_surface_local() {
        let mut tracker = PointerTracker::new();
        tracker.on_move(Pos2::new(120.0, 80.0), Pos2::new(20.0, 30.0));
        assert_eq!(tracker.position(), Pos2::new(100.0, 50.0));
    }

    #[test]
    fn latest_event_wins_on_sync() {
        let mut tracker = PointerTracker::new();
        let sender = tracker.sender();
        let origin = Pos2::ZERO;

        sender.send(PointerEvent::Move {
            client: Pos2::new(1.0, 1.0),
            origin,
        });
        sender.send(PointerEvent::Move {
            client: Pos2::new(5.0, 6.0),
            origin,
        });
        // Nothing applied until the next sync
        assert_eq!(tracker.position(), FAR_AWAY);

        assert_eq!(tracker.sync(), Pos2::new(5.0, 6.0));

        sender.send(PointerEvent::Leave);
        assert_eq!(tracker.sync(), FAR_AWAY);
    }

    #[test]
    fn touch_uses_first_point_and_end_resets() {
        let mut tracker = PointerTracker::new();
        tracker.apply(PointerEvent::TouchMove {
            touches: vec![Pos2::new(40.0, 40.0), Pos2::new(400.0, 400.0)],
            origin: Pos2::new(10.0, 0.0),
        });
        assert_eq!(tracker.position(), Pos2::new(30.0, 40.0));

        tracker.apply(PointerEvent::TouchMove {
            touches: Vec::new(),
            origin: Pos2::ZERO,
        });
        assert_eq!(tracker.position(), Pos2::new(30.0, 40.0));

        tracker.apply(PointerEvent::TouchEnd);
        assert_eq!(tracker.position(), FAR_AWAY);
    }

    #[test]
    fn out_of_bounds_coordinates_are_accepted() {
        let mut tracker = PointerTracker::new();
        tracker.on_move(Pos2::new(-5000.0, 1e6), Pos2::ZERO);
        assert_eq!(tracker.position(), Pos2::new(-5000.0, 1e6));
    }
}
