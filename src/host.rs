//! egui host glue: frame scheduling through repaint requests and
//! translation of egui input into pointer events

use crate::animation::{FrameHandle, FrameScheduler, HeartsAnimation};
use crate::pointer::PointerEvent;
use crate::render::HeartCanvas;
use egui::{Event, Pos2, Rect, TouchId, TouchPhase};

/// Frames are requested with `request_repaint`; the next `update` collects
/// the due handle with [`EguiFrameScheduler::take_due`].
pub struct EguiFrameScheduler {
    ctx: egui::Context,
    next: u64,
    due: Option<FrameHandle>,
}

impl EguiFrameScheduler {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            next: 0,
            due: None,
        }
    }

    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.due.take()
    }
}

impl FrameScheduler for EguiFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.due = Some(handle);
        self.ctx.request_repaint();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.due == Some(handle) {
            self.due = None;
        }
    }
}

impl HeartsAnimation<EguiFrameScheduler> {
    /// Run the due frame if there is one, otherwise repaint the current state
    pub fn show(&mut self, canvas: &mut impl HeartCanvas) {
        let due = self.scheduler_mut().take_due();
        let ran = match due {
            Some(handle) => self.on_frame(handle, canvas),
            None => false,
        };
        if !ran {
            self.paint(canvas);
        }
    }
}

/// Turns raw egui events into pointer events scoped to the landing region
#[derive(Default)]
pub struct InputRouter {
    touches: Vec<(TouchId, Pos2)>,
}

impl InputRouter {
    pub fn route(&mut self, events: &[Event], region: Rect) -> Vec<PointerEvent> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::PointerMoved(pos) => Some(pointer_move(*pos, region)),
                Event::PointerGone => Some(PointerEvent::Leave),
                Event::Touch { id, phase, pos, .. } => self.touch(*id, *phase, *pos, region),
                _ => None,
            })
            .collect()
    }

    pub fn touch(
        &mut self,
        id: TouchId,
        phase: TouchPhase,
        pos: Pos2,
        region: Rect,
    ) -> Option<PointerEvent> {
        match phase {
            TouchPhase::Start | TouchPhase::Move => {
                match self.touches.iter_mut().find(|(touch, _)| *touch == id) {
                    Some(entry) => entry.1 = pos,
                    None => self.touches.push((id, pos)),
                }
                Some(PointerEvent::TouchMove {
                    touches: self.touches.iter().map(|&(_, pos)| pos).collect(),
                    origin: region.min,
                })
            }
            TouchPhase::End | TouchPhase::Cancel => {
                self.touches.retain(|(touch, _)| *touch != id);
                Some(PointerEvent::TouchEnd)
            }
        }
    }
}

fn pointer_move(pos: Pos2, region: Rect) -> PointerEvent {
    if region.contains(pos) {
        PointerEvent::Move {
            client: pos,
            origin: region.min,
        }
    } else {
        PointerEvent::Leave
    }
}
