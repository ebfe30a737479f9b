//! Loop Controller
//!
//! Drives tick -> integrate -> render through the host's frame scheduler and
//! owns all animation state: the field, the pointer, the surface size and the
//! pending frame. `start` and `stop` are idempotent.

use crate::config::{FieldConfig, PhysicsConfig};
use crate::hearts::HeartField;
use crate::physics;
use crate::pointer::{PointerSender, PointerTracker};
use crate::render::{self, HeartCanvas};
use egui::Vec2;
use rand::rngs::StdRng;

/// Token for one scheduled frame callback
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FrameHandle(pub u64);

/// Host frame-scheduling primitive
pub trait FrameScheduler {
    /// Ask the host to run one frame callback
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a request so its callback never runs
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoopState {
    Stopped,
    Running,
}

pub struct HeartsAnimation<S: FrameScheduler> {
    field_config: FieldConfig,
    physics: PhysicsConfig,
    scheduler: S,
    pending: Option<FrameHandle>,
    field: Option<HeartField>,
    surface: Vec2,
    pointer: PointerTracker,
    rng: StdRng,
    frames: u64,
}

impl<S: FrameScheduler> HeartsAnimation<S> {
    pub fn new(
        field_config: FieldConfig,
        physics: PhysicsConfig,
        scheduler: S,
        rng: StdRng,
    ) -> Self {
        Self {
            field_config,
            physics,
            scheduler,
            pending: None,
            field: None,
            surface: Vec2::ZERO,
            pointer: PointerTracker::new(),
            rng,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        if self.pending.is_some() {
            LoopState::Running
        } else {
            LoopState::Stopped
        }
    }

    pub fn start(&mut self) {
        if self.pending.is_some() {
            log::debug!("hearts already running");
            return;
        }
        self.pending = Some(self.scheduler.request_frame());
        log::info!("hearts animation started");
    }

    pub fn stop(&mut self) {
        let Some(handle) = self.pending.take() else {
            log::debug!("hearts already stopped");
            return;
        };
        self.scheduler.cancel_frame(handle);
        log::info!("hearts animation stopped after {} frames", self.frames);
    }

    /// Re-read the host region size. Falls back to the window size on any
    /// zero dimension of the region.
    pub fn on_resize(&mut self, region: Vec2, window: Vec2) {
        self.surface = Vec2::new(
            if region.x > 0.0 { region.x } else { window.x },
            if region.y > 0.0 { region.y } else { window.y },
        );

        if let Some(field) = &mut self.field {
            field.redistribute_homes(self.surface, &mut self.rng);
            log::debug!(
                "redistributed {} homes over {}x{}",
                field.len(),
                self.surface.x,
                self.surface.y
            );
            return;
        }

        self.field = Some(HeartField::initialize(
            self.field_config.count,
            self.surface,
            &self.field_config,
            &mut self.rng,
        ));
        log::info!(
            "created {} hearts on a {}x{} surface",
            self.field_config.count,
            self.surface.x,
            self.surface.y
        );
    }

    /// Frame callback. Runs only for the currently pending handle; a stale or
    /// cancelled handle leaves everything untouched.
    pub fn on_frame(&mut self, handle: FrameHandle, canvas: &mut impl HeartCanvas) -> bool {
        if self.pending != Some(handle) {
            return false;
        }

        let pointer = self.pointer.sync();
        if let Some(field) = &mut self.field {
            physics::integrate(field, pointer, &self.physics);
        }
        render::render(canvas, self.field.as_ref(), self.surface);
        self.frames += 1;

        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// Repaint the current state without advancing the simulation
    pub fn paint(&self, canvas: &mut impl HeartCanvas) {
        render::render(canvas, self.field.as_ref(), self.surface);
    }

    pub fn pointer_sender(&self) -> PointerSender {
        self.pointer.sender()
    }

    pub fn field(&self) -> Option<&HeartField> {
        self.field.as_ref()
    }

    pub fn surface(&self) -> Vec2 {
        self.surface
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// Lifecycle entry points handed to the screen layer.
///
/// Without a drawing surface the animation is absent and every call is a
/// silent no-op.
pub struct LandingHearts<S: FrameScheduler> {
    inner: Option<HeartsAnimation<S>>,
}

impl<S: FrameScheduler> LandingHearts<S> {
    pub fn attach(animation: Option<HeartsAnimation<S>>) -> Self {
        if animation.is_none() {
            log::warn!("no hearts canvas, landing animation disabled");
        }
        Self { inner: animation }
    }

    pub fn start(&mut self) {
        if let Some(animation) = &mut self.inner {
            animation.start();
        }
    }

    pub fn stop(&mut self) {
        if let Some(animation) = &mut self.inner {
            animation.stop();
        }
    }

    pub fn on_resize(&mut self, region: Vec2, window: Vec2) {
        if let Some(animation) = &mut self.inner {
            animation.on_resize(region, window);
        }
    }

    pub fn state(&self) -> LoopState {
        self.inner
            .as_ref()
            .map_or(LoopState::Stopped, HeartsAnimation::state)
    }

    pub fn animation(&self) -> Option<&HeartsAnimation<S>> {
        self.inner.as_ref()
    }

    pub fn animation_mut(&mut self) -> Option<&mut HeartsAnimation<S>> {
        self.inner.as_mut()
    }
}
