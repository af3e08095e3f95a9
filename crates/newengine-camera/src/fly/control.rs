use std::sync::Arc;

use glam::Vec3;
use newengine_core::{EventHub, InputHostEvent, InputTopic, Subscription, WindowApi};

use super::bindings::{FlyBindings, FlyOptions};
use super::constraint::constraint_ok;
use super::frame::{FlyFrame, Rotation, UpMode};
use super::movement::{FlyMovement, FrameOp};
use super::resolver::InputResolver;
use crate::rig::CameraHandle;

/// Topics the controller listens to. Key releases carry no movement.
const TOPICS: [InputTopic; 6] = [
    InputTopic::KeyDown,
    InputTopic::KeyRepeat,
    InputTopic::MouseDown,
    InputTopic::MouseUp,
    InputTopic::Cursor,
    InputTopic::Scroll,
];

/// Fly camera controller.
///
/// Owns the kinematic frame, drives the camera through [`CameraHandle`] and reads input
/// from an [`EventHub`] inbox. Everything runs on the thread that calls [`FlyControl::pump`].
///
/// Rules:
/// - every accepted rotation pushes `look_at(position + forward, up)` to the camera,
/// - rejected rotations and zooms change nothing,
/// - after `dispose` (or drop) the hub delivers nothing to this controller.
pub struct FlyControl<C: CameraHandle> {
    camera: C,
    frame: FlyFrame,
    bindings: FlyBindings,
    resolver: InputResolver,

    hub: Arc<EventHub>,
    window: Arc<dyn WindowApi>,
    subscription: Option<Subscription>,
}

impl<C: CameraHandle> FlyControl<C> {
    /// Builds the controller at the camera's position facing `target`, and subscribes it.
    pub fn new(
        camera: C,
        target: Vec3,
        world_up: Vec3,
        hub: Arc<EventHub>,
        window: Arc<dyn WindowApi>,
        options: FlyOptions,
    ) -> Self {
        Self::with_bindings(camera, target, world_up, hub, window, options.into_bindings())
    }

    pub fn with_bindings(
        camera: C,
        target: Vec3,
        world_up: Vec3,
        hub: Arc<EventHub>,
        window: Arc<dyn WindowApi>,
        bindings: FlyBindings,
    ) -> Self {
        let frame = FlyFrame::new(camera.position(), target, world_up, bindings.up_mode);
        let mut ctl = Self {
            camera,
            frame,
            bindings,
            resolver: InputResolver::new(),
            hub,
            window,
            subscription: None,
        };
        ctl.push_camera();
        ctl.subscribe();
        ctl
    }

    /* ------------------------------- Subscription ------------------------------ */

    /// Registers with the hub (once) and opts into every input topic. Idempotent.
    pub fn subscribe(&mut self) {
        let id = match &self.subscription {
            Some(s) => s.id(),
            None => {
                let s = self.hub.register();
                let id = s.id();
                self.subscription = Some(s);
                id
            }
        };
        for topic in TOPICS {
            self.hub.subscribe(id, topic);
        }
    }

    /// Opts out of every topic and discards queued events. Registration is kept.
    pub fn unsubscribe(&mut self) {
        if let Some(s) = &self.subscription {
            for topic in TOPICS {
                self.hub.unsubscribe(s.id(), topic);
            }
            s.drain(|_| {});
        }
    }

    #[inline]
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|s| TOPICS.iter().any(|&t| self.hub.is_subscribed(s.id(), t)))
    }

    /// Drops the hub registration. Idempotent; `subscribe` registers again.
    pub fn dispose(&mut self) {
        if let Some(s) = self.subscription.take() {
            self.hub.unregister(s.id());
            log::debug!("fly: disposed subscriber {:?}", s.id());
        }
    }

    /// Handles every queued event in publish order. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut n = 0usize;
        while let Some(ev) = self.subscription.as_ref().and_then(Subscription::try_recv) {
            self.handle_event(ev);
            n += 1;
        }
        n
    }

    pub fn handle_event(&mut self, ev: InputHostEvent) {
        let res = self.resolver.resolve(&ev, &self.bindings);
        if res.toggle_capture {
            let captured = !self.resolver.is_captured();
            self.set_cursor_captured(captured);
        }
        for (m, v) in res.moves {
            self.apply(m, v);
        }
    }

    /// Requests cursor capture from the window. Returns false if the window refused.
    pub fn set_cursor_captured(&mut self, captured: bool) -> bool {
        match self.window.set_cursor_captured(captured) {
            Ok(()) => {
                self.resolver.set_captured(captured);
                log::debug!("fly: cursor captured = {captured}");
                true
            }
            Err(e) => {
                log::warn!("fly: cursor capture request failed: {e}");
                false
            }
        }
    }

    #[inline]
    pub fn is_cursor_captured(&self) -> bool {
        self.resolver.is_captured()
    }

    /* --------------------------------- Movement -------------------------------- */

    /// Routes a movement to its frame operation. Returns false if a constraint rejected it.
    pub fn apply(&mut self, movement: FlyMovement, delta: f32) -> bool {
        match movement.op() {
            FrameOp::TranslateForward => self.forward(delta),
            FrameOp::TranslateRight => self.right(delta),
            FrameOp::TranslateUp => self.up(delta),
            FrameOp::Yaw => return self.yaw(delta),
            FrameOp::Pitch => return self.pitch(delta),
            FrameOp::Roll => return self.roll(delta),
            FrameOp::Zoom => return self.zoom(delta),
        }
        true
    }

    pub fn reposition(&mut self, position: Vec3) {
        self.frame.set_position(position);
        self.push_camera();
    }

    pub fn reorient(&mut self, target: Vec3, world_up: Vec3) {
        self.frame.reorient(target, world_up);
        self.push_camera();
    }

    pub fn forward(&mut self, delta: f32) {
        self.frame.translate_forward(delta);
        self.push_camera();
    }

    pub fn right(&mut self, delta: f32) {
        self.frame.translate_right(delta);
        self.push_camera();
    }

    pub fn up(&mut self, delta: f32) {
        self.frame.translate_up(delta);
        self.push_camera();
    }

    pub fn yaw(&mut self, delta: f32) -> bool {
        let ok = self.frame.yaw(delta, &self.bindings.constraints);
        self.after_rotation(ok, FrameOp::Yaw, delta)
    }

    pub fn pitch(&mut self, delta: f32) -> bool {
        let ok = self.frame.pitch(delta, &self.bindings.constraints);
        self.after_rotation(ok, FrameOp::Pitch, delta)
    }

    pub fn roll(&mut self, delta: f32) -> bool {
        let ok = self.frame.roll(delta, &self.bindings.constraints);
        self.after_rotation(ok, FrameOp::Roll, delta)
    }

    /// Adds `delta` radians to the field of view.
    pub fn zoom(&mut self, delta: f32) -> bool {
        let fov = self.camera.fov_degrees().to_radians() + delta;
        self.commit_fov(fov)
    }

    /// Multiplies the field of view by `factor`.
    pub fn scale_zoom(&mut self, factor: f32) -> bool {
        let fov = self.camera.fov_degrees().to_radians() * factor;
        self.commit_fov(fov)
    }

    fn commit_fov(&mut self, fov: f32) -> bool {
        let (low, high) = (FlyMovement::ZoomIn, FlyMovement::ZoomOut);
        if !constraint_ok(&self.bindings.constraints, fov, low, high) {
            log::trace!("fly: fov {:.2}° rejected", fov.to_degrees());
            return false;
        }
        self.camera.set_fov_degrees(fov.to_degrees());
        true
    }

    #[inline]
    fn after_rotation(&mut self, ok: bool, op: FrameOp, delta: f32) -> bool {
        if ok {
            self.push_camera();
        } else {
            log::trace!("fly: {op:?} {delta:+.4} rejected, accumulated {:?}", self.frame.rotation());
        }
        ok
    }

    #[inline]
    fn push_camera(&mut self) {
        self.camera.set_position(self.frame.position());
        self.camera.look_at(self.frame.look_target(), self.frame.up());
    }

    /* --------------------------------- Accessors ------------------------------- */

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.frame.position()
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.frame.rotation()
    }

    #[inline]
    pub fn forward_vector(&self) -> Vec3 {
        self.frame.forward()
    }

    #[inline]
    pub fn up_vector(&self) -> Vec3 {
        self.frame.up()
    }

    #[inline]
    pub fn frame(&self) -> &FlyFrame {
        &self.frame
    }

    #[inline]
    pub fn up_mode(&self) -> UpMode {
        self.frame.mode()
    }

    /// Switches between world-up and camera-up, keeping position and view direction.
    pub fn set_up_mode(&mut self, mode: UpMode) {
        if self.frame.mode() == mode {
            return;
        }
        self.frame.set_mode(mode);
        self.push_camera();
        log::debug!("fly: up mode {mode:?}");
    }

    pub fn toggle_up_mode(&mut self) -> UpMode {
        let mode = match self.frame.mode() {
            UpMode::World => UpMode::Camera,
            UpMode::Camera => UpMode::World,
        };
        self.set_up_mode(mode);
        mode
    }

    #[inline]
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Direct camera access. Position or orientation changes made here are overwritten
    /// by the next movement.
    #[inline]
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    #[inline]
    pub fn bindings(&self) -> &FlyBindings {
        &self.bindings
    }

    /// Replaces the tables; the up mode follows the new bindings.
    ///
    /// Accumulated rotation is kept unless the up mode changes, in which case the basis is
    /// re-derived along the current view direction and the rotation resets to zero.
    pub fn set_bindings(&mut self, bindings: FlyBindings) {
        let mode = bindings.up_mode;
        self.bindings = bindings;
        self.set_up_mode(mode);
    }
}

impl<C: CameraHandle> Drop for FlyControl<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}
