use std::sync::Arc;

use approx::assert_abs_diff_eq;
use glam::Vec3;
use newengine_camera::fly::{Chord, MouseMotion};
use newengine_camera::{
    CameraHandle, FlyControl, FlyMovement, FlyOptions, FlyPreset, Perspective, PerspectiveCamera,
};
use newengine_core::{
    EngineError, EngineResult, EventHub, HeadlessWindow, InputHostEvent, KeyCode, KeyState,
    MouseButton, WindowApi,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

struct Rig {
    hub: Arc<EventHub>,
    window: Arc<HeadlessWindow>,
    ctl: FlyControl<PerspectiveCamera>,
}

fn rig(options: FlyOptions) -> Rig {
    let hub = Arc::new(EventHub::new());
    let window = Arc::new(HeadlessWindow::default());
    let camera = PerspectiveCamera::new(Vec3::new(0.0, 1.0, 5.0), Perspective::default());
    let ctl = FlyControl::new(
        camera,
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::Y,
        hub.clone(),
        window.clone(),
        options,
    );
    Rig { hub, window, ctl }
}

fn key(code: KeyCode, repeat: bool) -> InputHostEvent {
    InputHostEvent::Key { code, state: KeyState::Pressed, repeat }
}

fn cursor(x: f32, y: f32) -> InputHostEvent {
    InputHostEvent::CursorMoved { x, y }
}

#[test]
fn published_keys_move_the_camera_on_pump() {
    let mut r = rig(FlyOptions::default());
    assert_eq!(r.hub.publish(key(KeyCode::ArrowUp, false)), 1);
    assert_eq!(r.hub.publish(key(KeyCode::ArrowUp, true)), 1);
    // Key releases are not subscribed.
    let up = InputHostEvent::Key { code: KeyCode::ArrowUp, state: KeyState::Released, repeat: false };
    assert_eq!(r.hub.publish(up), 0);

    assert_eq!(r.ctl.pump(), 2);
    assert!(r.ctl.position().abs_diff_eq(Vec3::new(0.0, 1.0, 3.0), 1e-5));
    assert_eq!(r.ctl.camera().position(), r.ctl.position());
}

#[test]
fn subscribe_twice_does_not_duplicate_delivery() {
    let mut r = rig(FlyOptions::default());
    r.ctl.subscribe();
    r.ctl.subscribe();
    assert_eq!(r.hub.subscriber_count(), 1);
    assert_eq!(r.hub.publish(key(KeyCode::PageUp, false)), 1);
    assert_eq!(r.ctl.pump(), 1);
}

#[test]
fn dispose_stops_delivery_and_is_idempotent() {
    let mut r = rig(FlyOptions::default());
    r.hub.publish(key(KeyCode::ArrowUp, false));
    r.ctl.dispose();
    r.ctl.dispose();
    assert_eq!(r.hub.subscriber_count(), 0);
    assert_eq!(r.hub.publish(key(KeyCode::ArrowUp, false)), 0);
    assert_eq!(r.ctl.pump(), 0);
    assert!(r.ctl.position().abs_diff_eq(Vec3::new(0.0, 1.0, 5.0), 1e-6));
    assert!(!r.ctl.is_subscribed());

    r.ctl.subscribe();
    assert_eq!(r.hub.publish(key(KeyCode::ArrowUp, false)), 1);
}

#[test]
fn unsubscribe_discards_queued_events() {
    let mut r = rig(FlyOptions::default());
    r.hub.publish(key(KeyCode::ArrowUp, false));
    r.ctl.unsubscribe();
    r.ctl.unsubscribe();
    assert_eq!(r.ctl.pump(), 0);
    assert_eq!(r.hub.publish(key(KeyCode::ArrowUp, false)), 0);
    assert_eq!(r.hub.subscriber_count(), 1);
}

#[test]
fn drop_unregisters() {
    let r = rig(FlyOptions::default());
    let hub = r.hub.clone();
    drop(r);
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn zoom_stays_within_bounds() {
    let mut r = rig(FlyOptions::default());
    assert_abs_diff_eq!(r.ctl.camera().fov_degrees(), 60.0, epsilon = 1e-4);

    let step = 50f32.to_radians();
    for _ in 0..5 {
        r.ctl.zoom(step);
        assert!(r.ctl.camera().fov_degrees() <= 100.0 + 1e-3);
    }
    assert_abs_diff_eq!(r.ctl.camera().fov_degrees(), 60.0, epsilon = 1e-3);

    for _ in 0..5 {
        r.ctl.zoom(-step);
        assert!(r.ctl.camera().fov_degrees() >= 1.0 - 1e-3);
    }
    assert_abs_diff_eq!(r.ctl.camera().fov_degrees(), 10.0, epsilon = 1e-3);
}

#[test]
fn wheel_zoom_with_right_button_held() {
    let mut r = rig(FlyOptions::default());
    let right = |state| InputHostEvent::MouseButton { button: MouseButton::Right, state };
    r.ctl.handle_event(right(KeyState::Pressed));
    r.ctl.handle_event(InputHostEvent::MouseWheel { dx: 0.0, dy: 2.0 });
    let fov = 60f32 - 0.2f32.to_degrees();
    assert_abs_diff_eq!(r.ctl.camera().fov_degrees(), fov, epsilon = 1e-3);

    r.ctl.handle_event(right(KeyState::Released));
    r.ctl.handle_event(InputHostEvent::MouseWheel { dx: 0.0, dy: 2.0 });
    assert_abs_diff_eq!(r.ctl.camera().fov_degrees(), fov, epsilon = 1e-3);
}

#[test]
fn capture_key_toggles_window_and_resets_cursor() {
    let mut r = rig(FlyOptions::default());

    // Released: look gestures do not fire.
    r.ctl.handle_event(cursor(100.0, 100.0));
    r.ctl.handle_event(cursor(140.0, 100.0));
    assert_abs_diff_eq!(r.ctl.rotation().yaw, 0.0);

    r.ctl.handle_event(key(KeyCode::Space, false));
    assert!(r.window.is_captured());
    assert!(r.ctl.is_cursor_captured());

    // First sample after the toggle only seeds.
    r.ctl.handle_event(cursor(640.0, 360.0));
    assert_abs_diff_eq!(r.ctl.rotation().yaw, 0.0);
    r.ctl.handle_event(cursor(650.0, 360.0));
    assert_abs_diff_eq!(r.ctl.rotation().yaw, 0.25, epsilon = 1e-6);

    r.ctl.handle_event(key(KeyCode::Space, true));
    assert!(r.window.is_captured());
    r.ctl.handle_event(key(KeyCode::Space, false));
    assert!(!r.window.is_captured());
    assert!(r.ctl.position().abs_diff_eq(Vec3::new(0.0, 1.0, 5.0), 1e-6));
}

struct RefusingWindow;

impl WindowApi for RefusingWindow {
    fn set_cursor_captured(&self, _captured: bool) -> EngineResult<()> {
        Err(EngineError::Window("grab unsupported".into()))
    }

    fn inner_size(&self) -> (u32, u32) {
        (800, 600)
    }
}

#[test]
fn refused_capture_leaves_state_unchanged() {
    let camera = PerspectiveCamera::default();
    let mut ctl = FlyControl::new(
        camera,
        Vec3::NEG_Z,
        Vec3::Y,
        Arc::new(EventHub::new()),
        Arc::new(RefusingWindow),
        FlyOptions::default(),
    );
    assert!(!ctl.set_cursor_captured(true));
    ctl.handle_event(key(KeyCode::Space, false));
    assert!(!ctl.is_cursor_captured());
}

#[test]
fn fps_mouse_look_keeps_horizon_and_pitch_limit() {
    let mut r = rig(FlyOptions::preset(FlyPreset::Fps));
    r.ctl.set_cursor_captured(true);

    let mut rng = StdRng::seed_from_u64(11);
    let (mut x, mut y) = (0.0f32, 0.0f32);
    for _ in 0..3000 {
        x += rng.gen_range(-40.0..40.0);
        y += rng.gen_range(-40.0..40.0);
        r.ctl.handle_event(cursor(x, y));

        let f = r.ctl.forward_vector();
        let u = r.ctl.up_vector();
        assert_abs_diff_eq!(f.length(), 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(u.length(), 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(f.dot(u), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(f.cross(u).dot(Vec3::Y), 0.0, epsilon = 1e-3);
        assert!(r.ctl.rotation().pitch.abs() <= 85f32.to_radians() + 1e-5);
        assert_abs_diff_eq!(r.ctl.rotation().roll, 0.0);
    }
}

#[test]
fn fly_options_parse_from_toml() {
    let src = r#"
        preset = "Fps"
        sensitivity = 0.25
        invert_pitch = true
        capture_toggle = "Off"

        [constraints]
        PitchUp = 1.2
        PitchDown = -1.2

        [keys]
        Forward = "I"
        Backward = "K"

        [[mouse.ZoomIn]]
        motion = "ScrollUp"
        chord = "Any"

        [[mouse.ZoomOut]]
        motion = "ScrollDown"
        chord = { Exact = ["Right"] }
    "#;
    let opts: FlyOptions = toml::from_str(src).unwrap();
    assert_eq!(opts.preset, FlyPreset::Fps);

    let b = opts.into_bindings();
    assert_eq!(b.sensitivity, 0.25);
    assert!(b.invert_pitch);
    assert_eq!(b.capture_toggle, None);
    assert_eq!(b.constraints.value(FlyMovement::PitchUp), Some(1.2));
    assert!(!b.constraints.contains(FlyMovement::ZoomOut));
    assert_eq!(b.keys.len(), 2);
    assert_eq!(b.movement_for_key(KeyCode::K), Some(FlyMovement::Backward));
    assert_eq!(b.movement_for_key(KeyCode::W), None);

    let zoom_in = b.mouse.get(FlyMovement::ZoomIn).unwrap();
    assert_eq!(zoom_in[0].motion, MouseMotion::ScrollUp);
    assert_eq!(zoom_in[0].chord, Chord::Any);
    assert!(matches!(b.mouse.get(FlyMovement::ZoomOut).unwrap()[0].chord, Chord::Exact(s) if s.contains(MouseButton::Right)));
    assert_eq!(b.validate(), Ok(()));
}

#[test]
fn unknown_movement_name_is_rejected() {
    let src = r#"
        [speeds]
        Sideways = 1.0
    "#;
    let err = toml::from_str::<FlyOptions>(src).unwrap_err();
    assert!(err.to_string().contains("Sideways"), "{err}");
}

#[test]
fn capture_key_rebinds_from_toml() {
    let opts: FlyOptions = toml::from_str(r#"capture_toggle = { Key = "Tab" }"#).unwrap();
    let mut ctl = FlyControl::new(
        PerspectiveCamera::default(),
        Vec3::NEG_Z,
        Vec3::Y,
        Arc::new(EventHub::new()),
        Arc::new(HeadlessWindow::default()),
        opts,
    );
    ctl.handle_event(key(KeyCode::Space, false));
    assert!(!ctl.is_cursor_captured());
    ctl.handle_event(key(KeyCode::Tab, false));
    assert!(ctl.is_cursor_captured());
}
