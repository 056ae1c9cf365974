// Camera rig demo: opens a window and drives the rig from live input.
// Nothing is drawn; camera and subject state are logged once per second.
//
// Controls:
//   mouse move  orbit        wheel  zoom
//   WASD        walk         Space  jump
//   Tab         menu mode    Q      casting mode
//   Esc         quit
//
// Usage: orbit_rig [config.toml]   (RUST_LOG=info to see the state lines)

use std::path::Path;
use std::sync::Arc;

use winit::{
    event::{ElementState, Event as WinitEvent, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use orbit_rig::engine::{AzimuthSource, InputState, MouseMode, Rig, RigConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => RigConfig::load(Path::new(&path))?,
        None => RigConfig::default(),
    };
    let mut rig = Rig::new(&config)?;

    let event_loop = EventLoop::new()?;

    let window_attributes = Window::default_attributes()
        .with_title("Orbit Rig - WASD walk, mouse orbit, wheel zoom, Tab menu")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

    let window = Arc::new(event_loop.create_window(window_attributes)?);
    window.set_cursor_visible(false);

    let cursor_window = Arc::clone(&window);
    rig.mouse_context_mut()
        .subscribe(move |mode| cursor_window.set_cursor_visible(mode.cursor_visible()));

    let mut input = InputState::new();
    let mut last_update = std::time::Instant::now();
    let mut frame_count = 0;
    let mut last_fps_update = std::time::Instant::now();

    event_loop.run(move |event, control_flow| {
        match event {
            WinitEvent::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                input.process_event(event);
                match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                state: ElementState::Pressed,
                                physical_key: PhysicalKey::Code(KeyCode::Escape),
                                ..
                            },
                        ..
                    } => control_flow.exit(),
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                state: ElementState::Pressed,
                                physical_key: PhysicalKey::Code(key),
                                repeat: false,
                                ..
                            },
                        ..
                    } => match key {
                        KeyCode::Tab => rig.mouse_context_mut().toggle(MouseMode::Menu),
                        KeyCode::KeyQ => rig.mouse_context_mut().toggle(MouseMode::Casting),
                        _ => {}
                    },
                    WindowEvent::RedrawRequested => {
                        let now = std::time::Instant::now();
                        let dt = (now - last_update).as_secs_f32();
                        last_update = now;

                        rig.tick(input.frame(), dt);
                        input.end_frame();

                        frame_count += 1;
                        if (now - last_fps_update).as_secs_f32() >= 1.0 {
                            let camera = rig.camera();
                            let subject = rig.subject().map(|t| t.position).unwrap_or_default();
                            log::info!(
                                "FPS: {} | mode: {:?} | radius: {:.2} | polar: {:.3} | azimuth: {:.3} | subject: ({:.2}, {:.2}, {:.2})",
                                frame_count,
                                rig.mouse_context().mode(),
                                camera.radius(),
                                camera.polar(),
                                camera.azimuth(),
                                subject.x,
                                subject.y,
                                subject.z,
                            );
                            frame_count = 0;
                            last_fps_update = now;
                        }
                    }
                    _ => {}
                }
            }
            WinitEvent::DeviceEvent { ref event, .. } => {
                input.process_device_event(event);
            }
            WinitEvent::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
