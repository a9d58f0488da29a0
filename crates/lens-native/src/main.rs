use std::time::Instant;

use lens_core::{
    ChargeConfig, DrawableSize, InputEvent, RaySetConfig, Session, DEFAULT_DRAWABLE_HEIGHT,
    DEFAULT_DRAWABLE_WIDTH,
};
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

mod input;
mod render;

use input::PointerTracker;
use render::GpuState;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Black Hole Simulator")
        .with_inner_size(LogicalSize::new(
            DEFAULT_DRAWABLE_WIDTH,
            DEFAULT_DRAWABLE_HEIGHT,
        ))
        .build(&event_loop)?;

    // Pointer math needs framebuffer pixels, not logical window units.
    let size = window.inner_size();
    let ray_config = RaySetConfig::default();
    let mut session = Session::new(
        ray_config,
        ChargeConfig::default(),
        DrawableSize::new(size.width.max(1), size.height.max(1)),
    );
    let mut state = pollster::block_on(GpuState::new(&window, ray_config.ray_count))?;
    log::info!(
        "[app] {}x{} px, {} rays; hold left mouse to place a lens, space to clear, esc to quit",
        size.width,
        size.height,
        ray_config.ray_count
    );

    let start = Instant::now();
    let mut pointer = PointerTracker::default();

    event_loop.run(move |event, elwt| {
        let now = start.elapsed().as_secs_f64();
        let input = match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    elwt.exit();
                    None
                }
                WindowEvent::Resized(size) => {
                    state.resize(size);
                    Some(InputEvent::Resized {
                        width: size.width,
                        height: size.height,
                    })
                }
                WindowEvent::CursorMoved { position, .. } => {
                    pointer.moved(position);
                    None
                }
                WindowEvent::CursorLeft { .. } => {
                    pointer.left();
                    None
                }
                WindowEvent::MouseInput {
                    state: button_state,
                    button: MouseButton::Left,
                    ..
                } => match button_state {
                    ElementState::Pressed => pointer.press(now),
                    ElementState::Released => Some(pointer.release(now)),
                },
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                } => match logical_key {
                    Key::Named(NamedKey::Space) => Some(InputEvent::Reset),
                    Key::Named(NamedKey::Escape) => {
                        elwt.exit();
                        None
                    }
                    _ => None,
                },
                WindowEvent::RedrawRequested => {
                    match state.render(&session, now) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            state.resize(state.window.inner_size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("[gpu] out of memory");
                            elwt.exit();
                        }
                        Err(e) => log::warn!("[gpu] frame skipped: {e:?}"),
                    }
                    None
                }
                _ => None,
            },
            Event::AboutToWait => {
                state.window.request_redraw();
                None
            }
            _ => None,
        };
        if let Some(ev) = input {
            session.apply(ev);
        }
    })?;
    Ok(())
}
