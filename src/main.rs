//! Ten spinning textured cubes
//!
//! Opens a window, builds the GL resources, and renders in a poll-driven
//! event loop. A failed shader or texture is logged and the demo keeps
//! running degraded (blank render / untextured cubes) instead of crashing.

use std::error::Error;
use std::rc::Rc;
use std::time::Instant;

use glam::{Mat4, Vec3};
use glow::HasContext;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use glcube::{CubeMesh, GlWindow, ShaderProgram, Texture2D};

const WINDOW_TITLE: &str = "glcube";
const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 960;

const VERT_PATH: &str = "assets/shaders/cube.vert";
const FRAG_PATH: &str = "assets/shaders/cube.frag";
const TEXTURE_PATHS: [&str; 2] = ["assets/textures/crate.png", "assets/textures/checker.png"];

const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// Model matrix for cube `index`: translate to its slot, then spin around
/// a fixed skewed axis. Each cube starts 20 degrees ahead of the previous.
fn cube_model(position: Vec3, index: usize, time: f32) -> Mat4 {
    let angle = (20.0 * index as f32 + 50.0 * time).to_radians();
    Mat4::from_translation(position)
        * Mat4::from_axis_angle(Vec3::new(1.0, 0.3, 0.5).normalize(), angle)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    let gl_window = GlWindow::new(&event_loop, WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let gl = gl_window.gl();

    // Degraded state is acceptable: a failed shader means a blank render,
    // a failed texture means an untextured cube.
    let program = match ShaderProgram::from_files(Rc::clone(&gl), VERT_PATH, FRAG_PATH) {
        Ok(p) => Some(p),
        Err(e) => {
            log::error!("shader setup failed: {e}");
            None
        }
    };
    let textures: Vec<Option<Texture2D>> = TEXTURE_PATHS
        .iter()
        .map(|path| match Texture2D::from_file(Rc::clone(&gl), path) {
            Ok(t) => Some(t),
            Err(e) => {
                log::error!("texture setup failed: {e}");
                None
            }
        })
        .collect();
    let cube = CubeMesh::new(Rc::clone(&gl))?;

    if let Some(program) = &program {
        program.bind();
        program.set_int("u_texture0", 0);
        program.set_int("u_texture1", 1);
    }
    unsafe { gl.enable(glow::DEPTH_TEST) };

    let start = Instant::now();
    let mut size = gl_window.window.inner_size();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::Resized(new_size),
                ..
            } => {
                if new_size.width > 0 && new_size.height > 0 {
                    size = new_size;
                    gl_window.resize(new_size.width, new_size.height);
                }
            }
            Event::AboutToWait => gl_window.window.request_redraw(),
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                unsafe {
                    gl.clear_color(0.1, 0.1, 0.14, 1.0);
                    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
                }

                if let Some(program) = &program {
                    for (unit, texture) in textures.iter().enumerate() {
                        if let Some(texture) = texture {
                            texture.bind(unit as u32);
                        }
                    }
                    program.bind();

                    let aspect = size.width as f32 / size.height as f32;
                    let projection =
                        Mat4::perspective_rh_gl(45f32.to_radians(), aspect, 0.1, 100.0);
                    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0));
                    program.set_mat4("u_projection", &projection);
                    program.set_mat4("u_view", &view);

                    let time = start.elapsed().as_secs_f32();
                    for (i, position) in CUBE_POSITIONS.iter().enumerate() {
                        program.set_mat4("u_model", &cube_model(*position, i, time));
                        cube.draw();
                    }
                }

                if let Err(e) = gl_window.swap() {
                    log::error!("swap_buffers failed: {e}");
                }
            }
            _ => {}
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cube_starts_unrotated_at_origin() {
        assert_eq!(cube_model(Vec3::ZERO, 0, 0.0), Mat4::IDENTITY);
    }

    #[test]
    fn rotation_keeps_cube_centered_on_its_slot() {
        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let model = cube_model(*position, i, 3.7);
            let center = model.transform_point3(Vec3::ZERO);
            assert!((center - *position).length() < 1e-5);
        }
    }

    #[test]
    fn cubes_start_with_staggered_angles() {
        let a = cube_model(Vec3::ZERO, 1, 0.0);
        let b = cube_model(Vec3::ZERO, 2, 0.0);
        assert_ne!(a, b);
        // index stagger matches 0.4s of spin (20 degrees vs 50 deg/s)
        let c = cube_model(Vec3::ZERO, 1, 0.4);
        let d = cube_model(Vec3::ZERO, 2, 0.0);
        assert!((c.to_cols_array()
            .iter()
            .zip(d.to_cols_array().iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0f32, f32::max))
            < 1e-5);
    }
}
