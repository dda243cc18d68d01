//! Window + GL context setup
//!
//! Packages the glutin-winit dance: pick a config, create a 3.3 core
//! context and a window surface, make the context current, load glow.
//! Create one of these before touching any other GL resource.

use std::error::Error;
use std::ffi::CString;
use std::num::NonZeroU32;
use std::rc::Rc;

use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

pub struct GlWindow {
    pub window: Window,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: Rc<glow::Context>,
}

impl GlWindow {
    pub fn new(
        event_loop: &EventLoop<()>,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Self, Box<dyn Error>> {
        let window_builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder.build(event_loop, template, |configs| {
            configs
                .reduce(|accum, config| {
                    if config.num_samples() > accum.num_samples() {
                        config
                    } else {
                        accum
                    }
                })
                .unwrap()
        })?;
        let window = window.ok_or("no window created")?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();
        let not_current_context =
            unsafe { gl_display.create_context(&gl_config, &context_attributes)? };

        let size = window.inner_size();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(size.width.max(1)).ok_or("zero width")?,
            NonZeroU32::new(size.height.max(1)).ok_or("zero height")?,
        );
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes)? };

        let context = not_current_context.make_current(&surface)?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                let c_str = CString::new(s).unwrap();
                gl_display.get_proc_address(&c_str) as *const _
            })
        };

        log::info!(
            "created {}x{} window, GL 3.3 core, {} samples",
            size.width,
            size.height,
            gl_config.num_samples()
        );

        Ok(Self {
            window,
            surface,
            context,
            gl: Rc::new(gl),
        })
    }

    /// Shared handle to the loaded GL functions.
    pub fn gl(&self) -> Rc<glow::Context> {
        Rc::clone(&self.gl)
    }

    pub fn resize(&self, width: u32, height: u32) {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        self.surface.resize(&self.context, w, h);
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) };
    }

    pub fn swap(&self) -> Result<(), glutin::error::Error> {
        self.surface.swap_buffers(&self.context)
    }
}
