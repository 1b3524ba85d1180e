//! Browser host: requestAnimationFrame, DOM key events, WebGPU canvas

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

use super::{FrameHandle, Host};
use crate::error::SetupError;
use crate::input::InputState;
use crate::renderer::{Canvas, RenderState, VertexBatch};

/// Element ids the host looks up
pub const CANVAS_ID: &str = "gameCanvas";
pub const GAME_CONTAINER_ID: &str = "game-container";

pub struct WebHost {
    window: Window,
    document: Document,
    canvas: Option<HtmlCanvasElement>,
    /// Written by key listeners, read once per tick
    input: Rc<Cell<InputState>>,
    /// Persistent callback handed to every requestAnimationFrame
    frame_callback: Option<Closure<dyn FnMut(f64)>>,
    key_listeners: Vec<Closure<dyn FnMut(KeyboardEvent)>>,
    batch: VertexBatch,
    renderer: Option<RenderState>,
}

impl WebHost {
    /// Host for the page's game canvas; a missing canvas is reported by
    /// `resize_surface`, not here
    pub fn new(window: Window, document: Document) -> Self {
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        Self {
            window,
            document,
            canvas,
            input: Rc::new(Cell::new(InputState::default())),
            frame_callback: None,
            key_listeners: Vec::new(),
            batch: VertexBatch::default(),
            renderer: None,
        }
    }

    pub fn canvas(&self) -> Option<&HtmlCanvasElement> {
        self.canvas.as_ref()
    }

    pub fn set_frame_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.frame_callback = Some(callback);
    }

    pub fn set_renderer(&mut self, renderer: RenderState) {
        self.renderer = Some(renderer);
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    fn listen(&mut self, event: &str, held: bool) {
        let input = self.input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |key_event: KeyboardEvent| {
            let key = key_event.key();
            let mut flags = input.get();
            let bound = if held {
                flags.key_down(&key)
            } else {
                flags.key_up(&key)
            };
            if bound {
                input.set(flags);
            }
        });
        if let Err(err) = self
            .document
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::error!("Failed to add {event} listener: {err:?}");
        }
        self.key_listeners.push(closure);
    }
}

impl Host for WebHost {
    fn input(&self) -> InputState {
        self.input.get()
    }

    fn attach_input(&mut self) {
        self.listen("keydown", true);
        self.listen("keyup", false);
    }

    fn request_frame(&mut self) -> FrameHandle {
        let Some(callback) = &self.frame_callback else {
            log::error!("Frame requested before the frame callback was set");
            return FrameHandle(0);
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle(id),
            Err(err) => {
                log::error!("requestAnimationFrame failed: {err:?}");
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }

    fn resize_surface(&mut self, width: f32, height: f32) -> Result<(), SetupError> {
        let canvas = self
            .canvas
            .as_ref()
            .ok_or_else(|| SetupError::SurfaceMissing(CANVAS_ID.to_string()))?;
        let (width, height) = (width.round() as u32, height.round() as u32);
        canvas.set_width(width);
        canvas.set_height(height);
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
        Ok(())
    }

    fn surface(&mut self) -> Option<&mut dyn Canvas> {
        self.canvas.as_ref()?;
        Some(&mut self.batch as &mut dyn Canvas)
    }

    fn present(&mut self) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        match renderer.render(&self.batch) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                renderer.resize(renderer.size.0, renderer.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    fn show_setup_error(&mut self, error: &SetupError) {
        match self.document.get_element_by_id(GAME_CONTAINER_ID) {
            Some(container) => container.set_inner_html(&format!(
                "<p style=\"color:red;\">{}</p>",
                error.placeholder_text()
            )),
            None => log::error!("No container to show setup error in: {error}"),
        }
    }
}
