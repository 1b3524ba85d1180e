//! Platform abstraction layer
//!
//! The game loop never touches a browser API directly. A [`Host`] supplies:
//! - Frame scheduling (request / cancel the next display refresh)
//! - Input (a snapshot of the held-direction flags)
//! - The drawing surface and setup-fault display

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::error::SetupError;
use crate::input::InputState;
use crate::renderer::Canvas;

/// Ticket for a requested frame, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Everything the game loop needs from its environment
pub trait Host {
    /// Current movement flags, read once per tick
    fn input(&self) -> InputState;

    /// Start delivering key events into the movement flags
    ///
    /// The loop calls this at most once per host.
    fn attach_input(&mut self);

    /// Ask for `GameLoop::frame` on the next display refresh
    fn request_frame(&mut self) -> FrameHandle;

    /// Drop a frame request that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Size the drawing surface to the field; fails if there is no surface
    fn resize_surface(&mut self, width: f32, height: f32) -> Result<(), SetupError>;

    /// Drawing target for the current frame
    fn surface(&mut self) -> Option<&mut dyn Canvas>;

    /// Push the drawn frame to the screen
    fn present(&mut self);

    /// Replace the game view with a visible error
    fn show_setup_error(&mut self, error: &SetupError);
}
