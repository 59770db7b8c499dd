//! Graphics course, practice 1: a checkerboard triangle.
//!
//! This crate holds the platform-agnostic part of the practice: the shaders, the render context that
//! owns every graphics handle, and the render loop. The window, its OpenGL context and the system
//! events come from a [`Surface`] implementation, such as the SDL2 one in [gfx-practice-sdl2].
//!
//! # Lifecycle
//!
//! 1. A surface opens the window, creates the OpenGL 3.3 core context and loads the driver.
//! 2. [`CheckerTriangle::bootstrap`] compiles and links the program and allocates the vertex array.
//! 3. [`RenderContext::run`] polls, clears, draws and swaps until a [`InputAction::Quit`] shows up.
//! 4. [`RenderContext::teardown`] releases the GPU objects, then the context and the window.
//!
//! Every failure is fatal and propagated to the caller as an [`AppError`].
//!
//! [gfx-practice-sdl2]: ../gfx_practice_sdl2/index.html

#![deny(missing_docs)]

pub mod checkerboard;
mod render;
pub mod windowing;

pub use render::{CheckerTriangle, RenderContext};

use gfx_practice_gl::{ProgramError, StateQueryError};
use std::error;
use std::fmt;
use windowing::WindowOpt;

/// Title of the practice window.
pub const TITLE: &str = "Graphics course practice 1";

/// Clear color of the practice: pale blue-lavender, with a zero alpha.
pub const CLEAR_COLOR: [f32; 4] = [0.8, 0.8, 1., 0.];

/// A type used to pass “inputs” to the render loop.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputAction {
  /// Quit the application.
  Quit,

  /// Framebuffer size changed.
  Resized {
    /// New width.
    width: u32,
    /// New height.
    height: u32,
  },
}

/// What the render loop should do after an iteration.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum LoopFeedback {
  /// Keep looping.
  Continue,
  /// Leave the loop; nothing was rendered in this iteration.
  Exit,
}

/// A window with an OpenGL context bound to it.
pub trait Surface {
  /// Drain all the pending system events and return the ones the application cares about.
  ///
  /// This must not block.
  fn poll_actions(&mut self) -> Vec<InputAction>;

  /// Present the back buffer.
  fn swap_buffers(&mut self);

  /// Destroy the OpenGL context, then the window.
  fn teardown(self)
  where
    Self: Sized;
}

/// Something that renders one frame into the current back buffer.
pub trait Frame {
  /// Render a frame.
  fn render_frame(&mut self);
}

/// Application configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
  /// Window title.
  pub title: String,
  /// Window options.
  pub window: WindowOpt,
  /// Color the back buffer is cleared with every frame.
  pub clear_color: [f32; 4],
}

impl Default for Config {
  fn default() -> Self {
    Config {
      title: TITLE.to_owned(),
      window: WindowOpt::default(),
      clear_color: CLEAR_COLOR,
    }
  }
}

/// Errors that can stop the application.
#[non_exhaustive]
#[derive(Debug)]
pub enum AppError {
  /// The window, its context or the driver could not be set up.
  Surface(Box<dyn error::Error + 'static>),
  /// The graphics state could not be acquired.
  GraphicsState(StateQueryError),
  /// The shader program could not be built.
  Program(ProgramError),
}

impl fmt::Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      AppError::Surface(ref e) => write!(f, "{}", e),
      AppError::GraphicsState(ref e) => write!(f, "failed to get graphics state: {}", e),
      AppError::Program(ref e) => write!(f, "{}", e),
    }
  }
}

impl error::Error for AppError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      AppError::Surface(e) => Some(e.as_ref()),
      AppError::GraphicsState(e) => Some(e),
      AppError::Program(e) => Some(e),
    }
  }
}

impl From<StateQueryError> for AppError {
  fn from(e: StateQueryError) -> Self {
    AppError::GraphicsState(e)
  }
}

impl From<ProgramError> for AppError {
  fn from(e: ProgramError) -> Self {
    AppError::Program(e)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use gfx_practice_gl::{StageError, StageType};
  use std::error::Error as _;

  #[test]
  fn default_config() {
    let config = Config::default();

    assert_eq!(config.title, "Graphics course practice 1");
    assert_eq!(config.clear_color, [0.8, 0.8, 1., 0.]);
    assert_eq!(config.window, WindowOpt::default());
  }

  #[test]
  fn program_errors_keep_the_log() {
    let stage = StageError::compilation_failed(StageType::FragmentShader, "0:7(3): error: bad");
    let e = AppError::from(ProgramError::from(stage));

    assert!(e.to_string().contains("0:7(3): error: bad"));
    assert!(e.source().is_some());
  }

  #[test]
  fn surface_errors_display_as_is() {
    let e = AppError::Surface("SDL_Init: no video device".into());
    assert_eq!(e.to_string(), "SDL_Init: no video device");
  }
}
