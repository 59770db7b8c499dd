//! OpenGL 3.3 backend.
//!
//! The backend type is [`GL33`]. It must be created on the thread owning the OpenGL context, after the
//! function pointers have been loaded.

mod query;
mod shader;
mod state;
mod vertex_array;

pub use self::query::GLVersion;
pub use self::shader::{Program, Stage};
pub use self::state::GLState;
pub use self::state::StateQueryError;
pub use self::vertex_array::VertexArray;
use gl::types::*;
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 3.3 backend.
///
/// Cloning a [`GL33`] is cheap and shares the same underlying [`GLState`].
#[derive(Clone, Debug)]
pub struct GL33 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// Only one backend can be created per thread; the second call fails with
  /// [`StateQueryError::UnavailableGLState`].
  pub fn new() -> Result<Self, StateQueryError> {
    GLState::new().map(|state| GL33 {
      state: Rc::new(RefCell::new(state)),
    })
  }

  /// Internal access to the backend state.
  ///
  /// # Unsafety
  ///
  /// This method exposes the internals of the backend. Mutating the state behind the back of the
  /// cache will desynchronize it from the GPU.
  pub unsafe fn state(&self) -> &Rc<RefCell<GLState>> {
    &self.state
  }

  /// Set the color used to clear the color buffer.
  pub fn set_clear_color(&mut self, clear_color: [GLfloat; 4]) {
    unsafe { self.state.borrow_mut().set_clear_color(clear_color) }
  }

  /// Clear the color buffer of the currently bound framebuffer with the current clear color.
  pub fn clear_color_buffer(&mut self) {
    unsafe {
      gl::Clear(gl::COLOR_BUFFER_BIT);
    }
  }

  /// Read the last OpenGL error, if any.
  ///
  /// This resets the error flag on the driver side.
  pub fn last_error(&self) -> Option<GLenum> {
    match unsafe { gl::GetError() } {
      gl::NO_ERROR => None,
      e => Some(e),
    }
  }
}
