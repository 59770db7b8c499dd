use crate::gl33::state::{Bind, GLState};
use crate::gl33::GL33;
use gl::types::*;
use std::cell::RefCell;
use std::rc::Rc;

/// A vertex array object without any attribute.
///
/// Core profile contexts refuse to draw without a bound vertex array, even when the vertex shader
/// fetches nothing. Attributeless rendering spawns the vertices in the shader from `gl_VertexID`.
#[derive(Debug)]
pub struct VertexArray {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl VertexArray {
  /// Create a new, empty vertex array.
  pub fn new(gl: &mut GL33) -> Self {
    let mut handle: GLuint = 0;

    unsafe {
      gl::GenVertexArrays(1, &mut handle);

      // force binding the vertex array so that the driver actually creates the object
      let mut state = gl.state.borrow_mut();
      state.bind_vertex_array(handle, Bind::Forced);
    }

    log::debug!("vertex array created (handle {})", handle);

    VertexArray {
      handle,
      state: gl.state.clone(),
    }
  }

  /// Bind the vertex array.
  pub fn bind(&self) {
    unsafe {
      self
        .state
        .borrow_mut()
        .bind_vertex_array(self.handle, Bind::Cached)
    }
  }

  /// Bind the vertex array and render `vert_nb` vertices as triangles.
  pub fn render(&self, vert_nb: usize) {
    self.bind();

    unsafe {
      gl::DrawArrays(gl::TRIANGLES, 0, vert_nb as GLsizei);
    }
  }

  /// OpenGL handle of the vertex array object.
  pub fn handle(&self) -> GLuint {
    self.handle
  }
}

impl Drop for VertexArray {
  fn drop(&mut self) {
    unsafe {
      let mut state = self.state.borrow_mut();

      if state.bound_vertex_array() == self.handle {
        state.unbind_vertex_array();
      }

      gl::DeleteVertexArrays(1, &self.handle);
    }
  }
}
