//! Graphics state.

use gl::types::*;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

// TLS synchronization barrier for `GLState`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

/// Cached value.
///
/// A cached value is used to prevent issuing GPU commands if we know the target value is already
/// set to what the command tries to set.
#[derive(Debug)]
struct Cached<T>(Option<T>)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  fn new(initial: T) -> Self {
    Cached(Some(initial))
  }

  fn set(&mut self, value: T) {
    self.0 = Some(value);
  }

  /// A non-cached value (i.e. empty) is always invalid whatever compared value.
  fn is_invalid(&self, new_val: &T) -> bool {
    match &self.0 {
      Some(ref t) => t != new_val,
      _ => true,
    }
  }
}

/// The graphics state.
///
/// This type represents the current state of a given graphics context. It adds a small cache layer
/// over the few bindings the practices touch every frame, so that binding the same program or vertex
/// array twice in a row doesn’t reach the driver.
#[derive(Debug)]
pub struct GLState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  // clear buffers
  clear_color: Cached<[GLfloat; 4]>,

  // vertex array
  bound_vertex_array: GLuint,

  // shader program
  current_program: GLuint,
}

impl GLState {
  /// Create a new `GLState`.
  ///
  /// > Note: keep in mind you can create only one per thread.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    TLS_ACQUIRE_GFX_STATE.with(|rc| {
      let mut inner = rc.borrow_mut();

      match *inner {
        Some(_) => {
          inner.take();
          Self::get_from_context()
        }

        None => Err(StateQueryError::UnavailableGLState),
      }
    })
  }

  /// Get a `GLState` from the current OpenGL context.
  fn get_from_context() -> Result<Self, StateQueryError> {
    unsafe {
      let clear_color = Cached::new(get_ctx_clear_color()?);
      let bound_vertex_array = get_ctx_bound_vertex_array()?;
      let current_program = get_ctx_current_program()?;

      Ok(GLState {
        _a: PhantomData,
        clear_color,
        bound_vertex_array,
        current_program,
      })
    }
  }

  /// Invalidate the currently in-use shader program.
  pub fn invalidate_shader_program(&mut self) {
    self.current_program = 0;
  }

  /// Handle of the vertex array the cache believes is bound.
  pub fn bound_vertex_array(&self) -> GLuint {
    self.bound_vertex_array
  }

  /// Handle of the shader program the cache believes is in use.
  pub fn current_program(&self) -> GLuint {
    self.current_program
  }

  pub(crate) unsafe fn set_clear_color(&mut self, clear_color: [GLfloat; 4]) {
    if self.clear_color.is_invalid(&clear_color) {
      gl::ClearColor(
        clear_color[0],
        clear_color[1],
        clear_color[2],
        clear_color[3],
      );
      self.clear_color.set(clear_color);
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_vertex_array != handle {
      gl::BindVertexArray(handle);
      self.bound_vertex_array = handle;
    } else {
      log::trace!("vertex array {} already bound", handle);
    }
  }

  pub(crate) unsafe fn unbind_vertex_array(&mut self) {
    self.bind_vertex_array(0, Bind::Cached)
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.current_program != handle {
      gl::UseProgram(handle);
      self.current_program = handle;
    } else {
      log::trace!("program {} already in use", handle);
    }
  }
}

/// Should the binding be cached or forced to the provided value?
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Bind {
  Forced,
  Cached,
}

/// An error that might happen when the context is queried.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// The [`GLState`] object is unavailable.
  ///
  /// That might occur if the current thread doesn’t support allocating a new graphics state. It
  /// might happen if you try to have more than one state on the same thread, for instance.
  UnavailableGLState,
  /// The driver reported a negative object handle.
  InvalidHandle(&'static str, GLint),
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
      StateQueryError::InvalidHandle(what, h) => write!(f, "invalid {} handle: {}", what, h),
    }
  }
}

impl error::Error for StateQueryError {}

unsafe fn get_ctx_clear_color() -> Result<[GLfloat; 4], StateQueryError> {
  let mut data = [0.; 4];
  gl::GetFloatv(gl::COLOR_CLEAR_VALUE, data.as_mut_ptr());
  Ok(data)
}

unsafe fn get_ctx_bound_vertex_array() -> Result<GLuint, StateQueryError> {
  let mut bound: GLint = 0;
  gl::GetIntegerv(gl::VERTEX_ARRAY_BINDING, &mut bound);
  handle_from_int("vertex array", bound)
}

unsafe fn get_ctx_current_program() -> Result<GLuint, StateQueryError> {
  let mut used: GLint = 0;
  gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut used);
  handle_from_int("program", used)
}

fn handle_from_int(what: &'static str, h: GLint) -> Result<GLuint, StateQueryError> {
  GLuint::try_from(h).map_err(|_| StateQueryError::InvalidHandle(what, h))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cached_value_comparison() {
    let mut c = Cached::new([0.8, 0.8, 1., 0.]);

    assert!(!c.is_invalid(&[0.8, 0.8, 1., 0.]));
    assert!(c.is_invalid(&[0., 0., 0., 1.]));

    c.set([0., 0., 0., 1.]);
    assert!(!c.is_invalid(&[0., 0., 0., 1.]));
    assert!(c.is_invalid(&[0.8, 0.8, 1., 0.]));
  }

  #[test]
  fn negative_handles_are_rejected() {
    assert_eq!(handle_from_int("program", 3).unwrap(), 3);
    assert!(matches!(
      handle_from_int("program", -1),
      Err(StateQueryError::InvalidHandle("program", -1))
    ));
  }
}
