use crate::gl33::state::GLState;
use crate::gl33::GL33;
use crate::shader::{ProgramError, StageError, StageType};
use gl::types::*;
use std::cell::RefCell;
use std::ffi::CString;
use std::ptr::null;
use std::rc::Rc;

/// A compiled shader stage.
///
/// The shader object is deleted when the stage is dropped. If it is still attached to a program, the
/// driver defers the deletion until the program goes away.
#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

impl Stage {
  /// Compile a shader stage from its source.
  ///
  /// The source is handed to the driver verbatim, so it must carry its own `#version` directive.
  pub fn new(_: &mut GL33, ty: StageType, src: &str) -> Result<Self, StageError> {
    let c_src = CString::new(src.as_bytes())
      .map_err(|e| StageError::compilation_failed(ty, format!("invalid source: {}", e)))?;

    unsafe {
      let handle = gl::CreateShader(opengl_shader_type(ty));

      if handle == 0 {
        return Err(StageError::compilation_failed(
          ty,
          "unable to create shader stage",
        ));
      }

      gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
      gl::CompileShader(handle);

      let mut compiled: GLint = gl::FALSE.into();
      gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

      if compiled == gl::TRUE.into() {
        log::debug!("{} compiled (handle {})", ty, handle);
        Ok(Stage { handle })
      } else {
        let mut log_len: GLint = 0;
        gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log = vec![0u8; log_len.max(0) as usize];
        let mut written: GLsizei = 0;
        gl::GetShaderInfoLog(
          handle,
          log_len,
          &mut written,
          log.as_mut_ptr() as *mut GLchar,
        );

        gl::DeleteShader(handle);

        Err(StageError::compilation_failed(ty, info_log(log, written)))
      }
    }
  }

  /// OpenGL handle of the shader object.
  pub fn handle(&self) -> GLuint {
    self.handle
  }
}

/// A linked shader program.
///
/// The program object is deleted when dropped; if it was the program in use, the cached binding is
/// invalidated.
#[derive(Debug)]
pub struct Program {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Program {
  fn drop(&mut self) {
    unsafe {
      let mut state = self.state.borrow_mut();

      if state.current_program() == self.handle {
        state.invalidate_shader_program();
      }

      gl::DeleteProgram(self.handle);
    }
  }
}

impl Program {
  /// Link a vertex stage and a fragment stage into a program.
  ///
  /// Stages are left attached after a successful link.
  pub fn new(gl: &mut GL33, vertex: &Stage, fragment: &Stage) -> Result<Self, ProgramError> {
    unsafe {
      let handle = gl::CreateProgram();

      if handle == 0 {
        return Err(ProgramError::link_failed("unable to create shader program"));
      }

      gl::AttachShader(handle, vertex.handle);
      gl::AttachShader(handle, fragment.handle);

      let program = Program {
        handle,
        state: gl.state.clone(),
      };
      program.link().map(move |_| program)
    }
  }

  /// Compile both stages from their sources and link them.
  ///
  /// The fragment stage is compiled first.
  pub fn from_strings(gl: &mut GL33, vertex_src: &str, fragment_src: &str) -> Result<Self, ProgramError> {
    let fragment = Stage::new(gl, StageType::FragmentShader, fragment_src)?;
    let vertex = Stage::new(gl, StageType::VertexShader, vertex_src)?;

    Self::new(gl, &vertex, &fragment)
  }

  fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    unsafe {
      gl::LinkProgram(handle);

      let mut linked: GLint = gl::FALSE.into();
      gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

      if linked == gl::TRUE.into() {
        log::debug!("program linked (handle {})", handle);
        Ok(())
      } else {
        let mut log_len: GLint = 0;
        gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log = vec![0u8; log_len.max(0) as usize];
        let mut written: GLsizei = 0;
        gl::GetProgramInfoLog(
          handle,
          log_len,
          &mut written,
          log.as_mut_ptr() as *mut GLchar,
        );

        Err(ProgramError::link_failed(info_log(log, written)))
      }
    }
  }

  /// Make this program the one in use for subsequent draw calls.
  pub fn use_program(&self) {
    unsafe { self.state.borrow_mut().use_program(self.handle) }
  }

  /// OpenGL handle of the program object.
  pub fn handle(&self) -> GLuint {
    self.handle
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

// Turn an info log buffer into a string, keeping only what the driver wrote (no trailing NUL).
fn info_log(mut log: Vec<u8>, written: GLsizei) -> String {
  let written = (written.max(0) as usize).min(log.len());
  log.truncate(written);

  while log.last() == Some(&0) {
    log.pop();
  }

  String::from_utf8_lossy(&log).into_owned()
}
