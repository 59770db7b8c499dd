//! Query API implementation for OpenGL 3.3.

use crate::gl33::GL33;
use gl::types::*;
use std::ffi::CStr;
use std::fmt;
use std::os::raw::c_char;

/// OpenGL version, as reported by the driver.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GLVersion {
  /// Major version number.
  pub major: u32,
  /// Minor version number.
  pub minor: u32,
}

impl GLVersion {
  /// Create a version.
  pub const fn new(major: u32, minor: u32) -> Self {
    GLVersion { major, minor }
  }

  /// Does this version include the whole feature set of `required`?
  pub fn supports(&self, required: GLVersion) -> bool {
    *self >= required
  }
}

impl fmt::Display for GLVersion {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "{}.{}", self.major, self.minor)
  }
}

impl GL33 {
  /// Name of the company responsible for the OpenGL implementation.
  pub fn backend_author(&self) -> Option<String> {
    unsafe { get_string(gl::VENDOR) }
  }

  /// Name of the renderer, typically the GPU.
  pub fn backend_name(&self) -> Option<String> {
    unsafe { get_string(gl::RENDERER) }
  }

  /// Version string of the OpenGL implementation.
  pub fn backend_version(&self) -> Option<String> {
    unsafe { get_string(gl::VERSION) }
  }

  /// Version string of the shading language.
  pub fn backend_shading_lang_version(&self) -> Option<String> {
    unsafe { get_string(gl::SHADING_LANGUAGE_VERSION) }
  }

  /// Numeric version of the current context.
  pub fn version(&self) -> GLVersion {
    unsafe { context_version() }
  }
}

/// Numeric version of the current context.
///
/// Contexts older than 3.0 don’t know about `GL_MAJOR_VERSION`; the query then leaves the value
/// untouched and the version reads as `0.0`.
///
/// # Unsafety
///
/// An OpenGL context must be current and its function pointers loaded.
pub(crate) unsafe fn context_version() -> GLVersion {
  let mut major: GLint = 0;
  let mut minor: GLint = 0;
  gl::GetIntegerv(gl::MAJOR_VERSION, &mut major);
  gl::GetIntegerv(gl::MINOR_VERSION, &mut minor);

  GLVersion::new(major.max(0) as u32, minor.max(0) as u32)
}

/// Read a driver string such as `GL_VERSION`.
///
/// # Unsafety
///
/// An OpenGL context must be current and its function pointers loaded.
pub(crate) unsafe fn get_string(name: GLenum) -> Option<String> {
  let ptr = gl::GetString(name);

  if ptr.is_null() {
    None
  } else {
    Some(
      CStr::from_ptr(ptr as *const c_char)
        .to_string_lossy()
        .into_owned(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn version_ordering() {
    let required = GLVersion::new(3, 3);

    assert!(GLVersion::new(3, 3).supports(required));
    assert!(GLVersion::new(4, 0).supports(required));
    assert!(GLVersion::new(4, 6).supports(required));
    assert!(!GLVersion::new(3, 2).supports(required));
    assert!(!GLVersion::new(2, 1).supports(required));
    assert!(!GLVersion::new(0, 0).supports(required));
  }

  #[test]
  fn version_display() {
    assert_eq!(GLVersion::new(3, 3).to_string(), "3.3");
    assert_eq!(GLVersion::new(4, 60).to_string(), "4.60");
  }
}
