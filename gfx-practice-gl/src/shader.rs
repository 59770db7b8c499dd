//! Shader API.
//!
//! Shader stages are compiled from source strings and linked into programs. Both operations are
//! checked against the driver and any failure carries the compiler or linker log verbatim.

use std::error;
use std::fmt;

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile.
  ///
  /// The `String` is the compiler log, as reported by the driver.
  CompilationFailed(StageType, String),
}

impl StageError {
  /// Create a compilation error.
  pub fn compilation_failed(ty: StageType, reason: impl Into<String>) -> Self {
    StageError::CompilationFailed(ty, reason.into())
  }

  /// The compiler log carried by this error.
  pub fn log(&self) -> &str {
    match *self {
      StageError::CompilationFailed(_, ref log) => log,
    }
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),
    }
  }
}

impl error::Error for StageError {}

/// Errors that a [`Program`](crate::Program) can generate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// Program link failed. You can inspect the reason by looking at the contained `String`.
  LinkFailed(String),
}

impl ProgramError {
  /// Create a link error.
  pub fn link_failed(reason: impl Into<String>) -> Self {
    ProgramError::LinkFailed(reason.into())
  }
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),

      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      ProgramError::LinkFailed(_) => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::error::Error as _;

  #[test]
  fn stage_error_carries_log_verbatim() {
    let log = "0:3(1): error: syntax error, unexpected '}'\n";
    let e = StageError::compilation_failed(StageType::FragmentShader, log);

    assert_eq!(e.log(), log);
    assert_eq!(
      e.to_string(),
      format!("fragment shader compilation error: {}", log)
    );
  }

  #[test]
  fn link_error_display() {
    let e = ProgramError::link_failed("error: vertex shader lacks `main'");
    assert_eq!(
      e.to_string(),
      "shader program failed to link: error: vertex shader lacks `main'"
    );
    assert!(e.source().is_none());
  }

  #[test]
  fn stage_error_converts_into_program_error() {
    let stage = StageError::compilation_failed(StageType::VertexShader, "oops");
    let e = ProgramError::from(stage.clone());

    assert_eq!(e, ProgramError::StageError(stage));
    assert!(e.source().is_some());
    assert!(e.to_string().contains("vertex shader compilation error: oops"));
  }
}
