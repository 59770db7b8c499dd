//! Window configuration.
//!
//! These types describe the window the practices open. They don’t depend on any windowing crate; a
//! surface implementation (e.g. [gfx-practice-sdl2]) reads them when creating its window.
//!
//! [gfx-practice-sdl2]: ../../gfx_practice_sdl2/index.html

use gfx_practice_gl::GLVersion;

/// Different window options.
///
/// Feel free to look at the different methods available to tweak the options. You may want to start
/// with `default()` though.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  width: u32,
  height: u32,
  resizable: bool,
  maximized: bool,
  centered: bool,
  gl_version: GLVersion,
}

impl Default for WindowOpt {
  /// Defaults:
  ///
  /// - `size` set to 800 × 600.
  /// - `resizable` set to `true`.
  /// - `maximized` set to `true`.
  /// - `centered` set to `true`.
  /// - `gl_version` set to 3.3.
  fn default() -> Self {
    WindowOpt {
      width: 800,
      height: 600,
      resizable: true,
      maximized: true,
      centered: true,
      gl_version: GLVersion::new(3, 3),
    }
  }
}

impl WindowOpt {
  /// Set the initial size of the window.
  #[inline]
  pub fn set_size(self, width: u32, height: u32) -> Self {
    WindowOpt {
      width,
      height,
      ..self
    }
  }

  /// Initial size of the window, as `(width, height)`.
  #[inline]
  pub fn size(&self) -> (u32, u32) {
    (self.width, self.height)
  }

  /// Whether the window is resizable.
  #[inline]
  pub fn is_resizable(&self) -> bool {
    self.resizable
  }

  /// Start the window maximized.
  #[inline]
  pub fn set_maximized(self, maximized: bool) -> Self {
    WindowOpt { maximized, ..self }
  }

  /// Whether the window starts maximized.
  #[inline]
  pub fn is_maximized(&self) -> bool {
    self.maximized
  }

  /// Whether the window is centered.
  #[inline]
  pub fn is_centered(&self) -> bool {
    self.centered
  }

  /// OpenGL version to request (and require) for the context.
  #[inline]
  pub fn gl_version(&self) -> GLVersion {
    self.gl_version
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let opt = WindowOpt::default();

    assert_eq!(opt.size(), (800, 600));
    assert!(opt.is_resizable());
    assert!(opt.is_maximized());
    assert!(opt.is_centered());
    assert_eq!(opt.gl_version(), GLVersion::new(3, 3));
  }

  #[test]
  fn setters_only_touch_their_field() {
    let opt = WindowOpt::default().set_size(640, 480).set_maximized(false);

    assert_eq!(opt.size(), (640, 480));
    assert!(!opt.is_maximized());
    assert!(opt.is_resizable());
    assert!(opt.is_centered());
    assert_eq!(opt.gl_version(), GLVersion::new(3, 3));
  }
}
