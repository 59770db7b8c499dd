//! [SDL2](https://crates.io/crates/sdl2) surface for the graphics course practices.
//!
//! [`GL33Surface`] opens the window, creates an OpenGL 3.3 core-profile, double-buffered context,
//! loads the OpenGL function pointers and checks the driver before handing out a [`GL33`] backend.

#![deny(missing_docs)]

use gfx_practice::windowing::WindowOpt;
use gfx_practice::{AppError, InputAction, Surface};
pub use gfx_practice_gl::gl33::StateQueryError;
use gfx_practice_gl::{GLVersion, GL33};
pub use sdl2;
use sdl2::event::{Event, WindowEvent};
use std::error;
use std::fmt;
use std::os::raw::c_void;

/// Error that can be risen while creating a surface.
///
/// Errors coming from SDL are prefixed by the SDL call that failed, and carry SDL’s own error text.
#[non_exhaustive]
#[derive(Debug)]
pub enum Sdl2SurfaceError {
  /// Initialization of SDL went wrong.
  InitError(String),
  /// The video subsystem could not be initialized.
  VideoInitError(String),
  /// Window creation failed.
  WindowCreationFailed(sdl2::video::WindowBuildError),
  /// Failed to create an OpenGL context.
  GlContextInitFailed(String),
  /// The OpenGL function pointers could not be loaded.
  LoaderFailed(LoaderError),
  /// The driver doesn’t provide the required OpenGL version.
  UnsupportedVersion {
    /// Version the application requires.
    required: GLVersion,
    /// Version the driver reports.
    found: GLVersion,
  },
  /// The graphics state is not available.
  ///
  /// This error is generated when the initialization code is called on a thread on which the
  /// graphics state has already been acquired.
  GraphicsStateError(StateQueryError),
  /// The event pump could not be obtained.
  EventPumpError(String),
}

impl fmt::Display for Sdl2SurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      Sdl2SurfaceError::InitError(ref e) => write!(f, "SDL_Init: {}", e),
      Sdl2SurfaceError::VideoInitError(ref e) => write!(f, "SDL_InitSubSystem(VIDEO): {}", e),
      Sdl2SurfaceError::WindowCreationFailed(ref e) => write!(f, "SDL_CreateWindow: {}", e),
      Sdl2SurfaceError::GlContextInitFailed(ref e) => write!(f, "SDL_GL_CreateContext: {}", e),
      Sdl2SurfaceError::LoaderFailed(ref e) => write!(f, "gl_load: {}", e),
      Sdl2SurfaceError::UnsupportedVersion { required, found } => write!(
        f,
        "OpenGL {} is not supported (driver reports {})",
        required, found
      ),
      Sdl2SurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
      Sdl2SurfaceError::EventPumpError(ref e) => write!(f, "SDL_PollEvent: {}", e),
    }
  }
}

impl error::Error for Sdl2SurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      Sdl2SurfaceError::WindowCreationFailed(e) => Some(e),
      Sdl2SurfaceError::LoaderFailed(e) => Some(e),
      Sdl2SurfaceError::GraphicsStateError(e) => Some(e),
      _ => None,
    }
  }
}

impl From<LoaderError> for Sdl2SurfaceError {
  fn from(e: LoaderError) -> Self {
    Sdl2SurfaceError::LoaderFailed(e)
  }
}

impl From<Sdl2SurfaceError> for AppError {
  fn from(e: Sdl2SurfaceError) -> Self {
    AppError::Surface(Box::new(e))
  }
}

/// Error codes of the OpenGL function loader.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoaderError {
  /// A required OpenGL function could not be resolved.
  MissingFunction(&'static str),
  /// The driver doesn’t report any `GL_VERSION` string.
  NoVersionString,
}

impl LoaderError {
  /// Human-readable description of the error code.
  pub fn as_str(&self) -> &'static str {
    match *self {
      LoaderError::MissingFunction(_) => "missing OpenGL function",
      LoaderError::NoVersionString => "missing OpenGL version",
    }
  }
}

impl fmt::Display for LoaderError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      LoaderError::MissingFunction(name) => write!(f, "{}: {}", self.as_str(), name),
      LoaderError::NoVersionString => f.write_str(self.as_str()),
    }
  }
}

impl error::Error for LoaderError {}

// OpenGL entry points needed to query the graphics state and the driver version.
const QUERY_FUNCTIONS: &[(&str, fn() -> bool)] = &[
  ("glGetError", gl::GetError::is_loaded),
  ("glGetFloatv", gl::GetFloatv::is_loaded),
  ("glGetIntegerv", gl::GetIntegerv::is_loaded),
  ("glGetString", gl::GetString::is_loaded),
];

// OpenGL entry points the practices render with; checked once the version is known to be fine.
const PIPELINE_FUNCTIONS: &[(&str, fn() -> bool)] = &[
  ("glClear", gl::Clear::is_loaded),
  ("glClearColor", gl::ClearColor::is_loaded),
  ("glCreateShader", gl::CreateShader::is_loaded),
  ("glShaderSource", gl::ShaderSource::is_loaded),
  ("glCompileShader", gl::CompileShader::is_loaded),
  ("glGetShaderiv", gl::GetShaderiv::is_loaded),
  ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded),
  ("glDeleteShader", gl::DeleteShader::is_loaded),
  ("glCreateProgram", gl::CreateProgram::is_loaded),
  ("glAttachShader", gl::AttachShader::is_loaded),
  ("glLinkProgram", gl::LinkProgram::is_loaded),
  ("glGetProgramiv", gl::GetProgramiv::is_loaded),
  ("glGetProgramInfoLog", gl::GetProgramInfoLog::is_loaded),
  ("glUseProgram", gl::UseProgram::is_loaded),
  ("glDeleteProgram", gl::DeleteProgram::is_loaded),
  ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
  ("glBindVertexArray", gl::BindVertexArray::is_loaded),
  ("glDeleteVertexArrays", gl::DeleteVertexArrays::is_loaded),
  ("glDrawArrays", gl::DrawArrays::is_loaded),
];

fn check_loaded(functions: &[(&'static str, fn() -> bool)]) -> Result<(), LoaderError> {
  match functions.iter().find(|(_, is_loaded)| !is_loaded()) {
    Some(&(name, _)) => Err(LoaderError::MissingFunction(name)),
    None => Ok(()),
  }
}

// The version is checked before the rendering entry points: an old driver lacks some of them and
// must be reported as unsupported rather than as a loader failure.
fn check_driver<F>(
  required: GLVersion,
  found: GLVersion,
  check_functions: F,
) -> Result<(), Sdl2SurfaceError>
where
  F: FnOnce() -> Result<(), LoaderError>,
{
  if !found.supports(required) {
    return Err(Sdl2SurfaceError::UnsupportedVersion { required, found });
  }

  check_functions().map_err(Sdl2SurfaceError::LoaderFailed)
}

/// A window with an OpenGL 3.3 core context, backed by SDL2.
///
/// ```ignore
/// use gfx_practice::windowing::WindowOpt;
/// use gfx_practice_sdl2::GL33Surface;
///
/// let surface = GL33Surface::new("My app", WindowOpt::default())
///     .expect("failed to create surface");
/// ```
pub struct GL33Surface {
  gl: GL33,
  // This struct needs to stay alive until we are done with OpenGL stuff.
  gl_context: sdl2::video::GLContext,
  window: sdl2::video::Window,
  event_pump: sdl2::EventPump,
  video: sdl2::VideoSubsystem,
  sdl: sdl2::Sdl,
}

impl GL33Surface {
  /// Open a window and create its OpenGL context.
  pub fn new(title: &str, opt: WindowOpt) -> Result<Self, Sdl2SurfaceError> {
    let sdl = sdl2::init().map_err(Sdl2SurfaceError::InitError)?;

    let video = sdl.video().map_err(Sdl2SurfaceError::VideoInitError)?;

    let required = opt.gl_version();
    let gl_attr = video.gl_attr();

    gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
    gl_attr.set_context_flags().forward_compatible().set();
    gl_attr.set_context_major_version(required.major as u8);
    gl_attr.set_context_minor_version(required.minor as u8);
    gl_attr.set_double_buffer(true);

    let window = window_builder(&video, title, &opt)
      .build()
      .map_err(Sdl2SurfaceError::WindowCreationFailed)?;
    log::info!("window created: {:?}", window.size());

    let gl_context = window
      .gl_create_context()
      .map_err(Sdl2SurfaceError::GlContextInitFailed)?;

    gl::load_with(|s| video.gl_get_proc_address(s) as *const c_void);
    check_loaded(QUERY_FUNCTIONS)?;

    let gl = GL33::new().map_err(Sdl2SurfaceError::GraphicsStateError)?;

    let version_string = gl
      .backend_version()
      .ok_or(LoaderError::NoVersionString)?;
    log::info!("OpenGL version: {}", version_string);
    log::info!(
      "OpenGL vendor: {}, renderer: {}",
      gl.backend_author().unwrap_or_default(),
      gl.backend_name().unwrap_or_default()
    );
    log::info!(
      "GLSL version: {}",
      gl.backend_shading_lang_version().unwrap_or_default()
    );

    check_driver(required, gl.version(), || check_loaded(PIPELINE_FUNCTIONS))?;

    let event_pump = sdl.event_pump().map_err(Sdl2SurfaceError::EventPumpError)?;

    Ok(GL33Surface {
      gl,
      gl_context,
      window,
      event_pump,
      video,
      sdl,
    })
  }

  /// The entry point to most of the SDL2 API.
  pub fn sdl(&self) -> &sdl2::Sdl {
    &self.sdl
  }

  /// The OpenGL backend bound to this surface’s context.
  pub fn gl(&mut self) -> &mut GL33 {
    &mut self.gl
  }
}

impl Surface for GL33Surface {
  fn poll_actions(&mut self) -> Vec<InputAction> {
    self.event_pump.poll_iter().filter_map(adapt_event).collect()
  }

  fn swap_buffers(&mut self) {
    self.window.gl_swap_window();
  }

  fn teardown(self) {
    let GL33Surface {
      gl,
      gl_context,
      window,
      event_pump,
      video,
      sdl,
    } = self;

    drop(gl);
    drop(gl_context);
    log::debug!("OpenGL context destroyed");
    drop(window);
    log::debug!("window destroyed");
    drop(event_pump);
    drop(video);
    drop(sdl);
  }
}

fn window_builder(
  video: &sdl2::VideoSubsystem,
  title: &str,
  opt: &WindowOpt,
) -> sdl2::video::WindowBuilder {
  let (width, height) = opt.size();
  let mut builder = video.window(title, width, height);

  if opt.is_centered() {
    builder.position_centered();
  }

  if opt.is_resizable() {
    builder.resizable();
  }

  if opt.is_maximized() {
    builder.maximized();
  }

  builder.opengl();
  builder
}

fn adapt_event(event: Event) -> Option<InputAction> {
  match event {
    Event::Quit { .. } => Some(InputAction::Quit),

    Event::Window {
      win_event: WindowEvent::SizeChanged(width, height),
      ..
    } => Some(InputAction::Resized {
      width: width.max(0) as u32,
      height: height.max(0) as u32,
    }),

    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::error::Error as _;

  #[test]
  fn quit_event_becomes_quit_action() {
    assert_eq!(
      adapt_event(Event::Quit { timestamp: 0 }),
      Some(InputAction::Quit)
    );
  }

  #[test]
  fn size_changes_become_resized_actions() {
    let event = Event::Window {
      timestamp: 0,
      window_id: 1,
      win_event: WindowEvent::SizeChanged(1024, 768),
    };

    assert_eq!(
      adapt_event(event),
      Some(InputAction::Resized {
        width: 1024,
        height: 768
      })
    );
  }

  #[test]
  fn other_events_are_ignored() {
    let moved = Event::Window {
      timestamp: 0,
      window_id: 1,
      win_event: WindowEvent::Moved(10, 10),
    };

    assert_eq!(adapt_event(moved), None);
    assert_eq!(adapt_event(Event::AppTerminating { timestamp: 0 }), None);
  }

  #[test]
  fn sdl_errors_are_prefixed_by_the_failed_call() {
    let e = Sdl2SurfaceError::InitError("No available video device".to_owned());
    assert_eq!(e.to_string(), "SDL_Init: No available video device");

    let e = Sdl2SurfaceError::GlContextInitFailed("Could not create GL context".to_owned());
    assert_eq!(
      e.to_string(),
      "SDL_GL_CreateContext: Could not create GL context"
    );
  }

  #[test]
  fn loader_errors_use_the_code_description() {
    let e = Sdl2SurfaceError::from(LoaderError::MissingFunction("glCreateShader"));

    assert_eq!(
      e.to_string(),
      "gl_load: missing OpenGL function: glCreateShader"
    );
    assert!(e.source().is_some());
    assert_eq!(
      LoaderError::NoVersionString.to_string(),
      "missing OpenGL version"
    );
  }

  #[test]
  fn unsupported_version_message() {
    let e = Sdl2SurfaceError::UnsupportedVersion {
      required: GLVersion::new(3, 3),
      found: GLVersion::new(2, 1),
    };

    assert_eq!(
      e.to_string(),
      "OpenGL 3.3 is not supported (driver reports 2.1)"
    );
  }

  #[test]
  fn nothing_is_loaded_without_a_context() {
    assert_eq!(
      check_loaded(QUERY_FUNCTIONS),
      Err(LoaderError::MissingFunction("glGetError"))
    );
    assert_eq!(
      check_loaded(PIPELINE_FUNCTIONS),
      Err(LoaderError::MissingFunction("glClear"))
    );
    assert_eq!(check_loaded(&[]), Ok(()));
  }

  #[test]
  fn old_drivers_are_unsupported_before_missing_functions() {
    let missing = || Err(LoaderError::MissingFunction("glGenVertexArrays"));
    let e = check_driver(GLVersion::new(3, 3), GLVersion::new(2, 1), missing).unwrap_err();

    assert_eq!(
      e.to_string(),
      "OpenGL 3.3 is not supported (driver reports 2.1)"
    );
  }

  #[test]
  fn supported_drivers_still_need_every_function() {
    let missing = || Err(LoaderError::MissingFunction("glGenVertexArrays"));
    let e = check_driver(GLVersion::new(3, 3), GLVersion::new(4, 6), missing).unwrap_err();

    assert!(matches!(
      e,
      Sdl2SurfaceError::LoaderFailed(LoaderError::MissingFunction("glGenVertexArrays"))
    ));
    assert!(check_driver(GLVersion::new(3, 3), GLVersion::new(3, 3), || Ok(())).is_ok());
  }

  #[test]
  fn surface_errors_turn_into_app_errors() {
    let e = AppError::from(Sdl2SurfaceError::EventPumpError("busy".to_owned()));
    assert_eq!(e.to_string(), "SDL_PollEvent: busy");
  }
}
