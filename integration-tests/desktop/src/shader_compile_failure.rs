use gfx_practice::windowing::WindowOpt;
use gfx_practice_gl::{Stage, StageError, StageType};
use gfx_practice_sdl2::GL33Surface;

// missing semicolon after the declaration
const BROKEN_FS: &str = "#version 330 core
layout (location = 0) out vec4 out_color;
void main() {
  vec4 c = vec4(1.0)
  out_color = c;
}
";

pub fn fixture() {
  let mut surface = GL33Surface::new("Shader compile failure", WindowOpt::default()).unwrap();

  for &ty in &[StageType::FragmentShader, StageType::VertexShader] {
    let e = Stage::new(surface.gl(), ty, BROKEN_FS).unwrap_err();
    let StageError::CompilationFailed(failed_ty, ref log) = e;

    log::info!("{} log: {}", ty, log);

    assert_eq!(failed_ty, ty);
    assert!(!log.trim().is_empty(), "empty compiler log");
    assert!(!log.ends_with('\0'));
    assert!(e.to_string().contains(log.as_str()));
  }

  // sources with an interior NUL never reach the driver
  let e = Stage::new(
    surface.gl(),
    StageType::VertexShader,
    "#version 330 core\0void main() {}",
  )
  .unwrap_err();
  let StageError::CompilationFailed(failed_ty, ref log) = e;

  assert_eq!(failed_ty, StageType::VertexShader);
  assert!(log.starts_with("invalid source:"), "unexpected log: {}", log);

  // the driver must still be usable afterwards
  let ok = Stage::new(
    surface.gl(),
    StageType::FragmentShader,
    gfx_practice::checkerboard::FS,
  );
  assert!(ok.is_ok());
}
