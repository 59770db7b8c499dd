use gfx_practice::checkerboard::VS;
use gfx_practice::windowing::WindowOpt;
use gfx_practice_gl::{Program, ProgramError, Stage, StageType};
use gfx_practice_sdl2::GL33Surface;

pub fn fixture() {
  let mut surface = GL33Surface::new("Program link failure", WindowOpt::default()).unwrap();
  let gl = surface.gl();

  // two vertex stages both defining main()
  let a = Stage::new(gl, StageType::VertexShader, VS).unwrap();
  let b = Stage::new(gl, StageType::VertexShader, VS).unwrap();

  match Program::new(gl, &a, &b) {
    Err(ProgramError::LinkFailed(ref log)) => {
      log::info!("link log: {}", log);
      assert!(!log.trim().is_empty(), "empty linker log");
      assert!(!log.ends_with('\0'));
    }

    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("linking two vertex shaders must fail"),
  }
}
