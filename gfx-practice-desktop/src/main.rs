//! Graphics course practice 1: a checkerboard triangle.
//!
//! Close the window to quit.

use gfx_practice::{AppError, CheckerTriangle, Config, RenderContext};
use gfx_practice_sdl2::GL33Surface;
use std::io::{self, Write};
use std::process::ExitCode;

// Bootstrap everything, loop until asked to quit, then tear down.
fn run(config: Config) -> Result<(), AppError> {
  let mut surface = GL33Surface::new(&config.title, config.window)?;
  let scene = CheckerTriangle::bootstrap(surface.gl(), config.clear_color)?;

  let mut context = RenderContext::new(surface, scene);
  context.run();
  context.teardown();

  Ok(())
}

// Process exit status of a run: 0 on success, 1 after reporting the error on `stderr`.
fn exit_status(result: Result<(), AppError>, stderr: &mut impl Write) -> u8 {
  match result {
    Ok(()) => 0,

    Err(e) => {
      // nothing left to report to if stderr is gone
      let _ = writeln!(stderr, "{}", e);
      1
    }
  }
}

fn main() -> ExitCode {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();

  let status = exit_status(run(Config::default()), &mut io::stderr());
  ExitCode::from(status)
}
