//! GPU-backed fixtures.
//!
//! Each fixture opens its own window and needs a display with an OpenGL 3.3 driver, so they are run
//! one per process:
//!
//! ```text
//! cargo run -p desktop-integ-tests -- shader-compile-failure
//! ```

use colored::Colorize as _;

macro_rules! tests {
  ($($name:expr, $module:ident),*) => {
    // declare the modules for all tests
    $(
      mod $module;
    )*

    // list of all available integration tests
    const TEST_NAMES: &[&str] = &[$( $name ),*];

    // run a given test
    fn run_test(name: &str) -> bool {
      $(
        if name == $name {
          $module::fixture();
          return true;
        }
      )*

      println!("{} is not a valid test. Possible values", name.red());

      for test_name in TEST_NAMES {
        println!("  -> {}", test_name.blue());
      }

      false
    }
  }
}

tests! {
  "shader-compile-failure", shader_compile_failure,
  "program-link-failure", program_link_failure,
  "checkerboard-pixels", checkerboard_pixels,
  "quit-terminates", quit_terminates,
  "stable-handles", stable_handles,
  "single-gl-state", single_gl_state
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Debug)
    .parse_default_env()
    .init();

  let test_name = std::env::args().nth(1);

  if let Some(test_name) = test_name {
    println!("test name: {}", test_name.green());

    if run_test(&test_name) {
      println!("{}", "ok".green());
    } else {
      std::process::exit(1);
    }
  } else {
    println!("Please provide a test name. Possible values");

    for test_name in TEST_NAMES {
      println!("  -> {}", test_name.blue());
    }
  }
}
