use gfx_practice::windowing::WindowOpt;
use gfx_practice::{CheckerTriangle, LoopFeedback, RenderContext, CLEAR_COLOR};
use gfx_practice_sdl2::GL33Surface;
use gl::types::*;

const ITERATIONS: usize = 120;

fn driver_bindings() -> (GLint, GLint) {
  let mut program = 0;
  let mut vertex_array = 0;

  unsafe {
    gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut program);
    gl::GetIntegerv(gl::VERTEX_ARRAY_BINDING, &mut vertex_array);
  }

  (program, vertex_array)
}

pub fn fixture() {
  let mut surface = GL33Surface::new("Stable handles", WindowOpt::default()).unwrap();
  let scene = CheckerTriangle::bootstrap(surface.gl(), CLEAR_COLOR).unwrap();
  let program = scene.program().handle();
  let vertex_array = scene.vertex_array().handle();

  let mut context = RenderContext::new(surface, scene);

  for _ in 0..ITERATIONS {
    assert_eq!(context.step(), LoopFeedback::Continue);

    assert_eq!(context.frame().program().handle(), program);
    assert_eq!(context.frame().vertex_array().handle(), vertex_array);
    assert_eq!(driver_bindings(), (program as GLint, vertex_array as GLint));
    assert_eq!(context.surface_mut().gl().last_error(), None);
  }

  assert_eq!(context.frames(), ITERATIONS as u64);

  unsafe {
    assert_eq!(gl::IsProgram(program), gl::TRUE);
    assert_eq!(gl::IsVertexArray(vertex_array), gl::TRUE);
  }

  context.teardown();
}
