use gfx_practice::windowing::WindowOpt;
use gfx_practice_gl::{StateQueryError, GL33};
use gfx_practice_sdl2::GL33Surface;

pub fn fixture() {
  let mut surface = GL33Surface::new("Single GL state", WindowOpt::default()).unwrap();

  match GL33::new() {
    Err(StateQueryError::UnavailableGLState) => (),
    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("a second graphics state was acquired on the same thread"),
  }

  let state = unsafe { surface.gl().state().clone() };
  assert_eq!(state.borrow().current_program(), 0);
  assert_eq!(state.borrow().bound_vertex_array(), 0);
}
