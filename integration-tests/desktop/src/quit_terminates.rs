use gfx_practice::windowing::WindowOpt;
use gfx_practice::{CheckerTriangle, RenderContext, CLEAR_COLOR};
use gfx_practice_sdl2::sdl2::event::Event;
use gfx_practice_sdl2::GL33Surface;

pub fn fixture() {
  let mut surface = GL33Surface::new("Quit terminates", WindowOpt::default()).unwrap();
  let scene = CheckerTriangle::bootstrap(surface.gl(), CLEAR_COLOR).unwrap();

  surface
    .sdl()
    .event()
    .unwrap()
    .push_event(Event::Quit { timestamp: 0 })
    .unwrap();

  let mut context = RenderContext::new(surface, scene);
  let frames = context.run();

  assert_eq!(frames, 0, "a frame was drawn after quitting");
  context.teardown();
}
