use gfx_practice::checkerboard;
use gfx_practice::windowing::WindowOpt;
use gfx_practice::{CheckerTriangle, Frame as _, CLEAR_COLOR};
use gfx_practice_sdl2::GL33Surface;
use gl::types::*;

// Read back a pixel of the back buffer at a clip-space position.
fn read_pixel(viewport: [GLint; 4], pos: [f32; 2]) -> [u8; 4] {
  let x = viewport[0] + ((pos[0] + 1.) * 0.5 * viewport[2] as f32) as GLint;
  let y = viewport[1] + ((pos[1] + 1.) * 0.5 * viewport[3] as f32) as GLint;
  let mut texel = [0u8; 4];

  unsafe {
    gl::ReadPixels(
      x,
      y,
      1,
      1,
      gl::RGBA,
      gl::UNSIGNED_BYTE,
      texel.as_mut_ptr() as *mut _,
    );
  }

  texel
}

fn to_rgb8(color: [f32; 4]) -> [u8; 3] {
  [
    (color[0] * 255.).round() as u8,
    (color[1] * 255.).round() as u8,
    (color[2] * 255.).round() as u8,
  ]
}

fn assert_close(found: [u8; 4], expected: [u8; 3], pos: [f32; 2]) {
  for i in 0..3 {
    let d = (found[i] as i16 - expected[i] as i16).abs();
    assert!(d <= 2, "at {:?}: found {:?}, expected {:?}", pos, found, expected);
  }
}

pub fn fixture() {
  let opt = WindowOpt::default().set_size(640, 480).set_maximized(false);
  let mut surface = GL33Surface::new("Checkerboard pixels", opt).unwrap();
  let mut scene = CheckerTriangle::bootstrap(surface.gl(), CLEAR_COLOR).unwrap();

  scene.render_frame();
  assert_eq!(surface.gl().last_error(), None);

  let mut viewport = [0; 4];
  unsafe {
    gl::GetIntegerv(gl::VIEWPORT, viewport.as_mut_ptr());
  }

  // cell centers inside the triangle (x + y < 1)
  for i in 0..9 {
    for j in 0..(9 - i) {
      let pos = [(i as f32 + 0.5) * 0.1, (j as f32 + 0.5) * 0.1];
      let found = read_pixel(viewport, pos);

      assert_close(found, to_rgb8(checkerboard::shade(pos)), pos);
    }
  }

  // outside the triangle, only the clear color remains
  for &pos in &[[0.9, 0.9], [-0.5, -0.5], [-0.5, 0.5]] {
    assert_close(read_pixel(viewport, pos), to_rgb8(CLEAR_COLOR), pos);
  }

  assert_eq!(surface.gl().last_error(), None);
}
