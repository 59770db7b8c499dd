//! Checkerboard triangle.
//!
//! The triangle is rendered without sending anything to the GPU: the vertex shader picks its position
//! from a constant table indexed by `gl_VertexID` and forwards it to the fragment shader, which
//! classifies it into a 0.1 × 0.1 checkerboard cell.
//!
//! [`shade`] is the same classification, on the CPU.

/// Vertex shader source.
pub const VS: &str = include_str!("checkerboard-vs.glsl");

/// Fragment shader source.
pub const FS: &str = include_str!("checkerboard-fs.glsl");

/// Vertices spawned by [`VS`], in order.
pub const TRIANGLE: [[f32; 2]; 3] = [[0., 0.], [1., 0.], [0., 1.]];

/// Number of vertices to render.
pub const VERTEX_NB: usize = TRIANGLE.len();

/// Number of cells per unit of position, on each axis.
pub const CELLS_PER_UNIT: f32 = 10.;

/// Color of even cells.
pub const WHITE: [f32; 4] = [1., 1., 1., 1.];

/// Color of odd cells.
pub const BLACK: [f32; 4] = [0., 0., 0., 1.];

/// Cell a position falls into.
pub fn cell(pos: [f32; 2]) -> [i32; 2] {
  [
    (pos[0] * CELLS_PER_UNIT).floor() as i32,
    (pos[1] * CELLS_PER_UNIT).floor() as i32,
  ]
}

/// Is the cell of `pos` an even one?
pub fn is_white(pos: [f32; 2]) -> bool {
  let [x, y] = cell(pos);
  (x + y).rem_euclid(2) == 0
}

/// Color of the fragment at `pos`.
pub fn shade(pos: [f32; 2]) -> [f32; 4] {
  if is_white(pos) {
    WHITE
  } else {
    BLACK
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // center of cell (i, j), far from any floor() rounding edge
  fn center(i: i32, j: i32) -> [f32; 2] {
    [(i as f32 + 0.5) * 0.1, (j as f32 + 0.5) * 0.1]
  }

  #[test]
  fn origin_is_white() {
    assert_eq!(shade([0., 0.]), WHITE);
    assert_eq!(shade([0.05, 0.05]), WHITE);
  }

  #[test]
  fn neighbours_alternate() {
    for i in 0..10 {
      for j in 0..10 {
        let here = shade(center(i, j));

        assert_ne!(here, shade(center(i + 1, j)), "cell ({}, {})", i, j);
        assert_ne!(here, shade(center(i, j + 1)), "cell ({}, {})", i, j);
        assert_eq!(here, shade(center(i + 1, j + 1)), "cell ({}, {})", i, j);
      }
    }
  }

  #[test]
  fn color_depends_only_on_parity_sum() {
    for i in -20..20 {
      for j in -20..20 {
        let expected = if (i + j) % 2 == 0 { WHITE } else { BLACK };
        assert_eq!(shade(center(i, j)), expected, "cell ({}, {})", i, j);
      }
    }
  }

  #[test]
  fn whole_cell_shares_a_color() {
    let steps = [0.001, 0.025, 0.05, 0.075, 0.099];

    for &dx in &steps {
      for &dy in &steps {
        assert_eq!(shade([0.3 + dx, 0.4 + dy]), BLACK);
        assert_eq!(shade([0.3 + dx, 0.5 + dy]), WHITE);
      }
    }
  }

  #[test]
  fn period_is_two_cells() {
    for i in 0..10 {
      for j in 0..10 {
        let p = center(i, j);
        assert_eq!(shade(p), shade([p[0] + 0.2, p[1]]));
        assert_eq!(shade(p), shade([p[0], p[1] + 0.2]));
      }
    }
  }

  #[test]
  fn negative_positions_use_floor() {
    assert_eq!(cell([-0.05, 0.05]), [-1, 0]);
    assert_eq!(shade([-0.05, 0.05]), BLACK);
    assert_eq!(shade([-0.05, -0.05]), WHITE);
  }

  #[test]
  fn triangle_corners() {
    assert_eq!(VERTEX_NB, 3);
    assert_eq!(cell(TRIANGLE[0]), [0, 0]);
    assert_eq!(cell(TRIANGLE[1]), [10, 0]);
    assert_eq!(cell(TRIANGLE[2]), [0, 10]);
  }

  #[test]
  fn sources_target_glsl_330_core() {
    assert!(VS.starts_with("#version 330 core"));
    assert!(FS.starts_with("#version 330 core"));
    assert!(VS.contains("gl_VertexID"));
    assert!(FS.contains("floor(pos * 10.0)"));
  }
}
