//! Render context and render loop.

use crate::checkerboard;
use crate::{Frame, InputAction, LoopFeedback, Surface};
use gfx_practice_gl::{Program, ProgramError, VertexArray, GL33};

/// The GPU side of the practice: one program and one attributeless vertex array.
#[derive(Debug)]
pub struct CheckerTriangle {
  gl: GL33,
  program: Program,
  vertex_array: VertexArray,
}

impl CheckerTriangle {
  /// Build the checkerboard program and the vertex array, and set the clear color.
  pub fn bootstrap(gl: &mut GL33, clear_color: [f32; 4]) -> Result<Self, ProgramError> {
    let program = Program::from_strings(gl, checkerboard::VS, checkerboard::FS)?;
    log::info!("checkerboard program ready");

    // we don’t send any vertex data; the vertex shader spawns the triangle from gl_VertexID, yet a
    // vertex array has to be bound for the draw call
    let vertex_array = VertexArray::new(gl);

    gl.set_clear_color(clear_color);

    Ok(CheckerTriangle {
      gl: gl.clone(),
      program,
      vertex_array,
    })
  }

  /// The linked program.
  pub fn program(&self) -> &Program {
    &self.program
  }

  /// The vertex array bound for each draw call.
  pub fn vertex_array(&self) -> &VertexArray {
    &self.vertex_array
  }
}

impl Frame for CheckerTriangle {
  fn render_frame(&mut self) {
    self.gl.clear_color_buffer();
    self.program.use_program();
    self.vertex_array.render(checkerboard::VERTEX_NB);
  }
}

/// Every handle the application owns, gathered in one place.
///
/// The frame is declared first so that it is dropped before the surface: GPU objects must go away
/// while their context still exists.
#[derive(Debug)]
pub struct RenderContext<S, F> {
  frame: F,
  surface: S,
  frames: u64,
}

impl<S, F> RenderContext<S, F>
where
  S: Surface,
  F: Frame,
{
  /// Gather a surface and what to render on it.
  pub fn new(surface: S, frame: F) -> Self {
    RenderContext {
      frame,
      surface,
      frames: 0,
    }
  }

  /// Run one iteration of the loop.
  ///
  /// All pending events are drained first. If one of them asks to quit, nothing is rendered and
  /// [`LoopFeedback::Exit`] is returned. Otherwise a frame is rendered and presented.
  pub fn step(&mut self) -> LoopFeedback {
    let mut feedback = LoopFeedback::Continue;

    for action in self.surface.poll_actions() {
      match action {
        InputAction::Quit => {
          log::debug!("quit requested");
          feedback = LoopFeedback::Exit;
        }

        // the viewport is left as is
        InputAction::Resized { width, height } => {
          log::debug!("framebuffer resized to {}×{}", width, height);
        }
      }
    }

    if feedback == LoopFeedback::Exit {
      return feedback;
    }

    self.frame.render_frame();
    self.surface.swap_buffers();
    self.frames += 1;

    feedback
  }

  /// Loop until asked to quit. Returns the number of frames presented.
  pub fn run(&mut self) -> u64 {
    log::info!("entering render loop");

    while self.step() == LoopFeedback::Continue {}

    log::info!("leaving render loop after {} frames", self.frames);
    self.frames
  }

  /// Number of frames presented so far.
  pub fn frames(&self) -> u64 {
    self.frames
  }

  /// Mutably borrow the surface.
  pub fn surface_mut(&mut self) -> &mut S {
    &mut self.surface
  }

  /// What gets rendered every frame.
  pub fn frame(&self) -> &F {
    &self.frame
  }

  /// Release the GPU objects, then the context and the window.
  pub fn teardown(self) {
    let RenderContext { frame, surface, .. } = self;

    drop(frame);
    surface.teardown();

    log::info!("render context torn down");
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::RefCell;
  use std::collections::VecDeque;
  use std::rc::Rc;

  // Every call the loop makes, in order.
  #[derive(Clone, Debug, Eq, PartialEq)]
  enum Call {
    Poll,
    Draw { program: u32, vertex_array: u32 },
    Swap,
    Teardown,
    DropFrame,
  }

  type Journal = Rc<RefCell<Vec<Call>>>;

  struct FakeSurface {
    journal: Journal,
    // one batch of actions per poll; empty once exhausted
    batches: VecDeque<Vec<InputAction>>,
  }

  impl Surface for FakeSurface {
    fn poll_actions(&mut self) -> Vec<InputAction> {
      self.journal.borrow_mut().push(Call::Poll);
      self.batches.pop_front().unwrap_or_default()
    }

    fn swap_buffers(&mut self) {
      self.journal.borrow_mut().push(Call::Swap);
    }

    fn teardown(self) {
      self.journal.borrow_mut().push(Call::Teardown);
    }
  }

  struct FakeFrame {
    journal: Journal,
    program: u32,
    vertex_array: u32,
  }

  impl Frame for FakeFrame {
    fn render_frame(&mut self) {
      self.journal.borrow_mut().push(Call::Draw {
        program: self.program,
        vertex_array: self.vertex_array,
      });
    }
  }

  impl Drop for FakeFrame {
    fn drop(&mut self) {
      self.journal.borrow_mut().push(Call::DropFrame);
    }
  }

  fn context(batches: Vec<Vec<InputAction>>) -> (RenderContext<FakeSurface, FakeFrame>, Journal) {
    let journal = Journal::default();
    let surface = FakeSurface {
      journal: journal.clone(),
      batches: batches.into(),
    };
    let frame = FakeFrame {
      journal: journal.clone(),
      program: 3,
      vertex_array: 1,
    };

    (RenderContext::new(surface, frame), journal)
  }

  const DRAW: Call = Call::Draw {
    program: 3,
    vertex_array: 1,
  };

  #[test]
  fn quit_exits_before_drawing() {
    let (mut ctx, journal) = context(vec![vec![InputAction::Quit]]);

    assert_eq!(ctx.run(), 0);
    assert_eq!(*journal.borrow(), vec![Call::Poll]);
  }

  #[test]
  fn quit_after_some_frames() {
    let (mut ctx, journal) = context(vec![vec![], vec![], vec![InputAction::Quit]]);

    assert_eq!(ctx.run(), 2);
    assert_eq!(
      *journal.borrow(),
      vec![
        Call::Poll,
        DRAW,
        Call::Swap,
        Call::Poll,
        DRAW,
        Call::Swap,
        Call::Poll
      ]
    );
  }

  #[test]
  fn quit_wins_over_other_events_of_the_same_batch() {
    let resized = InputAction::Resized {
      width: 1920,
      height: 1080,
    };
    let (mut ctx, journal) = context(vec![vec![InputAction::Quit, resized]]);

    assert_eq!(ctx.step(), LoopFeedback::Exit);
    assert_eq!(*journal.borrow(), vec![Call::Poll]);
  }

  #[test]
  fn resize_keeps_rendering() {
    let resized = InputAction::Resized {
      width: 1024,
      height: 768,
    };
    let (mut ctx, journal) = context(vec![vec![resized.clone(), resized]]);

    assert_eq!(ctx.step(), LoopFeedback::Continue);
    assert_eq!(ctx.frames(), 1);
    assert_eq!(*journal.borrow(), vec![Call::Poll, DRAW, Call::Swap]);
  }

  #[test]
  fn idle_frames_use_the_same_handles() {
    let (mut ctx, journal) = context(vec![]);

    for _ in 0..100 {
      assert_eq!(ctx.step(), LoopFeedback::Continue);
    }

    assert_eq!(ctx.frames(), 100);
    assert_eq!(ctx.frame().program, 3);
    assert_eq!(ctx.frame().vertex_array, 1);

    let journal = journal.borrow();
    assert_eq!(journal.len(), 300);
    assert!(journal
      .chunks(3)
      .all(|calls| calls == [Call::Poll, DRAW, Call::Swap]));
  }

  #[test]
  fn teardown_releases_frame_before_surface() {
    let (mut ctx, journal) = context(vec![vec![InputAction::Quit]]);
    ctx.run();
    ctx.teardown();

    assert_eq!(
      *journal.borrow(),
      vec![Call::Poll, Call::DropFrame, Call::Teardown]
    );
  }
}
