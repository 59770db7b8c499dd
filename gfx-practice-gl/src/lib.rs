//! OpenGL 3.3 core-profile layer.
//!
//! This crate wraps the handful of OpenGL objects the graphics course practices need: a per-thread
//! graphics state, shader stages, shader programs and vertex arrays. It doesn’t create any OpenGL
//! context on its own; a windowing crate (e.g. [gfx-practice-sdl2]) must create the context and load
//! the function pointers before [`GL33::new`] is called.
//!
//! Every object in here follows the same lifecycle rule: it is created once from a [`GL33`] and
//! released when dropped. Dropping must happen while the OpenGL context is still current.
//!
//! [gfx-practice-sdl2]: ../gfx_practice_sdl2/index.html

#![deny(missing_docs)]

pub mod gl33;
pub mod shader;

pub use gl33::{GLState, GLVersion, Program, Stage, StateQueryError, VertexArray, GL33};
pub use shader::{ProgramError, StageError, StageType};
