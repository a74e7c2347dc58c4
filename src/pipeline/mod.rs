//! Compiles the shader stages and links them into the program the triangle is drawn with.

mod program;
pub use self::program::{BuildError, Program, ProgramDescriptor, TIME_UNIFORM};

mod shader;
pub use self::shader::{Shader, ShaderCompilationError, ShaderStage};
