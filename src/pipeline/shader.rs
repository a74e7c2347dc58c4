use std::fmt;

use failure::Fail;
use web_sys::WebGl2RenderingContext as Gl;

use crate::runtime::RenderingContext;

/// Placeholder used when the driver reports a failure without an info log.
pub(crate) const EMPTY_INFO_LOG: &str = "<no diagnostic reported by the driver>";

/// One of the two programmable stages of the graphics pipeline.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn gl_id(&self) -> u32 {
        match self {
            ShaderStage::Vertex => Gl::VERTEX_SHADER,
            ShaderStage::Fragment => Gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Fail, PartialEq, Debug)]
pub enum ShaderCompilationError {
    #[fail(display = "Failed to compile {} shader: {}", stage, log)]
    CompileFailed { stage: ShaderStage, log: String },
    #[fail(display = "The context could not allocate a {} shader object", _0)]
    ObjectCreation(ShaderStage),
}

/// A compiled shader object for a single stage.
///
/// Only obtainable through [Shader::compile], so a `Shader` always holds an object whose compile
/// status was verified.
pub struct Shader<C>
where
    C: RenderingContext,
{
    stage: ShaderStage,
    object: C::Shader,
}

impl<C> Shader<C>
where
    C: RenderingContext,
{
    /// Creates a shader object for the `stage`, compiles the `source` and checks the compile
    /// status.
    ///
    /// On failure the shader object is deleted and the driver's info log is returned as part of
    /// the error.
    pub fn compile(
        context: &C,
        stage: ShaderStage,
        source: &str,
    ) -> Result<Self, ShaderCompilationError> {
        let object = context
            .create_shader(stage)
            .ok_or(ShaderCompilationError::ObjectCreation(stage))?;

        context.shader_source(&object, source);
        context.compile_shader(&object);

        if !context.shader_compile_status(&object) {
            let log = non_empty_log(context.shader_info_log(&object));

            context.delete_shader(&object);

            return Err(ShaderCompilationError::CompileFailed { stage, log });
        }

        Ok(Shader { stage, object })
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub(crate) fn object(&self) -> &C::Shader {
        &self.object
    }

    pub(crate) fn delete(&self, context: &C) {
        context.delete_shader(&self.object);
    }
}

pub(crate) fn non_empty_log(log: Option<String>) -> String {
    match log {
        Some(log) if !log.trim().is_empty() => log.trim_end().to_string(),
        _ => EMPTY_INFO_LOG.to_string(),
    }
}
