use failure::Fail;

use crate::pipeline::shader::{non_empty_log, Shader, ShaderCompilationError, ShaderStage};
use crate::runtime::RenderingContext;

/// Name of the `float` uniform the fragment stage animates its color with.
pub const TIME_UNIFORM: &str = "time";

/// The source code for the two stages of a [Program].
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ProgramDescriptor<'a> {
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
}

impl ProgramDescriptor<'static> {
    /// The program that draws the animated triangle: a pass-through vertex stage for a 2D
    /// `position` attribute, and a fragment stage that outputs `(0, sin(time), -sin(time), 1)`.
    pub fn triangle() -> Self {
        ProgramDescriptor {
            vertex_source: include_str!("../vertex.glsl"),
            fragment_source: include_str!("../fragment.glsl"),
        }
    }
}

#[derive(Fail, PartialEq, Debug)]
pub enum BuildError {
    #[fail(display = "Failed to compile {} shader: {}", stage, log)]
    CompileFailed { stage: ShaderStage, log: String },
    #[fail(display = "Failed to link program: {}", log)]
    LinkFailed { log: String },
    #[fail(display = "The context could not allocate a {} object", _0)]
    ObjectCreation(&'static str),
}

impl From<ShaderCompilationError> for BuildError {
    fn from(err: ShaderCompilationError) -> Self {
        match err {
            ShaderCompilationError::CompileFailed { stage, log } => {
                BuildError::CompileFailed { stage, log }
            }
            ShaderCompilationError::ObjectCreation(ShaderStage::Vertex) => {
                BuildError::ObjectCreation("vertex shader")
            }
            ShaderCompilationError::ObjectCreation(ShaderStage::Fragment) => {
                BuildError::ObjectCreation("fragment shader")
            }
        }
    }
}

/// A linked program object together with the stages it was linked from.
///
/// A `Program` can only be obtained from a successful [Program::build], which means it is always
/// safe to bind.
pub struct Program<C>
where
    C: RenderingContext,
{
    object: C::Program,
    vertex_shader: Shader<C>,
    fragment_shader: Shader<C>,
    time_location: Option<C::UniformLocation>,
}

impl<C> Program<C>
where
    C: RenderingContext,
{
    /// Compiles both stages described by the `descriptor` and links them into a program.
    ///
    /// Both stages are compiled before any error is reported, so that the diagnostics of both
    /// stages end up in the log. If either stage fails to compile, linking is not attempted and the
    /// vertex stage's error takes precedence over the fragment stage's error. Any object created
    /// during a failed build is deleted before this returns.
    pub fn build(context: &C, descriptor: &ProgramDescriptor) -> Result<Self, BuildError> {
        let vertex_shader = Shader::compile(context, ShaderStage::Vertex, descriptor.vertex_source);
        let fragment_shader =
            Shader::compile(context, ShaderStage::Fragment, descriptor.fragment_source);

        let (vertex_shader, fragment_shader) = match (vertex_shader, fragment_shader) {
            (Ok(vertex_shader), Ok(fragment_shader)) => (vertex_shader, fragment_shader),
            (Err(err), Ok(fragment_shader)) => {
                log::error!("{}", err);
                fragment_shader.delete(context);

                return Err(err.into());
            }
            (Ok(vertex_shader), Err(err)) => {
                log::error!("{}", err);
                vertex_shader.delete(context);

                return Err(err.into());
            }
            (Err(vertex_err), Err(fragment_err)) => {
                log::error!("{}", vertex_err);
                log::error!("{}", fragment_err);

                return Err(vertex_err.into());
            }
        };

        let object = match context.create_program() {
            Some(object) => object,
            None => {
                vertex_shader.delete(context);
                fragment_shader.delete(context);

                return Err(BuildError::ObjectCreation("program"));
            }
        };

        context.attach_shader(&object, vertex_shader.object());
        context.attach_shader(&object, fragment_shader.object());
        context.link_program(&object);

        if !context.program_link_status(&object) {
            let log = non_empty_log(context.program_info_log(&object));

            log::error!("Failed to link program: {}", log);

            context.delete_program(&object);
            vertex_shader.delete(context);
            fragment_shader.delete(context);

            return Err(BuildError::LinkFailed { log });
        }

        let time_location = context.uniform_location(&object, TIME_UNIFORM);

        if time_location.is_none() {
            log::warn!(
                "Program has no active `{}` uniform; the color will not animate",
                TIME_UNIFORM
            );
        }

        Ok(Program {
            object,
            vertex_shader,
            fragment_shader,
            time_location,
        })
    }

    /// Makes this program the active program for subsequent draw calls.
    pub fn bind(&self, context: &C) {
        context.use_program(Some(&self.object));
    }

    /// Sets the `time` uniform; the program must be bound.
    pub fn set_time(&self, context: &C, time: f32) {
        if let Some(location) = &self.time_location {
            context.uniform_1f(location, time);
        }
    }

    pub fn has_time_uniform(&self) -> bool {
        self.time_location.is_some()
    }

    /// Returns the location of the named vertex attribute, or `None` if the program has no such
    /// active attribute.
    pub fn attribute_location(&self, context: &C, name: &str) -> Option<u32> {
        let location = context.attrib_location(&self.object, name);

        if location < 0 {
            None
        } else {
            Some(location as u32)
        }
    }

    pub(crate) fn object(&self) -> &C::Program {
        &self.object
    }

    /// Deletes the program object and its shader objects.
    pub(crate) fn delete(&self, context: &C) {
        context.use_program(None);
        context.delete_program(&self.object);
        self.vertex_shader.delete(context);
        self.fragment_shader.delete(context);
    }
}
