use crate::pipeline::ShaderStage;

/// The graphics-device operations the renderer relies on.
///
/// Implemented for [web_sys::WebGl2RenderingContext]; every GPU interaction in this crate goes
/// through this trait, so the program build, the mesh upload and the frame loop are independent of
/// the browser.
///
/// Object handles are opaque. Allocation functions return `None` when the context cannot create
/// an object (typically because the context was lost).
pub trait RenderingContext {
    type Shader;

    type Program;

    type Buffer;

    type UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;

    fn shader_source(&self, shader: &Self::Shader, source: &str);

    fn compile_shader(&self, shader: &Self::Shader);

    fn shader_compile_status(&self, shader: &Self::Shader) -> bool;

    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;

    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;

    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);

    fn link_program(&self, program: &Self::Program);

    fn program_link_status(&self, program: &Self::Program) -> bool;

    fn program_info_log(&self, program: &Self::Program) -> Option<String>;

    fn use_program(&self, program: Option<&Self::Program>);

    fn delete_program(&self, program: &Self::Program);

    /// Returns `-1` if the program has no active attribute with the given name.
    fn attrib_location(&self, program: &Self::Program, name: &str) -> i32;

    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    fn uniform_1f(&self, location: &Self::UniformLocation, value: f32);

    fn create_buffer(&self) -> Option<Self::Buffer>;

    /// Binds the buffer to the array buffer target and replaces its data store with `data`. The
    /// data store is meant to be written once and drawn from many times.
    fn array_buffer_data(&self, buffer: &Self::Buffer, data: &[f32]);

    /// Reads `len` floats from the start of the buffer's data store.
    fn read_array_buffer(&self, buffer: &Self::Buffer, len: usize) -> Vec<f32>;

    /// Enables the attribute at `location` and points it at the currently bound array buffer as
    /// tightly packed, non-normalized floats.
    fn float_attrib_pointer(&self, location: u32, components: i32, stride: i32, offset: i32);

    fn delete_buffer(&self, buffer: &Self::Buffer);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    fn clear_color_buffer(&self, color: [f32; 4]);

    fn draw_triangles(&self, first: i32, count: i32);

    /// Hands the frame's commands to the compositor.
    fn present(&self);

    /// Releases the context's resources on the browser side. The context is unusable afterwards.
    fn release(&self);
}
