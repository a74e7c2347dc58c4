use js_sys::Float32Array;
use wasm_bindgen::JsCast;
use web_sys::{
    WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebglLoseContext,
};

use crate::pipeline::ShaderStage;
use crate::runtime::RenderingContext;

impl RenderingContext for Gl {
    type Shader = WebGlShader;

    type Program = WebGlProgram;

    type Buffer = WebGlBuffer;

    type UniformLocation = WebGlUniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<WebGlShader> {
        Gl::create_shader(self, stage.gl_id())
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        Gl::shader_source(self, shader, source);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        Gl::compile_shader(self, shader);
    }

    fn shader_compile_status(&self, shader: &WebGlShader) -> bool {
        self.get_shader_parameter(shader, Gl::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
        self.get_shader_info_log(shader)
    }

    fn delete_shader(&self, shader: &WebGlShader) {
        Gl::delete_shader(self, Some(shader));
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        Gl::create_program(self)
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        Gl::attach_shader(self, program, shader);
    }

    fn link_program(&self, program: &WebGlProgram) {
        Gl::link_program(self, program);
    }

    fn program_link_status(&self, program: &WebGlProgram) -> bool {
        self.get_program_parameter(program, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
        self.get_program_info_log(program)
    }

    fn use_program(&self, program: Option<&WebGlProgram>) {
        Gl::use_program(self, program);
    }

    fn delete_program(&self, program: &WebGlProgram) {
        Gl::delete_program(self, Some(program));
    }

    fn attrib_location(&self, program: &WebGlProgram, name: &str) -> i32 {
        self.get_attrib_location(program, name)
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.get_uniform_location(program, name)
    }

    fn uniform_1f(&self, location: &WebGlUniformLocation, value: f32) {
        self.uniform1f(Some(location), value);
    }

    fn create_buffer(&self) -> Option<WebGlBuffer> {
        Gl::create_buffer(self)
    }

    fn array_buffer_data(&self, buffer: &WebGlBuffer, data: &[f32]) {
        // Copies the data into a JS-owned array, so the view can't be invalidated by a memory grow
        // of the WASM heap while the driver reads it.
        let array = Float32Array::from(data);

        self.bind_buffer(Gl::ARRAY_BUFFER, Some(buffer));
        self.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &array, Gl::STATIC_DRAW);
    }

    fn read_array_buffer(&self, buffer: &WebGlBuffer, len: usize) -> Vec<f32> {
        let array = Float32Array::new_with_length(len as u32);

        self.bind_buffer(Gl::ARRAY_BUFFER, Some(buffer));
        self.get_buffer_sub_data_with_i32_and_array_buffer_view(Gl::ARRAY_BUFFER, 0, &array);

        array.to_vec()
    }

    fn float_attrib_pointer(&self, location: u32, components: i32, stride: i32, offset: i32) {
        self.enable_vertex_attrib_array(location);
        self.vertex_attrib_pointer_with_i32(location, components, Gl::FLOAT, false, stride, offset);
    }

    fn delete_buffer(&self, buffer: &WebGlBuffer) {
        Gl::delete_buffer(self, Some(buffer));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        Gl::viewport(self, x, y, width, height);
    }

    fn clear_color_buffer(&self, color: [f32; 4]) {
        let [r, g, b, a] = color;

        self.clear_color(r, g, b, a);
        self.clear(Gl::COLOR_BUFFER_BIT);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.draw_arrays(Gl::TRIANGLES, first, count);
    }

    fn present(&self) {
        // The browser composites the drawing buffer once the animation frame callback returns;
        // flushing only makes sure the commands are on their way.
        self.flush();
    }

    fn release(&self) {
        match self.get_extension("WEBGL_lose_context") {
            Ok(Some(extension)) => extension.unchecked_into::<WebglLoseContext>().lose_context(),
            Ok(None) => log::warn!("WEBGL_lose_context is unavailable; the context is left alive"),
            Err(err) => log::warn!("Failed to query WEBGL_lose_context: {:?}", err),
        }
    }
}
