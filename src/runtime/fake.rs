//! A [RenderingContext] that records the commands it receives, for testing without a browser.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::pipeline::ShaderStage;
use crate::runtime::RenderingContext;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct FakeShader(u32);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct FakeProgram(u32);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct FakeBuffer(u32);

/// The commands that affect what ends up on screen, in the order they were issued.
#[derive(Clone, PartialEq, Debug)]
pub(crate) enum Command {
    Viewport(i32, i32, i32, i32),
    Clear([f32; 4]),
    UseProgram(Option<FakeProgram>),
    Uniform1f(String, f32),
    DrawTriangles(i32, i32),
    Present,
    Release,
}

/// Clones share their state, so a test can keep observing a context after handing it off.
#[derive(Clone)]
pub(crate) struct FakeContext {
    next_id: Rc<Cell<u32>>,
    lost: Rc<Cell<bool>>,
    state: Rc<RefCell<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    compile_failures: HashMap<ShaderStage, String>,
    link_failure: Option<String>,
    inactive_uniforms: HashSet<String>,
    inactive_attributes: HashSet<String>,
    shaders: HashMap<FakeShader, ShaderStage>,
    compiled: HashSet<FakeShader>,
    programs: HashMap<FakeProgram, Vec<FakeShader>>,
    linked: HashSet<FakeProgram>,
    link_count: usize,
    current_program: Option<FakeProgram>,
    uniforms: HashMap<String, f32>,
    buffers: HashMap<FakeBuffer, Vec<f32>>,
    bound_buffer: Option<FakeBuffer>,
    attrib_pointers: HashMap<u32, (i32, i32, i32)>,
    commands: Vec<Command>,
}

impl FakeContext {
    pub(crate) fn new() -> Self {
        FakeContext {
            next_id: Rc::new(Cell::new(1)),
            lost: Rc::new(Cell::new(false)),
            state: Rc::new(RefCell::new(FakeState::default())),
        }
    }

    fn next_id(&self) -> u32 {
        let id = self.next_id.get();

        self.next_id.set(id + 1);

        id
    }

    /// Makes every subsequent compilation of the `stage` fail with the given info log.
    pub(crate) fn fail_compile(&self, stage: ShaderStage, log: &str) {
        self.state
            .borrow_mut()
            .compile_failures
            .insert(stage, log.to_string());
    }

    pub(crate) fn fail_link(&self, log: &str) {
        self.state.borrow_mut().link_failure = Some(log.to_string());
    }

    /// Simulates a lost context: object allocation fails from now on.
    pub(crate) fn lose(&self) {
        self.lost.set(true);
    }

    pub(crate) fn deactivate_uniform(&self, name: &str) {
        self.state
            .borrow_mut()
            .inactive_uniforms
            .insert(name.to_string());
    }

    pub(crate) fn deactivate_attribute(&self, name: &str) {
        self.state
            .borrow_mut()
            .inactive_attributes
            .insert(name.to_string());
    }

    pub(crate) fn shader_is_alive(&self, shader: &FakeShader) -> bool {
        self.state.borrow().shaders.contains_key(shader)
    }

    pub(crate) fn program_is_linked(&self, program: &FakeProgram) -> bool {
        self.state.borrow().linked.contains(program)
    }

    pub(crate) fn live_shader_count(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub(crate) fn live_program_count(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub(crate) fn live_buffer_count(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub(crate) fn link_count(&self) -> usize {
        self.state.borrow().link_count
    }

    pub(crate) fn current_program(&self) -> Option<FakeProgram> {
        self.state.borrow().current_program
    }

    pub(crate) fn uniform_value(&self, name: &str) -> Option<f32> {
        self.state.borrow().uniforms.get(name).copied()
    }

    pub(crate) fn attrib_pointer(&self, location: u32) -> Option<(i32, i32, i32)> {
        self.state.borrow().attrib_pointers.get(&location).copied()
    }

    pub(crate) fn commands(&self) -> Vec<Command> {
        self.state.borrow().commands.clone()
    }

    pub(crate) fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    fn record(&self, command: Command) {
        self.state.borrow_mut().commands.push(command);
    }
}

impl RenderingContext for FakeContext {
    type Shader = FakeShader;

    type Program = FakeProgram;

    type Buffer = FakeBuffer;

    type UniformLocation = String;

    fn create_shader(&self, stage: ShaderStage) -> Option<FakeShader> {
        if self.lost.get() {
            return None;
        }

        let shader = FakeShader(self.next_id());

        self.state.borrow_mut().shaders.insert(shader, stage);

        Some(shader)
    }

    fn shader_source(&self, _shader: &FakeShader, _source: &str) {}

    fn compile_shader(&self, shader: &FakeShader) {
        let mut state = self.state.borrow_mut();

        if let Some(stage) = state.shaders.get(shader).copied() {
            if !state.compile_failures.contains_key(&stage) {
                state.compiled.insert(*shader);
            }
        }
    }

    fn shader_compile_status(&self, shader: &FakeShader) -> bool {
        self.state.borrow().compiled.contains(shader)
    }

    fn shader_info_log(&self, shader: &FakeShader) -> Option<String> {
        let state = self.state.borrow();

        state
            .shaders
            .get(shader)
            .and_then(|stage| state.compile_failures.get(stage))
            .cloned()
    }

    fn delete_shader(&self, shader: &FakeShader) {
        let mut state = self.state.borrow_mut();

        state.shaders.remove(shader);
        state.compiled.remove(shader);
    }

    fn create_program(&self) -> Option<FakeProgram> {
        if self.lost.get() {
            return None;
        }

        let program = FakeProgram(self.next_id());

        self.state.borrow_mut().programs.insert(program, Vec::new());

        Some(program)
    }

    fn attach_shader(&self, program: &FakeProgram, shader: &FakeShader) {
        let mut state = self.state.borrow_mut();

        assert!(
            state.compiled.contains(shader),
            "attached a shader that did not compile"
        );

        if let Some(attached) = state.programs.get_mut(program) {
            attached.push(*shader);
        }
    }

    fn link_program(&self, program: &FakeProgram) {
        let mut state = self.state.borrow_mut();

        state.link_count += 1;

        let attached = state.programs.get(program).map(|a| a.len()).unwrap_or(0);

        if attached == 2 && state.link_failure.is_none() {
            state.linked.insert(*program);
        }
    }

    fn program_link_status(&self, program: &FakeProgram) -> bool {
        self.state.borrow().linked.contains(program)
    }

    fn program_info_log(&self, _program: &FakeProgram) -> Option<String> {
        self.state.borrow().link_failure.clone()
    }

    fn use_program(&self, program: Option<&FakeProgram>) {
        {
            let mut state = self.state.borrow_mut();

            if let Some(program) = program {
                assert!(state.linked.contains(program), "bound an unlinked program");
            }

            state.current_program = program.copied();
        }

        self.record(Command::UseProgram(program.copied()));
    }

    fn delete_program(&self, program: &FakeProgram) {
        let mut state = self.state.borrow_mut();

        state.programs.remove(program);
        state.linked.remove(program);
    }

    fn attrib_location(&self, program: &FakeProgram, name: &str) -> i32 {
        let state = self.state.borrow();

        if state.linked.contains(program)
            && name == "position"
            && !state.inactive_attributes.contains(name)
        {
            0
        } else {
            -1
        }
    }

    fn uniform_location(&self, program: &FakeProgram, name: &str) -> Option<String> {
        let state = self.state.borrow();

        if state.linked.contains(program)
            && name == "time"
            && !state.inactive_uniforms.contains(name)
        {
            Some(name.to_string())
        } else {
            None
        }
    }

    fn uniform_1f(&self, location: &String, value: f32) {
        {
            let mut state = self.state.borrow_mut();

            assert!(
                state.current_program.is_some(),
                "set a uniform without a bound program"
            );

            state.uniforms.insert(location.clone(), value);
        }

        self.record(Command::Uniform1f(location.clone(), value));
    }

    fn create_buffer(&self) -> Option<FakeBuffer> {
        if self.lost.get() {
            return None;
        }

        let buffer = FakeBuffer(self.next_id());

        self.state.borrow_mut().buffers.insert(buffer, Vec::new());

        Some(buffer)
    }

    fn array_buffer_data(&self, buffer: &FakeBuffer, data: &[f32]) {
        let mut state = self.state.borrow_mut();

        state.bound_buffer = Some(*buffer);
        state.buffers.insert(*buffer, data.to_vec());
    }

    fn read_array_buffer(&self, buffer: &FakeBuffer, len: usize) -> Vec<f32> {
        let state = self.state.borrow();

        state
            .buffers
            .get(buffer)
            .map(|data| data.iter().take(len).copied().collect())
            .unwrap_or_default()
    }

    fn float_attrib_pointer(&self, location: u32, components: i32, stride: i32, offset: i32) {
        let mut state = self.state.borrow_mut();

        assert!(
            state.bound_buffer.is_some(),
            "configured an attribute without a bound buffer"
        );

        state
            .attrib_pointers
            .insert(location, (components, stride, offset));
    }

    fn delete_buffer(&self, buffer: &FakeBuffer) {
        let mut state = self.state.borrow_mut();

        state.buffers.remove(buffer);

        if state.bound_buffer == Some(*buffer) {
            state.bound_buffer = None;
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Command::Viewport(x, y, width, height));
    }

    fn clear_color_buffer(&self, color: [f32; 4]) {
        self.record(Command::Clear(color));
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.record(Command::DrawTriangles(first, count));
    }

    fn present(&self) {
        self.record(Command::Present);
    }

    fn release(&self) {
        self.lost.set(true);
        self.record(Command::Release);
    }
}
