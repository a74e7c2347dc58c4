use failure::Fail;

use crate::buffer::{Mesh, UploadError, TRIANGLE};
use crate::config::{AppConfig, ConfigError, TimeStep};
use crate::input::InputEvent;
use crate::pipeline::{BuildError, Program, ProgramDescriptor};
use crate::runtime::RenderingContext;

#[derive(Fail, PartialEq, Debug)]
pub enum InitError {
    #[fail(display = "No `<canvas>` element with id `{}`", _0)]
    CanvasNotFound(String),
    #[fail(display = "Failed to obtain a WebGL 2.0 context: {}", _0)]
    ContextCreation(String),
    #[fail(display = "Failed to register input listeners: {}", _0)]
    ListenerRegistration(String),
    #[fail(display = "{}", _0)]
    Config(#[cause] ConfigError),
    #[fail(display = "{}", _0)]
    Build(#[cause] BuildError),
    #[fail(display = "{}", _0)]
    Upload(#[cause] UploadError),
}

impl From<ConfigError> for InitError {
    fn from(err: ConfigError) -> Self {
        InitError::Config(err)
    }
}

impl From<BuildError> for InitError {
    fn from(err: BuildError) -> Self {
        InitError::Build(err)
    }
}

impl From<UploadError> for InitError {
    fn from(err: UploadError) -> Self {
        InitError::Upload(err)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoopState {
    Running,
    Stopped,
}

/// The state the frame loop carries from one tick to the next.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FrameState {
    quit_requested: bool,
    frame_count: u64,
    elapsed_time: f64,
    last_timestamp: Option<f64>,
}

impl FrameState {
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The animation time that is passed to the `time` uniform.
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    /// Advances the clock by one frame. `timestamp` is the animation frame's timestamp in
    /// milliseconds and is only used with [TimeStep::RealTime].
    pub fn advance(&mut self, time_step: TimeStep, timestamp: f64) {
        self.frame_count += 1;

        match time_step {
            // Derived from the frame count rather than accumulated, so rounding errors don't add up.
            TimeStep::Fixed(step) => self.elapsed_time = step * self.frame_count as f64,
            TimeStep::RealTime { units_per_second } => {
                let delta_ms = self
                    .last_timestamp
                    .map(|last| (timestamp - last).max(0.0))
                    .unwrap_or(0.0);

                self.elapsed_time += delta_ms / 1000.0 * units_per_second;
            }
        }

        self.last_timestamp = Some(timestamp);
    }
}

/// The color the fragment stage outputs at animation time `t`: `(0, sin t, -sin t, 1)`.
pub fn fragment_color(t: f64) -> [f32; 4] {
    let s = t.sin() as f32;

    [0.0, s, -s, 1.0]
}

/// Everything needed to render the triangle: the context, the program, the mesh and the frame
/// state.
pub struct App<C>
where
    C: RenderingContext,
{
    context: C,
    program: Program<C>,
    mesh: Mesh<C>,
    frame_state: FrameState,
    time_step: TimeStep,
    clear_color: [f32; 4],
    loop_state: LoopState,
}

impl<C> App<C>
where
    C: RenderingContext,
{
    /// Sets up the viewport, builds the triangle program and uploads the triangle.
    ///
    /// Fails if the program does not build; the app (and therefore the frame loop) never comes
    /// into existence with an unusable program. The context is released on failure.
    pub fn init(context: C, config: &AppConfig) -> Result<Self, InitError> {
        context.viewport(0, 0, config.width() as i32, config.height() as i32);

        let program = match Program::build(&context, &ProgramDescriptor::triangle()) {
            Ok(program) => program,
            Err(err) => {
                context.release();

                return Err(err.into());
            }
        };

        let mesh = match Mesh::upload(&context, &program, &TRIANGLE) {
            Ok(mesh) => mesh,
            Err(err) => {
                program.delete(&context);
                context.release();

                return Err(err.into());
            }
        };

        log::info!(
            "Initialized {}x{} renderer ({} vertices)",
            config.width(),
            config.height(),
            mesh.vertex_count()
        );

        Ok(App {
            context,
            program,
            mesh,
            frame_state: FrameState::default(),
            time_step: config.time_step(),
            clear_color: config.clear_color(),
            loop_state: LoopState::Running,
        })
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn frame_state(&self) -> &FrameState {
        &self.frame_state
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn mesh(&self) -> &Mesh<C> {
        &self.mesh
    }

    /// The color the triangle was filled with on the last tick.
    pub fn current_color(&self) -> [f32; 4] {
        fragment_color(self.frame_state.elapsed_time())
    }

    /// Renders one frame.
    ///
    /// Drains the `events` first; a [InputEvent::Quit] among them still lets this frame render,
    /// after which the app is torn down and [LoopState::Stopped] is returned. Ticking a stopped app
    /// does nothing.
    pub fn tick<I>(&mut self, events: I, timestamp: f64) -> LoopState
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if self.loop_state == LoopState::Stopped {
            return LoopState::Stopped;
        }

        for event in events {
            match event {
                InputEvent::Quit => {
                    log::debug!("Quit requested at frame {}", self.frame_state.frame_count());

                    self.frame_state.quit_requested = true;
                }
            }
        }

        self.frame_state.advance(self.time_step, timestamp);

        let context = &self.context;

        context.clear_color_buffer(self.clear_color);
        self.program.bind(context);
        self.program
            .set_time(context, self.frame_state.elapsed_time() as f32);
        context.draw_triangles(0, self.mesh.vertex_count() as i32);
        context.present();

        if self.frame_state.quit_requested {
            self.teardown();
        }

        self.loop_state
    }

    /// Deletes the GPU objects and releases the context. Only the first call has an effect.
    pub fn teardown(&mut self) {
        if self.loop_state == LoopState::Stopped {
            return;
        }

        self.loop_state = LoopState::Stopped;

        self.mesh.delete(&self.context);
        self.program.delete(&self.context);
        self.context.release();

        log::info!(
            "Stopped after {} frames",
            self.frame_state.frame_count()
        );
    }
}
