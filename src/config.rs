use failure::Fail;
use serde_derive::Deserialize;

use crate::runtime::{ContextOptions, PowerPreference};

/// How the animation clock advances from one frame to the next.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TimeStep {
    /// Advance by a constant amount per frame, regardless of how long the frame took.
    Fixed(f64),
    /// Advance by the wall-clock time between animation frames, scaled to `units_per_second`.
    RealTime { units_per_second: f64 },
}

impl Default for TimeStep {
    fn default() -> Self {
        TimeStep::Fixed(0.01)
    }
}

#[derive(Fail, PartialEq, Debug)]
pub enum ConfigError {
    #[fail(display = "Malformed launch options: {}", _0)]
    Malformed(String),
    #[fail(display = "Unknown log level `{}`", _0)]
    UnknownLogLevel(String),
    #[fail(display = "The time step must be a positive number, got {}", _0)]
    InvalidTimeStep(f64),
    #[fail(display = "Only one of `timeStep` and `unitsPerSecond` may be given")]
    ConflictingTimeStep,
}

/// The options a page may pass to `launch`, as a plain JavaScript object with camelCase keys.
///
/// Every field is optional and falls back to the [AppConfig] default:
///
/// ```js
/// launch("canvas", { width: 800, height: 600, unitsPerSecond: 0.6, logLevel: "debug" });
/// ```
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub clear_color: Option<[f32; 4]>,
    /// Animation time added per frame.
    pub time_step: Option<f64>,
    /// Animation time per second of wall-clock time; switches to [TimeStep::RealTime].
    pub units_per_second: Option<f64>,
    pub log_level: Option<String>,
    pub alpha: Option<bool>,
    pub antialias: Option<bool>,
    pub preserve_drawing_buffer: Option<bool>,
    pub power_preference: Option<PowerPreference>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct AppConfig {
    canvas_id: String,
    width: u32,
    height: u32,
    clear_color: [f32; 4],
    time_step: TimeStep,
    log_level: log::Level,
    context_options: ContextOptions,
}

impl AppConfig {
    pub fn begin() -> AppConfigBuilder {
        AppConfigBuilder {
            config: AppConfig::default(),
        }
    }

    /// Applies the `options` a page passed along with the `canvas_id` on top of the defaults.
    pub fn from_launch_options(
        canvas_id: &str,
        options: LaunchOptions,
    ) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let mut builder = AppConfig::begin().canvas_id(canvas_id).size(
            options.width.unwrap_or(defaults.width),
            options.height.unwrap_or(defaults.height),
        );

        if let Some(clear_color) = options.clear_color {
            builder = builder.clear_color(clear_color);
        }

        let time_step = match (options.time_step, options.units_per_second) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingTimeStep),
            (Some(step), None) => TimeStep::Fixed(positive(step)?),
            (None, Some(units_per_second)) => TimeStep::RealTime {
                units_per_second: positive(units_per_second)?,
            },
            (None, None) => TimeStep::default(),
        };

        builder = builder.time_step(time_step);

        if let Some(log_level) = options.log_level {
            let level = log_level
                .parse::<log::Level>()
                .map_err(|_| ConfigError::UnknownLogLevel(log_level.clone()))?;

            builder = builder.log_level(level);
        }

        let mut context_options = ContextOptions::begin();

        if options.alpha == Some(false) {
            context_options = context_options.disable_alpha();
        }

        if options.antialias == Some(false) {
            context_options = context_options.disable_antialias();
        }

        if let Some(preserve_drawing_buffer) = options.preserve_drawing_buffer {
            context_options = context_options.preserve_drawing_buffer(preserve_drawing_buffer);
        }

        if let Some(power_preference) = options.power_preference {
            context_options = context_options.power_preference(power_preference);
        }

        Ok(builder.context_options(context_options.finish()).finish())
    }

    /// The `id` of the `<canvas>` element to render to.
    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn time_step(&self) -> TimeStep {
        self.time_step
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level
    }

    pub fn context_options(&self) -> &ContextOptions {
        &self.context_options
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            canvas_id: "canvas".to_string(),
            width: 640,
            height: 640,
            // The alpha of 0 has no visible effect unless the page composites the canvas with
            // transparency.
            clear_color: [1.0, 0.0, 0.0, 0.0],
            time_step: TimeStep::default(),
            log_level: log::Level::Info,
            context_options: ContextOptions::default(),
        }
    }
}

fn positive(step: f64) -> Result<f64, ConfigError> {
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(ConfigError::InvalidTimeStep(step))
    }
}

pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn canvas_id<S>(mut self, canvas_id: S) -> Self
    where
        S: Into<String>,
    {
        self.config.canvas_id = canvas_id.into();

        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;

        self
    }

    pub fn clear_color(mut self, clear_color: [f32; 4]) -> Self {
        self.config.clear_color = clear_color;

        self
    }

    pub fn time_step(mut self, time_step: TimeStep) -> Self {
        self.config.time_step = time_step;

        self
    }

    pub fn log_level(mut self, log_level: log::Level) -> Self {
        self.config.log_level = log_level;

        self
    }

    pub fn context_options(mut self, context_options: ContextOptions) -> Self {
        self.config.context_options = context_options;

        self
    }

    pub fn finish(self) -> AppConfig {
        self.config
    }
}
