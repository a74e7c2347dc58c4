use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerPreference {
    Default,
    HighPerformance,
    LowPower,
}

impl Default for PowerPreference {
    fn default() -> Self {
        PowerPreference::Default
    }
}

/// Options for the WebGL 2.0 context that is created for the canvas.
///
/// WebGL 2.0 exposes OpenGL ES 3.0, and the browser always double buffers the drawing buffer, so
/// the version and buffering are not configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextOptions {
    alpha: bool,
    antialias: bool,
    depth: bool,
    stencil: bool,
    premultiplied_alpha: bool,
    preserve_drawing_buffer: bool,
    fail_if_major_performance_caveat: bool,
    power_preference: PowerPreference,
}

impl ContextOptions {
    pub fn begin() -> ContextOptionsBuilder {
        ContextOptionsBuilder {
            options: ContextOptions::default(),
        }
    }

    pub fn alpha(&self) -> bool {
        self.alpha
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    pub fn depth(&self) -> bool {
        self.depth
    }

    pub fn stencil(&self) -> bool {
        self.stencil
    }

    pub fn premultiplied_alpha(&self) -> bool {
        self.premultiplied_alpha
    }

    pub fn preserve_drawing_buffer(&self) -> bool {
        self.preserve_drawing_buffer
    }

    pub fn fail_if_major_performance_caveat(&self) -> bool {
        self.fail_if_major_performance_caveat
    }

    pub fn power_preference(&self) -> PowerPreference {
        self.power_preference
    }

    /// The `WebGLContextAttributes` dictionary passed to `getContext`.
    pub(crate) fn attributes(&self) -> ContextAttributes {
        ContextAttributes {
            alpha: self.alpha,
            antialias: self.antialias,
            depth: self.depth,
            stencil: self.stencil,
            premultiplied_alpha: self.premultiplied_alpha,
            preserve_drawing_buffer: self.preserve_drawing_buffer,
            fail_if_major_performance_caveat: self.fail_if_major_performance_caveat,
            power_preference: self.power_preference,
        }
    }
}

impl Default for ContextOptions {
    /// The browser's defaults, except that a depth buffer is always requested.
    fn default() -> Self {
        ContextOptions {
            alpha: true,
            antialias: true,
            depth: true,
            stencil: false,
            premultiplied_alpha: true,
            preserve_drawing_buffer: false,
            fail_if_major_performance_caveat: false,
            power_preference: PowerPreference::default(),
        }
    }
}

pub struct ContextOptionsBuilder {
    options: ContextOptions,
}

impl ContextOptionsBuilder {
    pub fn disable_alpha(mut self) -> Self {
        self.options.alpha = false;

        self
    }

    pub fn disable_antialias(mut self) -> Self {
        self.options.antialias = false;

        self
    }

    pub fn disable_depth(mut self) -> Self {
        self.options.depth = false;

        self
    }

    pub fn enable_stencil(mut self) -> Self {
        self.options.stencil = true;

        self
    }

    pub fn premultiplied_alpha(mut self, premultiplied_alpha: bool) -> Self {
        self.options.premultiplied_alpha = premultiplied_alpha;

        self
    }

    pub fn preserve_drawing_buffer(mut self, preserve_drawing_buffer: bool) -> Self {
        self.options.preserve_drawing_buffer = preserve_drawing_buffer;

        self
    }

    pub fn fail_if_major_performance_caveat(
        mut self,
        fail_if_major_performance_caveat: bool,
    ) -> Self {
        self.options.fail_if_major_performance_caveat = fail_if_major_performance_caveat;

        self
    }

    pub fn power_preference(mut self, power_preference: PowerPreference) -> Self {
        self.options.power_preference = power_preference;

        self
    }

    pub fn finish(self) -> ContextOptions {
        self.options
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContextAttributes {
    alpha: bool,
    antialias: bool,
    depth: bool,
    stencil: bool,
    premultiplied_alpha: bool,
    preserve_drawing_buffer: bool,
    fail_if_major_performance_caveat: bool,
    power_preference: PowerPreference,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_requests_depth() {
        let options = ContextOptions::default();

        assert!(options.depth());
        assert!(!options.stencil());
        assert!(!options.preserve_drawing_buffer());
        assert_eq!(options.power_preference(), PowerPreference::Default);
    }

    #[test]
    fn test_builder() {
        let options = ContextOptions::begin()
            .disable_antialias()
            .enable_stencil()
            .power_preference(PowerPreference::HighPerformance)
            .preserve_drawing_buffer(true)
            .finish();

        assert!(!options.antialias());
        assert!(options.stencil());
        assert!(options.depth());
        assert!(options.preserve_drawing_buffer());
        assert_eq!(options.power_preference(), PowerPreference::HighPerformance);
    }

    #[test]
    fn test_attributes_mirror_options() {
        let options = ContextOptions::begin().disable_depth().disable_alpha().finish();
        let attributes = options.attributes();

        assert_eq!(
            attributes,
            ContextAttributes {
                alpha: false,
                antialias: true,
                depth: false,
                stencil: false,
                premultiplied_alpha: true,
                preserve_drawing_buffer: false,
                fail_if_major_performance_caveat: false,
                power_preference: PowerPreference::Default,
            }
        );
    }
}
