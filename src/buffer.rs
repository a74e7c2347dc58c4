use std::mem;

use failure::Fail;

use crate::pipeline::Program;
use crate::runtime::RenderingContext;

/// Name of the vertex shader input the [Vertex::position] is bound to.
pub const POSITION_ATTRIBUTE: &str = "position";

#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Vertex {
    pub position: [f32; 2],
}

impl Vertex {
    pub const COMPONENTS: usize = 2;

    pub const STRIDE: usize = mem::size_of::<Vertex>();
}

/// The triangle that gets drawn every frame.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex {
        position: [-0.5, -0.5],
    },
    Vertex {
        position: [0.0, 0.5],
    },
    Vertex {
        position: [0.5, -0.5],
    },
];

#[derive(Fail, PartialEq, Debug)]
pub enum UploadError {
    #[fail(display = "The context could not allocate a buffer object")]
    BufferAllocation,
    #[fail(display = "The program has no active `{}` attribute", _0)]
    AttributeNotFound(&'static str),
}

/// Vertex data stored in a GPU buffer, wired up to a program's position attribute.
pub struct Mesh<C>
where
    C: RenderingContext,
{
    buffer: C::Buffer,
    vertex_count: usize,
    attribute_location: u32,
}

impl<C> Mesh<C>
where
    C: RenderingContext,
{
    /// Copies the `vertices` into a new buffer and configures the `program`'s position attribute
    /// to read 2 tightly packed floats per vertex from it.
    ///
    /// The buffer's contents are never modified after the upload.
    pub fn upload(
        context: &C,
        program: &Program<C>,
        vertices: &[Vertex],
    ) -> Result<Self, UploadError> {
        let attribute_location = program
            .attribute_location(context, POSITION_ATTRIBUTE)
            .ok_or(UploadError::AttributeNotFound(POSITION_ATTRIBUTE))?;
        let buffer = context
            .create_buffer()
            .ok_or(UploadError::BufferAllocation)?;

        context.array_buffer_data(&buffer, &flatten(vertices));
        context.float_attrib_pointer(
            attribute_location,
            Vertex::COMPONENTS as i32,
            Vertex::STRIDE as i32,
            0,
        );

        Ok(Mesh {
            buffer,
            vertex_count: vertices.len(),
            attribute_location,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn attribute_location(&self) -> u32 {
        self.attribute_location
    }

    /// Downloads the buffer's contents as the flat sequence of vertex components.
    pub fn read_back(&self, context: &C) -> Vec<f32> {
        context.read_array_buffer(&self.buffer, self.vertex_count * Vertex::COMPONENTS)
    }

    pub(crate) fn delete(&self, context: &C) {
        context.delete_buffer(&self.buffer);
    }
}

fn flatten(vertices: &[Vertex]) -> Vec<f32> {
    vertices.iter().flat_map(|v| v.position.iter().copied()).collect()
}
