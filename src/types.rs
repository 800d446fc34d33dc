use glam::Mat4;

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

/// Per-mesh uniform buffer data: world transform plus flat color
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl ModelUniform {
    pub fn new(model: Mat4, color: [f32; 3], opacity: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [color[0], color[1], color[2], opacity],
        }
    }
}

/// Vertex data for mesh geometry
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub const fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_uniform_roundtrip() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let uniform = CameraUniform::new(m);
        assert_eq!(Mat4::from_cols_array_2d(&uniform.view_proj), m);
    }

    #[test]
    fn test_model_uniform_packs_opacity_into_alpha() {
        let uniform = ModelUniform::new(Mat4::IDENTITY, [0.5, 0.25, 1.0], 0.8);
        assert_eq!(uniform.color, [0.5, 0.25, 1.0, 0.8]);
    }

    #[test]
    fn test_vertex_stride_matches_layout() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
    }
}
