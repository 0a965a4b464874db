use glam::{Mat4, Vec2, Vec3, Vec4};

/// Quad corners in counter-clockwise order, doubling as the corner texcoords.
pub const QUAD_CORNERS: [Vec2; 4] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
];

/// Corner texcoord for a vertex index. The table is cyclic: indices past the
/// fourth vertex wrap via `index % 4`, so any index is valid.
pub fn corner_texcoord(index: u32) -> Vec2 {
    QUAD_CORNERS[(index % 4) as usize]
}

/// Where the vertex stage takes its texcoord from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexcoordSource {
    /// Pass the texcoord vertex attribute through unchanged.
    Attribute,
    /// Derive the texcoord from the vertex index via [`QUAD_CORNERS`].
    VertexIndex,
}

impl TexcoordSource {
    pub const ALL: [TexcoordSource; 2] = [TexcoordSource::Attribute, TexcoordSource::VertexIndex];

    /// Value of the `texcoord_source` uniform in `shaders/disc.vs`.
    pub fn uniform_index(self) -> i32 {
        match self {
            Self::Attribute => 0,
            Self::VertexIndex => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Attribute => "Texcoord attribute",
            Self::VertexIndex => "Vertex index",
        }
    }
}

/// Output of the vertex stage: a clip-space position plus the texcoord that
/// gets interpolated into the fragment stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput {
    pub clip_position: Vec4,
    pub texcoord: Vec2,
}

/// Run the vertex stage for a single vertex.
///
/// The clip position is `projection * view * model * (position, 1)`. Feeding
/// identity matrices reproduces the untransformed pass-through variant.
pub fn vertex_shade(
    source: TexcoordSource,
    index: u32,
    texcoord: Vec2,
    position: Vec3,
    model: &Mat4,
    view: &Mat4,
    projection: &Mat4,
) -> VertexOutput {
    let texcoord = match source {
        TexcoordSource::Attribute => texcoord,
        TexcoordSource::VertexIndex => corner_texcoord(index),
    };

    let clip_position = *projection * *view * *model * position.extend(1.0);

    VertexOutput {
        clip_position,
        texcoord,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Column-major 4x4 * vec4, written out by hand so the test does not
    // depend on glam's own multiply.
    fn manual_transform(m: &Mat4, v: Vec4) -> Vec4 {
        let cols = m.to_cols_array_2d();
        let mut out = [0.0f32; 4];
        for row in 0..4 {
            out[row] = cols[0][row] * v.x
                + cols[1][row] * v.y
                + cols[2][row] * v.z
                + cols[3][row] * v.w;
        }
        Vec4::from_array(out)
    }

    fn assert_vec4_close(a: Vec4, b: Vec4) {
        assert!((a - b).abs().max_element() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_corner_table() {
        assert_eq!(corner_texcoord(0), Vec2::new(-1.0, -1.0));
        assert_eq!(corner_texcoord(1), Vec2::new(1.0, -1.0));
        assert_eq!(corner_texcoord(2), Vec2::new(1.0, 1.0));
        assert_eq!(corner_texcoord(3), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_corner_table_wraps() {
        for index in 0..32 {
            assert_eq!(corner_texcoord(index), corner_texcoord(index % 4));
        }
    }

    #[test]
    fn test_attribute_texcoord_passes_through() {
        let out = vertex_shade(
            TexcoordSource::Attribute,
            7,
            Vec2::new(0.25, -0.5),
            Vec3::ZERO,
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
        );
        assert_eq!(out.texcoord, Vec2::new(0.25, -0.5));
    }

    #[test]
    fn test_index_texcoord_ignores_attribute() {
        let out = vertex_shade(
            TexcoordSource::VertexIndex,
            2,
            Vec2::new(0.25, -0.5),
            Vec3::ZERO,
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
        );
        assert_eq!(out.texcoord, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_identity_transform_passes_position_through() {
        let out = vertex_shade(
            TexcoordSource::VertexIndex,
            0,
            Vec2::ZERO,
            Vec3::new(0.5, -0.25, 0.125),
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
        );
        assert_eq!(out.clip_position, Vec4::new(0.5, -0.25, 0.125, 1.0));
    }

    #[test]
    fn test_clip_position_matches_manual_multiply() {
        let model = Mat4::from_scale(Vec3::new(2.0, 0.5, 1.5))
            * Mat4::from_rotation_y(0.7)
            * Mat4::from_translation(Vec3::new(0.3, -1.2, 4.0));
        let view = Mat4::look_at_rh(Vec3::new(0.0, 1.0, 3.0), Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_rh_gl(45f32.to_radians(), 16.0 / 9.0, 0.01, 100.0);

        let positions = [
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-0.5, 0.25, -7.0),
            Vec3::new(100.0, -50.0, 0.001),
        ];

        for position in positions {
            let out = vertex_shade(
                TexcoordSource::Attribute,
                0,
                Vec2::ZERO,
                position,
                &model,
                &view,
                &projection,
            );
            let expected = manual_transform(
                &projection,
                manual_transform(&view, manual_transform(&model, position.extend(1.0))),
            );
            assert_vec4_close(out.clip_position, expected);
        }
    }
}
