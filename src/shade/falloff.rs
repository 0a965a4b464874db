use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec4};

/// How the disc fades out towards its rim.
///
/// All three modes agree that anything at or beyond the unit radius is
/// transparent black; they only differ in what happens inside the disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FalloffMode {
    /// Opaque white inside the unit radius, nothing outside.
    Hard,
    /// Grayscale `cos(d * pi/2)` brightness, fully opaque.
    Cosine,
    /// Cosine brightness with a `smoothstep(0.01, 1.0, brightness)` alpha,
    /// giving a soft rim instead of a hard silhouette.
    CosineSmooth,
}

impl FalloffMode {
    pub const ALL: [FalloffMode; 3] = [
        FalloffMode::Hard,
        FalloffMode::Cosine,
        FalloffMode::CosineSmooth,
    ];

    /// Value of the `falloff_mode` uniform in `shaders/disc.fs`.
    pub fn uniform_index(self) -> i32 {
        match self {
            Self::Hard => 0,
            Self::Cosine => 1,
            Self::CosineSmooth => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hard => "Hard cutoff",
            Self::Cosine => "Cosine",
            Self::CosineSmooth => "Cosine + soft alpha",
        }
    }
}

/// Distance of a texcoord from the disc center.
pub fn radial_distance(texcoord: Vec2) -> f32 {
    texcoord.length()
}

/// GLSL-style cubic Hermite step between `edge0` and `edge1`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Shade one fragment of the disc sprite.
///
/// `texcoord` is the interpolated quad-local coordinate, with the disc rim at
/// unit radius. The radius test is exclusive: `d >= 1` is transparent black
/// in every mode. Brightness is clamped to `[0, 1]` so float error just
/// inside the rim can never produce negative channels.
pub fn fragment_shade(mode: FalloffMode, texcoord: Vec2) -> Vec4 {
    let d = radial_distance(texcoord);
    if d >= 1.0 {
        return Vec4::ZERO;
    }

    match mode {
        FalloffMode::Hard => Vec4::ONE,
        FalloffMode::Cosine => {
            let brightness = (d * FRAC_PI_2).cos().clamp(0.0, 1.0);
            Vec4::new(brightness, brightness, brightness, 1.0)
        }
        FalloffMode::CosineSmooth => {
            let brightness = (d * FRAC_PI_2).cos().clamp(0.0, 1.0);
            let alpha = smoothstep(0.01, 1.0, brightness);
            Vec4::new(brightness, brightness, brightness, alpha)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_disc_is_transparent_black() {
        // Sample a grid of [-2, 2]^2 and check every point at or beyond the
        // unit radius, in every mode.
        for mode in FalloffMode::ALL {
            for xi in -20..=20 {
                for yi in -20..=20 {
                    let tc = Vec2::new(xi as f32 / 10.0, yi as f32 / 10.0);
                    if tc.length_squared() >= 1.0 {
                        assert_eq!(
                            fragment_shade(mode, tc),
                            Vec4::ZERO,
                            "mode {:?}, texcoord {:?}",
                            mode,
                            tc
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_center_is_full_white() {
        let center = Vec2::ZERO;
        assert_eq!(fragment_shade(FalloffMode::Hard, center), Vec4::ONE);
        // cos(0) = 1, smoothstep(0.01, 1.0, 1.0) = 1.
        assert_eq!(fragment_shade(FalloffMode::Cosine, center), Vec4::ONE);
        assert_eq!(fragment_shade(FalloffMode::CosineSmooth, center), Vec4::ONE);
    }

    #[test]
    fn test_boundary_is_excluded() {
        // d = 1 exactly: the radius test is exclusive in every mode.
        for mode in FalloffMode::ALL {
            assert_eq!(fragment_shade(mode, Vec2::new(1.0, 0.0)), Vec4::ZERO);
            assert_eq!(fragment_shade(mode, Vec2::new(0.0, -1.0)), Vec4::ZERO);
        }
    }

    #[test]
    fn test_brightness_stays_in_unit_range() {
        for xi in -10..=10 {
            for yi in -10..=10 {
                let tc = Vec2::new(xi as f32 / 10.0, yi as f32 / 10.0);
                let color = fragment_shade(FalloffMode::CosineSmooth, tc);
                assert!(color.x >= 0.0 && color.x <= 1.0, "brightness {}", color.x);
                assert!(color.w >= 0.0 && color.w <= 1.0, "alpha {}", color.w);
            }
        }
    }

    #[test]
    fn test_cosine_falls_off_with_distance() {
        let near = fragment_shade(FalloffMode::Cosine, Vec2::new(0.1, 0.0));
        let far = fragment_shade(FalloffMode::Cosine, Vec2::new(0.9, 0.0));
        assert!(near.x > far.x);
        assert_eq!(near.w, 1.0);
        assert_eq!(far.w, 1.0);
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.01, 1.0, 0.0), 0.0);
        assert_eq!(smoothstep(0.01, 1.0, 0.01), 0.0);
        assert_eq!(smoothstep(0.01, 1.0, 1.0), 1.0);
        assert_eq!(smoothstep(0.01, 1.0, 1.5), 1.0);
    }

    #[test]
    fn test_smoothstep_monotonic() {
        let mut prev = smoothstep(0.01, 1.0, 0.01);
        let steps = 200;
        for i in 1..=steps {
            let x = 0.01 + (1.0 - 0.01) * i as f32 / steps as f32;
            let y = smoothstep(0.01, 1.0, x);
            assert!(y >= prev, "smoothstep decreased at x = {}", x);
            prev = y;
        }
    }

    #[test]
    fn test_radial_distance_matches_manual_norm() {
        for xi in -20..=20 {
            for yi in -20..=20 {
                let x = xi as f32 / 10.0;
                let y = yi as f32 / 10.0;
                let manual = (x * x + y * y).sqrt();
                let lib = radial_distance(Vec2::new(x, y));
                assert!(
                    (manual - lib).abs() < 1e-6,
                    "norm mismatch at ({}, {}): {} vs {}",
                    x,
                    y,
                    manual,
                    lib
                );
            }
        }
    }
}
