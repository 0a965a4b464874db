use glam::Vec3;
use rand::Rng;

const BOUND: f32 = 1.0;
const MAX_SPEED: f32 = 0.2;

/// A cloud of points drifting inside the [-1, 1] cube.
///
/// The discs are alpha blended, so `points` is kept sorted by ascending `z`:
/// with the camera out on the +Z axis that is back-to-front painter's order.
#[derive(Debug, Clone)]
pub struct Cloud {
    points: Vec<Vec3>,
    velocities: Vec<Vec3>,
}

impl Cloud {
    pub fn new(count: usize) -> Self {
        let mut rng = rand::thread_rng();

        let mut points = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);

        for _ in 0..count {
            points.push(Vec3::new(
                rng.gen_range(-BOUND..=BOUND),
                rng.gen_range(-BOUND..=BOUND),
                rng.gen_range(-BOUND..=BOUND),
            ));
            velocities.push(Vec3::new(
                rng.gen_range(-MAX_SPEED..=MAX_SPEED),
                rng.gen_range(-MAX_SPEED..=MAX_SPEED),
                rng.gen_range(-MAX_SPEED..=MAX_SPEED),
            ));
        }

        let mut cloud = Self { points, velocities };
        cloud.sort_by_depth();
        cloud
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Advance every point by its velocity, bouncing off the cube walls.
    pub fn step(&mut self, delta: f32) {
        if self.is_empty() {
            return;
        }

        for (point, velocity) in self.points.iter_mut().zip(self.velocities.iter_mut()) {
            *point += *velocity * delta;

            for axis in 0..3 {
                if point[axis] > BOUND {
                    point[axis] = BOUND;
                    velocity[axis] = -velocity[axis];
                } else if point[axis] < -BOUND {
                    point[axis] = -BOUND;
                    velocity[axis] = -velocity[axis];
                }
            }
        }

        self.sort_by_depth();
    }

    fn sort_by_depth(&mut self) {
        // Sort points and velocities together, farthest (smallest z) first.
        let mut order: Vec<usize> = (0..self.points.len()).collect();
        order.sort_by(|&a, &b| self.points[a].z.total_cmp(&self.points[b].z));

        self.points = order.iter().map(|&i| self.points[i]).collect();
        self.velocities = order.iter().map(|&i| self.velocities[i]).collect();
    }
}
