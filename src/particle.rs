// Simple particle struct to keep track of individual position, velocity, and radius

use rand::Rng;
use vecmath::{vec2_add, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, size: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            size,
        }
    }

    // Uniform position in [0, width) x [0, height), each velocity component in
    // [-max_speed, max_speed), size in [min_size, max_size)
    pub fn random<R: Rng>(
        rng: &mut R,
        width: f64,
        height: f64,
        max_speed: f64,
        min_size: f64,
        max_size: f64,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * max_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * max_speed;
        let size = rng.gen::<f64>() * (max_size - min_size) + min_size;
        Particle::new(pos_x, pos_y, vel_x, vel_y, size)
    }

    // Moves one fixed step, then flips each velocity component whose axis
    // ended up outside [0, bound]. The position is left where it landed, so
    // a particle may sit up to one step outside the bounds.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.pos = vec2_add(self.pos, self.vel);
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] *= -1.0;
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] *= -1.0;
        }
    }
}
