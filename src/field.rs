// Fixed population of drifting particles, joined by lines when they come close

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;
use vecmath::{vec2_len, vec2_sub};

pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    config: FieldConfig,
}

impl ParticleField {
    /// Seeds `count` particles over a `width` x `height` surface using the
    /// thread-local generator, with every other parameter at its default.
    pub fn create(width: u32, height: u32, count: usize, max_distance: f64) -> ParticleField {
        let config = FieldConfig::default()
            .with_particle_count(count)
            .with_max_distance(max_distance);
        ParticleField::with_config(width, height, config, &mut rand::thread_rng())
    }

    pub fn with_config<R: Rng>(
        width: u32,
        height: u32,
        config: FieldConfig,
        rng: &mut R,
    ) -> ParticleField {
        let (width, height) = (width as f64, height as f64);
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            particles.push(Particle::random(
                rng,
                width,
                height,
                config.max_speed,
                config.min_size,
                config.max_size,
            ));
        }
        ParticleField {
            width,
            height,
            particles,
            config,
        }
    }

    // Build a field from explicit particles, no seeding
    pub fn from_particles(width: u32, height: u32, particles: Vec<Particle>, config: FieldConfig) -> Self {
        ParticleField {
            width: width as f64,
            height: height as f64,
            particles,
            config,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// New bounds for subsequent steps. Particles keep their current state.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f64;
        self.height = height as f64;
    }

    /// Advances every particle by one frame and bounces it off the edges.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    /// Clears the surface, then draws each particle followed by its lines to
    /// every later particle within `max_distance`.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear_all();
        let config = &self.config;
        for (i, particle) in self.particles.iter().enumerate() {
            surface.draw_circle(
                particle.pos[0],
                particle.pos[1],
                particle.size,
                config.particle_color,
            );

            for other in &self.particles[i + 1..] {
                let distance = vec2_len(vec2_sub(other.pos, particle.pos));
                if let Some(opacity) = self.connection_opacity(distance) {
                    surface.draw_line(
                        particle.pos,
                        other.pos,
                        config.line_color.with_alpha(opacity),
                        config.line_width,
                    );
                }
            }
        }
    }

    /// Opacity of a line between two particles `distance` apart, or None when
    /// they are too far apart to connect.
    pub fn connection_opacity(&self, distance: f64) -> Option<f64> {
        connection_opacity(distance, self.config.max_distance, self.config.base_line_opacity)
    }
}

/// Linear falloff from `base_opacity` at distance 0 down to 0 at `max_distance`.
pub fn line_opacity(distance: f64, max_distance: f64, base_opacity: f64) -> f64 {
    if max_distance <= 0.0 {
        return 0.0;
    }
    base_opacity * (1.0 - distance / max_distance)
}

fn connection_opacity(distance: f64, max_distance: f64, base_opacity: f64) -> Option<f64> {
    if distance < max_distance {
        Some(line_opacity(distance, max_distance, base_opacity))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(width: u32, height: u32, count: usize) -> ParticleField {
        let config = FieldConfig::default().with_particle_count(count);
        ParticleField::with_config(width, height, config, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn create_seeds_within_ranges() {
        let field = ParticleField::create(800, 600, 250, 150.0);
        assert_eq!(field.len(), 250);
        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 600.0);
            assert!(p.vel[0] >= -0.25 && p.vel[0] <= 0.25);
            assert!(p.vel[1] >= -0.25 && p.vel[1] <= 0.25);
            assert!(p.size >= 1.0 && p.size < 3.0);
        }
    }

    #[test]
    fn seeding_spreads_over_the_surface() {
        let field = seeded(800, 600, 2000);
        let left = field.particles().iter().filter(|p| p.pos[0] < 400.0).count();
        let top = field.particles().iter().filter(|p| p.pos[1] < 300.0).count();
        let heading_left = field.particles().iter().filter(|p| p.vel[0] < 0.0).count();
        for count in [left, top, heading_left].iter() {
            assert!(*count > 800 && *count < 1200, "skewed split: {}", count);
        }
    }

    #[test]
    fn step_keeps_count_and_bounces_out_of_range_axes() {
        let mut field = seeded(200, 100, 250);
        for _ in 0..2000 {
            let before: Vec<Particle> = field.particles().to_vec();
            field.step();
            assert_eq!(field.len(), 250);
            for (old, new) in before.iter().zip(field.particles()) {
                let x = old.pos[0] + old.vel[0];
                let y = old.pos[1] + old.vel[1];
                let flip_x = x < 0.0 || x > 200.0;
                let flip_y = y < 0.0 || y > 100.0;
                assert_eq!(new.vel[0], if flip_x { -old.vel[0] } else { old.vel[0] });
                assert_eq!(new.vel[1], if flip_y { -old.vel[1] } else { old.vel[1] });
                assert_eq!(new.size, old.size);
            }
        }
        for p in field.particles() {
            assert!(p.pos[0] >= -0.25 && p.pos[0] <= 200.25);
            assert!(p.pos[1] >= -0.25 && p.pos[1] <= 100.25);
        }
    }

    #[test]
    fn out_of_bounds_particle_turns_around() {
        let particles = vec![Particle::new(-1.0, 50.0, -0.1, 0.0, 1.0)];
        let mut field = ParticleField::from_particles(800, 600, particles, FieldConfig::default());
        field.step();
        let p = field.particles()[0];
        assert!((p.pos[0] + 1.1).abs() < 1e-12);
        assert_eq!(p.vel[0], 0.1);
    }

    #[test]
    fn two_particles_100_apart_are_connected() {
        let particles = vec![
            Particle::new(0.0, 0.0, 0.0, 0.0, 1.0),
            Particle::new(100.0, 0.0, 0.0, 0.0, 1.0),
        ];
        let field = ParticleField::from_particles(800, 600, particles, FieldConfig::default());
        let mut surface = RecordingSurface::new(800, 600);
        field.draw(&mut surface);

        let lines: Vec<&DrawCommand> = surface.lines().collect();
        assert_eq!(lines.len(), 1);
        match lines[0] {
            DrawCommand::Line { from, to, stroke, width } => {
                assert_eq!(*from, [0.0, 0.0]);
                assert_eq!(*to, [100.0, 0.0]);
                assert!((stroke.a - 0.3 * (1.0 - 100.0 / 150.0)).abs() < 1e-12);
                assert_eq!(*width, 1.0);
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn particles_at_max_distance_are_not_connected() {
        let particles = vec![
            Particle::new(0.0, 0.0, 0.0, 0.0, 1.0),
            Particle::new(150.0, 0.0, 0.0, 0.0, 1.0),
        ];
        let field = ParticleField::from_particles(800, 600, particles, FieldConfig::default());
        let mut surface = RecordingSurface::new(800, 600);
        field.draw(&mut surface);
        assert_eq!(surface.lines().count(), 0);
        assert_eq!(surface.circles().count(), 2);
    }

    #[test]
    fn opacity_falls_off_linearly() {
        assert_eq!(line_opacity(0.0, 150.0, 0.3), 0.3);
        assert_eq!(line_opacity(150.0, 150.0, 0.3), 0.0);
        let mut last = f64::INFINITY;
        for d in 0..150 {
            let o = line_opacity(d as f64, 150.0, 0.3);
            assert!(o < last);
            last = o;
        }
        assert_eq!(connection_opacity(150.0, 150.0, 0.3), None);
    }

    #[test]
    fn each_circle_is_followed_by_its_own_lines() {
        let particles = vec![
            Particle::new(0.0, 0.0, 0.0, 0.0, 1.0),
            Particle::new(10.0, 0.0, 0.0, 0.0, 2.0),
            Particle::new(20.0, 0.0, 0.0, 0.0, 2.5),
        ];
        let field = ParticleField::from_particles(800, 600, particles, FieldConfig::default());
        let mut surface = RecordingSurface::new(800, 600);
        field.draw(&mut surface);

        let kinds: Vec<char> = surface
            .commands
            .iter()
            .map(|cmd| match cmd {
                DrawCommand::Clear { .. } => 'x',
                DrawCommand::Circle { .. } => 'o',
                DrawCommand::Line { .. } => '-',
            })
            .collect();
        assert_eq!(kinds.into_iter().collect::<String>(), "xo--o-o");
    }

    #[test]
    fn drawing_twice_produces_the_same_frame() {
        let field = seeded(800, 600, 250);
        let mut surface = RecordingSurface::new(800, 600);
        field.draw(&mut surface);
        let first = surface.commands.clone();
        field.draw(&mut surface);
        assert_eq!(surface.last_frame(), &first[..]);
    }

    #[test]
    fn empty_field_only_clears() {
        let mut field = ParticleField::create(800, 600, 0, 150.0);
        assert!(field.is_empty());
        field.step();
        let mut surface = RecordingSurface::new(800, 600);
        field.draw(&mut surface);
        assert_eq!(surface.commands.len(), 1);
        assert!(matches!(surface.commands[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn resize_rebounds_without_reseeding() {
        let mut field = seeded(800, 600, 50);
        let before = field.particles().to_vec();
        field.resize(100, 100);
        assert_eq!(field.particles(), &before[..]);
        assert_eq!(field.bounds(), (100.0, 100.0));

        field.step();
        for (old, new) in before.iter().zip(field.particles()) {
            if old.pos[0] + old.vel[0] > 100.0 {
                assert_eq!(new.vel[0], -old.vel[0]);
            }
        }
    }
}
