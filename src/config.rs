//! Tunables for the background particle field.

use crate::color::Color;

/// Parameters used to seed and render a [`ParticleField`](crate::field::ParticleField).
///
/// The defaults reproduce the landing page's animation.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Number of particles seeded when the field is created.
    pub particle_count: usize,
    /// Pairs closer than this get a connection line.
    pub max_distance: f64,
    /// Upper bound of each velocity component, in units per frame.
    pub max_speed: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub particle_color: Color,
    /// Stroke color of connection lines; its alpha is replaced per line.
    pub line_color: Color,
    /// Line opacity at distance zero.
    pub base_line_opacity: f64,
    pub line_width: f64,
}

impl FieldConfig {
    pub const NUM_PARTICLES: usize = 250;
    pub const MAX_DISTANCE: f64 = 150.0;
    pub const MAX_SPEED: f64 = 0.25;
    pub const MIN_SIZE: f64 = 1.0;
    pub const MAX_SIZE: f64 = 3.0;
    pub const PARTICLE_COLOR: Color = Color {
        r: 51,
        g: 51,
        b: 51,
        a: 0.6,
    };
    pub const LINE_COLOR: Color = Color {
        r: 68,
        g: 68,
        b: 68,
        a: 1.0,
    };
    pub const BASE_LINE_OPACITY: f64 = 0.3;
    pub const LINE_WIDTH: f64 = 1.0;

    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    /// Negative or NaN distances disable connection lines entirely.
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = if max_distance > 0.0 { max_distance } else { 0.0 };
        self
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed.abs();
        self
    }

    pub fn with_size_range(mut self, min_size: f64, max_size: f64) -> Self {
        self.min_size = min_size.min(max_size);
        self.max_size = max_size.max(min_size);
        self
    }

    pub fn with_particle_color(mut self, color: Color) -> Self {
        self.particle_color = color;
        self
    }

    pub fn with_line_color(mut self, color: Color, base_opacity: f64) -> Self {
        self.line_color = color;
        self.base_line_opacity = base_opacity.max(0.0).min(1.0);
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: Self::NUM_PARTICLES,
            max_distance: Self::MAX_DISTANCE,
            max_speed: Self::MAX_SPEED,
            min_size: Self::MIN_SIZE,
            max_size: Self::MAX_SIZE,
            particle_color: Self::PARTICLE_COLOR,
            line_color: Self::LINE_COLOR,
            base_line_opacity: Self::BASE_LINE_OPACITY,
            line_width: Self::LINE_WIDTH,
        }
    }
}
