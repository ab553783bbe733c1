use crate::color::Rgb;
use crate::surface::Surface;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

pub const MAX_GLITCH_FRAGMENTS: usize = 40;
const DAMPING: f32 = 0.96;

/// Short-lived sliver ejected from a node under heavy interference.
#[derive(Clone, Debug)]
pub struct GlitchFragment {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgb,
    pub vel: Vec2,
    pub life: f32,
    pub decay: f32,
}

impl GlitchFragment {
    pub fn spawn(at: Vec2, color: Rgb, rng: &mut StdRng) -> Self {
        Self {
            pos: at,
            size: Vec2::new(2.0 + rng.gen::<f32>() * 20.0, 1.0 + rng.gen::<f32>() * 4.0),
            color,
            vel: Vec2::new((rng.gen::<f32>() - 0.5) * 8.0, (rng.gen::<f32>() - 0.5) * 8.0),
            life: 0.8 + rng.gen::<f32>() * 0.4,
            decay: 0.015 + rng.gen::<f32>() * 0.02,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel *= DAMPING;
        self.life -= self.decay;
    }

    /// A NaN life counts as dead.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0 || self.life.is_nan() || !self.pos.is_finite()
    }

    pub fn draw(&self, surface: &mut dyn Surface, transition: f32) {
        if self.is_dead() {
            return;
        }
        surface.set_fill_color(self.color.alpha(self.life * transition * 0.8));
        surface.fill_rect(self.pos.x, self.pos.y, self.size.x, self.size.y);
    }
}
