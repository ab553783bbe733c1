use glam::Vec2;

/// Canvas size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Population the field settles back to when no effect is active.
    #[inline]
    pub fn baseline_count(&self, area_per_particle: f32) -> usize {
        (self.area() / area_per_particle).floor() as usize
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_area_over_6000() {
        assert_eq!(Viewport::new(1000.0, 1000.0).baseline_count(6000.0), 166);
        assert_eq!(Viewport::new(500.0, 500.0).baseline_count(6000.0), 41);
        assert_eq!(Viewport::new(f32::NAN, 10.0).baseline_count(6000.0), 0);
    }
}
