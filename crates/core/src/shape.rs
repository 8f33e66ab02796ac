//! Falling shapes in the reflex panel.
//!
//! Coordinates are local to the reflex panel (`0..REFLEX_WIDTH` by
//! `0..REFLEX_HEIGHT`, y grows downward). Shapes only ever move straight down.

use crate::rng::SimpleRng;
use crate::types::{
    ShapeColor, ShapeKind, CATCH_RADIUS, CURSOR_Y, REFLEX_HEIGHT, REFLEX_WIDTH, SHAPE_MAX_SPEED,
    SHAPE_MIN_SPEED, SHAPE_SIZE, SHAPE_SPAWN_MARGIN, SHAPE_SPAWN_Y, TICK_MS,
};

/// A falling token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: ShapeColor,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Logical pixels per tick.
    pub speed: f32,
}

/// What happened to a shape during one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeFate {
    /// Still on screen and out of reach.
    Falling,
    /// Caught while it was the target kind.
    Caught,
    /// Caught while it was not the target kind.
    WrongCatch,
    /// A target shape fell off the bottom.
    MissedTarget,
    /// A non-target shape fell off the bottom.
    Escaped,
}

impl ShapeFate {
    pub fn removes_shape(&self) -> bool {
        !matches!(self, ShapeFate::Falling)
    }

    pub fn costs_life(&self) -> bool {
        matches!(self, ShapeFate::WrongCatch | ShapeFate::MissedTarget)
    }
}

impl Shape {
    pub fn new(kind: ShapeKind, color: ShapeColor, x: f32, y: f32, speed: f32) -> Self {
        Self {
            kind,
            color,
            x,
            y,
            size: SHAPE_SIZE,
            speed,
        }
    }

    /// Roll a new shape just above the visible area.
    pub fn spawn(rng: &mut SimpleRng) -> Self {
        let kind = rng.choose(&ShapeKind::ALL);
        let color = rng.choose(&ShapeColor::ALL);
        let x = rng.range_inclusive(
            SHAPE_SPAWN_MARGIN as i32,
            (REFLEX_WIDTH - SHAPE_SPAWN_MARGIN) as i32,
        ) as f32;
        let speed = rng.range_f32(SHAPE_MIN_SPEED, SHAPE_MAX_SPEED);
        Self::new(kind, color, x, SHAPE_SPAWN_Y, speed)
    }

    /// Advance by `elapsed_ms`; speed is defined per fixed tick.
    pub fn fall(&mut self, elapsed_ms: u32) {
        self.y += self.speed * elapsed_ms as f32 / TICK_MS as f32;
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        (self.x - x).hypot(self.y - y)
    }

    pub fn is_below_screen(&self) -> bool {
        self.y > REFLEX_HEIGHT
    }

    /// Decide the fate of this shape against the catcher at `cursor_x`.
    ///
    /// A catch is any center within `CATCH_RADIUS` of the catcher point, whatever
    /// the outline. Catches take priority over leaving the screen.
    pub fn fate(&self, cursor_x: f32, target: ShapeKind) -> ShapeFate {
        if self.distance_to(cursor_x, CURSOR_Y) < CATCH_RADIUS {
            if self.kind == target {
                ShapeFate::Caught
            } else {
                ShapeFate::WrongCatch
            }
        } else if self.is_below_screen() {
            if self.kind == target {
                ShapeFate::MissedTarget
            } else {
                ShapeFate::Escaped
            }
        } else {
            ShapeFate::Falling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(kind: ShapeKind, x: f32, y: f32) -> Shape {
        Shape::new(kind, ShapeColor::Red, x, y, 3.0)
    }

    #[test]
    fn spawn_stays_inside_panel_margins() {
        let mut rng = SimpleRng::new(42);
        for _ in 0..500 {
            let s = Shape::spawn(&mut rng);
            assert!(s.x >= SHAPE_SPAWN_MARGIN && s.x <= REFLEX_WIDTH - SHAPE_SPAWN_MARGIN);
            assert_eq!(s.y, SHAPE_SPAWN_Y);
            assert!(s.speed >= SHAPE_MIN_SPEED && s.speed < SHAPE_MAX_SPEED);
            assert_eq!(s.size, SHAPE_SIZE);
        }
    }

    #[test]
    fn fall_scales_with_elapsed_time() {
        let mut s = at(ShapeKind::Circle, 100.0, 0.0);
        s.fall(TICK_MS);
        assert_eq!(s.y, 3.0);
        s.fall(TICK_MS * 2);
        assert_eq!(s.y, 9.0);
        s.fall(0);
        assert_eq!(s.y, 9.0);
    }

    #[test]
    fn catch_inside_radius_matches_target() {
        let s = at(ShapeKind::Square, 300.0, CURSOR_Y - 39.0);
        assert_eq!(s.fate(300.0, ShapeKind::Square), ShapeFate::Caught);
        assert_eq!(s.fate(300.0, ShapeKind::Circle), ShapeFate::WrongCatch);
    }

    #[test]
    fn radius_boundary_is_exclusive() {
        let s = at(ShapeKind::Circle, 300.0, CURSOR_Y - CATCH_RADIUS);
        assert_eq!(s.fate(300.0, ShapeKind::Circle), ShapeFate::Falling);
    }

    #[test]
    fn catch_uses_euclidean_distance() {
        // Both axis offsets are under the radius, the diagonal is not.
        let s = at(ShapeKind::Circle, 330.0, CURSOR_Y + 35.0);
        assert!((s.distance_to(300.0, CURSOR_Y) - 46.098).abs() < 1e-2);
        assert_eq!(s.fate(300.0, ShapeKind::Circle), ShapeFate::Falling);
    }

    #[test]
    fn leaving_screen_only_penalizes_targets() {
        let s = at(ShapeKind::Triangle, 50.0, REFLEX_HEIGHT + 1.0);
        assert_eq!(s.fate(500.0, ShapeKind::Triangle), ShapeFate::MissedTarget);
        assert_eq!(s.fate(500.0, ShapeKind::Circle), ShapeFate::Escaped);
        assert!(ShapeFate::MissedTarget.costs_life());
        assert!(!ShapeFate::Escaped.costs_life());
        assert!(ShapeFate::Escaped.removes_shape());
    }
}
