//! Collision detection and response primitives
//!
//! Ball-vs-circle (bumpers), ball-vs-capsule (flippers) and ball-vs-wall
//! tests. Detection returns a [`CollisionResult`]; the response (how the
//! velocity changes) is decided by the caller in `tick`.

use glam::Vec2;

use super::table::Table;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the obstacle surface
    pub point: Vec2,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a ball and a solid circle
///
/// Touching counts as a hit (distance equal to the radius sum).
pub fn ball_circle_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    center: Vec2,
    radius: f32,
) -> CollisionResult {
    let offset = ball_pos - center;
    let dist = offset.length();
    let reach = ball_radius + radius;

    if dist > reach {
        return CollisionResult::miss();
    }

    // Concentric ball: push straight up
    let normal = offset.try_normalize().unwrap_or(Vec2::NEG_Y);
    CollisionResult {
        hit: true,
        point: center + normal * radius,
        normal,
        penetration: reach - dist,
    }
}

/// Check collision between a ball and a thick line segment (a capsule)
///
/// The segment runs from `a` to `b` with the given half thickness. The normal
/// points from the closest point on the segment toward the ball.
pub fn ball_segment_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    a: Vec2,
    b: Vec2,
    half_width: f32,
) -> CollisionResult {
    let seg = b - a;
    let len_sq = seg.length_squared();

    let t = if len_sq < 0.0001 {
        0.0 // Degenerate segment, treat as a point
    } else {
        ((ball_pos - a).dot(seg) / len_sq).clamp(0.0, 1.0)
    };
    let closest = a + seg * t;
    let offset = ball_pos - closest;
    let dist = offset.length();
    let reach = ball_radius + half_width;

    if dist > reach {
        return CollisionResult::miss();
    }

    let normal = match offset.try_normalize() {
        Some(n) => n,
        None => {
            // Ball center on the segment line: use the upward-facing perpendicular
            let perp = Vec2::new(-seg.y, seg.x).normalize_or_zero();
            if perp.y > 0.0 { -perp } else { perp }
        }
    };

    CollisionResult {
        hit: true,
        point: closest + normal * half_width,
        normal,
        penetration: reach - dist,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Which walls were struck in a wall pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Keep the ball inside the side and top walls
///
/// Reflects the perpendicular velocity component (scaled by `restitution`)
/// and clamps the position so the ball's edge sits on the wall face. The
/// bottom is open: draining is handled by the caller.
pub fn resolve_walls(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    table: &Table,
    restitution: f32,
) -> WallHits {
    let mut hits = WallHits::default();

    if pos.x - radius < table.left_wall {
        pos.x = table.left_wall + radius;
        vel.x = vel.x.abs() * restitution;
        hits.left = true;
    }
    if pos.x + radius > table.right_wall {
        pos.x = table.right_wall - radius;
        vel.x = -vel.x.abs() * restitution;
        hits.right = true;
    }
    if pos.y - radius < table.top_wall {
        pos.y = table.top_wall + radius;
        vel.y = vel.y.abs() * restitution;
        hits.top = true;
    }

    hits
}
