//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in table coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::vec_from_angle;

fn push_triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

fn push_quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    push_triangle(out, a, b, c, color);
    push_triangle(out, a, c, d, color);
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        push_triangle(
            &mut vertices,
            center,
            center + vec_from_angle(theta1) * radius,
            center + vec_from_angle(theta2) * radius,
            color,
        );
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let dir1 = vec_from_angle((i as f32 / segments as f32) * 2.0 * PI);
        let dir2 = vec_from_angle(((i + 1) as f32 / segments as f32) * 2.0 * PI);

        // Two triangles per segment
        push_quad(
            &mut vertices,
            [
                center + dir1 * inner_radius,
                center + dir1 * outer_radius,
                center + dir2 * outer_radius,
                center + dir2 * inner_radius,
            ],
            color,
        );
    }

    vertices
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        color,
    );
    vertices
}

/// Generate vertices for a thick segment with rounded ends (stadium shape)
pub fn capsule(
    a: Vec2,
    b: Vec2,
    half_width: f32,
    color: [f32; 4],
    cap_segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    let dir = (b - a).normalize_or_zero();
    if dir != Vec2::ZERO {
        let perp = dir.perp() * half_width;
        push_quad(&mut vertices, [a + perp, b + perp, b - perp, a - perp], color);
    }

    vertices.extend(circle(a, half_width, color, cap_segments));
    vertices.extend(circle(b, half_width, color, cap_segments));
    vertices
}

/// Seven-segment masks for 0-9, bit order a b c d e f g (top, clockwise, middle)
const DIGIT_SEGMENTS: [u8; 10] = [
    0b111_1110, // 0
    0b011_0000, // 1
    0b110_1101, // 2
    0b111_1001, // 3
    0b011_0011, // 4
    0b101_1011, // 5
    0b101_1111, // 6
    0b111_0000, // 7
    0b111_1111, // 8
    0b111_1011, // 9
];

/// Generate vertices for one seven-segment digit with its top-left corner at `origin`
///
/// Values above 9 are drawn as 8.
pub fn digit(
    origin: Vec2,
    digit: u8,
    width: f32,
    height: f32,
    thickness: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mask = DIGIT_SEGMENTS[digit.min(9) as usize];
    let half = height * 0.5;
    let t = thickness;

    // (min, max) for each segment, offsets from origin
    let segments = [
        (Vec2::new(0.0, 0.0), Vec2::new(width, t)),               // a
        (Vec2::new(width - t, 0.0), Vec2::new(width, half)),      // b
        (Vec2::new(width - t, half), Vec2::new(width, height)),   // c
        (Vec2::new(0.0, height - t), Vec2::new(width, height)),   // d
        (Vec2::new(0.0, half), Vec2::new(t, height)),             // e
        (Vec2::new(0.0, 0.0), Vec2::new(t, half)),                // f
        (Vec2::new(0.0, half - t * 0.5), Vec2::new(width, half + t * 0.5)), // g
    ];

    let mut vertices = Vec::with_capacity(7 * 6);
    for (i, (min, max)) in segments.iter().enumerate() {
        if mask & (1 << (6 - i)) != 0 {
            vertices.extend(rect(origin + *min, origin + *max, color));
        }
    }
    vertices
}

/// Generate vertices for a decimal number, left-aligned at `origin`
pub fn number(origin: Vec2, value: u64, digit_height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let width = digit_height * 0.55;
    let thickness = (digit_height * 0.12).max(1.0);
    let advance = width + thickness * 2.0;

    value
        .to_string()
        .bytes()
        .enumerate()
        .flat_map(|(i, b)| {
            let pos = origin + Vec2::new(advance * i as f32, 0.0);
            digit(pos, b - b'0', width, digit_height, thickness, color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_circle_vertices_on_radius() {
        let center = Vec2::new(100.0, 50.0);
        let verts = circle(center, 10.0, WHITE, 16);
        assert_eq!(verts.len(), 48);
        for tri in verts.chunks(3) {
            assert_eq!(Vec2::from(tri[0].position), center);
            let d = Vec2::from(tri[1].position).distance(center);
            assert!((d - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 5.0), WHITE);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 3.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 2.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 5.0);
    }

    #[test]
    fn test_degenerate_capsule_is_a_dot() {
        let p = Vec2::new(5.0, 5.0);
        let verts = capsule(p, p, 3.0, WHITE, 8);
        assert_eq!(verts.len(), 2 * 8 * 3);
    }

    #[test]
    fn test_digit_segment_counts() {
        let segs = |d: u8| digit(Vec2::ZERO, d, 10.0, 20.0, 2.0, WHITE).len() / 6;
        assert_eq!(segs(1), 2);
        assert_eq!(segs(7), 3);
        assert_eq!(segs(4), 4);
        assert_eq!(segs(0), 6);
        assert_eq!(segs(8), 7);
    }

    #[test]
    fn test_number_lays_out_digits_left_to_right() {
        let one = number(Vec2::ZERO, 7, 20.0, WHITE);
        let three = number(Vec2::ZERO, 777, 20.0, WHITE);
        assert_eq!(three.len(), one.len() * 3);

        let max_x = |v: &[Vertex]| v.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!(max_x(&three) > max_x(&one) * 2.5);
    }
}
