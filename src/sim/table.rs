//! Static table geometry
//!
//! Everything here is fixed for the lifetime of a table: wall faces, bumper
//! placement, flipper pivots and the launch lane. No behavior lives here.

use glam::Vec2;

use crate::consts::*;

/// Axis-aligned rectangle in table space (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Placement and value of one bumper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BumperSpec {
    pub pos: Vec2,
    pub radius: f32,
    /// Points awarded per contact
    pub value: u64,
}

/// Launch lane: where new balls appear
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchLane {
    pub rect: Rect,
    pub spawn: Vec2,
}

/// Complete table layout
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub width: f32,
    pub height: f32,
    /// Inner faces of the side and top walls
    pub left_wall: f32,
    pub right_wall: f32,
    pub top_wall: f32,
    pub bumpers: Vec<BumperSpec>,
    pub left_pivot: Vec2,
    pub right_pivot: Vec2,
    pub launch_lane: LaunchLane,
}

impl Default for Table {
    fn default() -> Self {
        Self::standard()
    }
}

impl Table {
    /// The stock layout: a 4x3 bumper grid, one center bumper, two flippers
    /// and a launch lane in the lower right corner
    pub fn standard() -> Self {
        let mut bumpers = Vec::with_capacity(13);
        for y in [260.0, 360.0, 460.0] {
            for x in [220.0, 320.0, 480.0, 580.0] {
                bumpers.push(BumperSpec {
                    pos: Vec2::new(x, y),
                    radius: BUMPER_RADIUS,
                    value: 150,
                });
            }
        }
        bumpers.push(BumperSpec {
            pos: Vec2::new(TABLE_WIDTH / 2.0, 560.0),
            radius: BUMPER_RADIUS,
            value: 250,
        });

        Self {
            width: TABLE_WIDTH,
            height: TABLE_HEIGHT,
            left_wall: WALL_INSET,
            right_wall: TABLE_WIDTH - WALL_INSET,
            top_wall: WALL_INSET,
            bumpers,
            left_pivot: Vec2::new(270.0, 820.0),
            right_pivot: Vec2::new(530.0, 820.0),
            launch_lane: LaunchLane {
                rect: Rect::new(TABLE_WIDTH - 120.0, TABLE_HEIGHT - 170.0, 90.0, 160.0),
                spawn: Vec2::new(TABLE_WIDTH - 70.0, TABLE_HEIGHT - 80.0),
            },
        }
    }

    /// Lower bound of the playfield; a ball past it has drained
    #[inline]
    pub fn drain_line(&self) -> f32 {
        self.height
    }

    /// Table with no bumpers, for isolating wall and flipper behavior
    pub fn empty() -> Self {
        Self {
            bumpers: Vec::new(),
            ..Self::standard()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let table = Table::standard();
        assert_eq!(table.bumpers.len(), 13);
        assert_eq!(table.bumpers.iter().filter(|b| b.value == 250).count(), 1);
        assert!(table.launch_lane.rect.contains(table.launch_lane.spawn));
        assert!(table.left_pivot.x < table.right_pivot.x);
    }

    #[test]
    fn test_bumpers_inside_walls() {
        let table = Table::standard();
        for b in &table.bumpers {
            assert!(b.pos.x - b.radius > table.left_wall);
            assert!(b.pos.x + b.radius < table.right_wall);
            assert!(b.pos.y - b.radius > table.top_wall);
            assert!(b.pos.y + b.radius < table.drain_line());
        }
    }
}
