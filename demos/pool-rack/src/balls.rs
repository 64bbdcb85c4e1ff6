//! Pool ball size and rack positions.

use glam::Vec2;

/// Ball radius in meters (57 mm ball).
pub const BALL_RADIUS: f32 = 0.028;

/// Clearance between neighbouring balls in a fresh rack.
const RACK_CLEARANCE: f32 = 0.0005;

/// Standard 8-ball triangle rack layout.
/// Index `i` holds the position of ball `i + 1`.
/// The apex points LEFT toward the cue ball, rows spread RIGHT.
///
/// ```text
///  1
///  9   2
///  3   8  10
/// 11  4  5  12
///  6 13 14  7 15
/// ```
pub fn rack_positions(apex: Vec2, ball_radius: f32) -> [Vec2; 15] {
    let gap = ball_radius * 2.0 + RACK_CLEARANCE;
    let row_offset = gap * 0.866; // sqrt(3)/2 for equilateral triangle

    let mut positions = [Vec2::ZERO; 15];

    // (ball_number, row, vertical_offset_from_center)
    let layout: [(u8, usize, f32); 15] = [
        (1, 0, 0.0),
        (9, 1, -0.5), (2, 1, 0.5),
        (3, 2, -1.0), (8, 2, 0.0), (10, 2, 1.0),
        (11, 3, -1.5), (4, 3, -0.5), (5, 3, 0.5), (12, 3, 1.5),
        (6, 4, -2.0), (13, 4, -1.0), (14, 4, 0.0), (7, 4, 1.0), (15, 4, 2.0),
    ];

    for (ball_num, row, v_offset) in layout {
        let x = apex.x + (row as f32) * row_offset;
        let y = apex.y + v_offset * gap;
        positions[(ball_num - 1) as usize] = Vec2::new(x, y);
    }

    positions
}
