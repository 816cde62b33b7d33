/// Static world geometry, in world units with the origin at the top-left.
/// The layout mirrors the shipped level: spawn and tutorial node in the
/// center, keys in the far corners, a laser row across the top third, the
/// slow zone and portal mid-map, and an exit chamber at the bottom whose only
/// opening is blocked by the door until enough keys are collected.
#[derive(Debug, Clone, PartialEq)]
struct MazeMap {
    bounds: Rect,
    walls: Vec<Rect>,
    door: Rect,
    spawn: Vec2,
    tutorial_node: Vec2,
    exit_position: Vec2,
    key_positions: [Vec2; 3],
    lesson_positions: [Vec2; 2],
    portal_position: Vec2,
    laser_bounds: [Rect; 3],
    slow_zone: Rect,
    drone_start: Vec2,
    drone_waypoints: [Vec2; 4],
}

fn build_maze_map() -> MazeMap {
    let w = 640.0;
    let h = 480.0;
    let border = 16.0;
    let gap_half = 32.0;
    let chamber_y = h - 80.0;
    let chamber_h = 12.0;

    let walls = vec![
        Rect { x: 0.0, y: 0.0, w, h: border },
        Rect { x: 0.0, y: h - border, w, h: border },
        Rect { x: 0.0, y: border, w: border, h: h - 2.0 * border },
        Rect { x: w - border, y: border, w: border, h: h - 2.0 * border },
        // exit chamber wall, split around the door gap
        Rect {
            x: border,
            y: chamber_y,
            w: w / 2.0 - gap_half - border,
            h: chamber_h,
        },
        Rect {
            x: w / 2.0 + gap_half,
            y: chamber_y,
            w: w - border - (w / 2.0 + gap_half),
            h: chamber_h,
        },
    ];

    MazeMap {
        bounds: Rect { x: 0.0, y: 0.0, w, h },
        walls,
        door: Rect {
            x: w / 2.0 - gap_half,
            y: chamber_y,
            w: 2.0 * gap_half,
            h: chamber_h,
        },
        spawn: Vec2 { x: w / 2.0, y: h / 2.0 },
        tutorial_node: Vec2 {
            x: w / 2.0,
            y: h / 2.0 - 32.0,
        },
        exit_position: Vec2 { x: w / 2.0, y: h - 32.0 },
        key_positions: [
            Vec2 { x: 60.0, y: 60.0 },
            Vec2 { x: w - 60.0, y: 60.0 },
            Vec2 { x: w / 2.0, y: h - 120.0 },
        ],
        lesson_positions: [
            Vec2 { x: 120.0, y: 120.0 },
            Vec2 { x: w - 120.0, y: 140.0 },
        ],
        portal_position: Vec2 {
            x: w / 2.0,
            y: h / 2.0 + 60.0,
        },
        laser_bounds: [
            Rect { x: 120.0, y: 110.0, w: 64.0, h: 6.0 },
            Rect {
                x: w / 2.0 - 32.0,
                y: 110.0,
                w: 64.0,
                h: 6.0,
            },
            Rect {
                x: w - 184.0,
                y: 110.0,
                w: 64.0,
                h: 6.0,
            },
        ],
        slow_zone: Rect {
            x: w / 2.0 - 90.0,
            y: h / 2.0 - 20.0,
            w: 180.0,
            h: 100.0,
        },
        drone_start: Vec2 { x: 80.0, y: h / 2.0 },
        drone_waypoints: [
            Vec2 { x: 80.0, y: h / 2.0 - 80.0 },
            Vec2 {
                x: w - 80.0,
                y: h / 2.0 - 80.0,
            },
            Vec2 {
                x: w - 80.0,
                y: h / 2.0 + 40.0,
            },
            Vec2 { x: 80.0, y: h / 2.0 + 40.0 },
        ],
    }
}

fn map_validation_err(path: &str, message: impl Into<String>) -> String {
    format!("maze map validation failed at {path}: {}", message.into())
}

/// Fail-fast geometry checks run at scene load. A map that places the player
/// or an objective inside a wall would otherwise produce a quietly broken
/// session.
fn validate_maze_map(map: &MazeMap) -> Result<(), String> {
    if map.bounds.w <= 0.0 || map.bounds.h <= 0.0 {
        return Err(map_validation_err("bounds", "must have positive size"));
    }

    let named_points: [(&str, Vec2); 5] = [
        ("spawn", map.spawn),
        ("tutorial_node", map.tutorial_node),
        ("exit_position", map.exit_position),
        ("portal_position", map.portal_position),
        ("drone_start", map.drone_start),
    ];
    for (name, point) in named_points {
        if !map.bounds.contains(point) {
            return Err(map_validation_err(name, "must lie inside the map bounds"));
        }
    }
    for (index, key) in map.key_positions.iter().enumerate() {
        if !map.bounds.contains(*key) {
            return Err(map_validation_err(
                &format!("key_positions[{index}]"),
                "must lie inside the map bounds",
            ));
        }
    }
    for (index, node) in map.lesson_positions.iter().enumerate() {
        if !map.bounds.contains(*node) {
            return Err(map_validation_err(
                &format!("lesson_positions[{index}]"),
                "must lie inside the map bounds",
            ));
        }
    }
    for (index, waypoint) in map.drone_waypoints.iter().enumerate() {
        if !map.bounds.contains(*waypoint) {
            return Err(map_validation_err(
                &format!("drone_waypoints[{index}]"),
                "must lie inside the map bounds",
            ));
        }
    }

    for (index, wall) in map.walls.iter().enumerate() {
        if circle_rect_overlap(map.spawn, PLAYER_RADIUS, *wall) {
            return Err(map_validation_err(
                &format!("walls[{index}]"),
                "overlaps the player spawn",
            ));
        }
    }
    if circle_rect_overlap(map.spawn, PLAYER_RADIUS, map.door) {
        return Err(map_validation_err("door", "overlaps the player spawn"));
    }
    if map.door.w <= 0.0 || map.door.h <= 0.0 {
        return Err(map_validation_err("door", "must have positive size"));
    }
    for (index, wall) in map.walls.iter().enumerate() {
        if map.door.intersects(wall) {
            return Err(map_validation_err(
                "door",
                format!("must not intersect walls[{index}]"),
            ));
        }
    }

    Ok(())
}
