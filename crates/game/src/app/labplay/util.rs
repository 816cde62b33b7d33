fn normalized_velocity(input: &InputSnapshot, speed: f32) -> Vec2 {
    let mut x = 0.0f32;
    let mut y = 0.0f32;

    if input.is_down(InputAction::MoveRight) {
        x += 1.0;
    }
    if input.is_down(InputAction::MoveLeft) {
        x -= 1.0;
    }
    if input.is_down(InputAction::MoveDown) {
        y += 1.0;
    }
    if input.is_down(InputAction::MoveUp) {
        y -= 1.0;
    }

    let len_sq = x * x + y * y;
    if len_sq > 0.0 {
        let inv_len = len_sq.sqrt().recip();
        x *= inv_len;
        y *= inv_len;
    }

    Vec2 {
        x: x * speed,
        y: y * speed,
    }
}

fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy <= radius * radius
}

fn circle_rect_overlap(center: Vec2, radius: f32, rect: Rect) -> bool {
    let nearest_x = center.x.clamp(rect.x, rect.right());
    let nearest_y = center.y.clamp(rect.y, rect.bottom());
    let dx = center.x - nearest_x;
    let dy = center.y - nearest_y;
    dx * dx + dy * dy <= radius * radius
}

fn lerp(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    let t = t.clamp(0.0, 1.0);
    Vec2 {
        x: from.x + (to.x - from.x) * t,
        y: from.y + (to.y - from.y) * t,
    }
}

/// Axis-separated collision resolution: each axis of the move is applied
/// independently and cancelled if it would push the player circle into a
/// solid or out of bounds, so sliding along walls works without a physics
/// engine.
fn resolve_move(
    position: Vec2,
    velocity: Vec2,
    dt_seconds: f32,
    radius: f32,
    bounds: Rect,
    solids: &[Rect],
) -> Vec2 {
    let mut resolved = position;

    let candidate_x = Vec2 {
        x: position.x + velocity.x * dt_seconds,
        y: resolved.y,
    };
    if position_is_clear(candidate_x, radius, bounds, solids) {
        resolved.x = candidate_x.x;
    }

    let candidate_y = Vec2 {
        x: resolved.x,
        y: position.y + velocity.y * dt_seconds,
    };
    if position_is_clear(candidate_y, radius, bounds, solids) {
        resolved.y = candidate_y.y;
    }

    resolved
}

fn position_is_clear(center: Vec2, radius: f32, bounds: Rect, solids: &[Rect]) -> bool {
    if center.x - radius < bounds.x
        || center.x + radius > bounds.right()
        || center.y - radius < bounds.y
        || center.y + radius > bounds.bottom()
    {
        return false;
    }
    !solids
        .iter()
        .any(|solid| circle_rect_overlap(center, radius, *solid))
}
