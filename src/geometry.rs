/// 2D vectors, axis-aligned boxes, and the two arena-geometry queries the
/// simulation is built on: per-axis bounds containment and the unit vector
/// between two box centers.

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit-length copy.  Callers must guarantee a nonzero vector.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        Vec2::new(self.x / len, self.y / len)
    }

    pub fn scaled(self, k: f32) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

/// Center-based axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(cx: f32, cy: f32, w: f32, h: f32) -> Rect {
        Rect {
            center: Vec2::new(cx, cy),
            w,
            h,
        }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.w / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.w / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.h / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.h / 2.0
    }

    /// Closed-interval AABB overlap test.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn shift(&mut self, delta: Vec2) {
        self.center.x += delta.x;
        self.center.y += delta.y;
    }
}

/// Per-axis containment test against an arena spanning `0..=arena_w` by
/// `0..=arena_h`.  Returns `(horizontal_ok, vertical_ok)` — true iff the box
/// lies entirely inside the arena on that axis.
pub fn within_bounds(arena_w: f32, arena_h: f32, rect: &Rect) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= arena_w;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= arena_h;
    (horizontal, vertical)
}

/// True once the box is fully outside the arena on either axis — the
/// cull-on-exit condition for projectiles, ordnance and the like.
pub fn fully_outside(arena_w: f32, arena_h: f32, rect: &Rect) -> bool {
    rect.right() < 0.0 || rect.left() > arena_w || rect.bottom() < 0.0 || rect.top() > arena_h
}

/// Unit vector from the center of `from` toward the center of `to`.
///
/// Undefined when the two centers coincide (zero-length vector); callers must
/// guard that case before calling.
pub fn direction(from: &Rect, to: &Rect) -> Vec2 {
    Vec2::new(to.center.x - from.center.x, to.center.y - from.center.y).normalized()
}
