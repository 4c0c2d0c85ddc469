// Oriented rectangle collision via the Separating Axis Theorem.
// Rotation only changes the projection axes, never the stored extents, so a
// text box measured unrotated can be tested as a rigid rotated rectangle.

/// Rectangle with an arbitrary rotation about its own center.
///
/// The two unit axis vectors are derived from the angle and cached; they are
/// only recomputed by [`CollisionRect::set_rotation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRect {
    cx: f64,
    cy: f64,
    width: f64,
    height: f64,
    angle: f64,
    axis_x: (f64, f64),
    axis_y: (f64, f64),
}

impl CollisionRect {
    /// `angle` is a counter-clockwise rotation in degrees about the center.
    pub fn new(center: (f64, f64), width: f64, height: f64, angle: f64) -> Self {
        let mut rect = Self {
            cx: center.0,
            cy: center.1,
            width,
            height,
            angle,
            axis_x: (1.0, 0.0),
            axis_y: (0.0, 1.0),
        };
        rect.update_axes();
        rect
    }

    pub fn center(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_rotation(&mut self, angle: f64) {
        self.angle = angle;
        self.update_axes();
    }

    fn update_axes(&mut self) {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        self.axis_x = (cos, sin);
        self.axis_y = (-sin, cos);
    }

    /// SAT test against another oriented rectangle.
    ///
    /// Projects the center delta onto both rectangles' own axes; the boxes
    /// collide iff the projections overlap on all four candidate axes. The
    /// comparison is strict, so an exact edge touch does not count as a
    /// collision.
    pub fn is_collision(&self, other: &CollisionRect) -> bool {
        let delta = (other.cx - self.cx, other.cy - self.cy);
        for axis in [self.axis_x, self.axis_y, other.axis_x, other.axis_y] {
            let reach = projected_radius(self, axis) + projected_radius(other, axis);
            if reach <= dot(delta, axis).abs() {
                // A separating axis proves the boxes are disjoint.
                return false;
            }
        }
        true
    }
}

fn dot(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

// Half-extent of the rectangle projected onto an arbitrary unit axis.
fn projected_radius(rect: &CollisionRect, axis: (f64, f64)) -> f64 {
    (rect.width * dot(axis, rect.axis_x).abs() + rect.height * dot(axis, rect.axis_y).abs()) / 2.0
}

/// General-position crossing test for two line segments, via parametric
/// cross products. Collinear overlap does not count. Kept for polygon-edge
/// collision needs; label overlap goes through [`CollisionRect`] instead.
pub fn line_to_line(a1: (f64, f64), a2: (f64, f64), b1: (f64, f64), b2: (f64, f64)) -> bool {
    let da = (a2.0 - a1.0, a2.1 - a1.1);
    let db = (b2.0 - b1.0, b2.1 - b1.1);
    let denom = da.0 * db.1 - da.1 * db.0;
    if denom == 0.0 {
        return false;
    }
    let ab = (b1.0 - a1.0, b1.1 - a1.1);
    let t = (ab.0 * db.1 - ab.1 * db.0) / denom;
    let u = (ab.0 * da.1 - ab.1 * da.0) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}
