/// A point or direction in world space
pub type Vec3 = [f32; 3];

/// Squared euclidean distance between two points
pub fn distance_sq(a: Vec3, b: Vec3) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Check whether `point` lies inside the closed sphere at `center` with the given `radius`
pub fn within_radius(center: Vec3, point: Vec3, radius: f32) -> bool {
    distance_sq(center, point) <= radius * radius
}

/// Validates that a value is finite and satisfies `pred`, mapping failures through `err`
pub(crate) fn check<E>(value: f32, pred: impl FnOnce(f32) -> bool, err: impl FnOnce() -> E) -> Result<(), E> {
    (value.is_finite() && pred(value)).then_some(()).ok_or_else(err)
}
