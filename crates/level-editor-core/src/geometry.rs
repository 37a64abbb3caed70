//! Small 2D geometry helpers shared by the resolver and the gizmos.

use std::f32::consts::{PI, TAU};

use bevy::math::{Rect, Vec2};

/// Whether both components are finite (no NaN, no infinity).
pub fn is_valid_point(point: Vec2) -> bool {
    point.is_finite()
}

/// Calculate distance from a point to a line segment.
pub fn point_to_segment_distance(point: Vec2, seg_start: Vec2, seg_end: Vec2) -> f32 {
    let line = seg_end - seg_start;
    let len_sq = line.length_squared();
    if len_sq < 0.0001 {
        return point.distance(seg_start);
    }
    let t = ((point - seg_start).dot(line) / len_sq).clamp(0.0, 1.0);
    let closest = seg_start + t * line;
    point.distance(closest)
}

/// Check if a point is inside an axis-aligned square.
pub fn point_in_square(point: Vec2, center: Vec2, half_size: f32) -> bool {
    let local = point - center;
    local.x.abs() <= half_size && local.y.abs() <= half_size
}

/// Wrap an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Mean of all finite points. Returns `None` when nothing finite is left
/// or the result itself is not finite.
pub fn centroid<I>(points: I) -> Option<Vec2>
where
    I: IntoIterator<Item = Vec2>,
{
    let mut sum = Vec2::ZERO;
    let mut count = 0usize;
    for point in points {
        if !is_valid_point(point) {
            continue;
        }
        sum += point;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let center = sum / count as f32;
    is_valid_point(center).then_some(center)
}

/// Axis-aligned bounds of a point set.
pub fn bounds_of(points: &[Vec2]) -> Option<Rect> {
    let first = *points.first()?;
    let (min, max) = points
        .iter()
        .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
    Some(Rect { min, max })
}

/// Area of a rectangle, zero for inverted ones.
pub fn rect_area(rect: Rect) -> f32 {
    let size = (rect.max - rect.min).max(Vec2::ZERO);
    size.x * size.y
}

/// Fraction of `bounds` covered by `area`, in `[0, 1]`.
///
/// Zero-area bounds count as fully covered when `area` contains them.
pub fn coverage(bounds: Rect, area: Rect) -> f32 {
    let own = rect_area(bounds);
    if own <= 0.0 {
        let inside = area.contains(bounds.min) && area.contains(bounds.max);
        return if inside { 1.0 } else { 0.0 };
    }
    let overlap = Rect {
        min: bounds.min.max(area.min),
        max: bounds.max.min(area.max),
    };
    rect_area(overlap) / own
}

/// Whether two rectangles touch or overlap.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_to_segment_distance() {
        let dist = point_to_segment_distance(Vec2::new(5.0, 3.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((dist - 3.0).abs() < 0.001);

        // Past the end clamps to the endpoint
        let dist = point_to_segment_distance(Vec2::new(13.0, 4.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((dist - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(PI) - PI).abs() < 1e-6);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-6);
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(0.1) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_centroid_skips_invalid_points() {
        let center = centroid([
            Vec2::new(0.0, 0.0),
            Vec2::new(f32::NAN, 1.0),
            Vec2::new(4.0, 2.0),
            Vec2::new(f32::INFINITY, 0.0),
        ]);
        assert_eq!(center, Some(Vec2::new(2.0, 1.0)));
        assert_eq!(centroid([Vec2::new(f32::NAN, 0.0)]), None);
    }

    #[test]
    fn test_coverage() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!((coverage(bounds, Rect::new(5.0, 0.0, 20.0, 20.0)) - 0.5).abs() < 1e-6);
        assert_eq!(coverage(bounds, Rect::new(20.0, 20.0, 30.0, 30.0)), 0.0);
        assert_eq!(coverage(bounds, Rect::new(-1.0, -1.0, 11.0, 11.0)), 1.0);
    }
}
