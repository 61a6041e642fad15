use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Point {
        Point { x, y }
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> [f32; 2] {
        [p.x, p.y]
    }
}

impl Point {
    pub fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    /// Arithmetic mean of `points`. `None` for an empty slice so callers
    /// never see a 0/0 centroid.
    pub fn centroid(points: &[Point]) -> Option<Point> {
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f32;
        let (sum_x, sum_y) = points
            .iter()
            .fold((0., 0.), |(sx, sy), p| (sx + p.x, sy + p.y));

        Some(Point::new(sum_x / n, sum_y / n))
    }

    /// Angle in degrees of the direction from `self` to `other`, measured
    /// clockwise from "straight down" in a y-down frame, in [0, 360).
    pub fn rotation_degrees_to(&self, other: &Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let from_x = dy.atan2(dx).to_degrees();

        let deg = ((from_x - 90.) + 360.) % 360.;
        // f32 rounding can land exactly on 360
        if deg >= 360. { 0. } else { deg }
    }

    pub fn rounded(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        // compare on the circle so 359.9999 matches 0
        let d = (a - b).rem_euclid(360.);
        d.min(360. - d) < 1e-3
    }

    #[test]
    fn centroid_of_empty_is_none() {
        assert_eq!(Point::centroid(&[]), None);
    }

    #[test]
    fn centroid_averages() {
        let c = Point::centroid(&[
            Point::new(0., 0.),
            Point::new(4., 0.),
            Point::new(4., 2.),
            Point::new(0., 2.),
        ])
        .unwrap();
        assert_eq!(c, Point::new(2., 1.));
    }

    #[test]
    fn rotation_straight_down_is_zero() {
        let a = Point::new(0., 0.).rotation_degrees_to(&Point::new(0., 10.));
        assert!(approx(a, 0.), "{a}");
    }

    #[test]
    fn rotation_quarter_turns() {
        let origin = Point::new(0., 0.);
        // pointing right is a quarter turn counterclockwise from down
        assert!(approx(origin.rotation_degrees_to(&Point::new(10., 0.)), 270.));
        assert!(approx(origin.rotation_degrees_to(&Point::new(-10., 0.)), 90.));
        assert!(approx(origin.rotation_degrees_to(&Point::new(0., -10.)), 180.));
    }

    #[test]
    fn rotation_stays_in_range() {
        let origin = Point::new(5., 5.);
        for i in 0..360 {
            let t = (i as f32).to_radians();
            let p = Point::new(5. + 3. * t.cos(), 5. + 3. * t.sin());
            let a = origin.rotation_degrees_to(&p);
            assert!((0. ..360.).contains(&a), "{a}");
        }
    }

    #[test]
    fn deserializes_from_pair() {
        let p: Point = serde_json::from_str("[0.25, 0.75]").unwrap();
        assert_eq!(p, Point::new(0.25, 0.75));
    }
}
