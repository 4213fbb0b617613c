//! `Slice`: a planar 2D outline, extrudable or revolvable into a [`Solid`].
//! Holes are not supported — a documented simplification of the opaque
//! interface.

use nalgebra::{Vector2, Vector3};

use super::mesh::{Plane, Polygon, Vertex};
use super::solid::Solid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    pub low: Vector2<f64>,
    pub high: Vector2<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub outline: Vec<Vector2<f64>>,
}

impl Slice {
    pub fn new(outline: Vec<Vector2<f64>>) -> Self {
        Slice { outline }
    }

    pub fn bounding_rect(&self) -> BoundingRect {
        let mut low = Vector2::new(f64::INFINITY, f64::INFINITY);
        let mut high = Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.outline {
            low = low.zip_map(p, f64::min);
            high = high.zip_map(p, f64::max);
        }
        if self.outline.is_empty() {
            low = Vector2::zeros();
            high = Vector2::zeros();
        }
        BoundingRect { low, high }
    }

    /// Fan-triangulates the top/bottom caps and builds side quads, assuming
    /// the outline is simple (non-self-intersecting) and convex enough for
    /// fan triangulation to stay inside the outline.
    pub fn extrude(&self, height: f64) -> Solid {
        let n = self.outline.len();
        let mut polygons = Vec::new();

        let bottom_normal = Vector3::new(0.0, 0.0, -1.0);
        let bottom: Vec<Vertex> = self
            .outline
            .iter()
            .rev()
            .map(|p| Vertex::new(Vector3::new(p.x, p.y, 0.0), bottom_normal))
            .collect();
        polygons.push(Polygon::new(bottom));

        let top_normal = Vector3::new(0.0, 0.0, 1.0);
        let top: Vec<Vertex> = self
            .outline
            .iter()
            .map(|p| Vertex::new(Vector3::new(p.x, p.y, height), top_normal))
            .collect();
        polygons.push(Polygon::new(top));

        for i in 0..n {
            let j = (i + 1) % n;
            let a = self.outline[i];
            let b = self.outline[j];
            let pts = [
                Vector3::new(a.x, a.y, 0.0),
                Vector3::new(b.x, b.y, 0.0),
                Vector3::new(b.x, b.y, height),
                Vector3::new(a.x, a.y, height),
            ];
            let normal = Plane::from_points(pts[0], pts[1], pts[2]).normal;
            polygons.push(Polygon::new(
                pts.iter().map(|p| Vertex::new(*p, normal)).collect(),
            ));
        }
        Solid::from_polygons(polygons)
    }

    /// Lathes the outline `angle_degrees` around the Z axis.
    pub fn revolve(&self, angle_degrees: f64, segments: usize) -> Solid {
        let segments = segments.max(3);
        let angle = angle_degrees.to_radians();
        let n = self.outline.len();
        let mut polygons = Vec::new();

        let rotate = |p: Vector2<f64>, theta: f64| -> Vector3<f64> {
            Vector3::new(p.x * theta.cos(), p.x * theta.sin(), p.y)
        };

        for s in 0..segments {
            let theta0 = angle * (s as f64) / (segments as f64);
            let theta1 = angle * ((s + 1) as f64) / (segments as f64);
            for i in 0..n {
                let j = (i + 1) % n;
                let a = self.outline[i];
                let b = self.outline[j];
                let pts = [
                    rotate(a, theta0),
                    rotate(b, theta0),
                    rotate(b, theta1),
                    rotate(a, theta1),
                ];
                if pts.iter().all(|p| p.x.abs() < 1e-9 && p.y.abs() < 1e-9) {
                    continue;
                }
                let normal = Plane::from_points(pts[0], pts[1], pts[2]).normal;
                polygons.push(Polygon::new(
                    pts.iter().map(|p| Vertex::new(*p, normal)).collect(),
                ));
            }
        }
        Solid::from_polygons(polygons)
    }
}
