//! `Solid`: a watertight polygon mesh with boolean ops, transforms, and
//! bounding-box queries.

use nalgebra::{Matrix4, Vector3};

use super::bsp;
use super::mesh::{Plane, Polygon, Vertex};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub low: Vector3<f64>,
    pub high: Vector3<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub polygons: Vec<Polygon>,
}

impl Solid {
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Solid { polygons }
    }

    pub fn union(&self, other: &Solid) -> Solid {
        Solid::from_polygons(bsp::union(&self.polygons, &other.polygons))
    }

    pub fn difference(&self, other: &Solid) -> Solid {
        Solid::from_polygons(bsp::subtract(&self.polygons, &other.polygons))
    }

    pub fn intersection(&self, other: &Solid) -> Solid {
        Solid::from_polygons(bsp::intersect(&self.polygons, &other.polygons))
    }

    pub fn transform(&self, m: &Matrix4<f64>) -> Solid {
        Solid::from_polygons(self.polygons.iter().map(|p| p.transform(m)).collect())
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut low = Vector3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut high = Vector3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.polygons {
            for v in &p.vertices {
                low = low.zip_map(&v.pos, f64::min);
                high = high.zip_map(&v.pos, f64::max);
            }
        }
        if self.polygons.is_empty() {
            low = Vector3::zeros();
            high = Vector3::zeros();
        }
        BoundingBox { low, high }
    }

    /// The opaque kernel's convex hull, approximated here by the
    /// axis-aligned bounding box — a documented simplification since the
    /// real geometry kernel is explicitly out of scope.
    pub fn hull(&self) -> Solid {
        let bb = self.bounding_box();
        cuboid_at(bb.low, bb.high - bb.low)
    }
}

fn quad(vertices: [Vertex; 4]) -> Polygon {
    Polygon::new(vertices.to_vec())
}

fn cuboid_at(origin: Vector3<f64>, size: Vector3<f64>) -> Solid {
    let (x, y, z) = (origin.x, origin.y, origin.z);
    let (sx, sy, sz) = (size.x, size.y, size.z);
    let corners = [
        Vector3::new(x, y, z),
        Vector3::new(x + sx, y, z),
        Vector3::new(x + sx, y + sy, z),
        Vector3::new(x, y + sy, z),
        Vector3::new(x, y, z + sz),
        Vector3::new(x + sx, y, z + sz),
        Vector3::new(x + sx, y + sy, z + sz),
        Vector3::new(x, y + sy, z + sz),
    ];
    let faces: [[usize; 4]; 6] = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [1, 2, 6, 5],
        [2, 3, 7, 6],
        [3, 0, 4, 7],
    ];
    let polygons = faces
        .iter()
        .map(|face| {
            let pts: Vec<Vector3<f64>> = face.iter().map(|&i| corners[i]).collect();
            let normal = Plane::from_points(pts[0], pts[1], pts[2]).normal;
            quad([
                Vertex::new(pts[0], normal),
                Vertex::new(pts[1], normal),
                Vertex::new(pts[2], normal),
                Vertex::new(pts[3], normal),
            ])
        })
        .collect();
    Solid::from_polygons(polygons)
}

/// `cuboid(sx, sy, sz)`: an axis-aligned box centered on the origin.
pub fn cuboid(sx: f64, sy: f64, sz: f64) -> Solid {
    cuboid_at(
        Vector3::new(-sx / 2.0, -sy / 2.0, -sz / 2.0),
        Vector3::new(sx, sy, sz),
    )
}

/// `cylinder(h, r1, r2, segments)`: a frustum standing on the origin along
/// +Z. `r1 == r2` gives a true cylinder; `r2 == 0.0` gives a cone.
pub fn cylinder(h: f64, r1: f64, r2: f64, segments: usize) -> Solid {
    let segments = segments.max(3);
    let mut polygons = Vec::new();
    let ring = |r: f64, z: f64| -> Vec<Vector3<f64>> {
        (0..segments)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * (i as f64) / (segments as f64);
                Vector3::new(r * theta.cos(), r * theta.sin(), z)
            })
            .collect()
    };
    let bottom = ring(r1, 0.0);
    let top = ring(r2, h);

    if r1 > 0.0 {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let verts: Vec<Vertex> = bottom.iter().rev().map(|p| Vertex::new(*p, normal)).collect();
        polygons.push(Polygon::new(verts));
    }
    if r2 > 0.0 {
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let verts: Vec<Vertex> = top.iter().map(|p| Vertex::new(*p, normal)).collect();
        polygons.push(Polygon::new(verts));
    }

    for i in 0..segments {
        let j = (i + 1) % segments;
        let quad_pts = [bottom[i], bottom[j], top[j], top[i]];
        let normal = Plane::from_points(quad_pts[0], quad_pts[1], quad_pts[2]).normal;
        let verts: Vec<Vertex> = quad_pts.iter().map(|p| Vertex::new(*p, normal)).collect();
        polygons.push(Polygon::new(verts));
    }
    Solid::from_polygons(polygons)
}

/// `sphere(r, segments)`: a UV sphere centered on the origin.
pub fn sphere(r: f64, segments: usize) -> Solid {
    let segments = segments.max(4);
    let rings = segments;
    let mut polygons = Vec::new();

    let point = |theta: f64, phi: f64| -> Vector3<f64> {
        Vector3::new(
            r * theta.sin() * phi.cos(),
            r * theta.sin() * phi.sin(),
            r * theta.cos(),
        )
    };

    for i in 0..rings {
        let theta0 = std::f64::consts::PI * (i as f64) / (rings as f64);
        let theta1 = std::f64::consts::PI * ((i + 1) as f64) / (rings as f64);
        for j in 0..segments {
            let phi0 = 2.0 * std::f64::consts::PI * (j as f64) / (segments as f64);
            let phi1 = 2.0 * std::f64::consts::PI * ((j + 1) as f64) / (segments as f64);
            let p00 = point(theta0, phi0);
            let p01 = point(theta0, phi1);
            let p10 = point(theta1, phi0);
            let p11 = point(theta1, phi1);

            if i > 0 {
                let pts = [p00, p01, p11];
                let normal = pts[0].normalize();
                polygons.push(Polygon::new(vec![
                    Vertex::new(pts[0], normal),
                    Vertex::new(pts[1], p01.normalize()),
                    Vertex::new(pts[2], p11.normalize()),
                ]));
            }
            if i < rings - 1 {
                let pts = [p00, p11, p10];
                polygons.push(Polygon::new(vec![
                    Vertex::new(pts[0], p00.normalize()),
                    Vertex::new(pts[1], p11.normalize()),
                    Vertex::new(pts[2], p10.normalize()),
                ]));
            }
        }
    }
    Solid::from_polygons(polygons)
}
