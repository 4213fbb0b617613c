//! Primitive mesh types for the BSP-CSG kernel: vertices, planes, and
//! planar convex polygons (Laidlaw/Thibault, as popularized by the
//! public-domain `csg.js` reference implementation).

use nalgebra::{Matrix4, Point3, Vector3};

const EPSILON: f64 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Vector3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(pos: Vector3<f64>, normal: Vector3<f64>) -> Self {
        Self { pos, normal }
    }

    pub fn lerp(&self, other: &Vertex, t: f64) -> Vertex {
        Vertex {
            pos: self.pos.lerp(&other.pos, t),
            normal: self.normal.lerp(&other.normal, t),
        }
    }

    pub fn flip(&self) -> Vertex {
        Vertex {
            pos: self.pos,
            normal: -self.normal,
        }
    }

    pub fn transform(&self, m: &Matrix4<f64>) -> Vertex {
        let p = m.transform_point(&Point3::from(self.pos));
        let normal_mat = m.try_inverse().unwrap_or(Matrix4::identity()).transpose();
        let n = normal_mat.transform_vector(&self.normal);
        Vertex::new(p.coords, n.normalize())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub w: f64,
}

impl Plane {
    pub fn from_points(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        Plane { normal, w: normal.dot(&a) }
    }

    pub fn flip(&self) -> Plane {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    fn distance(&self, p: &Vector3<f64>) -> f64 {
        self.normal.dot(p) - self.w
    }

    /// Splits `polygon` against this plane, distributing its pieces into the
    /// coplanar-front/coplanar-back/front/back buckets, per the reference
    /// algorithm.
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
        coplanar_front: &mut Vec<Polygon>,
        coplanar_back: &mut Vec<Polygon>,
        front: &mut Vec<Polygon>,
        back: &mut Vec<Polygon>,
    ) {
        const COPLANAR: i32 = 0;
        const FRONT: i32 = 1;
        const BACK: i32 = 2;
        const SPANNING: i32 = 3;

        let mut polygon_type = 0;
        let mut types = Vec::with_capacity(polygon.vertices.len());
        for v in &polygon.vertices {
            let t = self.distance(&v.pos);
            let kind = if t < -EPSILON {
                BACK
            } else if t > EPSILON {
                FRONT
            } else {
                COPLANAR
            };
            polygon_type |= kind;
            types.push(kind);
        }

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            }
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let mut f = Vec::new();
                let mut b = Vec::new();
                let n = polygon.vertices.len();
                for i in 0..n {
                    let j = (i + 1) % n;
                    let (ti, tj) = (types[i], types[j]);
                    let (vi, vj) = (polygon.vertices[i], polygon.vertices[j]);
                    if ti != BACK {
                        f.push(vi);
                    }
                    if ti != FRONT {
                        b.push(vi);
                    }
                    if (ti | tj) == SPANNING {
                        let t = (self.w - self.normal.dot(&vi.pos))
                            / self.normal.dot(&(vj.pos - vi.pos));
                        let v = vi.lerp(&vj, t);
                        f.push(v);
                        b.push(v);
                    }
                }
                if f.len() >= 3 {
                    front.push(Polygon::new(f));
                }
                if b.len() >= 3 {
                    back.push(Polygon::new(b));
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
}

impl Polygon {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        let plane = Plane::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        Polygon { vertices, plane }
    }

    pub fn flip(&self) -> Polygon {
        let vertices: Vec<Vertex> = self.vertices.iter().rev().map(Vertex::flip).collect();
        let plane = self.plane.flip();
        Polygon { vertices, plane }
    }

    pub fn transform(&self, m: &Matrix4<f64>) -> Polygon {
        let vertices: Vec<Vertex> = self.vertices.iter().map(|v| v.transform(m)).collect();
        Polygon::new(vertices)
    }
}
