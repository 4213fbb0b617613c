//! BSP tree over a polygon soup, implementing the `csg.js`/Laidlaw-Thibault
//! reference algorithm for boolean union/subtract/intersect.

use super::mesh::Polygon;

pub struct Node {
    plane: Option<super::mesh::Plane>,
    front: Option<Box<Node>>,
    back: Option<Box<Node>>,
    polygons: Vec<Polygon>,
}

impl Node {
    pub fn new() -> Self {
        Node {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut node = Node::new();
        if !polygons.is_empty() {
            node.build(polygons.to_vec());
        }
        node
    }

    pub fn invert(&mut self) {
        for p in &mut self.polygons {
            *p = p.flip();
        }
        if let Some(plane) = &mut self.plane {
            *plane = plane.flip();
        }
        if let Some(front) = &mut self.front {
            front.invert();
        }
        if let Some(back) = &mut self.back {
            back.invert();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Removes all polygons in `polygons` that are inside this tree's solid.
    pub fn clip_polygons(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        let Some(plane) = &self.plane else {
            return polygons.to_vec();
        };
        let mut front = Vec::new();
        let mut back = Vec::new();
        for p in polygons {
            let mut cf = Vec::new();
            let mut cb = Vec::new();
            plane.split_polygon(p, &mut front, &mut back, &mut cf, &mut cb);
            front.extend(cf);
            back.extend(cb);
        }
        let mut front = match &self.front {
            Some(n) => n.clip_polygons(&front),
            None => front,
        };
        let back = match &self.back {
            Some(n) => n.clip_polygons(&back),
            None => Vec::new(),
        };
        front.extend(back);
        front
    }

    /// Removes all polygons in this tree that are inside `other`.
    pub fn clip_to(&mut self, other: &Node) {
        self.polygons = other.clip_polygons(&self.polygons);
        if let Some(front) = &mut self.front {
            front.clip_to(other);
        }
        if let Some(back) = &mut self.back {
            back.clip_to(other);
        }
    }

    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut out = self.polygons.clone();
        if let Some(front) = &self.front {
            out.extend(front.all_polygons());
        }
        if let Some(back) = &self.back {
            out.extend(back.all_polygons());
        }
        out
    }

    pub fn build(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }
        if self.plane.is_none() {
            self.plane = Some(polygons[0].plane);
        }
        let plane = self.plane.unwrap();
        let mut front = Vec::new();
        let mut back = Vec::new();
        for p in &polygons {
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            let mut cf = Vec::new();
            let mut cb = Vec::new();
            plane.split_polygon(p, &mut coplanar_front, &mut coplanar_back, &mut cf, &mut cb);
            self.polygons.append(&mut coplanar_front);
            self.polygons.append(&mut coplanar_back);
            front.extend(cf);
            back.extend(cb);
        }
        if !front.is_empty() {
            self.front.get_or_insert_with(|| Box::new(Node::new())).build(front);
        }
        if !back.is_empty() {
            self.back.get_or_insert_with(|| Box::new(Node::new())).build(back);
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

pub fn union(a: &[Polygon], b: &[Polygon]) -> Vec<Polygon> {
    let mut na = Node::from_polygons(a);
    let mut nb = Node::from_polygons(b);
    na.clip_to(&nb);
    nb.clip_to(&na);
    nb.invert();
    nb.clip_to(&na);
    nb.invert();
    na.build(nb.all_polygons());
    na.all_polygons()
}

pub fn subtract(a: &[Polygon], b: &[Polygon]) -> Vec<Polygon> {
    let mut na = Node::from_polygons(a);
    let mut nb = Node::from_polygons(b);
    na.invert();
    na.clip_to(&nb);
    nb.clip_to(&na);
    nb.invert();
    nb.clip_to(&na);
    nb.invert();
    na.build(nb.all_polygons());
    na.invert();
    na.all_polygons()
}

pub fn intersect(a: &[Polygon], b: &[Polygon]) -> Vec<Polygon> {
    let mut na = Node::from_polygons(a);
    let mut nb = Node::from_polygons(b);
    na.invert();
    nb.clip_to(&na);
    nb.invert();
    na.clip_to(&nb);
    nb.clip_to(&na);
    na.build(nb.all_polygons());
    na.invert();
    na.all_polygons()
}
