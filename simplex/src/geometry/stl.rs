//! Binary STL export over a flattened triangle list. Fan-triangulation of
//! each polygon is valid because BSP-clipped convex polygons stay convex.

use std::io::{self, Write};

use super::solid::Solid;

pub fn write_binary<W: Write>(solid: &Solid, mut writer: W) -> io::Result<()> {
    let mut triangles: Vec<([f32; 3], [[f32; 3]; 3])> = Vec::new();
    for polygon in &solid.polygons {
        let normal = [
            polygon.plane.normal.x as f32,
            polygon.plane.normal.y as f32,
            polygon.plane.normal.z as f32,
        ];
        for i in 1..polygon.vertices.len() - 1 {
            let a = polygon.vertices[0].pos;
            let b = polygon.vertices[i].pos;
            let c = polygon.vertices[i + 1].pos;
            let tri = [
                [a.x as f32, a.y as f32, a.z as f32],
                [b.x as f32, b.y as f32, b.z as f32],
                [c.x as f32, c.y as f32, c.z as f32],
            ];
            triangles.push((normal, tri));
        }
    }

    let mut header = [0u8; 80];
    let banner = b"simplex binary STL export";
    header[..banner.len()].copy_from_slice(banner);
    writer.write_all(&header)?;
    writer.write_all(&(triangles.len() as u32).to_le_bytes())?;
    for (normal, tri) in &triangles {
        for component in normal {
            writer.write_all(&component.to_le_bytes())?;
        }
        for vertex in tri {
            for component in vertex {
                writer.write_all(&component.to_le_bytes())?;
            }
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::solid;

    #[test]
    fn binary_stl_has_correct_triangle_count() {
        let cube = solid::cuboid(1.0, 1.0, 1.0);
        let mut buf = Vec::new();
        write_binary(&cube, &mut buf).unwrap();
        let count = u32::from_le_bytes(buf[80..84].try_into().unwrap());
        assert_eq!(count, 12);
        assert_eq!(buf.len(), 84 + count as usize * 50);
    }
}
