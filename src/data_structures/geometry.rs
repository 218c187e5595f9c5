//! CPU-side vertex data and the primitive mesh builders.
//!
//! All builders produce right-handed geometry whose triangles wind
//! counter-clockwise when seen from the side the normals point to.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Matrix, Matrix3, Matrix4, SquareMatrix, Vector3, Vector4};

/// Axis aligned box in world or local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl BoundingBox {
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// The eight corners, bottom face first.
    pub fn corners(&self) -> [Vector3<f32>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vector3::new(a.x, a.y, a.z),
            Vector3::new(b.x, a.y, a.z),
            Vector3::new(b.x, a.y, b.z),
            Vector3::new(a.x, a.y, b.z),
            Vector3::new(a.x, b.y, a.z),
            Vector3::new(b.x, b.y, a.z),
            Vector3::new(b.x, b.y, b.z),
            Vector3::new(a.x, b.y, b.z),
        ]
    }

    pub fn transformed(&self, matrix: &Matrix4<f32>) -> BoundingBox {
        let corners = self.corners().map(|c| (matrix * c.extend(1.0)).truncate());
        let first = BoundingBox {
            min: corners[0],
            max: corners[0],
        };
        corners[1..].iter().fold(first, |acc, c| {
            acc.union(&BoundingBox { min: *c, max: *c })
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl VertexData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    /// Bakes `matrix` into the positions and its inverse-transpose into the normals.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        for p in self.positions.iter_mut() {
            let v = matrix * Vector4::new(p[0], p[1], p[2], 1.0);
            *p = [v.x, v.y, v.z];
        }
        let linear = Matrix3::from_cols(
            matrix.x.truncate(),
            matrix.y.truncate(),
            matrix.z.truncate(),
        );
        // A degenerate transform flattens the mesh anyway, keep the normals as they are.
        let normal_matrix = match linear.invert() {
            Some(inverse) => inverse.transpose(),
            None => return,
        };
        for n in self.normals.iter_mut() {
            let v = normal_matrix * Vector3::from(*n);
            if v.magnitude2() > 0.0 {
                *n = v.normalize().into();
            }
        }
    }

    /// Appends `other` and offsets its indices. Returns the index range the
    /// appended triangles occupy.
    pub fn append(&mut self, other: &VertexData) -> std::ops::Range<u32> {
        let vertex_offset = self.positions.len() as u32;
        let index_start = self.indices.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices
            .extend(other.indices.iter().map(|i| i + vertex_offset));
        index_start..self.indices.len() as u32
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = Vector3::from(*self.positions.first()?);
        let init = BoundingBox {
            min: first,
            max: first,
        };
        Some(self.positions.iter().fold(init, |acc, p| {
            let p = Vector3::from(*p);
            acc.union(&BoundingBox { min: p, max: p })
        }))
    }
}

/// UV sphere centred at the origin.
///
/// `segments` controls the number of latitude bands, longitude bands are twice
/// as many.
pub fn create_sphere(diameter: f32, segments: u32) -> VertexData {
    let radius = diameter / 2.0;
    let rings = segments.max(1) + 2;
    let sectors = rings * 2;
    let mut data = VertexData::default();

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let theta = v * PI;
        for sector in 0..=sectors {
            let u = sector as f32 / sectors as f32;
            let phi = u * 2.0 * PI;
            let normal = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
            data.positions
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
            data.uvs.push([u, v]);
        }
    }

    let stride = sectors + 1;
    for ring in 0..rings {
        for sector in 0..sectors {
            let a = ring * stride + sector;
            let b = a + stride;
            // The top and bottom rows collapse into the poles, skip their empty halves.
            if ring != 0 {
                data.indices.extend_from_slice(&[a, a + 1, b]);
            }
            if ring != rings - 1 {
                data.indices.extend_from_slice(&[a + 1, b + 1, b]);
            }
        }
    }
    data
}

/// Capped cylinder along the Y axis, centred at the origin.
pub fn create_cylinder(diameter: f32, height: f32, tessellation: u32) -> VertexData {
    let radius = diameter / 2.0;
    let tessellation = tessellation.max(3);
    let half = height / 2.0;
    let mut data = VertexData::default();

    // side
    for ring in 0..2u32 {
        let y = -half + ring as f32 * height;
        for j in 0..=tessellation {
            let u = j as f32 / tessellation as f32;
            let angle = u * 2.0 * PI;
            let (sin, cos) = angle.sin_cos();
            data.positions.push([radius * cos, y, radius * sin]);
            data.normals.push([cos, 0.0, sin]);
            data.uvs.push([u, ring as f32]);
        }
    }
    let stride = tessellation + 1;
    for j in 0..tessellation {
        let a = j;
        let b = j + stride;
        data.indices
            .extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
    }

    // caps
    for (y, normal_y) in [(half, 1.0f32), (-half, -1.0f32)] {
        let center = data.positions.len() as u32;
        data.positions.push([0.0, y, 0.0]);
        data.normals.push([0.0, normal_y, 0.0]);
        data.uvs.push([0.5, 0.5]);
        for j in 0..=tessellation {
            let angle = j as f32 / tessellation as f32 * 2.0 * PI;
            let (sin, cos) = angle.sin_cos();
            data.positions.push([radius * cos, y, radius * sin]);
            data.normals.push([0.0, normal_y, 0.0]);
            data.uvs.push([0.5 + cos * 0.5, 0.5 + sin * 0.5]);
        }
        for j in 0..tessellation {
            let p = center + 1 + j;
            if normal_y > 0.0 {
                data.indices.extend_from_slice(&[center, p + 1, p]);
            } else {
                data.indices.extend_from_slice(&[center, p, p + 1]);
            }
        }
    }
    data
}

/// Flat plane in XZ facing +Y, centred at the origin.
pub fn create_ground(width: f32, height: f32, subdivisions: u32) -> VertexData {
    let subdivisions = subdivisions.max(1);
    let mut data = VertexData::default();

    for row in 0..=subdivisions {
        let v = row as f32 / subdivisions as f32;
        for col in 0..=subdivisions {
            let u = col as f32 / subdivisions as f32;
            data.positions
                .push([-width / 2.0 + u * width, 0.0, -height / 2.0 + v * height]);
            data.normals.push([0.0, 1.0, 0.0]);
            data.uvs.push([u, 1.0 - v]);
        }
    }

    let stride = subdivisions + 1;
    for row in 0..subdivisions {
        for col in 0..subdivisions {
            let a = row * stride + col;
            let up = a + stride;
            data.indices
                .extend_from_slice(&[a, up, a + 1, a + 1, up, up + 1]);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(data: &VertexData, tri: &[u32]) -> Vector3<f32> {
        let p = |i: u32| Vector3::from(data.positions[i as usize]);
        (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]))
    }

    #[test]
    fn ground_faces_up() {
        let ground = create_ground(100.0, 100.0, 1);
        assert_eq!(ground.vertex_count(), 4);
        assert_eq!(ground.index_count(), 6);
        for tri in ground.indices.chunks(3) {
            assert!(face_normal(&ground, tri).y > 0.0);
        }
    }

    #[test]
    fn sphere_triangles_point_outwards() {
        let sphere = create_sphere(1.0, 8);
        for tri in sphere.indices.chunks(3) {
            let n = face_normal(&sphere, tri);
            let centroid = tri
                .iter()
                .map(|i| Vector3::from(sphere.positions[*i as usize]))
                .fold(Vector3::new(0.0, 0.0, 0.0), |acc, p| acc + p)
                / 3.0;
            assert!(n.dot(centroid) > 0.0, "inward triangle {:?}", tri);
        }
    }

    #[test]
    fn sphere_fits_its_diameter() {
        let bb = create_sphere(1.0, 32).bounding_box().unwrap();
        let size = bb.size();
        assert!((size.y - 1.0).abs() < 1e-5);
        assert!(size.x <= 1.0 + 1e-5 && size.z <= 1.0 + 1e-5);
    }

    #[test]
    fn cylinder_is_centred_on_y() {
        let bb = create_cylinder(0.45, 0.75, 24).bounding_box().unwrap();
        assert!((bb.min.y + 0.375).abs() < 1e-6);
        assert!((bb.max.y - 0.375).abs() < 1e-6);
        assert!((bb.max.x - 0.225).abs() < 1e-6);
    }

    #[test]
    fn cylinder_side_points_outwards() {
        let cylinder = create_cylinder(1.0, 2.0, 12);
        let side_indices = 12 * 6;
        for tri in cylinder.indices[..side_indices].chunks(3) {
            let n = face_normal(&cylinder, tri);
            let p = Vector3::from(cylinder.positions[tri[0] as usize]);
            assert!(n.x * p.x + n.z * p.z > 0.0);
        }
    }

    #[test]
    fn transform_moves_positions_and_rotates_normals() {
        let mut ground = create_ground(2.0, 2.0, 1);
        let matrix = Matrix4::from_translation(Vector3::new(0.0, 3.0, 0.0))
            * Matrix4::from_angle_x(cgmath::Rad(PI / 2.0));
        ground.transform(&matrix);
        for (p, n) in ground.positions.iter().zip(ground.normals.iter()) {
            assert!((n[2] - 1.0).abs() < 1e-5);
            assert!(p[1] >= 2.0 - 1e-5 && p[1] <= 4.0 + 1e-5);
        }
    }

    #[test]
    fn append_offsets_indices() {
        let mut a = create_ground(1.0, 1.0, 1);
        let b = create_ground(1.0, 1.0, 1);
        let range = a.append(&b);
        assert_eq!(range, 6..12);
        assert_eq!(a.indices[6], 4);
        assert_eq!(a.vertex_count(), 8);
    }
}
