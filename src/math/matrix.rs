use super::Vec3;

/// 4x4 matrix for instance transforms (column-major, as the host GPU API expects)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(t: Vec3) -> Self {
        let mut m = Self::identity();
        m.data[12] = t.x;
        m.data[13] = t.y;
        m.data[14] = t.z;
        m
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[0] = x;
        m.data[5] = y;
        m.data[10] = z;
        m
    }

    /// Rotation of `angle` radians about `axis`
    pub fn axis_angle(axis: Vec3, angle: f32) -> Self {
        let k = axis.normalize();
        let c = angle.cos();
        let s = angle.sin();
        let t = 1.0 - c;

        Self {
            data: [
                t * k.x * k.x + c,       t * k.x * k.y + s * k.z, t * k.x * k.z - s * k.y, 0.0,
                t * k.x * k.y - s * k.z, t * k.y * k.y + c,       t * k.y * k.z + s * k.x, 0.0,
                t * k.x * k.z + s * k.y, t * k.y * k.z - s * k.x, t * k.z * k.z + c,       0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Shortest rotation taking unit vector `from` onto unit vector `to`
    pub fn rotation_arc(from: Vec3, to: Vec3) -> Self {
        let from = from.normalize();
        let to = to.normalize();
        let dot = from.dot(&to).clamp(-1.0, 1.0);

        if dot > 1.0 - 1e-6 {
            return Self::identity();
        }
        if dot < -1.0 + 1e-6 {
            // Antiparallel: any axis perpendicular to `from` works
            let helper = if from.x.abs() < 0.9 { Vec3::RIGHT } else { Vec3::FORWARD };
            return Self::axis_angle(from.cross(&helper), std::f32::consts::PI);
        }

        Self::axis_angle(from.cross(&to), dot.acos())
    }

    /// Matrix multiplication
    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// Transform a point (applies translation)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }

    /// Transform a direction (ignores translation)
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * d.x + self.data[4] * d.y + self.data[8] * d.z,
            self.data[1] * d.x + self.data[5] * d.y + self.data[9] * d.z,
            self.data[2] * d.x + self.data[6] * d.y + self.data[10] * d.z,
        )
    }

    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(a.distance(&b) < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_translation() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert_close(m.transform_point(Vec3::default()), Vec3::new(1.0, 2.0, 3.0));
        assert_close(m.transform_direction(Vec3::UP), Vec3::UP);
    }

    #[test]
    fn test_scale() {
        let m = Mat4::scale(2.0, 3.0, 4.0);
        assert_close(m.transform_point(Vec3::new(1.0, 1.0, 1.0)), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_axis_angle_matches_vector_rotation() {
        let axis = Vec3::new(0.2, 1.0, -0.4);
        let v = Vec3::new(0.5, 0.1, 0.9);
        let m = Mat4::axis_angle(axis, 0.7);
        assert_close(m.transform_direction(v), v.rotate_around_axis(axis, 0.7));
    }

    #[test]
    fn test_rotation_arc_aligns_up() {
        let target = Vec3::new(1.0, 1.0, 0.5).normalize();
        let m = Mat4::rotation_arc(Vec3::UP, target);
        assert_close(m.transform_direction(Vec3::UP), target);
    }

    #[test]
    fn test_rotation_arc_parallel_and_antiparallel() {
        assert_eq!(Mat4::rotation_arc(Vec3::UP, Vec3::UP), Mat4::identity());

        let flipped = Mat4::rotation_arc(Vec3::UP, Vec3::new(0.0, -1.0, 0.0));
        assert_close(flipped.transform_direction(Vec3::UP), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_matrix_mul() {
        let t = Mat4::translation(Vec3::RIGHT);
        let s = Mat4::scale(2.0, 2.0, 2.0);
        let combined = t.mul(&s);
        assert_close(combined.transform_point(Vec3::RIGHT), Vec3::new(3.0, 0.0, 0.0));
    }
}
