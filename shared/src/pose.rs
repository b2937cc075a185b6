use glam::{EulerRot, Quat, Vec3};

/// A position + rotation snapshot of an entity.
///
/// Rotation travels over the wire as XYZ euler angles in degrees and is
/// reconstructed into a quaternion on receipt; everything in-memory works
/// with the quaternion form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Builds a pose from the wire representation: XYZ euler angles, degrees.
    pub fn from_euler_degrees(position: Vec3, euler_degrees: Vec3) -> Self {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            euler_degrees.x.to_radians(),
            euler_degrees.y.to_radians(),
            euler_degrees.z.to_radians(),
        );
        Self { position, rotation }
    }

    /// Extracts the wire representation of the rotation: XYZ euler angles, degrees.
    pub fn euler_degrees(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    /// Euclidean distance between the two positions.
    pub fn translation_delta(&self, other: &Pose) -> f32 {
        self.position.distance(other.position)
    }

    /// Shortest-arc angle between the two rotations, in degrees.
    pub fn angular_delta_degrees(&self, other: &Pose) -> f32 {
        self.rotation.angle_between(other.rotation).to_degrees()
    }

    /// Linear position interpolation + shortest-arc rotation slerp.
    /// `t` outside `[0, 1]` extrapolates; callers clamp when they shouldn't.
    pub fn interpolate(start: &Pose, end: &Pose, t: f32) -> Pose {
        Pose {
            position: start.position.lerp(end.position, t),
            rotation: start.rotation.slerp(end.rotation, t),
        }
    }
}
