use glam::Vec3;
use naia_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr, SignedVariableInteger};

use crate::pose::Pose;

// Pose components are packed as fixed-point varints with 3 fraction digits.
const FRACTION_SCALE: f32 = 1000.0;

/// Declared per-component precision tolerance of the wire codec.
pub const WIRE_EPSILON: f32 = 0.0005;

fn ser_component(value: f32, writer: &mut dyn BitWrite) {
    let scaled = (value * FRACTION_SCALE).round() as i64;
    SignedVariableInteger::<7>::new(scaled).ser(writer);
}

fn de_component(reader: &mut BitReader) -> Result<f32, SerdeErr> {
    let scaled: SignedVariableInteger<7> = Serde::de(reader)?;
    Ok(scaled.get() as f32 / FRACTION_SCALE)
}

fn component_bit_length(value: f32) -> u32 {
    let scaled = (value * FRACTION_SCALE).round() as i64;
    SignedVariableInteger::<7>::new(scaled).bit_length()
}

/// The six-float payload shared by [`SubmitMove`] and [`ApplyPose`]:
/// position followed by XYZ euler angles in degrees, packed sequentially.
/// Sender/target peer ids ride in the transport envelope, not here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PosePayload {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub euler_x: f32,
    pub euler_y: f32,
    pub euler_z: f32,
}

impl PosePayload {
    pub fn from_pose(pose: &Pose) -> Self {
        let euler = pose.euler_degrees();
        Self {
            x: pose.position.x,
            y: pose.position.y,
            z: pose.position.z,
            euler_x: euler.x,
            euler_y: euler.y,
            euler_z: euler.z,
        }
    }

    pub fn to_pose(&self) -> Pose {
        Pose::from_euler_degrees(
            Vec3::new(self.x, self.y, self.z),
            Vec3::new(self.euler_x, self.euler_y, self.euler_z),
        )
    }

    fn components(&self) -> [f32; 6] {
        [
            self.x,
            self.y,
            self.z,
            self.euler_x,
            self.euler_y,
            self.euler_z,
        ]
    }
}

impl Serde for PosePayload {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for component in self.components() {
            ser_component(component, writer);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            x: de_component(reader)?,
            y: de_component(reader)?,
            z: de_component(reader)?,
            euler_x: de_component(reader)?,
            euler_y: de_component(reader)?,
            euler_z: de_component(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.components()
            .iter()
            .map(|component| component_bit_length(*component))
            .sum()
    }
}

macro_rules! pose_message {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub struct $name(pub PosePayload);

        impl $name {
            pub fn from_pose(pose: &Pose) -> Self {
                Self(PosePayload::from_pose(pose))
            }

            pub fn to_pose(&self) -> Pose {
                self.0.to_pose()
            }

            pub fn to_bytes(&self) -> Box<[u8]> {
                let mut writer = BitWriter::new();
                self.ser(&mut writer);
                writer.to_bytes()
            }

            pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerdeErr> {
                let mut reader = BitReader::new(bytes);
                Self::de(&mut reader)
            }
        }

        impl Serde for $name {
            fn ser(&self, writer: &mut dyn BitWrite) {
                self.0.ser(writer);
            }

            fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
                Ok(Self(PosePayload::de(reader)?))
            }

            fn bit_length(&self) -> u32 {
                self.0.bit_length()
            }
        }
    };
}

pose_message!(
    SubmitMove,
    "Observer-to-authority candidate move for an entity the sender owns."
);
pose_message!(
    ApplyPose,
    "Authority-to-observer replicated pose for an entity the receiver observes."
);
