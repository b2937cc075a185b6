mod move_message;

pub use move_message::{ApplyPose, PosePayload, SubmitMove, WIRE_EPSILON};
