use glam::Vec3;

/// Pluggable acceptance check for candidate moves, the hook point for
/// anti-cheat or collision policies. There is deliberately no built-in
/// policy beyond [`AlwaysValid`].
pub trait MoveValidator {
    fn is_valid_move(&self, old_position: Vec3, new_position: Vec3) -> bool;
}

/// The default validator: every move is accepted.
pub struct AlwaysValid;

impl MoveValidator for AlwaysValid {
    fn is_valid_move(&self, _old_position: Vec3, _new_position: Vec3) -> bool {
        true
    }
}

impl<F> MoveValidator for F
where
    F: Fn(Vec3, Vec3) -> bool,
{
    fn is_valid_move(&self, old_position: Vec3, new_position: Vec3) -> bool {
        self(old_position, new_position)
    }
}
