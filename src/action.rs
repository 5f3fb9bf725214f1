use strum::{EnumIter, FromRepr, VariantArray};

/// Discrete actions available to the [`LineAgent`](crate::agent::LineAgent)
#[derive(EnumIter, VariantArray, FromRepr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left = 0,
    Nothing = 1,
    Right = 2,
}

impl Action {
    /// Map a raw horizontal input axis value to an action
    ///
    /// Only the exact values `-1` and `+1` move the agent, mirroring an unsmoothed input axis.
    pub fn from_axis(value: f32) -> Self {
        if value == -1.0 {
            Self::Left
        } else if value == 1.0 {
            Self::Right
        } else {
            Self::Nothing
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::from_repr(value).ok_or(value)
    }
}

/// Closed interval of legal coordinates on the free axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
}

impl Bounds {
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.left && x <= self.right
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.left, self.right)
    }
}

/// Result of interpreting an action at a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    /// Move along the free axis by the given signed amount
    Displace(f32),
    /// The action would leave the bounds, so the episode must end
    OutOfBounds,
}

/// Resolve an action at coordinate `x` into a movement
pub fn interpret(action: Action, x: f32, bounds: &Bounds, step: f32) -> Movement {
    match action {
        Action::Nothing => Movement::Displace(0.0),
        Action::Left if x > bounds.left => Movement::Displace(-step),
        Action::Right if x < bounds.right => Movement::Displace(step),
        Action::Left | Action::Right => Movement::OutOfBounds,
    }
}
