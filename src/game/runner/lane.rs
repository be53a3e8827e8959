// Lane indices and lateral offsets

/// Number of lanes on the track
pub const LANE_COUNT: u8 = 3;

/// Direction of a lane change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneDirection {
    Left,
    Right,
}

impl LaneDirection {
    /// Signed lane step: -1 for left, +1 for right
    pub fn step(self) -> i8 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// One of the three lanes, 0 = left, 1 = centre, 2 = right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lane(u8);

impl Default for Lane {
    fn default() -> Self {
        Self::CENTER
    }
}

impl Lane {
    pub const LEFT: Lane = Lane(0);
    pub const CENTER: Lane = Lane(1);
    pub const RIGHT: Lane = Lane(2);

    /// Lane at `index`, or `None` if it is off the track
    pub fn new(index: u8) -> Option<Self> {
        (index < LANE_COUNT).then_some(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Neighbouring lane in `direction`, clamped at the track edges
    pub fn shifted(self, direction: LaneDirection) -> Lane {
        let target = self.0 as i8 + direction.step();
        Lane(target.clamp(0, LANE_COUNT as i8 - 1) as u8)
    }

    /// Lateral offset of the lane centre from the track centre
    pub fn offset(self, lane_width: f32) -> f32 {
        (self.0 as f32 - Self::CENTER.0 as f32) * lane_width
    }
}
