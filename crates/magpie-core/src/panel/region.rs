use crate::config::keys;

/// One of the three horizontal item containers in the top bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelRegion {
    Left,
    Center,
    Right,
}

impl PanelRegion {
    /// Processing order for reconciliation. The first region processed wins
    /// when the same item shows up in more than one region.
    pub const ALL: [PanelRegion; 3] = [Self::Left, Self::Center, Self::Right];

    /// Settings key holding the persisted box order for this region
    pub fn box_order_key(&self) -> &'static str {
        match self {
            Self::Left => keys::LEFT_BOX_ORDER,
            Self::Center => keys::CENTER_BOX_ORDER,
            Self::Right => keys::RIGHT_BOX_ORDER,
        }
    }

    /// The right box lays its children out right-to-left; left and center
    /// are left-to-right.
    pub fn is_reversed(&self) -> bool {
        matches!(self, Self::Right)
    }
}
