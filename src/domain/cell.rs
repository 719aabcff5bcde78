/// Cell kinds and their properties.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CellKind {
    Wall,
    Open,
    Start,   // Agent spawn, exactly one per maze
    Exit,    // Target, at least one per maze
    Bonus,   // Restores energy on entry
    Penalty, // Drains energy on entry
}

impl CellKind {
    /// Decode a maze file cell code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellKind::Wall),
            1 => Some(CellKind::Open),
            2 => Some(CellKind::Start),
            3 => Some(CellKind::Exit),
            4 => Some(CellKind::Bonus),
            5 => Some(CellKind::Penalty),
            _ => None,
        }
    }

    /// Can the agent occupy this cell?
    pub fn is_passable(self) -> bool {
        !matches!(self, CellKind::Wall)
    }
}
