// teleport.rs - Neighbor resolution through horizontal and vertical wormholes
//
// Precedence is Top > Right > Bottom > Left. Upward steps only see vertical
// wormholes, sideways steps only see horizontal ones, and the two downward
// diagonals consult both networks in a fixed order.

use crate::grid::Coord;
use crate::portals::PortalMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Horizontal,
    Vertical,
}

impl Direction {
    // Clockwise from Up.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up        => (-1,  0),
            Direction::UpRight   => (-1,  1),
            Direction::Right     => ( 0,  1),
            Direction::DownRight => ( 1,  1),
            Direction::Down      => ( 1,  0),
            Direction::DownLeft  => ( 1, -1),
            Direction::Left      => ( 0, -1),
            Direction::UpLeft    => (-1, -1),
        }
    }

    /// Networks consulted for a step in this direction, in precedence order.
    /// No other network is ever consulted, even when these have no portal.
    pub fn networks(self) -> &'static [Network] {
        use Network::{Horizontal, Vertical};
        match self {
            Direction::Up | Direction::UpRight | Direction::UpLeft => &[Vertical],
            Direction::Right                                       => &[Horizontal],
            Direction::DownRight                                   => &[Horizontal, Vertical],
            Direction::Down                                        => &[Vertical],
            Direction::DownLeft                                    => &[Vertical, Horizontal],
            Direction::Left                                        => &[Horizontal],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalNetworks {
    pub horizontal: PortalMap,
    pub vertical: PortalMap,
}

impl PortalNetworks {
    pub fn new(horizontal: PortalMap, vertical: PortalMap) -> Self {
        Self { horizontal, vertical }
    }

    pub fn network(&self, network: Network) -> &PortalMap {
        match network {
            Network::Horizontal => &self.horizontal,
            Network::Vertical   => &self.vertical,
        }
    }

    /// Final neighbor of `from` one step in `direction`; may be out of bounds.
    ///
    /// For each applicable network, a portal at the source cell wins and the
    /// step is re-applied from its partner. Otherwise a portal at the raw
    /// destination sends the step straight to that partner. With no portal in
    /// any applicable network, the raw destination is the neighbor.
    pub fn resolve(&self, from: Coord, direction: Direction) -> Coord {
        let (dr, dc) = direction.offset();
        let raw = (from.0 + dr, from.1 + dc);

        for &network in direction.networks() {
            let portals = self.network(network);
            if let Some((pr, pc)) = portals.get(from) {
                return (pr + dr, pc + dc);
            }
            if let Some(target) = portals.get(raw) {
                return target;
            }
        }
        raw
    }

    // Duplicates kept.
    pub fn neighbors(&self, from: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |direction| self.resolve(from, direction))
    }
}
