use crate::ship::ShipSpec;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const SHIP_SPECS: [ShipSpec; NUM_SHIPS] = [
    ShipSpec::new("Carrier", 5),
    ShipSpec::new("Battleship", 4),
    ShipSpec::new("Cruiser", 3),
    ShipSpec::new("Submarine", 3),
    ShipSpec::new("Destroyer", 2),
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Retry budget for a single ship during random placement before the
/// generator reports `PlacementExhausted` instead of looping forever.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;
