//! Pieces module - tetromino geometry tables
//!
//! Every piece kind is defined once by a base mask and an anchor (pivot) cell.
//! On first use the four rotation states are derived from it by repeated 90°
//! clockwise mask transforms, with the anchor carried through each transform.
//! After that, rotating a piece is a table lookup plus an index update.
//! Kinds with fewer distinct orientations (O, I) repeat their first states, so
//! a half-turned I covers the same cells as an unturned one.
//!
//! Absolute cells of a piece are `position + (cell - anchor)`: the piece
//! position always names the board cell under the anchor, so the anchor stays
//! put while the shape turns around it.

use std::sync::OnceLock;

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation};

/// Offset `(row, col)` in a piece's local frame
pub type Offset = (i32, i32);

/// One rotation state: the occupied cells of the state's mask and its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    /// Occupied cells in the mask frame, row-major order
    pub cells: [Offset; 4],
    /// Pivot cell in the mask frame
    pub anchor: Offset,
    /// Mask bounding box `(rows, cols)`
    pub dims: (i32, i32),
}

impl RotationState {
    /// Occupied cells relative to the anchor
    pub fn offsets(&self) -> [Offset; 4] {
        let (ar, ac) = self.anchor;
        self.cells.map(|(r, c)| (r - ar, c - ac))
    }
}

/// All four rotation states of a piece kind, indexed by [`Rotation::index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceGeometry {
    pub kind: PieceKind,
    pub states: [RotationState; 4],
}

/// Base definition a geometry is derived from
struct PieceDef {
    kind: PieceKind,
    /// Rows separated by `/`, `#` marks an occupied cell
    mask: &'static str,
    anchor: Offset,
    /// Number of distinct states; state `k` reuses state `k % period`.
    /// O looks the same after every quarter turn (1), I only alternates between
    /// horizontal and vertical (2).
    period: usize,
}

const PIECE_DEFS: [PieceDef; 7] = [
    PieceDef {
        kind: PieceKind::I,
        mask: "####",
        anchor: (0, 1),
        period: 2,
    },
    PieceDef {
        kind: PieceKind::J,
        mask: "#../###",
        anchor: (1, 1),
        period: 4,
    },
    PieceDef {
        kind: PieceKind::L,
        mask: "..#/###",
        anchor: (1, 1),
        period: 4,
    },
    PieceDef {
        kind: PieceKind::O,
        mask: "##/##",
        anchor: (0, 0),
        period: 1,
    },
    PieceDef {
        kind: PieceKind::S,
        mask: ".##/##.",
        anchor: (1, 1),
        period: 4,
    },
    PieceDef {
        kind: PieceKind::T,
        mask: ".#./###",
        anchor: (1, 1),
        period: 4,
    },
    PieceDef {
        kind: PieceKind::Z,
        mask: "##./.##",
        anchor: (1, 1),
        period: 4,
    },
];

type Mask = Vec<Vec<bool>>;

fn parse_mask(mask: &str) -> Mask {
    mask.split('/')
        .map(|row| row.bytes().map(|b| b == b'#').collect())
        .collect()
}

/// Quarter turn clockwise: the mask's columns become its rows, read bottom-up
fn rotate_mask_cw(mask: &Mask, anchor: Offset) -> (Mask, Offset) {
    let rows = mask.len();
    let cols = mask[0].len();
    let rotated = (0..cols)
        .map(|c| (0..rows).map(|r| mask[rows - 1 - r][c]).collect())
        .collect();
    (rotated, (anchor.1, rows as i32 - 1 - anchor.0))
}

fn state_from_mask(mask: &Mask, anchor: Offset) -> RotationState {
    let mut cells = ArrayVec::<Offset, 4>::new();
    for (r, row) in mask.iter().enumerate() {
        for (c, &filled) in row.iter().enumerate() {
            if filled {
                cells.push((r as i32, c as i32));
            }
        }
    }
    RotationState {
        cells: cells
            .into_inner()
            .expect("tetromino masks have exactly four cells"),
        anchor,
        dims: (mask.len() as i32, mask[0].len() as i32),
    }
}

fn build_geometry(def: &PieceDef) -> PieceGeometry {
    let mut mask = parse_mask(def.mask);
    let mut anchor = def.anchor;
    let first = state_from_mask(&mask, anchor);
    let mut states = [first; 4];

    for k in 1..4 {
        if k < def.period {
            (mask, anchor) = rotate_mask_cw(&mask, anchor);
            states[k] = state_from_mask(&mask, anchor);
        } else {
            states[k] = states[k % def.period];
        }
    }

    PieceGeometry {
        kind: def.kind,
        states,
    }
}

static GEOMETRY: OnceLock<[PieceGeometry; 7]> = OnceLock::new();

fn table() -> &'static [PieceGeometry; 7] {
    GEOMETRY.get_or_init(|| PIECE_DEFS.each_ref().map(build_geometry))
}

/// Geometry of all four rotation states of a piece kind
pub fn geometry(kind: PieceKind) -> &'static PieceGeometry {
    let geometry = &table()[kind.index()];
    debug_assert_eq!(geometry.kind, kind);
    geometry
}

/// Rotation state of a piece kind
pub fn get_state(kind: PieceKind, rotation: Rotation) -> &'static RotationState {
    &geometry(kind).states[rotation.index()]
}

/// Anchor-relative offsets for a piece kind and rotation
pub fn get_offsets(kind: PieceKind, rotation: Rotation) -> [Offset; 4] {
    get_state(kind, rotation).offsets()
}

/// Largest bounding dimension over every kind's base mask
pub fn max_dimension() -> i32 {
    table()
        .iter()
        .map(|g| g.states[0].dims.0.max(g.states[0].dims.1))
        .max()
        .unwrap_or(0)
}
