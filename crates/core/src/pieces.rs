//! Pieces module - the shape catalog
//!
//! Every (kind, rotation) pair maps to four authored cell offsets. Rotation is a
//! table lookup: there is no rotation matrix and no wall-kick data, so a
//! rotation either fits in place or is refused.

use crate::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// The four rotation states of one kind, indexed by [`Rotation::index`]
pub type RotationTable = [PieceShape; 4];

const I_SHAPES: RotationTable = [
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 0), (0, 1), (0, 2), (0, 3)],
];

const O_SHAPES: RotationTable = [[(0, 0), (1, 0), (0, 1), (1, 1)]; 4];

const T_SHAPES: RotationTable = [
    [(0, 0), (1, 0), (2, 0), (1, 1)],
    [(1, 0), (1, 1), (1, 2), (0, 1)],
    [(0, 1), (1, 1), (2, 1), (1, 0)],
    [(1, 0), (1, 1), (1, 2), (2, 1)],
];

const S_SHAPES: RotationTable = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_SHAPES: RotationTable = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (2, 1), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 0), (2, 0)],
    [(1, 0), (1, 1), (0, 1), (0, 2)],
];

const J_SHAPES: RotationTable = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (0, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(2, 0), (1, 0), (1, 1), (1, 2)],
];

const L_SHAPES: RotationTable = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
];

/// Full rotation table for a kind
pub fn rotation_table(kind: PieceKind) -> &'static RotationTable {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    rotation_table(kind)[rotation.index()]
}

/// Shape lookup by raw rotation index.
///
/// # Panics
///
/// Panics if `index` is not in `0..4`; normalize with `% 4` before calling.
pub fn shape_for_index(kind: PieceKind, index: usize) -> PieceShape {
    let rotation = Rotation::from_index(index)
        .unwrap_or_else(|| panic!("rotation index {index} out of range 0..4"));
    get_shape(kind, rotation)
}

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

/// Get initial shape for a new piece at spawn position
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}
