use crate::Point;

use serde::{Deserialize, Serialize};

/// An index into the export palette.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PaletteIndex(pub u8);

pub const AIR: PaletteIndex = PaletteIndex(0);
pub const SOLID: PaletteIndex = PaletteIndex(1);

impl Default for PaletteIndex {
    fn default() -> Self {
        AIR
    }
}

/// A named block type, e.g. `minecraft:air`.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct BlockState {
    #[serde(rename = "Name")]
    pub name: String,
}

impl BlockState {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

pub const AIR_NAME: &str = "minecraft:air";
pub const SOLID_NAME: &str = "minecraft:smooth_stone";

/// The ordered block types a schematic refers to by index. Exports always use
/// `Palette::default()`: empty space at index 0, the single solid material at index 1.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Palette {
    states: Vec<BlockState>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            states: vec![BlockState::new(AIR_NAME), BlockState::new(SOLID_NAME)],
        }
    }
}

impl Palette {
    pub fn from_states(states: Vec<BlockState>) -> Self {
        Self { states }
    }

    pub fn get(&self, index: PaletteIndex) -> Option<&BlockState> {
        self.states.get(index.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockState> {
        self.states.iter()
    }
}

/// A filled voxel and the palette entry it uses. Empty space is never recorded.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct BlockRecord {
    pub pos: Point,
    pub state: PaletteIndex,
}

impl BlockRecord {
    pub fn solid(pos: Point) -> Self {
        Self { pos, state: SOLID }
    }
}
