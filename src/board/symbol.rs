//! The fixed catalog of tile faces.

use serde::{Deserialize, Serialize};

/// A tile face. Pairs are identified by sharing a symbol.
///
/// The presentation layer maps each symbol to an icon; the engine only
/// compares them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Hearts,
    WaterDrop,
    DiceSixFacesFive,
    Umbrella,
    Cube,
    BeachBall,
    Dragonfly,
    Hummingbird,
    FlowerEmblem,
    OpenBook,
}

impl Symbol {
    /// Every symbol in catalog order. Boards use a prefix of this list.
    pub const CATALOG: [Symbol; 10] = [
        Symbol::Hearts,
        Symbol::WaterDrop,
        Symbol::DiceSixFacesFive,
        Symbol::Umbrella,
        Symbol::Cube,
        Symbol::BeachBall,
        Symbol::Dragonfly,
        Symbol::Hummingbird,
        Symbol::FlowerEmblem,
        Symbol::OpenBook,
    ];

    /// Icon name understood by the presentation layer.
    #[must_use]
    pub const fn icon_name(self) -> &'static str {
        match self {
            Symbol::Hearts => "GiHearts",
            Symbol::WaterDrop => "GiWaterDrop",
            Symbol::DiceSixFacesFive => "GiDiceSixFacesFive",
            Symbol::Umbrella => "GiUmbrella",
            Symbol::Cube => "GiCube",
            Symbol::BeachBall => "GiBeachBall",
            Symbol::Dragonfly => "GiDragonfly",
            Symbol::Hummingbird => "GiHummingbird",
            Symbol::FlowerEmblem => "GiFlowerEmblem",
            Symbol::OpenBook => "GiOpenBook",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.icon_name())
    }
}
