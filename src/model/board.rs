use std::collections::HashMap;
use std::sync::Arc;

use super::*;

// [BoardArea]
// 牌が表示される9つの固定領域 ALLの並びがそのまま走査順
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoardArea {
    Hand,
    DiscardSelf,
    DiscardRight,
    DiscardFar,
    DiscardLeft,
    MeldSelf,
    MeldRight,
    MeldFar,
    MeldLeft,
}

impl BoardArea {
    pub const ALL: [BoardArea; AREAS] = [
        BoardArea::Hand,
        BoardArea::DiscardSelf,
        BoardArea::DiscardRight,
        BoardArea::DiscardFar,
        BoardArea::DiscardLeft,
        BoardArea::MeldSelf,
        BoardArea::MeldRight,
        BoardArea::MeldFar,
        BoardArea::MeldLeft,
    ];

    // 自家 下家 対面 上家 の順
    pub const DISCARDS: [BoardArea; 4] = [
        BoardArea::DiscardSelf,
        BoardArea::DiscardRight,
        BoardArea::DiscardFar,
        BoardArea::DiscardLeft,
    ];
    pub const MELDS: [BoardArea; 4] = [
        BoardArea::MeldSelf,
        BoardArea::MeldRight,
        BoardArea::MeldFar,
        BoardArea::MeldLeft,
    ];

    #[inline]
    pub fn is_discard(self) -> bool {
        Self::DISCARDS.contains(&self)
    }

    #[inline]
    pub fn is_meld(self) -> bool {
        Self::MELDS.contains(&self)
    }
}

impl fmt::Display for BoardArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hand => "hand",
            Self::DiscardSelf => "discard-self",
            Self::DiscardRight => "discard-right",
            Self::DiscardFar => "discard-far",
            Self::DiscardLeft => "discard-left",
            Self::MeldSelf => "meld-self",
            Self::MeldRight => "meld-right",
            Self::MeldFar => "meld-far",
            Self::MeldLeft => "meld-left",
        };
        write!(f, "{}", name)
    }
}

// [ObservedTile]
// 観測された1枚の牌 同一牌種の重複は別々の物理牌を意味する
#[derive(Debug, Clone, Serialize)]
pub struct ObservedTile {
    pub area: BoardArea,
    pub texture: Arc<TileTexture>,
}

impl ObservedTile {
    #[inline]
    pub fn notation(&self) -> Notation {
        self.texture.notation()
    }
}

impl fmt::Display for ObservedTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.area, self.texture)
    }
}

pub type RemainingCounts = HashMap<Notation, i32>;
pub type SuitRemainingCounts = HashMap<Suit, i32>;

// [BoardCounts]
// 1回の観測サイクルの成果物 読み手には必ずこの単位で公開する
#[derive(Debug, Clone, Serialize)]
pub struct BoardCounts {
    pub observed: Vec<ObservedTile>,
    pub remaining: RemainingCounts,
    pub suit_counts: SuitRemainingCounts,
}

#[test]
fn test_area_order() {
    assert_eq!(BoardArea::ALL.len(), AREAS);
    assert_eq!(BoardArea::ALL[0], BoardArea::Hand);
    for a in BoardArea::DISCARDS {
        assert!(a.is_discard() && !a.is_meld());
    }
    for a in BoardArea::MELDS {
        assert!(a.is_meld() && !a.is_discard());
    }
    assert!(!BoardArea::Hand.is_discard() && !BoardArea::Hand.is_meld());
}
