// 定数定義
pub const DECK_TILES: usize = 136; // 物理牌の総数
pub const TILE_KINDS: usize = 37; // 赤5を含む牌種の数
pub const AREAS: usize = 9; // 観測する卓上領域の数

// 字牌の番号
pub const WE: u8 = 1; // 東
pub const WS: u8 = 2; // 南
pub const WW: u8 = 3; // 西
pub const WN: u8 = 4; // 北
pub const DW: u8 = 5; // 白
pub const DG: u8 = 6; // 發
pub const DR: u8 = 7; // 中
