use crate::model::*;
use crate::reader::crawler::DiscardTile;
use crate::registry::{RegistryError, TileRegistry};

// 牌アイコンのテクスチャパス 高解像度版と基本版の2形式のみ認識する
pub const TILE_ICON_DIR: &str = "ui/icon/076000/";
pub const TILE_ICON_SUFFIX_HR: &str = "_hr1.tex";
pub const TILE_ICON_SUFFIX: &str = ".tex";

pub fn is_tile_texture_path(path: &str) -> bool {
    path.starts_with(TILE_ICON_DIR)
        && (path.ends_with(TILE_ICON_SUFFIX_HR) || path.ends_with(TILE_ICON_SUFFIX))
}

pub fn tile_texture_path(texture_id: &str, hr: bool) -> String {
    let suffix = if hr {
        TILE_ICON_SUFFIX_HR
    } else {
        TILE_ICON_SUFFIX
    };
    format!("{}{}{}", TILE_ICON_DIR, texture_id, suffix)
}

// テクスチャパスを牌の観測に分類
// 牌以外のノードはNone, 牌のはずがIDを解決できない場合のみErr
pub fn classify_path(
    reg: &TileRegistry,
    area: BoardArea,
    path: &str,
) -> Result<Option<ObservedTile>, RegistryError> {
    if !is_tile_texture_path(path) {
        return Ok(None);
    }

    let texture = reg.resolve(path)?;
    Ok(Some(ObservedTile { area, texture }))
}

// 捨て牌ノードの分類
// 鳴かれた牌は鳴き領域側で数えるため捨て牌側では除外する
pub fn classify_discard(
    reg: &TileRegistry,
    area: BoardArea,
    tile: &DiscardTile,
) -> Result<Option<ObservedTile>, RegistryError> {
    if tile.melded && area.is_discard() {
        return Ok(None);
    }
    classify_path(reg, area, &tile.path)
}

#[test]
fn test_classify_path() {
    let reg = TileRegistry::build().unwrap();

    // 牌以外のUIノードは観測なし (エラーではない)
    let r = classify_path(&reg, BoardArea::Hand, "ui/uld/emj_background.tex").unwrap();
    assert!(r.is_none());

    let r = classify_path(&reg, BoardArea::Hand, "ui/icon/076000/076041_hr1.tex").unwrap();
    assert_eq!(r.unwrap().notation(), Notation(Suit::Man, 1));

    // プレフィックスは牌のものだがIDが未登録の場合はエラー
    let e = classify_path(&reg, BoardArea::Hand, "ui/icon/076000/076200.tex");
    assert!(e.is_err());
}

#[test]
fn test_classify_discard() {
    let reg = TileRegistry::build().unwrap();
    let path = tile_texture_path("076059", true); // 1s

    let tile = DiscardTile {
        path: path.clone(),
        melded: true,
        immediate: false,
    };
    let r = classify_discard(&reg, BoardArea::DiscardRight, &tile).unwrap();
    assert!(r.is_none());

    let tile = DiscardTile {
        path,
        melded: false,
        immediate: true,
    };
    let r = classify_discard(&reg, BoardArea::DiscardRight, &tile).unwrap();
    assert_eq!(r.unwrap().notation(), Notation(Suit::Sou, 1));
}
