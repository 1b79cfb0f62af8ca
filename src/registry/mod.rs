// 牌種とゲームアセットのテクスチャIDの対応表
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::*;

// アセット表のテクスチャID開始位置
const MAN_ICON_START: u32 = 76040;
const PIN_ICON_START: u32 = 76049;
const SOU_ICON_START: u32 = 76058;
const HONOR_ICON_START: u32 = 76067;

// 赤5は連番の末尾に独立したIDを持つ
const RED_ICON_IDS: [(Suit, u32); 3] = [(Suit::Man, 76075), (Suit::Pin, 76076), (Suit::Sou, 76077)];

// [RegistryError]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    // 構築時の二重登録 アセット表の破損を意味するので起動自体を中止する
    DuplicateTextureId {
        texture_id: String,
        notation: Notation,
    },
    // 登録のないテクスチャID 該当ノードのみ観測対象から除外する
    UnknownTexture {
        path: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTextureId {
                texture_id,
                notation,
            } => {
                write!(f, "duplicate texture id: {} for {}", texture_id, notation)
            }
            Self::UnknownTexture { path } => write!(f, "unknown texture: {}", path),
        }
    }
}

impl std::error::Error for RegistryError {}

// [TileRegistry]
// プロセス開始時に一度だけ構築し, 以後は読み取り専用で共有する
#[derive(Debug, Default)]
pub struct TileRegistry {
    id_to_texture: HashMap<String, Arc<TileTexture>>,
    notation_to_id: HashMap<Notation, String>,
    baseline: RemainingCounts,
}

impl TileRegistry {
    pub fn build() -> Result<Self, RegistryError> {
        let mut reg = Self::default();

        for suit in Suit::SUITED {
            for rank in 1..=9 {
                // 5の4枚目は赤として別掲するので基準は3枚
                let count = if rank == 5 { 3 } else { 4 };
                reg.insert(icon_id(icon_start(suit), rank), Notation(suit, rank), count)?;
            }
        }

        for rank in WE..=DR {
            reg.insert(icon_id(HONOR_ICON_START, rank), Notation(Suit::Honor, rank), 4)?;
        }

        for (suit, id) in RED_ICON_IDS {
            reg.insert(icon_id(id, 0), Notation(suit, 0), 1)?;
        }

        Ok(reg)
    }

    fn insert(
        &mut self,
        texture_id: String,
        notation: Notation,
        count: i32,
    ) -> Result<(), RegistryError> {
        if self.id_to_texture.contains_key(&texture_id) || self.notation_to_id.contains_key(&notation)
        {
            return Err(RegistryError::DuplicateTextureId {
                texture_id,
                notation,
            });
        }

        let texture = Arc::new(TileTexture::new(texture_id.clone(), notation));
        self.id_to_texture.insert(texture_id.clone(), texture);
        self.notation_to_id.insert(notation, texture_id);
        self.baseline.insert(notation, count);
        Ok(())
    }

    // テクスチャパスから牌を解決
    // ディレクトリと解像度サフィックスを取り除いたIDで引く
    pub fn resolve(&self, texture_path: &str) -> Result<Arc<TileTexture>, RegistryError> {
        let id = strip_texture_path(texture_path);
        self.id_to_texture
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownTexture {
                path: texture_path.to_string(),
            })
    }

    pub fn texture(&self, notation: Notation) -> Option<&Arc<TileTexture>> {
        let id = self.notation_to_id.get(&notation)?;
        self.id_to_texture.get(id)
    }

    pub fn notation_of(&self, texture_id: &str) -> Option<Notation> {
        self.id_to_texture.get(texture_id).map(|t| t.notation())
    }

    pub fn texture_id_of(&self, notation: Notation) -> Option<&str> {
        self.notation_to_id.get(&notation).map(|id| id.as_str())
    }

    pub fn baseline(&self) -> &RemainingCounts {
        &self.baseline
    }

    pub fn baseline_count(&self, notation: Notation) -> i32 {
        *self.baseline.get(&notation).unwrap_or(&0)
    }

    pub fn notations(&self) -> impl Iterator<Item = Notation> + '_ {
        self.notation_to_id.keys().copied()
    }
}

fn icon_id(start: u32, rank: u8) -> String {
    format!("{:06}", start + rank as u32)
}

fn icon_start(suit: Suit) -> u32 {
    match suit {
        Suit::Man => MAN_ICON_START,
        Suit::Pin => PIN_ICON_START,
        Suit::Sou => SOU_ICON_START,
        Suit::Honor => HONOR_ICON_START,
    }
}

// パスの最終セグメントから "_hr1" と拡張子を除去してIDを取り出す
fn strip_texture_path(path: &str) -> &str {
    let last = path.rsplit('/').next().unwrap();
    let base = last.split('.').next().unwrap();
    base.split('_').next().unwrap()
}

#[test]
fn test_bijection() {
    let reg = TileRegistry::build().unwrap();
    let notations: Vec<Notation> = reg.notations().collect();
    assert_eq!(notations.len(), TILE_KINDS);

    for n in notations {
        let id = reg.texture_id_of(n).unwrap().to_string();
        assert_eq!(reg.notation_of(&id), Some(n));
        assert_eq!(reg.texture(n).unwrap().texture_id(), id);
    }
}

#[test]
fn test_baseline_counts() {
    let reg = TileRegistry::build().unwrap();

    let suit_sum = |suit: Suit| -> i32 {
        reg.baseline()
            .iter()
            .filter(|(n, _)| n.0 == suit)
            .map(|(_, c)| c)
            .sum()
    };
    assert_eq!(suit_sum(Suit::Man), 36);
    assert_eq!(suit_sum(Suit::Pin), 36);
    assert_eq!(suit_sum(Suit::Sou), 36);
    assert_eq!(suit_sum(Suit::Honor), 28);

    let total: i32 = Suit::ALL.iter().map(|&s| suit_sum(s)).sum();
    assert_eq!(total, DECK_TILES as i32);
    assert_eq!(reg.baseline().values().sum::<i32>(), DECK_TILES as i32);

    assert_eq!(reg.baseline_count(Notation::from_symbol("5m").unwrap()), 3);
    assert_eq!(reg.baseline_count(Notation::from_symbol("0m").unwrap()), 1);
    assert_eq!(reg.baseline_count(Notation::from_symbol("1m").unwrap()), 4);
    assert_eq!(reg.baseline_count(Notation::from_symbol("7z").unwrap()), 4);
}

#[test]
fn test_resolve() {
    let reg = TileRegistry::build().unwrap();

    // 高解像度版と基本版の両方を受け付ける
    let t = reg.resolve("ui/icon/076000/076041_hr1.tex").unwrap();
    assert_eq!(t.notation(), Notation(Suit::Man, 1));
    let t = reg.resolve("ui/icon/076000/076050.tex").unwrap();
    assert_eq!(t.notation(), Notation(Suit::Pin, 1));
    let t = reg.resolve("ui/icon/076000/076075.tex").unwrap();
    assert_eq!(t.notation(), Notation(Suit::Man, 0));

    let e = reg.resolve("ui/icon/076000/076100.tex").unwrap_err();
    assert!(matches!(e, RegistryError::UnknownTexture { .. }));
}

#[test]
fn test_duplicate_insert() {
    let mut reg = TileRegistry::build().unwrap();

    // 登録済みIDへの再登録は構築エラー
    let e = reg
        .insert("076041".to_string(), Notation(Suit::Man, 1), 4)
        .unwrap_err();
    assert!(matches!(e, RegistryError::DuplicateTextureId { .. }));

    // 別IDでも表記が衝突すれば同様
    let e = reg
        .insert("076999".to_string(), Notation(Suit::Man, 1), 4)
        .unwrap_err();
    assert!(matches!(e, RegistryError::DuplicateTextureId { .. }));
}
