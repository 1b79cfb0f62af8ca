use std::collections::HashMap;

use crate::model::*;

// [CountTracker]
// 基準枚数表から観測済みの牌を差し引いて残り枚数を求める
// 毎サイクル全再計算するため観測列の順序には依存しない
#[derive(Debug, Clone)]
pub struct CountTracker {
    baseline: RemainingCounts,
}

impl CountTracker {
    pub fn new(baseline: RemainingCounts) -> Self {
        Self { baseline }
    }

    pub fn baseline(&self) -> &RemainingCounts {
        &self.baseline
    }

    pub fn remaining_from_observed(&self, observed: &[ObservedTile]) -> RemainingCounts {
        let mut remaining = self.baseline.clone();
        for tile in observed {
            // 物理的な上限を超えた観測は負数のままにして異常として可視化する
            *remaining.get_mut(&tile.notation()).unwrap() -= 1;
        }
        remaining
    }
}

// 牌種ごとの残り枚数合計 字牌には合計を定義しない
pub fn suit_counts(remaining: &RemainingCounts) -> SuitRemainingCounts {
    let mut counts = HashMap::new();
    for (notation, count) in remaining {
        if notation.0 == Suit::Honor {
            continue;
        }
        *counts.entry(notation.0).or_insert(0) += count;
    }
    counts
}

#[cfg(test)]
use crate::registry::TileRegistry;

#[cfg(test)]
fn observe(reg: &TileRegistry, area: BoardArea, symbols: &[&str]) -> Vec<ObservedTile> {
    symbols
        .iter()
        .map(|s| {
            let n = Notation::from_symbol(s).unwrap();
            ObservedTile {
                area,
                texture: reg.texture(n).unwrap().clone(),
            }
        })
        .collect()
}

#[test]
fn test_remaining_empty() {
    let reg = TileRegistry::build().unwrap();
    let tracker = CountTracker::new(reg.baseline().clone());

    let remaining = tracker.remaining_from_observed(&[]);
    assert_eq!(&remaining, reg.baseline());

    let counts = suit_counts(&remaining);
    assert_eq!(counts[&Suit::Man], 36);
    assert_eq!(counts[&Suit::Pin], 36);
    assert_eq!(counts[&Suit::Sou], 36);
    assert!(!counts.contains_key(&Suit::Honor));
}

#[test]
fn test_remaining_order_independent() {
    let reg = TileRegistry::build().unwrap();
    let tracker = CountTracker::new(reg.baseline().clone());

    let mut observed = observe(
        &reg,
        BoardArea::Hand,
        &["1m", "1m", "3p", "0s", "5s", "7z", "1m"],
    );
    let forward = tracker.remaining_from_observed(&observed);
    observed.reverse();
    let backward = tracker.remaining_from_observed(&observed);
    observed.rotate_left(3);
    let rotated = tracker.remaining_from_observed(&observed);

    assert_eq!(forward, backward);
    assert_eq!(forward, rotated);
    assert_eq!(forward[&Notation::from_symbol("1m").unwrap()], 1);
    assert_eq!(forward[&Notation::from_symbol("0s").unwrap()], 0);
}

#[test]
fn test_red_five_exhaustion() {
    let reg = TileRegistry::build().unwrap();
    let tracker = CountTracker::new(reg.baseline().clone());

    // 5mの3枚と赤5mの1枚で計4枚を観測し尽くす
    let observed = observe(&reg, BoardArea::DiscardSelf, &["5m", "5m", "5m", "0m"]);
    let remaining = tracker.remaining_from_observed(&observed);
    assert_eq!(remaining[&Notation::from_symbol("5m").unwrap()], 0);
    assert_eq!(remaining[&Notation::from_symbol("0m").unwrap()], 0);

    let counts = suit_counts(&remaining);
    assert_eq!(counts[&Suit::Man], 32);
    assert_eq!(counts[&Suit::Pin], 36);
}

#[test]
fn test_remaining_negative() {
    let reg = TileRegistry::build().unwrap();
    let tracker = CountTracker::new(reg.baseline().clone());

    // 物理枚数を超える観測は二重カウントの異常としてそのまま現れる
    let observed = observe(&reg, BoardArea::Hand, &["1z", "1z", "1z", "1z", "1z"]);
    let remaining = tracker.remaining_from_observed(&observed);
    assert_eq!(remaining[&Notation::from_symbol("1z").unwrap()], -1);
}

#[test]
fn test_cycle_independence() {
    let reg = TileRegistry::build().unwrap();
    let tracker = CountTracker::new(reg.baseline().clone());

    let first = tracker.remaining_from_observed(&observe(&reg, BoardArea::Hand, &["1m", "2m"]));
    let second = tracker.remaining_from_observed(&observe(&reg, BoardArea::Hand, &["9p"]));

    // サイクル間で状態を持たない
    assert_eq!(first[&Notation::from_symbol("1m").unwrap()], 3);
    assert_eq!(second[&Notation::from_symbol("1m").unwrap()], 4);
    assert_eq!(second[&Notation::from_symbol("9p").unwrap()], 3);
}
