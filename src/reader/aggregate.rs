use crate::model::*;
use crate::reader::classify::{classify_discard, classify_path};
use crate::reader::crawler::NodeCrawler;
use crate::registry::{RegistryError, TileRegistry};
use crate::warn;

// 全領域を固定順に走査して観測列を構築
// 1ノードの失敗はそのノードの除外にとどめ, サイクル全体は継続する
pub fn observe_board(reg: &TileRegistry, crawler: &mut dyn NodeCrawler) -> Vec<ObservedTile> {
    let nodes = crawler.board_nodes();
    let mut observed = vec![];

    for &node in &nodes.hand {
        if let Some(path) = crawler.hand_tile(node) {
            push_classified(&mut observed, classify_path(reg, BoardArea::Hand, &path));
        }
    }

    // 捨て牌は1ノード1枚
    for (i, &area) in BoardArea::DISCARDS.iter().enumerate() {
        for &node in &nodes.discards[i] {
            if let Some(tile) = crawler.discard_tile(node) {
                push_classified(&mut observed, classify_discard(reg, area, &tile));
            }
        }
    }

    // 鳴きは1ノードに複数枚
    for (i, &area) in BoardArea::MELDS.iter().enumerate() {
        for &node in &nodes.melds[i] {
            if let Some(paths) = crawler.meld_tiles(node) {
                for path in &paths {
                    push_classified(&mut observed, classify_path(reg, area, path));
                }
            }
        }
    }

    observed
}

fn push_classified(
    observed: &mut Vec<ObservedTile>,
    result: Result<Option<ObservedTile>, RegistryError>,
) {
    match result {
        Ok(Some(tile)) => observed.push(tile),
        Ok(None) => {}
        Err(e) => warn!("{}", e),
    }
}

#[cfg(test)]
use crate::reader::classify::tile_texture_path;
#[cfg(test)]
use crate::reader::crawler::{BoardNodes, DiscardTile, NodeRef};

// 固定の盤面を返すテスト用クローラ
// ノード参照は (種別, 領域, 位置) を詰めた値
#[cfg(test)]
#[derive(Default)]
struct TestCrawler {
    hand: Vec<String>,
    discards: [Vec<DiscardTile>; 4],
    melds: [Vec<Vec<String>>; 4],
}

#[cfg(test)]
impl TestCrawler {
    fn node(kind: u64, area: usize, index: usize) -> NodeRef {
        kind << 32 | (area as u64) << 16 | index as u64
    }

    fn unpack(node: NodeRef) -> (u64, usize, usize) {
        (
            node >> 32,
            (node >> 16 & 0xffff) as usize,
            (node & 0xffff) as usize,
        )
    }
}

#[cfg(test)]
impl NodeCrawler for TestCrawler {
    fn board_nodes(&mut self) -> BoardNodes {
        let mut nodes = BoardNodes::default();
        nodes.hand = (0..self.hand.len()).map(|i| Self::node(0, 0, i)).collect();
        for a in 0..4 {
            nodes.discards[a] = (0..self.discards[a].len())
                .map(|i| Self::node(1, a, i))
                .collect();
            nodes.melds[a] = (0..self.melds[a].len())
                .map(|i| Self::node(2, a, i))
                .collect();
        }
        nodes
    }

    fn hand_tile(&self, node: NodeRef) -> Option<String> {
        let (_, _, i) = Self::unpack(node);
        self.hand.get(i).cloned()
    }

    fn discard_tile(&self, node: NodeRef) -> Option<DiscardTile> {
        let (_, a, i) = Self::unpack(node);
        self.discards[a].get(i).cloned()
    }

    fn meld_tiles(&self, node: NodeRef) -> Option<Vec<String>> {
        let (_, a, i) = Self::unpack(node);
        self.melds[a].get(i).cloned()
    }
}

#[cfg(test)]
fn discard(reg: &TileRegistry, symbol: &str, melded: bool) -> DiscardTile {
    let n = Notation::from_symbol(symbol).unwrap();
    DiscardTile {
        path: tile_texture_path(reg.texture_id_of(n).unwrap(), false),
        melded,
        immediate: false,
    }
}

#[test]
fn test_observe_board() {
    let reg = TileRegistry::build().unwrap();
    let path = |s: &str, hr: bool| {
        let n = Notation::from_symbol(s).unwrap();
        tile_texture_path(reg.texture_id_of(n).unwrap(), hr)
    };

    let mut crawler = TestCrawler::default();
    crawler.hand = vec![path("1m", true), path("9s", false)];
    crawler.discards[0] = vec![discard(&reg, "3p", false)];
    crawler.discards[1] = vec![
        discard(&reg, "7z", false),
        discard(&reg, "5s", true), // 鳴かれた牌は除外
    ];
    crawler.melds[1] = vec![vec![path("5s", true), path("5s", true), path("0s", true)]];

    let observed = observe_board(&reg, &mut crawler);
    let symbols: Vec<String> = observed.iter().map(|o| o.notation().to_string()).collect();

    // 固定の領域順: 手牌 -> 捨て牌(自家から) -> 鳴き
    assert_eq!(symbols, ["1m", "9s", "3p", "7z", "5s", "5s", "0s"]);
    assert_eq!(observed[0].area, BoardArea::Hand);
    assert_eq!(observed[2].area, BoardArea::DiscardSelf);
    assert_eq!(observed[4].area, BoardArea::MeldRight);
}

#[test]
fn test_observe_board_isolation() {
    let reg = TileRegistry::build().unwrap();

    let mut crawler = TestCrawler::default();
    crawler.hand = vec![
        "ui/uld/emj_background.tex".to_string(), // 牌以外のノード
        "ui/icon/076000/076300.tex".to_string(), // 未登録ID
        tile_texture_path("076049", false),      // 9m
    ];

    // 失敗したノードだけが除外される
    let observed = observe_board(&reg, &mut crawler);
    assert_eq!(observed.len(), 1);
    assert_eq!(observed[0].notation(), Notation(Suit::Man, 9));
}

#[test]
fn test_observe_board_empty() {
    let reg = TileRegistry::build().unwrap();
    let mut crawler = TestCrawler::default();
    assert!(observe_board(&reg, &mut crawler).is_empty());
}
