use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::reader::{BoardNodes, DiscardTile, NodeCrawler, NodeRef};

// ブリッジが再描画ごとに送信する盤面スナップショット
// 各ノードはテクスチャパスとフラグのみを持つ
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub hand: Vec<String>,
    #[serde(default)]
    pub discards: [Vec<DiscardNode>; 4], // 自家 下家 対面 上家
    #[serde(default)]
    pub melds: [Vec<Vec<String>>; 4],
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscardNode {
    pub path: String,
    #[serde(default)]
    pub melded: bool,
    #[serde(default)]
    pub immediate: bool,
}

// [SharedBoard]
// 最新のスナップショットを保持する共有ボード
// ワーカはここから要求のたびに最新のノード参照を取り直す
#[derive(Debug, Clone, Default)]
pub struct SharedBoard {
    board: Arc<Mutex<BoardSnapshot>>,
}

impl SharedBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, snapshot: BoardSnapshot) {
        *self.board.lock().unwrap() = snapshot;
    }
}

// NodeRefには (種別, 領域, 位置) を詰める
const KIND_HAND: u64 = 0;
const KIND_DISCARD: u64 = 1;
const KIND_MELD: u64 = 2;

fn pack(kind: u64, area: usize, index: usize) -> NodeRef {
    kind << 32 | (area as u64) << 16 | index as u64
}

fn unpack(node: NodeRef) -> (u64, usize, usize) {
    (
        node >> 32,
        (node >> 16 & 0xffff) as usize,
        (node & 0xffff) as usize,
    )
}

impl NodeCrawler for SharedBoard {
    fn board_nodes(&mut self) -> BoardNodes {
        let b = self.board.lock().unwrap();
        let mut nodes = BoardNodes::default();
        nodes.hand = (0..b.hand.len()).map(|i| pack(KIND_HAND, 0, i)).collect();
        for a in 0..4 {
            nodes.discards[a] = (0..b.discards[a].len())
                .map(|i| pack(KIND_DISCARD, a, i))
                .collect();
            nodes.melds[a] = (0..b.melds[a].len())
                .map(|i| pack(KIND_MELD, a, i))
                .collect();
        }
        nodes
    }

    fn hand_tile(&self, node: NodeRef) -> Option<String> {
        let (kind, _, i) = unpack(node);
        if kind != KIND_HAND {
            return None;
        }
        self.board.lock().unwrap().hand.get(i).cloned()
    }

    fn discard_tile(&self, node: NodeRef) -> Option<DiscardTile> {
        let (kind, a, i) = unpack(node);
        if kind != KIND_DISCARD {
            return None;
        }
        let b = self.board.lock().unwrap();
        let node = b.discards.get(a)?.get(i)?;
        Some(DiscardTile {
            path: node.path.clone(),
            melded: node.melded,
            immediate: node.immediate,
        })
    }

    fn meld_tiles(&self, node: NodeRef) -> Option<Vec<String>> {
        let (kind, a, i) = unpack(node);
        if kind != KIND_MELD {
            return None;
        }
        let b = self.board.lock().unwrap();
        b.melds.get(a)?.get(i).cloned()
    }
}

#[test]
fn test_snapshot_decode() {
    let json = r#"{
        "hand": ["ui/icon/076000/076041_hr1.tex"],
        "discards": [[{"path": "ui/icon/076000/076050.tex", "melded": true}], [], [], []],
        "melds": [[], [["ui/icon/076000/076059.tex", "ui/icon/076000/076059.tex"]], [], []]
    }"#;
    let snapshot: BoardSnapshot = serde_json::from_str(json).unwrap();
    assert_eq!(snapshot.hand.len(), 1);
    assert!(snapshot.discards[0][0].melded);
    assert!(!snapshot.discards[0][0].immediate);
    assert_eq!(snapshot.melds[1][0].len(), 2);

    // 欠けた領域は空として扱う
    let snapshot: BoardSnapshot = serde_json::from_str(r#"{"hand": []}"#).unwrap();
    assert!(snapshot.discards.iter().all(|d| d.is_empty()));
}

#[test]
fn test_shared_board_crawl() {
    let board = SharedBoard::new();
    let mut snapshot = BoardSnapshot::default();
    snapshot.hand = vec!["a.tex".to_string(), "b.tex".to_string()];
    snapshot.discards[2] = vec![DiscardNode {
        path: "c.tex".to_string(),
        melded: false,
        immediate: true,
    }];
    snapshot.melds[3] = vec![vec!["d.tex".to_string(), "e.tex".to_string()]];
    board.update(snapshot);

    let mut crawler = board.clone();
    let nodes = crawler.board_nodes();
    assert_eq!(nodes.hand.len(), 2);
    assert_eq!(nodes.discards[2].len(), 1);
    assert_eq!(nodes.melds[3].len(), 1);

    assert_eq!(crawler.hand_tile(nodes.hand[1]).unwrap(), "b.tex");
    let discard = crawler.discard_tile(nodes.discards[2][0]).unwrap();
    assert_eq!(discard.path, "c.tex");
    assert!(discard.immediate);
    assert_eq!(
        crawler.meld_tiles(nodes.melds[3][0]).unwrap(),
        ["d.tex", "e.tex"]
    );

    // 参照の種別違いは観測なし
    assert!(crawler.hand_tile(nodes.discards[2][0]).is_none());

    // 更新で失効した参照も観測なしとして扱われる
    board.update(BoardSnapshot::default());
    assert!(crawler.hand_tile(nodes.hand[0]).is_none());
    assert!(crawler.discard_tile(nodes.discards[2][0]).is_none());
    assert!(crawler.meld_tiles(nodes.melds[3][0]).is_none());
}
