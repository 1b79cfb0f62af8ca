use std::fmt;

// ホストUI要素への不透明な参照
pub type NodeRef = u64;

// [BoardNodes]
// 領域ごとのノード参照列 要求のたびに取り直す
#[derive(Debug, Clone, Default)]
pub struct BoardNodes {
    pub hand: Vec<NodeRef>,
    pub discards: [Vec<NodeRef>; 4], // 自家 下家 対面 上家
    pub melds: [Vec<NodeRef>; 4],
}

// [DiscardTile]
// 捨て牌ノードから抽出した1枚分の情報
// meldedは鳴かれて鳴き領域側にも表示されている牌を示す
#[derive(Debug, Clone)]
pub struct DiscardTile {
    pub path: String,
    pub melded: bool,
    pub immediate: bool, // ツモ切り (診断表示用)
}

// UIツリーの走査はホスト側の責務
// 参照が失効している場合はNoneを返し, その要素は観測なしとして扱われる
pub trait NodeCrawler: Send {
    fn board_nodes(&mut self) -> BoardNodes;
    fn hand_tile(&self, node: NodeRef) -> Option<String>;
    fn discard_tile(&self, node: NodeRef) -> Option<DiscardTile>;
    fn meld_tiles(&self, node: NodeRef) -> Option<Vec<String>>; // 鳴きは1ノードに2〜4枚
}

impl fmt::Debug for dyn NodeCrawler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeCrawler")
    }
}
