use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use crate::info;
use crate::listener::Listener;
use crate::model::*;
use crate::reader::aggregate::observe_board;
use crate::reader::count::{suit_counts, CountTracker};
use crate::reader::crawler::NodeCrawler;
use crate::registry::TileRegistry;

// [WorkerState]
// Idle -> Running はトリガ時, Running -> Idle はサイクル完了時のみ遷移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Running,
}

// [ReaderWorker]
// 再描画シグナルごとに観測と集計を1サイクル実行するバックグラウンドワーカ
// 実行中に届いたトリガは破棄する (キューイングも統合もしない)
pub struct ReaderWorker {
    state: Arc<Mutex<WorkerState>>,
    counts: Arc<Mutex<Arc<BoardCounts>>>,
    trigger_tx: mpsc::Sender<()>,
}

impl ReaderWorker {
    pub fn spawn(
        registry: Arc<TileRegistry>,
        mut crawler: Box<dyn NodeCrawler>,
        mut listeners: Vec<Box<dyn Listener>>,
    ) -> Self {
        let tracker = CountTracker::new(registry.baseline().clone());

        // 初回サイクルまでは全量が残っているものとして公開
        let initial = Arc::new(BoardCounts {
            observed: vec![],
            remaining: tracker.baseline().clone(),
            suit_counts: suit_counts(tracker.baseline()),
        });

        let state = Arc::new(Mutex::new(WorkerState::Idle));
        let counts = Arc::new(Mutex::new(initial));
        let (trigger_tx, trigger_rx) = mpsc::channel();

        let worker_state = state.clone();
        let worker_counts = counts.clone();
        thread::spawn(move || {
            for _ in trigger_rx {
                let observed = observe_board(&registry, crawler.as_mut());
                let remaining = tracker.remaining_from_observed(&observed);
                let cycle = Arc::new(BoardCounts {
                    suit_counts: suit_counts(&remaining),
                    observed,
                    remaining,
                });

                // 観測列と両マップを単一のスナップショットとして公開
                *worker_counts.lock().unwrap() = cycle.clone();
                for l in &mut listeners {
                    l.notify_counts(&cycle);
                }
                *worker_state.lock().unwrap() = WorkerState::Idle;
            }
        });

        Self {
            state,
            counts,
            trigger_tx,
        }
    }

    // 再走査のトリガ 前サイクルが実行中の場合は破棄してfalseを返す
    pub fn trigger(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if *state == WorkerState::Running {
            info!("reader busy, trigger dropped");
            return false;
        }
        *state = WorkerState::Running;
        self.trigger_tx.send(()).unwrap();
        true
    }

    pub fn is_running(&self) -> bool {
        *self.state.lock().unwrap() == WorkerState::Running
    }

    // 最新のスナップショット 1サイクル分の整合が保証される
    pub fn counts(&self) -> Arc<BoardCounts> {
        self.counts.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> RemainingCounts {
        self.counts().remaining.clone()
    }

    pub fn suit_counts(&self) -> SuitRemainingCounts {
        self.counts().suit_counts.clone()
    }

    pub fn observed(&self) -> Vec<ObservedTile> {
        self.counts().observed.clone()
    }
}

#[cfg(test)]
use crate::reader::classify::tile_texture_path;
#[cfg(test)]
use crate::reader::crawler::{BoardNodes, DiscardTile, NodeRef};
#[cfg(test)]
use crate::util::misc::sleep;

// 走査開始を外部から解放するまで待機するテスト用クローラ
#[cfg(test)]
struct GateCrawler {
    gate: mpsc::Receiver<()>,
    hand: Vec<String>,
}

#[cfg(test)]
impl NodeCrawler for GateCrawler {
    fn board_nodes(&mut self) -> BoardNodes {
        self.gate.recv().unwrap();
        let mut nodes = BoardNodes::default();
        nodes.hand = (0..self.hand.len() as u64).collect();
        nodes
    }

    fn hand_tile(&self, node: NodeRef) -> Option<String> {
        self.hand.get(node as usize).cloned()
    }

    fn discard_tile(&self, _node: NodeRef) -> Option<DiscardTile> {
        None
    }

    fn meld_tiles(&self, _node: NodeRef) -> Option<Vec<String>> {
        None
    }
}

#[cfg(test)]
fn wait_idle(worker: &ReaderWorker) {
    while worker.is_running() {
        sleep(0.01);
    }
}

#[test]
fn test_worker_drops_trigger_while_running() {
    let reg = Arc::new(TileRegistry::build().unwrap());
    let (gate_tx, gate_rx) = mpsc::channel();
    let crawler = GateCrawler {
        gate: gate_rx,
        hand: vec![tile_texture_path("076041", true)], // 1m
    };
    let worker = ReaderWorker::spawn(reg.clone(), Box::new(crawler), vec![]);

    // 初期状態は基準枚数そのまま
    assert_eq!(&worker.remaining(), reg.baseline());
    assert!(worker.observed().is_empty());

    assert!(worker.trigger());
    assert!(worker.is_running());
    assert!(!worker.trigger()); // 実行中のトリガは破棄される
    assert!(!worker.trigger());

    gate_tx.send(()).unwrap();
    wait_idle(&worker);

    let counts = worker.counts();
    assert_eq!(counts.observed.len(), 1);
    assert_eq!(counts.remaining[&Notation::from_symbol("1m").unwrap()], 3);

    // 完了後は再びトリガを受け付ける
    assert!(worker.trigger());
    gate_tx.send(()).unwrap();
    wait_idle(&worker);
    assert_eq!(worker.observed().len(), 1);
}

#[test]
fn test_worker_snapshot_consistency() {
    let reg = Arc::new(TileRegistry::build().unwrap());
    let (gate_tx, gate_rx) = mpsc::channel();
    let crawler = GateCrawler {
        gate: gate_rx,
        hand: vec![
            tile_texture_path("076044", true),  // 4m
            tile_texture_path("076075", false), // 0m
        ],
    };
    let worker = ReaderWorker::spawn(reg, Box::new(crawler), vec![]);

    worker.trigger();
    gate_tx.send(()).unwrap();
    wait_idle(&worker);

    // スナップショット内の2つのマップは同一サイクル由来
    let counts = worker.counts();
    assert_eq!(suit_counts(&counts.remaining), counts.suit_counts);
    assert_eq!(worker.suit_counts()[&Suit::Man], 34);
}
