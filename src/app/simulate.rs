use std::sync::Arc;

use rand::prelude::*;

use super::board::{BoardSnapshot, DiscardNode, SharedBoard};
use crate::listener::{CountPrinter, Listener};
use crate::model::*;
use crate::reader::{tile_texture_path, ReaderWorker};
use crate::registry::TileRegistry;
use crate::util::misc::*;
use crate::{error, info};

// [App]
#[derive(Debug)]
pub struct SimulateApp {
    seed: u64,
    discards: usize, // 1人あたりの捨て牌数
    melds: usize,    // 鳴きの総数
    verbose: bool,
}

impl SimulateApp {
    pub fn new(args: Vec<String>) -> Self {
        let mut app = Self {
            seed: 0,
            discards: 6,
            melds: 2,
            verbose: false,
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => app.seed = next_value(&mut it, s),
                "-d" => app.discards = next_value(&mut it, s),
                "-m" => app.melds = next_value(&mut it, s),
                "-v" => app.verbose = true,
                opt => {
                    error!("unknown option: {}", opt);
                    std::process::exit(0);
                }
            }
        }

        if app.seed == 0 {
            app.seed = unixtime_now();
            info!(
                "Random seed is not specified. Unix timestamp '{}' is used as seed.",
                app.seed
            );
        }

        app
    }

    pub fn run(&mut self) {
        println!("seed: {}", self.seed);

        let registry = match TileRegistry::build() {
            Ok(reg) => Arc::new(reg),
            Err(e) => error_exit(e),
        };
        let mut rng: StdRng = rand::SeedableRng::seed_from_u64(self.seed);

        let board = SharedBoard::new();
        board.update(deal_board(&registry, &mut rng, self.discards, self.melds));

        let listeners: Vec<Box<dyn Listener>> =
            vec![Box::new(CountPrinter::new(self.verbose))];
        let worker = ReaderWorker::spawn(registry, Box::new(board.clone()), listeners);

        worker.trigger();
        while worker.is_running() {
            sleep(0.01);
        }
    }
}

// 混ぜた全136牌から模擬的な局面を配る
// 鳴きは3枚1組とし, 他家の鳴きでは鳴かれた牌を捨て牌側にも重複表示させる
fn deal_board(
    reg: &TileRegistry,
    rng: &mut StdRng,
    n_discards: usize,
    n_melds: usize,
) -> BoardSnapshot {
    let mut wall = vec![];
    for suit in Suit::SUITED {
        for rank in 1..=9 {
            let copies = if rank == 5 { 3 } else { 4 };
            for _ in 0..copies {
                wall.push(Notation(suit, rank));
            }
        }
        wall.push(Notation(suit, 0)); // 赤5
    }
    for rank in WE..=DR {
        for _ in 0..4 {
            wall.push(Notation(Suit::Honor, rank));
        }
    }
    assert_eq!(wall.len(), DECK_TILES);
    wall.shuffle(rng);

    // 高解像度版と基本版のパスを混在させる
    let path = |n: Notation, rng: &mut StdRng| {
        tile_texture_path(reg.texture_id_of(n).unwrap(), rng.gen_bool(0.5))
    };

    let mut snapshot = BoardSnapshot::default();
    for _ in 0..13 {
        let n = wall.pop().unwrap();
        snapshot.hand.push(path(n, rng));
    }

    for area in 0..4 {
        for _ in 0..n_discards {
            if let Some(n) = wall.pop() {
                snapshot.discards[area].push(DiscardNode {
                    path: path(n, rng),
                    melded: false,
                    immediate: rng.gen_bool(0.2), // ツモ切り
                });
            }
        }
    }

    for i in 0..n_melds {
        let area = i % 4;
        let mut group = vec![];
        let mut called = None;
        for _ in 0..3 {
            if let Some(n) = wall.pop() {
                group.push(path(n, rng));
                called = Some(n);
            }
        }
        if group.is_empty() {
            break;
        }

        if area != 0 {
            if let Some(n) = called {
                snapshot.discards[(area + 1) % 4].push(DiscardNode {
                    path: path(n, rng),
                    melded: true,
                    immediate: false,
                });
            }
        }
        snapshot.melds[area].push(group);
    }

    snapshot
}

#[cfg(test)]
use crate::reader::{observe_board, CountTracker};

#[test]
fn test_deal_board() {
    let reg = TileRegistry::build().unwrap();
    let mut rng: StdRng = rand::SeedableRng::seed_from_u64(7);

    let board = SharedBoard::new();
    board.update(deal_board(&reg, &mut rng, 6, 2));
    let mut crawler = board.clone();

    // 手牌13 + 捨て牌6x4 + 鳴き3x2 (鳴かれた牌の重複表示は数えない)
    let observed = observe_board(&reg, &mut crawler);
    assert_eq!(observed.len(), 13 + 24 + 6);

    let tracker = CountTracker::new(reg.baseline().clone());
    let remaining = tracker.remaining_from_observed(&observed);
    for (n, c) in &remaining {
        assert!(*c >= 0 && *c <= reg.baseline_count(*n));
    }
    assert_eq!(
        remaining.values().sum::<i32>(),
        DECK_TILES as i32 - observed.len() as i32
    );
}
