use crate::listener::Listener;
use crate::model::*;

// [CountPrinter]
// 残り枚数の一覧をコンソールに表示
#[derive(Debug)]
pub struct CountPrinter {
    verbose: bool,
}

impl CountPrinter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Listener for CountPrinter {
    fn notify_counts(&mut self, counts: &BoardCounts) {
        println!();
        if self.verbose {
            let mut notations: Vec<Notation> =
                counts.observed.iter().map(|o| o.notation()).collect();
            notations.sort();
            let symbols: Vec<String> = notations.iter().map(|n| n.to_string()).collect();
            println!("observed ({}): {}", symbols.len(), symbols.join(" "));
        } else {
            println!("observed: {} tiles", counts.observed.len());
        }

        for suit in Suit::SUITED {
            for rank in 1..=9 {
                print!("{}", cell(counts, Notation(suit, rank)));
            }
            println!("| {}: {}", suit, counts.suit_counts[&suit]);
        }

        // 風牌と三元牌
        for rank in WE..=DR {
            print!("{}", cell(counts, Notation(Suit::Honor, rank)));
        }
        println!();
    }
}

// 5の欄は赤を合算した実質の残り枚数
// 赤が残っていれば'*', 観測の過剰による負数は'!'を付す
fn cell(counts: &BoardCounts, n: Notation) -> String {
    let mut count = counts.remaining[&n];
    let mut red = false;
    if n.1 == 5 && !n.is_honor() {
        let r = counts.remaining[&Notation(n.0, 0)];
        count += r;
        red = r > 0;
    }

    let mark = if count < 0 {
        "!"
    } else if red {
        "*"
    } else {
        ""
    };
    format!("{}x{}{} ", n.unicode(), count, mark)
}
