#![warn(rust_2018_idioms)]
// 構造的な意味合いや一貫性を保つために以下の警告は無効化
#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

mod app;
mod listener;
mod model;
mod reader;
mod registry;
mod util;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    match args[1].as_str() {
        "R" => {
            // Reader (ゲーム内ブリッジ接続モード)
            app::ReaderApp::new(args2).run();
        }
        "S" => {
            // Simulator (模擬盤面モード)
            app::SimulateApp::new(args2).run();
        }
        m => {
            error!("unknown mode: {}", m)
        }
    }
}
