use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::board::{BoardSnapshot, SharedBoard};
use crate::listener::{CountPrinter, CountWriter, Listener};
use crate::reader::ReaderWorker;
use crate::registry::TileRegistry;
use crate::util::connection::{Connection, Message, WsConnection};
use crate::util::misc::*;
use crate::{debug, error, warn};

// ブリッジからの受信メッセージ
#[derive(Debug, Deserialize)]
struct BridgeMessage {
    id: String,
    #[serde(default)]
    data: Value,
}

// [App]
#[derive(Debug)]
pub struct ReaderApp {
    port: u32,
    write: bool,
    quiet: bool,
    verbose: bool,
}

impl ReaderApp {
    pub fn new(args: Vec<String>) -> Self {
        let mut app = Self {
            port: super::BRIDGE_PORT,
            write: false,
            quiet: false,
            verbose: false,
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-port" => app.port = next_value(&mut it, s),
                "-w" => app.write = true,
                "-q" => app.quiet = true,
                "-v" => app.verbose = true,
                opt => {
                    error!("unknown option: {}", opt);
                    std::process::exit(0);
                }
            }
        }

        app
    }

    pub fn run(&mut self) {
        // 対応表が構築できない場合は全ての前提が崩れるため起動しない
        let registry = match TileRegistry::build() {
            Ok(reg) => Arc::new(reg),
            Err(e) => error_exit(e),
        };

        let board = SharedBoard::new();
        let mut listeners: Vec<Box<dyn Listener>> = vec![];
        if !self.quiet {
            listeners.push(Box::new(CountPrinter::new(self.verbose)));
        }
        if self.write {
            listeners.push(Box::new(CountWriter::new()));
        }
        let worker = ReaderWorker::spawn(registry, Box::new(board.clone()), listeners);

        let mut conn = WsConnection::new(&format!("127.0.0.1:{}", self.port));
        loop {
            match conn.recv() {
                Message::Open => {
                    let msg = r#"{"id": "id_board", "op": "subscribe", "data": "board"}"#;
                    conn.send(msg);
                }
                Message::Text(t) => match serde_json::from_str::<BridgeMessage>(&t) {
                    Ok(msg) => {
                        if msg.id == "id_board" {
                            apply(&board, &worker, msg.data);
                        }
                    }
                    Err(e) => warn!("invalid bridge message: {}", e),
                },
                _ => {}
            }

            sleep(0.01);
        }
    }
}

// 盤面の更新を共有ボードに反映して再走査をトリガ
fn apply(board: &SharedBoard, worker: &ReaderWorker, data: Value) {
    match serde_json::from_value::<BoardSnapshot>(data) {
        Ok(snapshot) => {
            debug!("board update: {} hand nodes", snapshot.hand.len());
            board.update(snapshot);
            worker.trigger(); // 前サイクル実行中の場合このシグナルは破棄される
        }
        Err(e) => warn!("invalid board snapshot: {}", e),
    }
}
