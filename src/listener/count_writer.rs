use serde_json::json;

use crate::error;
use crate::listener::Listener;
use crate::model::*;
use crate::util::misc::{unixtime_now, write_to_file};

// [CountWriter]
// サイクルごとのスナップショットをJSONで保存
#[derive(Debug)]
pub struct CountWriter {
    start_time: u64,
    cycle_index: i32,
}

impl CountWriter {
    pub fn new() -> Self {
        Self {
            start_time: unixtime_now(),
            cycle_index: 0,
        }
    }
}

impl Listener for CountWriter {
    fn notify_counts(&mut self, counts: &BoardCounts) {
        let res = write_to_file(
            &format!("data/{}/{:03}.json", self.start_time, self.cycle_index),
            &serde_json::to_string_pretty(&json!(counts)).unwrap(),
        );
        if let Err(e) = res {
            error!("{}", e);
        }
        self.cycle_index += 1;
    }
}
