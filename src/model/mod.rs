// 牌と盤面のデータモデル
mod board;
mod define;
mod tile;

use std::fmt;

use serde::Serialize;

pub use board::*;
pub use define::*;
pub use tile::*;
