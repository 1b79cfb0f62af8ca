// 盤面の観測と残り枚数の集計
mod aggregate;
mod classify;
mod count;
mod crawler;
mod worker;

pub use aggregate::*;
pub use classify::*;
pub use count::*;
pub use crawler::*;
pub use worker::*;
