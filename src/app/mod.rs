// mainから直接呼び出すアプリケーションの動作モード(R, S)のモジュール
mod board;
mod reader;
mod simulate;

pub use reader::ReaderApp;
pub use simulate::SimulateApp;

// ゲーム内ブリッジの既定ポート
pub const BRIDGE_PORT: u32 = 52899;
