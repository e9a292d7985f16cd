//! ロギングユーティリティモジュール
//!
//! `log` クレートのマクロ出力を `wasm-logger` 経由でブラウザのコンソールへ流します。

use std::sync::Once;

static INIT: Once = Once::new();

/// 設定文字列からログレベルを解釈
///
/// 解釈できない場合は `Info` を返します。
pub fn parse_level(level: &str) -> log::Level {
    match level.trim().to_ascii_lowercase().as_str() {
        "error" => log::Level::Error,
        "warn" | "warning" => log::Level::Warn,
        "debug" => log::Level::Debug,
        "trace" => log::Level::Trace,
        _ => log::Level::Info,
    }
}

/// ロギング初期化
///
/// 複数回呼ばれても最初の1回だけが有効です。
pub fn init_logging(level: log::Level) {
    INIT.call_once(|| {
        wasm_logger::init(wasm_logger::Config::new(level));
        log::info!("ロガーが初期化されました (最小レベル: {:?})", level);
    });
}
