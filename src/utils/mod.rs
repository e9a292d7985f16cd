//! ユーティリティモジュール
//!
//! このモジュールには、ゲーム全体で使用される一般的なユーティリティ関数や構造体が含まれています。

pub mod math;
pub mod id_generator;
pub mod logger;

// サブモジュールの再エクスポート
pub use math::*;
pub use id_generator::*;
pub use logger::*;
