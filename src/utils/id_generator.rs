//! ID生成ユーティリティモジュール
//!
//! プロトタイプで生成する小惑星や弾に付けるランダムなIDを作成します。

use uuid::Uuid;

/// ランダムなアクターIDを生成
pub fn random_actor_id() -> String {
    Uuid::new_v4().to_string()
}
