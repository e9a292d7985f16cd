//! エラー型の定義
//!
//! クライアント全体で使用するエラー型をまとめています。
//! `wasm_bindgen` でエクスポートされる関数は `JsValue` へ変換して返します。

use thiserror::Error;
use wasm_bindgen::JsValue;

/// クライアントエラー
#[derive(Debug, Error)]
pub enum ClientError {
    /// DOM 要素やブラウザ API が取得できない
    #[error("DOMエラー: {0}")]
    Dom(String),
    /// 接続エラー
    #[error("接続エラー: {0}")]
    Connection(String),
    /// ハブプロトコルの解析エラー
    #[error("プロトコルエラー: {0}")]
    Protocol(#[from] ProtocolError),
    /// 設定の解析エラー
    #[error("設定エラー: {0}")]
    Config(#[from] serde_json::Error),
    /// 設定値が範囲外
    #[error("設定値が不正です: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// `JsValue` で返されたブラウザ側のエラーを DOM エラーに変換
    pub fn dom(context: &str, err: JsValue) -> Self {
        ClientError::Dom(format!("{}: {:?}", context, err))
    }
}

impl From<ClientError> for JsValue {
    fn from(err: ClientError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// ハブプロトコルのフレームやイベント引数の解析エラー
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// JSON として解析できない
    #[error("JSON解析エラー: {0}")]
    Json(String),
    /// ハンドシェイクがサーバーに拒否された
    #[error("ハンドシェイク拒否: {0}")]
    HandshakeRejected(String),
    /// 呼び出しメッセージにターゲット名がない
    #[error("呼び出しメッセージにtargetがありません")]
    MissingTarget,
    /// イベント引数が足りない
    #[error("イベント {event} の引数が不足しています（{expected}個必要、{actual}個受信）")]
    MissingArgument {
        /// イベント名
        event: String,
        /// 必要な引数の数
        expected: usize,
        /// 実際の引数の数
        actual: usize,
    },
    /// イベント引数の型が不正
    #[error("イベント {event} の引数 {index} の型が不正です")]
    InvalidArgument {
        /// イベント名
        event: String,
        /// 引数の位置
        index: usize,
    },
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::Json(err.to_string())
    }
}
