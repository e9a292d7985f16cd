//! ネットワークモジュール
//!
//! このモジュールはWebSocketを使用したゲームハブからのイベント受信を実装します。
//! クライアントはサーバーから届いた位置を描画するだけで、ゲームロジックの権限は持ちません。
//! ゲームイベントの送信は行いません。

pub mod client;
pub mod events;
pub mod protocol;

pub use client::HubConnection;
pub use events::{apply_all, ServerEvent};
pub use protocol::{HubDecoder, HubFrame};

/// 接続状態を表す列挙型
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConnectionState {
    /// 切断状態
    #[default]
    Disconnected,
    /// 接続試行中
    Connecting,
    /// ハンドシェイク応答待ち
    Handshaking,
    /// 接続済み
    Connected,
    /// エラー発生
    Error(String),
}

impl ConnectionState {
    /// JavaScript へ返す状態名
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Handshaking => "handshaking",
            ConnectionState::Connected => "connected",
            ConnectionState::Error(_) => "error",
        }
    }
}
