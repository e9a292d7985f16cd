//! ハブプロトコル（JSON）の定義
//!
//! このモジュールは、ゲームハブとの間で交換されるフレームの形式と
//! 解析処理を定義します。各レコードはJSONで、レコード区切り文字 `0x1E` で終わります。
//! 最初に受信するレコードはハンドシェイク応答です。

use serde::Deserialize;
use serde_json::Value;

use crate::error::ProtocolError;

/// レコード区切り文字
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// 呼び出し
const MESSAGE_TYPE_INVOCATION: u8 = 1;
/// Ping
const MESSAGE_TYPE_PING: u8 = 6;
/// 切断通知
const MESSAGE_TYPE_CLOSE: u8 = 7;

/// ハンドシェイク要求フレーム
pub fn handshake_request() -> String {
    format!(r#"{{"protocol":"json","version":1}}{}"#, RECORD_SEPARATOR)
}

/// キープアライブ用のPingフレーム
pub fn ping_frame() -> String {
    format!(r#"{{"type":{}}}{}"#, MESSAGE_TYPE_PING, RECORD_SEPARATOR)
}

/// 受信したフレーム
#[derive(Debug, Clone, PartialEq)]
pub enum HubFrame {
    /// ハンドシェイクが受理された
    HandshakeAccepted,
    /// サーバーからの呼び出し
    Invocation {
        /// イベント名
        target: String,
        /// 引数
        arguments: Vec<Value>,
    },
    /// Ping
    Ping,
    /// サーバーからの切断通知
    Close {
        /// エラーメッセージ（ある場合）
        error: Option<String>,
    },
    /// 処理対象外のメッセージ種別
    Ignored(u8),
}

#[derive(Debug, Deserialize)]
struct HandshakeResponse {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawHubMessage {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    arguments: Vec<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// 受信データをレコード単位に分割して解析するデコーダー
///
/// WebSocketの1メッセージに複数レコードが含まれる場合や、
/// レコードが途中で分割されている場合も扱えます。
#[derive(Debug, Default)]
pub struct HubDecoder {
    buffer: String,
    handshake_done: bool,
}

impl HubDecoder {
    /// 新しいデコーダーを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ハンドシェイク応答を受信済みか
    pub fn handshake_done(&self) -> bool {
        self.handshake_done
    }

    /// 受信テキストを追加し、完結したレコードを解析して返す
    pub fn feed(&mut self, text: &str) -> Vec<Result<HubFrame, ProtocolError>> {
        self.buffer.push_str(text);

        let Some(last_separator) = self.buffer.rfind(RECORD_SEPARATOR) else {
            return Vec::new();
        };
        let rest = self.buffer.split_off(last_separator + RECORD_SEPARATOR.len_utf8());
        let complete = std::mem::replace(&mut self.buffer, rest);

        complete
            .split(RECORD_SEPARATOR)
            .filter(|record| !record.trim().is_empty())
            .map(|record| self.parse_record(record))
            .collect()
    }

    fn parse_record(&mut self, record: &str) -> Result<HubFrame, ProtocolError> {
        if !self.handshake_done {
            parse_handshake(record)?;
            self.handshake_done = true;
            return Ok(HubFrame::HandshakeAccepted);
        }
        parse_message(record)
    }
}

/// ハンドシェイク応答を解析
pub fn parse_handshake(record: &str) -> Result<(), ProtocolError> {
    let response: HandshakeResponse = serde_json::from_str(record)?;
    match response.error {
        Some(error) => Err(ProtocolError::HandshakeRejected(error)),
        None => Ok(()),
    }
}

/// ハンドシェイク後のメッセージを解析
pub fn parse_message(record: &str) -> Result<HubFrame, ProtocolError> {
    let raw: RawHubMessage = serde_json::from_str(record)?;

    match raw.kind {
        MESSAGE_TYPE_INVOCATION => {
            let target = raw.target.ok_or(ProtocolError::MissingTarget)?;
            Ok(HubFrame::Invocation {
                target,
                arguments: raw.arguments,
            })
        }
        MESSAGE_TYPE_PING => Ok(HubFrame::Ping),
        MESSAGE_TYPE_CLOSE => Ok(HubFrame::Close { error: raw.error }),
        other => Ok(HubFrame::Ignored(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(body: &str) -> String {
        format!("{}{}", body, RECORD_SEPARATOR)
    }

    #[test]
    fn test_outbound_frames() {
        assert_eq!(handshake_request(), "{\"protocol\":\"json\",\"version\":1}\u{1e}");
        assert_eq!(ping_frame(), "{\"type\":6}\u{1e}");
    }

    #[test]
    fn test_handshake_then_invocation() {
        let mut decoder = HubDecoder::new();
        let text = format!(
            "{}{}",
            record("{}"),
            record(r#"{"type":1,"target":"playerMoved","arguments":["p1",10.5,20]}"#)
        );

        let frames = decoder.feed(&text);

        assert!(decoder.handshake_done());
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], Ok(HubFrame::HandshakeAccepted));
        assert_eq!(
            frames[1],
            Ok(HubFrame::Invocation {
                target: "playerMoved".to_string(),
                arguments: vec![json!("p1"), json!(10.5), json!(20)],
            })
        );
    }

    #[test]
    fn test_handshake_rejected() {
        let mut decoder = HubDecoder::new();

        let frames = decoder.feed(&record(r#"{"error":"Requested protocol 'json' is not available."}"#));

        assert!(matches!(frames[0], Err(ProtocolError::HandshakeRejected(_))));
        assert!(!decoder.handshake_done());
    }

    #[test]
    fn test_partial_record_is_buffered() {
        let mut decoder = HubDecoder::new();
        decoder.feed(&record("{}"));

        assert!(decoder.feed(r#"{"type":1,"target":"bullet"#).is_empty());
        let frames = decoder.feed(&record(r#"Removed","arguments":["b1"]}"#));

        assert_eq!(
            frames,
            vec![Ok(HubFrame::Invocation {
                target: "bulletRemoved".to_string(),
                arguments: vec![json!("b1")],
            })]
        );
    }

    #[test]
    fn test_ping_close_and_other_types() {
        let mut decoder = HubDecoder::new();
        decoder.feed(&record("{}"));

        let text = format!(
            "{}{}{}",
            record(r#"{"type":6}"#),
            record(r#"{"type":7,"error":"Server shutting down"}"#),
            record(r#"{"type":3,"invocationId":"1","result":null}"#)
        );
        let frames = decoder.feed(&text);

        assert_eq!(frames[0], Ok(HubFrame::Ping));
        assert_eq!(
            frames[1],
            Ok(HubFrame::Close {
                error: Some("Server shutting down".to_string())
            })
        );
        assert_eq!(frames[2], Ok(HubFrame::Ignored(3)));
    }

    #[test]
    fn test_malformed_record_does_not_stop_others() {
        let mut decoder = HubDecoder::new();
        decoder.feed(&record("{}"));

        let text = format!("{}{}", record("{not json"), record(r#"{"type":1}"#));
        let frames = decoder.feed(&text);

        assert!(matches!(frames[0], Err(ProtocolError::Json(_))));
        assert_eq!(frames[1], Err(ProtocolError::MissingTarget));
    }
}
