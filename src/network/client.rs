//! ハブ接続の実装
//!
//! このモジュールは、WebSocketを使用してゲームハブへ接続し、
//! 受信したフレームをゲームイベントに変換して受信キューへ積みます。
//! キューは毎フレーム取り出され、スプライトレジストリへ反映されます。
//! 再接続は行いません。

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;
use js_sys::Date;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use super::events::ServerEvent;
use super::protocol::{handshake_request, ping_frame, HubDecoder, HubFrame};
use super::ConnectionState;
use crate::error::ClientError;

type OpenResult = Result<(), ClientError>;

/// コールバック間で共有される接続状態
#[derive(Debug, Default)]
struct Shared {
    state: ConnectionState,
    decoder: HubDecoder,
    inbound: VecDeque<ServerEvent>,
    open_signal: Option<oneshot::Sender<OpenResult>>,
    last_sent: f64,
}

impl Shared {
    fn new(open_signal: oneshot::Sender<OpenResult>) -> Self {
        Self {
            state: ConnectionState::Connecting,
            open_signal: Some(open_signal),
            ..Self::default()
        }
    }

    /// 接続待ちの Future に結果を通知（最初の1回のみ）
    fn settle(&mut self, result: OpenResult) {
        if let Some(signal) = self.open_signal.take() {
            let _ = signal.send(result);
        }
    }

    /// エラー状態へ移行
    ///
    /// 接続待ちの間は結果を Future に渡し、ログは呼び出し側が1回だけ出します。
    /// 接続確立後のエラーはここでログに出します。
    fn fail(&mut self, error: ClientError) {
        self.state = ConnectionState::Error(error.to_string());
        match self.open_signal.take() {
            Some(signal) => {
                let _ = signal.send(Err(error));
            }
            None => log::error!("❌ {}", error),
        }
    }

    /// 受信テキストを処理
    fn handle_text(&mut self, text: &str) {
        #[cfg(feature = "debug_network")]
        log::debug!("📥 受信: {:?}", text);

        for frame in self.decoder.feed(text) {
            match frame {
                Ok(HubFrame::HandshakeAccepted) => {
                    log::info!("✅ ハンドシェイク完了");
                    self.state = ConnectionState::Connected;
                    self.settle(Ok(()));
                }
                Ok(HubFrame::Invocation { target, arguments }) => {
                    match ServerEvent::decode(&target, &arguments) {
                        Ok(Some(event)) => self.inbound.push_back(event),
                        Ok(None) => log::debug!("未知のイベントを無視: {}", target),
                        Err(err) => log::warn!("⚠️ イベントの解析に失敗: {}", err),
                    }
                }
                Ok(HubFrame::Ping) => log::trace!("Ping受信"),
                Ok(HubFrame::Close { error }) => {
                    match error {
                        Some(error) => log::warn!("サーバーが接続を閉じました: {}", error),
                        None => log::info!("サーバーが接続を閉じました"),
                    }
                    self.state = ConnectionState::Disconnected;
                    self.settle(Err(ClientError::Connection("ハンドシェイク前に切断されました".to_string())));
                }
                Ok(HubFrame::Ignored(kind)) => log::debug!("メッセージ種別 {} を無視", kind),
                Err(err) if !self.decoder.handshake_done() => self.fail(err.into()),
                Err(err) => log::warn!("⚠️ フレームの解析に失敗: {}", err),
            }
        }
    }

    fn keepalive_due(&self, now: f64, interval_ms: f64) -> bool {
        self.state == ConnectionState::Connected && now - self.last_sent >= interval_ms
    }
}

/// ゲームハブへの接続
pub struct HubConnection {
    socket: WebSocket,
    shared: Rc<RefCell<Shared>>,
    keepalive_interval_ms: f64,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl HubConnection {
    /// 接続を開始する
    ///
    /// 戻り値の Future はハンドシェイク完了で `Ok`、
    /// 接続エラー・拒否・切断で `Err` になります。
    pub fn open(
        url: &str,
        keepalive_interval_ms: u32,
    ) -> Result<(Self, impl Future<Output = OpenResult>), ClientError> {
        log::info!("🔌 サーバーに接続します: {}", url);

        let socket = WebSocket::new(url)
            .map_err(|e| ClientError::Connection(format!("WebSocket接続の作成に失敗: {:?}", e)))?;

        let (sender, receiver) = oneshot::channel();
        let shared = Rc::new(RefCell::new(Shared::new(sender)));

        // 接続が確立したらハンドシェイクを送る
        let open_socket = socket.clone();
        let open_shared = Rc::clone(&shared);
        let on_open = Closure::wrap(Box::new(move |_: Event| {
            let mut shared = open_shared.borrow_mut();
            match open_socket.send_with_str(&handshake_request()) {
                Ok(()) => {
                    shared.state = ConnectionState::Handshaking;
                    shared.last_sent = Date::now();
                }
                Err(err) => shared.fail(ClientError::Connection(format!(
                    "ハンドシェイクの送信に失敗: {:?}",
                    err
                ))),
            }
        }) as Box<dyn FnMut(Event)>);

        let message_shared = Rc::clone(&shared);
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            match event.data().as_string() {
                Some(text) => message_shared.borrow_mut().handle_text(&text),
                None => log::warn!("⚠️ テキスト以外のメッセージを無視しました"),
            }
        }) as Box<dyn FnMut(MessageEvent)>);

        let error_shared = Rc::clone(&shared);
        let on_error = Closure::wrap(Box::new(move |event: Event| {
            error_shared.borrow_mut().fail(ClientError::Connection(format!(
                "WebSocketエラー: {}",
                event.type_()
            )));
        }) as Box<dyn FnMut(Event)>);

        let close_shared = Rc::clone(&shared);
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            let mut shared = close_shared.borrow_mut();
            log::info!("WebSocket接続が閉じられました（コード: {}）{}", event.code(), event.reason());
            if !matches!(shared.state, ConnectionState::Error(_)) {
                shared.state = ConnectionState::Disconnected;
            }
            shared.settle(Err(ClientError::Connection(format!(
                "接続が閉じられました（コード: {}）",
                event.code()
            ))));
        }) as Box<dyn FnMut(CloseEvent)>);

        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        let connection = Self {
            socket,
            shared,
            keepalive_interval_ms: keepalive_interval_ms as f64,
            _on_open: on_open,
            _on_message: on_message,
            _on_error: on_error,
            _on_close: on_close,
        };

        let opened = async move {
            receiver
                .await
                .unwrap_or_else(|_| Err(ClientError::Connection("接続が破棄されました".to_string())))
        };

        Ok((connection, opened))
    }

    /// 受信済みのイベントを到着順にすべて取り出す
    pub fn drain_events(&self) -> Vec<ServerEvent> {
        self.shared.borrow_mut().inbound.drain(..).collect()
    }

    /// 一定時間何も送っていなければキープアライブを送る
    pub fn poll_keepalive(&self, now: f64) {
        if !self.shared.borrow().keepalive_due(now, self.keepalive_interval_ms) {
            return;
        }
        if let Err(err) = self.send_frame(&ping_frame(), now) {
            log::warn!("⚠️ キープアライブの送信に失敗: {}", err);
        }
    }

    fn send_frame(&self, frame: &str, now: f64) -> Result<(), ClientError> {
        self.socket
            .send_with_str(frame)
            .map_err(|e| ClientError::Connection(format!("送信エラー: {:?}", e)))?;
        self.shared.borrow_mut().last_sent = now;
        Ok(())
    }

    /// 接続状態を取得
    pub fn state(&self) -> ConnectionState {
        self.shared.borrow().state.clone()
    }

    /// 接続を閉じる
    pub fn close(&self) {
        if let Err(err) = self.socket.close() {
            log::warn!("⚠️ WebSocket接続のクローズに失敗: {:?}", err);
        }
        self.shared.borrow_mut().state = ConnectionState::Disconnected;
    }
}

impl Drop for HubConnection {
    fn drop(&mut self) {
        // 破棄済みのクロージャが呼ばれないようにハンドラを外す
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onerror(None);
        self.socket.set_onclose(None);
    }
}
