//! 小惑星シューティングのブラウザ描画クライアント
//!
//! ローカルで物理を計算するプロトタイプ（[`game::Prototype`]）と、
//! サーバーから届いた位置を描画するだけのネットワーククライアント（[`NetworkedClient`]）を提供します。

use js_sys::{Date, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

// モジュール宣言
pub mod config;
pub mod error;
pub mod game;
pub mod network;
pub mod rendering;
pub mod utils;

use config::ClientConfig;
use error::ClientError;
use network::{apply_all, HubConnection};
use rendering::{AssetCache, Renderer, SpriteRegistry};
use utils::{init_logging, parse_level};

// 初期化用のエントリーポイント
#[wasm_bindgen(start)]
pub fn start() {
    // エラーをコンソールにパニックフックとして表示
    console_error_panic_hook::set_once();
}

/// サーバーから届いたスプライト位置を描画するクライアント
#[wasm_bindgen]
pub struct NetworkedClient {
    config: ClientConfig,
    renderer: Renderer,
    assets: AssetCache,
    registry: SpriteRegistry,
    connection: Option<HubConnection>,
}

#[wasm_bindgen]
impl NetworkedClient {
    /// 新しいクライアントを作成
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>) -> Result<NetworkedClient, JsValue> {
        let config = ClientConfig::from_optional_json(config_json)?;
        init_logging(parse_level(&config.log_level));

        let renderer = Renderer::new(canvas_id)?;
        let assets = AssetCache::load(&config.assets)?;

        Ok(NetworkedClient {
            config,
            renderer,
            assets,
            registry: SpriteRegistry::new(),
            connection: None,
        })
    }

    /// サーバーに接続
    ///
    /// ハンドシェイク完了で解決し、失敗した場合はログを出して reject される Promise を返します。
    /// 再接続は行いません。
    pub fn connect(&mut self) -> Promise {
        if let Some(previous) = self.connection.take() {
            previous.close();
        }

        match HubConnection::open(&self.config.server_url, self.config.keepalive_interval_ms) {
            Ok((connection, opened)) => {
                self.connection = Some(connection);
                future_to_promise(async move {
                    match opened.await {
                        Ok(()) => {
                            log::info!("✅ サーバーに接続しました");
                            Ok(JsValue::UNDEFINED)
                        }
                        Err(err) => {
                            log::error!("❌ 接続に失敗しました: {}", err);
                            Err(err.into())
                        }
                    }
                })
            }
            Err(err) => {
                log::error!("❌ 接続に失敗しました: {}", err);
                Promise::reject(&err.into())
            }
        }
    }

    /// 受信イベントを反映して1フレーム描画
    pub fn frame(&mut self) -> Result<(), JsValue> {
        if let Some(connection) = &self.connection {
            apply_all(&mut self.registry, connection.drain_events());
            connection.poll_keepalive(Date::now());
        }

        self.render()?;
        Ok(())
    }

    /// 登録済みスプライトの数
    pub fn sprite_count(&self) -> usize {
        self.registry.len()
    }

    /// 接続状態
    pub fn connection_state(&self) -> String {
        self.connection
            .as_ref()
            .map(|connection| connection.state().as_str())
            .unwrap_or("disconnected")
            .to_string()
    }

    /// サーバーから切断し、すべてのスプライトを取り外す
    pub fn disconnect(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
            log::info!("サーバーから切断しました");
        }
        self.registry.clear();
    }
}

impl NetworkedClient {
    fn render(&self) -> Result<(), ClientError> {
        self.renderer.clear();
        self.renderer.draw_registry(&self.registry, &self.assets)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn create_canvas(id: &str) -> web_sys::Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document.create_element("canvas").unwrap();
        canvas.set_id(id);
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    fn remove_canvas(canvas: &web_sys::Element) {
        let document = web_sys::window().unwrap().document().unwrap();
        document.body().unwrap().remove_child(canvas).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_frame_without_connection() {
        let canvas = create_canvas("networked_canvas");

        let mut client = NetworkedClient::new("networked_canvas", None).unwrap();
        assert!(client.frame().is_ok());
        assert_eq!(client.sprite_count(), 0);
        assert_eq!(client.connection_state(), "disconnected");

        remove_canvas(&canvas);
    }

    #[wasm_bindgen_test]
    async fn test_connect_to_unreachable_server_rejects() {
        let canvas = create_canvas("unreachable_canvas");
        let config = r#"{"server_url": "ws://127.0.0.1:9/game"}"#.to_string();

        let mut client = NetworkedClient::new("unreachable_canvas", Some(config)).unwrap();
        let result = JsFuture::from(client.connect()).await;

        assert!(result.is_err());
        let state = client.connection_state();
        assert!(state == "error" || state == "disconnected", "state: {}", state);
        assert!(client.frame().is_ok());
        assert_eq!(client.sprite_count(), 0);

        client.disconnect();
        assert_eq!(client.connection_state(), "disconnected");
        remove_canvas(&canvas);
    }

    #[wasm_bindgen_test]
    fn test_invalid_config_is_rejected() {
        let canvas = create_canvas("invalid_config_canvas");
        let config = r#"{"prototype": {"speed_limit": -1}}"#.to_string();

        assert!(NetworkedClient::new("invalid_config_canvas", Some(config)).is_err());

        remove_canvas(&canvas);
    }
}
