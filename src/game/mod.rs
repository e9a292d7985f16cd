//! ゲームモジュール
//!
//! ローカルで物理と入力を処理するスタンドアロンのプロトタイプです。
//! サーバーには接続しません。

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::config::ClientConfig;
use crate::rendering::{AssetCache, Renderer, Sprite, SpriteArt};
use crate::utils::{init_logging, parse_level};

pub mod collision; // 衝突判定
pub mod entities;  // アクター
pub mod input;     // キーボードとマウスの状態
pub mod integrator; // 1フレーム分の移動処理
pub mod state;     // ゲーム状態

pub use entities::Actor;
pub use state::{PrototypeWorld, StepOutcome};

/// プロトタイプのゲームインスタンス
///
/// JavaScript 側の `requestAnimationFrame` から毎フレーム `frame()` を呼びます。
#[wasm_bindgen]
pub struct Prototype {
    world: PrototypeWorld,
    renderer: Renderer,
    assets: AssetCache,
}

#[wasm_bindgen]
impl Prototype {
    /// 新しいプロトタイプを作成します。
    ///
    /// # 引数
    ///
    /// * `canvas_id` - 描画先キャンバスのID
    /// * `config_json` - 設定（JSON文字列、省略可）
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>) -> Result<Prototype, JsValue> {
        let config = ClientConfig::from_optional_json(config_json)?;
        init_logging(parse_level(&config.log_level));

        let renderer = Renderer::new(canvas_id)?;
        let assets = AssetCache::load(&config.assets)?;
        let mut rng = SmallRng::from_entropy();
        let world = PrototypeWorld::new(config.prototype, renderer.size(), &mut rng);

        log::info!(
            "🎮 プロトタイプを開始: 小惑星 {} 個",
            world.asteroids().len()
        );

        Ok(Prototype { world, renderer, assets })
    }

    /// キーボードイベントを処理します。
    ///
    /// # 引数
    ///
    /// * `event` - keydown / keyup イベント
    /// * `pressed` - keydown なら true
    pub fn handle_key_event(&mut self, event: &web_sys::KeyboardEvent, pressed: bool) {
        self.world.handle_key(&event.code(), pressed);
    }

    /// マウス移動を処理します。
    pub fn handle_mouse_move(&mut self, event: &web_sys::MouseEvent) {
        self.world
            .handle_mouse_move(event.client_x() as f64, event.client_y() as f64);
    }

    /// 1フレーム進めて描画します。
    pub fn frame(&mut self) -> Result<(), JsValue> {
        let (width, height) = self.renderer.size();
        self.world.set_screen_size(width, height);

        let outcome = self.world.step();
        if outcome.collided {
            log::info!("💥 小惑星に衝突しました");
        }

        self.render()?;
        Ok(())
    }

    /// 現在の弾の数
    pub fn bullet_count(&self) -> usize {
        self.world.bullet_count()
    }
}

impl Prototype {
    fn render(&self) -> Result<(), crate::error::ClientError> {
        self.renderer.clear();

        let controlled = self.world.controlled_player().map(|p| p.id.as_str());
        for player in self.world.players() {
            let art = if Some(player.id.as_str()) == controlled {
                SpriteArt::Player
            } else {
                SpriteArt::RemotePlayer
            };
            self.draw_actor(player, art)?;
        }
        for asteroid in self.world.asteroids() {
            self.draw_actor(asteroid, SpriteArt::Asteroid)?;
        }
        for bullet in self.world.bullets() {
            self.draw_actor(bullet, SpriteArt::Bullet)?;
        }

        Ok(())
    }

    fn draw_actor(&self, actor: &Actor, art: SpriteArt) -> Result<(), crate::error::ClientError> {
        let sprite = Sprite::new(art, actor.position.x, actor.position.y).with_rotation(actor.rotation);
        self.renderer.draw_sprite(&sprite, &self.assets)
    }
}
