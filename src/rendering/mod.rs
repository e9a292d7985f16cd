//! レンダリングシステムモジュール
//!
//! このモジュールは、ゲームの2Dレンダリングを担当します。
//! キャンバスへのスプライト描画と、アクターIDからスプライトへの対応表を管理します。

mod assets;
mod registry;
mod sprite;

pub use assets::*;
pub use registry::*;
pub use sprite::*;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::ClientError;

/// 背景色
const BACKGROUND_COLOR: &str = "#000000";

/// レンダラー構造体
///
/// キャンバスとコンテキストを管理し、描画コマンドを実行します。
pub struct Renderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Renderer {
    /// 新しいレンダラーを作成
    pub fn new(canvas_id: &str) -> Result<Renderer, ClientError> {
        let document = web_sys::window()
            .ok_or_else(|| ClientError::Dom("window not available".to_string()))?
            .document()
            .ok_or_else(|| ClientError::Dom("document not available".to_string()))?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| ClientError::Dom(format!("canvas not found: {}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ClientError::Dom(format!("element is not a canvas: {}", canvas_id)))?;

        let context = canvas
            .get_context("2d")
            .map_err(|e| ClientError::dom("2Dコンテキストの取得に失敗", e))?
            .ok_or_else(|| ClientError::Dom("Failed to get 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ClientError::Dom("context is not 2d".to_string()))?;

        log::info!("✅ レンダラー初期化: キャンバス {}x{}", canvas.width(), canvas.height());

        Ok(Renderer { canvas, context })
    }

    /// キャンバスのサイズを取得
    pub fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    /// キャンバスを背景色で塗りつぶす
    pub fn clear(&self) {
        let (width, height) = self.size();
        self.context.clear_rect(0.0, 0.0, width, height);
        self.context.set_fill_style_str(BACKGROUND_COLOR);
        self.context.fill_rect(0.0, 0.0, width, height);
    }

    /// レジストリのスプライトを作成順に描画
    pub fn draw_registry(&self, registry: &SpriteRegistry, assets: &AssetCache) -> Result<(), ClientError> {
        for (_, sprite) in registry.draw_order() {
            self.draw_sprite(sprite, assets)?;
        }
        Ok(())
    }

    /// スプライトを描画
    pub fn draw_sprite(&self, sprite: &Sprite, assets: &AssetCache) -> Result<(), ClientError> {
        self.context.save();
        let result = self.draw_transformed(sprite, assets);
        self.context.restore();
        result
    }

    fn draw_transformed(&self, sprite: &Sprite, assets: &AssetCache) -> Result<(), ClientError> {
        self.context
            .translate(sprite.x, sprite.y)
            .map_err(|e| ClientError::dom("translate", e))?;
        if sprite.rotation != 0.0 {
            self.context
                .rotate(sprite.rotation)
                .map_err(|e| ClientError::dom("rotate", e))?;
        }

        match (sprite.art, assets.image(sprite.art)) {
            (SpriteArt::Bullet, _) => {
                self.fill_square(sprite, SpriteArt::Bullet.placeholder_color(), assets.bullet_size());
            }
            (_, Some(image)) => {
                let width = image.natural_width() as f64;
                let height = image.natural_height() as f64;
                self.context
                    .draw_image_with_html_image_element(
                        image,
                        -width * sprite.anchor_x,
                        -height * sprite.anchor_y,
                    )
                    .map_err(|e| ClientError::dom("drawImage", e))?;
            }
            (art, None) => {
                self.fill_square(sprite, art.placeholder_color(), assets.placeholder_size());
            }
        }

        Ok(())
    }

    fn fill_square(&self, sprite: &Sprite, color: &str, size: f64) {
        self.context.set_fill_style_str(color);
        self.context
            .fill_rect(-size * sprite.anchor_x, -size * sprite.anchor_y, size, size);
    }
}
