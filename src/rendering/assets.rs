//! 画像アセットの読み込み
//!
//! スプライトの見た目ごとに `HtmlImageElement` を1つだけ作成して使い回します。
//! 読み込み中や失敗した画像の代わりに、描画側がプレースホルダーを描きます。

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlImageElement};

use super::sprite::SpriteArt;
use crate::config::AssetConfig;
use crate::error::ClientError;

/// 画像キャッシュ
pub struct AssetCache {
    images: HashMap<SpriteArt, HtmlImageElement>,
    bullet_size: f64,
    placeholder_size: f64,
    _on_error: Vec<Closure<dyn FnMut(Event)>>,
}

impl AssetCache {
    /// 設定されたパスから画像の読み込みを開始する
    pub fn load(config: &AssetConfig) -> Result<Self, ClientError> {
        let sources = [
            (SpriteArt::Player, config.player_image.as_str()),
            (SpriteArt::RemotePlayer, config.remote_player_image.as_str()),
            (SpriteArt::Asteroid, config.asteroid_image.as_str()),
        ];

        let mut images = HashMap::new();
        let mut on_error = Vec::with_capacity(sources.len());
        for (art, src) in sources {
            let (image, handler) = load_image(src)?;
            images.insert(art, image);
            on_error.push(handler);
        }

        Ok(Self {
            images,
            bullet_size: config.bullet_size,
            placeholder_size: config.placeholder_size,
            _on_error: on_error,
        })
    }

    /// 描画可能な画像を取得
    ///
    /// 読み込みが終わっていない場合は `None` を返します。
    pub fn image(&self, art: SpriteArt) -> Option<&HtmlImageElement> {
        self.images
            .get(&art)
            .filter(|image| image.complete() && image.natural_width() > 0)
    }

    /// 弾の一辺の長さ
    pub fn bullet_size(&self) -> f64 {
        self.bullet_size
    }

    /// プレースホルダーの一辺の長さ
    pub fn placeholder_size(&self) -> f64 {
        self.placeholder_size
    }
}

impl Drop for AssetCache {
    fn drop(&mut self) {
        for image in self.images.values() {
            image.set_onerror(None);
        }
    }
}

fn load_image(src: &str) -> Result<(HtmlImageElement, Closure<dyn FnMut(Event)>), ClientError> {
    let image = HtmlImageElement::new().map_err(|e| ClientError::dom("画像要素の作成に失敗", e))?;

    let path = src.to_string();
    let on_error = Closure::wrap(Box::new(move |_: Event| {
        log::warn!("⚠️ 画像の読み込みに失敗しました: {}", path);
    }) as Box<dyn FnMut(Event)>);
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    image.set_src(src);
    Ok((image, on_error))
}
