//! スプライトレジストリ
//!
//! アクターIDから画面上のスプライトへの対応表です。
//! サーバーから届いたイベントはすべてこの表への操作に変換されます。

use std::collections::HashMap;

use super::sprite::{Sprite, SpriteArt};

/// `upsert` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// 新しいスプライトを作成した
    Created,
    /// 既存スプライトの位置を更新した
    Moved,
}

/// スプライトレジストリ
#[derive(Debug, Default)]
pub struct SpriteRegistry {
    sprites: HashMap<String, Sprite>,
    next_order: u64,
}

impl SpriteRegistry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 未登録なら作成し、登録済みなら位置だけ更新する
    ///
    /// 既存スプライトの見た目は変更しません。
    pub fn upsert(&mut self, id: &str, art: SpriteArt, x: f64, y: f64) -> UpsertOutcome {
        if let Some(sprite) = self.sprites.get_mut(id) {
            sprite.set_position(x, y);
            return UpsertOutcome::Moved;
        }

        self.attach(id, Sprite::new(art, x, y));
        UpsertOutcome::Created
    }

    /// 未登録の場合だけ原点にスプライトを作成する
    pub fn insert_if_absent(&mut self, id: &str, art: SpriteArt) -> bool {
        if self.sprites.contains_key(id) {
            return false;
        }

        self.attach(id, Sprite::new(art, 0.0, 0.0));
        true
    }

    /// スプライトを取り外す
    ///
    /// 未登録のIDなら何もせず `false` を返します。
    pub fn remove(&mut self, id: &str) -> bool {
        self.sprites.remove(id).is_some()
    }

    /// スプライトを取得
    pub fn get(&self, id: &str) -> Option<&Sprite> {
        self.sprites.get(id)
    }

    /// 登録済みか
    pub fn contains(&self, id: &str) -> bool {
        self.sprites.contains_key(id)
    }

    /// 登録数
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// すべて取り外す
    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    /// 作成順に並べたスプライト
    pub fn draw_order(&self) -> Vec<(&str, &Sprite)> {
        let mut entries: Vec<_> = self
            .sprites
            .iter()
            .map(|(id, sprite)| (id.as_str(), sprite))
            .collect();
        entries.sort_by_key(|(_, sprite)| sprite.order);
        entries
    }

    fn attach(&mut self, id: &str, mut sprite: Sprite) {
        sprite.order = self.next_order;
        self.next_order += 1;
        self.sprites.insert(id.to_string(), sprite);
    }
}
