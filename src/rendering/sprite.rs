//! スプライトモジュール
//!
//! 画面に描く1枚のスプライトと、その見た目の種類を定義します。

/// スプライトの見た目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteArt {
    /// 自機
    Player,
    /// 他プレイヤー
    RemotePlayer,
    /// 小惑星
    Asteroid,
    /// 弾（白い正方形）
    Bullet,
}

impl SpriteArt {
    /// 画像が読み込まれるまでの仮表示色
    pub fn placeholder_color(&self) -> &'static str {
        match self {
            SpriteArt::Player => "#4FC3F7",
            SpriteArt::RemotePlayer => "#FFB74D",
            SpriteArt::Asteroid => "#9E9E9E",
            SpriteArt::Bullet => "#FFFFFF",
        }
    }
}

/// スプライト構造体
///
/// 描画位置・回転・アンカーを保持します。
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// 見た目
    pub art: SpriteArt,
    /// X座標
    pub x: f64,
    /// Y座標
    pub y: f64,
    /// 回転角度（ラジアン）
    pub rotation: f64,
    /// アンカーX（0.0〜1.0）
    pub anchor_x: f64,
    /// アンカーY（0.0〜1.0）
    pub anchor_y: f64,
    /// 作成順（描画順に使う）
    pub(crate) order: u64,
}

impl Sprite {
    /// 中心アンカーのスプライトを作成
    pub fn new(art: SpriteArt, x: f64, y: f64) -> Self {
        Self {
            art,
            x,
            y,
            rotation: 0.0,
            anchor_x: 0.5,
            anchor_y: 0.5,
            order: 0,
        }
    }

    /// 回転を指定して作成
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// 位置を設定
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_creation() {
        let sprite = Sprite::new(SpriteArt::Asteroid, 10.0, 20.0).with_rotation(1.5);

        assert_eq!(sprite.art, SpriteArt::Asteroid);
        assert_eq!((sprite.x, sprite.y), (10.0, 20.0));
        assert_eq!(sprite.rotation, 1.5);
        assert_eq!((sprite.anchor_x, sprite.anchor_y), (0.5, 0.5));
    }
}
