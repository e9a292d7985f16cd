//! 数学ユーティリティモジュール
//!
//! このモジュールには、ゲーム内で使用される2Dベクトルと画面端の折り返し処理が含まれています。

use std::ops::{Add, AddAssign, Sub};

/// 2次元ベクトル
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// X成分
    pub x: f64,
    /// Y成分
    pub y: f64,
}

impl Vec2 {
    /// ゼロベクトル
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// 新しいベクトルを作成
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 向き（ラジアン）から単位ベクトルを作成
    ///
    /// 0ラジアンが画面の上方向（-Y）、正の回転が時計回りです。
    pub fn from_heading(rotation: f64) -> Self {
        Self::new(rotation.sin(), -rotation.cos())
    }

    /// スカラー倍
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// 各成分を `[-limit, limit]` に制限
    ///
    /// 負の上限は絶対値として扱い、NaN の場合は制限しません。
    pub fn clamp_axes(self, limit: f64) -> Self {
        let limit = limit.abs();
        if limit.is_nan() {
            return self;
        }
        Self::new(self.x.clamp(-limit, limit), self.y.clamp(-limit, limit))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 1軸分の画面端折り返し
///
/// 右（下）端を越えたら0へ、0未満になったら端へ移動します。
/// ちょうど境界上の値はそのままです。
pub fn wrap_coordinate(value: f64, extent: f64) -> f64 {
    if value > extent {
        0.0
    } else if value < 0.0 {
        extent
    } else {
        value
    }
}

/// 位置を画面サイズで折り返す（軸ごとに独立）
pub fn wrap_position(position: Vec2, width: f64, height: f64) -> Vec2 {
    Vec2::new(
        wrap_coordinate(position.x, width),
        wrap_coordinate(position.y, height),
    )
}
