//! 衝突判定
//!
//! 各軸の座標差がしきい値未満かどうかだけを見る単純な判定です。
//! 空間分割は行わず、毎フレームすべての小惑星と比較します。

use super::entities::Actor;
use crate::utils::Vec2;

/// 2点が各軸でしきい値未満の距離にあるか
pub fn overlaps(a: Vec2, b: Vec2, threshold: f64) -> bool {
    let delta = a - b;
    delta.x.abs() < threshold && delta.y.abs() < threshold
}

/// プレイヤーと重なっている最初の小惑星のインデックスを返す
pub fn colliding_asteroid(player: &Actor, asteroids: &[Actor], threshold: f64) -> Option<usize> {
    asteroids
        .iter()
        .position(|asteroid| overlaps(player.position, asteroid.position, threshold))
}
