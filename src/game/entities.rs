//! ゲームエンティティモジュール
//!
//! プロトタイプで扱うアクター（プレイヤー・小惑星・弾）を定義します。

use rand::Rng;

use crate::utils::{random_actor_id, Vec2};

/// アクター
///
/// 位置を持つゲーム内のあらゆるオブジェクトを表します。
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// 識別子
    pub id: String,
    /// 位置
    pub position: Vec2,
    /// 加速度（実際には1フレームあたりの速度として使う）
    pub acceleration: Vec2,
    /// 生存フラグ
    pub alive: bool,
    /// 向き（ラジアン、0が上方向）
    pub rotation: f64,
}

impl Actor {
    /// 静止したアクターを作成
    pub fn new(id: impl Into<String>, position: Vec2) -> Self {
        Self {
            id: id.into(),
            position,
            acceleration: Vec2::ZERO,
            alive: true,
            rotation: 0.0,
        }
    }

    /// プレイヤーを作成
    pub fn player(id: impl Into<String>, position: Vec2) -> Self {
        Self::new(id, position)
    }

    /// ランダムな位置と速度を持つ小惑星を作成
    pub fn random_asteroid<R: Rng + ?Sized>(rng: &mut R, extent: f64, max_velocity: f64) -> Self {
        let position = Vec2::new(rng.gen::<f64>() * extent, rng.gen::<f64>() * extent);
        let velocity = Vec2::new(
            rng.gen::<f64>() * max_velocity,
            rng.gen::<f64>() * max_velocity,
        );

        Self {
            acceleration: velocity,
            ..Self::new(random_actor_id(), position)
        }
    }

    /// 射手の位置から、射手の向きへ飛ぶ弾を作成
    pub fn bullet_from(shooter: &Actor, speed: f64) -> Self {
        Self {
            acceleration: Vec2::from_heading(shooter.rotation).scale(speed),
            rotation: shooter.rotation,
            ..Self::new(random_actor_id(), shooter.position)
        }
    }
}
