//! ローカル物理の積分処理
//!
//! 1フレームごとに呼ばれ、時間刻みは使いません（1フレーム = 1単位）。

use super::entities::Actor;
use super::input::{GameKey, InputState};
use crate::config::PrototypeConfig;
use crate::utils::{wrap_position, Vec2};

/// 入力に応じてプレイヤーの推力と向きを更新
pub fn steer(player: &mut Actor, input: &InputState, config: &PrototypeConfig) {
    let heading = Vec2::from_heading(player.rotation).scale(config.thrust);

    if input.is_pressed(GameKey::ArrowUp) {
        player.acceleration += heading;
    }
    if input.is_pressed(GameKey::ArrowDown) {
        player.acceleration += heading.scale(-1.0);
    }
    if input.is_pressed(GameKey::ArrowLeft) {
        player.rotation -= config.turn_rate;
    }
    if input.is_pressed(GameKey::ArrowRight) {
        player.rotation += config.turn_rate;
    }
}

/// 位置に速度を加算し、画面端で折り返す
pub fn advance(actor: &mut Actor, width: f64, height: f64) {
    actor.position += actor.acceleration;
    wrap(actor, width, height);
}

/// 画面端で折り返す
pub fn wrap(actor: &mut Actor, width: f64, height: f64) {
    actor.position = wrap_position(actor.position, width, height);
}

/// 速度を各軸で制限
pub fn limit_speed(actor: &mut Actor, limit: f64) {
    actor.acceleration = actor.acceleration.clamp_axes(limit);
}
