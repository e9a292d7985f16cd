//! プロトタイプの入力状態
//!
//! `KeyboardEvent.code` の文字列をゲームで使うキーに対応付け、押下状態を保持します。

use std::collections::HashSet;

/// ゲームで使用するキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// 前進
    ArrowUp,
    /// 後退
    ArrowDown,
    /// 左旋回
    ArrowLeft,
    /// 右旋回
    ArrowRight,
    /// 発射
    Space,
}

impl GameKey {
    /// `KeyboardEvent.code` からキーを取得
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(GameKey::ArrowUp),
            "ArrowDown" => Some(GameKey::ArrowDown),
            "ArrowLeft" => Some(GameKey::ArrowLeft),
            "ArrowRight" => Some(GameKey::ArrowRight),
            "Space" => Some(GameKey::Space),
            _ => None,
        }
    }
}

/// キーボードとマウスの状態
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<GameKey>,
    mouse_position: (f64, f64),
}

impl InputState {
    /// 新しい入力状態を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// キーイベントを反映
    ///
    /// 対象外のキーなら `false` を返します。
    pub fn set_key(&mut self, code: &str, pressed: bool) -> bool {
        let Some(key) = GameKey::from_code(code) else {
            return false;
        };

        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
        true
    }

    /// キーが押されているか
    pub fn is_pressed(&self, key: GameKey) -> bool {
        self.pressed.contains(&key)
    }

    /// マウス位置を更新
    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        self.mouse_position = (x, y);
    }

    /// 最後に記録したマウス位置
    pub fn mouse_position(&self) -> (f64, f64) {
        self.mouse_position
    }
}
