//! クライアント設定
//!
//! JavaScript 側から JSON 文字列で渡される設定を読み込みます。
//! 省略された項目はすべてデフォルト値で補われます。

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// キープアライブ送信間隔のデフォルト（ミリ秒）
pub const DEFAULT_KEEPALIVE_INTERVAL_MS: u32 = 15_000;

/// クライアント設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// ゲームハブのURL
    pub server_url: String,
    /// ログレベル（"error" / "warn" / "info" / "debug" / "trace"）
    pub log_level: String,
    /// 何も送信していない状態でキープアライブを送るまでの時間（ミリ秒）
    pub keepalive_interval_ms: u32,
    /// アセット設定
    pub assets: AssetConfig,
    /// プロトタイプ用の設定
    pub prototype: PrototypeConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "wss://localhost:7159/game".to_string(),
            log_level: "info".to_string(),
            keepalive_interval_ms: DEFAULT_KEEPALIVE_INTERVAL_MS,
            assets: AssetConfig::default(),
            prototype: PrototypeConfig::default(),
        }
    }
}

impl ClientConfig {
    /// JSON文字列から設定を読み込む
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        let config: Self = serde_json::from_str(json)?;
        config.prototype.validate()?;
        Ok(config)
    }

    /// JavaScript から渡されたオプション値を解釈する
    ///
    /// 空文字列や `None` の場合はデフォルト設定を返します。
    pub fn from_optional_json(json: Option<String>) -> Result<Self, ClientError> {
        match json {
            Some(json) if !json.trim().is_empty() => Self::from_json(&json),
            _ => Ok(Self::default()),
        }
    }
}

/// アセット設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// 自機の画像パス
    pub player_image: String,
    /// 他プレイヤーの画像パス
    pub remote_player_image: String,
    /// 小惑星の画像パス
    pub asteroid_image: String,
    /// 弾の一辺の長さ（ピクセル）
    pub bullet_size: f64,
    /// 画像読み込み前に描くプレースホルダーの大きさ（ピクセル）
    pub placeholder_size: f64,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            player_image: "/assets/Player.png".to_string(),
            remote_player_image: "/assets/Player.png".to_string(),
            asteroid_image: "/assets/Asteroid.png".to_string(),
            bullet_size: 10.0,
            placeholder_size: 32.0,
        }
    }
}

/// プロトタイプ（ローカル物理）の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrototypeConfig {
    /// 操作するプレイヤーのID
    pub controlled_id: String,
    /// プレイヤーの初期位置
    pub spawn_position: (f64, f64),
    /// 1フレームあたりの推力
    pub thrust: f64,
    /// 1フレームあたりの旋回量（ラジアン）
    pub turn_rate: f64,
    /// 弾の速さ（1フレームあたり）
    pub bullet_speed: f64,
    /// 各軸の速度上限
    pub speed_limit: f64,
    /// 衝突判定のしきい値（各軸の差）
    pub collision_threshold: f64,
    /// 生成する小惑星の数
    pub asteroid_count: usize,
    /// 小惑星を配置する範囲
    pub spawn_extent: f64,
    /// 小惑星の各軸の最大速度
    pub asteroid_max_velocity: f64,
    /// 同時に存在できる弾の最大数
    pub max_bullets: usize,
}

impl Default for PrototypeConfig {
    fn default() -> Self {
        Self {
            controlled_id: "1234".to_string(),
            spawn_position: (100.0, 100.0),
            thrust: 0.1,
            turn_rate: 0.05,
            bullet_speed: 10.0,
            speed_limit: 5.0,
            collision_threshold: 20.0,
            asteroid_count: 3,
            spawn_extent: 1000.0,
            asteroid_max_velocity: 10.0,
            max_bullets: 256,
        }
    }
}

impl PrototypeConfig {
    /// 物理計算に渡す値を検証
    pub fn validate(&self) -> Result<(), ClientError> {
        let non_negative = [
            ("speed_limit", self.speed_limit),
            ("collision_threshold", self.collision_threshold),
            ("spawn_extent", self.spawn_extent),
            ("asteroid_max_velocity", self.asteroid_max_velocity),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ClientError::InvalidConfig(format!(
                    "prototype.{} は0以上の有限値である必要があります（{}）",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();

        assert_eq!(config.keepalive_interval_ms, 15_000);
        assert_eq!(config.assets.asteroid_image, "/assets/Asteroid.png");
        assert_eq!(config.prototype.controlled_id, "1234");
        assert_eq!(config.prototype.speed_limit, 5.0);
        assert_eq!(config.prototype.asteroid_count, 3);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "server_url": "ws://127.0.0.1:5000/game",
            "prototype": { "speed_limit": 8.0 }
        }"#;
        let config = ClientConfig::from_json(json).unwrap();

        assert_eq!(config.server_url, "ws://127.0.0.1:5000/game");
        assert_eq!(config.prototype.speed_limit, 8.0);
        // 指定されていない項目はデフォルトのまま
        assert_eq!(config.prototype.thrust, 0.1);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_optional_json() {
        assert_eq!(ClientConfig::from_optional_json(None).unwrap(), ClientConfig::default());
        assert_eq!(
            ClientConfig::from_optional_json(Some("  ".to_string())).unwrap(),
            ClientConfig::default()
        );
        assert!(ClientConfig::from_optional_json(Some("{not json".to_string())).is_err());
    }

    #[test]
    fn test_negative_speed_limit_is_rejected() {
        let result = ClientConfig::from_json(r#"{"prototype": {"speed_limit": -1}}"#);
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));

        let result = ClientConfig::from_json(r#"{"prototype": {"asteroid_max_velocity": -3.5}}"#);
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));

        assert!(ClientConfig::default().prototype.validate().is_ok());
    }

    #[test]
    fn test_non_finite_speed_limit_is_rejected() {
        let config = PrototypeConfig {
            speed_limit: f64::NAN,
            ..PrototypeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));
    }
}
