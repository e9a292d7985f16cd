//! サーバーイベント
//!
//! ハブからの呼び出しをゲームイベントに変換し、スプライトレジストリへ反映します。
//! 各イベントはレジストリ操作に1対1で対応し、検証や順序の補正は行いません。

use serde_json::Value;

use crate::error::ProtocolError;
use crate::rendering::{SpriteArt, SpriteRegistry};

/// サーバーから届くゲームイベント
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// プレイヤー参加
    PlayerJoined { id: String },
    /// プレイヤー退出
    PlayerLeft { id: String },
    /// プレイヤー移動
    PlayerMoved { id: String, x: f64, y: f64 },
    /// 小惑星移動
    AsteroidMoved { id: String, x: f64, y: f64 },
    /// 弾移動
    BulletMoved { id: String, x: f64, y: f64 },
    /// 弾消滅
    BulletRemoved { id: String },
    /// 小惑星消滅
    AsteroidRemoved { id: String },
    /// プレイヤー撃墜
    PlayerKilled { id: String },
    /// プレイヤー復活
    PlayerRespawned { id: String, x: f64, y: f64 },
}

impl ServerEvent {
    /// 呼び出し名と引数からイベントを作成
    ///
    /// 呼び出し名は大文字小文字を区別しません。
    /// 未知の呼び出し名なら `Ok(None)` を返します。
    pub fn decode(target: &str, arguments: &[Value]) -> Result<Option<Self>, ProtocolError> {
        let args = Arguments { event: target, values: arguments };

        let event = match target.to_ascii_lowercase().as_str() {
            "playerjoined" => ServerEvent::PlayerJoined { id: args.id()? },
            "playerleft" => ServerEvent::PlayerLeft { id: args.id()? },
            "playermoved" => {
                let (id, x, y) = args.positioned()?;
                ServerEvent::PlayerMoved { id, x, y }
            }
            "asteroidmoved" => {
                let (id, x, y) = args.positioned()?;
                ServerEvent::AsteroidMoved { id, x, y }
            }
            "bulletmoved" => {
                let (id, x, y) = args.positioned()?;
                ServerEvent::BulletMoved { id, x, y }
            }
            "bulletremoved" => ServerEvent::BulletRemoved { id: args.id()? },
            "asteroidremoved" => ServerEvent::AsteroidRemoved { id: args.id()? },
            "playerkilled" => ServerEvent::PlayerKilled { id: args.id()? },
            "playerrespawned" => {
                let (id, x, y) = args.positioned()?;
                ServerEvent::PlayerRespawned { id, x, y }
            }
            _ => return Ok(None),
        };

        Ok(Some(event))
    }

    /// イベント名
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::PlayerJoined { .. } => "playerJoined",
            ServerEvent::PlayerLeft { .. } => "playerLeft",
            ServerEvent::PlayerMoved { .. } => "playerMoved",
            ServerEvent::AsteroidMoved { .. } => "asteroidMoved",
            ServerEvent::BulletMoved { .. } => "bulletMoved",
            ServerEvent::BulletRemoved { .. } => "bulletRemoved",
            ServerEvent::AsteroidRemoved { .. } => "asteroidRemoved",
            ServerEvent::PlayerKilled { .. } => "playerKilled",
            ServerEvent::PlayerRespawned { .. } => "playerRespawned",
        }
    }

    /// レジストリへ反映
    pub fn apply(&self, registry: &mut SpriteRegistry) {
        match self {
            ServerEvent::PlayerJoined { id } => {
                registry.insert_if_absent(id, SpriteArt::RemotePlayer);
            }
            ServerEvent::PlayerMoved { id, x, y } | ServerEvent::PlayerRespawned { id, x, y } => {
                registry.upsert(id, SpriteArt::Player, *x, *y);
            }
            ServerEvent::AsteroidMoved { id, x, y } => {
                registry.upsert(id, SpriteArt::Asteroid, *x, *y);
            }
            ServerEvent::BulletMoved { id, x, y } => {
                registry.upsert(id, SpriteArt::Bullet, *x, *y);
            }
            ServerEvent::PlayerLeft { id }
            | ServerEvent::BulletRemoved { id }
            | ServerEvent::AsteroidRemoved { id }
            | ServerEvent::PlayerKilled { id } => {
                registry.remove(id);
            }
        }
    }
}

/// 受信したイベントを到着順にレジストリへ反映し、反映した数を返す
pub fn apply_all<I>(registry: &mut SpriteRegistry, events: I) -> usize
where
    I: IntoIterator<Item = ServerEvent>,
{
    let mut applied = 0;
    for event in events {
        #[cfg(feature = "debug_network")]
        log::debug!("イベント反映: {:?}", event);

        event.apply(registry);
        applied += 1;
    }
    applied
}

struct Arguments<'a> {
    event: &'a str,
    values: &'a [Value],
}

impl Arguments<'_> {
    fn get(&self, index: usize, expected: usize) -> Result<&Value, ProtocolError> {
        self.values.get(index).ok_or_else(|| ProtocolError::MissingArgument {
            event: self.event.to_string(),
            expected,
            actual: self.values.len(),
        })
    }

    fn invalid(&self, index: usize) -> ProtocolError {
        ProtocolError::InvalidArgument {
            event: self.event.to_string(),
            index,
        }
    }

    /// IDは文字列でも数値でも受け付ける
    fn id_at(&self, expected: usize) -> Result<String, ProtocolError> {
        match self.get(0, expected)? {
            Value::String(id) => Ok(id.clone()),
            Value::Number(id) => Ok(id.to_string()),
            _ => Err(self.invalid(0)),
        }
    }

    fn id(&self) -> Result<String, ProtocolError> {
        self.id_at(1)
    }

    fn coordinate(&self, index: usize) -> Result<f64, ProtocolError> {
        self.get(index, 3)?.as_f64().ok_or_else(|| self.invalid(index))
    }

    fn positioned(&self) -> Result<(String, f64, f64), ProtocolError> {
        Ok((self.id_at(3)?, self.coordinate(1)?, self.coordinate(2)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(target: &str, arguments: Vec<Value>) -> ServerEvent {
        ServerEvent::decode(target, &arguments).unwrap().unwrap()
    }

    #[test]
    fn test_decode_all_events() {
        assert_eq!(
            decode("playerJoined", vec![json!("p1")]),
            ServerEvent::PlayerJoined { id: "p1".to_string() }
        );
        assert_eq!(
            decode("asteroidMoved", vec![json!("a1"), json!(1.5), json!(2)]),
            ServerEvent::AsteroidMoved { id: "a1".to_string(), x: 1.5, y: 2.0 }
        );
        assert_eq!(
            decode("playerRespawned", vec![json!("p1"), json!(0), json!(0)]),
            ServerEvent::PlayerRespawned { id: "p1".to_string(), x: 0.0, y: 0.0 }
        );
        assert_eq!(
            decode("playerKilled", vec![json!("p1")]).name(),
            "playerKilled"
        );
        assert_eq!(
            decode("playerLeft", vec![json!("p2")]),
            ServerEvent::PlayerLeft { id: "p2".to_string() }
        );
        assert_eq!(
            decode("playerMoved", vec![json!("p1"), json!(10), json!(-4.5)]),
            ServerEvent::PlayerMoved { id: "p1".to_string(), x: 10.0, y: -4.5 }
        );
        assert_eq!(
            decode("bulletMoved", vec![json!("b1"), json!(3), json!(4)]),
            ServerEvent::BulletMoved { id: "b1".to_string(), x: 3.0, y: 4.0 }
        );
        assert_eq!(
            decode("bulletRemoved", vec![json!("b1")]),
            ServerEvent::BulletRemoved { id: "b1".to_string() }
        );
        assert_eq!(
            decode("asteroidRemoved", vec![json!("a1")]),
            ServerEvent::AsteroidRemoved { id: "a1".to_string() }
        );
    }

    #[test]
    fn test_decoded_names_round_trip_for_every_event() {
        let events = [
            ("playerJoined", vec![json!("p")]),
            ("playerLeft", vec![json!("p")]),
            ("playerMoved", vec![json!("p"), json!(0), json!(0)]),
            ("asteroidMoved", vec![json!("a"), json!(0), json!(0)]),
            ("bulletMoved", vec![json!("b"), json!(0), json!(0)]),
            ("bulletRemoved", vec![json!("b")]),
            ("asteroidRemoved", vec![json!("a")]),
            ("playerKilled", vec![json!("p")]),
            ("playerRespawned", vec![json!("p"), json!(0), json!(0)]),
        ];

        for (name, arguments) in events {
            assert_eq!(decode(name, arguments).name(), name);
        }
    }

    #[test]
    fn test_decode_is_case_insensitive_and_accepts_numeric_ids() {
        assert_eq!(
            decode("bulletmoved", vec![json!(42), json!(3.0), json!(4.0)]),
            ServerEvent::BulletMoved { id: "42".to_string(), x: 3.0, y: 4.0 }
        );
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        assert_eq!(ServerEvent::decode("ReceiveMessage", &[]), Ok(None));
    }

    #[test]
    fn test_bad_arguments() {
        assert_eq!(
            ServerEvent::decode("playerMoved", &[json!("p1"), json!(1.0)]),
            Err(ProtocolError::MissingArgument {
                event: "playerMoved".to_string(),
                expected: 3,
                actual: 2,
            })
        );
        assert_eq!(
            ServerEvent::decode("playerMoved", &[json!("p1"), json!("x"), json!(1.0)]),
            Err(ProtocolError::InvalidArgument {
                event: "playerMoved".to_string(),
                index: 1,
            })
        );
        assert!(ServerEvent::decode("playerLeft", &[json!(null)]).is_err());
    }

    #[test]
    fn test_apply_maps_events_to_registry() {
        let mut registry = SpriteRegistry::new();

        ServerEvent::PlayerJoined { id: "p1".to_string() }.apply(&mut registry);
        ServerEvent::PlayerMoved { id: "p1".to_string(), x: 5.0, y: 6.0 }.apply(&mut registry);
        ServerEvent::AsteroidMoved { id: "a1".to_string(), x: 1.0, y: 1.0 }.apply(&mut registry);
        ServerEvent::BulletMoved { id: "b1".to_string(), x: 2.0, y: 2.0 }.apply(&mut registry);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("p1").unwrap().art, SpriteArt::RemotePlayer);
        assert_eq!(registry.get("a1").unwrap().art, SpriteArt::Asteroid);
        assert_eq!(registry.get("b1").unwrap().art, SpriteArt::Bullet);

        ServerEvent::BulletRemoved { id: "b1".to_string() }.apply(&mut registry);
        ServerEvent::AsteroidRemoved { id: "a1".to_string() }.apply(&mut registry);
        ServerEvent::PlayerKilled { id: "p1".to_string() }.apply(&mut registry);
        assert!(registry.is_empty());

        ServerEvent::PlayerRespawned { id: "p1".to_string(), x: 9.0, y: 9.0 }.apply(&mut registry);
        assert_eq!(registry.get("p1").unwrap().art, SpriteArt::Player);

        ServerEvent::PlayerLeft { id: "p1".to_string() }.apply(&mut registry);
        ServerEvent::PlayerLeft { id: "p1".to_string() }.apply(&mut registry);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_apply_all_uses_arrival_order() {
        let mut registry = SpriteRegistry::new();

        let applied = apply_all(
            &mut registry,
            vec![
                ServerEvent::AsteroidMoved { id: "a1".to_string(), x: 1.0, y: 1.0 },
                ServerEvent::PlayerMoved { id: "p1".to_string(), x: 2.0, y: 2.0 },
                ServerEvent::AsteroidMoved { id: "a1".to_string(), x: 7.0, y: 8.0 },
                ServerEvent::BulletMoved { id: "b1".to_string(), x: 3.0, y: 3.0 },
                ServerEvent::BulletRemoved { id: "b1".to_string() },
            ],
        );

        assert_eq!(applied, 5);
        assert_eq!(registry.len(), 2);
        // 同じIDの後着イベントが最終位置になる
        let asteroid = registry.get("a1").unwrap();
        assert_eq!((asteroid.x, asteroid.y), (7.0, 8.0));
        assert!(!registry.contains("b1"));
        assert_eq!(apply_all(&mut registry, Vec::new()), 0);
    }

    #[test]
    fn test_stale_move_after_removal_resurrects_sprite() {
        let mut registry = SpriteRegistry::new();

        ServerEvent::BulletRemoved { id: "b1".to_string() }.apply(&mut registry);
        ServerEvent::BulletMoved { id: "b1".to_string(), x: 1.0, y: 1.0 }.apply(&mut registry);

        // 順序の補正は行わないため、遅れて届いた移動で再作成される
        assert!(registry.contains("b1"));
    }
}
