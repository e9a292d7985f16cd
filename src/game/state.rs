//! プロトタイプのゲーム状態
//!
//! プレイヤー・小惑星・弾の3つのコンテナを持ち、
//! 毎フレームの更新（操作、発射、移動、折り返し、衝突）を行います。

use std::collections::VecDeque;

use rand::Rng;

use super::collision::colliding_asteroid;
use super::entities::Actor;
use super::input::{GameKey, InputState};
use super::integrator::{advance, limit_speed, steer, wrap};
use crate::config::PrototypeConfig;
use crate::utils::Vec2;

/// 1フレームの更新結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// このフレームで弾を発射したか
    pub fired: bool,
    /// このフレームで小惑星に衝突したか
    pub collided: bool,
}

/// プロトタイプのゲーム状態
#[derive(Debug, Clone)]
pub struct PrototypeWorld {
    players: Vec<Actor>,
    asteroids: Vec<Actor>,
    bullets: VecDeque<Actor>,
    input: InputState,
    screen: (f64, f64),
    config: PrototypeConfig,
}

impl PrototypeWorld {
    /// 操作プレイヤー1人とランダムな小惑星でゲーム状態を作成
    pub fn new<R: Rng + ?Sized>(config: PrototypeConfig, screen: (f64, f64), rng: &mut R) -> Self {
        let (spawn_x, spawn_y) = config.spawn_position;
        let players = vec![Actor::player(config.controlled_id.clone(), Vec2::new(spawn_x, spawn_y))];
        let asteroids = (0..config.asteroid_count)
            .map(|_| Actor::random_asteroid(rng, config.spawn_extent, config.asteroid_max_velocity))
            .collect();

        Self::with_actors(config, screen, players, asteroids)
    }

    /// 任意のアクターでゲーム状態を作成
    pub fn with_actors(
        config: PrototypeConfig,
        screen: (f64, f64),
        players: Vec<Actor>,
        asteroids: Vec<Actor>,
    ) -> Self {
        Self {
            players,
            asteroids,
            bullets: VecDeque::new(),
            input: InputState::new(),
            screen,
            config,
        }
    }

    /// キーイベントを処理
    ///
    /// 操作プレイヤーがいない間はすべてのキーを無視します。
    pub fn handle_key(&mut self, code: &str, pressed: bool) -> bool {
        if self.controlled_player().is_none() {
            return false;
        }
        self.input.set_key(code, pressed)
    }

    /// マウス移動を記録
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        self.input.set_mouse_position(x, y);
    }

    /// 画面サイズを更新
    pub fn set_screen_size(&mut self, width: f64, height: f64) {
        self.screen = (width, height);
    }

    /// 1フレーム進める
    pub fn step(&mut self) -> StepOutcome {
        let (width, height) = self.screen;
        let mut outcome = StepOutcome::default();

        // 小惑星は移動させず、折り返しだけ行う
        for asteroid in &mut self.asteroids {
            wrap(asteroid, width, height);
        }

        let controlled_id = self.config.controlled_id.clone();
        let Some(index) = self.players.iter().position(|p| p.id == controlled_id) else {
            return outcome;
        };

        steer(&mut self.players[index], &self.input, &self.config);

        if self.input.is_pressed(GameKey::Space) {
            let bullet = Actor::bullet_from(&self.players[index], self.config.bullet_speed);
            self.bullets.push_back(bullet);
            while self.bullets.len() > self.config.max_bullets {
                self.bullets.pop_front();
            }
            outcome.fired = true;
        }

        for bullet in &mut self.bullets {
            advance(bullet, width, height);
        }

        let player = &mut self.players[index];
        advance(player, width, height);
        limit_speed(player, self.config.speed_limit);

        if let Some(hit) = colliding_asteroid(player, &self.asteroids, self.config.collision_threshold) {
            log::debug!("💥 小惑星 {} と衝突、原点に戻します", self.asteroids[hit].id);
            player.position = Vec2::ZERO;
            outcome.collided = true;
        }

        outcome
    }

    /// 操作プレイヤーを取得
    pub fn controlled_player(&self) -> Option<&Actor> {
        self.players.iter().find(|p| p.id == self.config.controlled_id)
    }

    /// すべてのプレイヤー
    pub fn players(&self) -> &[Actor] {
        &self.players
    }

    /// すべての小惑星
    pub fn asteroids(&self) -> &[Actor] {
        &self.asteroids
    }

    /// すべての弾（古い順）
    pub fn bullets(&self) -> impl Iterator<Item = &Actor> {
        self.bullets.iter()
    }

    /// 弾の数
    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    /// 入力状態
    pub fn input(&self) -> &InputState {
        &self.input
    }
}
