// A single-player game session: all mutable game state plus its lifecycle.

use crate::domain::systems::powerups::{
    ABSORBED_ANNOUNCEMENT, BOMB_ANNOUNCEMENT, HitOutcome, SHIELD_ANNOUNCEMENT, ShieldState,
    decay_powerups,
};
use crate::domain::systems::spawning::{WavePlanner, powerup_chance, shield_bias};
use crate::domain::systems::{collision, movement};
use crate::domain::tuning::GameTuning;
use crate::domain::{
    Coin, EnemyRoster, EnemyTier, EntityFactory, PlayClock, Player, Powerup, PowerupKind,
};
use crate::use_cases::scheduler::Scheduler;
use crate::use_cases::types::{
    Control, FrameState, HudState, RunState, SessionEvent, SessionSummary,
};
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Duration;

/// Output of one simulation step.
#[derive(Debug, Default)]
pub struct TickReport {
    pub events: Vec<SessionEvent>,
    /// Absent when the tick did not simulate (paused, game over) or ended the game.
    pub frame: Option<FrameState>,
}

/// Owns every piece of game state for one player.
///
/// Timestamps passed in (`now`) are monotonic offsets from an epoch chosen by the caller.
pub struct GameSession {
    tuning: GameTuning,
    factory: EntityFactory,
    rng: StdRng,

    state: RunState,
    clock: PlayClock,
    scheduler: Scheduler,
    planner: WavePlanner,
    shield: ShieldState,

    player: Player,
    enemies: EnemyRoster,
    coins: Vec<Coin>,
    powerups: Vec<Powerup>,

    coin_count: u32,
    survival_time: Duration,
    frames: u64,
    wallet_coins: Option<u64>,
}

impl GameSession {
    pub fn new(tuning: GameTuning, rng: StdRng) -> Self {
        Self {
            tuning,
            factory: EntityFactory {
                arena: tuning.arena,
                powerup: tuning.powerup,
                coin: tuning.coin,
            },
            rng,
            state: RunState::NotStarted,
            clock: PlayClock::default(),
            scheduler: Scheduler::default(),
            planner: WavePlanner::default(),
            shield: ShieldState::new(tuning.shield),
            player: Player::centered(&tuning.arena, &tuning.player),
            enemies: EnemyRoster::default(),
            coins: Vec::new(),
            powerups: Vec::new(),
            coin_count: 0,
            survival_time: Duration::ZERO,
            frames: 0,
            wallet_coins: None,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &EnemyRoster {
        &self.enemies
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn powerups(&self) -> &[Powerup] {
        &self.powerups
    }

    pub fn coin_count(&self) -> u32 {
        self.coin_count
    }

    pub fn shield(&self) -> &ShieldState {
        &self.shield
    }

    /// Active play time, or the frozen survival time once the game is over.
    pub fn elapsed(&self, now: Duration) -> Duration {
        if self.state == RunState::GameOver {
            return self.survival_time;
        }
        self.clock.elapsed(now)
    }

    pub fn press(&mut self, control: Control) {
        if self.state == RunState::GameOver {
            return;
        }
        let speed = self.player.speed;
        match control {
            Control::Right => self.player.dx = speed,
            Control::Left => self.player.dx = -speed,
            Control::Up => self.player.dy = -speed,
            Control::Down => self.player.dy = speed,
        }
    }

    pub fn release(&mut self, control: Control) {
        match control {
            Control::Left | Control::Right => self.player.dx = 0.0,
            Control::Up | Control::Down => self.player.dy = 0.0,
        }
    }

    /// Advances the simulation by one frame. A not-started session starts on its first tick.
    pub fn tick(&mut self, now: Duration) -> TickReport {
        let mut report = TickReport::default();
        match self.state {
            RunState::NotStarted => {
                self.clock.start_if_unset(now);
                self.state = RunState::Running;
            }
            RunState::Running => {}
            RunState::Paused | RunState::GameOver => return report,
        }

        let elapsed = self.clock.elapsed(now);
        self.shield.expire(elapsed);
        self.run_spawners(elapsed, &mut report.events);

        movement::update_player(&mut self.player, &self.tuning.arena);
        decay_powerups(&mut self.powerups, elapsed, &self.tuning.powerup);
        self.collect_powerups(&mut report.events);
        self.collect_coins(&mut report.events);
        movement::advance_enemies(&mut self.enemies, &self.player, &self.tuning.arena);

        if collision::player_hit(&self.player, &self.enemies) {
            match self.shield.on_hit(elapsed) {
                HitOutcome::Ignored => {}
                HitOutcome::Absorbed => report
                    .events
                    .push(SessionEvent::Announced(ABSORBED_ANNOUNCEMENT.to_string())),
                HitOutcome::Fatal => {
                    self.state = RunState::GameOver;
                    self.survival_time = elapsed;
                    report.events.push(SessionEvent::GameOver {
                        survival_time: elapsed,
                    });
                    return report;
                }
            }
        }

        self.frames += 1;
        report.frame = Some(self.snapshot(elapsed));
        report
    }

    pub fn pause(&mut self, now: Duration) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        self.clock.pause(now);
        self.state = RunState::Paused;
        true
    }

    pub fn resume(&mut self, now: Duration) -> bool {
        if self.state != RunState::Paused {
            return false;
        }
        self.clock.resume(now);
        self.state = RunState::Running;
        true
    }

    /// Flips between running and paused. Returns the new state, or `None` if nothing changed.
    pub fn toggle_pause(&mut self, now: Duration) -> Option<RunState> {
        let changed = match self.state {
            RunState::Running => self.pause(now),
            RunState::Paused => self.resume(now),
            RunState::NotStarted | RunState::GameOver => false,
        };
        changed.then_some(self.state)
    }

    /// Returns to a fresh not-started game. The next tick establishes a new start time.
    pub fn reset(&mut self) {
        self.state = RunState::NotStarted;
        self.clock = PlayClock::default();
        self.scheduler = Scheduler::default();
        self.planner = WavePlanner::default();
        self.shield = ShieldState::new(self.tuning.shield);
        self.player = Player::centered(&self.tuning.arena, &self.tuning.player);
        self.enemies.clear();
        self.coins.clear();
        self.powerups.clear();
        self.coin_count = 0;
        self.survival_time = Duration::ZERO;
    }

    /// Tears the session down and reports its final numbers.
    pub fn dispose(self) -> SessionSummary {
        SessionSummary {
            frames: self.frames,
            coins_collected: self.coin_count,
            survival_time: (self.state == RunState::GameOver).then_some(self.survival_time),
        }
    }

    pub fn frame_state(&self, now: Duration) -> FrameState {
        self.snapshot(self.elapsed(now))
    }

    pub fn hud(&self, now: Duration) -> HudState {
        HudState {
            elapsed: self.elapsed(now),
            coins: self.coin_count,
            wallet_coins: self.wallet_coins,
            run_state: self.state,
        }
    }

    /// HUD refresh cadence, measured in wall time.
    pub fn hud_due(&mut self, now: Duration, interval: Duration) -> bool {
        self.scheduler.hud_due(now, interval)
    }

    /// Records a wallet total reported by the coin service. Replies can arrive out of order; the
    /// highest total seen wins.
    pub fn set_wallet_coins(&mut self, coins: u64) {
        self.wallet_coins = Some(self.wallet_coins.map_or(coins, |seen| seen.max(coins)));
    }

    fn run_spawners(&mut self, elapsed: Duration, events: &mut Vec<SessionEvent>) {
        let secs = elapsed.as_secs_f32();

        if self
            .scheduler
            .wave_due(elapsed, self.tuning.spawning.wave_interval)
        {
            let wave = self.planner.plan(secs, self.enemies.slow.len());
            events.extend(
                wave.announcements
                    .iter()
                    .map(|text| SessionEvent::Announced(text.to_string())),
            );
            for (tier, count) in [
                (EnemyTier::Normal, wave.normal),
                (EnemyTier::Fast, wave.fast),
                (EnemyTier::Slow, wave.slow),
            ] {
                for _ in 0..count {
                    let enemy = self.factory.enemy(tier, &mut self.rng);
                    self.enemies.push(enemy);
                }
            }
        }

        if self
            .scheduler
            .coin_due(elapsed, &self.tuning.coin, &mut self.rng)
            && self.coins.len() < self.tuning.coin.max_on_field
        {
            let coin = self.factory.coin(&mut self.rng);
            self.coins.push(coin);
        }

        if self
            .scheduler
            .powerup_due(elapsed, &self.tuning.spawning, &mut self.rng)
            && self.rng.gen_bool(powerup_chance(secs))
        {
            let kind = if self.rng.gen_bool(shield_bias(secs)) {
                PowerupKind::Shield
            } else {
                PowerupKind::Bomb
            };
            let powerup = self.factory.powerup(kind, elapsed, &mut self.rng);
            self.powerups.push(powerup);
        }
    }

    fn collect_powerups(&mut self, events: &mut Vec<SessionEvent>) {
        let Self {
            player,
            powerups,
            shield,
            enemies,
            ..
        } = self;

        powerups.retain(|p| {
            if !collision::within_reach(player, p.x, p.y, p.radius) {
                return true;
            }
            match p.kind {
                PowerupKind::Shield => {
                    if !shield.grant_shield() {
                        return true;
                    }
                    events.push(SessionEvent::Announced(SHIELD_ANNOUNCEMENT.to_string()));
                }
                PowerupKind::Bomb => {
                    enemies.clear();
                    events.push(SessionEvent::Announced(BOMB_ANNOUNCEMENT.to_string()));
                }
            }
            false
        });
    }

    fn collect_coins(&mut self, events: &mut Vec<SessionEvent>) {
        let Self {
            player,
            coins,
            coin_count,
            ..
        } = self;

        coins.retain(|c| {
            if !collision::within_reach(player, c.x, c.y, c.radius) {
                return true;
            }
            *coin_count += 1;
            events.push(SessionEvent::Announced(format!(
                "+1 Coin (Total: {coin_count})"
            )));
            events.push(SessionEvent::CoinCollected { total: *coin_count });
            false
        });
    }

    fn snapshot(&self, elapsed: Duration) -> FrameState {
        FrameState {
            tick: self.frames,
            player: (&self.player).into(),
            enemies: self.enemies.iter().map(Into::into).collect(),
            coins: self.coins.iter().map(Into::into).collect(),
            powerups: self.powerups.iter().map(Into::into).collect(),
            shield_active: self.shield.is_shielded(),
            invincible: self.shield.is_invincible(),
            flicker_dimmed: self.shield.flicker_dimmed(elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Enemy;
    use crate::domain::systems::spawning::FAST_ANNOUNCEMENT;
    use rand::SeedableRng;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn session() -> GameSession {
        GameSession::new(GameTuning::default(), StdRng::seed_from_u64(42))
    }

    fn enemy_at(tier: EnemyTier, x: f32, y: f32) -> Enemy {
        let stats = tier.stats();
        Enemy {
            x,
            y,
            size: stats.size,
            speed: stats.speed,
            tier,
        }
    }

    fn powerup_on_player(session: &GameSession, kind: PowerupKind) -> Powerup {
        let (x, y) = session.player.center();
        Powerup {
            x,
            y,
            kind,
            radius: 15.0,
            pulse: 0.0,
            opacity: 1.0,
            spawned_at: Duration::ZERO,
        }
    }

    // Starts the session and clears whatever the first tick spawned.
    fn started_empty(now: Duration) -> GameSession {
        let mut s = session();
        s.tick(now);
        s.enemies.clear();
        s.coins.clear();
        s.powerups.clear();
        s
    }

    type Observable = (
        RunState,
        PlayClock,
        Scheduler,
        WavePlanner,
        ShieldState,
        Player,
        EnemyRoster,
        Vec<Coin>,
        Vec<Powerup>,
        u32,
        Duration,
    );

    fn observable(s: &GameSession) -> Observable {
        (
            s.state,
            s.clock.clone(),
            s.scheduler.clone(),
            s.planner.clone(),
            s.shield.clone(),
            s.player.clone(),
            s.enemies.clone(),
            s.coins.clone(),
            s.powerups.clone(),
            s.coin_count,
            s.survival_time,
        )
    }

    #[test]
    fn when_first_tick_runs_then_clock_starts_and_first_wave_and_coin_spawn() {
        let mut s = session();
        assert_eq!(s.run_state(), RunState::NotStarted);

        let report = s.tick(secs(3.0));

        assert_eq!(s.run_state(), RunState::Running);
        assert_eq!(s.elapsed(secs(5.0)), secs(2.0));
        assert_eq!(s.enemies().normal.len(), 1);
        assert!(s.enemies().fast.is_empty());
        assert_eq!(s.coins().len(), 1);
        assert!(s.powerups().is_empty());
        assert!(report.frame.is_some());
    }

    #[test]
    fn when_enemy_approaches_from_top_then_it_moves_down_toward_player_without_collision() {
        let mut s = started_empty(secs(0.0));
        let (px, _) = s.player.center();
        s.enemies.push(enemy_at(EnemyTier::Normal, px - 7.5 - 40.0, 0.0));

        let report = s.tick(secs(0.016));

        let e = &s.enemies().normal[0];
        assert!(e.y > 0.0);
        assert!(e.x > px - 7.5 - 40.0);
        assert_eq!(s.run_state(), RunState::Running);
        assert!(
            !report
                .events
                .iter()
                .any(|ev| matches!(ev, SessionEvent::GameOver { .. }))
        );
    }

    #[test]
    fn when_unshielded_player_is_hit_then_game_is_over_and_survival_time_frozen() {
        let mut s = started_empty(secs(0.0));
        let (x, y) = (s.player.x, s.player.y);
        s.enemies.push(enemy_at(EnemyTier::Normal, x, y));

        let report = s.tick(secs(12.5));

        assert_eq!(s.run_state(), RunState::GameOver);
        assert_eq!(
            report.events.last(),
            Some(&SessionEvent::GameOver {
                survival_time: secs(12.5)
            })
        );
        assert!(report.frame.is_none());
        assert_eq!(s.elapsed(secs(100.0)), secs(12.5));
        assert!(s.tick(secs(13.0)).events.is_empty());
    }

    #[test]
    fn when_shielded_player_is_hit_twice_then_first_is_absorbed_and_second_ignored() {
        let mut s = started_empty(secs(0.0));
        s.shield.grant_shield();
        let (x, y) = (s.player.x, s.player.y);
        s.enemies.push(enemy_at(EnemyTier::Normal, x, y));

        let first = s.tick(secs(1.0));
        let second = s.tick(secs(1.5));

        assert_eq!(s.run_state(), RunState::Running);
        assert!(s.shield().is_invincible());
        assert!(!s.shield().is_shielded());
        assert!(
            first
                .events
                .contains(&SessionEvent::Announced(ABSORBED_ANNOUNCEMENT.to_string()))
        );
        assert!(second.events.is_empty());
        assert!(second.frame.expect("frame").invincible);
    }

    #[test]
    fn when_invincibility_runs_out_then_next_hit_is_fatal() {
        let mut s = started_empty(secs(0.0));
        s.shield.grant_shield();
        let (x, y) = (s.player.x, s.player.y);
        s.enemies.push(enemy_at(EnemyTier::Normal, x, y));
        s.tick(secs(1.0));

        s.tick(secs(2.1));

        assert_eq!(s.run_state(), RunState::GameOver);
    }

    #[test]
    fn when_bomb_is_picked_up_then_every_enemy_tier_is_cleared() {
        let mut s = started_empty(secs(0.0));
        s.enemies.push(enemy_at(EnemyTier::Normal, 0.0, 0.0));
        s.enemies.push(enemy_at(EnemyTier::Fast, 700.0, 0.0));
        s.enemies.push(enemy_at(EnemyTier::Slow, 0.0, 500.0));
        let bomb = powerup_on_player(&s, PowerupKind::Bomb);
        s.powerups.push(bomb);

        let report = s.tick(secs(0.5));

        assert!(s.enemies().is_empty());
        assert!(s.powerups().is_empty());
        assert!(
            report
                .events
                .contains(&SessionEvent::Announced(BOMB_ANNOUNCEMENT.to_string()))
        );
    }

    #[test]
    fn when_shield_is_picked_up_then_shield_is_active() {
        let mut s = started_empty(secs(0.0));
        let shield = powerup_on_player(&s, PowerupKind::Shield);
        s.powerups.push(shield);

        let report = s.tick(secs(0.5));

        assert!(s.shield().is_shielded());
        assert!(report.frame.expect("frame").shield_active);
        assert!(s.powerups().is_empty());
    }

    #[test]
    fn when_shield_is_reached_while_invincible_then_it_stays_on_the_field() {
        let mut s = started_empty(secs(0.0));
        s.shield.grant_shield();
        s.shield.on_hit(secs(0.0));
        let shield = powerup_on_player(&s, PowerupKind::Shield);
        s.powerups.push(shield);

        s.tick(secs(0.5));

        assert!(s.shield().is_invincible());
        assert_eq!(s.powerups().len(), 1);
    }

    #[test]
    fn when_coin_is_reached_then_count_increments_and_coin_is_removed() {
        let mut s = started_empty(secs(0.0));
        let (x, y) = s.player.center();
        s.coins.push(Coin { x, y, radius: 6.0 });

        let report = s.tick(secs(0.5));

        assert_eq!(s.coin_count(), 1);
        assert!(s.coins().is_empty());
        assert!(
            report
                .events
                .contains(&SessionEvent::Announced("+1 Coin (Total: 1)".to_string()))
        );
        assert!(
            report
                .events
                .contains(&SessionEvent::CoinCollected { total: 1 })
        );
    }

    #[test]
    fn when_paused_for_five_seconds_then_elapsed_after_resume_is_unchanged() {
        let mut s = started_empty(secs(0.0));
        s.tick(secs(10.0));

        assert_eq!(s.toggle_pause(secs(10.0)), Some(RunState::Paused));
        assert!(s.tick(secs(12.0)).frame.is_none());
        assert_eq!(s.toggle_pause(secs(15.0)), Some(RunState::Running));

        let elapsed = s.elapsed(secs(15.0));
        assert!((elapsed.as_secs_f64() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn when_pause_is_toggled_before_start_or_after_game_over_then_nothing_changes() {
        let mut s = session();
        assert_eq!(s.toggle_pause(secs(1.0)), None);

        let mut s = started_empty(secs(0.0));
        let (x, y) = (s.player.x, s.player.y);
        s.enemies.push(enemy_at(EnemyTier::Normal, x, y));
        s.tick(secs(1.0));

        assert_eq!(s.toggle_pause(secs(2.0)), None);
        assert_eq!(s.run_state(), RunState::GameOver);
    }

    #[test]
    fn when_game_is_over_then_key_presses_are_ignored() {
        let mut s = started_empty(secs(0.0));
        let (x, y) = (s.player.x, s.player.y);
        s.enemies.push(enemy_at(EnemyTier::Normal, x, y));
        s.tick(secs(1.0));

        s.press(Control::Right);

        assert_eq!(s.player().dx, 0.0);
    }

    #[test]
    fn when_keys_are_pressed_and_released_then_velocity_follows() {
        let mut s = session();

        s.press(Control::Right);
        s.press(Control::Up);
        assert_eq!((s.player().dx, s.player().dy), (7.0, -7.0));

        s.release(Control::Left);
        assert_eq!((s.player().dx, s.player().dy), (0.0, -7.0));
        s.release(Control::Down);
        assert_eq!(s.player().dy, 0.0);
    }

    #[test]
    fn when_reset_from_any_state_then_initial_state_is_identical() {
        let baseline = observable(&session());

        let mut running = session();
        running.press(Control::Down);
        for i in 0..120 {
            running.tick(secs(i as f64 * 0.5));
        }
        running.coin_count = 4;
        running.reset();
        assert_eq!(observable(&running), baseline);

        let mut paused = session();
        paused.tick(secs(0.0));
        paused.pause(secs(1.0));
        paused.reset();
        assert_eq!(observable(&paused), baseline);

        let mut over = started_empty(secs(0.0));
        let (x, y) = (over.player.x, over.player.y);
        over.enemies.push(enemy_at(EnemyTier::Normal, x, y));
        over.tick(secs(3.0));
        over.reset();
        over.reset();
        assert_eq!(observable(&over), baseline);
        assert_eq!(over.clock.total_paused(), Duration::ZERO);
    }

    #[test]
    fn when_fifty_seconds_pass_then_fast_enemies_join_the_wave_with_one_announcement() {
        let mut s = session();
        let mut announcements = Vec::new();
        let mut t = 0.0;
        while t <= 60.0 {
            let report = s.tick(secs(t));
            // Keep the player alive; only spawning is under test.
            s.enemies.normal.clear();
            announcements.extend(report.events.into_iter().filter_map(|ev| match ev {
                SessionEvent::Announced(text) if text == FAST_ANNOUNCEMENT => Some(t),
                _ => None,
            }));
            t += 0.5;
        }

        assert_eq!(announcements, vec![50.0]);
        assert!(!s.enemies().fast.is_empty());
    }

    #[test]
    fn when_coin_cap_is_reached_then_no_more_coins_spawn() {
        let mut s = started_empty(secs(0.0));
        for i in 0..10 {
            s.coins.push(Coin {
                x: 5.0 + i as f32,
                y: 5.0,
                radius: 6.0,
            });
        }

        for i in 1..200 {
            s.tick(secs(i as f64));
            s.enemies.clear();
        }

        assert_eq!(s.coins().len(), 10);
    }

    #[test]
    fn when_disposed_after_game_over_then_summary_reports_survival_time() {
        let mut s = started_empty(secs(0.0));
        let (x, y) = s.player.center();
        s.coins.push(Coin { x, y, radius: 6.0 });
        s.tick(secs(1.0));
        let (x, y) = (s.player.x, s.player.y);
        s.enemies.push(enemy_at(EnemyTier::Normal, x, y));
        s.tick(secs(4.0));

        let summary = s.dispose();

        assert_eq!(summary.coins_collected, 1);
        assert_eq!(summary.survival_time, Some(secs(4.0)));
        assert_eq!(summary.frames, 2);
    }

    #[test]
    fn when_wallet_updates_arrive_out_of_order_then_highest_balance_is_kept() {
        let mut s = started_empty(secs(0.0));
        assert_eq!(s.hud(secs(0.0)).wallet_coins, None);

        s.set_wallet_coins(12);
        s.set_wallet_coins(11);

        assert_eq!(s.hud(secs(0.5)).wallet_coins, Some(12));

        s.set_wallet_coins(13);

        assert_eq!(s.hud(secs(1.0)).wallet_coins, Some(13));
    }
}
