//! Property tests for the frame step invariants

use glam::Vec2;
use proptest::prelude::*;

use space_survival::Settings;
use space_survival::sim::{Action, GameState, PowerUpKind, Rock, tick};

fn actions() -> impl Strategy<Value = Vec<Action>> {
    prop::collection::vec((0..Action::COUNT).prop_map(Action::from_index), 1..400)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn health_stays_in_range(seed in any::<u64>(), actions in actions()) {
        let mut state = GameState::new(&Settings::with_seed(seed));
        for action in actions {
            tick(&mut state, action);
            prop_assert!(state.player.health >= 0);
            prop_assert!(state.player.health <= state.player.max_health);
        }
    }

    #[test]
    fn rock_population_is_constant(seed in any::<u64>(), actions in actions()) {
        let mut state = GameState::new(&Settings::with_seed(seed));
        let population = state.world.rock_count();
        for action in actions {
            tick(&mut state, action);
            prop_assert_eq!(state.world.rock_count(), population);
        }
    }

    #[test]
    fn score_only_grows_by_kills(seed in any::<u64>(), actions in actions()) {
        let mut state = GameState::new(&Settings::with_seed(seed));
        for action in actions {
            let before = state.score;
            let report = tick(&mut state, action);
            prop_assert!(state.score >= before);
            prop_assert_eq!(state.score - before, report.score_delta);
            prop_assert_eq!(report.score_delta % 2, 0);
            prop_assert_eq!(report.score_delta == 0, report.rocks_destroyed == 0);
            prop_assert_eq!(report.flags.is_hit_rock, report.rocks_destroyed > 0);
        }
    }

    #[test]
    fn shields_never_overheal(start in 1..=100i32, shields in 1..10usize) {
        let mut state = GameState::new(&Settings::default());
        state.player.health = start;
        let center = state.player.center();
        for _ in 0..shields {
            state.spawn_power(PowerUpKind::Shield, center);
        }
        tick(&mut state, Action::Idle);
        let expected = (start + 20 * shields as i32).min(100);
        prop_assert_eq!(state.player.health, expected);
    }

    #[test]
    fn rock_hit_costs_its_radius(start in 31..=100i32, radius in 12..=30u32) {
        let mut state = GameState::new(&Settings::default());
        state.player.health = start;
        let center = state.player.center();
        state.spawn_rock(Rock::stationary(center, radius));
        let report = tick(&mut state, Action::Idle);
        prop_assert!(report.flags.is_collided);
        prop_assert_eq!(state.player.health, start - radius as i32);
        prop_assert_eq!(state.player.lives, 3);
    }

    #[test]
    fn terminal_state_is_frozen(seed in any::<u64>(), actions in actions()) {
        let settings = Settings {
            start_lives: 1,
            ..Settings::with_seed(seed)
        };
        let mut state = GameState::new(&settings);
        let center = state.player.center();
        state.spawn_rock(Rock::stationary(center + Vec2::new(0.0, -5.0), 100));
        prop_assert!(tick(&mut state, Action::Idle).terminal);

        let (lives, health, score, frame) =
            (state.player.lives, state.player.health, state.score, state.frame);
        for action in actions {
            let report = tick(&mut state, action);
            prop_assert!(report.terminal);
            prop_assert!(!state.running);
            prop_assert_eq!(state.player.lives, lives);
            prop_assert_eq!(state.player.health, health);
            prop_assert_eq!(state.score, score);
            prop_assert_eq!(state.frame, frame);
        }
    }
}
