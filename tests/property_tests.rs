//! Properties that hold for every valid raid, checked over random rosters and seeds.

use proptest::prelude::*;
use raidsim::combat::{
    simulate_raid_with, BossProfile, Combatant, Outcome, RaidConfig, Rng, TraceMode,
    HEALTH_BAR_SEGMENTS,
};

fn combatant() -> impl Strategy<Value = Combatant> {
    ("[a-z]{1,8}", 0_i64..=500, 1_i64..=1_000)
        .prop_map(|(name, attack, hp)| Combatant::new(name, attack, hp))
}

fn boss() -> impl Strategy<Value = BossProfile> {
    (0_i64..=600, 1_i64..=20_000, -5_i64..=50).prop_map(|(attack, health, speed)| BossProfile {
        attack,
        health,
        speed,
    })
}

fn config() -> impl Strategy<Value = RaidConfig> {
    (1_u32..=40, any::<bool>()).prop_map(|(max_turns, trace)| RaidConfig {
        max_turns,
        trace_mode: if trace {
            TraceMode::Entries
        } else {
            TraceMode::Off
        },
    })
}

proptest! {
    #[test]
    fn raids_terminate_within_the_turn_cap(
        team in prop::collection::vec(combatant(), 1..6),
        boss in boss(),
        config in config(),
        seed in any::<u64>(),
    ) {
        let result = simulate_raid_with(&team, &boss, config, &mut Rng::new(seed)).unwrap();
        prop_assert!(result.turns_taken >= 1);
        prop_assert!(result.turns_taken <= config.max_turns);
        prop_assert_eq!(result.turns.len(), result.turns_taken as usize);
    }

    #[test]
    fn pools_never_increase(
        team in prop::collection::vec(combatant(), 1..6),
        boss in boss(),
        seed in any::<u64>(),
    ) {
        let mut rng = Rng::new(seed);
        let result = simulate_raid_with(&team, &boss, RaidConfig::default(), &mut rng).unwrap();
        let mut boss_hp = boss.health;
        let mut team_hp: i64 = team.iter().map(|c| c.hp).sum();
        for turn in &result.turns {
            prop_assert!(turn.boss_hp <= boss_hp);
            prop_assert!(turn.team_hp <= team_hp);
            prop_assert!(turn.health_segments <= HEALTH_BAR_SEGMENTS);
            boss_hp = turn.boss_hp;
            team_hp = turn.team_hp;
        }
    }

    #[test]
    fn win_means_boss_at_zero_and_cap_means_loss(
        team in prop::collection::vec(combatant(), 1..6),
        boss in boss(),
        config in config(),
        seed in any::<u64>(),
    ) {
        let result = simulate_raid_with(&team, &boss, config, &mut Rng::new(seed)).unwrap();
        prop_assert_eq!(result.win, result.final_boss_hp == 0);
        prop_assert_eq!(result.win, result.outcome == Outcome::BossDefeated);
        if result.final_boss_hp > 0 && result.final_team_hp > 0 {
            prop_assert_eq!(result.outcome, Outcome::TurnCapExhausted);
            prop_assert_eq!(result.turns_taken, config.max_turns);
        }
        prop_assert!(result.final_boss_hp >= 0 && result.final_team_hp >= 0);
    }

    #[test]
    fn damage_stays_inside_variance_bands(
        team in prop::collection::vec(combatant(), 1..6),
        boss in boss(),
        seed in any::<u64>(),
    ) {
        let mut rng = Rng::new(seed);
        let result = simulate_raid_with(&team, &boss, RaidConfig::default(), &mut rng).unwrap();
        let boss_floor = ((boss.attack as f64) * 0.8).floor() as i64;
        let boss_ceiling = ((boss.attack as f64) * 1.2).floor() as i64;
        for turn in &result.turns {
            for (strike, member) in turn.strikes.iter().zip(&team) {
                let low = ((member.attack as f64) * 0.6).floor() as i64;
                let high = ((member.attack as f64) * 1.5).floor() as i64;
                prop_assert!(strike.damage >= low && strike.damage <= high);
            }
            if let Some(damage) = turn.boss_damage {
                prop_assert!(damage >= boss_floor && damage <= boss_ceiling);
            }
        }
    }

    #[test]
    fn identical_seeds_replay_identically(
        team in prop::collection::vec(combatant(), 1..6),
        boss in boss(),
        config in config(),
        seed in any::<u64>(),
    ) {
        let first = simulate_raid_with(&team, &boss, config, &mut Rng::new(seed)).unwrap();
        let second = simulate_raid_with(&team, &boss, config, &mut Rng::new(seed)).unwrap();
        prop_assert_eq!(first.render_text(), second.render_text());
        prop_assert_eq!(first, second);
    }
}
