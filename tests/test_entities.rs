use coin_dodge::entities::*;

fn enemy_at(x: i8, y: i8) -> Enemy {
    Enemy {
        loc: Point::new(x, y),
        tier: SpeedTier::Mid,
        heading: Heading::Right,
        move_timer: SpeedTier::Mid.interval(),
    }
}

// ── Spawn constructor ─────────────────────────────────────────────────────────

#[test]
fn spawn_starts_at_edge_matching_heading() {
    let right = Enemy::spawn(0, Heading::Right, SpeedTier::Slow);
    assert_eq!(right.loc, Point::new(0, 0));

    let left = Enemy::spawn(1, Heading::Left, SpeedTier::Fast);
    assert_eq!(left.loc, Point::new(15, 1));
}

#[test]
fn spawn_preloads_move_timer_from_tier() {
    assert_eq!(Enemy::spawn(0, Heading::Right, SpeedTier::Slow).move_timer, 6);
    assert_eq!(Enemy::spawn(0, Heading::Right, SpeedTier::Mid).move_timer, 5);
    assert_eq!(Enemy::spawn(0, Heading::Right, SpeedTier::Fast).move_timer, 4);
}

// ── Pool push ─────────────────────────────────────────────────────────────────

#[test]
fn push_tracks_len_and_row_counts() {
    let mut pool = EnemyPool::new();
    pool.push(enemy_at(0, 0));
    pool.push(enemy_at(0, 1));
    pool.push(enemy_at(15, 1));

    assert_eq!(pool.len(), 3);
    assert_eq!(pool.row_count(0), 1);
    assert_eq!(pool.row_count(1), 2);
}

#[test]
fn push_into_full_pool_is_noop() {
    let mut pool = EnemyPool::new();
    for _ in 0..MAX_ENEMIES {
        pool.push(enemy_at(0, 0));
    }
    assert!(pool.is_full());

    pool.push(enemy_at(5, 1));
    assert_eq!(pool.len(), MAX_ENEMIES);
    assert_eq!(pool.row_count(1), 0); // rejected push left no trace
}

// ── Pool remove ───────────────────────────────────────────────────────────────

#[test]
fn remove_compacts_preserving_order() {
    let mut pool = EnemyPool::new();
    pool.push(enemy_at(1, 0));
    pool.push(enemy_at(2, 1));
    pool.push(enemy_at(3, 0));

    pool.remove(0);

    assert_eq!(pool.len(), 2);
    assert_eq!(pool.get(0).unwrap().loc, Point::new(2, 1));
    assert_eq!(pool.get(1).unwrap().loc, Point::new(3, 0));
}

#[test]
fn remove_decrements_matching_row_count() {
    let mut pool = EnemyPool::new();
    pool.push(enemy_at(1, 0));
    pool.push(enemy_at(2, 1));

    pool.remove(1);
    assert_eq!(pool.row_count(0), 1);
    assert_eq!(pool.row_count(1), 0);
}

#[test]
fn remove_out_of_range_index_is_noop() {
    let mut pool = EnemyPool::new();
    pool.push(enemy_at(1, 0));

    pool.remove(5);
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.row_count(0), 1);
}

#[test]
fn row_counts_always_sum_to_len() {
    let mut pool = EnemyPool::new();
    pool.push(enemy_at(1, 0));
    pool.push(enemy_at(2, 1));
    pool.push(enemy_at(3, 1));
    pool.remove(1);
    pool.push(enemy_at(4, 0));
    pool.remove(0);

    let sum = pool.row_count(0) + pool.row_count(1);
    assert_eq!(sum as usize, pool.len());
}

#[test]
fn row_count_invalid_row_answers_zero() {
    let mut pool = EnemyPool::new();
    pool.push(enemy_at(1, 0));
    assert_eq!(pool.row_count(-1), 0);
    assert_eq!(pool.row_count(5), 0);
}

#[test]
fn clear_empties_pool_and_counters() {
    let mut pool = EnemyPool::new();
    pool.push(enemy_at(1, 0));
    pool.push(enemy_at(2, 1));

    pool.clear();
    assert!(pool.is_empty());
    assert_eq!(pool.row_count(0), 0);
    assert_eq!(pool.row_count(1), 0);
}

// ── Boot state ────────────────────────────────────────────────────────────────

#[test]
fn fresh_state_matches_boot_values() {
    let state = GameState::new();
    assert_eq!(state.player.loc, Point::new(8, 0));
    assert_eq!(state.player.glyph, PLAYER_START_GLYPH);
    assert!(state.player.carrying); // money relocates on the first play tick
    assert!(state.enemies.is_empty());
    assert_eq!(state.phase, Phase::Menu);
    assert_eq!(state.last_key, 0);
}
