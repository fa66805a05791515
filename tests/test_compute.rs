use space_invaders::actors::Explosion;
use space_invaders::compute::*;
use space_invaders::entities::*;
use space_invaders::events::{EventQueue, GameEvent, HeldKeys, Key};
use space_invaders::formation::Formation;
use space_invaders::output::{DrawKey, Frame, HudItem, Sound};
use space_invaders::tuning::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn started() -> (GameScene, EventQueue) {
    let mut events = EventQueue::new();
    let mut scene = GameScene::new(0);
    scene.new_game(&mut events, 0);
    (scene, events)
}

fn update(scene: &mut GameScene, events: &mut EventQueue, now: u64) -> (PlayOutcome, Frame) {
    update_held(scene, events, now, HeldKeys::default())
}

fn update_held(
    scene: &mut GameScene,
    events: &mut EventQueue,
    now: u64,
    held: HeldKeys,
) -> (PlayOutcome, Frame) {
    let mut frame = Frame::default();
    let outcome = scene.update(now, held, events, &mut seeded_rng(), &mut frame);
    (outcome, frame)
}

// ── new_game / new_round ──────────────────────────────────────────────────────

#[test]
fn new_game_sets_up_first_round() {
    let (scene, events) = started();
    assert_eq!(scene.session.score, 0);
    assert_eq!(scene.session.lives, STARTING_LIVES);
    assert_eq!(scene.session.round, 0);
    assert_eq!(scene.field.formation.len(), 50);
    assert_eq!(scene.field.blockers.len(), 144);
    let ship = scene.field.ship.as_ref().expect("ship");
    assert_eq!(ship.rect, Rect::new(375, 540, 50, 48));
    assert!(events.is_scheduled(GameEvent::EnemyShoot));
    assert!(events.is_scheduled(GameEvent::MysterySpawn));
}

#[test]
fn new_round_goes_deeper_and_keeps_wall_damage() {
    let (mut scene, mut events) = started();
    scene.session.score = 420;
    scene.field.blockers.truncate(100);
    scene.field.player_bullets.push(Bullet::new(EntityId(900), 100, 100, BulletOwner::Player, 0));

    scene.new_round(&mut events, 5000);
    assert_eq!(scene.session.round, 1);
    assert_eq!(scene.session.enemy_position, ENEMY_DEFAULT_POSITION + ENEMY_MOVE_DOWN);
    assert_eq!(scene.session.score, 420);
    assert_eq!(scene.field.blockers.len(), 100);
    assert!(scene.field.player_bullets.is_empty());
    assert_eq!(scene.field.formation.get(0, 0).map(|e| e.rect.y), Some(100));
}

#[test]
fn new_game_restores_walls() {
    let (mut scene, mut events) = started();
    scene.field.blockers.clear();
    scene.session.lives = 0;
    scene.new_game(&mut events, 10);
    assert_eq!(scene.field.blockers.len(), 144);
    assert_eq!(scene.session.lives, STARTING_LIVES);
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn single_shot_while_none_live() {
    let (mut scene, _) = started();
    let mut frame = Frame::default();
    scene.fire(0, &mut frame);
    assert_eq!(scene.field.player_bullets.len(), 1);
    assert_eq!(scene.field.player_bullets[0].rect, Rect::new(398, 545, 5, 15));
    assert!(frame.played(Sound::Shoot));

    let mut frame = Frame::default();
    scene.fire(1, &mut frame);
    assert_eq!(scene.field.player_bullets.len(), 1);
    assert!(frame.audio.is_empty());
}

#[test]
fn double_shot_from_threshold_score() {
    let (mut scene, _) = started();
    scene.session.score = DOUBLE_SHOT_SCORE;
    let mut frame = Frame::default();
    scene.fire(0, &mut frame);
    let xs: Vec<i32> = scene.field.player_bullets.iter().map(|b| b.rect.x).collect();
    assert_eq!(xs, vec![383, 413]);
    assert!(frame.played(Sound::ShootDouble));
}

#[test]
fn no_shot_without_ship() {
    let (mut scene, _) = started();
    scene.field.ship = None;
    scene.fire(0, &mut Frame::default());
    assert!(scene.field.player_bullets.is_empty());
}

#[test]
fn fire_key_goes_through_the_queue() {
    let (mut scene, mut events) = started();
    events.push(GameEvent::KeyDown(Key::Fire));
    let (outcome, frame) = update(&mut scene, &mut events, 1);
    assert_eq!(outcome, PlayOutcome::Continue);
    assert_eq!(scene.field.player_bullets.len(), 1);
    assert!(frame.played(Sound::Shoot));
}

// ── Queued events ─────────────────────────────────────────────────────────────

#[test]
fn enemy_shoot_comes_from_a_bottom_enemy() {
    let (mut scene, mut events) = started();
    events.push(GameEvent::EnemyShoot);
    update(&mut scene, &mut events, 1);
    assert_eq!(scene.field.enemy_bullets.len(), 1);
    let bullet = &scene.field.enemy_bullets[0];
    assert_eq!(bullet.rect.y, 65 + 4 * 45 + 20);
    assert_eq!((bullet.rect.x - 154 - 14) % 50, 0);
    assert_eq!(bullet.owner, BulletOwner::Enemy);
}

#[test]
fn escape_release_quits() {
    let (mut scene, mut events) = started();
    events.push(GameEvent::KeyUp(Key::Escape));
    assert_eq!(update(&mut scene, &mut events, 1).0, PlayOutcome::Quit);
}

#[test]
fn formation_moves_cycle_four_notes() {
    let (mut scene, mut events) = started();
    let mut now = 0;
    let mut notes = Vec::new();
    for _ in 0..5 {
        now += MOVE_INTERVAL_DEFAULT + 1;
        let (_, frame) = update(&mut scene, &mut events, now);
        notes.extend(frame.audio.iter().filter_map(|cue| match cue {
            space_invaders::AudioCue::Play(Sound::FormationNote(n)) => Some(*n),
            _ => None,
        }));
    }
    assert_eq!(notes, vec![0, 1, 2, 3, 0]);
}

#[test]
fn mystery_spawns_from_the_left_by_default() {
    let (mut scene, mut events) = started();
    events.push(GameEvent::MysterySpawn);
    let (_, frame) = update(&mut scene, &mut events, 1);
    let mystery = scene.field.mystery.as_ref().expect("mystery");
    assert_eq!(mystery.rect.x, MYSTERY_LEFT_EDGE);
    assert_eq!(mystery.rect.y, MYSTERY_Y);
    assert!(MYSTERY_REWARDS.contains(&mystery.score));
    assert!(frame.played(Sound::MysteryEntered));
}

#[test]
fn mystery_leaving_reverses_and_rearms() {
    let (mut scene, mut events) = started();
    events.cancel(GameEvent::MysterySpawn);
    scene.field.mystery = Some(Mystery {
        id: EntityId(77),
        rect: Rect::new(799, MYSTERY_Y, MYSTERY_WIDTH, MYSTERY_HEIGHT),
        score: 50,
        velocity: MYSTERY_DEFAULT_VELOCITY,
        timer: 0,
    });
    update(&mut scene, &mut events, 21);
    assert!(scene.field.mystery.is_none());
    assert_eq!(scene.session.mystery_velocity, -MYSTERY_DEFAULT_VELOCITY);
    assert!(events.is_scheduled(GameEvent::MysterySpawn));

    events.push(GameEvent::MysterySpawn);
    update(&mut scene, &mut events, 22);
    let mystery = scene.field.mystery.as_ref().expect("mystery");
    assert_eq!(mystery.rect.x, MYSTERY_RIGHT_EDGE);
    assert_eq!(mystery.velocity, -MYSTERY_DEFAULT_VELOCITY);
}

// ── Actor timers ──────────────────────────────────────────────────────────────

#[test]
fn held_keys_move_the_ship() {
    let (mut scene, mut events) = started();
    let left = HeldKeys { left: true, right: false };
    update_held(&mut scene, &mut events, 21, left);
    assert_eq!(scene.field.ship.as_ref().map(|s| s.rect.x), Some(370));
    // Too soon for another step
    update_held(&mut scene, &mut events, 30, left);
    assert_eq!(scene.field.ship.as_ref().map(|s| s.rect.x), Some(370));
}

#[test]
fn ship_returns_after_its_explosion() {
    let (mut scene, mut events) = started();
    let wreck = scene.field.ship.take().expect("ship");
    scene.field.explosions.push(Explosion::ship(EntityId(99), &wreck, 0));

    update(&mut scene, &mut events, 900);
    assert!(scene.field.ship.is_none());
    assert_eq!(scene.field.explosions.len(), 1);

    update(&mut scene, &mut events, 901);
    assert!(scene.field.explosions.is_empty());
    assert!(scene.field.ship.is_none());

    update(&mut scene, &mut events, 902);
    let ship = scene.field.ship.as_ref().expect("respawned");
    assert_eq!(ship.rect.x, SHIP_START_X);
}

#[test]
fn bullets_leave_the_field() {
    let (mut scene, mut events) = started();
    scene
        .field
        .player_bullets
        .push(Bullet::new(EntityId(900), 20, 20, BulletOwner::Player, 0));
    update(&mut scene, &mut events, 21);
    assert!(scene.field.player_bullets.is_empty());
}

// ── Round end ─────────────────────────────────────────────────────────────────

#[test]
fn round_clears_only_when_nothing_is_left() {
    let (mut scene, mut events) = started();
    scene.field.formation = Formation::empty(ENEMY_ROWS, ENEMY_COLUMNS, 0);
    scene
        .field
        .enemy_bullets
        .push(Bullet::new(EntityId(900), 100, 300, BulletOwner::Enemy, 0));
    assert!(!scene.is_round_clear());
    assert_eq!(update(&mut scene, &mut events, 1).0, PlayOutcome::Continue);

    scene.field.enemy_bullets.clear();
    assert!(scene.is_round_clear());
    assert_eq!(update(&mut scene, &mut events, 2).0, PlayOutcome::RoundCleared);
}

// ── HUD ───────────────────────────────────────────────────────────────────────

#[test]
fn hud_hides_spent_life_slots() {
    let (mut scene, _) = started();
    scene.session.lives = 1;
    let mut frame = Frame::default();
    render_hud(&scene.session, &mut frame);

    let slot = |n: u8| {
        frame
            .draws
            .iter()
            .find(|d| d.key == DrawKey::Hud(HudItem::LifeSlot(n)))
            .map(|d| (d.rect.x, d.visible))
    };
    assert_eq!(slot(0), Some((715, true)));
    assert_eq!(slot(1), Some((742, false)));
    assert_eq!(slot(2), Some((769, false)));
}

#[test]
fn render_draws_every_enemy_and_cell() {
    let (scene, _) = started();
    let mut frame = Frame::default();
    scene.render(&mut frame);
    let enemies = frame
        .draws
        .iter()
        .filter(|d| matches!(d.key, DrawKey::Enemy { .. }))
        .count();
    let cells = frame
        .draws
        .iter()
        .filter(|d| matches!(d.key, DrawKey::Blocker(_)))
        .count();
    assert_eq!(enemies, 50);
    assert_eq!(cells, 144);
}
