use space_invaders::events::*;

#[test]
fn pending_events_drain_in_arrival_order() {
    let mut queue = EventQueue::new();
    queue.push(GameEvent::KeyDown(Key::Fire));
    queue.push(GameEvent::SpawnShip);
    queue.push(GameEvent::KeyUp(Key::Left));
    assert_eq!(queue.len(), 3);
    assert_eq!(
        queue.drain(),
        vec![
            GameEvent::KeyDown(Key::Fire),
            GameEvent::SpawnShip,
            GameEvent::KeyUp(Key::Left),
        ]
    );
    assert!(queue.is_empty());
}

#[test]
fn one_shot_timer_fires_once() {
    let mut queue = EventQueue::new();
    queue.schedule_once(GameEvent::MysterySpawn, 100, 0);
    queue.poll_timers(99);
    assert!(queue.is_empty());
    queue.poll_timers(100);
    assert_eq!(queue.drain(), vec![GameEvent::MysterySpawn]);
    assert!(!queue.is_scheduled(GameEvent::MysterySpawn));
    queue.poll_timers(10_000);
    assert!(queue.is_empty());
}

#[test]
fn rescheduling_replaces_the_old_timer() {
    let mut queue = EventQueue::new();
    queue.schedule_once(GameEvent::MysterySpawn, 100, 0);
    queue.schedule_once(GameEvent::MysterySpawn, 100, 500);
    queue.poll_timers(200);
    assert!(queue.is_empty());
    queue.poll_timers(601);
    assert_eq!(queue.drain(), vec![GameEvent::MysterySpawn]);
}

#[test]
fn periodic_timer_repeats_and_collapses_missed_periods() {
    let mut queue = EventQueue::new();
    queue.schedule_every(GameEvent::EnemyShoot, 700, 0);
    queue.poll_timers(701);
    assert_eq!(queue.drain(), vec![GameEvent::EnemyShoot]);
    queue.poll_timers(1000);
    assert!(queue.is_empty());
    // Three periods late: still a single firing
    queue.poll_timers(3500);
    assert_eq!(queue.drain(), vec![GameEvent::EnemyShoot]);
    assert!(queue.is_scheduled(GameEvent::EnemyShoot));
}

#[test]
fn due_timers_are_ordered_by_fire_time() {
    let mut queue = EventQueue::new();
    queue.schedule_once(GameEvent::MysterySpawn, 300, 0);
    queue.schedule_every(GameEvent::EnemyShoot, 200, 0);
    queue.poll_timers(350);
    assert_eq!(
        queue.drain(),
        vec![GameEvent::EnemyShoot, GameEvent::MysterySpawn]
    );
}

#[test]
fn cancel_and_clear() {
    let mut queue = EventQueue::new();
    queue.schedule_every(GameEvent::EnemyShoot, 10, 0);
    queue.cancel(GameEvent::EnemyShoot);
    queue.poll_timers(100);
    assert!(queue.is_empty());

    queue.schedule_once(GameEvent::MysterySpawn, 10, 0);
    queue.push(GameEvent::SpawnShip);
    queue.clear_pending();
    assert!(queue.is_empty());
    assert!(queue.is_scheduled(GameEvent::MysterySpawn));

    queue.push(GameEvent::SpawnShip);
    queue.clear();
    assert!(queue.is_empty());
    assert!(!queue.is_scheduled(GameEvent::MysterySpawn));
}

#[test]
fn quit_requests() {
    assert!(GameEvent::Quit.is_quit());
    assert!(GameEvent::KeyUp(Key::Escape).is_quit());
    assert!(!GameEvent::KeyDown(Key::Escape).is_quit());
    assert!(!GameEvent::KeyUp(Key::Fire).is_quit());
}
