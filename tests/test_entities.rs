use space_invaders::entities::*;
use space_invaders::tuning::*;

#[test]
fn rect_overlap_and_touching_edges() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(a.collides(&Rect::new(5, 5, 10, 10)));
    assert!(a.collides(&Rect::new(-5, 2, 6, 2)));
    // Shared edge only, no interior overlap
    assert!(!a.collides(&Rect::new(10, 0, 10, 10)));
    assert!(!a.collides(&Rect::new(0, 10, 10, 10)));
    assert_eq!(a.right(), 10);
    assert_eq!(a.bottom(), 10);
}

#[test]
fn enemy_slot_position_and_value() {
    let e = Enemy::at_slot(0, 0, ENEMY_DEFAULT_POSITION);
    assert_eq!(e.rect, Rect::new(154, 65, 40, 35));
    assert_eq!(e.score, 30);

    let e = Enemy::at_slot(4, 9, 100);
    assert_eq!(e.rect.x, 154 + 9 * 50);
    assert_eq!(e.rect.y, 100 + 4 * 45);
    assert_eq!(e.score, 10);

    assert_eq!(Enemy::at_slot(1, 3, 0).score, 20);
    assert_eq!(Enemy::at_slot(2, 3, 0).score, 20);
    assert_eq!(Enemy::at_slot(3, 3, 0).score, 10);
}

#[test]
fn blockers_form_four_clusters() {
    let blockers = make_blockers();
    assert_eq!(blockers.len(), 4 * 4 * 9);
    for cluster in 0..4 {
        assert_eq!(blockers.iter().filter(|b| b.cluster == cluster).count(), 36);
    }
    assert_eq!(blockers[0].rect, Rect::new(50, 450, 10, 10));
    let last = blockers.last().expect("cells");
    assert_eq!(last.rect, Rect::new(650 + 8 * 10, 450 + 3 * 10, 10, 10));
    // Cell indices are unique and dense
    for (i, b) in blockers.iter().enumerate() {
        assert_eq!(b.cell, i);
    }
}

#[test]
fn bullet_owner_eq() {
    assert_eq!(BulletOwner::Player, BulletOwner::Player);
    assert_ne!(BulletOwner::Player, BulletOwner::Enemy);
}
