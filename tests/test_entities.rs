use plane_game::entities::*;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(Phase::Running, Phase::Running);
    assert_ne!(Phase::NotStarted, Phase::GameOver);
    assert_ne!(InputEvent::MoveLeft, InputEvent::MoveRight);

    let ammo = Ammo::default();
    assert_eq!(ammo.clone(), ammo);
    assert_eq!(ammo.fired, 0);
    assert!(ammo.can_shoot);
    assert_eq!(ammo.reload_deadline_ms, None);
}

// ── Rect::overlaps ────────────────────────────────────────────────────────────

#[test]
fn bullet_inside_obstacle_overlaps() {
    let bullet = Rect::new(100.0, 50.0, 5.0, 10.0);
    let obstacle = Rect::new(95.0, 45.0, 40.0, 40.0);
    assert!(bullet.overlaps(&obstacle));
    assert!(obstacle.overlaps(&bullet));
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 40.0, 40.0);
    // shares the right edge
    assert!(!a.overlaps(&Rect::new(40.0, 0.0, 40.0, 40.0)));
    // shares the bottom edge
    assert!(!a.overlaps(&Rect::new(0.0, 40.0, 40.0, 40.0)));
    // one pixel of overlap is enough
    assert!(a.overlaps(&Rect::new(39.0, 39.0, 40.0, 40.0)));
}

#[test]
fn separated_rects_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&Rect::new(50.0, 0.0, 10.0, 10.0)));
    assert!(!a.overlaps(&Rect::new(0.0, 50.0, 10.0, 10.0)));
}

#[test]
fn game_session_clone_is_independent() {
    let original = GameSession {
        player: Player {
            rect: Rect::new(180.0, 550.0, 40.0, 40.0),
            speed: 5.0,
            dx: 0.0,
        },
        obstacles: Vec::new(),
        bullets: Vec::new(),
        score: 0,
        high_score: 0,
        obstacle_speed: 2.0,
        phase: Phase::Running,
        ammo: Ammo::default(),
        frame: 0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.x = 99.0;
    cloned.score = 999;
    cloned.obstacles.push(Obstacle {
        rect: Rect::new(5.0, 5.0, 40.0, 40.0),
    });

    assert_eq!(original.player.rect.x, 180.0);
    assert_eq!(original.score, 0);
    assert!(original.obstacles.is_empty());
}
