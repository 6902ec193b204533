//! Timed creature states and their expiry.
//!
//! A timed state is stored as `state` plus `state_expires_at`. Starting a
//! new state overwrites both, so an older expiry can never revert a newer
//! state. The movement tick calls [`expire`] to return lapsed creatures to
//! idle. Jumps and speech bubbles are overlays with their own expiry and do
//! not touch `state`.

use island_types::{Creature, CreatureState, GreetingType, Timestamp};

/// How long a jump lasts.
pub const JUMP_DURATION_MS: i64 = 500;

/// How long a speech bubble stays visible.
pub const BUBBLE_DURATION_MS: i64 = 3_000;

/// How long a timed state lasts, or `None` for untimed states.
pub const fn state_duration_ms(state: CreatureState) -> Option<i64> {
    match state {
        CreatureState::Idle | CreatureState::Walking => None,
        CreatureState::Saluting => Some(1_000),
        CreatureState::Dancing | CreatureState::Eating => Some(2_000),
        CreatureState::Bathing => Some(3_000),
        CreatureState::Playing | CreatureState::Sleeping => Some(5_000),
    }
}

/// Put a creature into `state` until its duration lapses.
///
/// The creature stops where it stands. A creature leaving a play session
/// drops its own link; releasing the partner is the caller's job, since it
/// needs the world.
pub fn start_timed_state(creature: &mut Creature, state: CreatureState, now: Timestamp) {
    if state != CreatureState::Playing {
        clear_play_link(creature);
    }
    if state != CreatureState::Saluting {
        creature.greeting_type = GreetingType::None;
    }
    creature.target_x = creature.x;
    creature.target_y = creature.y;
    creature.state = state;
    creature.state_expires_at = state_duration_ms(state).map(|ms| now.saturating_add(ms));
}

/// Salute, remembering the greeting style.
pub fn start_salute(creature: &mut Creature, greeting: GreetingType, now: Timestamp) {
    start_timed_state(creature, CreatureState::Saluting, now);
    creature.greeting_type = greeting;
}

/// Start walking toward `(x, y)`.
pub fn start_walking(creature: &mut Creature, x: f64, y: f64) {
    clear_play_link(creature);
    creature.greeting_type = GreetingType::None;
    creature.target_x = x;
    creature.target_y = y;
    creature.state = CreatureState::Walking;
    creature.state_expires_at = None;
}

/// Start a jump overlay.
pub fn start_jump(creature: &mut Creature, now: Timestamp) {
    creature.is_jumping = true;
    creature.jump_expires_at = Some(now.saturating_add(JUMP_DURATION_MS));
}

/// Show a speech bubble.
pub fn show_bubble(creature: &mut Creature, text: String, now: Timestamp) {
    creature.bubble = Some(text);
    creature.bubble_expires_at = Some(now.saturating_add(BUBBLE_DURATION_MS));
}

/// Drop this creature's side of a play session.
pub fn clear_play_link(creature: &mut Creature) {
    creature.is_playing = false;
    creature.playing_with = None;
}

/// End a play session early for a creature whose partner walked away.
///
/// Any other timed state is left to run out.
pub fn end_play(creature: &mut Creature) {
    clear_play_link(creature);
    if creature.state == CreatureState::Playing {
        creature.state = CreatureState::Idle;
        creature.state_expires_at = None;
    }
}

/// Revert every lapsed timer on a creature. Returns whether anything changed.
pub fn expire(creature: &mut Creature, now: Timestamp) -> bool {
    let mut changed = false;

    if creature.state_expires_at.is_some_and(|at| at <= now) {
        if creature.state == CreatureState::Playing {
            clear_play_link(creature);
        }
        creature.state = CreatureState::Idle;
        creature.state_expires_at = None;
        creature.greeting_type = GreetingType::None;
        changed = true;
    }

    if creature.jump_expires_at.is_some_and(|at| at <= now) {
        creature.is_jumping = false;
        creature.jump_expires_at = None;
        changed = true;
    }

    if creature.bubble_expires_at.is_some_and(|at| at <= now) {
        creature.bubble = None;
        creature.bubble_expires_at = None;
        changed = true;
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creature() -> Creature {
        Creature::new(3.0, 4.0, "#ff9f43", None)
    }

    #[test]
    fn timed_state_reverts_at_expiry() {
        let mut c = creature();
        start_timed_state(&mut c, CreatureState::Dancing, 1_000);
        assert_eq!(c.state_expires_at, Some(3_000));

        assert!(!expire(&mut c, 2_999));
        assert_eq!(c.state, CreatureState::Dancing);

        assert!(expire(&mut c, 3_000));
        assert_eq!(c.state, CreatureState::Idle);
        assert!(c.state_expires_at.is_none());
    }

    #[test]
    fn superseding_state_replaces_expiry() {
        let mut c = creature();
        start_timed_state(&mut c, CreatureState::Saluting, 0);
        start_timed_state(&mut c, CreatureState::Sleeping, 500);

        // The salute's 1s expiry must not cut the sleep short.
        expire(&mut c, 1_000);
        assert_eq!(c.state, CreatureState::Sleeping);
        expire(&mut c, 5_500);
        assert_eq!(c.state, CreatureState::Idle);
    }

    #[test]
    fn durations_match_the_table() {
        assert_eq!(state_duration_ms(CreatureState::Saluting), Some(1_000));
        assert_eq!(state_duration_ms(CreatureState::Dancing), Some(2_000));
        assert_eq!(state_duration_ms(CreatureState::Eating), Some(2_000));
        assert_eq!(state_duration_ms(CreatureState::Bathing), Some(3_000));
        assert_eq!(state_duration_ms(CreatureState::Playing), Some(5_000));
        assert_eq!(state_duration_ms(CreatureState::Sleeping), Some(5_000));
        assert_eq!(state_duration_ms(CreatureState::Walking), None);
    }

    #[test]
    fn timed_state_stops_walking() {
        let mut c = creature();
        start_walking(&mut c, 10.0, 10.0);
        start_timed_state(&mut c, CreatureState::Bathing, 0);
        assert!((c.target_x - c.x).abs() < f64::EPSILON);
        assert!((c.target_y - c.y).abs() < f64::EPSILON);
    }

    #[test]
    fn leaving_play_clears_own_link() {
        let mut c = creature();
        c.is_playing = true;
        c.playing_with = Some(island_types::CreatureId::new());
        c.state = CreatureState::Playing;

        start_timed_state(&mut c, CreatureState::Dancing, 0);
        assert!(!c.is_playing);
        assert!(c.playing_with.is_none());
    }

    #[test]
    fn end_play_returns_partner_to_idle() {
        let mut c = creature();
        start_timed_state(&mut c, CreatureState::Playing, 0);
        c.is_playing = true;
        c.playing_with = Some(island_types::CreatureId::new());

        end_play(&mut c);
        assert_eq!(c.state, CreatureState::Idle);
        assert!(c.state_expires_at.is_none());
        assert!(!c.is_playing);
        assert!(c.playing_with.is_none());
    }

    #[test]
    fn end_play_keeps_other_timed_states() {
        let mut c = creature();
        start_timed_state(&mut c, CreatureState::Sleeping, 0);
        end_play(&mut c);
        assert_eq!(c.state, CreatureState::Sleeping);
        assert_eq!(c.state_expires_at, Some(5_000));
    }

    #[test]
    fn salute_keeps_greeting_until_expiry() {
        let mut c = creature();
        start_salute(&mut c, GreetingType::TwoArms, 0);
        assert_eq!(c.greeting_type, GreetingType::TwoArms);
        expire(&mut c, 1_000);
        assert_eq!(c.greeting_type, GreetingType::None);
    }

    #[test]
    fn overlays_expire_independently() {
        let mut c = creature();
        start_jump(&mut c, 0);
        show_bubble(&mut c, String::from("hi"), 0);
        start_timed_state(&mut c, CreatureState::Sleeping, 0);

        expire(&mut c, 500);
        assert!(!c.is_jumping);
        assert_eq!(c.bubble.as_deref(), Some("hi"));
        assert_eq!(c.state, CreatureState::Sleeping);

        expire(&mut c, 3_000);
        assert!(c.bubble.is_none());
        assert_eq!(c.state, CreatureState::Sleeping);
    }
}
