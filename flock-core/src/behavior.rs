//! The individual steering behaviors.
//!
//! Each function reads an agent and its candidate neighbors and returns a
//! steering vector. None of them mutate anything, so every agent in a flock
//! can be evaluated against the same snapshot.

use crate::agent::Agent;
use crate::config::Arena;
use crate::vector::Vector2D;

/// Turns a desired heading into a bounded correction of the agent's velocity.
fn steer_towards(agent: &Agent, heading: Vector2D) -> Vector2D {
    let desired = heading.normalize() * agent.max_speed();
    (desired - agent.velocity()).limit(agent.max_force())
}

/// Mean of `count` accumulated samples, `None` when nothing was sampled.
fn average(sum: Vector2D, count: usize) -> Option<Vector2D> {
    if count == 0 {
        return None;
    }
    sum.divide(count as f32).ok()
}

/// Steer away from neighbors closer than `radius`.
///
/// A neighbor at distance zero (including the agent itself) is ignored.
pub fn separation<'a, I>(agent: &Agent, others: I, radius: f32) -> Vector2D
where
    I: Iterator<Item = &'a Agent>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let offset = agent.position() - other.position();
        let distance = offset.magnitude();
        if distance > 0.0 && distance < radius {
            if let Ok(away) = offset.divide(distance) {
                sum += away;
                count += 1;
            }
        }
    }

    match average(sum, count) {
        Some(mean) if !mean.is_zero() => steer_towards(agent, mean),
        _ => Vector2D::zero(),
    }
}

/// Steer toward the average heading of neighbors within `radius`.
pub fn alignment<'a, I>(agent: &Agent, others: I, radius: f32) -> Vector2D
where
    I: Iterator<Item = &'a Agent>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = agent.position().distance(&other.position());
        if distance > 0.0 && distance < radius {
            sum += other.velocity();
            count += 1;
        }
    }

    match average(sum, count) {
        Some(mean) if !mean.is_zero() => steer_towards(agent, mean),
        _ => Vector2D::zero(),
    }
}

/// Seek the centroid of neighbors within `radius`.
pub fn cohesion<'a, I>(agent: &Agent, others: I, radius: f32) -> Vector2D
where
    I: Iterator<Item = &'a Agent>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = agent.position().distance(&other.position());
        if distance > 0.0 && distance < radius {
            sum += other.position();
            count += 1;
        }
    }

    match average(sum, count) {
        Some(centroid) => seek(agent, centroid),
        None => Vector2D::zero(),
    }
}

pub fn seek(agent: &Agent, target: Vector2D) -> Vector2D {
    steer_towards(agent, target - agent.position())
}

/// Strong short-range push away from neighbors within `radius`.
///
/// Contributions are summed, not averaged, and attenuated by distance after
/// normalization so the push grows as a neighbor closes in.
pub fn avoid_collision<'a, I>(agent: &Agent, others: I, radius: f32) -> Vector2D
where
    I: Iterator<Item = &'a Agent>,
{
    let mut sum = Vector2D::zero();

    for other in others {
        let offset = agent.position() - other.position();
        let distance = offset.magnitude();
        if distance > 0.0 && distance < radius {
            if let Ok(push) = offset.normalize().divide(distance) {
                sum += push;
            }
        }
    }

    if sum.is_zero() {
        Vector2D::zero()
    } else {
        steer_towards(agent, sum)
    }
}

/// Hard push back into the arena for agents inside the wall margin.
///
/// Components are set to `±max_speed` directly; this is not clamped to
/// `max_force`.
pub fn contain_within_walls(agent: &Agent, arena: &Arena, margin: f32) -> Vector2D {
    let position = agent.position();
    let mut steering = Vector2D::zero();

    if position.x < margin {
        steering.x = agent.max_speed();
    } else if position.x > arena.width - margin {
        steering.x = -agent.max_speed();
    }

    if position.y < margin {
        steering.y = agent.max_speed();
    } else if position.y > arena.height - margin {
        steering.y = -agent.max_speed();
    }

    steering
}

/// Seek the attractor, but only while it is closer than `radius`.
pub fn follow_attractor(agent: &Agent, attractor: Option<Vector2D>, radius: f32) -> Vector2D {
    match attractor {
        Some(point) if agent.position().distance(&point) < radius => seek(agent, point),
        _ => Vector2D::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn still(x: f32, y: f32) -> Agent {
        Agent::new(Vector2D::new(x, y), Vector2D::zero())
    }

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    #[test]
    fn test_separation_without_neighbors_is_zero() {
        let agent = still(100.0, 100.0);
        let far = still(300.0, 300.0);
        let group = [agent.clone(), far];
        assert_eq!(separation(&agent, group.iter(), 50.0), Vector2D::zero());
    }

    #[test]
    fn test_separation_ignores_coincident_agents() {
        let agent = still(100.0, 100.0);
        let twin = still(100.0, 100.0);
        let group = [agent.clone(), twin];
        assert_eq!(separation(&agent, group.iter(), 50.0), Vector2D::zero());
    }

    #[test]
    fn test_separation_pushes_away() {
        let agent = still(100.0, 100.0);
        let right = still(110.0, 100.0);
        let force = separation(&agent, [right].iter(), 50.0);
        assert!(force.x < 0.0);
        assert!(force.y.abs() < EPSILON);
        assert!(force.magnitude() <= agent.max_force() + EPSILON);
    }

    #[test]
    fn test_separation_respects_strict_radius() {
        let agent = still(100.0, 100.0);
        let edge = still(150.0, 100.0);
        assert_eq!(separation(&agent, [edge].iter(), 50.0), Vector2D::zero());
    }

    #[test]
    fn test_alignment_follows_neighbor_heading() {
        let agent = still(100.0, 100.0);
        let neighbor = Agent::new(Vector2D::new(120.0, 100.0), Vector2D::new(0.0, 1.5));
        let force = alignment(&agent, [neighbor].iter(), 50.0);
        assert!(force.y > 0.0);
        assert!((force.magnitude() - agent.max_force()).abs() < EPSILON);
    }

    #[test]
    fn test_alignment_with_still_neighbors_is_zero() {
        let agent = still(100.0, 100.0);
        let neighbor = still(120.0, 100.0);
        assert_eq!(alignment(&agent, [neighbor].iter(), 50.0), Vector2D::zero());
    }

    #[test]
    fn test_cohesion_seeks_centroid() {
        let agent = still(100.0, 100.0);
        let group = [still(120.0, 90.0), still(120.0, 110.0)];
        let force = cohesion(&agent, group.iter(), 50.0);
        assert!(force.x > 0.0);
        assert!(force.y.abs() < EPSILON);
    }

    #[test]
    fn test_cohesion_without_neighbors_is_zero() {
        let agent = Agent::new(Vector2D::new(100.0, 100.0), Vector2D::new(1.0, 0.0));
        assert_eq!(cohesion(&agent, [agent.clone()].iter(), 50.0), Vector2D::zero());
    }

    #[test]
    fn test_seek_is_clamped_correction() {
        let agent = Agent::new(Vector2D::new(0.0, 0.0), Vector2D::new(0.0, 2.0));
        let force = seek(&agent, Vector2D::new(100.0, 0.0));
        assert!(force.x > 0.0);
        assert!(force.y < 0.0);
        assert!((force.magnitude() - agent.max_force()).abs() < EPSILON);
    }

    #[test]
    fn test_avoidance_only_at_close_range() {
        let agent = still(100.0, 100.0);
        let near = still(100.0, 110.0);
        let mid = still(100.0, 130.0);

        let force = avoid_collision(&agent, [near].iter(), 20.0);
        assert!(force.y < 0.0);
        assert!(force.magnitude() <= agent.max_force() + EPSILON);

        assert_eq!(avoid_collision(&agent, [mid].iter(), 20.0), Vector2D::zero());
    }

    #[test]
    fn test_wall_margin_boundaries() {
        let at_margin = still(50.0, 300.0);
        assert_eq!(contain_within_walls(&at_margin, &arena(), 50.0).x, 0.0);

        let inside_left = still(49.0, 300.0);
        assert_eq!(
            contain_within_walls(&inside_left, &arena(), 50.0).x,
            inside_left.max_speed()
        );

        let inside_right = still(751.0, 300.0);
        assert_eq!(
            contain_within_walls(&inside_right, &arena(), 50.0).x,
            -inside_right.max_speed()
        );
    }

    #[test]
    fn test_wall_corner_pushes_both_axes() {
        let corner = still(10.0, 590.0);
        let force = contain_within_walls(&corner, &arena(), 50.0);
        assert_eq!(force, Vector2D::new(2.0, -2.0));
    }

    #[test]
    fn test_interior_has_no_wall_force() {
        let center = still(400.0, 300.0);
        assert_eq!(contain_within_walls(&center, &arena(), 50.0), Vector2D::zero());
    }

    #[test]
    fn test_attractor_range() {
        let agent = still(100.0, 100.0);

        let near = follow_attractor(&agent, Some(Vector2D::new(200.0, 100.0)), 150.0);
        assert!(near.x > 0.0);

        let far = follow_attractor(&agent, Some(Vector2D::new(400.0, 100.0)), 150.0);
        assert_eq!(far, Vector2D::zero());

        assert_eq!(follow_attractor(&agent, None, 150.0), Vector2D::zero());
    }
}
