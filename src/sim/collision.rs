//! Collision detection between entity groups
//!
//! Every body is approximated by a circle. Groups are small enough that a
//! brute-force O(|A|·|B|) scan is fine.
//!
//! Two layers:
//! - [`find_overlaps`] reports every overlapping pair (symmetric in A and B)
//! - [`find_collisions`] applies the pairing discipline used for resolution:
//!   each A element takes the first unclaimed B element it overlaps, in
//!   iteration order, and stops. A B element is claimed at most once per pass.

use glam::Vec2;

use super::entity::Entity;

/// Circle-circle overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

#[inline]
fn overlaps(a: &Entity, b: &Entity) -> bool {
    circles_overlap(a.pos, a.radius, b.pos, b.radius)
}

/// All overlapping `(a_index, b_index)` pairs, skipping consumed entities
pub fn find_overlaps(a: &[Entity], b: &[Entity]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, ea) in a.iter().enumerate() {
        if ea.consumed {
            continue;
        }
        for (j, eb) in b.iter().enumerate() {
            if !eb.consumed && overlaps(ea, eb) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// First-match pairs between `a` and `b`
pub fn find_collisions(a: &[Entity], b: &[Entity]) -> Vec<(usize, usize)> {
    find_collisions_where(a, b, |_| true)
}

/// First-match pairs, considering only A elements accepted by `filter_a`
pub fn find_collisions_where(
    a: &[Entity],
    b: &[Entity],
    filter_a: impl Fn(&Entity) -> bool,
) -> Vec<(usize, usize)> {
    let mut claimed = vec![false; b.len()];
    let mut pairs = Vec::new();

    for (i, ea) in a.iter().enumerate() {
        if ea.consumed || !filter_a(ea) {
            continue;
        }
        let hit = b
            .iter()
            .enumerate()
            .find(|(j, eb)| !claimed[*j] && !eb.consumed && overlaps(ea, eb));
        if let Some((j, _)) = hit {
            claimed[j] = true;
            pairs.push((i, j));
        }
    }

    pairs
}

/// Index of the first unconsumed entity in `group` overlapping a circle
pub fn first_hit(
    pos: Vec2,
    radius: f32,
    group: &[Entity],
    filter: impl Fn(&Entity) -> bool,
) -> Option<usize> {
    group
        .iter()
        .position(|e| !e.consumed && filter(e) && circles_overlap(pos, radius, e.pos, e.radius))
}

/// Indices of every unconsumed entity in `group` overlapping a circle
pub fn all_hits(
    pos: Vec2,
    radius: f32,
    group: &[Entity],
    filter: impl Fn(&Entity) -> bool,
) -> Vec<usize> {
    group
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.consumed && filter(e) && circles_overlap(pos, radius, e.pos, e.radius))
        .map(|(i, _)| i)
        .collect()
}
