//! First-schedule generation. Every function takes team ids in seed order (registration order)
//! and returns the pairings; a pairing without `team_b` is a bye.

use crate::dto::TournamentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub round: i32,
    pub team_a: i32,
    pub team_b: Option<i32>,
}

impl Pairing {
    fn new(round: i32, team_a: i32, team_b: Option<i32>) -> Self {
        Self {
            round,
            team_a,
            team_b,
        }
    }
}

pub fn schedule(kind: TournamentType, seeds: &[i32]) -> Vec<Pairing> {
    match kind {
        TournamentType::Elimination => elimination(seeds),
        TournamentType::RoundRobin => round_robin(seeds),
        TournamentType::Swiss => swiss(seeds),
    }
}

/// Opening round of a single-elimination bracket sized to the next power of two. The top seeds
/// fill the empty slots with byes, the rest play highest remaining seed against lowest.
pub fn elimination(seeds: &[i32]) -> Vec<Pairing> {
    if seeds.len() < 2 {
        return Vec::new();
    }
    let byes = seeds.len().next_power_of_two() - seeds.len();
    let (seeded, playing) = seeds.split_at(byes);

    let mut pairings: Vec<Pairing> = seeded
        .iter()
        .map(|&team| Pairing::new(1, team, None))
        .collect();
    pairings.extend(
        playing
            .iter()
            .zip(playing.iter().rev())
            .take(playing.len() / 2)
            .map(|(&high, &low)| Pairing::new(1, high, Some(low))),
    );
    pairings
}

/// Circle method: the first slot stays put while the others rotate, giving every pair exactly one
/// meeting. Odd fields get a phantom slot whose games are not recorded.
pub fn round_robin(seeds: &[i32]) -> Vec<Pairing> {
    if seeds.len() < 2 {
        return Vec::new();
    }
    let mut slots: Vec<Option<i32>> = seeds.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let size = slots.len();

    let mut pairings = Vec::with_capacity(seeds.len() * (seeds.len() - 1) / 2);
    for round in 1..size {
        for i in 0..size / 2 {
            if let (Some(a), Some(b)) = (slots[i], slots[size - 1 - i]) {
                pairings.push(Pairing::new(round as i32, a, Some(b)));
            }
        }
        slots[1..].rotate_right(1);
    }
    pairings
}

/// Swiss opening round: top half against bottom half. With an odd count the last seed sits out.
pub fn swiss(seeds: &[i32]) -> Vec<Pairing> {
    if seeds.len() < 2 {
        return Vec::new();
    }
    let half = seeds.len() / 2;
    let mut pairings: Vec<Pairing> = (0..half)
        .map(|i| Pairing::new(1, seeds[i], Some(seeds[i + half])))
        .collect();
    if seeds.len() % 2 == 1 {
        pairings.push(Pairing::new(1, seeds[seeds.len() - 1], None));
    }
    pairings
}
