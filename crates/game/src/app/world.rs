//! Shared match state stepped by the gameplay screens.
//!
//! Motion is deliberately simple: Euler integration, flat drag, and a wrap
//! that re-enters a body on the opposite rim of the circular arena. The
//! interesting timing behavior lives in the engine; this module only has to
//! be deterministic for a fixed `dt`.

use std::f32::consts::{PI, TAU};
use std::time::Instant;

use super::audio::SoundBank;

const TURN_RATE_RAD_PER_SECOND: f32 = 3.5;
const THRUST_ACCEL_PX_PER_SECOND2: f32 = 90.0;
const DRAG_PER_SECOND: f32 = 0.3;
const SHOT_SPEED_PX_PER_SECOND: f32 = 260.0;
const SHOT_TTL_SECONDS: f32 = 1.4;
const FIRE_COOLDOWN_SECONDS: f32 = 0.35;
const SHIP_NOSE_PX: f32 = 12.0;
const SHIP_HIT_RADIUS_PX: f32 = 8.0;
const WRAP_INSET_PX: f32 = 2.0;
const DRONE_AIM_TOLERANCE_RAD: f32 = 0.05;
const DRONE_FIRE_CONE_RAD: f32 = 0.25;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Vec2 {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl Vec2 {
    pub(crate) fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub(crate) fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    fn opponent_index(self) -> usize {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameMode {
    Enemy,
    Versus,
}

/// Per-ship intent for one fixed step. `turn` is -1..1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct ShipControls {
    pub(crate) turn: f32,
    pub(crate) thrust: bool,
    pub(crate) fire: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct Ship {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) heading: f32,
    pub(crate) fire_cooldown: f32,
    pub(crate) alive: bool,
}

impl Ship {
    fn spawn(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            velocity: Vec2::default(),
            heading,
            fire_cooldown: 0.0,
            alive: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Shot {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) ttl: f32,
    pub(crate) owner: PlayerSlot,
}

pub(crate) struct MatchWorld {
    pub(crate) mode: GameMode,
    pub(crate) winner: Option<PlayerSlot>,
    pub(crate) ships: [Ship; 2],
    pub(crate) shots: Vec<Shot>,
    pub(crate) sounds: SoundBank,
    pub(crate) arena_radius: f32,
}

impl MatchWorld {
    pub(crate) fn new(arena_radius: f32, sounds: SoundBank) -> Self {
        let mut world = Self {
            mode: GameMode::Enemy,
            winner: None,
            ships: [
                Ship::spawn(Vec2::default(), 0.0),
                Ship::spawn(Vec2::default(), PI),
            ],
            shots: Vec::new(),
            sounds,
            arena_radius,
        };
        world.start_match(GameMode::Enemy);
        world
    }

    /// Resets ships, shots and the winner for a fresh round of `mode`.
    pub(crate) fn start_match(&mut self, mode: GameMode) {
        let offset = self.arena_radius / 2.0;
        self.mode = mode;
        self.winner = None;
        self.shots.clear();
        self.ships = [
            Ship::spawn(Vec2 { x: -offset, y: 0.0 }, 0.0),
            Ship::spawn(Vec2 { x: offset, y: 0.0 }, PI),
        ];
    }

    /// Advances one fixed step. Returns the winner the moment a ship dies;
    /// the caller decides what to do with the verdict.
    pub(crate) fn step(
        &mut self,
        dt: f32,
        controls: [ShipControls; 2],
        now: Instant,
    ) -> Option<PlayerSlot> {
        let mut thrusting = false;
        for (index, control) in controls.iter().enumerate() {
            let ship = &mut self.ships[index];
            if !ship.alive {
                continue;
            }
            ship.heading = wrap_angle(ship.heading + control.turn * TURN_RATE_RAD_PER_SECOND * dt);
            if control.thrust {
                ship.velocity.x += ship.heading.cos() * THRUST_ACCEL_PX_PER_SECOND2 * dt;
                ship.velocity.y += ship.heading.sin() * THRUST_ACCEL_PX_PER_SECOND2 * dt;
                thrusting = true;
            }
            let drag = (1.0 - DRAG_PER_SECOND * dt).max(0.0);
            ship.velocity.x *= drag;
            ship.velocity.y *= drag;
            ship.position.x += ship.velocity.x * dt;
            ship.position.y += ship.velocity.y * dt;
            ship.position = wrap_to_rim(ship.position, self.arena_radius);
            ship.fire_cooldown = (ship.fire_cooldown - dt).max(0.0);
        }
        if thrusting {
            self.sounds.thrusters.fire(now);
        }

        for (index, control) in controls.iter().enumerate() {
            if !control.fire {
                continue;
            }
            let ship = &self.ships[index];
            if !ship.alive || ship.fire_cooldown > 0.0 {
                continue;
            }
            let (cos, sin) = (ship.heading.cos(), ship.heading.sin());
            let shot = Shot {
                position: Vec2 {
                    x: ship.position.x + cos * SHIP_NOSE_PX,
                    y: ship.position.y + sin * SHIP_NOSE_PX,
                },
                velocity: Vec2 {
                    x: ship.velocity.x + cos * SHOT_SPEED_PX_PER_SECOND,
                    y: ship.velocity.y + sin * SHOT_SPEED_PX_PER_SECOND,
                },
                ttl: SHOT_TTL_SECONDS,
                owner: if index == 0 {
                    PlayerSlot::One
                } else {
                    PlayerSlot::Two
                },
            };
            self.ships[index].fire_cooldown = FIRE_COOLDOWN_SECONDS;
            self.shots.push(shot);
            match shot.owner {
                PlayerSlot::One => self.sounds.laser1.fire(now),
                PlayerSlot::Two => self.sounds.laser2.fire(now),
            }
        }

        let arena_radius = self.arena_radius;
        for shot in &mut self.shots {
            shot.position.x += shot.velocity.x * dt;
            shot.position.y += shot.velocity.y * dt;
            shot.position = wrap_to_rim(shot.position, arena_radius);
            shot.ttl -= dt;
        }
        self.shots.retain(|shot| shot.ttl > 0.0);

        let ships = &mut self.ships;
        let mut round_winner = None;
        self.shots.retain(|shot| {
            let target = &mut ships[shot.owner.opponent_index()];
            if !target.alive {
                return true;
            }
            let dx = shot.position.x - target.position.x;
            let dy = shot.position.y - target.position.y;
            if dx * dx + dy * dy > SHIP_HIT_RADIUS_PX * SHIP_HIT_RADIUS_PX {
                return true;
            }
            target.alive = false;
            if round_winner.is_none() {
                round_winner = Some(shot.owner);
            }
            false
        });

        if let Some(winner) = round_winner {
            self.winner = Some(winner);
            self.sounds.explosion.fire(now);
        }
        self.sounds.tick(now);
        round_winner
    }
}

/// Bodies leaving the arena re-enter on the opposite rim, slightly inset so
/// they do not immediately re-trigger the wrap.
fn wrap_to_rim(position: Vec2, arena_radius: f32) -> Vec2 {
    let length = position.length();
    if length <= arena_radius {
        return position;
    }
    let scale = (arena_radius - WRAP_INSET_PX) / length;
    Vec2 {
        x: -position.x * scale,
        y: -position.y * scale,
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = angle;
    while wrapped > PI {
        wrapped -= TAU;
    }
    while wrapped < -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Drone intent for enemy mode: rotate toward the player, close distance,
/// fire only when roughly on target. Deterministic on purpose.
pub(crate) fn drone_controls(world: &MatchWorld) -> ShipControls {
    let player = &world.ships[PlayerSlot::One.index()];
    let drone = &world.ships[PlayerSlot::Two.index()];
    if !player.alive || !drone.alive {
        return ShipControls::default();
    }

    let dx = player.position.x - drone.position.x;
    let dy = player.position.y - drone.position.y;
    let aim_error = wrap_angle(dy.atan2(dx) - drone.heading);
    let distance = (dx * dx + dy * dy).sqrt();

    ShipControls {
        turn: if aim_error.abs() > DRONE_AIM_TOLERANCE_RAD {
            aim_error.signum()
        } else {
            0.0
        },
        thrust: distance > world.arena_radius * 0.45,
        fire: aim_error.abs() < DRONE_FIRE_CONE_RAD && distance < world.arena_radius * 1.2,
    }
}
