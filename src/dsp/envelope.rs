use crate::dsp::counter::ElapsedCounter;

/*
Attack / Sustain / Decay Envelope
=================================

Unlike a gated ADSR, this envelope has no note-off. Its stage is a pure
function of the voice's elapsed-time counter `t` and three durations counted
in ticks:

  Level
   max ┐     ___________
       │    ╱           ╲
       │   ╱             ╲
 floor └──╱───────────────╲______________ → t
          0   A       A+S   A+S+D    ceiling → wraps to 0

    t <= A           Attack   level += attack_increment
    t <= A + S       Sustain  level held
    t <= A + S + D   Decay    level -= decay_increment
    otherwise        Idle     level forced to the floor

The counter wraps to zero at the voice's ceiling, which loops the sound with
no external scheduler. A retrigger restarts the counter immediately and
recomputes both increments for a new target:

    attack_increment = (target - floor) / A
    decay_increment  = (target - floor) / D

The level itself is NOT reset on retrigger. A voice caught mid-decay ramps up
again from wherever it is, which keeps retriggers click-free.

Bounds
------

Attack never exceeds the larger of the target and the level it started
from, decay never goes under the floor, and every target is clamped into
[floor, max] before the increments are derived. So the level always stays
inside [floor, max] and is monotonic within each active stage.

The level is an f32 rather than a fixed-point value. Every step above is
clamped, so it cannot overflow or go negative, and the mixer truncates
`level * sample` to an integer before biasing.

A retrigger toward a target below the current level (the listener walked
away) gets zero increments: attack holds at the old level, decay does not
move, and the level only drops once the envelope reaches Idle.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Attack,
    Sustain,
    Decay,
    Idle, // past A+S+D, parked at the floor until the counter restarts
}

/// Stage durations in ticks.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeShape {
    pub attack: u32,
    pub sustain: u32,
    pub decay: u32,
}

impl EnvelopeShape {
    pub const fn new(attack: u32, sustain: u32, decay: u32) -> Self {
        Self {
            attack,
            sustain,
            decay,
        }
    }

    /// Ticks from trigger until the envelope goes idle.
    pub const fn active_ticks(&self) -> u32 {
        self.attack + self.sustain + self.decay
    }

    pub fn stage_at(&self, t: u32) -> EnvelopeStage {
        if t <= self.attack {
            EnvelopeStage::Attack
        } else if t <= self.attack + self.sustain {
            EnvelopeStage::Sustain
        } else if t <= self.active_ticks() {
            EnvelopeStage::Decay
        } else {
            EnvelopeStage::Idle
        }
    }
}

pub struct Envelope {
    shape: EnvelopeShape,
    floor: f32,
    max: f32,

    // Shaping state, replaced on every retrigger
    target: f32,
    attack_increment: f32,
    decay_increment: f32,
    attack_ceiling: f32,

    // Runtime state, changes every tick
    level: f32,
    elapsed: ElapsedCounter,
}

impl Envelope {
    /// Silent envelope: level and target sit at `floor` until the first retrigger.
    pub fn new(shape: EnvelopeShape, floor: f32, max: f32, counter_ceiling: u32) -> Self {
        let max = max.max(floor);
        Self {
            shape,
            floor,
            max,
            target: floor,
            attack_increment: 0.0,
            decay_increment: 0.0,
            attack_ceiling: floor,
            level: floor,
            elapsed: ElapsedCounter::new(counter_ceiling),
        }
    }

    /// Restart at `t = 0`, ramping toward `target` from the current level.
    pub fn retrigger(&mut self, target: f32) {
        let target = if target.is_nan() {
            self.floor
        } else {
            target.clamp(self.floor, self.max)
        };
        let span = target - self.floor;

        self.target = target;
        self.attack_increment = per_tick(span, self.shape.attack);
        self.decay_increment = per_tick(span, self.shape.decay);
        self.attack_ceiling = target.max(self.level);
        self.elapsed.restart();
    }

    /// Update the level for the current `t`, then advance the counter.
    pub fn advance(&mut self) {
        match self.stage() {
            EnvelopeStage::Attack => {
                self.level = (self.level + self.attack_increment).min(self.attack_ceiling);
            }
            EnvelopeStage::Sustain => {}
            EnvelopeStage::Decay => {
                self.level = (self.level - self.decay_increment).max(self.floor);
            }
            EnvelopeStage::Idle => {
                self.level = self.floor;
            }
        }
        self.elapsed.advance();

        debug_assert!(self.level >= self.floor && self.level <= self.max);
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.shape.stage_at(self.elapsed.value())
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed.value()
    }

    pub fn shape(&self) -> EnvelopeShape {
        self.shape
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Back to the power-on state: silent, counter at zero.
    pub fn reset(&mut self) {
        self.target = self.floor;
        self.attack_increment = 0.0;
        self.decay_increment = 0.0;
        self.attack_ceiling = self.floor;
        self.level = self.floor;
        self.elapsed.restart();
    }
}

/// A zero-length stage covers the whole span in its single tick.
fn per_tick(span: f32, ticks: u32) -> f32 {
    if ticks == 0 {
        span
    } else {
        span / ticks as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPE: EnvelopeShape = EnvelopeShape::new(10, 5, 20);

    fn run(env: &mut Envelope, ticks: u32) -> Vec<f32> {
        (0..ticks)
            .map(|_| {
                env.advance();
                env.level()
            })
            .collect()
    }

    #[test]
    fn stages_follow_elapsed_time() {
        assert_eq!(SHAPE.stage_at(0), EnvelopeStage::Attack);
        assert_eq!(SHAPE.stage_at(10), EnvelopeStage::Attack);
        assert_eq!(SHAPE.stage_at(11), EnvelopeStage::Sustain);
        assert_eq!(SHAPE.stage_at(15), EnvelopeStage::Sustain);
        assert_eq!(SHAPE.stage_at(16), EnvelopeStage::Decay);
        assert_eq!(SHAPE.stage_at(35), EnvelopeStage::Decay);
        assert_eq!(SHAPE.stage_at(36), EnvelopeStage::Idle);
    }

    #[test]
    fn silent_until_triggered() {
        let mut env = Envelope::new(SHAPE, 0.0, 12.0, 1000);
        assert!(run(&mut env, 100).iter().all(|&l| l == 0.0));
    }

    #[test]
    fn full_cycle_is_monotonic_and_bounded() {
        let mut env = Envelope::new(SHAPE, 0.0, 12.0, 1000);
        env.retrigger(12.0);

        let mut previous = env.level();
        for t in 0..=SHAPE.active_ticks() + 5 {
            let stage = SHAPE.stage_at(t);
            env.advance();
            let level = env.level();
            assert!((0.0..=12.0).contains(&level), "t={t} level={level}");
            match stage {
                EnvelopeStage::Attack => assert!(level >= previous),
                EnvelopeStage::Sustain => assert_eq!(level, previous),
                EnvelopeStage::Decay => assert!(level <= previous),
                EnvelopeStage::Idle => assert_eq!(level, 0.0),
            }
            previous = level;
        }
    }

    #[test]
    fn attack_reaches_target() {
        let mut env = Envelope::new(SHAPE, 0.0, 12.0, 1000);
        env.retrigger(6.0);
        run(&mut env, SHAPE.attack + 1);
        assert!((env.level() - 6.0).abs() < 1e-4);
        assert_eq!(env.stage(), EnvelopeStage::Sustain);
    }

    #[test]
    fn decay_lands_on_floor() {
        let mut env = Envelope::new(SHAPE, 1.0, 12.0, 1000);
        env.retrigger(9.0);
        run(&mut env, SHAPE.active_ticks() + 1);
        assert!((env.level() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn target_is_clamped_into_range() {
        let mut env = Envelope::new(SHAPE, 0.0, 12.0, 1000);
        env.retrigger(500.0);
        assert_eq!(env.target(), 12.0);
        env.retrigger(-3.0);
        assert_eq!(env.target(), 0.0);
        env.retrigger(f32::NAN);
        assert_eq!(env.target(), 0.0);
    }

    #[test]
    fn retrigger_mid_decay_ramps_from_current_level() {
        let mut env = Envelope::new(SHAPE, 0.0, 12.0, 1000);
        env.retrigger(12.0);
        run(&mut env, SHAPE.attack + SHAPE.sustain + 6);
        assert_eq!(env.stage(), EnvelopeStage::Decay);
        let mid = env.level();
        assert!(mid > 0.0 && mid < 12.0);

        env.retrigger(12.0);
        assert_eq!(env.elapsed(), 0);
        assert_eq!(env.level(), mid);

        env.advance();
        assert!((env.level() - (mid + 1.2)).abs() < 1e-4);
    }

    #[test]
    fn counter_wrap_retriggers_the_same_shape() {
        let ceiling = 50;
        let mut env = Envelope::new(SHAPE, 0.0, 12.0, ceiling);
        env.retrigger(12.0);
        let first = run(&mut env, ceiling + 1);
        let second = run(&mut env, ceiling + 1);
        assert_eq!(env.elapsed(), 0);
        // Both loops start from the floor, so they trace the same curve.
        for (a, b) in first.iter().zip(&second) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn zero_sustain_goes_straight_to_decay() {
        let shape = EnvelopeShape::new(4, 0, 4);
        assert_eq!(shape.stage_at(4), EnvelopeStage::Attack);
        assert_eq!(shape.stage_at(5), EnvelopeStage::Decay);
    }
}
