//! Built-in sounds used when no asset file is configured
//!
//! Both generators are deterministic and return mono `f32` samples.

use std::f32::consts::TAU;

/// Sample rate of the synthesized sounds
pub const SYNTH_SAMPLE_RATE: u32 = 44_100;

const BELL_SECONDS: f32 = 1.2;
const BELL_FUNDAMENTAL_HZ: f32 = 528.0;
const BELL_ATTACK_SECONDS: f32 = 0.005;
const BELL_DECAY_RATE: f32 = 4.0;
const BELL_PEAK: f32 = 0.5;

const RAIN_PEAK: f32 = 0.3;
const RAIN_CROSSFADE_SECONDS: f32 = 0.25;

/// A short decaying bell tone
///
/// Fundamental plus two inharmonic partials, with a 5 ms attack so the
/// onset does not click.
pub fn bell(sample_rate: u32) -> Vec<f32> {
    let len = (BELL_SECONDS * sample_rate as f32) as usize;
    let rate = sample_rate as f32;

    (0..len)
        .map(|i| {
            let t = i as f32 / rate;
            let attack = (t / BELL_ATTACK_SECONDS).min(1.0);
            let envelope = attack * (-BELL_DECAY_RATE * t).exp();
            let tone = (TAU * BELL_FUNDAMENTAL_HZ * t).sin()
                + 0.5 * (TAU * BELL_FUNDAMENTAL_HZ * 2.76 * t).sin()
                + 0.25 * (TAU * BELL_FUNDAMENTAL_HZ * 5.4 * t).sin();
            BELL_PEAK * envelope * tone / 1.75
        })
        .collect()
}

/// Loopable brown noise that reads as steady rain
///
/// The extra tail generated past `seconds` is crossfaded into the head, so
/// repeating the buffer has no audible seam.
pub fn rain(sample_rate: u32, seconds: f32) -> Vec<f32> {
    let len = ((seconds * sample_rate as f32) as usize).max(1);
    let fade = ((RAIN_CROSSFADE_SECONDS * sample_rate as f32) as usize).min(len);

    let mut rng = XorShift32::new(0x9E37_79B9);
    let mut brown = 0.0f32;
    let raw: Vec<f32> = (0..len + fade)
        .map(|_| {
            brown = (brown + 0.02 * rng.next_signed()) / 1.02;
            brown
        })
        .collect();

    let mut out: Vec<f32> = raw[..len].to_vec();
    for i in 0..fade {
        let w = i as f32 / fade as f32;
        out[i] = out[i] * w + raw[len + i] * (1.0 - w);
    }

    let peak = out.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    if peak > 0.0 {
        let gain = RAIN_PEAK / peak;
        out.iter_mut().for_each(|s| *s *= gain);
    }
    out
}

/// Minimal PRNG so the noise is reproducible without extra dependencies
struct XorShift32(u32);

impl XorShift32 {
    fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    /// Uniform sample in [-1, 1]
    fn next_signed(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}
