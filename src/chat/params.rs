//! Sampling parameter normalization.
//!
//! The API rejects `temperature` and `top_p` at or outside the closed bounds, so
//! both are clamped into the open interval (0, 1) before sending.

use super::types::ChatCompletionRequest;

pub const MIN_SAMPLING_VALUE: f64 = 0.01;
pub const MAX_SAMPLING_VALUE: f64 = 0.99;

/// The three request fields the normalizer touches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SamplingParams {
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub do_sample: Option<bool>,
}

impl SamplingParams {
    /// Clamp each present value independently.
    ///
    /// A non-positive temperature also turns sampling off (`do_sample = false`).
    /// Absent values stay absent.
    pub fn normalize(self) -> Self {
        let mut out = self;
        if let Some(t) = self.temperature {
            if t <= 0.0 {
                out.temperature = Some(MIN_SAMPLING_VALUE);
                out.do_sample = Some(false);
            } else if t >= 1.0 {
                out.temperature = Some(MAX_SAMPLING_VALUE);
            }
        }
        if let Some(p) = self.top_p {
            out.top_p = Some(clamp_open_unit(p));
        }
        out
    }
}

fn clamp_open_unit(v: f64) -> f64 {
    if v <= 0.0 {
        MIN_SAMPLING_VALUE
    } else if v >= 1.0 {
        MAX_SAMPLING_VALUE
    } else {
        v
    }
}

impl ChatCompletionRequest {
    pub fn sampling(&self) -> SamplingParams {
        SamplingParams {
            temperature: self.temperature,
            top_p: self.top_p,
            do_sample: self.do_sample,
        }
    }

    /// Apply [`SamplingParams::normalize`] in place.
    pub fn normalize_sampling(&mut self) {
        let p = self.sampling().normalize();
        self.temperature = p.temperature;
        self.top_p = p.top_p;
        self.do_sample = p.do_sample;
    }
}
