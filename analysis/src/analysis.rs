use std::path::Path;

use anyhow::Result;

use crate::decoder::{SampleBuffer, decode_first_channel};
use crate::features::{peak, rms, zero_crossings};

#[derive(Debug, Clone)]
pub struct AudioStats {
    pub sample_rate: u32,
    pub duration: f64,
    pub sample_count: usize,
    pub rms_original: f32,
    pub rms_normalized: f32,
    pub zero_crossings: usize,
}

/// Peak-normalizes a signal into roughly [-1, 1]. An all-silence signal is
/// returned unchanged since there is no peak to divide by.
pub fn normalize(samples: &[f32]) -> Vec<f32> {
    let current_peak = peak(samples);

    if current_peak > 0.0 {
        samples.iter().map(|&s| s / current_peak).collect()
    } else {
        samples.to_vec()
    }
}

/// Computes stats from both the original and the normalized series. Both
/// series must have the same non-zero length.
pub fn compute_stats(original: &[f32], normalized: &[f32], sample_rate: u32) -> AudioStats {
    AudioStats {
        sample_rate,
        duration: original.len() as f64 / f64::from(sample_rate),
        sample_count: original.len(),
        rms_original: rms(original),
        rms_normalized: rms(normalized),
        zero_crossings: zero_crossings(normalized),
    }
}

#[derive(Debug)]
pub struct WaveformAnalysis {
    /// The normalized series, ready for plotting.
    pub samples: Vec<f32>,
    pub stats: AudioStats,
}

/// Loads the first channel of an audio file and returns the normalized
/// waveform together with its stats.
pub fn analyze_waveform(file_path: &Path) -> Result<WaveformAnalysis> {
    let SampleBuffer {
        samples,
        sample_rate,
    } = decode_first_channel(file_path)?;

    let normalized = normalize(&samples);
    let stats = compute_stats(&samples, &normalized, sample_rate);

    Ok(WaveformAnalysis {
        samples: normalized,
        stats,
    })
}
