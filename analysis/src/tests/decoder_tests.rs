#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::analysis::analyze_waveform;
    use crate::decoder::decode_first_channel;
    use crate::features::{peak, rms};

    #[test]
    fn test_decode_mono_wav() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let buffer = decode_first_channel(Path::new("../assets/sine_440_mono.wav")).unwrap();

        assert_eq!(buffer.sample_rate, 8000);
        assert_eq!(buffer.samples.len(), 8000);
    }

    #[test]
    fn test_decode_stereo_takes_first_channel() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let buffer = decode_first_channel(Path::new("../assets/sine_440_stereo.wav")).unwrap();

        // Half a second of frames, not frames times channels; the silent
        // right channel must not leak into the left one.
        assert_eq!(buffer.samples.len(), 4000);

        let rms = rms(&buffer.samples);
        assert!((rms - 0.283).abs() < 0.01, "unexpected rms: {rms}");
    }

    #[test]
    fn test_analyze_mono_wav() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let result = analyze_waveform(Path::new("../assets/sine_440_mono.wav")).unwrap();
        let stats = &result.stats;

        assert_eq!(stats.sample_rate, 8000);
        assert_eq!(stats.sample_count, 8000);
        assert!((stats.duration - 1.0).abs() < 1e-9);

        // A 440 Hz sine at 0.4 amplitude: rms is amplitude over sqrt(2),
        // and the normalized series peaks at 1.
        assert!(
            (stats.rms_original - 0.283).abs() < 0.01,
            "unexpected original rms: {}",
            stats.rms_original
        );
        assert!(
            (stats.rms_normalized - 0.707).abs() < 0.01,
            "unexpected normalized rms: {}",
            stats.rms_normalized
        );
        assert!((peak(&result.samples) - 1.0).abs() < 1e-6);

        // Two sign flips per cycle over one second.
        assert!(
            stats.zero_crossings.abs_diff(880) <= 2,
            "unexpected zero crossings: {}",
            stats.zero_crossings
        );
    }

    #[test]
    fn test_decode_missing_file_fails() {
        assert!(decode_first_channel(Path::new("../assets/does_not_exist.wav")).is_err());
    }

    #[test]
    fn test_decode_rejects_non_audio() {
        assert!(decode_first_channel(Path::new("../Cargo.toml")).is_err());
    }
}
