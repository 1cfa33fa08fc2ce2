use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::debug;

use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::conv::IntoSample;
use symphonia::core::errors::Error;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

pub struct SampleBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

fn get_format(file_path: &Path) -> Result<Box<dyn FormatReader>> {
    // Open the media source.
    let src = File::open(file_path)
        .with_context(|| format!("failed to open audio file: {}", file_path.display()))?;

    // Create the media source stream.
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    // Create a probe hint using the file's extension.
    let mut hint = Hint::new();
    if let Some(ext) = file_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    // Use the default options for metadata and format readers.
    let meta_opts: MetadataOptions = Default::default();
    let fmt_opts: FormatOptions = Default::default();

    // Probe the media source.
    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .with_context(|| "unsupported format")?;

    Ok(probed.format)
}

/// Decodes the first (left) channel of an audio container into f32 samples.
/// Remaining channels are discarded.
pub fn decode_first_channel(file_path: &Path) -> Result<SampleBuffer> {
    let mut format = get_format(file_path)?;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("no supported audio tracks")?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .context("no sample rate found")?;

    // Use the default options for the decoder.
    let dec_opts: DecoderOptions = Default::default();

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &dec_opts)
        .context("unsupported codec")?;

    // Store the track identifier, it will be used to filter packets.
    let track_id = track.id;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(Error::IoError(_)) => {
                debug!("end of stream");
                break;
            }
            Err(err) => return Err(err).context("failed to read packet"),
        };

        // If the packet does not belong to the selected track, skip over it.
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(Error::IoError(_)) | Err(Error::DecodeError(_)) => {
                debug!("skipping undecodable packet");
                continue;
            }
            Err(err) => return Err(err).context("failed to decode packet"),
        };

        // Macro to collect plane 0 from the different AudioBufferRef types.
        macro_rules! extend_first_channel {
            ($buf:expr) => {{
                let plane = $buf.chan(0);
                samples.extend(plane.iter().map(|&s| IntoSample::<f32>::into_sample(s)));
            }};
        }

        match decoded {
            AudioBufferRef::U8(buf) => extend_first_channel!(buf),
            AudioBufferRef::U16(buf) => extend_first_channel!(buf),
            AudioBufferRef::U24(buf) => extend_first_channel!(buf),
            AudioBufferRef::U32(buf) => extend_first_channel!(buf),
            AudioBufferRef::S8(buf) => extend_first_channel!(buf),
            AudioBufferRef::S16(buf) => extend_first_channel!(buf),
            AudioBufferRef::S24(buf) => extend_first_channel!(buf),
            AudioBufferRef::S32(buf) => extend_first_channel!(buf),
            AudioBufferRef::F32(buf) => extend_first_channel!(buf),
            AudioBufferRef::F64(buf) => extend_first_channel!(buf),
        }
    }

    if samples.is_empty() {
        bail!("no audio data in {}", file_path.display());
    }

    debug!(
        "decoded {} samples at {} Hz from {}",
        samples.len(),
        sample_rate,
        file_path.display()
    );

    Ok(SampleBuffer {
        samples,
        sample_rate,
    })
}
