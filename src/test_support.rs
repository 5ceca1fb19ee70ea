//! WAV fixtures shared by the unit tests.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

const HEADER_LEN: usize = 44;

fn wav_header(out: &mut Vec<u8>, sample_rate: u32, channels: u16, data_len: u32) {
    let bits_per_sample: u16 = 16;
    let block_align = channels * bits_per_sample / 8;
    let byte_rate = sample_rate * block_align as u32;

    out.write_all(b"RIFF").unwrap();
    out.write_u32::<LittleEndian>(36 + data_len).unwrap();
    out.write_all(b"WAVEfmt ").unwrap();
    out.write_u32::<LittleEndian>(16).unwrap();
    out.write_u16::<LittleEndian>(1).unwrap(); // PCM
    out.write_u16::<LittleEndian>(channels).unwrap();
    out.write_u32::<LittleEndian>(sample_rate).unwrap();
    out.write_u32::<LittleEndian>(byte_rate).unwrap();
    out.write_u16::<LittleEndian>(block_align).unwrap();
    out.write_u16::<LittleEndian>(bits_per_sample).unwrap();
    out.write_all(b"data").unwrap();
    out.write_u32::<LittleEndian>(data_len).unwrap();
}

/// Mono 16-bit 440Hz tone.
pub fn sine_wav(seconds: f64, sample_rate: u32) -> Vec<u8> {
    let samples = (seconds * sample_rate as f64) as usize;
    let mut out = Vec::with_capacity(HEADER_LEN + samples * 2);
    wav_header(&mut out, sample_rate, 1, (samples * 2) as u32);

    for i in 0..samples {
        let t = i as f64 / sample_rate as f64;
        let sample = (2.0 * std::f64::consts::PI * 440.0 * t).sin() * 32767.0 * 0.8;
        out.write_i16::<LittleEndian>(sample as i16).unwrap();
    }
    out
}

/// Silent stereo 16-bit WAV whose total size is exactly `total_bytes`.
pub fn silent_wav(total_bytes: usize) -> Vec<u8> {
    assert!(total_bytes >= HEADER_LEN && (total_bytes - HEADER_LEN) % 4 == 0);
    let data_len = total_bytes - HEADER_LEN;
    let mut out = Vec::with_capacity(total_bytes);
    wav_header(&mut out, 44100, 2, data_len as u32);
    out.resize(total_bytes, 0);
    out
}

#[test]
fn test_fixture_sizes() {
    assert_eq!(silent_wav(2 * 1024 * 1024).len(), 2 * 1024 * 1024);
    assert_eq!(sine_wav(1.0, 8000).len(), HEADER_LEN + 16000);
    assert_eq!(&sine_wav(0.1, 8000)[..4], b"RIFF");
}

/// Config rooted in `root` with no simulated delays.
pub fn test_config(root: &std::path::Path) -> crate::config::AppConfig {
    let mut config = crate::config::AppConfig::default();
    config.storage.upload_dir = root.join("uploads");
    config.storage.output_dir = root.join("outputs");
    config.storage.models_dir = root.join("models");
    config.processing = crate::config::ProcessingConfig::instant();
    config.ensure_directories().unwrap();
    config
}

pub const BOUNDARY: &str = "----audio-enhancer-test-boundary";

/// One-part `multipart/form-data` body and its content type.
pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    write!(
        body,
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
        BOUNDARY, field, filename
    )
    .unwrap();
    body.extend_from_slice(bytes);
    write!(body, "\r\n--{}--\r\n", BOUNDARY).unwrap();

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

/// Multipart body with a single plain text field and no file.
pub fn multipart_text_only(field: &str, value: &str) -> (String, Vec<u8>) {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"\r\n\r\n{v}\r\n--{b}--\r\n",
        b = BOUNDARY,
        f = field,
        v = value
    );
    (format!("multipart/form-data; boundary={}", BOUNDARY), body.into_bytes())
}
