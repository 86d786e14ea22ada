//! Microphone capture adapter using cpal
//!
//! Implements the audio-only modality: buffers device samples while
//! active, then resamples to 16 kHz mono and encodes to FLAC when the
//! session stops. Video modality is not supported by this backend and
//! fails acquisition the same way a missing camera would.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration as StdDuration, Instant};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tokio::time::{sleep, Duration as TokioDuration};

use super::flac_encoder::{encode_to_flac, TARGET_SAMPLE_RATE};
use crate::application::ports::{CaptureError, MediaCapture};
use crate::domain::capture::{negotiate_mime_type, MediaMimeType, Modality, RecordedArtifact};

/// How long `start` waits for the capture thread to report readiness
const STARTUP_TIMEOUT: StdDuration = StdDuration::from_secs(3);

/// cpal-based capture adapter.
///
/// The cpal stream is not `Send`, so it lives on a dedicated thread; the
/// adapter and the thread share state through atomics and a sample buffer.
pub struct CpalCapture {
    /// Captured samples (mono, i16, at device sample rate)
    sample_buffer: Arc<StdMutex<Vec<i16>>>,
    /// Device sample rate (may differ from the 16 kHz target)
    device_sample_rate: Arc<AtomicU32>,
    is_active: Arc<AtomicBool>,
    elapsed_ms: Arc<AtomicU64>,
}

impl CpalCapture {
    pub fn new() -> Self {
        Self {
            sample_buffer: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_active: Arc::new(AtomicBool::new(false)),
            elapsed_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Which full MIME strings this backend can emit
    fn backend_supports(mime: &str) -> bool {
        mime == "audio/flac" || mime == "audio/wav"
    }

    /// Negotiated output encoding for this backend. None of the preferred
    /// web container types are producible here, so negotiation falls back
    /// to the backend default.
    fn output_mime_type(modality: Modality) -> MediaMimeType {
        negotiate_mime_type(modality, Self::backend_supports)
            .unwrap_or(MediaMimeType::AudioFlac)
    }

    fn input_device() -> Result<cpal::Device, CaptureError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(CaptureError::DeviceNotFound)
    }

    fn input_config(device: &cpal::Device) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| classify_device_error(&e.to_string()))?;

        // Prefer mono and configs covering the 16 kHz target; accept
        // stereo (mixed down in the callback).
        let mut best: Option<cpal::SupportedStreamConfigRange> = None;
        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let covers_target = config.min_sample_rate().0 <= TARGET_SAMPLE_RATE
                && config.max_sample_rate().0 >= TARGET_SAMPLE_RATE;

            let is_better = match &best {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        covers_target && current.min_sample_rate().0 > TARGET_SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best = Some(config);
            }
        }

        let range = best.ok_or_else(|| {
            CaptureError::CaptureFailed("No usable input configuration found".into())
        })?;

        let sample_rate = if range.min_sample_rate().0 <= TARGET_SAMPLE_RATE
            && range.max_sample_rate().0 >= TARGET_SAMPLE_RATE
        {
            SampleRate(TARGET_SAMPLE_RATE)
        } else {
            range.min_sample_rate()
        };

        let sample_format = range.sample_format();
        let config = StreamConfig {
            channels: range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }
        samples
            .chunks(channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    fn resample_to_target(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, CaptureError> {
        if source_rate == TARGET_SAMPLE_RATE {
            return Ok(samples.to_vec());
        }

        let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();
        let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
        let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

        let mut resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            TARGET_SAMPLE_RATE as usize,
            1024,
            2,
            1,
        )
        .map_err(|e| CaptureError::CaptureFailed(format!("Resampler init failed: {}", e)))?;

        let mut output = Vec::with_capacity(output_len);
        let mut input_pos = 0;

        while input_pos < samples_f32.len() {
            let frames_needed = resampler.input_frames_next();
            let end_pos = (input_pos + frames_needed).min(samples_f32.len());
            let mut chunk = samples_f32[input_pos..end_pos].to_vec();
            if chunk.len() < frames_needed {
                chunk.resize(frames_needed, 0.0);
            }

            let resampled = resampler
                .process(&[chunk], None)
                .map_err(|e| CaptureError::CaptureFailed(format!("Resampling failed: {}", e)))?;

            output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
            input_pos = end_pos;
        }

        output.truncate(output_len);
        Ok(output)
    }

    /// Finalize buffered samples into the artifact
    fn encode_artifact(
        samples: &[i16],
        sample_rate: u32,
        mime_type: MediaMimeType,
    ) -> Result<RecordedArtifact, CaptureError> {
        let resampled = Self::resample_to_target(samples, sample_rate)?;
        let flac = encode_to_flac(&resampled)
            .map_err(|e| CaptureError::CaptureFailed(format!("Encoding failed: {}", e)))?;

        if flac.is_empty() {
            return Err(CaptureError::CaptureFailed("Encoded audio is empty".into()));
        }
        Ok(RecordedArtifact::new(flac, mime_type))
    }
}

impl Default for CpalCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CpalCapture {
    fn drop(&mut self) {
        // Signals the capture thread to release the device if a session
        // is still running when the adapter goes away.
        self.is_active.store(false, Ordering::SeqCst);
    }
}

/// Distinguish permission problems from busy devices in backend error text
fn classify_device_error(message: &str) -> CaptureError {
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("access") {
        CaptureError::PermissionDenied(message.to_string())
    } else if lower.contains("busy") || lower.contains("in use") {
        CaptureError::DeviceUnavailable(message.to_string())
    } else {
        CaptureError::CaptureFailed(message.to_string())
    }
}

#[async_trait]
impl MediaCapture for CpalCapture {
    async fn start(&self, modality: Modality) -> Result<(), CaptureError> {
        if self.is_active.load(Ordering::SeqCst) {
            return Err(CaptureError::AlreadyActive);
        }
        if modality.has_video() {
            // No camera behind this backend.
            return Err(CaptureError::DeviceNotFound);
        }

        {
            let mut buffer = self.sample_buffer.lock().unwrap_or_else(|e| e.into_inner());
            buffer.clear();
        }
        self.elapsed_ms.store(0, Ordering::SeqCst);

        let sample_buffer = Arc::clone(&self.sample_buffer);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_active = Arc::clone(&self.is_active);
        let elapsed_ms = Arc::clone(&self.elapsed_ms);

        // The thread reports acquisition success or failure exactly once.
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), CaptureError>>();

        std::thread::spawn(move || {
            let device = match CpalCapture::input_device() {
                Ok(d) => d,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            let (config, sample_format) = match CpalCapture::input_config(&device) {
                Ok(c) => c,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            let sample_rate = config.sample_rate.0;
            let channels = config.channels;
            device_sample_rate.store(sample_rate, Ordering::SeqCst);

            let buffer_for_stream = Arc::clone(&sample_buffer);
            let active_for_stream = Arc::clone(&is_active);

            let stream_result = match sample_format {
                SampleFormat::I16 => device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if active_for_stream.load(Ordering::SeqCst) {
                            let mono = CpalCapture::mix_to_mono(data, channels);
                            if let Ok(mut buffer) = buffer_for_stream.lock() {
                                buffer.extend_from_slice(&mono);
                            }
                        }
                    },
                    |err| eprintln!("Audio stream error: {}", err),
                    None,
                ),
                SampleFormat::F32 => {
                    let buffer_for_stream = Arc::clone(&sample_buffer);
                    let active_for_stream = Arc::clone(&is_active);
                    device.build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if active_for_stream.load(Ordering::SeqCst) {
                                let i16_data: Vec<i16> =
                                    data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                let mono = CpalCapture::mix_to_mono(&i16_data, channels);
                                if let Ok(mut buffer) = buffer_for_stream.lock() {
                                    buffer.extend_from_slice(&mono);
                                }
                            }
                        },
                        |err| eprintln!("Audio stream error: {}", err),
                        None,
                    )
                }
                _ => {
                    let _ = ready_tx.send(Err(CaptureError::CaptureFailed(
                        "Unsupported sample format".into(),
                    )));
                    return;
                }
            };

            let stream = match stream_result {
                Ok(s) => s,
                Err(e) => {
                    let _ = ready_tx.send(Err(classify_device_error(&e.to_string())));
                    return;
                }
            };

            if let Err(e) = stream.play() {
                let _ = ready_tx.send(Err(classify_device_error(&e.to_string())));
                return;
            }

            is_active.store(true, Ordering::SeqCst);
            let _ = ready_tx.send(Ok(()));

            // Hold the stream and tick the elapsed counter until stopped.
            let started = Instant::now();
            while is_active.load(Ordering::SeqCst) {
                elapsed_ms.store(started.elapsed().as_millis() as u64, Ordering::SeqCst);
                std::thread::sleep(StdDuration::from_millis(100));
            }

            // Dropping the stream releases the device exactly once, on
            // every exit path that reaches here.
            drop(stream);
        });

        let startup = tokio::task::spawn_blocking(move || ready_rx.recv_timeout(STARTUP_TIMEOUT))
            .await
            .map_err(|e| CaptureError::CaptureFailed(format!("Startup task error: {}", e)))?;

        match startup {
            Ok(result) => result,
            Err(_) => Err(CaptureError::DeviceUnavailable(
                "Capture device did not respond in time".into(),
            )),
        }
    }

    async fn stop(&self) -> Result<RecordedArtifact, CaptureError> {
        if !self.is_active.load(Ordering::SeqCst) {
            return Err(CaptureError::NotActive);
        }

        self.is_active.store(false, Ordering::SeqCst);
        // Let the capture thread drop the stream and flush its callback.
        sleep(TokioDuration::from_millis(150)).await;

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(CaptureError::CaptureFailed("Sample rate not set".into()));
        }

        let samples = {
            let mut buffer = self.sample_buffer.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *buffer)
        };

        if samples.is_empty() {
            return Err(CaptureError::CaptureFailed("No audio data captured".into()));
        }

        let mime_type = Self::output_mime_type(Modality::Audio);
        tokio::task::spawn_blocking(move || {
            Self::encode_artifact(&samples, sample_rate, mime_type)
        })
        .await
        .map_err(|e| CaptureError::CaptureFailed(format!("Encode task error: {}", e)))?
    }

    async fn cancel(&self) -> Result<(), CaptureError> {
        self.is_active.store(false, Ordering::SeqCst);
        sleep(TokioDuration::from_millis(150)).await;

        let mut buffer = self.sample_buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.clear();
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }

    fn elapsed_seconds(&self) -> u64 {
        self.elapsed_ms.load(Ordering::SeqCst) / 1000
    }
}
