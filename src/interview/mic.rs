use anyhow::{bail, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{error, info};

/// One encoded answer clip
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// Microphone capture seam.
///
/// `CpalMicrophone` implements it against the default input device; tests
/// substitute a fake that tracks its live flag. Implementations release the
/// capture device on `stop` and `abort`, and `Drop` must release it too.
pub trait Microphone: Send {
    /// Acquire the input device and start capturing
    fn start(&mut self) -> Result<()>;

    /// Stop capturing and return the recorded clip as WAV
    fn stop(&mut self) -> Result<AudioClip>;

    /// Stop capturing and discard whatever was recorded
    fn abort(&mut self);

    /// Whether a capture stream is currently open
    fn is_live(&self) -> bool;
}

/// Default-input-device capture via cpal.
///
/// The stream lives on a dedicated thread (cpal streams are not `Send`);
/// stop/abort flip the live flag and join the thread, so the device is
/// released by the time they return.
pub struct CpalMicrophone {
    samples: Arc<Mutex<Vec<i16>>>,
    sample_rate: Arc<AtomicU32>,
    live: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl CpalMicrophone {
    pub fn new() -> Self {
        Self {
            samples: Arc::new(Mutex::new(Vec::new())),
            sample_rate: Arc::new(AtomicU32::new(0)),
            live: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    fn join_worker(&mut self) {
        self.live.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Capture thread panicked");
            }
        }
    }
}

impl Default for CpalMicrophone {
    fn default() -> Self {
        Self::new()
    }
}

impl Microphone for CpalMicrophone {
    fn start(&mut self) -> Result<()> {
        if self.live.load(Ordering::SeqCst) {
            bail!("Microphone is already recording");
        }

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .context("No input device available")?;
        let config = device
            .default_input_config()
            .context("Failed to read input device config")?;

        let channels = config.channels() as usize;
        let sample_format = config.sample_format();
        let stream_config: cpal::StreamConfig = config.into();

        self.sample_rate
            .store(stream_config.sample_rate.0, Ordering::SeqCst);
        self.samples.lock().unwrap().clear();
        self.live.store(true, Ordering::SeqCst);

        info!(
            "Recording from default input: {} Hz, {} channels",
            stream_config.sample_rate.0, channels
        );

        let samples = Arc::clone(&self.samples);
        let live = Arc::clone(&self.live);

        let worker = std::thread::spawn(move || {
            let err_fn = |e| error!("Capture stream error: {}", e);

            let sink = samples;
            let stream = match sample_format {
                SampleFormat::F32 => {
                    let sink = Arc::clone(&sink);
                    device.build_input_stream(
                        &stream_config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            let mut sink = sink.lock().unwrap();
                            for frame in data.chunks(channels) {
                                let mono = frame.iter().sum::<f32>() / channels as f32;
                                sink.push((mono.clamp(-1.0, 1.0) * i16::MAX as f32) as i16);
                            }
                        },
                        err_fn,
                        None,
                    )
                }
                SampleFormat::I16 => {
                    let sink = Arc::clone(&sink);
                    device.build_input_stream(
                        &stream_config,
                        move |data: &[i16], _: &cpal::InputCallbackInfo| {
                            let mut sink = sink.lock().unwrap();
                            for frame in data.chunks(channels) {
                                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                                sink.push((sum / channels as i32) as i16);
                            }
                        },
                        err_fn,
                        None,
                    )
                }
                other => {
                    error!("Unsupported input sample format: {:?}", other);
                    live.store(false, Ordering::SeqCst);
                    return;
                }
            };

            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    error!("Failed to open capture stream: {}", e);
                    live.store(false, Ordering::SeqCst);
                    return;
                }
            };

            if let Err(e) = stream.play() {
                error!("Failed to start capture stream: {}", e);
                live.store(false, Ordering::SeqCst);
                return;
            }

            while live.load(Ordering::SeqCst) {
                std::thread::sleep(Duration::from_millis(50));
            }

            // Stream drops here, releasing the device
        });

        self.worker = Some(worker);

        Ok(())
    }

    fn stop(&mut self) -> Result<AudioClip> {
        if self.worker.is_none() {
            bail!("Microphone is not recording");
        }

        self.join_worker();

        let samples = std::mem::take(&mut *self.samples.lock().unwrap());
        let sample_rate = self.sample_rate.load(Ordering::SeqCst);

        info!(
            "Recording stopped: {} samples at {} Hz",
            samples.len(),
            sample_rate
        );

        let bytes = encode_wav(&samples, sample_rate)?;

        Ok(AudioClip {
            bytes,
            mime: "audio/wav".to_string(),
        })
    }

    fn abort(&mut self) {
        self.join_worker();
        self.samples.lock().unwrap().clear();
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

impl Drop for CpalMicrophone {
    fn drop(&mut self) {
        self.join_worker();
    }
}

/// Encode mono 16-bit PCM as an in-memory WAV file
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer =
        hound::WavWriter::new(&mut cursor, spec).context("Failed to start WAV encoder")?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .context("Failed to encode audio sample")?;
    }

    writer.finalize().context("Failed to finalize WAV clip")?;

    Ok(cursor.into_inner())
}
