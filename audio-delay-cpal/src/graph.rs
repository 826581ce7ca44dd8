//! Capture → delay → output wiring on top of cpal streams.
//!
//! ```text
//! [input stream] → downmix → [DelayLine] → fan out to channels → [output stream]
//! ```
//!
//! The input stream is built when the capture opens but only plays once the
//! delay stage and output exist, so nothing queues up before the delay is known.

use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, StreamConfig};
use parking_lot::Mutex;

use audio_delay_core::processing::delay_line::{downmix_into, DelayLine};

use crate::error::BackendError;

/// A live capture stream and, once connected, its delayed playback.
pub struct CaptureGraph {
    device_id: String,
    input: cpal::Stream,
    output: Option<cpal::Stream>,
    line: Arc<Mutex<DelayLine>>,
    sample_rate: u32,
}

impl CaptureGraph {
    /// Build (but do not start) an input stream on `device`.
    pub fn open(device: &cpal::Device, device_id: &str) -> Result<Self, BackendError> {
        let supported = device.default_input_config()?;
        let config = supported.config();
        let line = Arc::new(Mutex::new(DelayLine::new(0, 1)));

        log::debug!(
            "Opening input {}: {} Hz, {} ch, {:?}",
            device_id,
            config.sample_rate.0,
            config.channels,
            supported.sample_format()
        );

        let input = match supported.sample_format() {
            SampleFormat::F32 => build_input::<f32>(device, &config, Arc::clone(&line))?,
            SampleFormat::I16 => build_input::<i16>(device, &config, Arc::clone(&line))?,
            SampleFormat::U16 => build_input::<u16>(device, &config, Arc::clone(&line))?,
            other => return Err(BackendError::SampleFormat(other)),
        };

        Ok(Self {
            device_id: device_id.to_string(),
            input,
            output: None,
            line,
            sample_rate: config.sample_rate.0,
        })
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Size the delay stage, open the default output at the capture rate and
    /// start both streams.
    pub fn connect(
        &mut self,
        host: &cpal::Host,
        delay_secs: f64,
        headroom_secs: f64,
    ) -> Result<(), BackendError> {
        *self.line.lock() = DelayLine::for_duration(delay_secs, headroom_secs, self.sample_rate);

        let device = host.default_output_device().ok_or(BackendError::NoOutputDevice)?;
        let supported = device.default_output_config()?;
        let config = StreamConfig {
            channels: supported.channels(),
            sample_rate: cpal::SampleRate(self.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let output = match supported.sample_format() {
            SampleFormat::F32 => build_output::<f32>(&device, &config, Arc::clone(&self.line))?,
            SampleFormat::I16 => build_output::<i16>(&device, &config, Arc::clone(&self.line))?,
            SampleFormat::U16 => build_output::<u16>(&device, &config, Arc::clone(&self.line))?,
            other => return Err(BackendError::SampleFormat(other)),
        };

        output.play()?;
        self.input.play()?;
        self.output = Some(output);

        log::info!(
            "Delay graph running: {} → {:.2}s delay → {} ({} Hz)",
            self.device_id,
            delay_secs,
            device.name().unwrap_or_else(|_| "default output".into()),
            self.sample_rate
        );
        Ok(())
    }

    /// Halt both streams. Dropping the graph releases the devices.
    pub fn stop(&mut self) {
        if let Err(e) = self.input.pause() {
            log::debug!("Pausing input {} failed: {}", self.device_id, e);
        }
        if let Some(output) = self.output.take() {
            if let Err(e) = output.pause() {
                log::debug!("Pausing output failed: {}", e);
            }
        }
        self.line.lock().reset();
    }
}

fn build_input<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    line: Arc<Mutex<DelayLine>>,
) -> Result<cpal::Stream, BackendError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = config.channels as usize;
    let mut mono: Vec<f32> = Vec::new();

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            downmix_into(data.iter().map(|&s| f32::from_sample(s)), channels, &mut mono);
            line.lock().write(&mono);
        },
        |err| log::error!("Input stream error: {}", err),
        None,
    )?;
    Ok(stream)
}

fn build_output<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    line: Arc<Mutex<DelayLine>>,
) -> Result<cpal::Stream, BackendError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = (config.channels as usize).max(1);
    let mut mono: Vec<f32> = Vec::new();

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let frames = data.len() / channels;
            mono.resize(frames, 0.0);
            line.lock().read_into(&mut mono);

            for (frame, &sample) in data.chunks_mut(channels).zip(mono.iter()) {
                let value = T::from_sample(sample);
                frame.fill(value);
            }
        },
        |err| log::error!("Output stream error: {}", err),
        None,
    )?;
    Ok(stream)
}
