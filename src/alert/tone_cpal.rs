use crate::alert::tone_config::find_best_output_config;
use crate::alert::ToneSink;
use crate::error::{MonitorError, ToneError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};
use log::{debug, info, warn};
use std::f32::consts::TAU;

/// Phase accumulator for a fixed-frequency sine
#[derive(Debug, Clone)]
pub struct SineWave {
    phase: f32,
    step: f32,
    volume: f32,
}

impl SineWave {
    pub fn new(frequency_hz: f32, sample_rate: u32, volume: f32) -> Self {
        SineWave {
            phase: 0.0,
            step: TAU * frequency_hz / sample_rate as f32,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn next_sample(&mut self) -> f32 {
        let sample = self.phase.sin() * self.volume;
        self.phase = (self.phase + self.step) % TAU;
        sample
    }

    /// Writes the same sample to every channel of each interleaved frame
    pub fn fill<T, F>(&mut self, data: &mut [T], channels: usize, convert: F)
    where
        F: Fn(f32) -> T,
        T: Copy,
    {
        for frame in data.chunks_mut(channels.max(1)) {
            let value = convert(self.next_sample());
            for sample in frame.iter_mut() {
                *sample = value;
            }
        }
    }
}

pub fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

pub fn f32_to_u16(sample: f32) -> u16 {
    ((sample.clamp(-1.0, 1.0) + 1.0) * 32767.5) as u16
}

/// Alert tone on the default output device. The stream lives only while the tone sounds.
pub struct CpalTone {
    device: cpal::Device,
    config: StreamConfig,
    sample_format: SampleFormat,
    stream: Option<Stream>,
}

impl CpalTone {
    pub fn default_output_name() -> Result<String, MonitorError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(MonitorError::NoOutputDevice)?;
        device.name().map_err(|e| MonitorError::Device(e.to_string()))
    }

    pub fn new() -> Result<Self, MonitorError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(MonitorError::NoOutputDevice)?;
        match device.name() {
            Ok(name) => info!("Output device: {}", name),
            Err(e) => warn!("Couldn't get output device name: {:?}", e),
        }
        let (config, sample_format) = find_best_output_config(&device)?;
        info!("Selected output config: {:?} {:?}", config, sample_format);

        Ok(CpalTone {
            device,
            config,
            sample_format,
            stream: None,
        })
    }

    fn build_stream(&self, frequency_hz: f32, volume: f32) -> Result<Stream, ToneError> {
        let channels = self.config.channels as usize;
        let mut sine = SineWave::new(frequency_hz, self.config.sample_rate.0, volume);
        let err_fn = |err| warn!("An error occurred on the output stream: {}", err);

        let stream = match self.sample_format {
            SampleFormat::F32 => self.device.build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| sine.fill(data, channels, |v| v),
                err_fn,
                None,
            ),
            SampleFormat::I16 => self.device.build_output_stream(
                &self.config,
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| sine.fill(data, channels, f32_to_i16),
                err_fn,
                None,
            ),
            SampleFormat::U16 => self.device.build_output_stream(
                &self.config,
                move |data: &mut [u16], _: &cpal::OutputCallbackInfo| sine.fill(data, channels, f32_to_u16),
                err_fn,
                None,
            ),
            other => return Err(ToneError::Start(format!("Unsupported sample format {:?}", other))),
        };
        stream.map_err(|e| ToneError::Start(e.to_string()))
    }
}

impl ToneSink for CpalTone {
    fn start(&mut self, frequency_hz: f32, volume: f32) -> Result<(), ToneError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let stream = self.build_stream(frequency_hz, volume)?;
        stream.play().map_err(|e| ToneError::Start(e.to_string()))?;
        debug!("Tone stream playing");
        self.stream = Some(stream);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ToneError> {
        if let Some(stream) = self.stream.take() {
            // dropping the stream releases the device even if pause fails
            stream.pause().map_err(|e| ToneError::Stop(e.to_string()))?;
            debug!("Tone stream released");
        }
        Ok(())
    }
}
