use crate::error::MonitorError;
use cpal::traits::DeviceTrait;
use cpal::{SampleFormat, StreamConfig, SupportedStreamConfigRange};
use log::{debug, error, info};

const SUPPORTED_FORMATS: [SampleFormat; 3] = [SampleFormat::F32, SampleFormat::I16, SampleFormat::U16];

pub fn is_supported_format(format: SampleFormat) -> bool {
    SUPPORTED_FORMATS.contains(&format)
}

/// Picks an output config the tone generator can fill: f32 first, mono or stereo,
/// then i16, then whatever the device offers by default.
pub fn find_best_output_config(device: &cpal::Device) -> Result<(StreamConfig, SampleFormat), MonitorError> {
    let supported_configs: Vec<SupportedStreamConfigRange> = match device.supported_output_configs() {
        Ok(supported_configs) => supported_configs.collect(),
        Err(e) => {
            error!("error getting supported_output_configs : {:?}", e);
            return Err(MonitorError::Device(e.to_string()));
        }
    };

    for config in &supported_configs {
        debug!("Supported output config: {:?}", config);
    }

    for format in [SampleFormat::F32, SampleFormat::I16] {
        let found = supported_configs
            .iter()
            .find(|config| config.sample_format() == format && config.channels() <= 2);
        if let Some(config_range) = found {
            let config = config_range.clone().with_max_sample_rate();
            info!("Found {:?} output configuration {:?}", format, &config);
            return Ok((config.into(), format));
        }
    }

    let default_config = device.default_output_config().map_err(|e| MonitorError::Device(e.to_string()))?;
    if !is_supported_format(default_config.sample_format()) {
        return Err(MonitorError::UnsupportedFormat(format!("{:?}", default_config.sample_format())));
    }
    debug!("Using default output configuration {:?}", default_config);
    Ok((default_config.clone().into(), default_config.sample_format()))
}
