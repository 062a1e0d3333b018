//! GPIO input adapter for the sense channels.
//!
//! Implements [`InputPort`] over raw ESP-IDF sys calls: each configured
//! pin is set up as an input (pull-up enabled, interrupts disabled — the
//! sampler polls, it does not use edge ISRs) and read with
//! `gpio_get_level` once per sampler cycle.
//!
//! On non-ESP targets the adapter returns a constant low level, the
//! defined neutral value for host simulation.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::{
    gpio_config, gpio_config_t, gpio_get_level, gpio_int_type_t_GPIO_INTR_DISABLE,
    gpio_mode_t_GPIO_MODE_INPUT, gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
    gpio_pullup_t_GPIO_PULLUP_ENABLE, ESP_OK,
};

use crate::app::ports::InputPort;
use crate::config::{ChannelConfig, MAX_CHANNELS};
use crate::error::{Error, Result};

/// Polled digital input over the configured channel list.
pub struct GpioInput {
    gpios: heapless::Vec<i32, MAX_CHANNELS>,
}

impl GpioInput {
    /// Configure every channel's pin as an input.
    pub fn new(channels: &[ChannelConfig]) -> Result<Self> {
        let mut gpios = heapless::Vec::new();
        for ch in channels {
            configure_input(ch.gpio)?;
            gpios
                .push(ch.gpio)
                .map_err(|_| Error::Init("channel count exceeds MAX_CHANNELS"))?;
        }
        log::info!("gpio: {} sense inputs configured", gpios.len());
        Ok(Self { gpios })
    }
}

impl InputPort for GpioInput {
    fn read_level(&mut self, channel: usize) -> bool {
        read_raw(self.gpios[channel])
    }
}

#[cfg(target_os = "espidf")]
fn configure_input(gpio: i32) -> Result<()> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << gpio,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("gpio input config failed"));
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn configure_input(_gpio: i32) -> Result<()> {
    Ok(())
}

#[cfg(target_os = "espidf")]
fn read_raw(gpio: i32) -> bool {
    (unsafe { gpio_get_level(gpio) }) != 0
}

#[cfg(not(target_os = "espidf"))]
fn read_raw(_gpio: i32) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_reads_neutral_low() {
        let channels = [ChannelConfig { gpio: 2 }, ChannelConfig { gpio: 34 }];
        let mut input = GpioInput::new(&channels).unwrap();
        assert!(!input.read_level(0));
        assert!(!input.read_level(1));
    }

    #[test]
    fn rejects_oversized_channel_list() {
        let channels = [ChannelConfig { gpio: 1 }; MAX_CHANNELS + 1];
        assert!(GpioInput::new(&channels).is_err());
    }
}
