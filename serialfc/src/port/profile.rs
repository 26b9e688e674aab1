// src/port/profile.rs
//! Applying a configured set of values to a port in one pass.

use serde::Deserialize;

use super::Port;
use super::settings::*;
use crate::comms::ControlChannel;
use crate::error::Result;

/// Desired state for a mode setting (`{ enabled = true, value = 3 }`).
/// `value` is required when enabling and ignored when disabling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawModeConfig")]
pub struct ModeConfig {
    pub enabled: bool,
    pub value:   i32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModeConfig {
    enabled: bool,
    #[serde(default)]
    value:   Option<i32>,
}

impl TryFrom<RawModeConfig> for ModeConfig {
    type Error = String;

    fn try_from(raw: RawModeConfig) -> std::result::Result<Self, Self::Error> {
        match (raw.enabled, raw.value) {
            (true, None) => Err("`value` is required when `enabled = true`".into()),
            (enabled, value) => Ok(Self { enabled, value: value.unwrap_or_default() }),
        }
    }
}

/// Mirror of the `[profile]` table. Absent keys leave the hardware alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortProfile {
    /// Log and skip settings the card reports as unsupported.
    #[serde(default)]
    pub skip_unsupported: bool,

    pub clock_rate:  Option<u32>,
    pub sample_rate: Option<u32>,

    pub rs485:       Option<bool>,
    pub echo_cancel: Option<bool>,
    pub termination: Option<bool>,
    pub nine_bit:    Option<bool>,

    pub tx_trigger: Option<u32>,
    pub rx_trigger: Option<u32>,

    pub fixed_baud_rate:   Option<ModeConfig>,
    pub isochronous:       Option<ModeConfig>,
    pub external_transmit: Option<ModeConfig>,

    pub frame_length: Option<u32>,
}

/// Which settings were written and which were skipped as unsupported.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

impl<C: ControlChannel> Port<C> {
    /// Apply `profile` in a fixed order: the clock first (sample rate and
    /// baud rates derive from it), then flags, FIFO triggers, modes and
    /// frame length. Stops at the first error that is not a skippable
    /// "unsupported".
    pub fn apply(&mut self, profile: &PortProfile) -> Result<ApplyReport> {
        let skip = profile.skip_unsupported;
        let mut report = ApplyReport::default();

        if let Some(rate) = profile.clock_rate {
            self.step(CLOCK_RATE.name, skip, &mut report, |p| p.write_only(CLOCK_RATE, rate))?;
        }
        if let Some(rate) = profile.sample_rate {
            self.step(SAMPLE_RATE.name, skip, &mut report, |p| p.set_register(SAMPLE_RATE, rate))?;
        }

        let flags = [
            (RS485, profile.rs485),
            (ECHO_CANCEL, profile.echo_cancel),
            (TERMINATION, profile.termination),
            (NINE_BIT, profile.nine_bit),
        ];
        for (flag, wanted) in flags {
            if let Some(on) = wanted {
                self.step(flag.name, skip, &mut report, |p| p.set_flag(flag, on))?;
            }
        }

        let registers = [
            (TX_TRIGGER, profile.tx_trigger),
            (RX_TRIGGER, profile.rx_trigger),
        ];
        for (register, wanted) in registers {
            if let Some(value) = wanted {
                self.step(register.name, skip, &mut report, |p| p.set_register(register, value))?;
            }
        }

        let modes = [
            (FIXED_BAUD_RATE, profile.fixed_baud_rate),
            (ISOCHRONOUS, profile.isochronous),
            (EXTERNAL_TRANSMIT, profile.external_transmit),
        ];
        for (mode, wanted) in modes {
            match wanted {
                Some(ModeConfig { enabled: true, value }) => {
                    self.step(mode.name, skip, &mut report, |p| p.enable_mode(mode, value))?
                }
                Some(ModeConfig { enabled: false, .. }) => {
                    self.step(mode.name, skip, &mut report, |p| p.disable_mode(mode))?
                }
                None => {}
            }
        }

        if let Some(num_chars) = profile.frame_length {
            self.step(FRAME_LENGTH.name, skip, &mut report, |p| p.set_register(FRAME_LENGTH, num_chars))?;
        }

        log::info!(
            "Profile applied: {} setting(s) written, {} skipped",
            report.applied.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    fn step<F>(&mut self, name: &'static str, skip: bool, report: &mut ApplyReport, op: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        match op(self) {
            Ok(()) => {
                report.applied.push(name);
                Ok(())
            }
            Err(e) if skip && e.is_unsupported() => {
                log::warn!("Skipping {name}: {e}");
                report.skipped.push(name);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
