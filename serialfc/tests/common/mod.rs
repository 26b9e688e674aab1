//! User-mode stand-ins for the SerialFC driver.
//!
//! `FakeCard` keeps per-setting state the way the driver does: enable /
//! disable / set requests update the value the matching get returns.
//! Disabled modes read back as `DISABLED` (-1).

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use serialfc::{ControlChannel, ControlRequest, DeviceFault};
use shared::{ControlCode, Operation};

pub const DISABLED: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub code:       ControlCode,
    pub input:      Option<Vec<u8>>,
    pub output_len: usize,
}

#[derive(Debug, Default)]
pub struct FakeCard {
    /// Bytes returned by each get operation.
    pub state:       HashMap<Operation, Vec<u8>>,
    /// Operations answered with `DeviceFault::Unsupported`.
    pub unsupported: HashSet<Operation>,
    pub requests:    Vec<Recorded>,
}

enum Effect {
    Store(Operation, Vec<u8>),
    StoreInput(Operation),
    Read(Operation),
}

impl FakeCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card of the given raw type with every feature available.
    pub fn with_card_type(raw: u32) -> Self {
        let mut card = Self::new();
        card.force(Operation::GetCardType, raw.to_le_bytes().to_vec());
        card
    }

    /// Make the next reads of `op` return `bytes` verbatim.
    pub fn force(&mut self, op: Operation, bytes: Vec<u8>) {
        self.state.insert(op, bytes);
    }

    pub fn reject(&mut self, op: Operation) {
        self.unsupported.insert(op);
    }

    pub fn codes(&self) -> Vec<ControlCode> {
        self.requests.iter().map(|r| r.code).collect()
    }

    fn effect(op: Operation) -> Effect {
        use Operation::*;
        let on = vec![1u8];
        let off = vec![0u8];
        let disabled = DISABLED.to_le_bytes().to_vec();
        match op {
            EnableRs485 => Effect::Store(GetRs485, on),
            DisableRs485 => Effect::Store(GetRs485, off),
            EnableEchoCancel => Effect::Store(GetEchoCancel, on),
            DisableEchoCancel => Effect::Store(GetEchoCancel, off),
            EnableTermination => Effect::Store(GetTermination, on),
            DisableTermination => Effect::Store(GetTermination, off),
            Enable9Bit => Effect::Store(Get9Bit, on),
            Disable9Bit => Effect::Store(Get9Bit, off),
            SetSampleRate => Effect::StoreInput(GetSampleRate),
            SetTxTrigger => Effect::StoreInput(GetTxTrigger),
            SetRxTrigger => Effect::StoreInput(GetRxTrigger),
            SetFrameLength => Effect::StoreInput(GetFrameLength),
            // The driver keeps the clock rate to itself.
            SetClockRate => Effect::StoreInput(SetClockRate),
            EnableIsochronous => Effect::StoreInput(GetIsochronous),
            DisableIsochronous => Effect::Store(GetIsochronous, disabled),
            EnableExternalTransmit => Effect::StoreInput(GetExternalTransmit),
            DisableExternalTransmit => Effect::Store(GetExternalTransmit, disabled),
            EnableFixedBaudRate => Effect::StoreInput(GetFixedBaudRate),
            DisableFixedBaudRate => Effect::Store(GetFixedBaudRate, disabled),
            read => Effect::Read(read),
        }
    }
}

impl ControlChannel for FakeCard {
    fn control(&mut self, request: &ControlRequest<'_>) -> Result<Vec<u8>, DeviceFault> {
        self.requests.push(Recorded {
            code:       request.code,
            input:      request.input.map(<[u8]>::to_vec),
            output_len: request.output_len,
        });

        let op = Operation::from_code(request.code).ok_or(DeviceFault::Unsupported)?;
        if self.unsupported.contains(&op) {
            return Err(DeviceFault::Unsupported);
        }

        match Self::effect(op) {
            Effect::Store(target, bytes) => {
                self.state.insert(target, bytes);
                Ok(Vec::new())
            }
            Effect::StoreInput(target) => {
                let bytes = request.input.map(<[u8]>::to_vec).unwrap_or_default();
                self.state.insert(target, bytes);
                Ok(Vec::new())
            }
            Effect::Read(target) => Ok(self
                .state
                .get(&target)
                .cloned()
                .unwrap_or_else(|| vec![0; request.output_len])),
        }
    }
}

/// Answers every request with the same bytes, or the same fault.
pub struct Scripted {
    pub reply: Result<Vec<u8>, fn() -> DeviceFault>,
    pub calls: usize,
}

impl Scripted {
    pub fn replying(bytes: &[u8]) -> Self {
        Self { reply: Ok(bytes.to_vec()), calls: 0 }
    }

    pub fn failing(fault: fn() -> DeviceFault) -> Self {
        Self { reply: Err(fault), calls: 0 }
    }
}

impl ControlChannel for Scripted {
    fn control(&mut self, _request: &ControlRequest<'_>) -> Result<Vec<u8>, DeviceFault> {
        self.calls += 1;
        match &self.reply {
            Ok(bytes) => Ok(bytes.clone()),
            Err(fault) => Err(fault()),
        }
    }
}
