//! Admin Module
//!
//! Typed access to the device-status payload of a GETLOG response. This is
//! a pure interpreter over dispatcher/device output: it validates that each
//! required nested section is present before exposing it, and reports
//! absence as a distinct error rather than returning a default value.

use crate::error::{KeelError, Result};
use crate::protocol::{
    Capacity, Configuration, GetLogBody, Limits, Message, MessageType, Statistic, Temperature,
    Utilization,
};

/// Typed view over a GETLOG response message
#[derive(Debug)]
pub struct DeviceLog {
    log: GetLogBody,
}

impl DeviceLog {
    /// Wrap a raw status-response message
    ///
    /// Fails unless the message is a GETLOG response carrying a device-log
    /// body.
    pub fn new(message: Message) -> Result<Self> {
        if message.header.message_type != Some(MessageType::GetLogResponse) {
            return Err(KeelError::UnexpectedResponse(format!(
                "expected GetLogResponse, got {:?}",
                message.header.message_type
            )));
        }

        let log = message
            .body
            .get_log
            .ok_or(KeelError::MissingLogSection("device log body"))?;

        Ok(Self { log })
    }

    /// Per-component utilization readings
    pub fn utilization(&self) -> Result<&[Utilization]> {
        if self.log.utilization.is_empty() {
            return Err(KeelError::MissingLogSection("utilization list"));
        }
        Ok(&self.log.utilization)
    }

    /// Per-sensor temperature readings
    pub fn temperature(&self) -> Result<&[Temperature]> {
        if self.log.temperature.is_empty() {
            return Err(KeelError::MissingLogSection("temperature list"));
        }
        Ok(&self.log.temperature)
    }

    /// Device capacity summary
    pub fn capacity(&self) -> Result<&Capacity> {
        self.log
            .capacity
            .as_ref()
            .ok_or(KeelError::MissingLogSection("capacity"))
    }

    /// Static device configuration
    pub fn configuration(&self) -> Result<&Configuration> {
        self.log
            .configuration
            .as_ref()
            .ok_or(KeelError::MissingLogSection("configuration"))
    }

    /// Per-operation counters
    pub fn statistics(&self) -> Result<&[Statistic]> {
        if self.log.statistics.is_empty() {
            return Err(KeelError::MissingLogSection("statistics list"));
        }
        Ok(&self.log.statistics)
    }

    /// Protocol limits advertised by the device
    pub fn limits(&self) -> Result<&Limits> {
        self.log
            .limits
            .as_ref()
            .ok_or(KeelError::MissingLogSection("limits"))
    }
}
