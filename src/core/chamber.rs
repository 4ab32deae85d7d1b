use crate::core::protocol::{Transport, TransportType};
use crate::domain::error::{ChamberError, ChamberResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Controller features a chamber may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Air temperature control loop
    Temperature,
    /// Relative humidity control loop
    Humidity,
    /// Product temperature control (PTCON) cascade loop
    Cascade,
    /// Time signal (event) outputs
    TimeSignals,
    /// Stored program (profile) execution
    Programs,
}

/// Capability set describing what a connected controller supports
///
/// Mirrors how chambers are ordered: every unit regulates temperature,
/// humidity and PTCON are options, and the time-signal bank size varies by
/// controller model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Number of temperature control loops
    pub temperature_loops: u8,
    /// Humidity loop fitted
    pub humidity: bool,
    /// Product temperature control (cascade) fitted
    pub cascade: bool,
    /// Number of time signal (event) outputs
    pub time_signals: u8,
    /// Program (profile) execution supported
    pub programs: bool,
}

impl Capabilities {
    /// Temperature-only chamber
    pub fn temperature_only() -> Self {
        Self {
            temperature_loops: 1,
            humidity: false,
            cascade: false,
            time_signals: 0,
            programs: true,
        }
    }

    /// Temperature and humidity chamber
    pub fn temperature_humidity() -> Self {
        Self {
            humidity: true,
            ..Self::temperature_only()
        }
    }

    /// Same capability set with a cascade (PTCON) loop fitted
    pub fn with_cascade(mut self) -> Self {
        self.cascade = true;
        self
    }

    /// Same capability set with the given number of time signals
    pub fn with_time_signals(mut self, count: u8) -> Self {
        self.time_signals = count;
        self
    }

    /// Whether the given feature is present
    pub fn supports(&self, feature: Feature) -> bool {
        match feature {
            Feature::Temperature => self.temperature_loops > 0,
            Feature::Humidity => self.humidity,
            Feature::Cascade => self.cascade,
            Feature::TimeSignals => self.time_signals > 0,
            Feature::Programs => self.programs,
        }
    }

    /// Short human-readable summary for console banners
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "{} temperature loop{}",
            self.temperature_loops,
            if self.temperature_loops == 1 { "" } else { "s" }
        )];
        if self.humidity {
            parts.push("humidity".to_string());
        }
        if self.cascade {
            parts.push("cascade (PTCON)".to_string());
        }
        if self.time_signals > 0 {
            parts.push(format!("{} time signals", self.time_signals));
        }
        if self.programs {
            parts.push("programs".to_string());
        }
        parts.join(", ")
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::temperature_only()
    }
}

/// A chamber controller reachable over an injected transport
///
/// The device model knows no controller command vocabulary; callers supply
/// command strings and interpret the replies themselves. What it adds over
/// the raw link is capability bookkeeping, logging, and a closed-state
/// guard.
pub struct Chamber {
    name: String,
    capabilities: Capabilities,
    transport_type: TransportType,
    transport: Option<Box<dyn Transport>>,
}

impl Chamber {
    pub fn new(
        name: impl Into<String>,
        capabilities: Capabilities,
        transport: Box<dyn Transport>,
    ) -> Self {
        let name = name.into();
        let transport_type = transport.transport_type();
        info!("Chamber '{}' attached via {}", name, transport_type);
        Self {
            name,
            capabilities,
            transport_type,
            transport: Some(transport),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn supports(&self, feature: Feature) -> bool {
        self.capabilities.supports(feature)
    }

    pub fn transport_type(&self) -> TransportType {
        self.transport_type
    }

    pub fn is_connected(&self) -> bool {
        self.transport.as_ref().map_or(false, |t| t.is_connected())
    }

    /// Send one command to the controller
    pub async fn transact(&mut self, command: &str) -> ChamberResult<Vec<u8>> {
        let transport = self.transport.as_mut().ok_or(ChamberError::NotConnected)?;
        debug!("[{}] > {}", self.name, command);
        let response = transport.transact(command).await?;
        debug!("[{}] < {} bytes", self.name, response.len());
        Ok(response)
    }

    /// Send several commands in order, aborting on the first failure
    pub async fn transact_all<S>(&mut self, commands: &[S]) -> ChamberResult<Vec<Vec<u8>>>
    where
        S: AsRef<str>,
    {
        let mut responses = Vec::with_capacity(commands.len());
        for command in commands {
            responses.push(self.transact(command.as_ref()).await?);
        }
        Ok(responses)
    }

    /// Detach and close the transport; calling close again is a no-op
    pub async fn close(&mut self) -> ChamberResult<()> {
        if let Some(mut transport) = self.transport.take() {
            transport.close().await?;
            info!("Chamber '{}' detached", self.name);
        }
        Ok(())
    }
}
