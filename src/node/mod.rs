// src/node/mod.rs

//! The node's fixed-period main loop.

pub mod display;
pub mod ports;

pub use ports::{DisplayPort, SensorPort};

use crate::common::{
    config::NodeConfig,
    error::NodeError,
    hal_traits::{NodeTimer, SerialLink},
    io_helpers::write_line,
    threshold, timing,
    types::{ClassifiedValue, GeoFix, SensorReading},
};
use crate::gps::{GpsTracker, NmeaDecoder, PositionDecoder};
use crate::modem::{Confirmation, ModemSequencer, ModemState, SendReceipt};
use crate::notify::{self, SmsText};
use crate::protocol::{encode, encode_sms_marker, AlertBatchDecoder};
use crate::sensor;
use core::convert::Infallible;
use core::fmt::Write;
use core::time::Duration;
use heapless::{String, Vec};
use log::{debug, error, info, warn};

/// Sends of one queued SMS before it is given up.
pub const MAX_SEND_ATTEMPTS: u8 = 3;

/// Written to the host link when the node boots.
pub const BOOT_MESSAGE: &str = "SchistoGuard Starting...";
/// Written to the host link once start-up has finished.
pub const SETUP_COMPLETE_MESSAGE: &str = "Setup Complete!";

/// What happened to the SMS slot during one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsOutcome {
    /// Nothing was queued.
    NotRequested,
    /// The queued SMS went out; its `SMS_SENT` marker was written to the host.
    Sent(SendReceipt),
    /// The send failed; the SMS stays queued for the next cycle.
    Failed { attempts: u8 },
    /// The send failed for the last time and the SMS was discarded.
    Dropped { attempts: u8 },
}

impl SmsOutcome {
    /// Sent under the optimistic policy with no answer at all from the modem.
    pub fn is_unconfirmed(&self) -> bool {
        matches!(self, SmsOutcome::Sent(receipt) if receipt.confirmation == Confirmation::NoResponse)
    }
}

/// Summary of one [`CycleController::run_cycle`].
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle: u32,
    pub reading: SensorReading,
    pub fix: GeoFix,
    /// Locally classified out-of-range values.
    pub alerts: Vec<ClassifiedValue, 3>,
    /// Alert lines received from the host this cycle.
    pub alert_lines: usize,
    /// A host batch arrived while an earlier SMS was still queued.
    pub discarded_batch: bool,
    pub sms: SmsOutcome,
}

#[derive(Debug)]
struct PendingSms {
    text: SmsText,
    attempts: u8,
}

/// Owns every hardware handle of the node and runs its cycles.
///
/// * `S`/`D`: sensor probes and display.
/// * `H`: host serial link; also the node's clock.
/// * `G`: GPS serial link, read opportunistically.
/// * `M`: modem serial link with its own clock.
/// * `P`: GPS byte decoder.
pub struct CycleController<S, D, H, G, M, P = NmeaDecoder>
where
    H: SerialLink + NodeTimer,
    M: SerialLink + NodeTimer,
{
    sensors: S,
    display: D,
    host: H,
    gps_link: G,
    gps: GpsTracker<P>,
    modem: ModemSequencer<M>,
    alerts: AlertBatchDecoder,
    config: NodeConfig,
    pending: Option<PendingSms>,
    cycle: u32,
}

impl<S, D, H, G, M> CycleController<S, D, H, G, M, NmeaDecoder>
where
    S: SensorPort,
    D: DisplayPort,
    H: SerialLink + NodeTimer,
    G: SerialLink,
    M: SerialLink + NodeTimer,
{
    pub fn new(sensors: S, display: D, host: H, gps_link: G, modem_link: M, config: NodeConfig) -> Self {
        CycleController {
            sensors,
            display,
            host,
            gps_link,
            gps: GpsTracker::new(),
            modem: ModemSequencer::from_config(modem_link, &config),
            alerts: AlertBatchDecoder::new(),
            config,
            pending: None,
            cycle: 0,
        }
    }
}

impl<S, D, H, G, M, P> CycleController<S, D, H, G, M, P>
where
    S: SensorPort,
    D: DisplayPort,
    H: SerialLink + NodeTimer,
    G: SerialLink,
    M: SerialLink + NodeTimer,
    P: PositionDecoder,
{
    /// Replaces the GPS decoder. Any fix held so far is discarded.
    pub fn with_position_decoder<Q: PositionDecoder>(self, decoder: Q) -> CycleController<S, D, H, G, M, Q> {
        let CycleController {
            sensors,
            display,
            host,
            gps_link,
            gps: _,
            modem,
            alerts,
            config,
            pending,
            cycle,
        } = self;
        CycleController {
            sensors,
            display,
            host,
            gps_link,
            gps: GpsTracker::with_decoder(decoder),
            modem,
            alerts,
            config,
            pending,
            cycle,
        }
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn current_fix(&self) -> GeoFix {
        self.gps.current_fix()
    }

    pub fn modem_state(&self) -> ModemState {
        self.modem.state()
    }

    /// Failed attempts of the queued SMS, if one is queued.
    pub fn pending_attempts(&self) -> Option<u8> {
        self.pending.as_ref().map(|pending| pending.attempts)
    }

    /// Announces the node on the host link and display and brings up the modem.
    ///
    /// A modem that does not come up is not fatal; the first send retries.
    pub fn start(&mut self) -> Result<(), NodeError<H::Error>> {
        write_line(&mut self.host, BOOT_MESSAGE)?;

        let probes = self.sensors.temperature_probe_count();
        if probes == 0 {
            warn!("no temperature probe found");
        }
        let mut found: String<40> = String::new();
        let _ = write!(found, "Found {} temperature sensor(s)", probes);
        write_line(&mut self.host, &found)?;

        if self.config.has_placeholder_recipient() {
            warn!(
                "SMS recipient is the placeholder {}; set SCHISTOGUARD_SMS_RECIPIENT at build time",
                self.config.recipient
            );
        }

        self.display.show(display::STARTUP_BANNER, "");
        if let Err(e) = self.modem.initialize() {
            warn!("modem initialization failed: {}", e);
        }
        write_line(&mut self.host, SETUP_COMPLETE_MESSAGE)
    }

    /// Runs one sample, telemetry, alert and SMS pass.
    ///
    /// Only host link failures are returned; modem trouble is reported in
    /// [`CycleReport::sms`].
    pub fn run_cycle(&mut self) -> Result<CycleReport, NodeError<H::Error>> {
        self.cycle = self.cycle.wrapping_add(1);
        self.gps.pump(&mut self.gps_link);

        let reading = self.sensors.read();
        if sensor::is_probe_disconnected(reading.temperature_c) {
            warn!("temperature probe disconnected");
        }
        let alerts = threshold::alerts(&reading);
        for value in &alerts {
            warn!("{} {} ({:.2})", value.category, value.severity.phrase(), value.value);
        }

        let (top, bottom) = display::render(&reading);
        self.display.show(&top, &bottom);

        let fix = self.gps.current_fix();
        write_line(&mut self.host, &encode(&reading, &fix))?;

        let batch = self.alerts.drain(
            &mut self.host,
            self.config.alert_quiescence,
            self.config.alert_drain_limit,
        )?;
        self.gps.pump(&mut self.gps_link);

        let mut discarded_batch = false;
        if !batch.is_empty() {
            if self.pending.is_some() {
                warn!("SMS still queued, discarding {} new alert line(s)", batch.len());
                discarded_batch = true;
            } else {
                info!("queueing SMS for {} alert line(s)", batch.len());
                self.pending = Some(PendingSms {
                    text: notify::format(&batch),
                    attempts: 0,
                });
            }
        }

        let sms = self.send_pending()?;

        debug!("cycle {} done: {:?}", self.cycle, sms);
        Ok(CycleReport {
            cycle: self.cycle,
            reading,
            fix,
            alerts,
            alert_lines: batch.len(),
            discarded_batch,
            sms,
        })
    }

    /// Pumps the GPS link until `cycle_period` has passed since `cycle_start`.
    pub fn wait_for_next_cycle(&mut self, cycle_start: H::Instant) {
        let next = cycle_start + self.config.cycle_period;
        let step = Duration::from_millis(timing::GPS_IDLE_POLL_MS as u64);
        loop {
            self.gps.pump(&mut self.gps_link);
            let now = self.host.now();
            if now >= next {
                return;
            }
            let wait = (next - now).min(step);
            self.host.delay_us(wait.as_micros() as u32);
        }
    }

    /// Starts the node and cycles until the host link fails.
    pub fn run_forever(&mut self) -> Result<Infallible, NodeError<H::Error>> {
        self.start()?;
        loop {
            let started = self.host.now();
            self.run_cycle()?;
            self.wait_for_next_cycle(started);
        }
    }

    fn send_pending(&mut self) -> Result<SmsOutcome, NodeError<H::Error>> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(SmsOutcome::NotRequested);
        };
        pending.attempts += 1;
        let attempts = pending.attempts;

        match self.modem.send(self.config.recipient, &pending.text) {
            Ok(receipt) => {
                if receipt.confirmation == Confirmation::NoResponse {
                    warn!("modem never answered; SMS to {} is unconfirmed", receipt.recipient.as_str());
                }
                let marker = encode_sms_marker(receipt.recipient.as_str(), &pending.text);
                self.pending = None;
                write_line(&mut self.host, &marker)?;
                Ok(SmsOutcome::Sent(receipt))
            }
            Err(e) if attempts >= MAX_SEND_ATTEMPTS => {
                error!("giving up on SMS after {} attempts: {}", attempts, e);
                self.pending = None;
                Ok(SmsOutcome::Dropped { attempts })
            }
            Err(e) => {
                warn!("SMS attempt {}/{} failed: {}", attempts, MAX_SEND_ATTEMPTS, e);
                Ok(SmsOutcome::Failed { attempts })
            }
        }
    }
}
