//! Device session facade
//!
//! One [`Session`] owns the serial transport, the frame parser, the
//! decoded frames, and the mirrored device configuration. The caller
//! drives it by polling; nothing happens in the background. The only
//! blocking points are the named settle delays around link-speed changes.
//!
//! Protocol-level failures are never surfaced as errors. Framing desync
//! resets silently, bad packets are counted and (when not streaming
//! continuously) answered with a single-frame re-request, and unsupported
//! configuration values are coerced or ignored. A live sensor loop must
//! keep making forward progress; only transport I/O errors propagate.

use ninedof_hal::{Clock, SerialLink};
use ninedof_protocol::command::{baud_id, Command};
use ninedof_protocol::frame::{DataMode, FrameParser, PacketEvent};
use ninedof_protocol::telemetry::{self, EulerFrame, GyroCounts, InertialFrame};

use crate::config::{SessionConfig, LOCAL_SETTLE_MS, REMOTE_SETTLE_MS, REOPEN_SETTLE_MS};
use crate::stats::LinkStats;

/// Driver session for one sensor board on one serial link.
///
/// Generic over any [`SerialLink`] transport and [`Clock`] source. All
/// mutable state (framing, mirrored settings, statistics) is owned here
/// exclusively; the session is single-threaded and poll-driven.
pub struct Session<L: SerialLink, C: Clock> {
    link: L,
    clock: C,
    config: SessionConfig,
    open: bool,
    baud: u32,
    parser: FrameParser,
    update_interval_ms: Option<u16>,
    continuous: bool,
    inertial: InertialFrame,
    euler: EulerFrame,
    gyro: GyroCounts,
    last_packet_mode: DataMode,
    new_data: bool,
    stats: LinkStats,
}

impl<L: SerialLink, C: Clock> Session<L, C> {
    /// Create a closed session. Call [`Session::begin`] before polling.
    ///
    /// The mirrored mode starts at the device's power-on default (ALL);
    /// the configured mode is applied during `begin` so the matching mode
    /// command actually reaches the device.
    pub fn new(link: L, clock: C, config: SessionConfig) -> Self {
        Self {
            link,
            clock,
            config,
            open: false,
            baud: 0,
            parser: FrameParser::new(DataMode::default()),
            update_interval_ms: None,
            continuous: false,
            inertial: InertialFrame::default(),
            euler: EulerFrame::default(),
            gyro: GyroCounts::default(),
            last_packet_mode: DataMode::default(),
            new_data: false,
            stats: LinkStats::default(),
        }
    }

    /// Open the transport and apply the configured settings. Idempotent.
    ///
    /// When the config names a final rate different from the initial one
    /// and that rate is supported, this blocks through the full remote
    /// settle sequence before the session is marked open. An unsupported
    /// final rate silently keeps the initial rate.
    pub fn begin(&mut self) -> Result<(), L::Error> {
        if self.open {
            return Ok(());
        }

        self.link.open(self.config.initial_baud)?;
        let mut rate = self.config.initial_baud;

        if let Some(target) = self.config.baud {
            if target != rate {
                if let Some(id) = baud_id(target) {
                    self.clock.delay_ms(REMOTE_SETTLE_MS);
                    self.link.write_blocking(&Command::SetBaud { id }.encode())?;
                    self.link.flush()?;
                    self.link.close()?;
                    self.clock.delay_ms(REMOTE_SETTLE_MS);
                    self.link.open(target)?;
                    self.clock.delay_ms(REOPEN_SETTLE_MS);
                    rate = target;
                }
            }
        }

        self.baud = rate;
        self.open = true;

        let mode = self.config.data_mode;
        self.set_data_mode(mode, false)?;
        if let Some(interval) = self.config.update_interval_ms {
            self.set_update_interval(interval)?;
        }
        if self.config.continuous {
            self.set_continuous_stream(true)?;
        }

        Ok(())
    }

    /// Close the transport.
    pub fn end(&mut self) -> Result<(), L::Error> {
        if !self.open {
            return Ok(());
        }
        self.link.close()?;
        self.open = false;
        Ok(())
    }

    /// Adopt a transport that was already opened elsewhere at `baud`.
    pub fn mark_open(&mut self, baud: u32) {
        self.open = true;
        self.baud = baud;
    }

    /// Tear the session down and hand the transport and clock back.
    pub fn release(self) -> (L, C) {
        (self.link, self.clock)
    }

    /// Whether the transport has been opened
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Negotiated baud rate as mirrored by the session
    pub fn baud_rate(&self) -> u32 {
        self.baud
    }

    /// Mode the next valid packet will be collected under
    pub fn data_mode(&self) -> DataMode {
        self.parser.mode()
    }

    /// Mode of the most recently decoded packet
    pub fn last_data_mode(&self) -> DataMode {
        self.last_packet_mode
    }

    /// Mirrored sample interval; `None` until one has been commanded
    pub fn update_interval(&self) -> Option<u16> {
        self.update_interval_ms
    }

    /// Whether the device has been told to stream continuously
    pub fn is_continuous_stream_enabled(&self) -> bool {
        self.continuous
    }

    /// Packet statistics for this session
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Whether the most recent full-length packet was good
    pub fn is_packet_good(&self) -> bool {
        self.stats.last_packet_good
    }

    /// Change the link speed.
    ///
    /// An unsupported rate is a complete no-op: no I/O, mirrored state
    /// unchanged. For a supported rate the device is first told to switch
    /// (unless `internal` is set), then the local port is flushed,
    /// closed, re-opened at the new rate, and the mandated settle delays
    /// are observed. Blocks the caller for their full duration.
    pub fn set_baud_rate(&mut self, rate: u32, internal: bool) -> Result<(), L::Error> {
        if !self.open {
            return Ok(());
        }
        let id = match baud_id(rate) {
            Some(id) => id,
            None => return Ok(()),
        };

        if !internal {
            self.link.write_blocking(&Command::SetBaud { id }.encode())?;
        }

        // Not every transport flushes pending output on close.
        self.link.flush()?;
        self.link.close()?;
        self.clock.delay_ms(if internal {
            LOCAL_SETTLE_MS
        } else {
            REMOTE_SETTLE_MS
        });

        self.link.open(rate)?;
        self.clock.delay_ms(REOPEN_SETTLE_MS);

        self.baud = rate;
        Ok(())
    }

    /// Select the telemetry payload layout.
    ///
    /// Always discards any partially collected frame, since a mode change
    /// invalidates in-flight framing. The `#m` command is only emitted
    /// when `force` is set or the mode actually changes; the mirrored
    /// mode and payload length update either way.
    pub fn set_data_mode(&mut self, mode: DataMode, force: bool) -> Result<(), L::Error> {
        let changed = mode != self.parser.mode();
        self.parser.set_mode(mode);
        if force || changed {
            self.link.write_blocking(&Command::SetMode(mode).encode())?;
        }
        Ok(())
    }

    /// Set the device sample interval in milliseconds.
    ///
    /// There is no acknowledgment; the mirrored value updates regardless.
    pub fn set_update_interval(&mut self, interval_ms: u16) -> Result<(), L::Error> {
        self.link
            .write_blocking(&Command::SetInterval(interval_ms).encode())?;
        self.update_interval_ms = Some(interval_ms);
        Ok(())
    }

    /// Enable or disable device-side continuous streaming.
    pub fn set_continuous_stream(&mut self, enabled: bool) -> Result<(), L::Error> {
        self.link
            .write_blocking(&Command::SetContinuous(enabled).encode())?;
        self.continuous = enabled;
        Ok(())
    }

    /// Ask the device to re-zero accelerometer XY and gyroscope XYZ.
    ///
    /// The effect is device-internal and only observable through new
    /// frames; no local state changes.
    pub fn zero_calibrate(&mut self) -> Result<(), L::Error> {
        self.link.write_blocking(&Command::ZeroCalibrate.encode())
    }

    /// Request a single frame in the given mode.
    pub fn request_frame(&mut self, mode: DataMode) -> Result<(), L::Error> {
        self.set_data_mode(mode, false)?;
        self.link.write_blocking(&Command::RequestFrame.encode())
    }

    /// Request a single frame in the currently active mode.
    pub fn request_current_frame(&mut self) -> Result<(), L::Error> {
        self.request_frame(self.parser.mode())
    }

    /// Drive the parser from the receive buffer.
    ///
    /// With `drain_all` false, consumes at most one available byte (no-op
    /// when none is waiting). With it true, keeps consuming until a packet
    /// event fires or the buffer is empty. Returns whether a packet event
    /// (good or bad) fired; check [`Session::is_packet_good`] to tell
    /// which.
    pub fn poll(&mut self, drain_all: bool) -> Result<bool, L::Error> {
        if drain_all {
            while self.link.available() > 0 {
                if self.poll_byte()? {
                    return Ok(true);
                }
            }
            Ok(false)
        } else if self.link.available() > 0 {
            self.poll_byte()
        } else {
            Ok(false)
        }
    }

    /// Like [`Session::poll`], but only reports good packets.
    ///
    /// A bad packet clears the new-data flag and, when the device is not
    /// streaming continuously, re-requests a single frame. This is the
    /// self-healing path for request-driven polling: isolated corruption
    /// degrades to simply asking again.
    pub fn poll_valid(&mut self, drain_all: bool) -> Result<bool, L::Error> {
        if !self.poll(drain_all)? {
            return Ok(false);
        }

        if self.stats.last_packet_good {
            Ok(true)
        } else {
            self.new_data = false;
            if !self.continuous {
                self.request_current_frame()?;
            }
            Ok(false)
        }
    }

    fn poll_byte(&mut self) -> Result<bool, L::Error> {
        let byte = self.link.read_byte()?;
        match self.parser.feed(byte) {
            None => Ok(false),
            Some(PacketEvent::Good { mode, payload }) => {
                self.decode(mode, &payload);
                self.stats.record_good(self.clock.now_ms());
                self.new_data = true;
                Ok(true)
            }
            Some(PacketEvent::Bad) => {
                self.stats.record_bad();
                self.new_data = true;
                Ok(true)
            }
        }
    }

    fn decode(&mut self, mode: DataMode, payload: &[u8]) {
        match mode {
            DataMode::All => {
                self.gyro = telemetry::decode_all(payload, &mut self.inertial);
            }
            DataMode::Gyro => {
                self.gyro = telemetry::decode_gyro(payload, &mut self.inertial);
            }
            DataMode::Euler => {
                self.euler = telemetry::decode_euler(payload);
            }
        }
        self.last_packet_mode = mode;
    }

    /// Most recent inertial values. Clears the new-data flag.
    ///
    /// Values persist until the next good decode; staleness is measured
    /// through [`Session::data_age_ms`], never by invalidation.
    pub fn data(&mut self) -> InertialFrame {
        self.new_data = false;
        self.inertial
    }

    /// Most recent euler angles. Clears the new-data flag.
    pub fn euler_data(&mut self) -> EulerFrame {
        self.new_data = false;
        self.euler
    }

    /// Most recent derived gyro counts. Clears the new-data flag.
    pub fn gyro_data(&mut self) -> GyroCounts {
        self.new_data = false;
        self.gyro
    }

    /// Whether a packet event has fired since the flag was last cleared.
    ///
    /// Pass `clear` to also clear the flag on a true result.
    pub fn is_new_data_available(&mut self, clear: bool) -> bool {
        if self.new_data {
            if clear {
                self.new_data = false;
            }
            true
        } else {
            false
        }
    }

    /// Clear the new-data flag without reading anything.
    pub fn clear_new_data_flag(&mut self) {
        self.new_data = false;
    }

    /// Elapsed device-clock milliseconds since the last good frame.
    ///
    /// Meaningless before any good frame has ever been received; check
    /// [`LinkStats::good_packets`] or [`Session::is_packet_good`] first.
    pub fn data_age_ms(&self) -> u32 {
        self.clock.now_ms().wrapping_sub(self.stats.last_good_at_ms)
    }
}
