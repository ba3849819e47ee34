//! Packet statistics

/// Counters describing the health of one telemetry session.
///
/// Counters persist for the session lifetime; nothing resets them. The
/// timestamp is meaningless until `good_packets` is nonzero, so callers
/// check the count (or the good flag) before trusting data age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Frames that arrived full-length with a valid terminator
    pub good_packets: u32,
    /// Frames that arrived full-length with an invalid terminator
    pub bad_packets: u32,
    /// Whether the most recent full-length frame was good
    pub last_packet_good: bool,
    /// Device-clock timestamp (ms) of the most recent good frame
    pub last_good_at_ms: u32,
}

impl LinkStats {
    pub(crate) fn record_good(&mut self, now_ms: u32) {
        self.good_packets = self.good_packets.wrapping_add(1);
        self.last_packet_good = true;
        self.last_good_at_ms = now_ms;
    }

    pub(crate) fn record_bad(&mut self) {
        self.bad_packets = self.bad_packets.wrapping_add(1);
        self.last_packet_good = false;
    }
}
