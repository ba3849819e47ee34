//! Payload decoding
//!
//! Maps the raw payload of a good frame onto typed sensor values. Two
//! reconstruction primitives, both most-significant-byte first:
//!
//! - **wide**: 4 bytes → 32-bit pattern → IEEE-754 binary32. The board's
//!   native `double` is 32 bits wide, so what travels on the wire is a
//!   binary32 bit pattern. Reinterpreting it through a 64-bit double
//!   produces silent garbage; [`f32::from_bits`] is a correctness
//!   requirement here, not a style choice.
//! - **narrow**: 2 bytes → signed 16-bit integer, scaled by
//!   [`GYRO_SCALE`] into the gyro's degrees/second-equivalent units.
//!
//! Decoding never fails. Frame validity is entirely the framer's job;
//! malformed payload bytes simply decode to meaningless numbers.

use crate::frame::DataMode;

/// Scale factor applied to narrow gyro values (1 / 256)
pub const GYRO_SCALE: f32 = 1.0 / 256.0;

/// Sensor values decoded from an ALL or GYRO payload.
///
/// A GYRO packet overwrites only the gyro fields; accelerometer and
/// magnetometer values keep whatever the last ALL packet decoded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InertialFrame {
    pub accel_x: f32,
    pub accel_y: f32,
    pub accel_z: f32,
    pub mag_x: f32,
    pub mag_y: f32,
    pub mag_z: f32,
    /// Gyro rates, already scaled by [`GYRO_SCALE`]
    pub gyro_x: f32,
    pub gyro_y: f32,
    pub gyro_z: f32,
}

/// Orientation decoded from an EULER payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EulerFrame {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

/// Integer gyro triple derived from the scaled gyro rates.
///
/// Each count is the scaled rate × 100, truncated toward zero. The
/// checksum is `(x + y + z) % 10` and keeps its sign when the sum is
/// negative. It is informational only; nothing on the wire verifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroCounts {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub checksum: i8,
}

/// Reconstruct a wide value: 4 bytes MSB-first as a binary32 bit pattern.
fn read_wide(payload: &[u8], at: usize) -> f32 {
    let bits = u32::from_be_bytes([
        payload[at],
        payload[at + 1],
        payload[at + 2],
        payload[at + 3],
    ]);
    f32::from_bits(bits)
}

/// Reconstruct a narrow value: 2 bytes MSB-first as an i16, gyro-scaled.
fn read_narrow(payload: &[u8], at: usize) -> f32 {
    i16::from_be_bytes([payload[at], payload[at + 1]]) as f32 * GYRO_SCALE
}

fn derive_counts(gyro_x: f32, gyro_y: f32, gyro_z: f32) -> GyroCounts {
    let x = (gyro_x * 100.0) as i32;
    let y = (gyro_y * 100.0) as i32;
    let z = (gyro_z * 100.0) as i32;
    GyroCounts {
        x,
        y,
        z,
        checksum: ((x + y + z) % 10) as i8,
    }
}

/// Decode a 30-byte ALL payload into `frame`.
///
/// Offsets: accel XYZ at 0/4/8, mag XYZ at 12/16/20 (wide values), gyro
/// XYZ at 24/26/28 (narrow values). Returns the derived integer triple.
pub fn decode_all(payload: &[u8], frame: &mut InertialFrame) -> GyroCounts {
    debug_assert_eq!(payload.len(), DataMode::All.payload_len());

    frame.accel_x = read_wide(payload, 0);
    frame.accel_y = read_wide(payload, 4);
    frame.accel_z = read_wide(payload, 8);

    frame.mag_x = read_wide(payload, 12);
    frame.mag_y = read_wide(payload, 16);
    frame.mag_z = read_wide(payload, 20);

    frame.gyro_x = read_narrow(payload, 24);
    frame.gyro_y = read_narrow(payload, 26);
    frame.gyro_z = read_narrow(payload, 28);

    derive_counts(frame.gyro_x, frame.gyro_y, frame.gyro_z)
}

/// Decode a 6-byte GYRO payload into the gyro fields of `frame`.
///
/// Offsets: gyro XYZ at 0/2/4 (narrow values). Accelerometer and
/// magnetometer fields are left untouched.
pub fn decode_gyro(payload: &[u8], frame: &mut InertialFrame) -> GyroCounts {
    debug_assert_eq!(payload.len(), DataMode::Gyro.payload_len());

    frame.gyro_x = read_narrow(payload, 0);
    frame.gyro_y = read_narrow(payload, 2);
    frame.gyro_z = read_narrow(payload, 4);

    derive_counts(frame.gyro_x, frame.gyro_y, frame.gyro_z)
}

/// Decode a 12-byte EULER payload.
///
/// Offsets: roll/pitch/yaw at 0/4/8 (wide values).
pub fn decode_euler(payload: &[u8]) -> EulerFrame {
    debug_assert_eq!(payload.len(), DataMode::Euler.payload_len());

    EulerFrame {
        roll: read_wide(payload, 0),
        pitch: read_wide(payload, 4),
        yaw: read_wide(payload, 8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put_f32(payload: &mut [u8], at: usize, value: f32) {
        payload[at..at + 4].copy_from_slice(&value.to_bits().to_be_bytes());
    }

    fn put_i16(payload: &mut [u8], at: usize, value: i16) {
        payload[at..at + 2].copy_from_slice(&value.to_be_bytes());
    }

    #[test]
    fn test_all_zero_payload_decodes_to_zero() {
        let payload = [0u8; 30];
        let mut frame = InertialFrame::default();
        let counts = decode_all(&payload, &mut frame);

        assert_eq!(frame, InertialFrame::default());
        assert_eq!(counts, GyroCounts::default());
        assert_eq!(counts.checksum, 0);
    }

    #[test]
    fn test_all_payload_field_offsets() {
        let mut payload = [0u8; 30];
        put_f32(&mut payload, 0, 1.0);
        put_f32(&mut payload, 4, -2.5);
        put_f32(&mut payload, 8, 9.81);
        put_f32(&mut payload, 12, 0.25);
        put_f32(&mut payload, 16, -0.5);
        put_f32(&mut payload, 20, 42.0);
        put_i16(&mut payload, 24, 512);
        put_i16(&mut payload, 26, -512);
        put_i16(&mut payload, 28, 64);

        let mut frame = InertialFrame::default();
        let counts = decode_all(&payload, &mut frame);

        assert_eq!(frame.accel_x, 1.0);
        assert_eq!(frame.accel_y, -2.5);
        assert_eq!(frame.accel_z, 9.81);
        assert_eq!(frame.mag_x, 0.25);
        assert_eq!(frame.mag_y, -0.5);
        assert_eq!(frame.mag_z, 42.0);
        assert_eq!(frame.gyro_x, 2.0);
        assert_eq!(frame.gyro_y, -2.0);
        assert_eq!(frame.gyro_z, 0.25);

        assert_eq!(counts, GyroCounts { x: 200, y: -200, z: 25, checksum: 5 });
    }

    #[test]
    fn test_wide_value_is_binary32_reconstruction() {
        // 0x3F800000 is 1.0 in binary32. A 64-bit reinterpretation of the
        // same bytes would be a denormal near zero, not 1.0.
        let mut payload = [0u8; 12];
        payload[0..4].copy_from_slice(&[0x3F, 0x80, 0x00, 0x00]);

        let euler = decode_euler(&payload);
        assert_eq!(euler.roll, 1.0);
        assert_eq!(euler.roll.to_bits(), 0x3F80_0000);
    }

    #[test]
    fn test_gyro_payload_scaling_and_counts() {
        // Signed 16-bit (256, -256, 0) scale to (1.0, -1.0, 0.0).
        let mut payload = [0u8; 6];
        put_i16(&mut payload, 0, 256);
        put_i16(&mut payload, 2, -256);
        put_i16(&mut payload, 4, 0);

        let mut frame = InertialFrame::default();
        let counts = decode_gyro(&payload, &mut frame);

        assert_eq!(frame.gyro_x, 1.0);
        assert_eq!(frame.gyro_y, -1.0);
        assert_eq!(frame.gyro_z, 0.0);
        assert_eq!(counts, GyroCounts { x: 100, y: -100, z: 0, checksum: 0 });
    }

    #[test]
    fn test_gyro_decode_preserves_accel_and_mag() {
        let mut all_payload = [0u8; 30];
        put_f32(&mut all_payload, 0, 3.0);
        put_f32(&mut all_payload, 12, -7.0);

        let mut frame = InertialFrame::default();
        decode_all(&all_payload, &mut frame);

        let mut gyro_payload = [0u8; 6];
        put_i16(&mut gyro_payload, 0, 256);
        decode_gyro(&gyro_payload, &mut frame);

        // Gyro updated, everything else stale but intact.
        assert_eq!(frame.gyro_x, 1.0);
        assert_eq!(frame.accel_x, 3.0);
        assert_eq!(frame.mag_x, -7.0);
    }

    #[test]
    fn test_checksum_preserves_sign() {
        // -8 raw scales to -0.03125; ×100 truncates toward zero to -3.
        let mut payload = [0u8; 6];
        put_i16(&mut payload, 0, -8);

        let mut frame = InertialFrame::default();
        let counts = decode_gyro(&payload, &mut frame);

        assert_eq!(counts.x, -3);
        assert_eq!(counts.checksum, -3);
    }

    #[test]
    fn test_euler_field_offsets() {
        let mut payload = [0u8; 12];
        put_f32(&mut payload, 0, 10.5);
        put_f32(&mut payload, 4, -20.25);
        put_f32(&mut payload, 8, 179.0);

        let euler = decode_euler(&payload);
        assert_eq!(euler.roll, 10.5);
        assert_eq!(euler.pitch, -20.25);
        assert_eq!(euler.yaw, 179.0);
    }
}
