// meshpress-encoder/src/quantize.rs
//! Fixed-point quantization and bit packing
//!
//! Positions quantize to 18 bits per axis over the mesh's local range,
//! normals to 10 bits per axis over [-1, 1], UVs to 12 bits per axis over
//! the local UV range. The inverse mappings exist for round-trip tests.

use meshpress_core::Vec3;

/// 18-bit position range per axis (0..=262143)
pub const POSITION_STEPS: u32 = 262_143;

/// Scale mapping [-1, 1] normals onto 0..=1023 without overflowing at +1
pub const NORMAL_SCALE: f32 = 511.999;

/// 10-bit normal range per axis
pub const NORMAL_STEPS: u32 = 1023;

/// 12-bit UV range per axis (0..=4095)
pub const UV_STEPS: u32 = 4095;

/// Sign applied to a normal's depth component before quantization, matching
/// the handedness conversion applied to positions at scene inspection.
pub const NORMAL_DEPTH_FLIP: f32 = -1.0;

/// Texture-space V convention: the provider's V grows upward, the target
/// format's grows downward.
#[inline]
pub fn flip_v(v: f32) -> f32 {
    1.0 - v
}

/// Divisor for a linear range mapping. A degenerate (zero-width) range maps
/// every value to the range minimum instead of dividing by zero; the real
/// delta is still what gets serialized, so decoding recovers the constant
/// coordinate exactly.
#[inline]
pub fn range_divisor(delta: f32) -> f32 {
    if delta > 0.0 {
        delta
    } else {
        1.0
    }
}

/// The two 32-bit words one quantized position packs into.
///
/// `lower` holds a 6-bit tag (the three 2-bit axis remainders) in bits
/// 16..22 and the 16 high bits of X in bits 0..16; `upper` holds the high
/// bits of Z and Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedPosition {
    pub lower: u32,
    pub upper: u32,
}

/// Map one position component onto the 18-bit range
pub fn quantize_position_axis(value: f32, min: f32, delta: f32) -> u32 {
    let t = (value - min) / range_divisor(delta);
    ((t * POSITION_STEPS as f32) as i64).clamp(0, POSITION_STEPS as i64) as u32
}

/// Inverse of [`quantize_position_axis`]
pub fn dequantize_position_axis(q: u32, min: f32, delta: f32) -> f32 {
    min + q as f32 / POSITION_STEPS as f32 * delta
}

/// Pack three 18-bit axis values into the two-word position encoding
pub fn pack_position(x: u32, y: u32, z: u32) -> PackedPosition {
    let tag = (x & 3) | ((y & 3) << 2) | ((z & 3) << 4);
    let x_high = (x >> 2) & 0xFFFF;
    let y_high = (y >> 2) & 0xFFFF;
    let z_high = (z >> 2) & 0xFFFF;

    PackedPosition {
        lower: (tag << 16) | x_high,
        upper: (z_high << 16) | y_high,
    }
}

/// Recover the three 18-bit axis values from a packed position
pub fn unpack_position(packed: PackedPosition) -> [u32; 3] {
    let tag = (packed.lower >> 16) & 0x3F;
    let x_high = packed.lower & 0xFFFF;
    let y_high = packed.upper & 0xFFFF;
    let z_high = (packed.upper >> 16) & 0xFFFF;

    [
        (x_high << 2) | (tag & 3),
        (y_high << 2) | ((tag >> 2) & 3),
        (z_high << 2) | ((tag >> 4) & 3),
    ]
}

/// Map one normal component from [-1, 1] onto the 10-bit range
pub fn quantize_normal_axis(n: f32) -> u32 {
    (((n + 1.0) * NORMAL_SCALE) as i64).clamp(0, NORMAL_STEPS as i64) as u32
}

/// Quantize a unit normal into one packed word, negating the depth
/// component first ([`NORMAL_DEPTH_FLIP`]).
pub fn pack_normal(normal: Vec3) -> u32 {
    let nx = quantize_normal_axis(normal.x);
    let ny = quantize_normal_axis(normal.y);
    let nz = quantize_normal_axis(normal.z * NORMAL_DEPTH_FLIP);

    nx | (ny << 10) | (nz << 20)
}

/// Split a packed normal back into its three 10-bit axis values
pub fn unpack_normal(packed: u32) -> [u32; 3] {
    [packed & 0x3FF, (packed >> 10) & 0x3FF, (packed >> 20) & 0x3FF]
}

/// Map one UV component onto the 12-bit range
pub fn quantize_uv_axis(value: f32, min: f32, delta: f32) -> u32 {
    let t = (value - min) / range_divisor(delta);
    ((t * UV_STEPS as f32) as i64).clamp(0, UV_STEPS as i64) as u32
}

/// Inverse of [`quantize_uv_axis`]
pub fn dequantize_uv_axis(q: u32, min: f32, delta: f32) -> f32 {
    min + q as f32 / UV_STEPS as f32 * delta
}

/// Pack a quantized UV pair into one word: V in bits 12..24, U in 0..12
pub fn pack_uv(u: u32, v: u32) -> u32 {
    ((v & UV_STEPS) << 12) | (u & UV_STEPS)
}

/// Recover the quantized U and V from a packed UV word
pub fn unpack_uv(packed: u32) -> [u32; 2] {
    [packed & UV_STEPS, (packed >> 12) & UV_STEPS]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_roundtrip_within_one_step() {
        let (min, max) = (-3.0f32, 5.0f32);
        let delta = max - min;
        let tolerance = delta / POSITION_STEPS as f32;

        for value in [-3.0, -0.5, 0.0, 1.25, 4.999, 5.0] {
            let q = quantize_position_axis(value, min, delta);
            let back = dequantize_position_axis(q, min, delta);
            assert!(
                (back - value).abs() <= tolerance,
                "value {} decoded to {}",
                value,
                back
            );
        }
    }

    #[test]
    fn test_position_range_endpoints() {
        assert_eq!(quantize_position_axis(0.0, 0.0, 1.0), 0);
        assert_eq!(quantize_position_axis(1.0, 0.0, 1.0), POSITION_STEPS);
    }

    #[test]
    fn test_degenerate_range_maps_to_zero() {
        let q = quantize_position_axis(7.5, 7.5, 0.0);
        assert_eq!(q, 0);
        // Written delta stays 0, so decoding lands on the constant value
        assert_eq!(dequantize_position_axis(q, 7.5, 0.0), 7.5);
    }

    #[test]
    fn test_pack_position_roundtrip() {
        for (x, y, z) in [(0, 0, 0), (1, 2, 3), (262_143, 131_071, 98_304)] {
            let packed = pack_position(x, y, z);
            assert_eq!(unpack_position(packed), [x, y, z]);
        }
    }

    #[test]
    fn test_pack_position_tag_layout() {
        // Axis values of 3 put all six tag bits high
        let packed = pack_position(3, 3, 3);
        assert_eq!((packed.lower >> 16) & 0x3F, 0b111111);
        assert_eq!(packed.lower & 0xFFFF, 0);
        assert_eq!(packed.upper, 0);
    }

    #[test]
    fn test_normal_quantization_endpoints() {
        assert_eq!(quantize_normal_axis(-1.0), 0);
        assert_eq!(quantize_normal_axis(0.0), 511);
        assert_eq!(quantize_normal_axis(1.0), 1023);
    }

    #[test]
    fn test_pack_normal_flips_depth() {
        let up = pack_normal(meshpress_core::Vec3::new(0.0, 0.0, 1.0));
        let [_, _, nz] = unpack_normal(up);
        // +Z flips to -1, which quantizes to 0
        assert_eq!(nz, 0);
    }

    #[test]
    fn test_pack_uv_layout() {
        let packed = pack_uv(4095, 1);
        assert_eq!(packed & 0xFFF, 4095);
        assert_eq!((packed >> 12) & 0xFFF, 1);
        assert_eq!(unpack_uv(packed), [4095, 1]);
    }

    #[test]
    fn test_flip_v() {
        assert_eq!(flip_v(0.0), 1.0);
        assert_eq!(flip_v(0.25), 0.75);
    }
}
