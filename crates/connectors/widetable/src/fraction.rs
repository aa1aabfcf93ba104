//! Mapping between row keys and fractions of a key range.
//!
//! After stripping the prefix shared by the range bounds, a key is read as a
//! base-256 fraction with 8 bytes of precision. An empty stop is the end of
//! the key space, i.e. fraction 1.

const PRECISION: usize = 8;
const ONE: u128 = 1 << 64;

struct Bounds {
    prefix: usize,
    start: u128,
    stop: u128,
}

impl Bounds {
    fn new(start: &[u8], stop: &[u8]) -> Self {
        if stop.is_empty() {
            return Self { prefix: 0, start: to_fixed(start), stop: ONE };
        }
        let prefix = start.iter().zip(stop).take_while(|(a, b)| a == b).count();
        Self { prefix, start: to_fixed(&start[prefix..]), stop: to_fixed(&stop[prefix..]) }
    }

    fn is_degenerate(&self) -> bool {
        self.stop <= self.start
    }
}

fn to_fixed(suffix: &[u8]) -> u128 {
    let mut buf = [0u8; PRECISION];
    let len = suffix.len().min(PRECISION);
    buf[..len].copy_from_slice(&suffix[..len]);
    u64::from_be_bytes(buf) as u128
}

/// Fraction of `[start, stop)` that lies before `key`, in `[0, 1]`.
pub(crate) fn key_to_fraction(key: &[u8], start: &[u8], stop: &[u8]) -> f64 {
    if key <= start {
        return 0.0;
    }
    if !stop.is_empty() && key >= stop {
        return 1.0;
    }
    let bounds = Bounds::new(start, stop);
    if bounds.is_degenerate() || key.len() < bounds.prefix {
        return 0.0;
    }
    let k = to_fixed(&key[bounds.prefix..]).clamp(bounds.start, bounds.stop);
    (k - bounds.start) as f64 / (bounds.stop - bounds.start) as f64
}

/// Key at `fraction` of `[start, stop)`. The caller checks the fraction is
/// within `[0, 1]`.
pub(crate) fn fraction_to_key(fraction: f64, start: &[u8], stop: &[u8]) -> Vec<u8> {
    if fraction <= 0.0 {
        return start.to_vec();
    }
    if fraction >= 1.0 {
        return stop.to_vec();
    }
    let bounds = Bounds::new(start, stop);
    if bounds.is_degenerate() {
        return start.to_vec();
    }
    let offset = ((bounds.stop - bounds.start) as f64 * fraction) as u128;
    let value = (bounds.start + offset).min(bounds.stop);
    if value >= ONE {
        return stop.to_vec();
    }

    let bytes = (value as u64).to_be_bytes();
    let significant = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    let mut key = start[..bounds.prefix].to_vec();
    key.extend_from_slice(&bytes[..significant]);
    key
}
