//! Signing secret strength classification
//!
//! HS256 keys shorter than the hash output weaken the MAC. The service does
//! not refuse to start on a weak secret; it classifies it and logs a warning.

const MIN_SECRET_LENGTH: usize = 32; // 256 bits
const RECOMMENDED_SECRET_LENGTH: usize = 64; // 512 bits

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretStrength {
    /// No secret configured at all
    Empty,
    /// Too short, low entropy, or patterned
    Weak,
    /// Meets the minimum
    Acceptable,
    /// Meets the recommended length and entropy
    Strong,
}

/// Classify a signing secret.
///
/// **Criteria**:
/// - Minimum 32 bytes, recommended 64 bytes
/// - Shannon entropy of at least 4.0 bits/byte (5.0 for `Strong`)
/// - No runs of 4+ repeated or sequential bytes
pub fn classify_secret(secret: &[u8]) -> SecretStrength {
    if secret.is_empty() {
        return SecretStrength::Empty;
    }
    if secret.len() < MIN_SECRET_LENGTH {
        return SecretStrength::Weak;
    }

    let entropy = shannon_entropy(secret);
    if entropy < 4.0 || has_obvious_patterns(secret) {
        return SecretStrength::Weak;
    }

    if secret.len() >= RECOMMENDED_SECRET_LENGTH && entropy >= 5.0 {
        SecretStrength::Strong
    } else {
        SecretStrength::Acceptable
    }
}

/// Bits per byte (0-8 scale)
fn shannon_entropy(data: &[u8]) -> f64 {
    let mut freq = [0u32; 256];
    for &byte in data {
        freq[byte as usize] += 1;
    }

    let len = data.len() as f64;
    freq.iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

fn has_obvious_patterns(data: &[u8]) -> bool {
    let mut same_run = 1;
    let mut seq_run = 1;

    for window in data.windows(2) {
        same_run = if window[0] == window[1] { same_run + 1 } else { 1 };
        seq_run = if window[1] as i16 - window[0] as i16 == 1 { seq_run + 1 } else { 1 };

        if same_run >= 4 || seq_run >= 4 {
            return true;
        }
    }

    false
}
