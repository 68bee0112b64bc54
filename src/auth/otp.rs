use rand::Rng;

/// Generate a numeric one-time code of the given length.
///
/// Uniform digits from a thread-local RNG; sufficient for a low-value,
/// SMS-delivered login code.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_requested_length() {
        assert_eq!(generate_code(4).len(), 4);
        assert_eq!(generate_code(6).len(), 6);
        assert_eq!(generate_code(0).len(), 0);
    }

    #[test]
    fn produces_digits_only() {
        for _ in 0..50 {
            assert!(generate_code(8).chars().all(|c| c.is_ascii_digit()));
        }
    }
}
