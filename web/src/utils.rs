use std::hash::{DefaultHasher, Hash, Hasher};

use cashmine_core::Credits;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Stable seed for a user supplied `--seed` string.
pub(crate) fn seed_from_text(text: &str) -> u64 {
    text.trim()
        .parse::<u64>()
        .unwrap_or_else(|_| {
            let mut hasher = DefaultHasher::new();
            text.trim().hash(&mut hasher);
            hasher.finish()
        })
}

pub(crate) fn format_credits(amount: Credits) -> String {
    format!("${:.2}", amount)
}
