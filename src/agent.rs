//! Preset browser `User-Agent` strings.

use rand::seq::SliceRandom;

pub const CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const FIREFOX: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) \
     Gecko/20100101 Firefox/125.0";

pub const SAFARI: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
     (KHTML, like Gecko) Version/17.4 Safari/605.1.15";

pub const EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.51";

const ROTATION: [&str; 4] = [CHROME, FIREFOX, SAFARI, EDGE];

/// Picks one of the preset strings at random. Purely cosmetic for outbound
/// requests; the choice is not remembered anywhere.
pub fn random_user_agent() -> &'static str {
    ROTATION
        .choose(&mut rand::thread_rng())
        .expect("rotation is non-empty")
}
