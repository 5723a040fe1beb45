//! Randomised client identity.
//!
//! Every call builds a fresh desktop browser `User-Agent`; nothing is cached
//! between requests.

use rand::seq::SliceRandom;
use rand::Rng;

const PLATFORMS: &[&str] = &[
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Linux x86_64",
];

#[derive(Clone, Copy)]
enum Browser {
    Chrome,
    Edge,
    Firefox,
    Safari,
}

const BROWSERS: &[Browser] = &[Browser::Chrome, Browser::Edge, Browser::Firefox, Browser::Safari];

/// Generate a plausible desktop browser user agent string.
pub fn random_user_agent() -> String {
    let mut rng = rand::thread_rng();
    let browser = *BROWSERS.choose(&mut rng).unwrap_or(&Browser::Chrome);

    match browser {
        Browser::Safari => {
            let minor = rng.gen_range(0..=6);
            format!(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                 (KHTML, like Gecko) Version/17.{} Safari/605.1.15",
                minor
            )
        }
        Browser::Firefox => {
            let platform = PLATFORMS.choose(&mut rng).unwrap_or(&PLATFORMS[0]);
            let major = rng.gen_range(121..=133);
            format!(
                "Mozilla/5.0 ({}; rv:{}.0) Gecko/20100101 Firefox/{}.0",
                platform, major, major
            )
        }
        Browser::Chrome | Browser::Edge => {
            let platform = PLATFORMS.choose(&mut rng).unwrap_or(&PLATFORMS[0]);
            let major = rng.gen_range(120..=131);
            let build = rng.gen_range(6000..=6800);
            let patch = rng.gen_range(0..=200);
            let chrome = format!(
                "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) \
                 Chrome/{}.0.{}.{} Safari/537.36",
                platform, major, build, patch
            );
            match browser {
                Browser::Edge => format!("{} Edg/{}.0.{}.{}", chrome, major, build, patch),
                _ => chrome,
            }
        }
    }
}
