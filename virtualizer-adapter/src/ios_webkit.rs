/// Detects the iOS WebKit scroll quirk from a `navigator.userAgent`-shaped string.
///
/// iOS requires every browser to embed WebKit, so any iOS user agent is affected, including
/// Chrome/Firefox-branded browsers on iOS (`CriOS`, `FxiOS`). This is a string match rather than
/// feature sniffing, since there is no portable way to probe WebKit's momentum-scroll cancellation
/// behavior directly. Pass the result to [`virtualizer::VirtualStoreOptions::with_ios_webkit`].
pub fn is_ios_webkit(user_agent: &str) -> bool {
    const IOS_MARKERS: [&str; 3] = ["iPhone", "iPad", "iPod"];
    IOS_MARKERS.iter().any(|marker| user_agent.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::is_ios_webkit;

    #[test]
    fn detects_mobile_safari() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
        assert!(is_ios_webkit(ua));
    }

    #[test]
    fn detects_chrome_on_ios() {
        let ua = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15 CriOS/120.0";
        assert!(is_ios_webkit(ua));
    }

    #[test]
    fn rejects_desktop_and_android() {
        assert!(!is_ios_webkit(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
        ));
        assert!(!is_ios_webkit(
            "Mozilla/5.0 (Linux; Android 14) AppleWebKit/537.36"
        ));
    }
}
