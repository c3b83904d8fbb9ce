//! Input checks performed before any request is sent.

use regex::Regex;
use std::{net::IpAddr, sync::LazyLock};

// longitude,latitude with at most six decimals; the bounds only allow zero
// decimals. Whitespace is tolerated after the comma only.
static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^
        -?(?:180(?:\.0{1,6})?|[1-9]?[0-9](?:\.[0-9]{1,6})?|1[0-7][0-9](?:\.[0-9]{1,6})?)
        ,[\t\n\x0B\x0C\r\x20]*
        -?(?:90(?:\.0{1,6})?|[1-8]?[0-9](?:\.[0-9]{1,6})?)
        $
    ",
    )
    .expect("location pattern is valid")
});

/// `true` for a non-empty IPv4 or IPv6 literal.
pub fn is_valid_ip(ip: &str) -> bool {
    !ip.is_empty() && ip.parse::<IpAddr>().is_ok()
}

/// `true` for a `longitude,latitude` pair in range with at most six decimals.
pub fn is_valid_location(location: &str) -> bool {
    !location.is_empty() && LOCATION.is_match(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ipv4_and_ipv6() {
        assert!(is_valid_ip("192.168.1.1"));
        assert!(is_valid_ip("114.247.50.2"));
        assert!(is_valid_ip("::1"));
        assert!(is_valid_ip("2001:db8::8a2e:370:7334"));
    }

    #[test]
    fn rejects_malformed_ip() {
        assert!(!is_valid_ip(""));
        assert!(!is_valid_ip("not-an-ip"));
        assert!(!is_valid_ip("256.1.1.1"));
        assert!(!is_valid_ip("1.2.3"));
        assert!(!is_valid_ip(" 1.2.3.4"));
    }

    #[test]
    fn accepts_locations_in_range() {
        assert!(is_valid_location("120.585294,31.299758"));
        assert!(is_valid_location("120.585294, 31.299758"));
        assert!(is_valid_location("-180,-90"));
        assert!(is_valid_location("180.000000,90.0"));
        assert!(is_valid_location("179.999999,89.999999"));
        assert!(is_valid_location("0,0"));
        assert!(is_valid_location("-0.5,-0.5"));
    }

    #[test]
    fn rejects_out_of_range_locations() {
        assert!(!is_valid_location("200,100"));
        assert!(!is_valid_location("180.000001,0"));
        assert!(!is_valid_location("0,90.5"));
        assert!(!is_valid_location("181,0"));
        assert!(!is_valid_location("0,91"));
    }

    #[test]
    fn rejects_locations_outside_the_lexical_pattern() {
        assert!(!is_valid_location(""));
        assert!(!is_valid_location("120.1234567,30"));
        assert!(!is_valid_location("120,30.1234567"));
        assert!(!is_valid_location("120 ,30"));
        assert!(!is_valid_location(" 120,30"));
        assert!(!is_valid_location("120,30 "));
        assert!(!is_valid_location("120;30"));
        assert!(!is_valid_location("0120,30"));
        assert!(!is_valid_location("120.,30"));
        assert!(!is_valid_location("+120,30"));
    }
}
