/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

#[cfg(test)]
mod test {
    use instagram::v1::signature::{sign, sign_ips};

    const SECRET: &str = "6dc1787668c64c939929c17683d7cb74";
    const ENDPOINT: &str = "/media/657988443280050001_25025320";

    #[test]
    fn generate_sig() {
        let sig = sign("DEBUG", "/", vec![("count", "1")]);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn documented_example() {
        let sig = sign(
            SECRET,
            ENDPOINT,
            [
                ("count", "10"),
                ("access_token", "fb2e77d.47a0479900504cb3ab4a1f626d174d2d"),
            ],
        );
        assert_eq!(
            sig,
            "260634b241a6cfef5e4644c205fb30246ff637591142781b86e2075faf1b163a"
        );
    }

    #[test]
    fn parameter_order_does_not_matter() {
        let forward = vec![
            ("access_token", "fb2e77d.47a0479900504cb3ab4a1f626d174d2d"),
            ("count", "10"),
            ("max_id", "42"),
        ];
        let mut backward = forward.clone();
        backward.reverse();
        let shuffled = vec![forward[1], forward[2], forward[0]];

        let expected = sign(SECRET, ENDPOINT, forward);
        assert_eq!(sign(SECRET, ENDPOINT, backward), expected);
        assert_eq!(sign(SECRET, ENDPOINT, shuffled), expected);
    }

    #[test]
    fn deterministic_for_same_input() {
        let params = [("count", "10")];
        assert_eq!(
            sign(SECRET, ENDPOINT, params),
            sign(SECRET, ENDPOINT, params)
        );
    }

    #[test]
    fn every_input_changes_the_signature() {
        let base = sign(SECRET, ENDPOINT, [("count", "10")]);
        assert_ne!(sign("other-secret", ENDPOINT, [("count", "10")]), base);
        assert_ne!(sign(SECRET, "/media/popular", [("count", "10")]), base);
        assert_ne!(sign(SECRET, ENDPOINT, [("count", "11")]), base);
        assert_ne!(sign(SECRET, ENDPOINT, [("count", "10"), ("min_id", "1")]), base);
    }

    #[test]
    fn signed_ips_header_value() {
        let value = sign_ips(SECRET, "200.15.1.1,131.51.1.35");
        let (ips, sig) = value.split_once('|').unwrap();
        assert_eq!(ips, "200.15.1.1,131.51.1.35");
        assert_eq!(sig.len(), 64);
        assert_ne!(sig, sign_ips("other-secret", ips).split_once('|').unwrap().1);
    }

    #[test]
    fn repeated_keys_are_order_independent() {
        let forward = sign(SECRET, ENDPOINT, [("a", "1"), ("a", "2")]);
        assert_eq!(sign(SECRET, ENDPOINT, [("a", "2"), ("a", "1")]), forward);
        // Every value is covered
        assert_ne!(sign(SECRET, ENDPOINT, [("a", "2")]), forward);
        assert_ne!(sign(SECRET, ENDPOINT, [("a", "1")]), forward);
    }
}
