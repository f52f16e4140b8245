//! Security classification

use crate::types::{AuthAlgorithm, SecurityLevel};

/// Map an authentication-algorithm code to its security level.
///
/// Pure and total: exhaustive over the known code set, `Unknown` for
/// everything else. No side effects, no failure modes.
pub fn classify(auth: AuthAlgorithm) -> SecurityLevel {
    match auth {
        AuthAlgorithm::Open => SecurityLevel::Open,
        AuthAlgorithm::SharedKey => SecurityLevel::Wep,
        AuthAlgorithm::Wpa => SecurityLevel::Wpa,
        AuthAlgorithm::WpaPsk => SecurityLevel::WpaPsk,
        AuthAlgorithm::WpaNone => SecurityLevel::WpaNone,
        AuthAlgorithm::Rsna => SecurityLevel::Wpa2,
        AuthAlgorithm::RsnaPsk => SecurityLevel::Wpa2Psk,
        AuthAlgorithm::Wpa3 => SecurityLevel::Wpa3,
        AuthAlgorithm::Wpa3Sae => SecurityLevel::Wpa3Sae,
        AuthAlgorithm::Other(_) => SecurityLevel::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code_table() {
        let table = [
            (1, SecurityLevel::Open),
            (2, SecurityLevel::Wep),
            (3, SecurityLevel::Wpa),
            (4, SecurityLevel::WpaPsk),
            (5, SecurityLevel::WpaNone),
            (6, SecurityLevel::Wpa2),
            (7, SecurityLevel::Wpa2Psk),
            (8, SecurityLevel::Wpa3),
            (9, SecurityLevel::Wpa3Sae),
        ];
        for (code, expected) in table {
            assert_eq!(
                classify(AuthAlgorithm::from_code(code)),
                expected,
                "code {code}"
            );
        }
    }

    #[test]
    fn test_unmapped_codes_are_unknown() {
        for code in [0u32, 10, 11, 42, 0x8000_0000, u32::MAX] {
            assert_eq!(
                classify(AuthAlgorithm::from_code(code)),
                SecurityLevel::Unknown,
                "code {code}"
            );
        }
    }
}
