//! Endpoint paths served by the backend.
//!
//! Paths carry no leading `/` because they are appended to a `BaseUrl`,
//! which always ends in one. Paths ending in `/` expect a suffix.

pub const LOCATION: &str = "location";
pub const LOGIN: &str = "login";
pub const LAND_REGISTRY_ADDRESSES: &str = "land-registry/get-addresses/";
pub const LAND_REGISTRY_TRANSACTIONS: &str = "land-registry/get-transactions/";
pub const LAND_REGISTRY_TOWN_TRANSACTIONS: &str = "land-registry/get-transactionsTown/";

/// Normalize a UK post code the way the land registry endpoints expect:
/// upper case, with the inward code (last three characters) separated by a
/// single space.
pub fn format_post_code(post_code: &str) -> String {
    let code = post_code.trim().to_uppercase();
    let chars: Vec<char> = code.chars().collect();
    if chars.len() < 4 || chars[chars.len() - 4] == ' ' {
        return code;
    }
    let (outward, inward) = chars.split_at(chars.len() - 3);
    let outward: String = outward.iter().collect();
    let inward: String = inward.iter().collect();
    format!("{} {inward}", outward.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_space_before_inward_code() {
        assert_eq!(format_post_code("so171bj"), "SO17 1BJ");
        assert_eq!(format_post_code("m11ae"), "M1 1AE");
    }

    #[test]
    fn already_formatted_code_is_only_uppercased() {
        assert_eq!(format_post_code("so17 1bj"), "SO17 1BJ");
        assert_eq!(format_post_code("SW1A 2AA"), "SW1A 2AA");
    }

    #[test]
    fn short_code_is_left_alone() {
        assert_eq!(format_post_code("ab1"), "AB1");
        assert_eq!(format_post_code(""), "");
    }

    #[test]
    fn endpoint_paths_have_no_leading_slash() {
        for path in [
            LOCATION,
            LOGIN,
            LAND_REGISTRY_ADDRESSES,
            LAND_REGISTRY_TRANSACTIONS,
            LAND_REGISTRY_TOWN_TRANSACTIONS,
        ] {
            assert!(!path.starts_with('/'), "{path}");
        }
    }
}
