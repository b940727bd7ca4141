//! # Shared Utility Functions
//!
//! Display helpers used by the header when rendering a connected identity.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Keep the first N and last M characters with an ellipsis
//! - [`truncate_address`] - `0x1234...7890` style shortening for EVM addresses
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x1234567890123456789012345678901234567890";
//! assert_eq!(format_address(address, 6, 4), "0x1234...7890");
//! ```

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// Addresses too short to shorten, or containing non-ASCII characters, are returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01";
/// assert_eq!(format_address(addr, 6, 4), "0xAbCd...Ef01");
/// assert_eq!(format_address("0xABC", 6, 4), "0xABC");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if !address.is_ascii() || address_len <= prefix_len + suffix_len {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Shorten an EVM address to `0x` plus four characters on each side.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0x1234567890123456789012345678901234567890";
/// assert_eq!(truncate_address(addr), "0x1234...7890");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "0x1234567890123456789012345678901234567890";
        assert_eq!(format_address(addr, 6, 4), "0x1234...7890");
        assert_eq!(format_address(addr, 4, 4), "0x12...7890");
        assert_eq!(format_address(addr, 2, 2), "0x...90");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("0xABC", 6, 4), "0xABC");
        assert_eq!(format_address("", 6, 4), "");
    }

    #[test]
    fn test_format_address_non_ascii_untouched() {
        assert_eq!(format_address("ünïcödé-wallet-name", 2, 2), "ünïcödé-wallet-name");
    }

    #[test]
    fn test_truncate_address() {
        let addr = "0x1234567890123456789012345678901234567890";
        assert_eq!(truncate_address(addr), "0x1234...7890");
    }
}
