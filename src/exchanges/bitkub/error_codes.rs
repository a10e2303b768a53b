//! Bitkub envelope error codes.
//!
//! The table is a compile-time `match`; there is no way to mutate it and it is
//! safe to read from any thread.

/// Message returned for codes missing from the table.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Human-readable message for an envelope error code. Never fails.
pub const fn message(code: i32) -> &'static str {
    match code {
        0 => "No error",
        1 => "Invalid JSON payload",
        2 => "Missing X-BTK-APIKEY",
        3 => "Invalid API key",
        4 => "API pending for activation",
        5 => "IP not allowed",
        6 => "Missing / invalid signature",
        7 => "Missing timestamp",
        8 => "Invalid timestamp",
        9 => "Invalid user",
        10 => "Invalid parameter",
        11 => "Invalid symbol",
        12 => "Invalid amount",
        13 => "Invalid rate",
        14 => "Improper rate",
        15 => "Amount too low",
        16 => "Failed to get balance",
        17 => "Wallet is empty",
        18 => "Insufficient balance",
        19 => "Failed to insert order into db",
        20 => "Failed to deduct balance",
        21 => "Invalid order for cancellation",
        22 => "Invalid side",
        23 => "Failed to update order status",
        24 => "Invalid order for lookup",
        25 => "KYC level 1 is required to proceed",
        30 => "Limit exceeds",
        40 | 50 => "Pending withdrawal exists",
        41 => "Invalid currency for withdrawal",
        42 => "Address is not in whitelist",
        43 => "Failed to deduct crypto",
        44 => "Failed to create withdrawal record",
        45 => "Nonce has to be numeric",
        46 => "Invalid nonce",
        47 => "Withdrawal limit exceeds",
        48 => "Invalid bank account",
        49 => "Bank limit exceeds",
        51 => "Withdrawal is under maintenance",
        52 => "Invalid permission",
        53 => "Invalid internal address",
        54 => "Address has been deprecated",
        90 => "Server error (please contact support)",
        _ => UNKNOWN_ERROR,
    }
}

/// Coarse grouping of error codes.
///
/// Derived from the numeric ranges the exchange documents today; the exchange
/// does not promise these ranges, so anything outside the table is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFamily {
    Success,
    /// Credentials, signature, timestamp, payload format (1-9).
    Authentication,
    /// Parameters, balances and order lifecycle (10-25).
    Validation,
    /// Account limits (30).
    Limit,
    /// Withdrawals and permissions (40-54).
    Withdrawal,
    /// Exchange-side failure (90).
    Server,
    Unknown,
}

impl ErrorFamily {
    pub fn of(code: i32) -> Self {
        if message(code) == UNKNOWN_ERROR {
            return Self::Unknown;
        }
        match code {
            0 => Self::Success,
            1..=9 => Self::Authentication,
            10..=25 => Self::Validation,
            30 => Self::Limit,
            40..=54 => Self::Withdrawal,
            90 => Self::Server,
            _ => Self::Unknown,
        }
    }

    /// Whether repeating the same request later may succeed.
    ///
    /// Only a hint: retry policy belongs to the caller, and a retried private
    /// call must be signed again.
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Limit | Self::Server)
    }
}
