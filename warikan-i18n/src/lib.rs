#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const AMOUNT: &str = "金額";
    pub const TIP: &str = "チップ";
    pub const SHARED_EXPENSES: &str = "共通費";
    pub const TOTAL: &str = "合計";
    pub const MISMATCH: &str = "差額";
    pub const AUTOMATIC_MARK: &str = "(自動)";
    pub const CALCULATED_MARK: &str = "(計算)";
    pub const ADJUSTED_MARK: &str = "(調整)";
    pub const SHARED_MARK: &str = "(共通)";
    pub const TIP_MARK: &str = "(チップ)";
}

#[cfg(feature = "en")]
pub mod strings {
    pub const AMOUNT: &str = "Amount";
    pub const TIP: &str = "Tip";
    pub const SHARED_EXPENSES: &str = "Shared expenses";
    pub const TOTAL: &str = "Total";
    pub const MISMATCH: &str = "Mismatch";
    pub const AUTOMATIC_MARK: &str = "(auto)";
    pub const CALCULATED_MARK: &str = "(calc)";
    pub const ADJUSTED_MARK: &str = "(adjusted)";
    pub const SHARED_MARK: &str = "(shared)";
    pub const TIP_MARK: &str = "(tip)";
}

#[cfg(not(any(feature = "ja", feature = "en")))]
pub mod strings {
    pub const AMOUNT: &str = "Amount";
    pub const TIP: &str = "Tip";
    pub const SHARED_EXPENSES: &str = "Shared expenses";
    pub const TOTAL: &str = "Total";
    pub const MISMATCH: &str = "Mismatch";
    pub const AUTOMATIC_MARK: &str = "(auto)";
    pub const CALCULATED_MARK: &str = "(calc)";
    pub const ADJUSTED_MARK: &str = "(adjusted)";
    pub const SHARED_MARK: &str = "(shared)";
    pub const TIP_MARK: &str = "(tip)";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn invalid_input(input: impl std::fmt::Display) -> String {
    format!("無効な入力 '{input}'")
}

#[cfg(feature = "en")]
pub fn invalid_input(input: impl std::fmt::Display) -> String {
    format!("invalid input '{input}'")
}

#[cfg(not(any(feature = "ja", feature = "en")))]
pub fn invalid_input(input: impl std::fmt::Display) -> String {
    format!("invalid input '{input}'")
}
