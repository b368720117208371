use anchor_lang::prelude::*;

#[error_code]
pub enum CustomErrorCode {
    #[msg("Amount must be greater than 0")]
    InvalidAmount = 1,
    #[msg("Insufficient native balance to wrap while keeping the account rent exempt")]
    InsufficientNativeBalance = 2,
    #[msg("Insufficient wrapped token balance")]
    InsufficientTokenBalance = 3,
    #[msg("Arithmetic overflow")]
    Overflow = 4,
    #[msg("Arithmetic underflow")]
    Underflow = 5,

    #[msg("Invalid mint provided")]
    InvalidMint = 6,
    #[msg("Invalid mint authority")]
    InvalidMintAuthority = 7,

    #[msg("Custody balance does not cover the wrapped supply")]
    InvariantViolation = 9,
}
