//! Client-side helpers: address derivation, instruction builders, amount
//! conversion and the optional auto-wrap policy used around swaps.
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{InstructionData, ToAccountMetas};
use anchor_spl::associated_token::{get_associated_token_address, AssociatedToken};
use anchor_spl::token::Token;

use crate::error::CustomErrorCode;
use crate::state::{check_wrap_funding, find_custody_authority, NATIVE_DECIMALS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapperConfig {
    pub program_id: Pubkey,
    pub mint: Pubkey,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

impl WrapperConfig {
    /// Config for a deployment of this program backing `mint`.
    pub fn new(mint: Pubkey) -> Self {
        Self {
            program_id: crate::ID,
            mint,
            decimals: NATIVE_DECIMALS,
            symbol: "wXNT".to_string(),
            name: "Wrapped XNT".to_string(),
        }
    }

    pub fn custody_authority(&self) -> Pubkey {
        find_custody_authority(&self.program_id).0
    }

    pub fn user_token_account(&self, user: &Pubkey) -> Pubkey {
        user_token_account(user, &self.mint)
    }

    pub fn is_wrapped(&self, mint: &Pubkey) -> bool {
        *mint == self.mint
    }
}

/// Associated token account holding `user`'s wrapped balance.
pub fn user_token_account(user: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(user, mint)
}

/// `mint` must also sign the transaction.
pub fn initialize_ix(program_id: &Pubkey, mint: &Pubkey, payer: &Pubkey) -> Instruction {
    let accounts = crate::accounts::Initialize {
        mint: *mint,
        custody_authority: find_custody_authority(program_id).0,
        payer: *payer,
        system_program: System::id(),
        token_program: Token::id(),
    };
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: crate::instruction::Initialize {}.data(),
    }
}

pub fn wrap_ix(program_id: &Pubkey, mint: &Pubkey, user: &Pubkey, amount: u64) -> Instruction {
    let accounts = crate::accounts::Wrap {
        mint: *mint,
        custody_authority: find_custody_authority(program_id).0,
        user: *user,
        user_token_account: user_token_account(user, mint),
        system_program: System::id(),
        token_program: Token::id(),
        associated_token_program: AssociatedToken::id(),
    };
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: crate::instruction::Wrap { amount }.data(),
    }
}

pub fn unwrap_ix(program_id: &Pubkey, mint: &Pubkey, user: &Pubkey, amount: u64) -> Instruction {
    let accounts = crate::accounts::Unwrap {
        mint: *mint,
        custody_authority: find_custody_authority(program_id).0,
        user: *user,
        user_token_account: user_token_account(user, mint),
        token_program: Token::id(),
    };
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: crate::instruction::Unwrap { amount }.data(),
    }
}

pub fn check_solvency_ix(program_id: &Pubkey, mint: &Pubkey) -> Instruction {
    let accounts = crate::accounts::SolvencyView {
        mint: *mint,
        custody_authority: find_custody_authority(program_id).0,
    };
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: crate::instruction::CheckSolvency {}.data(),
    }
}

/// Parses a decimal string such as `"1.25"` into base units. Exact: inputs
/// with more fractional digits than `decimals` are rejected, never rounded.
pub fn to_base_units(ui_amount: &str, decimals: u8) -> Result<u64> {
    let ui_amount = ui_amount.trim();
    let (whole, fraction) = match ui_amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (ui_amount, ""),
    };

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    require!(
        !(whole.is_empty() && fraction.is_empty()) && is_digits(whole) && is_digits(fraction),
        CustomErrorCode::InvalidAmount
    );
    require!(
        fraction.len() <= decimals as usize,
        CustomErrorCode::InvalidAmount
    );

    let scale = 10u64
        .checked_pow(decimals as u32)
        .ok_or(CustomErrorCode::Overflow)?;
    let whole_units = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .map_err(|_| CustomErrorCode::Overflow)?
    };
    let fraction_units = if fraction.is_empty() {
        0
    } else {
        let padding = 10u64.pow((decimals as usize - fraction.len()) as u32);
        fraction
            .parse::<u64>()
            .map_err(|_| CustomErrorCode::Overflow)?
            .checked_mul(padding)
            .ok_or(CustomErrorCode::Overflow)?
    };

    whole_units
        .checked_mul(scale)
        .and_then(|units| units.checked_add(fraction_units))
        .ok_or_else(|| error!(CustomErrorCode::Overflow))
}

/// Formats base units for display, dropping trailing fractional zeros.
pub fn to_ui_amount(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    // past 10^38 every u64 amount is purely fractional
    let (whole, fraction) = match 10u128.checked_pow(decimals as u32) {
        Some(scale) => (amount as u128 / scale, amount as u128 % scale),
        None => (0, amount as u128),
    };
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{:0width$}", fraction, width = decimals as usize);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Decides whether to wrap before and unwrap after a swap.
///
/// Which mint stands for the native currency is configured explicitly by the
/// integrator; nothing here tries to detect it.
#[derive(Clone, Debug)]
pub struct AutoWrapPolicy {
    config: WrapperConfig,
    native_marker: Pubkey,
}

impl AutoWrapPolicy {
    pub fn new(config: WrapperConfig, native_marker: Pubkey) -> Result<Self> {
        require_keys_neq!(native_marker, config.mint, CustomErrorCode::InvalidMint);
        Ok(Self {
            config,
            native_marker,
        })
    }

    pub fn config(&self) -> &WrapperConfig {
        &self.config
    }

    /// Wrap instruction to prepend when the swap input is the native currency.
    /// `user_reserve` is the rent-exempt minimum the user's account must keep,
    /// the same floor the program enforces on wrap.
    pub fn before_swap(
        &self,
        user: &Pubkey,
        input_mint: &Pubkey,
        amount: u64,
        native_balance: u64,
        user_reserve: u64,
    ) -> Result<Option<Instruction>> {
        if *input_mint != self.native_marker {
            return Ok(None);
        }
        require!(amount > 0, CustomErrorCode::InvalidAmount);
        check_wrap_funding(native_balance, user_reserve, amount)?;
        Ok(Some(wrap_ix(
            &self.config.program_id,
            &self.config.mint,
            user,
            amount,
        )))
    }

    /// Unwrap instruction to append when the user wants native output back.
    pub fn after_swap(
        &self,
        user: &Pubkey,
        output_mint: &Pubkey,
        amount: u64,
        wants_native: bool,
    ) -> Option<Instruction> {
        if !wants_native || amount == 0 || !self.config.is_wrapped(output_mint) {
            return None;
        }
        Some(unwrap_ix(
            &self.config.program_id,
            &self.config.mint,
            user,
            amount,
        ))
    }
}
