use anchor_lang::prelude::*;

use crate::error::CustomErrorCode;

pub const WRAPPER_AUTHORITY_SEED: &[u8] = b"wrapper-authority";
pub const NATIVE_DECIMALS: u8 = 9; // 1 native unit = 10^9 lamports

// The custody authority is the PDA that signs for the wrapped mint and whose
// own lamport balance is the custody pool. It only records which mint it
// backs; everything else about solvency is derived from public balances.
#[account]
pub struct CustodyAuthority {
    pub mint: Pubkey,
    pub bump: u8,
}

impl CustodyAuthority {
    pub const LEN: usize = 8 + 32 + 1; // discriminator + mint + bump
}

/// Derives the custody authority address and its canonical bump.
pub fn find_custody_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[WRAPPER_AUTHORITY_SEED], program_id)
}

/// The three numbers the solvency invariant ties together:
/// `custody_lamports - rent_exempt_reserve >= supply`.
///
/// Equality holds unless lamports were sent straight to the custody address,
/// which can't be refused; such a surplus is never minted against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CustodyLedger {
    pub custody_lamports: u64,
    pub rent_exempt_reserve: u64,
    pub supply: u64,
}

impl CustodyLedger {
    /// Lamports available to back the wrapped supply.
    pub fn backing(&self) -> Result<u64> {
        self.custody_lamports
            .checked_sub(self.rent_exempt_reserve)
            .ok_or_else(|| error!(CustomErrorCode::InvariantViolation))
    }

    /// Backing in excess of the wrapped supply.
    pub fn surplus(&self) -> Result<u64> {
        self.backing()?
            .checked_sub(self.supply)
            .ok_or_else(|| error!(CustomErrorCode::InvariantViolation))
    }

    pub fn verify(&self) -> Result<()> {
        self.surplus().map(|_| ())
    }

    /// State after `amount` lamports enter custody and the same amount is minted.
    pub fn apply_wrap(&self, amount: u64) -> Result<Self> {
        require!(amount > 0, CustomErrorCode::InvalidAmount);
        self.verify()?;

        let supply = self
            .supply
            .checked_add(amount)
            .ok_or(CustomErrorCode::Overflow)?;
        let custody_lamports = self
            .custody_lamports
            .checked_add(amount)
            .ok_or(CustomErrorCode::Overflow)?;

        Ok(Self {
            custody_lamports,
            supply,
            ..*self
        })
    }

    /// State after `amount` is burned from a holding of `holding_balance` and
    /// the same amount of lamports leaves custody.
    pub fn apply_unwrap(&self, amount: u64, holding_balance: u64) -> Result<Self> {
        require!(amount > 0, CustomErrorCode::InvalidAmount);
        require!(
            amount <= holding_balance,
            CustomErrorCode::InsufficientTokenBalance
        );
        self.verify()?;

        let supply = self
            .supply
            .checked_sub(amount)
            .ok_or(CustomErrorCode::Underflow)?;

        // Unreachable while the invariant holds; never release a partial amount.
        require!(
            self.backing()? >= amount,
            CustomErrorCode::InvariantViolation
        );
        let custody_lamports = self
            .custody_lamports
            .checked_sub(amount)
            .ok_or(CustomErrorCode::InvariantViolation)?;

        Ok(Self {
            custody_lamports,
            supply,
            ..*self
        })
    }
}

/// The user must be able to fund `amount` and still keep `user_reserve`.
pub fn check_wrap_funding(user_lamports: u64, user_reserve: u64, amount: u64) -> Result<()> {
    let required = amount
        .checked_add(user_reserve)
        .ok_or(CustomErrorCode::Overflow)?;
    require!(
        user_lamports >= required,
        CustomErrorCode::InsufficientNativeBalance
    );
    Ok(())
}
