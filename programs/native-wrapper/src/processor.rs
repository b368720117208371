use crate::account_structs::*;
use crate::error::*;
use crate::events::*;
use crate::state::{check_wrap_funding, CustodyAuthority, CustodyLedger, NATIVE_DECIMALS, WRAPPER_AUTHORITY_SEED};
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Burn, Mint, MintTo};

/*
# Custody Accounting

The custody authority PDA is both the mint authority of the wrapped token and
the account holding the native lamports that back it. There is no separate
ledger: the invariant is stated purely over public balances

    custody_authority.lamports - rent_exempt_reserve >= mint.supply

with equality unless lamports were transferred straight to the custody address.
Wrap and unwrap each move the same amount on both sides inside one transaction:

- wrap:   user --(system transfer)--> custody, then mint_to(user ATA)
- unwrap: burn(user ATA), then custody --(direct debit)--> user

Both handlers first run the transition through `CustodyLedger` so every
precondition and checked operation fails before any CPI, then compare the
resulting on-chain balances with the planned ones. Any mismatch aborts the
whole transaction.

The custody account is owned by this program, so unwrap debits it directly
instead of going through the system program.
 */

fn custody_ledger(custody: &AccountInfo, mint: &Mint, rent: &Rent) -> CustodyLedger {
    CustodyLedger {
        custody_lamports: custody.lamports(),
        rent_exempt_reserve: rent.minimum_balance(CustodyAuthority::LEN),
        supply: mint.supply,
    }
}

pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let rent = Rent::get()?;

    let custody = &mut ctx.accounts.custody_authority;
    custody.mint = ctx.accounts.mint.key();
    custody.bump = ctx.bumps.custody_authority;

    let ledger = custody_ledger(&custody.to_account_info(), &ctx.accounts.mint, &rent);
    ledger.verify()?;

    msg!("Wrapped mint: {}", ctx.accounts.mint.key());
    msg!("Custody authority: {}", custody.key());

    emit!(WrapperInitialized {
        mint: ctx.accounts.mint.key(),
        custody_authority: custody.key(),
        bump: custody.bump,
        decimals: NATIVE_DECIMALS,
        rent_exempt_reserve: ledger.rent_exempt_reserve,
    });

    Ok(())
}

pub fn wrap(ctx: Context<Wrap>, amount: u64) -> Result<()> {
    require!(amount > 0, CustomErrorCode::InvalidAmount);

    let rent = Rent::get()?;
    let user_info = ctx.accounts.user.to_account_info();
    check_wrap_funding(
        user_info.lamports(),
        rent.minimum_balance(user_info.data_len()),
        amount,
    )?;

    let custody_info = ctx.accounts.custody_authority.to_account_info();
    let before = custody_ledger(&custody_info, &ctx.accounts.mint, &rent);
    let after = before.apply_wrap(amount)?;

    msg!("Wrap amount: {}", amount);
    msg!("Current custody balance: {}", before.custody_lamports);
    msg!("Current supply: {}", before.supply);

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: user_info,
                to: custody_info.clone(),
            },
        ),
        amount,
    )?;

    let bump = ctx.accounts.custody_authority.bump;
    let seeds: &[&[u8]] = &[WRAPPER_AUTHORITY_SEED, &[bump]];
    let signer = &[&seeds[..]];
    let cpi_accounts = MintTo {
        mint: ctx.accounts.mint.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: custody_info.clone(),
    };
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer,
        ),
        amount,
    )?;

    ctx.accounts.mint.reload()?;
    let settled = custody_ledger(&custody_info, &ctx.accounts.mint, &rent);
    require!(settled == after, CustomErrorCode::InvariantViolation);
    let backing = settled.backing()?;

    msg!("Emitting WrapEvent");
    emit!(WrapEvent {
        user: ctx.accounts.user.key(),
        amount,
        mint: ctx.accounts.mint.key(),
        mint_supply: settled.supply,
        custody_authority: custody_info.key(),
        custody_balance: settled.custody_lamports,
        backing,
        slot: Clock::get()?.slot,
    });

    Ok(())
}

pub fn unwrap(ctx: Context<Unwrap>, amount: u64) -> Result<()> {
    require!(amount > 0, CustomErrorCode::InvalidAmount);

    let rent = Rent::get()?;
    let custody_info = ctx.accounts.custody_authority.to_account_info();
    let before = custody_ledger(&custody_info, &ctx.accounts.mint, &rent);
    let after = before.apply_unwrap(amount, ctx.accounts.user_token_account.amount)?;

    msg!("Unwrap amount: {}", amount);
    msg!("Current custody balance: {}", before.custody_lamports);
    msg!("Current supply: {}", before.supply);

    let burn_accounts = Burn {
        mint: ctx.accounts.mint.to_account_info(),
        from: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.user.to_account_info(),
    };
    token::burn(
        CpiContext::new(ctx.accounts.token_program.to_account_info(), burn_accounts),
        amount,
    )?;

    let user_info = ctx.accounts.user.to_account_info();
    let user_balance = user_info
        .lamports()
        .checked_add(amount)
        .ok_or(CustomErrorCode::Overflow)?;
    **custody_info.try_borrow_mut_lamports()? = after.custody_lamports;
    **user_info.try_borrow_mut_lamports()? = user_balance;

    ctx.accounts.mint.reload()?;
    let settled = custody_ledger(&custody_info, &ctx.accounts.mint, &rent);
    require!(settled == after, CustomErrorCode::InvariantViolation);
    let backing = settled.backing()?;

    msg!("Emitting UnwrapEvent");
    emit!(UnwrapEvent {
        user: ctx.accounts.user.key(),
        amount,
        mint: ctx.accounts.mint.key(),
        mint_supply: settled.supply,
        custody_authority: custody_info.key(),
        custody_balance: settled.custody_lamports,
        backing,
        slot: Clock::get()?.slot,
    });

    Ok(())
}

/// Surplus of custody backing over the wrapped supply.
/// Returns value via return_data for efficient CPI access
pub fn check_solvency(ctx: Context<SolvencyView>) -> Result<u64> {
    let rent = Rent::get()?;
    let ledger = custody_ledger(
        &ctx.accounts.custody_authority.to_account_info(),
        &ctx.accounts.mint,
        &rent,
    );

    msg!("custody balance: {}", ledger.custody_lamports);
    msg!("rent exempt reserve: {}", ledger.rent_exempt_reserve);
    msg!("supply: {}", ledger.supply);

    let surplus = ledger.surplus()?;
    msg!("surplus: {}", surplus);

    anchor_lang::solana_program::program::set_return_data(&surplus.to_le_bytes());

    Ok(surplus)
}
