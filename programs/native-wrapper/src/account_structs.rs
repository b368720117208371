use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Fresh keypair; `init` fails if the address already holds state
    #[account(
        init,
        payer = payer,
        mint::decimals = NATIVE_DECIMALS,
        mint::authority = custody_authority,
    )]
    pub mint: Account<'info, Mint>,

    /// The custody authority PDA. It signs for the mint and its lamport
    /// balance above the rent-exempt reserve backs the whole wrapped supply.
    /// Being created here makes the program single-mint: a second initialize
    /// fails because this address is already in use.
    #[account(
        init,
        payer = payer,
        space = CustodyAuthority::LEN,
        seeds = [WRAPPER_AUTHORITY_SEED],
        bump
    )]
    pub custody_authority: Account<'info, CustodyAuthority>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct Wrap<'info> {
    #[account(
        mut,
        constraint = mint.key() == custody_authority.mint @ CustomErrorCode::InvalidMint,
        constraint = mint.mint_authority == Some(custody_authority.key()).into() @ CustomErrorCode::InvalidMintAuthority
    )]
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [WRAPPER_AUTHORITY_SEED],
        bump = custody_authority.bump
    )]
    pub custody_authority: Account<'info, CustodyAuthority>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = mint,
        associated_token::authority = user,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

#[derive(Accounts)]
pub struct Unwrap<'info> {
    #[account(
        mut,
        constraint = mint.key() == custody_authority.mint @ CustomErrorCode::InvalidMint,
        constraint = mint.mint_authority == Some(custody_authority.key()).into() @ CustomErrorCode::InvalidMintAuthority
    )]
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [WRAPPER_AUTHORITY_SEED],
        bump = custody_authority.bump
    )]
    pub custody_authority: Account<'info, CustodyAuthority>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = user,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct SolvencyView<'info> {
    #[account(
        constraint = mint.key() == custody_authority.mint @ CustomErrorCode::InvalidMint
    )]
    pub mint: Account<'info, Mint>,

    #[account(
        seeds = [WRAPPER_AUTHORITY_SEED],
        bump = custody_authority.bump
    )]
    pub custody_authority: Account<'info, CustodyAuthority>,
}
