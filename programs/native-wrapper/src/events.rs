use anchor_lang::prelude::*;

#[event]
pub struct WrapperInitialized {
    pub mint: Pubkey,
    pub custody_authority: Pubkey,
    pub bump: u8,
    pub decimals: u8,
    pub rent_exempt_reserve: u64,
}

#[event]
pub struct WrapEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub mint: Pubkey,
    pub mint_supply: u64,
    pub custody_authority: Pubkey,
    pub custody_balance: u64,
    pub backing: u64,
    pub slot: u64,
}

#[event]
pub struct UnwrapEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub mint: Pubkey,
    pub mint_supply: u64,
    pub custody_authority: Pubkey,
    pub custody_balance: u64,
    pub backing: u64,
    pub slot: u64,
}
