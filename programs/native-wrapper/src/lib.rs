#![allow(unexpected_cfgs)]

pub mod account_structs;
/// # Native Wrapper - 1:1 Wrapped Native Token
///
/// ## Business Process Flow
///
/// 1. Initial Setup (one time):
///    - Payer generates a fresh mint keypair
///    - Program creates the wrapped mint (9 decimals, same as lamports) with the
///      custody authority PDA as its mint authority
///    - Program creates the custody authority account at `["wrapper-authority"]`
///
/// 2. Wrap:
///    - User transfers native lamports to the custody authority
///    - Custody authority mints the same amount of wrapped tokens to the user's
///      associated token account (created on the fly if missing)
///
/// 3. Unwrap:
///    - User burns wrapped tokens from their associated token account
///    - Custody authority releases the same amount of lamports to the user
///
/// Custody is controlled by a PDA, never by a private key. Every wrapped token
/// is backed by a lamport held above the custody account's rent-exempt
/// reserve, and both legs of wrap/unwrap settle in the same transaction.
pub mod error;
pub mod events;
pub mod processor;
pub mod sdk;
pub mod state;

use account_structs::*;
use anchor_lang::prelude::*;

declare_id!("2Q8A2o2NkAeze9i38XJqMwdKNkygg52xK9HaXkSc539a");

#[program]
pub mod native_wrapper {
    use super::*;

    /// Creates the wrapped mint and the custody authority. Can only succeed once.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        processor::initialize(ctx)
    }

    /// Wraps native lamports 1:1:
    /// - Transfers `amount` lamports from the user into custody
    /// - Mints `amount` wrapped tokens to the user
    pub fn wrap(ctx: Context<Wrap>, amount: u64) -> Result<()> {
        processor::wrap(ctx, amount)
    }

    /// Unwraps wrapped tokens 1:1:
    /// - Burns `amount` wrapped tokens from the user
    /// - Releases `amount` lamports from custody to the user
    pub fn unwrap(ctx: Context<Unwrap>, amount: u64) -> Result<()> {
        processor::unwrap(ctx, amount)
    }

    pub fn check_solvency(ctx: Context<SolvencyView>) -> Result<u64> {
        processor::check_solvency(ctx)
    }
}
