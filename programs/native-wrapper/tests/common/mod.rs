//! Common test utilities for the native wrapper tests

use anchor_lang::error::ERROR_CODE_OFFSET;
use anchor_lang::prelude::{AccountInfo, Pubkey};
use anchor_lang::solana_program::entrypoint::ProgramResult;
use anchor_lang::solana_program::system_instruction;
use anchor_lang::AccountDeserialize;
use anchor_spl::token::{Mint, TokenAccount};
use native_wrapper::error::CustomErrorCode;
use native_wrapper::sdk;
use native_wrapper::state::{find_custody_authority, CustodyAuthority};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    instruction::{Instruction, InstructionError},
    rent::Rent,
    signature::Keypair,
    signer::Signer,
    transaction::{Transaction, TransactionError},
};

pub const LAMPORTS_PER_XNT: u64 = 1_000_000_000;

// Anchor's entrypoint ties the account slice and its elements to one lifetime,
// which the native processor signature can't express.
fn process_instruction(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    native_wrapper::entry(program_id, accounts, data)
}

/// Test context for native wrapper tests
pub struct TestContext {
    pub ctx: ProgramTestContext,
    pub mint: Keypair,
    pub rent: Rent,
}

impl TestContext {
    /// Starts a bank with the wrapper loaded natively (SPL Token and the
    /// associated token program come bundled) without initializing it.
    pub async fn new() -> anyhow::Result<Self> {
        let mut program_test = ProgramTest::new(
            "native_wrapper",
            native_wrapper::ID,
            processor!(process_instruction),
        );
        program_test.prefer_bpf(false);
        let mut ctx = program_test.start_with_context().await;
        let rent = ctx.banks_client.get_rent().await?;
        Ok(Self {
            ctx,
            mint: Keypair::new(),
            rent,
        })
    }

    /// Started and initialized with `self.mint`.
    pub async fn initialized() -> anyhow::Result<Self> {
        let mut test = Self::new().await?;
        let payer = test.ctx.payer.pubkey();
        let mint = test.mint.insecure_clone();
        test.send(
            &[sdk::initialize_ix(&native_wrapper::ID, &mint.pubkey(), &payer)],
            &[&mint],
        )
        .await
        .map_err(|e| anyhow::anyhow!("initialize failed: {:?}", e))?;
        Ok(test)
    }

    /// Sends `instructions` with the context payer paying fees, so signers
    /// other than the payer see no fee deductions.
    pub async fn send(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<(), BanksClientError> {
        let blockhash = self
            .ctx
            .get_new_latest_blockhash()
            .await
            .map_err(BanksClientError::from)?;
        let mut all_signers = vec![&self.ctx.payer];
        all_signers.extend_from_slice(signers);
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.ctx.payer.pubkey()),
            &all_signers,
            blockhash,
        );
        self.ctx.banks_client.process_transaction(tx).await
    }

    /// Creates a system account holding `lamports`.
    pub async fn funded_user(&mut self, lamports: u64) -> anyhow::Result<Keypair> {
        let user = Keypair::new();
        let payer = self.ctx.payer.pubkey();
        self.send(
            &[system_instruction::transfer(&payer, &user.pubkey(), lamports)],
            &[],
        )
        .await
        .map_err(|e| anyhow::anyhow!("funding failed: {:?}", e))?;
        Ok(user)
    }

    pub async fn wrap(&mut self, user: &Keypair, amount: u64) -> Result<(), BanksClientError> {
        let ix = sdk::wrap_ix(&native_wrapper::ID, &self.mint.pubkey(), &user.pubkey(), amount);
        self.send(&[ix], &[user]).await
    }

    pub async fn unwrap(&mut self, user: &Keypair, amount: u64) -> Result<(), BanksClientError> {
        let ix = sdk::unwrap_ix(&native_wrapper::ID, &self.mint.pubkey(), &user.pubkey(), amount);
        self.send(&[ix], &[user]).await
    }

    pub fn custody_address(&self) -> Pubkey {
        find_custody_authority(&native_wrapper::ID).0
    }

    pub fn custody_reserve(&self) -> u64 {
        self.rent.minimum_balance(CustodyAuthority::LEN)
    }

    pub async fn lamports(&mut self, address: &Pubkey) -> anyhow::Result<u64> {
        Ok(self.ctx.banks_client.get_balance(*address).await?)
    }

    pub async fn custody_lamports(&mut self) -> anyhow::Result<u64> {
        let custody = self.custody_address();
        self.lamports(&custody).await
    }

    pub async fn custody_state(&mut self) -> anyhow::Result<CustodyAuthority> {
        let custody = self.custody_address();
        self.load(&custody).await
    }

    pub async fn mint_state(&mut self) -> anyhow::Result<Mint> {
        let mint = self.mint.pubkey();
        self.load(&mint).await
    }

    pub async fn token_balance(&mut self, user: &Pubkey) -> anyhow::Result<u64> {
        let ata = sdk::user_token_account(user, &self.mint.pubkey());
        let account: TokenAccount = self.load(&ata).await?;
        Ok(account.amount)
    }

    async fn load<T: AccountDeserialize>(&mut self, address: &Pubkey) -> anyhow::Result<T> {
        let account = self
            .ctx
            .banks_client
            .get_account(*address)
            .await?
            .ok_or_else(|| anyhow::anyhow!("account {} not found", address))?;
        T::try_deserialize(&mut account.data.as_slice())
            .map_err(|e| anyhow::anyhow!("account {} did not deserialize: {}", address, e))
    }
}

/// On-chain code of a program error.
pub fn error_code(code: CustomErrorCode) -> u32 {
    code as u32 + ERROR_CODE_OFFSET
}

/// Custom code carried by a failed transaction's first failing instruction.
pub fn custom_error(err: &BanksClientError) -> Option<u32> {
    match err.unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(code),
        _ => None,
    }
}
