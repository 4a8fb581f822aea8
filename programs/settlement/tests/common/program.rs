//! Runtime harness
//!
//! Registers the program as a builtin inside `solana-program-test` next to
//! the SPL token program, with a mint, a treasury, a funded trader and a
//! program data account naming `admin` as upgrade authority.

use anchor_lang::solana_program::account_info::AccountInfo;
use anchor_lang::solana_program::entrypoint::ProgramResult;
use anchor_lang::solana_program::program_pack::Pack;
use anchor_lang::{AccountDeserialize, AnchorDeserialize, InstructionData, ToAccountMetas};
use anchor_spl::token::spl_token;
use ed25519_dalek::{Signer as _, SigningKey};
use settlement::constants::{
    CONFIGURATION_REGISTRY_SEED, CONFIGURATION_REGISTRY_V2_SEED, DENY_LIST_REGISTRY_SEED,
    DENY_LIST_REGISTRY_V2_SEED, ENGINE_STATE_SEED, NATIVE_VAULT_SEED, UNIT,
};
use settlement::logic::{InitializeSystemParams, PriceAttestation};
use settlement::state::{ConfigurationInput, ConsumptionResult, FillsRegistry, LedgerHeader};
use settlement::ExecuteTradeParams;
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account,
    bpf_loader_upgradeable::{self, UpgradeableLoaderState},
    clock::Clock,
    instruction::{Instruction, InstructionError},
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction, system_program,
    transaction::{Transaction, TransactionError},
};

pub const TRADE_SIZE: u64 = 2 * UNIT;
pub const LEDGER_CAPACITY: u64 = 8;
pub const TOKEN_DECIMALS: u8 = 8;
pub const TRADER_TOKENS: u64 = 1_000 * UNIT;
/// 5% discount that never decays, so the ask does not depend on the slot
pub const MIN_DISCOUNT_BPS: u64 = 500;

fn process_instruction<'a, 'b, 'c, 'd>(
    program_id: &'a Pubkey,
    accounts: &'b [AccountInfo<'c>],
    data: &'d [u8],
) -> ProgramResult {
    // The Anchor entrypoint ties the slice lifetime to the account lifetime
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    settlement::entry(program_id, accounts, data)
}

pub fn pda(seed: &[u8]) -> Pubkey {
    Pubkey::find_program_address(&[seed], &settlement::ID).0
}

pub fn program_data_address() -> Pubkey {
    Pubkey::find_program_address(&[settlement::ID.as_ref()], &bpf_loader_upgradeable::id()).0
}

/// Custom program error carried by a failed transaction, if any
pub fn custom_error(error: &TransactionError) -> Option<u32> {
    match error {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(*code),
        _ => None,
    }
}

pub fn banks_error_code(error: BanksClientError) -> Option<u32> {
    custom_error(&error.unwrap())
}

/// Decode a drain result. The runtime trims trailing zero bytes from return data.
pub fn decode_consumption(mut return_data: Vec<u8>) -> ConsumptionResult {
    let encoded_len = 3 * std::mem::size_of::<u64>();
    return_data.resize(return_data.len().max(encoded_len), 0);
    ConsumptionResult::try_from_slice(&return_data).unwrap()
}

pub struct Harness {
    pub context: ProgramTestContext,
    pub oracle: SigningKey,
    pub admin: Keypair,
    pub trader: Keypair,
    pub fills_registry: Keypair,
    pub token_mint: Keypair,
    pub token_treasury: Keypair,
    pub trader_tokens: Keypair,
}

impl Harness {
    /// Start the runtime with every external account in place, before
    /// `initialize_system` has run
    pub async fn start() -> Self {
        let oracle = SigningKey::from_bytes(&[7u8; 32]);
        let admin = Keypair::new();
        let trader = Keypair::new();

        let mut program_test = ProgramTest::new(
            "settlement",
            settlement::ID,
            processor!(process_instruction),
        );
        program_test.prefer_bpf(false);
        program_test.set_compute_max_units(1_400_000);

        for wallet in [&admin, &trader] {
            program_test.add_account(
                wallet.pubkey(),
                Account {
                    lamports: 1_000 * LAMPORTS_PER_SOL,
                    owner: system_program::id(),
                    ..Account::default()
                },
            );
        }

        let program_data = UpgradeableLoaderState::ProgramData {
            slot: 0,
            upgrade_authority_address: Some(admin.pubkey()),
        };
        program_test.add_account(
            program_data_address(),
            Account::new_data(LAMPORTS_PER_SOL, &program_data, &bpf_loader_upgradeable::id())
                .unwrap(),
        );

        let context = program_test.start_with_context().await;
        let mut harness = Self {
            context,
            oracle,
            admin,
            trader,
            fills_registry: Keypair::new(),
            token_mint: Keypair::new(),
            token_treasury: Keypair::new(),
            trader_tokens: Keypair::new(),
        };
        harness.create_token_accounts().await;
        harness.create_fills_registry().await;
        harness
    }

    async fn create_token_accounts(&mut self) {
        let rent = self.context.banks_client.get_rent().await.unwrap();
        let payer = self.context.payer.pubkey();
        let mint = self.token_mint.pubkey();

        let create_mint = [
            system_instruction::create_account(
                &payer,
                &mint,
                rent.minimum_balance(spl_token::state::Mint::LEN),
                spl_token::state::Mint::LEN as u64,
                &spl_token::id(),
            ),
            spl_token::instruction::initialize_mint2(
                &spl_token::id(),
                &mint,
                &payer,
                None,
                TOKEN_DECIMALS,
            )
            .unwrap(),
        ];
        let mint_signer = self.token_mint.insecure_clone();
        self.process(&create_mint, &[&mint_signer]).await.unwrap();

        let owners = [
            (self.token_treasury.insecure_clone(), self.admin.pubkey()),
            (self.trader_tokens.insecure_clone(), self.trader.pubkey()),
        ];
        for (account, owner) in owners {
            let create_account = [
                system_instruction::create_account(
                    &payer,
                    &account.pubkey(),
                    rent.minimum_balance(spl_token::state::Account::LEN),
                    spl_token::state::Account::LEN as u64,
                    &spl_token::id(),
                ),
                spl_token::instruction::initialize_account3(
                    &spl_token::id(),
                    &account.pubkey(),
                    &mint,
                    &owner,
                )
                .unwrap(),
            ];
            self.process(&create_account, &[&account]).await.unwrap();
        }

        let mint_to = spl_token::instruction::mint_to(
            &spl_token::id(),
            &mint,
            &self.trader_tokens.pubkey(),
            &payer,
            &[],
            TRADER_TOKENS,
        )
        .unwrap();
        self.process(&[mint_to], &[]).await.unwrap();
    }

    async fn create_fills_registry(&mut self) {
        let rent = self.context.banks_client.get_rent().await.unwrap();
        let create = system_instruction::create_account(
            &self.context.payer.pubkey(),
            &self.fills_registry.pubkey(),
            rent.minimum_balance(FillsRegistry::LEN),
            FillsRegistry::LEN as u64,
            &settlement::ID,
        );
        let registry = self.fills_registry.insecure_clone();
        self.process(&[create], &[&registry]).await.unwrap();
    }

    // ------------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------------

    fn transaction(&self, instructions: &[Instruction], signers: &[&Keypair]) -> Transaction {
        let payer = &self.context.payer;
        let mut all: Vec<&Keypair> = vec![payer];
        all.extend_from_slice(signers);
        Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            all.as_slice(),
            self.context.last_blockhash,
        )
    }

    async fn refresh_blockhash(&mut self) {
        self.context.last_blockhash = self
            .context
            .banks_client
            .get_latest_blockhash()
            .await
            .unwrap();
    }

    pub async fn process(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<(), BanksClientError> {
        self.refresh_blockhash().await;
        let tx = self.transaction(instructions, signers);
        self.context.banks_client.process_transaction(tx).await
    }

    /// Process and return the program id and bytes of any return data
    pub async fn process_with_return_data(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Option<(Pubkey, Vec<u8>)>, TransactionError> {
        self.refresh_blockhash().await;
        let tx = self.transaction(instructions, signers);
        let outcome = self
            .context
            .banks_client
            .process_transaction_with_metadata(tx)
            .await
            .unwrap();
        outcome.result?;
        Ok(outcome
            .metadata
            .and_then(|metadata| metadata.return_data)
            .map(|return_data| (return_data.program_id, return_data.data)))
    }

    /// Simulate without committing; returns the outcome and the program logs
    pub async fn simulate(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> (Result<(), TransactionError>, Vec<String>) {
        self.refresh_blockhash().await;
        let tx = self.transaction(instructions, signers);
        let simulation = self.context.banks_client.simulate_transaction(tx).await.unwrap();
        let logs = simulation
            .simulation_details
            .map(|details| details.logs)
            .unwrap_or_default();
        (simulation.result.expect("transaction was not simulated"), logs)
    }

    // ------------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------------

    pub async fn clock(&mut self) -> Clock {
        self.context.banks_client.get_sysvar::<Clock>().await.unwrap()
    }

    pub async fn advance_slots(&mut self, slots: u64) -> Clock {
        let slot = self.clock().await.slot;
        self.context.warp_to_slot(slot + slots).unwrap();
        self.clock().await
    }

    pub fn attest(&self, price: u64, timestamp: i64) -> PriceAttestation {
        let message = format!("{}|{}", price, timestamp);
        PriceAttestation {
            price,
            timestamp,
            signature: self.oracle.sign(message.as_bytes()).to_bytes().to_vec(),
        }
    }

    // ------------------------------------------------------------------------
    // Instructions
    // ------------------------------------------------------------------------

    pub fn configuration(&self) -> ConfigurationInput {
        ConfigurationInput {
            oracle_pubkey: Pubkey::new_from_array(self.oracle.verifying_key().to_bytes()),
            trade_size: TRADE_SIZE,
            price_maximum_age: 60,
            coefficient: 0,
            min_discount_bps: MIN_DISCOUNT_BPS,
            max_discount_bps: 5_000,
        }
    }

    pub fn initialize_ix(&self, admin: &Pubkey) -> Instruction {
        let accounts = settlement::accounts::InitializeSystem {
            admin: *admin,
            engine_state: pda(ENGINE_STATE_SEED),
            configuration_registry: pda(CONFIGURATION_REGISTRY_SEED),
            deny_list_registry: pda(DENY_LIST_REGISTRY_SEED),
            fills_registry: self.fills_registry.pubkey(),
            native_vault: pda(NATIVE_VAULT_SEED),
            token_mint: self.token_mint.pubkey(),
            token_treasury: self.token_treasury.pubkey(),
            program_data: program_data_address(),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        };
        let args = settlement::instruction::InitializeSystem {
            params: InitializeSystemParams {
                configuration: self.configuration(),
                ledger_capacity: LEDGER_CAPACITY,
            },
        };
        Instruction {
            program_id: settlement::ID,
            accounts: accounts.to_account_metas(None),
            data: args.data(),
        }
    }

    /// Initialize as the upgrade authority and stock the vault
    pub async fn initialize(&mut self, vault_lamports: u64) {
        let admin = self.admin.insecure_clone();
        let ix = self.initialize_ix(&admin.pubkey());
        self.process(&[ix], &[&admin]).await.unwrap();

        let fund = system_instruction::transfer(
            &self.context.payer.pubkey(),
            &pda(NATIVE_VAULT_SEED),
            vault_lamports,
        );
        self.process(&[fund], &[]).await.unwrap();
    }

    pub fn trade_ix(&self, bid_price: u64, attestation: PriceAttestation) -> Instruction {
        let accounts = settlement::accounts::ExecuteTrade {
            trader: self.trader.pubkey(),
            engine_state: pda(ENGINE_STATE_SEED),
            configuration_registry: pda(CONFIGURATION_REGISTRY_SEED),
            deny_list_registry: pda(DENY_LIST_REGISTRY_SEED),
            fills_registry: self.fills_registry.pubkey(),
            native_vault: pda(NATIVE_VAULT_SEED),
            token_mint: self.token_mint.pubkey(),
            trader_token_account: self.trader_tokens.pubkey(),
            token_treasury: self.token_treasury.pubkey(),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        };
        let args = settlement::instruction::ExecuteTrade {
            params: ExecuteTradeParams {
                bid_price,
                attestation,
            },
        };
        Instruction {
            program_id: settlement::ID,
            accounts: accounts.to_account_metas(None),
            data: args.data(),
        }
    }

    pub fn consume_ix(&self, consumer: &Pubkey, max_native_budget: u64) -> Instruction {
        let accounts = settlement::accounts::ConsumeFills {
            consumer: *consumer,
            engine_state: pda(ENGINE_STATE_SEED),
            configuration_registry: pda(CONFIGURATION_REGISTRY_SEED),
            fills_registry: self.fills_registry.pubkey(),
        };
        let args = settlement::instruction::ConsumeFills { max_native_budget };
        Instruction {
            program_id: settlement::ID,
            accounts: accounts.to_account_metas(None),
            data: args.data(),
        }
    }

    fn configuration_admin(&self) -> settlement::accounts::ConfigurationAdmin {
        settlement::accounts::ConfigurationAdmin {
            authority: self.admin.pubkey(),
            engine_state: pda(ENGINE_STATE_SEED),
            configuration_registry: pda(CONFIGURATION_REGISTRY_SEED),
        }
    }

    pub fn set_fills_consumer_ix(&self, new_consumer: Pubkey) -> Instruction {
        let args = settlement::instruction::SetFillsConsumer { new_consumer };
        Instruction {
            program_id: settlement::ID,
            accounts: self.configuration_admin().to_account_metas(None),
            data: args.data(),
        }
    }

    pub fn add_dequeuer_ix(&self, dequeuer: Pubkey) -> Instruction {
        let args = settlement::instruction::AddDequeuer { dequeuer };
        Instruction {
            program_id: settlement::ID,
            accounts: self.configuration_admin().to_account_metas(None),
            data: args.data(),
        }
    }

    pub fn migrate_ix(&self) -> Instruction {
        let accounts = settlement::accounts::MigrateLayout {
            admin: self.admin.pubkey(),
            engine_state: pda(ENGINE_STATE_SEED),
            configuration_registry: pda(CONFIGURATION_REGISTRY_SEED),
            deny_list_registry: pda(DENY_LIST_REGISTRY_SEED),
            configuration_registry_v2: pda(CONFIGURATION_REGISTRY_V2_SEED),
            deny_list_registry_v2: pda(DENY_LIST_REGISTRY_V2_SEED),
            system_program: system_program::id(),
        };
        Instruction {
            program_id: settlement::ID,
            accounts: accounts.to_account_metas(None),
            data: settlement::instruction::MigrateLayout {}.data(),
        }
    }

    pub fn rollback_ix(&self) -> Instruction {
        let accounts = settlement::accounts::RollbackLayout {
            admin: self.admin.pubkey(),
            engine_state: pda(ENGINE_STATE_SEED),
            configuration_registry_v2: pda(CONFIGURATION_REGISTRY_V2_SEED),
            deny_list_registry_v2: pda(DENY_LIST_REGISTRY_V2_SEED),
            configuration_registry: pda(CONFIGURATION_REGISTRY_SEED),
            deny_list_registry: pda(DENY_LIST_REGISTRY_SEED),
            system_program: system_program::id(),
        };
        Instruction {
            program_id: settlement::ID,
            accounts: accounts.to_account_metas(None),
            data: settlement::instruction::RollbackLayout {}.data(),
        }
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub async fn account_exists(&mut self, address: Pubkey) -> bool {
        self.context
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .is_some()
    }

    pub async fn account<T: AccountDeserialize>(&mut self, address: Pubkey) -> T {
        let account = self
            .context
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .expect("account not found");
        T::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    pub async fn lamports(&mut self, address: Pubkey) -> u64 {
        self.context
            .banks_client
            .get_balance(address)
            .await
            .unwrap()
    }

    pub async fn token_balance(&mut self, address: Pubkey) -> u64 {
        let account = self
            .context
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .expect("token account not found");
        spl_token::state::Account::unpack(&account.data).unwrap().amount
    }

    pub async fn ledger_header(&mut self) -> LedgerHeader {
        let account = self
            .context
            .banks_client
            .get_account(self.fills_registry.pubkey())
            .await
            .unwrap()
            .expect("fills registry not found");
        let start = 8;
        let end = start + std::mem::size_of::<LedgerHeader>();
        bytemuck::pod_read_unaligned(&account.data[start..end])
    }
}
