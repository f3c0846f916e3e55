//! End-to-end deposit/withdraw flow against a live BanksClient runtime.

use anchor_lang::{InstructionData, ToAccountMetas};
use flashvault::constants::{ACCOUNT_INDEX_SEED, ENGINE_SEED, POOL_SEED, POSITION_SEED, VAULT_SEED};
use solana_program_test::{processor, BanksClient, ProgramTest};
use solana_sdk::{
    instruction::Instruction,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_program,
    transaction::Transaction,
};

struct Env {
    banks_client: BanksClient,
    payer: Keypair,
    recent_blockhash: solana_sdk::hash::Hash,
}

async fn setup() -> Env {
    let program_test = ProgramTest::new("flashvault", flashvault::ID, processor!(flashvault::entry));
    let (banks_client, payer, recent_blockhash) = program_test.start().await;
    Env { banks_client, payer, recent_blockhash }
}

fn engine_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ENGINE_SEED], &flashvault::ID)
}

fn pool_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_SEED, mint.as_ref()], &flashvault::ID)
}

fn vault_pda(pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, pool.as_ref()], &flashvault::ID)
}

fn position_pda(pool: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POSITION_SEED, pool.as_ref(), owner.as_ref()], &flashvault::ID)
}

fn account_index_pda(owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ACCOUNT_INDEX_SEED, owner.as_ref()], &flashvault::ID)
}

async fn send(env: &mut Env, ix: Instruction, signers: &[&Keypair]) {
    let mut all_signers = vec![&env.payer];
    all_signers.extend_from_slice(signers);
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&env.payer.pubkey()),
        &all_signers,
        env.recent_blockhash,
    );
    env.banks_client.process_transaction(tx).await.expect("transaction should succeed");
}

async fn create_mint(env: &mut Env, mint: &Keypair, authority: &Pubkey, decimals: u8) {
    let rent = env.banks_client.get_rent().await.unwrap();
    let space = spl_token::state::Mint::LEN;
    let create_ix = solana_sdk::system_instruction::create_account(
        &env.payer.pubkey(),
        &mint.pubkey(),
        rent.minimum_balance(space),
        space as u64,
        &spl_token::id(),
    );
    let init_ix = spl_token::instruction::initialize_mint(&spl_token::id(), &mint.pubkey(), authority, None, decimals).unwrap();
    let tx = Transaction::new_signed_with_payer(
        &[create_ix, init_ix],
        Some(&env.payer.pubkey()),
        &[&env.payer, mint],
        env.recent_blockhash,
    );
    env.banks_client.process_transaction(tx).await.unwrap();
}

async fn create_token_account(env: &mut Env, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    let account = Keypair::new();
    let rent = env.banks_client.get_rent().await.unwrap();
    let space = spl_token::state::Account::LEN;
    let create_ix = solana_sdk::system_instruction::create_account(
        &env.payer.pubkey(),
        &account.pubkey(),
        rent.minimum_balance(space),
        space as u64,
        &spl_token::id(),
    );
    let init_ix = spl_token::instruction::initialize_account(&spl_token::id(), &account.pubkey(), mint, owner).unwrap();
    let tx = Transaction::new_signed_with_payer(
        &[create_ix, init_ix],
        Some(&env.payer.pubkey()),
        &[&env.payer, &account],
        env.recent_blockhash,
    );
    env.banks_client.process_transaction(tx).await.unwrap();
    account.pubkey()
}

async fn mint_to(env: &mut Env, mint: &Pubkey, mint_authority: &Keypair, destination: &Pubkey, amount: u64) {
    let ix = spl_token::instruction::mint_to(&spl_token::id(), mint, destination, &mint_authority.pubkey(), &[], amount).unwrap();
    send(env, ix, &[mint_authority]).await;
}

async fn token_balance(env: &mut Env, account: &Pubkey) -> u64 {
    let data = env.banks_client.get_account(*account).await.unwrap().unwrap().data;
    spl_token::state::Account::unpack(&data).unwrap().amount
}

#[tokio::test]
async fn deposit_then_full_withdraw_returns_principal() {
    let mut env = setup().await;

    let owner = Keypair::new();
    let depositor = Keypair::new();
    let mint_authority = Keypair::new();
    let mint = Keypair::new();

    let (engine, _) = engine_pda();
    let init_ix = Instruction {
        program_id: flashvault::ID,
        accounts: flashvault::accounts::Initialize {
            owner: owner.pubkey(),
            engine,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: flashvault::instruction::Initialize { management_fee_percentage: 100 }.data(),
    };
    send(&mut env, init_ix, &[&owner]).await;

    create_mint(&mut env, &mint, &mint_authority.pubkey(), 6).await;
    let depositor_ata = create_token_account(&mut env, &depositor.pubkey(), &mint.pubkey()).await;
    mint_to(&mut env, &mint.pubkey(), &mint_authority, &depositor_ata, 1_000_000).await;

    let (pool, _) = pool_pda(&mint.pubkey());
    let (vault, _) = vault_pda(&pool);
    let (position, _) = position_pda(&pool, &depositor.pubkey());
    let (account_index, _) = account_index_pda(&depositor.pubkey());

    let deposit_ix = Instruction {
        program_id: flashvault::ID,
        accounts: flashvault::accounts::Deposit {
            depositor: depositor.pubkey(),
            engine,
            asset_mint: mint.pubkey(),
            pool,
            vault,
            position,
            account_index,
            depositor_asset_account: depositor_ata,
            token_program: spl_token::id(),
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: flashvault::instruction::Deposit { amount: 500_000 }.data(),
    };
    send(&mut env, deposit_ix, &[&depositor]).await;

    assert_eq!(token_balance(&mut env, &vault).await, 500_000);
    assert_eq!(token_balance(&mut env, &depositor_ata).await, 500_000);

    let withdraw_ix = Instruction {
        program_id: flashvault::ID,
        accounts: flashvault::accounts::Withdraw {
            withdrawer: depositor.pubkey(),
            asset_mint: mint.pubkey(),
            pool,
            vault,
            position,
            account_index,
            withdrawer_asset_account: depositor_ata,
            token_program: spl_token::id(),
        }
        .to_account_metas(None),
        data: flashvault::instruction::Withdraw {}.data(),
    };
    send(&mut env, withdraw_ix, &[&depositor]).await;

    assert_eq!(token_balance(&mut env, &vault).await, 0);
    assert_eq!(token_balance(&mut env, &depositor_ata).await, 1_000_000);
}
