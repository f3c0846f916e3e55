//! End-to-end flash loan across both programs: flashvault lends to a
//! loan_executor Executor PDA, which runs a one-step script and repays
//! the loan plus fees out of its own pre-funded token account.

use anchor_lang::{InstructionData, ToAccountMetas};
use flashvault::constants::{ACCOUNT_INDEX_SEED, ENGINE_SEED, POOL_SEED, POSITION_SEED, VAULT_SEED};
use loan_executor::constants::EXECUTOR_SEED;
use loan_executor::state::{Operation, OperationAccountMeta};
use solana_program_test::{processor, BanksClient, ProgramTest};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction, system_program,
    transaction::Transaction,
};

struct Env {
    banks_client: BanksClient,
    payer: Keypair,
    recent_blockhash: solana_sdk::hash::Hash,
}

async fn setup() -> Env {
    let mut program_test = ProgramTest::new("flashvault", flashvault::ID, processor!(flashvault::entry));
    program_test.add_program("loan_executor", loan_executor::ID, processor!(loan_executor::entry));
    let (banks_client, payer, recent_blockhash) = program_test.start().await;
    Env { banks_client, payer, recent_blockhash }
}

async fn send(env: &mut Env, ix: Instruction, signers: &[&Keypair]) {
    let mut all_signers = vec![&env.payer];
    all_signers.extend_from_slice(signers);
    let tx = Transaction::new_signed_with_payer(&[ix], Some(&env.payer.pubkey()), &all_signers, env.recent_blockhash);
    env.banks_client.process_transaction(tx).await.expect("transaction should succeed");
}

async fn create_mint(env: &mut Env, mint: &Keypair, authority: &Pubkey) {
    let rent = env.banks_client.get_rent().await.unwrap();
    let space = spl_token::state::Mint::LEN;
    let create_ix = system_instruction::create_account(
        &env.payer.pubkey(),
        &mint.pubkey(),
        rent.minimum_balance(space),
        space as u64,
        &spl_token::id(),
    );
    let init_ix = spl_token::instruction::initialize_mint(&spl_token::id(), &mint.pubkey(), authority, None, 6).unwrap();
    let tx = Transaction::new_signed_with_payer(&[create_ix, init_ix], Some(&env.payer.pubkey()), &[&env.payer, mint], env.recent_blockhash);
    env.banks_client.process_transaction(tx).await.unwrap();
}

async fn create_token_account(env: &mut Env, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    let account = Keypair::new();
    let rent = env.banks_client.get_rent().await.unwrap();
    let space = spl_token::state::Account::LEN;
    let create_ix = system_instruction::create_account(
        &env.payer.pubkey(),
        &account.pubkey(),
        rent.minimum_balance(space),
        space as u64,
        &spl_token::id(),
    );
    let init_ix = spl_token::instruction::initialize_account(&spl_token::id(), &account.pubkey(), mint, owner).unwrap();
    let tx = Transaction::new_signed_with_payer(&[create_ix, init_ix], Some(&env.payer.pubkey()), &[&env.payer, &account], env.recent_blockhash);
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
async fn borrower_runs_a_script_and_repays_the_loan_with_fees() {
    let mut env = setup().await;

    let engine_owner = Keypair::new();
    let depositor = Keypair::new();
    let borrower = Keypair::new();
    let mint_authority = Keypair::new();
    let mint = Keypair::new();

    let (engine, _) = Pubkey::find_program_address(&[ENGINE_SEED], &flashvault::ID);
    let init_ix = Instruction {
        program_id: flashvault::ID,
        accounts: flashvault::accounts::Initialize {
            owner: engine_owner.pubkey(),
            engine,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: flashvault::instruction::Initialize { management_fee_percentage: 100 }.data(),
    };
    send(&mut env, init_ix, &[&engine_owner]).await;

    create_mint(&mut env, &mint, &mint_authority.pubkey()).await;

    // Seed the pool with liquidity far beyond what the borrower takes out.
    let depositor_ata = create_token_account(&mut env, &depositor.pubkey(), &mint.pubkey()).await;
    mint_to(&mut env, &mint.pubkey(), &mint_authority, &depositor_ata, 10_000_000).await;

    let (pool, _) = Pubkey::find_program_address(&[POOL_SEED, mint.pubkey().as_ref()], &flashvault::ID);
    let (vault, _) = Pubkey::find_program_address(&[VAULT_SEED, pool.as_ref()], &flashvault::ID);
    let (position, _) = Pubkey::find_program_address(&[POSITION_SEED, pool.as_ref(), depositor.pubkey().as_ref()], &flashvault::ID);
    let (account_index, _) = Pubkey::find_program_address(&[ACCOUNT_INDEX_SEED, depositor.pubkey().as_ref()], &flashvault::ID);

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
        data: flashvault::instruction::Deposit { amount: 10_000_000 }.data(),
    };
    send(&mut env, deposit_ix, &[&depositor]).await;

    // Set the executor up and pre-fund it so it can cover the flash-loan fee.
    let (executor, _) = Pubkey::find_program_address(&[EXECUTOR_SEED, borrower.pubkey().as_ref()], &loan_executor::ID);
    let init_executor_ix = Instruction {
        program_id: loan_executor::ID,
        accounts: loan_executor::accounts::InitializeExecutor {
            owner: borrower.pubkey(),
            executor,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: loan_executor::instruction::InitializeExecutor {}.data(),
    };
    send(&mut env, init_executor_ix, &[&borrower]).await;

    let executor_asset_account = create_token_account(&mut env, &executor, &mint.pubkey()).await;
    mint_to(&mut env, &mint.pubkey(), &mint_authority, &executor_asset_account, 1_000).await;

    // One-step no-op script: a zero-lamport self-transfer that only exists
    // to prove a script operation executes inside the callback.
    let transfer_ix = system_instruction::transfer(&borrower.pubkey(), &borrower.pubkey(), 0);
    let script = vec![Operation {
        target: system_program::ID,
        account_metas: vec![
            OperationAccountMeta { pubkey: borrower.pubkey(), is_signer: true, is_writable: true },
            OperationAccountMeta { pubkey: borrower.pubkey(), is_signer: true, is_writable: true },
        ],
        data: transfer_ix.data,
        value: 0,
    }];

    let amount: u64 = 1_000_000;
    let execute_ix = Instruction {
        program_id: loan_executor::ID,
        accounts: {
            let mut metas = loan_executor::accounts::ExecuteFlashLoan {
                owner: borrower.pubkey(),
                executor,
                flashvault_program: flashvault::ID,
                loan_executor_program: loan_executor::ID,
                engine,
                asset_mint: mint.pubkey(),
                pool,
                vault,
                executor_asset_account,
                token_program: spl_token::id(),
            }
            .to_account_metas(None);
            metas.push(AccountMeta::new_readonly(executor, false));
            metas.push(AccountMeta::new(executor_asset_account, false));
            metas.push(AccountMeta::new(vault, false));
            metas.push(AccountMeta::new_readonly(spl_token::id(), false));
            metas.push(AccountMeta::new(borrower.pubkey(), true));
            metas
        },
        data: loan_executor::instruction::ExecuteFlashLoan { amount, script }.data(),
    };
    send(&mut env, execute_ix, &[&borrower]).await;

    // lp_fee = 1_000_000 * 1 / 10_000 = 100, mgmt_fee = 1_000_000 * 1 * 100 / 100_000_000 = 1
    assert_eq!(token_balance(&mut env, &executor_asset_account).await, 1_000 - 101);
    assert_eq!(token_balance(&mut env, &vault).await, 10_000_000 + 101);
}
