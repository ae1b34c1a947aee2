#![no_std]

//! Rental escrow contract: an owner rents out an off-chain asset, the borrower
//! deposits fee plus collateral, and the owner later either returns the
//! collateral (before expiration) or claims it (at or after expiration).
//!
//! One contract instance governs exactly one agreement.
//!
//! # Release protocol
//! Every entry point that moves value writes the updated agreement (zeroed
//! balance, unlocked flag) to storage before calling the token contract. A
//! rejected transfer surfaces as [`EscrowError::TransferFailed`]; because the
//! invocation then returns an error, the host discards the earlier write, so
//! the call is all-or-nothing. A reentrancy guard flag additionally rejects
//! any nested call into a value-moving entry point.

#[cfg(test)]
extern crate std;

mod agreement;
mod events;
mod types;

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol};

use events::{
    publish_agreement_created, publish_collateral_claimed, publish_collateral_returned,
    publish_fee_withdrawn, publish_funded, AgreementCreatedEvent, CollateralClaimedEvent,
    CollateralReturnedEvent, FeeWithdrawnEvent, FundedEvent,
};
pub use types::{AgreementStatus, EscrowError, RentalAgreement, Settlement};

/// Instance TTL bump threshold (in ledgers, ~30 days at 5s per ledger).
const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
/// Instance TTL extension (~60 days). Keeps a settled agreement queryable.
const INSTANCE_TTL_EXTEND: u32 = 1_036_800;

/// Instance storage key for reentrancy guard.
fn reentrancy_key(env: &Env) -> Symbol {
    Symbol::new(env, "reentrancy")
}

/// Instance storage key for the agreement record.
fn agreement_key(env: &Env) -> Symbol {
    Symbol::new(env, "agreement")
}

/// Instance storage key for the deposit token address.
fn token_key(env: &Env) -> Symbol {
    Symbol::new(env, "token")
}

fn load_agreement(env: &Env) -> Result<RentalAgreement, EscrowError> {
    env.storage()
        .instance()
        .get(&agreement_key(env))
        .ok_or(EscrowError::NotInitialized)
}

fn save_agreement(env: &Env, agreement: &RentalAgreement) {
    env.storage().instance().set(&agreement_key(env), agreement);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn load_token(env: &Env) -> Result<Address, EscrowError> {
    env.storage()
        .instance()
        .get(&token_key(env))
        .ok_or(EscrowError::NotInitialized)
}

fn set_reentrancy_guard(env: &Env) -> Result<(), EscrowError> {
    let key = reentrancy_key(env);
    let current: bool = env.storage().instance().get(&key).unwrap_or(false);
    if current {
        return Err(EscrowError::Reentrancy);
    }
    env.storage().instance().set(&key, &true);
    Ok(())
}

fn clear_reentrancy_guard(env: &Env) {
    env.storage().instance().set(&reentrancy_key(env), &false);
}

/// Run `f` with the reentrancy guard held. On error the host rolls the guard
/// write back together with everything else.
fn guarded<T>(
    env: &Env,
    f: impl FnOnce() -> Result<T, EscrowError>,
) -> Result<T, EscrowError> {
    set_reentrancy_guard(env)?;
    let result = f()?;
    clear_reentrancy_guard(env);
    Ok(result)
}

/// Move `amount` of the deposit token. Zero amounts are a no-op.
fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), EscrowError> {
    if amount == 0 {
        return Ok(());
    }
    let token_client = token::Client::new(env, &load_token(env)?);
    match token_client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(EscrowError::TransferFailed),
    }
}

#[contract]
pub struct RentalEscrow;

#[contractimpl]
impl RentalEscrow {
    /// Create the agreement. `owner` becomes the only identity allowed to
    /// withdraw the fee and settle the collateral.
    ///
    /// # Errors
    /// * `AlreadyInitialized` – the instance already holds an agreement
    /// * `InvalidAmount` – `fee` or `collateral` is negative
    /// * `InvalidExpiration` – `expiration` is not strictly after the ledger time
    /// * `Overflow` – `fee + collateral` does not fit in `i128`
    pub fn init(
        env: Env,
        owner: Address,
        token: Address,
        fee: i128,
        collateral: i128,
        expiration: u64,
    ) -> Result<(), EscrowError> {
        owner.require_auth();

        if env.storage().instance().has(&agreement_key(&env)) {
            return Err(EscrowError::AlreadyInitialized);
        }

        let now = env.ledger().timestamp();
        let agreement = RentalAgreement::new(owner.clone(), fee, collateral, expiration, now)?;

        env.storage().instance().set(&token_key(&env), &token);
        save_agreement(&env, &agreement);

        publish_agreement_created(
            &env,
            AgreementCreatedEvent {
                owner,
                collateral,
                fee,
                expiration,
            },
        );
        Ok(())
    }

    /// Deposit exactly `fee + collateral` and become the borrower.
    ///
    /// # Errors
    /// * `AlreadyFunded` – a deposit was already accepted
    /// * `IncorrectDeposit` – `amount` differs from `fee + collateral`
    /// * `TransferFailed` – the token contract rejected the pull from `borrower`
    pub fn fund(env: Env, borrower: Address, amount: i128) -> Result<(), EscrowError> {
        borrower.require_auth();

        guarded(&env, || {
            let mut agreement = load_agreement(&env)?;
            let total = agreement.record_funding(borrower.clone(), amount)?;
            save_agreement(&env, &agreement);

            transfer(&env, &borrower, &env.current_contract_address(), total)?;

            publish_funded(
                &env,
                FundedEvent {
                    borrower: borrower.clone(),
                    total_amount: total,
                },
            );
            Ok(())
        })
    }

    /// Pay the fee out to the owner. Later calls succeed and move nothing.
    ///
    /// # Errors
    /// * `NotOwner`, `NotYetFunded`, `TransferFailed`
    pub fn withdraw_fee(env: Env, caller: Address) -> Result<(), EscrowError> {
        caller.require_auth();

        guarded(&env, || {
            let mut agreement = load_agreement(&env)?;
            let fee = agreement.take_fee(&caller)?;
            save_agreement(&env, &agreement);

            transfer(&env, &env.current_contract_address(), &agreement.owner, fee)?;

            publish_fee_withdrawn(
                &env,
                FeeWithdrawnEvent {
                    owner: agreement.owner,
                    fee_amount: fee,
                },
            );
            Ok(())
        })
    }

    /// Refund the collateral to the borrower. Only before expiration.
    ///
    /// # Errors
    /// Checked in this order:
    /// * `NotOwner` – `caller` is not the owner
    /// * `NotYetFunded` – no deposit yet; reported ahead of `AlreadySettled`
    /// * `AlreadySettled` – collateral already returned or claimed
    /// * `Expired` – ledger time is at or past expiration
    /// * `TransferFailed` – the borrower's balance rejected the refund
    pub fn return_collateral(env: Env, caller: Address) -> Result<(), EscrowError> {
        caller.require_auth();

        guarded(&env, || {
            let now = env.ledger().timestamp();
            let mut agreement = load_agreement(&env)?;
            let (borrower, amount) = agreement.settle_returned(&caller, now)?;
            save_agreement(&env, &agreement);

            transfer(&env, &env.current_contract_address(), &borrower, amount)?;

            publish_collateral_returned(
                &env,
                CollateralReturnedEvent {
                    borrower,
                    collateral_amount: amount,
                },
            );
            Ok(())
        })
    }

    /// Forfeit the collateral to the owner. Only at or after expiration.
    ///
    /// # Errors
    /// Checked in this order:
    /// * `NotOwner` – `caller` is not the owner
    /// * `NotYetFunded` – no deposit yet; reported ahead of `AlreadySettled`
    /// * `AlreadySettled` – collateral already returned or claimed
    /// * `NotYetExpired` – ledger time is before expiration
    /// * `TransferFailed` – the owner's balance rejected the payout
    pub fn claim_collateral(env: Env, caller: Address) -> Result<(), EscrowError> {
        caller.require_auth();

        guarded(&env, || {
            let now = env.ledger().timestamp();
            let mut agreement = load_agreement(&env)?;
            let amount = agreement.settle_claimed(&caller, now)?;
            save_agreement(&env, &agreement);

            transfer(&env, &env.current_contract_address(), &agreement.owner, amount)?;

            publish_collateral_claimed(
                &env,
                CollateralClaimedEvent {
                    owner: agreement.owner,
                    collateral_amount: amount,
                },
            );
            Ok(())
        })
    }

    pub fn get_owner(env: Env) -> Result<Address, EscrowError> {
        Ok(load_agreement(&env)?.owner)
    }

    /// `None` until the agreement is funded.
    pub fn get_borrower(env: Env) -> Result<Option<Address>, EscrowError> {
        Ok(load_agreement(&env)?.borrower)
    }

    pub fn get_fee(env: Env) -> Result<i128, EscrowError> {
        Ok(load_agreement(&env)?.fee_amount)
    }

    pub fn get_collateral(env: Env) -> Result<i128, EscrowError> {
        Ok(load_agreement(&env)?.collateral_amount)
    }

    pub fn get_expiration(env: Env) -> Result<u64, EscrowError> {
        Ok(load_agreement(&env)?.expiration)
    }

    pub fn is_funded(env: Env) -> Result<bool, EscrowError> {
        Ok(load_agreement(&env)?.is_funded)
    }

    pub fn is_collateral_locked(env: Env) -> Result<bool, EscrowError> {
        Ok(load_agreement(&env)?.is_collateral_locked)
    }

    pub fn get_token(env: Env) -> Result<Address, EscrowError> {
        load_token(&env)
    }

    /// Full agreement record (view function).
    pub fn get_agreement(env: Env) -> Result<RentalAgreement, EscrowError> {
        load_agreement(&env)
    }

    pub fn get_status(env: Env) -> Result<AgreementStatus, EscrowError> {
        Ok(load_agreement(&env)?.status())
    }
}
