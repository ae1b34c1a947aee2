//! Event types and topic constants for the rental escrow contract.
//! Every payload is published under the `rental` topic namespace.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const RENTAL: Symbol = symbol_short!("rental");

/// Emitted once by `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AgreementCreatedEvent {
    pub owner: Address,
    pub collateral: i128,
    pub fee: i128,
    pub expiration: u64,
}

/// Emitted when the borrower deposits fee plus collateral.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundedEvent {
    pub borrower: Address,
    pub total_amount: i128,
}

/// Emitted on every successful `withdraw_fee`, including zero-value repeats.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeWithdrawnEvent {
    pub owner: Address,
    pub fee_amount: i128,
}

/// Emitted when collateral is refunded to the borrower.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralReturnedEvent {
    pub borrower: Address,
    pub collateral_amount: i128,
}

/// Emitted when the owner claims forfeited collateral.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralClaimedEvent {
    pub owner: Address,
    pub collateral_amount: i128,
}

pub fn publish_agreement_created(env: &Env, event: AgreementCreatedEvent) {
    env.events().publish((RENTAL, symbol_short!("created")), event);
}

pub fn publish_funded(env: &Env, event: FundedEvent) {
    env.events().publish((RENTAL, symbol_short!("funded")), event);
}

pub fn publish_fee_withdrawn(env: &Env, event: FeeWithdrawnEvent) {
    env.events().publish((RENTAL, symbol_short!("fee_wd")), event);
}

pub fn publish_collateral_returned(env: &Env, event: CollateralReturnedEvent) {
    env.events().publish((RENTAL, symbol_short!("returned")), event);
}

pub fn publish_collateral_claimed(env: &Env, event: CollateralClaimedEvent) {
    env.events().publish((RENTAL, symbol_short!("claimed")), event);
}
