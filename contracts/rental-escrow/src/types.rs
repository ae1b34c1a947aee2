//! Core data types for the rental escrow contract.

use soroban_sdk::{contracttype, Address};

/// How the collateral was finally resolved.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Settlement {
    /// Collateral still locked, or never deposited.
    Pending = 0,
    /// Owner confirmed the asset came back before expiration; collateral went to the borrower.
    Returned = 1,
    /// Deadline passed without a return; collateral forfeited to the owner.
    Claimed = 2,
}

/// Lifecycle position of an agreement, derived from its flags.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AgreementStatus {
    Created = 0,
    Funded = 1,
    Returned = 2,
    Claimed = 3,
}

#[soroban_sdk::contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum EscrowError {
    InvalidExpiration = 1,
    AlreadyFunded = 2,
    IncorrectDeposit = 3,
    NotOwner = 4,
    NotBorrower = 5,
    NotYetFunded = 6,
    AlreadySettled = 7,
    Expired = 8,
    NotYetExpired = 9,
    TransferFailed = 10,
    NotInitialized = 11,
    AlreadyInitialized = 12,
    InvalidAmount = 13,
    Overflow = 14,
    Reentrancy = 15,
}

/// Stored state of the single rental governed by a contract instance.
///
/// * `borrower` – unset until funding, then fixed for the rest of the lifecycle.
/// * `fee_amount` / `collateral_amount` – only ever change by being zeroed on release.
/// * `settlement` – which terminal transition happened; `Pending` until then.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RentalAgreement {
    pub owner: Address,
    pub borrower: Option<Address>,
    pub fee_amount: i128,
    pub collateral_amount: i128,
    /// Ledger timestamp (seconds) at which the rental period ends.
    pub expiration: u64,
    pub is_funded: bool,
    pub is_collateral_locked: bool,
    pub settlement: Settlement,
}
