//! Guarded transitions of a single rental agreement.
//!
//! Everything here is pure: no storage, no token calls, and the current time
//! is always passed in. The contract layer loads the agreement, applies one of
//! these transitions, persists the result and only then moves value.

use soroban_sdk::Address;

use crate::types::{AgreementStatus, EscrowError, RentalAgreement, Settlement};

impl RentalAgreement {
    /// Build a fresh, unfunded agreement owned by `owner`.
    pub fn new(
        owner: Address,
        fee: i128,
        collateral: i128,
        expiration: u64,
        now: u64,
    ) -> Result<Self, EscrowError> {
        if fee < 0 || collateral < 0 {
            return Err(EscrowError::InvalidAmount);
        }
        if expiration <= now {
            return Err(EscrowError::InvalidExpiration);
        }
        fee.checked_add(collateral).ok_or(EscrowError::Overflow)?;

        Ok(RentalAgreement {
            owner,
            borrower: None,
            fee_amount: fee,
            collateral_amount: collateral,
            expiration,
            is_funded: false,
            is_collateral_locked: false,
            settlement: Settlement::Pending,
        })
    }

    /// Exact deposit `fund` must receive.
    pub fn deposit_total(&self) -> Result<i128, EscrowError> {
        self.fee_amount
            .checked_add(self.collateral_amount)
            .ok_or(EscrowError::Overflow)
    }

    /// Lock the deposit and fix the borrower. Returns the amount to pull in.
    pub fn record_funding(&mut self, borrower: Address, amount: i128) -> Result<i128, EscrowError> {
        if self.is_funded {
            return Err(EscrowError::AlreadyFunded);
        }
        if amount != self.deposit_total()? {
            return Err(EscrowError::IncorrectDeposit);
        }

        self.borrower = Some(borrower);
        self.is_funded = true;
        self.is_collateral_locked = true;
        Ok(amount)
    }

    /// Capture and zero the fee. A second call yields zero.
    pub fn take_fee(&mut self, caller: &Address) -> Result<i128, EscrowError> {
        self.require_owner(caller)?;
        if !self.is_funded {
            return Err(EscrowError::NotYetFunded);
        }

        let amount = self.fee_amount;
        self.fee_amount = 0;
        Ok(amount)
    }

    /// Cooperative return: only strictly before expiration. Returns the
    /// borrower and the collateral owed to them.
    pub fn settle_returned(
        &mut self,
        caller: &Address,
        now: u64,
    ) -> Result<(Address, i128), EscrowError> {
        self.require_settleable(caller)?;
        if now >= self.expiration {
            return Err(EscrowError::Expired);
        }
        let borrower = self.borrower.clone().ok_or(EscrowError::NotYetFunded)?;

        let amount = self.release_collateral(Settlement::Returned);
        Ok((borrower, amount))
    }

    /// Default forfeiture: only at or after expiration. Returns the
    /// collateral owed to the owner.
    pub fn settle_claimed(&mut self, caller: &Address, now: u64) -> Result<i128, EscrowError> {
        self.require_settleable(caller)?;
        if now < self.expiration {
            return Err(EscrowError::NotYetExpired);
        }

        Ok(self.release_collateral(Settlement::Claimed))
    }

    pub fn status(&self) -> AgreementStatus {
        match (self.is_funded, self.settlement) {
            (false, _) => AgreementStatus::Created,
            (true, Settlement::Pending) => AgreementStatus::Funded,
            (true, Settlement::Returned) => AgreementStatus::Returned,
            (true, Settlement::Claimed) => AgreementStatus::Claimed,
        }
    }

    fn require_owner(&self, caller: &Address) -> Result<(), EscrowError> {
        if *caller != self.owner {
            return Err(EscrowError::NotOwner);
        }
        Ok(())
    }

    fn require_settleable(&self, caller: &Address) -> Result<(), EscrowError> {
        self.require_owner(caller)?;
        if !self.is_funded {
            return Err(EscrowError::NotYetFunded);
        }
        if !self.is_collateral_locked {
            return Err(EscrowError::AlreadySettled);
        }
        Ok(())
    }

    fn release_collateral(&mut self, settlement: Settlement) -> i128 {
        self.is_collateral_locked = false;
        let amount = self.collateral_amount;
        self.collateral_amount = 0;
        self.settlement = settlement;
        amount
    }
}
