//! Fills ledger
//!
//! Bounded circular FIFO of settled trades. The trade path appends one fill
//! per trade; an authorized consumer drains fills up to a native budget,
//! splitting the head fill when the budget runs out inside it.
//!
//! On chain the ledger lives in a zero-copy [`FillsRegistry`] holding a
//! [`LedgerHeader`] and `MAX_FILLS_CAPACITY` slots. All queue logic runs on a
//! borrowed [`FillsLedger`] view over the header and the first `capacity`
//! slots, which is also how tests drive it through [`FillsLedgerBuffer`].
//!
//! Invariants:
//! - `count == (tail - head) mod capacity` (and `head == tail` when full or empty)
//! - `total_native_pending` / `total_token_pending` equal the sums over live fills
//! - lifetime counters only grow, by exactly what each drain reports

use anchor_lang::prelude::*;
use crate::constants::MAX_FILLS_CAPACITY;
use crate::error::SettlementError;
use crate::utils::{mul_div_floor, SafeMath};

/// Amounts attributable to exactly one settled trade
#[zero_copy]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Fill {
    /// Native units paid out by the trade (remaining, if partially drained)
    pub sol_in: u64,
    /// Tokens collected by the trade (remaining, if partially drained)
    pub token_out: u64,
}

/// Queue bookkeeping, stored ahead of the slots
#[zero_copy]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct LedgerHeader {
    pub capacity: u64,
    pub head: u64,
    pub tail: u64,
    pub count: u64,
    pub total_native_pending: u64,
    pub total_token_pending: u64,
    pub lifetime_native_processed: u64,
    pub lifetime_token_processed: u64,
}

impl LedgerHeader {
    pub fn new(capacity: u64) -> Result<Self> {
        require!(
            capacity > 0 && capacity as usize <= MAX_FILLS_CAPACITY,
            SettlementError::InvalidLedgerCapacity
        );
        Ok(Self {
            capacity,
            ..Self::default()
        })
    }
}

/// Fills registry account. Allocated by the client at full size and bound
/// with `#[account(zero)]` during initialization.
#[account(zero_copy)]
pub struct FillsRegistry {
    pub header: LedgerHeader,
    pub fills: [Fill; MAX_FILLS_CAPACITY],
}

impl FillsRegistry {
    pub const LEN: usize = 8 + std::mem::size_of::<FillsRegistry>();

    /// Borrow the live slot window as a ledger
    pub fn ledger(&mut self) -> Result<FillsLedger<'_>> {
        let capacity = self.header.capacity as usize;
        require!(
            capacity <= MAX_FILLS_CAPACITY,
            SettlementError::CorruptLedger
        );
        FillsLedger::new(&mut self.header, &mut self.fills[..capacity])
    }
}

/// Outcome of a drain, also returned to the caller as return data
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsumptionResult {
    pub native_consumed: u64,
    pub token_consumed: u64,
    pub fills_fully_consumed: u64,
}

#[derive(Default)]
struct ConsumptionPlan {
    native: u64,
    token: u64,
    fully_consumed: u64,
    /// Amounts taken from the fill left at head
    partial: Option<Fill>,
}

/// Queue operations over a borrowed header and slot window
pub struct FillsLedger<'a> {
    header: &'a mut LedgerHeader,
    slots: &'a mut [Fill],
}

impl<'a> FillsLedger<'a> {
    pub fn new(header: &'a mut LedgerHeader, slots: &'a mut [Fill]) -> Result<Self> {
        let capacity = header.capacity;
        require!(
            capacity > 0 && capacity as usize == slots.len(),
            SettlementError::CorruptLedger
        );
        require!(
            header.head < capacity && header.tail < capacity && header.count <= capacity,
            SettlementError::CorruptLedger
        );
        Ok(Self { header, slots })
    }

    pub fn capacity(&self) -> u64 {
        self.header.capacity
    }

    pub fn count(&self) -> u64 {
        self.header.count
    }

    pub fn head(&self) -> u64 {
        self.header.head
    }

    pub fn tail(&self) -> u64 {
        self.header.tail
    }

    pub fn is_empty(&self) -> bool {
        self.header.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.header.count == self.header.capacity
    }

    pub fn total_native_pending(&self) -> u64 {
        self.header.total_native_pending
    }

    pub fn total_token_pending(&self) -> u64 {
        self.header.total_token_pending
    }

    pub fn lifetime_native_processed(&self) -> u64 {
        self.header.lifetime_native_processed
    }

    pub fn lifetime_token_processed(&self) -> u64 {
        self.header.lifetime_token_processed
    }

    /// Oldest live fill
    pub fn peek(&self) -> Option<&Fill> {
        if self.is_empty() {
            None
        } else {
            Some(&self.slots[self.header.head as usize])
        }
    }

    /// Live fills, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Fill> + '_ {
        let head = self.header.head;
        let capacity = self.header.capacity;
        (0..self.header.count).map(move |offset| &self.slots[((head + offset) % capacity) as usize])
    }

    fn advance(&self, index: u64) -> u64 {
        (index + 1) % self.header.capacity
    }

    /// Append a fill at the tail
    pub fn enqueue(&mut self, fill: Fill) -> Result<()> {
        require!(!self.is_full(), SettlementError::LedgerFull);

        let total_native_pending = self.header.total_native_pending.safe_add(fill.sol_in)?;
        let total_token_pending = self.header.total_token_pending.safe_add(fill.token_out)?;

        let tail = self.header.tail;
        self.slots[tail as usize] = fill;
        self.header.tail = self.advance(tail);
        self.header.count += 1;
        self.header.total_native_pending = total_native_pending;
        self.header.total_token_pending = total_token_pending;
        Ok(())
    }

    /// Drain fills from the head until `max_native_budget` native units are consumed
    pub fn consume(&mut self, max_native_budget: u64) -> Result<ConsumptionResult> {
        require!(max_native_budget > 0, SettlementError::InvalidBudget);
        require!(!self.is_empty(), SettlementError::EmptyLedger);

        let plan = self.plan(max_native_budget)?;
        self.commit(plan)
    }

    fn plan(&self, max_native_budget: u64) -> Result<ConsumptionPlan> {
        let mut plan = ConsumptionPlan::default();
        let mut remaining = max_native_budget;
        let mut index = self.header.head;

        for _ in 0..self.header.count {
            if remaining == 0 {
                break;
            }
            let fill = self.slots[index as usize];
            if fill.sol_in <= remaining {
                remaining = remaining.safe_sub(fill.sol_in)?;
                plan.native = plan.native.safe_add(fill.sol_in)?;
                plan.token = plan.token.safe_add(fill.token_out)?;
                plan.fully_consumed += 1;
                index = self.advance(index);
            } else {
                // remaining < sol_in, so the split never takes the whole fill
                let token = mul_div_floor(fill.token_out, remaining, fill.sol_in)?;
                plan.native = plan.native.safe_add(remaining)?;
                plan.token = plan.token.safe_add(token)?;
                plan.partial = Some(Fill {
                    sol_in: remaining,
                    token_out: token,
                });
                break;
            }
        }
        Ok(plan)
    }

    fn commit(&mut self, plan: ConsumptionPlan) -> Result<ConsumptionResult> {
        let total_native_pending = self.header.total_native_pending.safe_sub(plan.native)?;
        let total_token_pending = self.header.total_token_pending.safe_sub(plan.token)?;
        let lifetime_native = self.header.lifetime_native_processed.safe_add(plan.native)?;
        let lifetime_token = self.header.lifetime_token_processed.safe_add(plan.token)?;

        let mut head = self.header.head;
        for _ in 0..plan.fully_consumed {
            self.slots[head as usize] = Fill::default();
            head = self.advance(head);
        }
        if let Some(taken) = plan.partial {
            let fill = &mut self.slots[head as usize];
            fill.sol_in -= taken.sol_in;
            fill.token_out -= taken.token_out;
        }

        self.header.head = head;
        self.header.count -= plan.fully_consumed;
        self.header.total_native_pending = total_native_pending;
        self.header.total_token_pending = total_token_pending;
        self.header.lifetime_native_processed = lifetime_native;
        self.header.lifetime_token_processed = lifetime_token;

        Ok(ConsumptionResult {
            native_consumed: plan.native,
            token_consumed: plan.token,
            fills_fully_consumed: plan.fully_consumed,
        })
    }
}

/// Heap-backed ledger storage for off-chain use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillsLedgerBuffer {
    pub header: LedgerHeader,
    pub slots: Vec<Fill>,
}

impl FillsLedgerBuffer {
    pub fn with_capacity(capacity: u64) -> Result<Self> {
        let header = LedgerHeader::new(capacity)?;
        Ok(Self {
            header,
            slots: vec![Fill::default(); capacity as usize],
        })
    }

    pub fn ledger(&mut self) -> Result<FillsLedger<'_>> {
        FillsLedger::new(&mut self.header, &mut self.slots)
    }
}
