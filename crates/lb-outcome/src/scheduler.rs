//! Tick-based delay scheduling.
//!
//! Every scheduled invocation gets its own [`Ticket`], so two requests for
//! equal outcomes in equal contexts are tracked separately and both fire.

use std::collections::BTreeMap;

use lb_core::Context;
use tracing::debug;

use crate::host::Host;
use crate::outcome::Outcome;

/// Handle to a scheduled invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// The raw ticket number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// An outcome waiting for its countdown.
#[derive(Debug, Clone)]
pub struct PendingInvocation {
    /// What to execute.
    pub outcome: Outcome,
    /// The context to execute it in.
    pub context: Context,
    /// Ticks left before it fires.
    pub remaining: u32,
}

/// Holds pending invocations and counts them down once per host tick.
#[derive(Debug, Default)]
pub struct DelayScheduler {
    pending: BTreeMap<Ticket, PendingInvocation>,
    next: u64,
}

impl DelayScheduler {
    /// An empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `outcome` to run in `context` after `delay` ticks.
    ///
    /// A delay of 0 fires on the next [`advance`](Self::advance).
    pub fn schedule(&mut self, outcome: Outcome, context: Context, delay: u32) -> Ticket {
        let ticket = Ticket(self.next);
        self.next += 1;
        debug!(id = %outcome.id, ticket = ticket.0, delay, "scheduled outcome");
        self.pending.insert(
            ticket,
            PendingInvocation {
                outcome,
                context,
                remaining: delay,
            },
        );
        ticket
    }

    /// Drop a pending invocation. Returns whether it was still pending.
    pub fn cancel(&mut self, ticket: Ticket) -> bool {
        self.pending.remove(&ticket).is_some()
    }

    /// Ticks left for `ticket`, if it is still pending.
    pub fn remaining(&self, ticket: Ticket) -> Option<u32> {
        self.pending.get(&ticket).map(|p| p.remaining)
    }

    /// Pending invocations in scheduling order.
    pub fn pending(&self) -> impl Iterator<Item = (Ticket, &PendingInvocation)> {
        self.pending.iter().map(|(t, p)| (*t, p))
    }

    /// Number of pending invocations.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Count every pending invocation down by one tick and execute those that
    /// reach zero, in scheduling order. Returns how many fired.
    ///
    /// Does nothing while `host.should_tick()` is `false`.
    pub fn advance(&mut self, host: &mut dyn Host) -> usize {
        if !host.should_tick() || self.pending.is_empty() {
            return 0;
        }

        let mut due = Vec::new();
        for (ticket, invocation) in &mut self.pending {
            invocation.remaining = invocation.remaining.saturating_sub(1);
            if invocation.remaining == 0 {
                due.push(*ticket);
            }
        }

        for ticket in &due {
            if let Some(mut invocation) = self.pending.remove(ticket) {
                debug!(id = %invocation.outcome.id, ticket = ticket.0, "firing outcome");
                invocation.outcome.execute(&mut invocation.context, host);
            }
        }
        due.len()
    }
}
