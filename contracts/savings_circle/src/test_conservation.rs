//! Ledger balances plus treasury owed always equal the circle's token
//! balance.

#![cfg(test)]

use crate::test_helpers::{salt, set_time, setup_with, TAG_COLLATERAL, TAG_PREFUND};
use crate::{CircleStatus, WithdrawMode};
use soroban_sdk::Env;

#[test]
fn test_conservation_through_full_run() {
    let e = Env::default();
    let t = setup_with(&e, |c| {
        c.n_members = 3;
        c.total_cycles = 3;
        c.contribution = 1_000;
        c.take_rate_bps = 150;
        c.max_discount_bps = 2_000;
        c.vesting_bps_cycle1 = 2_500;
        c.early_lock_rate_bps_cycle1 = 4_000;
    });
    let wallets = t.fill();
    t.assert_conserved(&wallets);

    for (i, w) in wallets.iter().enumerate() {
        t.deposit(w, 500 + i as i128, TAG_COLLATERAL);
        t.deposit(w, 333, TAG_PREFUND);
        t.assert_conserved(&wallets);
    }

    // Cycle 1: one late payer, one silent bidder.
    set_time(&e, t.status().due_at);
    t.client.trigger_debit_all();
    t.assert_conserved(&wallets);
    set_time(&e, t.status().due_at + 30);
    for w in wallets.iter() {
        t.deposit(w, 667, TAG_PREFUND);
        t.assert_conserved(&wallets);
    }
    assert_eq!(t.status().current_cycle, 1);

    t.commit(&wallets[1], 2_777, &salt(&e, 1));
    t.commit(&wallets[2], 2_500, &salt(&e, 2));
    t.to_reveal();
    t.client.reveal_bid(&wallets[1], &2_777, &salt(&e, 1));
    t.to_finalize();
    assert_eq!(t.client.finalize_auction(), wallets[1]);
    t.assert_conserved(&wallets);

    t.client.withdraw(&wallets[1], &WithdrawMode::Available);
    t.assert_conserved(&wallets);

    // Cycle 2 and 3: exact top-ups at the due date.
    for cycle in 2..=3 {
        assert_eq!(t.status().current_cycle, cycle);
        for w in wallets.iter() {
            t.deposit(w, 1_000, TAG_PREFUND);
        }
        set_time(&e, t.status().due_at);
        t.client.trigger_debit_all();
        t.assert_conserved(&wallets);
        t.to_reveal();
        t.to_finalize();
        t.client.finalize_auction();
        t.assert_conserved(&wallets);
    }
    assert_eq!(t.status().status, CircleStatus::Completed);

    t.client.collect_treasury();
    t.assert_conserved(&wallets);
    for w in wallets.iter() {
        t.client.withdraw(w, &WithdrawMode::CloseOut);
        t.assert_conserved(&wallets);
    }
    assert_eq!(t.token_balance(), 0);
}

#[test]
fn test_conservation_through_default() {
    let e = Env::default();
    let t = setup_with(&e, |c| {
        c.n_members = 4;
        c.total_cycles = 4;
        c.contribution = 250;
        c.collateral_rate_bps = 3_333;
    });
    let wallets = t.fill();
    for w in wallets.iter() {
        t.deposit(w, 401, TAG_COLLATERAL);
    }
    set_time(&e, t.status().due_at + 1);
    t.deposit(&wallets[0], 250, TAG_PREFUND);
    t.deposit(&wallets[1], 100, TAG_PREFUND);
    t.deposit(&wallets[2], 250, TAG_PREFUND);
    t.assert_conserved(&wallets);

    set_time(&e, t.status().grace_end_at);
    t.client.terminate_default();
    t.assert_conserved(&wallets);

    t.client.collect_treasury();
    for w in wallets.iter() {
        t.client.withdraw(w, &WithdrawMode::CloseOut);
        t.assert_conserved(&wallets);
    }
    assert_eq!(t.token_balance(), 0);
}
