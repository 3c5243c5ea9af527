//! Roster compaction and join/exit rules.

#![cfg(test)]

use crate::test_helpers::{setup, INTERVAL, GRACE, START};
use crate::{CircleStatus, Phase, WithdrawMode};
use circle_errors::ContractError;
use soroban_sdk::Env;

#[test]
fn test_join_appends_in_order() {
    let e = Env::default();
    let t = setup(&e);
    let a = t.wallet();
    let b = t.wallet();

    assert_eq!(t.join(&a, 1), 0);
    assert_eq!(t.join(&b, 2), 1);
    assert_eq!(t.client.get_member_at(&0), a);
    assert_eq!(t.client.get_member_at(&1), b);
}

#[test]
fn test_already_member_rejected() {
    let e = Env::default();
    let t = setup(&e);
    let a = t.wallet();
    t.join(&a, 1);

    assert_eq!(
        t.client.try_join(&a, &t.ticket(&a, 2)),
        Err(Ok(ContractError::AlreadyMember))
    );
    assert!(!t.client.is_nonce_consumed(&2));
}

#[test]
fn test_member_at_out_of_range() {
    let e = Env::default();
    let t = setup(&e);
    let a = t.wallet();
    t.join(&a, 1);

    assert_eq!(
        t.client.try_get_member_at(&1),
        Err(Ok(ContractError::MemberIndexOutOfRange))
    );
}

#[test]
fn test_full_roster_locks_circle() {
    let e = Env::default();
    let t = setup(&e);
    let wallets = t.fill();

    let status = t.status();
    assert_eq!(status.status, CircleStatus::Locked);
    assert_eq!(status.phase, Phase::Funding);
    assert_eq!(status.current_cycle, 1);
    assert_eq!(status.due_at, START + INTERVAL);
    assert_eq!(status.grace_end_at, START + INTERVAL + GRACE);
    for wallet in wallets.iter() {
        assert_eq!(t.member(wallet).due_remaining, 20);
    }
}

#[test]
fn test_join_when_full_rejected() {
    let e = Env::default();
    let t = setup(&e);
    t.fill();
    let late = t.wallet();

    assert_eq!(
        t.client.try_join(&late, &t.ticket(&late, 99)),
        Err(Ok(ContractError::CircleFull))
    );
}

#[test]
fn test_exit_compacts_roster() {
    let e = Env::default();
    let t = setup(&e);
    let a = t.wallet();
    let b = t.wallet();
    let c = t.wallet();
    t.join(&a, 1);
    t.join(&b, 2);
    t.join(&c, 3);

    t.client.withdraw(&a, &WithdrawMode::ExitRefund);

    assert_eq!(t.client.get_members_count(), 2);
    assert_eq!(t.client.get_member_at(&0), c);
    assert_eq!(t.client.get_member_at(&1), b);
    assert_eq!(t.member(&c).slot, 0);
    assert_eq!(t.member(&b).slot, 1);
    assert!(!t.member(&a).active);
}

#[test]
fn test_exit_last_slot_pops() {
    let e = Env::default();
    let t = setup(&e);
    let a = t.wallet();
    let b = t.wallet();
    t.join(&a, 1);
    t.join(&b, 2);

    t.client.withdraw(&b, &WithdrawMode::ExitRefund);

    assert_eq!(t.client.get_members_count(), 1);
    assert_eq!(t.client.get_member_at(&0), a);
    assert_eq!(t.member(&a).slot, 0);
}

#[test]
fn test_churn_keeps_indices_dense() {
    let e = Env::default();
    let t = setup(&e);
    let a = t.wallet();
    let b = t.wallet();
    let c = t.wallet();
    let d = t.wallet();
    t.join(&a, 1);
    t.join(&b, 2);
    t.join(&c, 3);
    t.client.withdraw(&b, &WithdrawMode::ExitRefund);
    t.join(&d, 4);
    t.client.withdraw(&a, &WithdrawMode::ExitRefund);
    t.join(&b, 5);

    let count = t.client.get_members_count();
    assert_eq!(count, 3);
    for i in 0..count {
        let wallet = t.client.get_member_at(&i);
        let member = t.member(&wallet);
        assert!(member.active);
        assert_eq!(member.slot, i);
    }
    assert_eq!(t.client.get_member_at(&0), d);
    assert_eq!(t.client.get_member_at(&1), c);
    assert_eq!(t.client.get_member_at(&2), b);
}

#[test]
fn test_vacated_slot_can_be_refilled_to_lock() {
    let e = Env::default();
    let t = setup(&e);
    let wallets = [t.wallet(), t.wallet(), t.wallet(), t.wallet()];
    for (i, w) in wallets.iter().take(3).enumerate() {
        t.join(w, i as u64 + 1);
    }
    t.client.withdraw(&wallets[0], &WithdrawMode::ExitRefund);
    t.join(&wallets[3], 4);
    assert_eq!(t.status().status, CircleStatus::Recruiting);

    t.join(&wallets[0], 5);
    assert_eq!(t.status().status, CircleStatus::Locked);
    assert_eq!(t.client.get_members_count(), 4);
}

#[test]
fn test_exit_refund_outside_recruiting() {
    let e = Env::default();
    let t = setup(&e);
    let wallets = t.fill();

    assert_eq!(
        t.client.try_withdraw(&wallets[0], &WithdrawMode::ExitRefund),
        Err(Ok(ContractError::WrongStatus))
    );
}
