//! Guardian-signed payloads and the replay guard.
//!
//! Both payload kinds hash a domain tag, the circle's own address, the
//! payload fields, `exp` (u32 BE) and `nonce` (u64 BE) with SHA-256. The
//! guardian signs the 32-byte digest with ed25519.
//!
//! Verification runs in-contract with `ed25519-dalek` so a bad signature
//! surfaces as `SignatureInvalid` instead of aborting the invocation.

use circle_errors::ContractError;
use ed25519_dalek::{Signature, VerifyingKey};
use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::storage;
use crate::types::{AdmissionTicket, StopDirective};

const JOIN_TAG: &[u8] = b"JOIN";
const STOP_TAG: &[u8] = b"STOP";
const BID_TAG: &[u8] = b"MC_BID";

fn finish(e: &Env, mut buf: Bytes, exp: u32, nonce: u64) -> BytesN<32> {
    buf.extend_from_array(&exp.to_be_bytes());
    buf.extend_from_array(&nonce.to_be_bytes());
    e.crypto().sha256(&buf).to_bytes()
}

/// Digest an admission ticket for `wallet` on `circle` must sign.
pub fn join_ticket_digest(
    e: &Env,
    circle: &Address,
    wallet: &Address,
    exp: u32,
    nonce: u64,
) -> BytesN<32> {
    let mut buf = Bytes::from_slice(e, JOIN_TAG);
    buf.append(&circle.clone().to_xdr(e));
    buf.append(&wallet.clone().to_xdr(e));
    finish(e, buf, exp, nonce)
}

/// Digest an emergency stop for `circle` must sign.
pub fn stop_directive_digest(e: &Env, circle: &Address, exp: u32, nonce: u64) -> BytesN<32> {
    let mut buf = Bytes::from_slice(e, STOP_TAG);
    buf.append(&circle.clone().to_xdr(e));
    finish(e, buf, exp, nonce)
}

/// Sealed-bid commitment hash for one cycle.
pub fn bid_commitment(
    e: &Env,
    circle: &Address,
    cycle: u32,
    wallet: &Address,
    payout_wanted: i128,
    salt: &BytesN<32>,
) -> BytesN<32> {
    let mut buf = Bytes::from_slice(e, BID_TAG);
    buf.append(&circle.clone().to_xdr(e));
    buf.extend_from_array(&cycle.to_be_bytes());
    buf.append(&wallet.clone().to_xdr(e));
    buf.extend_from_array(&payout_wanted.to_be_bytes());
    buf.extend_from_array(&salt.to_array());
    e.crypto().sha256(&buf).to_bytes()
}

fn verify_ed25519(
    key: &BytesN<32>,
    digest: &BytesN<32>,
    signature: &BytesN<64>,
) -> Result<(), ContractError> {
    let verifying_key =
        VerifyingKey::from_bytes(&key.to_array()).map_err(|_| ContractError::SignatureInvalid)?;
    let signature = Signature::from_bytes(&signature.to_array());
    verifying_key
        .verify_strict(&digest.to_array(), &signature)
        .map_err(|_| ContractError::SignatureInvalid)
}

/// Run the guard checks in order. Nothing is written unless all pass.
fn guard(
    e: &Env,
    guardian_key: &BytesN<32>,
    circle: &Address,
    exp: u32,
    nonce: u64,
    digest: &BytesN<32>,
    signature: &BytesN<64>,
) -> Result<(), ContractError> {
    if *circle != e.current_contract_address() {
        return Err(ContractError::DomainMismatch);
    }
    if e.ledger().timestamp() > exp as u64 {
        return Err(ContractError::TicketExpired);
    }
    if storage::is_nonce_consumed(e, nonce) {
        return Err(ContractError::NonceReused);
    }
    verify_ed25519(guardian_key, digest, signature)?;
    storage::consume_nonce(e, nonce);
    Ok(())
}

/// Check an admission ticket for `wallet` and burn its nonce.
pub fn verify_ticket(
    e: &Env,
    guardian_key: &BytesN<32>,
    wallet: &Address,
    ticket: &AdmissionTicket,
) -> Result<(), ContractError> {
    let digest = join_ticket_digest(
        e,
        &e.current_contract_address(),
        wallet,
        ticket.exp,
        ticket.nonce,
    );
    guard(
        e,
        guardian_key,
        &ticket.circle,
        ticket.exp,
        ticket.nonce,
        &digest,
        &ticket.signature,
    )
}

/// Check a stop directive and burn its nonce.
pub fn verify_stop(
    e: &Env,
    guardian_key: &BytesN<32>,
    directive: &StopDirective,
) -> Result<(), ContractError> {
    let digest = stop_directive_digest(
        e,
        &e.current_contract_address(),
        directive.exp,
        directive.nonce,
    );
    guard(
        e,
        guardian_key,
        &directive.circle,
        directive.exp,
        directive.nonce,
        &digest,
        &directive.signature,
    )
}
