//! Token movements in and out of the circle.
//! All deposits and payouts go through the token bound at initialization.

use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env};

/// @notice Pulls `amount` from `owner` into the circle.
/// @dev Requires prior approval for the circle contract as spender.
pub fn transfer_into_circle(e: &Env, token: &Address, owner: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    let contract = e.current_contract_address();
    TokenClient::new(e, token).transfer_from(&contract, owner, &contract, &amount);
}

/// @notice Pays `amount` from the circle to `recipient`.
pub fn transfer_from_circle(e: &Env, token: &Address, recipient: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    let contract = e.current_contract_address();
    TokenClient::new(e, token).transfer(&contract, recipient, &amount);
}
