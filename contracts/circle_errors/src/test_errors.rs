#[cfg(test)]
mod tests {
    extern crate std;
    use crate::{ContractError, ErrorCategory, ErrorExt};
    use std::vec::Vec;

    fn all_variants() -> Vec<ContractError> {
        std::vec![
            ContractError::NotInitialized,
            ContractError::AlreadyInitialized,
            ContractError::InvalidConfig,
            ContractError::PotExceedsCap,
            ContractError::TicketExpired,
            ContractError::SignatureInvalid,
            ContractError::NonceReused,
            ContractError::DomainMismatch,
            ContractError::DebitOutsideWindow,
            ContractError::NotDefaultEligible,
            ContractError::WrongPhase,
            ContractError::HashMismatch,
            ContractError::BidOutOfBounds,
            ContractError::AlreadyWon,
            ContractError::NoCommitment,
            ContractError::NotMember,
            ContractError::AlreadyMember,
            ContractError::CircleFull,
            ContractError::MemberIndexOutOfRange,
            ContractError::WrongStatus,
            ContractError::NothingToWithdraw,
            ContractError::Overflow,
            ContractError::Underflow,
        ]
    }

    // --- Wire code tests ---

    #[test]
    fn test_codes_initialization() {
        assert_eq!(ContractError::NotInitialized as u32, 1);
        assert_eq!(ContractError::AlreadyInitialized as u32, 2);
        assert_eq!(ContractError::InvalidConfig as u32, 3);
        assert_eq!(ContractError::PotExceedsCap as u32, 4);
    }

    #[test]
    fn test_codes_admission() {
        assert_eq!(ContractError::TicketExpired as u32, 100);
        assert_eq!(ContractError::SignatureInvalid as u32, 101);
        assert_eq!(ContractError::NonceReused as u32, 102);
        assert_eq!(ContractError::DomainMismatch as u32, 103);
    }

    #[test]
    fn test_codes_timing() {
        assert_eq!(ContractError::DebitOutsideWindow as u32, 200);
        assert_eq!(ContractError::NotDefaultEligible as u32, 201);
        assert_eq!(ContractError::WrongPhase as u32, 202);
    }

    #[test]
    fn test_codes_auction() {
        assert_eq!(ContractError::HashMismatch as u32, 300);
        assert_eq!(ContractError::BidOutOfBounds as u32, 301);
        assert_eq!(ContractError::AlreadyWon as u32, 302);
        assert_eq!(ContractError::NoCommitment as u32, 303);
    }

    #[test]
    fn test_codes_membership() {
        assert_eq!(ContractError::NotMember as u32, 400);
        assert_eq!(ContractError::AlreadyMember as u32, 401);
        assert_eq!(ContractError::CircleFull as u32, 402);
        assert_eq!(ContractError::MemberIndexOutOfRange as u32, 403);
    }

    #[test]
    fn test_codes_state_and_arithmetic() {
        assert_eq!(ContractError::WrongStatus as u32, 500);
        assert_eq!(ContractError::NothingToWithdraw as u32, 501);
        assert_eq!(ContractError::Overflow as u32, 700);
        assert_eq!(ContractError::Underflow as u32, 701);
    }

    // --- Category mapping tests ---

    #[test]
    fn test_category_admission() {
        for e in [
            ContractError::TicketExpired,
            ContractError::SignatureInvalid,
            ContractError::NonceReused,
            ContractError::DomainMismatch,
        ] {
            assert_eq!(e.category(), ErrorCategory::Admission);
        }
    }

    #[test]
    fn test_category_timing() {
        assert_eq!(
            ContractError::DebitOutsideWindow.category(),
            ErrorCategory::Timing
        );
        assert_eq!(
            ContractError::NotDefaultEligible.category(),
            ErrorCategory::Timing
        );
        assert_eq!(ContractError::WrongPhase.category(), ErrorCategory::Timing);
    }

    #[test]
    fn test_category_auction() {
        assert_eq!(ContractError::HashMismatch.category(), ErrorCategory::Auction);
        assert_eq!(
            ContractError::BidOutOfBounds.category(),
            ErrorCategory::Auction
        );
        assert_eq!(ContractError::AlreadyWon.category(), ErrorCategory::Auction);
        assert_eq!(ContractError::NoCommitment.category(), ErrorCategory::Auction);
    }

    #[test]
    fn test_category_matches_code_range() {
        for e in all_variants() {
            let expected = match e as u32 {
                1..=99 => ErrorCategory::Initialization,
                100..=199 => ErrorCategory::Admission,
                200..=299 => ErrorCategory::Timing,
                300..=399 => ErrorCategory::Auction,
                400..=499 => ErrorCategory::Membership,
                500..=599 => ErrorCategory::State,
                _ => ErrorCategory::Arithmetic,
            };
            assert_eq!(e.category(), expected, "{:?} is in the wrong block", e);
        }
    }

    // --- Description tests ---

    #[test]
    fn test_descriptions_non_empty() {
        for e in all_variants() {
            assert!(!e.description().is_empty(), "{:?} has empty description", e);
        }
    }

    #[test]
    fn test_descriptions_unique() {
        let variants = all_variants();
        for i in 0..variants.len() {
            for j in (i + 1)..variants.len() {
                assert_ne!(variants[i].description(), variants[j].description());
            }
        }
    }

    // --- Variant count guard ---

    #[test]
    fn test_all_variants_count() {
        assert_eq!(
            all_variants().len(),
            23,
            "Update all_variants() and this count when adding new errors"
        );
    }

    // --- Result integration (mirrors contract call sites) ---

    fn mock_replay_guard(consumed: bool) -> Result<(), ContractError> {
        if consumed {
            return Err(ContractError::NonceReused);
        }
        Ok(())
    }

    fn mock_checked_add(a: i128, b: i128) -> Result<i128, ContractError> {
        a.checked_add(b).ok_or(ContractError::Overflow)
    }

    #[test]
    fn test_replay_guard_result() {
        assert_eq!(mock_replay_guard(true), Err(ContractError::NonceReused));
        assert!(mock_replay_guard(false).is_ok());
    }

    #[test]
    fn test_question_mark_propagation() {
        fn outer() -> Result<i128, ContractError> {
            let v = mock_checked_add(i128::MAX, 1)?;
            Ok(v)
        }
        assert_eq!(outer(), Err(ContractError::Overflow));
        assert_eq!(mock_checked_add(2, 3), Ok(5));
    }
}
