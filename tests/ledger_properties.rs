use proptest::prelude::*;
use wallet_ledger::core::blocks::{Block, Transaction};
use wallet_ledger::{Direction, LedgerFilter};

const PARTICIPANTS: [&str; 4] = ["A", "B", "C", "a"];
const MAX_BLOCKS: usize = 8;
const MAX_TRANSACTIONS: usize = 6;

fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (
        prop::sample::select(PARTICIPANTS.to_vec()),
        prop::sample::select(PARTICIPANTS.to_vec()),
        0u32..1_000,
    )
        .prop_map(|(sender, recipient, amount)| Transaction::new(sender, recipient, amount as f64))
}

fn chain_strategy() -> impl Strategy<Value = Vec<Block>> {
    prop::collection::vec(
        prop::collection::vec(transaction_strategy(), 0..MAX_TRANSACTIONS)
            .prop_map(Block::with_transactions),
        0..MAX_BLOCKS,
    )
}

fn involves(tx: &Transaction, target: &str) -> bool {
    tx.sender() == Some(target) || tx.recipient() == Some(target)
}

proptest! {
    #[test]
    fn entries_are_the_matching_subsequence(
        chain in chain_strategy(),
        target in prop::sample::select(PARTICIPANTS.to_vec()),
    ) {
        let ledger = LedgerFilter::new(target).filter_and_tally(&chain).unwrap();

        let expected: Vec<(String, String, f64)> = chain
            .iter()
            .flat_map(|block| block.transactions.iter())
            .filter(|tx| involves(tx, target))
            .map(|tx| {
                (
                    tx.sender().unwrap().to_string(),
                    tx.recipient().unwrap().to_string(),
                    tx.amount().unwrap(),
                )
            })
            .collect();
        let actual: Vec<(String, String, f64)> = ledger
            .entries
            .iter()
            .map(|e| (e.sender.clone(), e.recipient.clone(), e.amount))
            .collect();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn every_entry_involves_target(
        chain in chain_strategy(),
        target in prop::sample::select(PARTICIPANTS.to_vec()),
    ) {
        let ledger = LedgerFilter::new(target).filter_and_tally(&chain).unwrap();
        let total: usize = chain.iter().map(|b| b.transactions.len()).sum();
        let all_involve = chain
            .iter()
            .flat_map(|block| block.transactions.iter())
            .all(|tx| involves(tx, target));

        prop_assert!(ledger.entries.len() <= total);
        prop_assert_eq!(ledger.entries.len() == total, all_involve);
        for entry in &ledger.entries {
            prop_assert!(entry.sender == target || entry.recipient == target);
            let expected = if entry.sender == target { Direction::Sent } else { Direction::Received };
            prop_assert_eq!(entry.direction, expected);
        }
    }

    #[test]
    fn balance_is_signed_sum_of_entries(
        chain in chain_strategy(),
        target in prop::sample::select(PARTICIPANTS.to_vec()),
    ) {
        let ledger = LedgerFilter::new(target).filter_and_tally(&chain).unwrap();
        let sum: f64 = ledger
            .entries
            .iter()
            .map(|e| e.direction.signed(e.amount))
            .sum();

        prop_assert_eq!(ledger.balance, sum);
    }

    #[test]
    fn filtering_is_idempotent(
        chain in chain_strategy(),
        target in prop::sample::select(PARTICIPANTS.to_vec()),
    ) {
        let filter = LedgerFilter::new(target);
        let first = filter.filter_and_tally(&chain).unwrap();
        let second = filter.filter_and_tally(&chain).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn absent_target_yields_nothing(chain in chain_strategy()) {
        let ledger = LedgerFilter::new("nobody").filter_and_tally(&chain).unwrap();

        prop_assert!(ledger.entries.is_empty());
        prop_assert_eq!(ledger.balance, 0.0);
    }
}
