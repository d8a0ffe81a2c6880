//! Integration tests for the full command and query pipeline.
//!
//! Commands flow through the dispatcher into the ledger and the transaction
//! processor, committed events cross the bus into the audit store via the
//! subscriber worker, and queries read primary state back. Everything runs
//! on in-memory adapters.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::{Duration, Instant};

    use coffer_accounts::{
        Account, ApplyTransaction, CreateAccount, GetAccounts, GetBalance, GetTransactions,
        Transaction, TransactionKind,
    };
    use coffer_core::{LedgerError, OwnerId};
    use coffer_events::{EventRecord, InMemoryEventBus};

    use crate::command_dispatcher::{CommandDispatcher, DispatchCommand};
    use crate::event_store::{EventStore, EventStoreSubscriber, InMemoryEventStore};
    use crate::ledger::LedgerService;
    use crate::processor::ProcessorConfig;
    use crate::query_dispatcher::{DispatchQuery, QueryDispatcher};
    use crate::repository::{InMemoryAccountRepository, InMemoryTransactionRepository};
    use crate::workers::{SubscriberWorker, WorkerHandle};

    type Bus = Arc<InMemoryEventBus<EventRecord>>;
    type Commands = CommandDispatcher<
        Arc<InMemoryAccountRepository>,
        Arc<InMemoryTransactionRepository>,
        Bus,
    >;
    type Queries =
        QueryDispatcher<Arc<InMemoryAccountRepository>, Arc<InMemoryTransactionRepository>>;

    struct Harness {
        commands: Arc<Commands>,
        queries: Queries,
        event_store: Arc<InMemoryEventStore>,
        worker: Option<WorkerHandle>,
    }

    impl Drop for Harness {
        fn drop(&mut self) {
            if let Some(worker) = self.worker.take() {
                worker.shutdown();
            }
        }
    }

    fn setup() -> Harness {
        coffer_observability::init();

        let accounts = Arc::new(InMemoryAccountRepository::new());
        let transactions = Arc::new(InMemoryTransactionRepository::new());
        let bus: Bus = Arc::new(InMemoryEventBus::new());
        let event_store = Arc::new(InMemoryEventStore::new());

        let subscriber = EventStoreSubscriber::new(event_store.clone());
        let worker = SubscriberWorker::spawn("event-store", bus.clone(), move |record| {
            subscriber.handle(record)
        });

        let ledger = Arc::new(LedgerService::new(accounts));
        let commands = Arc::new(CommandDispatcher::new(
            ledger.clone(),
            transactions.clone(),
            bus,
            ProcessorConfig::default(),
        ));
        let queries = QueryDispatcher::new(ledger, transactions);

        Harness {
            commands,
            queries,
            event_store,
            worker: Some(worker),
        }
    }

    fn owner(id: &str) -> OwnerId {
        OwnerId::from(id)
    }

    fn create_account(h: &Harness, owner_id: &str, number: u64, name: &str) -> Account {
        h.commands
            .dispatch(CreateAccount {
                owner_id: owner(owner_id),
                number,
                name: name.to_string(),
            })
            .unwrap()
    }

    fn apply(
        h: &Harness,
        owner_id: &str,
        account: &Account,
        amount: i64,
        kind: TransactionKind,
    ) -> Result<Transaction, LedgerError> {
        h.commands.dispatch(ApplyTransaction {
            owner_id: owner(owner_id),
            account_id: account.id,
            amount,
            kind,
        })
    }

    fn balance_of(h: &Harness, owner_id: &str, account: &Account) -> Account {
        h.queries
            .dispatch(GetBalance {
                account_id: account.id,
                owner_id: owner(owner_id),
            })
            .unwrap()
    }

    fn history_of(h: &Harness, owner_id: &str, account: &Account) -> Vec<Transaction> {
        h.queries
            .dispatch(GetTransactions {
                account_id: account.id,
                owner_id: owner(owner_id),
            })
            .unwrap()
    }

    /// Audit delivery is asynchronous; poll until the store caught up.
    fn wait_for_records(store: &InMemoryEventStore, min: usize) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while store.len() < min {
            if Instant::now() > deadline {
                panic!("audit store stuck at {} records, wanted {min}", store.len());
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn created_account_accepts_its_first_deposit() {
        let h = setup();
        let account = create_account(&h, "u1", 987654, "Marcelo");
        assert_eq!(account.balance, 0);

        let tx = apply(&h, "u1", &account, 1000, TransactionKind::Deposit).unwrap();
        assert_eq!(tx.amount, 1000);
        assert_eq!(tx.kind, TransactionKind::Deposit);

        assert_eq!(balance_of(&h, "u1", &account).balance, 1000);
    }

    #[test]
    fn overdraw_is_rejected_without_side_effects() {
        let h = setup();
        let account = create_account(&h, "u1", 1, "checking");
        apply(&h, "u1", &account, 800, TransactionKind::Deposit).unwrap();

        let err = apply(&h, "u1", &account, 1000, TransactionKind::Withdrawal).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                balance: 800,
                requested: 1000
            }
        );

        // Balance and history both show only the deposit.
        assert_eq!(balance_of(&h, "u1", &account).balance, 800);
        let history = history_of(&h, "u1", &account);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, TransactionKind::Deposit);
    }

    #[test]
    fn foreign_owner_sees_no_account() {
        let h = setup();
        let account = create_account(&h, "u1", 1, "checking");

        let err = h
            .queries
            .dispatch(GetBalance {
                account_id: account.id,
                owner_id: owner("u2"),
            })
            .unwrap_err();
        assert_eq!(err, LedgerError::AccountNotFound);
    }

    #[test]
    fn account_numbers_are_unique_per_owner() {
        let h = setup();
        create_account(&h, "u1", 42, "first");

        let err = h
            .commands
            .dispatch(CreateAccount {
                owner_id: owner("u1"),
                number: 42,
                name: "second".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, LedgerError::DuplicateAccount { number: 42 });

        // Another owner can take the same number.
        create_account(&h, "u2", 42, "other");

        let mine = h
            .queries
            .dispatch(GetAccounts {
                owner_id: owner("u1"),
            })
            .unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[test]
    fn owners_list_exactly_their_accounts() {
        let h = setup();
        create_account(&h, "u1", 1, "checking");
        create_account(&h, "u1", 2, "savings");
        create_account(&h, "u2", 3, "other");

        let mine = h
            .queries
            .dispatch(GetAccounts {
                owner_id: owner("u1"),
            })
            .unwrap();
        let mut numbers: Vec<_> = mine.iter().map(|a| a.number).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, vec![1, 2]);

        let theirs = h
            .queries
            .dispatch(GetAccounts {
                owner_id: owner("u2"),
            })
            .unwrap();
        assert_eq!(theirs.len(), 1);
    }

    #[test]
    fn balance_reads_are_stable_between_mutations() {
        let h = setup();
        let account = create_account(&h, "u1", 1, "checking");
        apply(&h, "u1", &account, 500, TransactionKind::Deposit).unwrap();

        let first = balance_of(&h, "u1", &account);
        let second = balance_of(&h, "u1", &account);
        assert_eq!(first, second);
    }

    #[test]
    fn non_positive_amounts_never_reach_the_ledger() {
        let h = setup();
        let account = create_account(&h, "u1", 1, "checking");

        let err = apply(&h, "u1", &account, 0, TransactionKind::Deposit).unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount { amount: 0 });

        let err = apply(&h, "u1", &account, -5, TransactionKind::Withdrawal).unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount { amount: -5 });

        assert_eq!(balance_of(&h, "u1", &account).balance, 0);
        assert!(history_of(&h, "u1", &account).is_empty());
    }

    #[test]
    fn transactions_list_newest_first() {
        let h = setup();
        let account = create_account(&h, "u1", 1, "checking");

        for (amount, kind) in [
            (100, TransactionKind::Deposit),
            (200, TransactionKind::Deposit),
            (50, TransactionKind::Withdrawal),
        ] {
            apply(&h, "u1", &account, amount, kind).unwrap();
            // Keep the timestamps strictly ordered.
            thread::sleep(Duration::from_millis(5));
        }

        let history = history_of(&h, "u1", &account);
        let amounts: Vec<_> = history.iter().map(|tx| tx.amount).collect();
        assert_eq!(amounts, vec![50, 200, 100]);
        assert!(
            history
                .windows(2)
                .all(|pair| pair[0].created_at >= pair[1].created_at)
        );
    }

    #[test]
    fn transaction_history_is_owner_scoped() {
        let h = setup();
        let account = create_account(&h, "u1", 1, "checking");
        apply(&h, "u1", &account, 100, TransactionKind::Deposit).unwrap();

        // Wrong owner reads an empty history, not an error.
        assert!(history_of(&h, "u2", &account).is_empty());
    }

    #[test]
    fn concurrent_withdrawals_cannot_overdraw() {
        let h = setup();
        let account = create_account(&h, "u1", 7, "checking");
        apply(&h, "u1", &account, 100, TransactionKind::Deposit).unwrap();

        let barrier = Arc::new(Barrier::new(2));
        let mut handles = Vec::new();
        for _ in 0..2 {
            let commands = h.commands.clone();
            let barrier = barrier.clone();
            let account_id = account.id;
            handles.push(thread::spawn(move || {
                barrier.wait();
                commands.dispatch(ApplyTransaction {
                    owner_id: OwnerId::from("u1"),
                    account_id,
                    amount: 60,
                    kind: TransactionKind::Withdrawal,
                })
            }));
        }

        let results: Vec<_> = handles.into_iter().map(|t| t.join().unwrap()).collect();
        let accepted = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(LedgerError::InsufficientFunds { .. })))
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(rejected, 1);

        assert_eq!(balance_of(&h, "u1", &account).balance, 40);

        // One deposit plus the single accepted withdrawal.
        assert_eq!(history_of(&h, "u1", &account).len(), 2);
    }

    #[test]
    fn committed_commands_reach_the_audit_store() {
        let h = setup();
        let account = create_account(&h, "u1", 9, "audited");
        apply(&h, "u1", &account, 1000, TransactionKind::Deposit).unwrap();

        // AccountCreated + TransactionCreated + AccountUpdated
        wait_for_records(&h.event_store, 3);

        let created = h.event_store.records_named("AccountCreated").unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].payload()["number"], 9);
        assert_eq!(created[0].payload()["balance"], 0);

        let tx_created = h.event_store.records_named("TransactionCreated").unwrap();
        assert_eq!(tx_created.len(), 1);
        assert_eq!(tx_created[0].payload()["amount"], 1000);
        assert_eq!(tx_created[0].payload()["kind"], "DEPOSIT");

        let updated = h.event_store.records_named("AccountUpdated").unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].payload()["balance"], 1000);
    }

    #[test]
    fn deposits_at_the_alert_threshold_commit_and_audit() {
        let h = setup();
        let account = create_account(&h, "u1", 11, "flagged");

        // At the default alert threshold: flagged in the logs, not blocked.
        let tx = apply(&h, "u1", &account, 1_000_000, TransactionKind::Deposit).unwrap();
        assert_eq!(tx.amount, 1_000_000);
        assert_eq!(balance_of(&h, "u1", &account).balance, 1_000_000);

        wait_for_records(&h.event_store, 3);
        let tx_created = h.event_store.records_named("TransactionCreated").unwrap();
        assert_eq!(tx_created.len(), 1);
        assert_eq!(tx_created[0].payload()["amount"], 1_000_000);
    }

    #[test]
    fn audit_records_arrive_in_causal_order() {
        let h = setup();
        let account = create_account(&h, "u1", 2, "ordered");
        apply(&h, "u1", &account, 300, TransactionKind::Deposit).unwrap();

        wait_for_records(&h.event_store, 3);

        let names: Vec<_> = h
            .event_store
            .records()
            .unwrap()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["AccountCreated", "TransactionCreated", "AccountUpdated"]
        );
    }

    #[test]
    fn rejected_commands_leave_no_audit_trace() {
        let h = setup();
        let account = create_account(&h, "u1", 3, "empty");
        wait_for_records(&h.event_store, 1);

        let err = apply(&h, "u1", &account, 10, TransactionKind::Withdrawal).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));

        // Give a stray record time to show up before asserting absence.
        thread::sleep(Duration::from_millis(100));
        assert_eq!(h.event_store.len(), 1);
    }

    #[test]
    fn audit_store_failures_never_fail_commands() {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let transactions = Arc::new(InMemoryTransactionRepository::new());
        let bus: Bus = Arc::new(InMemoryEventBus::new());

        // Subscriber that refuses every record.
        let worker = SubscriberWorker::spawn("broken-store", bus.clone(), |_record: EventRecord| {
            Err("append refused".to_string())
        });

        let ledger = Arc::new(LedgerService::new(accounts));
        let commands = CommandDispatcher::new(
            ledger.clone(),
            transactions,
            bus,
            ProcessorConfig::default(),
        );

        let account = commands
            .dispatch(CreateAccount {
                owner_id: owner("u1"),
                number: 1,
                name: "resilient".to_string(),
            })
            .unwrap();
        commands
            .dispatch(ApplyTransaction {
                owner_id: owner("u1"),
                account_id: account.id,
                amount: 250,
                kind: TransactionKind::Deposit,
            })
            .unwrap();

        assert_eq!(
            ledger.balance(account.id, &owner("u1")).unwrap().balance,
            250
        );
        worker.shutdown();
    }
}
