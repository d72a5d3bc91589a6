// Dobles de prueba para los providers del panel

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::models::ActionKind;
use crate::providers::traits::{BalanceProvider, Clock, SettlementGateway, WalletProvider};

pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn advance(&self, seconds: i64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.get()
    }
}

pub struct TestWallet {
    id: RefCell<Option<String>>,
}

impl TestWallet {
    pub fn new(id: Option<&str>) -> Self {
        Self {
            id: RefCell::new(id.map(str::to_string)),
        }
    }

    pub fn set(&self, id: Option<&str>) {
        *self.id.borrow_mut() = id.map(str::to_string);
    }
}

impl WalletProvider for TestWallet {
    fn wallet_id(&self) -> Option<String> {
        self.id.borrow().clone()
    }
}

pub struct ScriptedBalance {
    pub balance: Cell<f64>,
    pub loading: Cell<bool>,
    pub fail_refetch: Cell<bool>,
    pub refetch_calls: Cell<u32>,
}

impl ScriptedBalance {
    pub fn new(balance: f64) -> Self {
        Self {
            balance: Cell::new(balance),
            loading: Cell::new(false),
            fail_refetch: Cell::new(false),
            refetch_calls: Cell::new(0),
        }
    }
}

#[async_trait(?Send)]
impl BalanceProvider for ScriptedBalance {
    fn balance(&self) -> f64 {
        self.balance.get()
    }

    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    async fn refetch(&self) -> Result<(), String> {
        self.refetch_calls.set(self.refetch_calls.get() + 1);
        if self.fail_refetch.get() {
            return Err("rpc unavailable".to_string());
        }
        Ok(())
    }
}

/// Liquidación configurable: inmediata, fallida, o retenida hasta `release()`
pub struct ScriptedSettlement {
    fail: Cell<bool>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    pub settled: RefCell<Vec<ActionKind>>,
}

impl ScriptedSettlement {
    pub fn immediate() -> Self {
        Self {
            fail: Cell::new(false),
            gate: RefCell::new(None),
            settled: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        let settlement = Self::immediate();
        settlement.fail.set(true);
        settlement
    }

    /// La próxima liquidación espera hasta que se envíe por el sender
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }
}

#[async_trait(?Send)]
impl SettlementGateway for ScriptedSettlement {
    async fn settle(&self, action: ActionKind) -> Result<(), String> {
        let gate = self.gate.borrow_mut().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        if self.fail.get() {
            return Err("settlement rejected".to_string());
        }
        self.settled.borrow_mut().push(action);
        Ok(())
    }
}
