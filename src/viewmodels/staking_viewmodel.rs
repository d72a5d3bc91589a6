// ============================================================================
// STAKING VIEWMODEL - Máquina de estados del panel de staking
// ============================================================================
// Cada acción es un ciclo idle → validating → executing → idle.
// Los errores se recuperan aquí: el mensaje queda en `last_error` y el error
// tipado se retorna al llamador (views/tests), nunca se propaga más allá.
// ============================================================================

use std::rc::Rc;

use crate::config::PanelConfig;
use crate::errors::{StakingError, StakingResult, ValidationError};
use crate::models::{
    parse_positive_amount, round4, ActionKind, ActionOutcome, ActionPhase, CooldownStatus, StakingSession,
};
use crate::providers::{BalanceProvider, Clock, SettlementGateway, WalletProvider};
use crate::state::StakingState;
use crate::viewmodels::action_slot::ActionSlot;

/// Colaboradores externos que consume el panel
#[derive(Clone)]
pub struct PanelProviders {
    pub wallet: Rc<dyn WalletProvider>,
    pub balance: Rc<dyn BalanceProvider>,
    pub clock: Rc<dyn Clock>,
    pub settlement: Rc<dyn SettlementGateway>,
}

/// Qué controles están habilitados
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelControls {
    pub stake_enabled: bool,
    pub compound_enabled: bool,
    pub claim_enabled: bool,
    pub refresh_enabled: bool,
}

/// Lo que la fase `validating` deja listo para liquidar
enum ValidatedAction {
    Stake { amount: f64 },
    Compound,
    Claim,
}

pub struct StakingViewModel {
    state: StakingState,
    providers: PanelProviders,
    slot: ActionSlot,
    cooldown_seconds: i64,
    accrual_quantum: f64,
}

impl StakingViewModel {
    pub fn new(providers: PanelProviders, config: &PanelConfig) -> Self {
        let session = StakingSession::new(
            config.initial_stake_input.clone(),
            config.rewards.initial_pending_reward,
        );
        let viewmodel = Self {
            state: StakingState::new(session),
            providers,
            slot: ActionSlot::new(),
            cooldown_seconds: config.timers.cooldown_seconds,
            accrual_quantum: config.rewards.accrual_quantum,
        };
        // Primer frame correcto sin esperar al primer tick
        viewmodel.tick_cooldown();
        viewmodel
    }

    pub fn state(&self) -> &StakingState {
        &self.state
    }

    pub fn snapshot(&self) -> StakingSession {
        self.state.snapshot()
    }

    pub fn set_stake_input(&self, input: &str) {
        self.state.set_stake_input(input);
    }

    // ------------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------------

    /// Tick de 1s: recalcula el cooldown desde el timestamp absoluto y
    /// sincroniza wallet/balance. Retorna true si la wallet cambió.
    pub fn tick_cooldown(&self) -> bool {
        let last_action = self.state.with(|s| s.last_action_timestamp);
        let status = CooldownStatus::compute(self.providers.clock.now(), last_action, self.cooldown_seconds);
        self.state.set_cooldown(status);

        let previous_wallet = self.state.with(|s| s.wallet_id.clone());
        self.sync_providers();
        let wallet_changed = self.state.with(|s| s.wallet_id != previous_wallet);
        if wallet_changed {
            log::info!("🔗 [WALLET] Identidad cambió: conectada={}", self.state.with(|s| s.is_connected()));
        }
        wallet_changed
    }

    /// Tick de 5s: suma el quantum fijo al reward pendiente
    pub fn tick_accrual(&self) {
        let quantum = self.accrual_quantum;
        self.state.update(|s| s.accrue(quantum));
    }

    // ------------------------------------------------------------------------
    // Acciones
    // ------------------------------------------------------------------------

    /// Stake del monto escrito en el input del panel
    pub async fn stake_current_input(&self) -> StakingResult<ActionOutcome> {
        let input = self.state.stake_input();
        self.stake(&input).await
    }

    pub async fn stake(&self, input: &str) -> StakingResult<ActionOutcome> {
        self.run_action(ActionKind::Stake, Some(input)).await
    }

    pub async fn compound(&self) -> StakingResult<ActionOutcome> {
        self.run_action(ActionKind::Compound, None).await
    }

    pub async fn claim(&self) -> StakingResult<ActionOutcome> {
        self.run_action(ActionKind::Claim, None).await
    }

    async fn run_action(&self, action: ActionKind, input: Option<&str>) -> StakingResult<ActionOutcome> {
        let guard = match self.slot.try_acquire(action, &self.state) {
            Ok(guard) => guard,
            Err(in_flight) => {
                return Err(self.fail(StakingError::ConcurrentAction { in_flight }));
            }
        };

        self.state.set_error(None);
        self.state.set_phase(ActionPhase::Validating, Some(action));
        log::info!("🔒 [{}] Validando...", action.label().to_uppercase());

        let validated = match self.validate(action, input) {
            Ok(validated) => validated,
            Err(e) => return Err(self.fail(e)),
        };

        self.state.set_phase(ActionPhase::Executing, Some(action));
        if let Err(reason) = self.providers.settlement.settle(action).await {
            return Err(self.fail(StakingError::Execution { action, reason }));
        }

        let now = self.providers.clock.now();
        let amount = self.state.update(|s| match validated {
            ValidatedAction::Stake { amount } => {
                s.apply_stake(amount, now);
                amount
            }
            ValidatedAction::Compound => s.apply_compound(now),
            ValidatedAction::Claim => {
                s.apply_claim(now);
                0.0
            }
        });
        self.state
            .set_cooldown(CooldownStatus::compute(now, now, self.cooldown_seconds));
        drop(guard);

        log::info!("✅ [{}] Liquidado: {:.4} a las {}", action.label().to_uppercase(), amount, now);

        // Refresh después de liberar el slot; su fallo no toca la liquidación
        self.refresh_balance().await;

        Ok(ActionOutcome {
            action,
            amount,
            settled_at: now,
        })
    }

    fn validate(&self, action: ActionKind, input: Option<&str>) -> StakingResult<ValidatedAction> {
        match action {
            ActionKind::Stake => {
                // Se liquida y reporta el mismo monto a 4 decimales que se validó
                let amount = input
                    .and_then(parse_positive_amount)
                    .map(round4)
                    .filter(|amount| *amount > 0.0)
                    .ok_or(ValidationError::InvalidAmount)?;
                if amount > self.providers.balance.balance() {
                    return Err(ValidationError::InsufficientBalance.into());
                }
                Ok(ValidatedAction::Stake { amount })
            }
            ActionKind::Compound | ActionKind::Claim => {
                let status = self.current_cooldown();
                if !status.can_perform_action {
                    return Err(StakingError::Cooldown {
                        remaining: status.remaining,
                    });
                }
                Ok(if action == ActionKind::Compound {
                    ValidatedAction::Compound
                } else {
                    ValidatedAction::Claim
                })
            }
        }
    }

    fn fail(&self, error: StakingError) -> StakingError {
        if error.updates_last_error() {
            log::warn!("⚠️ [ACTION] {} ({:?})", error, error);
            self.state.set_error(Some(error.user_message()));
        } else {
            log::warn!("⚠️ [ACTION] Rechazada: {}", error);
        }
        error
    }

    /// Cooldown calculado en este instante (no el del último tick)
    pub fn current_cooldown(&self) -> CooldownStatus {
        let last_action = self.state.with(|s| s.last_action_timestamp);
        CooldownStatus::compute(self.providers.clock.now(), last_action, self.cooldown_seconds)
    }

    // ------------------------------------------------------------------------
    // Balance
    // ------------------------------------------------------------------------

    /// Pedir un refresh del balance. Los errores solo se loguean.
    pub async fn refresh_balance(&self) {
        let wallet_id = self.providers.wallet.wallet_id();
        let balance = self.providers.balance.balance();
        self.state.set_external(wallet_id, balance, true);

        if let Err(e) = self.providers.balance.refetch().await {
            log::warn!("⚠️ [BALANCE] Error refrescando balance: {}", e);
        }
        self.sync_providers();
    }

    fn sync_providers(&self) {
        self.state.set_external(
            self.providers.wallet.wallet_id(),
            self.providers.balance.balance(),
            self.providers.balance.is_loading(),
        );
    }

    pub fn controls(&self) -> PanelControls {
        let balance_loading = self.providers.balance.is_loading();
        let in_flight = self.slot.holder().is_some();
        let can_perform = self.state.cooldown().can_perform_action;
        PanelControls {
            stake_enabled: !in_flight && !balance_loading,
            compound_enabled: can_perform && !in_flight && !balance_loading,
            claim_enabled: can_perform && !in_flight && !balance_loading,
            refresh_enabled: !balance_loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::{ManualClock, ScriptedBalance, ScriptedSettlement, TestWallet};
    use futures::executor::block_on;

    const NOW: i64 = 1_700_000_000;
    const DAY: i64 = 86_400;

    struct Harness {
        vm: StakingViewModel,
        clock: Rc<ManualClock>,
        balance: Rc<ScriptedBalance>,
        settlement: Rc<ScriptedSettlement>,
    }

    fn harness_with(balance: f64, settlement: ScriptedSettlement) -> Harness {
        let clock = Rc::new(ManualClock::new(NOW));
        let balance = Rc::new(ScriptedBalance::new(balance));
        let settlement = Rc::new(settlement);
        let providers = PanelProviders {
            wallet: Rc::new(TestWallet::new(Some("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"))),
            balance: balance.clone(),
            clock: clock.clone(),
            settlement: settlement.clone(),
        };
        Harness {
            vm: StakingViewModel::new(providers, &PanelConfig::default()),
            clock,
            balance,
            settlement,
        }
    }

    fn harness(balance: f64) -> Harness {
        harness_with(balance, ScriptedSettlement::immediate())
    }

    #[test]
    fn test_initial_session() {
        let h = harness(10.0);
        let s = h.vm.snapshot();
        assert_eq!(s.stake_input, "0.7");
        assert_eq!(s.pending_reward, 0.07);
        assert_eq!(s.last_action_timestamp, 0);
        assert!(s.cooldown.can_perform_action);
        assert!(s.is_connected());
        assert_eq!(s.balance, 10.0);
        assert_eq!(s.phase, ActionPhase::Idle);
    }

    #[test]
    fn test_stake_rejects_invalid_amounts_without_mutation() {
        let h = harness(10.0);
        for input in ["", "0", "-0.5", "abc", "NaN"] {
            let err = block_on(h.vm.stake(input)).unwrap_err();
            assert_eq!(err, StakingError::Validation(ValidationError::InvalidAmount));
            let s = h.vm.snapshot();
            assert_eq!(s.staked_amount, 0.0);
            assert_eq!(s.total_value_locked, 0.0);
            assert_eq!(s.last_action_timestamp, 0);
            assert_eq!(s.stake_input, "0.7");
            assert_eq!(s.last_error.as_deref(), Some("Please enter a valid stake amount."));
            assert_eq!(s.phase, ActionPhase::Idle);
        }
        assert!(h.settlement.settled.borrow().is_empty());
    }

    #[test]
    fn test_stake_rejects_amount_above_balance() {
        let h = harness(10.0);
        let err = block_on(h.vm.stake("10.0001")).unwrap_err();
        assert_eq!(err, StakingError::Validation(ValidationError::InsufficientBalance));
        assert_eq!(h.vm.snapshot().last_error.as_deref(), Some("Insufficient balance for staking."));
        assert_eq!(h.vm.snapshot().staked_amount, 0.0);
        assert_eq!(h.balance.refetch_calls.get(), 0);
    }

    #[test]
    fn test_stake_accepts_entire_balance() {
        let h = harness(10.0);
        let outcome = block_on(h.vm.stake("10")).unwrap();
        assert_eq!(outcome.amount, 10.0);
        let s = h.vm.snapshot();
        assert_eq!(s.staked_amount, 10.0);
        assert_eq!(s.total_value_locked, 10.0);
        assert_eq!(s.last_error, None);
    }

    #[test]
    fn test_stake_amount_below_precision_is_invalid() {
        let h = harness(10.0);
        let err = block_on(h.vm.stake("0.00004")).unwrap_err();
        assert_eq!(err, StakingError::Validation(ValidationError::InvalidAmount));
        let s = h.vm.snapshot();
        assert_eq!(s.staked_amount, 0.0);
        assert_eq!(s.total_value_locked, 0.0);
        assert_eq!(s.last_action_timestamp, 0);
        assert_eq!(s.stake_input, "0.7");
        assert!(s.cooldown.can_perform_action);
        assert!(h.settlement.settled.borrow().is_empty());
        assert_eq!(h.balance.refetch_calls.get(), 0);
    }

    #[test]
    fn test_stake_settles_and_reports_the_same_rounded_amount() {
        let h = harness(10.0);
        let outcome = block_on(h.vm.stake("1.23456")).unwrap();
        assert_eq!(outcome.amount, 1.2346);
        let s = h.vm.snapshot();
        assert_eq!(s.staked_amount, outcome.amount);
        assert_eq!(s.total_value_locked, outcome.amount);
    }

    #[test]
    fn test_stake_scenario_arms_cooldown() {
        let h = harness(10.0);
        let outcome = block_on(h.vm.stake_current_input()).unwrap();
        assert_eq!(outcome.amount, 0.7);
        assert_eq!(outcome.settled_at, NOW);

        let s = h.vm.snapshot();
        assert_eq!(s.staked_amount, 0.7);
        assert_eq!(s.total_value_locked, 0.7);
        assert_eq!(s.stake_input, "");
        assert_eq!(s.last_action_timestamp, NOW);
        assert_eq!(s.cooldown.formatted(), "24:00:00");
        assert!(!s.cooldown.can_perform_action);
        assert_eq!(s.last_error, None);
        assert_eq!(*h.settlement.settled.borrow(), vec![ActionKind::Stake]);
        assert_eq!(h.balance.refetch_calls.get(), 1);
    }

    #[test]
    fn test_compound_during_cooldown_then_after() {
        let h = harness(10.0);
        block_on(h.vm.stake("0.7")).unwrap();
        let before = h.vm.snapshot();

        let err = block_on(h.vm.compound()).unwrap_err();
        assert_eq!(err, StakingError::Cooldown { remaining: DAY });
        let after = h.vm.snapshot();
        assert_eq!(after.staked_amount, before.staked_amount);
        assert_eq!(after.pending_reward, before.pending_reward);
        assert_eq!(after.compound_streak, before.compound_streak);
        assert_eq!(after.last_error.as_deref(), Some("Please wait for the cooldown to finish."));

        h.clock.advance(DAY);
        block_on(h.vm.compound()).unwrap();
        let s = h.vm.snapshot();
        assert_eq!(s.staked_amount, 0.77);
        assert_eq!(s.total_value_locked, 0.77);
        assert_eq!(s.pending_reward, 0.0);
        assert_eq!(s.compound_streak, 1);
        assert_eq!(s.last_error, None);
        assert_eq!(s.last_action_timestamp, NOW + DAY);
    }

    #[test]
    fn test_claim_during_cooldown_is_rejected() {
        let h = harness(10.0);
        block_on(h.vm.stake("1")).unwrap();
        h.clock.advance(DAY - 1);
        let err = block_on(h.vm.claim()).unwrap_err();
        assert_eq!(err, StakingError::Cooldown { remaining: 1 });
        assert_eq!(h.vm.snapshot().pending_reward, 0.07);
    }

    #[test]
    fn test_claim_resets_streak_and_keeps_principal() {
        let h = harness(10.0);
        block_on(h.vm.compound()).unwrap();
        h.clock.advance(DAY);
        h.vm.tick_accrual();
        block_on(h.vm.compound()).unwrap();
        assert_eq!(h.vm.snapshot().compound_streak, 2);
        assert_eq!(h.vm.snapshot().staked_amount, 0.071);

        h.clock.advance(DAY);
        h.vm.tick_accrual();
        let outcome = block_on(h.vm.claim()).unwrap();
        assert_eq!(outcome.amount, 0.0);
        let s = h.vm.snapshot();
        assert_eq!(s.pending_reward, 0.0);
        assert_eq!(s.compound_streak, 0);
        assert_eq!(s.staked_amount, 0.071);
        assert_eq!(s.total_value_locked, 0.071);
    }

    #[test]
    fn test_accrual_is_linear_in_ticks() {
        let h = harness(0.0);
        for _ in 0..12 {
            h.vm.tick_accrual();
        }
        assert_eq!(h.vm.snapshot().pending_reward, 0.082);
    }

    #[test]
    fn test_cooldown_tick_counts_down_monotonically() {
        let h = harness(10.0);
        block_on(h.vm.stake("0.7")).unwrap();
        let mut previous = h.vm.snapshot().cooldown.remaining;
        assert_eq!(previous, DAY);
        for _ in 0..5 {
            h.clock.advance(1);
            h.vm.tick_cooldown();
            let remaining = h.vm.snapshot().cooldown.remaining;
            assert!(remaining < previous);
            previous = remaining;
        }
        assert_eq!(h.vm.snapshot().cooldown.formatted(), "23:59:55");
    }

    #[test]
    fn test_execution_failure_is_all_or_nothing() {
        let h = harness_with(10.0, ScriptedSettlement::failing());
        let err = block_on(h.vm.stake("0.7")).unwrap_err();
        assert!(matches!(err, StakingError::Execution { action: ActionKind::Stake, .. }));

        let s = h.vm.snapshot();
        assert_eq!(s.staked_amount, 0.0);
        assert_eq!(s.total_value_locked, 0.0);
        assert_eq!(s.stake_input, "0.7");
        assert_eq!(s.last_action_timestamp, 0);
        assert_eq!(s.phase, ActionPhase::Idle);
        assert_eq!(s.last_error.as_deref(), Some("Failed to stake. Please try again."));
        assert_eq!(h.balance.refetch_calls.get(), 0);

        let err = block_on(h.vm.claim()).unwrap_err();
        assert_eq!(err.user_message(), "Failed to claim. Please try again.");
        assert_eq!(h.vm.snapshot().pending_reward, 0.07);
    }

    #[test]
    fn test_new_attempt_clears_previous_error() {
        let h = harness(10.0);
        block_on(h.vm.stake("abc")).unwrap_err();
        assert!(h.vm.snapshot().last_error.is_some());
        block_on(h.vm.stake("1")).unwrap();
        assert_eq!(h.vm.snapshot().last_error, None);
    }

    #[test]
    fn test_refresh_failure_does_not_set_error() {
        let h = harness(10.0);
        h.balance.fail_refetch.set(true);
        block_on(h.vm.stake("2")).unwrap();
        let s = h.vm.snapshot();
        assert_eq!(s.staked_amount, 2.0);
        assert_eq!(s.last_error, None);
        assert!(!s.balance_loading);
        assert_eq!(h.balance.refetch_calls.get(), 1);
    }

    #[test]
    fn test_second_action_while_in_flight_is_rejected() {
        let h = harness(10.0);
        let release = h.settlement.hold_next();
        let vm = &h.vm;

        let first = vm.stake("0.7");
        let second = async move {
            assert!(vm.snapshot().action_in_flight());
            assert_eq!(vm.snapshot().active_action, Some(ActionKind::Stake));
            assert!(!vm.controls().stake_enabled);

            let rejected = vm.claim().await;
            vm.tick_accrual();
            release.send(()).unwrap();
            rejected
        };
        let (first, second) = block_on(async { futures::join!(first, second) });

        assert_eq!(
            second.unwrap_err(),
            StakingError::ConcurrentAction { in_flight: ActionKind::Stake }
        );
        first.unwrap();

        let s = h.vm.snapshot();
        assert_eq!(s.staked_amount, 0.7);
        assert_eq!(s.pending_reward, 0.071);
        assert_eq!(s.compound_streak, 0);
        assert_eq!(s.last_error, None);
        assert_eq!(s.phase, ActionPhase::Idle);
        assert_eq!(*h.settlement.settled.borrow(), vec![ActionKind::Stake]);
    }

    #[test]
    fn test_compound_reinvests_reward_accrued_while_executing() {
        let h = harness(10.0);
        let release = h.settlement.hold_next();
        let vm = &h.vm;

        let compound = vm.compound();
        let ticker = async move {
            vm.tick_accrual();
            vm.tick_accrual();
            release.send(()).unwrap();
        };
        let (outcome, ()) = block_on(async { futures::join!(compound, ticker) });

        assert_eq!(outcome.unwrap().amount, 0.072);
        assert_eq!(h.vm.snapshot().staked_amount, 0.072);
        assert_eq!(h.vm.snapshot().pending_reward, 0.0);
    }

    #[test]
    fn test_controls_follow_cooldown_and_balance_loading() {
        let h = harness(10.0);
        assert_eq!(
            h.vm.controls(),
            PanelControls {
                stake_enabled: true,
                compound_enabled: true,
                claim_enabled: true,
                refresh_enabled: true,
            }
        );

        block_on(h.vm.stake("1")).unwrap();
        let controls = h.vm.controls();
        assert!(controls.stake_enabled);
        assert!(!controls.compound_enabled);
        assert!(!controls.claim_enabled);

        h.balance.loading.set(true);
        let controls = h.vm.controls();
        assert!(!controls.stake_enabled);
        assert!(!controls.refresh_enabled);
    }

    #[test]
    fn test_tick_reports_wallet_change() {
        let wallet = Rc::new(TestWallet::new(None));
        let providers = PanelProviders {
            wallet: wallet.clone(),
            balance: Rc::new(ScriptedBalance::new(3.5)),
            clock: Rc::new(ManualClock::new(NOW)),
            settlement: Rc::new(ScriptedSettlement::immediate()),
        };
        let vm = StakingViewModel::new(providers, &PanelConfig::default());
        assert!(!vm.snapshot().is_connected());
        assert!(!vm.tick_cooldown());

        wallet.set(Some("Wa11et1111111111111111111111111111111111111"));
        assert!(vm.tick_cooldown());
        assert!(vm.snapshot().is_connected());
        assert_eq!(vm.snapshot().balance, 3.5);
        assert!(!vm.tick_cooldown());

        wallet.set(None);
        assert!(vm.tick_cooldown());
        assert!(!vm.snapshot().is_connected());
    }
}
