pub mod action;
pub mod amount;
pub mod cooldown;
pub mod session;

pub use action::{ActionKind, ActionOutcome, ActionPhase};
pub use amount::{format_amount, lamports_to_sol, parse_positive_amount, round4, LAMPORTS_PER_SOL};
pub use cooldown::{cooldown_remaining, CooldownStatus, DEFAULT_COOLDOWN_SECONDS};
pub use session::{short_wallet_id, StakingSession};
