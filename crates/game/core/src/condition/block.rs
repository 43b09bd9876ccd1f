use arrayvec::ArrayVec;

use super::{Condition, EvalPolicy, RawCondition};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, LevelState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    #[error("block declares {count} conditions, at most {} are allowed", GameConfig::MAX_REQUIREMENTS)]
    TooMany { count: usize },
}

impl GameError for ConditionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooMany { .. } => "CONDITION_TOO_MANY",
        }
    }
}

/// Ordered conditions plus the policy that combines them.
///
/// A block without conditions passes unconditionally; its policy byte is
/// never consulted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConditionBlock {
    pub policy: EvalPolicy,
    pub conditions: ArrayVec<Condition, { GameConfig::MAX_REQUIREMENTS }>,
}

impl ConditionBlock {
    pub fn new(
        policy: EvalPolicy,
        conditions: impl IntoIterator<Item = Condition>,
    ) -> Result<Self, ConditionError> {
        let mut block = Self {
            policy,
            conditions: ArrayVec::new(),
        };
        let mut count = 0;
        for condition in conditions {
            count += 1;
            if block.conditions.try_push(condition).is_err() {
                return Err(ConditionError::TooMany { count });
            }
        }
        Ok(block)
    }

    /// Decodes a block from its policy byte and raw condition records.
    pub fn decode(policy: u8, raw: &[RawCondition]) -> Result<Self, ConditionError> {
        if raw.len() > GameConfig::MAX_REQUIREMENTS {
            return Err(ConditionError::TooMany { count: raw.len() });
        }
        Self::new(
            EvalPolicy::from_byte(policy),
            raw.iter().copied().map(Condition::decode),
        )
    }

    /// Single-condition block combined with AND.
    pub fn single(condition: Condition) -> Self {
        let mut conditions = ArrayVec::new();
        conditions.push(condition);
        Self {
            policy: EvalPolicy::And,
            conditions,
        }
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Whether the block lets the gated feature through right now.
    pub fn passes(&self, game: &GameState, level: &LevelState) -> bool {
        self.is_empty() || evaluate(game, level, &self.conditions, self.policy)
    }
}

/// Tallies every condition against the current state and folds the tally
/// with `policy`.
///
/// Callers must special-case an empty list: with the `Empty` policy the
/// engine itself answers `false`. An [`Condition::Unsupported`] entry fails
/// the whole block without consulting the policy.
pub fn evaluate(
    game: &GameState,
    level: &LevelState,
    conditions: &[Condition],
    policy: EvalPolicy,
) -> bool {
    if let Some(unsupported) = conditions.iter().find(|c| c.is_unsupported()) {
        tracing::warn!(raw = ?unsupported.encode(), "unsupported condition kind");
        return false;
    }
    let true_count = conditions
        .iter()
        .filter(|condition| condition.holds(game, level))
        .count();
    let verdict = policy.combine(true_count, conditions.len());
    tracing::trace!(
        ?policy,
        true_count,
        count = conditions.len(),
        verdict,
        "condition block evaluated"
    );
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Attribute;
    use crate::state::{Party, PlayerState};

    fn hp_at_least(threshold: u8) -> Condition {
        Condition::PlayerAttribute {
            attribute: Attribute::HitPoints,
            threshold,
        }
    }

    fn game_with_leader_hp(hp: u16) -> GameState {
        GameState::new(Party::with_leader(PlayerState::new("Argus").with_hp(hp)))
    }

    #[test]
    fn empty_block_passes_whatever_its_policy() {
        let game = GameState::default();
        let level = LevelState::default();
        for policy in [0x00, 0x10, 0x20, 0x30, 0x40, 0x77] {
            let block = ConditionBlock::decode(policy, &[]).expect("empty block");
            assert!(block.passes(&game, &level));
        }
        assert!(!evaluate(&game, &level, &[], EvalPolicy::Empty));
    }

    #[test]
    fn policies_fold_real_condition_results() {
        let game = game_with_leader_hp(10);
        let level = LevelState::default();
        // true, true, false
        let conditions = [hp_at_least(5), hp_at_least(10), hp_at_least(11)];
        assert!(!evaluate(&game, &level, &conditions, EvalPolicy::And));
        assert!(evaluate(&game, &level, &conditions, EvalPolicy::Or));
        assert!(!evaluate(&game, &level, &conditions, EvalPolicy::Nor));
        assert!(!evaluate(&game, &level, &conditions, EvalPolicy::Nand));
        assert!(evaluate(&game, &level, &conditions[2..], EvalPolicy::Nand));
        assert!(evaluate(&game, &level, &conditions[1..], EvalPolicy::Nand));
    }

    #[test]
    fn unsupported_kind_fails_the_whole_block() {
        let game = game_with_leader_hp(10);
        let level = LevelState::default();
        let block = ConditionBlock::new(
            EvalPolicy::Or,
            [Condition::Always, Condition::Unsupported([0x42, 0, 0, 0, 0])],
        )
        .expect("fits");
        assert!(!block.passes(&game, &level));
    }

    #[test]
    fn malformed_counts_as_one_false() {
        let game = game_with_leader_hp(10);
        let level = LevelState::default();
        let block = ConditionBlock::new(
            EvalPolicy::Or,
            [Condition::Always, Condition::Malformed([0x01, 0, 0x05, 1, 0])],
        )
        .expect("fits");
        assert!(block.passes(&game, &level));
        let nor = ConditionBlock {
            policy: EvalPolicy::Nor,
            ..block.clone()
        };
        assert!(!nor.passes(&game, &level));
        let only_malformed =
            ConditionBlock::new(EvalPolicy::Nor, [Condition::Malformed([0x01, 0, 0x05, 1, 0])])
                .expect("fits");
        assert!(only_malformed.passes(&game, &level));
    }

    #[test]
    fn block_capacity_is_enforced() {
        let raw = [[0u8; 5]; 9];
        assert_eq!(
            ConditionBlock::decode(0x10, &raw),
            Err(ConditionError::TooMany { count: 9 })
        );
        let conditions = std::iter::repeat_n(
            Condition::PartyAttribute {
                attribute: Attribute::Gold,
                threshold: 0,
            },
            9,
        );
        assert!(ConditionBlock::new(EvalPolicy::And, conditions).is_err());
    }
}
