/// How the individual results of a condition block combine into one verdict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvalPolicy {
    /// The block carries no conditions and is never evaluated.
    #[default]
    Empty,
    /// Every condition must hold.
    And,
    /// At least one condition must hold.
    Or,
    /// No condition may hold.
    Nor,
    /// At most one condition may hold.
    Nand,
    /// Unrecognised policy byte; never passes.
    Unknown(u8),
}

impl EvalPolicy {
    pub const EMPTY: u8 = 0x00;
    pub const AND: u8 = 0x10;
    pub const OR: u8 = 0x20;
    pub const NOR: u8 = 0x30;
    pub const NAND: u8 = 0x40;

    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            Self::EMPTY => Self::Empty,
            Self::AND => Self::And,
            Self::OR => Self::Or,
            Self::NOR => Self::Nor,
            Self::NAND => Self::Nand,
            other => Self::Unknown(other),
        }
    }

    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Empty => Self::EMPTY,
            Self::And => Self::AND,
            Self::Or => Self::OR,
            Self::Nor => Self::NOR,
            Self::Nand => Self::NAND,
            Self::Unknown(byte) => byte,
        }
    }

    /// Applies the policy to a tally of `true_count` passing conditions out of
    /// `count`. `Empty` and unknown policies always yield `false`; callers
    /// treat an empty block as passable before reaching this point.
    pub const fn combine(self, true_count: usize, count: usize) -> bool {
        let false_count = count - true_count;
        match self {
            Self::And => true_count == count,
            Self::Or => true_count > 0,
            Self::Nor => false_count == count,
            Self::Nand => true_count == 0 || true_count == 1,
            Self::Empty | Self::Unknown(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Exhaustive truth table for every block size the engine accepts.
    #[test]
    fn truth_tables_match_for_every_assignment() {
        for count in 0..=8usize {
            for mask in 0u32..(1 << count) {
                let true_count = mask.count_ones() as usize;
                assert_eq!(EvalPolicy::And.combine(true_count, count), true_count == count);
                assert_eq!(EvalPolicy::Or.combine(true_count, count), true_count > 0);
                assert_eq!(EvalPolicy::Nor.combine(true_count, count), true_count == 0);
                assert_eq!(EvalPolicy::Nand.combine(true_count, count), true_count <= 1);
                assert!(!EvalPolicy::Empty.combine(true_count, count));
                assert!(!EvalPolicy::Unknown(0x99).combine(true_count, count));
            }
        }
    }

    #[test]
    fn nand_is_at_most_one_not_negated_and() {
        // Two of three true: "not all" would pass, at-most-one does not.
        assert!(!EvalPolicy::Nand.combine(2, 3));
        assert!(EvalPolicy::Nand.combine(1, 3));
        assert!(EvalPolicy::Nand.combine(0, 3));
        // All true with a single condition still passes.
        assert!(EvalPolicy::Nand.combine(1, 1));
    }

    #[test]
    fn policy_bytes_round_trip() {
        for byte in [0x00, 0x10, 0x20, 0x30, 0x40, 0x55] {
            assert_eq!(EvalPolicy::from_byte(byte).as_byte(), byte);
        }
        assert_eq!(EvalPolicy::from_byte(0x55), EvalPolicy::Unknown(0x55));
    }
}
