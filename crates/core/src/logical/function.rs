//! Logical switch functions and their families
//!
//! Each function belongs to exactly one family. The family decides which
//! operands are read, what the per-context memory holds, and how the
//! AND-switch gate treats that memory.

/// Logical switch function (stored as `u8` in the model)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LogicalSwitchFunction {
    /// Disabled
    #[default]
    None = 0,
    /// `v1 == threshold`
    VEqual = 1,
    /// `v1 ~= threshold`
    VAlmostEqual = 2,
    /// `v1 > threshold`
    VPos = 3,
    /// `v1 < threshold`
    VNeg = 4,
    /// `|v1| > threshold`
    APos = 5,
    /// `|v1| < threshold`
    ANeg = 6,
    /// `s1 && s2`
    And = 7,
    /// `s1 || s2`
    Or = 8,
    /// `s1 ^ s2`
    Xor = 9,
    /// Timed edge of `s1`
    Edge = 10,
    /// `v1 == v2`
    Equal = 11,
    /// `v1 > v2`
    Greater = 12,
    /// `v1 < v2`
    Less = 13,
    /// Signed change of `v1` reaches threshold
    DiffEGreater = 14,
    /// Absolute change of `v1` reaches threshold
    ADiffEGreater = 15,
    /// Free-running on/off timer
    Timer = 16,
    /// Bistable latch set by `s1`, cleared by `s2`
    Sticky = 17,
}

/// Evaluation family of a logical switch function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionFamily {
    /// Disabled switch
    Disabled,
    /// Value against a constant threshold
    Offset,
    /// Boolean combination of two switch sources
    Bool,
    /// Timed edge detection
    Edge,
    /// Value against another value
    Comparison,
    /// Change of a value since the last trigger
    Difference,
    /// Free-running timer
    Timer,
    /// Bistable latch
    Sticky,
}

impl LogicalSwitchFunction {
    /// Decode a stored function code
    ///
    /// Unknown codes decode to [`LogicalSwitchFunction::None`], which always
    /// evaluates to `false`.
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::VEqual,
            2 => Self::VAlmostEqual,
            3 => Self::VPos,
            4 => Self::VNeg,
            5 => Self::APos,
            6 => Self::ANeg,
            7 => Self::And,
            8 => Self::Or,
            9 => Self::Xor,
            10 => Self::Edge,
            11 => Self::Equal,
            12 => Self::Greater,
            13 => Self::Less,
            14 => Self::DiffEGreater,
            15 => Self::ADiffEGreater,
            16 => Self::Timer,
            17 => Self::Sticky,
            _ => Self::None,
        }
    }

    /// Stored function code
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Evaluation family
    pub const fn family(self) -> FunctionFamily {
        match self {
            Self::None => FunctionFamily::Disabled,
            Self::VEqual | Self::VAlmostEqual | Self::VPos | Self::VNeg | Self::APos | Self::ANeg => {
                FunctionFamily::Offset
            }
            Self::And | Self::Or | Self::Xor => FunctionFamily::Bool,
            Self::Edge => FunctionFamily::Edge,
            Self::Equal | Self::Greater | Self::Less => FunctionFamily::Comparison,
            Self::DiffEGreater | Self::ADiffEGreater => FunctionFamily::Difference,
            Self::Timer => FunctionFamily::Timer,
            Self::Sticky => FunctionFamily::Sticky,
        }
    }

    /// Functions whose memory survives a failed AND-switch gate
    pub const fn keeps_memory_when_gated(self) -> bool {
        matches!(self, Self::Sticky | Self::Edge)
    }
}
